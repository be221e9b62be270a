//! Command-line interface for deobfuscate
//! Reads a script, runs it through a processing configuration and writes the result.
//!
//! Usage:
//!   deobfuscate `<infile>` [-o `<outfile>`] [--config `<config>`] [--format `<format>`]
//!   deobfuscate --list-configs                     - List all available configurations

use clap::{Arg, ArgAction, Command};
use deob_config::{ConfigError, DeobConfig, Loader};
use deobfuscate::deob::formats::FormatError;
use deobfuscate::deob::pipeline::{ExecutionError, PipelineExecutor};
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("deobfuscate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Decode hex escapes, split statements and recover array literals in obfuscated scripts")
        .arg_required_else_help(true)
        .arg(
            Arg::new("infile")
                .help("Script to deobfuscate")
                .required_unless_present("list-configs")
                .index(1),
        )
        .arg(
            Arg::new("outfile")
                .long("output")
                .short('o')
                .help("Write the result here instead of stdout"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration name (e.g., 'default', 'resolve', 'arrays')"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: text, json or yaml"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .short('s')
                .help("TOML settings file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("delimiter")
                .long("delimiter")
                .short('d')
                .help("Linebreak delimiter, repeatable; applied in the order given")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("single-line-only")
                .long("single-line-only")
                .help("Only linebreak input that arrives as a single line")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline progress to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-configs")
                .long("list-configs")
                .help("List available processing configurations")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    let settings = load_settings(&matches).unwrap_or_else(|e| {
        eprintln!("Settings error: {}", e);
        std::process::exit(1);
    });
    let executor = PipelineExecutor::from_config(&settings);

    if matches.get_flag("list-configs") {
        handle_list_configs_command(&executor);
        return;
    }

    let Some(infile) = matches.get_one::<String>("infile") else {
        eprintln!("Error: an input file is required");
        std::process::exit(2);
    };
    let outfile = matches.get_one::<String>("outfile");
    handle_execute_command(&executor, &settings, infile, outfile.map(String::as_str));
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("deobfuscate=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Layer the settings file and command-line flags over the defaults
fn load_settings(matches: &clap::ArgMatches) -> Result<DeobConfig, ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("settings") {
        loader = loader.with_file(path);
    }
    if let Some(name) = matches.get_one::<String>("config") {
        loader = loader.set_override("pipeline.config", name.as_str())?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if let Some(delimiters) = matches.get_many::<String>("delimiter") {
        let delimiters: Vec<&str> = delimiters.map(String::as_str).collect();
        loader = loader.set_override("linebreak.delimiters", delimiters)?;
    }
    if matches.get_flag("single-line-only") {
        loader = loader.set_override("linebreak.single_line_only", true)?;
    }
    loader.build()
}

/// Deobfuscate `infile`, writing to `outfile` or stdout
fn handle_execute_command(
    executor: &PipelineExecutor,
    settings: &DeobConfig,
    infile: &str,
    outfile: Option<&str>,
) {
    let source = std::fs::read_to_string(infile).unwrap_or_else(|e| {
        eprintln!("Cannot read {infile}: {e}");
        std::process::exit(1);
    });

    let config = settings.pipeline.config.as_str();
    let format = settings.output.format.as_str();
    let output = match executor.execute_and_serialize(config, &source, format) {
        Ok(output) => output,
        Err(err @ ExecutionError::UnknownConfig(_)) => {
            eprintln!("{err}");
            handle_list_configs_command(executor);
            std::process::exit(1);
        }
        Err(err @ ExecutionError::Format(FormatError::UnknownFormat(_))) => {
            eprintln!("{err}; choose one of: {}", executor.list_formats().join(", "));
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let written = match outfile {
        Some(path) => std::fs::write(path, output),
        None => writeln!(std::io::stdout(), "{output}"),
    };
    if let Err(e) = written {
        eprintln!("Cannot write output: {e}");
        std::process::exit(1);
    }
}

/// Print the registered configurations with their stages
fn handle_list_configs_command(executor: &PipelineExecutor) {
    println!("Configurations:");
    for config in executor.list_configs() {
        println!(
            "  {:<12} {} [{}]",
            config.name,
            config.description,
            config.spec.stage_names().join(" > ")
        );
    }
}
