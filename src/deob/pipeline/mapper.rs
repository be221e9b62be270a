//! Stream mapper trait and traversal infrastructure
//!
//! The `StreamMapper` trait is the interface for token-level transformations, and
//! `walk_stream` drives a mapper over a whole stream. Mappers only describe what
//! happens to a single token; the walker keeps token order and flattens the results.
//!
//! # Examples
//!
//! ```ignore
//! struct Upper;
//!
//! impl StreamMapper for Upper {
//!     fn name(&self) -> &str {
//!         "upper"
//!     }
//!
//!     fn map_token(&mut self, token: String) -> Result<Vec<String>, DeobError> {
//!         Ok(vec![token.to_uppercase()])
//!     }
//! }
//!
//! let stream = walk_stream(TokenStream::from("a;"), &mut Upper)?;
//! ```

use crate::deob::error::DeobError;
use crate::deob::pipeline::stream::TokenStream;

/// Trait for transforming token streams one token at a time.
///
/// A token may map to zero, one or many output tokens; the walker concatenates
/// the results in input order.
pub trait StreamMapper {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Transform a single token.
    fn map_token(&mut self, token: String) -> Result<Vec<String>, DeobError>;

    /// Transform a whole stream.
    ///
    /// The default implementation maps each token independently. Override it
    /// only when a transformation needs to see the stream as a whole.
    fn map_stream(&mut self, stream: TokenStream) -> Result<TokenStream, DeobError> {
        let mut output = Vec::with_capacity(stream.len());
        for token in stream {
            output.extend(self.map_token(token)?);
        }
        Ok(TokenStream::new(output))
    }
}

/// Walk a token stream, applying a mapper's transformation.
///
/// The input stream is consumed and a new one returned. An error from the mapper
/// aborts the walk; no partial stream is produced.
pub fn walk_stream(
    stream: TokenStream,
    mapper: &mut impl StreamMapper,
) -> Result<TokenStream, DeobError> {
    let tokens_in = stream.len();
    let output = mapper.map_stream(stream)?;
    tracing::debug!(
        stage = mapper.name(),
        tokens_in,
        tokens_out = output.len(),
        "stage complete"
    );
    Ok(output)
}
