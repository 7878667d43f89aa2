//! Model Backend Abstraction
//!
//! Agents talk to language models through exactly one trait: [`ModelBackend`].
//! The crate ships no network client — embedders implement the trait over
//! whatever provider SDK they use and hand agents an `Arc<dyn ModelBackend>`.
//! Agents hold shared references to backends, never the underlying
//! connection or session.
//!
//! # Example
//!
//! ```ignore
//! use agentry::{ModelBackend, Result};
//! use async_trait::async_trait;
//!
//! struct MyClient;
//!
//! #[async_trait]
//! impl ModelBackend for MyClient {
//!     async fn complete(&self, prompt: &str) -> Result<String> {
//!         // call the provider SDK and return the completion text
//!         Ok(format!("completion for: {}", prompt))
//!     }
//!
//!     fn model_name(&self) -> &str {
//!         "my-model"
//!     }
//! }
//! ```

use crate::types::Result;
use async_trait::async_trait;

/// A language model capable of producing a completion for a rendered prompt.
///
/// Implementations are expected to be cheap to share behind an `Arc` and safe
/// to call concurrently; each `complete` call is independent.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Produce a completion for the given prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Identifier of the underlying model, used for logging.
    fn model_name(&self) -> &str;
}

impl std::fmt::Debug for dyn ModelBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBackend")
            .field("model_name", &self.model_name())
            .finish_non_exhaustive()
    }
}
