//! Capability interface for the text-generation backend.
//!
//! The analyzer only needs "send these messages, get text back". Keeping
//! that behind [`CompletionProvider`] lets tests substitute a recording fake
//! and lets other chat-completion backends slot in without touching the
//! assessment logic.

use std::future::Future;
use std::pin::Pin;

use crate::Message;
use crate::error::AssessmentError;

/// Boxed future returned by [`CompletionProvider::complete`].
pub type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, AssessmentError>> + Send + 'a>>;

/// A backend that turns a conversation into a single text reply.
///
/// # Example
///
/// ```
/// use litscore::Message;
/// use litscore::provider::{CompletionFuture, CompletionProvider};
///
/// struct Echo;
///
/// impl CompletionProvider for Echo {
///     fn complete(&self, messages: Vec<Message>) -> CompletionFuture<'_> {
///         Box::pin(async move {
///             Ok(messages.last().map(|m| m.content.clone()).unwrap_or_default())
///         })
///     }
///
///     fn model(&self) -> &str {
///         "echo"
///     }
/// }
/// ```
pub trait CompletionProvider: Send + Sync {
    /// Send one conversation and return the raw reply text.
    ///
    /// Implementations map every failure onto one of the
    /// [`AssessmentError`] categories and never retry.
    fn complete(&self, messages: Vec<Message>) -> CompletionFuture<'_>;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Short provider label for logs and the status bar.
    fn provider_name(&self) -> &str {
        "custom"
    }
}

impl<P: CompletionProvider + ?Sized> CompletionProvider for std::sync::Arc<P> {
    fn complete(&self, messages: Vec<Message>) -> CompletionFuture<'_> {
        (**self).complete(messages)
    }

    fn model(&self) -> &str {
        (**self).model()
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}
