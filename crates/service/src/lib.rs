//! Service layer for teleprompter
//!
//! Centralizes business logic between HTTP handlers and storage, and owns
//! the propagation of committed changes to namespace subscribers.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod error;
mod prompt_service;
pub mod propagator;
pub mod queue;


pub use error::ServiceError;
pub use prompt_service::PromptService;
pub use propagator::Propagator;
pub use queue::{ChannelQueue, NotificationQueue, PropagationError, WebhookQueue};
