//! Drives one streamed message from fragments to rendered documents.
//!
//! The [`UpdateScheduler`] accumulates the message and decides when a full
//! reparse is due; the [`StreamSession`] runs that loop over a fragment
//! stream and hands each document to a [`chatmark_domain::DocumentSink`].

mod scheduler;
mod session;

pub use scheduler::*;
pub use session::*;
