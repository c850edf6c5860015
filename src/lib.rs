//! OpenAI-compatible "ask" adapter
//!
//! Sends a question (optionally with an image) to an OpenAI-compatible
//! chat-completion endpoint and normalizes the free-form reply into a
//! positive/negative prompt pair, a cleaned answer, and the raw JSON body.

pub mod ai;
pub mod app;
pub mod error;
pub mod image;
pub mod models;
pub mod prompts;
pub mod response;

pub use error::{Error, Result};
