//! Response normalization
//!
//! Recovers a cleaned answer and a positive/negative prompt pair from
//! whatever shape an OpenAI-compatible server returns.

pub mod assemble;
pub mod extract;
pub mod sanitize;
pub mod select;
pub mod split;

pub use assemble::{build_outputs, transport_error};
pub use extract::extract_text;
pub use sanitize::sanitize;
pub use select::select_source;
pub use split::{split_positive_negative, PromptPair};
