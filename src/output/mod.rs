//! Report output
//!
//! - `text`: console report and stripe renderer
//! - `json`: machine-readable report file

pub mod json;
pub mod text;
