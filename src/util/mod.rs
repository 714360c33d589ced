//! Utility types shared by every layer.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - [`Shape`] - Row-major array extents

mod error;
mod shape;

pub use error::*;
pub use shape::*;
