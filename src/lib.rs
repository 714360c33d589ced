//! # scidata
//!
//! Field data sampled over axes with declared symmetries.
//!
//! A field stores only the samples it cannot rebuild: one smallest period
//! along periodic (and anti-periodic) axes, the unique set along grouped
//! pattern axes. Requests reconstruct any representation on demand: the full
//! range, one period, the smallest period, a coordinate range, or arbitrary
//! target coordinates.
//!
//! ## Modules
//!
//! - [`util`] - Errors and array shapes
//! - [`axis`] - Axis kinds, periodicity and pattern descriptors
//! - [`request`] - Request grammar (`time[oneperiod]`, `angle=[0,pi/4]`, ...)
//! - [`core`] - Reconstruction engine (coordinates + index/weight mappings)
//! - [`field`] - Fields and multi-axis `get_along`
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use scidata::prelude::*;
//!
//! let time = Axis::linspace("time", "s", 0.0, 10.0, 10, false)?
//!     .get_axis_periodic(5, false)?;
//! let field = Field::new("field", "X", vec![Arc::new(time)], vec![50.0, 55.0])?;
//!
//! let along = field.get_along(&["time"])?;
//! assert_eq!(along["X"], [50., 55., 50., 55., 50., 55., 50., 55., 50., 55.]);
//! # Ok::<(), scidata::Error>(())
//! ```

pub mod util;
pub mod axis;
pub mod request;
pub mod core;
pub mod field;

// Re-export commonly used types
pub use util::{Error, Result, Shape};
pub use axis::{Axis, AxisKind, Pattern, Periodicity};
pub use field::{Along, AxisData, Field};
pub use request::{AxisRequest, Modifier, Selection};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result, Shape};
    pub use crate::axis::{Axis, AxisKind, Linspace, Pattern, Periodicity};
    pub use crate::core::{IndexMap, Reconstruction};
    pub use crate::field::{Along, AxisData, Field};
    pub use crate::request::{AxisRequest, Modifier, Selection};
}
