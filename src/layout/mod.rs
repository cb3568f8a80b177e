//! # Layout Core
//!
//! The text-layout pipeline: parse a line template into slots, wrap and
//! align field values on the fixed-pitch character grid, and compose
//! physical output lines from one row of bound data.
//!
//! Everything here is pure string arithmetic — no printer bytes except
//! the style pairs threaded through from the dialect, no I/O.

mod align;
mod compose;
mod template;
mod wrap;

pub use align::align;
pub use compose::{FieldResult, compose};
pub use template::{Slot, Template};
pub use wrap::wrap;
