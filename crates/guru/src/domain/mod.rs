//! Pure types and conversions shared by the window adapter and the tool runner.

pub mod errors;
pub mod model;
pub mod offset;
pub mod tag;
