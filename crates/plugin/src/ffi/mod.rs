//! C ABI exposed to the host
//!
//! - [`host`] - The function table the host hands over at startup
//! - [`exports`] - Lifecycle, callback and converter entry points
//! - [`value`] - Constructors and accessors for boxed script values

pub mod exports;
pub mod host;
pub mod value;
