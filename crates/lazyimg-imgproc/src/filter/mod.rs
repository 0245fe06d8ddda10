//! Filter operations
//!
//! This module provides lazy convolution views and the filters built on top of them.

/// Correlation primitives
pub mod correlate;

/// General 2D convolution view
mod convolution;
pub use convolution::*;

/// Filter kernels
pub mod kernels;
pub use kernels::Kernel;

/// Filter operations
mod ops;
pub use ops::*;

/// Separable convolution view
mod separable_filter;
pub use separable_filter::*;
