#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// axis aligned integer bounding boxes.
pub mod bbox;

/// cropping views.
pub mod crop;

/// pixel cursors to walk over pixel grids.
pub mod cursor;

/// Error types for the image module.
pub mod error;

/// image representation for computer vision purposes.
pub mod image;

/// pixel arithmetic used by the filters.
pub mod pixel;

/// the lazy image view trait and the rasterization protocol.
pub mod view;

pub use crate::bbox::BBox2i;
pub use crate::crop::{crop, CropView};
pub use crate::cursor::{PixelCursor, ProceduralCursor, StridedCursor};
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::pixel::{Accumulator, MulCoeff, PixelCast, PixelMask, ProductType};
pub use crate::view::{ImageRef, ImageRefMut, ImageView};
