#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Example
//!
//! ```
//! use lazyimg::image::{view::to_image, Image, ImageSize, ImageView};
//! use lazyimg::imgproc::{filter::gaussian_blur, padding::EdgeExtension};
//!
//! let image = Image::from_size_val(ImageSize { width: 8, height: 8 }, 3, 0.5f32).unwrap();
//! let blurred =
//!     gaussian_blur(image.as_view(), (5, 5), (1.0, 1.0), EdgeExtension::Reflect101).unwrap();
//!
//! assert_eq!(blurred.cols(), 8);
//! assert!((to_image(&blurred).unwrap().as_slice()[0] - 0.5).abs() < 1e-5);
//! ```

#[doc(inline)]
pub use lazyimg_image as image;

#[doc(inline)]
pub use lazyimg_imgproc as imgproc;
