//! Weighted sums of a kernel against a window of source pixels.
//!
//! The primitives only walk cursors: checking that the window lies inside the source is the
//! responsibility of the caller.

use lazyimg_image::{Accumulator, MulCoeff, PixelCursor, ProductType};

/// Correlate a 1D kernel against the pixels following `src` along its row.
///
/// Computes `sum(k[i] * src[i])` for every coefficient yielded by `kernel`, moving the source
/// cursor one column per coefficient.
///
/// # Examples
///
/// ```
/// use lazyimg_image::{Image, ImageSize, ImageView, PixelCursor};
/// use lazyimg_imgproc::filter::correlate::correlate_1d_at_point;
///
/// let image = Image::new(ImageSize { width: 4, height: 1 }, 1, vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
///
/// let sum = correlate_1d_at_point(&image.origin().advanced(1, 0, 0), [1.0f32, 0.0, -1.0]);
///
/// assert_eq!(sum, -2.0);
/// ```
#[inline]
pub fn correlate_1d_at_point<S, I>(src: &S, kernel: I) -> ProductType<S::Pixel, I::Item>
where
    S: PixelCursor,
    I: IntoIterator,
    S::Pixel: MulCoeff<I::Item>,
{
    let mut result = ProductType::<S::Pixel, I::Item>::default();
    result.validate();

    let mut s = src.clone();
    for k in kernel {
        result += s.get().mul_coeff(k);
        s.next_col();
    }
    result
}

/// Correlate a `cols` x `rows` kernel against the window of `src` starting at the cursor.
///
/// Computes `sum(k[i, j] * src[i, j])`, moving the source and kernel cursors in lockstep.
#[inline]
pub fn correlate_2d_at_point<S, KC>(
    src: &S,
    kernel: &KC,
    cols: usize,
    rows: usize,
) -> ProductType<S::Pixel, KC::Pixel>
where
    S: PixelCursor,
    KC: PixelCursor,
    S::Pixel: MulCoeff<KC::Pixel>,
{
    let mut result = ProductType::<S::Pixel, KC::Pixel>::default();
    result.validate();

    let mut srow = src.clone();
    let mut krow = kernel.clone();
    for _ in 0..rows {
        let mut scol = srow.clone();
        let mut kcol = krow.clone();
        for _ in 0..cols {
            result += scol.get().mul_coeff(kcol.get());
            scol.next_col();
            kcol.next_col();
        }
        srow.next_row();
        krow.next_row();
    }
    result
}
