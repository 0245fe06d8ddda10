use std::ops::Mul;

use lazyimg_image::{ImageError, ImageView};
use num_traits::One;

use super::{kernels, ConvolutionView, Kernel, SeparableConvolutionView};
use crate::padding::EdgeExtension;

/// Convolve an image with a 2D kernel centered on each pixel.
///
/// # Arguments
///
/// * `image` - The source image view.
/// * `kernel` - The convolution kernel.
/// * `edge` - How pixels outside the image are sampled.
pub fn convolution_filter<V: ImageView, K: Copy>(
    image: V,
    kernel: Kernel<K>,
    edge: EdgeExtension,
) -> ConvolutionView<V, K> {
    ConvolutionView::new(image, kernel, edge)
}

/// Convolve an image with a separable kernel centered on each pixel.
///
/// # Arguments
///
/// * `image` - The source image view.
/// * `kernel_x` - The factor applied along the rows.
/// * `kernel_y` - The factor applied along the columns.
/// * `edge` - How pixels outside the image are sampled.
pub fn separable_convolution_filter<V, K>(
    image: V,
    kernel_x: &[K],
    kernel_y: &[K],
    edge: EdgeExtension,
) -> SeparableConvolutionView<V, K>
where
    V: ImageView,
    K: Copy + One + Mul<Output = K>,
{
    SeparableConvolutionView::new(image, kernel_x, kernel_y, edge)
}

/// Blur an image using a box blur filter
///
/// # Arguments
///
/// * `image` - The source image view.
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y).
/// * `edge` - How pixels outside the image are sampled.
///
/// # Errors
///
/// If a kernel size is zero, an error is returned.
pub fn box_blur<V: ImageView>(
    image: V,
    kernel_size: (usize, usize),
    edge: EdgeExtension,
) -> Result<SeparableConvolutionView<V, f32>, ImageError> {
    let kernel_x = kernels::box_blur_kernel_1d(kernel_size.0)?;
    let kernel_y = kernels::box_blur_kernel_1d(kernel_size.1)?;
    Ok(SeparableConvolutionView::new(image, &kernel_x, &kernel_y, edge))
}

/// Blur an image using a gaussian blur filter
///
/// # Arguments
///
/// * `image` - The source image view.
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y).
/// * `sigma` - The sigma of the gaussian kernel, xy-ordered.
/// * `edge` - How pixels outside the image are sampled.
///
/// # Errors
///
/// If a kernel size is zero or a sigma is not positive, an error is returned.
pub fn gaussian_blur<V: ImageView>(
    image: V,
    kernel_size: (usize, usize),
    sigma: (f32, f32),
    edge: EdgeExtension,
) -> Result<SeparableConvolutionView<V, f32>, ImageError> {
    let kernel_x = kernels::gaussian_kernel_1d(kernel_size.0, sigma.0)?;
    let kernel_y = kernels::gaussian_kernel_1d(kernel_size.1, sigma.1)?;
    Ok(SeparableConvolutionView::new(image, &kernel_x, &kernel_y, edge))
}

// the sobel factors are given in correlation order, convolution reads them reversed
fn sobel_factors(kernel_size: usize) -> Result<(Vec<f32>, Vec<f32>), ImageError> {
    let (mut derivative, smooth) = kernels::sobel_kernel_1d(kernel_size)?;
    derivative.reverse();
    Ok((derivative, smooth))
}

/// Compute the horizontal sobel derivative of an image
///
/// The result is positive where the intensity increases with `x`.
///
/// # Arguments
///
/// * `image` - The source image view.
/// * `kernel_size` - The size of the kernel, 3 or 5.
/// * `edge` - How pixels outside the image are sampled.
///
/// # Errors
///
/// If the kernel size is not supported, an error is returned.
pub fn sobel_x<V: ImageView>(
    image: V,
    kernel_size: usize,
    edge: EdgeExtension,
) -> Result<SeparableConvolutionView<V, f32>, ImageError> {
    let (derivative, smooth) = sobel_factors(kernel_size)?;
    Ok(SeparableConvolutionView::new(image, &derivative, &smooth, edge))
}

/// Compute the vertical sobel derivative of an image
///
/// The result is positive where the intensity increases with `y`.
///
/// # Arguments
///
/// * `image` - The source image view.
/// * `kernel_size` - The size of the kernel, 3 or 5.
/// * `edge` - How pixels outside the image are sampled.
///
/// # Errors
///
/// If the kernel size is not supported, an error is returned.
pub fn sobel_y<V: ImageView>(
    image: V,
    kernel_size: usize,
    edge: EdgeExtension,
) -> Result<SeparableConvolutionView<V, f32>, ImageError> {
    let (derivative, smooth) = sobel_factors(kernel_size)?;
    Ok(SeparableConvolutionView::new(image, &smooth, &derivative, edge))
}

/// Apply the 3x3 laplacian operator to an image
pub fn laplacian_filter<V: ImageView>(image: V, edge: EdgeExtension) -> ConvolutionView<V, f32> {
    ConvolutionView::new(image, kernels::laplacian_kernel(), edge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lazyimg_image::{view::to_image, Image};

    #[test]
    fn test_box_blur() -> Result<(), ImageError> {
        let img = Image::from_fn([6, 5].into(), 1, |x, y, _| (x + y) as f32);
        let view = box_blur(img.as_view(), (3, 3), EdgeExtension::Replicate)?;

        // the mean of a linear ramp over a symmetric window is its center
        assert_relative_eq!(view.get(2, 2, 0), 4.0, epsilon = 1e-5);
        assert_relative_eq!(view.get(4, 3, 0), 7.0, epsilon = 1e-5);

        assert!(box_blur(img.as_view(), (0, 3), EdgeExtension::Zero).is_err());
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_preserves_constant() -> Result<(), ImageError> {
        let img = Image::from_size_val([7, 7].into(), 3, 0.5f32)?;
        let view = gaussian_blur(img, (5, 3), (1.5, 0.8), EdgeExtension::Reflect101)?;

        for &v in to_image(&view)?.as_slice() {
            assert_relative_eq!(v, 0.5, epsilon = 1e-5);
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_invalid_sigma() -> Result<(), ImageError> {
        let img = Image::from_size_val([3, 3].into(), 1, 0.0f32)?;
        assert_eq!(
            gaussian_blur(img, (3, 3), (0.0, 1.0), EdgeExtension::Zero).err(),
            Some(ImageError::InvalidGaussianSigma(0.0))
        );
        Ok(())
    }

    #[test]
    fn test_sobel() -> Result<(), ImageError> {
        let img = Image::from_fn([6, 6].into(), 1, |x, _, _| 2.0 * x as f32);

        let gx = to_image(&sobel_x(img.as_view(), 3, EdgeExtension::Replicate)?)?;
        let gy = to_image(&sobel_y(img.as_view(), 3, EdgeExtension::Replicate)?)?;

        for y in 0..6 {
            for x in 1..5 {
                // a slope of 2 weighted by a derivative span of 2 and a smoothing sum of 4
                assert_relative_eq!(*gx.get_unchecked(x, y, 0), 16.0);
            }
            for x in 0..6 {
                assert_relative_eq!(*gy.get_unchecked(x, y, 0), 0.0);
            }
        }

        assert!(sobel_x(img.as_view(), 4, EdgeExtension::Zero).is_err());
        Ok(())
    }

    #[test]
    fn test_laplacian_filter() -> Result<(), ImageError> {
        let img = Image::from_fn([5, 5].into(), 1, |x, y, _| (x * x + y) as f32);
        let view = laplacian_filter(img, EdgeExtension::Replicate);

        // second derivative of x^2 along x is 2, of a ramp along y is 0
        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(view.get(x, y, 0), 2.0);
            }
        }
        Ok(())
    }

    #[test]
    fn test_separable_matches_convolution_filter() -> Result<(), ImageError> {
        let img = Image::from_fn([5, 4].into(), 2, |x, y, p| (x * 3 + y * 5 + p) as f32);
        let (kx, ky) = ([1.0f32, -2.0, 0.5], [0.25f32, 0.75]);

        let separable = separable_convolution_filter(img.as_view(), &kx, &ky, EdgeExtension::Wrap);
        let general = convolution_filter(
            img.as_view(),
            Kernel::from_outer_product(&kx, &ky),
            EdgeExtension::Wrap,
        );

        let (a, b) = (to_image(&separable)?, to_image(&general)?);
        for (a, b) in a.as_slice().iter().zip(b.as_slice()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-4);
        }
        Ok(())
    }
}
