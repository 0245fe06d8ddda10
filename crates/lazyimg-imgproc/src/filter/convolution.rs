use lazyimg_image::{
    crop,
    view::{check_destination, rasterize, to_image_region, ImageRefMut},
    BBox2i, CropView, Image, ImageError, ImageView, MulCoeff, PixelCursor, ProceduralCursor,
    ProductType,
};

use super::correlate::correlate_2d_at_point;
use super::kernels::Kernel;
use crate::padding::{edge_extend, edge_extend_view, EdgeExtension};

/// Convolve `image` with `kernel` at a single output pixel.
///
/// `(ci, cj)` is the origin offset measured on the kernel rotated by 180 degrees, i.e.
/// `(cols - 1 - ci, rows - 1 - cj)` for an origin `(ci, cj)` of the kernel itself. Windows fully
/// inside the image are read directly, the others through the edge extension. Without an edge
/// extension every window is read directly and must be covered by the image.
#[allow(clippy::too_many_arguments)]
#[inline]
pub(crate) fn convolve_at_point<V, K>(
    image: &V,
    kernel: &Kernel<K>,
    ci: isize,
    cj: isize,
    edge: Option<EdgeExtension>,
    x: isize,
    y: isize,
    p: usize,
) -> ProductType<V::Pixel, K>
where
    V: ImageView,
    V::Pixel: MulCoeff<K> + Default,
    K: Copy,
{
    let (kcols, krows) = (kernel.cols() as isize, kernel.rows() as isize);
    let (cols, rows) = (image.cols() as isize, image.rows() as isize);

    let inside = x >= ci && y >= cj && x <= cols - kcols + ci && y <= rows - krows + cj;
    match edge {
        Some(edge) if !inside => correlate_2d_at_point(
            &edge_extend_view(image, edge)
                .origin()
                .advanced(x - ci, y - cj, p as isize),
            &kernel.rotated_origin(),
            kernel.cols(),
            kernel.rows(),
        ),
        _ => correlate_2d_at_point(
            &image.origin().advanced(x - ci, y - cj, p as isize),
            &kernel.rotated_origin(),
            kernel.cols(),
            kernel.rows(),
        ),
    }
}

/// A standard 2D convolution view.
///
/// Represents the convolution of an image with a 2D kernel, evaluated lazily. The extent of the
/// view is the extent of the image; pixels whose kernel window leaves the image read the image
/// through its edge extension.
///
/// # Examples
///
/// ```
/// use lazyimg_image::{Image, ImageSize, ImageView};
/// use lazyimg_imgproc::filter::{ConvolutionView, Kernel};
/// use lazyimg_imgproc::padding::EdgeExtension;
///
/// let image = Image::from_size_val(ImageSize { width: 5, height: 5 }, 1, 1.0f32).unwrap();
/// let kernel = Kernel::new(3, 3, vec![1.0f32 / 9.0; 9]).unwrap();
///
/// let view = ConvolutionView::new(image, kernel, EdgeExtension::Zero);
///
/// assert!((view.get(2, 2, 0) - 1.0).abs() < 1e-5);
/// assert!((view.get(0, 0, 0) - 4.0 / 9.0).abs() < 1e-5);
/// ```
#[derive(Clone, Debug)]
pub struct ConvolutionView<V, K> {
    image: V,
    kernel: Kernel<K>,
    ci: usize,
    cj: usize,
    // `None` once the source buffer covers every kernel window
    edge: Option<EdgeExtension>,
}

impl<V: ImageView, K: Copy> ConvolutionView<V, K> {
    /// Create a convolution view with the origin of the kernel at its center.
    pub fn new(image: V, kernel: Kernel<K>, edge: EdgeExtension) -> Self {
        let (ci, cj) = kernel.center();
        Self::with_origin(image, kernel, ci, cj, edge)
    }

    /// Create a convolution view with the origin of the kernel at `(ci, cj)`.
    ///
    /// The origin is the kernel coefficient aligned with the output pixel and must lie inside
    /// the kernel.
    pub fn with_origin(
        image: V,
        kernel: Kernel<K>,
        ci: usize,
        cj: usize,
        edge: EdgeExtension,
    ) -> Self {
        debug_assert!(
            ci < kernel.cols() && cj < kernel.rows(),
            "kernel origin ({ci}, {cj}) outside a {}x{} kernel",
            kernel.cols(),
            kernel.rows()
        );
        Self {
            image,
            kernel,
            ci,
            cj,
            edge: Some(edge),
        }
    }

    /// The convolved image.
    pub fn image(&self) -> &V {
        &self.image
    }

    /// The convolution kernel.
    pub fn kernel(&self) -> &Kernel<K> {
        &self.kernel
    }

    /// The origin of the kernel.
    pub fn kernel_origin(&self) -> (usize, usize) {
        (self.ci, self.cj)
    }

    /// The edge extension applied to the image.
    ///
    /// `None` for prerasterized views, whose source already covers every kernel window.
    pub fn edge(&self) -> Option<EdgeExtension> {
        self.edge
    }

    // the origin measured on the kernel rotated by 180 degrees
    fn rotated_origin(&self) -> (isize, isize) {
        (
            (self.kernel.cols() - 1 - self.ci) as isize,
            (self.kernel.rows() - 1 - self.cj) as isize,
        )
    }
}

impl<V, K> ImageView for ConvolutionView<V, K>
where
    V: ImageView,
    V::Pixel: MulCoeff<K> + Default,
    K: Copy,
{
    type Pixel = ProductType<V::Pixel, K>;
    type Cursor<'a>
        = ProceduralCursor<'a, Self>
    where
        Self: 'a;
    type Prerasterized<'a>
        = ConvolutionView<CropView<Image<V::Pixel>>, K>
    where
        Self: 'a;

    fn cols(&self) -> usize {
        self.image.cols()
    }

    fn rows(&self) -> usize {
        self.image.rows()
    }

    fn planes(&self) -> usize {
        self.image.planes()
    }

    fn get(&self, x: isize, y: isize, p: usize) -> Self::Pixel {
        let (ci, cj) = self.rotated_origin();
        convolve_at_point(&self.image, &self.kernel, ci, cj, self.edge, x, y, p)
    }

    fn origin(&self) -> ProceduralCursor<'_, Self> {
        ProceduralCursor::new(self)
    }

    /// Materialize the edge extended source pixels the tile depends on.
    ///
    /// The returned view convolves that buffer, positioned in the coordinate frame of the
    /// image, without any further edge extension.
    fn prerasterize(&self, bbox: BBox2i) -> Result<Self::Prerasterized<'_>, ImageError> {
        let (ci, cj) = self.rotated_origin();
        let src_bbox = BBox2i::new(
            bbox.x - ci,
            bbox.y - cj,
            bbox.width + self.kernel.cols() - 1,
            bbox.height + self.kernel.rows() - 1,
        );
        let src = match self.edge {
            Some(edge) => edge_extend(&self.image, src_bbox, edge)?,
            None => to_image_region(&self.image, src_bbox)?,
        };

        Ok(ConvolutionView {
            image: crop(
                src,
                -src_bbox.x,
                -src_bbox.y,
                self.image.cols(),
                self.image.rows(),
            ),
            kernel: self.kernel.clone(),
            ci: self.ci,
            cj: self.cj,
            edge: None,
        })
    }

    fn rasterize(
        &self,
        dst: &mut ImageRefMut<'_, Self::Pixel>,
        bbox: BBox2i,
    ) -> Result<(), ImageError> {
        check_destination(dst, bbox, self.planes())?;
        log::trace!(
            "convolution: rasterizing {:?} with a {}x{} kernel",
            bbox,
            self.kernel.cols(),
            self.kernel.rows()
        );
        rasterize(&self.prerasterize(bbox)?, dst, bbox)
    }
}
