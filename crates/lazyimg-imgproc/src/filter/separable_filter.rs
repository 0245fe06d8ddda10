use std::ops::Mul;
use std::sync::OnceLock;

use lazyimg_image::{
    crop,
    view::{check_destination, ImageRef, ImageRefMut},
    BBox2i, CropView, Image, ImageError, ImageSize, ImageView, MulCoeff, PixelCast, PixelCursor,
    ProceduralCursor, ProductType,
};
use num_traits::One;

use super::convolution::convolve_at_point;
use super::correlate::correlate_1d_at_point;
use super::kernels::Kernel;
use crate::padding::{edge_extend, EdgeExtension};

/// Convolve each row of `src` with `kernel` and write the result into `dst`.
///
/// The source must be `kernel.len() - 1` columns wider than the destination and hold the same
/// number of rows; output column `x` reads the source columns `[x, x + kernel.len())`. Passing
/// transposed handles turns the row pass into a column pass.
fn convolve_1d<S, D, K>(src: ImageRef<'_, S>, dst: &mut ImageRefMut<'_, D>, kernel: &[K])
where
    S: Copy + MulCoeff<K>,
    D: PixelCast<ProductType<S, K>>,
    K: Copy,
{
    debug_assert_eq!(src.cols() + 1, dst.cols() + kernel.len());
    debug_assert_eq!(src.rows(), dst.rows());

    let mut srow = src.cursor();
    for y in 0..dst.rows() {
        let mut scol = srow;
        for x in 0..dst.cols() {
            let mut splane = scol;
            for p in 0..dst.planes() {
                let sum = correlate_1d_at_point(&splane, kernel.iter().rev().copied());
                dst.set(x, y, p, D::cast_from(sum));
                splane.next_plane();
            }
            scol.next_col();
        }
        srow.next_row();
    }
}

/// A 2D convolution with a kernel given as the outer product of a row and a column factor.
///
/// The kernel coefficient at `(i, j)` is `row_kernel[i] * col_kernel[j]`. Tiles are rasterized
/// in two 1D passes, so the work per pixel is proportional to the sum of the factor lengths
/// instead of their product. Point access goes through the dense outer product kernel, which is
/// built on the first query and cached.
///
/// An empty factor leaves its axis untouched.
///
/// # Examples
///
/// ```
/// use lazyimg_image::{view::to_image, Image, ImageSize, ImageView};
/// use lazyimg_imgproc::filter::SeparableConvolutionView;
/// use lazyimg_imgproc::padding::EdgeExtension;
///
/// let image = Image::from_size_val(ImageSize { width: 5, height: 5 }, 1, 1.0f32).unwrap();
/// let kernel = [1.0f32, 2.0, 1.0];
///
/// let view = SeparableConvolutionView::new(image, &kernel, &kernel, EdgeExtension::Zero);
/// let blurred = to_image(&view).unwrap();
///
/// assert_eq!(blurred.get(2, 2, 0), Some(&16.0));
/// assert_eq!(blurred.get(0, 0, 0), Some(&9.0));
/// assert_eq!(view.get(0, 0, 0), 9.0);
/// ```
#[derive(Clone, Debug)]
pub struct SeparableConvolutionView<V, K> {
    image: V,
    i_kernel: Vec<K>,
    j_kernel: Vec<K>,
    ci: usize,
    cj: usize,
    edge: EdgeExtension,
    kernel2d: OnceLock<Kernel<K>>,
}

impl<V, K> SeparableConvolutionView<V, K>
where
    V: ImageView,
    K: Copy + One + Mul<Output = K>,
{
    /// Create a separable convolution view with the origin at the center of each factor.
    pub fn new(image: V, row_kernel: &[K], col_kernel: &[K], edge: EdgeExtension) -> Self {
        let ci = row_kernel.len().saturating_sub(1) / 2;
        let cj = col_kernel.len().saturating_sub(1) / 2;
        Self::with_origin(image, row_kernel, col_kernel, ci, cj, edge)
    }

    /// Create a separable convolution view with the origin at `ci` in the row factor and `cj`
    /// in the column factor.
    ///
    /// The origin of an empty factor must be 0.
    pub fn with_origin(
        image: V,
        row_kernel: &[K],
        col_kernel: &[K],
        ci: usize,
        cj: usize,
        edge: EdgeExtension,
    ) -> Self {
        debug_assert!(ci < row_kernel.len().max(1), "row origin {ci} outside the row factor");
        debug_assert!(cj < col_kernel.len().max(1), "column origin {cj} outside the column factor");
        Self {
            image,
            i_kernel: row_kernel.to_vec(),
            j_kernel: col_kernel.to_vec(),
            ci,
            cj,
            edge,
            kernel2d: OnceLock::new(),
        }
    }

    /// The convolved image.
    pub fn image(&self) -> &V {
        &self.image
    }

    /// The row factor.
    pub fn row_kernel(&self) -> &[K] {
        &self.i_kernel
    }

    /// The column factor.
    pub fn col_kernel(&self) -> &[K] {
        &self.j_kernel
    }

    /// The origin of the kernel.
    pub fn kernel_origin(&self) -> (usize, usize) {
        (self.ci, self.cj)
    }

    /// The edge extension applied to the image.
    pub fn edge(&self) -> EdgeExtension {
        self.edge
    }

    /// The dense outer product of the factors, built on the first call.
    pub fn kernel2d(&self) -> &Kernel<K> {
        self.kernel2d.get_or_init(|| {
            log::debug!(
                "separable convolution: building the {}x{} outer product kernel",
                self.i_kernel.len().max(1),
                self.j_kernel.len().max(1)
            );
            Kernel::from_outer_product(&self.i_kernel, &self.j_kernel)
        })
    }

    fn rotated_origin(&self) -> (isize, isize) {
        let rotate = |len: usize, c: usize| if len > 0 { (len - 1 - c) as isize } else { 0 };
        (
            rotate(self.i_kernel.len(), self.ci),
            rotate(self.j_kernel.len(), self.cj),
        )
    }

    // the source region read by the output pixels of `bbox`
    fn child_bbox(&self, bbox: BBox2i) -> BBox2i {
        let (ni, nj) = (self.i_kernel.len(), self.j_kernel.len());
        let before = |len: usize, c: usize| if len > 0 { len - 1 - c } else { 0 };
        let after = |len: usize, c: usize| if len > 0 { c } else { 0 };
        bbox.grow(
            before(ni, self.ci),
            before(nj, self.cj),
            after(ni, self.ci),
            after(nj, self.cj),
        )
    }
}

impl<V, K> SeparableConvolutionView<V, K>
where
    V: ImageView,
    V::Pixel: MulCoeff<K> + Default,
    ProductType<V::Pixel, K>: MulCoeff<K, Output = ProductType<V::Pixel, K>>,
    K: Copy + One + Mul<Output = K>,
{
    // `dst` has already been checked against `bbox`
    fn rasterize_tile(
        &self,
        dst: &mut ImageRefMut<'_, ProductType<V::Pixel, K>>,
        bbox: BBox2i,
    ) -> Result<(), ImageError> {
        let (ni, nj) = (self.i_kernel.len(), self.j_kernel.len());

        if ni == 0 && nj == 0 {
            let src = edge_extend(&self.image, bbox, self.edge)?;
            for y in 0..bbox.height {
                for x in 0..bbox.width {
                    for p in 0..dst.planes() {
                        let pixel = *src.get_unchecked(x, y, p);
                        dst.set(x, y, p, pixel.mul_coeff(K::one()));
                    }
                }
            }
            return Ok(());
        }

        let child_bbox = self.child_bbox(bbox);
        let src = edge_extend(&self.image, child_bbox, self.edge)?;

        if nj == 0 {
            convolve_1d(src.as_view(), dst, &self.i_kernel);
        } else if ni == 0 {
            convolve_1d(
                src.as_view().transpose(),
                &mut dst.reborrow().transpose(),
                &self.j_kernel,
            );
        } else {
            let size = ImageSize {
                width: bbox.width,
                height: child_bbox.height,
            };
            let mut work = Image::from_fn(size, self.image.planes(), |_, _, _| {
                ProductType::<V::Pixel, K>::default()
            });
            convolve_1d(src.as_view(), &mut work.as_view_mut(), &self.i_kernel);
            drop(src);

            convolve_1d(
                work.as_view().transpose(),
                &mut dst.reborrow().transpose(),
                &self.j_kernel,
            );
        }
        Ok(())
    }
}

impl<V, K> ImageView for SeparableConvolutionView<V, K>
where
    V: ImageView,
    V::Pixel: MulCoeff<K> + Default,
    ProductType<V::Pixel, K>: MulCoeff<K, Output = ProductType<V::Pixel, K>>,
    K: Copy + One + Mul<Output = K>,
{
    type Pixel = ProductType<V::Pixel, K>;
    type Cursor<'a>
        = ProceduralCursor<'a, Self>
    where
        Self: 'a;
    type Prerasterized<'a>
        = CropView<Image<ProductType<V::Pixel, K>>>
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
        convolve_at_point(&self.image, self.kernel2d(), ci, cj, Some(self.edge), x, y, p)
    }

    fn origin(&self) -> ProceduralCursor<'_, Self> {
        ProceduralCursor::new(self)
    }

    fn prerasterize(&self, bbox: BBox2i) -> Result<Self::Prerasterized<'_>, ImageError> {
        let size = ImageSize {
            width: bbox.width,
            height: bbox.height,
        };
        let mut tile = Image::from_fn(size, self.planes(), |_, _, _| Self::Pixel::default());
        self.rasterize_tile(&mut tile.as_view_mut(), bbox)?;
        Ok(crop(tile, -bbox.x, -bbox.y, self.cols(), self.rows()))
    }

    fn rasterize(
        &self,
        dst: &mut ImageRefMut<'_, Self::Pixel>,
        bbox: BBox2i,
    ) -> Result<(), ImageError> {
        check_destination(dst, bbox, self.planes())?;
        log::trace!(
            "separable convolution: rasterizing {:?} with {}+{} taps",
            bbox,
            self.i_kernel.len(),
            self.j_kernel.len()
        );
        self.rasterize_tile(dst, bbox)
    }
}
