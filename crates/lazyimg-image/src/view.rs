use crate::bbox::BBox2i;
use crate::cursor::{PixelCursor, StridedCursor};
use crate::error::ImageError;
use crate::image::{Image, ImageSize};

/// A lazily evaluated image.
///
/// A view exposes its extent, point access to its pixels and a cursor at its origin. Views
/// commit to producing pixel data for a rectangular region through the rasterization protocol:
///
/// * [`ImageView::prerasterize`] returns a view that is cheaper to evaluate over the given
///   region, expressed in the same coordinate frame as `self`.
/// * [`ImageView::rasterize`] writes the pixels of the region into a destination.
///
/// Point access must be defined for every position inside `[0, cols) x [0, rows)`; views that
/// extend their edges are defined everywhere.
pub trait ImageView {
    /// The pixel type of the view.
    type Pixel: Copy;

    /// The cursor returned by [`ImageView::origin`].
    type Cursor<'a>: PixelCursor<Pixel = Self::Pixel>
    where
        Self: 'a;

    /// The view returned by [`ImageView::prerasterize`].
    type Prerasterized<'a>: ImageView<Pixel = Self::Pixel>
    where
        Self: 'a;

    /// The number of columns.
    fn cols(&self) -> usize;

    /// The number of rows.
    fn rows(&self) -> usize;

    /// The number of planes.
    fn planes(&self) -> usize;

    /// The pixel at column `x`, row `y` and plane `p`.
    fn get(&self, x: isize, y: isize, p: usize) -> Self::Pixel;

    /// A cursor at column 0, row 0, plane 0.
    fn origin(&self) -> Self::Cursor<'_>;

    /// A view restricted to `bbox` that is cheaper to evaluate repeatedly.
    ///
    /// # Errors
    ///
    /// Propagates the errors of rasterizing the sources the returned view reads.
    fn prerasterize(&self, bbox: BBox2i) -> Result<Self::Prerasterized<'_>, ImageError>;

    /// Write the pixels of `bbox` into `dst`.
    ///
    /// # Errors
    ///
    /// If the size of `dst` does not match `bbox` or its number of planes does not match the
    /// view, an error is returned.
    fn rasterize(
        &self,
        dst: &mut ImageRefMut<'_, Self::Pixel>,
        bbox: BBox2i,
    ) -> Result<(), ImageError> {
        rasterize(&self.prerasterize(bbox)?, dst, bbox)
    }

    /// The bounding box of the view, `[0, cols) x [0, rows)`.
    fn bbox(&self) -> BBox2i {
        BBox2i::new(0, 0, self.cols(), self.rows())
    }
}

/// Check that `dst` can receive the pixels of `bbox` from a view with `planes` planes.
pub fn check_destination<T>(
    dst: &ImageRefMut<'_, T>,
    bbox: BBox2i,
    planes: usize,
) -> Result<(), ImageError> {
    if dst.cols() != bbox.width || dst.rows() != bbox.height {
        return Err(ImageError::InvalidImageSize(
            dst.cols(),
            dst.rows(),
            bbox.width,
            bbox.height,
        ));
    }

    if dst.planes() != planes {
        return Err(ImageError::InvalidPlaneCount(dst.planes(), planes));
    }

    Ok(())
}

/// Evaluate `view` over `bbox` pixel by pixel and write the result into `dst`.
///
/// The pixel `(x, y, p)` of `dst` receives the view pixel `(bbox.x + x, bbox.y + y, p)`.
///
/// # Errors
///
/// If the size of `dst` does not match `bbox` or its number of planes does not match the view,
/// an error is returned.
pub fn rasterize<V: ImageView + ?Sized>(
    view: &V,
    dst: &mut ImageRefMut<'_, V::Pixel>,
    bbox: BBox2i,
) -> Result<(), ImageError> {
    check_destination(dst, bbox, view.planes())?;

    let planes = view.planes();
    let mut srow = view.origin().advanced(bbox.x, bbox.y, 0);
    for y in 0..bbox.height {
        let mut scol = srow.clone();
        for x in 0..bbox.width {
            let mut splane = scol.clone();
            for p in 0..planes {
                dst.set(x, y, p, splane.get());
                splane.next_plane();
            }
            scol.next_col();
        }
        srow.next_row();
    }

    Ok(())
}

/// Rasterize the full extent of `view` into a new image.
///
/// # Errors
///
/// Propagates the errors of [`ImageView::rasterize`].
pub fn to_image<V: ImageView + ?Sized>(view: &V) -> Result<Image<V::Pixel>, ImageError>
where
    V::Pixel: Default,
{
    to_image_region(view, view.bbox())
}

/// Rasterize the region `bbox` of `view` into a new image of the size of `bbox`.
///
/// The pixel `(x, y)` of the result is the pixel `(bbox.x + x, bbox.y + y)` of the view.
///
/// # Errors
///
/// Propagates the errors of [`ImageView::rasterize`].
pub fn to_image_region<V: ImageView + ?Sized>(
    view: &V,
    bbox: BBox2i,
) -> Result<Image<V::Pixel>, ImageError>
where
    V::Pixel: Default,
{
    let size = ImageSize {
        width: bbox.width,
        height: bbox.height,
    };
    let mut image = Image::from_fn(size, view.planes(), |_, _, _| V::Pixel::default());
    view.rasterize(&mut image.as_view_mut(), bbox)?;
    Ok(image)
}

/// A borrowed, strided view into pixel data.
///
/// The handle is `Copy`, so views can hold it by value to share an image without copying it.
pub struct ImageRef<'a, T> {
    data: &'a [T],
    cols: usize,
    rows: usize,
    planes: usize,
    col_stride: isize,
    row_stride: isize,
}

impl<'a, T> ImageRef<'a, T> {
    /// Borrow interleaved row major pixel data of the given extent.
    ///
    /// # Panics
    ///
    /// Panics if `data` is shorter than `cols * rows * planes`.
    pub fn new(data: &'a [T], cols: usize, rows: usize, planes: usize) -> Self {
        assert!(data.len() >= cols * rows * planes);
        Self {
            data,
            cols,
            rows,
            planes,
            col_stride: planes as isize,
            row_stride: (cols * planes) as isize,
        }
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of planes.
    pub fn planes(&self) -> usize {
        self.planes
    }

    /// A view with rows and columns exchanged, without copying.
    pub fn transpose(self) -> Self {
        Self {
            data: self.data,
            cols: self.rows,
            rows: self.cols,
            planes: self.planes,
            col_stride: self.row_stride,
            row_stride: self.col_stride,
        }
    }

    /// A strided cursor at the origin, borrowing the underlying data.
    pub fn cursor(&self) -> StridedCursor<'a, T> {
        StridedCursor::new(self.data, 0, self.col_stride, self.row_stride, 1)
    }

    #[inline]
    fn offset(&self, x: isize, y: isize, p: usize) -> usize {
        (x * self.col_stride + y * self.row_stride) as usize + p
    }
}

impl<T> Clone for ImageRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ImageRef<'_, T> {}

impl<'a, T: Copy> ImageView for ImageRef<'a, T> {
    type Pixel = T;
    type Cursor<'b>
        = StridedCursor<'a, T>
    where
        Self: 'b;
    type Prerasterized<'b>
        = ImageRef<'a, T>
    where
        Self: 'b;

    fn cols(&self) -> usize {
        self.cols
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn planes(&self) -> usize {
        self.planes
    }

    #[inline]
    fn get(&self, x: isize, y: isize, p: usize) -> T {
        self.data[self.offset(x, y, p)]
    }

    fn origin(&self) -> StridedCursor<'a, T> {
        self.cursor()
    }

    fn prerasterize(&self, _bbox: BBox2i) -> Result<ImageRef<'a, T>, ImageError> {
        Ok(*self)
    }

    fn rasterize(&self, dst: &mut ImageRefMut<'_, T>, bbox: BBox2i) -> Result<(), ImageError> {
        rasterize(self, dst, bbox)
    }
}

impl<T: Copy> ImageView for Image<T> {
    type Pixel = T;
    type Cursor<'a>
        = StridedCursor<'a, T>
    where
        Self: 'a;
    type Prerasterized<'a>
        = ImageRef<'a, T>
    where
        Self: 'a;

    fn cols(&self) -> usize {
        Image::cols(self)
    }

    fn rows(&self) -> usize {
        Image::rows(self)
    }

    fn planes(&self) -> usize {
        Image::planes(self)
    }

    #[inline]
    fn get(&self, x: isize, y: isize, p: usize) -> T {
        *self.get_unchecked(x as usize, y as usize, p)
    }

    fn origin(&self) -> StridedCursor<'_, T> {
        self.as_view().cursor()
    }

    fn prerasterize(&self, _bbox: BBox2i) -> Result<ImageRef<'_, T>, ImageError> {
        Ok(self.as_view())
    }
}

/// A mutable, strided view into pixel data.
///
/// Used as the destination of the rasterization protocol.
pub struct ImageRefMut<'a, T> {
    data: &'a mut [T],
    cols: usize,
    rows: usize,
    planes: usize,
    col_stride: isize,
    row_stride: isize,
}

impl<'a, T> ImageRefMut<'a, T> {
    /// Mutably borrow interleaved row major pixel data of the given extent.
    ///
    /// # Panics
    ///
    /// Panics if `data` is shorter than `cols * rows * planes`.
    pub fn new(data: &'a mut [T], cols: usize, rows: usize, planes: usize) -> Self {
        assert!(data.len() >= cols * rows * planes);
        Self {
            data,
            cols,
            rows,
            planes,
            col_stride: planes as isize,
            row_stride: (cols * planes) as isize,
        }
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of planes.
    pub fn planes(&self) -> usize {
        self.planes
    }

    /// A view with rows and columns exchanged, without copying.
    pub fn transpose(self) -> Self {
        Self {
            data: self.data,
            cols: self.rows,
            rows: self.cols,
            planes: self.planes,
            col_stride: self.row_stride,
            row_stride: self.col_stride,
        }
    }

    /// Reborrow the view for a shorter lifetime.
    pub fn reborrow(&mut self) -> ImageRefMut<'_, T> {
        ImageRefMut {
            data: &mut *self.data,
            cols: self.cols,
            rows: self.rows,
            planes: self.planes,
            col_stride: self.col_stride,
            row_stride: self.row_stride,
        }
    }

    /// The `cols` x `rows` sub-window with top left corner `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the window does not fit in the view.
    pub fn window(&mut self, x: usize, y: usize, cols: usize, rows: usize) -> ImageRefMut<'_, T> {
        assert!(x + cols <= self.cols && y + rows <= self.rows);
        let start = if cols == 0 || rows == 0 {
            0
        } else {
            self.offset(x, y, 0)
        };
        ImageRefMut {
            data: &mut self.data[start..],
            cols,
            rows,
            planes: self.planes,
            col_stride: self.col_stride,
            row_stride: self.row_stride,
        }
    }

    #[inline]
    fn offset(&self, x: usize, y: usize, p: usize) -> usize {
        (x as isize * self.col_stride + y as isize * self.row_stride) as usize + p
    }

    /// Read the value at column `x`, row `y` and plane `p`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, p: usize) -> &T {
        &self.data[self.offset(x, y, p)]
    }

    /// Write the value at column `x`, row `y` and plane `p`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, p: usize, value: T) {
        let offset = self.offset(x, y, p);
        self.data[offset] = value;
    }
}
