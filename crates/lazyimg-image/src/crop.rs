use crate::bbox::BBox2i;
use crate::cursor::PixelCursor;
use crate::error::ImageError;
use crate::view::{ImageRefMut, ImageView};

/// A view of a rectangular region of another view.
///
/// The pixel `(x, y)` of the crop is the pixel `(x + x0, y + y0)` of the child. The offsets may
/// be negative and the region may extend past the child, as long as only pixels the child can
/// produce are read.
#[derive(Clone, Debug)]
pub struct CropView<V> {
    child: V,
    x0: isize,
    y0: isize,
    cols: usize,
    rows: usize,
}

impl<V: ImageView> CropView<V> {
    /// Create a crop of `child` with top left corner `(x0, y0)` and the given extent.
    pub fn new(child: V, x0: isize, y0: isize, cols: usize, rows: usize) -> Self {
        Self {
            child,
            x0,
            y0,
            cols,
            rows,
        }
    }

    /// The cropped view.
    pub fn child(&self) -> &V {
        &self.child
    }

    /// Consume the crop and return the cropped view.
    pub fn into_child(self) -> V {
        self.child
    }
}

/// Crop `view` to the region with top left corner `(x0, y0)` and the given extent.
///
/// # Examples
///
/// ```
/// use lazyimg_image::{crop, Image, ImageSize, ImageView};
///
/// let image = Image::new(ImageSize { width: 4, height: 4 }, 1, vec![
///     0u8, 1, 2, 3,
///     4u8, 5, 6, 7,
///     8u8, 9, 10, 11,
///     12u8, 13, 14, 15
/// ]).unwrap();
///
/// let cropped = crop(image.as_view(), 1, 1, 2, 2);
///
/// assert_eq!(cropped.get(0, 0, 0), 5);
/// assert_eq!(cropped.get(1, 1, 0), 10);
/// ```
pub fn crop<V: ImageView>(view: V, x0: isize, y0: isize, cols: usize, rows: usize) -> CropView<V> {
    CropView::new(view, x0, y0, cols, rows)
}

impl<V: ImageView> ImageView for CropView<V> {
    type Pixel = V::Pixel;
    type Cursor<'a>
        = V::Cursor<'a>
    where
        Self: 'a;
    type Prerasterized<'a>
        = CropView<V::Prerasterized<'a>>
    where
        Self: 'a;

    fn cols(&self) -> usize {
        self.cols
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn planes(&self) -> usize {
        self.child.planes()
    }

    #[inline]
    fn get(&self, x: isize, y: isize, p: usize) -> V::Pixel {
        self.child.get(x + self.x0, y + self.y0, p)
    }

    fn origin(&self) -> V::Cursor<'_> {
        self.child.origin().advanced(self.x0, self.y0, 0)
    }

    fn prerasterize(&self, bbox: BBox2i) -> Result<Self::Prerasterized<'_>, ImageError> {
        Ok(CropView::new(
            self.child.prerasterize(bbox.translate(self.x0, self.y0))?,
            self.x0,
            self.y0,
            self.cols,
            self.rows,
        ))
    }

    fn rasterize(
        &self,
        dst: &mut ImageRefMut<'_, V::Pixel>,
        bbox: BBox2i,
    ) -> Result<(), ImageError> {
        self.child.rasterize(dst, bbox.translate(self.x0, self.y0))
    }
}
