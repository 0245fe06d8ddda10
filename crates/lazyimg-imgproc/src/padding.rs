use lazyimg_image::{
    crop,
    view::{check_destination, to_image_region, ImageRefMut},
    BBox2i, CropView, Image, ImageError, ImageSize, ImageView, ProceduralCursor,
};

/// A policy defining pixel values outside the bounds of an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeExtension {
    /// Pixels outside the image are the default (zero) pixel.
    ///
    /// Example: ...d c b a | 0 0 0 0...
    #[default]
    Zero,

    /// This border type takes the outermost row or column of pixels and repeats it into the padded region.
    ///
    /// Example: ...d c b a | a a a a...
    Replicate,

    /// This border type reflects the pixel values at the boundary, starting with the edge pixel itself.
    ///
    /// Example: ...d c b a | a b c d...
    Reflect,

    /// This border type reflects the pixel values at the boundary, starting with the pixel 'next' to the edge.
    ///
    /// Example: ...d c b a | b c d e...
    Reflect101,

    /// This border type wraps the content from the opposite side to fill the border.
    ///
    /// Example: ...d c b a | w x y z...
    Wrap,
}

impl EdgeExtension {
    // the mirrored sequence repeats with period 2 * len
    #[inline]
    fn reflect(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let m = i.rem_euclid(2 * len);
        if m < len {
            m as usize
        } else {
            (2 * len - 1 - m) as usize
        }
    }

    // the edge pixel is not repeated, so the period is 2 * len - 2
    #[inline]
    fn reflect101(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let m = i.rem_euclid(2 * len - 2);
        if m < len {
            m as usize
        } else {
            (2 * len - 2 - m) as usize
        }
    }

    #[inline]
    fn wrap(i: isize, len: usize) -> usize {
        i.rem_euclid(len as isize) as usize
    }

    /// Maps index `i` to a valid index i.e. within `[0, len)` according to the edge extension.
    ///
    /// - `Replicate`: clamp to edge
    /// - `Reflect`: mirror including edge
    /// - `Reflect101`: mirror excluding edge
    /// - `Wrap`: circular wrap
    /// - `Zero`: clamp to edge (not used directly, this mode does not remap)
    ///
    /// Runs in constant time for any `i`.
    ///
    /// # Arguments
    /// - `i`: The (possibly out-of-range) coordinate index.
    /// - `len`: The valid length of the dimension, greater than zero.
    ///
    /// # Returns
    /// A valid mapped index within `[0, len)`.
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> usize {
        match self {
            EdgeExtension::Reflect => Self::reflect(i, len),
            EdgeExtension::Reflect101 => Self::reflect101(i, len),
            EdgeExtension::Wrap => Self::wrap(i, len),
            EdgeExtension::Replicate | EdgeExtension::Zero => i.clamp(0, len as isize - 1) as usize,
        }
    }

    /// The pixel of `view` at `(x, y, p)`, extended past the bounds of the view.
    ///
    /// Defined for every coordinate. An empty view yields default pixels.
    #[inline]
    pub fn pixel<V: ImageView + ?Sized>(&self, view: &V, x: isize, y: isize, p: usize) -> V::Pixel
    where
        V::Pixel: Default,
    {
        let (cols, rows) = (view.cols(), view.rows());
        if x >= 0 && y >= 0 && (x as usize) < cols && (y as usize) < rows {
            return view.get(x, y, p);
        }

        if *self == EdgeExtension::Zero || cols == 0 || rows == 0 {
            return V::Pixel::default();
        }

        view.get(
            self.map_index(x, cols) as isize,
            self.map_index(y, rows) as isize,
            p,
        )
    }
}

/// A view of an image extended to the whole integer plane.
///
/// The extent of the view is the extent of the image, but point access is defined everywhere.
pub struct EdgeExtendView<'a, V> {
    view: &'a V,
    mode: EdgeExtension,
}

/// Extend `view` past its bounds according to `mode`.
pub fn edge_extend_view<V: ImageView>(view: &V, mode: EdgeExtension) -> EdgeExtendView<'_, V> {
    EdgeExtendView { view, mode }
}

impl<V> EdgeExtendView<'_, V> {
    /// The edge extension of the view.
    pub fn mode(&self) -> EdgeExtension {
        self.mode
    }
}

impl<'a, V> ImageView for EdgeExtendView<'a, V>
where
    V: ImageView,
    V::Pixel: Default,
{
    type Pixel = V::Pixel;
    type Cursor<'b>
        = ProceduralCursor<'b, Self>
    where
        Self: 'b;
    type Prerasterized<'b>
        = CropView<Image<V::Pixel>>
    where
        Self: 'b;

    fn cols(&self) -> usize {
        self.view.cols()
    }

    fn rows(&self) -> usize {
        self.view.rows()
    }

    fn planes(&self) -> usize {
        self.view.planes()
    }

    #[inline]
    fn get(&self, x: isize, y: isize, p: usize) -> V::Pixel {
        self.mode.pixel(self.view, x, y, p)
    }

    fn origin(&self) -> ProceduralCursor<'_, Self> {
        ProceduralCursor::new(self)
    }

    fn prerasterize(&self, bbox: BBox2i) -> Result<CropView<Image<V::Pixel>>, ImageError> {
        Ok(crop(
            edge_extend(self.view, bbox, self.mode)?,
            -bbox.x,
            -bbox.y,
            self.cols(),
            self.rows(),
        ))
    }

    fn rasterize(
        &self,
        dst: &mut ImageRefMut<'_, V::Pixel>,
        bbox: BBox2i,
    ) -> Result<(), ImageError> {
        check_destination(dst, bbox, self.planes())?;
        let extended = edge_extend(self.view, bbox, self.mode)?;
        extended.rasterize(dst, extended.bbox())
    }
}

/// Materialize the region `bbox` of `view`, extended past its bounds according to `mode`.
///
/// The pixel `(x, y)` of the result is the pixel `(bbox.x + x, bbox.y + y)` of the extended
/// view. The region may lie partially or fully outside the view.
///
/// The pixels of `view` are produced by rasterizing the region of the view that `bbox` maps
/// to, never through point access.
///
/// # Errors
///
/// Propagates the errors of rasterizing `view`.
///
/// # Example
///
/// ```rust
/// use lazyimg_image::{BBox2i, Image, ImageSize};
/// use lazyimg_imgproc::padding::{edge_extend, EdgeExtension};
///
/// let src = Image::new(ImageSize { width: 2, height: 1 }, 1, vec![1u8, 2]).unwrap();
///
/// let dst = edge_extend(&src, BBox2i::new(-2, 0, 6, 1), EdgeExtension::Replicate).unwrap();
///
/// assert_eq!(dst.as_slice(), &[1, 1, 1, 2, 2, 2]);
/// ```
pub fn edge_extend<V>(
    view: &V,
    bbox: BBox2i,
    mode: EdgeExtension,
) -> Result<Image<V::Pixel>, ImageError>
where
    V: ImageView + ?Sized,
    V::Pixel: Default,
{
    let size = ImageSize {
        width: bbox.width,
        height: bbox.height,
    };
    let planes = view.planes();

    if bbox.is_empty() {
        return Ok(Image::from_fn(size, planes, |_, _, _| V::Pixel::default()));
    }

    if view.bbox().contains_bbox(&bbox) {
        return to_image_region(view, bbox);
    }

    if mode == EdgeExtension::Zero || view.bbox().is_empty() {
        let mut dst = Image::from_fn(size, planes, |_, _, _| V::Pixel::default());
        if let Some(inner) = bbox.intersect(&view.bbox()) {
            let (ox, oy) = ((inner.x - bbox.x) as usize, (inner.y - bbox.y) as usize);
            let mut full = dst.as_view_mut();
            view.rasterize(&mut full.window(ox, oy, inner.width, inner.height), inner)?;
        }
        return Ok(dst);
    }

    let xs = (0..bbox.width)
        .map(|x| mode.map_index(bbox.x + x as isize, view.cols()))
        .collect::<Vec<_>>();
    let ys = (0..bbox.height)
        .map(|y| mode.map_index(bbox.y + y as isize, view.rows()))
        .collect::<Vec<_>>();

    // smallest source region covering every mapped index
    let (x0, x1) = (
        xs.iter().copied().min().unwrap_or(0),
        xs.iter().copied().max().unwrap_or(0),
    );
    let (y0, y1) = (
        ys.iter().copied().min().unwrap_or(0),
        ys.iter().copied().max().unwrap_or(0),
    );
    let src_bbox = BBox2i::from_corners(
        (x0 as isize, y0 as isize),
        (x1 as isize + 1, y1 as isize + 1),
    );
    let src = to_image_region(view, src_bbox)?;

    Ok(Image::from_fn(size, planes, |x, y, p| {
        *src.get_unchecked(xs[x] - x0, ys[y] - y0, p)
    }))
}
