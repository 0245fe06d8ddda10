use crate::view::ImageView;

/// A position aware handle into a pixel grid.
///
/// Cursors are cheap to clone and are moved incrementally, which avoids recomputing addresses
/// from coordinates in tight loops. A cursor never checks that it points inside its grid; the
/// check happens, if at all, when the pixel is read.
pub trait PixelCursor: Clone {
    /// The pixel type read by the cursor.
    type Pixel;

    /// Read the pixel at the current position.
    fn get(&self) -> Self::Pixel;

    /// Move to the next column.
    fn next_col(&mut self);

    /// Move to the next row.
    fn next_row(&mut self);

    /// Move to the next plane.
    fn next_plane(&mut self);

    /// Move by `dx` columns, `dy` rows and `dp` planes.
    fn advance(&mut self, dx: isize, dy: isize, dp: isize);

    /// Consume the cursor and return it moved by `(dx, dy, dp)`.
    fn advanced(mut self, dx: isize, dy: isize, dp: isize) -> Self
    where
        Self: Sized,
    {
        self.advance(dx, dy, dp);
        self
    }
}

/// A cursor over a slice addressed through signed strides.
///
/// Swapping the column and row strides gives a transposed cursor and negative strides walk the
/// grid backwards, e.g. to read a kernel rotated by 180 degrees.
pub struct StridedCursor<'a, T> {
    data: &'a [T],
    offset: isize,
    col_stride: isize,
    row_stride: isize,
    plane_stride: isize,
}

impl<'a, T> StridedCursor<'a, T> {
    /// Create a cursor at `offset` into `data`.
    pub fn new(
        data: &'a [T],
        offset: isize,
        col_stride: isize,
        row_stride: isize,
        plane_stride: isize,
    ) -> Self {
        Self {
            data,
            offset,
            col_stride,
            row_stride,
            plane_stride,
        }
    }

    /// The current linear offset into the slice.
    pub fn offset(&self) -> isize {
        self.offset
    }
}

impl<T> Clone for StridedCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StridedCursor<'_, T> {}

impl<T: Copy> PixelCursor for StridedCursor<'_, T> {
    type Pixel = T;

    #[inline]
    fn get(&self) -> T {
        self.data[self.offset as usize]
    }

    #[inline]
    fn next_col(&mut self) {
        self.offset += self.col_stride;
    }

    #[inline]
    fn next_row(&mut self) {
        self.offset += self.row_stride;
    }

    #[inline]
    fn next_plane(&mut self) {
        self.offset += self.plane_stride;
    }

    #[inline]
    fn advance(&mut self, dx: isize, dy: isize, dp: isize) {
        self.offset += dx * self.col_stride + dy * self.row_stride + dp * self.plane_stride;
    }
}

/// A cursor that evaluates a view at its current coordinates.
///
/// Used by views that compute their pixels instead of storing them.
pub struct ProceduralCursor<'a, V: ?Sized> {
    view: &'a V,
    x: isize,
    y: isize,
    p: isize,
}

impl<'a, V: ?Sized> ProceduralCursor<'a, V> {
    /// Create a cursor at the origin of `view`.
    pub fn new(view: &'a V) -> Self {
        Self {
            view,
            x: 0,
            y: 0,
            p: 0,
        }
    }

    /// The current `(x, y, plane)` position.
    pub fn position(&self) -> (isize, isize, isize) {
        (self.x, self.y, self.p)
    }
}

impl<V: ?Sized> Clone for ProceduralCursor<'_, V> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            x: self.x,
            y: self.y,
            p: self.p,
        }
    }
}

impl<V: ImageView + ?Sized> PixelCursor for ProceduralCursor<'_, V> {
    type Pixel = V::Pixel;

    #[inline]
    fn get(&self) -> V::Pixel {
        self.view.get(self.x, self.y, self.p as usize)
    }

    #[inline]
    fn next_col(&mut self) {
        self.x += 1;
    }

    #[inline]
    fn next_row(&mut self) {
        self.y += 1;
    }

    #[inline]
    fn next_plane(&mut self) {
        self.p += 1;
    }

    #[inline]
    fn advance(&mut self, dx: isize, dy: isize, dp: isize) {
        self.x += dx;
        self.y += dy;
        self.p += dp;
    }
}
