/// An axis aligned integer rectangle.
///
/// The rectangle covers the columns `[x, x + width)` and the rows `[y, y + height)`. The origin
/// may be negative, e.g. when describing a region that extends past the image border.
///
/// # Examples
///
/// ```
/// use lazyimg_image::BBox2i;
///
/// let bbox = BBox2i::new(-1, 2, 4, 3);
///
/// assert_eq!(bbox.min(), (-1, 2));
/// assert_eq!(bbox.max(), (3, 5));
/// assert!(bbox.contains(0, 4));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BBox2i {
    /// Column of the top left corner.
    pub x: isize,
    /// Row of the top left corner.
    pub y: isize,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl BBox2i {
    /// Create a bounding box from its top left corner and its size.
    pub fn new(x: isize, y: isize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a bounding box from its inclusive minimum and exclusive maximum corners.
    ///
    /// An inverted range produces an empty box.
    pub fn from_corners(min: (isize, isize), max: (isize, isize)) -> Self {
        Self {
            x: min.0,
            y: min.1,
            width: (max.0 - min.0).max(0) as usize,
            height: (max.1 - min.1).max(0) as usize,
        }
    }

    /// The inclusive top left corner.
    pub fn min(&self) -> (isize, isize) {
        (self.x, self.y)
    }

    /// The exclusive bottom right corner.
    pub fn max(&self) -> (isize, isize) {
        (self.x + self.width as isize, self.y + self.height as isize)
    }

    /// Whether the box covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the pixel `(x, y)` is inside the box.
    pub fn contains(&self, x: isize, y: isize) -> bool {
        let (max_x, max_y) = self.max();
        x >= self.x && y >= self.y && x < max_x && y < max_y
    }

    /// Whether `other` lies fully inside the box.
    pub fn contains_bbox(&self, other: &BBox2i) -> bool {
        let (max_x, max_y) = self.max();
        let (other_max_x, other_max_y) = other.max();
        other.x >= self.x && other.y >= self.y && other_max_x <= max_x && other_max_y <= max_y
    }

    /// Move the box by `(dx, dy)`.
    pub fn translate(&self, dx: isize, dy: isize) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// The overlap of two boxes, `None` when they do not share a pixel.
    pub fn intersect(&self, other: &BBox2i) -> Option<BBox2i> {
        let (max_x, max_y) = self.max();
        let (other_max_x, other_max_y) = other.max();
        let bbox = BBox2i::from_corners(
            (self.x.max(other.x), self.y.max(other.y)),
            (max_x.min(other_max_x), max_y.min(other_max_y)),
        );
        (!bbox.is_empty()).then_some(bbox)
    }

    /// Grow the box by the given margins on each side.
    pub fn grow(&self, left: usize, top: usize, right: usize, bottom: usize) -> Self {
        Self::new(
            self.x - left as isize,
            self.y - top as isize,
            self.width + left + right,
            self.height + top + bottom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::BBox2i;

    #[test]
    fn test_bbox_grow() {
        let bbox = BBox2i::new(2, 3, 4, 5).grow(1, 2, 0, 3);
        assert_eq!(bbox, BBox2i::new(1, 1, 5, 10));
        assert_eq!(bbox.max(), (6, 11));
    }

    #[test]
    fn test_bbox_from_corners() {
        assert_eq!(
            BBox2i::from_corners((-2, -1), (3, 4)),
            BBox2i::new(-2, -1, 5, 5)
        );
        assert!(BBox2i::from_corners((3, 3), (1, 5)).is_empty());
    }

    #[test]
    fn test_bbox_intersect() {
        let image = BBox2i::new(0, 0, 5, 4);
        assert_eq!(
            BBox2i::new(-2, 1, 4, 9).intersect(&image),
            Some(BBox2i::new(0, 1, 2, 3))
        );
        assert_eq!(image.intersect(&BBox2i::new(1, 1, 2, 2)), Some(BBox2i::new(1, 1, 2, 2)));
        assert_eq!(image.intersect(&BBox2i::new(5, 0, 3, 3)), None);
        assert_eq!(image.intersect(&BBox2i::new(-9, -9, 2, 2)), None);
    }

    #[test]
    fn test_bbox_contains() {
        let outer = BBox2i::new(0, 0, 5, 5);
        assert!(outer.contains_bbox(&BBox2i::new(1, 1, 4, 4)));
        assert!(!outer.contains_bbox(&BBox2i::new(-1, 1, 2, 2)));
        assert!(!outer.contains(5, 0));
    }
}
