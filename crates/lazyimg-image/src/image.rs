use crate::error::ImageError;
use crate::pixel::PixelCast;
use crate::view::{ImageRef, ImageRefMut};

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use lazyimg_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixel data is stored row major with the planes of a pixel interleaved, i.e. with shape
/// (H, W, P) where P is the number of planes.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    size: ImageSize,
    planes: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `planes` - The number of planes of each pixel.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazyimg_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     3,
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.cols(), 10);
    /// assert_eq!(image.rows(), 20);
    /// assert_eq!(image.planes(), 3);
    /// ```
    pub fn new(size: ImageSize, planes: usize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.width * size.height * planes;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, planes, data })
    }

    /// Create a new image with the given size filled with `val`.
    ///
    /// # Errors
    ///
    /// Never fails for a consistent size; the `Result` mirrors [`Image::new`].
    pub fn from_size_val(size: ImageSize, planes: usize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * planes];
        Image::new(size, planes, data)
    }

    /// Create a new image evaluating `f(x, y, p)` for every value.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazyimg_image::{Image, ImageSize};
    ///
    /// let image = Image::from_fn(ImageSize { width: 3, height: 2 }, 1, |x, y, _| x + 10 * y);
    ///
    /// assert_eq!(image.as_slice(), &[0, 1, 2, 10, 11, 12]);
    /// ```
    pub fn from_fn(
        size: ImageSize,
        planes: usize,
        mut f: impl FnMut(usize, usize, usize) -> T,
    ) -> Self {
        let mut data = Vec::with_capacity(size.width * size.height * planes);
        for y in 0..size.height {
            for x in 0..size.width {
                for p in 0..planes {
                    data.push(f(x, y, p));
                }
            }
        }
        Self { size, planes, data }
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of planes of each pixel.
    pub fn planes(&self) -> usize {
        self.planes
    }

    #[inline]
    fn offset(&self, x: usize, y: usize, p: usize) -> usize {
        (y * self.size.width + x) * self.planes + p
    }

    /// Get a reference to the value at column `x`, row `y` and plane `p`.
    ///
    /// Returns `None` if the position is outside the image.
    pub fn get(&self, x: usize, y: usize, p: usize) -> Option<&T> {
        if x >= self.cols() || y >= self.rows() || p >= self.planes {
            return None;
        }
        self.data.get(self.offset(x, y, p))
    }

    /// Get a mutable reference to the value at column `x`, row `y` and plane `p`.
    ///
    /// Returns `None` if the position is outside the image.
    pub fn get_mut(&mut self, x: usize, y: usize, p: usize) -> Option<&mut T> {
        if x >= self.cols() || y >= self.rows() || p >= self.planes {
            return None;
        }
        let offset = self.offset(x, y, p);
        self.data.get_mut(offset)
    }

    /// Get the value at column `x`, row `y` and plane `p`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the image.
    #[inline]
    pub fn get_unchecked(&self, x: usize, y: usize, p: usize) -> &T {
        &self.data[self.offset(x, y, p)]
    }

    /// Get the pixel data of the image.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the mutable pixel data of the image.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Borrow the image as a strided view.
    pub fn as_view(&self) -> ImageRef<'_, T> {
        ImageRef::new(&self.data, self.cols(), self.rows(), self.planes)
    }

    /// Borrow the image as a mutable strided view, e.g. as a rasterization destination.
    pub fn as_view_mut(&mut self) -> ImageRefMut<'_, T> {
        let (cols, rows, planes) = (self.cols(), self.rows(), self.planes);
        ImageRefMut::new(&mut self.data, cols, rows, planes)
    }

    /// Apply `f` to every value and collect the results in a new image.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Image<U> {
        Image {
            size: self.size,
            planes: self.planes,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Convert the pixel data to a different type.
    ///
    /// Integer targets round to nearest and saturate.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazyimg_image::{Image, ImageSize};
    ///
    /// let image = Image::new(ImageSize { width: 3, height: 1 }, 1, vec![-3.0f32, 12.4, 300.0]).unwrap();
    /// let image_u8 = image.cast::<u8>();
    ///
    /// assert_eq!(image_u8.as_slice(), &[0, 12, 255]);
    /// ```
    pub fn cast<U: PixelCast<T>>(&self) -> Image<U>
    where
        T: Copy,
    {
        self.map(|&v| U::cast_from(v))
    }

    /// Get a plane of the image as a single plane image.
    ///
    /// # Errors
    ///
    /// If the plane index is out of bounds, an error is returned.
    pub fn channel(&self, plane: usize) -> Result<Image<T>, ImageError>
    where
        T: Clone,
    {
        if plane >= self.planes {
            return Err(ImageError::PlaneIndexOutOfBounds(plane, self.planes));
        }

        let data = self
            .data
            .iter()
            .skip(plane)
            .step_by(self.planes)
            .cloned()
            .collect();

        Image::new(self.size, 1, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_new() -> Result<(), ImageError> {
        let image = Image::<f32>::from_size_val([4, 3].into(), 2, 1.5)?;
        assert_eq!(image.cols(), 4);
        assert_eq!(image.rows(), 3);
        assert_eq!(image.planes(), 2);
        assert_eq!(image.as_slice().len(), 24);
        Ok(())
    }

    #[test]
    fn test_image_invalid_shape() {
        let image = Image::<u8>::new([2, 2].into(), 1, vec![0; 3]);
        assert_eq!(image, Err(ImageError::InvalidChannelShape(3, 4)));
    }

    #[test]
    fn test_image_get() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::new(
            [2, 2].into(),
            2,
            vec![
                0u8, 1, 2, 3,
                4, 5, 6, 7,
            ],
        )?;

        assert_eq!(image.get(1, 0, 1), Some(&3));
        assert_eq!(image.get(0, 1, 0), Some(&4));
        assert_eq!(image.get(2, 0, 0), None);
        assert_eq!(image.get(0, 0, 2), None);
        Ok(())
    }

    #[test]
    fn test_image_channel() -> Result<(), ImageError> {
        let image = Image::new([2, 1].into(), 3, vec![0u8, 1, 2, 3, 4, 5])?;
        let channel = image.channel(1)?;
        assert_eq!(channel.as_slice(), &[1, 4]);
        assert_eq!(
            image.channel(3),
            Err(ImageError::PlaneIndexOutOfBounds(3, 3))
        );
        Ok(())
    }
}
