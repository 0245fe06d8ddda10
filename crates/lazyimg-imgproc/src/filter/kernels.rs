use std::ops::Mul;

use lazyimg_image::{ImageError, StridedCursor};
use num_traits::One;

/// A dense 2D convolution kernel.
///
/// The coefficients are stored row major: the coefficient at column `i` and row `j` is
/// `data[j * cols + i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel<K> {
    data: Vec<K>,
    cols: usize,
    rows: usize,
}

impl<K> Kernel<K> {
    /// Create a kernel from its coefficients.
    ///
    /// # Errors
    ///
    /// If the kernel is empty or the data length does not match `cols * rows`, an error is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazyimg_imgproc::filter::Kernel;
    ///
    /// let kernel = Kernel::new(3, 1, vec![1.0f32, 2.0, 1.0]).unwrap();
    ///
    /// assert_eq!(kernel.center(), (1, 0));
    /// assert_eq!(kernel.get(2, 0), Some(&1.0));
    /// ```
    pub fn new(cols: usize, rows: usize, data: Vec<K>) -> Result<Self, ImageError> {
        if cols == 0 || rows == 0 || data.len() != cols * rows {
            return Err(ImageError::InvalidKernelSize(cols, rows, data.len()));
        }
        Ok(Self { data, cols, rows })
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The geometric center `((cols - 1) / 2, (rows - 1) / 2)`.
    pub fn center(&self) -> (usize, usize) {
        ((self.cols - 1) / 2, (self.rows - 1) / 2)
    }

    /// The coefficient at column `i` and row `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<&K> {
        if i >= self.cols || j >= self.rows {
            return None;
        }
        self.data.get(j * self.cols + i)
    }

    /// The coefficients in row major order.
    pub fn as_slice(&self) -> &[K] {
        &self.data
    }

    /// A cursor over the coefficients starting at column 0, row 0.
    pub fn origin(&self) -> StridedCursor<'_, K> {
        StridedCursor::new(&self.data, 0, 1, self.cols as isize, 0)
    }

    /// A cursor over the kernel rotated by 180 degrees.
    ///
    /// Reading the cursor at `(i, j)` yields the coefficient at `(cols - 1 - i, rows - 1 - j)`.
    pub fn rotated_origin(&self) -> StridedCursor<'_, K> {
        StridedCursor::new(
            &self.data,
            self.data.len() as isize - 1,
            -1,
            -(self.cols as isize),
            0,
        )
    }
}

impl<K: Copy + One + Mul<Output = K>> Kernel<K> {
    /// The outer product of a row factor and a column factor.
    ///
    /// The coefficient at `(i, j)` is `row[i] * col[j]`. An empty factor is treated as the
    /// single coefficient `1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazyimg_imgproc::filter::Kernel;
    ///
    /// let kernel = Kernel::from_outer_product(&[1.0f32, 2.0], &[]);
    ///
    /// assert_eq!((kernel.cols(), kernel.rows()), (2, 1));
    /// assert_eq!(kernel.as_slice(), &[1.0, 2.0]);
    /// ```
    pub fn from_outer_product(row: &[K], col: &[K]) -> Self {
        let identity = [K::one()];
        let row = if row.is_empty() { &identity[..] } else { row };
        let col = if col.is_empty() { &identity[..] } else { col };

        let data = col
            .iter()
            .flat_map(|&kj| row.iter().map(move |&ki| ki * kj))
            .collect();

        Self {
            data,
            cols: row.len(),
            rows: col.len(),
        }
    }
}

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn box_blur_kernel_1d(kernel_size: usize) -> Result<Vec<f32>, ImageError> {
    if kernel_size == 0 {
        return Err(ImageError::InvalidKernelLength(kernel_size));
    }
    Ok(vec![1.0 / kernel_size as f32; kernel_size])
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel, normalized to sum to one.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Result<Vec<f32>, ImageError> {
    if kernel_size == 0 {
        return Err(ImageError::InvalidKernelLength(kernel_size));
    }
    if sigma.is_nan() || sigma <= 0.0 {
        return Err(ImageError::InvalidGaussianSigma(sigma as f64));
    }

    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    Ok(kernel)
}

/// Create the factors of a sobel kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel, 3 or 5.
///
/// # Returns
///
/// The derivative factor and the smoothing factor, in correlation order.
pub fn sobel_kernel_1d(kernel_size: usize) -> Result<(Vec<f32>, Vec<f32>), ImageError> {
    match kernel_size {
        3 => Ok((vec![-1.0, 0.0, 1.0], vec![1.0, 2.0, 1.0])),
        5 => Ok((
            vec![-1.0, -2.0, 0.0, 2.0, 1.0],
            vec![1.0, 4.0, 6.0, 4.0, 1.0],
        )),
        _ => Err(ImageError::InvalidKernelLength(kernel_size)),
    }
}

/// Create the 3x3 laplacian kernel with 4-connectivity.
pub fn laplacian_kernel() -> Kernel<f32> {
    Kernel {
        data: vec![0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0],
        cols: 3,
        rows: 3,
    }
}
