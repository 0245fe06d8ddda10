/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the destination size does not match the requested region.
    #[error("Destination size ({0}x{1}) does not match the region size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the destination has a different number of planes than the view.
    #[error("Destination planes ({0}) does not match the view planes ({1})")]
    InvalidPlaneCount(usize, usize),

    /// Error when the kernel is empty or its data does not match its size.
    #[error("Invalid kernel size: {0}x{1} with {2} coefficients")]
    InvalidKernelSize(usize, usize, usize),

    /// Error when a 1d kernel has an invalid length.
    #[error("Invalid kernel length: {0}")]
    InvalidKernelLength(usize),

    /// Error when the sigma of a gaussian kernel is not positive.
    #[error("Invalid gaussian sigma: {0}")]
    InvalidGaussianSigma(f64),

    /// Error when the plane index is out of bounds.
    #[error("Plane index {0} is out of bounds ({1})")]
    PlaneIndexOutOfBounds(usize, usize),
}
