use std::ops::AddAssign;

/// A value that kernel products are summed into.
///
/// Correlation starts from `Self::default()` and calls [`Accumulator::validate`] on it before
/// adding any product, so that pixel types carrying a validity flag start from a valid empty sum.
pub trait Accumulator: Copy + Default + AddAssign {
    /// Normalize a freshly created accumulator.
    #[inline]
    fn validate(&mut self) {}
}

impl Accumulator for i32 {}
impl Accumulator for f32 {}
impl Accumulator for f64 {}

/// Multiplication of a pixel by a kernel coefficient of type `K`.
///
/// The associated `Output` is the pixel type produced by a convolution of an image of `Self`
/// pixels with a kernel of `K` coefficients.
pub trait MulCoeff<K>: Copy {
    /// The product type.
    type Output: Accumulator;

    /// Multiply the pixel by the kernel coefficient.
    fn mul_coeff(self, k: K) -> Self::Output;
}

/// The pixel type produced by combining a pixel `P` with a coefficient `K`.
pub type ProductType<P, K> = <P as MulCoeff<K>>::Output;

macro_rules! impl_mul_coeff {
    ($($src:ty, $coeff:ty => $out:ty);* $(;)?) => {
        $(
            impl MulCoeff<$coeff> for $src {
                type Output = $out;

                #[inline]
                fn mul_coeff(self, k: $coeff) -> $out {
                    (self as $out) * (k as $out)
                }
            }
        )*
    };
}

impl_mul_coeff! {
    u8, i32 => i32;
    u16, i32 => i32;
    i16, i32 => i32;
    i32, i32 => i32;
    u8, f32 => f32;
    u8, f64 => f64;
    u16, f32 => f32;
    u16, f64 => f64;
    i16, f32 => f32;
    i16, f64 => f64;
    i32, f64 => f64;
    f32, f32 => f32;
    f32, f64 => f64;
    f64, f64 => f64;
}

/// Conversion of a computed pixel into a destination pixel type.
///
/// Integer destinations round to nearest and saturate at the limits of the type.
pub trait PixelCast<S> {
    /// Convert `src` into `Self`.
    fn cast_from(src: S) -> Self;
}

impl<T> PixelCast<T> for T {
    #[inline]
    fn cast_from(src: T) -> T {
        src
    }
}

macro_rules! impl_pixel_cast_saturating {
    ($($dst:ty, $src:ty);* $(;)?) => {
        $(
            impl PixelCast<$src> for $dst {
                #[inline]
                fn cast_from(src: $src) -> $dst {
                    src.round().clamp(<$dst>::MIN as $src, <$dst>::MAX as $src) as $dst
                }
            }
        )*
    };
}

impl_pixel_cast_saturating! {
    u8, f32;
    u8, f64;
    u16, f32;
    u16, f64;
    i16, f32;
    i16, f64;
}

macro_rules! impl_pixel_cast_clamp {
    ($($dst:ty, $src:ty);* $(;)?) => {
        $(
            impl PixelCast<$src> for $dst {
                #[inline]
                fn cast_from(src: $src) -> $dst {
                    src.clamp(<$dst>::MIN as $src, <$dst>::MAX as $src) as $dst
                }
            }
        )*
    };
}

impl_pixel_cast_clamp! {
    u8, i32;
    u16, i32;
    i16, i32;
}

impl PixelCast<i32> for f32 {
    #[inline]
    fn cast_from(src: i32) -> f32 {
        src as f32
    }
}

impl PixelCast<f64> for f32 {
    #[inline]
    fn cast_from(src: f64) -> f32 {
        src as f32
    }
}

impl PixelCast<f32> for f64 {
    #[inline]
    fn cast_from(src: f32) -> f64 {
        src as f64
    }
}

/// A pixel that carries a validity flag.
///
/// Adding an invalid pixel to a valid one yields an invalid pixel. The default value is a zero,
/// invalid pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelMask<T> {
    value: T,
    valid: bool,
}

impl<T> PixelMask<T> {
    /// Create a valid pixel.
    pub fn new(value: T) -> Self {
        Self { value, valid: true }
    }

    /// Create an invalid pixel holding `value`.
    pub fn invalid(value: T) -> Self {
        Self {
            value,
            valid: false,
        }
    }

    /// The stored value, regardless of validity.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Whether the pixel is valid.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Mark the pixel as invalid.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }
}

impl<T: AddAssign> AddAssign for PixelMask<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
        self.valid = self.valid && rhs.valid;
    }
}

impl<T: Accumulator> Accumulator for PixelMask<T> {
    #[inline]
    fn validate(&mut self) {
        self.valid = true;
    }
}

impl<T: MulCoeff<K>, K> MulCoeff<K> for PixelMask<T> {
    type Output = PixelMask<T::Output>;

    #[inline]
    fn mul_coeff(self, k: K) -> Self::Output {
        PixelMask {
            value: self.value.mul_coeff(k),
            valid: self.valid,
        }
    }
}
