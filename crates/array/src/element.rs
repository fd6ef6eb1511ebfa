//! Numeric element types and quantization

// crate modules
use crate::error::{Error, Result};

// external crates
use num_traits::{Num, NumCast};

/// Numeric types that can be stored in a voxel buffer
///
/// Implemented for every primitive integer and float.
pub trait Element: Copy + PartialOrd + Num + NumCast + CheckedArith + std::fmt::Debug {}

impl<T> Element for T where T: Copy + PartialOrd + Num + NumCast + CheckedArith + std::fmt::Debug {}

/// Addition and subtraction that report overflow instead of wrapping
///
/// Integers overflow past their bounds. Floats overflow when two finite
/// operands give an infinite result.
pub trait CheckedArith: Sized {
    /// `self + rhs`, or `None` on overflow
    fn add_checked(self, rhs: Self) -> Option<Self>;

    /// `self - rhs`, or `None` on overflow
    fn sub_checked(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_checked_int {
    ($($t:ty),*) => {
        $(
            impl CheckedArith for $t {
                fn add_checked(self, rhs: Self) -> Option<Self> {
                    self.checked_add(rhs)
                }

                fn sub_checked(self, rhs: Self) -> Option<Self> {
                    self.checked_sub(rhs)
                }
            }
        )*
    };
}

macro_rules! impl_checked_float {
    ($($t:ty),*) => {
        $(
            impl CheckedArith for $t {
                fn add_checked(self, rhs: Self) -> Option<Self> {
                    finite_or_none(self, rhs, self + rhs)
                }

                fn sub_checked(self, rhs: Self) -> Option<Self> {
                    finite_or_none(self, rhs, self - rhs)
                }
            }
        )*
    };
}

impl_checked_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_checked_float!(f32, f64);

/// Finite operands must give a finite result, anything else passes through
fn finite_or_none<F: num_traits::Float>(lhs: F, rhs: F, result: F) -> Option<F> {
    if lhs.is_finite() && rhs.is_finite() && !result.is_finite() {
        None
    } else {
        Some(result)
    }
}

/// `lhs + rhs`, with overflow as [Error::UnrepresentableValue]
pub(crate) fn checked_add<T: Element>(lhs: T, rhs: T) -> Result<T> {
    lhs.add_checked(rhs)
        .ok_or_else(|| Error::UnrepresentableValue(as_f64(lhs) + as_f64(rhs)))
}

/// `lhs - rhs`, with overflow as [Error::UnrepresentableValue]
pub(crate) fn checked_sub<T: Element>(lhs: T, rhs: T) -> Result<T> {
    lhs.sub_checked(rhs)
        .ok_or_else(|| Error::UnrepresentableValue(as_f64(lhs) - as_f64(rhs)))
}

/// Quantize `val` to a multiple of `step`
///
/// Computed as `floor((val ± step/2) / step) * step`, where the half step is
/// added for zero and positive values and subtracted for negative ones. Arithmetic is done in
/// `f64` and cast back, so integer elements round the same way floats do.
///
/// ```rust
/// # use voxtools_array::round;
/// assert_eq!(round(7.0, 5.0).unwrap(), 5.0);
/// assert_eq!(round(-7.0, 5.0).unwrap(), -10.0);
/// assert_eq!(round(13i16, 5).unwrap(), 15);
///
/// // step must be positive
/// assert!(round(1.0, 0.0).is_err());
/// ```
pub fn round<T: Element>(val: T, step: T) -> Result<T> {
    let s = to_f64(step)?;
    if !(s.is_finite() && s > 0.0) {
        return Err(Error::InvalidRoundingStep(s));
    }

    let v = to_f64(val)?;
    let half = s / 2.0;
    let quantized = if v >= 0.0 {
        ((v + half) / s).floor() * s
    } else {
        ((v - half) / s).floor() * s
    };

    <T as NumCast>::from(quantized).ok_or(Error::UnrepresentableValue(quantized))
}

/// Quantize `val` to a multiple of `step`, then clamp to `[lower, upper]`
///
/// ```rust
/// # use voxtools_array::round_clamped;
/// assert_eq!(round_clamped(7.0, 0.0, 4.0, 5.0).unwrap(), 4.0);
/// assert_eq!(round_clamped(-7.0, -8.0, 4.0, 5.0).unwrap(), -8.0);
/// assert_eq!(round_clamped(2.0, -8.0, 4.0, 5.0).unwrap(), 0.0);
/// ```
pub fn round_clamped<T: Element>(val: T, lower: T, upper: T, step: T) -> Result<T> {
    let quantized = round(val, step)?;
    Ok(if quantized < lower {
        lower
    } else if quantized > upper {
        upper
    } else {
        quantized
    })
}

fn to_f64<T: Element>(value: T) -> Result<f64> {
    value
        .to_f64()
        .ok_or(Error::UnrepresentableValue(f64::NAN))
}

fn as_f64<T: Element>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
