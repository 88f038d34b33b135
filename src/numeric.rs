//! Numeric kinds the evaluator can compute in.
//!
//! The evaluator is generic over [`Numeric`], which is implemented once for
//! each supported representation: `i32`, `i64`, `f32` and `f64`. The trait is
//! sealed; instantiating the evaluator with any other type is a compile error.
//!
//! Integer kinds use checked arithmetic and report division by zero and
//! overflow as [`ArithmeticError`]s. Float kinds follow IEEE 754 and never
//! fail. Float power and remainder go through `libm` so the crate stays
//! usable without `std`.

extern crate alloc;
use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use core::fmt;

use serde::Serialize;

use crate::error::ArithmeticError;

mod private {
    pub trait Sealed {}
}

/// Identifies the representation an evaluation runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NumericKind {
    I32,
    I64,
    F32,
    F64,
}

impl NumericKind {
    pub fn is_integer(self) -> bool {
        matches!(self, NumericKind::I32 | NumericKind::I64)
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumericKind::I32 => "i32",
            NumericKind::I64 => "i64",
            NumericKind::F32 => "f32",
            NumericKind::F64 => "f64",
        };
        f.write_str(name)
    }
}

/// Normalizes literal text before parsing: surrounding whitespace and
/// trailing `f` suffixes are removed and `,` is read as the decimal point.
///
/// ```
/// use rpn_rs::numeric::normalize_literal;
///
/// assert_eq!(normalize_literal(" 2,5f "), "2.5");
/// assert_eq!(normalize_literal("10"), "10");
/// ```
pub fn normalize_literal(text: &str) -> Cow<'_, str> {
    let trimmed = text.trim().trim_end_matches('f');
    if trimmed.contains(',') {
        Cow::Owned(trimmed.replace(',', "."))
    } else {
        Cow::Borrowed(trimmed)
    }
}

/// A numeric representation the evaluator can run in.
///
/// Operands arrive in source order: for `a - b` the receiver is `a`.
pub trait Numeric:
    Copy + Default + PartialEq + fmt::Debug + fmt::Display + private::Sealed
{
    const KIND: NumericKind;

    /// Parses already-normalized text with the kind's standard parser.
    fn from_normalized(text: &str) -> Option<Self>;

    /// Parses a literal as written in an expression. Returns `None` when the
    /// text is not a literal of this kind; this is a probe, not an error.
    fn parse_literal(text: &str) -> Option<Self> {
        Self::from_normalized(&normalize_literal(text))
    }

    /// Text form of the value, accepted back by [`Numeric::parse_literal`]
    /// for all finite values.
    fn to_text(self) -> String {
        self.to_string()
    }

    fn add(self, rhs: Self) -> Result<Self, ArithmeticError>;
    fn sub(self, rhs: Self) -> Result<Self, ArithmeticError>;
    fn mul(self, rhs: Self) -> Result<Self, ArithmeticError>;
    fn div(self, rhs: Self) -> Result<Self, ArithmeticError>;
    fn rem(self, rhs: Self) -> Result<Self, ArithmeticError>;
    fn pow(self, rhs: Self) -> Result<Self, ArithmeticError>;
    fn neg(self) -> Result<Self, ArithmeticError>;
}

macro_rules! impl_integer {
    ($t:ty, $kind:ident) => {
        impl private::Sealed for $t {}

        impl Numeric for $t {
            const KIND: NumericKind = NumericKind::$kind;

            fn from_normalized(text: &str) -> Option<Self> {
                text.parse().ok()
            }

            fn add(self, rhs: Self) -> Result<Self, ArithmeticError> {
                self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
            }

            fn sub(self, rhs: Self) -> Result<Self, ArithmeticError> {
                self.checked_sub(rhs).ok_or(ArithmeticError::Overflow)
            }

            fn mul(self, rhs: Self) -> Result<Self, ArithmeticError> {
                self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
            }

            // Truncates toward zero.
            fn div(self, rhs: Self) -> Result<Self, ArithmeticError> {
                if rhs == 0 {
                    return Err(ArithmeticError::DivideByZero);
                }
                self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
            }

            // Sign follows the dividend.
            fn rem(self, rhs: Self) -> Result<Self, ArithmeticError> {
                if rhs == 0 {
                    return Err(ArithmeticError::DivideByZero);
                }
                self.checked_rem(rhs).ok_or(ArithmeticError::Overflow)
            }

            // Computed in f64 and cast back; the cast saturates and maps NaN to 0.
            fn pow(self, rhs: Self) -> Result<Self, ArithmeticError> {
                Ok(libm::pow(self as f64, rhs as f64) as $t)
            }

            fn neg(self) -> Result<Self, ArithmeticError> {
                self.checked_neg().ok_or(ArithmeticError::Overflow)
            }
        }
    };
}

macro_rules! impl_float {
    ($t:ty, $kind:ident, $pow:path, $fmod:path) => {
        impl private::Sealed for $t {}

        impl Numeric for $t {
            const KIND: NumericKind = NumericKind::$kind;

            fn from_normalized(text: &str) -> Option<Self> {
                text.parse().ok()
            }

            // Suffix stripping turns "inf" into "in", so retry the raw text.
            fn parse_literal(text: &str) -> Option<Self> {
                Self::from_normalized(&normalize_literal(text))
                    .or_else(|| Self::from_normalized(text.trim()))
            }

            fn add(self, rhs: Self) -> Result<Self, ArithmeticError> {
                Ok(self + rhs)
            }

            fn sub(self, rhs: Self) -> Result<Self, ArithmeticError> {
                Ok(self - rhs)
            }

            fn mul(self, rhs: Self) -> Result<Self, ArithmeticError> {
                Ok(self * rhs)
            }

            fn div(self, rhs: Self) -> Result<Self, ArithmeticError> {
                Ok(self / rhs)
            }

            fn rem(self, rhs: Self) -> Result<Self, ArithmeticError> {
                Ok($fmod(self, rhs))
            }

            fn pow(self, rhs: Self) -> Result<Self, ArithmeticError> {
                Ok($pow(self, rhs))
            }

            fn neg(self) -> Result<Self, ArithmeticError> {
                Ok(-self)
            }
        }
    };
}

impl_integer!(i32, I32);
impl_integer!(i64, I64);
impl_float!(f32, F32, libm::powf, libm::fmodf);
impl_float!(f64, F64, libm::pow, libm::fmod);
