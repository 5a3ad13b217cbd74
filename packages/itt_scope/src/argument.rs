/// A value attached to an open interval, after coercion to one of the three supported kinds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the three kinds are fixed by the metadata model of collectors"
)]
pub enum ArgValue<'a> {
    /// Any floating point value, widened to double precision.
    Double(f64),

    /// Any integer value, converted to a signed 64-bit integer.
    Int64(i64),

    /// A string value.
    Str(&'a str),
}

/// A value that can be attached to an interval as a named argument.
///
/// Every argument is recorded as exactly one of the three kinds in [`ArgValue`]:
///
/// * `f32` and `f64` become [`ArgValue::Double`]; `f32` is widened to `f64`.
/// * `i8`, `i16`, `i32`, `i64`, `u8`, `u16` and `u32` become [`ArgValue::Int64`] without loss.
/// * `u64`, `usize` and `isize` become [`ArgValue::Int64`] by reinterpreting their bits as a
///   two's complement `i64`, so `u64` values above `i64::MAX` are recorded as negative numbers.
/// * `&str` and `&String` become [`ArgValue::Str`].
///
/// No other width or kind is preserved.
pub trait Argument<'a> {
    /// Coerces the value into the kind it is recorded as.
    fn into_arg_value(self) -> ArgValue<'a>;
}

impl<'a> Argument<'a> for f64 {
    #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
    fn into_arg_value(self) -> ArgValue<'a> {
        ArgValue::Double(self)
    }
}

impl<'a> Argument<'a> for f32 {
    fn into_arg_value(self) -> ArgValue<'a> {
        ArgValue::Double(f64::from(self))
    }
}

macro_rules! lossless_int64_argument {
    ($($t:ty),*) => {
        $(
            impl<'a> Argument<'a> for $t {
                fn into_arg_value(self) -> ArgValue<'a> {
                    ArgValue::Int64(i64::from(self))
                }
            }
        )*
    };
}

lossless_int64_argument!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! reinterpreted_int64_argument {
    ($($t:ty),*) => {
        $(
            impl<'a> Argument<'a> for $t {
                #[expect(
                    clippy::cast_possible_wrap,
                    clippy::cast_possible_truncation,
                    reason = "integers are recorded as i64, wider or unsigned values are reinterpreted"
                )]
                fn into_arg_value(self) -> ArgValue<'a> {
                    ArgValue::Int64(self as i64)
                }
            }
        )*
    };
}

reinterpreted_int64_argument!(u64, usize, isize);

impl<'a> Argument<'a> for &'a str {
    #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
    fn into_arg_value(self) -> ArgValue<'a> {
        ArgValue::Str(self)
    }
}

impl<'a> Argument<'a> for &'a String {
    fn into_arg_value(self) -> ArgValue<'a> {
        ArgValue::Str(self.as_str())
    }
}

impl<'a> Argument<'a> for ArgValue<'a> {
    #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
    fn into_arg_value(self) -> ArgValue<'a> {
        self
    }
}
