/// A value that can be recorded as a counter sample.
///
/// Counter samples are always recorded as `f64`:
///
/// * `f32`, `f64`, `i8`, `i16`, `i32`, `u8`, `u16` and `u32` convert without loss.
/// * `i64`, `u64`, `isize`, `usize`, `i128` and `u128` are rounded to the nearest `f64`, so
///   magnitudes above 2^53 may lose their low bits.
pub trait CounterValue {
    /// Converts the value into the sample that is recorded.
    fn into_counter_value(self) -> f64;
}

macro_rules! lossless_counter_value {
    ($($t:ty),*) => {
        $(
            impl CounterValue for $t {
                fn into_counter_value(self) -> f64 {
                    f64::from(self)
                }
            }
        )*
    };
}

lossless_counter_value!(f32, f64, i8, i16, i32, u8, u16, u32);

macro_rules! rounded_counter_value {
    ($($t:ty),*) => {
        $(
            impl CounterValue for $t {
                #[expect(
                    clippy::cast_precision_loss,
                    reason = "counter samples are f64, large integers are rounded to the nearest one"
                )]
                fn into_counter_value(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

rounded_counter_value!(i64, u64, isize, usize, i128, u128);
