//! Value arithmetic needed by subtractive filtering and dynamic filters.

/// Difference and shifting of node values.
pub trait Contrast: Sized {
    /// Absolute difference between two values, saturating at the type bounds.
    fn abs_diff(&self, other: &Self) -> Self;

    /// Returns `self + (to - from)`, clamped to the type bounds.
    #[must_use]
    fn shift(&self, from: &Self, to: &Self) -> Self;
}

macro_rules! impl_contrast_int {
    (@shift) => {
        fn shift(&self, from: &Self, to: &Self) -> Self {
            let shifted = i128::from(*self) + i128::from(*to) - i128::from(*from);
            let clamped = shifted.clamp(i128::from(Self::MIN), i128::from(Self::MAX));
            Self::try_from(clamped).unwrap_or(Self::MAX)
        }
    };
    (unsigned: $($t:ty),+) => {
        $(
            impl Contrast for $t {
                fn abs_diff(&self, other: &Self) -> Self {
                    <$t>::abs_diff(*self, *other)
                }

                impl_contrast_int!(@shift);
            }
        )+
    };
    (signed: $($t:ty),+) => {
        $(
            impl Contrast for $t {
                fn abs_diff(&self, other: &Self) -> Self {
                    Self::try_from(<$t>::abs_diff(*self, *other)).unwrap_or(Self::MAX)
                }

                impl_contrast_int!(@shift);
            }
        )+
    };
}

impl_contrast_int!(unsigned: u8, u16, u32, u64);
impl_contrast_int!(signed: i8, i16, i32, i64);

macro_rules! impl_contrast_float {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Contrast for $t {
                fn abs_diff(&self, other: &Self) -> Self {
                    (self - other).abs()
                }

                fn shift(&self, from: &Self, to: &Self) -> Self {
                    self + (to - from)
                }
            }
        )+
    };
}

impl_contrast_float!(f32, f64);
