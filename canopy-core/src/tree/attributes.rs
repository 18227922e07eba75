//! Per-node attribute accumulators.
//!
//! An [`Accumulator`] collects samples from the pixels of one node, absorbs
//! the accumulators of its children and finally produces the attribute value.

use std::ops::Add;

/// Incremental computation of a node attribute.
pub trait Accumulator<T> {
    /// Attribute produced once every sample and child is folded in.
    type Output;

    /// Feeds one pixel sample.
    fn take(&mut self, sample: T);

    /// Absorbs the accumulator of a child node.
    fn merge(&mut self, other: &Self);

    /// Produces the attribute value.
    fn finish(&self) -> Self::Output;
}

/// Counts samples; the area of a component when fed one sample per pixel.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Count(usize);

impl<T> Accumulator<T> for Count {
    type Output = usize;

    fn take(&mut self, _sample: T) {
        self.0 += 1;
    }

    fn merge(&mut self, other: &Self) {
        self.0 += other.0;
    }

    fn finish(&self) -> usize {
        self.0
    }
}

/// Sums samples, such as the volume of a component.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Sum<T>(T);

impl<T> Accumulator<T> for Sum<T>
where
    T: Add<Output = T> + Copy,
{
    type Output = T;

    fn take(&mut self, sample: T) {
        self.0 = self.0 + sample;
    }

    fn merge(&mut self, other: &Self) {
        self.0 = self.0 + other.0;
    }

    fn finish(&self) -> T {
        self.0
    }
}

/// Smallest and largest sample, `None` for a component without pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Extrema<T>(Option<(T, T)>);

impl<T> Default for Extrema<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T: PartialOrd + Copy> Extrema<T> {
    fn absorb(&mut self, lo: T, hi: T) {
        self.0 = Some(match self.0 {
            None => (lo, hi),
            Some((min, max)) => (
                if lo < min { lo } else { min },
                if hi > max { hi } else { max },
            ),
        });
    }
}

impl<T: PartialOrd + Copy> Accumulator<T> for Extrema<T> {
    type Output = Option<(T, T)>;

    fn take(&mut self, sample: T) {
        self.absorb(sample, sample);
    }

    fn merge(&mut self, other: &Self) {
        if let Some((lo, hi)) = other.0 {
            self.absorb(lo, hi);
        }
    }

    fn finish(&self) -> Option<(T, T)> {
        self.0
    }
}

/// Inclusive pixel bounds of a component.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Bounds {
    /// Leftmost column.
    pub x_min: usize,
    /// Topmost row.
    pub y_min: usize,
    /// Rightmost column.
    pub x_max: usize,
    /// Bottom row.
    pub y_max: usize,
}

impl Bounds {
    /// Width of the box in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.x_max - self.x_min + 1
    }

    /// Height of the box in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.y_max - self.y_min + 1
    }
}

/// Bounding box of `(x, y)` samples.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BoundingBox(Option<Bounds>);

impl BoundingBox {
    fn absorb(&mut self, other: Bounds) {
        self.0 = Some(match self.0 {
            None => other,
            Some(b) => Bounds {
                x_min: b.x_min.min(other.x_min),
                y_min: b.y_min.min(other.y_min),
                x_max: b.x_max.max(other.x_max),
                y_max: b.y_max.max(other.y_max),
            },
        });
    }
}

impl Accumulator<(usize, usize)> for BoundingBox {
    type Output = Option<Bounds>;

    fn take(&mut self, (x, y): (usize, usize)) {
        self.absorb(Bounds {
            x_min: x,
            y_min: y,
            x_max: x,
            y_max: y,
        });
    }

    fn merge(&mut self, other: &Self) {
        if let Some(b) = other.0 {
            self.absorb(b);
        }
    }

    fn finish(&self) -> Option<Bounds> {
        self.0
    }
}
