//! Minimal 2-D image model consumed by the tree builders.
//!
//! Points are raster indices. The domain is always iterated as
//! `0..width * height`, which is the order every tie-break in the crate refers
//! to.

mod grid;
mod neighborhood;

use std::ops::{Index, IndexMut, Range};

pub(crate) use self::grid::Grid;
pub use self::neighborhood::{C4, C8, Neighborhood};
use crate::error::ImageError;

/// Raster (row-major) index of a pixel.
pub type Point = usize;

/// Owned row-major image.
///
/// # Examples
/// ```
/// use canopy_core::Image2d;
///
/// let image = Image2d::from_rows(vec![vec![1_u8, 2], vec![3, 4]])?;
/// assert_eq!(image.get_xy(1, 1), Some(&4));
/// assert_eq!(image.coords(2), (0, 1));
/// # Ok::<(), canopy_core::ImageError>(())
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Image2d<V> {
    width: usize,
    height: usize,
    data: Vec<V>,
}

impl<V: Clone> Image2d<V> {
    /// Creates an image filled with `fill`.
    #[must_use]
    pub fn new(width: usize, height: usize, fill: V) -> Self {
        Self {
            width,
            height,
            data: vec![fill; width * height],
        }
    }
}

impl<V> Image2d<V> {
    /// Creates an image by evaluating `f` at every point in raster order.
    #[must_use]
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Self
    where
        F: FnMut(Point) -> V,
    {
        Self {
            width,
            height,
            data: (0..width * height).map(f).collect(),
        }
    }

    /// Wraps a row-major buffer.
    ///
    /// # Errors
    /// Returns [`ImageError::DimensionMismatch`] when `data` does not hold
    /// exactly `width * height` values.
    pub fn from_vec(width: usize, height: usize, data: Vec<V>) -> Result<Self, ImageError> {
        if width.checked_mul(height) != Some(data.len()) {
            return Err(ImageError::DimensionMismatch {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds an image from a list of equally sized rows.
    ///
    /// # Errors
    /// Returns [`ImageError::RaggedRows`] when a row differs in length from
    /// the first one.
    pub fn from_rows(rows: Vec<Vec<V>>) -> Result<Self, ImageError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(ImageError::RaggedRows {
                    row,
                    expected: width,
                    actual: values.len(),
                });
            }
            data.extend(values);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Number of columns.
    #[must_use]
    #[rustfmt::skip]
    pub fn width(&self) -> usize { self.width }

    /// Number of rows.
    #[must_use]
    #[rustfmt::skip]
    pub fn height(&self) -> usize { self.height }

    /// Number of pixels.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.data.len() }

    /// Whether the domain is empty.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Returns the value at `p`, if it lies in the domain.
    #[must_use]
    pub fn get(&self, p: Point) -> Option<&V> {
        self.data.get(p)
    }

    /// Returns the value at column `x`, row `y`.
    #[must_use]
    pub fn get_xy(&self, x: usize, y: usize) -> Option<&V> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    /// Overwrites the value at `p`.
    ///
    /// # Panics
    /// Panics when `p` lies outside the domain.
    pub fn set(&mut self, p: Point, value: V) {
        self.data[p] = value;
    }

    /// Row-major view of the pixel values.
    #[must_use]
    pub fn values(&self) -> &[V] {
        &self.data
    }

    /// Consumes the image and returns its row-major buffer.
    #[must_use]
    pub fn into_values(self) -> Vec<V> {
        self.data
    }

    /// Domain points in raster order.
    #[must_use]
    pub fn points(&self) -> Range<Point> {
        0..self.data.len()
    }

    /// Converts a raster index into `(x, y)`.
    #[must_use]
    pub fn coords(&self, p: Point) -> (usize, usize) {
        (p % self.width, p / self.width)
    }

    /// Applies `f` to every pixel, keeping the geometry.
    #[must_use]
    pub fn map<T, F>(&self, f: F) -> Image2d<T>
    where
        F: FnMut(&V) -> T,
    {
        Image2d {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<V> Index<Point> for Image2d<V> {
    type Output = V;

    fn index(&self, p: Point) -> &V {
        &self.data[p]
    }
}

impl<V> IndexMut<Point> for Image2d<V> {
    fn index_mut(&mut self, p: Point) -> &mut V {
        &mut self.data[p]
    }
}
