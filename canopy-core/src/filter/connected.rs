//! Attribute openings and closings computed directly on the union-find engine.
//!
//! No tree is materialised. Points are flooded from the extreme values inwards;
//! a component stops growing as soon as its attribute reaches the threshold,
//! and every point finally takes the value of the root of its component.

use std::cmp::Ordering;

use tracing::instrument;

use super::Contrast;
use crate::{
    config::TreeConfig,
    image::{Image2d, Neighborhood, Point},
    union_find::{UnionFindVisitor, union_find},
};

type Compare<V> = fn(&V, &V) -> Ordering;

fn flood<V, N, Vis>(
    image: &Image2d<V>,
    nbh: &N,
    config: &TreeConfig,
    compare: Compare<V>,
    visitor: Vis,
) -> Vis
where
    N: Neighborhood + ?Sized,
    Vis: UnionFindVisitor,
{
    let mut order: Vec<Point> = image.points().collect();
    order.sort_by(|&a, &b| compare(&image[b], &image[a]));
    union_find(
        image.width(),
        image.height(),
        &order,
        nbh,
        &config.extension(),
        visitor,
    )
}

struct AreaFilter<'a, V> {
    image: &'a Image2d<V>,
    area: Vec<usize>,
    threshold: usize,
    out: Image2d<V>,
}

impl<'a, V: Clone> AreaFilter<'a, V> {
    fn new(image: &'a Image2d<V>, threshold: usize) -> Self {
        Self {
            image,
            area: vec![0; image.len()],
            threshold,
            out: image.clone(),
        }
    }
}

impl<V: Clone> UnionFindVisitor for AreaFilter<'_, V> {
    fn on_make_set(&mut self, p: Point) {
        self.area[p] = 1;
    }

    fn on_union(&mut self, root_p: Point, root_q: Point) -> Point {
        self.area[root_p] += self.area[root_q];
        root_p
    }

    fn on_finish(&mut self, p: Point, root: Point) {
        self.out[p] = self.image[root].clone();
    }

    fn test(&self, root: Point) -> bool {
        self.area[root] >= self.threshold
    }
}

struct DynamicFilter<'a, V> {
    image: &'a Image2d<V>,
    extreme: Vec<V>,
    dynamic: V,
    compare: Compare<V>,
    out: Image2d<V>,
}

impl<V: Ord + Contrast + Clone> UnionFindVisitor for DynamicFilter<'_, V> {
    fn on_make_set(&mut self, p: Point) {
        self.extreme[p] = self.image[p].clone();
    }

    fn on_union(&mut self, root_p: Point, root_q: Point) -> Point {
        if (self.compare)(&self.extreme[root_p], &self.extreme[root_q]) == Ordering::Less {
            self.extreme[root_p] = self.extreme[root_q].clone();
        }
        root_p
    }

    fn on_finish(&mut self, p: Point, root: Point) {
        self.out[p] = self.image[root].clone();
    }

    fn test(&self, root: Point) -> bool {
        self.extreme[root].abs_diff(&self.image[root]) >= self.dynamic
    }
}

/// Removes the bright components smaller than `area` pixels.
///
/// # Examples
/// ```
/// use canopy_core::{C4, Image2d, TreeConfig, area_opening};
///
/// let image = Image2d::from_rows(vec![vec![0_u8, 9, 0, 7, 7]])?;
/// let opened = area_opening(&image, &C4, 2, &TreeConfig::default());
/// assert_eq!(opened.values(), &[0, 0, 0, 7, 7]);
/// # Ok::<(), canopy_core::ImageError>(())
/// ```
#[instrument(
    name = "canopy.area_opening",
    skip_all,
    fields(width = image.width(), height = image.height(), area = area),
)]
#[must_use]
pub fn area_opening<V, N>(
    image: &Image2d<V>,
    nbh: &N,
    area: usize,
    config: &TreeConfig,
) -> Image2d<V>
where
    V: Ord + Clone,
    N: Neighborhood + ?Sized,
{
    flood(image, nbh, config, V::cmp, AreaFilter::new(image, area)).out
}

/// Removes the dark components smaller than `area` pixels.
#[instrument(
    name = "canopy.area_closing",
    skip_all,
    fields(width = image.width(), height = image.height(), area = area),
)]
#[must_use]
pub fn area_closing<V, N>(
    image: &Image2d<V>,
    nbh: &N,
    area: usize,
    config: &TreeConfig,
) -> Image2d<V>
where
    V: Ord + Clone,
    N: Neighborhood + ?Sized,
{
    flood(image, nbh, config, |a, b| b.cmp(a), AreaFilter::new(image, area)).out
}

/// Flattens the regional maxima whose height above their surroundings is
/// below `dynamic` (the h-maxima transform).
#[instrument(
    name = "canopy.dynamic_opening",
    skip_all,
    fields(width = image.width(), height = image.height()),
)]
#[must_use]
pub fn dynamic_opening<V, N>(
    image: &Image2d<V>,
    nbh: &N,
    dynamic: V,
    config: &TreeConfig,
) -> Image2d<V>
where
    V: Ord + Contrast + Clone,
    N: Neighborhood + ?Sized,
{
    dynamic_filter(image, nbh, dynamic, config, V::cmp)
}

/// Fills the regional minima whose depth below their surroundings is below
/// `dynamic` (the h-minima transform).
#[instrument(
    name = "canopy.dynamic_closing",
    skip_all,
    fields(width = image.width(), height = image.height()),
)]
#[must_use]
pub fn dynamic_closing<V, N>(
    image: &Image2d<V>,
    nbh: &N,
    dynamic: V,
    config: &TreeConfig,
) -> Image2d<V>
where
    V: Ord + Contrast + Clone,
    N: Neighborhood + ?Sized,
{
    dynamic_filter(image, nbh, dynamic, config, |a, b| b.cmp(a))
}

fn dynamic_filter<V, N>(
    image: &Image2d<V>,
    nbh: &N,
    dynamic: V,
    config: &TreeConfig,
    compare: Compare<V>,
) -> Image2d<V>
where
    V: Ord + Contrast + Clone,
    N: Neighborhood + ?Sized,
{
    let visitor = DynamicFilter {
        image,
        extreme: image.values().to_vec(),
        dynamic,
        compare,
        out: image.clone(),
    };
    flood(image, nbh, config, compare, visitor).out
}
