//! Padded auxiliary layout for the union-find engine.
//!
//! The union-find arrays live on the image domain grown by a border of
//! `width` cells on every side. With [`ExtensionPolicy::Fill`] the border is
//! never processed, so neighbour lookups need no bounds checks. With
//! [`ExtensionPolicy::Periodic`] border positions fold back onto the opposite
//! edge of the domain.

use super::{Neighborhood, Point};
use crate::config::{Extension, ExtensionPolicy};

#[derive(Clone, Debug)]
pub(crate) struct Grid {
    width: usize,
    height: usize,
    border: usize,
    stride: usize,
    policy: ExtensionPolicy,
    offsets: Vec<(isize, isize)>,
    forward: Vec<(isize, isize)>,
    deltas: Vec<isize>,
}

impl Grid {
    pub(crate) fn new<N>(width: usize, height: usize, nbh: &N, extension: &Extension) -> Self
    where
        N: Neighborhood + ?Sized,
    {
        let border = extension.resolve_width(nbh.radius());
        let stride = width + 2 * border;
        let signed_stride = isize::try_from(stride).unwrap_or(isize::MAX);
        let deltas = nbh
            .offsets()
            .iter()
            .map(|&(dx, dy)| dy * signed_stride + dx)
            .collect();
        Self {
            width,
            height,
            border,
            stride,
            policy: extension.policy(),
            offsets: nbh.offsets().to_vec(),
            forward: nbh.forward_offsets().to_vec(),
            deltas,
        }
    }

    pub(crate) fn padded_len(&self) -> usize {
        self.stride * (self.height + 2 * self.border)
    }

    pub(crate) fn to_padded(&self, p: Point) -> usize {
        let (x, y) = (p % self.width, p / self.width);
        (y + self.border) * self.stride + x + self.border
    }

    pub(crate) fn to_image(&self, q: usize) -> Point {
        let (x, y) = (q % self.stride, q / self.stride);
        debug_assert!(self.is_interior(x, y), "padded index {q} lies in the border");
        (y - self.border) * self.width + (x - self.border)
    }

    /// Neighbours of the padded index `q`, also in padded space.
    pub(crate) fn neighbors(&self, q: usize) -> impl Iterator<Item = usize> + '_ {
        let len = self.padded_len();
        let folded = (q % self.stride, q / self.stride);
        self.deltas
            .iter()
            .zip(&self.offsets)
            .filter_map(move |(&delta, &offset)| match self.policy {
                ExtensionPolicy::Fill => {
                    let n = q.checked_add_signed(delta);
                    debug_assert!(
                        n.is_some_and(|n| n < len),
                        "neighbour of {q} escapes the padded domain"
                    );
                    n
                }
                ExtensionPolicy::Periodic => {
                    let (x, y) = self.wrap(folded.0 - self.border, folded.1 - self.border, offset);
                    Some((y + self.border) * self.stride + x + self.border)
                }
            })
    }

    /// Forward neighbours of `p` in image space, one per undirected edge.
    pub(crate) fn forward_neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        let (x, y) = (p % self.width, p / self.width);
        self.forward.iter().filter_map(move |&offset| match self.policy {
            ExtensionPolicy::Fill => {
                let nx = x.checked_add_signed(offset.0).filter(|&nx| nx < self.width)?;
                let ny = y.checked_add_signed(offset.1).filter(|&ny| ny < self.height)?;
                Some(ny * self.width + nx)
            }
            ExtensionPolicy::Periodic => {
                let (nx, ny) = self.wrap(x, y, offset);
                Some(ny * self.width + nx)
            }
        })
    }

    fn wrap(&self, x: usize, y: usize, (dx, dy): (isize, isize)) -> (usize, usize) {
        (
            wrap_axis(x, dx, self.width),
            wrap_axis(y, dy, self.height),
        )
    }

    fn is_interior(&self, x: usize, y: usize) -> bool {
        (self.border..self.border + self.width).contains(&x)
            && (self.border..self.border + self.height).contains(&y)
    }
}

fn wrap_axis(coord: usize, delta: isize, extent: usize) -> usize {
    let lifted = coord + extent * delta.unsigned_abs();
    lifted.checked_add_signed(delta).unwrap_or(lifted) % extent
}
