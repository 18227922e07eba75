//! Structuring neighbourhoods over the raster grid.

/// Enumerates the points adjacent to a centre as `(dx, dy)` offsets.
pub trait Neighborhood {
    /// All offsets, in raster order.
    fn offsets(&self) -> &[(isize, isize)];

    /// The offsets that come after the centre in raster order.
    ///
    /// Visiting only these from every point enumerates each undirected edge of
    /// the neighbourhood graph exactly once.
    fn forward_offsets(&self) -> &[(isize, isize)];

    /// Largest coordinate displacement of any offset.
    fn radius(&self) -> usize {
        self.offsets()
            .iter()
            .map(|&(dx, dy)| dx.unsigned_abs().max(dy.unsigned_abs()))
            .max()
            .unwrap_or(0)
    }
}

/// 4-connectivity.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct C4;

/// 8-connectivity.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct C8;

const C4_OFFSETS: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
const C8_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl Neighborhood for C4 {
    fn offsets(&self) -> &[(isize, isize)] {
        &C4_OFFSETS
    }

    fn forward_offsets(&self) -> &[(isize, isize)] {
        &C4_OFFSETS[2..]
    }

    fn radius(&self) -> usize {
        1
    }
}

impl Neighborhood for C8 {
    fn offsets(&self) -> &[(isize, isize)] {
        &C8_OFFSETS
    }

    fn forward_offsets(&self) -> &[(isize, isize)] {
        &C8_OFFSETS[4..]
    }

    fn radius(&self) -> usize {
        1
    }
}
