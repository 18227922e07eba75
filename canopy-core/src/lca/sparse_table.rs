//! Sparse table answering range-argmin queries in constant time.
//!
//! Row `k` stores, for every start `i`, the position of the minimum of
//! `keys[i..i + 2^k]`. Ties resolve to the leftmost position.

#[derive(Clone, Debug)]
pub(crate) struct SparseTable {
    row_offsets: Vec<usize>,
    table: Vec<usize>,
}

fn better(keys: &[u32], a: usize, b: usize) -> usize {
    debug_assert!(a <= b);
    if keys[b] < keys[a] { b } else { a }
}

impl SparseTable {
    pub(crate) fn new(keys: &[u32]) -> Self {
        let n = keys.len();
        if n == 0 {
            return Self {
                row_offsets: Vec::new(),
                table: Vec::new(),
            };
        }

        let levels = n.ilog2() as usize + 1;
        let mut row_offsets = Vec::with_capacity(levels);
        let mut offset = 0;
        for k in 0..levels {
            row_offsets.push(offset);
            offset += n + 1 - (1 << k);
        }

        let mut table = Vec::with_capacity(offset);
        table.extend(0..n);
        for k in 1..levels {
            let half = 1 << (k - 1);
            let prev = row_offsets[k - 1];
            for i in 0..=n - (1 << k) {
                let best = better(keys, table[prev + i], table[prev + i + half]);
                table.push(best);
            }
        }
        debug_assert_eq!(table.len(), offset);

        Self { row_offsets, table }
    }

    /// Position of the minimum of `keys[start..=end]`.
    pub(crate) fn argmin(&self, keys: &[u32], start: usize, end: usize) -> usize {
        debug_assert!(start <= end && end < keys.len());
        let len = end - start + 1;
        let k = len.ilog2() as usize;
        let base = self.row_offsets[k];
        let a = self.table[base + start];
        let b = self.table[base + end + 1 - (1 << k)];
        better(keys, a, b)
    }
}
