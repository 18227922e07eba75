//! Constant-time range-argmin over a ±1 sequence with linear preprocessing.
//!
//! The sequence is cut into blocks of `b ≈ log(n) / 2` entries. Since
//! neighbouring entries differ by exactly one, a block is fully described up
//! to an offset by the `b - 1` bits of its up/down steps. One in-block argmin
//! table is built per step signature that actually occurs, and a sparse table
//! over the block minima answers the part of a query spanning whole blocks.

use super::sparse_table::SparseTable;

const MAX_BLOCK: usize = 16;

#[derive(Clone, Debug)]
pub(crate) struct BlockRmq {
    block: usize,
    signatures: Vec<usize>,
    tables: Vec<Option<Box<[u8]>>>,
    block_min: Vec<u32>,
    block_pos: Vec<usize>,
    summary: SparseTable,
}

impl BlockRmq {
    pub(crate) fn new(keys: &[u32]) -> Self {
        let n = keys.len();
        let ceil_log = if n > 1 { (n - 1).ilog2() as usize + 1 } else { 0 };
        let block = (ceil_log / 2).clamp(1, MAX_BLOCK);
        let blocks = n.div_ceil(block);

        let mut signatures = Vec::with_capacity(blocks);
        let mut tables: Vec<Option<Box<[u8]>>> = vec![None; 1 << (block - 1)];
        let mut block_min = Vec::with_capacity(blocks);
        let mut block_pos = Vec::with_capacity(blocks);
        for k in 0..blocks {
            let start = k * block;
            let end = n.min(start + block);
            let signature = signature(&keys[start..end], block);
            let table = tables[signature].get_or_insert_with(|| in_block_table(signature, block));
            let pos = start + table[end - start - 1] as usize;
            signatures.push(signature);
            block_min.push(keys[pos]);
            block_pos.push(pos);
        }
        let summary = SparseTable::new(&block_min);

        Self {
            block,
            signatures,
            tables,
            block_min,
            block_pos,
            summary,
        }
    }

    /// Position of the minimum of `keys[start..=end]`, leftmost on ties.
    pub(crate) fn argmin(&self, keys: &[u32], start: usize, end: usize) -> usize {
        debug_assert!(start <= end && end < keys.len());
        let b = self.block;
        let (bl, br) = (start / b, end / b);
        if bl == br {
            return self.in_block(bl, start % b, end % b);
        }

        let mut best = self.in_block(bl, start % b, b - 1);
        if bl + 1 < br {
            let k = self.summary.argmin(&self.block_min, bl + 1, br - 1);
            best = leftmost_min(keys, best, self.block_pos[k]);
        }
        leftmost_min(keys, best, self.in_block(br, 0, end % b))
    }

    fn in_block(&self, k: usize, i: usize, j: usize) -> usize {
        let table = self.tables[self.signatures[k]]
            .as_deref()
            .unwrap_or_default();
        k * self.block + table.get(i * self.block + j).map_or(i, |&o| o as usize)
    }
}

fn leftmost_min(keys: &[u32], a: usize, b: usize) -> usize {
    if keys[b] < keys[a] { b } else { a }
}

/// Bit `i` is set when the sequence steps up between entries `i` and `i + 1`.
/// Steps past the end of a short final block count as upward.
fn signature(chunk: &[u32], block: usize) -> usize {
    let mut signature = 0;
    for i in 0..block - 1 {
        let up = match (chunk.get(i), chunk.get(i + 1)) {
            (Some(a), Some(b)) => b > a,
            _ => true,
        };
        if up {
            signature |= 1 << i;
        }
    }
    signature
}

/// Offsets of the in-block argmin for every `(i, j)` pair, row-major.
#[expect(
    clippy::cast_possible_truncation,
    reason = "in-block offsets are below MAX_BLOCK"
)]
fn in_block_table(signature: usize, block: usize) -> Box<[u8]> {
    let mut relative = vec![0_i32; block];
    for i in 1..block {
        let step = if signature & (1 << (i - 1)) != 0 { 1 } else { -1 };
        relative[i] = relative[i - 1] + step;
    }
    let mut table = vec![0_u8; block * block];
    for i in 0..block {
        let mut best = i;
        for j in i..block {
            if relative[j] < relative[best] {
                best = j;
            }
            table[i * block + j] = best as u8;
        }
    }
    table.into_boxed_slice()
}
