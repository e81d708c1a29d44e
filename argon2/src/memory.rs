//! The memory matrix and its per-slice split into lane segments.

use crate::{Block, Error, Params, Result};
use alloc::vec::Vec;
use zeroize::Zeroize;

/// Shape of the memory matrix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Layout {
    pub(crate) lanes: u32,
    pub(crate) lane_length: usize,
    pub(crate) segment_length: usize,
}

impl Layout {
    pub(crate) fn new(params: &Params) -> Self {
        Self {
            lanes: params.lanes(),
            lane_length: params.lane_length(),
            segment_length: params.segment_length(),
        }
    }

    pub(crate) fn block_count(&self) -> usize {
        self.lane_length * self.lanes as usize
    }

    /// First column of `slice`.
    pub(crate) fn slice_start(&self, slice: u32) -> usize {
        slice as usize * self.segment_length
    }
}

/// Lane-major view over the blocks being filled.
///
/// Every block is zeroized when the view is dropped, including while
/// unwinding.
pub(crate) struct Memory<'a> {
    blocks: &'a mut [Block],
    layout: Layout,
}

impl<'a> Memory<'a> {
    /// Wraps the first `layout.block_count()` blocks of `blocks`.
    pub(crate) fn new(blocks: &'a mut [Block], layout: Layout) -> Result<Self> {
        let count = layout.block_count();
        if blocks.len() < count {
            return Err(Error::BufferTooSmall);
        }

        let (blocks, _) = blocks.split_at_mut(count);
        Ok(Self { blocks, layout })
    }

    pub(crate) fn layout(&self) -> Layout {
        self.layout
    }

    pub(crate) fn block(&self, lane: u32, column: usize) -> &Block {
        &self.blocks[self.offset(lane, column)]
    }

    pub(crate) fn block_mut(&mut self, lane: u32, column: usize) -> &mut Block {
        let offset = self.offset(lane, column);
        &mut self.blocks[offset]
    }

    /// Splits the matrix for filling `slice`: one mutable segment per lane,
    /// and a shared [`Snapshot`] of every block outside the slice.
    pub(crate) fn split_slice(&mut self, slice: u32) -> (Snapshot<'_>, Vec<&mut [Block]>) {
        let Layout {
            lanes,
            lane_length,
            segment_length,
        } = self.layout;
        let slice_start = self.layout.slice_start(slice);

        let mut rows = Vec::with_capacity(lanes as usize);
        let mut segments = Vec::with_capacity(lanes as usize);

        for row in self.blocks.chunks_exact_mut(lane_length) {
            let (head, rest) = row.split_at_mut(slice_start);
            let (segment, tail) = rest.split_at_mut(segment_length);
            let head: &[Block] = head;
            let tail: &[Block] = tail;
            rows.push((head, tail));
            segments.push(segment);
        }

        let snapshot = Snapshot {
            rows,
            slice_start,
            segment_length,
        };
        (snapshot, segments)
    }

    fn offset(&self, lane: u32, column: usize) -> usize {
        debug_assert!(column < self.layout.lane_length);
        lane as usize * self.layout.lane_length + column
    }
}

impl Drop for Memory<'_> {
    fn drop(&mut self) {
        self.blocks.zeroize();
    }
}

/// Read-only blocks of every lane outside the slice being filled.
pub(crate) struct Snapshot<'a> {
    rows: Vec<(&'a [Block], &'a [Block])>,
    slice_start: usize,
    segment_length: usize,
}

impl Snapshot<'_> {
    /// Block at `column` of `lane`; the column must lie outside the
    /// current slice.
    pub(crate) fn block(&self, lane: u32, column: usize) -> &Block {
        let (head, tail) = self.rows[lane as usize];
        if column < self.slice_start {
            &head[column]
        } else {
            debug_assert!(column >= self.slice_start + self.segment_length);
            &tail[column - self.slice_start - self.segment_length]
        }
    }
}

/// What a single lane sees while filling its segment: its own segment
/// mutably, everything outside the slice through the shared snapshot.
pub(crate) struct SegmentView<'a> {
    lane: u32,
    segment: &'a mut [Block],
    snapshot: &'a Snapshot<'a>,
}

impl<'a> SegmentView<'a> {
    pub(crate) fn new(lane: u32, segment: &'a mut [Block], snapshot: &'a Snapshot<'a>) -> Self {
        Self {
            lane,
            segment,
            snapshot,
        }
    }

    pub(crate) fn lane(&self) -> u32 {
        self.lane
    }

    /// Block at (`lane`, `column`) of the whole matrix.
    pub(crate) fn block(&self, lane: u32, column: usize) -> &Block {
        let start = self.snapshot.slice_start;
        if lane == self.lane && (start..start + self.segment.len()).contains(&column) {
            &self.segment[column - start]
        } else {
            self.snapshot.block(lane, column)
        }
    }

    /// Block `index` of this lane's segment.
    pub(crate) fn current_mut(&mut self, index: usize) -> &mut Block {
        &mut self.segment[index]
    }
}
