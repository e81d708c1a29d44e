//! Segment filling and reference block selection.

use crate::{
    Block, Params, SYNC_POINTS,
    memory::{Layout, Memory, SegmentView, Snapshot},
};
use alloc::vec::Vec;

/// Number of pseudo-random values held by one address block.
const ADDRESSES_IN_BLOCK: usize = 128;

const ZERO_BLOCK: Block = Block::new();

/// Coordinates of the block being computed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Position {
    pub(crate) pass: u32,
    pub(crate) lane: u32,
    pub(crate) slice: u32,
    /// Index within the segment.
    pub(crate) index: usize,
}

/// Pseudo-random values for data-independent addressing.
///
/// The input block holds `pass, lane, slice, block_count, iterations,
/// algorithm, counter`; each refill bumps the counter and computes
/// `G(0, G(0, input))`.
pub(crate) struct AddressGenerator {
    input: Block,
    addresses: Block,
}

impl AddressGenerator {
    pub(crate) fn new(params: &Params, layout: &Layout, position: &Position) -> Self {
        let mut input = Block::new();
        let words = input.as_words_mut();
        words[0] = position.pass.into();
        words[1] = position.lane.into();
        words[2] = position.slice.into();
        words[3] = layout.block_count() as u64;
        words[4] = params.iterations().into();
        words[5] = u32::from(params.algorithm()).into();

        Self {
            input,
            addresses: Block::new(),
        }
    }

    /// Refills the address block.
    pub(crate) fn next(&mut self) {
        self.input.as_words_mut()[6] += 1;
        let tmp = Block::compress(&ZERO_BLOCK, &self.input);
        self.addresses = Block::compress(&ZERO_BLOCK, &tmp);
    }

    /// Pseudo-random value for segment `index`.
    pub(crate) fn get(&self, index: usize) -> u64 {
        self.addresses.as_words()[index % ADDRESSES_IN_BLOCK]
    }
}

/// Lane holding the reference block for the pseudo-random value `rand`.
pub(crate) fn reference_lane(layout: &Layout, position: &Position, rand: u64) -> u32 {
    if position.pass == 0 && position.slice == 0 {
        // only the current lane has been written
        position.lane
    } else {
        ((rand >> 32) % u64::from(layout.lanes)) as u32
    }
}

/// Column of the reference block, given the lane chosen by
/// [`reference_lane`].
///
/// The candidate area is every block already finished: in the first pass
/// everything before the current slice (plus the current segment so far
/// for the own lane); in later passes the whole lane except the current
/// segment of other lanes and the current block. The low 32 bits of
/// `rand` are mapped non-uniformly onto that area, favouring recent
/// blocks.
pub(crate) fn reference_column(
    layout: &Layout,
    position: &Position,
    rand: u64,
    same_lane: bool,
) -> usize {
    let segment_length = layout.segment_length;
    let lane_length = layout.lane_length;

    let (start, finished) = if position.pass == 0 {
        (0, layout.slice_start(position.slice))
    } else {
        let next_slice = (position.slice + 1) % SYNC_POINTS;
        (
            layout.slice_start(next_slice),
            lane_length - segment_length,
        )
    };

    let area = if same_lane {
        finished + position.index - 1
    } else if position.index == 0 {
        finished - 1
    } else {
        finished
    };

    let area = area as u64;
    let low = rand & 0xFFFF_FFFF;
    let x = (low * low) >> 32;
    let relative = area - 1 - ((area * x) >> 32);

    (start + relative as usize) % lane_length
}

/// Fills one lane's segment of the current slice.
pub(crate) fn fill_segment(
    params: &Params,
    layout: &Layout,
    mut view: SegmentView<'_>,
    pass: u32,
    slice: u32,
) {
    let mut position = Position {
        pass,
        lane: view.lane(),
        slice,
        index: 0,
    };

    let data_independent = params
        .algorithm()
        .uses_data_independent_addressing(pass, slice);
    let xor = params.version().xors_existing_block(pass);

    // the first two blocks of every lane are seeded from H0
    let first_index = if pass == 0 && slice == 0 { 2 } else { 0 };

    let mut addresses = data_independent.then(|| {
        let mut generator = AddressGenerator::new(params, layout, &position);
        if first_index != 0 {
            generator.next();
        }
        generator
    });

    let slice_start = layout.slice_start(slice);

    for index in first_index..layout.segment_length {
        position.index = index;

        let column = slice_start + index;
        let prev_column = match column {
            0 => layout.lane_length - 1,
            c => c - 1,
        };
        let prev = view.block(position.lane, prev_column);

        let rand = match addresses.as_mut() {
            Some(generator) => {
                if index % ADDRESSES_IN_BLOCK == 0 {
                    generator.next();
                }
                generator.get(index)
            }
            None => prev.as_words()[0],
        };

        let ref_lane = reference_lane(layout, &position, rand);
        let ref_column = reference_column(layout, &position, rand, ref_lane == position.lane);

        let next = Block::compress(prev, view.block(ref_lane, ref_column));

        let current = view.current_mut(index);
        if xor {
            *current ^= &next;
        } else {
            *current = next;
        }
    }
}

/// Fills the segment of every lane in `slice`.
///
/// Returns once all lanes are done, which is the synchronization point
/// between slices.
pub(crate) fn fill_slice(params: &Params, memory: &mut Memory<'_>, pass: u32, slice: u32) {
    let layout = memory.layout();
    let (snapshot, segments) = memory.split_slice(slice);
    fill_lanes(params, &layout, &snapshot, segments, pass, slice);
}

fn fill_lanes_serial(
    params: &Params,
    layout: &Layout,
    snapshot: &Snapshot<'_>,
    segments: Vec<&mut [Block]>,
    pass: u32,
    slice: u32,
) {
    for (lane, segment) in (0u32..).zip(segments) {
        let view = SegmentView::new(lane, segment, snapshot);
        fill_segment(params, layout, view, pass, slice);
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "parallel")] {
        /// One scoped thread per lane; the scope ends when every lane is done.
        fn fill_lanes(
            params: &Params,
            layout: &Layout,
            snapshot: &Snapshot<'_>,
            segments: Vec<&mut [Block]>,
            pass: u32,
            slice: u32,
        ) {
            if segments.len() < 2 {
                return fill_lanes_serial(params, layout, snapshot, segments, pass, slice);
            }

            let result = crossbeam_utils::thread::scope(|scope| {
                for (lane, segment) in (0u32..).zip(segments) {
                    scope.spawn(move |_| {
                        let view = SegmentView::new(lane, segment, snapshot);
                        fill_segment(params, layout, view, pass, slice);
                    });
                }
            });

            if let Err(panic) = result {
                std::panic::resume_unwind(panic);
            }
        }
    } else {
        use self::fill_lanes_serial as fill_lanes;
    }
}
