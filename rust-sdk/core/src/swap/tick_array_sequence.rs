use solana_pubkey::Pubkey;

use crate::{
    CoreError, Result, Tick, TickArrayAccount, TickArrayIndex, MAX_TICK_INDEX, MIN_TICK_INDEX,
};

/// Outcome of a directional search for the next initialized tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NextInitializedTick<'a> {
    /// An initialized tick inside the loaded window.
    Found { tick_index: i32, tick: &'a Tick },
    /// No initialized tick before the edge of the loaded window. `tick_index` is the edge.
    ExhaustedAt { tick_index: i32 },
}

impl NextInitializedTick<'_> {
    pub fn tick_index(&self) -> i32 {
        match self {
            NextInitializedTick::Found { tick_index, .. } => *tick_index,
            NextInitializedTick::ExhaustedAt { tick_index } => *tick_index,
        }
    }
}

/// Position of a tick array inside a sequence, given the array index of the sequence's first
/// array. Arrays are ordered in the direction of the swap.
pub fn local_array_index(start_array_index: i32, array_index: i32, a_to_b: bool) -> i32 {
    if a_to_b {
        start_array_index - array_index
    } else {
        array_index - start_array_index
    }
}

/// A read-only window of consecutive tick arrays, ordered in the direction of a swap.
///
/// Every array the traversal reads from is recorded, so the quote can report the accounts
/// the swap instruction will need.
#[derive(Debug)]
pub struct TickArraySequence<'a> {
    tick_arrays: &'a [TickArrayAccount],
    tick_spacing: u16,
    a_to_b: bool,
    start_array_index: i32,
    touched: Vec<bool>,
}

impl<'a> TickArraySequence<'a> {
    /// The first tick array must hold data; later ones may be uninitialized and only fail
    /// once the traversal reaches them.
    pub fn new(tick_arrays: &'a [TickArrayAccount], tick_spacing: u16, a_to_b: bool) -> Result<Self> {
        if tick_spacing == 0 {
            return Err(CoreError::InvalidTickSpacing);
        }
        let first = tick_arrays
            .first()
            .and_then(|tick_array| tick_array.data.as_ref())
            .ok_or(CoreError::TickArrayIndexNotInitialized(0))?;
        let start_array_index =
            TickArrayIndex::from_tick_index(first.start_tick_index, tick_spacing)?.array_index;

        Ok(Self {
            tick_arrays,
            tick_spacing,
            a_to_b,
            start_array_index,
            touched: vec![false; tick_arrays.len()],
        })
    }

    pub fn len(&self) -> usize {
        self.tick_arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tick_arrays.is_empty()
    }

    pub fn tick_spacing(&self) -> u16 {
        self.tick_spacing
    }

    pub fn a_to_b(&self) -> bool {
        self.a_to_b
    }

    /// Whether the first array covers the first tick a search from `tick_current_index` reads.
    pub fn is_valid_tick_array_0(&self, tick_current_index: i32) -> bool {
        let Some(search_index) = self.search_start_index(tick_current_index) else {
            return false;
        };
        self.tick_arrays[0]
            .data
            .as_ref()
            .is_some_and(|tick_array| tick_array.in_search_range(search_index, self.tick_spacing))
    }

    pub fn is_array_index_in_bounds(&self, index: &TickArrayIndex) -> bool {
        self.local_index(index).is_some()
    }

    /// Look up a tick and mark its array as touched.
    pub fn get_tick(&mut self, tick_index: i32) -> Result<&'a Tick> {
        let index = TickArrayIndex::from_tick_index(tick_index, self.tick_spacing)?;
        let local_index = self
            .local_index(&index)
            .ok_or(CoreError::TickArraySequenceInvalid)?;
        self.touched[local_index] = true;

        let tick_arrays = self.tick_arrays;
        let tick_array = tick_arrays[local_index]
            .data
            .as_ref()
            .ok_or(CoreError::TickArrayIndexNotInitialized(local_index))?;
        if !tick_array.in_search_range(tick_index, self.tick_spacing) {
            return Err(CoreError::TickArraySequenceInvalid);
        }
        Ok(&tick_array.ticks[index.offset_index as usize])
    }

    /// Walk from `tick_index` in the swap direction to the next initialized tick.
    ///
    /// a to b includes `tick_index` itself; b to a starts one tick spacing above it. The walk
    /// ends at the last array holding data, so an uninitialized array only fails a search that
    /// starts inside it.
    pub fn find_next_initialized_tick_index(
        &mut self,
        tick_index: i32,
    ) -> Result<NextInitializedTick<'a>> {
        let search_index = self
            .search_start_index(tick_index)
            .ok_or(CoreError::TickArraySequenceInvalid)?;
        let mut current = TickArrayIndex::from_tick_index(search_index, self.tick_spacing)?;
        let local_index = self
            .local_index(&current)
            .ok_or(CoreError::TickArraySequenceInvalid)?;
        if self.tick_arrays[local_index].data.is_none() {
            self.touched[local_index] = true;
            return Err(CoreError::TickArrayIndexNotInitialized(local_index));
        }

        loop {
            let candidate_index = current.to_tick_index();
            let tick = self.get_tick(candidate_index)?;
            if tick.initialized {
                return Ok(NextInitializedTick::Found {
                    tick_index: candidate_index,
                    tick,
                });
            }

            let next = if self.a_to_b {
                current.to_prev_initializable_tick_index()
            } else {
                current.to_next_initializable_tick_index()
            };
            match next {
                Some(next) if self.is_array_index_loaded(&next) => current = next,
                _ => {
                    // a to b stops on the lowest loaded tick, b to a on the highest loaded tick
                    let edge = if self.a_to_b {
                        candidate_index
                    } else {
                        candidate_index.saturating_add(self.tick_spacing as i32 - 1)
                    };
                    return Ok(NextInitializedTick::ExhaustedAt {
                        tick_index: edge.clamp(MIN_TICK_INDEX, MAX_TICK_INDEX),
                    });
                }
            }
        }
    }

    pub fn num_touched_arrays(&self) -> usize {
        self.touched.iter().filter(|touched| **touched).count()
    }

    /// Addresses of the touched arrays in traversal order, padded to `min_size` by repeating
    /// the last one.
    pub fn get_touched_arrays(&self, min_size: usize) -> Vec<Pubkey> {
        let mut addresses: Vec<Pubkey> = self
            .tick_arrays
            .iter()
            .zip(&self.touched)
            .filter(|(_, touched)| **touched)
            .map(|(tick_array, _)| tick_array.address)
            .collect();
        if let Some(last) = addresses.last().copied() {
            addresses.resize(addresses.len().max(min_size), last);
        }
        addresses
    }

    fn search_start_index(&self, tick_index: i32) -> Option<i32> {
        if self.a_to_b {
            Some(tick_index)
        } else {
            tick_index.checked_add(self.tick_spacing as i32)
        }
    }

    fn is_array_index_loaded(&self, index: &TickArrayIndex) -> bool {
        self.local_index(index)
            .is_some_and(|local_index| self.tick_arrays[local_index].data.is_some())
    }

    fn local_index(&self, index: &TickArrayIndex) -> Option<usize> {
        let local_index = local_array_index(self.start_array_index, index.array_index, self.a_to_b);
        usize::try_from(local_index)
            .ok()
            .filter(|local_index| *local_index < self.tick_arrays.len())
    }
}
