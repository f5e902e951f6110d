//! Fixed-window moving sum over raw ADC samples

/// Circular history of the last `N` samples with an incrementally maintained sum.
///
/// The sum is never recomputed from the buffer: every push subtracts the
/// evicted sample and adds the new one, so it always equals the arithmetic sum
/// of `history`.
#[derive(Debug, Clone)]
pub struct MovingSum<const N: usize> {
    history: [u16; N],
    sum: u32,
    next_slot: usize,
    filled: usize,
}

impl<const N: usize> MovingSum<N> {
    const NON_EMPTY: () = assert!(N > 0, "MovingSum window must hold at least one sample");

    /// Create an all-zero window
    pub const fn new() -> Self {
        let () = Self::NON_EMPTY;

        Self {
            history: [0; N],
            sum: 0,
            next_slot: 0,
            filled: 0,
        }
    }

    /// Overwrite the oldest slot with `sample` and return the evicted value.
    pub fn push(&mut self, sample: u16) -> u16 {
        let evicted = self.history[self.next_slot];

        self.sum -= u32::from(evicted);
        self.history[self.next_slot] = sample;
        self.sum += u32::from(sample);

        self.next_slot = (self.next_slot + 1) % N;
        if self.filled < N {
            self.filled += 1;
        }

        evicted
    }

    #[inline]
    pub const fn sum(&self) -> u32 {
        self.sum
    }

    /// Number of pushed samples, saturating at `N`
    #[inline]
    pub const fn len(&self) -> usize {
        self.filled
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.filled == 0
    }

    #[inline]
    pub const fn is_full(&self) -> bool {
        self.filled == N
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Index of the slot the next push will overwrite
    #[inline]
    pub const fn next_slot(&self) -> usize {
        self.next_slot
    }

    /// Raw slot contents in storage order (not chronological)
    pub fn samples(&self) -> &[u16; N] {
        &self.history
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl<const N: usize> Default for MovingSum<N> {
    fn default() -> Self {
        Self::new()
    }
}
