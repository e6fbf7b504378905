//! Probe sequences for open addressing.
//!
//! A [`Probe`] is a cursor over the candidate slots of a key. It starts at the
//! key's home slot, yields exactly `capacity` indices and then stops: by then
//! every slot has been visited once, so running out of indices means the key
//! can't be in the table and there's nowhere left to put it.
//!
//! ```text
//!  capacity 8, home slot 6
//!
//!  linear     6 -> 7 -> 0 -> 1 -> 2 -> 3 -> 4 -> 5
//!  quadratic  6 -> 7 -> 1 -> 4 -> 0 -> 5 -> 3 -> 2
//!                +1   +2   +3   +4   +5   +6   +7
//! ```

use std::iter::FusedIterator;
use std::marker::PhantomData;

/// The step rule of a probe sequence.
pub trait Probing {
    /// Whether every slot of a table with `capacity` slots is reachable.
    fn covers(capacity: usize) -> bool;

    /// The index following `index` once `step` indices have been produced.
    fn advance(index: usize, step: usize, capacity: usize) -> usize;
}

/// `h, h + 1, h + 2, ...`
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

/// `h + (i² + i) / 2`, that is `h, h + 1, h + 3, h + 6, h + 10, ...`
///
/// `i² + i` is the product of two consecutive integers, so it's always even.
/// Plain `h + i²` revisits a handful of slots forever (mod 8 it only reaches
/// four), while the triangular numbers are a permutation of any power of two.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quadratic;

#[derive(Debug, Clone)]
pub struct Probe<P> {
    start: usize,
    index: usize,
    /// How many indices were already produced.
    step: usize,
    capacity: usize,
    _probing: PhantomData<P>,
}

impl Probing for Linear {
    #[inline]
    fn covers(capacity: usize) -> bool {
        capacity > 0
    }

    #[inline]
    fn advance(index: usize, _step: usize, capacity: usize) -> usize {
        (index + 1) % capacity
    }
}

impl Probing for Quadratic {
    #[inline]
    fn covers(capacity: usize) -> bool {
        capacity.is_power_of_two()
    }

    /// T(i) - T(i - 1) = i, so the next triangular offset is one step further.
    #[inline]
    fn advance(index: usize, step: usize, capacity: usize) -> usize {
        (index + step % capacity) % capacity
    }
}

impl<P: Probing> Probe<P> {
    #[inline]
    pub fn new(start: usize, capacity: usize) -> Self {
        debug_assert!(start < capacity || capacity == 0);

        Self {
            start,
            index: start,
            step: 0,
            capacity,
            _probing: PhantomData,
        }
    }

    /// Goes back to the home slot, as if nothing had been produced.
    #[inline]
    pub fn restart(&mut self) {
        self.index = self.start;
        self.step = 0;
    }

    /// How many indices were produced so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.step
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.step >= self.capacity
    }
}

impl<P: Probing> Iterator for Probe<P> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            return None;
        }

        let current = self.index;
        self.step += 1;
        self.index = P::advance(self.index, self.step, self.capacity);

        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.capacity.saturating_sub(self.step);
        (remaining, Some(remaining))
    }
}

impl<P: Probing> ExactSizeIterator for Probe<P> {}

impl<P: Probing> FusedIterator for Probe<P> {}
