use super::chaining::{self, Bucket};
use super::open::{self, Slot};
use std::iter::FusedIterator;
use std::slice;

/// Borrowing iterator over the entries of a [`HashTable`](super::HashTable).
///
/// Entries come out in storage order, which has nothing to do with the order
/// they were inserted in and changes after a resize.
#[derive(Debug, Clone)]
pub struct Iter<'t, K, V> {
    inner: Inner<'t, K, V>,
    remaining: usize,
}

#[derive(Debug, Clone)]
enum Inner<'t, K, V> {
    Slots(slice::Iter<'t, Slot<K, V>>),
    Buckets {
        buckets: slice::Iter<'t, Bucket<K, V>>,
        entries: slice::Iter<'t, (K, V)>,
    },
}

#[derive(Debug, Clone)]
pub struct Keys<'t, K, V>(Iter<'t, K, V>);

#[derive(Debug, Clone)]
pub struct Values<'t, K, V>(Iter<'t, K, V>);

/// Owning iterator, see [`IntoIterator`] for [`HashTable`](super::HashTable).
pub struct IntoIter<K, V> {
    inner: IntoInner<K, V>,
    remaining: usize,
}

enum IntoInner<K, V> {
    Slots(open::IntoIter<K, V>),
    Buckets(chaining::IntoIter<K, V>),
}

impl<'t, K, V> Iter<'t, K, V> {
    pub(super) fn slots(slots: &'t [Slot<K, V>], len: usize) -> Self {
        Self {
            inner: Inner::Slots(slots.iter()),
            remaining: len,
        }
    }

    pub(super) fn buckets(buckets: &'t [Bucket<K, V>], len: usize) -> Self {
        Self {
            inner: Inner::Buckets {
                buckets: buckets.iter(),
                entries: <&[(K, V)]>::default().iter(),
            },
            remaining: len,
        }
    }
}

impl<'t, K, V> Iterator for Iter<'t, K, V> {
    type Item = (&'t K, &'t V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let entry = match &mut self.inner {
            Inner::Slots(slots) => slots.find_map(|slot| match slot {
                Slot::Occupied(key, value) => Some((key, value)),
                _ => None,
            }),
            Inner::Buckets { buckets, entries } => loop {
                if let Some((key, value)) = entries.next() {
                    break Some((key, value));
                }

                match buckets.next() {
                    Some(bucket) => *entries = bucket.iter(),
                    None => break None,
                }
            },
        };

        if entry.is_some() {
            self.remaining -= 1;
        }

        entry
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'t, K, V> Keys<'t, K, V> {
    pub(super) fn new(iter: Iter<'t, K, V>) -> Self {
        Self(iter)
    }
}

impl<'t, K, V> Values<'t, K, V> {
    pub(super) fn new(iter: Iter<'t, K, V>) -> Self {
        Self(iter)
    }
}

impl<'t, K, V> Iterator for Keys<'t, K, V> {
    type Item = &'t K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'t, K, V> Iterator for Values<'t, K, V> {
    type Item = &'t V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> IntoIter<K, V> {
    pub(super) fn slots(slots: open::IntoIter<K, V>, len: usize) -> Self {
        Self {
            inner: IntoInner::Slots(slots),
            remaining: len,
        }
    }

    pub(super) fn buckets(buckets: chaining::IntoIter<K, V>, len: usize) -> Self {
        Self {
            inner: IntoInner::Buckets(buckets),
            remaining: len,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match &mut self.inner {
            IntoInner::Slots(slots) => slots.next(),
            IntoInner::Buckets(buckets) => buckets.next(),
        };

        if entry.is_some() {
            self.remaining -= 1;
        }

        entry
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
