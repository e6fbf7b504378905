//! Open addressing.
//!
//! Every entry lives in the slot array itself. A key that collides walks its
//! [`Probe`] until it finds itself or an [`Empty`](Slot::Empty) slot.
//!
//! Deleting can't simply empty the slot: keys inserted later may have probed
//! past it, and an empty slot would cut their sequence short. The slot becomes
//! a [`Tombstone`](Slot::Tombstone) instead, which searches skip over and
//! inserts may reuse.
//!
//! ```text
//!  capacity 4, linear probing, hash(n) = n
//!
//!  insert 2, 3, 6    [ 6 | _ | 2 | 3 ]     6 probes 2 -> 3 -> 0
//!  delete 2          [ 6 | _ | † | 3 ]     † keeps 6 reachable from 2
//!  insert 14         [ 6 | _ |14 | 3 ]     14 probes 2 -> 3 -> 0 -> 1 (empty),
//!                                          then takes the first tombstone
//! ```

use super::probe::{Probe, Probing};
use super::Collision;
use std::borrow::Borrow;
use std::marker::PhantomData;
use std::{iter, mem, vec};

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) enum Slot<K, V> {
    #[default]
    Empty,
    Occupied(K, V),
    Tombstone,
}

pub(crate) type IntoIter<K, V> =
    iter::FilterMap<vec::IntoIter<Slot<K, V>>, fn(Slot<K, V>) -> Option<(K, V)>>;

#[derive(Debug, Clone)]
pub(crate) struct OpenAddressing<K, V, P> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    tombstones: usize,
    _probing: PhantomData<P>,
}

impl<K, V> Slot<K, V> {
    fn into_entry(self) -> Option<(K, V)> {
        match self {
            Slot::Occupied(key, value) => Some((key, value)),
            _ => None,
        }
    }
}

impl<K, V, P> OpenAddressing<K, V, P>
where
    K: Eq,
    P: Probing,
{
    #[inline]
    fn probe(&self, home: usize) -> Probe<P> {
        Probe::new(home, self.slots.len())
    }

    /// Index of the slot holding `key`.
    fn find<Q>(&self, home: usize, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        for index in self.probe(home) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(k, _) if k.borrow() == key => return Some(index),
                _ => {}
            }
        }

        None
    }

    /// Writes a new entry into a free slot, reclaiming it if it's a tombstone.
    fn occupy(&mut self, index: usize, key: K, value: V) {
        let previous = mem::replace(&mut self.slots[index], Slot::Occupied(key, value));
        debug_assert!(!matches!(previous, Slot::Occupied(..)));

        if let Slot::Tombstone = previous {
            self.tombstones -= 1;
        }

        self.len += 1;
    }

    pub fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }
}

impl<K, V, P> Collision<K, V> for OpenAddressing<K, V, P>
where
    K: Eq,
    P: Probing,
{
    type IntoIter = IntoIter<K, V>;

    fn with_capacity(capacity: usize) -> Self {
        debug_assert!(P::covers(capacity) || capacity == 0);

        Self {
            slots: iter::repeat_with(|| Slot::Empty).take(capacity).collect(),
            len: 0,
            tombstones: 0,
            _probing: PhantomData,
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn tombstones(&self) -> usize {
        self.tombstones
    }

    fn insert(&mut self, home: usize, key: K, value: V) -> Option<V> {
        let mut tombstone = None;
        let mut empty = None;

        for index in self.probe(home) {
            match &mut self.slots[index] {
                // the key can't be any further, so it's absent
                Slot::Empty => {
                    empty = Some(index);
                    break;
                }
                Slot::Tombstone => {
                    tombstone.get_or_insert(index);
                }
                Slot::Occupied(k, v) if *k == key => return Some(mem::replace(v, value)),
                Slot::Occupied(..) => {}
            }
        }

        // an exhausted probe without an empty slot still proves the key absent
        match tombstone.or(empty) {
            Some(index) => self.occupy(index, key, value),
            None => unreachable!(
                "probed all {} slots without finding a free one",
                self.slots.len()
            ),
        }

        None
    }

    fn insert_unique(&mut self, home: usize, key: K, value: V) {
        let free = self
            .probe(home)
            .find(|index| !matches!(self.slots[*index], Slot::Occupied(..)));

        match free {
            Some(index) => self.occupy(index, key, value),
            None => unreachable!("no free slot among {}", self.slots.len()),
        }
    }

    fn get<Q>(&self, home: usize, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        match &self.slots[self.find(home, key)?] {
            Slot::Occupied(_, value) => Some(value),
            _ => None,
        }
    }

    fn get_mut<Q>(&mut self, home: usize, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let index = self.find(home, key)?;

        match &mut self.slots[index] {
            Slot::Occupied(_, value) => Some(value),
            _ => None,
        }
    }

    fn remove<Q>(&mut self, home: usize, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let index = self.find(home, key)?;
        let entry = mem::replace(&mut self.slots[index], Slot::Tombstone).into_entry();

        self.len -= 1;
        self.tombstones += 1;

        entry
    }

    fn clear(&mut self) {
        self.slots.fill_with(Default::default);
        self.len = 0;
        self.tombstones = 0;
    }

    fn heap_size(&self) -> usize {
        self.slots.capacity() * mem::size_of::<Slot<K, V>>()
    }

    fn into_entries(self) -> Self::IntoIter {
        self.slots
            .into_iter()
            .filter_map(Slot::into_entry as fn(Slot<K, V>) -> Option<(K, V)>)
    }
}
