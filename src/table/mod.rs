//! The hash table.
//!
//! [`HashTable`] owns the storage and the sizing policy, and hands collisions
//! over to one of three strategies picked at construction time:
//!
//! - [`Strategy::Linear`] and [`Strategy::Quadratic`] store entries in a slot
//!   array and walk a [`Probe`](probe::Probe) sequence on collision (see [`open`]).
//! - [`Strategy::Chaining`] keeps a list of entries per bucket (see [`chaining`]).
//!
//! Every operation starts at the key's home slot, `hash(key) % capacity`. Once
//! a mutation pushes the load factor above its maximum, the table grows by
//! its growth factor, moves every live entry over and forgets its tombstones.
//!
//! ```text
//!  capacity 8, maximum load factor 0.75
//!
//!  6 entries   load 6/8 = 0.75    stays at 8 slots
//!  7 entries   load 7/8 = 0.875   grows to 16 slots, load 7/16
//! ```

mod chaining;
mod iter;
mod open;
pub mod probe;

pub use iter::{IntoIter, Iter, Keys, Values};
use probe::{Linear, Quadratic};

use crate::config::{Config, Strategy};
use crate::error::TableError;
use crate::hash;
use crate::{debug, warn};
use chaining::Chaining;
use open::OpenAddressing;
use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};
use std::ops::Index;

/// The part every collision strategy implements. The table computes the home
/// slot, the strategy finds where the key actually is.
pub(crate) trait Collision<K, V> {
    type IntoIter: Iterator<Item = (K, V)>;

    fn with_capacity(capacity: usize) -> Self;

    fn capacity(&self) -> usize;

    /// Live entries.
    fn len(&self) -> usize;

    fn tombstones(&self) -> usize {
        0
    }

    /// Returns the previous value if `key` was already present.
    fn insert(&mut self, home: usize, key: K, value: V) -> Option<V>;

    /// Insert `key` knowing it isn't in the table. Only used while resizing.
    fn insert_unique(&mut self, home: usize, key: K, value: V);

    fn get<Q>(&self, home: usize, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized;

    fn get_mut<Q>(&mut self, home: usize, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized;

    fn remove<Q>(&mut self, home: usize, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized;

    fn clear(&mut self);

    /// Bytes of heap memory held by the storage itself.
    fn heap_size(&self) -> usize;

    fn into_entries(self) -> Self::IntoIter;
}

#[derive(Debug, Clone)]
enum Store<K, V> {
    Linear(OpenAddressing<K, V, Linear>),
    Quadratic(OpenAddressing<K, V, Quadratic>),
    Chaining(Chaining<K, V>),
}

/// Runs the same expression against whichever strategy is in the store.
macro_rules! dispatch {
    ($store:expr, $inner:ident => $body:expr) => {
        match $store {
            Store::Linear($inner) => $body,
            Store::Quadratic($inner) => $body,
            Store::Chaining($inner) => $body,
        }
    };
}

/// A hash table with a configurable collision strategy.
///
/// ```
/// use hashtables::{HashTable, TableError};
///
/// let mut table = HashTable::quadratic(8, 0.5)?;
///
/// table.insert("shadow", 1);
/// table.insert("umbra", 2);
/// assert_eq!(table.insert("shadow", 3), Some(1));
///
/// assert_eq!(table.lookup("shadow"), Ok(&3));
/// assert_eq!(table.delete("umbra"), Ok(2));
/// assert_eq!(table.delete("umbra"), Err(TableError::NotFound));
/// assert_eq!(table.len(), 1);
/// # Ok::<(), TableError>(())
/// ```
#[derive(Clone)]
pub struct HashTable<K, V, S = hash::BuildHasher> {
    store: Store<K, V>,
    config: Config,
    hasher: S,
}

#[inline]
fn home<Q, S>(hasher: &S, key: &Q, capacity: usize) -> usize
where
    Q: Hash + ?Sized,
    S: BuildHasher,
{
    (hasher.hash_one(key) % capacity as u64) as usize
}

impl<K: Eq, V> Store<K, V> {
    fn with_capacity(strategy: Strategy, capacity: usize) -> Self {
        match strategy {
            Strategy::Linear => Store::Linear(OpenAddressing::with_capacity(capacity)),
            Strategy::Quadratic => Store::Quadratic(OpenAddressing::with_capacity(capacity)),
            Strategy::Chaining => Store::Chaining(Chaining::with_capacity(capacity)),
        }
    }

    fn iter(&self) -> Iter<'_, K, V> {
        match self {
            Store::Linear(store) => Iter::slots(store.slots(), store.len()),
            Store::Quadratic(store) => Iter::slots(store.slots(), store.len()),
            Store::Chaining(store) => Iter::buckets(store.buckets(), store.len()),
        }
    }

    fn into_iter(self) -> IntoIter<K, V> {
        match self {
            Store::Linear(store) => {
                let len = store.len();
                IntoIter::slots(store.into_entries(), len)
            }
            Store::Quadratic(store) => {
                let len = store.len();
                IntoIter::slots(store.into_entries(), len)
            }
            Store::Chaining(store) => {
                let len = store.len();
                IntoIter::buckets(store.into_entries(), len)
            }
        }
    }
}

impl<K, V> HashTable<K, V, hash::BuildHasher>
where
    K: Eq + Hash,
{
    /// Builds a table hashing with the default [`hash::BuildHasher`].
    pub fn new(config: Config) -> crate::Result<Self> {
        Self::with_hasher(config, hash::BuildHasher)
    }

    pub fn linear(initial_capacity: usize, maximum_load_factor: f64) -> crate::Result<Self> {
        Self::new(
            Config::linear()
                .initial_capacity(initial_capacity)
                .maximum_load_factor(maximum_load_factor),
        )
    }

    /// `initial_capacity` must be a power of two.
    pub fn quadratic(initial_capacity: usize, maximum_load_factor: f64) -> crate::Result<Self> {
        Self::new(
            Config::quadratic()
                .initial_capacity(initial_capacity)
                .maximum_load_factor(maximum_load_factor),
        )
    }

    pub fn chaining(initial_capacity: usize, maximum_load_factor: f64) -> crate::Result<Self> {
        Self::new(
            Config::chaining()
                .initial_capacity(initial_capacity)
                .maximum_load_factor(maximum_load_factor),
        )
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Builds an empty table, or explains why `config` can't work.
    pub fn with_hasher(config: Config, hasher: S) -> crate::Result<Self> {
        if let Err(err) = config.validate() {
            warn!("rejected table configuration {config:?}: {err}");
            return Err(err.into());
        }

        debug!(
            "new {} table with {} slots, maximum load factor {}",
            config.strategy, config.initial_capacity, config.maximum_load_factor
        );

        Ok(Self {
            store: Store::with_capacity(config.strategy, config.initial_capacity),
            config,
            hasher,
        })
    }

    #[inline]
    fn home<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        home(&self.hasher, key, self.capacity())
    }

    /// Inserts `key`, replacing and returning its value if it was present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let home = self.home(&key);
        let previous = dispatch!(&mut self.store, store => store.insert(home, key, value));

        self.grow_if_needed();

        previous
    }

    /// The value of `key`, or [`TableError::NotFound`].
    pub fn lookup<Q>(&self, key: &Q) -> crate::Result<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.get(key).ok_or(TableError::NotFound)
    }

    /// Removes `key` and returns its value, or [`TableError::NotFound`].
    pub fn delete<Q>(&mut self, key: &Q) -> crate::Result<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.remove(key).ok_or(TableError::NotFound)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let home = self.home(key);
        dispatch!(&self.store, store => store.get(home, key))
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let home = self.home(key);
        dispatch!(&mut self.store, store => store.get_mut(home, key))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.get(key).is_some()
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let home = self.home(key);
        let entry = dispatch!(&mut self.store, store => store.remove(home, key));

        self.grow_if_needed();

        entry
    }

    /// Grows until the live entries fit under the maximum load factor.
    ///
    /// Tombstones count towards the load factor that triggers the resize, but
    /// not towards the new capacity since the resize drops them.
    fn grow_if_needed(&mut self) {
        let maximum = self.config.maximum_load_factor;
        if self.load_factor() <= maximum {
            return;
        }

        let len = self.len() as f64;
        let mut capacity = self.capacity();

        loop {
            capacity = match capacity.checked_mul(self.config.growth_factor) {
                Some(capacity) => capacity,
                None => panic!("hash table capacity overflow"),
            };

            if len / capacity as f64 <= maximum {
                break;
            }
        }

        self.resize(capacity);
    }

    /// Rebuilds the store with `capacity` slots.
    ///
    /// Either every entry moves to the new store or the table is left as it
    /// was. Hashing is the only step that runs caller code (`Hash` and the
    /// hasher), so every new home is computed while the old store is only
    /// borrowed. Past that point nothing can panic short of an allocation
    /// failure, which aborts.
    fn resize(&mut self, capacity: usize) {
        let homes: Vec<usize> = self
            .store
            .iter()
            .map(|(key, _)| home(&self.hasher, key, capacity))
            .collect();

        let previous = self.capacity();
        let tombstones = self.tombstones();

        let mut fresh = Store::with_capacity(self.config.strategy, capacity);
        // a zero sized store doesn't allocate
        let old = std::mem::replace(
            &mut self.store,
            Store::with_capacity(self.config.strategy, 0),
        );

        // `iter` and `into_iter` walk the store in the same order
        for ((key, value), home) in old.into_iter().zip(homes) {
            dispatch!(&mut fresh, store => store.insert_unique(home, key, value));
        }

        self.store = fresh;

        debug!(
            "resized {} table from {previous} to {capacity} slots, moved {} entries and dropped {tombstones} tombstones",
            self.config.strategy,
            self.len()
        );
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq,
{
    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        dispatch!(&self.store, store => store.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots, or buckets when chaining.
    #[inline]
    pub fn capacity(&self) -> usize {
        dispatch!(&self.store, store => store.capacity())
    }

    /// Deleted slots waiting to be reused. Always `0` when chaining.
    #[inline]
    pub fn tombstones(&self) -> usize {
        dispatch!(&self.store, store => store.tombstones())
    }

    /// `(len + tombstones) / capacity`.
    pub fn load_factor(&self) -> f64 {
        (self.len() + self.tombstones()) as f64 / self.capacity() as f64
    }

    #[inline]
    pub fn maximum_load_factor(&self) -> f64 {
        self.config.maximum_load_factor
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.config.strategy
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Bytes owned by the table: the table itself plus its slots or buckets.
    ///
    /// Heap memory owned by the keys and values (the contents of a `String`,
    /// for instance) isn't followed.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + dispatch!(&self.store, store => store.heap_size())
    }

    /// Removes every entry and tombstone. The capacity stays as it is.
    pub fn clear(&mut self) {
        dispatch!(&mut self.store, store => store.clear())
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.store.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }
}

impl<K, V, S> Debug for HashTable<K, V, S>
where
    K: Eq + Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, Q, V, S> Index<&Q> for HashTable<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// Panics if `key` isn't in the table.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found in hash table"),
        }
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        iter.into_iter().for_each(|(key, value)| {
            self.insert(key, value);
        });
    }
}

impl<'t, K: Eq, V, S> IntoIterator for &'t HashTable<K, V, S> {
    type Item = (&'t K, &'t V);
    type IntoIter = Iter<'t, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Eq, V, S> IntoIterator for HashTable<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.into_iter()
    }
}
