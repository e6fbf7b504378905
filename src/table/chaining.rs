//! Separate chaining.
//!
//! Each bucket owns the list of every entry hashed to it. There are no
//! tombstones: removing an entry takes it out of its bucket, and a bucket left
//! without entries gives its storage back.

use super::Collision;
use std::borrow::Borrow;
use std::{iter, mem, vec};

/// Order inside a bucket carries no meaning.
pub(crate) type Bucket<K, V> = Vec<(K, V)>;

pub(crate) type IntoIter<K, V> = iter::Flatten<vec::IntoIter<Bucket<K, V>>>;

#[derive(Debug, Clone)]
pub(crate) struct Chaining<K, V> {
    buckets: Vec<Bucket<K, V>>,
    len: usize,
}

impl<K, V> Chaining<K, V> {
    pub fn buckets(&self) -> &[Bucket<K, V>] {
        &self.buckets
    }
}

impl<K: Eq, V> Collision<K, V> for Chaining<K, V> {
    type IntoIter = IntoIter<K, V>;

    fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: iter::repeat_with(Vec::new).take(capacity).collect(),
            len: 0,
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn insert(&mut self, home: usize, key: K, value: V) -> Option<V> {
        let bucket = &mut self.buckets[home];

        if let Some((_, current)) = bucket.iter_mut().find(|(k, _)| *k == key) {
            return Some(mem::replace(current, value));
        }

        bucket.push((key, value));
        self.len += 1;

        None
    }

    fn insert_unique(&mut self, home: usize, key: K, value: V) {
        self.buckets[home].push((key, value));
        self.len += 1;
    }

    fn get<Q>(&self, home: usize, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.buckets[home]
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, value)| value)
    }

    fn get_mut<Q>(&mut self, home: usize, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.buckets[home]
            .iter_mut()
            .find(|(k, _)| (*k).borrow() == key)
            .map(|(_, value)| value)
    }

    fn remove<Q>(&mut self, home: usize, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let bucket = &mut self.buckets[home];
        let position = bucket.iter().position(|(k, _)| k.borrow() == key)?;
        let entry = bucket.swap_remove(position);

        if bucket.is_empty() {
            *bucket = Vec::new();
        }

        self.len -= 1;

        Some(entry)
    }

    fn clear(&mut self) {
        self.buckets.fill_with(Vec::new);
        self.len = 0;
    }

    fn heap_size(&self) -> usize {
        let entries: usize = self.buckets.iter().map(Vec::capacity).sum();

        self.buckets.capacity() * mem::size_of::<Bucket<K, V>>()
            + entries * mem::size_of::<(K, V)>()
    }

    fn into_entries(self) -> Self::IntoIter {
        self.buckets.into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collisions_share_a_bucket() {
        let mut chain = Chaining::with_capacity(4);

        assert_eq!(chain.insert(2, 2, 100), None);
        assert_eq!(chain.insert(3, 3, 101), None);
        assert_eq!(chain.insert(2, 6, 200), None);
        assert_eq!(chain.insert(2, 2, 90), Some(100));

        assert_eq!(
            chain.buckets(),
            [vec![], vec![], vec![(2, 90), (6, 200)], vec![(3, 101)]]
        );
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.get(2, &6), Some(&200));
        assert_eq!(chain.get(2, &10), None);
    }

    #[test]
    fn test_emptied_bucket_releases_storage() {
        let mut chain = Chaining::with_capacity(2);

        chain.insert(0, "a", 1);
        chain.insert(0, "b", 2);
        chain.insert(1, "c", 3);

        assert_eq!(chain.remove(0, "a"), Some(("a", 1)));
        assert_eq!(chain.remove(0, "a"), None);
        assert_eq!(chain.buckets()[0], [("b", 2)]);

        assert_eq!(chain.remove(0, "b"), Some(("b", 2)));
        assert_eq!(chain.buckets()[0].capacity(), 0);
        assert_eq!(chain.len(), 1);
        assert_eq!(
            chain.heap_size(),
            2 * mem::size_of::<Bucket<&str, i32>>()
                + chain.buckets()[1].capacity() * mem::size_of::<(&str, i32)>()
        );
    }

    #[test]
    fn test_clear_and_entries() {
        let mut chain = Chaining::with_capacity(3);

        chain.insert(1, 'x', 1);
        chain.insert(1, 'y', 2);
        *chain.get_mut(1, &'y').unwrap() *= 21;

        let mut entries: Vec<_> = chain.clone().into_entries().collect();
        entries.sort();
        assert_eq!(entries, [('x', 1), ('y', 42)]);

        chain.clear();
        assert_eq!(chain.len(), 0);
        assert_eq!(chain.capacity(), 3);
        assert!(chain.buckets().iter().all(Vec::is_empty));
    }
}
