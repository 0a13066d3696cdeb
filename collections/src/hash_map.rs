use fxhash::FxBuildHasher;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};

pub const DEFAULT_CAPACITY: usize = 16;
pub const MAX_LOAD_FACTOR: f32 = 0.75;

struct Entry<K, V> {
    key: K,
    value: V,
}

/// Separate-chaining hash map.
///
/// Buckets are chosen by `hash % capacity`. Before a new key is stored the
/// map doubles its bucket count whenever the post-insert load factor would
/// exceed [`MAX_LOAD_FACTOR`], and every entry is re-inserted through
/// [`HashMap::insert`] so placement is recomputed for the new capacity.
/// Capacity never shrinks, not even on [`HashMap::clear`].
pub struct HashMap<K, V, S = FxBuildHasher> {
    buckets: Vec<Vec<Entry<K, V>>>,
    len: usize,
    hash_builder: S,
}

impl<K, V> HashMap<K, V, FxBuildHasher> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A zero capacity falls back to [`DEFAULT_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FxBuildHasher::default())
    }
}

impl<K, V, S> HashMap<K, V, S> {
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let capacity = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };
        Self {
            buckets: empty_buckets(capacity),
            len: 0,
            hash_builder,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f32 {
        self.len as f32 / self.buckets.len() as f32
    }

    /// Drops every entry but keeps the current bucket count.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.len = 0;
    }

    /// Iterates in bucket order, then chain order. No insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().map(|entry| (&entry.key, &entry.value)))
    }

    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().map(|(key, _)| key.clone()).collect()
    }

    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, value)| value.clone()).collect()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        (hash % self.buckets.len() as u64) as usize
    }

    /// Inserts or overwrites. Returns the previous value for `key`, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        if let Some(entry) = self.buckets[index].iter_mut().find(|entry| entry.key == key) {
            return Some(std::mem::replace(&mut entry.value, value));
        }

        if (self.len + 1) as f32 / self.buckets.len() as f32 > MAX_LOAD_FACTOR {
            self.rehash();
        }

        let index = self.bucket_index(&key);
        self.buckets[index].push(Entry { key, value });
        self.len += 1;
        None
    }

    fn rehash(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        let old_buckets = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        self.len = 0;
        for chain in old_buckets {
            for entry in chain {
                self.insert(entry.key, entry.value);
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &entry.value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &mut entry.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Unlinks `key` from its chain and hands back the stored value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let chain = &mut self.buckets[index];
        let position = chain.iter().position(|entry| entry.key.borrow() == key)?;
        let entry = chain.swap_remove(position);
        self.len -= 1;
        Some(entry.value)
    }
}

impl<K, V> Default for HashMap<K, V, FxBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Vec<Entry<K, V>>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Vec::new);
    buckets
}
