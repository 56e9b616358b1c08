use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::models::StudentRecord;

const INITIAL_BUCKETS: usize = 16;
const MAX_LOAD_FACTOR: f64 = 0.75;

/// Chained hash table keyed by student id, O(1) average point lookup.
///
/// Starts at 16 buckets; whenever an insert would push the load factor
/// (entries / buckets) to 0.75 or beyond, the bucket count doubles and every
/// entry is rehashed before the insert completes. Callers may rely on correct
/// bucket placement only, never on specific hash values.
pub struct HashIndex {
    buckets: Vec<Vec<(String, StudentRecord)>>,
    len: usize,
}

impl HashIndex {
    pub fn new() -> HashIndex {
        HashIndex {
            buckets: vec![Vec::new(); INITIAL_BUCKETS],
            len: 0,
        }
    }

    fn bucket_for(&self, key: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.buckets.len() as u64) as usize
    }

    /// Upserts: replaces the value in an existing chain entry, otherwise
    /// appends a new one. Growth triggers only when the append would push
    /// the load factor to the threshold; replacements never resize.
    pub fn put(&mut self, key: &str, record: StudentRecord) {
        let index = self.bucket_for(key);
        for entry in self.buckets[index].iter_mut() {
            if entry.0 == key {
                entry.1 = record;
                return;
            }
        }
        if (self.len + 1) as f64 / self.buckets.len() as f64 >= MAX_LOAD_FACTOR {
            self.grow();
        }
        // bucket count may have changed, rehash the key
        let index = self.bucket_for(key);
        self.buckets[index].push((key.to_string(), record));
        self.len += 1;
    }

    pub fn get(&self, key: &str) -> Option<&StudentRecord> {
        let index = self.bucket_for(key);
        self.buckets[index]
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, record)| record)
    }

    pub fn remove(&mut self, key: &str) -> Option<StudentRecord> {
        let index = self.bucket_for(key);
        let bucket = &mut self.buckets[index];
        let position = bucket.iter().position(|(k, _)| k == key)?;
        self.len -= 1;
        Some(bucket.swap_remove(position).1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All records in arbitrary (bucket) order.
    pub fn records(&self) -> Vec<StudentRecord> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(_, record)| record.clone()))
            .collect()
    }

    fn grow(&mut self) {
        let doubled = self.buckets.len() * 2;
        let old = std::mem::replace(&mut self.buckets, vec![Vec::new(); doubled]);
        self.len = 0;
        for (key, record) in old.into_iter().flatten() {
            // len was reset, so this re-counts every entry without growing again
            let index = self.bucket_for(&key);
            self.buckets[index].push((key, record));
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

impl Default for HashIndex {
    fn default() -> Self {
        HashIndex::new()
    }
}
