//! Chained-bucket response table.
//!
//! Maps a pattern key to a response value. The bucket count is fixed when the
//! table is created; the table never resizes or rehashes. Each bucket keeps
//! its entries sorted by key so lookups can stop as soon as they walk past
//! the position the key would occupy.

use crate::error::TableError;
use std::cmp::Ordering;

/// Default bucket count for the interactive response table.
pub const DEFAULT_BUCKET_COUNT: usize = 65_536;

/// A single key/value pair owned by its bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    value: String,
}

/// Fixed-size hash table from pattern to response.
///
/// # Examples
///
/// ```
/// use chatbot_rs::core::ResponseTable;
///
/// let mut table = ResponseTable::new(16).unwrap();
/// table.set("hi", "Hello!");
/// assert_eq!(table.get("hi"), Some("Hello!"));
/// assert_eq!(table.get("Hi"), None);
/// ```
#[derive(Debug, Clone)]
pub struct ResponseTable {
    /// Collision chains, one per bucket, each sorted by key.
    buckets: Vec<Vec<Entry>>,
    /// Total number of entries across all buckets.
    len: usize,
}

impl ResponseTable {
    /// Creates an empty table with `bucket_count` buckets.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidBucketCount`] if `bucket_count` is zero.
    pub fn new(bucket_count: usize) -> Result<Self, TableError> {
        if bucket_count < 1 {
            return Err(TableError::InvalidBucketCount {
                count: bucket_count,
            });
        }

        let mut buckets = Vec::new();
        buckets.resize_with(bucket_count, Vec::new);

        Ok(Self { buckets, len: 0 })
    }

    /// Returns the bucket index for `key`.
    ///
    /// Bytes are folded into a `u64` accumulator (shift left by 8, add the
    /// byte) until the key is exhausted or the next step would overflow.
    /// Nothing wraps, so the leading eight bytes decide the bucket: keys
    /// sharing them, such as `programming` and `programmer`, always collide.
    #[must_use]
    pub fn hash(&self, key: &str) -> usize {
        let mut acc: u64 = 0;
        for &byte in key.as_bytes() {
            match acc
                .checked_mul(256)
                .and_then(|shifted| shifted.checked_add(u64::from(byte)))
            {
                Some(next) => acc = next,
                None => break,
            }
        }

        // Modulus is below bucket_count, so the cast back cannot truncate.
        #[allow(clippy::cast_possible_truncation)]
        let index = (acc % self.buckets.len() as u64) as usize;
        index
    }

    /// Binds `value` to `key`, replacing any previous value for that key.
    ///
    /// Both strings are copied into the table.
    pub fn set(&mut self, key: &str, value: &str) {
        let index = self.hash(key);
        let chain = &mut self.buckets[index];

        match search(chain, key) {
            Ok(pos) => {
                value.clone_into(&mut chain[pos].value);
            }
            Err(pos) => {
                chain.insert(
                    pos,
                    Entry {
                        key: key.to_string(),
                        value: value.to_string(),
                    },
                );
                self.len += 1;
            }
        }
    }

    /// Returns the value bound to `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let chain = &self.buckets[self.hash(key)];
        search(chain, key)
            .ok()
            .map(|pos| chain[pos].value.as_str())
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fixed number of buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the keys of one bucket in chain order.
    ///
    /// Returns an empty vector for an out-of-range index.
    #[must_use]
    pub fn bucket_keys(&self, index: usize) -> Vec<&str> {
        self.buckets
            .get(index)
            .map(|chain| chain.iter().map(|e| e.key.as_str()).collect())
            .unwrap_or_default()
    }

    /// Iterates over all `(key, value)` pairs, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.buckets
            .iter()
            .flatten()
            .map(|e| (e.key.as_str(), e.value.as_str()))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> Extend<(K, V)> for ResponseTable {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key.as_ref(), value.as_ref());
        }
    }
}

/// Walks a sorted chain for `key`.
///
/// Returns `Ok(pos)` on an exact match, or `Err(pos)` with the position that
/// keeps the chain sorted. The walk stops at the first key not less than
/// `key`.
fn search(chain: &[Entry], key: &str) -> Result<usize, usize> {
    for (pos, entry) in chain.iter().enumerate() {
        match entry.key.as_str().cmp(key) {
            Ordering::Less => {}
            Ordering::Equal => return Ok(pos),
            Ordering::Greater => return Err(pos),
        }
    }
    Err(chain.len())
}
