//! Item and result containers
//!
//! `Item` is one stored entry as returned by a retrieval. Multi-key results
//! and statistics are insertion-ordered mappings: iteration order is the
//! server's reply order, and overwriting an existing key keeps its original
//! position.

/// One stored entry returned by a retrieval.
///
/// Immutable once constructed by the reply parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// The key, protocol-token-safe (no spaces or control characters)
    pub key: String,

    /// Opaque 32-bit tag set by whoever stored the item
    pub flags: u32,

    /// The value, binary-safe, exactly the declared byte length
    pub value: Vec<u8>,

    /// CAS token, present only for CAS-aware retrieval (`gets`)
    pub cas_unique: Option<u64>,
}

/// Ordered mapping from key to retrieved Item
pub type ItemMap = OrderedMap<Item>;

/// Ordered mapping from statistic name to value
pub type Stats = OrderedMap<String>;

/// A small insertion-ordered map keyed by `String`.
///
/// Multi-get batches and stats dumps are small, so lookups scan linearly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a value, overwriting in place if the key is already present
    pub fn insert(&mut self, key: String, value: V) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Remove and return the value for a key, if present
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
