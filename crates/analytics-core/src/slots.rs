//! Keyed slot storage for named algorithm inputs and results
//!
//! Results expose their buffers through a small enumerated key rather than a
//! fixed set of fields, so optional outputs can simply be absent.

use std::fmt;

/// Enumerated key identifying one slot
pub trait SlotKey: Copy + fmt::Debug {
    /// Number of distinct keys
    const COUNT: usize;

    /// Dense index in `0..COUNT`
    fn index(self) -> usize;

    /// Symbolic name for diagnostics
    fn name(self) -> &'static str;
}

/// Fixed set of optional slots keyed by `K`
#[derive(Clone, PartialEq)]
pub struct SlotMap<K: SlotKey, V> {
    slots: Vec<Option<V>>,
    _key: std::marker::PhantomData<K>,
}

impl<K: SlotKey, V> SlotMap<K, V> {
    pub fn new() -> Self {
        Self {
            slots: (0..K::COUNT).map(|_| None).collect(),
            _key: std::marker::PhantomData,
        }
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.slots[key.index()].as_ref()
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.slots[key.index()].as_mut()
    }

    /// Store a value, returning the previous one
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.slots[key.index()].replace(value)
    }

    pub fn take(&mut self, key: K) -> Option<V> {
        self.slots[key.index()].take()
    }

    pub fn contains(&self, key: K) -> bool {
        self.slots[key.index()].is_some()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }
}

impl<K: SlotKey, V> Default for SlotMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: SlotKey, V: fmt::Debug> fmt::Debug for SlotMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(value) = slot {
                map.entry(&i, value);
            }
        }
        map.finish()
    }
}
