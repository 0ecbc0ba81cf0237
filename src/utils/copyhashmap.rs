use {
    ahash::AHashMap,
    std::{
        cell::{RefCell, RefMut},
        collections::TryReserveError,
        hash::Hash,
    },
};

pub struct CopyHashMap<K, V> {
    map: RefCell<AHashMap<K, V>>,
}

impl<K, V> Default for CopyHashMap<K, V> {
    fn default() -> Self {
        Self {
            map: Default::default(),
        }
    }
}

impl<K: Eq + Hash, V: Clone> CopyHashMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, k: K, v: V) -> Option<V> {
        self.map.borrow_mut().insert(k, v)
    }

    pub fn get(&self, k: &K) -> Option<V> {
        self.map.borrow_mut().get(k).cloned()
    }

    pub fn remove(&self, k: &K) -> Option<V> {
        self.map.borrow_mut().remove(k)
    }

    pub fn contains(&self, k: &K) -> bool {
        self.map.borrow_mut().contains_key(k)
    }

    pub fn len(&self) -> usize {
        self.map.borrow_mut().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.borrow_mut().is_empty()
    }

    /// Makes sure that the next `set` of a new key does not allocate.
    pub fn reserve_one(&self) -> Result<(), TryReserveError> {
        self.map.borrow_mut().try_reserve(1)
    }

    pub fn lock(&self) -> RefMut<'_, AHashMap<K, V>> {
        self.map.borrow_mut()
    }

    pub fn clear(&self) {
        let _map = std::mem::take(&mut *self.map.borrow_mut());
    }
}
