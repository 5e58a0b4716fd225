//! Registry: an unordered container of tracked values, searchable by equality.
//!
//! A plain owned value with no internal locking. Callers share it by handle; wrap it in a
//! `Mutex` before handing it to several threads.

use std::rc::Rc;

/// Tracked values keyed by the position they were added at. Keys survive removals.
#[derive(Clone, Debug)]
pub struct Registry<T> {
    items: Vec<(usize, T)>,
    next_key: usize,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_key: 0,
        }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every tracked value and restart keys at zero.
    pub fn reset(&mut self) {
        self.items.clear();
        self.next_key = 0;
    }

    /// Track `value`, returning its key.
    pub fn add(&mut self, value: T) -> usize {
        let key = self.next_key;
        self.next_key += 1;
        self.items.push((key, value));
        key
    }

    pub fn get(&self) -> impl Iterator<Item = (usize, &T)> {
        self.items.iter().map(|(k, v)| (*k, v))
    }

    pub fn by_key(&self, key: usize) -> Option<&T> {
        self.items.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keys of every value matching `pred`.
    pub fn search_by(&self, mut pred: impl FnMut(&T) -> bool) -> Vec<usize> {
        self.items
            .iter()
            .filter(|(_, v)| pred(v))
            .map(|(k, _)| *k)
            .collect()
    }
}

impl<T: PartialEq> Registry<T> {
    /// Remove every value equal to `value`.
    pub fn remove(&mut self, value: &T) {
        self.items.retain(|(_, v)| v != value);
    }

    /// Keys of every value equal to `value`.
    pub fn search(&self, value: &T) -> Vec<usize> {
        self.search_by(|v| v == value)
    }
}

impl<U: ?Sized> Registry<Rc<U>> {
    /// Keys of entries that are the very same allocation as `value`.
    pub fn search_identical(&self, value: &Rc<U>) -> Vec<usize> {
        self.search_by(|v| Rc::ptr_eq(v, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_search_remove() {
        let mut registry = Registry::new();
        assert_eq!(registry.add("a"), 0);
        assert_eq!(registry.add("b"), 1);
        assert_eq!(registry.add("a"), 2);
        assert_eq!(registry.search(&"a"), vec![0, 2]);

        registry.remove(&"a");
        assert_eq!(registry.len(), 1);
        assert!(registry.search(&"a").is_empty());
        assert_eq!(registry.search(&"b"), vec![1]);
        assert_eq!(registry.by_key(1), Some(&"b"));
    }

    #[test]
    fn keys_survive_removal_and_reset_restarts_them() {
        let mut registry = Registry::new();
        registry.add(10);
        registry.add(20);
        registry.remove(&10);
        assert_eq!(registry.add(30), 2);
        assert_eq!(registry.get().collect::<Vec<_>>(), vec![(1, &20), (2, &30)]);

        registry.reset();
        assert!(registry.is_empty());
        assert_eq!(registry.add(40), 0);
    }

    #[test]
    fn identical_search_distinguishes_equal_allocations() {
        let mut registry = Registry::new();
        let first = Rc::new(String::from("session"));
        let twin = Rc::new(String::from("session"));
        registry.add(Rc::clone(&first));
        registry.add(Rc::clone(&twin));

        assert_eq!(registry.search(&first), vec![0, 1]);
        assert_eq!(registry.search_identical(&first), vec![0]);
        assert_eq!(registry.search_identical(&twin), vec![1]);
    }
}
