use std::hash::Hash;

use foldhash::{HashMap, HashMapExt};

/// Hands out one id per distinct key and remembers a display label for each id.
///
/// Ids start at 1 so that 0 remains available as the null handle.
#[derive(Debug)]
pub(crate) struct Interner<K> {
    ids: HashMap<K, u64>,

    // Index `i` holds the label of id `i + 1`.
    labels: Vec<String>,
}

impl<K> Interner<K>
where
    K: Hash + Eq,
{
    pub(crate) fn new() -> Self {
        Self {
            ids: HashMap::new(),
            labels: Vec::new(),
        }
    }

    /// Returns the id of `key`, assigning the next id if the key is new.
    ///
    /// `label` is only called for new keys.
    pub(crate) fn intern<L>(&mut self, key: K, label: L) -> u64
    where
        L: FnOnce() -> String,
    {
        if let Some(id) = self.ids.get(&key) {
            return *id;
        }

        self.labels.push(label());

        let id = u64::try_from(self.labels.len()).expect("usize always fits in u64");
        self.ids.insert(key, id);

        id
    }

    /// Returns the label of an id handed out by this interner.
    pub(crate) fn label(&self, id: u64) -> Option<&str> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;

        self.labels.get(index).map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn same_key_same_id() {
        let mut interner = Interner::new();

        let first = interner.intern("alpha", || "alpha".to_string());
        let second = interner.intern("alpha", || panic!("label is only built for new keys"));

        assert_eq!(first, 1);
        assert_eq!(second, first);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn distinct_keys_distinct_ids() {
        let mut interner = Interner::new();

        let alpha = interner.intern("alpha", || "alpha".to_string());
        let beta = interner.intern("beta", || "beta".to_string());

        assert_ne!(alpha, beta);
        assert_eq!(interner.label(alpha), Some("alpha"));
        assert_eq!(interner.label(beta), Some("beta"));
    }

    #[test]
    fn unknown_ids_have_no_label() {
        let mut interner = Interner::new();
        interner.intern(1_u8, || "one".to_string());

        assert_eq!(interner.label(0), None);
        assert_eq!(interner.label(2), None);
        assert_eq!(interner.label(u64::MAX), None);
    }
}
