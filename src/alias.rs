use alloc::{collections::BTreeMap, string::String};

/// Direct `alias -> canonical key` mappings.
///
/// Lookups make a single hop: an alias pointing at another alias is not followed further.
#[derive(Debug, Default, Clone)]
pub(crate) struct AliasTable {
    map: BTreeMap<String, String>,
}

impl AliasTable {
    #[inline]
    pub(crate) fn insert(&mut self, alias: String, key: String) -> Option<String> {
        self.map.insert(alias, key)
    }

    #[inline]
    pub(crate) fn remove(&mut self, alias: &str) -> bool {
        self.map.remove(alias).is_some()
    }

    #[inline]
    #[must_use]
    pub(crate) fn canonical<'a>(&'a self, key: &'a str) -> &'a str {
        self.map.get(key).map_or(key, String::as_str)
    }
}
