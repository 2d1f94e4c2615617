use alloc::{
    collections::{btree_map::Entry as MapEntry, BTreeMap},
    string::String,
};
use tracing::debug;

use crate::{alias::AliasTable, errors::RegistryErrorKind, producer::BoxedProducer, utils::thread_safety::RcAnyThreadSafety};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Built once on first retrieval and cached for the lifetime of the entry.
    Singleton,
    /// Built on every retrieval.
    Factory,
    /// Object supplied at registration, returned as is.
    Instance,
}

pub(crate) enum Entry {
    Singleton {
        producer: BoxedProducer,
        cached: Option<RcAnyThreadSafety>,
    },
    Factory {
        producer: BoxedProducer,
    },
    Instance(RcAnyThreadSafety),
}

impl Entry {
    #[inline]
    #[must_use]
    pub(crate) fn kind(&self) -> EntryKind {
        match self {
            Entry::Singleton { .. } => EntryKind::Singleton,
            Entry::Factory { .. } => EntryKind::Factory,
            Entry::Instance(_) => EntryKind::Instance,
        }
    }
}

/// What retrieval has to do with an entry once the registry lock is released.
pub(crate) enum Lookup {
    Ready(RcAnyThreadSafety),
    Produce { producer: BoxedProducer, cache: bool },
}

/// Service entries and the alias table of one container.
#[derive(Default)]
pub(crate) struct Storage {
    entries: BTreeMap<String, Entry>,
    aliases: AliasTable,
}

impl Storage {
    pub(crate) fn insert(&mut self, key: String, entry: Entry) -> Result<(), RegistryErrorKind> {
        match self.entries.entry(key) {
            MapEntry::Occupied(occupied) => Err(RegistryErrorKind::KeyExists {
                key: occupied.key().clone(),
            }),
            MapEntry::Vacant(vacant) => {
                debug!(key = vacant.key().as_str(), kind = ?entry.kind(), "Registered");
                vacant.insert(entry);
                Ok(())
            }
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn canonical<'a>(&'a self, key: &'a str) -> &'a str {
        self.aliases.canonical(key)
    }

    #[inline]
    #[must_use]
    pub(crate) fn has(&self, key: &str) -> bool {
        self.entries.contains_key(self.canonical(key))
    }

    #[inline]
    #[must_use]
    pub(crate) fn kind(&self, key: &str) -> Option<EntryKind> {
        self.entries.get(self.canonical(key)).map(Entry::kind)
    }

    #[must_use]
    pub(crate) fn lookup(&self, canonical: &str) -> Option<Lookup> {
        if let Some(cached) = self.cached(canonical) {
            debug!("Found in cache");
            return Some(Lookup::Ready(cached));
        }

        let lookup = match self.entries.get(canonical)? {
            Entry::Singleton { producer, .. } => Lookup::Produce {
                producer: producer.clone(),
                cache: true,
            },
            Entry::Factory { producer } => Lookup::Produce {
                producer: producer.clone(),
                cache: false,
            },
            Entry::Instance(instance) => Lookup::Ready(instance.clone()),
        };
        Some(lookup)
    }

    #[inline]
    #[must_use]
    pub(crate) fn cached(&self, canonical: &str) -> Option<RcAnyThreadSafety> {
        match self.entries.get(canonical) {
            Some(Entry::Singleton { cached, .. }) => cached.clone(),
            _ => None,
        }
    }

    /// Caches a produced singleton unless another producer call got there first.
    /// Returns the object that ends up cached, or the passed one if the entry is gone or no longer a singleton.
    pub(crate) fn store(&mut self, canonical: &str, value: RcAnyThreadSafety) -> RcAnyThreadSafety {
        match self.entries.get_mut(canonical) {
            Some(Entry::Singleton { cached: Some(cached), .. }) => {
                debug!("Already cached, dropping produced object");
                cached.clone()
            }
            Some(Entry::Singleton { cached, .. }) => {
                *cached = Some(value.clone());
                debug!("Cached");
                value
            }
            _ => value,
        }
    }

    #[inline]
    pub(crate) fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            debug!(key, "Removed");
        }
        removed
    }

    #[inline]
    pub(crate) fn add_alias(&mut self, key: String, alias: String) {
        debug!(key = key.as_str(), alias = alias.as_str(), "Aliased");
        self.aliases.insert(alias, key);
    }

    #[inline]
    pub(crate) fn remove_alias(&mut self, alias: &str) -> bool {
        self.aliases.remove(alias)
    }
}
