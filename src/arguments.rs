use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::any::type_name;

use crate::{
    errors::InstantiateErrorKind,
    utils::thread_safety::{value, RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety},
};

/// Caller-supplied values for scalar parameters, looked up by parameter name.
///
/// They are forwarded down the whole resolution graph,
/// so a scalar parameter of a nested dependency can be supplied from the top-level call.
#[derive(Clone, Default)]
pub struct NamedArgs {
    map: BTreeMap<String, RcAnyThreadSafety>,
}

impl NamedArgs {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { map: BTreeMap::new() }
    }

    #[inline]
    pub fn insert<T: SendSafety + SyncSafety + 'static>(&mut self, name: impl Into<String>, val: T) -> Option<RcAnyThreadSafety> {
        self.insert_value(name, value(val))
    }

    #[inline]
    pub fn insert_value(&mut self, name: impl Into<String>, value: RcAnyThreadSafety) -> Option<RcAnyThreadSafety> {
        self.map.insert(name.into(), value)
    }

    #[inline]
    #[must_use]
    pub fn with<T: SendSafety + SyncSafety + 'static>(mut self, name: impl Into<String>, val: T) -> Self {
        self.insert(name, val);
        self
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RcAnyThreadSafety> {
        self.map.get(name)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Ordered argument list collected by one resolution call for a constructor or method.
///
/// Every call builds its own list, so a producer that resolves something else mid-way
/// never sees or touches the arguments of the call that triggered it.
#[derive(Clone, Default)]
pub struct Arguments {
    values: Vec<(&'static str, RcAnyThreadSafety)>,
}

impl Arguments {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, name: &'static str, value: RcAnyThreadSafety) {
        self.values.push((name, value));
    }

    #[inline]
    #[must_use]
    pub fn with<T: SendSafety + SyncSafety + 'static>(mut self, name: &'static str, val: T) -> Self {
        self.push(name, value(val));
        self
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &RcAnyThreadSafety)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&RcAnyThreadSafety> {
        self.values.iter().find(|(arg_name, _)| *arg_name == name).map(|(_, value)| value)
    }

    /// Shared object passed for the parameter.
    ///
    /// # Errors
    /// - [`InstantiateErrorKind::MissingArgument`] if nothing was passed for `name`
    /// - [`InstantiateErrorKind::IncorrectArgument`] if the object isn't a `T`
    pub fn get<T: SendSafety + SyncSafety + 'static>(&self, name: &'static str) -> Result<RcThreadSafety<T>, InstantiateErrorKind> {
        self.value(name)
            .ok_or(InstantiateErrorKind::MissingArgument { name })?
            .clone()
            .downcast::<T>()
            .map_err(|_| InstantiateErrorKind::IncorrectArgument {
                name,
                expected: type_name::<T>(),
            })
    }

    /// Owned copy of the object passed for the parameter, handy for scalars.
    ///
    /// # Errors
    /// Same as [`Self::get`].
    pub fn cloned<T: Clone + 'static>(&self, name: &'static str) -> Result<T, InstantiateErrorKind> {
        self.value(name)
            .ok_or(InstantiateErrorKind::MissingArgument { name })?
            .downcast_ref::<T>()
            .cloned()
            .ok_or(InstantiateErrorKind::IncorrectArgument {
                name,
                expected: type_name::<T>(),
            })
    }

    /// Trait object passed for an interface-typed parameter.
    ///
    /// # Errors
    /// Same as [`Self::get`].
    pub fn interface<I: ?Sized + 'static>(&self, name: &'static str) -> Result<RcThreadSafety<I>, InstantiateErrorKind> {
        self.value(name)
            .ok_or(InstantiateErrorKind::MissingArgument { name })?
            .downcast_ref::<RcThreadSafety<I>>()
            .cloned()
            .ok_or(InstantiateErrorKind::IncorrectArgument {
                name,
                expected: type_name::<RcThreadSafety<I>>(),
            })
    }
}
