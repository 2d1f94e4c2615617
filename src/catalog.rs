use alloc::{collections::BTreeMap, vec::Vec};
use core::any::TypeId;
use tracing::debug;

use crate::{
    any::TypeInfo,
    arguments::Arguments,
    errors::InstantiateErrorKind,
    injectable::{BoxedInvoke, Injectable, Method, Parameter},
    utils::thread_safety::{value, RcAnyThreadSafety, RcThreadSafety},
};

pub(crate) type Constructor = fn(&Arguments) -> Result<RcAnyThreadSafety, InstantiateErrorKind>;

pub(crate) type BoxedCaster = RcThreadSafety<dyn Fn(&RcAnyThreadSafety) -> Option<RcAnyThreadSafety> + Send + Sync>;

pub(crate) struct MethodDescriptor {
    pub(crate) is_static: bool,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) invoke: BoxedInvoke,
}

/// What the container knows about a declared type: how to build it and which methods it can call.
pub(crate) struct TypeDescriptor {
    pub(crate) type_info: TypeInfo,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) constructor: Constructor,
    pub(crate) methods: BTreeMap<&'static str, MethodDescriptor>,
}

impl TypeDescriptor {
    #[must_use]
    pub(crate) fn of<T: Injectable>() -> Self {
        let methods = T::methods()
            .into_iter()
            .map(
                |Method {
                     name,
                     is_static,
                     parameters,
                     invoke,
                     ..
                 }| {
                    (
                        name,
                        MethodDescriptor {
                            is_static,
                            parameters,
                            invoke,
                        },
                    )
                },
            )
            .collect();

        Self {
            type_info: TypeInfo::of::<T>(),
            parameters: T::parameters(),
            constructor: construct::<T>,
            methods,
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn key(&self) -> &'static str {
        self.type_info.key()
    }
}

fn construct<T: Injectable>(args: &Arguments) -> Result<RcAnyThreadSafety, InstantiateErrorKind> {
    T::construct(args).map(value)
}

/// Declared types and interface casts, the container's replacement for runtime reflection.
#[derive(Default)]
pub(crate) struct Catalog {
    descriptors: BTreeMap<&'static str, RcThreadSafety<TypeDescriptor>>,
    keys: BTreeMap<TypeId, &'static str>,
    casts: BTreeMap<TypeId, Vec<(TypeId, BoxedCaster)>>,
}

impl Catalog {
    pub(crate) fn declare(&mut self, descriptor: TypeDescriptor) {
        let key = descriptor.key();
        debug!(key, parameters = descriptor.parameters.len(), methods = descriptor.methods.len(), "Declared");

        self.keys.insert(descriptor.type_info.id, key);
        self.descriptors.insert(key, RcThreadSafety::new(descriptor));
    }

    #[inline]
    #[must_use]
    pub(crate) fn get(&self, key: &str) -> Option<RcThreadSafety<TypeDescriptor>> {
        self.descriptors.get(key).cloned()
    }

    #[inline]
    #[must_use]
    pub(crate) fn get_by_id(&self, type_id: &TypeId) -> Option<RcThreadSafety<TypeDescriptor>> {
        self.keys.get(type_id).and_then(|key| self.get(key))
    }

    pub(crate) fn add_cast(&mut self, interface: TypeInfo, concrete: TypeInfo, caster: BoxedCaster) {
        debug!(interface = interface.name, concrete = concrete.name, "Implemented");

        let casters = self.casts.entry(interface.id).or_default();
        match casters.iter_mut().find(|(type_id, _)| *type_id == concrete.id) {
            Some((_, existing)) => *existing = caster,
            None => casters.push((concrete.id, caster)),
        }
    }

    /// Casters registered for the interface, tried in registration order.
    #[inline]
    #[must_use]
    pub(crate) fn casters(&self, interface: &TypeId) -> Vec<BoxedCaster> {
        self.casts
            .get(interface)
            .map(|casters| casters.iter().map(|(_, caster)| caster.clone()).collect())
            .unwrap_or_default()
    }
}
