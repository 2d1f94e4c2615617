use alloc::{
    borrow::ToOwned as _,
    format,
    string::{String, ToString as _},
};
use core::any::{type_name, TypeId};
use tracing::{debug, error, info_span};

use crate::{
    any::TypeInfo,
    arguments::{Arguments, NamedArgs},
    catalog::TypeDescriptor,
    errors::{ContainerErrorKind, ResolveErrorKind},
    injectable::{Injectable, Parameter, ParameterKind},
    utils::thread_safety::{erase, RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety},
    Container,
};

/// What [`Container::resolve_method`] calls a method on.
#[derive(Clone)]
pub enum Target {
    /// Declared type name. Instance methods get a fresh receiver built with empty arguments.
    Type(String),
    /// Existing object of a declared type, used as receiver.
    Instance { type_id: TypeId, instance: RcAnyThreadSafety },
}

impl Target {
    #[inline]
    #[must_use]
    pub fn of<T: Injectable>() -> Self {
        Self::Type(TypeInfo::of::<T>().key().to_owned())
    }

    #[inline]
    #[must_use]
    pub fn instance<T: SendSafety + SyncSafety + 'static>(instance: RcThreadSafety<T>) -> Self {
        Self::Instance {
            type_id: TypeId::of::<T>(),
            instance: erase(instance),
        }
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Self::Type(name.to_owned())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Self::Type(name)
    }
}

impl<T: SendSafety + SyncSafety + 'static> From<RcThreadSafety<T>> for Target {
    fn from(instance: RcThreadSafety<T>) -> Self {
        Self::instance(instance)
    }
}

impl Container {
    /// Builds a declared type, resolving its parameters in declaration order.
    ///
    /// For a parameter typed as a class or interface, a registry entry under the type's key wins.
    /// Otherwise a class is resolved recursively and an interface fails.
    /// A scalar parameter takes the named argument with its name, then its default.
    ///
    /// # Errors
    /// - Returns [`ContainerErrorKind::UnknownType`] if the type (or a class parameter type) isn't declared
    /// - Returns [`ResolveErrorKind::ConcreteClassNotFound`] if an interface parameter has no registry entry
    /// - Returns [`ResolveErrorKind::MissingArgument`] if a scalar parameter has neither named argument nor default
    /// - Returns [`ResolveErrorKind::Instantiate`] if the constructor fails
    /// - Any error of the registry entries used on the way
    pub fn resolve(&self, name: &str, named: &NamedArgs) -> Result<RcAnyThreadSafety, ResolveErrorKind> {
        let span = info_span!("resolve", type_name = name);
        let _guard = span.enter();

        let descriptor = self.descriptor(name)?;
        let key = descriptor.key();

        let args = if descriptor.parameters.is_empty() {
            debug!("No parameters");
            Arguments::new()
        } else {
            self.resolve_parameters(key, &descriptor.parameters, named)?
        };

        let object = (descriptor.constructor)(&args).map_err(|source| {
            let err = ResolveErrorKind::Instantiate { key: key.to_owned(), source };
            error!("{}", err);
            err
        })?;

        debug!("Resolved");
        Ok(object)
    }

    /// Typed [`Self::resolve`] for a declared `T`.
    ///
    /// # Errors
    /// Same as [`Self::resolve`].
    pub fn resolve_as<T: Injectable>(&self, named: &NamedArgs) -> Result<RcThreadSafety<T>, ResolveErrorKind> {
        let key = TypeInfo::of::<T>().key();
        self.resolve(key, named)?.downcast::<T>().map_err(|_| {
            let err = ResolveErrorKind::IncorrectType {
                key: key.to_owned(),
                expected: type_name::<T>(),
            };
            error!("{}", err);
            err
        })
    }

    /// Calls a declared method with resolved parameters and returns its result.
    ///
    /// Parameters follow the same rules as in [`Self::resolve`].
    /// A static method is called without receiver. An instance method on [`Target::Type`]
    /// gets a fresh receiver built with empty arguments.
    ///
    /// # Errors
    /// - Returns [`ContainerErrorKind::UnknownType`] if the target type isn't declared
    /// - Returns [`ContainerErrorKind::UnknownMethod`] if the type has no such method
    /// - Returns [`ResolveErrorKind::Instantiate`] if building the receiver or the call fails
    /// - Any error of [`Self::resolve`] while resolving parameters
    pub fn resolve_method(&self, target: impl Into<Target>, method: &str, named: &NamedArgs) -> Result<RcAnyThreadSafety, ResolveErrorKind> {
        let (descriptor, receiver) = match target.into() {
            Target::Type(name) => (self.descriptor(&name)?, None),
            Target::Instance { type_id, instance } => (self.descriptor_by_id(&type_id)?, Some(instance)),
        };
        let key = descriptor.key();

        let span = info_span!("resolve_method", type_name = key, method);
        let _guard = span.enter();

        let Some(method_descriptor) = descriptor.methods.get(method) else {
            let err = ResolveErrorKind::Container(ContainerErrorKind::UnknownMethod {
                type_name: key.to_owned(),
                method: method.to_owned(),
            });
            error!("{}", err);
            return Err(err);
        };

        let receiver = match receiver {
            _ if method_descriptor.is_static => None,
            Some(receiver) => Some(receiver),
            None => {
                debug!("Building receiver");
                Some((descriptor.constructor)(&Arguments::new()).map_err(|source| {
                    let err = ResolveErrorKind::Instantiate { key: key.to_owned(), source };
                    error!("{}", err);
                    err
                })?)
            }
        };

        let target = format!("{key}::{method}");
        let args = if method_descriptor.parameters.is_empty() {
            debug!("No parameters");
            Arguments::new()
        } else {
            self.resolve_parameters(&target, &method_descriptor.parameters, named)?
        };

        let result = (method_descriptor.invoke)(receiver.as_ref(), &args).map_err(|source| {
            let err = ResolveErrorKind::Instantiate { key: target, source };
            error!("{}", err);
            err
        })?;

        debug!("Called");
        Ok(result)
    }
}

impl Container {
    fn descriptor(&self, name: &str) -> Result<RcThreadSafety<TypeDescriptor>, ResolveErrorKind> {
        self.inner.catalog.lock().get(name).ok_or_else(|| {
            let err = ResolveErrorKind::Container(ContainerErrorKind::UnknownType { name: name.to_owned() });
            error!("{}", err);
            err
        })
    }

    fn descriptor_by_id(&self, type_id: &TypeId) -> Result<RcThreadSafety<TypeDescriptor>, ResolveErrorKind> {
        self.inner.catalog.lock().get_by_id(type_id).ok_or_else(|| {
            let err = ResolveErrorKind::Container(ContainerErrorKind::UnknownType {
                name: format!("{type_id:?}"),
            });
            error!("{}", err);
            err
        })
    }

    /// Collects the arguments of one constructor or method call.
    /// The list is local to this call, nested resolutions build their own.
    fn resolve_parameters(&self, target: &str, parameters: &[Parameter], named: &NamedArgs) -> Result<Arguments, ResolveErrorKind> {
        let mut args = Arguments::with_capacity(parameters.len());
        for parameter in parameters {
            let object = self.resolve_parameter(target, parameter, named)?;
            args.push(parameter.name, object);
        }
        Ok(args)
    }

    fn resolve_parameter(&self, target: &str, parameter: &Parameter, named: &NamedArgs) -> Result<RcAnyThreadSafety, ResolveErrorKind> {
        let name = parameter.name;
        match parameter.kind {
            ParameterKind::Class(type_info) | ParameterKind::Interface(type_info) => {
                let key = type_info.key();
                if self.has(key) {
                    debug!(parameter = name, key, "Found in registry");
                    let object = self.get_value(key, &[])?;
                    return Ok(match parameter.kind {
                        ParameterKind::Interface(interface) => self.cast_to_interface(&interface, object),
                        _ => object,
                    });
                }

                if let ParameterKind::Interface(_) = parameter.kind {
                    let err = ResolveErrorKind::ConcreteClassNotFound { interface: key };
                    error!("{}", err);
                    return Err(err);
                }

                debug!(parameter = name, key, "Not found in registry, resolving");
                self.resolve(key, named)
            }
            ParameterKind::Scalar => {
                if let Some(object) = named.get(name) {
                    debug!(parameter = name, "Passed by name");
                    return Ok(object.clone());
                }
                if let Some(default) = &parameter.default {
                    debug!(parameter = name, "Default used");
                    return Ok(default.clone());
                }

                let err = ResolveErrorKind::MissingArgument {
                    target: target.to_string(),
                    name,
                };
                error!("{}", err);
                Err(err)
            }
        }
    }

    /// Views a registry object as the interface, if an implementation was recorded for its type.
    /// Objects without one are passed as is.
    fn cast_to_interface(&self, interface: &TypeInfo, object: RcAnyThreadSafety) -> RcAnyThreadSafety {
        let casters = self.inner.catalog.lock().casters(&interface.id);
        casters.iter().find_map(|caster| caster(&object)).unwrap_or(object)
    }
}
