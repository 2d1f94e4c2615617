use alloc::vec::Vec;
use core::{any::type_name, marker::PhantomData};

use crate::{
    any::TypeInfo,
    arguments::Arguments,
    errors::InstantiateErrorKind,
    utils::thread_safety::{value, RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety},
};

/// A type the container can build by resolving the parameters it declares.
///
/// Parameters are resolved in declaration order and handed to [`Injectable::construct`] as [`Arguments`].
/// A type without parameters is built with empty arguments.
///
/// # Examples
/// ```rust
/// use keywire::{Arguments, Container, InstantiateErrorKind, Injectable, NamedArgs, Parameter, RcThreadSafety};
///
/// struct Transport;
///
/// impl Injectable for Transport {
///     fn construct(_args: &Arguments) -> Result<Self, InstantiateErrorKind> {
///         Ok(Self)
///     }
/// }
///
/// struct Mailer {
///     transport: RcThreadSafety<Transport>,
///     sender: String,
/// }
///
/// impl Injectable for Mailer {
///     fn parameters() -> Vec<Parameter> {
///         vec![
///             Parameter::class::<Transport>("transport"),
///             Parameter::scalar("sender").with_default(String::from("noreply@example.com")),
///         ]
///     }
///
///     fn construct(args: &Arguments) -> Result<Self, InstantiateErrorKind> {
///         Ok(Self {
///             transport: args.get("transport")?,
///             sender: args.cloned("sender")?,
///         })
///     }
/// }
///
/// let container = Container::new();
/// container.declare::<Transport>().declare::<Mailer>();
///
/// let mailer = container.resolve_as::<Mailer>(&NamedArgs::new().with("sender", String::from("admin@example.com"))).unwrap();
/// assert_eq!(mailer.sender, "admin@example.com");
/// ```
pub trait Injectable: SendSafety + SyncSafety + Sized + 'static {
    #[must_use]
    fn parameters() -> Vec<Parameter> {
        Vec::new()
    }

    /// # Errors
    /// Any failure to build the object from the resolved arguments.
    fn construct(args: &Arguments) -> Result<Self, InstantiateErrorKind>;

    #[must_use]
    fn methods() -> Vec<Method<Self>> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Concrete declared type, built on demand when the registry has no entry for it.
    Class(TypeInfo),
    /// Trait object type, only satisfied by the registry.
    Interface(TypeInfo),
    /// Anything else, supplied by name or by default.
    Scalar,
}

#[derive(Clone)]
pub struct Parameter {
    pub(crate) name: &'static str,
    pub(crate) kind: ParameterKind,
    pub(crate) default: Option<RcAnyThreadSafety>,
}

impl Parameter {
    #[inline]
    #[must_use]
    pub fn class<T: 'static>(name: &'static str) -> Self {
        Self {
            name,
            kind: ParameterKind::Class(TypeInfo::of::<T>()),
            default: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn interface<I: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            name,
            kind: ParameterKind::Interface(TypeInfo::of::<I>()),
            default: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn scalar(name: &'static str) -> Self {
        Self {
            name,
            kind: ParameterKind::Scalar,
            default: None,
        }
    }

    /// Value used when the caller passes nothing for a scalar parameter.
    #[inline]
    #[must_use]
    pub fn with_default<T: SendSafety + SyncSafety + 'static>(mut self, val: T) -> Self {
        self.default = Some(value(val));
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

pub(crate) type BoxedInvoke =
    RcThreadSafety<dyn Fn(Option<&RcAnyThreadSafety>, &Arguments) -> Result<RcAnyThreadSafety, InstantiateErrorKind> + Send + Sync>;

/// A method of `T` the container can call with resolved arguments.
pub struct Method<T> {
    pub(crate) name: &'static str,
    pub(crate) is_static: bool,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) invoke: BoxedInvoke,
    pub(crate) _receiver: PhantomData<fn() -> T>,
}

impl<T: 'static> Method<T> {
    /// Method called on an instance of `T`.
    /// When resolved by type name, a fresh instance built with empty arguments serves as receiver.
    #[must_use]
    pub fn instance<F, R, E>(name: &'static str, parameters: Vec<Parameter>, method: F) -> Self
    where
        F: Fn(&T, &Arguments) -> Result<R, E> + Send + Sync + 'static,
        R: SendSafety + SyncSafety + 'static,
        E: Into<InstantiateErrorKind>,
    {
        let invoke = move |receiver: Option<&RcAnyThreadSafety>, args: &Arguments| -> Result<_, InstantiateErrorKind> {
            let receiver = receiver
                .and_then(|receiver| receiver.downcast_ref::<T>())
                .ok_or(InstantiateErrorKind::IncorrectReceiver { expected: type_name::<T>() })?;
            method(receiver, args).map(value).map_err(Into::into)
        };

        Self {
            name,
            is_static: false,
            parameters,
            invoke: RcThreadSafety::new(invoke),
            _receiver: PhantomData,
        }
    }

    /// Associated function of `T`, called without a receiver.
    #[must_use]
    pub fn function<F, R, E>(name: &'static str, parameters: Vec<Parameter>, function: F) -> Self
    where
        F: Fn(&Arguments) -> Result<R, E> + Send + Sync + 'static,
        R: SendSafety + SyncSafety + 'static,
        E: Into<InstantiateErrorKind>,
    {
        let invoke = move |_receiver: Option<&RcAnyThreadSafety>, args: &Arguments| -> Result<_, InstantiateErrorKind> {
            function(args).map(value).map_err(Into::into)
        };

        Self {
            name,
            is_static: true,
            parameters,
            invoke: RcThreadSafety::new(invoke),
            _receiver: PhantomData,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.is_static
    }
}
