use alloc::{borrow::ToOwned as _, string::String};
use core::any::type_name;
use parking_lot::Mutex;
use tracing::{debug, error, info_span};

use crate::{
    any::TypeInfo,
    catalog::{BoxedCaster, Catalog, TypeDescriptor},
    config::Config,
    errors::{ContainerErrorKind, InstantiateErrorKind, RegistryErrorKind, ResolveErrorKind},
    injectable::Injectable,
    key::is_valid_key,
    producer::boxed_producer,
    registry::{Entry, EntryKind, Lookup, Storage},
    utils::thread_safety::{erase, value, RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety},
};

/// String-keyed registry of services plus the resolution engine built on top of it.
///
/// Cloning is cheap and every clone shares the same registry.
/// No lock is held while a producer, constructor or method runs,
/// so they are free to call back into the container.
#[derive(Clone)]
pub struct Container {
    pub(crate) inner: RcThreadSafety<ContainerInner>,
}

pub(crate) struct ContainerInner {
    pub(crate) storage: Mutex<Storage>,
    pub(crate) catalog: Mutex<Catalog>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RcThreadSafety::new(ContainerInner {
                storage: Mutex::new(Storage::default()),
                catalog: Mutex::new(Catalog::default()),
            }),
        }
    }

    /// Registers a factory: the producer runs on every retrieval.
    ///
    /// # Errors
    /// - Returns [`RegistryErrorKind::InvalidKey`] if the key isn't identifier segments joined by `::`
    /// - Returns [`RegistryErrorKind::KeyExists`] if the key is already registered
    #[inline]
    pub fn add<F, T, E>(&self, key: &str, producer: F) -> Result<(), RegistryErrorKind>
    where
        F: Fn(&Container, &[RcAnyThreadSafety]) -> Result<T, E> + Send + Sync + 'static,
        T: SendSafety + SyncSafety + 'static,
        E: Into<InstantiateErrorKind>,
    {
        self.add_with_config(key, producer, Config::factory())
    }

    /// Registers a singleton: the producer runs on first retrieval and its object is cached.
    ///
    /// # Errors
    /// Same as [`Self::add`].
    #[inline]
    pub fn add_singleton<F, T, E>(&self, key: &str, producer: F) -> Result<(), RegistryErrorKind>
    where
        F: Fn(&Container, &[RcAnyThreadSafety]) -> Result<T, E> + Send + Sync + 'static,
        T: SendSafety + SyncSafety + 'static,
        E: Into<InstantiateErrorKind>,
    {
        self.add_with_config(key, producer, Config::singleton())
    }

    /// # Errors
    /// Same as [`Self::add`].
    pub fn add_with_config<F, T, E>(&self, key: &str, producer: F, config: Config) -> Result<(), RegistryErrorKind>
    where
        F: Fn(&Container, &[RcAnyThreadSafety]) -> Result<T, E> + Send + Sync + 'static,
        T: SendSafety + SyncSafety + 'static,
        E: Into<InstantiateErrorKind>,
    {
        check_key(key)?;

        let producer = boxed_producer(producer);
        let entry = if config.cache_provides {
            Entry::Singleton { producer, cached: None }
        } else {
            Entry::Factory { producer }
        };
        self.insert(key.to_owned(), entry)
    }

    /// Registers an object under the registry key of its type.
    ///
    /// # Errors
    /// Returns [`RegistryErrorKind::KeyExists`] if the key is already registered
    #[inline]
    pub fn add_instance<T: SendSafety + SyncSafety + 'static>(&self, instance: T) -> Result<(), RegistryErrorKind> {
        self.insert(TypeInfo::of::<T>().key().to_owned(), Entry::Instance(value(instance)))
    }

    /// # Errors
    /// Same as [`Self::add`].
    #[inline]
    pub fn add_instance_with_key<T: SendSafety + SyncSafety + 'static>(&self, key: &str, instance: T) -> Result<(), RegistryErrorKind> {
        self.add_instance_rc(key, RcThreadSafety::new(instance))
    }

    /// Registers an already shared object, retrieval returns this exact pointer.
    ///
    /// # Errors
    /// Same as [`Self::add`].
    pub fn add_instance_rc<T: SendSafety + SyncSafety + 'static>(
        &self,
        key: &str,
        instance: RcThreadSafety<T>,
    ) -> Result<(), RegistryErrorKind> {
        check_key(key)?;
        self.insert(key.to_owned(), Entry::Instance(erase(instance)))
    }

    /// Points `alias` at `key`, overwriting a previous target of the alias.
    #[inline]
    pub fn alias(&self, key: &str, alias: &str) {
        self.inner.storage.lock().add_alias(key.to_owned(), alias.to_owned());
    }

    /// Lets parameters typed as `interface` be satisfied by the entry registered under `concrete`.
    #[inline]
    pub fn bind(&self, concrete: &str, interface: &str) {
        self.alias(concrete, interface);
    }

    /// Binds trait object `I` to the entry of `T` and records how to view a `T` as an `I`.
    ///
    /// # Examples
    /// ```rust
    /// use keywire::{Container, RcThreadSafety};
    ///
    /// trait Mailer: Send + Sync {}
    /// struct Smtp;
    /// impl Mailer for Smtp {}
    ///
    /// let container = Container::new();
    /// container.add_instance(Smtp).unwrap();
    /// container.bind_type::<dyn Mailer, Smtp>(|smtp| smtp as RcThreadSafety<dyn Mailer>);
    ///
    /// assert!(container.has_type::<dyn Mailer>());
    /// ```
    #[inline]
    pub fn bind_type<I, T>(&self, cast: impl Fn(RcThreadSafety<T>) -> RcThreadSafety<I> + Send + Sync + 'static)
    where
        I: ?Sized + 'static,
        T: SendSafety + SyncSafety + 'static,
        RcThreadSafety<I>: SendSafety + SyncSafety,
    {
        self.implement(cast);
        self.bind(TypeInfo::of::<T>().key(), TypeInfo::of::<I>().key());
    }

    /// Records how a registry object of type `T` is injected into parameters typed as trait object `I`.
    pub fn implement<I, T>(&self, cast: impl Fn(RcThreadSafety<T>) -> RcThreadSafety<I> + Send + Sync + 'static)
    where
        I: ?Sized + 'static,
        T: SendSafety + SyncSafety + 'static,
        RcThreadSafety<I>: SendSafety + SyncSafety,
    {
        let caster: BoxedCaster = RcThreadSafety::new(move |object: &RcAnyThreadSafety| {
            object.clone().downcast::<T>().ok().map(|concrete| value(cast(concrete)))
        });
        self.inner
            .catalog
            .lock()
            .add_cast(TypeInfo::of::<I>(), TypeInfo::of::<T>(), caster);
    }

    #[inline]
    pub fn remove_alias(&self, alias: &str) -> bool {
        self.inner.storage.lock().remove_alias(alias)
    }

    /// Checks if an entry exists for the key or for the key its alias points at.
    #[inline]
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.inner.storage.lock().has(key)
    }

    #[inline]
    #[must_use]
    pub fn has_type<T: ?Sized + 'static>(&self) -> bool {
        self.has(TypeInfo::of::<T>().key())
    }

    #[inline]
    #[must_use]
    pub fn kind(&self, key: &str) -> Option<EntryKind> {
        self.inner.storage.lock().kind(key)
    }

    /// Removes the entry and its cached object. Aliases pointing at it are kept.
    #[inline]
    pub fn remove(&self, key: &str) -> bool {
        self.inner.storage.lock().remove(key)
    }

    /// Gets a shared object by key.
    ///
    /// # Errors
    /// See [`Self::get_value`], plus [`ResolveErrorKind::IncorrectType`] if the object isn't a `T`.
    #[inline]
    pub fn get<T: SendSafety + SyncSafety + 'static>(&self, key: &str) -> Result<RcThreadSafety<T>, ResolveErrorKind> {
        self.get_with_args(key, &[])
    }

    /// # Errors
    /// Same as [`Self::get`].
    pub fn get_with_args<T: SendSafety + SyncSafety + 'static>(
        &self,
        key: &str,
        args: &[RcAnyThreadSafety],
    ) -> Result<RcThreadSafety<T>, ResolveErrorKind> {
        self.get_value(key, args)?.downcast::<T>().map_err(|_| {
            let err = ResolveErrorKind::IncorrectType {
                key: key.to_owned(),
                expected: type_name::<T>(),
            };
            error!("{}", err);
            err
        })
    }

    /// Gets an object by key, following one alias hop.
    /// `args` are forwarded to the producer of a singleton or factory, instances ignore them.
    ///
    /// # Errors
    /// - Returns [`ContainerErrorKind::EmptyKey`] if the key is empty
    /// - Returns [`ResolveErrorKind::NotFound`] if there is no entry for the key
    /// - Returns [`ResolveErrorKind::Instantiate`] if the producer fails
    pub fn get_value(&self, key: &str, args: &[RcAnyThreadSafety]) -> Result<RcAnyThreadSafety, ResolveErrorKind> {
        let span = info_span!("get", key);
        let _guard = span.enter();

        if key.is_empty() {
            let err = ResolveErrorKind::Container(ContainerErrorKind::EmptyKey);
            error!("{}", err);
            return Err(err);
        }

        let (canonical, lookup) = {
            let storage = self.inner.storage.lock();
            let canonical = storage.canonical(key);
            if canonical != key {
                debug!(canonical, "Alias resolved");
            }
            (String::from(canonical), storage.lookup(canonical))
        };

        match lookup {
            Some(Lookup::Ready(object)) => Ok(object),
            Some(Lookup::Produce { producer, cache }) => {
                let object = producer(self, args).map_err(|source| {
                    let err = ResolveErrorKind::Instantiate {
                        key: canonical.clone(),
                        source,
                    };
                    error!("{}", err);
                    err
                })?;

                if cache {
                    Ok(self.inner.storage.lock().store(&canonical, object))
                } else {
                    Ok(object)
                }
            }
            None => {
                let err = ResolveErrorKind::NotFound { key: key.to_owned() };
                error!("{}", err);
                Err(err)
            }
        }
    }

    /// Makes `T` resolvable by [`Self::resolve`] under the registry key of its type.
    /// Declaring a type again replaces its previous declaration.
    #[inline]
    pub fn declare<T: Injectable>(&self) -> &Self {
        self.inner.catalog.lock().declare(TypeDescriptor::of::<T>());
        self
    }

    #[inline]
    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.inner.catalog.lock().get(name).is_some()
    }

    fn insert(&self, key: String, entry: Entry) -> Result<(), RegistryErrorKind> {
        self.inner.storage.lock().insert(key, entry).map_err(|err| {
            error!("{}", err);
            err
        })
    }
}

fn check_key(key: &str) -> Result<(), RegistryErrorKind> {
    if is_valid_key(key) {
        Ok(())
    } else {
        let err = RegistryErrorKind::InvalidKey { key: key.to_owned() };
        error!("{}", err);
        Err(err)
    }
}
