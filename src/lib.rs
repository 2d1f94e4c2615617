#![no_std]

extern crate alloc;

pub(crate) mod alias;
pub(crate) mod any;
pub(crate) mod arguments;
pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod container;
pub(crate) mod errors;
pub(crate) mod injectable;
pub(crate) mod key;
pub(crate) mod producer;
pub(crate) mod registry;
pub(crate) mod resolver;

pub mod utils;

pub use any::TypeInfo;
pub use arguments::{Arguments, NamedArgs};
pub use config::Config;
pub use container::Container;
pub use errors::{ContainerErrorKind, InstantiateErrorKind, RegistryErrorKind, ResolveErrorKind};
pub use injectable::{Injectable, Method, Parameter, ParameterKind};
pub use key::is_valid_key;
pub use registry::EntryKind;
pub use resolver::Target;
pub use utils::thread_safety::{value, RcThreadSafety};

/// Type-erased shared object stored in and returned by the container.
pub type Value = utils::thread_safety::RcAnyThreadSafety;
