use alloc::string::String;

use super::{container::ContainerErrorKind, instantiate::InstantiateErrorKind};

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("Entry `{key}` not found in registry")]
    NotFound { key: String },
    #[error("Entry `{key}` is not of type `{expected}`")]
    IncorrectType { key: String, expected: &'static str },
    #[error("No concrete implementation bound for `{interface}`")]
    ConcreteClassNotFound { interface: &'static str },
    #[error("Missing required argument `{name}` of `{target}`")]
    MissingArgument { target: String, name: &'static str },
    #[error("Failed to instantiate `{key}`: {source}")]
    Instantiate {
        key: String,
        #[source]
        source: InstantiateErrorKind,
    },
    #[error(transparent)]
    Container(#[from] ContainerErrorKind),
}
