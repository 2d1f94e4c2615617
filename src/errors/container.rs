use alloc::string::String;

/// Catch-all for lookups the container can't make sense of.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ContainerErrorKind {
    #[error("Key is empty")]
    EmptyKey,
    #[error("Type `{name}` not declared in container")]
    UnknownType { name: String },
    #[error("Type `{type_name}` has no callable method `{method}`")]
    UnknownMethod { type_name: String, method: String },
}
