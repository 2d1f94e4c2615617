use alloc::string::String;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RegistryErrorKind {
    #[error("Key `{key}` is invalid. Expected identifier segments joined by `::`")]
    InvalidKey { key: String },
    #[error("Key `{key}` already registered. Remove it before registering it again")]
    KeyExists { key: String },
}
