mod container;
mod instantiate;
mod registry;
mod resolve;

pub use container::ContainerErrorKind;
pub use instantiate::InstantiateErrorKind;
pub use registry::RegistryErrorKind;
pub use resolve::ResolveErrorKind;
