/// Config for a registry entry
/// ## Fields
/// - `cache_provides`:
///   If `true`, the object built by the producer is cached on first retrieval and reused (singleton).
///   If `false`, the producer runs on every retrieval (factory).
///
///   This does **not** affect the dependencies the producer pulls from the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub cache_provides: bool,
}

impl Config {
    #[inline]
    #[must_use]
    pub const fn singleton() -> Self {
        Self { cache_provides: true }
    }

    #[inline]
    #[must_use]
    pub const fn factory() -> Self {
        Self { cache_provides: false }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::singleton()
    }
}
