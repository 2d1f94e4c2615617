//! Shared pointer and marker aliases switched by the `thread_safe` feature.
//!
//! With the feature enabled every stored object is an [`alloc::sync::Arc`] and user closures must be `Send + Sync`,
//! without it the container falls back to [`alloc::rc::Rc`].

#[cfg(feature = "thread_safe")]
mod thread_safe {
    use alloc::sync::Arc;
    use core::any::Any;

    pub trait SendSafety: Send {}
    pub trait SyncSafety: Sync {}

    impl<T: Send + ?Sized> SendSafety for T {}
    impl<T: Sync + ?Sized> SyncSafety for T {}

    pub type RcThreadSafety<T> = Arc<T>;
    pub type RcAnyThreadSafety = RcThreadSafety<dyn Any + Send + Sync>;

    #[inline]
    pub(crate) fn erase<T: Send + Sync + 'static>(value: RcThreadSafety<T>) -> RcAnyThreadSafety {
        value
    }
}

#[cfg(not(feature = "thread_safe"))]
mod thread_unsafe {
    use alloc::rc::Rc;
    use core::any::Any;

    pub trait SendSafety {}
    pub trait SyncSafety {}

    impl<T: ?Sized> SendSafety for T {}
    impl<T: ?Sized> SyncSafety for T {}

    pub type RcThreadSafety<T> = Rc<T>;
    pub type RcAnyThreadSafety = RcThreadSafety<dyn Any>;

    #[inline]
    pub(crate) fn erase<T: 'static>(value: RcThreadSafety<T>) -> RcAnyThreadSafety {
        value
    }
}

#[cfg(feature = "thread_safe")]
pub(crate) use thread_safe::erase;
#[cfg(feature = "thread_safe")]
pub use thread_safe::{RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety};

#[cfg(not(feature = "thread_safe"))]
pub(crate) use thread_unsafe::erase;
#[cfg(not(feature = "thread_safe"))]
pub use thread_unsafe::{RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety};

/// Wraps an owned object into a type-erased shared [`crate::Value`].
#[inline]
#[must_use]
pub fn value<T: SendSafety + SyncSafety + 'static>(val: T) -> RcAnyThreadSafety {
    erase(RcThreadSafety::new(val))
}
