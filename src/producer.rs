use tracing::debug;

use crate::{
    errors::InstantiateErrorKind,
    utils::thread_safety::{value, RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety},
    Container,
};

pub(crate) type BoxedProducer =
    RcThreadSafety<dyn Fn(&Container, &[RcAnyThreadSafety]) -> Result<RcAnyThreadSafety, InstantiateErrorKind> + Send + Sync>;

/// Erases a typed producer so that it can live in the registry next to producers of other types.
#[must_use]
pub(crate) fn boxed_producer<F, T, E>(producer: F) -> BoxedProducer
where
    F: Fn(&Container, &[RcAnyThreadSafety]) -> Result<T, E> + Send + Sync + 'static,
    T: SendSafety + SyncSafety + 'static,
    E: Into<InstantiateErrorKind>,
{
    RcThreadSafety::new(move |container: &Container, args: &[RcAnyThreadSafety]| -> Result<_, InstantiateErrorKind> {
        let provides = producer(container, args).map_err(Into::into)?;

        debug!("Produced");

        Ok(value(provides))
    })
}
