/// Failure raised by user code: a producer, a constructor or a method.
#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error("Argument `{name}` not passed")]
    MissingArgument { name: &'static str },
    #[error("Argument `{name}` is not of type `{expected}`")]
    IncorrectArgument { name: &'static str, expected: &'static str },
    #[error("Receiver is not of type `{expected}`")]
    IncorrectReceiver { expected: &'static str },
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
