use std::borrow::Cow;

use thiserror::Error;

/// An error around some option-setting, and the reason.
///
/// These are meant to potentially be user-facing (e.g. explain
/// why it's broken and what to fix), and as so treat it as such!
///
/// For stylistic and consistency reasons, use _single quotes_ (e.g. `'bad'`)
/// for highlighting error values.
#[derive(Debug, Error, PartialEq)]
pub enum OptionError {
    #[error("Configuration file error: {0}")]
    Config(Cow<'static, str>),
    #[error("Argument error: {0}")]
    Argument(Cow<'static, str>),
    #[error("Error with the config file or the arguments: {0}")]
    Other(Cow<'static, str>),
}

impl OptionError {
    /// Create a new [`OptionError::Config`].
    pub(crate) fn config<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        OptionError::Config(reason.into())
    }

    /// Create a new [`OptionError::Other`].
    pub(crate) fn other<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        OptionError::Other(reason.into())
    }
}

pub(crate) type OptionResult<T> = Result<T, OptionError>;
