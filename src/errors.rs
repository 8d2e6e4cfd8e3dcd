//! Everything that can go wrong is either a bad parameter, caught
//! before any work starts, or a renderer failing to put pixels on the
//! screen.

use failure::Fail;
use std::io;

/// The error type for the whole library.
#[derive(Debug, Fail)]
pub enum FieldError {
    /// A size, bound, budget or modulus that cannot describe a field.
    #[fail(display = "invalid parameter: {}", _0)]
    InvalidParameter(String),

    /// The rendering collaborator could not display a frame.
    #[fail(display = "render failure: {}", _0)]
    Render(String),
}

impl FieldError {
    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        FieldError::InvalidParameter(msg.into())
    }
}

impl From<io::Error> for FieldError {
    fn from(err: io::Error) -> Self {
        FieldError::Render(err.to_string())
    }
}
