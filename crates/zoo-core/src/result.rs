//! Result alias for host-level zoo operations

use crate::error::ZooError;

pub type Result<T> = std::result::Result<T, ZooError>;

pub trait ResultExt<T> {
    /// Turn a recoverable error into `Ok(None)` after logging it
    ///
    /// Used where one bad file must not stop a batch. Unrecoverable errors
    /// are passed through.
    fn skip_recoverable(self) -> Result<Option<T>>;
}

impl<T> ResultExt<T> for Result<T> {
    fn skip_recoverable(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                tracing::warn!("Skipping: {}", err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
