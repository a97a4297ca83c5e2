//! Attach file context to `io::Result`s

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

pub trait IoResultExt<T> {
    /// Record file I/O failure, reported as [`ApplicationError::Io`].
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Config file I/O failure, reported as [`ApplicationError::Config`].
    fn with_config_context(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::Io {
            context: action.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }

    fn with_config_context(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Config {
            message: format!("read {}: {}", path.display(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
    }

    #[test]
    fn given_io_error_when_adding_path_context_then_names_action_and_path() {
        let err = not_found()
            .with_path_context("read records", Path::new("forest.toml"))
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Io { .. }));
        assert_eq!(err.to_string(), "read records: forest.toml");
    }

    #[test]
    fn given_io_error_when_adding_config_context_then_is_config_error() {
        let err = not_found()
            .with_config_context(Path::new(".rsforest.toml"))
            .unwrap_err();

        assert_eq!(err.to_string(), "config error: read .rsforest.toml: gone");
    }
}
