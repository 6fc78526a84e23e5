use thiserror::Error;

/// type alias for all operations in this crate that could fail with a [`KvsExtraError`]
pub type Result<T> = std::result::Result<T, KvsExtraError>;

/// The error variants used by kvs-extra.
/// Failures from the store client and from the path codec are translated into
/// these kinds and propagated up to the CLI, which handles user-facing
/// formatting and exit-code selection. No operation retries on failure.
#[derive(Debug, Error)]
pub enum KvsExtraError {
    /// an export could not enumerate or fetch keys under the requested root
    #[error("root key '{root_key}' was not found")]
    RootKeyNotFound {
        /// the root key the export was asked for
        root_key: String,
    },

    /// two flat paths structurally disagree: one is a strict prefix of the
    /// other, or a segment is a mapping in one entry and a leaf in another
    #[error("path '{path}' conflicts with existing path '{existing}'")]
    PathConflict {
        /// the path being inserted when the conflict was detected
        path: String,
        /// the previously inserted path it collides with
        existing: String,
    },

    /// a single key write failed during an import
    #[error("unable to write key '{key}'")]
    KeyWriteFailed {
        /// the key whose write failed
        key: String,
    },

    /// import was invoked without a source file name
    #[error("no file name specified")]
    MissingArgument,

    /// an object key contains the path delimiter, so its flattened path
    /// could not be unflattened losslessly
    #[error("key '{key}' contains the delimiter '{delimiter}'")]
    KeyContainsDelimiter {
        /// the offending object key
        key: String,
        /// the delimiter in use
        delimiter: char,
    },

    /// a flat path is malformed (empty, or has an empty segment)
    #[error("invalid path '{path}'")]
    InvalidPath {
        /// the malformed path
        path: String,
    },

    /// variant for errors caused by invalid command line input
    #[error("could not parse: {0}")]
    Parsing(String),

    /// an error message relayed from the store server
    #[error("{0}")]
    StringErr(String),

    /// variant for errors caused from IO
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// variant for serde_json (de)serialization errors
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    /// variant for errors parsing a JSON5 import file
    #[error("invalid JSON5: {0}")]
    Json5(#[from] json5::Error),
}
