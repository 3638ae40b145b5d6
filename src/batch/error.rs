use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    /// Input line without an `id<TAB>question` shape.
    #[error("malformed record on line {line} (id: {id:?})")]
    MalformedRecord { line: usize, id: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
