use thiserror::Error;

use crate::core::BlockKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("unknown block key: {0}")]
    UnknownBlock(BlockKey),

    #[error("offset {offset} is out of bounds for block {key} (length {len})")]
    OffsetOutOfBounds {
        key: BlockKey,
        offset: usize,
        len: usize,
    },
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot has no blocks")]
    EmptyDocument,

    #[error("duplicate block key in snapshot: {0}")]
    DuplicateKey(String),

    #[error("style range {offset}+{length} exceeds block {key} (length {len})")]
    StyleRangeOutOfBounds {
        key: String,
        offset: usize,
        length: usize,
        len: usize,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not determine the data directory")]
    DataDirNotFound,
}
