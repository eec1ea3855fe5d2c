use thiserror::Error;

use crate::DecodingError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} not provided")]
    MissingCollaborator(&'static str),

    #[error("invalid block cache size, must be greater than zero")]
    InvalidBlockCacheSize,

    #[error("outport block without block data provided")]
    InvalidOutportBlock,

    #[error("outport block already exists, hash: {0}")]
    BlockAlreadyExists(String),

    #[error("outport block not found for header hash: {0}")]
    BlockNotFound(String),

    #[error("unknown operation type: {0}")]
    UnknownOperation(u32),

    #[error("decoding error: {0}")]
    Decoding(#[from] DecodingError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("outport block without transaction pool provided")]
    MissingTransactionPool,

    #[error("outport block without block data provided")]
    MissingBlockData,

    #[error("received invalid header type: {received}, expected: {expected}")]
    UnsupportedHeaderType {
        received: String,
        expected: &'static str,
    },

    #[error("invalid transaction hash {hash}: {source}")]
    InvalidTxHash {
        hash: String,
        source: hex::FromHexError,
    },

    #[error("no subscribed addresses provided")]
    NoSubscribedAddresses,

    #[error("no subscribed events provided")]
    NoSubscribedEvents,

    #[error("duplicate subscribed address provided: {0}")]
    DuplicateAddress(String),

    #[error("empty subscribed event identifier provided")]
    EmptyIdentifier,

    #[error("empty subscribed address provided")]
    EmptySubscribedAddress,

    #[error("{source} for event at index = {index}")]
    SubscribedEvent { index: usize, source: Box<Error> },

    #[error("both subscribed addresses and subscribed events provided")]
    AmbiguousWatchMode,

    #[error("transaction subscribers are not supported when watching events")]
    TxSubscribersUnsupported,

    #[error(transparent)]
    SubscriberRejected(Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("invalid number of shards")]
    InvalidNumberOfShards,

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub(crate) fn for_event(self, index: usize) -> Error {
        Error::SubscribedEvent {
            index,
            source: Box::new(self),
        }
    }
}
