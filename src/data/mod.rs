//! Chain data exchanged with the observer node and published to sovereign subscribers.

pub mod header;
pub mod incoming;
pub mod outport;

pub use header::HeaderV2;
pub use incoming::{IncomingEvent, IncomingHeader, MiniBlock, MiniBlockType};
pub use outport::{
    BlockData, Event, FinalizedBlock, Log, LogData, OperationType, OutportBlock, PayloadData,
    Transaction, TransactionPool, TxInfo,
};

/// Shard id the sovereign chain is known under.
pub const SOVEREIGN_CHAIN_SHARD_ID: u32 = 0;

/// Shard id used for anything originating from the main chain.
pub const MAIN_CHAIN_SHARD_ID: u32 = 0xFFFF_FFF0;

/// The only header type incoming headers can be built from.
pub const SHARD_HEADER_V2: &str = "ShardHeaderV2";
