use serde::{Deserialize, Serialize};
use sovereign_notifier_macros::{Decode, Encode};

use super::{Event, HeaderV2};

/// What sovereign chain subscribers receive for every finalized main chain block.
///
/// When watching addresses `incoming_mini_blocks` is filled, when watching events
/// `incoming_events` is, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct IncomingHeader {
    pub header: HeaderV2,
    pub incoming_mini_blocks: Vec<MiniBlock>,
    pub incoming_events: Vec<IncomingEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct MiniBlock {
    pub tx_hashes: Vec<Vec<u8>>,
    pub receiver_shard_id: u32,
    pub sender_shard_id: u32,
    pub kind: MiniBlockType,
    /// Decimal id of the main chain shard the transactions originate from
    pub reserved: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum MiniBlockType {
    TxBlock,
    SmartContractResultBlock,
    InvalidBlock,
    ReceiptBlock,
    PeerBlock,
    RewardsBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct IncomingEvent {
    pub tx_hash: String,
    pub event: Event,
}
