use serde::{Deserialize, Serialize};
use sovereign_notifier_macros::{Decode, Encode};

/// Main chain shard header, the part of the block an incoming header is anchored to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct HeaderV2 {
    pub nonce: u64,
    pub round: u64,
    pub epoch: u32,
    pub shard_id: u32,
    pub timestamp: u64,
    pub prev_hash: Vec<u8>,
    pub root_hash: Vec<u8>,
    pub scheduled_root_hash: Vec<u8>,
    pub chain_id: Vec<u8>,
}
