use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sovereign_notifier_macros::{Decode, Encode};

use crate::error::Error;

/// A block as pushed by the observer node once it was committed locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct OutportBlock {
    pub shard_id: u32,
    pub block_data: Option<BlockData>,
    pub transaction_pool: Option<TransactionPool>,
    pub number_of_shards: u32,
}

impl OutportBlock {
    pub fn header_hash(&self) -> Option<&[u8]> {
        self.block_data.as_ref().map(|x| x.header_hash.as_slice())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct BlockData {
    pub shard_id: u32,
    pub header_hash: Vec<u8>,
    pub header_bytes: Vec<u8>,
    pub header_type: String,
}

/// Transactions keyed by their hex encoded hash, in the order the node delivered them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct TransactionPool {
    pub transactions: IndexMap<String, TxInfo>,
    pub logs: Vec<LogData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct TxInfo {
    pub transaction: Transaction,
    pub execution_order: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Transaction {
    pub nonce: u64,
    /// Decimal amount, kept as text since it can exceed any native integer
    pub value: String,
    pub rcv_addr: Vec<u8>,
    pub snd_addr: Vec<u8>,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub data: Vec<u8>,
    pub chain_id: Vec<u8>,
    pub version: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct LogData {
    pub tx_hash: String,
    pub log: Log,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Log {
    pub address: Vec<u8>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Event {
    pub address: Vec<u8>,
    pub identifier: Vec<u8>,
    pub topics: Vec<Vec<u8>>,
    pub data: Vec<u8>,
    pub additional_data: Vec<Vec<u8>>,
}

/// Marker sent once a previously saved block can no longer be reverted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct FinalizedBlock {
    pub shard_id: u32,
    pub header_hash: Vec<u8>,
}

/// Transport unit: a marshalled body tagged with the operation it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct PayloadData {
    pub operation_type: u32,
    pub payload: Vec<u8>,
}

impl PayloadData {
    pub fn new(operation: OperationType, payload: Vec<u8>) -> Self {
        Self {
            operation_type: operation as u32,
            payload,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum OperationType {
    SaveBlock = 0,
    RevertIndexedBlock = 1,
    SaveRoundsInfo = 2,
    SaveValidatorsPubKeys = 3,
    SaveValidatorsRating = 4,
    SaveAccounts = 5,
    FinalizedBlock = 6,
}

impl OperationType {
    pub const ALL: [OperationType; 7] = [
        OperationType::SaveBlock,
        OperationType::RevertIndexedBlock,
        OperationType::SaveRoundsInfo,
        OperationType::SaveValidatorsPubKeys,
        OperationType::SaveValidatorsRating,
        OperationType::SaveAccounts,
        OperationType::FinalizedBlock,
    ];
}

impl TryFrom<u32> for OperationType {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|op| *op as u32 == value)
            .ok_or(Error::UnknownOperation(value))
    }
}
