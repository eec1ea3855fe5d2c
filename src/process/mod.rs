//! Correlation of saved and finalized blocks, and publication of incoming headers.
//!
//! Everything in here is synchronous. The sync pipeline drives it from its own worker, so nothing
//! blocks an async runtime thread for longer than a single notification takes.

use std::sync::Arc;

use crate::{
    data::{FinalizedBlock, IncomingHeader, OutportBlock, Transaction},
    error::Error,
};

pub mod indexer;
pub mod notifier;

pub use indexer::{BlockCache, DataIndexer, PayloadRouter, PendingBlockStore};
pub use notifier::{SovereignNotifier, SovereignNotifierBuilder, SubscribedEvent, WatchMode};

pub type SubscriberResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Receives every incoming header published for a finalized main chain block.
///
/// Called while the notifier holds its subscriber lock, implementations must not register
/// subscribers or notify from within `add_header`.
pub trait HeaderSubscriber: Send + Sync {
    fn add_header(&self, header_hash: &[u8], header: &IncomingHeader) -> SubscriberResult;
}

/// Receives the transactions referenced by incoming mini blocks, in execution order.
///
/// Same locking rules as [`HeaderSubscriber`].
pub trait TransactionSubscriber: Send + Sync {
    fn add_data(&self, key: &[u8], transaction: &Transaction, size: usize, cache_id: &str);
}

pub trait Notifier: Send + Sync {
    fn notify(&self, block: &OutportBlock) -> Result<(), Error>;

    fn register_header_subscriber(&self, subscriber: Arc<dyn HeaderSubscriber>)
    -> Result<(), Error>;

    fn register_tx_subscriber(&self, subscriber: Arc<dyn TransactionSubscriber>)
    -> Result<(), Error>;
}

pub trait Indexer: Send + Sync {
    fn save_block(&self, block: OutportBlock) -> Result<(), Error>;

    fn finalized_block(&self, block: &FinalizedBlock) -> Result<(), Error>;
}
