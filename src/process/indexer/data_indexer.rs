use std::sync::Arc;

use tracing::{Span, debug, info_span};

use crate::{
    data::{FinalizedBlock, OutportBlock},
    error::Error,
    process::{Indexer, Notifier},
};

use super::BlockCache;

/// Saves blocks until they are finalized, then hands them to the notifier.
pub struct DataIndexer {
    notifier: Arc<dyn Notifier>,
    cache: Arc<dyn BlockCache>,
    span: Span,
}

impl DataIndexer {
    pub fn new(notifier: Arc<dyn Notifier>, cache: Arc<dyn BlockCache>) -> Self {
        Self {
            notifier,
            cache,
            span: info_span!("data_indexer"),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl Indexer for DataIndexer {
    fn save_block(&self, block: OutportBlock) -> Result<(), Error> {
        let _entered = self.span.enter();

        if let Some(hash) = block.header_hash() {
            debug!(hash = hex::encode(hash), shard = block.shard_id, "saving block");
        }

        self.cache.add(block)
    }

    fn finalized_block(&self, block: &FinalizedBlock) -> Result<(), Error> {
        let _entered = self.span.enter();

        let outport_block = self.cache.extract(&block.header_hash)?;

        debug!(
            hash = hex::encode(&block.header_hash),
            shard = block.shard_id,
            "notifying finalized block"
        );

        self.notifier.notify(&outport_block)
    }
}
