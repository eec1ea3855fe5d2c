use std::collections::{HashMap, VecDeque};

use parking_lot::RwLock;
use tracing::{Span, debug, info_span};

use crate::{data::OutportBlock, error::Error};

/// Holds saved blocks until their finalization marker arrives.
pub trait BlockCache: Send + Sync {
    fn add(&self, block: OutportBlock) -> Result<(), Error>;

    /// Removes and returns the block saved under `header_hash`
    fn extract(&self, header_hash: &[u8]) -> Result<OutportBlock, Error>;
}

/// Live entries plus an insertion log.
///
/// Every block carries the sequence number it was inserted with. Log entries whose sequence no
/// longer matches a live block are stale and get skipped when evicting. The log is rebuilt once
/// stale entries outnumber live ones, so it stays within a constant factor of the live set.
#[derive(Debug, Default)]
struct Pending {
    blocks: HashMap<Vec<u8>, (u64, OutportBlock)>,
    order: VecDeque<(u64, Vec<u8>)>,
    next_seq: u64,
}

impl Pending {
    fn is_live(&self, seq: u64, header_hash: &[u8]) -> bool {
        self.blocks
            .get(header_hash)
            .is_some_and(|(live, _)| *live == seq)
    }

    fn insert(&mut self, header_hash: Vec<u8>, block: OutportBlock) {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.order.push_back((seq, header_hash.clone()));
        self.blocks.insert(header_hash, (seq, block));
    }

    fn remove(&mut self, header_hash: &[u8]) -> Option<OutportBlock> {
        let (_, block) = self.blocks.remove(header_hash)?;

        self.skip_stale();
        self.compact();

        Some(block)
    }

    fn pop_oldest(&mut self) -> Option<Vec<u8>> {
        self.skip_stale();

        let (_, header_hash) = self.order.pop_front()?;
        self.blocks.remove(&header_hash);

        Some(header_hash)
    }

    fn skip_stale(&mut self) {
        while let Some((seq, header_hash)) = self.order.front() {
            if self.is_live(*seq, header_hash) {
                break;
            }

            self.order.pop_front();
        }
    }

    fn compact(&mut self) {
        if self.order.len() <= 2 * self.blocks.len() + 16 {
            return;
        }

        let Self { blocks, order, .. } = self;
        order.retain(|(seq, header_hash)| {
            blocks
                .get(header_hash)
                .is_some_and(|(live, _)| live == seq)
        });
    }
}

/// Pending blocks keyed by header hash, oldest insertion first.
///
/// A bounded store evicts in insertion order once full. Extracting a block does not refresh
/// anything, so this is FIFO rather than LRU.
#[derive(Debug)]
pub struct PendingBlockStore {
    pending: RwLock<Pending>,
    capacity: Option<usize>,
    span: Span,
}

impl PendingBlockStore {
    pub fn unbounded() -> Self {
        Self {
            pending: RwLock::new(Pending::default()),
            capacity: None,
            span: info_span!("pending_block_store"),
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::InvalidBlockCacheSize);
        }

        Ok(Self {
            pending: RwLock::new(Pending::default()),
            capacity: Some(capacity),
            span: info_span!("pending_block_store", capacity),
        })
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Copy of the block saved under `header_hash`, leaving it in place
    pub fn get(&self, header_hash: &[u8]) -> Result<OutportBlock, Error> {
        self.pending
            .read()
            .blocks
            .get(header_hash)
            .map(|(_, block)| block.clone())
            .ok_or_else(|| Error::BlockNotFound(hex::encode(header_hash)))
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.pending.read().blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.read().blocks.is_empty()
    }

    /// Header hashes of live blocks, oldest insertion first
    #[cfg(test)]
    pub fn header_hashes(&self) -> Vec<Vec<u8>> {
        let pending = self.pending.read();

        pending
            .order
            .iter()
            .filter(|(seq, hash)| pending.is_live(*seq, hash))
            .map(|(_, hash)| hash.clone())
            .collect()
    }

    #[cfg(test)]
    fn log_len(&self) -> usize {
        self.pending.read().order.len()
    }
}

impl BlockCache for PendingBlockStore {
    fn add(&self, block: OutportBlock) -> Result<(), Error> {
        let header_hash = block
            .header_hash()
            .ok_or(Error::InvalidOutportBlock)?
            .to_vec();

        let mut pending = self.pending.write();

        if pending.blocks.contains_key(&header_hash) {
            return Err(Error::BlockAlreadyExists(hex::encode(&header_hash)));
        }

        if let Some(capacity) = self.capacity {
            while pending.blocks.len() >= capacity {
                let Some(evicted) = pending.pop_oldest() else {
                    break;
                };

                let _entered = self.span.enter();
                debug!(hash = hex::encode(&evicted), "evicted pending block");
            }
        }

        pending.insert(header_hash, block);

        Ok(())
    }

    fn extract(&self, header_hash: &[u8]) -> Result<OutportBlock, Error> {
        self.pending
            .write()
            .remove(header_hash)
            .ok_or_else(|| Error::BlockNotFound(hex::encode(header_hash)))
    }
}
