//! Closure driven stand-ins for the process traits.

use std::sync::Arc;

use crate::{
    data::{FinalizedBlock, IncomingHeader, OutportBlock, Transaction},
    error::Error,
    marshal::{Marshal, Marshaller, MarshallerKind},
    process::{
        BlockCache, HeaderSubscriber, Indexer, Notifier, SubscriberResult, TransactionSubscriber,
    },
    sharding::ShardCoordinator,
};

type Callback<A, R> = Option<Box<dyn Fn(A) -> R + Send + Sync>>;

#[derive(Default)]
pub struct HeaderSubscriberStub {
    pub add_header_called:
        Option<Box<dyn Fn(&[u8], &IncomingHeader) -> SubscriberResult + Send + Sync>>,
}

impl HeaderSubscriber for HeaderSubscriberStub {
    fn add_header(&self, header_hash: &[u8], header: &IncomingHeader) -> SubscriberResult {
        match &self.add_header_called {
            Some(f) => f(header_hash, header),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct TxSubscriberStub {
    pub add_data_called: Option<Box<dyn Fn(&[u8], &Transaction, usize, &str) + Send + Sync>>,
}

impl TransactionSubscriber for TxSubscriberStub {
    fn add_data(&self, key: &[u8], transaction: &Transaction, size: usize, cache_id: &str) {
        if let Some(f) = &self.add_data_called {
            f(key, transaction, size, cache_id)
        }
    }
}

#[derive(Default)]
pub struct IndexerStub {
    pub save_block_called: Callback<OutportBlock, Result<(), Error>>,
    pub finalized_block_called:
        Option<Box<dyn Fn(&FinalizedBlock) -> Result<(), Error> + Send + Sync>>,
}

impl Indexer for IndexerStub {
    fn save_block(&self, block: OutportBlock) -> Result<(), Error> {
        match &self.save_block_called {
            Some(f) => f(block),
            None => Ok(()),
        }
    }

    fn finalized_block(&self, block: &FinalizedBlock) -> Result<(), Error> {
        match &self.finalized_block_called {
            Some(f) => f(block),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct NotifierStub {
    pub notify_called: Option<Box<dyn Fn(&OutportBlock) -> Result<(), Error> + Send + Sync>>,
    pub register_header_subscriber_called: Callback<Arc<dyn HeaderSubscriber>, Result<(), Error>>,
    pub register_tx_subscriber_called: Callback<Arc<dyn TransactionSubscriber>, Result<(), Error>>,
}

impl Notifier for NotifierStub {
    fn notify(&self, block: &OutportBlock) -> Result<(), Error> {
        match &self.notify_called {
            Some(f) => f(block),
            None => Ok(()),
        }
    }

    fn register_header_subscriber(
        &self,
        subscriber: Arc<dyn HeaderSubscriber>,
    ) -> Result<(), Error> {
        match &self.register_header_subscriber_called {
            Some(f) => f(subscriber),
            None => Ok(()),
        }
    }

    fn register_tx_subscriber(
        &self,
        subscriber: Arc<dyn TransactionSubscriber>,
    ) -> Result<(), Error> {
        match &self.register_tx_subscriber_called {
            Some(f) => f(subscriber),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct BlockCacheStub {
    pub add_called: Callback<OutportBlock, Result<(), Error>>,
    pub extract_called: Option<Box<dyn Fn(&[u8]) -> Result<OutportBlock, Error> + Send + Sync>>,
}

impl BlockCache for BlockCacheStub {
    fn add(&self, block: OutportBlock) -> Result<(), Error> {
        match &self.add_called {
            Some(f) => f(block),
            None => Ok(()),
        }
    }

    fn extract(&self, header_hash: &[u8]) -> Result<OutportBlock, Error> {
        match &self.extract_called {
            Some(f) => f(header_hash),
            None => Ok(OutportBlock::default()),
        }
    }
}

#[derive(Default)]
pub struct ShardCoordinatorStub {
    pub compute_id_called: Option<Box<dyn Fn(&[u8]) -> u32 + Send + Sync>>,
    pub number_of_shards: u32,
}

impl ShardCoordinator for ShardCoordinatorStub {
    fn compute_id(&self, address: &[u8]) -> u32 {
        match &self.compute_id_called {
            Some(f) => f(address),
            None => 0,
        }
    }

    fn number_of_shards(&self) -> u32 {
        self.number_of_shards
    }
}

/// Delegates to a real marshaller unless told to fail.
#[derive(Debug, Default, Clone)]
pub struct MarshallerStub {
    pub inner: MarshallerKind,
    pub marshal_error: Option<String>,
    pub unmarshal_error: Option<String>,
}

impl Marshaller for MarshallerStub {
    fn marshal<T: Marshal>(&self, obj: &T) -> Result<Vec<u8>, Error> {
        match &self.marshal_error {
            Some(msg) => Err(Error::Custom(msg.clone())),
            None => self.inner.marshal(obj),
        }
    }

    fn unmarshal<T: Marshal>(&self, bytes: &[u8]) -> Result<T, Error> {
        match &self.unmarshal_error {
            Some(msg) => Err(Error::Custom(msg.clone())),
            None => self.inner.unmarshal(bytes),
        }
    }
}
