mod block_cache;
mod data_indexer;
mod payload_router;

pub use block_cache::{BlockCache, PendingBlockStore};
pub use data_indexer::DataIndexer;
pub use payload_router::{HandlerFn, PayloadRouter};
