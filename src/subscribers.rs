//! Subscribers that report what the notifier publishes to the log.

use tracing::{Span, debug, info, info_span};

use crate::{
    data::{IncomingHeader, Transaction},
    process::{HeaderSubscriber, SubscriberResult, TransactionSubscriber},
};

pub struct LoggingHeaderSubscriber {
    span: Span,
}

impl LoggingHeaderSubscriber {
    pub fn new() -> Self {
        Self {
            span: info_span!("header_subscriber"),
        }
    }
}

impl Default for LoggingHeaderSubscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderSubscriber for LoggingHeaderSubscriber {
    fn add_header(&self, header_hash: &[u8], header: &IncomingHeader) -> SubscriberResult {
        let _entered = self.span.enter();

        let txs: usize = header
            .incoming_mini_blocks
            .iter()
            .map(|x| x.tx_hashes.len())
            .sum();

        info!(
            hash = hex::encode(header_hash),
            nonce = header.header.nonce,
            round = header.header.round,
            mini_blocks = header.incoming_mini_blocks.len(),
            txs,
            events = header.incoming_events.len(),
            "received incoming header"
        );

        Ok(())
    }
}

pub struct LoggingTxSubscriber {
    span: Span,
}

impl LoggingTxSubscriber {
    pub fn new() -> Self {
        Self {
            span: info_span!("tx_subscriber"),
        }
    }
}

impl Default for LoggingTxSubscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionSubscriber for LoggingTxSubscriber {
    fn add_data(&self, key: &[u8], transaction: &Transaction, size: usize, cache_id: &str) {
        let _entered = self.span.enter();

        debug!(
            hash = hex::encode(key),
            nonce = transaction.nonce,
            size,
            cache_id,
            "received incoming transaction"
        );
    }
}
