use std::{collections::HashMap, sync::Arc};

use tracing::{Span, debug, info_span};

use crate::{
    data::{FinalizedBlock, OperationType, OutportBlock, PayloadData},
    error::Error,
    marshal::Marshaller,
    process::Indexer,
};

pub type HandlerFn<M> = fn(&PayloadRouter<M>, &[u8]) -> Result<(), Error>;

/// Decodes payloads and dispatches them to the indexer by operation type.
///
/// Only saved and finalized blocks matter here, every other operation the node sends is accepted
/// and dropped.
pub struct PayloadRouter<M> {
    indexer: Arc<dyn Indexer>,
    marshaller: M,
    handlers: HashMap<OperationType, HandlerFn<M>>,
    span: Span,
}

impl<M: Marshaller> PayloadRouter<M> {
    pub fn new(indexer: Arc<dyn Indexer>, marshaller: M) -> Self {
        let handlers: [(OperationType, HandlerFn<M>); 7] = [
            (OperationType::SaveBlock, Self::save_block),
            (OperationType::RevertIndexedBlock, Self::no_op),
            (OperationType::SaveRoundsInfo, Self::no_op),
            (OperationType::SaveValidatorsPubKeys, Self::no_op),
            (OperationType::SaveValidatorsRating, Self::no_op),
            (OperationType::SaveAccounts, Self::no_op),
            (OperationType::FinalizedBlock, Self::finalized_block),
        ];

        Self {
            indexer,
            marshaller,
            handlers: handlers.into_iter().collect(),
            span: info_span!("payload_router"),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn handler(&self, operation: OperationType) -> Option<HandlerFn<M>> {
        self.handlers.get(&operation).copied()
    }

    pub fn process_payload(&self, payload: &PayloadData) -> Result<(), Error> {
        let operation = OperationType::try_from(payload.operation_type)?;

        let handler = self
            .handler(operation)
            .ok_or(Error::UnknownOperation(payload.operation_type))?;

        {
            let _entered = self.span.enter();
            debug!(?operation, len = payload.payload.len(), "processing payload");
        }

        handler(self, &payload.payload)
    }

    fn save_block(&self, payload: &[u8]) -> Result<(), Error> {
        let block: OutportBlock = self.marshaller.unmarshal(payload)?;

        self.indexer.save_block(block)
    }

    fn finalized_block(&self, payload: &[u8]) -> Result<(), Error> {
        let block: FinalizedBlock = self.marshaller.unmarshal(payload)?;

        self.indexer.finalized_block(&block)
    }

    fn no_op(&self, _payload: &[u8]) -> Result<(), Error> {
        Ok(())
    }
}
