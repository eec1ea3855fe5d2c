use gasket::framework::*;
use tracing::{debug, error, warn};

use crate::{
    data::{FinalizedBlock, OperationType, PayloadData},
    marshal::{Marshaller, MarshallerKind},
    process::PayloadRouter,
};

/*
    Process Stage

    Feeds every payload received upstream through the payload router: saved blocks go into the
    pending block store, finalized blocks come out of it and get published by the notifier. A
    payload that fails is logged and skipped, unless configured to halt.
*/

pub type UpstreamPort = gasket::messaging::InputPort<PayloadData>;

#[derive(Stage)]
#[stage(name = "process", unit = "PayloadData", worker = "Worker")]
pub struct Stage {
    router: PayloadRouter<MarshallerKind>,
    marshaller: MarshallerKind,
    halt_on_error: bool,

    pub upstream: UpstreamPort,
}

impl Stage {
    pub fn new(
        router: PayloadRouter<MarshallerKind>,
        marshaller: MarshallerKind,
        halt_on_error: bool,
    ) -> Self {
        Self {
            router,
            marshaller,
            halt_on_error,
            upstream: Default::default(),
        }
    }

    /// Hex hash of the block a finalization payload refers to, for diagnostics
    fn finalized_hash(&self, payload: &PayloadData) -> Option<String> {
        if payload.operation_type != OperationType::FinalizedBlock as u32 {
            return None;
        }

        self.marshaller
            .unmarshal::<FinalizedBlock>(&payload.payload)
            .ok()
            .map(|x| hex::encode(x.header_hash))
    }
}

#[derive(Default)]
pub struct Worker {
    processed: u64,
    failed: u64,
}

#[async_trait::async_trait(?Send)]
impl gasket::framework::Worker<Stage> for Worker {
    async fn bootstrap(_stage: &Stage) -> Result<Self, WorkerError> {
        Ok(Worker::default())
    }

    async fn schedule(
        &mut self,
        stage: &mut Stage,
    ) -> Result<WorkSchedule<PayloadData>, WorkerError> {
        let payload = stage.upstream.recv().await.or_panic()?.payload;

        Ok(WorkSchedule::Unit(payload))
    }

    async fn execute(&mut self, unit: &PayloadData, stage: &mut Stage) -> Result<(), WorkerError> {
        match stage.router.process_payload(unit) {
            Ok(()) => {
                self.processed += 1;

                debug!(
                    operation = unit.operation_type,
                    processed = self.processed,
                    "processed payload"
                );

                Ok(())
            }
            Err(err) => {
                self.failed += 1;

                let hash = stage.finalized_hash(unit);

                if stage.halt_on_error {
                    error!(operation = unit.operation_type, hash, %err, "payload failed, halting");
                    return Err(WorkerError::Panic);
                }

                warn!(
                    operation = unit.operation_type,
                    hash,
                    %err,
                    failed = self.failed,
                    "payload failed, skipping"
                );

                Ok(())
            }
        }
    }

    async fn teardown(&mut self) -> Result<(), WorkerError> {
        debug!(
            processed = self.processed,
            failed = self.failed,
            "process stage stopped"
        );

        Ok(())
    }
}
