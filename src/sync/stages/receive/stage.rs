use futures_util::StreamExt;
use gasket::framework::*;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use crate::{
    data::PayloadData,
    error::Error,
    marshal::{Marshaller, MarshallerKind},
};

/*
    Receive Stage

    Responsible for holding the websocket connection to the observer node, turning every frame it
    pushes into a payload and passing it downstream to the process stage. There is no
    acknowledgement protocol, a dropped connection is re-established through the retry policy.
*/

pub type DownstreamPort = gasket::messaging::OutputPort<PayloadData>;

#[derive(Stage)]
#[stage(name = "receive", unit = "PayloadData", worker = "Worker")]
pub struct Stage {
    url: String,
    marshaller: MarshallerKind,

    pub downstream: DownstreamPort,
}

impl Stage {
    pub fn new(url: String, marshaller: MarshallerKind) -> Self {
        Self {
            url,
            marshaller,
            downstream: Default::default(),
        }
    }
}

/// Payload carried by a data frame, `None` for control frames.
pub fn decode_frame(
    marshaller: &MarshallerKind,
    frame: &Message,
) -> Option<Result<PayloadData, Error>> {
    let bytes = match frame {
        Message::Binary(bytes) => bytes.as_ref(),
        Message::Text(text) => text.as_bytes(),
        _ => return None,
    };

    Some(marshaller.unmarshal(bytes))
}

pub struct Worker {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
    received: u64,
}

#[async_trait::async_trait(?Send)]
impl gasket::framework::Worker<Stage> for Worker {
    async fn bootstrap(stage: &Stage) -> Result<Self, WorkerError> {
        info!("connecting to observer {}...", stage.url);

        let (socket, _) = connect_async(stage.url.as_str()).await.or_retry()?;

        info!(url = stage.url, marshaller = ?stage.marshaller, "connected to observer");

        Ok(Worker {
            socket,
            received: 0,
        })
    }

    async fn schedule(
        &mut self,
        stage: &mut Stage,
    ) -> Result<WorkSchedule<PayloadData>, WorkerError> {
        let frame = match self.socket.next().await {
            Some(Ok(frame)) => frame,
            Some(Err(err)) => {
                warn!(%err, "websocket read failed, reconnecting");
                return Err(WorkerError::Restart);
            }
            None => {
                warn!("websocket stream ended, reconnecting");
                return Err(WorkerError::Restart);
            }
        };

        if let Message::Close(reason) = &frame {
            info!(?reason, "observer closed the connection, reconnecting");
            return Err(WorkerError::Restart);
        }

        match decode_frame(&stage.marshaller, &frame) {
            Some(Ok(payload)) => Ok(WorkSchedule::Unit(payload)),
            Some(Err(err)) => {
                warn!(%err, len = frame.len(), "dropping malformed frame");
                Ok(WorkSchedule::Idle)
            }
            None => Ok(WorkSchedule::Idle),
        }
    }

    async fn execute(&mut self, unit: &PayloadData, stage: &mut Stage) -> Result<(), WorkerError> {
        self.received += 1;

        debug!(
            operation = unit.operation_type,
            len = unit.payload.len(),
            received = self.received,
            "received payload"
        );

        stage.downstream.send(unit.clone().into()).await.or_panic()?;

        Ok(())
    }

    async fn teardown(&mut self) -> Result<(), WorkerError> {
        // the peer may already be gone, nothing to do about a failed close
        let _ = self.socket.close(None).await;

        Ok(())
    }
}
