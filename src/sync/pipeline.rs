use std::{sync::Arc, time::Duration};

use crate::{config::Config, error::Error, factory, process::Notifier};

use super::stages::{process, receive};

const DEFAULT_STAGE_QUEUE_SIZE: usize = 20;
const DEFAULT_STAGE_TIMEOUT_SECS: u64 = 600;

fn gasket_policy(stage_timeout: u64) -> gasket::runtime::Policy {
    let default_retries = gasket::retries::Policy {
        max_retries: 20,
        backoff_unit: Duration::from_secs(1),
        backoff_factor: 2,
        max_backoff: Duration::from_secs(60),
        ..Default::default()
    };

    gasket::runtime::Policy {
        tick_timeout: Duration::from_secs(stage_timeout).into(),
        bootstrap_retry: default_retries.clone(),
        work_retry: default_retries.clone(),
        teardown_retry: default_retries,
    }
}

/// Builds the receive -> process pipeline publishing through `notifier`.
pub fn pipeline(
    config: &Config,
    notifier: Arc<dyn Notifier>,
) -> Result<gasket::daemon::Daemon, Error> {
    let marshaller = config.web_socket.marshaller_type;

    let router = factory::create_payload_router(
        notifier,
        config.notifier.block_cache_size,
        marshaller,
    )?;

    // create Receive stage for reading payloads off the observer websocket
    let mut receive = receive::Stage::new(config.web_socket.url.clone(), marshaller);

    // create Process stage for routing payloads to the indexer
    let mut process = process::Stage::new(router, marshaller, config.web_socket.halt_on_error);

    // connect stages

    let queue_size = config
        .web_socket
        .stage_queue_size
        .unwrap_or(DEFAULT_STAGE_QUEUE_SIZE);
    let stage_timeout = config
        .web_socket
        .stage_timeout_secs
        .unwrap_or(DEFAULT_STAGE_TIMEOUT_SECS);

    let (receive_to_process, process_from_receive) =
        gasket::messaging::tokio::mpsc_channel(queue_size);
    receive.downstream.connect(receive_to_process);
    process.upstream.connect(process_from_receive);

    // spawn stages

    let policy = gasket_policy(stage_timeout);

    let receive = gasket::runtime::spawn_stage(receive, policy.clone());
    let process = gasket::runtime::spawn_stage(process, policy);

    Ok(gasket::daemon::Daemon::new(vec![receive, process]))
}
