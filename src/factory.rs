//! Wiring of the process components from configuration.

use std::sync::Arc;

use tracing::info_span;

use crate::{
    address::{AddressDecoder, HexAddressDecoder},
    config::{NotifierConfig, SubscribedEventConfig},
    error::Error,
    marshal::MarshallerKind,
    process::{
        BlockCache, DataIndexer, Notifier, PayloadRouter, PendingBlockStore, SovereignNotifier,
        SubscribedEvent,
    },
    sharding::MultiShardCoordinator,
};

/// Builds the notifier, watching either addresses or events depending on which the
/// configuration lists.
pub fn create_sovereign_notifier(
    config: &NotifierConfig,
    marshaller: MarshallerKind,
) -> Result<SovereignNotifier<MarshallerKind>, Error> {
    let decoder = HexAddressDecoder::default();

    let mut builder = SovereignNotifier::builder()
        .marshaller(marshaller)
        .hasher(config.hasher_type.hasher())
        .span(info_span!("sovereign_notifier"));

    if !config.subscribed_addresses.is_empty() {
        let addresses = config
            .subscribed_addresses
            .iter()
            .map(|x| decoder.decode(x))
            .collect::<Result<Vec<_>, _>>()?;

        let shard_coordinator = MultiShardCoordinator::new(config.num_main_shards)?;

        builder = builder
            .shard_coordinator(Arc::new(shard_coordinator))
            .subscribed_addresses(addresses);
    }

    if !config.subscribed_events.is_empty() {
        builder = builder.subscribed_events(subscribed_events(&decoder, &config.subscribed_events)?);
    }

    builder.build()
}

fn subscribed_events(
    decoder: &dyn AddressDecoder,
    events: &[SubscribedEventConfig],
) -> Result<Vec<SubscribedEvent>, Error> {
    events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let addresses = event
                .addresses
                .iter()
                .map(|encoded| Ok((decoder.decode(encoded)?, encoded.clone())))
                .collect::<Result<Vec<_>, Error>>()
                .map_err(|e| e.for_event(index))?;

            Ok(SubscribedEvent {
                identifier: event.identifier.as_bytes().to_vec(),
                addresses,
            })
        })
        .collect()
}

pub fn create_block_cache(size: Option<usize>) -> Result<PendingBlockStore, Error> {
    match size {
        Some(size) => PendingBlockStore::with_capacity(size),
        None => Ok(PendingBlockStore::unbounded()),
    }
}

/// Builds the payload router feeding `notifier` through a pending block store.
///
/// The store and indexer log inside child spans of the router span, so every line a payload
/// produces carries the marshaller it was decoded with.
pub fn create_payload_router(
    notifier: Arc<dyn Notifier>,
    block_cache_size: Option<usize>,
    marshaller: MarshallerKind,
) -> Result<PayloadRouter<MarshallerKind>, Error> {
    let span = info_span!("payload_router", ?marshaller);

    let cache = create_block_cache(block_cache_size)?.with_span(info_span!(
        parent: &span,
        "pending_block_store",
        capacity = ?block_cache_size
    ));
    let cache: Arc<dyn BlockCache> = Arc::new(cache);

    let indexer =
        DataIndexer::new(notifier, cache).with_span(info_span!(parent: &span, "data_indexer"));

    Ok(PayloadRouter::new(Arc::new(indexer), marshaller).with_span(span))
}
