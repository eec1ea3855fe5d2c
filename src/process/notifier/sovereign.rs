use std::{collections::BTreeMap, fmt, sync::Arc};

use tracing::{Span, debug, info, info_span};

use crate::{
    codec::Encode,
    data::{
        BlockData, HeaderV2, IncomingEvent, IncomingHeader, MAIN_CHAIN_SHARD_ID, MiniBlock,
        MiniBlockType, OutportBlock, SHARD_HEADER_V2, SOVEREIGN_CHAIN_SHARD_ID, TransactionPool,
    },
    error::Error,
    hashing::{Hasher, calculate_hash},
    marshal::Marshaller,
    process::{HeaderSubscriber, Notifier, TransactionSubscriber},
    sharding::ShardCoordinator,
};

use super::{
    IncomingTransaction, Registry, SubscribedEvent, WatchedAddressSet, WatchedEventSet,
    order_incoming_transactions,
};

/// What a notifier looks for in finalized blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchMode {
    /// Transactions sent to watched addresses
    Addresses,
    /// Log events with a watched identifier emitted by a watched address
    Events,
}

impl fmt::Display for WatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Addresses => write!(f, "addresses"),
            Self::Events => write!(f, "events"),
        }
    }
}

enum Matcher {
    Addresses {
        watched: WatchedAddressSet,
        shard_coordinator: Arc<dyn ShardCoordinator>,
    },
    Events(WatchedEventSet),
}

/// Turns finalized main chain blocks into incoming headers for the sovereign chain.
///
/// Each notification matches the block against the watch set, orders what matched, hashes the
/// resulting [`IncomingHeader`] and hands it to every header subscriber. When watching addresses
/// the matched transactions are then handed to every transaction subscriber as well.
pub struct SovereignNotifier<M> {
    marshaller: M,
    hasher: Arc<dyn Hasher>,
    matcher: Matcher,
    header_subscribers: Registry<dyn HeaderSubscriber>,
    tx_subscribers: Registry<dyn TransactionSubscriber>,
    span: Span,
}

impl<M: fmt::Debug> fmt::Debug for SovereignNotifier<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (mode, watched) = match &self.matcher {
            Matcher::Addresses { watched, .. } => (WatchMode::Addresses, watched.len()),
            Matcher::Events(watched) => (WatchMode::Events, watched.len()),
        };

        f.debug_struct("SovereignNotifier")
            .field("marshaller", &self.marshaller)
            .field("mode", &mode)
            .field("watched", &watched)
            .field("header_subscribers", &self.header_subscribers.len())
            .field("tx_subscribers", &self.tx_subscribers.len())
            .finish()
    }
}

pub struct SovereignNotifierBuilder<M> {
    marshaller: Option<M>,
    hasher: Option<Arc<dyn Hasher>>,
    shard_coordinator: Option<Arc<dyn ShardCoordinator>>,
    subscribed_addresses: Option<Vec<Vec<u8>>>,
    subscribed_events: Option<Vec<SubscribedEvent>>,
    span: Option<Span>,
}

impl<M> Default for SovereignNotifierBuilder<M> {
    fn default() -> Self {
        Self {
            marshaller: None,
            hasher: None,
            shard_coordinator: None,
            subscribed_addresses: None,
            subscribed_events: None,
            span: None,
        }
    }
}

impl<M: Marshaller> SovereignNotifierBuilder<M> {
    pub fn marshaller(mut self, marshaller: M) -> Self {
        self.marshaller = Some(marshaller);
        self
    }

    pub fn hasher(mut self, hasher: Arc<dyn Hasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    pub fn shard_coordinator(mut self, shard_coordinator: Arc<dyn ShardCoordinator>) -> Self {
        self.shard_coordinator = Some(shard_coordinator);
        self
    }

    pub fn subscribed_addresses(mut self, addresses: Vec<Vec<u8>>) -> Self {
        self.subscribed_addresses = Some(addresses);
        self
    }

    pub fn subscribed_events(mut self, events: Vec<SubscribedEvent>) -> Self {
        self.subscribed_events = Some(events);
        self
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn build(self) -> Result<SovereignNotifier<M>, Error> {
        let marshaller = self
            .marshaller
            .ok_or(Error::MissingCollaborator("marshaller"))?;

        let hasher = self.hasher.ok_or(Error::MissingCollaborator("hasher"))?;

        let matcher = match (self.subscribed_addresses, self.subscribed_events) {
            (Some(_), Some(_)) => return Err(Error::AmbiguousWatchMode),
            (None, None) => return Err(Error::NoSubscribedAddresses),
            (Some(addresses), None) => {
                let shard_coordinator = self
                    .shard_coordinator
                    .ok_or(Error::MissingCollaborator("shard coordinator"))?;

                Matcher::Addresses {
                    watched: WatchedAddressSet::new(addresses)?,
                    shard_coordinator,
                }
            }
            (None, Some(events)) => Matcher::Events(WatchedEventSet::new(events)?),
        };

        Ok(SovereignNotifier {
            marshaller,
            hasher,
            matcher,
            header_subscribers: Registry::default(),
            tx_subscribers: Registry::default(),
            span: self.span.unwrap_or_else(|| info_span!("sovereign_notifier")),
        })
    }
}

impl<M: Marshaller> SovereignNotifier<M> {
    pub fn builder() -> SovereignNotifierBuilder<M> {
        SovereignNotifierBuilder::default()
    }

    pub fn watch_mode(&self) -> WatchMode {
        match self.matcher {
            Matcher::Addresses { .. } => WatchMode::Addresses,
            Matcher::Events(_) => WatchMode::Events,
        }
    }

    /// Number of watched addresses or watched events
    pub fn watched_count(&self) -> usize {
        match &self.matcher {
            Matcher::Addresses { watched, .. } => watched.len(),
            Matcher::Events(watched) => watched.len(),
        }
    }

    pub fn header_subscriber_count(&self) -> usize {
        self.header_subscribers.len()
    }

    pub fn tx_subscriber_count(&self) -> usize {
        self.tx_subscribers.len()
    }

    fn decode_header(&self, block_data: &BlockData) -> Result<HeaderV2, Error> {
        if block_data.header_type != SHARD_HEADER_V2 {
            return Err(Error::UnsupportedHeaderType {
                received: block_data.header_type.clone(),
                expected: SHARD_HEADER_V2,
            });
        }

        self.marshaller.unmarshal(&block_data.header_bytes)
    }

    fn notify_tx_subscribers(&self, groups: &BTreeMap<u32, Vec<IncomingTransaction>>) {
        let cache_id = format!("{MAIN_CHAIN_SHARD_ID}_{SOVEREIGN_CHAIN_SHARD_ID}");

        self.tx_subscribers.for_each(|subscriber| {
            for tx in groups.values().flatten() {
                subscriber.add_data(
                    &tx.hash,
                    &tx.transaction,
                    tx.transaction.encode().len(),
                    &cache_id,
                );
            }
        });
    }
}

fn incoming_transactions(
    pool: &TransactionPool,
    watched: &WatchedAddressSet,
    shard_coordinator: &dyn ShardCoordinator,
) -> Result<BTreeMap<u32, Vec<IncomingTransaction>>, Error> {
    let mut matched = vec![];

    for (hash, info) in &pool.transactions {
        if !watched.contains(&info.transaction.rcv_addr) {
            continue;
        }

        let decoded = hex::decode(hash).map_err(|source| Error::InvalidTxHash {
            hash: hash.clone(),
            source,
        })?;

        matched.push(IncomingTransaction {
            hash: decoded,
            transaction: info.transaction.clone(),
            sender_shard_id: shard_coordinator.compute_id(&info.transaction.snd_addr),
            execution_order: info.execution_order,
        });
    }

    Ok(order_incoming_transactions(matched))
}

fn incoming_events(pool: &TransactionPool, watched: &WatchedEventSet) -> Vec<IncomingEvent> {
    pool.logs
        .iter()
        .flat_map(|log_data| {
            log_data
                .log
                .events
                .iter()
                .filter(|event| watched.matches(&event.identifier, &event.address))
                .map(|event| IncomingEvent {
                    tx_hash: log_data.tx_hash.clone(),
                    event: event.clone(),
                })
        })
        .collect()
}

fn incoming_mini_blocks(groups: &BTreeMap<u32, Vec<IncomingTransaction>>) -> Vec<MiniBlock> {
    groups
        .iter()
        .map(|(shard, txs)| MiniBlock {
            tx_hashes: txs.iter().map(|tx| tx.hash.clone()).collect(),
            receiver_shard_id: SOVEREIGN_CHAIN_SHARD_ID,
            sender_shard_id: MAIN_CHAIN_SHARD_ID,
            kind: MiniBlockType::TxBlock,
            reserved: shard.to_string().into_bytes(),
        })
        .collect()
}

impl<M: Marshaller> Notifier for SovereignNotifier<M> {
    fn notify(&self, block: &OutportBlock) -> Result<(), Error> {
        let _entered = self.span.enter();

        let pool = block
            .transaction_pool
            .as_ref()
            .ok_or(Error::MissingTransactionPool)?;

        let block_data = block.block_data.as_ref().ok_or(Error::MissingBlockData)?;

        let header = self.decode_header(block_data)?;

        let (incoming_header, groups) = match &self.matcher {
            Matcher::Addresses {
                watched,
                shard_coordinator,
            } => {
                let groups = incoming_transactions(pool, watched, shard_coordinator.as_ref())?;

                let incoming_header = IncomingHeader {
                    header,
                    incoming_mini_blocks: incoming_mini_blocks(&groups),
                    incoming_events: vec![],
                };

                (incoming_header, Some(groups))
            }
            Matcher::Events(watched) => {
                let incoming_header = IncomingHeader {
                    header,
                    incoming_mini_blocks: vec![],
                    incoming_events: incoming_events(pool, watched),
                };

                (incoming_header, None)
            }
        };

        let hash = calculate_hash(&self.marshaller, self.hasher.as_ref(), &incoming_header)?;

        info!(
            hash = hex::encode(&hash),
            nonce = incoming_header.header.nonce,
            mini_blocks = incoming_header.incoming_mini_blocks.len(),
            events = incoming_header.incoming_events.len(),
            "notifying incoming header"
        );

        self.header_subscribers.try_for_each(|subscriber| {
            subscriber
                .add_header(&hash, &incoming_header)
                .map_err(Error::SubscriberRejected)
        })?;

        if let Some(groups) = groups {
            self.notify_tx_subscribers(&groups);
        }

        Ok(())
    }

    fn register_header_subscriber(
        &self,
        subscriber: Arc<dyn HeaderSubscriber>,
    ) -> Result<(), Error> {
        self.header_subscribers.register(subscriber);

        let _entered = self.span.enter();
        debug!(total = self.header_subscribers.len(), "registered header subscriber");

        Ok(())
    }

    fn register_tx_subscriber(
        &self,
        subscriber: Arc<dyn TransactionSubscriber>,
    ) -> Result<(), Error> {
        if self.watch_mode() == WatchMode::Events {
            return Err(Error::TxSubscribersUnsupported);
        }

        self.tx_subscribers.register(subscriber);

        let _entered = self.span.enter();
        debug!(total = self.tx_subscribers.len(), "registered transaction subscriber");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use indexmap::IndexMap;
    use parking_lot::Mutex;

    use super::*;
    use crate::{
        data::{Event, Log, LogData, Transaction, TxInfo},
        hashing::HasherKind,
        marshal::MarshallerKind,
        testscommon::{
            HeaderSubscriberStub, MarshallerStub, ShardCoordinatorStub, TxSubscriberStub,
        },
    };

    const ADDR1: [u8; 32] = [1; 32];
    const ADDR2: [u8; 32] = [2; 32];
    const ADDR3: [u8; 32] = [3; 32];

    /// Sender shard is the last byte of the sender address.
    fn shard_coordinator() -> Arc<dyn ShardCoordinator> {
        Arc::new(ShardCoordinatorStub {
            compute_id_called: Some(Box::new(|address| {
                address.last().copied().unwrap_or_default() as u32
            })),
            number_of_shards: 2,
        })
    }

    fn header() -> HeaderV2 {
        HeaderV2 {
            nonce: 42,
            round: 43,
            shard_id: 1,
            prev_hash: vec![0xab; 32],
            chain_id: b"1".to_vec(),
            ..Default::default()
        }
    }

    fn tx(receiver: [u8; 32], sender_shard: u8, nonce: u64) -> Transaction {
        Transaction {
            nonce,
            value: "1000".to_string(),
            rcv_addr: receiver.to_vec(),
            snd_addr: vec![0, sender_shard],
            gas_limit: 50_000,
            ..Default::default()
        }
    }

    fn block(pool: TransactionPool) -> OutportBlock {
        OutportBlock {
            shard_id: 1,
            block_data: Some(BlockData {
                shard_id: 1,
                header_hash: vec![0xcc; 32],
                header_bytes: MarshallerKind::Json.marshal(&header()).unwrap(),
                header_type: SHARD_HEADER_V2.to_string(),
            }),
            transaction_pool: Some(pool),
            number_of_shards: 2,
        }
    }

    /// Receivers `[addr1, addr1, addr2, addr3, addr1, addr1]`, execution orders
    /// `[3, 1, 2, 0, 0, 3]`, senders alternating between shards 1 and 0.
    fn six_tx_pool() -> TransactionPool {
        let receivers = [ADDR1, ADDR1, ADDR2, ADDR3, ADDR1, ADDR1];
        let orders = [3, 1, 2, 0, 0, 3];

        let transactions: IndexMap<String, TxInfo> = receivers
            .iter()
            .zip(orders)
            .enumerate()
            .map(|(i, (receiver, execution_order))| {
                let info = TxInfo {
                    transaction: tx(*receiver, (i % 2 == 0) as u8, i as u64),
                    execution_order,
                };
                (hex::encode([i as u8 + 0xa0]), info)
            })
            .collect();

        TransactionPool {
            transactions,
            logs: vec![],
        }
    }

    fn address_notifier() -> SovereignNotifier<MarshallerKind> {
        SovereignNotifier::builder()
            .marshaller(MarshallerKind::Json)
            .hasher(HasherKind::Sha256.hasher())
            .shard_coordinator(shard_coordinator())
            .subscribed_addresses(vec![ADDR1.to_vec(), ADDR2.to_vec()])
            .build()
            .unwrap()
    }

    fn deposit_event(address: [u8; 32], identifier: &str) -> Event {
        Event {
            address: address.to_vec(),
            identifier: identifier.as_bytes().to_vec(),
            topics: vec![b"topic".to_vec()],
            ..Default::default()
        }
    }

    fn event_notifier() -> SovereignNotifier<MarshallerKind> {
        SovereignNotifier::builder()
            .marshaller(MarshallerKind::Json)
            .hasher(HasherKind::Sha256.hasher())
            .subscribed_events(vec![SubscribedEvent {
                identifier: b"deposit".to_vec(),
                addresses: vec![(ADDR1.to_vec(), hex::encode(ADDR1))],
            }])
            .build()
            .unwrap()
    }

    type Published = Arc<Mutex<Vec<(Vec<u8>, IncomingHeader)>>>;

    fn recording_subscriber(published: &Published) -> Arc<HeaderSubscriberStub> {
        let published = published.clone();

        Arc::new(HeaderSubscriberStub {
            add_header_called: Some(Box::new(move |hash, header| {
                published.lock().push((hash.to_vec(), header.clone()));
                Ok(())
            })),
        })
    }

    #[test]
    fn six_transaction_scenario() {
        let notifier = address_notifier();

        let first: Published = Default::default();
        let second: Published = Default::default();
        notifier
            .register_header_subscriber(recording_subscriber(&first))
            .unwrap();
        notifier
            .register_header_subscriber(recording_subscriber(&second))
            .unwrap();

        let delivered = Arc::new(Mutex::new(vec![]));
        let sink = delivered.clone();
        notifier
            .register_tx_subscriber(Arc::new(TxSubscriberStub {
                add_data_called: Some(Box::new(move |key, tx, size, cache_id| {
                    assert_eq!(size, tx.encode().len());
                    assert_eq!(cache_id, "4294967280_0");
                    sink.lock().push(key.to_vec());
                })),
            }))
            .unwrap();

        notifier.notify(&block(six_tx_pool())).unwrap();

        let first = first.lock();
        assert_eq!(first.len(), 1);
        assert_eq!(*first, *second.lock());

        let (hash, incoming) = &first[0];
        assert_eq!(hash.len(), 32);
        assert_eq!(incoming.header, header());
        assert!(incoming.incoming_events.is_empty());

        // tx 3 (addr3) is dropped; shard 0 holds txs 1, 5 and shard 1 holds txs 0, 2, 4
        let mini_blocks = &incoming.incoming_mini_blocks;
        assert_eq!(mini_blocks.len(), 2);

        assert_eq!(mini_blocks[0].reserved, b"0".to_vec());
        assert_eq!(mini_blocks[0].tx_hashes, vec![vec![0xa1], vec![0xa5]]);

        assert_eq!(mini_blocks[1].reserved, b"1".to_vec());
        assert_eq!(
            mini_blocks[1].tx_hashes,
            vec![vec![0xa4], vec![0xa2], vec![0xa0]]
        );

        for mini_block in mini_blocks {
            assert_eq!(mini_block.sender_shard_id, MAIN_CHAIN_SHARD_ID);
            assert_eq!(mini_block.receiver_shard_id, SOVEREIGN_CHAIN_SHARD_ID);
            assert_eq!(mini_block.kind, MiniBlockType::TxBlock);
        }

        assert_eq!(
            *delivered.lock(),
            vec![vec![0xa1], vec![0xa5], vec![0xa4], vec![0xa2], vec![0xa0]]
        );
    }

    #[test]
    fn hash_is_stable_and_matches_marshalled_header() {
        let notifier = address_notifier();

        let published: Published = Default::default();
        notifier
            .register_header_subscriber(recording_subscriber(&published))
            .unwrap();

        notifier.notify(&block(six_tx_pool())).unwrap();
        notifier.notify(&block(six_tx_pool())).unwrap();

        let published = published.lock();
        assert_eq!(published[0], published[1]);

        let (hash, incoming) = &published[0];
        let expected = calculate_hash(
            &MarshallerKind::Json,
            HasherKind::Sha256.hasher().as_ref(),
            incoming,
        )
        .unwrap();
        assert_eq!(*hash, expected);
    }

    #[test]
    fn no_match_still_publishes_header() {
        let notifier = address_notifier();

        let published: Published = Default::default();
        notifier
            .register_header_subscriber(recording_subscriber(&published))
            .unwrap();

        notifier.notify(&block(TransactionPool::default())).unwrap();

        let published = published.lock();
        assert_eq!(published.len(), 1);
        assert!(published[0].1.incoming_mini_blocks.is_empty());
    }

    #[test]
    fn missing_sections_are_rejected() {
        let notifier = address_notifier();

        let mut no_pool = block(TransactionPool::default());
        no_pool.transaction_pool = None;
        assert!(matches!(
            notifier.notify(&no_pool),
            Err(Error::MissingTransactionPool)
        ));

        let mut no_data = block(TransactionPool::default());
        no_data.block_data = None;
        assert!(matches!(
            notifier.notify(&no_data),
            Err(Error::MissingBlockData)
        ));

        // the pool is checked first
        assert!(matches!(
            notifier.notify(&OutportBlock::default()),
            Err(Error::MissingTransactionPool)
        ));
    }

    #[test]
    fn unsupported_header_type() {
        let notifier = address_notifier();

        let mut outport = block(TransactionPool::default());
        if let Some(data) = outport.block_data.as_mut() {
            data.header_type = "MetaBlock".to_string();
        }

        let err = notifier.notify(&outport).unwrap_err();

        assert!(matches!(
            err,
            Error::UnsupportedHeaderType { ref received, expected }
                if received == "MetaBlock" && expected == SHARD_HEADER_V2
        ));
    }

    #[test]
    fn malformed_header_bytes() {
        let notifier = address_notifier();

        let mut outport = block(TransactionPool::default());
        if let Some(data) = outport.block_data.as_mut() {
            data.header_bytes = b"{".to_vec();
        }

        assert!(matches!(notifier.notify(&outport), Err(Error::Json(_))));
    }

    #[test]
    fn invalid_tx_hash_names_the_key() {
        let notifier = address_notifier();

        let mut pool = TransactionPool::default();
        pool.transactions.insert(
            "zz".to_string(),
            TxInfo {
                transaction: tx(ADDR1, 0, 0),
                execution_order: 0,
            },
        );

        let err = notifier.notify(&block(pool)).unwrap_err();

        assert!(matches!(err, Error::InvalidTxHash { ref hash, .. } if hash == "zz"));
    }

    #[test]
    fn marshal_failure_is_returned() {
        let notifier = SovereignNotifier::builder()
            .marshaller(MarshallerStub {
                marshal_error: Some("cannot marshal".to_string()),
                ..Default::default()
            })
            .hasher(HasherKind::Sha256.hasher())
            .shard_coordinator(shard_coordinator())
            .subscribed_addresses(vec![ADDR1.to_vec()])
            .build()
            .unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        notifier
            .register_header_subscriber(Arc::new(HeaderSubscriberStub {
                add_header_called: Some(Box::new(move |_, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })),
            }))
            .unwrap();

        assert!(matches!(
            notifier.notify(&block(six_tx_pool())),
            Err(Error::Custom(_))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn fan_out_stops_at_first_rejection() {
        let notifier = address_notifier();

        let calls = Arc::new(AtomicUsize::new(0));

        let rejecting = calls.clone();
        notifier
            .register_header_subscriber(Arc::new(HeaderSubscriberStub {
                add_header_called: Some(Box::new(move |_, _| {
                    rejecting.fetch_add(1, Ordering::SeqCst);
                    Err("subscriber is full".into())
                })),
            }))
            .unwrap();

        let after = calls.clone();
        notifier
            .register_header_subscriber(Arc::new(HeaderSubscriberStub {
                add_header_called: Some(Box::new(move |_, _| {
                    after.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })),
            }))
            .unwrap();

        let tx_calls = Arc::new(AtomicUsize::new(0));
        let tx_counter = tx_calls.clone();
        notifier
            .register_tx_subscriber(Arc::new(TxSubscriberStub {
                add_data_called: Some(Box::new(move |_, _, _, _| {
                    tx_counter.fetch_add(1, Ordering::SeqCst);
                })),
            }))
            .unwrap();

        let err = notifier.notify(&block(six_tx_pool())).unwrap_err();

        assert!(matches!(err, Error::SubscriberRejected(_)));
        assert_eq!(err.to_string(), "subscriber is full");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(tx_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn event_mode_keeps_log_order() {
        let notifier = event_notifier();

        let published: Published = Default::default();
        notifier
            .register_header_subscriber(recording_subscriber(&published))
            .unwrap();

        let pool = TransactionPool {
            transactions: IndexMap::new(),
            logs: vec![
                LogData {
                    tx_hash: "t1".to_string(),
                    log: Log {
                        address: ADDR1.to_vec(),
                        events: vec![
                            deposit_event(ADDR1, "deposit"),
                            deposit_event(ADDR2, "deposit"),
                            deposit_event(ADDR1, "transfer"),
                        ],
                    },
                },
                LogData {
                    tx_hash: "t0".to_string(),
                    log: Log {
                        address: ADDR1.to_vec(),
                        events: vec![deposit_event(ADDR1, "deposit")],
                    },
                },
            ],
        };

        notifier.notify(&block(pool)).unwrap();

        let published = published.lock();
        let incoming = &published[0].1;

        assert!(incoming.incoming_mini_blocks.is_empty());
        assert_eq!(
            incoming
                .incoming_events
                .iter()
                .map(|e| e.tx_hash.as_str())
                .collect::<Vec<_>>(),
            vec!["t1", "t0"]
        );
        assert_eq!(
            incoming.incoming_events[0].event,
            deposit_event(ADDR1, "deposit")
        );
    }

    #[test]
    fn event_mode_refuses_tx_subscribers() {
        let notifier = event_notifier();

        assert_eq!(notifier.watch_mode(), WatchMode::Events);
        assert!(matches!(
            notifier.register_tx_subscriber(Arc::new(TxSubscriberStub::default())),
            Err(Error::TxSubscribersUnsupported)
        ));
        assert_eq!(notifier.tx_subscriber_count(), 0);
    }

    #[test]
    fn builder_validation() {
        let base = || {
            SovereignNotifier::<MarshallerKind>::builder()
                .marshaller(MarshallerKind::Json)
                .hasher(HasherKind::Keccak.hasher())
        };

        assert!(matches!(
            SovereignNotifier::<MarshallerKind>::builder()
                .hasher(HasherKind::Sha256.hasher())
                .subscribed_addresses(vec![ADDR1.to_vec()])
                .build(),
            Err(Error::MissingCollaborator("marshaller"))
        ));

        assert!(matches!(
            SovereignNotifier::builder()
                .marshaller(MarshallerKind::Json)
                .subscribed_addresses(vec![ADDR1.to_vec()])
                .build(),
            Err(Error::MissingCollaborator("hasher"))
        ));

        assert!(matches!(
            base().subscribed_addresses(vec![ADDR1.to_vec()]).build(),
            Err(Error::MissingCollaborator("shard coordinator"))
        ));

        assert!(matches!(
            base().build(),
            Err(Error::NoSubscribedAddresses)
        ));

        assert!(matches!(
            base()
                .shard_coordinator(shard_coordinator())
                .subscribed_addresses(vec![])
                .build(),
            Err(Error::NoSubscribedAddresses)
        ));

        assert!(matches!(
            base()
                .shard_coordinator(shard_coordinator())
                .subscribed_addresses(vec![ADDR1.to_vec(), ADDR1.to_vec()])
                .build(),
            Err(Error::DuplicateAddress(_))
        ));

        assert!(matches!(
            base()
                .shard_coordinator(shard_coordinator())
                .subscribed_addresses(vec![ADDR1.to_vec()])
                .subscribed_events(vec![])
                .build(),
            Err(Error::AmbiguousWatchMode)
        ));

        assert!(matches!(
            base().subscribed_events(vec![]).build(),
            Err(Error::NoSubscribedEvents)
        ));

        let notifier = base()
            .shard_coordinator(shard_coordinator())
            .subscribed_addresses(vec![ADDR1.to_vec(), ADDR2.to_vec()])
            .build()
            .unwrap();

        assert_eq!(notifier.watch_mode(), WatchMode::Addresses);
        assert_eq!(notifier.watched_count(), 2);
    }

    #[test]
    fn concurrent_registration_and_notification() {
        let notifier = address_notifier();
        let outport = block(six_tx_pool());

        std::thread::scope(|s| {
            for _ in 0..50 {
                s.spawn(|| {
                    notifier
                        .register_header_subscriber(Arc::new(HeaderSubscriberStub::default()))
                        .unwrap();
                });
                s.spawn(|| notifier.notify(&outport).unwrap());
            }
        });

        assert_eq!(notifier.header_subscriber_count(), 50);
    }
}
