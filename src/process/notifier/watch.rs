use std::collections::{HashMap, HashSet};

use itertools::Itertools;

use crate::error::Error;

/// Receiver addresses whose incoming transactions are forwarded.
#[derive(Debug, Clone)]
pub struct WatchedAddressSet {
    addresses: HashSet<Vec<u8>>,
}

impl WatchedAddressSet {
    pub fn new(addresses: Vec<Vec<u8>>) -> Result<Self, Error> {
        if addresses.is_empty() {
            return Err(Error::NoSubscribedAddresses);
        }

        if let Some(duplicate) = addresses.iter().duplicates().next() {
            return Err(Error::DuplicateAddress(hex::encode(duplicate)));
        }

        Ok(Self {
            addresses: addresses.into_iter().collect(),
        })
    }

    pub fn contains(&self, address: &[u8]) -> bool {
        self.addresses.contains(address)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// An event identifier together with the emitting addresses it is watched for.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscribedEvent {
    pub identifier: Vec<u8>,
    /// `(decoded, encoded)` address pairs
    pub addresses: Vec<(Vec<u8>, String)>,
}

#[derive(Debug, Clone)]
struct WatchedEvent {
    identifier: Vec<u8>,
    addresses: HashMap<Vec<u8>, String>,
}

impl WatchedEvent {
    fn new(event: SubscribedEvent) -> Result<Self, Error> {
        if event.identifier.is_empty() {
            return Err(Error::EmptyIdentifier);
        }

        if event.addresses.is_empty() {
            return Err(Error::NoSubscribedAddresses);
        }

        if event
            .addresses
            .iter()
            .any(|(decoded, encoded)| decoded.is_empty() || encoded.is_empty())
        {
            return Err(Error::EmptySubscribedAddress);
        }

        if let Some((_, encoded)) = event
            .addresses
            .iter()
            .duplicates_by(|(decoded, _)| decoded.clone())
            .next()
        {
            return Err(Error::DuplicateAddress(encoded.clone()));
        }

        Ok(Self {
            identifier: event.identifier,
            addresses: event.addresses.into_iter().collect(),
        })
    }

    fn matches(&self, identifier: &[u8], address: &[u8]) -> bool {
        self.identifier == identifier && self.addresses.contains_key(address)
    }
}

/// Event identifiers and emitters whose log events are forwarded, in configuration order.
#[derive(Debug, Clone)]
pub struct WatchedEventSet {
    events: Vec<WatchedEvent>,
}

impl WatchedEventSet {
    pub fn new(events: Vec<SubscribedEvent>) -> Result<Self, Error> {
        if events.is_empty() {
            return Err(Error::NoSubscribedEvents);
        }

        let events = events
            .into_iter()
            .enumerate()
            .map(|(index, event)| WatchedEvent::new(event).map_err(|e| e.for_event(index)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { events })
    }

    pub fn matches(&self, identifier: &[u8], address: &[u8]) -> bool {
        self.events.iter().any(|e| e.matches(identifier, address))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
