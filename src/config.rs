use std::path::PathBuf;

use serde::Deserialize;

use crate::{error::Error, hashing::HasherKind, marshal::MarshallerKind};

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub notifier: NotifierConfig,
    pub web_socket: WebSocketConfig,
}

impl Config {
    /// Layers `notifier.toml` from the working directory, then `config_path` if given, then
    /// `NOTIFIER__SECTION__KEY` environment variables.
    pub fn new(config_path: &Option<PathBuf>) -> Result<Self, Error> {
        let mut s = config::Config::builder();

        s = s.add_source(config::File::with_name("notifier.toml").required(false));

        if let Some(explicit) = config_path.as_ref().and_then(|x| x.to_str()) {
            s = s.add_source(config::File::with_name(explicit).required(true));
        }

        s = s.add_source(
            config::Environment::with_prefix("NOTIFIER")
                .prefix_separator("__")
                .separator("__"),
        );

        Ok(s.build()?.try_deserialize()?)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct NotifierConfig {
    /// Number of main chain shards transactions can originate from
    pub num_main_shards: u32,
    #[serde(default)]
    pub hasher_type: HasherKind,
    /// Max saved blocks awaiting finalization (unbounded when omitted)
    pub block_cache_size: Option<usize>,

    #[serde(default)]
    pub subscribed_addresses: Vec<String>,
    #[serde(default)]
    pub subscribed_events: Vec<SubscribedEventConfig>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SubscribedEventConfig {
    pub identifier: String,
    pub addresses: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WebSocketConfig {
    pub url: String,
    #[serde(default)]
    pub marshaller_type: MarshallerKind,

    /// Max in-flight payloads between the receive and process stage
    pub stage_queue_size: Option<usize>,
    pub stage_timeout_secs: Option<u64>,
    /// Stop processing on the first payload that fails instead of skipping it
    #[serde(default)]
    pub halt_on_error: bool,
}
