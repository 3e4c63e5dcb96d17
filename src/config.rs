use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Destination topic for every published message. Not configurable at runtime.
pub const TOPIC: &str = "derco";

/// Client id used when the caller does not supply one.
pub const DEFAULT_CLIENT_ID: &str = "derco-publisher-default";

/// Environment variable holding the comma-separated broker list.
pub const KAFKA_SERVERS_ENV: &str = "KAFKA_SERVERS";

/// Configuration for the publisher.
///
/// Immutable once constructed; pass it to [`crate::Publisher::new`]. There is
/// no process-wide shared state, so two publishers with different configs can
/// coexist in one process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// Kafka brokers, in connection-attempt order (`host:port` each).
    ///
    /// Address format is not validated here; librdkafka reports unreachable
    /// or malformed brokers at connect time.
    pub brokers: Vec<String>,
    /// Client id reported to the brokers.
    pub client_id: String,
    /// Per-message retry count performed by librdkafka.
    pub retries: u32,
    /// Producer batch size in bytes.
    pub batch_size: usize,
    /// How long the producer lingers before sending a partial batch, in milliseconds.
    pub linger_ms: u64,
    /// Total buffer budget for queued messages, in bytes.
    pub buffer_memory: usize,
    /// Compression codec applied to message sets.
    pub compression: String,
    /// How long a queued message may await delivery before being failed, in milliseconds.
    pub message_timeout_ms: u64,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            brokers: vec!["localhost:9092".to_string()],
            client_id: DEFAULT_CLIENT_ID.to_string(),
            retries: 3,
            batch_size: 16384,
            linger_ms: 10,
            buffer_memory: 33_554_432,
            compression: "gzip".to_string(),
            message_timeout_ms: 5000,
        }
    }
}

impl PublisherConfig {
    /// Build a config from the `KAFKA_SERVERS` environment variable.
    ///
    /// The variable is a comma-separated list of `host:port` addresses; order
    /// is preserved. Empty segments (stray commas, trailing comma) are
    /// dropped, but the addresses themselves are not validated here. All
    /// other fields take their defaults.
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var(KAFKA_SERVERS_ENV)
            .map_err(|_| Error::InvalidConfig(format!("{KAFKA_SERVERS_ENV} is not set")))?;

        let brokers: Vec<String> = raw
            .split(',')
            .map(|host| host.trim().to_string())
            .filter(|host| !host.is_empty())
            .collect();

        if brokers.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "{KAFKA_SERVERS_ENV} contains no broker addresses"
            )));
        }

        Ok(Self {
            brokers,
            ..Self::default()
        })
    }

    /// Override the client id.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }
}
