//! Fire-and-forget JSON publisher for the `derco` Kafka topic.
//!
//! This library is a thin wrapper over rdkafka's `FutureProducer`. It owns a
//! producer handle bound to a broker list, serializes JSON objects to UTF-8
//! JSON bytes, and enqueues them to the fixed `derco` topic without awaiting
//! broker acknowledgment. Batching, retries, compression, and delivery are
//! handled by librdkafka; there is no consumer side and no partition or
//! offset management here.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use derco_publisher::{Publisher, PublisherConfig};
//! use serde_json::json;
//!
//! fn main() -> anyhow::Result<()> {
//!     // KAFKA_SERVERS holds a comma-separated broker list.
//!     let config = PublisherConfig::from_env()?.with_client_id("my-producer");
//!     let publisher = Publisher::new(config);
//!
//!     let sent = publisher.send_one(&json!({"id": "1", "status": "ok"}));
//!     assert!(sent);
//!
//!     let (success, failed) = publisher.send_batch(&json!([
//!         {"id": "2"},
//!         {"id": "3"},
//!     ]));
//!     assert_eq!((success, failed), (2, 0));
//!
//!     publisher.flush();
//!     // Dropping the publisher flushes and closes the producer handle.
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod publisher;

pub use config::{PublisherConfig, DEFAULT_CLIENT_ID, KAFKA_SERVERS_ENV, TOPIC};
pub use error::{Error, Result};
pub use publisher::Publisher;
