use crate::config::{PublisherConfig, TOPIC};
use crate::error::{Error, Result};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use rdkafka::ClientConfig;
use serde_json::Value;
use std::time::Duration;

/// How long an acknowledged send may sit in the local queue before giving up.
const ACK_QUEUE_TIMEOUT: Duration = Duration::from_secs(5);

/// JSON publisher bound to the fixed `derco` topic.
///
/// Wraps an rdkafka [`FutureProducer`]. The producer handle is either fully
/// initialized and usable, or absent; when absent (failed construction or
/// after [`close`](Publisher::close)) every send returns `false` and nothing
/// reaches the network. There is no reconnect path.
///
/// Sends are fire-and-forget: `send_one` enqueues the message into the
/// producer's buffer and does not await broker acknowledgment. Use
/// [`send_one_acked`](Publisher::send_one_acked) when delivery confirmation
/// is required.
///
/// Dropping the publisher closes it, so scope exit (including unwind) always
/// flushes and releases the handle.
pub struct Publisher {
    config: PublisherConfig,
    producer: Option<FutureProducer>,
}

impl Publisher {
    /// Create a publisher from the given config.
    ///
    /// Construction itself never fails: if the underlying producer cannot be
    /// created, the error is logged and the publisher is returned inert. Check
    /// [`is_initialized`](Publisher::is_initialized) to distinguish the two.
    pub fn new(config: PublisherConfig) -> Self {
        let producer = match init_producer(&config) {
            Ok(producer) => {
                tracing::info!(
                    client_id = %config.client_id,
                    "Kafka producer initialized"
                );
                Some(producer)
            }
            Err(e) => {
                tracing::error!("Error initializing Kafka producer: {e}");
                None
            }
        };

        Self { config, producer }
    }

    /// Whether the underlying producer handle is present.
    pub fn is_initialized(&self) -> bool {
        self.producer.is_some()
    }

    /// The config this publisher was built with.
    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    /// Send a single JSON object to the `derco` topic, fire-and-forget.
    ///
    /// Returns `true` when the message was accepted into the producer's
    /// buffer. Returns `false` without side effects when the message is not a
    /// JSON object, when the producer is not initialized, or when the enqueue
    /// itself fails. The outcome is logged either way; callers only see the
    /// boolean.
    pub fn send_one(&self, message: &Value) -> bool {
        match self.try_send_one(message) {
            Ok(()) => {
                tracing::info!("Message sent to topic '{TOPIC}'");
                true
            }
            Err(e) => {
                tracing::error!("Error sending message to topic '{TOPIC}': {e}");
                false
            }
        }
    }

    fn try_send_one(&self, message: &Value) -> Result<()> {
        let payload = encode(message)?;
        let producer = self.producer.as_ref().ok_or(Error::NotInitialized)?;

        let record = FutureRecord::<(), _>::to(TOPIC).payload(&payload);

        // Enqueue only; the delivery future is dropped. librdkafka retries
        // and delivers in the background per the configured retry count.
        match producer.send_result(record) {
            Ok(_delivery) => Ok(()),
            Err((e, _record)) => Err(Error::Publish(e)),
        }
    }

    /// Send every element of a JSON array via [`send_one`](Publisher::send_one),
    /// in input order.
    ///
    /// Returns `(success_count, failed_count)`; the counts always sum to the
    /// array length. Outcomes are independent: a failing element does not stop
    /// the rest of the batch. A non-array input sends nothing and returns
    /// `(0, 0)`. Elements are not pre-validated; a non-object element simply
    /// counts as one failure.
    pub fn send_batch(&self, messages: &Value) -> (usize, usize) {
        let Some(items) = messages.as_array() else {
            tracing::error!(
                "Error: messages must be a JSON array, got {}",
                value_kind(messages)
            );
            return (0, 0);
        };

        let mut success_count = 0;
        let mut failed_count = 0;

        for message in items {
            if self.send_one(message) {
                success_count += 1;
            } else {
                failed_count += 1;
            }
        }

        tracing::info!("Batch send completed: {success_count} success, {failed_count} failed");
        (success_count, failed_count)
    }

    /// Send a single JSON object and await broker acknowledgment.
    ///
    /// Acknowledged variant of [`send_one`](Publisher::send_one) for callers
    /// that need delivery confirmation. Returns the partition and offset the
    /// message was written to.
    pub async fn send_one_acked(&self, message: &Value) -> Result<(i32, i64)> {
        let payload = encode(message)?;
        let producer = self.producer.as_ref().ok_or(Error::NotInitialized)?;

        let record = FutureRecord::<(), _>::to(TOPIC).payload(&payload);

        let (partition, offset) = producer
            .send(record, Timeout::After(ACK_QUEUE_TIMEOUT))
            .await
            .map_err(|(e, _message)| Error::Publish(e))?;

        tracing::debug!("Message delivered to topic '{TOPIC}' partition {partition} offset {offset}");
        Ok((partition, offset))
    }

    /// Block until all buffered messages are delivered or failed.
    ///
    /// No-op when the producer is not initialized. Flush errors are logged and
    /// discarded here; cleanup never propagates.
    pub fn flush(&self) {
        match self.try_flush() {
            Ok(()) => {
                if self.producer.is_some() {
                    tracing::info!("All pending messages flushed");
                }
            }
            Err(e) => tracing::error!("Error flushing producer: {e}"),
        }
    }

    fn try_flush(&self) -> Result<()> {
        let Some(producer) = self.producer.as_ref() else {
            return Ok(());
        };
        producer.flush(Timeout::Never).map_err(Error::Flush)
    }

    /// Flush best-effort, then release the producer handle.
    ///
    /// Idempotent: closing an already-closed (or never-initialized) publisher
    /// is a no-op. After close every send returns `false`; there is no way
    /// back to the initialized state.
    pub fn close(&mut self) {
        if self.producer.is_none() {
            return;
        }
        self.flush();
        self.producer = None;
        tracing::info!("Kafka producer closed");
    }
}

impl Drop for Publisher {
    fn drop(&mut self) {
        self.close();
    }
}

fn init_producer(config: &PublisherConfig) -> Result<FutureProducer> {
    // buffer_memory is a byte budget; librdkafka takes kilobytes.
    let buffer_kbytes = (config.buffer_memory / 1024).max(1);

    let producer: FutureProducer = ClientConfig::new()
        .set("bootstrap.servers", config.brokers.join(","))
        .set("client.id", &config.client_id)
        .set("retries", config.retries.to_string())
        .set("batch.size", config.batch_size.to_string())
        .set("linger.ms", config.linger_ms.to_string())
        .set("queue.buffering.max.kbytes", buffer_kbytes.to_string())
        .set("compression.type", &config.compression)
        .set("message.timeout.ms", config.message_timeout_ms.to_string())
        .create()
        .map_err(|e| Error::Init(format!("Failed to create Kafka producer: {e}")))?;

    Ok(producer)
}

/// Serialize a message to UTF-8 JSON bytes, rejecting anything that is not a
/// JSON object.
fn encode(message: &Value) -> Result<Vec<u8>> {
    if !message.is_object() {
        return Err(Error::InvalidInput(format!(
            "message must be a JSON object, got {}",
            value_kind(message)
        )));
    }
    Ok(serde_json::to_vec(message)?)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
