use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Producer not initialized")]
    NotInitialized,

    #[error("Kafka publish error: {0}")]
    Publish(#[from] rdkafka::error::KafkaError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Producer initialization error: {0}")]
    Init(String),

    #[error("Flush error: {0}")]
    Flush(rdkafka::error::KafkaError),
}

pub type Result<T> = std::result::Result<T, Error>;
