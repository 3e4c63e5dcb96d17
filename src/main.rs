//! Demo binary for the derco publisher.
//!
//! Publishes a single message, then a batch, to the `derco` topic and flushes
//! before exiting.
//!
//! ```bash
//! export KAFKA_SERVERS=localhost:9092
//! derco-publisher --client-id demo-producer --count 5
//! ```

use anyhow::Context;
use clap::Parser;
use derco_publisher::{Publisher, PublisherConfig};
use serde_json::json;

#[derive(Parser)]
#[command(name = "derco-publisher")]
#[command(about = "Publish demo JSON messages to the derco topic")]
struct Cli {
    /// Client id reported to the brokers
    #[arg(long)]
    client_id: Option<String>,

    /// Number of batch messages to generate
    #[arg(long, default_value_t = 5)]
    count: usize,
}

fn main() {
    tracing_subscriber::fmt::init();

    match run_main() {
        Ok(()) => println!("Publisher finished successfully"),
        Err(e) => {
            eprintln!("Error: {e:?}");
            std::process::exit(1);
        }
    }
}

fn run_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = PublisherConfig::from_env().context("Failed to load broker configuration")?;
    if let Some(client_id) = cli.client_id {
        config = config.with_client_id(client_id);
    }

    let mut publisher = Publisher::new(config);
    if !publisher.is_initialized() {
        anyhow::bail!("Kafka producer could not be initialized");
    }

    // Single message
    let message = json!({
        "id": "12345",
        "name": "Test Message",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "data": {
            "temperature": 23.5,
            "humidity": 65,
            "status": "ok"
        }
    });
    let sent = publisher.send_one(&message);
    println!("Single send succeeded: {sent}");

    // Batch of generated messages
    let messages: Vec<_> = (0..cli.count)
        .map(|i| {
            json!({
                "id": format!("msg_{i}"),
                "type": "sensor_data",
                "value": i * 10,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })
        })
        .collect();
    let (success, failed) = publisher.send_batch(&json!(messages));
    println!("Batch results: {success} success, {failed} failed");

    publisher.flush();
    publisher.close();

    Ok(())
}
