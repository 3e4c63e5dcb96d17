//! Lifecycle tests for the publisher public API.
//!
//! These run without a broker: producer creation and enqueueing are local
//! operations, and no test waits for delivery.

use derco_publisher::{Publisher, PublisherConfig};
use serde_json::json;

fn test_config() -> PublisherConfig {
    PublisherConfig {
        // Keep drop-time flush short; queued messages have no broker to go to.
        message_timeout_ms: 300,
        ..PublisherConfig::default()
    }
}

#[test]
fn batch_counts_sum_to_input_length() {
    let publisher = Publisher::new(test_config());
    let messages = json!([
        {"id": "a"},
        "not_a_map",
        {"id": "b"},
        42,
        {"id": "c"},
    ]);
    let (success, failed) = publisher.send_batch(&messages);
    assert_eq!(success + failed, 5);
    assert_eq!((success, failed), (3, 2));
}

#[test]
fn a_failing_element_does_not_stop_the_batch() {
    let publisher = Publisher::new(test_config());
    // The non-map element fails; the later map element must still be attempted.
    let (success, failed) = publisher.send_batch(&json!(["bad", {"id": "1"}]));
    assert_eq!((success, failed), (1, 1));
}

#[test]
fn close_then_send_returns_false() {
    let mut publisher = Publisher::new(test_config());
    assert!(publisher.is_initialized());

    publisher.close();
    assert!(!publisher.is_initialized());
    assert!(!publisher.send_one(&json!({"id": "1"})));

    // Closing again is safe.
    publisher.close();
}

#[test]
fn flush_and_close_on_fresh_publisher_do_not_panic() {
    let mut publisher = Publisher::new(test_config());
    publisher.flush();
    publisher.close();
    publisher.flush();
}

#[test]
fn drop_closes_the_publisher_on_unwind() {
    // The publisher is dropped mid-panic; Drop must flush and release the
    // handle without aborting the process.
    let result = std::panic::catch_unwind(|| {
        let publisher = Publisher::new(test_config());
        publisher.send_one(&json!({"id": "unwind"}));
        panic!("simulated failure");
    });
    assert!(result.is_err());
}

#[test]
fn non_sequence_batch_input_is_rejected_without_sends() {
    let publisher = Publisher::new(test_config());
    assert_eq!(publisher.send_batch(&json!({"id": "1"})), (0, 0));
    assert_eq!(publisher.send_batch(&json!(null)), (0, 0));
}
