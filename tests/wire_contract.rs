//! End-to-end wire contract: a raw `trackOrder` frame decoded off the
//! transport drives a session whose emissions re-encode to the exact JSON
//! the browser client consumes.

mod common;

use common::settle;

use ordertrack_core::{ClientMessage, ServerMessage, SubscriptionChannel, TrackingConfig};

#[tokio::test(start_paused = true)]
async fn decoded_track_request_produces_the_documented_status_frame() {
    let channel = SubscriptionChannel::new(TrackingConfig::default());
    let (conn, mut rx) = channel.register_connection(None);

    // numeric order ids arrive from checkout (Date.now()-style tokens)
    let frame = serde_json::json!({"event": "trackOrder", "data": 12345});
    let message: ClientMessage = serde_json::from_value(frame).unwrap();
    channel.handle_client_message(conn, message).await.unwrap();

    settle().await;
    let event: ServerMessage = rx.try_recv().unwrap();
    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        serde_json::json!({
            "event": "orderStatus",
            "data": {"orderId": "12345", "status": "Preparing"}
        })
    );
}

#[tokio::test]
async fn malformed_track_request_is_rejected_at_decode_time() {
    let empty_id = serde_json::json!({"event": "trackOrder", "data": ""});
    assert!(serde_json::from_value::<ClientMessage>(empty_id).is_err());

    let unknown_event = serde_json::json!({"event": "cancelOrder", "data": "1"});
    assert!(serde_json::from_value::<ClientMessage>(unknown_event).is_err());
}
