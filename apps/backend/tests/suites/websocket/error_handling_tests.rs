use sechack_test_support::ws_frames::assert_error_frame;
use serde_json::json;

use super::{greeted_client, serve, state_with};
use crate::common::EVENT_TIMEOUT;
use crate::support::frozen_config;
use crate::support::websocket_client::WebSocketClient;

#[actix_web::test]
async fn command_before_hello_closes_the_socket() -> Result<(), Box<dyn std::error::Error>> {
    let server = serve(state_with(frozen_config(), [])).await?;
    let mut client = WebSocketClient::connect_retry(&server.ws_url(), EVENT_TIMEOUT).await?;

    client
        .send_json(&json!({"type": "start", "participants": 4}))
        .await?;
    let frame = client.recv_json().await?;
    assert_error_frame(&frame, "BAD_PROTOCOL");
    assert!(client.recv_json_timeout(EVENT_TIMEOUT).await?.is_none());

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn unsupported_protocol_version_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let server = serve(state_with(frozen_config(), [])).await?;
    let mut client = WebSocketClient::connect_retry(&server.ws_url(), EVENT_TIMEOUT).await?;

    client
        .send_json(&json!({"type": "hello", "protocol": 99}))
        .await?;
    assert_error_frame(&client.recv_json().await?, "BAD_PROTOCOL");

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let server = serve(state_with(frozen_config(), [])).await?;
    let mut client = greeted_client(&server).await?;

    client.send_json(&json!({"type": "dance"})).await?;
    assert_error_frame(&client.recv_json().await?, "BAD_REQUEST");

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn refused_commands_keep_the_socket_open() -> Result<(), Box<dyn std::error::Error>> {
    let server = serve(state_with(frozen_config(), [])).await?;
    let mut client = greeted_client(&server).await?;

    client.send_json(&json!({"type": "snapshot"})).await?;
    assert_error_frame(&client.recv_json().await?, "SESSION_NOT_FOUND");

    client
        .send_json(&json!({"type": "start", "participants": 2}))
        .await?;
    assert_error_frame(&client.recv_json().await?, "INVALID_PARTICIPANT_COUNT");

    client.send_json(&json!({"type": "stop"})).await?;
    assert_error_frame(&client.recv_json().await?, "SESSION_NOT_FOUND");

    server.stop().await;
    Ok(())
}
