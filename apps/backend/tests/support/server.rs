// Real HTTP server for websocket tests.

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use sechack_backend::middleware::request_trace::RequestTrace;
use sechack_backend::middleware::structured_logger::StructuredLogger;
use sechack_backend::middleware::trace_span::TraceSpan;
use sechack_backend::routes;
use sechack_backend::state::app_state::AppState;
use sechack_backend::ws::hub::ObserverRegistry;

pub struct TestServer {
    pub handle: actix_web::dev::ServerHandle,
    pub addr: std::net::SocketAddr,
}

impl TestServer {
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

/// Bind a random local port and serve the full route table.
///
/// Must run inside an actix system (`#[actix_web::test]`) because the
/// director actor in `state` lives there.
pub fn start_test_server(state: AppState) -> Result<TestServer, Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .configure(routes::configure)
    })
    .workers(1)
    .listen(listener)?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok(TestServer { handle, addr })
}

pub async fn wait_for_connections(
    hub: &Arc<ObserverRegistry>,
    expected: usize,
    timeout: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = tokio::time::Instant::now();
    loop {
        if hub.active_connections_count() == expected {
            return Ok(());
        }
        if start.elapsed() >= timeout {
            return Err(format!(
                "timeout waiting for active_connections_count == {expected} (got {})",
                hub.active_connections_count()
            )
            .into());
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
