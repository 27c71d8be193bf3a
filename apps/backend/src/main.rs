use actix_web::{web, App, HttpServer};
use sechack_backend::config::ServerConfig;
use sechack_backend::infra::state::build_state;
use sechack_backend::middleware::cors::cors_middleware;
use sechack_backend::middleware::request_trace::RequestTrace;
use sechack_backend::middleware::structured_logger::StructuredLogger;
use sechack_backend::middleware::trace_span::TraceSpan;
use sechack_backend::routes;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or sourced manually for local dev).
    let server = match ServerConfig::from_env() {
        Ok(server) => server,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let app_state = match build_state().build() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        host = %server.host,
        port = server.port,
        reveal_delay_ms = app_state.config.reveal_delay.as_millis() as u64,
        think_delay_ms = app_state.config.think_delay.as_millis() as u64,
        human_seat = app_state.config.human_seat,
        "starting SEC/HACK backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
