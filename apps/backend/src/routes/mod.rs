use actix_web::web;

pub mod game;
pub mod health;
pub mod realtime;

/// Configure application routes.
///
/// `main.rs` wraps these in the CORS and tracing middleware; tests register
/// the same paths directly so endpoint behavior can be exercised on its own.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: / and /health
    cfg.configure(health::configure_routes);

    // Game control routes: /api/game/**
    cfg.service(web::scope("/api/game").configure(game::configure_routes));

    // Observer socket: /ws
    cfg.configure(realtime::configure_routes);
}
