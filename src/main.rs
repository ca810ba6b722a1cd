mod config;
mod dto;
mod handlers;
mod service;

use std::sync::Arc;

use service::{ContactService, SmtpMailer};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt().init();

    // Load config
    let cfg = config::load_config().expect("failed to locate or load config file");
    tracing::info!("Successfully loaded contact service config");

    // Mail transport is shared by every request
    let mailer = SmtpMailer::new(
        &cfg.smtp_relay,
        cfg.smtp_username().to_string(),
        cfg.smtp_pass.clone(),
    )
    .unwrap_or_else(|e| {
        tracing::error!("Failed to set up SMTP transport: {e}");
        panic!("failed to set up SMTP transport: {e}");
    });

    // Service creation
    let service = Arc::new(ContactService::from_config(&cfg, Arc::new(mailer)));

    // Router config
    let router = handlers::router(service);

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().expect("Failed to read local address");

    tracing::info!(
        "Contact service starting, relaying to {} via {}, listening on {}",
        cfg.recipient(),
        cfg.smtp_relay,
        addr
    );

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
