use std::io::Error;
use std::sync::Arc;

use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;
use tokio::main;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    application::{
        handlers::{media_queue::MediaDeliveryQueue, message_classifier::MessageClassifier},
        services::webhook::WebhookDispatcher,
    },
    config::Config,
    infrastructure::{session::sidecar::SidecarSession, webhook::http::HttpWebhookSink},
    presentation::http::endpoints::{
        events::EventsEndpoints,
        health::HealthEndpoints,
        queue::QueueEndpoints,
        root::ApiState,
    },
};

mod application;
mod config;
mod domain;
mod infrastructure;
mod presentation;

#[main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::try_parse().map_err(Error::other)?;

    let server_url = format!("{}://{}:{}", config.scheme, config.host, config.port);

    for url in config.webhook_urls.urls() {
        info!(url = %url, "webhook destination configured");
    }

    let sink = HttpWebhookSink::new(config.webhook_timeout).map_err(Error::other)?;
    let session = SidecarSession::new(&config.session_provider_url, config.webhook_timeout)
        .map_err(Error::other)?;
    let dispatcher = WebhookDispatcher::new(sink);
    let queue = MediaDeliveryQueue::new(dispatcher.clone(), config.media_cooldown);
    let classifier = MessageClassifier::new(
        session.clone(),
        dispatcher,
        queue.clone(),
        config.webhook_urls.clone(),
    );

    let state = Arc::new(ApiState {
        classifier: Arc::new(classifier),
        queue,
        session,
        destinations: config.webhook_urls.clone(),
    });

    let api_service = OpenApiService::new(
        (
            HealthEndpoints::new(state.clone()),
            EventsEndpoints::new(state.clone()),
            QueueEndpoints::new(state),
        ),
        "WhatsApp n8n Bridge API",
        "0.1.0",
    )
    .server(format!("{}/api", server_url));
    let ui = api_service.swagger_ui();
    let app = Route::new().nest("/api", api_service).nest("/", ui);

    info!(
        %server_url,
        session_provider = %config.session_provider_url,
        "starting server; point the session sidecar at {}/api/events/messages",
        server_url
    );

    Server::new(TcpListener::bind(format!("0.0.0.0:{}", config.port)))
        .run(app)
        .await
}
