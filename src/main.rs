use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use docassist::application::services::{ActionService, DocumentService, ModelGateway};
use docassist::infrastructure::nlp::CandleModelLoader;
use docassist::infrastructure::observability::{TracingConfig, init_tracing};
use docassist::infrastructure::text_processing::ExtractorFactory;
use docassist::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(
        TracingConfig::from_settings(&settings.logging, environment),
        settings.server.port,
    );

    let file_loader = ExtractorFactory::create(&settings.extraction);
    let document_service = Arc::new(DocumentService::new(file_loader));

    let model_loader = Arc::new(CandleModelLoader::new(settings.models.clone()));
    let model_gateway = Arc::new(ModelGateway::new(model_loader));

    if settings.models.preload {
        model_gateway.load().await?;
    }

    let action_service = Arc::new(ActionService::new(
        Arc::clone(&model_gateway),
        (&settings.actions).into(),
    ));

    let state = AppState {
        document_service,
        action_service,
        model_gateway,
        max_upload_bytes: settings.server.max_upload_bytes(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
