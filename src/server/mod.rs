//! HTTP surface for the screening service.
//!
//! # Routes
//!
//! - `GET /` - screening form (gender options fetched from `/genders`)
//! - `GET /genders` - categories the exported encoder accepts
//! - `POST /predict` - JSON observation in, screening answer out
//! - `GET /health` - liveness plus the loaded artifact digest

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::adapters::{ArtifactStore, ArtifactSummary, ExportedClassifier, StandardScaler};
use crate::application::{FeatureAssembler, PredictionService};
use crate::domain::PositivePolicy;
use crate::ports::{Classifier, Scaler};

pub use handlers::{ErrorResponse, GendersResponse, HealthResponse, PredictionResponse};

/// Application state shared across handlers.
pub struct AppState<S, C>
where
    S: Scaler + 'static,
    C: Classifier + 'static,
{
    pub service: PredictionService<S, C>,
    pub summary: ArtifactSummary,
    pub started_at: DateTime<Utc>,
}

impl AppState<StandardScaler, ExportedClassifier> {
    /// Wire the pipeline over a loaded artifact store.
    #[must_use]
    pub fn from_store(store: ArtifactStore, policy: PositivePolicy) -> Self {
        let summary = store.summary();
        let assembler = FeatureAssembler::new(
            Arc::new(store.gender_encoder),
            Arc::new(store.means),
        );
        let service = PredictionService::new(
            assembler,
            Arc::new(store.scaler),
            Arc::new(store.classifier),
            store.class_encoder.map(Arc::new),
            policy,
        );

        Self {
            service,
            summary,
            started_at: Utc::now(),
        }
    }
}

/// Create the application router.
pub fn create_router<S, C>(state: Arc<AppState<S, C>>) -> Router
where
    S: Scaler + 'static,
    C: Classifier + 'static,
{
    // CORS configuration for browser clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::form_page))
        .route("/genders", get(handlers::list_genders::<S, C>))
        .route("/predict", post(handlers::predict::<S, C>))
        .route("/health", get(handlers::health::<S, C>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listener and serve until the process stops.
///
/// # Errors
/// Returns the bind or serve error.
pub async fn serve<S, C>(state: Arc<AppState<S, C>>, addr: SocketAddr) -> std::io::Result<()>
where
    S: Scaler + 'static,
    C: Classifier + 'static,
{
    let app = create_router(state);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Screening service listening on {addr}");

    axum::serve(listener, app).await
}
