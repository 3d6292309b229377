pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod schedule;
pub mod settings;
pub mod store;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use config::ConfigError;
use handlers::{
    create_booking, create_building, create_classroom, create_user, delete_booking,
    delete_building, delete_classroom, get_availability, get_booking, get_current_user,
    healthz_live, healthz_ready, list_bookings, list_buildings, list_classrooms, list_users, root,
    update_booking, update_booking_status, update_building, update_classroom, update_user,
};
use tower_http::LatencyUnit;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;
use crate::schedule::SlotGrid;
use crate::settings::Settings;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub(crate) settings: Settings,
    pub(crate) store: Arc<Store>,
    pub(crate) grid: SlotGrid,
}

impl AppState {
    pub fn new(settings: Settings, store: Arc<Store>) -> Result<Self, ConfigError> {
        let grid = settings.slot_grid()?;
        Ok(Self {
            settings,
            store,
            grid,
        })
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let store = Arc::new(Store::with_accounts(&settings));
    if settings.seed_demo_data {
        store.seed_demo().await?;
    }
    let state = AppState::new(settings, store)?;

    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!("Starting Classroom Booking API on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let api = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/me", get(get_current_user))
        .route("/users/{id}", put(update_user))
        .route("/buildings", get(list_buildings).post(create_building))
        .route("/buildings/{id}", put(update_building).delete(delete_building))
        .route("/classrooms", get(list_classrooms).post(create_classroom))
        .route(
            "/classrooms/{id}",
            put(update_classroom).delete(delete_classroom),
        )
        .route("/bookings", get(list_bookings).post(create_booking))
        .route(
            "/bookings/{id}",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .route("/bookings/{id}/status", put(update_booking_status))
        .route("/availability/{classroom_id}", get(get_availability));

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .nest("/api", api)
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(CorsLayer::permissive()).layer(trace_layer)
}
