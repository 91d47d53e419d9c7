//! Sea Level Dashboard Server
//!
//! Serves the rendered dashboard pages and the pipeline output as JSON.
//! The pipeline runs once at startup; handlers only read its output.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod error;
mod navigation;
mod pages;
mod routes;

pub use crate::config::{load_config, DashboardConfig, ServerConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use error::{ApiError, ErrorResponse};
pub use navigation::{ModelPage, NavigationState, Section};
pub use pages::{render, ChartData, Page, Panel};

use pipeline::{PipelineConfig, PipelineOutput};

/// Application state shared across handlers
pub struct AppState {
    /// Pipeline output, never mutated after startup
    pub output: PipelineOutput,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create application state around a finished pipeline run
    pub fn new(output: PipelineOutput) -> Self {
        Self {
            output,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub rows: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/sections", get(routes::pages::get_sections))
        .route("/api/v1/pages/:section", get(routes::pages::get_page))
        .route("/api/v1/summary", get(routes::summary::get_summary))
        .route("/api/v1/rows", get(routes::rows::get_rows))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        rows: state.output.table.len(),
    })
}

/// Initialize logging
///
/// Unknown level names fall back to INFO.
pub fn init_logging(config: &ServerConfig) -> anyhow::Result<()> {
    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if config.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Run the pipeline on the blocking pool
pub async fn run_pipeline(config: PipelineConfig) -> anyhow::Result<PipelineOutput> {
    info!("Running pipeline on {}", config.csv_path.display());
    let output = tokio::task::spawn_blocking(move || pipeline::run(&config)).await??;
    Ok(output)
}

/// Run the pipeline, then serve its output until shutdown
pub async fn run_server(config: DashboardConfig) -> anyhow::Result<()> {
    let output = run_pipeline(config.pipeline).await?;

    let state = Arc::new(AppState::new(output));
    let app = create_router(state);

    info!("Starting API server on {}", config.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use pipeline::{run_reader, PipelineConfig, PipelineOutput};

    const HEADER: &str = "Date,Time (GMT),station_id,Highest,Lowest (ft),MHHW (ft),MHW (ft),MSL (ft),MTL (ft),MLW (ft),MLLW (ft),Inf";

    /// Two stations over two years, one missing MLLW reading
    pub fn sample_csv() -> String {
        let mut text = String::from(HEADER);
        for i in 0..96usize {
            let base = (i as f64 * 0.9).sin() + i as f64 * 0.005;
            let mllw = if i == 10 {
                "NA".to_string()
            } else {
                format!("{:.4}", base - 2.0 - (i % 4) as f64 * 0.1)
            };
            text.push_str(&format!(
                "\n{}-{:02}-{:02},{:02}:00,{},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{},{}",
                2020 + i / 48,
                1 + (i / 4) % 12,
                1 + (i % 4) * 7,
                (i * 5) % 24,
                if i % 3 == 0 { "8443970" } else { "9414290" },
                base + 3.0,
                base - 3.0 + (i % 2) as f64 * 0.2,
                base + 2.0 + (i % 3) as f64 * 0.1,
                base + 1.5,
                base,
                base * 0.5 + 0.7 + (i % 5) as f64 * 0.02,
                base - 1.5,
                mllw,
                if i % 7 == 0 { "p" } else { "v" },
            ));
        }
        text.push('\n');
        text
    }

    pub fn sample_output() -> PipelineOutput {
        run_reader(sample_csv().as_bytes(), &PipelineConfig::default().with_validation())
            .expect("sample pipeline run")
    }
}
