//! symptocare-server library crate
//!
//! Exposes `build_app` and `config` for integration tests.
//! The actual binary entrypoint is in `main.rs`.

pub mod ai;
pub mod config;
mod consult;
mod error;
mod middleware;
pub mod places;
mod routes;
pub mod views;

use axum::{Extension, Router, middleware as axum_mw, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use symptocare_core::Location;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use ai::{Advisor, ClaudeClient, GeminiClient, ProviderChain};
use config::Config;
use places::{FacilityLocator, NominatimClient, OverpassClient};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub advisor: Advisor,
    pub locator: FacilityLocator,
}

impl AppState {
    /// Wire upstream clients from configuration
    pub fn from_config(config: &Config) -> Self {
        let http = http_client(config);

        Self {
            advisor: Advisor::new(provider_chain(config, &http)),
            locator: FacilityLocator::new(
                NominatimClient::new(http.clone(), &config.nominatim_url),
                OverpassClient::new(http, &config.overpass_url),
                config.search_radius_m,
                config.max_facilities,
                Location {
                    coordinates: config.default_coordinates,
                    label: format!("{} (default)", config.default_city),
                },
            ),
        }
    }
}

fn http_client(config: &Config) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .expect("Failed to build HTTP client")
}

/// One Gemini entry per key, in configured order, then Claude
fn provider_chain(config: &Config, http: &reqwest::Client) -> ProviderChain {
    let mut chain = ProviderChain::default();

    for (i, key) in config.gemini_api_keys.iter().enumerate() {
        chain.push(Arc::new(GeminiClient::new(
            http.clone(),
            &config.gemini_base_url,
            key.clone(),
            &config.gemini_model,
            format!("gemini#{}", i + 1),
        )));
    }

    if let Some(key) = &config.anthropic_api_key {
        chain.push(Arc::new(ClaudeClient::new(
            http.clone(),
            &config.anthropic_base_url,
            key.clone(),
        )));
    }

    chain
}

/// Handle to the process-wide Prometheus recorder, installed on first use.
///
/// Every router built in the process (integration tests build many) renders
/// the same registry the `metrics` macros write to.
fn prometheus_handle() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if let Err(e) = metrics::set_global_recorder(recorder) {
                tracing::warn!(error = %e, "Metrics recorder already installed");
            }
            handle
        })
        .clone()
}

/// Build the full application router with all routes and middleware.
///
/// Extracted from `main()` so integration tests can construct the app
/// without binding to a TCP port.
pub fn build_app(config: &Config) -> Router {
    let state = AppState::from_config(config);

    // Create rate limiter
    let rate_limiter = middleware::create_rate_limiter(config.rate_limit_rps);

    // Routes that call upstream APIs are rate limited
    let assistant_routes = routes::assistant_routes()
        .layer(axum_mw::from_fn(middleware::rate_limit_middleware))
        .layer(Extension(rate_limiter));

    let prometheus_handle = prometheus_handle();

    let public_routes = Router::new()
        .route("/health", get(routes::ops::health))
        .route("/metrics", get(routes::ops::metrics))
        .layer(Extension(prometheus_handle));

    // Build CORS layer
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(public_routes)
        .merge(assistant_routes)
        .fallback(routes::ops::not_found)
        .with_state(state)
        .layer(axum_mw::from_fn(middleware::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_mw::from_fn(middleware::metrics_middleware))
}
