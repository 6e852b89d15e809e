//! Backend entry-point: loads settings, wires adapters and serves the API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use frontdesk::domain::ports::ChangeNotifier;
use frontdesk::inbound::http::health::HealthState;
use frontdesk::inbound::http::session_config::{BuildMode, SessionSettings};
use frontdesk::inbound::http::state::HttpState;
use frontdesk::inbound::ws::{OriginAllowList, WsState};
use frontdesk::outbound::gemini::GeminiHttpSource;
use frontdesk::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use frontdesk::outbound::realtime::BroadcastChangeFeed;
use frontdesk::settings::AppSettings;

use server::{DieselRepositories, MemoryRepositories, ServerConfig, SharedAdapters, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    info!(?settings, "settings loaded");

    let session = SessionSettings::from_env(&DefaultEnv::new(), BuildMode::current())
        .wrap_err("invalid session configuration")?;
    info!(fingerprint = %session.fingerprint(), "session key loaded");

    let feed = BroadcastChangeFeed::default();
    let origins = OriginAllowList::parse(settings.allowed_origins())
        .wrap_err("invalid allowed origin")?;
    let shared = SharedAdapters::new(
        Arc::new(feed.clone()) as Arc<dyn ChangeNotifier>,
        completion_source(&settings)?,
    );

    let http_state = build_state(&settings, &shared).await?;
    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(
        settings.bind_addr()?,
        session,
        http_state,
        WsState::new(feed, origins),
        #[cfg(feature = "metrics")]
        server::build_metrics()?,
    );

    let server = create_server(health_state.clone(), config)?;
    health_state.mark_ready();
    info!("front desk ready");
    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}

/// Gemini client when a key is configured.
fn completion_source(settings: &AppSettings) -> Result<Option<Arc<GeminiHttpSource>>> {
    let Some(key) = settings.gemini_api_key() else {
        warn!("no Gemini API key configured; assistant replies will be degraded");
        return Ok(None);
    };
    let endpoint = Url::parse(settings.gemini_endpoint()).wrap_err("invalid Gemini endpoint")?;
    let source = GeminiHttpSource::new(endpoint, key, settings.ai_timeout())
        .wrap_err("failed to build Gemini client")?;
    Ok(Some(Arc::new(source)))
}

/// Postgres-backed state when a database URL is set, in-memory otherwise.
async fn build_state(settings: &AppSettings, shared: &SharedAdapters) -> Result<HttpState> {
    let admin_password = settings.bootstrap_admin_password();
    let admin_password = admin_password.as_deref().map(String::as_str);

    let Some(url) = settings.database_url.as_deref() else {
        warn!("no database configured; data is kept in memory and lost on restart");
        return Ok(MemoryRepositories::in_memory()
            .into_http_state(shared, admin_password)
            .await?);
    };

    run_migrations(url).await.wrap_err("database migrations failed")?;
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
        .await
        .wrap_err("failed to build database pool")?;
    Ok(DieselRepositories::diesel(&pool)
        .into_http_state(shared, admin_password)
        .await?)
}
