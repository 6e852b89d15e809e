//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
pub(crate) use metrics::build_metrics;
pub(crate) use state_builders::{DieselRepositories, MemoryRepositories, SharedAdapters};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use frontdesk::Trace;
#[cfg(debug_assertions)]
use frontdesk::doc::ApiDoc;
use frontdesk::inbound::http::configure_api;
use frontdesk::inbound::http::error::{json_config, path_config, query_config};
use frontdesk::inbound::http::health::{HealthState, live, ready};
use frontdesk::inbound::http::state::HttpState;
use frontdesk::inbound::ws::{WsState, ws_entry};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    ws_state: web::Data<WsState>,
}

/// One worker's application.
///
/// The session middleware wraps the whole app so `/ws` can read the same
/// cookie as `/api/v1`; probes and docs ignore it.
fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        ws_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(ws_state)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(web::scope("/api/v1").configure(configure_api))
        .service(ws_entry)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server.
///
/// Readiness is left to the caller so it can flip only after the listener is
/// bound and every adapter has started.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        session,
        http_state,
        ws_state,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;
    let deps = AppDependencies {
        health_state,
        http_state: web::Data::new(http_state),
        ws_state: web::Data::new(ws_state),
    };

    let server = HttpServer::new(move || {
        let app = build_app(deps.clone())
            .wrap(session.middleware())
            .wrap(Trace);

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
