//! Everything `create_server` needs, assembled before the listener binds.

use std::net::SocketAddr;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use frontdesk::inbound::http::session_config::SessionSettings;
use frontdesk::inbound::http::state::HttpState;
use frontdesk::inbound::ws::WsState;

pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) session: SessionSettings,
    pub(crate) http_state: HttpState,
    pub(crate) ws_state: WsState,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: PrometheusMetrics,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        session: SessionSettings,
        http_state: HttpState,
        ws_state: WsState,
        #[cfg(feature = "metrics")] prometheus: PrometheusMetrics,
    ) -> Self {
        Self {
            bind_addr,
            session,
            http_state,
            ws_state,
            #[cfg(feature = "metrics")]
            prometheus,
        }
    }
}
