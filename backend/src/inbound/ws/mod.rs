//! WebSocket change feed at `/ws`.
//!
//! The upgrade requires a signed-in session and an `Origin` on the
//! configured allow-list. Once open, every committed write is pushed as a
//! JSON frame; see [`messages::FeedFrame`].

use actix_web::http::header::ORIGIN;
use actix_web::web::{self, Payload};
use actix_web::{HttpRequest, HttpResponse, get};
use tracing::{error, warn};
use url::Url;

use crate::domain::Error;
use crate::inbound::http::session::SessionContext;

mod session;

pub mod messages;
pub mod state;

pub use state::{OriginAllowList, WsState};

/// Upgrade to the change feed.
#[get("/ws")]
pub async fn ws_entry(
    state: web::Data<WsState>,
    auth: SessionContext,
    req: HttpRequest,
    stream: Payload,
) -> Result<HttpResponse, Error> {
    check_origin(&state.origins, &req)?;
    let user_id = auth.require_user_id()?;

    let (response, session, messages) = actix_ws::handle(&req, stream).map_err(|err| {
        error!(error = %err, "websocket upgrade failed");
        Error::invalid_request("websocket upgrade failed")
    })?;
    let events = state.feed.subscribe();
    tracing::debug!(%user_id, "change feed subscriber connected");
    actix_web::rt::spawn(session::run(session, messages, events));
    Ok(response)
}

fn check_origin(origins: &OriginAllowList, req: &HttpRequest) -> Result<(), Error> {
    let mut headers = req.headers().get_all(ORIGIN);
    let header = headers
        .next()
        .ok_or_else(|| Error::forbidden("origin not allowed"))?;
    if headers.next().is_some() {
        return Err(Error::invalid_request("multiple Origin headers"));
    }
    let origin = header
        .to_str()
        .ok()
        .and_then(|raw| Url::parse(raw).ok())
        .ok_or_else(|| Error::invalid_request("invalid Origin header"))?;
    if origins.allows(&origin) {
        Ok(())
    } else {
        warn!(origin = %origin, "rejected websocket upgrade from disallowed origin");
        Err(Error::forbidden("origin not allowed"))
    }
}
