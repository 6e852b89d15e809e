//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test as actix_test, web};

use crate::domain::ports::{
    MockAssistant, MockBillingDesk, MockFiscalReports, MockGuestLedger, MockLoginService,
    MockPayrollAdmin, MockRoomCatalogue, MockStayWorkflow, MockUserAdmin,
};
use crate::domain::test_fixtures;
use crate::domain::{Error, Role, User, UserId};
use crate::inbound::http::error::{json_config, path_config, query_config};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// One mock per driving port; tests set expectations on the ones they touch.
#[derive(Default)]
pub(crate) struct TestPorts {
    pub login: MockLoginService,
    pub users: MockUserAdmin,
    pub rooms: MockRoomCatalogue,
    pub stays: MockStayWorkflow,
    pub guests: MockGuestLedger,
    pub billing: MockBillingDesk,
    pub reports: MockFiscalReports,
    pub payroll: MockPayrollAdmin,
    pub assistant: MockAssistant,
}

impl TestPorts {
    /// Ports whose login service resolves every session to a `role` account.
    pub(crate) fn signed_in(role: Role) -> (Self, User) {
        let user = test_fixtures::user(role);
        let mut ports = Self::default();
        let resolved = user.clone();
        ports
            .login
            .expect_current_user()
            .returning(move |_| Ok(resolved.clone()));
        (ports, user)
    }

    pub(crate) fn into_state(self) -> HttpState {
        HttpState {
            login: Arc::new(self.login),
            users: Arc::new(self.users),
            rooms: Arc::new(self.rooms),
            stays: Arc::new(self.stays),
            guests: Arc::new(self.guests),
            billing: Arc::new(self.billing),
            reports: Arc::new(self.reports),
            payroll: Arc::new(self.payroll),
            assistant: Arc::new(self.assistant),
        }
    }
}

async fn sign_in_route(
    session: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let id: UserId = path
        .parse()
        .map_err(|_| Error::invalid_request("test sign-in needs a UUID"))?;
    session.persist_user(&id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Application with the full `/api/v1` surface over mocked ports.
///
/// `POST /test/sign-in/{id}` stores a user id in the session without going
/// through the login handler.
pub(crate) fn test_app(
    ports: TestPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(test_session_middleware())
        .route("/test/sign-in/{id}", web::post().to(sign_in_route))
        .service(web::scope("/api/v1").configure(super::configure_api))
}

/// Obtain a session cookie for `user`.
pub(crate) async fn sign_in<S, B>(app: &S, user: &User) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = actix_test::TestRequest::post()
        .uri(&format!("/test/sign-in/{}", user.id))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "test sign-in failed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
