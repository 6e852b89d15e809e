//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    Assistant, BillingDesk, FiscalReports, GuestLedger, LoginService, PayrollAdmin, RoomCatalogue,
    StayWorkflow, UserAdmin,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use actix_web::web;
/// use frontdesk::inbound::http::state::HttpState;
///
/// fn register(state: HttpState) -> web::Data<HttpState> {
///     web::Data::new(state)
/// }
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UserAdmin>,
    pub rooms: Arc<dyn RoomCatalogue>,
    pub stays: Arc<dyn StayWorkflow>,
    pub guests: Arc<dyn GuestLedger>,
    pub billing: Arc<dyn BillingDesk>,
    pub reports: Arc<dyn FiscalReports>,
    pub payroll: Arc<dyn PayrollAdmin>,
    pub assistant: Arc<dyn Assistant>,
}
