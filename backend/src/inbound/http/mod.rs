//! HTTP inbound adapter exposing the front office REST API.

pub mod assistant;
pub mod auth;
pub mod billing;
pub mod cache_control;
pub mod error;
pub mod guests;
pub mod health;
pub mod payroll;
pub mod reports;
pub mod reservations;
pub mod rooms;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// Literal segments such as `/guests/export` are registered ahead of the
/// `{id}` routes they would otherwise be captured by.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::logout)
        .service(auth::current_user)
        .service(users::list_users)
        .service(users::create_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(rooms::list_rooms)
        .service(rooms::create_room)
        .service(rooms::set_room_status)
        .service(rooms::get_room)
        .service(rooms::update_room)
        .service(rooms::board)
        .service(guests::export_guests)
        .service(guests::import_guests)
        .service(guests::list_guests)
        .service(guests::create_guest)
        .service(guests::attach_id_image)
        .service(guests::settle)
        .service(guests::get_guest)
        .service(guests::update_guest)
        .service(guests::delete_guest)
        .service(billing::invoice)
        .service(reservations::check_in)
        .service(reservations::collect_payment)
        .service(reservations::check_out)
        .service(reservations::cancel)
        .service(reservations::list_reservations)
        .service(reservations::create_reservation)
        .service(reservations::get_reservation)
        .service(reservations::update_reservation)
        .service(reservations::delete_reservation)
        .service(billing::list_invoices)
        .service(billing::list_transactions)
        .service(billing::record_transaction)
        .service(reports::daily_report)
        .service(reports::save_token)
        .service(reports::close_day)
        .service(payroll::list_staff)
        .service(payroll::create_staff)
        .service(payroll::update_staff)
        .service(payroll::delete_staff)
        .service(payroll::summary)
        .service(payroll::generate_cycle)
        .service(payroll::payment_grid)
        .service(payroll::set_payment_status)
        .service(payroll::delete_payment)
        .service(assistant::briefing)
        .service(assistant::refine_notes)
        .service(assistant::analyse);
}
