//! Staff account administration.
//!
//! ```text
//! GET    /api/v1/users
//! POST   /api/v1/users {"email":"desk@hotelfountain.com","name":"Rahim","role":"FRONT_DESK","password":"secret1"}
//! PUT    /api/v1/users/{id} {"role":"ACCOUNTANT"}
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::ports::{NewUser, UserChanges};
use crate::domain::{EmailAddress, Role, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, non_blank, parse_id, parse_label, parse_optional_label,
};

const ROLE: FieldName = FieldName::new("role");

/// New account body.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    #[schema(example = "FRONT_DESK")]
    pub role: String,
    pub password: String,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = crate::domain::Error;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            email: EmailAddress::new(&value.email)?,
            name: value.name,
            role: parse_label::<Role>(&value.role, ROLE)?,
            password: Zeroizing::new(value.password),
        })
    }
}

/// Account changes. Omitted fields stay as they are.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    /// New password; blank keeps the current one.
    pub password: Option<String>,
}

impl TryFrom<UpdateUserRequest> for UserChanges {
    type Error = crate::domain::Error;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            role: parse_optional_label(value.role.as_deref(), ROLE)?,
            password: non_blank(value.password).map(Zeroizing::new),
        })
    }
}

fn user_id(raw: &str) -> Result<UserId, crate::domain::Error> {
    parse_id(raw, FieldName::new("id"))
}

/// List staff accounts.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Accounts", body = [UserSchema]),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let users = state.users.list_users(&actor).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(users))
}

/// Create a staff account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let request = NewUser::try_from(payload.into_inner())?;
    let user = state.users.create_user(&actor, request).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Change an account's name, role or password.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "Account id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema),
        (status = 404, description = "Unknown account", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let id = user_id(&path)?;
    let changes = UserChanges::try_from(payload.into_inner())?;
    let user = state.users.update_user(&actor, &id, changes).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Remove an account other than the caller's own.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Cannot delete own account", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema),
        (status = 404, description = "Unknown account", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let id = user_id(&path)?;
    state.users.delete_user(&actor, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
