//! Room catalogue, housekeeping status and the status board.
//!
//! ```text
//! GET  /api/v1/rooms
//! POST /api/v1/rooms {"number":"305","category":"Royal Suite","rate":1200000}
//! GET  /api/v1/rooms/{number}
//! PUT  /api/v1/rooms/{number} {"rate":600000}
//! PUT  /api/v1/rooms/{number}/status {"status":"DIRTY"}
//! GET  /api/v1/board?date=2025-03-10&category=All&status=OCCUPIED
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::NewRoom;
use crate::domain::{
    BoardFilter, BoardSelector, Error, Money, RoomCategory, RoomChanges, RoomNumber, RoomStatus,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{ErrorSchema, RoomBoardSchema, RoomSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_label, parse_optional_date, parse_optional_label, parse_room_number,
};

const NUMBER: FieldName = FieldName::new("number");
const CATEGORY: FieldName = FieldName::new("category");
const STATUS: FieldName = FieldName::new("status");

/// New room body. Status defaults to `AVAILABLE`.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[schema(example = "305")]
    pub number: String,
    #[schema(example = "Royal Suite")]
    pub category: String,
    /// Nightly rate in paisa.
    #[schema(value_type = i64, example = 1_200_000)]
    pub rate: Money,
    pub status: Option<String>,
}

impl TryFrom<CreateRoomRequest> for NewRoom {
    type Error = Error;

    fn try_from(value: CreateRoomRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            number: parse_room_number(&value.number, NUMBER)?,
            category: parse_label(&value.category, CATEGORY)?,
            rate: value.rate,
            status: parse_optional_label(value.status.as_deref(), STATUS)?
                .unwrap_or(RoomStatus::Available),
        })
    }
}

/// Catalogue changes; omitted fields are kept.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    pub category: Option<String>,
    #[schema(value_type = Option<i64>)]
    pub rate: Option<Money>,
}

impl TryFrom<UpdateRoomRequest> for RoomChanges {
    type Error = Error;

    fn try_from(value: UpdateRoomRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            category: parse_optional_label::<RoomCategory>(value.category.as_deref(), CATEGORY)?,
            rate: value.rate,
        })
    }
}

/// Housekeeping status change.
#[derive(Deserialize, ToSchema)]
pub struct RoomStatusRequest {
    #[schema(example = "DIRTY")]
    pub status: String,
}

/// Status board query.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BoardQuery {
    /// Board date, `YYYY-MM-DD`; defaults to today.
    pub date: Option<String>,
    /// Room category or `All`.
    pub category: Option<String>,
    /// Effective status or `All`.
    pub status: Option<String>,
}

impl BoardQuery {
    fn filter(&self) -> Result<BoardFilter, Error> {
        Ok(BoardFilter {
            category: selector(self.category.as_deref(), CATEGORY)?,
            status: selector(self.status.as_deref(), STATUS)?,
        })
    }
}

fn selector<T>(raw: Option<&str>, field: FieldName) -> Result<BoardSelector<T>, Error>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(Ok(BoardSelector::All), |value| parse_label(value, field))
}

fn room_number(path: &str) -> Result<RoomNumber, Error> {
    parse_room_number(path, NUMBER)
}

/// Every room ordered by number.
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    responses(
        (status = 200, description = "Rooms", body = [RoomSchema]),
        (status = 401, description = "Not signed in", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "listRooms"
)]
#[get("/rooms")]
pub async fn list_rooms(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_user(&state).await?;
    let rooms = state.rooms.list_rooms().await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(rooms))
}

/// Add a room to the catalogue.
#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Created", body = RoomSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema),
        (status = 409, description = "Room number taken", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "createRoom"
)]
#[post("/rooms")]
pub async fn create_room(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateRoomRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let room = NewRoom::try_from(payload.into_inner())?;
    let created = state.rooms.create_room(&actor, room).await?;
    Ok(HttpResponse::Created().json(created))
}

/// One room.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{number}",
    params(("number" = String, Path, description = "Room number")),
    responses(
        (status = 200, description = "Room", body = RoomSchema),
        (status = 404, description = "Unknown room", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "getRoom"
)]
#[get("/rooms/{number}")]
pub async fn get_room(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_user(&state).await?;
    let number = room_number(&path)?;
    let room = state.rooms.get_room(&number).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(room))
}

/// Change a room's category or rate.
#[utoipa::path(
    put,
    path = "/api/v1/rooms/{number}",
    params(("number" = String, Path, description = "Room number")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Updated", body = RoomSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema),
        (status = 404, description = "Unknown room", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "updateRoom"
)]
#[put("/rooms/{number}")]
pub async fn update_room(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateRoomRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let number = room_number(&path)?;
    let changes = RoomChanges::try_from(payload.into_inner())?;
    let room = state.rooms.update_room(&actor, &number, changes).await?;
    Ok(HttpResponse::Ok().json(room))
}

/// Set housekeeping or maintenance status.
#[utoipa::path(
    put,
    path = "/api/v1/rooms/{number}/status",
    params(("number" = String, Path, description = "Room number")),
    request_body = RoomStatusRequest,
    responses(
        (status = 200, description = "Updated", body = RoomSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown room", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "setRoomStatus"
)]
#[put("/rooms/{number}/status")]
pub async fn set_room_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<RoomStatusRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let number = room_number(&path)?;
    let status: RoomStatus = parse_label(&payload.status, STATUS)?;
    let room = state.rooms.set_room_status(&actor, &number, status).await?;
    Ok(HttpResponse::Ok().json(room))
}

/// Status board with effective statuses for a date.
#[utoipa::path(
    get,
    path = "/api/v1/board",
    params(BoardQuery),
    responses(
        (status = 200, description = "Board", body = RoomBoardSchema),
        (status = 400, description = "Invalid filter", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "roomBoard"
)]
#[get("/board")]
pub async fn board(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<BoardQuery>,
) -> ApiResult<HttpResponse> {
    session.require_user(&state).await?;
    let date = parse_optional_date(query.date.as_deref(), FieldName::new("date"))?;
    let filter = query.filter()?;
    let board = state.rooms.board(date, filter).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(board))
}
