use axum::extract::State;
use axum::{Json, http::StatusCode, response::IntoResponse};
use axum_extra::extract::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    AppState,
    auth::{require_admin, require_owner_or_admin, verify_token},
    error::ApiError,
    extract::{AppJson, AppPath, AppQuery},
    models::{
        AvailabilityResponse, Booking, BookingPatch, BookingStatus, Building, BuildingPatch,
        Classroom, ClassroomPatch, CreatedUser, NewBooking, NewBuilding, NewClassroom, NewUser,
        StatusChange, User, UserPatch,
    },
    store::BookingFilter,
    validation::validate_name,
};

type BearerHeader = Option<TypedHeader<Authorization<Bearer>>>;

#[derive(Debug, serde::Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomQuery {
    pub building_id: Option<Uuid>,
}

#[derive(Debug, serde::Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<NaiveDate>,
}

async fn authorize(
    state: &AppState,
    auth: BearerHeader,
    query: &TokenQuery,
) -> Result<User, ApiError> {
    let auth_header = auth.map(|TypedHeader(a)| a);
    verify_token(&state.store, auth_header, query.token.as_deref()).await
}

#[utoipa::path(get, path = "/", tag = "meta")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Classroom Booking API",
        "endpoints": {
            "/api/users": "Accounts (admin)",
            "/api/buildings": "Campus buildings",
            "/api/classrooms": "Bookable classrooms",
            "/api/bookings": "Classroom bookings",
            "/api/availability/{classroomId}?date=YYYY-MM-DD": "Slot availability for a classroom"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "meta")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "meta")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All accounts", body = [User]),
        (status = 403, description = "Access denied")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authorize(&state, auth, &token).await?;
    require_admin(&user)?;
    Ok(Json(state.store.list_users().await))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "Account created; the token is shown only once", body = CreatedUser),
        (status = 400, description = "Invalid account"),
        (status = 403, description = "Access denied"),
        (status = 409, description = "Email already exists")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppJson(body): AppJson<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authorize(&state, auth, &token).await?;
    require_admin(&user)?;
    validate_name("name", &body.name)?;
    validate_name("email", &body.email)?;

    let access_token = Uuid::new_v4().simple().to_string();
    let user = state.store.create_user(body, access_token.clone()).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedUser {
            user,
            token: access_token,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "The calling account", body = User),
        (status = 401, description = "Invalid authentication token")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "users"
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(authorize(&state, auth, &token).await?))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "Account updated", body = User),
        (status = 403, description = "Access denied, or a non-admin tried to change role or status"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already exists")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<UserPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authorize(&state, auth, &token).await?;
    let target = state.store.get_user(id).await?;
    require_owner_or_admin(&user, target.id)?;
    if !user.is_admin() && (body.role.is_some() || body.status.is_some()) {
        return Err(ApiError::Forbidden("Cannot change role".into()));
    }
    if let Some(name) = &body.name {
        validate_name("name", name)?;
    }
    if let Some(email) = &body.email {
        validate_name("email", email)?;
    }
    Ok(Json(state.store.update_user(id, body).await?))
}

#[utoipa::path(
    get,
    path = "/api/buildings",
    responses(
        (status = 200, description = "All buildings", body = [Building]),
        (status = 401, description = "Invalid authentication token")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "buildings"
)]
pub async fn list_buildings(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(&state, auth, &token).await?;
    Ok(Json(state.store.list_buildings().await))
}

#[utoipa::path(
    post,
    path = "/api/buildings",
    request_body = NewBuilding,
    responses(
        (status = 201, description = "Building created", body = Building),
        (status = 400, description = "Invalid building"),
        (status = 403, description = "Access denied")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "buildings"
)]
pub async fn create_building(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppJson(body): AppJson<NewBuilding>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authorize(&state, auth, &token).await?;
    require_admin(&user)?;
    validate_name("name", &body.name)?;
    validate_name("location", &body.location)?;

    let building = state.store.create_building(body).await;
    Ok((StatusCode::CREATED, Json(building)))
}

#[utoipa::path(
    put,
    path = "/api/buildings/{id}",
    params(("id" = Uuid, Path, description = "Building id")),
    request_body = BuildingPatch,
    responses(
        (status = 200, description = "Building updated", body = Building),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Building not found")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "buildings"
)]
pub async fn update_building(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<BuildingPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authorize(&state, auth, &token).await?;
    require_admin(&user)?;
    if let Some(name) = &body.name {
        validate_name("name", name)?;
    }
    Ok(Json(state.store.update_building(id, body).await?))
}

#[utoipa::path(
    delete,
    path = "/api/buildings/{id}",
    params(("id" = Uuid, Path, description = "Building id")),
    responses(
        (status = 204, description = "Building deleted"),
        (status = 404, description = "Building not found"),
        (status = 409, description = "Building still has classrooms")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "buildings"
)]
pub async fn delete_building(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authorize(&state, auth, &token).await?;
    require_admin(&user)?;
    state.store.delete_building(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/classrooms",
    params(("buildingId" = Option<Uuid>, Query, description = "Only classrooms in this building")),
    responses(
        (status = 200, description = "Classrooms", body = [Classroom]),
        (status = 401, description = "Invalid authentication token")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "classrooms"
)]
pub async fn list_classrooms(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppQuery(query): AppQuery<ClassroomQuery>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(&state, auth, &token).await?;
    Ok(Json(state.store.list_classrooms(query.building_id).await))
}

#[utoipa::path(
    post,
    path = "/api/classrooms",
    request_body = NewClassroom,
    responses(
        (status = 201, description = "Classroom created", body = Classroom),
        (status = 400, description = "Invalid classroom or unknown building"),
        (status = 403, description = "Access denied")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "classrooms"
)]
pub async fn create_classroom(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppJson(body): AppJson<NewClassroom>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authorize(&state, auth, &token).await?;
    require_admin(&user)?;
    validate_name("name", &body.name)?;

    let classroom = state.store.create_classroom(body).await?;
    Ok((StatusCode::CREATED, Json(classroom)))
}

#[utoipa::path(
    put,
    path = "/api/classrooms/{id}",
    params(("id" = Uuid, Path, description = "Classroom id")),
    request_body = ClassroomPatch,
    responses(
        (status = 200, description = "Classroom updated", body = Classroom),
        (status = 400, description = "Unknown building"),
        (status = 404, description = "Classroom not found")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "classrooms"
)]
pub async fn update_classroom(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<ClassroomPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authorize(&state, auth, &token).await?;
    require_admin(&user)?;
    if let Some(name) = &body.name {
        validate_name("name", name)?;
    }
    Ok(Json(state.store.update_classroom(id, body).await?))
}

#[utoipa::path(
    delete,
    path = "/api/classrooms/{id}",
    params(("id" = Uuid, Path, description = "Classroom id")),
    responses(
        (status = 204, description = "Classroom deleted"),
        (status = 404, description = "Classroom not found"),
        (status = 409, description = "Classroom still has bookings")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "classrooms"
)]
pub async fn delete_classroom(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authorize(&state, auth, &token).await?;
    require_admin(&user)?;
    state.store.delete_classroom(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    params(BookingFilter),
    responses(
        (status = 200, description = "Matching bookings; non-admins default to their own", body = [Booking]),
        (status = 401, description = "Invalid authentication token")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "bookings"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppQuery(mut filter): AppQuery<BookingFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authorize(&state, auth, &token).await?;
    if !user.is_admin() && filter.user_id.is_none() {
        filter.user_id = Some(user.id);
    }
    Ok(Json(state.store.list_bookings(&filter).await))
}

#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking", body = Booking),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Booking not found")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "bookings"
)]
pub async fn get_booking(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authorize(&state, auth, &token).await?;
    let booking = state.store.get_booking(id).await?;
    require_owner_or_admin(&user, booking.user_id)?;
    Ok(Json(booking))
}

#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = NewBooking,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Invalid booking or unknown classroom"),
        (status = 409, description = "Classroom is not available for the selected time")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppJson(body): AppJson<NewBooking>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authorize(&state, auth, &token).await?;
    let status = if user.is_admin() {
        BookingStatus::Confirmed
    } else {
        BookingStatus::Pending
    };
    let booking = state.store.create_booking(body, &user, status).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking id")),
    request_body = BookingPatch,
    responses(
        (status = 200, description = "Booking updated", body = Booking),
        (status = 400, description = "Invalid time range or unknown classroom"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Classroom is not available for the selected time")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "bookings"
)]
pub async fn update_booking(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<BookingPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authorize(&state, auth, &token).await?;
    let booking = state.store.get_booking(id).await?;
    require_owner_or_admin(&user, booking.user_id)?;
    Ok(Json(state.store.update_booking(id, body).await?))
}

#[utoipa::path(
    put,
    path = "/api/bookings/{id}/status",
    params(("id" = Uuid, Path, description = "Booking id")),
    request_body = StatusChange,
    responses(
        (status = 200, description = "Status changed", body = Booking),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Slot was taken while the booking was cancelled")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "bookings"
)]
pub async fn update_booking_status(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<StatusChange>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authorize(&state, auth, &token).await?;
    require_admin(&user)?;
    Ok(Json(state.store.set_status(id, body.status).await?))
}

#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Booking not found")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "bookings"
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = authorize(&state, auth, &token).await?;
    let booking = state.store.get_booking(id).await?;
    require_owner_or_admin(&user, booking.user_id)?;
    state.store.delete_booking(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/availability/{classroom_id}",
    params(
        ("classroom_id" = Uuid, Path, description = "Classroom id"),
        ("date" = String, Query, description = "Day to inspect (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Slot grid for the day", body = AvailabilityResponse),
        (status = 400, description = "Date is required"),
        (status = 404, description = "Classroom not found")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "availability"
)]
pub async fn get_availability(
    State(state): State<AppState>,
    auth: BearerHeader,
    AppQuery(token): AppQuery<TokenQuery>,
    AppPath(classroom_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<AvailabilityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(&state, auth, &token).await?;
    let date = query
        .date
        .ok_or_else(|| ApiError::BadRequest("Date is required".into()))?;

    let view = state
        .store
        .availability(classroom_id, date, &state.grid)
        .await?;
    Ok(Json(view))
}
