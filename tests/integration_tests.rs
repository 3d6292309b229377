use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::NaiveTime;
use classroom_booking::settings::Settings;
use classroom_booking::store::Store;
use classroom_booking::{AppState, build_router};
use http::Method;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::Service;

const TEACHER: &str = "teacher-token-123";
const ADMIN: &str = "admin-token-456";

/// Helper function to create a router over a store holding only the bootstrap accounts
fn create_test_app() -> Router {
    let settings = Settings {
        debug: true,
        auth_token: TEACHER.to_string(),
        admin_token: ADMIN.to_string(),
        enable_swagger: true,
        port: 8080,
        day_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        day_end: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        slot_minutes: 30,
        seed_demo_data: false,
    };
    let store = Arc::new(Store::with_accounts(&settings));
    let state = AppState::new(settings, store).unwrap();
    build_router(state)
}

/// Helper to send a request and decode the JSON body (Null when empty)
async fn send(
    app: &mut Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.call(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

/// Helper to create a building and a classroom, returning the classroom id
async fn create_classroom(app: &mut Router) -> String {
    let (status, building) = send(
        app,
        Method::POST,
        "/api/buildings",
        Some(ADMIN),
        Some(json!({"name": "Engineering Building", "location": "North Campus", "floors": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, classroom) = send(
        app,
        Method::POST,
        "/api/classrooms",
        Some(ADMIN),
        Some(json!({
            "buildingId": building["id"],
            "name": "E101",
            "capacity": 35,
            "hasProjector": true,
            "hasAC": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    classroom["id"].as_str().unwrap().to_string()
}

fn booking_body(classroom_id: &str, start: &str, end: &str) -> Value {
    json!({
        "classroomId": classroom_id,
        "date": "2025-04-20",
        "startTime": start,
        "endTime": end,
        "purpose": "Introduction to Programming Lecture",
        "attendees": 30
    })
}

#[tokio::test]
async fn test_root_endpoint() {
    // Arrange
    let mut app = create_test_app();

    // Act
    let (status, body) = send(&mut app, Method::GET, "/", None, None).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Classroom Booking API");
}

#[tokio::test]
async fn test_healthz() {
    let mut app = create_test_app();

    let (live, body) = send(&mut app, Method::GET, "/healthz/live", None, None).await;
    assert_eq!(live, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (ready, _) = send(&mut app, Method::GET, "/healthz/ready", None, None).await;
    assert_eq!(ready, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_and_invalid_token() {
    let mut app = create_test_app();

    let (status, _) = send(&mut app, Method::GET, "/api/buildings", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&mut app, Method::GET, "/api/buildings?token=nope", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &mut app,
        Method::GET,
        &format!("/api/buildings?token={TEACHER}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_teacher_cannot_manage_buildings() {
    let mut app = create_test_app();

    let (status, body) = send(
        &mut app,
        Method::POST,
        "/api/buildings",
        Some(TEACHER),
        Some(json!({"name": "Science Building", "location": "East Campus"})),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");
}

#[tokio::test]
async fn test_booking_lifecycle_and_conflicts() {
    // Arrange
    let mut app = create_test_app();
    let room = create_classroom(&mut app).await;

    // Act - teacher booking lands as pending
    let (status, first) = send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(TEACHER),
        Some(booking_body(&room, "09:00", "11:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["status"], "pending");
    assert_eq!(first["startTime"], "09:00");
    assert_eq!(first["requesterName"], "Teacher User");

    // Overlapping request is refused
    let (status, body) = send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(TEACHER),
        Some(booking_body(&room, "10:00", "12:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains(first["id"].as_str().unwrap())
    );

    // Touching ranges on both sides are accepted; admin bookings are confirmed
    let (status, after) = send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(ADMIN),
        Some(booking_body(&room, "11:00", "12:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(after["status"], "confirmed");

    let (status, _) = send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(TEACHER),
        Some(booking_body(&room, "08:00", "09:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Assert - teachers see their own bookings, admins see all of them
    let (status, list) = send(
        &mut app,
        Method::GET,
        &format!("/api/bookings?classroomId={room}&date=2025-04-20"),
        Some(TEACHER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (_, list) = send(
        &mut app,
        Method::GET,
        &format!("/api/bookings?classroomId={room}&date=2025-04-20"),
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_keeps_own_slot() {
    let mut app = create_test_app();
    let room = create_classroom(&mut app).await;
    let (_, booking) = send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(TEACHER),
        Some(booking_body(&room, "09:00", "11:00")),
    )
    .await;
    let id = booking["id"].as_str().unwrap();

    let (status, updated) = send(
        &mut app,
        Method::PUT,
        &format!("/api/bookings/{id}"),
        Some(TEACHER),
        Some(json!({"startTime": "09:00", "endTime": "11:00", "purpose": "Midterm review"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["purpose"], "Midterm review");

    let (status, body) = send(
        &mut app,
        Method::PUT,
        &format!("/api/bookings/{id}"),
        Some(TEACHER),
        Some(json!({"startTime": "12:00"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "startTime must be before endTime");
}

#[tokio::test]
async fn test_invalid_booking_requests() {
    let mut app = create_test_app();
    let room = create_classroom(&mut app).await;

    let (status, body) = send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(TEACHER),
        Some(booking_body(&room, "11:00", "09:00")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "startTime must be before endTime");

    let (status, _) = send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(TEACHER),
        Some(booking_body(
            "00000000-0000-0000-0000-000000000000",
            "09:00",
            "10:00",
        )),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &mut app,
        Method::GET,
        "/api/bookings/00000000-0000-0000-0000-000000000000",
        Some(TEACHER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_availability_grid() {
    let mut app = create_test_app();
    let room = create_classroom(&mut app).await;
    let (_, booking) = send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(ADMIN),
        Some(booking_body(&room, "09:00", "11:00")),
    )
    .await;

    let (status, view) = send(
        &mut app,
        Method::GET,
        &format!("/api/availability/{room}?date=2025-04-20"),
        Some(TEACHER),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["classroom"]["name"], "E101");
    assert_eq!(view["building"]["name"], "Engineering Building");
    let slots = view["timeSlots"].as_array().unwrap();
    assert_eq!(slots.len(), 24);
    assert_eq!(slots[0]["start"], "08:00");
    assert_eq!(slots[0]["end"], "08:30");
    assert_eq!(slots[23]["end"], "20:00");
    assert_eq!(slots[2]["isAvailable"], false);
    assert_eq!(slots[2]["booking"]["id"], booking["id"]);
    assert_eq!(slots[6]["isAvailable"], true);
    assert!(slots[6].get("booking").is_none());

    // Same inputs, same grid
    let (_, again) = send(
        &mut app,
        Method::GET,
        &format!("/api/availability/{room}?date=2025-04-20"),
        Some(TEACHER),
        None,
    )
    .await;
    assert_eq!(view["timeSlots"], again["timeSlots"]);
}

#[tokio::test]
async fn test_availability_requires_date_and_known_room() {
    let mut app = create_test_app();
    let room = create_classroom(&mut app).await;

    let (status, body) = send(
        &mut app,
        Method::GET,
        &format!("/api/availability/{room}"),
        Some(TEACHER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Date is required");

    let (status, _) = send(
        &mut app,
        Method::GET,
        "/api/availability/00000000-0000-0000-0000-000000000000?date=2025-04-20",
        Some(TEACHER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancelled_booking_frees_slot() {
    let mut app = create_test_app();
    let room = create_classroom(&mut app).await;
    let (_, booking) = send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(TEACHER),
        Some(booking_body(&room, "09:00", "11:00")),
    )
    .await;
    let id = booking["id"].as_str().unwrap();

    // Only administrators change status
    let (status, _) = send(
        &mut app,
        Method::PUT,
        &format!("/api/bookings/{id}/status"),
        Some(TEACHER),
        Some(json!({"status": "cancelled"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, cancelled) = send(
        &mut app,
        Method::PUT,
        &format!("/api/bookings/{id}/status"),
        Some(ADMIN),
        Some(json!({"status": "cancelled"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");

    let (status, _) = send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(TEACHER),
        Some(booking_body(&room, "10:00", "11:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // The slot is taken again, so the cancelled booking cannot be revived
    let (status, _) = send(
        &mut app,
        Method::PUT,
        &format!("/api/bookings/{id}/status"),
        Some(ADMIN),
        Some(json!({"status": "confirmed"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_guards() {
    let mut app = create_test_app();
    let room = create_classroom(&mut app).await;
    let (_, booking) = send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(TEACHER),
        Some(booking_body(&room, "09:00", "10:00")),
    )
    .await;

    let (status, _) = send(
        &mut app,
        Method::DELETE,
        &format!("/api/classrooms/{room}"),
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &mut app,
        Method::DELETE,
        &format!("/api/bookings/{}", booking["id"].as_str().unwrap()),
        Some(TEACHER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &mut app,
        Method::DELETE,
        &format!("/api/classrooms/{room}"),
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_concurrent_requests_for_same_slot() {
    let mut app = create_test_app();
    let room = create_classroom(&mut app).await;

    let handles: Vec<_> = (0..12)
        .map(|_| {
            let mut app = app.clone();
            let body = booking_body(&room, "14:00", "15:30");
            tokio::spawn(async move {
                send(&mut app, Method::POST, "/api/bookings", Some(TEACHER), Some(body))
                    .await
                    .0
            })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 11);
}

#[tokio::test]
async fn test_openapi_served_when_enabled() {
    let mut app = create_test_app();

    let (status, doc) = send(&mut app, Method::GET, "/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/api/bookings").is_some());
    assert!(doc["paths"].get("/api/users").is_some());
}

/// Helper for an admin to open a second teacher account, returning (id, token)
async fn create_teacher(app: &mut Router, name: &str, email: &str) -> (String, String) {
    let (status, created) = send(
        app,
        Method::POST,
        "/api/users",
        Some(ADMIN),
        Some(json!({"name": name, "email": email, "department": "Physics"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    (
        created["user"]["id"].as_str().unwrap().to_string(),
        created["token"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn test_malformed_time_in_body_is_json_bad_request() {
    let mut app = create_test_app();
    let room = create_classroom(&mut app).await;

    let (status, body) = send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(TEACHER),
        Some(booking_body(&room, "9am", "11:00")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("expected HH:MM"));

    let (status, body) = send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(TEACHER),
        Some(json!({"classroomId": room, "date": "2025-04-20"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_query_and_path_are_json_bad_request() {
    let mut app = create_test_app();
    let room = create_classroom(&mut app).await;

    let (status, body) = send(
        &mut app,
        Method::GET,
        &format!("/api/availability/{room}?date=20-04-2025"),
        Some(TEACHER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &mut app,
        Method::GET,
        "/api/bookings/not-a-uuid",
        Some(TEACHER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &mut app,
        Method::GET,
        "/api/bookings?status=archived",
        Some(TEACHER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_only_admins_list_users() {
    let mut app = create_test_app();

    let (status, users) = send(&mut app, Method::GET, "/api/users", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("token").is_none()));

    let (status, body) = send(&mut app, Method::GET, "/api/users", Some(TEACHER), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");
}

#[tokio::test]
async fn test_current_user() {
    let mut app = create_test_app();

    let (status, me) = send(&mut app, Method::GET, "/api/users/me", Some(TEACHER), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["name"], "Teacher User");
    assert_eq!(me["role"], "teacher");
    assert_eq!(me["status"], "active");
}

#[tokio::test]
async fn test_created_user_can_authenticate() {
    let mut app = create_test_app();
    let (id, token) = create_teacher(&mut app, "Marie Curie", "curie@campus.example").await;

    let (status, me) = send(&mut app, Method::GET, "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], id.as_str());
    assert_eq!(me["department"], "Physics");

    let (status, body) = send(
        &mut app,
        Method::POST,
        "/api/users",
        Some(ADMIN),
        Some(json!({"name": "Someone", "email": "curie@campus.example"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already exists");

    let (status, _) = send(
        &mut app,
        Method::POST,
        "/api/users",
        Some(TEACHER),
        Some(json!({"name": "Someone", "email": "someone@campus.example"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_user_updates_respect_roles() {
    let mut app = create_test_app();
    let (_, me) = send(&mut app, Method::GET, "/api/users/me", Some(TEACHER), None).await;
    let teacher_id = me["id"].as_str().unwrap().to_string();
    let (_, admin) = send(&mut app, Method::GET, "/api/users/me", Some(ADMIN), None).await;
    let admin_id = admin["id"].as_str().unwrap().to_string();

    // Self-service profile edits are allowed
    let (status, updated) = send(
        &mut app,
        Method::PUT,
        &format!("/api/users/{teacher_id}"),
        Some(TEACHER),
        Some(json!({"phone": "555-0100", "bio": "Teaches programming"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["phone"], "555-0100");

    // ...but not promoting oneself
    let (status, body) = send(
        &mut app,
        Method::PUT,
        &format!("/api/users/{teacher_id}"),
        Some(TEACHER),
        Some(json!({"role": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Cannot change role");

    // ...nor editing somebody else
    let (status, _) = send(
        &mut app,
        Method::PUT,
        &format!("/api/users/{admin_id}"),
        Some(TEACHER),
        Some(json!({"name": "Hijacked"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &mut app,
        Method::PUT,
        "/api/users/00000000-0000-0000-0000-000000000000",
        Some(ADMIN),
        Some(json!({"name": "Nobody"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // An admin deactivating an account locks its token out
    let (status, updated) = send(
        &mut app,
        Method::PUT,
        &format!("/api/users/{teacher_id}"),
        Some(ADMIN),
        Some(json!({"status": "inactive"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "inactive");

    let (status, _) = send(&mut app, Method::GET, "/api/buildings", Some(TEACHER), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_teacher_cannot_touch_another_teachers_booking() {
    // Arrange
    let mut app = create_test_app();
    let room = create_classroom(&mut app).await;
    let (other_id, other) = create_teacher(&mut app, "Marie Curie", "curie@campus.example").await;
    let (_, booking) = send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(TEACHER),
        Some(booking_body(&room, "09:00", "10:00")),
    )
    .await;
    let id = booking["id"].as_str().unwrap();
    let uri = format!("/api/bookings/{id}");

    // Act & Assert
    let (status, body) = send(&mut app, Method::GET, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");

    let (status, _) = send(
        &mut app,
        Method::PUT,
        &uri,
        Some(&other),
        Some(json!({"purpose": "Taken over"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&mut app, Method::DELETE, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The other teacher's default listing does not include it
    let (_, list) = send(&mut app, Method::GET, "/api/bookings", Some(&other), None).await;
    assert_eq!(list, json!([]));

    // The owner still holds it, and an admin may edit it
    let (status, same) = send(&mut app, Method::GET, &uri, Some(TEACHER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(same["purpose"], booking["purpose"]);

    let (status, edited) = send(
        &mut app,
        Method::PUT,
        &uri,
        Some(ADMIN),
        Some(json!({"purpose": "Department meeting"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["purpose"], "Department meeting");
    assert_ne!(edited["userId"], other_id.as_str());

    let (status, _) = send(&mut app, Method::DELETE, &uri, Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_admin_lists_bookings_by_user() {
    let mut app = create_test_app();
    let room = create_classroom(&mut app).await;
    let (other_id, other) = create_teacher(&mut app, "Marie Curie", "curie@campus.example").await;
    send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(TEACHER),
        Some(booking_body(&room, "09:00", "10:00")),
    )
    .await;
    let (_, theirs) = send(
        &mut app,
        Method::POST,
        "/api/bookings",
        Some(&other),
        Some(booking_body(&room, "10:00", "11:00")),
    )
    .await;

    let (status, list) = send(
        &mut app,
        Method::GET,
        &format!("/api/bookings?userId={other_id}"),
        Some(ADMIN),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([theirs]));
}
