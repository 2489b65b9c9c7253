// dine-client/tests/layout_api.rs
// End-to-end against an in-process fake of the restaurant API

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::routing::{get, post};
use axum::{Json, Router};
use dine_client::{
    ApiClient, BookingPicker, ClientConfig, ClientError, LayoutBackend, LayoutEditor,
    NetworkHttpClient, Session,
};
use dine_floor::{ItemId, PixelDelta, TableType};
use serde_json::{Value, json};

const ADMIN_TOKEN: &str = "admin-token";

#[derive(Default)]
struct ServerState {
    layouts: HashMap<i64, Vec<Value>>,
    next_id: i64,
    availability_queries: Vec<HashMap<String, String>>,
    booked: Vec<i64>,
    last_auth: Option<String>,
}

type Shared = Arc<Mutex<ServerState>>;
type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn fail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "data": null, "error": message })))
}

fn is_admin(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {ADMIN_TOKEN}"))
}

/// Rows come back with every column, unused ones as null
fn to_row(restaurant_id: i64, id: i64, item: &Value) -> Value {
    let column = |name: &str| item.get(name).cloned().unwrap_or(Value::Null);
    json!({
        "id": id,
        "restaurant_id": restaurant_id,
        "type": column("type"),
        "x_coordinate": column("x_coordinate"),
        "y_coordinate": column("y_coordinate"),
        "table_number": column("table_number"),
        "table_type": column("table_type"),
        "capacity": column("capacity"),
        "shape": column("shape"),
        "name": column("name"),
        "width": column("width"),
        "height": column("height"),
        "color": column("color"),
    })
}

async fn list_restaurants() -> Json<Value> {
    Json(json!({ "data": [restaurant_row(1)], "error": null }))
}

fn restaurant_row(id: i64) -> Value {
    json!({
        "id": id,
        "name": "Trattoria",
        "location": "Harbour Rd",
        "cuisine": "Italian",
        "capacity": 40,
        "average_price": null,
        "opening_time": "17:00",
        "closing_time": null,
        "image_url": null,
    })
}

async fn get_restaurant(Path(id): Path<i64>) -> ApiResult {
    if id != 1 {
        return Err(fail(StatusCode::NOT_FOUND, "Restaurant not found"));
    }
    Ok(Json(json!({ "data": restaurant_row(id), "error": null })))
}

async fn get_layout(State(state): State<Shared>, Path(id): Path<i64>) -> Json<Value> {
    let state = state.lock().unwrap();
    let rows = state.layouts.get(&id).cloned().unwrap_or_default();
    Json(json!({ "data": rows, "error": null }))
}

async fn put_layout(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult {
    if !is_admin(&headers) {
        return Err(fail(StatusCode::FORBIDDEN, "Admin access required"));
    }
    let mut state = state.lock().unwrap();
    let items = body["layout"].as_array().cloned().unwrap_or_default();
    let mut rows = Vec::with_capacity(items.len());
    for item in &items {
        let row_id = match item.get("id").and_then(Value::as_i64) {
            Some(existing) => existing,
            None => {
                state.next_id += 1;
                state.next_id
            }
        };
        rows.push(to_row(id, row_id, item));
    }
    state.layouts.insert(id, rows);
    Ok(Json(json!({
        "data": { "message": "Layout updated successfully" },
        "error": null,
    })))
}

async fn suggest_layout(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if !is_admin(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({
        "data": [
            { "id": 500, "type": "table", "x_coordinate": 20, "y_coordinate": 20,
              "table_number": 1, "table_type": "standard", "capacity": 2, "shape": "circle" },
        ],
        "error": null,
    })))
}

async fn availability(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let mut state = state.lock().unwrap();
    state.last_auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let restaurant_id: i64 = params
        .get("restaurant_id")
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();
    state.availability_queries.push(params);

    let free: Vec<i64> = state
        .layouts
        .get(&restaurant_id)
        .into_iter()
        .flatten()
        .filter(|row| row["type"] == "table")
        .filter_map(|row| row["id"].as_i64())
        .filter(|id| !state.booked.contains(id))
        .collect();
    Json(json!({ "data": { "available_tables": free }, "error": null }))
}

async fn create_booking(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut state = state.lock().unwrap();
    let layout_id = body["layout_id"].as_i64().unwrap_or_default();
    if state.booked.contains(&layout_id) {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({ "error": "Table is already booked for this time" })),
        ));
    }
    state.booked.push(layout_id);
    Ok(Json(json!({ "message": "Booking successful, email sent!" })))
}

async fn spawn_server() -> (String, Shared) {
    let state = Shared::default();
    {
        let mut seeded = state.lock().unwrap();
        seeded.next_id = 100;
        seeded.layouts.insert(
            1,
            vec![
                to_row(
                    1,
                    1,
                    &json!({ "type": "table", "x_coordinate": 20.0, "y_coordinate": 30.0,
                             "table_number": 1, "table_type": "vip", "capacity": 4,
                             "shape": "circle" }),
                ),
                to_row(
                    1,
                    2,
                    &json!({ "type": "table", "x_coordinate": 60.0, "y_coordinate": 30.0,
                             "table_number": 2, "table_type": "standard", "capacity": 2,
                             "shape": "rectangle" }),
                ),
                to_row(
                    1,
                    3,
                    &json!({ "type": "furniture", "x_coordinate": 80.0, "y_coordinate": 5.0,
                             "name": "Bar", "width": 15.0, "height": 10.0,
                             "color": "#4a5568" }),
                ),
            ],
        );
    }

    let app = Router::new()
        .route("/api/restaurants", get(list_restaurants))
        .route("/api/restaurants/{id}", get(get_restaurant))
        .route("/api/restaurants/{id}/layout", get(get_layout).put(put_layout))
        .route("/api/restaurants/{id}/suggest-layout", post(suggest_layout))
        .route("/api/bookings/availability", get(availability))
        .route("/api/bookings", post(create_booking))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api"), state)
}

fn api(base_url: &str, session: &Session) -> ApiClient<NetworkHttpClient> {
    let http = ClientConfig::new(base_url)
        .with_timeout(5)
        .build_http_client(session)
        .unwrap();
    ApiClient::new(http)
}

#[tokio::test]
async fn test_list_restaurants() {
    let (base, _state) = spawn_server().await;
    let client = api(&base, &Session::anonymous());

    let restaurants = client.restaurants().await.unwrap();
    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0].subtitle(), "Harbour Rd • Italian");
    assert_eq!(restaurants[0].opening_time.as_deref(), Some("17:00"));
}

#[tokio::test]
async fn test_load_parses_null_columns() {
    let (base, _state) = spawn_server().await;
    let mut editor = LayoutEditor::new(api(&base, &Session::anonymous()));
    editor.load(1).await.unwrap();

    assert_eq!(editor.restaurant().unwrap().name, "Trattoria");
    assert_eq!(editor.items().len(), 3);
    assert!(!editor.is_dirty());

    let vip = editor.store().get(ItemId::Persisted(1)).unwrap();
    assert_eq!(vip.as_table().unwrap().table_type, TableType::Vip);
    let bar = editor.store().get(ItemId::Persisted(3)).unwrap();
    assert_eq!(bar.as_furniture().unwrap().name, "Bar");
}

#[tokio::test]
async fn test_save_and_reload_round_trip() {
    let (base, state) = spawn_server().await;
    let mut editor = LayoutEditor::new(api(&base, &Session::with_token(ADMIN_TOKEN)));
    editor.load(1).await.unwrap();

    let added = editor.add_table_from_form(TableType::Booth, "6").unwrap();
    assert!(added.is_provisional());
    assert!(editor.begin_drag(ItemId::Persisted(2)));
    editor.end_drag(PixelDelta::new(80.0, 60.0)).unwrap();
    assert!(editor.is_dirty());

    let message = editor.save().await.unwrap();
    assert_eq!(message, "Layout updated successfully");
    assert!(!editor.is_dirty());

    // Provisional ids never reach the server
    {
        let state = state.lock().unwrap();
        let rows = &state.layouts[&1];
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3]["id"], 101);
        assert_eq!(rows[3]["table_type"], "booth");
        assert_eq!(rows[3]["table_number"], 3);
    }

    let mut reloaded = LayoutEditor::new(api(&base, &Session::anonymous()));
    reloaded.load(1).await.unwrap();
    let moved = reloaded.store().get(ItemId::Persisted(2)).unwrap();
    assert!((moved.x_coordinate - 70.0).abs() < 1e-9);
    assert!((moved.y_coordinate - 40.0).abs() < 1e-9);
    let booth = reloaded.store().get(ItemId::Persisted(101)).unwrap();
    assert_eq!(booth.as_table().unwrap().capacity, 6);
}

#[tokio::test]
async fn test_save_error_message_shown_verbatim() {
    let (base, state) = spawn_server().await;
    let mut editor = LayoutEditor::new(api(&base, &Session::with_token("guest-token")));
    editor.load(1).await.unwrap();
    editor.remove_item(ItemId::Persisted(3));

    let err = editor.save().await.unwrap_err();
    assert!(err.is_save());
    assert_eq!(err.to_string(), "Admin access required");
    // Local edits survive for a retry
    assert!(editor.is_dirty());
    assert_eq!(editor.items().len(), 2);
    assert_eq!(state.lock().unwrap().layouts[&1].len(), 3);
}

#[tokio::test]
async fn test_load_error_message_shown_verbatim() {
    let (base, _state) = spawn_server().await;
    let mut editor = LayoutEditor::new(api(&base, &Session::anonymous()));

    let err = editor.load(9).await.unwrap_err();
    assert!(err.is_load());
    assert_eq!(err.to_string(), "Restaurant not found");
}

#[tokio::test]
async fn test_unauthorized_without_body() {
    let (base, _state) = spawn_server().await;
    let client = api(&base, &Session::anonymous());

    let err = client.suggest_layout(1).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn test_suggest_layout_with_token() {
    let (base, _state) = spawn_server().await;
    let mut editor = LayoutEditor::new(api(&base, &Session::with_token(ADMIN_TOKEN)));
    editor.load(1).await.unwrap();

    editor.suggest_layout().await.unwrap();
    assert_eq!(editor.items().len(), 1);
    assert!(editor.is_dirty());
}

#[tokio::test]
async fn test_availability_and_booking_flow() {
    let (base, state) = spawn_server().await;
    let session = Session::with_token("guest-token").with_user(shared::UserInfo {
        id: 42,
        name: "Ada".into(),
        email: "ada@example.com".into(),
        is_admin: false,
    });
    // UTC+1
    let mut picker = BookingPicker::with_offset_minutes(api(&base, &session), session, -60);
    picker.load(1).await.unwrap();
    picker.set_date("2025-06-01T20:30").await.unwrap();

    {
        let state = state.lock().unwrap();
        let query = state.availability_queries.last().unwrap();
        assert_eq!(query["restaurant_id"], "1");
        assert_eq!(query["date"], "2025-06-01T19:30");
        assert_eq!(state.last_auth.as_deref(), Some("Bearer guest-token"));
    }

    assert!(picker.select(ItemId::Persisted(2)));
    let message = picker.book(2, None).await.unwrap();
    assert_eq!(message, "Booking successful, email sent!");

    // Refreshed after booking: table 2 is gone
    assert!(!picker.select(ItemId::Persisted(2)));
    assert!(picker.select(ItemId::Persisted(1)));
}

#[tokio::test]
async fn test_booking_conflict_message() {
    let (base, state) = spawn_server().await;
    state.lock().unwrap().booked.push(1);
    let session = Session::with_token("guest-token").with_user(shared::UserInfo {
        id: 42,
        name: "Ada".into(),
        email: "ada@example.com".into(),
        is_admin: false,
    });
    let mut picker = BookingPicker::with_offset_minutes(api(&base, &session), session, 0);
    picker.load(1).await.unwrap();
    picker.set_date("2025-06-01T20:30").await.unwrap();

    // Table 1 is not offered; table 2 gets taken after the picker saw it free
    assert!(!picker.select(ItemId::Persisted(1)));
    assert!(picker.select(ItemId::Persisted(2)));
    state.lock().unwrap().booked.push(2);

    let err = picker.book(2, None).await.unwrap_err();
    assert_eq!(err.to_string(), "Table is already booked for this time");
}

#[tokio::test]
async fn test_unmodified_save_reloads_identical() {
    let (base, _state) = spawn_server().await;
    let mut editor = LayoutEditor::new(api(&base, &Session::with_token(ADMIN_TOKEN)));
    editor.load(1).await.unwrap();
    let before = editor.items().to_vec();

    editor.save().await.unwrap();
    editor.load(1).await.unwrap();
    assert_eq!(editor.items(), before.as_slice());
}
