use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use fellowship::config::Config;
use fellowship::routes;
use fellowship::state::AppState;
use fellowship::storage::{seed, MemStorage};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Router over seeded in-memory storage with a cheap bcrypt cost.
fn test_app() -> Router {
    let mut config = Config::default();
    config.auth.bcrypt_cost = 4;

    let mut storage = MemStorage::new();
    seed::load(&mut storage).unwrap();
    routes::router(AppState::new(config, storage))
}

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    Reply {
        status,
        headers,
        body,
    }
}

/// `name=value` part of the session `Set-Cookie` header.
fn session_cookie(reply: &Reply) -> String {
    let raw = reply
        .headers
        .get(header::SET_COOKIE)
        .expect("no Set-Cookie header")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

async fn register(app: &Router, username: &str, role: Option<&str>) -> (Value, String) {
    let mut payload = json!({
        "username": username,
        "password": "hunter2",
        "displayName": format!("{} Display", username),
    });
    if let Some(role) = role {
        payload["role"] = json!(role);
    }

    let reply = send(app, Method::POST, "/api/register", None, Some(payload)).await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    let cookie = session_cookie(&reply);
    (reply.body, cookie)
}

fn church_payload(name: &str) -> Value {
    json!({
        "name": name,
        "description": "A church in the city",
        "location": "Springfield",
        "leadPastorName": "Pastor Grace",
        "streamingDays": ["Sunday"],
        "streamingTimes": []
    })
}

// --- Auth ---

#[tokio::test]
async fn register_signs_in_with_server_defaults() {
    let app = test_app();
    let (user, cookie) = register(&app, "ruth", None).await;

    assert_eq!(user["username"], "ruth");
    assert_eq!(user["level"], 1);
    assert_eq!(user["levelProgress"], 0);
    assert_eq!(user["role"], "member");
    assert!(user.get("password").is_none(), "password must not be serialized");
    assert!(cookie.starts_with("fellowship_session="));

    let me = send(&app, Method::GET, "/api/user", Some(&cookie), None).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["id"], user["id"]);
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = test_app();
    register(&app, "ruth", None).await;

    let reply = send(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({ "username": "ruth", "password": "x", "displayName": "Other" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "Username already exists");
}

#[tokio::test]
async fn register_rejects_server_owned_fields() {
    let app = test_app();
    let reply = send(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({
            "username": "boaz",
            "password": "x",
            "displayName": "Boaz",
            "level": 9
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        reply.body["error"],
        json!([{ "field": "level", "message": "unrecognized field" }])
    );
}

#[tokio::test]
async fn login_checks_password() {
    let app = test_app();
    register(&app, "naomi", None).await;

    let wrong = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "naomi", "password": "nope" })),
    )
    .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let unknown = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "nobody", "password": "hunter2" })),
    )
    .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);

    let ok = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "naomi", "password": "hunter2" })),
    )
    .await;
    assert_eq!(ok.status, StatusCode::OK);
    let cookie = session_cookie(&ok);

    let me = send(&app, Method::GET, "/api/user", Some(&cookie), None).await;
    assert_eq!(me.body["username"], "naomi");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = test_app();
    let (_, cookie) = register(&app, "eli", None).await;

    let reply = send(&app, Method::POST, "/api/logout", Some(&cookie), None).await;
    assert_eq!(reply.status, StatusCode::OK);

    let me = send(&app, Method::GET, "/api/user", Some(&cookie), None).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn writes_require_a_session() {
    let app = test_app();
    let reply = send(
        &app,
        Method::POST,
        "/api/prayer-requests",
        None,
        Some(json!({ "content": "Pray for rain" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["error"], "Unauthorized");

    let bogus = send(
        &app,
        Method::GET,
        "/api/user",
        Some("fellowship_session=deadbeef"),
        None,
    )
    .await;
    assert_eq!(bogus.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_reject_members() {
    let app = test_app();
    let (_, cookie) = register(&app, "member", None).await;

    let reply = send(
        &app,
        Method::POST,
        "/api/churches",
        Some(&cookie),
        Some(church_payload("Grace Chapel")),
    )
    .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);

    let churches = send(&app, Method::GET, "/api/churches", None, None).await;
    assert_eq!(churches.body, json!([]));
}

// --- Validation ---

#[tokio::test]
async fn invalid_payload_reports_every_field() {
    let app = test_app();
    let (_, admin) = register(&app, "admin", Some("admin")).await;

    let reply = send(
        &app,
        Method::POST,
        "/api/churches",
        Some(&admin),
        Some(json!({ "name": 5, "streamingDays": ["Sunday", 7], "id": 3 })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let fields: Vec<&str> = reply.body["error"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec![
            "name",
            "description",
            "location",
            "leadPastorName",
            "streamingDays[1]",
            "id"
        ]
    );
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = test_app();
    let (_, cookie) = register(&app, "amos", None).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/discussions")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

// --- Content ---

#[tokio::test]
async fn content_defaults_author_and_filters_by_type() {
    let app = test_app();
    let (admin_user, admin) = register(&app, "admin", Some("admin")).await;

    let created = send(
        &app,
        Method::POST,
        "/api/content",
        Some(&admin),
        Some(json!({
            "title": "The Prodigal Son",
            "description": "Luke 15",
            "type": "sermon",
            "content": "...",
            "tags": []
        })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["authorId"], admin_user["id"]);
    assert_eq!(created.body["parts"], 1);
    assert_eq!(created.body["tags"], json!([]));
    assert_eq!(created.body["duration"], Value::Null);

    let sermons = send(&app, Method::GET, "/api/content/sermon", None, None).await;
    assert_eq!(sermons.body.as_array().unwrap().len(), 1);

    let podcasts = send(&app, Method::GET, "/api/content/podcast", None, None).await;
    assert_eq!(podcasts.body, json!([]));

    let unknown = send(&app, Method::GET, "/api/content/hymnal", None, None).await;
    assert_eq!(unknown.status, StatusCode::OK);
    assert_eq!(unknown.body, json!([]));
}

// --- Prayer requests & discussions ---

#[tokio::test]
async fn prayer_request_flow() {
    let app = test_app();
    let (user, cookie) = register(&app, "hannah", None).await;

    let created = send(
        &app,
        Method::POST,
        "/api/prayer-requests",
        Some(&cookie),
        Some(json!({ "content": "For my family", "userId": 999 })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["userId"], user["id"]);
    assert_eq!(created.body["prayerCount"], 0);
    assert_eq!(created.body["commentCount"], 0);

    let id = created.body["id"].as_i64().unwrap();
    let pray_uri = format!("/api/prayer-requests/{}/pray", id);

    let prayed = send(
        &app,
        Method::POST,
        &pray_uri,
        Some(&cookie),
        Some(json!({ "count": 1 })),
    )
    .await;
    assert_eq!(prayed.status, StatusCode::OK);
    assert_eq!(prayed.body["prayerCount"], 1);
    assert_eq!(prayed.body["content"], "For my family");

    let negative = send(
        &app,
        Method::POST,
        &pray_uri,
        Some(&cookie),
        Some(json!({ "count": -1 })),
    )
    .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);

    let missing = send(
        &app,
        Method::POST,
        "/api/prayer-requests/4242/pray",
        Some(&cookie),
        Some(json!({ "count": 3 })),
    )
    .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "Prayer request not found");
}

#[tokio::test]
async fn discussions_list_newest_first() {
    let app = test_app();
    let (_, cookie) = register(&app, "lydia", None).await;

    for title in ["First", "Second"] {
        let reply = send(
            &app,
            Method::POST,
            "/api/discussions",
            Some(&cookie),
            Some(json!({ "title": title, "category": "General" })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::CREATED);
        assert_eq!(reply.body["replyCount"], 0);
    }

    // Identical timestamps fall back to insertion order, so only the set is
    // certain when both land in the same instant.
    let list = send(&app, Method::GET, "/api/discussions", None, None).await;
    let titles: Vec<&str> = list
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"First") && titles.contains(&"Second"));
}

// --- Events ---

#[tokio::test]
async fn events_are_listed_soonest_first() {
    let app = test_app();
    let (_, admin) = register(&app, "admin", Some("admin")).await;

    let created = send(
        &app,
        Method::POST,
        "/api/events",
        Some(&admin),
        Some(json!({
            "title": "Prayer Breakfast",
            "description": "Pancakes and prayer",
            "date": "2023-06-10",
            "startTime": "7:00 AM",
            "endTime": "8:30 AM",
            "location": "Fellowship Hall"
        })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);

    let events = send(&app, Method::GET, "/api/events", None, None).await;
    let titles: Vec<&str> = events
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles.len(), 4);
    assert_eq!(titles[0], "Prayer Breakfast");
    assert_eq!(titles[1], "Sunday Worship Service");
}

#[tokio::test]
async fn event_with_unparseable_date_is_rejected() {
    let app = test_app();
    let (_, admin) = register(&app, "admin", Some("admin")).await;

    let reply = send(
        &app,
        Method::POST,
        "/api/events",
        Some(&admin),
        Some(json!({
            "title": "Picnic",
            "description": "Bring food",
            "date": "next tuesday",
            "startTime": "noon",
            "endTime": "3 PM",
            "location": "Park"
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"][0]["field"], "date");
}

// --- Achievements & progress ---

#[tokio::test]
async fn repeated_awards_list_once() {
    let app = test_app();
    let (_, cookie) = register(&app, "timothy", None).await;

    let catalog = send(&app, Method::GET, "/api/achievements", None, None).await;
    assert_eq!(catalog.body.as_array().unwrap().len(), 3);
    assert_eq!(catalog.body[0]["name"], "Scripture Reader");

    let mut ids = Vec::new();
    for _ in 0..2 {
        let reply = send(
            &app,
            Method::POST,
            "/api/user-achievements",
            Some(&cookie),
            Some(json!({ "achievementId": 1 })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::CREATED);
        ids.push(reply.body["id"].as_i64().unwrap());
    }
    assert_ne!(ids[0], ids[1]);

    let mine = send(&app, Method::GET, "/api/user-achievements", Some(&cookie), None).await;
    assert_eq!(mine.status, StatusCode::OK);
    let mine = mine.body.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["name"], "Scripture Reader");
}

#[tokio::test]
async fn user_progress_is_bounded() {
    let app = test_app();
    let (_, cookie) = register(&app, "silas", None).await;

    let too_high = send(
        &app,
        Method::POST,
        "/api/user-progress",
        Some(&cookie),
        Some(json!({ "levelProgress": 101 })),
    )
    .await;
    assert_eq!(too_high.status, StatusCode::BAD_REQUEST);
    assert_eq!(too_high.body["error"][0]["field"], "levelProgress");

    let ok = send(
        &app,
        Method::POST,
        "/api/user-progress",
        Some(&cookie),
        Some(json!({ "levelProgress": 55 })),
    )
    .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["levelProgress"], 55);
    assert_eq!(ok.body["level"], 1);
}

// --- Church directory ---

#[tokio::test]
async fn church_directory_flow() {
    let app = test_app();
    let (_, admin) = register(&app, "admin", Some("admin")).await;

    let missing = send(&app, Method::GET, "/api/churches/42", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "Church not found");

    let church = send(
        &app,
        Method::POST,
        "/api/churches",
        Some(&admin),
        Some(church_payload("Grace Chapel")),
    )
    .await;
    assert_eq!(church.status, StatusCode::CREATED, "{}", church.body);
    assert_eq!(church.body["streamingDays"], json!(["Sunday"]));
    assert_eq!(church.body["streamingTimes"], json!([]));
    assert_eq!(church.body["logoUrl"], Value::Null);
    let church_id = church.body["id"].as_i64().unwrap();

    let campus = send(
        &app,
        Method::POST,
        "/api/campuses",
        Some(&admin),
        Some(json!({
            "churchId": church_id,
            "name": "Downtown",
            "address": "1 Main St",
            "city": "Springfield",
            "state": "IL",
            "zipCode": "62701"
        })),
    )
    .await;
    assert_eq!(campus.status, StatusCode::CREATED, "{}", campus.body);
    assert_eq!(campus.body["serviceSchedule"], Value::Null);

    let orphan = send(
        &app,
        Method::POST,
        "/api/campuses",
        Some(&admin),
        Some(json!({
            "churchId": 999,
            "name": "Nowhere",
            "address": "0 Empty Rd",
            "city": "Ghost",
            "state": "NV",
            "zipCode": "00000"
        })),
    )
    .await;
    assert_eq!(orphan.status, StatusCode::NOT_FOUND);

    let fetched = send(
        &app,
        Method::GET,
        &format!("/api/churches/{}", church_id),
        None,
        None,
    )
    .await;
    assert_eq!(fetched.body["name"], "Grace Chapel");

    let campuses = send(
        &app,
        Method::GET,
        &format!("/api/churches/{}/campuses", church_id),
        None,
        None,
    )
    .await;
    assert_eq!(campuses.body.as_array().unwrap().len(), 1);
    assert_eq!(campuses.body[0]["name"], "Downtown");

    let none = send(&app, Method::GET, "/api/churches/999/campuses", None, None).await;
    assert_eq!(none.body, json!([]));
}

#[tokio::test]
async fn non_numeric_ids_answer_json_not_found() {
    let app = test_app();
    let (_, cookie) = register(&app, "phoebe", None).await;

    let church = send(&app, Method::GET, "/api/churches/abc", None, None).await;
    assert_eq!(church.status, StatusCode::NOT_FOUND);
    assert_eq!(church.headers[header::CONTENT_TYPE], "application/json");
    assert!(church.body["error"].is_string());

    let campuses = send(&app, Method::GET, "/api/churches/abc/campuses", None, None).await;
    assert_eq!(campuses.status, StatusCode::NOT_FOUND);
    assert!(campuses.body["error"].is_string());

    let pray = send(
        &app,
        Method::POST,
        "/api/prayer-requests/abc/pray",
        Some(&cookie),
        Some(json!({ "count": 1 })),
    )
    .await;
    assert_eq!(pray.status, StatusCode::NOT_FOUND);
    assert!(pray.body["error"].is_string());
}

#[tokio::test]
async fn null_author_defaults_to_admin() {
    let app = test_app();
    let (admin_user, admin) = register(&app, "admin", Some("admin")).await;

    let created = send(
        &app,
        Method::POST,
        "/api/content",
        Some(&admin),
        Some(json!({
            "title": "t",
            "description": "d",
            "type": "sermon",
            "content": "c",
            "authorId": null
        })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["authorId"], admin_user["id"]);
}
