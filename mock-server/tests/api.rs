use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, ErrorResponse, LineResponse, PathResponse, StationResponse};
use tower::{Service, ServiceExt};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

async fn send(app: &mut Router, req: Request<String>) -> axum::response::Response {
    ServiceExt::<Request<String>>::ready(app)
        .await
        .unwrap()
        .call(req)
        .await
        .unwrap()
}

async fn create_station(app: &mut Router, name: &str) -> i64 {
    let body = format!(r#"{{"name":"{name}"}}"#);
    let resp = send(app, json_request("POST", "/stations", &body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json::<StationResponse>(resp).await.id
}

fn line_body(
    name: &str,
    color: &str,
    up: i64,
    down: i64,
    distance: u32,
    extra_fare: u32,
) -> String {
    serde_json::json!({
        "name": name,
        "color": color,
        "upStationId": up,
        "downStationId": down,
        "distance": distance,
        "extraFare": extra_fare,
    })
    .to_string()
}

async fn post_line(app: &mut Router, body: String) -> axum::response::Response {
    send(app, json_request("POST", "/lines", &body)).await
}

// --- details ---

#[tokio::test]
async fn line_details_empty() {
    let resp = app().oneshot(get("/lines/details")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let lines: Vec<LineResponse> = body_json(resp).await;
    assert!(lines.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_line_with_unknown_station_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/lines", &line_body("1호선", "bg-blue-600", 1, 2, 10, 0)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: ErrorResponse = body_json(resp).await;
    assert_eq!(err.message, "station does not exist");
}

#[tokio::test]
async fn create_line_missing_fields_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/lines", r#"{"name":"1호선"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_line_rejects_duplicates_and_zero_distance() {
    let mut app = app();
    let a = create_station(&mut app, "강남역").await;
    let b = create_station(&mut app, "역삼역").await;

    let resp = post_line(&mut app, line_body("2호선", "green", a, b, 0, 0)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = post_line(&mut app, line_body("2호선", "green", a, b, 5, 0)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = post_line(&mut app, line_body("2호선", "red", a, b, 5, 0)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: ErrorResponse = body_json(resp).await;
    assert_eq!(err.message, "duplicate line name");

    let resp = post_line(&mut app, line_body("신분당선", "green", a, b, 5, 0)).await;
    let err: ErrorResponse = body_json(resp).await;
    assert_eq!(err.message, "duplicate line color");
}

// --- delete ---

#[tokio::test]
async fn delete_line_not_found() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/lines/1")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- paths ---

#[tokio::test]
async fn find_path_unknown_station_returns_json_error() {
    let resp = app()
        .oneshot(get("/paths?source=1&target=2&pathType=DISTANCE"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: ErrorResponse = body_json(resp).await;
    assert_eq!(err.message, "station does not exist");
}

#[tokio::test]
async fn find_path_missing_query_returns_400() {
    let resp = app().oneshot(get("/paths?source=1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- full lifecycle ---

#[tokio::test]
async fn line_and_path_lifecycle() {
    let mut app = app();
    let gangnam = create_station(&mut app, "강남역").await;
    let yeoksam = create_station(&mut app, "역삼역").await;
    let seolleung = create_station(&mut app, "선릉역").await;

    // two lines sharing 역삼역
    let resp = post_line(&mut app, line_body("2호선", "green", gangnam, yeoksam, 12, 0)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers()[http::header::LOCATION], "/lines/1");
    let created: LineResponse = body_json(resp).await;
    assert_eq!(created.stations.len(), 2);

    let resp = post_line(&mut app, line_body("신분당선", "red", yeoksam, seolleung, 5, 900)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // details list both lines in id order
    let resp = send(&mut app, get("/lines/details")).await;
    let lines: Vec<LineResponse> = body_json(resp).await;
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].name, "2호선");
    assert_eq!(lines[1].extra_fare, 900);
    assert_eq!(lines[1].stations[1].name, "선릉역");

    // path crosses both lines: 17km, base + 2 * 100 + 900
    let resp = send(
        &mut app,
        get(&format!("/paths?source={gangnam}&target={seolleung}&pathType=DISTANCE")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let path: PathResponse = body_json(resp).await;
    let names: Vec<&str> = path.stations.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["강남역", "역삼역", "선릉역"]);
    assert_eq!(path.distance, 17);
    assert_eq!(path.fare, 2350);

    // delete the second line
    let resp = send(
        &mut app,
        Request::builder()
            .method("DELETE")
            .uri("/lines/2")
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // no route left to 선릉역
    let resp = send(
        &mut app,
        get(&format!("/paths?source={gangnam}&target={seolleung}&pathType=DISTANCE")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: ErrorResponse = body_json(resp).await;
    assert_eq!(err.message, "stations are not connected");
}
