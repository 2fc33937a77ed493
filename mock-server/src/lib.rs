use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StationResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineResponse {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub extra_fare: u32,
    pub stations: Vec<StationResponse>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathResponse {
    pub stations: Vec<StationResponse>,
    pub distance: u32,
    pub fare: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Deserialize)]
pub struct StationRequest {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSaveRequest {
    pub name: String,
    pub color: String,
    pub up_station_id: i64,
    pub down_station_id: i64,
    pub distance: u32,
    #[serde(default)]
    pub extra_fare: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathParams {
    pub source: i64,
    pub target: i64,
    pub path_type: String,
}

#[derive(Clone, Debug)]
struct Section {
    up: i64,
    down: i64,
    distance: u32,
}

#[derive(Clone, Debug)]
struct Line {
    id: i64,
    name: String,
    color: String,
    extra_fare: u32,
    /// Ordered from the up-most terminal to the down-most terminal.
    sections: Vec<Section>,
}

#[derive(Default)]
pub struct Store {
    next_station_id: i64,
    next_line_id: i64,
    stations: HashMap<i64, String>,
    lines: HashMap<i64, Line>,
}

pub type Db = Arc<RwLock<Store>>;

/// Error answered as `{"message": ...}` with the given status.
pub struct ServerError(StatusCode, String);

impl ServerError {
    fn bad_request(message: &str) -> Self {
        Self(StatusCode::BAD_REQUEST, message.to_string())
    }

    fn not_found(message: &str) -> Self {
        Self(StatusCode::NOT_FOUND, message.to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.0, Json(ErrorResponse { message: self.1 })).into_response()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/stations", post(create_station))
        .route("/lines", post(create_line))
        .route("/lines/details", get(line_details))
        .route("/lines/{id}", delete(delete_line))
        .route("/paths", get(find_path))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn create_station(
    State(db): State<Db>,
    Json(input): Json<StationRequest>,
) -> Result<(StatusCode, Json<StationResponse>), ServerError> {
    let mut store = db.write().await;
    if store.stations.values().any(|name| *name == input.name) {
        return Err(ServerError::bad_request("duplicate station name"));
    }
    store.next_station_id += 1;
    let id = store.next_station_id;
    store.stations.insert(id, input.name.clone());
    info!("created station {id} ({})", input.name);
    Ok((StatusCode::CREATED, Json(StationResponse { id, name: input.name })))
}

async fn create_line(
    State(db): State<Db>,
    Json(input): Json<LineSaveRequest>,
) -> Result<Response, ServerError> {
    let mut store = db.write().await;
    if store.lines.values().any(|line| line.name == input.name) {
        return Err(ServerError::bad_request("duplicate line name"));
    }
    if store.lines.values().any(|line| line.color == input.color) {
        return Err(ServerError::bad_request("duplicate line color"));
    }
    if input.distance == 0 {
        return Err(ServerError::bad_request("section distance must be at least 1"));
    }
    if input.up_station_id == input.down_station_id {
        return Err(ServerError::bad_request("section stations must differ"));
    }
    for id in [input.up_station_id, input.down_station_id] {
        if !store.stations.contains_key(&id) {
            return Err(ServerError::bad_request("station does not exist"));
        }
    }

    store.next_line_id += 1;
    let line = Line {
        id: store.next_line_id,
        name: input.name,
        color: input.color,
        extra_fare: input.extra_fare,
        sections: vec![Section {
            up: input.up_station_id,
            down: input.down_station_id,
            distance: input.distance,
        }],
    };
    let body = line_response(&store, &line);
    store.lines.insert(line.id, line);
    info!("created line {} ({})", body.id, body.name);

    let location = format!("/lines/{}", body.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response())
}

async fn line_details(State(db): State<Db>) -> Json<Vec<LineResponse>> {
    let store = db.read().await;
    let mut lines: Vec<&Line> = store.lines.values().collect();
    lines.sort_by_key(|line| line.id);
    Json(lines.into_iter().map(|line| line_response(&store, line)).collect())
}

async fn delete_line(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, ServerError> {
    let mut store = db.write().await;
    store
        .lines
        .remove(&id)
        .map(|_| {
            info!("deleted line {id}");
            StatusCode::NO_CONTENT
        })
        .ok_or_else(|| ServerError::not_found("line does not exist"))
}

async fn find_path(
    State(db): State<Db>,
    Query(params): Query<PathParams>,
) -> Result<Json<PathResponse>, ServerError> {
    let store = db.read().await;
    for id in [params.source, params.target] {
        if !store.stations.contains_key(&id) {
            return Err(ServerError::bad_request("station does not exist"));
        }
    }
    if params.source == params.target {
        return Err(ServerError::bad_request("source and target must differ"));
    }

    let by_distance = params.path_type == "DISTANCE";
    let route = shortest_path(&store, params.source, params.target, by_distance)
        .ok_or_else(|| ServerError::bad_request("stations are not connected"))?;

    let stations = route
        .stations
        .iter()
        .map(|id| station_response(&store, *id))
        .collect();
    Ok(Json(PathResponse {
        stations,
        distance: route.distance,
        fare: fare(route.distance, route.extra_fare),
    }))
}

fn station_response(store: &Store, id: i64) -> StationResponse {
    StationResponse {
        id,
        name: store.stations.get(&id).cloned().unwrap_or_default(),
    }
}

fn line_response(store: &Store, line: &Line) -> LineResponse {
    let mut ids: Vec<i64> = line.sections.first().map(|s| vec![s.up]).unwrap_or_default();
    ids.extend(line.sections.iter().map(|s| s.down));
    LineResponse {
        id: line.id,
        name: line.name.clone(),
        color: line.color.clone(),
        extra_fare: line.extra_fare,
        stations: ids.into_iter().map(|id| station_response(store, id)).collect(),
    }
}

struct Route {
    stations: Vec<i64>,
    distance: u32,
    extra_fare: u32,
}

#[derive(Clone, Copy)]
struct Edge {
    to: i64,
    distance: u32,
    extra_fare: u32,
}

/// Dijkstra over every section of every line, weighted by distance or by
/// hop count.
fn shortest_path(store: &Store, source: i64, target: i64, by_distance: bool) -> Option<Route> {
    let mut graph: HashMap<i64, Vec<Edge>> = HashMap::new();
    for line in store.lines.values() {
        for s in &line.sections {
            let edge = |to| Edge {
                to,
                distance: s.distance,
                extra_fare: line.extra_fare,
            };
            graph.entry(s.up).or_default().push(edge(s.down));
            graph.entry(s.down).or_default().push(edge(s.up));
        }
    }

    let mut best: HashMap<i64, u64> = HashMap::from([(source, 0)]);
    let mut prev: HashMap<i64, (i64, Edge)> = HashMap::new();
    let mut heap = BinaryHeap::from([Reverse((0u64, source))]);

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == target {
            break;
        }
        if best.get(&node).is_some_and(|&b| cost > b) {
            continue;
        }
        for edge in graph.get(&node).into_iter().flatten() {
            let weight = if by_distance { u64::from(edge.distance) } else { 1 };
            let next = cost + weight;
            if best.get(&edge.to).map_or(true, |&b| next < b) {
                best.insert(edge.to, next);
                prev.insert(edge.to, (node, *edge));
                heap.push(Reverse((next, edge.to)));
            }
        }
    }

    if !prev.contains_key(&target) {
        return None;
    }

    let mut stations = vec![target];
    let mut distance = 0;
    let mut extra_fare = 0;
    let mut node = target;
    while let Some((from, edge)) = prev.get(&node) {
        distance += edge.distance;
        extra_fare = extra_fare.max(edge.extra_fare);
        stations.push(*from);
        node = *from;
    }
    stations.reverse();
    Some(Route {
        stations,
        distance,
        extra_fare,
    })
}

const BASE_FARE: u32 = 1250;
const ADDITIONAL_AMOUNT: u32 = 100;

/// 1250 base plus 100 per started 5km between 10km and 50km, and 100 per
/// started 8km beyond 50km. The most expensive line's extra fare applies.
pub fn fare(distance: u32, extra_fare: u32) -> u32 {
    let fare = BASE_FARE + extra_fare;
    if distance <= 10 {
        return fare;
    }
    if distance <= 50 {
        return fare + (distance - 10).div_ceil(5) * ADDITIONAL_AMOUNT;
    }
    fare + 40_u32.div_ceil(5) * ADDITIONAL_AMOUNT + (distance - 50).div_ceil(8) * ADDITIONAL_AMOUNT
}
