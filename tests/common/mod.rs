//! API de prueba en proceso (axum) con registro de peticiones recibidas

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};

use optiroute_client::{ApiClient, ClientConfig, Session};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct StubApi {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubApi {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().last().cloned().expect("sin peticiones")
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

/// Levantar la API de prueba en un puerto efímero y devolver su URL base (`/api`)
pub async fn spawn_stub() -> (String, StubApi) {
    let stub = StubApi::default();
    let app = Router::new().fallback(handle).with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api", addr), stub)
}

pub async fn client_with_session(session: Session) -> (ApiClient, StubApi) {
    let (base_url, stub) = spawn_stub().await;
    let client = ApiClient::new(&ClientConfig::new(base_url), session).unwrap();
    (client, stub)
}

pub async fn stub_client() -> (ApiClient, StubApi) {
    client_with_session(Session::in_memory()).await
}

pub fn employee_json(id: i64, first: &str, last: &str, department: &str, status: &str) -> Value {
    json!({
        "id": id,
        "firstName": first,
        "lastName": last,
        "email": format!("{}.{}@empresa.co", first.to_lowercase(), id),
        "department": department,
        "position": "Analista",
        "status": status,
        "latitude": 4.65,
        "longitude": -74.05
    })
}

pub fn vehicle_json(id: i64, plate: &str, capacity: u32, status: &str) -> Value {
    json!({
        "id": id,
        "licensePlate": plate,
        "model": "Sprinter",
        "brand": "Mercedes",
        "capacity": capacity,
        "type": "van",
        "status": status
    })
}

pub fn page_json(data: Vec<Value>) -> Value {
    let total = data.len();
    json!({ "data": data, "total": total, "page": 1, "limit": 10, "totalPages": 1 })
}

fn route_json(id: i64, request: &Value, status: &str) -> Value {
    json!({
        "id": id,
        "name": request.get("name").cloned().unwrap_or(json!("Ruta")),
        "date": request.get("date").cloned().unwrap_or(json!("2024-03-07")),
        "shift": request.get("shift").cloned().unwrap_or(json!("morning")),
        "status": status,
        "totalDistance": 18.4,
        "estimatedDuration": 52,
        "vehicleId": request.get("vehicleId").cloned().unwrap_or(json!(4)),
        "stops": [],
        "assignments": []
    })
}

fn json_response(status: StatusCode, body: Value) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body.to_string()).into_response()
}

async fn handle(
    State(stub): State<StubApi>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body = String::from_utf8_lossy(&body).to_string();
    let path = uri.path().trim_start_matches("/api").to_string();

    stub.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.clone(),
    });

    let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);

    match (method.as_str(), path.as_str()) {
        ("POST", "/auth/login") => {
            if request["password"] == "secret" {
                json_response(
                    StatusCode::OK,
                    json!({
                        "success": true,
                        "token": "abc",
                        "user": {
                            "id": 1,
                            "email": request["email"],
                            "firstName": "Laura",
                            "lastName": "Rojas",
                            "role": "admin"
                        }
                    }),
                )
            } else if request["password"] == "sin-token" {
                json_response(
                    StatusCode::OK,
                    json!({
                        "success": true,
                        "token": "",
                        "user": {
                            "id": 1,
                            "email": request["email"],
                            "firstName": "Laura",
                            "lastName": "Rojas",
                            "role": "admin"
                        }
                    }),
                )
            } else if request["password"] == "pending" {
                json_response(
                    StatusCode::OK,
                    json!({ "success": false, "message": "Usuario pendiente de aprobación" }),
                )
            } else {
                json_response(
                    StatusCode::UNAUTHORIZED,
                    json!({ "message": "Credenciales inválidas" }),
                )
            }
        }
        ("GET", "/employees") => json_response(
            StatusCode::OK,
            page_json(vec![
                employee_json(1, "Juan", "Pérez", "Ventas", "active"),
                employee_json(2, "Ana", "Gómez", "IT", "active"),
                employee_json(3, "Luis", "Mora", "IT", "inactive"),
            ]),
        ),
        ("GET", "/employees/99") => json_response(
            StatusCode::NOT_FOUND,
            json!({ "message": "Empleado no encontrado" }),
        ),
        ("GET", "/employees/departments") => json_response(StatusCode::OK, json!(["IT", "Ventas"])),
        ("POST", "/employees") => {
            let mut created = request.clone();
            created["id"] = json!(10);
            created["status"] = json!("active");
            json_response(StatusCode::CREATED, created)
        }
        ("GET", "/vehicles") => json_response(
            StatusCode::OK,
            page_json(vec![
                vehicle_json(4, "XYZ789", 2, "available"),
                vehicle_json(5, "ABC123", 12, "maintenance"),
            ]),
        ),
        ("PATCH", "/vehicles/4/status") => {
            let mut vehicle = vehicle_json(4, "XYZ789", 2, "available");
            vehicle["status"] = request["status"].clone();
            json_response(StatusCode::OK, vehicle)
        }
        ("POST", "/routes") => json_response(StatusCode::CREATED, route_json(20, &request, "planned")),
        ("PATCH", "/routes/20/status") => {
            json_response(StatusCode::OK, route_json(20, &Value::Null, "in_progress"))
        }
        ("GET", "/routes/statistics") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html>Internal Server Error</html>",
        )
            .into_response(),
        ("GET", "/locations/type/home_base") => json_response(
            StatusCode::OK,
            json!([{
                "id": 7, "name": "Sede Principal", "address": "Calle 100 #15-20",
                "latitude": 4.68, "longitude": -74.04, "type": "home_base", "isDefault": true
            }]),
        ),
        ("GET", "/locations/type/office") => json_response(StatusCode::OK, json!([])),
        ("DELETE", p) if p.starts_with("/locations/") => json_response(
            StatusCode::OK,
            json!({ "message": "Ubicación eliminada exitosamente" }),
        ),
        ("POST", p) if p.starts_with("/seed/") => StatusCode::NO_CONTENT.into_response(),
        ("GET", "/dashboard/stats") => json_response(
            StatusCode::OK,
            json!({ "overview": { "totalEmployees": 3, "activeEmployees": 2 } }),
        ),
        _ => json_response(StatusCode::NOT_FOUND, json!({ "message": "Ruta no encontrada" })),
    }
}
