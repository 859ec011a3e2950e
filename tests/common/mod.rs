#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use asistencia_backend::database::repository::Repository;
use asistencia_backend::error::{Error, Result};
use asistencia_backend::models::attendance::{AttendanceRow, AttendanceWithUserRow, NewAttendance};
use asistencia_backend::models::user::{NewUser, UserCredentials, UserSummary};
use asistencia_backend::storage::{FileStorage, Upload};
use asistencia_backend::{routes, AppState};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use tower_http::services::ServeDir;

pub const BOUNDARY: &str = "asistencia-test-boundary";

#[derive(Default)]
struct Tables {
    users: Vec<(i64, NewUser)>,
    attendance: Vec<(i64, NewAttendance)>,
}

/// Mirrors the MySQL queries closely enough to drive the router without a database.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: Mutex<Tables>,
}

impl InMemoryRepository {
    pub fn attendance_count(&self) -> usize {
        self.tables.lock().unwrap().attendance.len()
    }

    pub fn stored_password(&self, id: i64) -> Option<String> {
        let tables = self.tables.lock().unwrap();
        tables
            .users
            .iter()
            .find(|(user_id, _)| *user_id == id)
            .map(|(_, user)| user.contrasena.clone())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert_user(&self, user: &NewUser) -> Result<i64> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.users.len() as i64 + 1;
        tables.users.push((id, user.clone()));
        Ok(id)
    }

    async fn find_credentials_by_email(&self, email: &str) -> Result<Vec<UserCredentials>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .filter(|(_, user)| user.email == email)
            .map(|(id, user)| UserCredentials {
                id: *id,
                tipo: user.tipo.clone(),
                contrasena: Some(user.contrasena.clone()),
            })
            .collect())
    }

    async fn list_roster(&self) -> Result<Vec<UserSummary>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .filter(|(_, user)| user.tipo.as_deref().is_some_and(|tipo| tipo != "directora"))
            .map(|(id, user)| UserSummary {
                id: *id,
                nombre_completo: match (&user.nombre, &user.apellido) {
                    (Some(nombre), Some(apellido)) => Some(format!("{} {}", nombre, apellido)),
                    _ => None,
                },
            })
            .collect())
    }

    async fn insert_attendance(&self, record: &NewAttendance) -> Result<i64> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.iter().any(|(id, _)| *id == record.usuario_id) {
            return Err(Error::BadRequest("Referenced record does not exist".into()));
        }
        let id = tables.attendance.len() as i64 + 1;
        tables.attendance.push((id, record.clone()));
        Ok(id)
    }

    async fn attendance_for_user(&self, usuario_id: i64) -> Result<Vec<AttendanceRow>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .attendance
            .iter()
            .rev()
            .filter(|(_, record)| record.usuario_id == usuario_id)
            .map(|(_, record)| AttendanceRow {
                fecha: record.fecha,
                hora: record.hora,
                estado: record.status.as_str().to_string(),
                motivo: record.motivo.clone(),
                archivo: record.archivo.clone(),
            })
            .collect())
    }

    async fn attendance_with_users(&self) -> Result<Vec<AttendanceWithUserRow>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .attendance
            .iter()
            .rev()
            .filter_map(|(_, record)| {
                let (id, user) = tables.users.iter().find(|(id, _)| *id == record.usuario_id)?;
                Some(AttendanceWithUserRow {
                    fecha: record.fecha,
                    hora: record.hora,
                    estado: record.status.as_str().to_string(),
                    motivo: record.motivo.clone(),
                    archivo: record.archivo.clone(),
                    nombre: user.nombre.clone(),
                    apellido: user.apellido.clone(),
                    usuario_id: *id,
                })
            })
            .collect())
    }
}

/// Stands in for Cloudinary: requires a file and hands back a URL.
#[derive(Default)]
pub struct FakeRemoteStorage {
    pub uploads: Mutex<Vec<String>>,
}

#[async_trait]
impl FileStorage for FakeRemoteStorage {
    async fn store(&self, upload: Upload) -> Result<String> {
        self.uploads.lock().unwrap().push(upload.file_name.clone());
        Ok(format!(
            "https://res.cloudinary.com/colegio/asistencias/{}",
            upload.file_name
        ))
    }

    fn requires_file(&self) -> bool {
        true
    }
}

pub fn app(repository: Arc<InMemoryRepository>, storage: Arc<dyn FileStorage>) -> Router {
    routes::router(AppState::new(repository, storage))
}

pub fn app_serving_uploads(
    repository: Arc<InMemoryRepository>,
    storage: Arc<dyn FileStorage>,
    uploads_dir: &Path,
) -> Router {
    app(repository, storage).nest_service("/uploads", ServeDir::new(uploads_dir))
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: &JsonValue) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn multipart_request(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"archivo\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/asistencia")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Registers a user and returns its id.
pub async fn register(app: &Router, nombre: &str, tipo: &str, email: &str, password: &str) -> i64 {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/registrar",
            &serde_json::json!({
                "nombre": nombre,
                "apellido": "Huaman",
                "tipo": tipo,
                "grado": "3",
                "seccion": "B",
                "turno": "Mañana",
                "nivel": "Primaria",
                "numero": "987654321",
                "email": email,
                "contrasena": password
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", body);
    body["id"].as_i64().unwrap()
}
