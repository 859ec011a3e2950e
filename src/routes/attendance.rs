use axum::{
    extract::{Multipart, Path, State},
    Json,
};

use crate::dto::attendance_dto::{
    AttendanceForm, FullHistoryEntry, HistoryEntry, SubmitAttendanceResponse,
};
use crate::error::{Error, Result};
use crate::storage::Upload;
use crate::AppState;

pub async fn submit_attendance(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SubmitAttendanceResponse>> {
    let mut form = AttendanceForm::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "usuario_id" => form.usuario_id = Some(field.text().await?),
            "fecha" => form.fecha = Some(field.text().await?),
            "hora" => form.hora = Some(field.text().await?),
            "estado" => form.estado = Some(field.text().await?),
            "motivo" => form.motivo = Some(field.text().await?),
            "archivo" => {
                if form.archivo.is_some() {
                    return Err(Error::BadRequest("Only one archivo file is accepted".into()));
                }
                let file_name = field.file_name().unwrap_or("archivo").to_string();
                let data = field.bytes().await?;

                if !data.is_empty() {
                    form.archivo = Some(Upload { file_name, data });
                }
            }
            other => tracing::debug!(field = other, "Ignoring unexpected multipart field"),
        }
    }

    let submission = form.into_submission()?;
    let response = state.attendance_service.submit(submission).await?;
    Ok(Json(response))
}

pub async fn user_history(
    State(state): State<AppState>,
    Path(usuario_id): Path<i64>,
) -> Result<Json<Vec<HistoryEntry>>> {
    let history = state.attendance_service.user_history(usuario_id).await?;
    Ok(Json(history))
}

pub async fn full_history(State(state): State<AppState>) -> Result<Json<Vec<FullHistoryEntry>>> {
    let history = state.attendance_service.full_history().await?;
    Ok(Json(history))
}
