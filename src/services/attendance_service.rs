use std::sync::Arc;

use crate::database::repository::Repository;
use crate::dto::attendance_dto::{
    AttendanceSubmission, FullHistoryEntry, HistoryEntry, SubmitAttendanceResponse,
};
use crate::error::{Error, Result};
use crate::models::attendance::NewAttendance;
use crate::storage::FileStorage;

#[derive(Clone)]
pub struct AttendanceService {
    repository: Arc<dyn Repository>,
    storage: Arc<dyn FileStorage>,
}

impl AttendanceService {
    pub fn new(repository: Arc<dyn Repository>, storage: Arc<dyn FileStorage>) -> Self {
        Self {
            repository,
            storage,
        }
    }

    /// Stores the file first, then inserts the row. A failed insert leaves
    /// the stored file in place.
    pub async fn submit(&self, submission: AttendanceSubmission) -> Result<SubmitAttendanceResponse> {
        let archivo = match submission.archivo {
            Some(upload) => self.storage.store(upload).await?,
            None if self.storage.requires_file() => {
                return Err(Error::BadRequest("archivo is required".into()));
            }
            None => String::new(),
        };

        let record = NewAttendance {
            usuario_id: submission.usuario_id,
            fecha: submission.fecha,
            hora: submission.hora,
            status: submission.status,
            motivo: submission.motivo,
            archivo,
        };

        let id = self.repository.insert_attendance(&record).await.map_err(|e| {
            if !record.archivo.is_empty() {
                tracing::warn!(archivo = %record.archivo, "Attendance insert failed after storing file");
            }
            e
        })?;
        tracing::info!(
            attendance_id = id,
            usuario_id = record.usuario_id,
            estado = record.status.as_str(),
            "Recorded attendance"
        );

        Ok(SubmitAttendanceResponse {
            success: true,
            archivo: record.archivo,
        })
    }

    pub async fn user_history(&self, usuario_id: i64) -> Result<Vec<HistoryEntry>> {
        let rows = self.repository.attendance_for_user(usuario_id).await?;
        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }

    pub async fn full_history(&self) -> Result<Vec<FullHistoryEntry>> {
        let rows = self.repository.attendance_with_users().await?;
        Ok(rows.into_iter().map(FullHistoryEntry::from).collect())
    }
}
