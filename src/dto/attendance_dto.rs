use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::attendance::{
    AttendanceRow, AttendanceStatus, AttendanceWithUserRow, Evidence,
};
use crate::storage::Upload;
use crate::utils::time::{parse_fecha, parse_hora};

/// Raw multipart fields of `POST /asistencia`.
#[derive(Debug, Clone, Default)]
pub struct AttendanceForm {
    pub usuario_id: Option<String>,
    pub fecha: Option<String>,
    pub hora: Option<String>,
    pub estado: Option<String>,
    pub motivo: Option<String>,
    pub archivo: Option<Upload>,
}

#[derive(Debug, Clone)]
pub struct AttendanceSubmission {
    pub usuario_id: i64,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub status: AttendanceStatus,
    pub motivo: Option<String>,
    pub archivo: Option<Upload>,
}

impl AttendanceForm {
    pub fn into_submission(self) -> Result<AttendanceSubmission> {
        let usuario_id = required(self.usuario_id, "usuario_id")?;
        let usuario_id = usuario_id
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::BadRequest("usuario_id must be an integer".into()))?;

        let fecha = parse_fecha(&required(self.fecha, "fecha")?)
            .map_err(|_| Error::BadRequest("fecha must be formatted as YYYY-MM-DD".into()))?;
        let hora = parse_hora(&required(self.hora, "hora")?)
            .map_err(|_| Error::BadRequest("hora must be formatted as HH:MM[:SS]".into()))?;
        let status = AttendanceStatus::parse(&required(self.estado, "estado")?);

        Ok(AttendanceSubmission {
            usuario_id,
            fecha,
            hora,
            status,
            motivo: self.motivo.filter(|m| !m.trim().is_empty()),
            archivo: self.archivo,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::BadRequest(format!("{} is required", field)))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAttendanceResponse {
    pub success: bool,
    pub archivo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub estado: String,
    #[serde(flatten)]
    pub evidence: Evidence,
}

impl From<AttendanceRow> for HistoryEntry {
    fn from(row: AttendanceRow) -> Self {
        let evidence = AttendanceStatus::parse(&row.estado).evidence(row.archivo, row.motivo);
        Self {
            fecha: row.fecha,
            hora: row.hora,
            estado: row.estado,
            evidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullHistoryEntry {
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub estado: String,
    pub nombre_completo: String,
    pub usuario_id: i64,
    #[serde(flatten)]
    pub evidence: Evidence,
}

impl From<AttendanceWithUserRow> for FullHistoryEntry {
    fn from(row: AttendanceWithUserRow) -> Self {
        let evidence = AttendanceStatus::parse(&row.estado).evidence(row.archivo, row.motivo);
        let nombre_completo = format!(
            "{} {}",
            row.nombre.unwrap_or_default(),
            row.apellido.unwrap_or_default()
        );
        Self {
            fecha: row.fecha,
            hora: row.hora,
            estado: row.estado,
            nombre_completo,
            usuario_id: row.usuario_id,
            evidence,
        }
    }
}
