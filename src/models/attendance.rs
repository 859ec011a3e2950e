use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

pub const JUSTIFIED_ABSENCE: &str = "Falta Justificada";

/// Attendance status as submitted by the client.
///
/// A justified absence is backed by a document and a reason; every other
/// label ("Presente", "Tardanza", ...) is backed by a photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceStatus {
    JustifiedAbsence,
    Recorded(String),
}

impl AttendanceStatus {
    pub fn parse(label: &str) -> Self {
        if label == JUSTIFIED_ABSENCE {
            AttendanceStatus::JustifiedAbsence
        } else {
            AttendanceStatus::Recorded(label.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AttendanceStatus::JustifiedAbsence => JUSTIFIED_ABSENCE,
            AttendanceStatus::Recorded(label) => label,
        }
    }

    /// Shapes the stored file reference (and reason) into the evidence this status carries.
    pub fn evidence(&self, archivo: String, motivo: Option<String>) -> Evidence {
        match self {
            AttendanceStatus::JustifiedAbsence => Evidence::Justification {
                justificante: archivo,
                motivo,
            },
            AttendanceStatus::Recorded(_) => Evidence::Photo { foto: archivo },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Evidence {
    Justification {
        justificante: String,
        motivo: Option<String>,
    },
    Photo {
        foto: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub usuario_id: i64,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub status: AttendanceStatus,
    pub motivo: Option<String>,
    pub archivo: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRow {
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub estado: String,
    pub motivo: Option<String>,
    pub archivo: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct AttendanceWithUserRow {
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub estado: String,
    pub motivo: Option<String>,
    pub archivo: String,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub usuario_id: i64,
}
