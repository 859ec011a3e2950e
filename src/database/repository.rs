use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::error::Result;
use crate::models::attendance::{AttendanceRow, AttendanceWithUserRow, NewAttendance};
use crate::models::user::{NewUser, UserCredentials, UserSummary};

/// Persistence gateway for `usuarios` and `asistencia`.
///
/// Listings come back newest first, by `asistencia.id` rather than by `fecha`/`hora`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository: Send + Sync {
    async fn insert_user(&self, user: &NewUser) -> Result<i64>;

    /// Every user registered under `email`, lowest id first.
    async fn find_credentials_by_email(&self, email: &str) -> Result<Vec<UserCredentials>>;

    /// Users whose `tipo` is set and is not `directora`.
    async fn list_roster(&self) -> Result<Vec<UserSummary>>;

    async fn insert_attendance(&self, record: &NewAttendance) -> Result<i64>;

    async fn attendance_for_user(&self, usuario_id: i64) -> Result<Vec<AttendanceRow>>;

    async fn attendance_with_users(&self) -> Result<Vec<AttendanceWithUserRow>>;
}

#[derive(Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert_user(&self, user: &NewUser) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO usuarios (nombre, apellido, tipo, grado, seccion, turno, nivel, numero, email, contrasena)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.nombre)
        .bind(&user.apellido)
        .bind(&user.tipo)
        .bind(&user.grado)
        .bind(&user.seccion)
        .bind(&user.turno)
        .bind(&user.nivel)
        .bind(&user.numero)
        .bind(&user.email)
        .bind(&user.contrasena)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_id() as i64)
    }

    async fn find_credentials_by_email(&self, email: &str) -> Result<Vec<UserCredentials>> {
        let rows = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, tipo, contrasena FROM usuarios WHERE email = ? ORDER BY id",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_roster(&self) -> Result<Vec<UserSummary>> {
        let rows = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT id, CONCAT(nombre, ' ', apellido) AS nombre_completo
            FROM usuarios
            WHERE tipo != 'directora'
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_attendance(&self, record: &NewAttendance) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO asistencia (usuario_id, fecha, hora, estado, motivo, archivo)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.usuario_id)
        .bind(record.fecha)
        .bind(record.hora)
        .bind(record.status.as_str())
        .bind(&record.motivo)
        .bind(&record.archivo)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_id() as i64)
    }

    async fn attendance_for_user(&self, usuario_id: i64) -> Result<Vec<AttendanceRow>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT fecha, hora, estado, motivo, archivo
            FROM asistencia
            WHERE usuario_id = ?
            ORDER BY id DESC
            "#,
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn attendance_with_users(&self) -> Result<Vec<AttendanceWithUserRow>> {
        let rows = sqlx::query_as::<_, AttendanceWithUserRow>(
            r#"
            SELECT a.fecha, a.hora, a.estado, a.motivo, a.archivo,
                   u.nombre, u.apellido, u.id AS usuario_id
            FROM asistencia a
            JOIN usuarios u ON u.id = a.usuario_id
            ORDER BY a.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
