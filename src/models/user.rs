use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row inserted into `usuarios`. `contrasena` already holds the Argon2 hash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub tipo: Option<String>,
    pub grado: Option<String>,
    pub seccion: Option<String>,
    pub turno: Option<String>,
    pub nivel: Option<String>,
    pub numero: Option<String>,
    pub email: String,
    pub contrasena: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub tipo: Option<String>,
    pub contrasena: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub nombre_completo: Option<String>,
}
