use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::models::user::NewUser;

/// Body of `POST /registrar`. Profile fields are optional and accept either
/// JSON strings or numbers (`"grado": 3`).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterUserPayload {
    #[serde(default, deserialize_with = "text_or_number")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub apellido: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub tipo: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub grado: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub seccion: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub turno: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub nivel: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub numero: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub contrasena: Option<String>,
}

impl RegisterUserPayload {
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            nombre: self.nombre,
            apellido: self.apellido,
            tipo: self.tipo,
            grado: self.grado,
            seccion: self.seccion,
            turno: self.turno,
            nivel: self.nivel,
            numero: self.numero,
            email: self.email.unwrap_or_default(),
            contrasena: password_hash,
        }
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<JsonValue>::deserialize(deserializer)? {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected text or number, found {}",
            other
        ))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    pub success: bool,
    pub id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub contrasena: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub tipo: Option<String>,
    pub id: i64,
}
