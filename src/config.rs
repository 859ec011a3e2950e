use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
    pub port: u16,
    pub max_connections: u32,
}

/// Where submitted attendance files end up.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Local { uploads_dir: PathBuf },
    Cloudinary(CloudinaryConfig),
}

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: String,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source, `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let host = vars.or("HOST", "0.0.0.0");
        let port: u16 = vars.parse_or("PORT", 3000)?;

        let database = DatabaseConfig {
            host: vars.required("MYSQLHOST")?,
            user: vars.required("MYSQLUSER")?,
            password: vars.required_allow_empty("MYSQLPASSWORD")?,
            name: vars.required("MYSQLDATABASE")?,
            port: vars.parse_or("MYSQLPORT", 3306)?,
            max_connections: vars.parse_or("DB_MAX_CONNECTIONS", 10)?,
        };

        let storage = match vars.or("STORAGE_BACKEND", "local").to_lowercase().as_str() {
            "local" => StorageConfig::Local {
                uploads_dir: PathBuf::from(vars.or("UPLOADS_DIR", "uploads")),
            },
            "cloudinary" => StorageConfig::Cloudinary(CloudinaryConfig {
                cloud_name: vars.required("CLOUDINARY_CLOUD_NAME")?,
                api_key: vars.required("CLOUDINARY_API_KEY")?,
                api_secret: vars.required("CLOUDINARY_API_SECRET")?,
                folder: vars.or("CLOUDINARY_FOLDER", "asistencias"),
            }),
            other => {
                return Err(Error::Config(format!(
                    "Invalid value for STORAGE_BACKEND: {} (expected local or cloudinary)",
                    other
                )))
            }
        };

        Ok(Self {
            server_address: format!("{}:{}", host, port),
            database,
            storage,
            max_upload_bytes: vars.parse_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }

    /// Directory served under `/uploads`, only when files are kept on local disk.
    pub fn public_uploads_dir(&self) -> Option<&PathBuf> {
        match &self.storage {
            StorageConfig::Local { uploads_dir } => Some(uploads_dir),
            StorageConfig::Cloudinary(_) => None,
        }
    }
}

struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, name: &str) -> Result<String> {
        self.get(name)
            .ok_or_else(|| Error::Config(format!("Missing environment variable: {}", name)))
    }

    /// Like `required`, but an explicitly empty value is kept (passwordless databases).
    fn required_allow_empty(&self, name: &str) -> Result<String> {
        (self.lookup)(name)
            .ok_or_else(|| Error::Config(format!("Missing environment variable: {}", name)))
    }

    fn or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn parse_or<T>(&self, name: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(name) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
            None => Ok(default),
        }
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    const DATABASE: [(&str, &str); 4] = [
        ("MYSQLHOST", "db.internal"),
        ("MYSQLUSER", "escuela"),
        ("MYSQLPASSWORD", "secreto"),
        ("MYSQLDATABASE", "asistencia"),
    ];

    #[test]
    fn defaults_to_local_storage_on_port_3000() {
        let config = Config::from_lookup(lookup(&DATABASE)).unwrap();

        assert_eq!(config.server_address, "0.0.0.0:3000");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(
            config.public_uploads_dir(),
            Some(&PathBuf::from("uploads"))
        );
    }

    #[test]
    fn cloudinary_backend_requires_credentials() {
        let mut pairs = DATABASE.to_vec();
        pairs.push(("STORAGE_BACKEND", "cloudinary"));
        pairs.push(("CLOUDINARY_CLOUD_NAME", "demo"));

        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(err.to_string().contains("CLOUDINARY_API_KEY"));

        pairs.push(("CLOUDINARY_API_KEY", "key"));
        pairs.push(("CLOUDINARY_API_SECRET", "secret"));
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        match config.storage {
            StorageConfig::Cloudinary(ref c) => assert_eq!(c.folder, "asistencias"),
            StorageConfig::Local { .. } => panic!("expected cloudinary storage"),
        }
        assert!(config.public_uploads_dir().is_none());
    }

    #[test]
    fn rejects_missing_database_settings_and_bad_numbers() {
        let err = Config::from_lookup(lookup(&[("MYSQLHOST", "db")])).unwrap_err();
        assert!(err.to_string().contains("MYSQLUSER"));

        let mut pairs = DATABASE.to_vec();
        pairs.push(("MYSQLPORT", "not-a-port"));
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(err.to_string().contains("MYSQLPORT"));
    }

    #[test]
    fn empty_database_password_is_allowed_but_unset_is_not() {
        let mut pairs = DATABASE.to_vec();
        pairs.retain(|(name, _)| *name != "MYSQLPASSWORD");

        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(err.to_string().contains("MYSQLPASSWORD"));

        pairs.push(("MYSQLPASSWORD", ""));
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.database.password, "");
    }

    #[test]
    fn rejects_unknown_storage_backend() {
        let mut pairs = DATABASE.to_vec();
        pairs.push(("STORAGE_BACKEND", "ftp"));
        assert!(Config::from_lookup(lookup(&pairs)).is_err());
    }
}
