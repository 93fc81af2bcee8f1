use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::config::{atomic_write_owner_only, AppContext};
use crate::error::AppError;
use crate::schema::{self, ConfigMap};

/// Load/persist the settings file and derive the exported environment.
///
/// The persisted artifact stores secrets in the clear; confidentiality relies
/// on the owner-only file mode applied at save time.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            path: ctx.settings_path.clone(),
        }
    }

    /// Read the persisted settings merged onto schema defaults. A missing
    /// file, unreadable file, or malformed content degrades to defaults and
    /// never surfaces as an error. Keys the schema does not recognize are
    /// dropped.
    pub fn load(&self) -> ConfigMap {
        let mut cfg = schema::default_config();

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    log::warn!(
                        "failed to read settings at {}, using defaults: {}",
                        self.path.display(),
                        err
                    );
                }
                return cfg;
            }
        };

        match serde_json::from_str::<Map<String, Value>>(&content) {
            Ok(saved) => {
                for (key, value) in saved {
                    if schema::field_by_key(&key).is_none() {
                        continue;
                    }
                    if let Some(text) = value.as_str() {
                        cfg.insert(key, text.to_string());
                    }
                }
            }
            Err(err) => {
                log::warn!(
                    "failed to parse settings at {}, using defaults: {}",
                    self.path.display(),
                    err
                );
            }
        }

        cfg
    }

    /// Persist the map as pretty JSON, filtered to schema-recognized keys and
    /// written in schema declaration order. The write is atomic and the file
    /// mode is restricted to the owning user.
    pub fn save(&self, cfg: &ConfigMap) -> Result<(), AppError> {
        let mut out = Map::new();
        for field in schema::fields() {
            if let Some(value) = cfg.get(field.key) {
                out.insert(field.key.to_string(), Value::String(value.clone()));
            }
        }

        let json = serde_json::to_string_pretty(&Value::Object(out))
            .map_err(|e| AppError::JsonSerialize { source: e })?;
        atomic_write_owner_only(&self.path, json.as_bytes())
    }

    /// Environment mapping for the MCP server process: one entry per field
    /// with a non-empty export name and a non-empty value, in schema order.
    pub fn export_env(cfg: &ConfigMap) -> Vec<(String, String)> {
        schema::fields()
            .filter(|f| !f.export_var.is_empty())
            .filter_map(|f| {
                let value = cfg.get(f.key)?;
                if value.is_empty() {
                    return None;
                }
                Some((f.export_var.to_string(), value.clone()))
            })
            .collect()
    }
}
