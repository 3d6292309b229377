use chrono::NaiveTime;
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::models::hhmm;
use crate::schedule::SlotGrid;
use crate::validation::validate_slot_grid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub debug: bool,
    pub auth_token: String,
    pub admin_token: String,
    pub enable_swagger: bool,
    pub port: u16,
    #[serde(with = "hhmm")]
    pub day_start: NaiveTime,
    #[serde(with = "hhmm")]
    pub day_end: NaiveTime,
    pub slot_minutes: u32,
    pub seed_demo_data: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // APP_AUTH_TOKEN -> auth_token
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("debug", false)?
            .set_default("auth_token", "default-token-change-me")?
            .set_default("admin_token", "default-admin-token-change-me")?
            .set_default("enable_swagger", true)?
            .set_default("port", 8080)?
            .set_default("day_start", "08:00")?
            .set_default("day_end", "20:00")?
            .set_default("slot_minutes", 30)?
            .set_default("seed_demo_data", false)?
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.slot_grid()?;
        Ok(settings)
    }

    pub fn slot_grid(&self) -> Result<SlotGrid, ConfigError> {
        validate_slot_grid(self.day_start, self.day_end, self.slot_minutes)
            .map_err(|err| ConfigError::Message(format!("invalid slot grid: {err:?}")))
    }
}
