use rocket::figment::{self, Figment};
use serde::{Deserialize, Serialize};

/// Which backend serves the `tables` and `products` collections.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Mongo,
    Memory,
}

/// Application keys read from `Rocket.toml` / `ROCKET_*` next to Rocket's own settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreKind,
    /// MongoDB database holding the collections.
    pub database: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            store: StoreKind::Mongo,
            database: "cafe".to_string(),
        }
    }
}

impl AppConfig {
    /// Missing keys take their defaults; present but malformed keys are an error.
    pub fn from_figment(figment: &Figment) -> Result<Self, figment::Error> {
        figment.extract::<AppConfig>()
    }
}
