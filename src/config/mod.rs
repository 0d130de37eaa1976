mod anilist;
mod basic;

pub use anilist::AnilistConfig;
pub use basic::BasicConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::AlpeError;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// AniList client settings (see `anilist` table in config.toml).
    #[serde(default)]
    pub anilist: AnilistConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "ALPE_";

/// Flat variable names read by earlier releases, paired with their nested
/// replacement. Figment ignores the flat forms.
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("REQUIRE_AUTHENTICATION", "ALPE_BASIC__REQUIRE_AUTHENTICATION"),
    ("PORT", "ALPE_BASIC__LISTEN_PORT"),
    ("DATA_DIR", "ALPE_BASIC__DATA_DIR"),
    ("ANILIST_CLIENT_ID", "ALPE_ANILIST__CLIENT_ID"),
    ("ANILIST_CLIENT_SECRET", "ALPE_ANILIST__CLIENT_SECRET"),
    ("ANILIST_AUTH_CODE", "ALPE_ANILIST__AUTH_CODE"),
    ("CACHE_TIMEOUT_SEC", "ALPE_ANILIST__CACHE_TIMEOUT_SECS"),
    ("TOKENS_FILE", "ALPE_ANILIST__TOKENS_FILE"),
];

/// Legacy flat keys among `keys` (already stripped of `ALPE_`), with the
/// variable that replaced each one.
pub fn legacy_env_hints<I, S>(keys: I) -> Vec<(String, &'static str)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keys.into_iter()
        .filter_map(|key| {
            let key = key.as_ref();
            LEGACY_ENV_KEYS
                .iter()
                .find(|(legacy, _)| legacy.eq_ignore_ascii_case(key))
                .map(|(legacy, replacement)| (format!("{ENV_PREFIX}{legacy}"), *replacement))
        })
        .collect()
}

fn with_legacy_hint(msg: String, hints: &[(String, &'static str)]) -> String {
    if hints.is_empty() {
        return msg;
    }
    let renames: Vec<String> = hints
        .iter()
        .map(|(legacy, replacement)| format!("{legacy} -> {replacement}"))
        .collect();
    format!("{msg} (ignored flat variables: {})", renames.join(", "))
}

impl Config {
    /// Defaults, then `config.toml` if present, then `ALPE_*` environment
    /// variables (`ALPE_ANILIST__CLIENT_ID` sets `anilist.client_id`).
    pub fn figment() -> Figment {
        Self::figment_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    pub fn figment_from(path: &Path) -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if path.is_file() {
            figment.merge(Toml::file(path))
        } else {
            figment
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Legacy flat `ALPE_*` variables present in the process environment.
    pub fn legacy_env_in_use() -> Vec<(String, &'static str)> {
        legacy_env_hints(
            Env::prefixed(ENV_PREFIX)
                .iter()
                .map(|(key, _)| key.as_str().to_string()),
        )
    }

    /// Load and validate the configuration.
    pub fn from_sources() -> Result<Self, AlpeError> {
        Self::from_figment(Self::figment()).map_err(|err| match err {
            AlpeError::InvalidConfig(msg) => {
                AlpeError::InvalidConfig(with_legacy_hint(msg, &Self::legacy_env_in_use()))
            }
            other => other,
        })
    }

    pub fn from_figment(figment: Figment) -> Result<Self, AlpeError> {
        let cfg: Self = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), AlpeError> {
        if self.anilist.client_id.trim().is_empty() {
            return Err(AlpeError::InvalidConfig(
                "anilist.client_id must be set".to_string(),
            ));
        }
        if self.anilist.client_secret.trim().is_empty() {
            return Err(AlpeError::InvalidConfig(
                "anilist.client_secret must be set".to_string(),
            ));
        }
        if self.basic.require_authentication && self.basic.access_key.trim().is_empty() {
            return Err(AlpeError::InvalidConfig(
                "basic.access_key must be non-empty when basic.require_authentication is set"
                    .to_string(),
            ));
        }
        self.anilist
            .graphql_endpoint()
            .map_err(|e| AlpeError::InvalidConfig(format!("anilist.graphql_url: {e}")))?;
        Ok(())
    }

    /// Token file location with relative paths resolved against `basic.data_dir`.
    pub fn tokens_path(&self) -> PathBuf {
        if self.anilist.tokens_file.is_absolute() {
            self.anilist.tokens_file.clone()
        } else {
            self.basic.data_dir.join(&self.anilist.tokens_file)
        }
    }
}
