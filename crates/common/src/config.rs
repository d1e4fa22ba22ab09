use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::types::{Cluster, LegalLinks};

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Deployment target; the disclaimer gate is only enforced on mainnet-beta
    pub cluster: Cluster,

    /// Path of the JSON settings file backing the persisted acceptance flag
    pub settings_path: PathBuf,

    /// Optional path of a localization dictionary; built-in English otherwise
    pub dictionary_path: Option<PathBuf>,

    /// Optional path of an account/market snapshot fixture for the panel binary
    pub snapshot_path: Option<PathBuf>,

    /// Margin above the protocol minimum at which a position counts as safe (default: 0.25)
    pub safe_margin: f64,

    /// Margin above the protocol minimum at or below which a position is in danger (default: 0.1)
    pub danger_margin: f64,

    /// Terms-of-service URL linked from the disclaimer prompt
    pub terms_url: String,

    /// Privacy-policy URL linked from the disclaimer prompt
    pub privacy_url: String,

    /// Asset symbol that triggers the exposure notice when held (default: ETH)
    pub notice_asset: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            cluster: Cluster::from_str(
                &std::env::var("ALTIMETER_CLUSTER")
                    .unwrap_or_else(|_| "mainnet-beta".to_string()),
            )
            .map_err(|_| {
                anyhow::anyhow!(
                    "ALTIMETER_CLUSTER must be one of mainnet-beta, devnet, localnet"
                )
            })?,
            settings_path: std::env::var("ALTIMETER_SETTINGS_PATH")
                .unwrap_or_else(|_| "altimeter_settings.json".to_string())
                .into(),
            dictionary_path: std::env::var("ALTIMETER_DICTIONARY_PATH")
                .ok()
                .map(PathBuf::from),
            snapshot_path: std::env::var("ALTIMETER_SNAPSHOT_PATH")
                .ok()
                .map(PathBuf::from),
            safe_margin: std::env::var("ALTIMETER_SAFE_MARGIN")
                .unwrap_or_else(|_| "0.25".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("ALTIMETER_SAFE_MARGIN must be a valid f64"))?,
            danger_margin: std::env::var("ALTIMETER_DANGER_MARGIN")
                .unwrap_or_else(|_| "0.1".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("ALTIMETER_DANGER_MARGIN must be a valid f64"))?,
            terms_url: std::env::var("ALTIMETER_TERMS_URL").unwrap_or_else(|_| {
                "https://altimeter.finance/legal/terms-of-service".to_string()
            }),
            privacy_url: std::env::var("ALTIMETER_PRIVACY_URL")
                .unwrap_or_else(|_| "https://altimeter.finance/legal/privacy-policy".to_string()),
            notice_asset: std::env::var("ALTIMETER_NOTICE_ASSET")
                .unwrap_or_else(|_| "ETH".to_string()),
        })
    }

    /// The legal links referenced by the disclaimer prompt.
    pub fn legal_links(&self) -> LegalLinks {
        LegalLinks {
            terms_url: self.terms_url.clone(),
            privacy_url: self.privacy_url.clone(),
        }
    }
}
