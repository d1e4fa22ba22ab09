//! Localized string tables consumed by the panel core.
//!
//! String *resolution* (picking a language) happens upstream; the core just
//! receives one dictionary as data. The built-in `Default` is English, and a
//! JSON dictionary may override any subset of the tables — missing sections
//! fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Substitution token for the protocol minimum ratio in the footnote template.
pub const MIN_COL_RATIO_TOKEN: &str = "{{MIN_COL_RATIO}}";

/// Substitution token for the asset symbol in the exposure notice template.
pub const ASSET_TOKEN: &str = "{{ASSET}}";

/// The full set of localized strings the panel core references.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dictionary {
    pub cockpit: CockpitStrings,
    pub alerts: AlertStrings,
    pub legal: LegalStrings,
}

/// Labels and templates for the dashboard figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CockpitStrings {
    pub total_supply: String,
    pub total_borrowed: String,
    pub your_ratio: String,
    pub total_deposited_value: String,
    pub total_borrowed_value: String,
    /// Template containing [`MIN_COL_RATIO_TOKEN`].
    pub min_col_ratio_note: String,
    /// Template containing [`ASSET_TOKEN`].
    pub asset_notice: String,
}

impl Default for CockpitStrings {
    fn default() -> Self {
        Self {
            total_supply: "Total Supply".to_string(),
            total_borrowed: "Total Borrowed".to_string(),
            your_ratio: "Your Collateralization Ratio".to_string(),
            total_deposited_value: "Total Deposited Value".to_string(),
            total_borrowed_value: "Total Borrowed Value".to_string(),
            min_col_ratio_note: format!(
                "Accounts below the {}% minimum collateralization ratio are subject to liquidation.",
                MIN_COL_RATIO_TOKEN
            ),
            asset_notice: format!(
                "You have an outstanding {} balance. Review the {} guide before making further transactions.",
                ASSET_TOKEN, ASSET_TOKEN
            ),
        }
    }
}

/// Strings for the disclaimer prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertStrings {
    pub warning: String,
    pub disclaimer: String,
    pub accept_disclaimer: String,
    pub accept: String,
}

impl Default for AlertStrings {
    fn default() -> Self {
        Self {
            warning: "Warning".to_string(),
            disclaimer: "Altimeter is experimental software interacting with an on-chain \
                         lending protocol. Supplied assets can be liquidated and are not \
                         insured. By continuing you confirm that you understand these risks \
                         and that you have read the documents linked below."
                .to_string(),
            accept_disclaimer: "I have read and understood the above".to_string(),
            accept: "Accept".to_string(),
        }
    }
}

/// Labels for the legal policy links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalStrings {
    pub terms_of_service: String,
    pub privacy_policy: String,
}

impl Default for LegalStrings {
    fn default() -> Self {
        Self {
            terms_of_service: "Terms of Service".to_string(),
            privacy_policy: "Privacy Policy".to_string(),
        }
    }
}

impl Dictionary {
    /// Parse a dictionary from a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Load a dictionary from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Render the minimum-ratio footnote with the formatted percentage.
    pub fn min_ratio_footnote(&self, formatted_pct: &str) -> String {
        self.cockpit
            .min_col_ratio_note
            .replace(MIN_COL_RATIO_TOKEN, formatted_pct)
    }

    /// Render the asset-exposure notice for `symbol`.
    pub fn asset_notice(&self, symbol: &str) -> String {
        self.cockpit.asset_notice.replace(ASSET_TOKEN, symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_templates_carry_tokens() {
        let dictionary = Dictionary::default();
        assert!(dictionary.cockpit.min_col_ratio_note.contains(MIN_COL_RATIO_TOKEN));
        assert!(dictionary.cockpit.asset_notice.contains(ASSET_TOKEN));
    }

    #[test]
    fn test_footnote_substitution() {
        let dictionary = Dictionary::default();
        let note = dictionary.min_ratio_footnote("125");
        assert!(note.contains("125%"));
        assert!(!note.contains(MIN_COL_RATIO_TOKEN));
    }

    #[test]
    fn test_asset_notice_substitution() {
        let dictionary = Dictionary::default();
        let notice = dictionary.asset_notice("ETH");
        assert!(notice.contains("ETH"));
        assert!(!notice.contains(ASSET_TOKEN));
    }

    #[test]
    fn test_partial_dictionary_falls_back_to_defaults() {
        let dictionary = Dictionary::from_json(
            r#"{ "alerts": { "warning": "Achtung" } }"#,
        )
        .unwrap();
        assert_eq!(dictionary.alerts.warning, "Achtung");
        // Untouched sections keep the English defaults
        assert_eq!(dictionary.alerts.accept, "Accept");
        assert_eq!(dictionary.cockpit.total_supply, "Total Supply");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Dictionary::from_json("not json").is_err());
    }
}
