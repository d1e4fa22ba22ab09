use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Deployment targets the panel can run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    MainnetBeta,
    Devnet,
    Localnet,
}

impl Cluster {
    /// The legal-disclaimer gate is only enforced on the production network.
    pub fn is_production(&self) -> bool {
        matches!(self, Cluster::MainnetBeta)
    }
}

impl std::fmt::Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cluster::MainnetBeta => write!(f, "mainnet-beta"),
            Cluster::Devnet => write!(f, "devnet"),
            Cluster::Localnet => write!(f, "localnet"),
        }
    }
}

impl FromStr for Cluster {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet-beta" => Ok(Cluster::MainnetBeta),
            "devnet" => Ok(Cluster::Devnet),
            "localnet" => Ok(Cluster::Localnet),
            other => Err(format!("Unknown cluster '{}'", other)),
        }
    }
}

/// Discrete risk classification of a position, derived from the
/// collateralization ratio relative to the protocol minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTier {
    Safe,
    Caution,
    Danger,
}

impl std::fmt::Display for HealthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthTier::Safe => write!(f, "safe"),
            HealthTier::Caution => write!(f, "caution"),
            HealthTier::Danger => write!(f, "danger"),
        }
    }
}

/// Alert severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// A user's snapshot relative to the protocol.
///
/// `deposited_value`, `borrowed_value`, and `col_ratio` are derived from the
/// per-asset balance maps and never mutated directly — call [`Position::refresh`]
/// after changing the maps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Position {
    /// Sum of collateral value across assets.
    #[serde(default)]
    pub deposited_value: f64,
    /// Sum of loan value across assets.
    #[serde(default)]
    pub borrowed_value: f64,
    /// deposited / borrowed. Meaningless when `borrowed_value` is zero;
    /// consumers must branch on `borrowed_value` before reading it.
    #[serde(default)]
    pub col_ratio: f64,
    /// Per-asset collateral value, keyed by asset symbol.
    #[serde(default)]
    pub collateral_balances: HashMap<String, f64>,
    /// Per-asset loan value, keyed by asset symbol.
    #[serde(default)]
    pub loan_balances: HashMap<String, f64>,
}

impl Position {
    /// Build a position from per-asset balances, deriving the totals.
    pub fn from_balances(
        collateral_balances: HashMap<String, f64>,
        loan_balances: HashMap<String, f64>,
    ) -> Self {
        let mut position = Self {
            collateral_balances,
            loan_balances,
            ..Self::default()
        };
        position.refresh();
        position
    }

    /// Recompute the derived totals and ratio from the balance maps.
    pub fn refresh(&mut self) {
        self.deposited_value = self.collateral_balances.values().sum();
        self.borrowed_value = self.loan_balances.values().sum();
        self.col_ratio = if self.borrowed_value > 0.0 {
            self.deposited_value / self.borrowed_value
        } else {
            0.0
        };
    }

    /// Whether the account holds any collateral or loan balance in `symbol`.
    pub fn has_asset_exposure(&self, symbol: &str) -> bool {
        self.collateral_balances
            .get(symbol)
            .is_some_and(|v| *v > 0.0)
            || self.loan_balances.get(symbol).is_some_and(|v| *v > 0.0)
    }
}

/// Protocol-wide market aggregates, as delivered by the market data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub total_supply: f64,
    pub total_borrowed: f64,
    /// Protocol-enforced liquidation threshold.
    pub min_col_ratio: f64,
    /// Whether market data has loaded.
    pub market_init: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MarketSnapshot {
    /// An uninitialized market — totals render as placeholders.
    pub fn uninitialized() -> Self {
        Self {
            total_supply: 0.0,
            total_borrowed: 0.0,
            min_col_ratio: 0.0,
            market_init: false,
            updated_at: None,
        }
    }
}

/// A user's account state as delivered by the account data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub position: Position,
    /// Whether the account data has been fetched for the connected user.
    pub user_fetched: bool,
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl AccountSnapshot {
    /// An account whose data has not arrived yet — everything derived from
    /// it renders as placeholders.
    pub fn unfetched() -> Self {
        Self {
            position: Position::default(),
            user_fetched: false,
            fetched_at: None,
        }
    }

    /// A fetched account snapshot, stamped with the current time.
    pub fn fetched(position: Position) -> Self {
        Self {
            position,
            user_fetched: true,
            fetched_at: Some(Utc::now()),
        }
    }
}

/// A labeled link to a legal policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyLink {
    pub label: String,
    pub url: String,
}

/// URLs of the legal documents referenced by the disclaimer prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalLinks {
    pub terms_url: String,
    pub privacy_url: String,
}

/// The confirmation control attached to an alert request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertAction {
    pub label: String,
    /// The presentation layer must keep the control inert while false.
    pub enabled: bool,
}

/// A request for the presentation layer to display an alert.
///
/// `closeable: false` marks a blocking prompt that can only be retracted by
/// the component that issued it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRequest {
    pub id: Uuid,
    pub severity: Severity,
    pub title: String,
    pub body: String,
    pub links: Vec<PolicyLink>,
    /// Label for an acknowledgment checkbox, when the action is gated on one.
    pub checkbox_label: Option<String>,
    pub closeable: bool,
    pub action: AlertAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_balances(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_cluster_roundtrip() {
        for cluster in [Cluster::MainnetBeta, Cluster::Devnet, Cluster::Localnet] {
            let parsed: Cluster = cluster.to_string().parse().unwrap();
            assert_eq!(parsed, cluster);
        }
        assert!("testnet".parse::<Cluster>().is_err());
    }

    #[test]
    fn test_only_mainnet_is_production() {
        assert!(Cluster::MainnetBeta.is_production());
        assert!(!Cluster::Devnet.is_production());
        assert!(!Cluster::Localnet.is_production());
    }

    #[test]
    fn test_position_from_balances_derives_totals() {
        let position = Position::from_balances(
            make_balances(&[("SOL", 150.0), ("USDC", 50.0)]),
            make_balances(&[("USDC", 100.0)]),
        );
        assert_eq!(position.deposited_value, 200.0);
        assert_eq!(position.borrowed_value, 100.0);
        assert_eq!(position.col_ratio, 2.0);
    }

    #[test]
    fn test_position_ratio_without_loans() {
        let position = Position::from_balances(make_balances(&[("SOL", 500.0)]), HashMap::new());
        assert_eq!(position.borrowed_value, 0.0);
        assert_eq!(position.col_ratio, 0.0);
    }

    #[test]
    fn test_refresh_tracks_balance_changes() {
        let mut position = Position::from_balances(
            make_balances(&[("SOL", 100.0)]),
            make_balances(&[("USDC", 50.0)]),
        );
        assert_eq!(position.col_ratio, 2.0);

        position
            .collateral_balances
            .insert("ETH".to_string(), 100.0);
        position.refresh();
        assert_eq!(position.deposited_value, 200.0);
        assert_eq!(position.col_ratio, 4.0);
    }

    #[test]
    fn test_asset_exposure() {
        let position = Position::from_balances(
            make_balances(&[("ETH", 1.0), ("SOL", 0.0)]),
            make_balances(&[("USDC", 10.0)]),
        );
        assert!(position.has_asset_exposure("ETH"));
        assert!(position.has_asset_exposure("USDC"));
        assert!(!position.has_asset_exposure("SOL"));
        assert!(!position.has_asset_exposure("BTC"));
    }
}
