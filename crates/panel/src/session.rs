//! Panel session — recompute-on-update orchestration.
//!
//! The upstream data provider pushes fresh snapshots; every update replaces
//! the stored snapshot and synchronously recomputes the display. There is no
//! scheduler and nothing is cached across updates beyond the snapshots
//! themselves.

use serde::Deserialize;

use altimeter_common::config::AppConfig;
use altimeter_common::dictionary::Dictionary;
use altimeter_common::error::AppError;
use altimeter_common::store::SettingsStore;
use altimeter_common::types::{AccountSnapshot, AlertRequest, MarketSnapshot};
use altimeter_engine::risk::{RiskDisplay, RiskEvaluator, RiskThresholds};
use altimeter_gate::{DisclaimerGate, GateState};

/// Combined account + market state, as consumed from a fixture file by the
/// panel binary.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelSnapshot {
    pub market: MarketSnapshot,
    pub account: AccountSnapshot,
}

/// One user-facing panel session: latest snapshots, the evaluator derived
/// from config, and this session's disclaimer gate.
pub struct PanelSession<S: SettingsStore> {
    dictionary: Dictionary,
    evaluator: RiskEvaluator,
    gate: DisclaimerGate<S>,
    market: MarketSnapshot,
    account: AccountSnapshot,
    notice_asset: String,
}

impl<S: SettingsStore> PanelSession<S> {
    pub fn new(config: &AppConfig, dictionary: Dictionary, store: S) -> Self {
        let gate = DisclaimerGate::new(store, config.cluster, config.legal_links());
        Self {
            dictionary,
            evaluator: RiskEvaluator::new(RiskThresholds::new(
                config.safe_margin,
                config.danger_margin,
            )),
            gate,
            market: MarketSnapshot::uninitialized(),
            account: AccountSnapshot::unfetched(),
            notice_asset: config.notice_asset.clone(),
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Replace the market snapshot and recompute.
    pub fn update_market(&mut self, market: MarketSnapshot) -> RiskDisplay {
        self.market = market;
        tracing::debug!(market_init = self.market.market_init, "Market snapshot updated");
        self.display()
    }

    /// Replace the account snapshot and recompute.
    pub fn update_account(&mut self, account: AccountSnapshot) -> RiskDisplay {
        self.account = account;
        tracing::debug!(
            user_fetched = self.account.user_fetched,
            "Account snapshot updated"
        );
        self.display()
    }

    /// Replace both snapshots at once and recompute.
    pub fn apply_snapshot(&mut self, snapshot: PanelSnapshot) -> RiskDisplay {
        self.market = snapshot.market;
        self.account = snapshot.account;
        self.display()
    }

    /// Derive the display state from the current snapshots.
    pub fn display(&self) -> RiskDisplay {
        self.evaluator
            .evaluate(&self.account, &self.market, &self.dictionary)
    }

    /// The blocking disclaimer prompt, while one is due.
    pub fn active_alert(&self) -> Option<AlertRequest> {
        self.gate.alert_request(&self.dictionary)
    }

    pub fn disclaimer_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn set_disclaimer_checked(&mut self, checked: bool) {
        self.gate.set_checked(checked);
    }

    pub fn confirm_disclaimer(&mut self) -> Result<(), AppError> {
        self.gate.confirm()
    }

    /// The asset-exposure notice, when the configured symbol is held.
    pub fn asset_notice(&self) -> Option<String> {
        (self.account.user_fetched
            && self.account.position.has_asset_exposure(&self.notice_asset))
        .then(|| self.dictionary.asset_notice(&self.notice_asset))
    }
}
