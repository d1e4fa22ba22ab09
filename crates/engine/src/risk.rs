//! Risk evaluator — derives the dashboard's risk figures from account and
//! market snapshots.
//!
//! Everything here is a total function of its inputs: no side effects, no
//! failure path. Unfetched upstream data renders as an explicit placeholder,
//! never as zero.

use serde::Serialize;

use altimeter_common::dictionary::Dictionary;
use altimeter_common::types::{AccountSnapshot, HealthTier, MarketSnapshot, Position};

use crate::format::{currency_formatter, percent_value, total_abbrev};

/// Placeholder rendered while upstream data has not arrived.
pub const PLACEHOLDER: &str = "--";

/// Default margin above the protocol minimum at which a position counts as safe.
pub const DEFAULT_SAFE_MARGIN: f64 = 0.25;

/// Default margin above the protocol minimum at or below which a position is
/// in danger.
pub const DEFAULT_DANGER_MARGIN: f64 = 0.1;

/// Ratio above which the percentage display is capped to `>1000`. The cap is
/// strict: a ratio of exactly 10 still renders numerically.
const RATIO_DISPLAY_CAP: f64 = 10.0;

/// Tier thresholds, expressed as margins above the protocol minimum ratio.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RiskThresholds {
    pub safe_margin: f64,
    pub danger_margin: f64,
}

impl RiskThresholds {
    pub fn new(safe_margin: f64, danger_margin: f64) -> Self {
        Self {
            safe_margin,
            danger_margin,
        }
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            safe_margin: DEFAULT_SAFE_MARGIN,
            danger_margin: DEFAULT_DANGER_MARGIN,
        }
    }
}

/// The collateralization-ratio figure, as the presentation layer should
/// render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RatioDisplay {
    /// Account data not yet fetched.
    Unknown,
    /// No outstanding loans — unbounded headroom.
    Infinite,
    /// Ratio above the display cap; a literal percentage would imply false
    /// precision.
    Capped,
    /// Numeric percentage with one fractional digit, separators included.
    Percent(String),
}

impl std::fmt::Display for RatioDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatioDisplay::Unknown => write!(f, "{}", PLACEHOLDER),
            RatioDisplay::Infinite => write!(f, "∞"),
            RatioDisplay::Capped => write!(f, ">1000%"),
            RatioDisplay::Percent(pct) => write!(f, "{}%", pct),
        }
    }
}

/// Everything the presentation layer needs to render the position panel.
#[derive(Debug, Clone, Serialize)]
pub struct RiskDisplay {
    pub total_supply: String,
    pub total_borrowed: String,
    pub deposited_value: String,
    pub borrowed_value: String,
    pub ratio: RatioDisplay,
    /// `None` until the account data has been fetched.
    pub tier: Option<HealthTier>,
    /// Minimum-ratio footnote; produced only once the account is fetched.
    pub footnote: Option<String>,
}

/// Derives [`RiskDisplay`] values from current snapshots.
pub struct RiskEvaluator {
    thresholds: RiskThresholds,
}

impl RiskEvaluator {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }

    /// Classify a position against the protocol minimum ratio.
    ///
    /// The safe check runs first: a position with no outstanding loans is
    /// safe no matter what its stored ratio says.
    pub fn classify(&self, position: &Position, min_col_ratio: f64) -> HealthTier {
        if position.borrowed_value == 0.0
            || position.col_ratio >= min_col_ratio + self.thresholds.safe_margin
        {
            HealthTier::Safe
        } else if position.col_ratio <= min_col_ratio + self.thresholds.danger_margin {
            HealthTier::Danger
        } else {
            HealthTier::Caution
        }
    }

    /// Compute the full display state for the current snapshots.
    pub fn evaluate(
        &self,
        account: &AccountSnapshot,
        market: &MarketSnapshot,
        dictionary: &Dictionary,
    ) -> RiskDisplay {
        // Market totals and user figures gate independently
        let (total_supply, total_borrowed) = if market.market_init {
            (
                total_abbrev(market.total_supply),
                total_abbrev(market.total_borrowed),
            )
        } else {
            (PLACEHOLDER.to_string(), PLACEHOLDER.to_string())
        };

        let display = if account.user_fetched {
            let position = &account.position;
            RiskDisplay {
                total_supply,
                total_borrowed,
                deposited_value: currency_formatter(position.deposited_value, true, 0),
                borrowed_value: currency_formatter(position.borrowed_value, true, 0),
                ratio: Self::ratio_display(position),
                tier: Some(self.classify(position, market.min_col_ratio)),
                footnote: Some(
                    dictionary.min_ratio_footnote(&percent_value(market.min_col_ratio * 100.0)),
                ),
            }
        } else {
            RiskDisplay {
                total_supply,
                total_borrowed,
                deposited_value: PLACEHOLDER.to_string(),
                borrowed_value: PLACEHOLDER.to_string(),
                ratio: RatioDisplay::Unknown,
                tier: None,
                footnote: None,
            }
        };

        let tier_for_log = &display.tier;
        tracing::debug!(
            user_fetched = account.user_fetched,
            market_init = market.market_init,
            tier = ?tier_for_log,
            "Risk display recomputed"
        );

        display
    }

    fn ratio_display(position: &Position) -> RatioDisplay {
        if position.borrowed_value == 0.0 {
            RatioDisplay::Infinite
        } else if position.col_ratio > RATIO_DISPLAY_CAP {
            RatioDisplay::Capped
        } else {
            RatioDisplay::Percent(currency_formatter(position.col_ratio * 100.0, false, 1))
        }
    }
}

impl Default for RiskEvaluator {
    fn default() -> Self {
        Self::new(RiskThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_position(col_ratio: f64, borrowed_value: f64) -> Position {
        Position {
            deposited_value: col_ratio * borrowed_value,
            borrowed_value,
            col_ratio,
            ..Position::default()
        }
    }

    fn make_account(col_ratio: f64, borrowed_value: f64) -> AccountSnapshot {
        AccountSnapshot::fetched(make_position(col_ratio, borrowed_value))
    }

    fn make_market(min_col_ratio: f64) -> MarketSnapshot {
        MarketSnapshot {
            total_supply: 2_500_000.0,
            total_borrowed: 45_600.0,
            min_col_ratio,
            market_init: true,
            updated_at: None,
        }
    }

    #[test]
    fn test_no_borrow_is_safe_and_infinite() {
        let evaluator = RiskEvaluator::default();
        let display = evaluator.evaluate(
            &make_account(0.0, 0.0),
            &make_market(1.25),
            &Dictionary::default(),
        );
        assert_eq!(display.tier, Some(HealthTier::Safe));
        assert_eq!(display.ratio, RatioDisplay::Infinite);
        assert_eq!(display.ratio.to_string(), "∞");
    }

    #[test]
    fn test_ratio_cap_is_strict() {
        let evaluator = RiskEvaluator::default();
        let market = make_market(1.25);
        let dictionary = Dictionary::default();

        // Exactly 10 still renders numerically
        let at_cap = evaluator.evaluate(&make_account(10.0, 100.0), &market, &dictionary);
        assert_eq!(at_cap.ratio, RatioDisplay::Percent("1,000.0".to_string()));
        assert_eq!(at_cap.ratio.to_string(), "1,000.0%");

        let above_cap = evaluator.evaluate(&make_account(10.5, 100.0), &market, &dictionary);
        assert_eq!(above_cap.ratio, RatioDisplay::Capped);
        assert_eq!(above_cap.ratio.to_string(), ">1000%");
    }

    #[test]
    fn test_ratio_percent_has_one_fractional_digit() {
        let evaluator = RiskEvaluator::default();
        let display = evaluator.evaluate(
            &make_account(1.6, 100.0),
            &make_market(1.25),
            &Dictionary::default(),
        );
        assert_eq!(display.ratio, RatioDisplay::Percent("160.0".to_string()));
    }

    #[test]
    fn test_tier_boundaries_are_closed() {
        let evaluator = RiskEvaluator::default();
        let position = |ratio| make_position(ratio, 100.0);

        // min 1.25 → danger bound 1.35, safe bound 1.50
        assert_eq!(evaluator.classify(&position(1.30), 1.25), HealthTier::Danger);
        assert_eq!(evaluator.classify(&position(1.35), 1.25), HealthTier::Danger);
        assert_eq!(evaluator.classify(&position(1.40), 1.25), HealthTier::Caution);
        assert_eq!(evaluator.classify(&position(1.49), 1.25), HealthTier::Caution);
        assert_eq!(evaluator.classify(&position(1.50), 1.25), HealthTier::Safe);
        assert_eq!(evaluator.classify(&position(1.55), 1.25), HealthTier::Safe);
        assert_eq!(evaluator.classify(&position(1.60), 1.25), HealthTier::Safe);
    }

    #[test]
    fn test_no_borrow_wins_over_thresholds() {
        let evaluator = RiskEvaluator::default();
        // Ratio field far below the danger bound, but there are no loans
        let position = make_position(0.0, 0.0);
        assert_eq!(evaluator.classify(&position, 1.25), HealthTier::Safe);
    }

    #[test]
    fn test_custom_thresholds() {
        let evaluator = RiskEvaluator::new(RiskThresholds::new(0.5, 0.2));
        let position = |ratio| make_position(ratio, 100.0);

        assert_eq!(evaluator.classify(&position(1.45), 1.25), HealthTier::Danger);
        assert_eq!(evaluator.classify(&position(1.6), 1.25), HealthTier::Caution);
        assert_eq!(evaluator.classify(&position(1.75), 1.25), HealthTier::Safe);
    }

    #[test]
    fn test_unfetched_account_renders_placeholders() {
        let evaluator = RiskEvaluator::default();
        let display = evaluator.evaluate(
            &AccountSnapshot::unfetched(),
            &make_market(1.25),
            &Dictionary::default(),
        );
        assert_eq!(display.deposited_value, PLACEHOLDER);
        assert_eq!(display.borrowed_value, PLACEHOLDER);
        assert_eq!(display.ratio, RatioDisplay::Unknown);
        assert_eq!(display.ratio.to_string(), PLACEHOLDER);
        assert_eq!(display.tier, None);
        assert_eq!(display.footnote, None);
        // Market totals still render — they gate on market_init alone
        assert_eq!(display.total_supply, "$2.5M");
        assert_eq!(display.total_borrowed, "$45.6K");
    }

    #[test]
    fn test_uninitialized_market_renders_placeholder_totals() {
        let evaluator = RiskEvaluator::default();
        let mut market = make_market(1.25);
        market.market_init = false;

        let display = evaluator.evaluate(
            &make_account(1.6, 100.0),
            &market,
            &Dictionary::default(),
        );
        assert_eq!(display.total_supply, PLACEHOLDER);
        assert_eq!(display.total_borrowed, PLACEHOLDER);
        // User figures are independent of market_init
        assert_eq!(display.tier, Some(HealthTier::Safe));
    }

    #[test]
    fn test_fetched_account_formats_values() {
        let evaluator = RiskEvaluator::default();
        let display = evaluator.evaluate(
            &AccountSnapshot::fetched(make_position(2.0, 2250.25)),
            &make_market(1.25),
            &Dictionary::default(),
        );
        assert_eq!(display.deposited_value, "$4,500.50");
        assert_eq!(display.borrowed_value, "$2,250.25");
    }

    #[test]
    fn test_footnote_embeds_min_ratio_percentage() {
        let evaluator = RiskEvaluator::default();
        let display = evaluator.evaluate(
            &make_account(1.6, 100.0),
            &make_market(1.25),
            &Dictionary::default(),
        );
        let footnote = display.footnote.unwrap();
        assert!(footnote.contains("125%"));
    }
}
