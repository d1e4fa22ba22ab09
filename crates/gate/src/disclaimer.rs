//! Disclaimer gate — blocks first-time production use behind a persisted
//! legal acknowledgment.
//!
//! The gate reads the acceptance flag exactly once, at construction. While
//! unaccepted on the production cluster it produces a blocking alert request
//! whose confirm action stays disabled until the user toggles the local
//! "I have read this" checkbox. Confirming persists the flag and retracts
//! the alert; the flag is never reset by this component.
//!
//! A store read failure classifies as "not accepted" — the gate fails toward
//! re-prompting, never toward silently granting access.

use uuid::Uuid;

use altimeter_common::dictionary::Dictionary;
use altimeter_common::error::AppError;
use altimeter_common::store::SettingsStore;
use altimeter_common::types::{
    AlertAction, AlertRequest, Cluster, LegalLinks, PolicyLink, Severity,
};

/// Settings key under which acceptance is persisted.
pub const DISCLAIMER_KEY: &str = "disclaimer_accepted";

/// Persisted value marking acceptance.
const ACCEPTED_VALUE: &str = "true";

/// Lifecycle of the disclaimer gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Non-production cluster — the disclaimer is never enforced.
    NotRequired,
    /// Production cluster, acceptance not persisted — a blocking prompt is due.
    Pending,
    /// Acceptance persisted; the gate stays silent from here on.
    Accepted,
}

/// Disclaimer acceptance state machine over an injected settings store.
pub struct DisclaimerGate<S: SettingsStore> {
    store: S,
    cluster: Cluster,
    links: LegalLinks,
    state: GateState,
    /// Transient UI-only acknowledgment toggle; never persisted.
    checked: bool,
    /// Stable identity for this session's prompt, so the presentation layer
    /// shows it at most once per session start.
    alert_id: Uuid,
}

impl<S: SettingsStore> DisclaimerGate<S> {
    /// Build the gate, reading the persisted flag once.
    pub fn new(store: S, cluster: Cluster, links: LegalLinks) -> Self {
        let state = Self::read_state(&store, cluster);
        Self {
            store,
            cluster,
            links,
            state,
            checked: false,
            alert_id: Uuid::new_v4(),
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Record the local "I have read this" checkbox toggle.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// The blocking prompt request, while one is due.
    pub fn alert_request(&self, dictionary: &Dictionary) -> Option<AlertRequest> {
        if self.state != GateState::Pending {
            return None;
        }

        Some(AlertRequest {
            id: self.alert_id,
            severity: Severity::Warning,
            title: dictionary.alerts.warning.clone(),
            body: dictionary.alerts.disclaimer.clone(),
            links: vec![
                PolicyLink {
                    label: dictionary.legal.terms_of_service.clone(),
                    url: self.links.terms_url.clone(),
                },
                PolicyLink {
                    label: dictionary.legal.privacy_policy.clone(),
                    url: self.links.privacy_url.clone(),
                },
            ],
            checkbox_label: Some(dictionary.alerts.accept_disclaimer.clone()),
            closeable: false,
            action: AlertAction {
                label: dictionary.alerts.accept.clone(),
                enabled: self.checked,
            },
        })
    }

    /// Confirm the disclaimer: persist acceptance and retract the prompt.
    ///
    /// Only reachable while the prompt is pending and the checkbox is set. A
    /// failed write leaves the gate pending, so the prompt reappears on the
    /// next load.
    pub fn confirm(&mut self) -> Result<(), AppError> {
        if self.state != GateState::Pending {
            return Err(AppError::Validation(
                "No disclaimer is pending confirmation".to_string(),
            ));
        }
        if !self.checked {
            return Err(AppError::Validation(
                "Disclaimer has not been acknowledged".to_string(),
            ));
        }

        self.store.set(DISCLAIMER_KEY, ACCEPTED_VALUE)?;
        self.state = GateState::Accepted;
        tracing::info!(cluster = %self.cluster, "Disclaimer accepted");
        Ok(())
    }

    /// Re-read the persisted flag, for the externally-reset case. The
    /// checkbox toggle is left untouched.
    pub fn reload(&mut self) {
        self.state = Self::read_state(&self.store, self.cluster);
    }

    fn read_state(store: &S, cluster: Cluster) -> GateState {
        if !cluster.is_production() {
            return GateState::NotRequired;
        }

        match store.get(DISCLAIMER_KEY) {
            Ok(Some(value)) if value == ACCEPTED_VALUE => GateState::Accepted,
            Ok(_) => GateState::Pending,
            Err(error) => {
                tracing::warn!(%error, "Failed to read disclaimer flag, treating as not accepted");
                GateState::Pending
            }
        }
    }
}
