use crate::id::DecisionId;
use crate::role::Role;
use chrono::DateTime;
use chrono::Utc;
use indexmap::IndexSet;
use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DecisionType {
    Approval,
    Rejection,
    Recommendation,
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfidenceError {
    #[error("confidence {0} is outside [0, 1]")]
    OutOfRange(f64),
}

/// A probability-like score, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    pub fn new(value: f64) -> Result<Self, ConfidenceError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfidenceError::OutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Confidence {
    type Error = ConfidenceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

/// A recommendation, approval, rejection or alert produced by one agent.
///
/// `impacted_roles` keeps insertion order; notifications fan out in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: DecisionId,
    pub owner_role: Role,
    pub decision_type: DecisionType,
    pub title: String,
    pub summary: String,
    pub details: String,
    pub confidence: Confidence,
    pub impacted_roles: IndexSet<Role>,
    pub action_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Decision {
    pub fn new(
        owner_role: Role,
        decision_type: DecisionType,
        title: impl Into<String>,
        summary: impl Into<String>,
        details: impl Into<String>,
        confidence: Confidence,
    ) -> Self {
        Self {
            id: DecisionId::new(),
            owner_role,
            decision_type,
            title: title.into(),
            summary: summary.into(),
            details: details.into(),
            confidence,
            impacted_roles: IndexSet::new(),
            action_required: false,
            deadline: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_impacted_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.impacted_roles.extend(roles);
        self
    }

    pub fn requiring_action(mut self, action_required: bool) -> Self {
        self.action_required = action_required;
        self
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn impacts(&self, role: Role) -> bool {
        self.impacted_roles.contains(&role)
    }
}
