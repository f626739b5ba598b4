//! Prompt classification: risk tier, work budget and operating mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse level of scrutiny a request warrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// Cosmetic or local change.
    Low,
    /// Ordinary feature work (the default).
    Medium,
    /// Touches production, secrets, infrastructure or other irreversible surfaces.
    High,
}

impl RiskTier {
    /// Lowercase label used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much effort and verification the downstream agent should spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkBudget {
    /// Minimal ceremony.
    Lean,
    /// Normal plan-then-patch flow.
    Standard,
    /// Slow down, verify first.
    Deliberate,
}

impl WorkBudget {
    /// Lowercase label used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lean => "lean",
            Self::Standard => "standard",
            Self::Deliberate => "deliberate",
        }
    }
}

impl fmt::Display for WorkBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label is not a known tier or budget.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind} label: {label}")]
pub struct ParseLabelError {
    /// What was being parsed (`risk tier`, `budget`).
    pub kind: &'static str,
    /// The offending input.
    pub label: String,
}

impl FromStr for RiskTier {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ParseLabelError {
                kind: "risk tier",
                label: other.to_string(),
            }),
        }
    }
}

impl FromStr for WorkBudget {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lean" => Ok(Self::Lean),
            "standard" => Ok(Self::Standard),
            "deliberate" => Ok(Self::Deliberate),
            other => Err(ParseLabelError {
                kind: "budget",
                label: other.to_string(),
            }),
        }
    }
}

/// Result of classifying a prompt.
///
/// Serialized as `{"risk": "high", "budget": "deliberate", "mode": "verify-first"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Risk tier.
    #[serde(rename = "risk")]
    pub risk_tier: RiskTier,
    /// Work budget paired with the tier.
    pub budget: WorkBudget,
    /// Advisory operating mode (`verify-first`, `inspect-patch-verify`, ...).
    pub mode: String,
}

impl Classification {
    /// Mode paired with [`RiskTier::High`].
    pub const MODE_VERIFY_FIRST: &'static str = "verify-first";
    /// Mode paired with [`RiskTier::Low`].
    pub const MODE_INSPECT_PATCH_VERIFY: &'static str = "inspect-patch-verify";
    /// Mode paired with [`RiskTier::Medium`].
    pub const MODE_MAP_PLAN_PATCH_VERIFY: &'static str = "map-plan-patch-verify";

    /// `{High, Deliberate, "verify-first"}`.
    #[must_use]
    pub fn high() -> Self {
        Self {
            risk_tier: RiskTier::High,
            budget: WorkBudget::Deliberate,
            mode: Self::MODE_VERIFY_FIRST.to_string(),
        }
    }

    /// `{Medium, Standard, "map-plan-patch-verify"}`.
    #[must_use]
    pub fn medium() -> Self {
        Self {
            risk_tier: RiskTier::Medium,
            budget: WorkBudget::Standard,
            mode: Self::MODE_MAP_PLAN_PATCH_VERIFY.to_string(),
        }
    }

    /// `{Low, Lean, "inspect-patch-verify"}`.
    #[must_use]
    pub fn low() -> Self {
        Self {
            risk_tier: RiskTier::Low,
            budget: WorkBudget::Lean,
            mode: Self::MODE_INSPECT_PATCH_VERIFY.to_string(),
        }
    }

    /// Parse a classification received from an untrusted source.
    ///
    /// Accepts only an object whose `risk` and `budget` are known labels and
    /// whose `mode` is a non-empty string. Returns `None` otherwise.
    #[must_use]
    pub fn from_untrusted(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let risk_tier = object.get("risk")?.as_str()?.parse().ok()?;
        let budget = object.get("budget")?.as_str()?.parse().ok()?;
        let mode = object.get("mode")?.as_str()?.trim();
        if mode.is_empty() {
            return None;
        }
        Some(Self {
            risk_tier,
            budget,
            mode: mode.to_string(),
        })
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::medium()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "risk={}, budget={}, mode={}",
            self.risk_tier, self.budget, self.mode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_medium() {
        let c = Classification::default();
        assert_eq!(c.risk_tier, RiskTier::Medium);
        assert_eq!(c.budget, WorkBudget::Standard);
        assert_eq!(c.mode, "map-plan-patch-verify");
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(Classification::high()).unwrap();
        assert_eq!(
            value,
            json!({"risk": "high", "budget": "deliberate", "mode": "verify-first"})
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Classification::low().to_string(),
            "risk=low, budget=lean, mode=inspect-patch-verify"
        );
    }

    #[test]
    fn test_from_untrusted_accepts_well_formed() {
        let value = json!({"risk": "low", "budget": "lean", "mode": "custom-mode"});
        let c = Classification::from_untrusted(&value).unwrap();
        assert_eq!(c.risk_tier, RiskTier::Low);
        assert_eq!(c.mode, "custom-mode");
    }

    #[test]
    fn test_from_untrusted_rejects_unknown_tier() {
        let value = json!({"risk": "catastrophic", "budget": "lean", "mode": "x"});
        assert!(Classification::from_untrusted(&value).is_none());
    }

    #[test]
    fn test_from_untrusted_rejects_missing_or_empty_fields() {
        assert!(Classification::from_untrusted(&json!({"risk": "low"})).is_none());
        assert!(
            Classification::from_untrusted(&json!({"risk": "low", "budget": "lean", "mode": " "}))
                .is_none()
        );
        assert!(Classification::from_untrusted(&json!("high")).is_none());
        assert!(Classification::from_untrusted(&json!({"risk": 3, "budget": "lean", "mode": "m"})).is_none());
    }

    #[test]
    fn test_tier_ordering() {
        assert!(RiskTier::High > RiskTier::Medium);
        assert!(RiskTier::Medium > RiskTier::Low);
    }
}
