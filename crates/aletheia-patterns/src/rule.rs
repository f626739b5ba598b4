//! Pattern rules and their categories.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PatternError, PatternResult};

/// The family a rule belongs to.
///
/// Action gates consult the first three categories; the prompt classifier
/// consults the two topic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternCategory {
    /// Shell commands that can cause irreversible damage.
    Destructive,
    /// Shell commands with externally visible or hard-to-revert effects.
    HighRiskCommand,
    /// File paths that typically hold secrets or credentials.
    SensitivePath,
    /// Prompt topics that warrant extra scrutiny.
    HighRiskTopic,
    /// Prompt topics that indicate cosmetic or local work.
    LowRiskTopic,
}

impl PatternCategory {
    /// Number of categories.
    pub const COUNT: usize = 5;

    /// Every category, in evaluation order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Destructive,
        Self::HighRiskCommand,
        Self::SensitivePath,
        Self::HighRiskTopic,
        Self::LowRiskTopic,
    ];

    /// Position of the category in [`Self::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Destructive => 0,
            Self::HighRiskCommand => 1,
            Self::SensitivePath => 2,
            Self::HighRiskTopic => 3,
            Self::LowRiskTopic => 4,
        }
    }

    /// Kebab-case name, as used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Destructive => "destructive",
            Self::HighRiskCommand => "high-risk-command",
            Self::SensitivePath => "sensitive-path",
            Self::HighRiskTopic => "high-risk-topic",
            Self::LowRiskTopic => "low-risk-topic",
        }
    }

    /// Severity assigned to rules of this category unless they say otherwise.
    #[must_use]
    pub fn default_severity(self) -> Severity {
        match self {
            Self::Destructive => Severity::Critical,
            Self::HighRiskCommand | Self::SensitivePath | Self::HighRiskTopic => Severity::High,
            Self::LowRiskTopic => Severity::Low,
        }
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternCategory {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| PatternError::UnknownCategory(s.to_string()))
    }
}

/// How serious a match is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational.
    Low,
    /// Worth a second look.
    Medium,
    /// Requires confirmation.
    High,
    /// Never acceptable without outside review.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for Severity {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(PatternError::UnknownSeverity(other.to_string())),
        }
    }
}

/// Uncompiled description of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Unique identifier (`cmd.git-push`).
    pub id: String,
    /// Category the rule belongs to.
    pub category: PatternCategory,
    /// Regular expression, matched case-insensitively and unanchored.
    pub pattern: String,
    /// Severity; defaults to the category's.
    #[serde(default)]
    pub severity: Option<Severity>,
    /// Human-readable explanation surfaced when the rule matches.
    #[serde(default)]
    pub message: String,
}

impl RuleSpec {
    /// Describe a rule with the category's default severity.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        category: PatternCategory,
        pattern: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            pattern: pattern.into(),
            severity: None,
            message: message.into(),
        }
    }
}

/// A compiled, immutable rule.
#[derive(Debug, Clone)]
pub struct PatternRule {
    id: String,
    category: PatternCategory,
    matcher: Regex,
    severity: Severity,
    message: String,
}

impl PatternRule {
    /// Compile a rule.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::EmptyPattern`] for a blank pattern and
    /// [`PatternError::Compile`] when the pattern is not a valid regex.
    pub fn compile(spec: RuleSpec) -> PatternResult<Self> {
        if spec.pattern.trim().is_empty() {
            return Err(PatternError::EmptyPattern { id: spec.id });
        }

        let matcher = RegexBuilder::new(&spec.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| PatternError::Compile {
                id: spec.id.clone(),
                source,
            })?;

        Ok(Self {
            severity: spec
                .severity
                .unwrap_or_else(|| spec.category.default_severity()),
            id: spec.id,
            category: spec.category,
            matcher,
            message: spec.message,
        })
    }

    /// Check the rule against the full text.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    /// Rule identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Rule category.
    #[must_use]
    pub fn category(&self) -> PatternCategory {
        self.category
    }

    /// Source text of the matcher.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }

    /// Rule severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Human-readable explanation.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_is_case_insensitive() {
        let rule = PatternRule::compile(RuleSpec::new(
            "cmd.git-push",
            PatternCategory::HighRiskCommand,
            r"\bgit\s+push\b",
            "pushes to a remote",
        ))
        .unwrap();

        assert!(rule.is_match("GIT PUSH origin main"));
        assert!(rule.is_match("cd repo && git push"));
        assert!(!rule.is_match("git pull"));
        assert_eq!(rule.severity(), Severity::High);
    }

    #[test]
    fn test_compile_rejects_invalid_regex() {
        let err = PatternRule::compile(RuleSpec::new(
            "broken",
            PatternCategory::Destructive,
            r"(unclosed",
            "",
        ))
        .unwrap_err();
        assert!(matches!(err, PatternError::Compile { ref id, .. } if id == "broken"));
    }

    #[test]
    fn test_compile_rejects_empty_pattern() {
        let err = PatternRule::compile(RuleSpec::new("blank", PatternCategory::LowRiskTopic, "  ", ""))
            .unwrap_err();
        assert!(matches!(err, PatternError::EmptyPattern { .. }));
    }

    #[test]
    fn test_explicit_severity_overrides_default() {
        let mut spec = RuleSpec::new("x", PatternCategory::HighRiskCommand, "x", "");
        spec.severity = Some(Severity::Medium);
        assert_eq!(PatternRule::compile(spec).unwrap().severity(), Severity::Medium);
    }

    #[test]
    fn test_category_round_trip_names() {
        for category in PatternCategory::ALL {
            assert_eq!(category.as_str().parse::<PatternCategory>().unwrap(), category);
            assert_eq!(PatternCategory::ALL[category.index()], category);
        }
        assert!("shell".parse::<PatternCategory>().is_err());
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert!(matches!(
            "urgent".parse::<Severity>(),
            Err(PatternError::UnknownSeverity(_))
        ));
    }

    #[test]
    fn test_rule_spec_deserializes_kebab_category() {
        let spec: RuleSpec = serde_json::from_str(
            r#"{"id": "p.vault", "category": "sensitive-path", "pattern": "vault\\.json$"}"#,
        )
        .unwrap();
        assert_eq!(spec.category, PatternCategory::SensitivePath);
        assert!(spec.message.is_empty());
    }
}
