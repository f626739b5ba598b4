//! The compiled, read-only pattern catalog.

use std::collections::HashSet;

use tracing::debug;

use crate::builtin::{BUILTIN_VERSION, builtin_specs};
use crate::error::{PatternError, PatternResult};
use crate::rule::{PatternCategory, PatternRule, RuleSpec};

/// Named, versioned sets of compiled rules, one per category.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    version: String,
    rules: [Vec<PatternRule>; PatternCategory::COUNT],
}

impl PatternCatalog {
    /// The built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error only if a built-in table fails to compile.
    pub fn builtin() -> PatternResult<Self> {
        Self::builder().with_builtin().build()
    }

    /// Start an empty catalog builder.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Catalog version tag.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Rules of one category, in evaluation order.
    #[must_use]
    pub fn rules(&self, category: PatternCategory) -> &[PatternRule] {
        &self.rules[category.index()]
    }

    /// First rule of `category` matching `text`.
    #[must_use]
    pub fn first_match(&self, text: &str, category: PatternCategory) -> Option<&PatternRule> {
        self.rules(category).iter().find(|rule| rule.is_match(text))
    }

    /// Whether any rule of `category` matches `text`.
    #[must_use]
    pub fn matches_any(&self, text: &str, category: PatternCategory) -> bool {
        self.first_match(text, category).is_some()
    }

    /// Every rule, category by category.
    pub fn iter(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter().flatten()
    }

    /// Total number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.iter().map(Vec::len).sum()
    }

    /// Whether the catalog holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.iter().all(Vec::is_empty)
    }
}

/// Builder for [`PatternCatalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    version: Option<String>,
    specs: Vec<RuleSpec>,
}

impl CatalogBuilder {
    /// Include the built-in tables.
    #[must_use]
    pub fn with_builtin(mut self) -> Self {
        self.specs.extend(builtin_specs());
        self
    }

    /// Override the version tag.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Append one rule.
    #[must_use]
    pub fn rule(mut self, spec: RuleSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Append several rules.
    #[must_use]
    pub fn rules(mut self, specs: impl IntoIterator<Item = RuleSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Compile every rule.
    ///
    /// # Errors
    ///
    /// Fails on the first rule that does not compile, and on duplicate ids.
    pub fn build(self) -> PatternResult<PatternCatalog> {
        let mut seen = HashSet::with_capacity(self.specs.len());
        let mut rules: [Vec<PatternRule>; PatternCategory::COUNT] = Default::default();

        for spec in self.specs {
            if !seen.insert(spec.id.clone()) {
                return Err(PatternError::DuplicateId { id: spec.id });
            }
            let rule = PatternRule::compile(spec)?;
            rules[rule.category().index()].push(rule);
        }

        let catalog = PatternCatalog {
            version: self.version.unwrap_or_else(|| BUILTIN_VERSION.to_string()),
            rules,
        };
        debug!(
            version = %catalog.version,
            rules = catalog.len(),
            "Pattern catalog compiled"
        );
        Ok(catalog)
    }
}
