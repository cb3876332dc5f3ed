//! Style rules
//!
//! A rule pairs a selector disjunction with the style it applies.
//! Rules keep their declaration order; later rules win ties.

use super::selector::ScopeSelectors;
use super::style::StyleModifier;

/// A single style rule from a theme's `tokenColors`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Optional human-readable name, for diagnostics
    pub name: Option<String>,
    /// Selectors claiming tokens for this rule
    pub selectors: ScopeSelectors,
    /// Style applied when this rule wins
    pub style: StyleModifier,
}

impl StyleRule {
    /// Create a new unnamed rule
    pub fn new(selectors: ScopeSelectors, style: StyleModifier) -> Self {
        Self {
            name: None,
            selectors,
            style,
        }
    }

    /// Builder: set the rule name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Name if present, otherwise the selector list
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.selectors.to_string())
    }
}

/// A rule claiming a particular candidate scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    /// Declaration index of the rule
    pub index: usize,
    /// The matching rule
    pub rule: &'a StyleRule,
    /// Segments of the most specific matching selector
    pub specificity: usize,
    /// Position of the candidate in the token's scope list
    pub scope_index: usize,
}

/// Validated rules in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<StyleRule>,
}

impl RuleSet {
    /// Create a rule set from rules in declaration order
    pub fn new(rules: Vec<StyleRule>) -> Self {
        Self { rules }
    }

    /// Append a rule; it overrides earlier rules of equal specificity
    pub fn push(&mut self, rule: StyleRule) {
        self.rules.push(rule);
    }

    /// All rules in declaration order
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Get a rule by declaration index
    pub fn get(&self, index: usize) -> Option<&StyleRule> {
        self.rules.get(index)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every rule claiming `scopes[scope_index]`, in declaration order
    pub fn matching<S: AsRef<str>>(&self, scopes: &[S], scope_index: usize) -> Vec<RuleMatch<'_>> {
        self.rules
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| {
                rule.selectors
                    .specificity_at(scopes, scope_index)
                    .map(|specificity| RuleMatch {
                        index,
                        rule,
                        specificity,
                        scope_index,
                    })
            })
            .collect()
    }

    /// The winning rule for `scopes[scope_index]`
    ///
    /// Highest specificity first, then latest declaration.
    pub fn best_at<S: AsRef<str>>(&self, scopes: &[S], scope_index: usize) -> Option<RuleMatch<'_>> {
        self.matching(scopes, scope_index)
            .into_iter()
            .max_by_key(|m| (m.specificity, m.index))
    }
}

impl FromIterator<StyleRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = StyleRule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
