//! Scope style resolution
//!
//! Resolution is a pure function of the token's scope list, the rule set
//! and the theme defaults. Candidate scopes are tried innermost first; the
//! first candidate any rule claims decides the token's style.

use super::rules::{RuleMatch, RuleSet};
use super::style::{DefaultStyle, ResolvedStyle};

/// Find the rule that styles a token, if any
///
/// `token_scopes` is ordered innermost first.
pub fn winning_rule<'a, S: AsRef<str>>(token_scopes: &[S], rules: &'a RuleSet) -> Option<RuleMatch<'a>> {
    (0..token_scopes.len()).find_map(|index| rules.best_at(token_scopes, index))
}

/// Resolve the style for a token
///
/// Exactly one rule wins; its style is applied over the defaults. A token
/// no rule claims (including one with no scopes) gets the default style.
pub fn resolve<S: AsRef<str>>(token_scopes: &[S], rules: &RuleSet, defaults: &DefaultStyle) -> ResolvedStyle {
    match winning_rule(token_scopes, rules) {
        Some(found) => found.rule.style.over(defaults),
        None => defaults.resolved(),
    }
}
