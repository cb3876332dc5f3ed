//! Scope paths and selectors
//!
//! A scope is a dot-delimited label such as `keyword.control.ruby`. Selectors
//! are matched segment-wise, never as substrings: `string` claims
//! `string.quoted` but not `stringify.literal`.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationReason;

/// A non-empty sequence of non-empty scope segments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopePath {
    segments: Vec<String>,
}

impl ScopePath {
    /// Parse a dot-delimited path; `None` if it or any segment is empty
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return None;
        }
        let segments: Vec<String> = s.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return None;
        }
        Some(Self { segments })
    }

    /// The segments of this path
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; paths have at least one segment
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check whether this path equals `scope` or is a segment-wise ancestor of it
    pub fn is_prefix_of(&self, scope: &str) -> bool {
        let mut parts = scope.split('.');
        self.segments
            .iter()
            .all(|segment| parts.next() == Some(segment.as_str()))
    }
}

impl fmt::Display for ScopePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// One selector: a target path with optional ancestor context
///
/// Written as space-separated paths, outermost first, e.g.
/// `source.ruby string.quoted`. Only the last path (the target) counts
/// towards specificity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeSelector {
    context: Vec<ScopePath>,
    target: ScopePath,
}

impl ScopeSelector {
    /// Parse a single selector; `None` if empty or any path is malformed
    pub fn parse(s: &str) -> Option<Self> {
        let mut paths: Vec<ScopePath> = s
            .split_whitespace()
            .map(ScopePath::parse)
            .collect::<Option<_>>()?;
        let target = paths.pop()?;
        Some(Self {
            context: paths,
            target,
        })
    }

    /// The path that must prefix the candidate scope
    pub fn target(&self) -> &ScopePath {
        &self.target
    }

    /// Ancestor paths, outermost first
    pub fn context(&self) -> &[ScopePath] {
        &self.context
    }

    /// Number of segments in the target path
    pub fn specificity(&self) -> usize {
        self.target.len()
    }

    /// Check whether this selector claims `scopes[index]`
    ///
    /// `scopes` is innermost first; context paths must match the outer
    /// scopes (`scopes[index + 1..]`) in order.
    pub fn matches_at<S: AsRef<str>>(&self, scopes: &[S], index: usize) -> bool {
        let Some(candidate) = scopes.get(index) else {
            return false;
        };
        if !self.target.is_prefix_of(candidate.as_ref()) {
            return false;
        }

        let mut outer = scopes[index + 1..].iter();
        self.context
            .iter()
            .rev()
            .all(|path| outer.by_ref().any(|scope| path.is_prefix_of(scope.as_ref())))
    }
}

impl fmt::Display for ScopeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for path in &self.context {
            write!(f, "{path} ")?;
        }
        write!(f, "{}", self.target)
    }
}

/// A disjunction of selectors; any one matching is enough
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeSelectors {
    selectors: Vec<ScopeSelector>,
}

impl ScopeSelectors {
    /// Build from already parsed selectors; `None` if the list is empty
    pub fn new(selectors: Vec<ScopeSelector>) -> Option<Self> {
        if selectors.is_empty() {
            None
        } else {
            Some(Self { selectors })
        }
    }

    /// Parse a list of selector strings, each of which may be comma-separated
    pub fn from_list<S: AsRef<str>>(items: &[S]) -> Result<Self, ValidationReason> {
        let mut selectors = Vec::new();
        for item in items {
            selectors.extend(item.as_ref().parse::<ScopeSelectors>()?.selectors);
        }
        let joined = items
            .iter()
            .map(|item| item.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(selectors).ok_or(ValidationReason::EmptySelector(joined))
    }

    /// The selectors in declaration order
    pub fn selectors(&self) -> &[ScopeSelector] {
        &self.selectors
    }

    /// Highest specificity among selectors matching `scopes[index]`
    pub fn specificity_at<S: AsRef<str>>(&self, scopes: &[S], index: usize) -> Option<usize> {
        self.selectors
            .iter()
            .filter(|selector| selector.matches_at(scopes, index))
            .map(ScopeSelector::specificity)
            .max()
    }
}

impl FromStr for ScopeSelectors {
    type Err = ValidationReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let selectors = s
            .split(',')
            .map(|part| ScopeSelector::parse(part.trim()))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ValidationReason::EmptySelector(s.to_string()))?;
        Self::new(selectors).ok_or_else(|| ValidationReason::EmptySelector(s.to_string()))
    }
}

impl fmt::Display for ScopeSelectors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.selectors.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> ScopePath {
        ScopePath::parse(s).unwrap()
    }

    #[test]
    fn test_path_prefix_is_segment_wise() {
        assert!(path("keyword.control").is_prefix_of("keyword.control.ruby"));
        assert!(path("keyword.control").is_prefix_of("keyword.control"));
        assert!(!path("keyword.control").is_prefix_of("keyword.operator"));
        assert!(!path("keyword.control").is_prefix_of("keyword"));
        assert!(!path("string").is_prefix_of("stringify.literal"));
        assert!(!path("keyword.con").is_prefix_of("keyword.control"));
    }

    #[test]
    fn test_path_rejects_empty_segments() {
        assert!(ScopePath::parse("").is_none());
        assert!(ScopePath::parse("a..b").is_none());
        assert!(ScopePath::parse(".a").is_none());
        assert!(ScopePath::parse("a.").is_none());
        assert_eq!(path("entity.name.function").len(), 3);
    }

    #[test]
    fn test_unicode_compared_opaquely() {
        assert!(path("métier").is_prefix_of("métier.ruby"));
        // precomposed vs decomposed e-acute are different strings
        assert!(!path("m\u{e9}tier").is_prefix_of("me\u{301}tier.ruby"));
    }

    #[test]
    fn test_selector_context() {
        let selector = ScopeSelector::parse("source.ruby string").unwrap();
        assert_eq!(selector.specificity(), 1);
        assert_eq!(selector.context().len(), 1);

        let scopes = ["string.quoted.double", "meta.block", "source.ruby"];
        assert!(selector.matches_at(&scopes, 0));

        let python = ["string.quoted.double", "source.python"];
        assert!(!selector.matches_at(&python, 0));
    }

    #[test]
    fn test_selector_context_order() {
        let selector = ScopeSelector::parse("source.ruby meta.class string").unwrap();
        let ordered = ["string", "meta.class.ruby", "source.ruby"];
        assert!(selector.matches_at(&ordered, 0));

        // context must appear outermost-to-innermost
        let reversed = ["string", "source.ruby", "meta.class.ruby"];
        assert!(!selector.matches_at(&reversed, 0));
    }

    #[test]
    fn test_selectors_parse_comma_list() {
        let selectors: ScopeSelectors = "keyword, storage.type".parse().unwrap();
        assert_eq!(selectors.selectors().len(), 2);
        assert_eq!(selectors.to_string(), "keyword, storage.type");

        assert!("keyword,".parse::<ScopeSelectors>().is_err());
        assert!("".parse::<ScopeSelectors>().is_err());
        assert!("  ".parse::<ScopeSelectors>().is_err());
    }

    #[test]
    fn test_selectors_from_list() {
        let selectors = ScopeSelectors::from_list(&["comment", "comment.line"]).unwrap();
        assert_eq!(selectors.selectors().len(), 2);

        let empty: [&str; 0] = [];
        assert!(matches!(
            ScopeSelectors::from_list(&empty),
            Err(ValidationReason::EmptySelector(_))
        ));
        assert!(ScopeSelectors::from_list(&["comment", ""]).is_err());
    }

    #[test]
    fn test_specificity_is_max_over_matches() {
        let selectors = ScopeSelectors::from_list(&["comment", "comment.line"]).unwrap();
        let scopes = ["comment.line.double-slash", "source.ruby"];
        assert_eq!(selectors.specificity_at(&scopes, 0), Some(2));
        assert_eq!(selectors.specificity_at(&scopes, 1), None);
        assert_eq!(selectors.specificity_at(&scopes, 5), None);
    }
}
