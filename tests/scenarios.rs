use scopetint::theme::{resolve, Color, DefaultStyle, RuleSet, ScopeSelectors, StyleModifier, StyleRule};
use scopetint::{Theme, ThemeError, ValidationReason};

fn rule(selectors: &[&str], fg: &str) -> StyleRule {
    StyleRule::new(
        ScopeSelectors::from_list(selectors).unwrap(),
        StyleModifier::fg(Color::parse(fg).unwrap()),
    )
}

#[test]
fn keyword_rule_styles_ruby_control_keyword() {
    let rules = RuleSet::new(vec![rule(&["keyword"], "#89DDFF")]);
    let style = resolve(&["keyword.control.ruby"], &rules, &DefaultStyle::default());
    assert_eq!(style.foreground, Color::rgb(0x89, 0xDD, 0xFF));
}

#[test]
fn more_specific_rule_wins() {
    let rules = RuleSet::new(vec![rule(&["keyword"], "#89DDFF"), rule(&["keyword.control"], "#FF0000")]);
    let style = resolve(&["keyword.control.ruby"], &rules, &DefaultStyle::default());
    assert_eq!(style.foreground, Color::rgb(0xFF, 0x00, 0x00));
}

#[test]
fn segment_match_not_substring() {
    let rules = RuleSet::new(vec![rule(&["string"], "#C3E88D")]);
    let defaults = DefaultStyle::default();
    assert_eq!(resolve(&["stringify.literal"], &rules, &defaults), defaults.resolved());
    assert_eq!(resolve(&["string.quoted"], &rules, &defaults).foreground, Color::rgb(0xC3, 0xE8, 0x8D));
}

#[test]
fn empty_scope_list_resolves_to_default() {
    let rules = RuleSet::new(vec![rule(&["keyword"], "#89DDFF")]);
    let defaults = DefaultStyle::default();
    let no_scopes: Vec<String> = Vec::new();
    assert_eq!(resolve(no_scopes.as_slice(), &rules, &defaults), defaults.resolved());
}

#[test]
fn multi_selector_rule_takes_max_specificity() {
    let rules = RuleSet::new(vec![
        rule(&["comment", "comment.line"], "#676E95"),
        rule(&["comment"], "#FFFFFF"),
    ]);
    let style = resolve(&["comment.line.double-slash", "source.ruby"], &rules, &DefaultStyle::default());
    assert_eq!(style.foreground, Color::rgb(0x67, 0x6E, 0x95));
}

#[test]
fn theme_shared_across_threads() {
    let theme = Theme::from_json_str(
        r##"{ "tokenColors": [ { "scope": "keyword", "settings": { "foreground": "#89DDFF" } } ] }"##,
    )
    .unwrap();
    let expected = theme.resolve(&["keyword.control.ruby"]);

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| assert_eq!(theme.resolve(&["keyword.control.ruby"]), expected));
        }
    });
}

#[test]
fn malformed_rule_rejected_with_index() {
    let result = Theme::from_json_str(
        r##"{ "tokenColors": [
            { "scope": "keyword", "settings": { "foreground": "#89DDFF" } },
            { "scope": "string", "settings": { "italic": "true" } }
        ] }"##,
    );
    match result {
        Err(ThemeError::Validation(err)) => {
            assert_eq!(err.index, 1);
            assert_eq!(err.reason, ValidationReason::UnknownField("italic".into()));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
