//! The pattern rewriter: ordered regex find/replace rules.
//!
//! A [`RuleSet`] applies each of its rules against the *entire current
//! text* in order, so later rules operate on the output of earlier rules.
//! Rule order is explicit and deterministic; there is no implicit parallel
//! application.
//!
//! Patterns are anchored loosely: the surrounding text on a matched line is
//! captured and reproduced verbatim, so only the matched span is rewritten.
//! Text that no rule matches passes through byte-identical.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// A single find/replace rule: a pattern with capture groups and a
/// replacement template referencing those groups.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    template: &'static str,
}

impl RewriteRule {
    /// Creates a rule from a compiled pattern and a replacement template.
    #[must_use]
    pub fn new(pattern: Regex, template: &'static str) -> Self {
        Self { pattern, template }
    }

    /// Applies this rule to the whole text, replacing every match.
    #[must_use]
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, self.template)
    }
}

/// An ordered list of rewrite rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<RewriteRule>,
}

impl RuleSet {
    /// Creates a rule set. The given order is the application order.
    #[must_use]
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    /// Applies every rule in order, feeding each rule the previous rule's
    /// output.
    ///
    /// Returns [`Cow::Borrowed`] when no rule matched, so a no-op pass is
    /// allocation-free and provably byte-identical.
    #[must_use]
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut current = Cow::Borrowed(text);

        for rule in &self.rules {
            let rewritten = match rule.apply(&current) {
                Cow::Owned(rewritten) => Some(rewritten),
                Cow::Borrowed(_) => None,
            };
            if let Some(rewritten) = rewritten {
                current = Cow::Owned(rewritten);
            }
        }

        current
    }

    /// The number of rules in this set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the set contains no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// Patterns are compile-time constants; unwrap cannot fail at runtime.
#[allow(clippy::unwrap_used)]
static CALL_SITE_NO_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.*)factory\(([A-Za-z\\]+)::class\)(.*)").unwrap());

#[allow(clippy::unwrap_used)]
static CALL_SITE_WITH_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.*)factory\(([A-Za-z\\]+)::class, ?([0-9]+)\)(.*)").unwrap());

/// The call-site conversion rules, in the order the legacy converter
/// applied them.
///
/// 1. `factory(Model::class)` becomes `Model::factory()`
/// 2. `factory(Model::class, N)` becomes `Model::factory()->count(N)`
///
/// The no-count pattern cannot match `factory(Model::class, N)` because the
/// literal `)` must follow `::class`, and its own output contains no
/// `factory(<class>::class)` span, so re-applying the set is a no-op.
#[must_use]
pub fn call_site_rules() -> RuleSet {
    RuleSet::new(vec![
        RewriteRule::new(CALL_SITE_NO_COUNT.clone(), "${1}${2}::factory()${3}"),
        RewriteRule::new(
            CALL_SITE_WITH_COUNT.clone(),
            "${1}${2}::factory()->count(${3})${4}",
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_count_invocation() {
        let rules = call_site_rules();
        let input = "        $user = factory(App\\User::class)->create();\n";
        let output = rules.apply(input);

        assert_eq!(
            output,
            "        $user = App\\User::factory()->create();\n"
        );
    }

    #[test]
    fn test_counted_invocation_carries_count() {
        let rules = call_site_rules();
        let input = "$users = factory(App\\User::class, 25)->create();";
        let output = rules.apply(input);

        assert_eq!(output, "$users = App\\User::factory()->count(25)->create();");
    }

    #[test]
    fn test_count_with_and_without_space() {
        let rules = call_site_rules();

        assert_eq!(
            rules.apply("factory(User::class,3)->make();"),
            "User::factory()->count(3)->make();"
        );
        assert_eq!(
            rules.apply("factory(User::class, 3)->make();"),
            "User::factory()->count(3)->make();"
        );
    }

    #[test]
    fn test_surrounding_text_preserved() {
        let rules = call_site_rules();
        let input = "return ['user_id' => factory(App\\User::class), 'x' => 1];";
        let output = rules.apply(input);

        assert_eq!(
            output,
            "return ['user_id' => App\\User::factory(), 'x' => 1];"
        );
    }

    #[test]
    fn test_no_match_is_byte_identical() {
        let rules = call_site_rules();
        let input = "<?php\n\n$value = Model::query()->count();\n";
        let output = rules.apply(input);

        assert!(matches!(output, Cow::Borrowed(_)));
        assert_eq!(output, input);
    }

    #[test]
    fn test_second_application_does_not_rematch() {
        let rules = call_site_rules();
        let once = rules.apply("factory(App\\User::class)->create();").into_owned();
        let twice = rules.apply(&once);

        assert_eq!(twice, once);
    }

    #[test]
    fn test_multiple_lines_each_rewritten() {
        let rules = call_site_rules();
        let input = "factory(App\\User::class)->create();\nfactory(App\\Post::class, 5)->create();\n";
        let output = rules.apply(input);

        assert_eq!(
            output,
            "App\\User::factory()->create();\nApp\\Post::factory()->count(5)->create();\n"
        );
    }

    #[test]
    fn test_empty_rule_set_passes_through() {
        let rules = RuleSet::new(Vec::new());
        assert!(rules.is_empty());
        assert_eq!(rules.apply("anything"), "anything");
    }
}
