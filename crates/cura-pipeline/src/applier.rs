//! The generic rule applier: one interpreter for every sanitation family.
//!
//! Stage logic never branches on individual patterns — each stage hands its
//! family to `apply_family`, which walks that family's rules in ascending
//! `order` and applies each with replace-all semantics.  Adding a rule is a
//! table edit in `cura-rules`, never a change here.

use tracing::debug;

use cura_rules::{RuleFamily, SanitationRuleSet};

/// Apply one family's rules to `text`, in ascending `order`.
///
/// Absence of matches leaves the text unchanged for that rule; an empty
/// family leaves the text unchanged entirely.  Any input — including the
/// empty string — is valid.
pub fn apply_family(text: &str, rules: &SanitationRuleSet, family: RuleFamily) -> String {
    let mut current = text.to_string();

    for compiled in rules.family(family) {
        let replaced = compiled
            .regex
            .replace_all(&current, compiled.replacement())
            .into_owned();

        if replaced != current {
            debug!(
                rule_id = %compiled.rule.id,
                family = ?family,
                "sanitation rule rewrote text"
            );
        }

        current = replaced;
    }

    current
}

/// True when the redact family is a no-op on `text`.
///
/// This is the compliance condition: a document is forwardable only if
/// redaction would not change it — which holds after a masking pass
/// (the family is idempotent) and fails when masking was skipped on input
/// that still carries redaction-pattern matches.
pub fn redaction_clean(text: &str, rules: &SanitationRuleSet) -> bool {
    apply_family(text, rules, RuleFamily::Redact) == text
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cura_rules::{RuleFamily, SanitationRuleSet};

    use super::{apply_family, redaction_clean};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn builtin() -> Arc<SanitationRuleSet> {
        SanitationRuleSet::builtin()
    }

    fn clean(text: &str) -> String {
        apply_family(text, &builtin(), RuleFamily::Clean)
    }

    fn normalize(text: &str) -> String {
        apply_family(text, &builtin(), RuleFamily::Normalize)
    }

    fn mask(text: &str) -> String {
        apply_family(text, &builtin(), RuleFamily::Redact)
    }

    // ── Cleaning ──────────────────────────────────────────────────────────────

    #[test]
    fn clean_strips_markup_tags() {
        assert_eq!(clean("<div>Chief complaint</div>"), "Chief complaint");
        assert_eq!(
            clean("<span class=\"id\">ID: 42</span>"),
            "ID: 42"
        );
    }

    #[test]
    fn clean_collapses_entities() {
        assert_eq!(clean("12 Elm Road &nbsp;"), "12 Elm Road  ");
        assert_eq!(clean("said &quot;no pain&quot;"), "said \"no pain\"");
    }

    #[test]
    fn clean_removes_corruption_markers() {
        assert_eq!(clean("110101198001011234??"), "110101198001011234");
    }

    /// Text without markup must pass through untouched.
    #[test]
    fn clean_preserves_plain_text() {
        let plain = "BP 150/95 mmHg, no prior events.";
        assert_eq!(clean(plain), plain);
    }

    // ── Mapping ───────────────────────────────────────────────────────────────

    #[test]
    fn normalize_maps_colloquialism_and_drops_remnant() {
        let input = "Patient reports chest impediment (Xiong Bi) for 3 days.";
        let output = normalize(input);

        assert_eq!(
            output,
            "Patient reports [standardized: angina pectoris] for 3 days."
        );
    }

    #[test]
    fn normalize_is_case_insensitive() {
        assert_eq!(
            normalize("Chest Tightness on exertion"),
            "[standardized: chest discomfort] on exertion"
        );
    }

    // ── Masking ───────────────────────────────────────────────────────────────

    #[test]
    fn mask_redacts_national_id() {
        assert_eq!(mask("ID: 110101198001011234"), "ID: [ID REDACTED]");
    }

    #[test]
    fn mask_redacts_name_token_but_keeps_label() {
        assert_eq!(mask("Name: Wei"), "Name: [REDACTED]");
    }

    /// The name heuristic is deliberately narrow: only a 2-4 letter token is
    /// masked, so longer names are masked partially, exactly as upstream
    /// consumers expect.
    #[test]
    fn mask_name_heuristic_is_narrow() {
        assert_eq!(mask("Name: Alexander"), "Name: [REDACTED]ander");
    }

    #[test]
    fn mask_redacts_address_remainder_but_keeps_label() {
        assert_eq!(
            mask("Address: 12 Chaoyang North Street\nNext line"),
            "Address: [ADDRESS REDACTED]\nNext line"
        );
    }

    /// Masking already-masked text must be a no-op.
    #[test]
    fn mask_is_idempotent() {
        let inputs = [
            "Name: Wei, ID 110101198001011234, Address: somewhere far",
            "Name: [REDACTED] already done",
            "",
            "no pii at all",
        ];

        for input in inputs {
            let once = mask(input);
            let twice = mask(&once);
            assert_eq!(once, twice, "MASK(MASK(t)) != MASK(t) for {input:?}");
        }
    }

    /// Clean and normalize must also be idempotent against their own output.
    #[test]
    fn clean_and_normalize_are_idempotent() {
        let input =
            "<div>chest impediment (Xiong Bi)</div>&nbsp;?? &quot;chest tightness&quot; <b>x</b>";

        let cleaned = clean(input);
        assert_eq!(clean(&cleaned), cleaned);

        let normalized = normalize(&cleaned);
        assert_eq!(normalize(&normalized), normalized);
    }

    /// The three redaction rules must not overlap in match surface: applying
    /// them in any order yields the same text.
    #[test]
    fn mask_sub_rules_are_order_independent() {
        let input = "Name: Wei\nID: 110101198001011234\nAddress: 12 Elm Road, Flat 3";

        // Reversed `order` values for the same three rules.
        let reversed = SanitationRuleSet::from_toml_str(
            r#"
            [[rules]]
            id = "redact-address-label"
            description = "address first"
            family = "redact"
            order = 10
            pattern = '(Address:\s*)(.*)'
            replace = '${1}[ADDRESS REDACTED]'

            [[rules]]
            id = "redact-name-label"
            description = "name second"
            family = "redact"
            order = 20
            pattern = '(Name:\s*)([A-Za-z]{2,4})'
            replace = '${1}[REDACTED]'

            [[rules]]
            id = "redact-national-id"
            description = "id last"
            family = "redact"
            order = 30
            pattern = '\d{18}'
            replace = '[ID REDACTED]'
        "#,
        )
        .unwrap();

        assert_eq!(
            mask(input),
            apply_family(input, &reversed, RuleFamily::Redact)
        );
    }

    // ── Compliance scan ───────────────────────────────────────────────────────

    #[test]
    fn redaction_clean_accepts_masked_and_harmless_text() {
        let rules = builtin();
        assert!(redaction_clean("Name: [REDACTED]", &rules));
        assert!(redaction_clean("no identifiers here", &rules));
        assert!(redaction_clean("", &rules));
    }

    #[test]
    fn redaction_clean_rejects_unmasked_pii() {
        let rules = builtin();
        assert!(!redaction_clean("110101198001011234", &rules));
        assert!(!redaction_clean("Name: Wei", &rules));
        assert!(!redaction_clean("Address: 12 Elm Road", &rules));
    }
}
