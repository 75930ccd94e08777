//! Client-side password policy, checked before a sign-up is ever
//! submitted. The backend enforces its own minimums; this exists so the
//! form can show live feedback per rule.

pub struct PasswordRule {
    /// Stable identifier for the form layer.
    pub id: &'static str,
    /// Short checklist label.
    pub label: &'static str,
    /// Full message shown when the rule is unmet on submit.
    pub message: &'static str,
    check: fn(&str) -> bool,
}

impl PasswordRule {
    pub fn is_met(&self, password: &str) -> bool {
        (self.check)(password)
    }
}

pub const PASSWORD_RULES: [PasswordRule; 5] = [
    PasswordRule {
        id: "length",
        label: "8 characters minimum",
        message: "Minimum 8 characters long.",
        check: |p| p.chars().count() >= 8,
    },
    PasswordRule {
        id: "uppercase",
        label: "One uppercase letter",
        message: "At least one uppercase letter (A-Z).",
        check: |p| p.chars().any(|c| c.is_ascii_uppercase()),
    },
    PasswordRule {
        id: "lowercase",
        label: "One lowercase letter",
        message: "At least one lowercase letter (a-z).",
        check: |p| p.chars().any(|c| c.is_ascii_lowercase()),
    },
    PasswordRule {
        id: "number",
        label: "One number",
        message: "At least one number (0-9).",
        check: |p| p.chars().any(|c| c.is_ascii_digit()),
    },
    PasswordRule {
        id: "symbol",
        label: "One symbol (e.g., $, #)",
        message: "At least one symbol (e.g., !, $, #).",
        check: |p| p.chars().any(|c| !c.is_ascii_alphanumeric()),
    },
];

/// Rules the password does not meet, in checklist order. Empty means the
/// password may be submitted.
pub fn validate_password(password: &str) -> Vec<&'static PasswordRule> {
    PASSWORD_RULES
        .iter()
        .filter(|rule| !rule.is_met(password))
        .collect()
}

pub fn is_password_valid(password: &str) -> bool {
    validate_password(password).is_empty()
}

/// Per-rule pass/fail for the live checklist next to the password field.
pub fn password_checklist(password: &str) -> Vec<(&'static PasswordRule, bool)> {
    PASSWORD_RULES
        .iter()
        .map(|rule| (rule, rule.is_met(password)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unmet_ids(password: &str) -> Vec<&'static str> {
        validate_password(password).iter().map(|r| r.id).collect()
    }

    #[test]
    fn strong_password_passes_every_rule() {
        assert!(is_password_valid("MyP@ssw0rd!"));
        assert!(unmet_ids("Str0ng!Pass").is_empty());
    }

    #[test]
    fn abc_fails_four_of_five_rules() {
        assert_eq!(unmet_ids("abc"), vec!["length", "uppercase", "number", "symbol"]);
    }

    #[test]
    fn alphanumeric_only_fails_just_the_symbol_rule() {
        assert_eq!(unmet_ids("Abc12345"), vec!["symbol"]);
    }

    #[test]
    fn each_rule_fails_in_isolation() {
        assert_eq!(unmet_ids("Ab1!"), vec!["length"]);
        assert_eq!(unmet_ids("lowercase1!"), vec!["uppercase"]);
        assert_eq!(unmet_ids("UPPERCASE1!"), vec!["lowercase"]);
        assert_eq!(unmet_ids("NoDigits!!"), vec!["number"]);
        assert_eq!(unmet_ids("NoSymbol123"), vec!["symbol"]);
    }

    #[test]
    fn checklist_tracks_rules_as_they_are_met() {
        let checklist = password_checklist("Abc1");
        let met: Vec<bool> = checklist.iter().map(|(_, ok)| *ok).collect();
        // length no, uppercase yes, lowercase yes, number yes, symbol no
        assert_eq!(met, vec![false, true, true, true, false]);
    }

    #[test]
    fn empty_password_fails_everything() {
        assert_eq!(unmet_ids("").len(), 5);
    }
}
