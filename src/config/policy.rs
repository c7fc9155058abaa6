//! # Truncation Policy
//!
//! Oversized input is either rejected or silently cut to fit, independently
//! along three axes:
//!
//! | Axis | Applies to | Default | Cut direction |
//! |------|------------|---------|---------------|
//! | string | Character | allow | keep leftmost bytes |
//! | integer | Number integer part | reject | keep rightmost digits |
//! | decimal | Number fractional part | reject | keep leftmost digits |
//!
//! Float fields have no truncation axis: an oversized numeral always fails.
//! Changing the policy only affects later writes.

use crate::error::TruncationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TruncationPolicy {
    pub allow_string: bool,
    pub allow_integer: bool,
    pub allow_decimal: bool,
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        Self {
            allow_string: true,
            allow_integer: false,
            allow_decimal: false,
        }
    }
}

impl TruncationPolicy {
    pub fn strict() -> Self {
        Self {
            allow_string: false,
            allow_integer: false,
            allow_decimal: false,
        }
    }

    pub fn lenient() -> Self {
        Self {
            allow_string: true,
            allow_integer: true,
            allow_decimal: true,
        }
    }

    pub fn with_string_truncate(mut self, allow: bool) -> Self {
        self.allow_string = allow;
        self
    }

    pub fn with_integer_truncate(mut self, allow: bool) -> Self {
        self.allow_integer = allow;
        self
    }

    pub fn with_decimal_truncate(mut self, allow: bool) -> Self {
        self.allow_decimal = allow;
        self
    }

    pub fn allows(&self, kind: TruncationKind) -> bool {
        match kind {
            TruncationKind::String => self.allow_string,
            TruncationKind::IntegerDigits => self.allow_integer,
            TruncationKind::DecimalDigits => self.allow_decimal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_only_string_truncation() {
        let policy = TruncationPolicy::default();
        assert!(policy.allows(TruncationKind::String));
        assert!(!policy.allows(TruncationKind::IntegerDigits));
        assert!(!policy.allows(TruncationKind::DecimalDigits));
    }

    #[test]
    fn builder_flags_are_independent() {
        let policy = TruncationPolicy::strict().with_decimal_truncate(true);
        assert!(!policy.allows(TruncationKind::String));
        assert!(!policy.allows(TruncationKind::IntegerDigits));
        assert!(policy.allows(TruncationKind::DecimalDigits));

        let policy = TruncationPolicy::lenient().with_string_truncate(false);
        assert!(!policy.allow_string);
        assert!(policy.allow_integer);
        assert!(policy.allow_decimal);
    }
}
