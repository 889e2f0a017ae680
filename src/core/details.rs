//! Recognition of the "nothing else needed" answer from the details stage.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Literal the details stage is told to answer with when nothing is missing.
pub const DEFAULT_SENTINEL: &str = "No additional details required";

/// How a details answer is compared against the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentinelMatch {
    /// The whole answer is the sentinel, modulo surrounding quotes and a final period.
    #[default]
    Exact,
    /// The answer mentions the sentinel anywhere, ignoring case.
    Contains,
}

impl FromStr for SentinelMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "contains" => Ok(Self::Contains),
            other => Err(format!("Unknown sentinel match '{}'. Use exact or contains", other)),
        }
    }
}

/// The sentinel literal together with its matching rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsSentinel {
    pub text: String,
    pub mode: SentinelMatch,
}

impl Default for DetailsSentinel {
    fn default() -> Self {
        Self {
            text: DEFAULT_SENTINEL.to_string(),
            mode: SentinelMatch::Exact,
        }
    }
}

impl DetailsSentinel {
    pub fn new(text: impl Into<String>, mode: SentinelMatch) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }

    /// True when `answer` means "no additional details".
    pub fn matches(&self, answer: &str) -> bool {
        match self.mode {
            SentinelMatch::Exact => normalize(answer) == normalize(&self.text),
            SentinelMatch::Contains => answer
                .to_lowercase()
                .contains(&self.text.trim().to_lowercase()),
        }
    }
}

fn normalize(s: &str) -> &str {
    let s = s.trim();
    let s = s
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
        .trim();
    s.strip_suffix('.').unwrap_or(s).trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_accepts_quotes_and_final_period() {
        let s = DetailsSentinel::default();
        assert!(s.matches("No additional details required"));
        assert!(s.matches("  \"No additional details required.\"\n"));
        assert!(s.matches("No additional details required."));
    }

    #[test]
    fn exact_rejects_lists_and_paraphrases() {
        let s = DetailsSentinel::default();
        assert!(!s.matches("no additional details required"));
        assert!(!s.matches(
            "- Label: Transaction Date\n- Reason: needed to locate the charge\n- Question: When did it happen?"
        ));
        assert!(!s.matches("No additional details required, but the card number would help."));
    }

    #[test]
    fn contains_is_case_insensitive() {
        let s = DetailsSentinel::new(DEFAULT_SENTINEL, SentinelMatch::Contains);
        assert!(s.matches("Based on the query: no additional details required."));
        assert!(!s.matches("- Label: Account Number"));
    }

    #[test]
    fn parses_mode() {
        assert_eq!("Contains".parse::<SentinelMatch>(), Ok(SentinelMatch::Contains));
        assert!("fuzzy".parse::<SentinelMatch>().is_err());
    }
}
