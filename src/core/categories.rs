//! The fixed set of support categories and the check applied to the chosen one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Labels offered to the model when no custom set is configured.
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Account Opening",
    "Billing Issue",
    "Account Access",
    "Transaction Inquiry",
    "Card Services",
    "Account Statement",
    "Loan Inquiry",
    "General Information",
];

/// Category the model is told to pick when nothing else fits.
pub const DEFAULT_FALLBACK: &str = "General Information";

/// An ordered, immutable list of category labels plus the designated default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    labels: Vec<String>,
    default: String,
}

impl Default for CategorySet {
    fn default() -> Self {
        Self {
            labels: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            default: DEFAULT_FALLBACK.to_string(),
        }
    }
}

impl CategorySet {
    /// Builds a custom set.
    ///
    /// The list must be non-empty, contain no duplicates (compared
    /// case-insensitively) and include `default`.
    pub fn new<I, S>(labels: I, default: &str) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into().trim().to_string();
            if label.is_empty() {
                return Err("Category labels must not be empty".to_string());
            }
            if out.iter().any(|l| l.eq_ignore_ascii_case(&label)) {
                return Err(format!("Duplicate category '{}'", label));
            }
            out.push(label);
        }
        if out.is_empty() {
            return Err("Category set must contain at least one label".to_string());
        }

        let default = out
            .iter()
            .find(|l| l.eq_ignore_ascii_case(default.trim()))
            .cloned()
            .ok_or_else(|| format!("Default category '{}' is not in the category set", default))?;

        Ok(Self {
            labels: out,
            default,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn default_label(&self) -> &str {
        &self.default
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.eq_ignore_ascii_case(label.trim()))
    }

    /// The set as a bulleted list, one `- Label` per line.
    pub fn as_bullets(&self) -> String {
        self.labels
            .iter()
            .map(|l| format!("- {}", l))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Finds the label a free-text answer refers to.
    ///
    /// The label whose first case-insensitive occurrence comes earliest in
    /// `text` wins; on a tie the longer label is preferred.
    pub fn find_in(&self, text: &str) -> Option<&str> {
        let haystack = text.to_lowercase();
        self.labels
            .iter()
            .filter_map(|label| {
                haystack
                    .find(&label.to_lowercase())
                    .map(|pos| (pos, label.as_str()))
            })
            .min_by(|(pa, la), (pb, lb)| pa.cmp(pb).then(lb.len().cmp(&la.len())))
            .map(|(_, label)| label)
    }
}

/// What to do when the chosen category is not one of the known labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryPolicy {
    /// Keep the model's text and carry on.
    Lenient,
    /// Carry on with the default category in later prompts.
    #[default]
    Fallback,
    /// Abort the run.
    Strict,
}

impl FromStr for CategoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "fallback" => Ok(Self::Fallback),
            "strict" => Ok(Self::Strict),
            other => Err(format!(
                "Unknown category policy '{}'. Use lenient, fallback or strict",
                other
            )),
        }
    }
}

impl fmt::Display for CategoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Lenient => "lenient",
            Self::Fallback => "fallback",
            Self::Strict => "strict",
        };
        f.write_str(s)
    }
}

/// How the chosen-category text related to the category set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum CategoryResolution {
    /// The text names this known label.
    Matched(String),
    /// Nothing matched; the default label was substituted.
    Fallback(String),
    /// Nothing matched and the raw text was kept.
    Unmatched,
}

impl CategoryResolution {
    /// The label later stages were given, if it is a known one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Matched(l) | Self::Fallback(l) => Some(l),
            Self::Unmatched => None,
        }
    }
}
