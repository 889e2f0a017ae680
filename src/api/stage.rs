//! The five stages of the support chain, in execution order.

use serde::Serialize;
use std::fmt;

use crate::core::templates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    InterpretIntent,
    SuggestCategories,
    ChooseCategory,
    ExtractDetails,
    DraftResponse,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::InterpretIntent,
        Stage::SuggestCategories,
        Stage::ChooseCategory,
        Stage::ExtractDetails,
        Stage::DraftResponse,
    ];

    /// 1-based position in the chain.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// Looks a stage up by its 1-based position.
    pub fn from_number(n: usize) -> Option<Stage> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Heading used when printing the stage's output.
    pub fn label(self) -> &'static str {
        match self {
            Stage::InterpretIntent => "Intent Interpretation",
            Stage::SuggestCategories => "Category Suggestions",
            Stage::ChooseCategory => "Chosen Category",
            Stage::ExtractDetails => "Required Details",
            Stage::DraftResponse => "Customer Response",
        }
    }

    /// Template variable later stages read this stage's output from.
    pub fn output_key(self) -> &'static str {
        match self {
            Stage::InterpretIntent => "intent",
            Stage::SuggestCategories => "suggestions",
            Stage::ChooseCategory => "category",
            Stage::ExtractDetails => "details",
            Stage::DraftResponse => "response",
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            Stage::InterpretIntent => templates::INTERPRET_INTENT,
            Stage::SuggestCategories => templates::SUGGEST_CATEGORIES,
            Stage::ChooseCategory => templates::CHOOSE_CATEGORY,
            Stage::ExtractDetails => templates::EXTRACT_DETAILS,
            Stage::DraftResponse => templates::DRAFT_RESPONSE,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "STAGE {} - {}", self.number(), self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_is_one_based_and_round_trips() {
        for (i, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(stage.number(), i + 1);
            assert_eq!(Stage::from_number(i + 1), Some(*stage));
        }
        assert_eq!(Stage::from_number(0), None);
        assert_eq!(Stage::from_number(6), None);
    }

    #[test]
    fn stages_only_read_outputs_of_earlier_stages() {
        for stage in Stage::ALL {
            for var in templates::variables(stage.template()) {
                if let Some(producer) = Stage::ALL.iter().find(|s| s.output_key() == var) {
                    assert!(
                        *producer < stage,
                        "{:?} reads '{}' produced by {:?}",
                        stage,
                        var,
                        producer
                    );
                }
            }
        }
    }
}
