//! Prompt templates for the five stages and the `{{ var }}` renderer.

use regex::{Captures, Regex};
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

pub const INTERPRET_INTENT: &str = r#"Analyze the following customer query and identify the primary intent or concern the customer is expressing.

Customer Query: {{query}}

Provide:
1. A concise one-sentence summary of the customer's intent
2. Up to three short intent keywords (single words)

Format your response clearly."#;

pub const SUGGEST_CATEGORIES: &str = r#"Based on the customer's intent and original query, suggest the top 3 most relevant categories from the following list. Rank them in order of relevance.

Available Categories:
{{categories}}

For each suggested category, provide 1-2 short reasons why it might apply.

Customer Query: {{query}}
Interpreted Intent: {{intent}}

Format your response as a ranked list with explanations."#;

pub const CHOOSE_CATEGORY: &str = r#"Review the suggested categories below and select the single most appropriate category that best matches the customer's intent.

Category Suggestions:
{{suggestions}}

Provide:
1. The chosen category name (exactly as listed)
2. A one-sentence explanation for why this is the best match

If none of the suggestions fit well, choose "{{default_category}}" as the default."#;

pub const EXTRACT_DETAILS: &str = r#"Identify any additional details or information needed to fully address the customer's request.

Customer Query: {{query}}
Chosen Category: {{category}}

For each required detail, provide:
- Label: (e.g., "Transaction Date")
- Reason: (why this information is needed)
- Question: (how to ask the customer for this information)

If no additional details are needed, respond with: "{{sentinel}}"

Format your response as a structured list."#;

pub const DRAFT_RESPONSE: &str = r#"Generate a professional, helpful response to the customer based on the information gathered.

Customer Query: {{query}}
Interpreted Intent: {{intent}}
Chosen Category: {{category}}
Required Details: {{details}}

Your response should:
- Acknowledge the customer's concern
- Be 2-4 sentences long
- Be professional and empathetic
- Request any missing information if needed
- Provide clear next steps

Write only the customer response, without any preamble or labels."#;

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("placeholder pattern is valid"))
}

/// Names of the variables a template refers to, sorted and deduplicated.
pub fn variables(template: &str) -> BTreeSet<String> {
    placeholder()
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Renders a template in a single pass.
///
/// Every placeholder must have a value; the names of missing variables are
/// returned as the error. Substituted values are inserted verbatim and never
/// expanded again.
pub fn render_template(
    template: &str,
    vars: &HashMap<&str, &str>,
) -> Result<String, Vec<String>> {
    let missing: Vec<String> = variables(template)
        .into_iter()
        .filter(|name| !vars.contains_key(name.as_str()))
        .collect();
    if !missing.is_empty() {
        return Err(missing);
    }

    Ok(placeholder()
        .replace_all(template, |caps: &Captures| {
            vars.get(&caps[1]).copied().unwrap_or_default().to_string()
        })
        .into_owned())
}
