use std::collections::HashMap;

/// Parses `key=value` pairs; entries without `=` are ignored.
pub fn parse_vars(vars: &[String]) -> HashMap<&str, &str> {
    let mut map = HashMap::new();
    for v in vars {
        if let Some((key, value)) = v.split_once('=') {
            map.insert(key.trim(), value.trim());
        }
    }
    map
}

/// Demo queries used when a batch is started without a file.
pub const SAMPLE_QUERIES: [&str; 4] = [
    "I noticed an unfamiliar charge on my debit card for $40 yesterday.",
    "I can't log into my account and need to check my balance urgently",
    "How do I apply for a personal loan?",
    "Can you send me my account statement for last month?",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_trims_pairs() {
        let raw = vec![
            "query = lost card".to_string(),
            "broken".to_string(),
            "intent=a=b".to_string(),
        ];
        let map = parse_vars(&raw);
        assert_eq!(map.len(), 2);
        assert_eq!(map["query"], "lost card");
        assert_eq!(map["intent"], "a=b");
    }
}
