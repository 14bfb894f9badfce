//! Attach-rule extraction from colon-delimited tag strings

use log::warn;
use serde::Serialize;

/// Context the platform expects on every attached tag
const TAG_CONTEXT: &str = "CONTEXTLESS";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachTag {
    pub context: &'static str,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// One tag-matching directive derived from a single input tag string
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagAttachRule {
    pub match_types: Vec<String>,
    pub tags: Vec<AttachTag>,
}

/// Derive one attach rule per parseable tag string, preserving input order.
///
/// A tag is `type:key` or `type:key:value`. Any other part count is a
/// data-quality problem in the input, dropped with a local warning and
/// never surfaced to the caller.
pub fn extract_rules(tags: &[String]) -> Vec<TagAttachRule> {
    let mut rules = Vec::with_capacity(tags.len());

    for tag in tags {
        let parts: Vec<&str> = tag.split(':').collect();
        match parts.as_slice() {
            [match_type, key] => rules.push(rule(match_type, key, None)),
            [match_type, key, value] => {
                rules.push(rule(match_type, key, Some((*value).to_string())))
            }
            _ => warn!(
                "Dropping malformed tag '{}': expected type:key or type:key:value",
                tag
            ),
        }
    }

    rules
}

fn rule(match_type: &str, key: &str, value: Option<String>) -> TagAttachRule {
    TagAttachRule {
        match_types: vec![match_type.to_string()],
        tags: vec![AttachTag {
            context: TAG_CONTEXT,
            key: key.to_string(),
            value,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_two_part_tag_has_no_value() {
        let rules = extract_rules(&strings(&["HOST:env"]));

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].match_types, vec!["HOST"]);
        assert_eq!(rules[0].tags[0].key, "env");
        assert_eq!(rules[0].tags[0].value, None);
        assert_eq!(rules[0].tags[0].context, "CONTEXTLESS");
    }

    #[test]
    fn test_three_part_tag_carries_value() {
        let rules = extract_rules(&strings(&["HOST:env:prod"]));

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].tags[0].value.as_deref(), Some("prod"));
    }

    #[test]
    fn test_malformed_tags_are_dropped() {
        let rules = extract_rules(&strings(&["HOST", "A:B:C:D"]));
        assert!(rules.is_empty());
    }

    #[test]
    fn test_order_preserved_after_dropping() {
        let rules = extract_rules(&strings(&["HOST:env", "junk", "SERVICE:tier:web"]));

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].match_types, vec!["HOST"]);
        assert_eq!(rules[1].match_types, vec!["SERVICE"]);
    }
}
