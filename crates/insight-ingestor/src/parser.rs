//! Parse LLM output into insight strings

use crate::error::SummarizeError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+(.+?)\s*$").unwrap());

/// Parse an LLM response into a list of insights
///
/// Accepted shapes, tried in order: a JSON array of strings, the same
/// wrapped in a markdown code block, an object with an `insights` array,
/// a JSON array embedded in surrounding prose, and finally a plain bullet
/// or numbered list.
pub fn parse_insights(response: &str) -> Result<Vec<String>, SummarizeError> {
    let json_str = extract_json(response);

    if let Some(insights) = parse_json_insights(json_str) {
        return non_empty(insights);
    }

    if let Some(embedded) = embedded_array(json_str) {
        if let Some(insights) = parse_json_insights(embedded) {
            debug!("Recovered JSON array embedded in prose");
            return non_empty(insights);
        }
    }

    let items: Vec<String> = response
        .lines()
        .filter_map(|line| LIST_ITEM_RE.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|item| clean(item.as_str()))
        .filter(|item| !item.is_empty())
        .collect();

    non_empty(items)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };

    // Skip the fence line (```json or ```)
    let after_fence = &trimmed[start + 3..];
    let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(after_fence.len());
    let body = &after_fence[body_start..];

    match body.find("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

fn embedded_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

fn parse_json_insights(json_str: &str) -> Option<Vec<String>> {
    let json: Value = serde_json::from_str(json_str).ok()?;

    let items = match &json {
        Value::Array(items) => items,
        Value::Object(obj) => obj.get("insights")?.as_array()?,
        _ => return None,
    };

    let mut insights = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        match item {
            Value::String(text) => insights.push(clean(text)),
            Value::Object(obj) => match obj.get("insight").or_else(|| obj.get("text")) {
                Some(Value::String(text)) => insights.push(clean(text)),
                _ => warn!("Insight {} has no text field, skipping", idx),
            },
            other => warn!("Insight {} is not a string ({}), skipping", idx, other),
        }
    }

    insights.retain(|insight| !insight.is_empty());
    Some(insights)
}

fn clean(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(insights: Vec<String>) -> Result<Vec<String>, SummarizeError> {
    if insights.is_empty() {
        Err(SummarizeError::InvalidResponse(
            "no insights found in LLM response".to_string(),
        ))
    } else {
        Ok(insights)
    }
}
