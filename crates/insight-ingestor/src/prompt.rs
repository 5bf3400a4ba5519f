//! LLM prompt for paper summarization

use insight_domain::PaperMetadata;

/// Builds the summarization prompt for one paper
pub struct PromptBuilder<'a> {
    meta: &'a PaperMetadata,
    text: &'a str,
    max_text_chars: usize,
    max_insights: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(meta: &'a PaperMetadata, text: &'a str) -> Self {
        Self {
            meta,
            text,
            max_text_chars: usize::MAX,
            max_insights: 5,
        }
    }

    /// Truncate the paper text to at most `chars` characters
    pub fn with_max_text_chars(mut self, chars: usize) -> Self {
        self.max_text_chars = chars;
        self
    }

    /// Number of insights requested from the model
    pub fn with_max_insights(mut self, count: usize) -> Self {
        self.max_insights = count;
        self
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "Summarize the following research paper into at most {} key insights.\n",
            self.max_insights
        ));
        prompt.push_str(INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str(&format!("Title: {}\n", self.meta.title));
        prompt.push_str(&format!("Authors: {}\n", self.meta.authors_line()));
        prompt.push_str(&format!("Source: {}\n\n", self.meta.source));

        let (body, truncated) = truncate_chars(self.text, self.max_text_chars);
        prompt.push_str("Paper text:\n");
        prompt.push_str("---\n");
        prompt.push_str(body);
        if truncated {
            prompt.push_str("\n[... text truncated ...]");
        }
        prompt.push_str("\n---\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

/// Cut `text` to at most `max` characters on a char boundary
pub(crate) fn truncate_chars(text: &str, max: usize) -> (&str, bool) {
    match text.char_indices().nth(max) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}

const INSTRUCTIONS: &str = r#"Rules:
- Each insight is one self-contained sentence
- Prefer findings, methods and conclusions over background
- Do not repeat the title or the author names
- Do not invent results that are not in the text"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (JSON array of strings only, no additional text):
["First insight.", "Second insight."]

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> PaperMetadata {
        PaperMetadata::new(
            "Understanding Complex Systems",
            vec!["Jane Smith".to_string(), "Bob Lee".to_string()],
            "sample.txt",
        )
    }

    #[test]
    fn test_prompt_includes_metadata() {
        let meta = meta();
        let prompt = PromptBuilder::new(&meta, "body").build();
        assert!(prompt.contains("Title: Understanding Complex Systems"));
        assert!(prompt.contains("Authors: Jane Smith, Bob Lee"));
        assert!(prompt.contains("Source: sample.txt"));
    }

    #[test]
    fn test_prompt_includes_text_and_format() {
        let meta = meta();
        let prompt = PromptBuilder::new(&meta, "Feedback loops matter").build();
        assert!(prompt.contains("Feedback loops matter"));
        assert!(prompt.contains("JSON array of strings"));
        assert!(!prompt.contains("truncated"));
    }

    #[test]
    fn test_prompt_requests_max_insights() {
        let meta = meta();
        let prompt = PromptBuilder::new(&meta, "x").with_max_insights(3).build();
        assert!(prompt.contains("at most 3 key insights"));
    }

    #[test]
    fn test_prompt_truncates_long_text() {
        let meta = meta();
        let text = "abcdefghij".repeat(10);
        let prompt = PromptBuilder::new(&meta, &text).with_max_text_chars(15).build();
        assert!(prompt.contains("abcdefghijabcde\n[... text truncated ...]"));
        assert!(!prompt.contains("abcdefghijabcdef"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), ("hé", true));
        assert_eq!(truncate_chars("héllo", 5), ("héllo", false));
        assert_eq!(truncate_chars("", 0), ("", false));
    }
}
