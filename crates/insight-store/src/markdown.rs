//! Rendering and parsing of insight sections

use insight_domain::{InsightRecord, PaperMetadata};

const HEADER_PREFIX: &str = "## ";
const AUTHORS_LABEL: &str = "Authors:";
const SOURCE_LABEL: &str = "Source:";
const INSIGHTS_LABEL: &str = "Key insights:";

/// Render one record as a markdown section, followed by a blank line
///
/// Line breaks inside values are replaced by spaces so that every value
/// stays on its own line. Commas inside an author name become spaces, since
/// the authors line is comma-separated, and blank authors or insights are
/// left out. The rendered section parses back to the normalized record.
pub fn render_section(record: &InsightRecord) -> String {
    let meta = &record.meta;
    let authors: Vec<String> = meta
        .authors
        .iter()
        .map(|a| author_name(a))
        .filter(|a| !a.is_empty())
        .collect();

    let mut section = String::new();
    section.push_str(&format!("{}{}\n", HEADER_PREFIX, single_line(&meta.title)));
    section.push_str(&format!("- **{}** {}\n", AUTHORS_LABEL, authors.join(", ")));
    section.push_str(&format!("- **{}** {}\n", SOURCE_LABEL, single_line(&meta.source)));
    section.push_str(&format!("- **{}**\n", INSIGHTS_LABEL));
    for insight in record.insights.iter().map(|i| single_line(i)) {
        if !insight.is_empty() {
            section.push_str(&format!("  - {}\n", insight));
        }
    }
    section.push('\n');
    section
}

/// Parse every `## ` section of a markdown document, in file order
///
/// Content before the first header is ignored. Missing bullets leave the
/// corresponding field empty.
pub fn parse_sections(markdown: &str) -> Vec<InsightRecord> {
    let mut records = Vec::new();
    let mut current: Option<SectionBuilder> = None;

    for line in markdown.lines() {
        if let Some(title) = header_title(line) {
            if let Some(section) = current.take() {
                records.push(section.finish());
            }
            current = Some(SectionBuilder::new(title));
            continue;
        }

        if let Some(section) = current.as_mut() {
            section.push_line(line);
        }
    }

    if let Some(section) = current {
        records.push(section.finish());
    }

    records
}

struct SectionBuilder {
    title: String,
    authors: Vec<String>,
    source: String,
    insights: Vec<String>,
    in_insights: bool,
}

impl SectionBuilder {
    fn new(title: String) -> Self {
        Self {
            title,
            authors: Vec::new(),
            source: String::new(),
            insights: Vec::new(),
            in_insights: false,
        }
    }

    fn push_line(&mut self, line: &str) {
        let indented = line.starts_with(' ') || line.starts_with('\t');

        if self.in_insights && indented {
            if let Some(insight) = line.trim().strip_prefix("- ") {
                self.insights.push(insight.trim().to_string());
            }
            return;
        }

        if let Some(value) = labelled_value(line, AUTHORS_LABEL) {
            self.authors = split_authors(value);
            self.in_insights = false;
        } else if let Some(value) = labelled_value(line, SOURCE_LABEL) {
            self.source = value.to_string();
            self.in_insights = false;
        } else if labelled_value(line, INSIGHTS_LABEL).is_some() {
            self.in_insights = true;
        } else if !line.trim().is_empty() {
            self.in_insights = false;
        }
    }

    fn finish(self) -> InsightRecord {
        InsightRecord::new(
            PaperMetadata::new(self.title, self.authors, self.source),
            self.insights,
        )
    }
}

/// Title of a `## ` header line, if `line` is one
fn header_title(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed == HEADER_PREFIX.trim_end() {
        return Some(String::new());
    }
    trimmed
        .strip_prefix(HEADER_PREFIX)
        .map(|title| title.trim().to_string())
}

/// Value of a `- **Label:** value` bullet (bold and bullet are optional)
fn labelled_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix("- ").unwrap_or(trimmed).trim_start();

    let rest = if let Some(rest) = trimmed.strip_prefix("**") {
        rest.strip_prefix(label)?.strip_prefix("**")?
    } else {
        trimmed.strip_prefix(label)?
    };

    Some(rest.trim())
}

fn split_authors(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn author_name(value: &str) -> String {
    single_line(value)
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn single_line(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, authors: &[&str], source: &str, insights: &[&str]) -> InsightRecord {
        InsightRecord::new(
            PaperMetadata::new(
                title,
                authors.iter().map(|a| a.to_string()).collect(),
                source,
            ),
            insights.iter().map(|i| i.to_string()).collect(),
        )
    }

    #[test]
    fn test_render_section_format() {
        let section = render_section(&record(
            "Understanding Complex Systems",
            &["Jane Smith", "John Doe"],
            "test-paper.txt",
            &["Emergence matters", "Feedback loops dominate"],
        ));

        assert_eq!(
            section,
            "## Understanding Complex Systems\n\
             - **Authors:** Jane Smith, John Doe\n\
             - **Source:** test-paper.txt\n\
             - **Key insights:**\n  \
             - Emergence matters\n  \
             - Feedback loops dominate\n\n"
        );
    }

    #[test]
    fn test_render_collapses_newlines() {
        let section = render_section(&record(
            "Multi\nline title",
            &["A"],
            "a.txt",
            &["first line\nsecond line"],
        ));
        assert!(section.starts_with("## Multi line title\n"));
        assert!(section.contains("  - first line second line\n"));
    }

    #[test]
    fn test_render_normalizes_commas_and_blank_values() {
        let original = record("Title", &["Doe, J.", " ", "Ann Lee"], "a.txt", &["", "x", " \n "]);
        let section = render_section(&original);
        assert!(section.contains("- **Authors:** Doe J., Ann Lee\n"));
        assert!(!section.contains("  - \n"));

        let parsed = parse_sections(&section);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].meta.authors, vec!["Doe J.", "Ann Lee"]);
        assert_eq!(parsed[0].insights, vec!["x"]);
    }

    #[test]
    fn test_parse_two_sections() {
        let markdown = "
## Test Paper 1
- **Authors:** Test Author
- **Source:** test.pdf
- **Key insights:**
  - Test insight 1
  - Test insight 2

## Test Paper 2
- **Authors:** Another Author, Co-Author
- **Source:** research.pdf
- **Key insights:**
  - Research finding 1
  - Research finding 2
  - Research finding 3
      ";

        let records = parse_sections(markdown);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].meta.title, "Test Paper 1");
        assert_eq!(records[0].meta.authors, vec!["Test Author"]);
        assert_eq!(records[0].meta.source, "test.pdf");
        assert_eq!(records[0].insights.len(), 2);

        assert_eq!(records[1].meta.title, "Test Paper 2");
        assert_eq!(records[1].meta.authors, vec!["Another Author", "Co-Author"]);
        assert_eq!(records[1].insights.len(), 3);
    }

    #[test]
    fn test_parse_empty_and_preamble_only() {
        assert!(parse_sections("").is_empty());
        assert!(parse_sections("# Research Insights\n\nNothing yet.\n").is_empty());
    }

    #[test]
    fn test_parse_ignores_deeper_headers() {
        let records = parse_sections("## Paper\n### Notes\n- **Key insights:**\n  - kept\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].insights, vec!["kept"]);
    }

    #[test]
    fn test_parse_section_without_bullets() {
        let records = parse_sections("## Lonely Title\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].meta.title, "Lonely Title");
        assert!(records[0].meta.authors.is_empty());
        assert!(records[0].insights.is_empty());
    }

    #[test]
    fn test_top_level_bullet_ends_insights() {
        let markdown = "## Paper\n- **Key insights:**\n  - one\n- **Source:** late.pdf\n  - not an insight\n";
        let records = parse_sections(markdown);
        assert_eq!(records[0].insights, vec!["one"]);
        assert_eq!(records[0].meta.source, "late.pdf");
    }

    #[test]
    fn test_labelled_value_variants() {
        assert_eq!(labelled_value("- **Authors:** A, B", AUTHORS_LABEL), Some("A, B"));
        assert_eq!(labelled_value("**Authors:** A", AUTHORS_LABEL), Some("A"));
        assert_eq!(labelled_value("Authors: A", AUTHORS_LABEL), Some("A"));
        assert_eq!(labelled_value("- **Source:** x.pdf", AUTHORS_LABEL), None);
    }

    #[test]
    fn test_n_appends_give_n_sections() {
        let mut markdown = String::new();
        for i in 0..7 {
            markdown.push_str(&render_section(&record(
                &format!("Paper {i}"),
                &["Author"],
                "p.txt",
                &["insight"],
            )));
        }

        let headers = markdown.lines().filter(|l| l.starts_with("## ")).count();
        assert_eq!(headers, 7);

        let titles: Vec<String> = parse_sections(&markdown)
            .into_iter()
            .map(|r| r.meta.title)
            .collect();
        let expected: Vec<String> = (0..7).map(|i| format!("Paper {i}")).collect();
        assert_eq!(titles, expected);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn value() -> impl Strategy<Value = String> {
        "[A-Za-z0-9][A-Za-z0-9 .:'()-]{0,30}[A-Za-z0-9.]"
    }

    fn record_strategy() -> impl Strategy<Value = InsightRecord> {
        (
            value(),
            proptest::collection::vec(value(), 1..4),
            "[a-z0-9_-]{1,12}\\.(pdf|txt)",
            proptest::collection::vec(value(), 0..6),
        )
            .prop_map(|(title, authors, source, insights)| {
                InsightRecord::new(PaperMetadata::new(title, authors, source), insights)
            })
    }

    proptest! {
        /// Property: rendered sections parse back field-for-field, in order
        #[test]
        fn test_render_parse_roundtrip(records in proptest::collection::vec(record_strategy(), 0..6)) {
            let markdown: String = records.iter().map(render_section).collect();
            let parsed = parse_sections(&markdown);
            prop_assert_eq!(parsed, records);
        }
    }
}
