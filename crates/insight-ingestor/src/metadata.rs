//! Heuristic title and author extraction
//!
//! `extract_metadata` is a pure function of the paper text and its file
//! name. It never fails: when nothing recognizable is found it falls back
//! to the file stem for the title and `["Unknown"]` for the authors.

use insight_domain::{PaperMetadata, UNKNOWN_AUTHOR};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Longest first line still treated as a title
pub const MAX_TITLE_CHARS: usize = 200;

/// Most words a title line may have
pub const MAX_TITLE_WORDS: usize = 25;

/// Author lines are only searched for near the top of the paper
const AUTHOR_SEARCH_LINES: usize = 20;

static AUTHOR_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:by\s+|authors?\s*:\s*)(.+)$").unwrap());

/// Derive title, authors and source from a paper's text and file name
///
/// # Examples
///
/// ```
/// use insight_ingestor::extract_metadata;
///
/// let text = "Machine Learning in Healthcare\nAuthors: Dr. Sarah Lee, Prof. Michael Chen\n\nAbstract...";
/// let meta = extract_metadata(text, "paper.txt");
/// assert_eq!(meta.title, "Machine Learning in Healthcare");
/// assert_eq!(meta.authors, vec!["Dr. Sarah Lee", "Prof. Michael Chen"]);
/// assert_eq!(meta.source, "paper.txt");
/// ```
pub fn extract_metadata(text: &str, file_name: &str) -> PaperMetadata {
    let path = Path::new(file_name);
    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());

    let title = extract_title(text).unwrap_or_else(|| file_stem(path, &source));
    let authors = extract_authors(text);

    PaperMetadata::new(title, authors, source)
}

fn extract_title(text: &str) -> Option<String> {
    let first = text.lines().map(str::trim).find(|line| !line.is_empty())?;

    if looks_like_heading(first) {
        Some(first.to_string())
    } else {
        None
    }
}

fn looks_like_heading(line: &str) -> bool {
    if line.chars().count() > MAX_TITLE_CHARS {
        return false;
    }
    if line.split_whitespace().count() > MAX_TITLE_WORDS {
        return false;
    }
    if line.ends_with(['.', '!', '?']) {
        return false;
    }
    !AUTHOR_LINE_RE.is_match(line)
}

fn extract_authors(text: &str) -> Vec<String> {
    let authors: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(AUTHOR_SEARCH_LINES)
        .find_map(|line| AUTHOR_LINE_RE.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|names| {
            names
                .as_str()
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if authors.is_empty() {
        vec![UNKNOWN_AUTHOR.to_string()]
    } else {
        authors
    }
}

fn file_stem(path: &Path, fallback: &str) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_by_line() {
        let text = "
        Quantum Computing Research
        by Alice Johnson

        This paper discusses quantum computing advances.
      ";
        let meta = extract_metadata(text, "research.txt");
        assert_eq!(meta.title, "Quantum Computing Research");
        assert_eq!(meta.authors, vec!["Alice Johnson"]);
        assert_eq!(meta.source, "research.txt");
    }

    #[test]
    fn test_authors_line_splits_on_commas() {
        let text = "Machine Learning in Healthcare\nAuthors: Dr. Sarah Lee, Prof. Michael Chen\n";
        let meta = extract_metadata(text, "paper.txt");
        assert_eq!(meta.authors, vec!["Dr. Sarah Lee", "Prof. Michael Chen"]);
    }

    #[test]
    fn test_sentence_falls_back_to_file_stem() {
        let meta = extract_metadata("Some research content without clear structure.", "unnamed.txt");
        assert_eq!(meta.title, "unnamed");
        assert_eq!(meta.authors, vec![UNKNOWN_AUTHOR]);
    }

    #[test]
    fn test_empty_text() {
        let meta = extract_metadata("", "blank.pdf");
        assert_eq!(meta.title, "blank");
        assert_eq!(meta.authors, vec![UNKNOWN_AUTHOR]);
        assert_eq!(meta.source, "blank.pdf");
    }

    #[test]
    fn test_long_first_line_is_not_a_title() {
        let text = format!("{}\nAuthor: Solo Writer", "word ".repeat(40));
        let meta = extract_metadata(&text, "long.txt");
        assert_eq!(meta.title, "long");
        assert_eq!(meta.authors, vec!["Solo Writer"]);
    }

    #[test]
    fn test_author_line_first_is_not_a_title() {
        let meta = extract_metadata("By Grace Hopper\n\nCompilers.", "hopper.txt");
        assert_eq!(meta.title, "hopper");
        assert_eq!(meta.authors, vec!["Grace Hopper"]);
    }

    #[test]
    fn test_source_is_base_name() {
        let meta = extract_metadata("Title", "/papers/2024/deep.PDF");
        assert_eq!(meta.source, "deep.PDF");
        assert_eq!(meta.title, "Title");
    }

    #[test]
    fn test_case_insensitive_author_label() {
        let meta = extract_metadata("Title\nAUTHORS:  A ,  , B ", "x.txt");
        assert_eq!(meta.authors, vec!["A", "B"]);
    }

    #[test]
    fn test_empty_author_list_is_unknown() {
        let meta = extract_metadata("Title\nAuthors: , ,", "x.txt");
        assert_eq!(meta.authors, vec![UNKNOWN_AUTHOR]);
    }

    #[test]
    fn test_word_starting_with_by_is_not_author_line() {
        let meta = extract_metadata("Title\nbystanders watched\n", "x.txt");
        assert_eq!(meta.authors, vec![UNKNOWN_AUTHOR]);
    }
}
