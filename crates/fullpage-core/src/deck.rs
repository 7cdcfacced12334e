//! Deck files: the content tree the panels are read from
//!
//! ```text
//! ::: fp
//! # Welcome
//! First section body
//! ---
//! # Second
//! More text
//! ```
//!
//! `::: name` opens a container; without any marker the whole file is one
//! container under the default name. Opening a name again, including the
//! default one, appends to the existing container. Lines of three or more dashes separate
//! sections, and a leading `# ` line is the section title.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::{Error, Result};

/// Container name used when a deck has no `:::` markers
pub const DEFAULT_CONTAINER: &str = "fp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionGroup {
    pub name: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deck {
    groups: Vec<SectionGroup>,
}

fn container_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^:::\s*(\S+)\s*$").expect("valid container regex"))
}

fn section_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-{3,}\s*$").expect("valid separator regex"))
}

/// Strip CSS-style `.` / `#` prefixes so `.fp`, `#fp` and `fp` all match
fn normalize_selector(selector: &str) -> &str {
    selector.trim().trim_start_matches(['.', '#'])
}

impl Deck {
    pub fn parse(text: &str) -> Self {
        let mut groups: Vec<SectionGroup> = Vec::new();
        let mut name = DEFAULT_CONTAINER.to_string();
        let mut chunk: Vec<&str> = Vec::new();
        let mut sections: Vec<Section> = Vec::new();
        // Text before the first marker only forms a container if it has sections
        let mut implicit = true;

        for line in text.lines() {
            if let Some(caps) = container_marker().captures(line) {
                sections.extend(parse_section(&chunk));
                chunk.clear();
                if !implicit || !sections.is_empty() {
                    merge_group(
                        &mut groups,
                        std::mem::take(&mut name),
                        std::mem::take(&mut sections),
                    );
                }
                name = caps[1].to_string();
                implicit = false;
            } else if section_separator().is_match(line) {
                sections.extend(parse_section(&chunk));
                chunk.clear();
            } else {
                chunk.push(line);
            }
        }
        sections.extend(parse_section(&chunk));
        merge_group(&mut groups, name, sections);

        Self { groups }
    }

    /// Read and parse a deck file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await?;
        let deck = Self::parse(&text);
        debug!(
            path = %path.display(),
            containers = deck.groups.len(),
            "deck loaded"
        );
        Ok(deck)
    }

    pub fn groups(&self) -> &[SectionGroup] {
        &self.groups
    }

    /// Find a container by selector
    pub fn container(&self, selector: &str) -> Result<&SectionGroup> {
        let wanted = normalize_selector(selector);
        self.groups
            .iter()
            .find(|group| group.name == wanted)
            .ok_or_else(|| Error::ContainerNotFound(selector.to_string()))
    }
}

fn merge_group(groups: &mut Vec<SectionGroup>, name: String, sections: Vec<Section>) {
    match groups.iter_mut().find(|group| group.name == name) {
        Some(group) => group.sections.extend(sections),
        None => groups.push(SectionGroup { name, sections }),
    }
}

fn parse_section(lines: &[&str]) -> Option<Section> {
    let start = lines.iter().position(|line| !line.trim().is_empty())?;
    let end = lines.iter().rposition(|line| !line.trim().is_empty())? + 1;
    let lines = &lines[start..end];

    let (title, rest) = match lines.first().and_then(|line| line.strip_prefix("# ")) {
        Some(title) => (Some(title.trim().to_string()), &lines[1..]),
        None => (None, lines),
    };
    let body = rest.join("\n").trim_matches('\n').to_string();

    Some(Section { title, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_container() {
        let deck = Deck::parse("# One\nfirst\n---\n# Two\nsecond\nline\n----\nuntitled\n");
        let group = deck.container("fp").unwrap();
        assert_eq!(group.sections.len(), 3);
        assert_eq!(group.sections[0].title.as_deref(), Some("One"));
        assert_eq!(group.sections[1].body, "second\nline");
        assert_eq!(group.sections[2].title, None);
        assert_eq!(group.sections[2].body, "untitled");
    }

    #[test]
    fn test_blank_sections_are_skipped() {
        let deck = Deck::parse("---\n\n---\n# Only\n---\n   \n");
        let group = deck.container(DEFAULT_CONTAINER).unwrap();
        assert_eq!(group.sections.len(), 1);
        assert_eq!(group.sections[0].body, "");
    }

    #[test]
    fn test_named_containers_and_selectors() {
        let text = "::: intro\n# Hi\n---\n# There\n::: outro\n# Bye\n";
        let deck = Deck::parse(text);
        assert_eq!(deck.groups().len(), 2);
        assert_eq!(deck.container(".intro").unwrap().sections.len(), 2);
        assert_eq!(deck.container("#outro").unwrap().sections.len(), 1);
        assert!(matches!(
            deck.container("fp"),
            Err(Error::ContainerNotFound(_))
        ));
    }

    #[test]
    fn test_text_before_first_marker_stays_in_default_container() {
        let deck = Deck::parse("# Preface\n::: fp2\n# Body\n");
        assert_eq!(deck.container("fp").unwrap().sections.len(), 1);
        assert_eq!(deck.container("fp2").unwrap().sections.len(), 1);
    }

    #[test]
    fn test_explicit_default_container_joins_preface() {
        let deck = Deck::parse("# Preface\n::: fp\n# Body\n");
        assert_eq!(deck.groups().len(), 1);
        let titles: Vec<_> = deck
            .container("fp")
            .unwrap()
            .sections
            .iter()
            .map(|s| s.title.as_deref())
            .collect();
        assert_eq!(titles, vec![Some("Preface"), Some("Body")]);
    }

    #[test]
    fn test_reopened_container_appends_sections() {
        let deck = Deck::parse("::: a\n# A1\n::: b\n# B1\n::: a\n# A2\n");
        assert_eq!(deck.groups().len(), 2);
        assert_eq!(deck.container("a").unwrap().sections.len(), 2);
        assert_eq!(deck.container("b").unwrap().sections.len(), 1);
    }

    #[test]
    fn test_explicit_empty_container_is_kept() {
        let deck = Deck::parse("::: empty\n::: fp\n# One\n");
        assert!(deck.container("empty").unwrap().sections.is_empty());
        assert_eq!(deck.container("fp").unwrap().sections.len(), 1);
    }

    #[test]
    fn test_empty_deck_has_empty_default_container() {
        let deck = Deck::parse("");
        assert!(deck.container("fp").unwrap().sections.is_empty());
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("fullpage-deck-{}.md", std::process::id()));
        tokio::fs::write(&path, "# A\n---\n# B\n").await.unwrap();
        let deck = Deck::load(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();
        assert_eq!(deck.container("fp").unwrap().sections.len(), 2);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let err = Deck::load("/definitely/not/here.md").await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
