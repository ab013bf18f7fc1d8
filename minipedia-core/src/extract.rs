//! Article extract parsing
//!
//! MediaWiki's plain-text extracts mark each heading with a single digit
//! fenced by doubled U+FFFD characters. This module splits such a blob into
//! segments, renumbers the heading levels into a dense range, and assembles
//! a section tree rooted at the article intro.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, ExtractResult};

/// Two U+FFFD code points, the fence around every heading marker.
const MARKER_FENCE: &str = "\u{FFFD}\u{FFFD}";

/// Characters of a segment quoted in a malformed-section error.
const SNIPPET_LEN: usize = 40;

/// A full heading marker: fence, one ASCII digit, fence.
fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\x{FFFD}\x{FFFD}[0-9]\x{FFFD}\x{FFFD}").expect("marker pattern compiles")
    })
}

/// Shape of one marker-delimited segment: level digit, closing fence,
/// title up to the first newline, then an optional body.
fn section_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^([0-9])\x{FFFD}\x{FFFD}\s*([^\n]+?)\s*(?:\n+(.*))?$")
            .expect("section pattern compiles")
    })
}

/// Heading depth of a section within an article tree.
///
/// The intro is not a numbered heading; every other section carries its
/// renumbered rank, with 0 for top-level headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<u8>", into = "Option<u8>")]
pub enum SectionLevel {
    /// The leading text before any heading marker
    Intro,
    /// A heading at the given renumbered rank (0 = top level)
    Heading(u8),
}

impl SectionLevel {
    /// Depth used when deciding where an incoming section attaches.
    /// The intro sits at the same depth as a top-level heading.
    fn depth(self) -> u8 {
        match self {
            SectionLevel::Intro => 0,
            SectionLevel::Heading(rank) => rank,
        }
    }
}

impl From<Option<u8>> for SectionLevel {
    fn from(level: Option<u8>) -> Self {
        match level {
            None => SectionLevel::Intro,
            Some(rank) => SectionLevel::Heading(rank),
        }
    }
}

impl From<SectionLevel> for Option<u8> {
    fn from(level: SectionLevel) -> Self {
        match level {
            SectionLevel::Intro => None,
            SectionLevel::Heading(rank) => Some(rank),
        }
    }
}

/// One node of an article's section tree.
///
/// Sections are built by [`ArticleExtract::parse`] or deserialized from a
/// previously serialized tree and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSection {
    level: SectionLevel,
    title: Option<String>,
    text: String,
    #[serde(rename = "sections")]
    subsections: Vec<ArticleSection>,
}

impl ArticleSection {
    fn intro(text: &str) -> Self {
        ArticleSection {
            level: SectionLevel::Intro,
            title: None,
            text: text.to_string(),
            subsections: Vec::new(),
        }
    }

    fn heading(rank: u8, title: String, text: String) -> Self {
        ArticleSection {
            level: SectionLevel::Heading(rank),
            title: Some(title),
            text,
            subsections: Vec::new(),
        }
    }

    /// Attach a deeper section, descending into the newest child while the
    /// incoming level skips more than one step.
    fn add_subsection(&mut self, section: ArticleSection) {
        if section.level.depth() > self.level.depth() + 1 {
            if let Some(last) = self.subsections.last_mut() {
                last.add_subsection(section);
                return;
            }
        }
        self.subsections.push(section);
    }

    /// Heading depth of this section
    pub fn level(&self) -> SectionLevel {
        self.level
    }

    /// Heading title; `None` for the intro
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Text of this section alone, without subsections
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Direct subsections in document order
    pub fn subsections(&self) -> &[ArticleSection] {
        &self.subsections
    }

    /// Flatten this section and its subtree into display text.
    ///
    /// Subsection titles become `"<title>:"` paragraphs, followed by their
    /// own flattened text, joined with blank lines in document order.
    pub fn full_text(&self) -> String {
        let mut text = self.text.clone();
        for section in &self.subsections {
            if !text.is_empty() {
                text.push_str("\n\n");
            }
            text.push_str(section.title.as_deref().unwrap_or(""));
            text.push_str(":\n\n");
            text.push_str(&section.full_text());
        }
        text
    }
}

/// A parsed article extract: the intro followed by top-level sections.
///
/// `sections()[0]` is always the intro, even for an empty extract.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleExtract {
    sections: Vec<ArticleSection>,
    fullurl: String,
}

impl ArticleExtract {
    /// Parse raw extract text into a section tree.
    ///
    /// The text is split at every marker fence that starts a full heading
    /// marker. Raw heading levels are renumbered to a dense 0-based range
    /// before the tree is assembled, since extracts rarely use contiguous
    /// levels. A segment that does not match the section shape is an error,
    /// never silently skipped.
    pub fn parse(raw: &str) -> ExtractResult<Self> {
        let segments = split_segments(raw);
        let mut sections = vec![ArticleSection::intro(segments[0].trim())];

        let mut bits = Vec::with_capacity(segments.len() - 1);
        for (index, segment) in segments[1..].iter().enumerate() {
            let segment = segment.trim();
            let caps = section_regex()
                .captures(segment)
                .ok_or_else(|| malformed(index + 1, segment))?;
            let raw_level: u8 = caps[1].parse().map_err(|_| malformed(index + 1, segment))?;
            let title = caps[2].to_string();
            let text = caps.get(3).map_or_else(String::new, |m| m.as_str().to_string());
            bits.push((raw_level, title, text));
        }

        let used: BTreeSet<u8> = bits.iter().map(|(level, _, _)| *level).collect();
        let ranks: HashMap<u8, u8> = used
            .iter()
            .enumerate()
            .map(|(rank, level)| (*level, rank as u8))
            .collect();

        for (raw_level, title, text) in bits {
            let rank = ranks[&raw_level];
            let section = ArticleSection::heading(rank, title, text);
            if rank == 0 {
                sections.push(section);
            } else {
                let last = sections.len() - 1;
                sections[last].add_subsection(section);
            }
        }

        Ok(ArticleExtract {
            sections,
            fullurl: String::new(),
        })
    }

    /// Attach the article's canonical URL.
    pub fn with_fullurl(mut self, fullurl: impl Into<String>) -> Self {
        self.fullurl = fullurl.into();
        self
    }

    /// The intro followed by top-level sections, in document order
    pub fn sections(&self) -> &[ArticleSection] {
        &self.sections
    }

    /// Canonical URL of the article, empty when unknown
    pub fn fullurl(&self) -> &str {
        &self.fullurl
    }

    /// Titles of the top-level sections, skipping the intro.
    ///
    /// Index `i` here corresponds to `sections()[i + 1]`.
    pub fn section_titles(&self) -> Vec<&str> {
        self.sections
            .iter()
            .skip(1)
            .map(|s| s.title().unwrap_or(""))
            .collect()
    }

    /// Serialize the section tree for caching.
    pub fn to_json(&self) -> ExtractResult<String> {
        Ok(serde_json::to_string(&self.sections)?)
    }

    /// Rebuild a tree serialized by [`to_json`](Self::to_json).
    ///
    /// The URL is not part of the serialized form; callers that cached it
    /// separately reattach it with [`with_fullurl`](Self::with_fullurl).
    pub fn from_json(data: &str) -> ExtractResult<Self> {
        let sections: Vec<ArticleSection> = serde_json::from_str(data)?;
        Ok(ArticleExtract {
            sections,
            fullurl: String::new(),
        })
    }
}

/// Split raw extract text at every full heading marker.
///
/// Equivalent to splitting on a marker fence followed by `digit + fence`,
/// consuming only the leading fence. The scan resumes right after the
/// consumed fence, so marker-like content inside a segment is re-examined
/// the way a lookahead split would.
fn split_segments(raw: &str) -> Vec<&str> {
    let re = marker_regex();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut at = 0;
    while let Some(m) = re.find_at(raw, at) {
        segments.push(&raw[start..m.start()]);
        start = m.start() + MARKER_FENCE.len();
        at = start;
    }
    segments.push(&raw[start..]);
    segments
}

fn malformed(index: usize, segment: &str) -> ExtractError {
    let snippet: String = segment.chars().take(SNIPPET_LEN).collect();
    ExtractError::MalformedSection { index, snippet }
}
