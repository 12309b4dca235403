pub mod image;
pub mod infobox;

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Serialize;

use crate::parser::headings;
use crate::parser::sections::{self, BodyMode};
use crate::parser::text;

/// Section headings sit at this level on item pages.
const SECTION_LEVEL: u8 = 2;

/// Panel headings longer than this are mis-captured body headings, not
/// titles.
const TITLE_CAP: usize = 70;

/// One immutable record per page. Every field is best-effort: absent data
/// is `None`, never an error, and no field's absence blocks another's
/// resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub title: Option<String>,
    pub plot_summary: Option<String>,
    pub characters: Option<Vec<String>>,
    pub locations: Option<Vec<String>>,
    pub author: Option<String>,
    pub cover_artist: Option<String>,
    pub genre: Option<String>,
    pub based_on: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    pub pages: Option<String>,
    pub preceded_by: Option<String>,
    pub followed_by: Option<String>,
    pub cover_image_url: Option<String>,
}

impl PageRecord {
    /// True when extraction produced nothing at all.
    pub fn is_empty(&self) -> bool {
        *self == PageRecord::default()
    }
}

/// Resolve every field of the record independently against the parsed
/// document. Pure: the same document always yields the same record.
pub fn extract_page(doc: &Html) -> PageRecord {
    PageRecord {
        title: resolve_title(doc),
        plot_summary: prose_section(doc, &["Plot summary", "Summary", "Synopsis"]),
        characters: list_section(doc, &["Characters", "Cast"]),
        locations: list_section(doc, &["Locations", "Setting"]),
        author: field(doc, &["author"]),
        cover_artist: field(doc, &["cover_artist", "cover artist"]),
        genre: field(doc, &["genre"]),
        based_on: field(doc, &["based_on", "based on"]),
        publisher: field(doc, &["publisher"]),
        publication_date: field(doc, &["publication_date", "release_date", "publication date"]),
        pages: field(doc, &["pages"]),
        preceded_by: field(doc, &["preceded_by", "preceded by"]),
        followed_by: field(doc, &["followed_by", "followed by"]),
        cover_image_url: image::resolve_image(doc)
            .map(|src| image::canonicalize(&src)),
    }
}

fn field(doc: &Html, spellings: &[&str]) -> Option<String> {
    spellings
        .iter()
        .find_map(|key| infobox::resolve_field(doc, key))
}

/// Title fallback: page header → panel title heading → first panel heading
/// under the length cap.
fn resolve_title(doc: &Html) -> Option<String> {
    static PAGE_TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("h1.page-header__title").unwrap());
    static PANEL_TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("aside[role='complementary'] h2.pi-title").unwrap());
    static PANEL_HEADING: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("aside[role='complementary'] h2").unwrap());

    doc.select(&PAGE_TITLE)
        .next()
        .and_then(text::clean_text)
        .or_else(|| doc.select(&PANEL_TITLE).next().and_then(text::clean_text))
        .or_else(|| {
            doc.select(&PANEL_HEADING)
                .next()
                .and_then(text::clean_text)
                .filter(|t| t.chars().count() < TITLE_CAP)
        })
}

fn prose_section(doc: &Html, labels: &[&str]) -> Option<String> {
    let heading = headings::find_heading(doc, labels, SECTION_LEVEL)?;
    sections::collect_body(heading, SECTION_LEVEL, BodyMode::Prose)?.into_prose()
}

fn list_section(doc: &Html, labels: &[&str]) -> Option<Vec<String>> {
    let heading = headings::find_heading(doc, labels, SECTION_LEVEL)?;
    sections::collect_body(heading, SECTION_LEVEL, BodyMode::List)?.into_items()
}

// ── Tests ──
