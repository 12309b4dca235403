use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use super::blocks::{self, SiblingBlock};
use super::text;

static LIST_ITEMS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());

/// What to harvest from a section body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    Prose,
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    Prose(String),
    Items(Vec<String>),
}

impl SectionBody {
    pub fn into_prose(self) -> Option<String> {
        match self {
            SectionBody::Prose(text) => Some(text),
            SectionBody::Items(_) => None,
        }
    }

    pub fn into_items(self) -> Option<Vec<String>> {
        match self {
            SectionBody::Items(items) => Some(items),
            SectionBody::Prose(_) => None,
        }
    }
}

/// Harvest the body of a section, walking the siblings after `heading`.
/// A heading at the same or a higher level closes the section; lower-level
/// headings and unrecognized siblings are skipped, never boundaries.
///
/// `Prose`: paragraph texts joined by newlines. `List`: paragraph texts
/// before the first list become entries, then every item of that list; the
/// scan stops right after it, so later lists in the section are never
/// consulted. `None` when nothing accumulated.
pub fn collect_body(heading: ElementRef, level: u8, mode: BodyMode) -> Option<SectionBody> {
    let mut entries: Vec<String> = Vec::new();

    for block in blocks::following(heading) {
        match block {
            SiblingBlock::Heading { level: l } if l <= level => break,
            SiblingBlock::Paragraph(p) => {
                if let Some(t) = text::clean_text(p) {
                    entries.push(t);
                }
            }
            SiblingBlock::List(list) if mode == BodyMode::List => {
                for item in list.select(&LIST_ITEMS) {
                    if let Some(t) = text::clean_text(item) {
                        entries.push(t);
                    }
                }
                break;
            }
            _ => {}
        }
    }

    if entries.is_empty() {
        return None;
    }
    Some(match mode {
        BodyMode::Prose => SectionBody::Prose(entries.join("\n")),
        BodyMode::List => SectionBody::Items(entries),
    })
}

// ── Tests ──
