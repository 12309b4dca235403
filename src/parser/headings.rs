use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::blocks::heading_level;
use super::text;

static HEADINGS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());
static HEADLINE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.mw-headline").unwrap());

/// Matchers in priority order, most template-specific first. Each is pure:
/// document in, optional heading out. A tier that matches wins outright;
/// ties within a tier break by document order.
const MATCHERS: [for<'d, 'l> fn(&'d Html, &'l str, u8) -> Option<ElementRef<'d>>; 3] =
    [by_id, by_headline_id, by_text];

/// Find a section heading at `level` for the first candidate label that
/// matches under any tier. Candidates are tried in order; a candidate is
/// abandoned only after all three tiers miss.
pub fn find_heading<'a>(doc: &'a Html, candidates: &[&str], level: u8) -> Option<ElementRef<'a>> {
    candidates.iter().copied().find_map(|label| {
        MATCHERS
            .iter()
            .find_map(|matcher| matcher(doc, label, level))
    })
}

fn headings_at<'a>(doc: &'a Html, level: u8) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    doc.select(&HEADINGS)
        .filter(move |h| heading_level(h.value().name()) == Some(level))
}

/// Label as it appears in generated heading identifiers: whitespace runs
/// become underscores.
fn identifier(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join("_")
}

// Tier 1: the heading carries the identifier itself.
fn by_id<'d>(doc: &'d Html, label: &str, level: u8) -> Option<ElementRef<'d>> {
    let id = identifier(label);
    let id_lower = id.to_lowercase();
    headings_at(doc, level).find(|h| {
        h.value()
            .attr("id")
            .is_some_and(|v| v == id || v == id_lower)
    })
}

// Tier 2: the identifier sits on a nested headline marker.
fn by_headline_id<'d>(doc: &'d Html, label: &str, level: u8) -> Option<ElementRef<'d>> {
    let id = identifier(label);
    let id_lower = id.to_lowercase();
    headings_at(doc, level).find(|h| {
        h.select(&HEADLINE).any(|span| {
            span.value()
                .attr("id")
                .is_some_and(|v| v == id || v == id_lower)
        })
    })
}

// Tier 3: text equality, case-insensitive, against the headline marker or
// the heading's own text (nested decorations excluded). Exact match only;
// substring containment would let one section's label capture another's.
fn by_text<'d>(doc: &'d Html, label: &str, level: u8) -> Option<ElementRef<'d>> {
    headings_at(doc, level).find(|h| {
        if let Some(t) = h.select(&HEADLINE).next().and_then(text::clean_text) {
            if t.eq_ignore_ascii_case(label) {
                return true;
            }
        }
        text::own_text(*h).is_some_and(|t| t.eq_ignore_ascii_case(label))
    })
}

// ── Tests ──
