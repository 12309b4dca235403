use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::parser::text;

static DATA_LABELS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("aside[role='complementary'] h3.pi-data-label").unwrap());
static ANY_LABEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("aside[role='complementary'] h3").unwrap());

/// Resolve one fact-panel field by key. Tries the `data-source` container
/// first (strict value shape, then any direct div), then falls back to
/// matching the label text. Returns `None` when every step misses; never
/// errors on malformed or missing markup.
pub fn resolve_field(doc: &Html, key: &str) -> Option<String> {
    let source_key = key.replace(' ', "_");
    match container_value(doc, &source_key) {
        // A keyed container answers for the field even when empty.
        Some(value) => text::clean_text(value),
        None => by_label_text(doc, key),
    }
}

/// First value node of the container keyed by `data-source`: the
/// `.pi-data-value` child if present, otherwise any direct div.
fn container_value<'a>(doc: &'a Html, source_key: &str) -> Option<ElementRef<'a>> {
    let strict =
        Selector::parse(&format!(r#"div[data-source="{source_key}"] > div.pi-data-value"#)).ok()?;
    let relaxed = Selector::parse(&format!(r#"div[data-source="{source_key}"] > div"#)).ok()?;
    doc.select(&strict)
        .next()
        .or_else(|| doc.select(&relaxed).next())
}

fn by_label_text(doc: &Html, key: &str) -> Option<String> {
    let wanted = key.replace('_', " ");
    let label = doc
        .select(&DATA_LABELS)
        .find(|h| label_matches(*h, &wanted))
        .or_else(|| doc.select(&ANY_LABEL).find(|h| label_matches(*h, &wanted)))?;
    value_after_label(label)
}

// Exact equality post case-fold and trim. Substring matching would let
// "cover artist" answer for "artist".
fn label_matches(label: ElementRef, wanted: &str) -> bool {
    text::clean_text(label).is_some_and(|t| t.eq_ignore_ascii_case(wanted))
}

/// From a matched label, prefer a following `.pi-data-value` sibling
/// anywhere before the panel row ends; otherwise take the first following
/// div with visible text. Empty divs and image-only wrappers collapse to
/// no text and are skipped.
fn value_after_label(label: ElementRef) -> Option<String> {
    let mut fallback = None;
    for sib in label.next_siblings().filter_map(ElementRef::wrap) {
        if sib.value().name() != "div" {
            continue;
        }
        if has_class(sib, "pi-data-value") {
            return text::clean_text(sib);
        }
        if fallback.is_none() {
            if let Some(t) = text::clean_text(sib) {
                fallback = Some(t);
            }
        }
    }
    fallback
}

fn has_class(el: ElementRef, class: &str) -> bool {
    el.value()
        .attr("class")
        .is_some_and(|c| c.split_whitespace().any(|t| t == class))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(inner: &str) -> Html {
        Html::parse_document(&format!(
            r#"<aside role="complementary">{inner}</aside>"#
        ))
    }

    #[test]
    fn data_source_with_strict_value_child() {
        let doc = panel(
            r#"<div data-source="author"><h3 class="pi-data-label">Author</h3>
               <div class="pi-data-value">Jane Doe</div></div>"#,
        );
        assert_eq!(resolve_field(&doc, "author").as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn relaxed_match_takes_first_generic_child() {
        let doc = panel(r#"<div data-source="genre"><div>Fantasy</div></div>"#);
        assert_eq!(resolve_field(&doc, "genre").as_deref(), Some("Fantasy"));
    }

    #[test]
    fn spaced_key_normalizes_to_underscores() {
        let doc = panel(
            r#"<div data-source="cover_artist"><div class="pi-data-value">A. Painter</div></div>"#,
        );
        assert_eq!(
            resolve_field(&doc, "cover artist").as_deref(),
            Some("A. Painter")
        );
    }

    #[test]
    fn label_text_fallback() {
        let doc = panel(
            r#"<div><h3 class="pi-data-label">Publication date</h3>
               <div class="pi-data-value">1954</div></div>"#,
        );
        assert_eq!(
            resolve_field(&doc, "publication_date").as_deref(),
            Some("1954")
        );
    }

    #[test]
    fn label_match_is_exact_not_substring() {
        let doc = panel(
            r#"<div><h3 class="pi-data-label">Cover artist credits</h3>
               <div class="pi-data-value">Wrong</div></div>"#,
        );
        assert_eq!(resolve_field(&doc, "cover_artist"), None);
    }

    #[test]
    fn bare_h3_label_is_found_when_class_is_missing() {
        let doc = panel(r#"<div><h3>Publisher</h3><div>Allen &amp; Unwin</div></div>"#);
        assert_eq!(
            resolve_field(&doc, "publisher").as_deref(),
            Some("Allen & Unwin")
        );
    }

    #[test]
    fn image_only_sibling_is_skipped() {
        let doc = panel(
            r#"<div><h3 class="pi-data-label">Author</h3>
               <div><img src="decoration.png"></div>
               <div>Jane Doe</div></div>"#,
        );
        assert_eq!(resolve_field(&doc, "author").as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn markup_in_value_is_normalized() {
        let doc = panel(
            r#"<div data-source="genre"><div class="pi-data-value">
               <a href="/g">Fantasy</a><br><a href="/a">Adventure</a></div></div>"#,
        );
        assert_eq!(
            resolve_field(&doc, "genre").as_deref(),
            Some("Fantasy Adventure")
        );
    }

    #[test]
    fn missing_field_is_none() {
        let doc = panel(r#"<div data-source="author"><div>Jane</div></div>"#);
        assert_eq!(resolve_field(&doc, "publisher"), None);
    }

    #[test]
    fn empty_value_is_none_not_empty_string() {
        let doc = panel(r#"<div data-source="pages"><div class="pi-data-value">  </div></div>"#);
        assert_eq!(resolve_field(&doc, "pages"), None);
    }

    #[test]
    fn resolution_is_idempotent() {
        let doc = panel(
            r#"<div data-source="author"><div class="pi-data-value">Jane Doe</div></div>"#,
        );
        let first = resolve_field(&doc, "author");
        let second = resolve_field(&doc, "author");
        assert_eq!(first, second);
        assert_eq!(first.as_deref(), Some("Jane Doe"));
    }
}
