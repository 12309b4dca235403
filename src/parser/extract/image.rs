use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

static PANEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("aside[role='complementary']").unwrap());
static LINKED_IMAGES: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a img").unwrap());
static ANY_IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

/// Matchers ordered most template-specific to most generic. New template
/// variants append here without touching the resolution loop.
static MATCHERS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [
        "figure.pi-image > a > img",
        "img.pi-image-thumbnail",
        "figure img",
    ]
    .into_iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect()
});

/// Derivative-rendition markers in image-hosting paths.
static DERIVATIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(scale-to-width-down/\d+|revision)(/|$)").unwrap());

/// Find a representative image URL inside the fact panel. The first
/// matcher producing an `img` with a non-empty `src` wins; after the chain,
/// a linked non-vector image filters out decorative icons, and the last
/// resort is any image at all. `None` only when the panel has no image.
pub fn resolve_image(doc: &Html) -> Option<String> {
    let panel = doc.select(&PANEL).next()?;

    for matcher in MATCHERS.iter() {
        if let Some(src) = panel.select(matcher).find_map(image_src) {
            return Some(src);
        }
    }

    if let Some(src) = panel
        .select(&LINKED_IMAGES)
        .filter(|img| !is_vector(*img))
        .find_map(image_src)
    {
        return Some(src);
    }

    panel.select(&ANY_IMAGE).find_map(image_src)
}

/// Strip derivative-rendition path segments and tracking parameters from a
/// recognized image-hosting URL: the thumbnail-scaling segment and its
/// width operand go, the path is truncated at the revision suffix, and the
/// query is dropped. URLs without derivative markers pass through
/// untouched; unparseable ones keep the raw value with a diagnostic.
pub fn canonicalize(raw: &str) -> String {
    if !DERIVATIVE.is_match(raw) {
        return raw.to_string();
    }

    let mut parsed = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            warn!("keeping raw image url, canonicalization failed: {e}");
            return raw.to_string();
        }
    };

    let segments: Vec<String> = match parsed.path_segments() {
        Some(segments) => segments.map(str::to_string).collect(),
        None => return raw.to_string(),
    };

    let mut kept: Vec<&str> = Vec::with_capacity(segments.len());
    let mut i = 0;
    while i < segments.len() {
        match segments[i].as_str() {
            "revision" => break,
            // The scaling marker carries its width as the next segment.
            "scale-to-width-down" => i += 2,
            seg => {
                kept.push(seg);
                i += 1;
            }
        }
    }

    parsed.set_path(&kept.join("/"));
    parsed.set_query(None);
    parsed.to_string()
}

fn image_src(img: ElementRef) -> Option<String> {
    img.value()
        .attr("src")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn is_vector(img: ElementRef) -> bool {
    img.value()
        .attr("src")
        .is_some_and(|s| s.to_lowercase().contains(".svg"))
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
    fn infobox_figure_anchor_wins() {
        let doc = panel(
            r#"<figure class="pi-image"><a href="/f"><img src="https://img.example/cover.png"></a></figure>
               <figure><img src="https://img.example/other.png"></figure>"#,
        );
        assert_eq!(
            resolve_image(&doc).as_deref(),
            Some("https://img.example/cover.png")
        );
    }

    #[test]
    fn thumbnail_class_is_second_choice() {
        let doc = panel(
            r#"<div><img class="pi-image-thumbnail" src="https://img.example/thumb.png"></div>
               <figure><img src="https://img.example/other.png"></figure>"#,
        );
        assert_eq!(
            resolve_image(&doc).as_deref(),
            Some("https://img.example/thumb.png")
        );
    }

    #[test]
    fn linked_raster_image_beats_plain_image() {
        let doc = panel(
            r#"<div><img src="https://img.example/plain.png"></div>
               <a href="/f"><img src="https://img.example/linked.jpg"></a>"#,
        );
        assert_eq!(
            resolve_image(&doc).as_deref(),
            Some("https://img.example/linked.jpg")
        );
    }

    #[test]
    fn linked_vector_icon_is_rejected() {
        let doc = panel(
            r#"<a href="/e"><img src="https://img.example/edit-icon.svg"></a>
               <div><img src="https://img.example/fallback.png"></div>"#,
        );
        assert_eq!(
            resolve_image(&doc).as_deref(),
            Some("https://img.example/fallback.png")
        );
    }

    #[test]
    fn empty_src_never_matches() {
        let doc = panel(r#"<figure class="pi-image"><a><img src="  "></a></figure>"#);
        assert_eq!(resolve_image(&doc), None);
    }

    #[test]
    fn no_images_is_none() {
        let doc = panel(r#"<div><h3 class="pi-data-label">Author</h3><div>Jane</div></div>"#);
        assert_eq!(resolve_image(&doc), None);
    }

    #[test]
    fn no_panel_is_none() {
        let doc = Html::parse_document("<p>No sidebar here.</p>");
        assert_eq!(resolve_image(&doc), None);
    }

    #[test]
    fn canonicalize_strips_derivative_segments() {
        assert_eq!(
            canonicalize("https://host/path/scale-to-width-down/200/revision/latest?cb=1"),
            "https://host/path"
        );
    }

    #[test]
    fn canonicalize_handles_revision_only() {
        assert_eq!(
            canonicalize("https://host/images/cover.jpg/revision/latest/scale-to-width-down/310?cb=2"),
            "https://host/images/cover.jpg"
        );
    }

    #[test]
    fn unrecognized_urls_pass_through() {
        let url = "https://img.example/cover.png?width=200";
        assert_eq!(canonicalize(url), url);
    }

    #[test]
    fn unparseable_url_keeps_raw_value() {
        let raw = "/images/cover.jpg/revision/latest?cb=1";
        assert_eq!(canonicalize(raw), raw);
    }
}
