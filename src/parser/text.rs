use scraper::node::Node;
use scraper::ElementRef;

/// Collapsed text content of a markup subtree. Line-break and divider tags
/// (`br`, `hr`) become a single space, every other tag is dropped, and
/// whitespace runs shrink to one space. An all-whitespace result is `None`,
/// never `""`.
pub fn clean_text(el: ElementRef) -> Option<String> {
    let mut raw = String::new();
    flatten(el, &mut raw);
    collapse(&raw)
}

/// Text of the element's direct text children only; nested elements are
/// excluded entirely.
pub fn own_text(el: ElementRef) -> Option<String> {
    let mut raw = String::new();
    for child in el.children() {
        if let Node::Text(text) = child.value() {
            raw.push_str(text.as_ref());
        }
    }
    collapse(&raw)
}

/// Collapse whitespace runs and trim; empty becomes `None`.
pub fn collapse(s: &str) -> Option<String> {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

fn flatten(el: ElementRef, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text.as_ref()),
            Node::Element(e) => {
                if matches!(e.name(), "br" | "hr") {
                    out.push(' ');
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    flatten(child_el, out);
                }
            }
            _ => {}
        }
    }
}

// ── Tests ──
