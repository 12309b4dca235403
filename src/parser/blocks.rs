use scraper::ElementRef;

/// One element sibling, as seen by the section walkers. Classification
/// happens once per step; callers dispatch on the variant instead of
/// re-inspecting tag names.
#[derive(Debug, Clone, Copy)]
pub enum SiblingBlock<'a> {
    Heading { level: u8 },
    Paragraph(ElementRef<'a>),
    List(ElementRef<'a>),
    Other,
}

pub fn classify(el: ElementRef<'_>) -> SiblingBlock<'_> {
    let name = el.value().name();
    if let Some(level) = heading_level(name) {
        return SiblingBlock::Heading { level };
    }
    match name {
        "p" => SiblingBlock::Paragraph(el),
        "ul" | "ol" => SiblingBlock::List(el),
        _ => SiblingBlock::Other,
    }
}

/// Element siblings following `el`, in document order, classified.
/// Text and comment nodes between elements are not surfaced.
pub fn following<'a>(el: ElementRef<'a>) -> impl Iterator<Item = SiblingBlock<'a>> + 'a {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .map(classify)
}

/// `h1`..`h6` → 1..6; anything else is not a heading.
pub fn heading_level(name: &str) -> Option<u8> {
    match name.as_bytes() {
        [b'h', d @ b'1'..=b'6'] => Some(d - b'0'),
        _ => None,
    }
}

// ── Tests ──
