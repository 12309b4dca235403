pub mod blocks;
pub mod extract;
pub mod headings;
pub mod sections;
pub mod text;

use scraper::Html;

use extract::PageRecord;

/// Two-pass pipeline: html → document tree → extracted record.
pub fn process_page(html: &str) -> PageRecord {
    let doc = Html::parse_document(html);
    extract::extract_page(&doc)
}

// ── Tests ──
