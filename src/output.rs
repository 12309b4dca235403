use anyhow::Result;
use serde_json::Value;

use crate::parser::extract::PageRecord;

/// Presentation order for the report; the JSON payload carries its own
/// field names.
const REPORT_FIELDS: [&str; 14] = [
    "title",
    "plot_summary",
    "characters",
    "locations",
    "author",
    "cover_artist",
    "genre",
    "based_on",
    "publisher",
    "publication_date",
    "pages",
    "preceded_by",
    "followed_by",
    "cover_image_url",
];

/// Single-line JSON payload. A record with nothing resolved collapses to
/// `{}` so downstream consumers always receive an object.
pub fn print_json(record: &PageRecord) -> Result<()> {
    if record.is_empty() {
        println!("{{}}");
        return Ok(());
    }
    println!("{}", serde_json::to_string(record)?);
    Ok(())
}

/// Readable multi-line report, one field per line, list entries indented.
pub fn print_report(record: &PageRecord) -> Result<()> {
    if record.is_empty() {
        println!("{{}}");
        return Ok(());
    }

    let value = serde_json::to_value(record)?;
    for name in REPORT_FIELDS {
        let label = humanize(name);
        match value.get(name) {
            Some(Value::String(s)) => println!("{label}: {s}"),
            Some(Value::Array(items)) => {
                println!("{label}:");
                for item in items {
                    if let Value::String(s) = item {
                        println!("  - {s}");
                    }
                }
            }
            _ => println!("{label}: null"),
        }
    }
    Ok(())
}

/// `cover_artist` → `Cover Artist`.
fn humanize(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanizes_field_names() {
        assert_eq!(humanize("title"), "Title");
        assert_eq!(humanize("cover_artist"), "Cover Artist");
        assert_eq!(humanize("publication_date"), "Publication Date");
    }

    #[test]
    fn report_fields_cover_the_record() {
        let record = PageRecord {
            title: Some("T".into()),
            ..PageRecord::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), REPORT_FIELDS.len());
        for name in REPORT_FIELDS {
            assert!(object.contains_key(name), "missing field: {name}");
        }
    }
}
