use askama::Template;

use crate::fetcher::Entry;

/// A run of consecutive entries sharing one source key.
#[derive(Debug)]
pub struct SourceSection<'a> {
    pub key: &'a str,
    pub entries: Vec<&'a Entry>,
}

// Feed content is inserted verbatim. Escaping is off so publisher markup in
// descriptions renders; only use with trusted feeds.
#[derive(Template)]
#[template(path = "items.html", escape = "none")]
pub struct ItemsTemplate<'a> {
    pub sections: Vec<SourceSection<'a>>,
}

/// Split sorted entries into sections, starting a new one whenever the
/// source key changes.
pub fn group_by_source(entries: &[Entry]) -> Vec<SourceSection<'_>> {
    let mut sections: Vec<SourceSection<'_>> = Vec::new();
    for entry in entries {
        match sections.last_mut() {
            Some(section) if section.key == entry.source_key => section.entries.push(entry),
            _ => sections.push(SourceSection {
                key: &entry.source_key,
                entries: vec![entry],
            }),
        }
    }
    sections
}

/// Render the heading and item fragments for sorted entries.
pub fn render_items(entries: &[Entry]) -> Result<String, askama::Error> {
    ItemsTemplate {
        sections: group_by_source(entries),
    }
    .render()
}

/// Render entries and substitute them for every occurrence of `placeholder`
/// in `template`. A template without the placeholder is returned unchanged.
pub fn render(entries: &[Entry], template: &str, placeholder: &str) -> Result<String, askama::Error> {
    if placeholder.is_empty() {
        return Ok(template.to_string());
    }
    let items = render_items(entries)?;
    Ok(template.replace(placeholder, &items))
}
