//! Best-effort parsing of the free-text `content` column.
//!
//! Content rows look like `"<verb> <type> - <Company Name> <email> <path>"`. The
//! truncation rules below decide every company name shown on the dashboard, so
//! they are kept deliberately narrow.

use std::collections::HashMap;

use super::types::Event;
use crate::constants::{COMPANY_NAME_SEPARATOR, DEFAULT_SERIES_KEY};

/// First whitespace-delimited token containing `@`, or `""`.
pub fn extract_user_email(content: &str) -> &str {
    content
        .split_whitespace()
        .find(|token| token.contains('@'))
        .unwrap_or("")
}

/// Company display name embedded in a single content string, if any.
///
/// Takes the segment between the first and second `" - "`. With an email in
/// that segment the name is the text before `@` cut at its last space; without
/// one it is the text before the first space.
pub fn company_name_from_content(content: &str) -> Option<&str> {
    let segment = content.split(COMPANY_NAME_SEPARATOR).nth(1)?;

    let name = match segment.find('@') {
        Some(at) => {
            let local = &segment[..at];
            match local.rfind(' ') {
                Some(space) => &local[..space],
                None => local,
            }
        }
        None => match segment.find(' ') {
            Some(space) => &segment[..space],
            None => segment,
        },
    };

    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Display name for `company_id`, derived from the first event of that company.
/// Falls back to the id itself.
pub fn extract_company_name<'a, I>(company_id: &str, events: I) -> String
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .find(|event| event.company_id == company_id)
        .and_then(|event| company_name_from_content(&event.content))
        .unwrap_or(company_id)
        .to_string()
}

/// Per-report index of company display names.
///
/// Equivalent to calling [`extract_company_name`] for every company, but walks
/// the events once.
#[derive(Debug, Default, Clone)]
pub struct CompanyNames {
    names: HashMap<String, String>,
}

impl CompanyNames {
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let mut names = HashMap::new();
        for event in events {
            if names.contains_key(&event.company_id) {
                continue;
            }
            let name = company_name_from_content(&event.content)
                .unwrap_or(event.company_id.as_str())
                .to_string();
            names.insert(event.company_id.clone(), name);
        }
        Self { names }
    }

    pub fn get<'a>(&'a self, company_id: &'a str) -> &'a str {
        self.names
            .get(company_id)
            .map(String::as_str)
            .unwrap_or(company_id)
    }
}

/// camelCase key for a display name: `"Acme Corp"` -> `"acmeCorp"`.
pub fn series_key(display_name: &str) -> String {
    let mut key = String::with_capacity(display_name.len());
    for (idx, word) in display_name.split_whitespace().enumerate() {
        if idx == 0 {
            key.push_str(&word.to_lowercase());
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            key.extend(first.to_uppercase());
            key.push_str(&chars.as_str().to_lowercase());
        }
    }

    if key.is_empty() {
        DEFAULT_SERIES_KEY.to_string()
    } else {
        key
    }
}
