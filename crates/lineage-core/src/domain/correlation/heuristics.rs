//! Heuristic query planning
//!
//! Turns the current record's attributes into an ordered list of
//! substring queries against the cross-referenced collections. Order is
//! pass (name, location, enslaver, date), then collection, then token or
//! field, and it decides which duplicate wins during dedup.

use std::fmt;

use super::settings::MatchSettings;
use crate::domain::records::ExtractedAttributes;
use crate::domain::registry::CollectionDescriptor;

/// Rows fetched per query
pub const ROWS_PER_QUERY: u32 = 3;

/// Name tokens queried per collection
pub const NAME_TOKENS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchPass {
    Name,
    Location,
    Enslaver,
    Date,
}

impl MatchPass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Location => "location",
            Self::Enslaver => "enslaver",
            Self::Date => "date",
        }
    }

    /// Detail shown when the scorer finds no shared signal
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Possible name match",
            Self::Location => "Same area",
            Self::Enslaver => "Possible shared enslaver",
            Self::Date => "Same period",
        }
    }
}

impl fmt::Display for MatchPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One substring query against one collection
#[derive(Debug, Clone)]
pub struct MatchQuery<'a> {
    pub pass: MatchPass,
    pub collection: &'a CollectionDescriptor,
    pub fields: Vec<String>,
    pub needle: String,
}

/// Columns searched for a person's name: the full-name column, or the split
/// first/last columns together
fn name_fields(collection: &CollectionDescriptor) -> Vec<String> {
    let mapping = &collection.mapping;
    match &mapping.name {
        Some(name) => vec![name.clone()],
        None => [&mapping.first_name, &mapping.last_name]
            .into_iter()
            .flatten()
            .cloned()
            .collect(),
    }
}

/// Whitespace tokens at least `min_len` characters long, first two only
pub fn name_tokens(name: &str, min_len: usize) -> Vec<String> {
    name.split_whitespace()
        .filter(|token| token.chars().count() >= min_len)
        .take(NAME_TOKENS)
        .map(str::to_string)
        .collect()
}

/// Plan every query the enabled passes call for
pub fn plan_queries<'a>(
    settings: &MatchSettings,
    current: &ExtractedAttributes,
    collections: &[&'a CollectionDescriptor],
) -> Vec<MatchQuery<'a>> {
    let mut queries = Vec::new();

    if settings.match_by_name {
        if let Some(name) = &current.name {
            let tokens = name_tokens(name, settings.min_name_length);
            for &collection in collections {
                let fields = name_fields(collection);
                if fields.is_empty() {
                    continue;
                }
                for token in &tokens {
                    queries.push(MatchQuery {
                        pass: MatchPass::Name,
                        collection,
                        fields: fields.clone(),
                        needle: token.clone(),
                    });
                }
            }
        }
    }

    if settings.match_by_location {
        if let Some(location) = &current.location {
            for &collection in collections {
                if let Some(field) = &collection.mapping.location {
                    queries.push(MatchQuery {
                        pass: MatchPass::Location,
                        collection,
                        fields: vec![field.clone()],
                        needle: location.clone(),
                    });
                }
            }
        }
    }

    if settings.match_by_enslaver {
        if let Some(enslaver) = &current.former_enslaver {
            for &collection in collections {
                for field in &collection.mapping.enslaver {
                    queries.push(MatchQuery {
                        pass: MatchPass::Enslaver,
                        collection,
                        fields: vec![field.clone()],
                        needle: enslaver.clone(),
                    });
                }
            }
        }
    }

    if settings.match_by_date {
        if let Some(year) = current.year {
            let needle = year.to_string();
            for &collection in collections {
                for field in &collection.mapping.date {
                    queries.push(MatchQuery {
                        pass: MatchPass::Date,
                        collection,
                        fields: vec![field.clone()],
                        needle: needle.clone(),
                    });
                }
            }
        }
    }

    queries
}
