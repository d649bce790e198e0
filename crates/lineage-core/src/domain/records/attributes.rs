//! Normalized record attributes
//!
//! Extracted once per record through the collection's field-role mapping and
//! shared by the relevance scorer and the correlation engine.

use serde::{Deserialize, Serialize};

use super::entity::{Record, extract_year};
use crate::domain::registry::CollectionDescriptor;

/// Typed view of the semantic fields a record carries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedAttributes {
    pub id: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub location: Option<String>,
    pub former_enslaver: Option<String>,
    pub state: Option<String>,
    pub regiment: Option<String>,
    /// Raw date text, e.g. "June 1, 1850"
    pub date: Option<String>,
    pub year: Option<i32>,
    pub age: Option<i32>,
}

impl ExtractedAttributes {
    /// Extract attributes from a raw record of `collection`
    pub fn from_record(record: &Record, collection: &CollectionDescriptor) -> Self {
        let mapping = &collection.mapping;
        let field = |column: &Option<String>| column.as_deref().and_then(|c| record.text(c));
        let first_text = |columns: &[String]| columns.iter().find_map(|c| record.text(c));

        let date = first_text(mapping.date.as_slice());
        let year = mapping
            .year
            .as_deref()
            .and_then(|c| record.integer(c))
            .or_else(|| date.as_deref().and_then(extract_year));

        let mut attributes = Self {
            id: record.text(&collection.id_field),
            name: field(&mapping.name),
            first_name: field(&mapping.first_name),
            last_name: field(&mapping.last_name),
            location: field(&mapping.location),
            former_enslaver: first_text(mapping.enslaver.as_slice()),
            state: field(&mapping.state),
            regiment: field(&mapping.regiment),
            date,
            year,
            age: mapping.age.as_deref().and_then(|c| record.integer(c)),
        };
        attributes.fill_names();
        attributes
    }

    /// Derive whichever of full name / first / last is missing from the others
    pub fn fill_names(&mut self) {
        if self.first_name.is_none() || self.last_name.is_none() {
            if let Some(name) = &self.name {
                let tokens: Vec<&str> = name.split_whitespace().collect();
                if self.first_name.is_none() {
                    self.first_name = tokens.first().map(|t| t.to_string());
                }
                if self.last_name.is_none() && tokens.len() > 1 {
                    self.last_name = tokens.last().map(|t| t.to_string());
                }
            }
        }

        if self.name.is_none() {
            let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            if !joined.is_empty() {
                self.name = Some(joined);
            }
        }
    }
}
