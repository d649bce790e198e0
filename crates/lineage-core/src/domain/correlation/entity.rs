//! Correlation types
//!
//! Admin-curated links as stored, and the merged "related records" entries
//! the engine produces from links and heuristic matches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::records::{ExtractedAttributes, extract_year};

/// Kind of relationship an administrator recorded between two records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Family,
    SameEnslaver,
    SameLocation,
    SameVoyage,
    SameTransaction,
    MentionedTogether,
    Custom,
}

impl RelationshipType {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::SameEnslaver => "same_enslaver",
            Self::SameLocation => "same_location",
            Self::SameVoyage => "same_voyage",
            Self::SameTransaction => "same_transaction",
            Self::MentionedTogether => "mentioned_together",
            Self::Custom => "custom",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "family" => Some(Self::Family),
            "same_enslaver" => Some(Self::SameEnslaver),
            "same_location" => Some(Self::SameLocation),
            "same_voyage" => Some(Self::SameVoyage),
            "same_transaction" => Some(Self::SameTransaction),
            "mentioned_together" => Some(Self::MentionedTogether),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    /// Label shown to readers
    pub fn label(&self) -> &'static str {
        match self {
            Self::Family => "Family",
            Self::SameEnslaver => "Same enslaver",
            Self::SameLocation => "Same location",
            Self::SameVoyage => "Same voyage",
            Self::SameTransaction => "Same transaction",
            Self::MentionedTogether => "Mentioned together",
            Self::Custom => "Related",
        }
    }

    pub fn all() -> &'static [RelationshipType] {
        &[
            Self::Family,
            Self::SameEnslaver,
            Self::SameLocation,
            Self::SameVoyage,
            Self::SameTransaction,
            Self::MentionedTogether,
            Self::Custom,
        ]
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One end of an admin link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    pub id: String,
    /// Collection slug
    pub collection: String,
    pub name: Option<String>,
}

impl RecordRef {
    pub fn new(id: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            collection: collection.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Administrator-authored relationship between two records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminLink {
    pub id: String,
    pub source: RecordRef,
    pub target: RecordRef,
    /// Directional links are visible from the source only
    pub bidirectional: bool,
    pub relationship_type: RelationshipType,
    pub note: Option<String>,
    pub featured: bool,
    pub priority: i32,
    pub custom_badge: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AdminLink {
    /// The record on the far side of this link as seen from `current_id`,
    /// or `None` when the link is not visible from there
    pub fn other_side(&self, current_id: &str) -> Option<&RecordRef> {
        if self.source.id == current_id {
            Some(&self.target)
        } else if self.target.id == current_id && self.bidirectional {
            Some(&self.source)
        } else {
            None
        }
    }

    /// The near side of this link as seen from `current_id`
    pub fn this_side(&self, current_id: &str) -> &RecordRef {
        if self.source.id == current_id {
            &self.source
        } else {
            &self.target
        }
    }

    /// Relationship label, followed by the note when there is one
    pub fn detail(&self) -> String {
        match self.note.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            Some(note) => format!("{}: {}", self.relationship_type.label(), note),
            None => self.relationship_type.label().to_string(),
        }
    }
}

/// How a related record was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrigin {
    AdminCurated,
    Heuristic,
}

impl MatchOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdminCurated => "admin_curated",
            Self::Heuristic => "heuristic",
        }
    }
}

impl fmt::Display for MatchOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of a record's "related records" list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedRecordCandidate {
    pub id: String,
    pub name: String,
    /// Slug of the collection the current record belongs to
    pub source_collection: String,
    /// Slug of the related record's collection
    pub target_collection: String,
    pub detail: String,
    pub origin: MatchOrigin,
    pub priority: i32,
    pub featured: bool,
    pub custom_badge: Option<String>,
    /// Relevance score; admin-curated entries are not scored
    pub score: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

impl RelatedRecordCandidate {
    /// Entry for the far side of an admin link
    pub fn from_link(link: &AdminLink, current_id: &str) -> Option<Self> {
        let other = link.other_side(current_id)?;
        Some(Self {
            id: other.id.clone(),
            name: other.name.clone().unwrap_or_else(|| other.id.clone()),
            source_collection: link.this_side(current_id).collection.clone(),
            target_collection: other.collection.clone(),
            detail: link.detail(),
            origin: MatchOrigin::AdminCurated,
            priority: link.priority,
            featured: link.featured,
            custom_badge: link.custom_badge.clone(),
            score: None,
            reasons: Vec::new(),
        })
    }

    pub fn is_admin_curated(&self) -> bool {
        self.origin == MatchOrigin::AdminCurated
    }
}

/// Caller-supplied match terms; each overrides what the current record
/// itself carries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTerms {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub enslaver: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl SearchTerms {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_enslaver(mut self, enslaver: impl Into<String>) -> Self {
        self.enslaver = Some(enslaver.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        [&self.name, &self.location, &self.enslaver, &self.date]
            .into_iter()
            .all(|v| present(v).is_none())
    }

    /// Overlay these terms onto attributes extracted from the current record
    pub fn apply(&self, attributes: &mut ExtractedAttributes) {
        if let Some(name) = present(&self.name) {
            attributes.name = Some(name);
            attributes.first_name = None;
            attributes.last_name = None;
            attributes.fill_names();
        }
        if let Some(location) = present(&self.location) {
            attributes.location = Some(location);
        }
        if let Some(enslaver) = present(&self.enslaver) {
            attributes.former_enslaver = Some(enslaver);
        }
        if let Some(date) = present(&self.date) {
            attributes.year = extract_year(&date).or(attributes.year);
            attributes.date = Some(date);
        }
    }
}
