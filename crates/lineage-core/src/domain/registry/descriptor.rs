//! Collection descriptors and field-role mapping
//!
//! A descriptor names the table behind one historical-record collection and
//! which of its columns are searched, displayed and concatenated into the
//! record identifier. Collections share no schema, so each descriptor also
//! resolves, once at load time, which concrete column plays each logical
//! role (name, location, enslaver, ...) used by the correlation engine.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Columns tried for the "enslaver" role when a collection does not name one
pub const ENSLAVER_CANDIDATES: &[&str] = &["enslaver", "owner", "owner_name", "master", "claimant"];

/// Columns tried for the "date" role when a collection does not name one
pub const DATE_CANDIDATES: &[&str] = &[
    "date",
    "year",
    "date_registered",
    "registration_date",
    "created_at",
];

const NAME_ALIASES: &[&str] = &["name", "full_name", "person_name"];
const FIRST_NAME_ALIASES: &[&str] = &["first_name", "given_name"];
const LAST_NAME_ALIASES: &[&str] = &["last_name", "surname", "family_name"];
const LOCATION_ALIASES: &[&str] = &["location", "place", "residence", "county", "port"];
const STATE_ALIASES: &[&str] = &["state"];
const REGIMENT_ALIASES: &[&str] = &["regiment", "unit"];
const AGE_ALIASES: &[&str] = &["age"];
const YEAR_ALIASES: &[&str] = &["year", "census_year"];

/// Explicit role assignments declared by a catalog entry
///
/// Anything left unset is resolved from the alias lists above against the
/// collection's declared columns. Without declared columns, name and
/// location take their first alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleHints {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
    pub regiment: Option<String>,
    pub age: Option<String>,
    pub year: Option<String>,
    pub enslaver: Vec<String>,
    pub date: Vec<String>,
}

/// Concrete column for each logical role, resolved once per collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldMapping {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
    pub regiment: Option<String>,
    pub age: Option<String>,
    pub year: Option<String>,
    /// Ordered; searched one by one
    pub enslaver: Vec<String>,
    /// Ordered; searched one by one
    pub date: Vec<String>,
}

/// One historical-record collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDescriptor {
    pub id: String,
    pub display_name: String,
    pub slug: String,
    /// Backing table; defaults to `id`
    #[serde(default)]
    pub table: String,
    #[serde(default = "default_id_field")]
    pub id_field: String,
    pub searchable_fields: Vec<String>,
    #[serde(default)]
    pub display_fields: Vec<String>,
    pub identifier_fields: Vec<String>,
    /// Known columns. When absent the schema is treated as unknown and role
    /// candidates are tried at query time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub roles: RoleHints,
    #[serde(skip_deserializing)]
    pub mapping: FieldMapping,
}

fn default_id_field() -> String {
    "id".to_string()
}

/// Check that a name is a plain SQL identifier so it can be quoted safely
pub fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier(name.to_string()))
    }
}

impl CollectionDescriptor {
    /// Create a descriptor; call [`CollectionDescriptor::resolve`] before use
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            slug: slug.into(),
            table: String::new(),
            id_field: default_id_field(),
            searchable_fields: Vec::new(),
            display_fields: Vec::new(),
            identifier_fields: Vec::new(),
            columns: None,
            roles: RoleHints::default(),
            mapping: FieldMapping::default(),
        }
    }

    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns = Some(columns.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn with_searchable(mut self, fields: &[&str]) -> Self {
        self.searchable_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_display(mut self, fields: &[&str]) -> Self {
        self.display_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_identifier(mut self, fields: &[&str]) -> Self {
        self.identifier_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_roles(mut self, roles: RoleHints) -> Self {
        self.roles = roles;
        self
    }

    /// Validate names and resolve the field-role mapping
    pub fn resolve(mut self) -> Result<Self> {
        if self.id.is_empty() || self.slug.is_empty() {
            return Err(Error::RegistryError(
                "collection id and slug must not be empty".to_string(),
            ));
        }
        if self.table.is_empty() {
            self.table = self.id.clone();
        }
        if self.searchable_fields.is_empty() {
            return Err(Error::RegistryError(format!(
                "collection '{}' has no searchable fields",
                self.id
            )));
        }

        validate_identifier(&self.table)?;
        validate_identifier(&self.id_field)?;
        for field in self
            .searchable_fields
            .iter()
            .chain(&self.display_fields)
            .chain(&self.identifier_fields)
            .chain(self.columns.iter().flatten())
        {
            validate_identifier(field)?;
        }

        self.mapping = self.resolve_mapping()?;
        Ok(self)
    }

    fn has_column(&self, column: &str) -> bool {
        match &self.columns {
            Some(columns) => columns.iter().any(|c| c == column),
            None => true,
        }
    }

    /// Resolve one role column. Without a declared schema only the roles
    /// that drive probing (`primary`) fall back to their first alias.
    fn resolve_single(
        &self,
        hint: &Option<String>,
        aliases: &[&str],
        primary: bool,
    ) -> Result<Option<String>> {
        if let Some(column) = hint {
            validate_identifier(column)?;
            return Ok(Some(column.clone()));
        }
        let Some(columns) = &self.columns else {
            return Ok(aliases
                .first()
                .filter(|_| primary)
                .map(|alias| alias.to_string()));
        };
        Ok(aliases
            .iter()
            .find(|alias| columns.iter().any(|c| c == *alias))
            .map(|alias| alias.to_string()))
    }

    fn resolve_list(&self, hints: &[String], candidates: &[&str]) -> Result<Vec<String>> {
        if !hints.is_empty() {
            for hint in hints {
                validate_identifier(hint)?;
            }
            return Ok(hints.to_vec());
        }
        Ok(candidates
            .iter()
            .filter(|c| self.has_column(c))
            .map(|c| c.to_string())
            .collect())
    }

    fn resolve_mapping(&self) -> Result<FieldMapping> {
        let roles = &self.roles;
        Ok(FieldMapping {
            name: self.resolve_single(&roles.name, NAME_ALIASES, true)?,
            first_name: self.resolve_single(&roles.first_name, FIRST_NAME_ALIASES, false)?,
            last_name: self.resolve_single(&roles.last_name, LAST_NAME_ALIASES, false)?,
            location: self.resolve_single(&roles.location, LOCATION_ALIASES, true)?,
            state: self.resolve_single(&roles.state, STATE_ALIASES, false)?,
            regiment: self.resolve_single(&roles.regiment, REGIMENT_ALIASES, false)?,
            age: self.resolve_single(&roles.age, AGE_ALIASES, false)?,
            year: self.resolve_single(&roles.year, YEAR_ALIASES, false)?,
            enslaver: self.resolve_list(&roles.enslaver, ENSLAVER_CANDIDATES)?,
            date: self.resolve_list(&roles.date, DATE_CANDIDATES)?,
        })
    }

    /// Short reference embedded in search results
    pub fn reference(&self) -> CollectionRef {
        CollectionRef {
            id: self.id.clone(),
            slug: self.slug.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// Collection metadata attached to results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRef {
    pub id: String,
    pub slug: String,
    pub display_name: String,
}
