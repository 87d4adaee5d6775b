//! Table configuration files.
//!
//! Column sets can be declared in YAML or JSON instead of code:
//!
//! ```yaml
//! page_size: 50
//! columns:
//!   - id: port
//!     path: addr.port
//!     header: Port
//!     filter: range
//!     expandable: true
//!   - id: protocol
//!     path: addr.protocol
//!     filter: select
//!     options: [TCP, UDP]
//! ```
//!
//! Every field except `id` is optional.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::column::{CellDisplay, Column};
use crate::error::{GridError, Result};
use crate::filter::FilterVariant;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_true() -> bool {
    true
}

/// Serializable description of one column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Column id, unique within a table.
    pub id: String,
    /// Dotted record path; defaults to the id.
    #[serde(default)]
    pub path: Option<String>,
    /// Header label; defaults to the id.
    #[serde(default)]
    pub header: Option<String>,
    /// Filter variant.
    #[serde(default)]
    pub filter: FilterVariant,
    /// Options for a select filter.
    #[serde(default)]
    pub options: Vec<String>,
    /// Whether the column can be sorted.
    #[serde(default = "default_true")]
    pub sortable: bool,
    /// Whether cells are expandable.
    #[serde(default)]
    pub expandable: bool,
    /// Whether a text filter ignores case.
    #[serde(default)]
    pub case_insensitive: bool,
    /// Cell display kind.
    #[serde(default)]
    pub display: CellDisplay,
    /// chrono format for datetime cells.
    #[serde(default)]
    pub date_format: Option<String>,
}

impl ColumnConfig {
    /// Creates a config with every optional field at its default.
    pub fn new(id: impl Into<String>) -> Self {
        ColumnConfig {
            id: id.into(),
            path: None,
            header: None,
            filter: FilterVariant::default(),
            options: Vec::new(),
            sortable: true,
            expandable: false,
            case_insensitive: false,
            display: CellDisplay::default(),
            date_format: None,
        }
    }

    /// Validates and converts the config into a [`Column`].
    pub fn build(&self) -> Result<Column> {
        if self.id.trim().is_empty() {
            return Err(GridError::invalid_column(&self.id, "id must not be empty"));
        }
        if !self.options.is_empty() && self.filter != FilterVariant::Select {
            return Err(GridError::invalid_column(
                &self.id,
                format!("options are only valid for select filters, not {}", self.filter),
            ));
        }
        if self.date_format.is_some() && self.display != CellDisplay::DateTime {
            return Err(GridError::invalid_column(
                &self.id,
                "date_format requires display: datetime",
            ));
        }

        let mut column = Column::new(self.id.clone())
            .filter(self.filter)
            .options(self.options.iter().cloned())
            .sortable(self.sortable)
            .expandable(self.expandable)
            .case_insensitive(self.case_insensitive)
            .display(self.display);
        if let Some(path) = &self.path {
            column = column.path(path.clone());
        }
        if let Some(header) = &self.header {
            column = column.header(header.clone());
        }
        if let Some(format) = &self.date_format {
            column = column.date_format(format.clone());
        }
        Ok(column)
    }
}

/// Serializable description of a whole table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Rows per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Column definitions in display order.
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            page_size: DEFAULT_PAGE_SIZE,
            columns: Vec::new(),
        }
    }
}

impl TableConfig {
    /// Parses a YAML config.
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parses a JSON config.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Loads a config file, choosing the parser from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let parse: fn(&str) -> Result<Self> = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml,
            "json" => Self::from_json,
            other => return Err(GridError::UnsupportedFormat(other.to_string())),
        };
        let source = std::fs::read_to_string(path).map_err(|source| GridError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("loading table config from {}", path.display());
        parse(&source)
    }

    /// Builds the columns, rejecting invalid or duplicate definitions.
    pub fn build_columns(&self) -> Result<Vec<Column>> {
        let mut seen = HashSet::new();
        self.columns
            .iter()
            .map(|config| {
                if !seen.insert(config.id.as_str()) {
                    return Err(GridError::DuplicateColumn(config.id.clone()));
                }
                config.build()
            })
            .collect()
    }
}
