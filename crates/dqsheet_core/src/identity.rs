//! Table identities and export destinations.

use crate::{Record, headers};
use std::fmt;

/// The (project, dataset, table) triple identifying a BigQuery table.
///
/// Rows of both sheets are matched and grouped by this value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableIdentity {
    /// GCP project id
    pub project: String,

    /// BigQuery dataset id
    pub dataset: String,

    /// BigQuery table name
    pub table: String,
}

impl TableIdentity {
    /// Creates an identity from its three parts.
    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            dataset: dataset.into(),
            table: table.into(),
        }
    }

    /// Reads the identity columns of a record (trimmed; blank cells become `""`).
    pub fn from_record(record: &Record<'_>) -> Self {
        Self::new(
            record.text(headers::PROJECT_ID).unwrap_or_default(),
            record.text(headers::DATASET_ID).unwrap_or_default(),
            record.text(headers::TABLE_NAME).unwrap_or_default(),
        )
    }

    /// Returns true if any part is empty.
    pub fn is_incomplete(&self) -> bool {
        self.project.is_empty() || self.dataset.is_empty() || self.table.is_empty()
    }

    /// Stem of the output document name, `project__dataset__table`.
    pub fn document_stem(&self) -> String {
        format!("{}__{}__{}", self.project, self.dataset, self.table)
    }
}

impl fmt::Display for TableIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project, self.dataset, self.table)
    }
}

/// BigQuery table that receives scan results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExportDestination {
    /// Identity of the results table
    pub table: TableIdentity,
}

impl ExportDestination {
    /// Builds a destination only when all three parts are present.
    pub fn from_parts(
        project: Option<&str>,
        dataset: Option<&str>,
        table: Option<&str>,
    ) -> Option<Self> {
        match (project, dataset, table) {
            (Some(p), Some(d), Some(t)) if !p.is_empty() && !d.is_empty() && !t.is_empty() => {
                Some(Self {
                    table: TableIdentity::new(p, d, t),
                })
            }
            _ => None,
        }
    }

    /// Resource path of the results table.
    pub fn results_table(&self) -> String {
        format!(
            "//bigquery.googleapis.com/projects/{}/datasets/{}/tables/{}",
            self.table.project, self.table.dataset, self.table.table
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stem_and_display() {
        let id = TableIdentity::new("p", "d", "t");
        assert_eq!(id.document_stem(), "p__d__t");
        assert_eq!(id.to_string(), "p.d.t");
    }

    #[test]
    fn test_incomplete_identity() {
        assert!(TableIdentity::new("p", "", "t").is_incomplete());
        assert!(!TableIdentity::new("p", "d", "t").is_incomplete());
    }

    #[test]
    fn test_export_destination_requires_all_parts() {
        assert!(ExportDestination::from_parts(Some("p"), Some("d"), None).is_none());
        assert!(ExportDestination::from_parts(Some("p"), Some(""), Some("t")).is_none());
        assert!(ExportDestination::from_parts(None, None, None).is_none());

        let dest = ExportDestination::from_parts(Some("p"), Some("d"), Some("t")).unwrap();
        assert_eq!(
            dest.results_table(),
            "//bigquery.googleapis.com/projects/p/datasets/d/tables/t"
        );
    }
}
