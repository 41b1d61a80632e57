//! Output document naming.

use dqsheet_core::TableIdentity;

/// File extension of every output document.
pub const DOCUMENT_EXTENSION: &str = "yaml";

/// Name of the document for a table, e.g. `p__d__t__0_star_star_star_star.yaml`.
///
/// A non-blank schedule is appended after `__` with `*` spelled as `star` and spaces as
/// underscores.
pub fn document_name(identity: &TableIdentity, schedule: Option<&str>) -> String {
    let stem = identity.document_stem();
    match schedule.map(str::trim).filter(|s| !s.is_empty()) {
        Some(schedule) => format!(
            "{stem}__{}.{DOCUMENT_EXTENSION}",
            schedule_suffix(schedule)
        ),
        None => format!("{stem}.{DOCUMENT_EXTENSION}"),
    }
}

fn schedule_suffix(schedule: &str) -> String {
    schedule.replace('*', "star").replace(' ', "_")
}
