//! Rule compilation.
//!
//! Groups `ColumnLevel` rows by table, attaches the table's `TableLevel` settings and
//! produces one `CompiledTableSpec` per table. Groups and the rules inside them keep the
//! order in which they first appear in the sheet.

use crate::{compile_rule, document_name};
use dqsheet_core::{
    ColumnRuleRow, CompiledRule, CompiledTableSpec, Numeric, PostScanActions, RuleSheet,
    TableIdentity, TableRuleRow,
};
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Compiled documents keyed by table, in first-seen order.
pub type CompiledTables = IndexMap<TableIdentity, CompiledTableSpec>;

/// Rules collected for one table while scanning the sheet.
#[derive(Debug)]
struct TableGroup<'a> {
    identity: &'a TableIdentity,
    rules: Vec<CompiledRule>,
}

impl<'a> TableGroup<'a> {
    fn new(identity: &'a TableIdentity) -> Self {
        Self {
            identity,
            rules: Vec::new(),
        }
    }

    fn finish(self, settings: Option<&TableRuleRow>) -> CompiledTableSpec {
        let identity = self.identity.clone();
        let schedule = settings.and_then(|s| s.schedule.as_deref());

        CompiledTableSpec {
            document_name: document_name(&identity, schedule),
            identity,
            row_filter: settings.and_then(|s| s.row_filter.clone()),
            sampling_percent: settings.and_then(|s| s.sampling_percent).map(Numeric),
            rules: self.rules,
            post_scan_actions: settings
                .and_then(TableRuleRow::export_destination)
                .map(|dest| PostScanActions::export_to(dest.results_table())),
        }
    }
}

/// Compiles typed rule rows into per-table documents.
///
/// The compiler trusts its input: rows are expected to have passed validation, and
/// nothing is re-checked here.
///
/// # Example
///
/// ```rust
/// use dqsheet_compiler::RuleCompiler;
/// use dqsheet_core::{ColumnRuleBuilder, RuleSheetBuilder, TableRuleBuilder};
///
/// let sheet = RuleSheetBuilder::new()
///     .column_rule(ColumnRuleBuilder::new("p", "d", "t").column("id").rule_type("UNIQUE"))
///     .table_rule(TableRuleBuilder::new("p", "d", "t").schedule("0 * * * *"))
///     .build();
///
/// let compiled = RuleCompiler::new().compile_sheet(&sheet);
/// let spec = compiled.values().next().unwrap();
/// assert_eq!(spec.document_name, "p__d__t__0_star_star_star_star.yaml");
/// ```
#[derive(Debug, Default)]
pub struct RuleCompiler;

impl RuleCompiler {
    /// Creates a new compiler.
    pub fn new() -> Self {
        Self
    }

    /// Compiles rows into one spec per distinct table of `column_rows`.
    ///
    /// When several `TableLevel` rows name the same table, the first one is used.
    /// `TableLevel` rows for tables without rules are ignored.
    pub fn compile(
        &self,
        column_rows: &[ColumnRuleRow],
        table_rows: &[TableRuleRow],
    ) -> CompiledTables {
        let mut settings: HashMap<&TableIdentity, &TableRuleRow> = HashMap::new();
        for row in table_rows {
            settings.entry(&row.identity).or_insert(row);
        }

        let mut groups: IndexMap<&TableIdentity, TableGroup<'_>> = IndexMap::new();
        for row in column_rows {
            groups
                .entry(&row.identity)
                .or_insert_with(|| TableGroup::new(&row.identity))
                .rules
                .push(compile_rule(row));
        }

        let compiled: CompiledTables = groups
            .into_iter()
            .map(|(identity, group)| {
                let spec = group.finish(settings.get(identity).copied());
                debug!(
                    table = %spec.identity,
                    rules = spec.rules.len(),
                    document = %spec.document_name,
                    "Compiled table"
                );
                (spec.identity.clone(), spec)
            })
            .collect();

        info!(tables = compiled.len(), "Compiled rule sheet");
        compiled
    }

    /// Compiles a rule sheet without validating it first.
    ///
    /// Rows whose rule type is unknown are skipped; other malformed cells are read as
    /// blank. Validate the sheet first when a faithful result matters.
    pub fn compile_sheet(&self, sheet: &RuleSheet) -> CompiledTables {
        let column_rows: Vec<ColumnRuleRow> = sheet
            .column_level
            .records()
            .filter_map(|record| {
                let row = ColumnRuleRow::from_record(&record);
                if row.is_none() {
                    warn!(row = record.number(), "Skipping row with unknown rule type");
                }
                row
            })
            .collect();

        let table_rows: Vec<TableRuleRow> = sheet
            .table_level
            .records()
            .map(|record| TableRuleRow::from_record(&record))
            .collect();

        self.compile(&column_rows, &table_rows)
    }
}
