//! Document rendering.

use crate::{CompiledTables, RenderError, Result};
use dqsheet_core::{CompiledTableSpec, TableIdentity};
use serde::Serialize;
use tracing::debug;

/// A compiled document ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    /// Document name, e.g. `p__d__t.yaml`
    pub name: String,

    /// Table the document configures
    #[serde(skip)]
    pub identity: TableIdentity,

    /// YAML text
    pub content: String,
}

/// Renders one spec as YAML.
pub fn render_yaml(spec: &CompiledTableSpec) -> Result<String> {
    serde_yaml_ng::to_string(spec).map_err(|source| RenderError::Yaml {
        document: spec.document_name.clone(),
        source,
    })
}

/// Renders every compiled spec, in compilation order.
pub fn render_documents(compiled: &CompiledTables) -> Result<Vec<RenderedDocument>> {
    compiled
        .values()
        .map(|spec| {
            let content = render_yaml(spec)?;
            debug!(document = %spec.document_name, bytes = content.len(), "Rendered document");
            Ok(RenderedDocument {
                name: spec.document_name.clone(),
                identity: spec.identity.clone(),
                content,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleCompiler;
    use dqsheet_core::{ColumnRuleBuilder, RuleSheetBuilder, TableRuleBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_full_document() {
        let sheet = RuleSheetBuilder::new()
            .column_rule(
                ColumnRuleBuilder::new("p", "d", "t")
                    .column("id")
                    .rule_name("id_present")
                    .rule_type("NOT_NULL")
                    .ignore_null("FALSE"),
            )
            .column_rule(
                ColumnRuleBuilder::new("p", "d", "t")
                    .column("status")
                    .rule_type("SET")
                    .set_values("A,B")
                    .threshold("0.5"),
            )
            .table_rule(
                TableRuleBuilder::new("p", "d", "t")
                    .row_filter("day = CURRENT_DATE()")
                    .sampling_percent("20")
                    .export("ep", "ed", "et"),
            )
            .build();

        let compiled = RuleCompiler::new().compile_sheet(&sheet);
        let yaml = render_yaml(&compiled[0]).unwrap();

        let expected = "\
rowFilter: day = CURRENT_DATE()
samplingPercent: 20
rules:
- nonNullExpectation: {}
  dimension: COMPLETENESS
  column: id
  name: id_present
  ignoreNull: false
- setExpectation:
    values:
    - A
    - B
  dimension: VALIDITY
  column: status
  threshold: 0.5
postScanActions:
  bigqueryExport:
    resultsTable: //bigquery.googleapis.com/projects/ep/datasets/ed/tables/et
";
        assert_eq!(yaml, expected);
    }

    #[test]
    fn test_render_documents_keeps_order() {
        let sheet = RuleSheetBuilder::new()
            .column_rule(ColumnRuleBuilder::new("p", "d", "z").rule_type("UNIQUE"))
            .column_rule(ColumnRuleBuilder::new("p", "d", "a").rule_type("UNIQUE"))
            .build();

        let documents = render_documents(&RuleCompiler::new().compile_sheet(&sheet)).unwrap();
        let names: Vec<&str> = documents.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["p__d__z.yaml", "p__d__a.yaml"]);
        assert_eq!(
            documents[0].content,
            "rules:\n- uniquenessExpectation: {}\n  dimension: UNIQUENESS\n"
        );
    }
}
