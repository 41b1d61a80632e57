//! End-to-end compilation of validated rule sheets.

use dqsheet_compiler::{RuleCompiler, render_documents};
use dqsheet_core::{ColumnRuleBuilder, RuleSheet, RuleSheetBuilder, TableRuleBuilder};
use dqsheet_validator::RuleSheetValidator;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

fn compile(sheet: &RuleSheet) -> Vec<(String, String)> {
    let validated = RuleSheetValidator::new()
        .check(sheet)
        .expect("sheet should be valid");
    let compiled = RuleCompiler::new().compile(&validated.column_rows, &validated.table_rows);
    render_documents(&compiled)
        .unwrap()
        .into_iter()
        .map(|doc| (doc.name, doc.content))
        .collect()
}

#[test]
fn test_hourly_range_and_unique_scenario() {
    let sheet = RuleSheetBuilder::new()
        .column_rule(
            ColumnRuleBuilder::new("p", "d", "t")
                .column("amount")
                .rule_type("RANGE")
                .min_value("0")
                .max_value("100"),
        )
        .column_rule(
            ColumnRuleBuilder::new("p", "d", "t")
                .column("id")
                .rule_type("UNIQUE"),
        )
        .table_rule(
            TableRuleBuilder::new("p", "d", "t")
                .sampling_percent("50")
                .schedule("0 * * * *"),
        )
        .build();

    let documents = compile(&sheet);

    assert_eq!(
        documents,
        vec![(
            "p__d__t__0_star_star_star_star.yaml".to_string(),
            "\
samplingPercent: 50
rules:
- rangeExpectation:
    minValue: 0
    maxValue: 100
  dimension: VALIDITY
  column: amount
- uniquenessExpectation: {}
  dimension: UNIQUENESS
  column: id
"
            .to_string()
        )]
    );
}

fn multi_table_sheet() -> RuleSheet {
    RuleSheetBuilder::new()
        .column_rule(ColumnRuleBuilder::new("p", "sales", "orders").column("id").rule_type("NOT_NULL"))
        .column_rule(ColumnRuleBuilder::new("p", "sales", "customers").column("email").rule_type("REGEX").regex("@"))
        .column_rule(ColumnRuleBuilder::new("p", "sales", "orders").column("id").rule_type("UNIQUE"))
        .column_rule(
            ColumnRuleBuilder::new("p", "sales", "orders")
                .rule_type("SQL_ASSERT")
                .sql("SELECT id FROM orders WHERE total < 0"),
        )
        .column_rule(ColumnRuleBuilder::new("q", "ops", "events").rule_type("SQL_TABLE").sql("COUNT(*) > 10"))
        .table_rule(
            TableRuleBuilder::new("p", "sales", "orders")
                .row_filter("order_date = CURRENT_DATE()")
                .export("p", "dq", "results"),
        )
        .table_rule(TableRuleBuilder::new("q", "ops", "events").export("p", "", "results"))
        .build()
}

#[test]
fn test_one_document_per_table() {
    let sheet = multi_table_sheet();
    let documents = compile(&sheet);

    let tables: HashSet<String> = sheet
        .column_level
        .records()
        .map(|r| dqsheet_core::TableIdentity::from_record(&r).to_string())
        .collect();
    assert_eq!(documents.len(), tables.len());

    let names: Vec<&str> = documents.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "p__sales__orders.yaml",
            "p__sales__customers.yaml",
            "q__ops__events.yaml"
        ]
    );
}

#[test]
fn test_rule_order_and_sql_keys() {
    let documents = compile(&multi_table_sheet());
    let orders = &documents[0].1;

    let non_null = orders.find("nonNullExpectation").unwrap();
    let unique = orders.find("uniquenessExpectation").unwrap();
    let assertion = orders.find("sqlAssertion").unwrap();
    assert!(non_null < unique && unique < assertion);

    assert!(orders.contains("sqlStatement: SELECT id FROM orders WHERE total < 0"));
    assert!(!orders.contains("sqlExpression"));
    assert!(
        orders.contains("resultsTable: //bigquery.googleapis.com/projects/p/datasets/dq/tables/results")
    );

    let events = &documents[2].1;
    assert!(events.contains("tableConditionExpectation:\n    sqlExpression: COUNT(*) > 10"));
    assert!(!events.contains("postScanActions"));
}

#[test]
fn test_blank_cells_are_omitted() {
    let documents = compile(&multi_table_sheet());
    for (name, content) in &documents {
        for key in ["threshold", "ignoreNull", "description", "name:", "samplingPercent"] {
            assert!(!content.contains(key), "{name} unexpectedly contains {key}");
        }
        assert!(!content.contains("null"), "{name} contains a null value");
        assert!(!content.contains("''"), "{name} contains an empty value");
    }
}

#[test]
fn test_compilation_is_idempotent() {
    let sheet = multi_table_sheet();
    assert_eq!(compile(&sheet), compile(&sheet));
}
