//! Shaping of single rules.
//!
//! Each rule type maps to exactly one `Expectation` variant, and each variant takes only
//! the cells it understands. Blank cells are already `None` on the typed row and stay out
//! of the output.

use dqsheet_core::{
    Bound, ColumnRuleRow, CompiledRule, Expectation, NoFields, Numeric, RangeExpectation,
    RegexExpectation, RuleType, SetExpectation, SqlExpression, SqlStatement,
};

/// Builds the compiled rule for one `ColumnLevel` row.
pub fn compile_rule(row: &ColumnRuleRow) -> CompiledRule {
    CompiledRule {
        expectation: expectation(row),
        dimension: row.rule_type.dimension(),
        column: row.column.clone(),
        name: row.name.clone(),
        description: row.description.clone(),
        threshold: row.threshold.map(Numeric),
        ignore_null: row.ignore_null.as_bool(),
    }
}

fn expectation(row: &ColumnRuleRow) -> Expectation {
    match row.rule_type {
        RuleType::NotNull => Expectation::NonNull(NoFields {}),
        RuleType::Unique => Expectation::Uniqueness(NoFields {}),
        RuleType::Range => Expectation::Range(RangeExpectation {
            min_value: row.min_value.as_deref().map(Bound::parse),
            max_value: row.max_value.as_deref().map(Bound::parse),
            strict_min_enabled: row.strict_min.as_bool(),
            strict_max_enabled: row.strict_max.as_bool(),
        }),
        RuleType::Set => Expectation::Set(SetExpectation {
            values: row.set_value_list(),
        }),
        RuleType::Regex => Expectation::Regex(RegexExpectation {
            regex: row.regex.clone(),
        }),
        RuleType::SqlRow => Expectation::RowCondition(SqlExpression {
            sql_expression: row.sql_expression.clone(),
        }),
        RuleType::SqlTable => Expectation::TableCondition(SqlExpression {
            sql_expression: row.sql_expression.clone(),
        }),
        RuleType::SqlAssert => Expectation::SqlAssertion(SqlStatement {
            sql_statement: row.sql_expression.clone(),
        }),
    }
}
