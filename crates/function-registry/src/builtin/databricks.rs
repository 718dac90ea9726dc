// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Databricks builtin function definitions

use super::{common, merge, params};
use crate::{FunctionMetadata, FunctionType};

/// Get all builtin Databricks functions
pub fn all_functions() -> Vec<FunctionMetadata> {
    merge(common::all_functions(), extra_functions())
}

fn extra_functions() -> Vec<FunctionMetadata> {
    vec![
        FunctionMetadata::new("COLLECT_LIST")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Array of the values in the group"),
        FunctionMetadata::new("COLLECT_SET")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Array of the distinct values in the group"),
        FunctionMetadata::new("COUNT_IF")
            .with_parameters(params(&["condition"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Number of rows for which `condition` is true"),
        FunctionMetadata::new("NVL")
            .with_parameters(params(&["expr1", "expr2"]))
            .with_description("`expr2` when `expr1` is NULL"),
        FunctionMetadata::new("IF")
            .with_parameters(params(&["condition", "true_expr", "false_expr"]))
            .with_description("`true_expr` when `condition` is true, else `false_expr`"),
        FunctionMetadata::new("DATE_ADD")
            .with_parameters(params(&["start_date", "num_days"]))
            .with_description("Date `num_days` after `start_date`"),
        FunctionMetadata::new("DATEDIFF")
            .with_parameters(params(&["end_date", "start_date"]))
            .with_description("Number of days between two dates"),
        FunctionMetadata::new("DATE_TRUNC")
            .with_parameters(params(&["unit", "expr"]))
            .with_description("Timestamp truncated to `unit`"),
        FunctionMetadata::new("TO_DATE")
            .with_parameters(params(&["expr", "[format]"]))
            .with_description("Parse a DATE, optionally with a format"),
        FunctionMetadata::new("FROM_JSON")
            .with_parameters(params(&["json", "schema", "[options]"]))
            .with_description("Struct parsed from a JSON string"),
        FunctionMetadata::new("EXPLODE")
            .with_parameters(params(&["collection"]))
            .with_type(FunctionType::Table)
            .with_description("One row per element of an array or map"),
    ]
}
