// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! BigQuery builtin function definitions

use super::{common, merge, params};
use crate::{FunctionMetadata, FunctionType};

/// Get all builtin BigQuery functions
pub fn all_functions() -> Vec<FunctionMetadata> {
    merge(common::all_functions(), extra_functions())
}

fn extra_functions() -> Vec<FunctionMetadata> {
    vec![
        FunctionMetadata::new("ARRAY_AGG")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("ARRAY of the input values"),
        FunctionMetadata::new("COUNTIF")
            .with_parameters(params(&["condition"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Number of rows for which `condition` is true"),
        FunctionMetadata::new("STRING_AGG")
            .with_parameters(params(&["expr", "[delimiter]"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Concatenate non-NULL values"),
        FunctionMetadata::new("SAFE_CAST")
            .with_parameters(params(&["expr AS type"]))
            .with_description("CAST that returns NULL instead of raising on failure"),
        FunctionMetadata::new("IFNULL")
            .with_parameters(params(&["expr", "null_result"]))
            .with_description("`null_result` when `expr` is NULL"),
        FunctionMetadata::new("DATE_ADD")
            .with_parameters(params(&["date", "INTERVAL n part"]))
            .with_description("Add an interval to a DATE"),
        FunctionMetadata::new("DATE_DIFF")
            .with_parameters(params(&["end_date", "start_date", "part"]))
            .with_description("Number of `part` boundaries between two dates"),
        FunctionMetadata::new("DATE_TRUNC")
            .with_parameters(params(&["date", "part"]))
            .with_description("Truncate a DATE to the given granularity")
            .with_example("date_trunc(order_date, month)"),
        FunctionMetadata::new("TIMESTAMP_TRUNC")
            .with_parameters(params(&["timestamp", "part", "[time_zone]"]))
            .with_description("Truncate a TIMESTAMP to the given granularity"),
        FunctionMetadata::new("FORMAT_DATE")
            .with_parameters(params(&["format", "date"]))
            .with_description("Format a DATE as a string"),
        FunctionMetadata::new("PARSE_DATE")
            .with_parameters(params(&["format", "string"]))
            .with_description("Parse a DATE from a string"),
        FunctionMetadata::new("GENERATE_UUID")
            .with_description("Random UUID as a STRING"),
        FunctionMetadata::new("FARM_FINGERPRINT")
            .with_parameters(params(&["expr"]))
            .with_description("INT64 fingerprint of a STRING or BYTES value"),
        FunctionMetadata::new("JSON_VALUE")
            .with_parameters(params(&["json", "[path]"]))
            .with_description("Scalar value extracted from JSON as a STRING"),
        FunctionMetadata::new("UNNEST")
            .with_parameters(params(&["array"]))
            .with_type(FunctionType::Table)
            .with_description("One row per array element"),
    ]
}
