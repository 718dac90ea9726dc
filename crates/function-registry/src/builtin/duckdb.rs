// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! DuckDB builtin function definitions

use super::{common, merge, params};
use crate::{FunctionMetadata, FunctionType};

/// Get all builtin DuckDB functions
pub fn all_functions() -> Vec<FunctionMetadata> {
    merge(common::all_functions(), extra_functions())
}

fn extra_functions() -> Vec<FunctionMetadata> {
    vec![
        FunctionMetadata::new("LIST")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("List of the values in the group"),
        FunctionMetadata::new("STRING_AGG")
            .with_parameters(params(&["expr", "[separator]"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Concatenate values with a separator"),
        FunctionMetadata::new("ARG_MAX")
            .with_parameters(params(&["arg", "val"]))
            .with_type(FunctionType::Aggregate)
            .with_description("`arg` of the row with the maximum `val`"),
        FunctionMetadata::new("ARG_MIN")
            .with_parameters(params(&["arg", "val"]))
            .with_type(FunctionType::Aggregate)
            .with_description("`arg` of the row with the minimum `val`"),
        FunctionMetadata::new("DATE_TRUNC")
            .with_parameters(params(&["part", "date"]))
            .with_description("Truncate to the given precision"),
        FunctionMetadata::new("DATE_DIFF")
            .with_parameters(params(&["part", "startdate", "enddate"]))
            .with_description("Number of `part` boundaries between two dates"),
        FunctionMetadata::new("STRFTIME")
            .with_parameters(params(&["timestamp", "format"]))
            .with_description("Format a timestamp as a string"),
        FunctionMetadata::new("TRY_CAST")
            .with_parameters(params(&["expr AS type"]))
            .with_description("CAST that returns NULL instead of raising on failure"),
        FunctionMetadata::new("READ_CSV_AUTO")
            .with_parameters(params(&["path", "[options]"]))
            .with_type(FunctionType::Table)
            .with_description("Read a CSV file, detecting the dialect and column types"),
        FunctionMetadata::new("READ_PARQUET")
            .with_parameters(params(&["path"]))
            .with_type(FunctionType::Table)
            .with_description("Read one or more Parquet files"),
        FunctionMetadata::new("UNNEST")
            .with_parameters(params(&["list"]))
            .with_type(FunctionType::Table)
            .with_description("One row per list element"),
    ]
}
