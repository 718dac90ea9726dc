// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Snowflake builtin function definitions

use super::{common, merge, params};
use crate::{FunctionMetadata, FunctionType};

/// Get all builtin Snowflake functions
pub fn all_functions() -> Vec<FunctionMetadata> {
    merge(common::all_functions(), extra_functions())
}

fn extra_functions() -> Vec<FunctionMetadata> {
    vec![
        // Aggregate functions
        FunctionMetadata::new("ANY_VALUE")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Some value of `expr` from the group, nondeterministic"),
        FunctionMetadata::new("ARRAY_AGG")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Pivot the input values into an ARRAY"),
        FunctionMetadata::new("COUNT_IF")
            .with_parameters(params(&["condition"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Number of rows for which `condition` is true"),
        FunctionMetadata::new("LISTAGG")
            .with_parameters(params(&["expr", "[delimiter]"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Concatenate the input values, separated by `delimiter`")
            .with_example("listagg(product_name, ', ') within group (order by product_name)"),
        FunctionMetadata::new("MEDIAN")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Median of the input values"),
        FunctionMetadata::new("OBJECT_AGG")
            .with_parameters(params(&["key", "value"]))
            .with_type(FunctionType::Aggregate)
            .with_description("One OBJECT built from key/value pairs of the group"),
        // Window functions
        FunctionMetadata::new("CONDITIONAL_CHANGE_EVENT")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Window)
            .with_description("Window event number, incremented each time `expr` changes"),
        FunctionMetadata::new("RATIO_TO_REPORT")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Window)
            .with_description("Ratio of a value to the sum of values in the partition"),
        // Conditional functions
        FunctionMetadata::new("IFF")
            .with_parameters(params(&["condition", "expr1", "expr2"]))
            .with_description("`expr1` when `condition` is true, else `expr2`")
            .with_example("iff(amount > 0, 'credit', 'debit')"),
        FunctionMetadata::new("NVL")
            .with_parameters(params(&["expr1", "expr2"]))
            .with_description("`expr2` when `expr1` is NULL"),
        FunctionMetadata::new("NVL2")
            .with_parameters(params(&["expr1", "expr2", "expr3"]))
            .with_description("`expr2` when `expr1` is not NULL, else `expr3`"),
        FunctionMetadata::new("ZEROIFNULL")
            .with_parameters(params(&["expr"]))
            .with_description("0 when `expr` is NULL"),
        FunctionMetadata::new("DECODE")
            .with_parameters(params(&["expr", "search", "result", "default..."]))
            .with_description("Compare `expr` to each search value in turn and return the matching result"),
        // Conversion functions
        FunctionMetadata::new("TRY_CAST")
            .with_parameters(params(&["expr AS type"]))
            .with_description("CAST that returns NULL instead of raising on failure"),
        FunctionMetadata::new("TO_DATE")
            .with_parameters(params(&["expr", "[format]"]))
            .with_description("Convert to a DATE"),
        FunctionMetadata::new("TO_TIMESTAMP")
            .with_parameters(params(&["expr", "[scale]"]))
            .with_description("Convert to a TIMESTAMP using the session TIMESTAMP_TYPE_MAPPING"),
        FunctionMetadata::new("TO_VARCHAR")
            .with_parameters(params(&["expr", "[format]"]))
            .with_description("Convert to a string"),
        FunctionMetadata::new("TO_NUMBER")
            .with_parameters(params(&["expr", "[format]", "[precision]", "[scale]"]))
            .with_description("Convert to a fixed-point number"),
        // Date and time functions
        FunctionMetadata::new("DATEADD")
            .with_parameters(params(&["date_or_time_part", "value", "date_or_time_expr"]))
            .with_description("Add `value` units of `date_or_time_part` to a date or time")
            .with_example("dateadd(day, -7, current_date)"),
        FunctionMetadata::new("DATEDIFF")
            .with_parameters(params(&["date_or_time_part", "expr1", "expr2"]))
            .with_description("Number of `date_or_time_part` boundaries between two dates"),
        FunctionMetadata::new("DATE_TRUNC")
            .with_parameters(params(&["date_or_time_part", "date_or_time_expr"]))
            .with_description("Truncate a date or time to the given precision"),
        FunctionMetadata::new("CONVERT_TIMEZONE")
            .with_parameters(params(&["[source_tz]", "target_tz", "timestamp"]))
            .with_description("Convert a timestamp to another time zone"),
        FunctionMetadata::new("LAST_DAY")
            .with_parameters(params(&["date_or_time_expr", "[date_part]"]))
            .with_description("Last day of the period containing the date"),
        // Semi-structured data
        FunctionMetadata::new("PARSE_JSON")
            .with_parameters(params(&["expr"]))
            .with_description("Parse a JSON string into a VARIANT"),
        FunctionMetadata::new("OBJECT_CONSTRUCT")
            .with_parameters(params(&["key_value..."]))
            .with_description("OBJECT built from alternating key and value arguments"),
        FunctionMetadata::new("ARRAY_SIZE")
            .with_parameters(params(&["array"]))
            .with_description("Number of elements in an ARRAY"),
        FunctionMetadata::new("FLATTEN")
            .with_parameters(params(&["input", "[path]", "[outer]", "[recursive]", "[mode]"]))
            .with_type(FunctionType::Table)
            .with_description("Explode a VARIANT, OBJECT or ARRAY into rows"),
        // String functions
        FunctionMetadata::new("SPLIT_PART")
            .with_parameters(params(&["string", "delimiter", "part_number"]))
            .with_description("Part of a string split on `delimiter`, 1-based"),
        FunctionMetadata::new("REGEXP_SUBSTR")
            .with_parameters(params(&["subject", "pattern", "[position]", "[occurrence]"]))
            .with_description("Substring matching a regular expression"),
        FunctionMetadata::new("MD5")
            .with_parameters(params(&["expr"]))
            .with_description("32-character hex MD5 digest"),
        FunctionMetadata::new("HASH")
            .with_parameters(params(&["expr..."]))
            .with_description("Signed 64-bit hash of the arguments"),
        FunctionMetadata::new("UUID_STRING")
            .with_description("Random RFC 4122 UUID as a string"),
    ]
}
