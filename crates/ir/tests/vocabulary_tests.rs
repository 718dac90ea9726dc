// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Tests for the shared vocabulary types as other crates consume them

use dbt_lsp_ir::{Dialect, FunctionMetadata, FunctionParameter, FunctionType};

#[test]
fn test_every_dialect_round_trips_through_its_name() {
    for dialect in [
        Dialect::Snowflake,
        Dialect::Postgres,
        Dialect::Redshift,
        Dialect::BigQuery,
        Dialect::Databricks,
        Dialect::DuckDb,
        Dialect::Generic,
    ] {
        assert_eq!(dialect.as_str().parse::<Dialect>().unwrap(), dialect);
        assert_eq!(dialect.to_string(), dialect.as_str());
    }
}

#[test]
fn test_profile_type_is_trimmed_and_case_insensitive() {
    assert_eq!(Dialect::from_profile_type("  BigQuery "), Dialect::BigQuery);
    assert_eq!(Dialect::from_profile_type("DUCKDB"), Dialect::DuckDb);
}

#[test]
fn test_function_metadata_serializes_for_clients() {
    let func = FunctionMetadata::new("IFF")
        .with_parameters(vec![
            FunctionParameter::required("condition"),
            FunctionParameter::required("expr1"),
            FunctionParameter::required("expr2"),
        ])
        .with_description("Inline if");
    let value = serde_json::to_value(&func).unwrap();
    assert_eq!(value["name"], "IFF");
    assert_eq!(value["function_type"], "Scalar");
    assert_eq!(value["parameters"].as_array().unwrap().len(), 3);
    assert_eq!(func.function_type, FunctionType::Scalar);
}
