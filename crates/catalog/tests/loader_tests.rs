// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for loading a catalog from a project on disk

use dbt_lsp_catalog::{
    CatalogError, CatalogSource, FsCatalogSource, ProfileSearch, SEED_DESCRIPTION,
};
use dbt_lsp_ir::{Dialect, SourcePosition};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// A small jaffle_shop-shaped project with one installed package
fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(
        root,
        "dbt_project.yml",
        "name: jaffle_shop\nprofile: jaffle_shop\nconfig-version: 2\n\nvars:\n  start_date: '2018-01-01'\n  jaffle_shop:\n    payment_methods: ['credit_card', 'coupon']\n",
    );
    write(
        root,
        "profiles.yml",
        "jaffle_shop:\n  target: dev\n  outputs:\n    dev:\n      type: snowflake\n",
    );
    write(root, "models/orders.sql", "select * from {{ ref('stg_orders') }}\n");
    write(root, "models/staging/stg_orders.sql", "select * from {{ source('raw', 'orders') }}\n");
    write(
        root,
        "models/schema.yml",
        "version: 2\n\nmodels:\n  - name: orders\n    description: '{{ doc(\"orders\") }}'\n    columns:\n      - name: order_id\n",
    );
    write(
        root,
        "models/staging/sources.yml",
        "version: 2\n\nsources:\n  - name: raw\n    description: Raw application data\n    tables:\n      - name: orders\n        description: One row per order\n      - name: customers\n",
    );
    write(root, "models/docs.md", "{% docs orders %}\nOrders placed by customers.\n{% enddocs %}\n");
    write(root, "seeds/raw_payments.csv", "id,amount\n1,100\n");
    write(
        root,
        "macros/cents_to_dollars.sql",
        "{% macro cents_to_dollars(column_name) %}\n({{ column_name }} / 100)\n{% endmacro %}\n",
    );

    write(
        root,
        "dbt_packages/dbt_utils/dbt_project.yml",
        "name: dbt_utils\nmacro-paths: [\"macros\"]\n",
    );
    write(
        root,
        "dbt_packages/dbt_utils/macros/star.sql",
        "{%- macro star(from, relation_alias=False) -%}\n{%- endmacro %}\n",
    );
    write(root, "dbt_packages/dbt_utils/models/orders.sql", "select 1\n");
    write(root, "dbt_packages/dbt_utils/models/utils_model.sql", "select 1\n");

    dir
}

/// Route loader logs to the test output; filter with `RUST_LOG`
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn source_for(dir: &Path) -> FsCatalogSource {
    init_tracing();
    FsCatalogSource::new(dir).with_profile_search(ProfileSearch::default())
}

#[tokio::test]
async fn test_load_full_project() {
    let dir = fixture();
    let catalog = source_for(&dir.path().join("models/staging")).load().await.unwrap();

    assert_eq!(catalog.project_name, "jaffle_shop");
    assert_eq!(catalog.project_root, dir.path());
    assert_eq!(catalog.dialect, Dialect::Snowflake);

    let orders = catalog.model("orders").unwrap();
    assert_eq!(orders.package, "jaffle_shop");
    assert_eq!(orders.description, "Orders placed by customers.");
    assert_eq!(orders.path, dir.path().join("models/orders.sql"));
    let schema = orders.schema.as_ref().unwrap();
    assert_eq!(schema.range.start, SourcePosition::new(3, 10));

    assert_eq!(catalog.model("raw_payments").unwrap().description, SEED_DESCRIPTION);
    assert_eq!(catalog.model("utils_model").unwrap().package, "dbt_utils");
}

#[tokio::test]
async fn test_sources_and_tables() {
    let dir = fixture();
    let catalog = source_for(dir.path()).load().await.unwrap();

    let raw = catalog.source("raw").unwrap();
    assert_eq!(raw.description, "Raw application data");
    assert_eq!(raw.range.start, SourcePosition::new(3, 10));
    assert_eq!(raw.tables.len(), 2);

    let orders = catalog.source_table("raw", "orders").unwrap();
    assert_eq!(orders.description, "One row per order");
    assert_eq!(orders.range.start, SourcePosition::new(6, 14));
    assert_eq!(catalog.source_table("raw", "customers").unwrap().description, "");
}

#[tokio::test]
async fn test_macros_keyed_by_package() {
    let dir = fixture();
    let catalog = source_for(dir.path()).load().await.unwrap();

    let local = catalog.macro_in("jaffle_shop", "cents_to_dollars").unwrap();
    assert_eq!(local.description, "cents_to_dollars(column_name)");
    assert_eq!(local.range.start, SourcePosition::new(0, 9));

    let star = catalog.macro_in("dbt_utils", "star").unwrap();
    assert_eq!(star.description, "star(from, relation_alias=False)");
    assert!(catalog.macro_in("jaffle_shop", "star").is_none());
}

#[tokio::test]
async fn test_variables_with_project_scope() {
    let dir = fixture();
    let catalog = source_for(dir.path()).load().await.unwrap();

    let start = catalog.variable("start_date").unwrap();
    assert_eq!(start.value, "2018-01-01");
    assert_eq!(start.range.start, SourcePosition::new(5, 2));

    let methods = catalog.variable("payment_methods").unwrap();
    assert_eq!(methods.value, "- credit_card\n- coupon");
    assert!(catalog.variable("jaffle_shop").is_none());
}

#[tokio::test]
async fn test_root_project_wins_model_collisions() {
    let dir = fixture();
    let catalog = source_for(dir.path()).load().await.unwrap();
    assert_eq!(catalog.model("orders").unwrap().package, "jaffle_shop");
}

#[tokio::test]
async fn test_missing_profile_falls_back_to_generic() {
    let dir = fixture();
    fs::remove_file(dir.path().join("profiles.yml")).unwrap();
    let catalog = source_for(dir.path()).load().await.unwrap();
    assert_eq!(catalog.dialect, Dialect::Generic);
    assert!(!catalog.models.is_empty());
}

#[tokio::test]
async fn test_no_project() {
    let dir = tempfile::tempdir().unwrap();
    let result = source_for(dir.path()).load().await;
    assert!(matches!(result, Err(CatalogError::ProjectNotFound { .. })));
}

#[tokio::test]
async fn test_broken_package_is_skipped() {
    let dir = fixture();
    write(dir.path(), "dbt_packages/broken/dbt_project.yml", "name: [unterminated\n");
    let catalog = source_for(dir.path()).load().await.unwrap();

    assert!(catalog.model("utils_model").is_some());
    assert!(!catalog.macros.contains_key("broken"));
}
