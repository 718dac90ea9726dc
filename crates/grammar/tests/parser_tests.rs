// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Parser and token index integration tests
//!
//! Properties that must hold for any document: reclassification counts,
//! CTE ordering, and consistency between the index and the raw stream.

use dbt_lsp_grammar::{TokenIndex, TokenKind, TokenLookupError, parse};
use dbt_lsp_ir::Dialect;

const JAFFLE_ORDERS: &str = r#"{% set payment_methods = ['credit_card', 'coupon', 'bank_transfer', 'gift_card'] %}

with orders as (

    select * from {{ ref('stg_orders') }}

),

payments as (

    select * from {{ ref('stg_payments') }}

),

order_payments as (

    select
        order_id,

        {% for payment_method in payment_methods -%}
        sum(case when payment_method = '{{ payment_method }}' then amount else 0 end) as {{ payment_method }}_amount,
        {% endfor -%}

        sum(amount) as total_amount

    from payments

    group by order_id

)

select * from orders
left join order_payments
    on orders.order_id = order_payments.order_id
"#;

#[test]
fn test_every_ref_occurrence_is_reclassified_at_identifier_position() {
    let mut text = String::new();
    let mut expected = Vec::new();
    for line in 0..25u32 {
        let prefix = " ".repeat(line as usize % 7);
        text.push_str(&format!("{prefix}select * from {{{{ ref('model_{line}') }}}}\n"));
        // `{{ ref('` is 8 characters wide and starts after `select * from `
        expected.push((line, prefix.len() as u32 + 14 + 8));
    }

    let output = parse(&text, Dialect::Snowflake);
    let refs: Vec<(u32, u32)> = output
        .stream
        .iter()
        .filter(|(_, t)| t.kind == TokenKind::Ref)
        .map(|(_, t)| (t.line, t.column))
        .collect();

    assert_eq!(refs, expected);
}

#[test]
fn test_cte_names_in_declaration_order() {
    let output = parse(JAFFLE_ORDERS, Dialect::Snowflake);
    assert_eq!(
        output.cte_names().collect::<Vec<_>>(),
        vec!["orders", "payments", "order_payments"]
    );
}

#[test]
fn test_definitions_point_at_cte_name() {
    let output = parse(JAFFLE_ORDERS, Dialect::Snowflake);
    let defs = output.definitions();
    let token = output.stream.get(defs["payments"]).unwrap();
    assert_eq!((token.line, token.column), (8, 0));
}

#[test]
fn test_index_agrees_with_stream_for_every_token() {
    let output = parse(JAFFLE_ORDERS, Dialect::Snowflake);
    let expected: Vec<_> = output.stream.iter().map(|(id, t)| (id, t.clone())).collect();
    let index = TokenIndex::new(output.stream);

    for (id, token) in expected {
        let found = index
            .find_token_at(token.line, token.column)
            .unwrap_or_else(|e| panic!("{token:?} not found: {e}"));
        assert_eq!(found.id(), id);
        assert_eq!(found.token(), &token);
    }
}

#[test]
fn test_index_line_buckets_are_sorted_and_disjoint() {
    let output = parse(JAFFLE_ORDERS, Dialect::Snowflake);
    let index = TokenIndex::new(output.stream);
    for line in 0..50 {
        let tokens = index.line_tokens(line);
        for pair in tokens.windows(2) {
            assert!(pair[0].end_column() <= pair[1].column, "{pair:?} overlap");
        }
    }
}

#[test]
fn test_misses_never_return_a_neighbour() {
    let index = TokenIndex::new(parse("select  a ,  b\n\n  from t", Dialect::Snowflake).stream);

    assert_eq!(
        index.find_token_at(0, 6).unwrap_err(),
        TokenLookupError::NoTokenAtColumn { line: 0, column: 6 }
    );
    assert_eq!(
        index.find_token_at(0, 11).unwrap_err(),
        TokenLookupError::NoTokenAtColumn { line: 0, column: 11 }
    );
    assert_eq!(
        index.find_token_at(1, 0).unwrap_err(),
        TokenLookupError::EmptyLine { line: 1 }
    );
    assert_eq!(
        index.find_token_at(2, 1).unwrap_err(),
        TokenLookupError::NoTokenAtColumn { line: 2, column: 1 }
    );
    assert_eq!(
        index.find_token_at(9, 0).unwrap_err(),
        TokenLookupError::EmptyLine { line: 9 }
    );
}

#[test]
fn test_var_column_after_opening_quote() {
    let text = "{% set v = var('x') %}";
    let output = parse(text, Dialect::Snowflake);
    let var = output
        .stream
        .iter()
        .find(|(_, t)| t.kind == TokenKind::Var)
        .map(|(_, t)| t.clone())
        .unwrap();
    assert_eq!(var.literal, "x");
    let quote = text.find('\'').unwrap() as u32;
    assert_eq!(var.column, quote + 1);
}

#[test]
fn test_macro_lookback_lands_on_package() {
    let output = parse("{{ pkg.my_macro(x) }}", Dialect::Snowflake);
    let index = TokenIndex::new(output.stream);
    let macro_token = index.find_token_at(0, 8).unwrap();
    assert_eq!(macro_token.kind(), TokenKind::Macro);
    assert_eq!(macro_token.literal(), "my_macro");

    let package = macro_token.lookback(2).unwrap();
    assert_eq!(package.kind(), TokenKind::Package);
    assert_eq!(package.literal(), "pkg");
}

#[test]
fn test_source_table_lookback_finds_source() {
    let output = parse("{{ source( 'raw' , 'orders' ) }}", Dialect::Snowflake);
    let index = TokenIndex::new(output.stream);
    let table = index.find_token_at(0, 20).unwrap();
    assert_eq!(table.kind(), TokenKind::SourceTable);
    let source = table.find_back(TokenKind::Source, 4).unwrap();
    assert_eq!(source.literal(), "raw");
}

#[test]
fn test_jinja_loop_variables_stay_identifiers() {
    let output = parse(JAFFLE_ORDERS, Dialect::Snowflake);
    assert!(
        output
            .stream
            .iter()
            .filter(|(_, t)| t.literal == "payment_method")
            .all(|(_, t)| t.kind == TokenKind::Ident)
    );
}

#[test]
fn test_garbage_input_never_panics() {
    let inputs = [
        "{{",
        "}}",
        "{{ ref(",
        "{{ source('a', ",
        "{% macro %}",
        "with",
        "with a as (",
        "))))((((",
        "{{ a.b.c.d( }}",
        "é ü ✓ {{ ref('ü') }}",
        "\r\n\r\n\t",
    ];
    for input in inputs {
        let output = parse(input, Dialect::Snowflake);
        let index = TokenIndex::new(output.stream);
        let _ = index.find_token_at(0, 0);
    }
}
