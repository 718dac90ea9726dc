// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Variables pass
//!
//! `vars` from the root `dbt_project.yml`. Keys scoped under the project's
//! own name override top-level keys of the same name.

use crate::metadata::VariableDetails;
use crate::project::{DbtProject, PROJECT_FILE};
use crate::yaml_scan::variable_positions;
use dbt_lsp_ir::SourceRange;
use serde_yaml::Value;
use std::collections::HashMap;

pub(crate) fn collect_variables(project: &DbtProject) -> HashMap<String, VariableDetails> {
    let mut variables = HashMap::new();
    let Some(Value::Mapping(vars)) = &project.vars else {
        return variables;
    };

    let path = project.root.join(PROJECT_FILE);
    let positions = variable_positions(&project.text, &project.name);
    let mut insert = |name: &str, value: &Value| {
        let range = positions
            .get(name)
            .map(|position| SourceRange::point(*position))
            .unwrap_or_default();
        variables.insert(
            name.to_string(),
            VariableDetails {
                name: name.to_string(),
                value: render_value(value),
                path: path.clone(),
                range,
            },
        );
    };

    for (key, value) in vars {
        match key.as_str() {
            Some(name) if name != project.name => insert(name, value),
            _ => {}
        }
    }

    if let Some(Value::Mapping(scoped)) = vars.get(project.name.as_str()) {
        for (key, value) in scoped {
            if let (Some(name), false) = (key.as_str(), value.is_null()) {
                insert(name, value);
            }
        }
    }

    variables
}

/// Scalars as written; sequences and maps as compact YAML
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbt_lsp_ir::SourcePosition;

    fn project(text: &str) -> DbtProject {
        let raw: Value = serde_yaml::from_str(text).unwrap();
        DbtProject {
            root: "/work/shop".into(),
            name: "jaffle_shop".to_string(),
            vars: raw.get("vars").cloned(),
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_project_scope_overrides_top_level() {
        let text = "name: jaffle_shop\nvars:\n  region: us\n  start_date: '2020-01-01'\n  jaffle_shop:\n    region: eu\n    unset: null\n";
        let variables = collect_variables(&project(text));

        assert_eq!(variables.len(), 2);
        assert_eq!(variables["region"].value, "eu");
        assert_eq!(variables["region"].range.start, SourcePosition::new(5, 4));
        assert_eq!(variables["start_date"].value, "2020-01-01");
        assert_eq!(variables["start_date"].path, std::path::Path::new("/work/shop/dbt_project.yml"));
    }

    #[test]
    fn test_render_collections() {
        let value: Value = serde_yaml::from_str("[card, coupon]").unwrap();
        assert_eq!(render_value(&value), "- card\n- coupon");
        assert_eq!(render_value(&Value::Bool(true)), "true");
        assert_eq!(render_value(&serde_yaml::from_str("42").unwrap()), "42");
    }

    #[test]
    fn test_no_vars() {
        assert!(collect_variables(&project("name: jaffle_shop\n")).is_empty());
    }
}
