// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Builtin function metadata
//!
//! Documentation entries for warehouse builtin functions, used as the
//! fallback hover text and completion list when the cursor is not on a
//! template construct.

use serde::{Deserialize, Serialize};

/// Function parameter definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParameter {
    /// Parameter name
    pub name: String,
    /// Whether the argument may be omitted
    pub optional: bool,
    /// Whether the parameter accepts any number of arguments
    pub is_variadic: bool,
}

impl FunctionParameter {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            is_variadic: false,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: true,
            is_variadic: false,
        }
    }

    pub fn variadic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            is_variadic: true,
        }
    }
}

/// Function classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionType {
    #[default]
    Scalar,
    Aggregate,
    Window,
    Table,
}

/// Metadata for a builtin function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMetadata {
    /// Function name, upper case
    pub name: String,
    /// Function parameters
    pub parameters: Vec<FunctionParameter>,
    /// Function type (scalar, aggregate, window)
    pub function_type: FunctionType,
    /// Function description/documentation
    pub description: Option<String>,
    /// Example usage
    pub example: Option<String>,
}

impl FunctionMetadata {
    /// Create new function metadata with builder pattern
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            function_type: FunctionType::Scalar,
            description: None,
            example: None,
        }
    }

    /// Builder method: add parameters
    pub fn with_parameters(mut self, params: Vec<FunctionParameter>) -> Self {
        self.parameters = params;
        self
    }

    /// Builder method: set function type
    pub fn with_type(mut self, function_type: FunctionType) -> Self {
        self.function_type = function_type;
        self
    }

    /// Builder method: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Builder method: set example
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Call signature, e.g. `DATEADD(part, value, expr)` or `COALESCE(expr, ...)`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| {
                if p.is_variadic {
                    format!("{}, ...", p.name)
                } else if p.optional {
                    format!("[{}]", p.name)
                } else {
                    p.name.clone()
                }
            })
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_formats_parameter_kinds() {
        let func = FunctionMetadata::new("ROUND").with_parameters(vec![
            FunctionParameter::required("expr"),
            FunctionParameter::optional("scale"),
        ]);
        assert_eq!(func.signature(), "ROUND(expr, [scale])");

        let func = FunctionMetadata::new("COALESCE")
            .with_parameters(vec![FunctionParameter::variadic("expr")]);
        assert_eq!(func.signature(), "COALESCE(expr, ...)");
    }

    #[test]
    fn test_builder_defaults() {
        let func = FunctionMetadata::new("CURRENT_DATE").with_description("Today");
        assert_eq!(func.function_type, FunctionType::Scalar);
        assert_eq!(func.description.as_deref(), Some("Today"));
        assert_eq!(func.signature(), "CURRENT_DATE()");
    }
}
