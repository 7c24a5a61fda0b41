//! Expression nodes.
//!
//! Expressions appear inside derived-field and function definitions. They
//! nest through [`Apply`] argument lists and are the nodes at which callers
//! typically query the resolver for the visible field set.

use serde::Serialize;

use crate::types::DataType;

/// An expression tree node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Expression {
    Constant(Constant),
    FieldRef(FieldRef),
    Apply(Apply),
}

impl From<Constant> for Expression {
    fn from(value: Constant) -> Self {
        Expression::Constant(value)
    }
}

impl From<FieldRef> for Expression {
    fn from(value: FieldRef) -> Self {
        Expression::FieldRef(value)
    }
}

impl From<Apply> for Expression {
    fn from(value: Apply) -> Self {
        Expression::Apply(value)
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constant {
    /// Literal text as it appears in the document.
    pub value: String,
    /// Declared data type, when present.
    pub data_type: Option<DataType>,
    /// Marks the constant as a missing-value placeholder.
    pub missing: bool,
}

impl Constant {
    /// Creates an untyped constant.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            data_type: None,
            missing: false,
        }
    }

    /// Sets the declared data type.
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Marks this constant as a missing-value placeholder.
    pub fn with_missing(mut self) -> Self {
        self.missing = true;
        self
    }
}

/// A reference to a field by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRef {
    /// Name of the referenced field.
    pub field: String,
}

impl FieldRef {
    /// Creates a reference to the named field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

/// A function application over expression arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Apply {
    /// Name of the applied function (built-in or user-defined).
    pub function: String,
    /// Treatment of invalid input values, when declared.
    pub invalid_value_treatment: Option<String>,
    /// Ordered arguments.
    pub args: Vec<Expression>,
}

impl Apply {
    /// Creates an application of the named function with no arguments.
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            invalid_value_treatment: None,
            args: Vec::new(),
        }
    }

    /// Appends an argument.
    pub fn with_arg(mut self, arg: impl Into<Expression>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets the invalid-value treatment.
    pub fn with_invalid_value_treatment(mut self, treatment: impl Into<String>) -> Self {
        self.invalid_value_treatment = Some(treatment.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_keeps_argument_order() {
        let apply = Apply::new("*")
            .with_arg(FieldRef::new("x1"))
            .with_arg(Constant::new("2").with_data_type(DataType::Integer));

        assert_eq!(apply.args.len(), 2);
        assert!(matches!(&apply.args[0], Expression::FieldRef(f) if f.field == "x1"));
        assert!(matches!(&apply.args[1], Expression::Constant(c) if c.value == "2"));
    }

    #[test]
    fn constant_defaults_to_present_and_untyped() {
        let constant = Constant::new("0");
        assert!(!constant.missing);
        assert_eq!(constant.data_type, None);
    }
}
