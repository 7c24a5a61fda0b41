//! The `Field` entity reported by scope resolution.

use serde::Serialize;

use crate::types::{DataType, OpType};

/// Where a field was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldOrigin {
    /// Declared in the global data dictionary.
    DataDictionary,
    /// Declared by a derived-field definition (global or local).
    DerivedField,
    /// Declared by a model's output field.
    OutputField,
    /// Declared as a parameter of a function definition.
    Parameter,
}

/// A named, typed data value visible to expressions.
///
/// Equality includes the origin: two declarations that happen to share a
/// name in different scopes are distinct fields, and the scope stack keeps
/// them apart (innermost wins on a name collision).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Field {
    /// Field name, unique within its declaring scope.
    pub name: String,
    /// Declared data type, when the declaration carries one.
    pub data_type: Option<DataType>,
    /// Declared operational type, when the declaration carries one.
    pub op_type: Option<OpType>,
    /// Declaration site.
    pub origin: FieldOrigin,
}

impl Field {
    /// Creates a field record for the given declaration site.
    pub fn new(
        name: impl Into<String>,
        data_type: Option<DataType>,
        op_type: Option<OpType>,
        origin: FieldOrigin,
    ) -> Self {
        Self {
            name: name.into(),
            data_type,
            op_type,
            origin,
        }
    }

    /// Shorthand for a fully typed data-dictionary field.
    pub fn data(name: impl Into<String>, data_type: DataType, op_type: OpType) -> Self {
        Self::new(name, Some(data_type), Some(op_type), FieldOrigin::DataDictionary)
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_different_origin_is_a_different_field() {
        let global = Field::data("x", DataType::Double, OpType::Continuous);
        let param = Field::new("x", Some(DataType::Double), None, FieldOrigin::Parameter);
        assert_ne!(global, param);
        assert_eq!(global.name(), param.name());
    }

    #[test]
    fn untyped_declarations_are_representable() {
        let param = Field::new("s", None, None, FieldOrigin::Parameter);
        assert_eq!(param.data_type, None);
        assert_eq!(param.op_type, None);
    }
}
