//! Document-level nodes: the root, the dictionaries, and field
//! definitions.
//!
//! Every node owns its children outright; the tree is acyclic and carries
//! no parent pointers. Parent context is available only through the
//! traversal engine's stack.

use serde::Serialize;

use crate::expression::Expression;
use crate::types::{DataType, OpType};

/// The document root.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Schema version the document declares for itself. Version inference
    /// ignores this and reports what the content actually requires.
    pub version: String,
    pub header: Header,
    pub data_dictionary: DataDictionary,
    pub transformation_dictionary: Option<TransformationDictionary>,
    pub models: Vec<crate::model::Model>,
}

impl Document {
    /// Creates a document with an empty model list.
    pub fn new(
        version: impl Into<String>,
        header: Header,
        data_dictionary: DataDictionary,
    ) -> Self {
        Self {
            version: version.into(),
            header,
            data_dictionary,
            transformation_dictionary: None,
            models: Vec::new(),
        }
    }

    /// Sets the transformation dictionary.
    pub fn with_transformation_dictionary(mut self, dictionary: TransformationDictionary) -> Self {
        self.transformation_dictionary = Some(dictionary);
        self
    }

    /// Appends a model.
    pub fn with_model(mut self, model: crate::model::Model) -> Self {
        self.models.push(model);
        self
    }
}

/// Document header metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub copyright: Option<String>,
    pub description: Option<String>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = Some(copyright.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The global field dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataDictionary {
    pub fields: Vec<DataField>,
}

impl DataDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field declaration.
    pub fn with_field(mut self, field: DataField) -> Self {
        self.fields.push(field);
        self
    }
}

/// A field declared by the global dictionary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataField {
    pub name: String,
    pub data_type: DataType,
    pub op_type: OpType,
    /// Marks an ordinal field whose value cycle wraps around.
    pub cyclic: Option<bool>,
}

impl DataField {
    pub fn new(name: impl Into<String>, data_type: DataType, op_type: OpType) -> Self {
        Self {
            name: name.into(),
            data_type,
            op_type,
            cyclic: None,
        }
    }

    pub fn with_cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = Some(cyclic);
        self
    }
}

/// The global list of derived fields and function definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationDictionary {
    pub derived_fields: Vec<DerivedField>,
    pub define_functions: Vec<DefineFunction>,
}

impl TransformationDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a derived field. Declaration order matters: a derived
    /// field's expression may reference only fields declared earlier.
    pub fn with_derived_field(mut self, field: DerivedField) -> Self {
        self.derived_fields.push(field);
        self
    }

    /// Appends a function definition.
    pub fn with_define_function(mut self, function: DefineFunction) -> Self {
        self.define_functions.push(function);
        self
    }
}

/// Derived fields local to one model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalTransformations {
    pub derived_fields: Vec<DerivedField>,
}

impl LocalTransformations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_derived_field(mut self, field: DerivedField) -> Self {
        self.derived_fields.push(field);
        self
    }
}

/// A named field computed from an expression over earlier fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedField {
    pub name: String,
    pub data_type: DataType,
    pub op_type: OpType,
    pub expression: Expression,
}

impl DerivedField {
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        op_type: OpType,
        expression: impl Into<Expression>,
    ) -> Self {
        Self {
            name: name.into(),
            data_type,
            op_type,
            expression: expression.into(),
        }
    }
}

/// A user-defined function.
///
/// The body is evaluated purely over the declared parameters; fields from
/// enclosing scopes are not visible inside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefineFunction {
    pub name: String,
    pub op_type: OpType,
    pub data_type: Option<DataType>,
    pub parameters: Vec<ParameterField>,
    pub expression: Expression,
}

impl DefineFunction {
    pub fn new(
        name: impl Into<String>,
        op_type: OpType,
        expression: impl Into<Expression>,
    ) -> Self {
        Self {
            name: name.into(),
            op_type,
            data_type: None,
            parameters: Vec::new(),
            expression: expression.into(),
        }
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Appends a parameter field.
    pub fn with_parameter(mut self, parameter: ParameterField) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// A parameter of a function definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterField {
    pub name: String,
    pub data_type: Option<DataType>,
    pub op_type: Option<OpType>,
}

impl ParameterField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            op_type: None,
        }
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_op_type(mut self, op_type: OpType) -> Self {
        self.op_type = Some(op_type);
        self
    }
}
