//! Parameter extraction for tools.
//!
//! - [`FunctionCall`] - a named call with a JSON object of arguments
//! - [`InputParam`] - caller-visible parameter types that appear in JSON schema

use crate::error::ToolError;
use crate::schema::ParameterInfo;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// A function call request with name and JSON parameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FunctionCall {
    /// Function name.
    pub name: String,
    /// Parameters as a JSON object map.
    pub parameters: serde_json::Map<String, serde_json::Value>,
}

impl FunctionCall {
    /// Creates a new function call.
    pub fn new(
        name: impl Into<String>,
        parameters: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// Creates a function call from a [`serde_json::Value`], returning an error
    /// if `parameters` is not a JSON object.
    ///
    /// A `null` value is treated as an empty argument object.
    pub fn from_value(
        name: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Result<Self, ToolError> {
        match parameters {
            serde_json::Value::Object(map) => Ok(Self::new(name, map)),
            serde_json::Value::Null => Ok(Self::new(name, serde_json::Map::new())),
            _ => Err(ToolError::parameter_error("Parameters must be an object")),
        }
    }

    /// Deserializes a required parameter by name.
    pub fn get_param<T: DeserializeOwned>(&self, name: &str) -> Result<T, ToolError> {
        let value = self
            .parameters
            .get(name)
            .ok_or_else(|| ToolError::parameter_error(format!("Missing parameter: {name}")))?;

        serde_json::from_value(value.clone()).map_err(|err| {
            ToolError::parameter_error(format!("Failed to deserialize parameter '{name}': {err}"))
        })
    }

    /// Deserializes an optional parameter by name. Returns `None` if missing or null.
    pub fn get_optional_param<T: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<T>, ToolError> {
        match self.parameters.get(name) {
            None => Ok(None),
            Some(value) if value.is_null() => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|err| {
                    ToolError::parameter_error(format!(
                        "Failed to deserialize parameter '{name}': {err}"
                    ))
                }),
        }
    }
}

/// Trait for parameters that come from caller input and appear in JSON schema.
pub trait InputParam {
    /// Returns schema information for this parameter type.
    fn schema_info(param_name: &str) -> ParameterInfo;
}

impl<T: DeserializeOwned + JsonSchema> InputParam for T {
    fn schema_info(param_name: &str) -> ParameterInfo {
        let mut generator = schemars::SchemaGenerator::default();
        let schema = T::json_schema(&mut generator);
        let schema_value = serde_json::to_value(schema).unwrap_or_else(|_| serde_json::json!({}));
        ParameterInfo::new(param_name, schema_value)
    }
}
