//! JSON Schemas advertised for tool inputs and outputs.

use schemars::{JsonSchema, schema_for};
use serde_json::{Map, Value};

use super::format::ToolOutput;
use super::handlers::{
    arithmetic::{AddRequest, DivideRequest},
    echo::EchoRequest,
};

pub(crate) fn add_input_schema() -> Map<String, Value> {
    object_schema::<AddRequest>()
}

pub(crate) fn divide_input_schema() -> Map<String, Value> {
    object_schema::<DivideRequest>()
}

pub(crate) fn echo_input_schema() -> Map<String, Value> {
    object_schema::<EchoRequest>()
}

pub(crate) fn integer_output_schema() -> Map<String, Value> {
    object_schema::<ToolOutput<i64>>()
}

pub(crate) fn number_output_schema() -> Map<String, Value> {
    object_schema::<ToolOutput<f64>>()
}

pub(crate) fn string_output_schema() -> Map<String, Value> {
    object_schema::<ToolOutput<String>>()
}

/// Derive a schema for `T` and strip the draft marker MCP clients do not need.
fn object_schema<T: JsonSchema>() -> Map<String, Value> {
    let schema = schema_for!(T);
    let mut map = match serde_json::to_value(schema) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    map.remove("$schema");
    map.entry("type")
        .or_insert_with(|| Value::String("object".into()));
    map
}
