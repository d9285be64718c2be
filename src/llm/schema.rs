// ABOUTME: Typed response-schema nodes for structured generation output
// ABOUTME: Serializes to the generative-language API schema dialect (OpenAPI subset)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriPlan Contributors

//! # Declared Output Shape
//!
//! Builder for the schema tree sent alongside a generation request. The
//! service constrains its output to this shape, which is what lets the
//! caller parse the response with a plain serde model and treat any mismatch
//! as a hard failure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value type of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    /// UTF-8 string value
    String,
    /// Floating point number
    Number,
    /// Integer value
    Integer,
    /// Boolean value
    Boolean,
    /// Ordered list of homogeneous items
    Array,
    /// Object with named properties
    Object,
}

/// One node of the declared output shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Node type
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Human-readable hint for the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Named properties of an object node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    /// Item shape of an array node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Property names the service must always emit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl Schema {
    const fn leaf(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            properties: None,
            items: None,
            required: None,
        }
    }

    /// A string node
    #[must_use]
    pub const fn string() -> Self {
        Self::leaf(SchemaType::String)
    }

    /// A number node
    #[must_use]
    pub const fn number() -> Self {
        Self::leaf(SchemaType::Number)
    }

    /// An integer node
    #[must_use]
    pub const fn integer() -> Self {
        Self::leaf(SchemaType::Integer)
    }

    /// A boolean node
    #[must_use]
    pub const fn boolean() -> Self {
        Self::leaf(SchemaType::Boolean)
    }

    /// An array node with the given item shape
    #[must_use]
    pub fn array(items: Self) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array)
        }
    }

    /// An object node with the given named properties
    #[must_use]
    pub fn object<K, I>(properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self {
            properties: Some(
                properties
                    .into_iter()
                    .map(|(name, schema)| (name.into(), schema))
                    .collect(),
            ),
            ..Self::leaf(SchemaType::Object)
        }
    }

    /// Attach a description hint
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark properties the service must always emit
    #[must_use]
    pub fn required<K, I>(mut self, names: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = K>,
    {
        self.required = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_serialization() {
        let json = serde_json::to_value(Schema::string()).unwrap();
        assert_eq!(json, serde_json::json!({"type": "STRING"}));
    }

    #[test]
    fn test_object_with_required() {
        let schema = Schema::object([("name", Schema::string()), ("age", Schema::string())])
            .required(["name"]);
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["type"], "OBJECT");
        assert_eq!(json["properties"]["name"]["type"], "STRING");
        assert_eq!(json["required"], serde_json::json!(["name"]));
    }

    #[test]
    fn test_array_items() {
        let schema = Schema::array(Schema::object([("time", Schema::string())]));
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["type"], "ARRAY");
        assert_eq!(json["items"]["type"], "OBJECT");
        assert_eq!(json["items"]["properties"]["time"]["type"], "STRING");
    }

    #[test]
    fn test_description_round_trip() {
        let schema = Schema::string().describe("weight with unit");
        let json = serde_json::to_string(&schema).unwrap();
        let back: Schema = serde_json::from_str(&json).unwrap();
        assert_eq!(back.description.as_deref(), Some("weight with unit"));
    }
}
