//! Declarative response schema shared by request building and validation.
//!
//! The same `SchemaNode` value is rendered into the structured model call
//! and consulted when the response is validated, so the requested shape and
//! the checked shape cannot drift apart.

use serde_json::{json, Value};

/// A tagged structural description of an expected JSON shape.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// An object with named properties; `required` lists mandatory keys.
    Object {
        properties: Vec<(&'static str, SchemaNode)>,
        required: Vec<&'static str>,
    },
    /// A homogeneous array.
    Array(Box<SchemaNode>),
    /// A free-text string.
    String,
    /// An integer value.
    Integer,
    /// A floating-point value.
    Number,
}

impl SchemaNode {
    /// Convenience constructor for an object where every property is required.
    pub fn object(properties: Vec<(&'static str, SchemaNode)>) -> Self {
        let required = properties.iter().map(|(name, _)| *name).collect();
        SchemaNode::Object {
            properties,
            required,
        }
    }

    /// An object with an explicit required list (for optional properties).
    pub fn object_with_required(
        properties: Vec<(&'static str, SchemaNode)>,
        required: Vec<&'static str>,
    ) -> Self {
        SchemaNode::Object {
            properties,
            required,
        }
    }

    /// Convenience constructor for an array of the given item shape.
    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::Array(Box::new(items))
    }

    /// The required top-level keys, if this node is an object.
    pub fn required_keys(&self) -> &[&'static str] {
        match self {
            SchemaNode::Object { required, .. } => required,
            _ => &[],
        }
    }

    /// Renders the schema as the JSON shape description sent to the model.
    pub fn to_json(&self) -> Value {
        match self {
            SchemaNode::Object {
                properties,
                required,
            } => {
                let props: serde_json::Map<String, Value> = properties
                    .iter()
                    .map(|(name, node)| (name.to_string(), node.to_json()))
                    .collect();
                json!({
                    "type": "object",
                    "properties": props,
                    "required": required,
                })
            }
            SchemaNode::Array(items) => json!({
                "type": "array",
                "items": items.to_json(),
            }),
            SchemaNode::String => json!({ "type": "string" }),
            SchemaNode::Integer => json!({ "type": "integer" }),
            SchemaNode::Number => json!({ "type": "number" }),
        }
    }
}

/// The declarative shape of a structured analysis response.
///
/// Mirrors [`AnalysisResult`](super::AnalysisResult) exactly, except that
/// `duration_seconds` is absent: duration is measured locally and never
/// requested from the model.
pub fn response_schema() -> SchemaNode {
    let timeline_event = SchemaNode::object(vec![
        ("time", SchemaNode::String),
        ("event", SchemaNode::String),
    ]);

    let executive_summary = SchemaNode::object(vec![
        ("overview", SchemaNode::String),
        ("timeline", SchemaNode::array(timeline_event)),
        (
            "scores",
            SchemaNode::object(vec![
                ("safety", SchemaNode::Integer),
                ("climate", SchemaNode::Integer),
                ("interaction", SchemaNode::Integer),
            ]),
        ),
    ]);

    let resource_audit = SchemaNode::object(vec![
        ("personnel", SchemaNode::String),
        ("equipment", SchemaNode::String),
        ("learning_materials", SchemaNode::String),
        ("space_utilization", SchemaNode::String),
        ("safety_provisions", SchemaNode::String),
        ("emotional_support", SchemaNode::String),
    ]);

    let developmental_milestone = SchemaNode::object(vec![
        ("observed_activity", SchemaNode::String),
        ("emotional_state", SchemaNode::String),
        ("expected_milestone", SchemaNode::String),
        ("verdict", SchemaNode::String),
        ("analysis", SchemaNode::String),
    ]);

    let environmental_scan = SchemaNode::object(vec![
        ("sensory_load", SchemaNode::String),
        ("layout_analysis", SchemaNode::String),
    ]);

    let keep_recommendation = SchemaNode::object_with_required(
        vec![
            ("category", SchemaNode::String),
            ("action", SchemaNode::String),
            ("justification", SchemaNode::String),
            ("sentiment", SchemaNode::String),
        ],
        vec!["category", "action", "justification"],
    );

    let correction_model = SchemaNode::object(vec![
        ("what_to_do", SchemaNode::String),
        ("what_to_say", SchemaNode::String),
    ]);

    let emotional_response_activity = SchemaNode::object(vec![
        ("name", SchemaNode::String),
        ("description", SchemaNode::String),
    ]);

    let improve_recommendation = SchemaNode::object_with_required(
        vec![
            ("category", SchemaNode::String),
            ("action", SchemaNode::String),
            ("justification", SchemaNode::String),
            ("urgency", SchemaNode::String),
            ("sentiment", SchemaNode::String),
            ("correction_model", correction_model),
            (
                "emotional_response_activities",
                SchemaNode::array(emotional_response_activity),
            ),
        ],
        vec!["category", "action", "justification", "urgency"],
    );

    let recommendations = SchemaNode::object(vec![
        ("keep", SchemaNode::array(keep_recommendation)),
        ("improve", SchemaNode::array(improve_recommendation)),
    ]);

    let stakeholder_note = SchemaNode::object(vec![
        ("note", SchemaNode::String),
        ("justification", SchemaNode::String),
    ]);

    let director_note = SchemaNode::object(vec![
        ("note", SchemaNode::String),
        ("justification", SchemaNode::String),
        ("immediate_action", SchemaNode::String),
    ]);

    let stakeholder_specifics = SchemaNode::object(vec![
        ("director", director_note),
        ("parents", stakeholder_note.clone()),
        ("authority", stakeholder_note),
    ]);

    SchemaNode::object(vec![
        ("executive_summary", executive_summary),
        ("resource_audit", resource_audit),
        ("developmental_milestone", developmental_milestone),
        ("environmental_scan", environmental_scan),
        ("recommendations", recommendations),
        ("stakeholder_specifics", stakeholder_specifics),
    ])
}

#[cfg(test)]
mod tests {
    use super::super::result::AnalysisResult;
    use super::*;

    #[test]
    fn required_keys_match_result_sections() {
        let schema = response_schema();
        assert_eq!(
            schema.required_keys(),
            AnalysisResult::REQUIRED_SECTIONS.as_slice()
        );
    }

    #[test]
    fn duration_is_never_requested() {
        let schema = response_schema();
        match &schema {
            SchemaNode::Object { properties, .. } => {
                assert!(properties
                    .iter()
                    .all(|(name, _)| *name != "duration_seconds"));
            }
            _ => panic!("response schema must be an object"),
        }
    }

    #[test]
    fn renders_object_with_required_list() {
        let schema = SchemaNode::object(vec![
            ("a", SchemaNode::String),
            ("b", SchemaNode::Integer),
        ]);

        let json = schema.to_json();
        assert_eq!(json["type"], "object");
        assert_eq!(json["properties"]["a"]["type"], "string");
        assert_eq!(json["properties"]["b"]["type"], "integer");
        assert_eq!(json["required"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn renders_nested_arrays() {
        let schema = SchemaNode::array(SchemaNode::object(vec![("x", SchemaNode::Number)]));

        let json = schema.to_json();
        assert_eq!(json["type"], "array");
        assert_eq!(json["items"]["type"], "object");
        assert_eq!(json["items"]["properties"]["x"]["type"], "number");
    }

    #[test]
    fn optional_fields_are_described_but_not_required() {
        let json = response_schema().to_json();
        let keep_items = &json["properties"]["recommendations"]["properties"]["keep"]["items"];

        assert_eq!(keep_items["properties"]["sentiment"]["type"], "string");
        let required: Vec<&str> = keep_items["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert!(!required.contains(&"sentiment"));
    }

    #[test]
    fn primitive_leaves_render_type_only() {
        assert_eq!(SchemaNode::String.to_json(), serde_json::json!({"type": "string"}));
        assert_eq!(SchemaNode::Number.to_json(), serde_json::json!({"type": "number"}));
    }
}
