//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Definition of a tool a node may call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "search_subreddit")
    pub name: String,
    /// Human-readable description, shown to the model
    pub description: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    pub required: bool,
    /// JSON-schema type name ("string", "number", ...)
    pub param_type: String,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Render the parameters as a JSON-schema object.
    pub fn parameters_schema(&self) -> serde_json::Value {
        let properties: serde_json::Map<String, serde_json::Value> = self
            .parameters
            .iter()
            .map(|p| {
                (
                    p.name.clone(),
                    serde_json::json!({
                        "type": p.param_type,
                        "description": p.description,
                    }),
                )
            })
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// Registry of available tools, ordered by name
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: BTreeMap<String, ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A call to a tool with arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: HashMap<String, serde_json::Value>,
    /// Provider-assigned id for correlating the result with the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_id: Option<String>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
            native_id: None,
        }
    }

    /// Build a call from a provider tool-use block.
    pub fn from_native(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            tool_name: name.into(),
            arguments,
            native_id: Some(id.into()),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }

    /// Get an integer argument. Floats are truncated and numeric strings parsed,
    /// since models are loose about number types.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        let value = self.arguments.get(key)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as i64))
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_tool() -> ToolDefinition {
        ToolDefinition::new("search_subreddit", "Search local threads")
            .with_parameter(ToolParameter::new("query", "Search terms", true))
            .with_parameter(ToolParameter::new("limit", "Max results", false).with_type("number"))
    }

    #[test]
    fn test_tool_definition() {
        let tool = search_tool();
        assert_eq!(tool.name, "search_subreddit");
        assert_eq!(tool.parameters.len(), 2);
        assert_eq!(tool.parameters[1].param_type, "number");
    }

    #[test]
    fn test_parameters_schema() {
        let schema = search_tool().parameters_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["query"]["type"], "string");
        assert_eq!(schema["properties"]["limit"]["type"], "number");
        assert_eq!(schema["required"], serde_json::json!(["query"]));
    }

    #[test]
    fn test_tool_spec() {
        let spec = ToolSpec::new().register(search_tool());
        assert!(spec.get("search_subreddit").is_some());
        assert!(spec.get("read_file").is_none());
        assert_eq!(spec.names().collect::<Vec<_>>(), vec!["search_subreddit"]);
        assert!(ToolSpec::new().is_empty());
    }

    #[test]
    fn test_tool_call_arguments() {
        let call = ToolCall::new("search_subreddit")
            .with_arg("query", "pmdd rage")
            .with_arg("limit", 3.7);

        assert_eq!(call.get_string("query"), Some("pmdd rage"));
        assert_eq!(call.require_string("query").unwrap(), "pmdd rage");
        assert!(call.require_string("missing").is_err());
        assert_eq!(call.get_i64("limit"), Some(3));
        assert!(call.native_id.is_none());
    }

    #[test]
    fn test_get_i64_from_string() {
        let call = ToolCall::new("search_subreddit").with_arg("limit", " 7 ");
        assert_eq!(call.get_i64("limit"), Some(7));
        let call = ToolCall::new("search_subreddit").with_arg("limit", "lots");
        assert_eq!(call.get_i64("limit"), None);
    }

    #[test]
    fn test_from_native() {
        let call = ToolCall::from_native("call_1", "search_subreddit", HashMap::new());
        assert_eq!(call.native_id.as_deref(), Some("call_1"));
        assert_eq!(call.tool_name, "search_subreddit");
    }
}
