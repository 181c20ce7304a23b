use serde_json::{json, Map, Value};

/// Parameter shape of a tool argument.
///
/// The set is deliberately small: every tool parameter is a string, an
/// enumerated string, a repeatable string, or a number. Both front-ends
/// interpret these descriptors — the MCP server renders them as a
/// JSON-Schema object, the CLI derives one flag per descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Enum(&'static [&'static str]),
    StringArray,
    Number,
}

/// One declared tool parameter. `name` is the camelCase wire name; the CLI
/// flag is its kebab-case form.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

/// Where a tool surfaces in the CLI command tree: grouped under a parent
/// subcommand (`posts list`) or as a top-level command (`channels`).
#[derive(Debug, Clone, Copy)]
pub struct CliSpec {
    pub group: Option<&'static str>,
    pub command: &'static str,
}

/// Declarative description of one tool. This is the single source of truth
/// for the tool's parameters; neither front-end declares them again.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    pub cli: CliSpec,
}

impl ToolSpec {
    /// Render the JSON-Schema input object advertised over MCP.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in self.params {
            let property = match param.kind {
                ParamKind::String => json!({
                    "type": "string",
                    "description": param.description,
                }),
                ParamKind::Enum(choices) => json!({
                    "type": "string",
                    "description": param.description,
                    "enum": choices,
                }),
                ParamKind::StringArray => json!({
                    "type": "array",
                    "items": { "type": "string" },
                    "description": param.description,
                }),
                ParamKind::Number => json!({
                    "type": "number",
                    "description": param.description,
                }),
            };
            properties.insert(param.name.to_string(), property);
            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// camelCase to kebab-case, for deriving CLI flag names from wire names.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: ToolSpec = ToolSpec {
        name: "postiz-example",
        description: "Example tool",
        params: &[
            ParamSpec {
                name: "content",
                kind: ParamKind::StringArray,
                required: true,
                description: "Content items",
            },
            ParamSpec {
                name: "status",
                kind: ParamKind::Enum(&["draft", "scheduled", "now"]),
                required: false,
                description: "Publication status",
            },
            ParamSpec {
                name: "scheduledDate",
                kind: ParamKind::String,
                required: false,
                description: "When to publish",
            },
            ParamSpec {
                name: "duration",
                kind: ParamKind::Number,
                required: false,
                description: "Seconds",
            },
        ],
        cli: CliSpec {
            group: Some("posts"),
            command: "example",
        },
    };

    #[test]
    fn test_input_schema_shape() {
        let schema = SPEC.input_schema();
        assert_eq!(schema["type"], json!("object"));
        assert_eq!(schema["required"], json!(["content"]));
        assert_eq!(schema["properties"]["content"]["type"], json!("array"));
        assert_eq!(
            schema["properties"]["content"]["items"]["type"],
            json!("string")
        );
        assert_eq!(
            schema["properties"]["status"]["enum"],
            json!(["draft", "scheduled", "now"])
        );
        assert_eq!(schema["properties"]["duration"]["type"], json!("number"));
        assert_eq!(
            schema["properties"]["scheduledDate"]["type"],
            json!("string")
        );
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("scheduledDate"), "scheduled-date");
        assert_eq!(kebab_case("startDate"), "start-date");
        assert_eq!(kebab_case("content"), "content");
        assert_eq!(kebab_case("filePath"), "file-path");
        assert_eq!(kebab_case("snake_case"), "snake-case");
    }
}
