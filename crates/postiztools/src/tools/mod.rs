//! The tool registry.
//!
//! Every capability of this project is a [`ToolDefinition`]: a declarative
//! parameter spec (from `postiztools_core::schema`) paired with an execute
//! function. The MCP server and the CLI both dispatch through [`TOOLS`], so
//! adding a capability means adding a module and appending one entry here —
//! neither front-end changes.

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::postiz::PostizClient;
use postiztools_core::envelope::{self, ValidationError};
use postiztools_core::schema::ToolSpec;
use crate::prelude::PostizError;

pub mod create_post;
pub mod delete_post;
pub mod generate_video;
pub mod get_channels;
pub mod list_posts;
pub mod update_post;
pub mod upload_file;

/// The envelope a tool execution produces. Exactly one per invocation;
/// execute functions never raise past their own boundary.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub payload: Value,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn success(payload: Value) -> Self {
        Self {
            payload: envelope::success(payload),
            is_error: false,
        }
    }

    pub fn invalid(error: ValidationError) -> Self {
        Self {
            payload: envelope::failure(error.to_string(), None),
            is_error: true,
        }
    }

    pub fn remote_failure(error: PostizError) -> Self {
        Self {
            payload: envelope::failure(error.to_string(), error.status_code()),
            is_error: true,
        }
    }
}

/// Deserialize the raw argument object both front-ends hand over. A shape
/// mismatch is an input validation error and comes back in-envelope.
pub fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, Box<ToolOutput>> {
    serde_json::from_value(arguments).map_err(|e| {
        Box::new(ToolOutput {
            payload: envelope::failure(format!("Invalid arguments: {e}"), None),
            is_error: true,
        })
    })
}

/// One registered tool: its declarative spec plus a type-erased execute
/// function.
pub struct ToolDefinition {
    pub spec: &'static ToolSpec,
    pub run: fn(PostizClient, Value) -> BoxFuture<'static, ToolOutput>,
}

/// Static ordered registry consumed by both front-ends.
pub static TOOLS: &[ToolDefinition] = &[
    ToolDefinition {
        spec: &get_channels::SPEC,
        run: get_channels::run,
    },
    ToolDefinition {
        spec: &upload_file::SPEC,
        run: upload_file::run,
    },
    ToolDefinition {
        spec: &list_posts::SPEC,
        run: list_posts::run,
    },
    ToolDefinition {
        spec: &create_post::SPEC,
        run: create_post::run,
    },
    ToolDefinition {
        spec: &update_post::SPEC,
        run: update_post::run,
    },
    ToolDefinition {
        spec: &delete_post::SPEC,
        run: delete_post::run,
    },
    ToolDefinition {
        spec: &generate_video::SPEC,
        run: generate_video::run,
    },
];

/// Look a tool up by its protocol name.
pub fn find(name: &str) -> Option<&'static ToolDefinition> {
    TOOLS.iter().find(|tool| tool.spec.name == name)
}

/// Look a tool up by its CLI location (parent group + command).
pub fn find_cli(group: Option<&str>, command: &str) -> Option<&'static ToolDefinition> {
    TOOLS
        .iter()
        .find(|tool| tool.spec.cli.group == group && tool.spec.cli.command == command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_are_unique_and_prefixed() {
        let mut names: Vec<&str> = TOOLS.iter().map(|t| t.spec.name).collect();
        assert!(names.iter().all(|name| name.starts_with("postiz-")));
        names.sort();
        names.dedup();
        assert_eq!(names.len(), TOOLS.len());
    }

    #[test]
    fn test_find_by_name() {
        assert!(find("postiz-create-post").is_some());
        assert!(find("postiz-get-channels").is_some());
        assert!(find("nope").is_none());
    }

    #[test]
    fn test_find_by_cli_location() {
        assert_eq!(
            find_cli(Some("posts"), "create").unwrap().spec.name,
            "postiz-create-post"
        );
        assert_eq!(
            find_cli(None, "channels").unwrap().spec.name,
            "postiz-get-channels"
        );
        assert!(find_cli(Some("posts"), "channels").is_none());
    }

    #[test]
    fn test_cli_locations_are_unique() {
        let mut locations: Vec<(Option<&str>, &str)> = TOOLS
            .iter()
            .map(|t| (t.spec.cli.group, t.spec.cli.command))
            .collect();
        locations.sort();
        locations.dedup();
        assert_eq!(locations.len(), TOOLS.len());
    }

    #[test]
    fn test_parse_args_shape_mismatch_is_enveloped() {
        #[derive(serde::Deserialize)]
        struct Args {
            id: String,
        }
        let result: Result<Args, Box<ToolOutput>> =
            parse_args(serde_json::json!({"id": ["not", "a", "string"]}));
        let output = result.err().unwrap();
        assert!(output.is_error);
        assert_eq!(output.payload["success"], serde_json::json!(false));
        assert!(output.payload["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid arguments:"));
    }
}
