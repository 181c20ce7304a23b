//! Command-line front-end.
//!
//! The command tree is built at runtime from the tool registry: every
//! `ParamSpec` becomes one flag, so the CLI can never drift from what the
//! MCP server advertises. Tool output is the result envelope printed as a
//! single JSON document — stdout and exit 0 on success, stderr and exit 1
//! on failure.

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde_json::{Map, Value};

use crate::postiz::{PostizClient, PostizConfig};
use crate::prelude::{eprintln, println, *};
use crate::tools::{self, ToolDefinition};
use postiztools_core::envelope;
use postiztools_core::schema::{kebab_case, ParamKind, ToolSpec};

const AFTER_HELP: &str = "Environment variables:
  POSTIZ_API_KEY    Postiz API key (alternative to --api-key)
  POSTIZ_BASE_URL   Override the API base URL
  POSTIZ_CLI_DEBUG  Include failure detail on errors
";

/// Global options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub pretty: bool,
    pub verbose: bool,
    pub debug: bool,
}

impl GlobalOptions {
    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            api_key: matches.get_one::<String>("api-key").cloned(),
            base_url: matches.get_one::<String>("base-url").cloned(),
            pretty: matches.get_flag("pretty"),
            verbose: matches.get_flag("verbose"),
            debug: matches.get_flag("debug") || std::env::var_os("POSTIZ_CLI_DEBUG").is_some(),
        }
    }
}

/// Derive the clap command for one tool from its descriptor set.
fn tool_command(spec: &ToolSpec) -> Command {
    let mut command = Command::new(spec.cli.command).about(spec.description);

    for param in spec.params {
        let mut arg = Arg::new(param.name)
            .long(kebab_case(param.name))
            .value_name("VALUE")
            .help(param.description);

        arg = match param.kind {
            ParamKind::String => arg.action(ArgAction::Set),
            ParamKind::Enum(choices) => arg
                .action(ArgAction::Set)
                .value_parser(PossibleValuesParser::new(choices.to_vec())),
            // Repeatable flag collects array values.
            ParamKind::StringArray => arg.action(ArgAction::Append),
            ParamKind::Number => arg.action(ArgAction::Set).value_parser(value_parser!(u64)),
        };

        // Required parameters stay optional at the clap level: structural
        // validation happens once, inside the tool, identically for both
        // front-ends.
        command = command.arg(arg);
    }

    command
}

/// Build the full command tree: global flags, the MCP server commands, and
/// one command per registered tool (grouped where its `CliSpec` says so).
pub fn build_command() -> Command {
    let mut root = Command::new("postiztools")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Postiz scheduling tools over MCP and the command line")
        .after_help(AFTER_HELP)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .env("POSTIZ_API_KEY")
                .global(true)
                .hide_env_values(true)
                .help("Postiz API key (POSTIZ_API_KEY)"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .env("POSTIZ_BASE_URL")
                .global(true)
                .help("Base URL for the Postiz API (POSTIZ_BASE_URL)"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Pretty-print JSON output"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Whether to display additional information"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Include failure detail on errors (POSTIZ_CLI_DEBUG)"),
        )
        .subcommand(
            Command::new("mcp")
                .about("Model Context Protocol server")
                .subcommand_required(true)
                .subcommand(Command::new("stdio").about("Start MCP server with stdio transport"))
                .subcommand(
                    Command::new("sse")
                        .about("Start MCP server with SSE transport (HTTP)")
                        .arg(
                            Arg::new("port")
                                .short('p')
                                .long("port")
                                .default_value("3000")
                                .value_parser(value_parser!(u16))
                                .help("Port to listen on"),
                        )
                        .arg(
                            Arg::new("host")
                                .long("host")
                                .default_value("127.0.0.1")
                                .help("Host to bind to"),
                        ),
                ),
        );

    // Grouped tools become children of a parent subcommand, ungrouped
    // tools sit at the top level. Registry order is preserved.
    let mut groups: Vec<&'static str> = Vec::new();
    for tool in tools::TOOLS {
        if let Some(group) = tool.spec.cli.group {
            if !groups.contains(&group) {
                groups.push(group);
            }
        } else {
            root = root.subcommand(tool_command(tool.spec));
        }
    }

    for group in groups {
        let mut parent = Command::new(group)
            .about(format!("{} operations", capitalize(group)))
            .subcommand_required(true);
        for tool in tools::TOOLS {
            if tool.spec.cli.group == Some(group) {
                parent = parent.subcommand(tool_command(tool.spec));
            }
        }
        root = root.subcommand(parent);
    }

    root
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Translate parsed flags back into the same JSON argument object the MCP
/// front-end hands to the tool.
fn matches_to_args(spec: &ToolSpec, matches: &ArgMatches) -> Value {
    let mut args = Map::new();

    for param in spec.params {
        match param.kind {
            ParamKind::String | ParamKind::Enum(_) => {
                if let Some(value) = matches.get_one::<String>(param.name) {
                    args.insert(param.name.to_string(), Value::String(value.clone()));
                }
            }
            ParamKind::StringArray => {
                if let Some(values) = matches.get_many::<String>(param.name) {
                    let items: Vec<Value> =
                        values.map(|value| Value::String(value.clone())).collect();
                    args.insert(param.name.to_string(), Value::Array(items));
                }
            }
            ParamKind::Number => {
                if let Some(value) = matches.get_one::<u64>(param.name) {
                    args.insert(param.name.to_string(), Value::from(*value));
                }
            }
        }
    }

    Value::Object(args)
}

fn render(payload: &Value, is_error: bool, pretty: bool) {
    let text = if pretty {
        serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
    } else {
        payload.to_string()
    };

    if is_error {
        eprintln!("{text}");
    } else {
        println!("{text}");
    }
}

/// Render a front-end-level failure (configuration, client construction)
/// as the same envelope shape the tools produce.
fn frontend_failure(report: &color_eyre::eyre::Report, debug: bool) -> Value {
    let mut payload = envelope::failure(report.to_string(), None);
    if debug {
        payload["detail"] = Value::String(format!("{report:?}"));
    }
    payload
}

async fn invoke_tool(
    tool: &'static ToolDefinition,
    matches: &ArgMatches,
    global: &GlobalOptions,
) -> Result<i32> {
    let client = match PostizConfig::resolve(global.api_key.clone(), global.base_url.clone())
        .and_then(|config| PostizClient::new(&config))
    {
        Ok(client) => client,
        Err(report) => {
            render(&frontend_failure(&report, global.debug), true, global.pretty);
            return Ok(1);
        }
    };

    if global.verbose {
        eprintln!("Calling {}", tool.spec.name);
    }

    let arguments = matches_to_args(tool.spec, matches);
    let output = (tool.run)(client, arguments).await;

    render(&output.payload, output.is_error, global.pretty);
    Ok(if output.is_error { 1 } else { 0 })
}

/// Parse the process arguments and run the selected command. Returns the
/// process exit code.
pub async fn run() -> Result<i32> {
    let matches = build_command().get_matches();
    let global = GlobalOptions::from_matches(&matches);

    match matches.subcommand() {
        Some(("mcp", sub_matches)) => {
            crate::mcp::run(sub_matches, &global).await?;
            Ok(0)
        }
        Some((command, sub_matches)) => {
            if let Some(tool) = tools::find_cli(None, command) {
                return invoke_tool(tool, sub_matches, &global).await;
            }

            let (child, child_matches) = sub_matches
                .subcommand()
                .ok_or_else(|| eyre!("Missing subcommand for {command}"))?;
            let tool = tools::find_cli(Some(command), child)
                .ok_or_else(|| eyre!("Unknown command: {command} {child}"))?;
            invoke_tool(tool, child_matches, &global).await
        }
        None => Err(eyre!("A subcommand is required")),
    }
}
