//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use thingif_domain::command::Action;
use thingif_domain::query::ListQueryOptions;

#[derive(Parser, Debug)]
#[command(name = "thingifctl")]
#[command(version, about = "Drive a Thing-IF application from the command line", long_about = None)]
pub struct Cli {
    /// Path of the TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Onboard a thing by vendor thing id and print its credentials
    Onboard {
        #[arg(long)]
        vendor_thing_id: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        thing_type: Option<String>,
        #[arg(long)]
        firmware_version: Option<String>,
    },
    /// Send a command to the target
    SendCommand {
        #[arg(long)]
        schema: String,
        #[arg(long, default_value_t = 1)]
        schema_version: u32,
        /// Alias the actions are addressed to
        #[arg(long)]
        alias: String,
        /// Action as `name=value`; the value is parsed as JSON, or kept as a string
        #[arg(
            long = "action",
            value_name = "NAME=VALUE",
            value_parser = parse_action,
            required = true
        )]
        actions: Vec<Action>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Print one command of the target
    GetCommand { command_id: String },
    /// List the commands of the target
    ListCommands(PageArgs),
    /// List the triggers of the target
    ListTriggers(PageArgs),
    /// Enable a trigger, or disable it with `--disable`
    EnableTrigger {
        trigger_id: String,
        #[arg(long)]
        disable: bool,
    },
    /// Delete a trigger
    DeleteTrigger { trigger_id: String },
    /// Print the latest state of the target, or of one alias
    State {
        #[arg(long)]
        alias: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct PageArgs {
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub pagination_key: Option<String>,
}

impl From<PageArgs> for ListQueryOptions {
    fn from(args: PageArgs) -> Self {
        Self {
            best_effort_limit: args.limit,
            pagination_key: args.pagination_key,
        }
    }
}

fn parse_action(raw: &str) -> Result<Action, String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    if name.is_empty() {
        return Err("action name is empty".to_string());
    }
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok(Action::new(name, value))
}
