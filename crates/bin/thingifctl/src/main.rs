//! # thingifctl — Thing-IF command line
//!
//! Composition root that wires the reqwest transport into the Thing-IF API.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Install the `tracing` subscriber
//! - Construct the transport adapter and inject it into an `ApiAuthor`
//! - Bind the owner and target, run one subcommand, print the JSON result
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no API logic belongs here.

mod cli;
mod config;

use anyhow::Context;
use clap::Parser;
use serde_json::{Value, json};
use thingif_adapter_http_reqwest::ReqwestTransport;
use thingif_app::ports::HttpTransport;
use thingif_app::{ApiAuthor, ThingIfApi};
use thingif_domain::command::{AliasAction, PostCommandRequest};
use thingif_domain::onboarding::OnboardWithVendorThingIdRequest;
use thingif_domain::query::{ListQueryOptions, QueryResult};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .with_writer(std::io::stderr)
        .init();

    let transport = ReqwestTransport::new(&config.http)?;
    let author = ApiAuthor::new(config.auth.token.clone(), config.kii_app()?, transport);
    let mut api = ThingIfApi::new(author, config.owner()?);
    if let Some(target) = config.target()? {
        api.set_target(target);
    }

    let output = run(&mut api, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run<T: HttpTransport>(api: &mut ThingIfApi<T>, command: Command) -> anyhow::Result<Value> {
    let output = match command {
        Command::Onboard {
            vendor_thing_id,
            password,
            thing_type,
            firmware_version,
        } => {
            let mut request = OnboardWithVendorThingIdRequest::new(
                vendor_thing_id,
                password,
                api.owner().clone(),
            );
            request.thing_type = thing_type;
            request.firmware_version = firmware_version;
            let result = api.onboard_with_vendor_thing_id(&request).await?;
            tracing::info!(thing_id = %result.thing_id, "onboarded");
            serde_json::to_value(result)?
        }
        Command::SendCommand {
            schema,
            schema_version,
            alias,
            actions,
            title,
        } => {
            let mut builder = PostCommandRequest::builder()
                .schema(schema, schema_version)
                .alias_action(AliasAction::new(alias, actions))
                .issuer(api.owner().clone());
            if let Some(title) = title {
                builder = builder.title(title);
            }
            let command = api.post_new_command(&builder.build()?).await?;
            serde_json::to_value(command)?
        }
        Command::GetCommand { command_id } => {
            serde_json::to_value(api.get_command(&command_id).await?)?
        }
        Command::ListCommands(page) => {
            page_to_json(api.list_commands(&ListQueryOptions::from(page)).await?)?
        }
        Command::ListTriggers(page) => {
            page_to_json(api.list_triggers(&ListQueryOptions::from(page)).await?)?
        }
        Command::EnableTrigger {
            trigger_id,
            disable,
        } => serde_json::to_value(api.enable_trigger(&trigger_id, !disable).await?)?,
        Command::DeleteTrigger { trigger_id } => {
            json!({ "triggerID": api.delete_trigger(&trigger_id).await? })
        }
        Command::State { alias: Some(alias) } => {
            Value::Object(api.get_state_by_alias(&alias).await?)
        }
        Command::State { alias: None } => Value::Object(api.get_state().await?),
    };
    Ok(output)
}

fn page_to_json<T: serde::Serialize>(page: QueryResult<T>) -> anyhow::Result<Value> {
    Ok(json!({
        "results": serde_json::to_value(page.results)?,
        "nextPaginationKey": page.pagination_key,
    }))
}
