#![deny(unused)]
//! slide-intent: resolve slide-builder chat messages into component intents.
//!
//! `resolve` prints the resolution for one message as JSON; `chat` runs an
//! interactive session against the local preview backend.

mod preview;
mod telemetry;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use slide_intent_core::{
    config::AppConfig,
    traits::IntentRouter,
    types::{ComponentKind, ConfigPatch, IntentRequest},
};
use slide_intent_model_gateway::create_client;
use slide_intent_resolver::{ChatService, DeterministicRouter, LlmExtractor};
use slide_intent_store::InMemorySessionStore;

use preview::PreviewBackend;

#[derive(Parser)]
#[command(name = "slide-intent", version)]
#[command(about = "Resolve slide-builder chat messages into component intents")]
struct Args {
    /// Skip the LLM and resolve with keyword heuristics only
    #[arg(long, global = true)]
    no_llm: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one message and print the intent as JSON
    Resolve {
        message: String,

        /// Fix the component kind (METRICS, TABLE, TEXT_BOX, CHART, IMAGE)
        #[arg(long, short = 'k')]
        kind: Option<String>,

        /// Fix the instance count
        #[arg(long, short = 'n')]
        count: Option<u32>,

        /// Caller configuration as JSON, e.g. {"component_type":"TABLE","config":{"rows":4}}
        #[arg(long)]
        config: Option<String>,

        /// Include the debug trace
        #[arg(long)]
        debug: bool,
    },
    /// Interactive chat against the local preview backend
    Chat {
        /// Session id to use
        #[arg(long, short = 's')]
        session: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    telemetry::configure_tracing(&config.telemetry)?;
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Configuration not loaded, using defaults");
    }

    let router = build_router(&config, args.no_llm)?;

    match args.command {
        Command::Resolve { message, kind, count, config, debug } => {
            let mut request = IntentRequest::text(message);
            if let Some(kind) = kind {
                request = request.with_kind(kind.parse::<ComponentKind>()?);
            }
            if let Some(count) = count {
                request = request.with_count(count);
            }
            if let Some(json) = config {
                let patch: ConfigPatch =
                    serde_json::from_str(&json).context("--config is not a valid component configuration")?;
                request = request.with_config(patch);
            }
            if debug {
                request = request.with_debug();
            }

            let resolution = router.resolve(&request).await;
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
        Command::Chat { session } => run_chat(router, session).await?,
    }

    Ok(())
}

fn build_router(config: &AppConfig, no_llm: bool) -> anyhow::Result<DeterministicRouter> {
    if no_llm {
        return Ok(DeterministicRouter::heuristic_only());
    }
    Ok(match create_client(&config.llm)? {
        Some(client) => DeterministicRouter::new(LlmExtractor::new(client, config.llm.timeout())),
        None => DeterministicRouter::heuristic_only(),
    })
}

async fn run_chat(router: DeterministicRouter, session: Option<String>) -> anyhow::Result<()> {
    let service = ChatService::new(
        Arc::new(router),
        Arc::new(InMemorySessionStore::new()),
        Arc::new(PreviewBackend),
    );
    let mut session_id = session;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Describe what to add to the slide. Prefix with /debug to inspect, /quit to exit.");
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line == "/quit" || line == "/exit" {
            break;
        }

        let request = match line.strip_prefix("/debug") {
            Some(rest) => IntentRequest::text(rest.trim()).with_debug(),
            None => IntentRequest::text(line),
        };

        let reply = service.handle(session_id.as_deref(), request).await;
        if !reply.session_id.is_empty() {
            session_id = Some(reply.session_id.clone());
        }

        println!("{}", reply.response_text);
        if let Some(debug) = &reply.debug {
            println!("{}", serde_json::to_string_pretty(debug)?);
        }
        if let Some(element) = &reply.element {
            println!("  [{}] {}", element.id, element.html);
        }
        for element in &reply.updated_elements {
            println!("  [{}] {}", element.id, element.html);
        }
        if !reply.suggestions.is_empty() {
            println!("  Try: {}", reply.suggestions.join(" | "));
        }
    }

    Ok(())
}
