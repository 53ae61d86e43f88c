mod args;
mod template;

use anyhow::Context;
use anyhow::Result;
use args::Cli;
use args::Command;
use boardroom_core::BoardConfig;
use boardroom_orchestrator::DrainSummary;
use boardroom_orchestrator::Orchestrator;
use boardroom_orchestrator::registry::executive_board;
use boardroom_protocol::Decision;
use boardroom_protocol::Message;
use boardroom_protocol::Role;
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;
use template::TemplateGenerator;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[derive(Debug, Serialize)]
struct ReportsOutput {
    decisions: Vec<Decision>,
    failures: Vec<FailureOutput>,
}

#[derive(Debug, Serialize)]
struct FailureOutput {
    role: Role,
    error: String,
}

#[derive(Debug, Serialize)]
struct DeliveryOutput {
    messages: Vec<ProcessedOutput>,
    failures: Vec<String>,
    pending: usize,
}

#[derive(Debug, Serialize)]
struct ProcessedOutput {
    message: Message,
    status: String,
    attempts: u32,
}

#[derive(Debug, Serialize)]
struct BroadcastOutput {
    delivered: Vec<Message>,
    failures: Vec<FailureOutput>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => BoardConfig::load(path)
            .with_context(|| format!("loading board file {}", path.display()))?,
        None => BoardConfig::default(),
    };
    let mut orchestrator = build_orchestrator(config);

    match cli.command {
        Command::Reports => {
            let batch = orchestrator.generate_all_reports().await;
            for decision in &batch.decisions {
                orchestrator.record_decision(decision.clone()).await?;
            }
            print_json(&ReportsOutput {
                decisions: batch.decisions,
                failures: batch
                    .failures
                    .into_iter()
                    .map(|failure| FailureOutput {
                        role: failure.role,
                        error: failure.error.to_string(),
                    })
                    .collect(),
            })
        }
        Command::Send {
            from,
            to,
            subject,
            body,
            priority,
            respond,
        } => {
            let message = Message::new(from, to, subject, body)
                .with_priority(priority)
                .requiring_response(respond);
            let mut failures = Vec::new();
            if let Err(err) = orchestrator.send_message(message).await {
                failures.push(err.to_string());
            }
            let summary = orchestrator.process_all().await;
            print_json(&delivery_output(&orchestrator, failures, summary))
        }
        Command::Broadcast {
            from,
            subject,
            body,
            priority,
        } => {
            let report = orchestrator
                .broadcast_message(from, &subject, &body, priority)
                .await?;
            print_json(&BroadcastOutput {
                delivered: report.delivered,
                failures: report
                    .failures
                    .into_iter()
                    .map(|failure| FailureOutput {
                        role: failure.message.to.role().unwrap_or(from),
                        error: failure.error.to_string(),
                    })
                    .collect(),
            })
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        "info,boardroom_core=debug,boardroom_orchestrator=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn build_orchestrator(config: BoardConfig) -> Orchestrator {
    let roles = config.seated_roles();
    let registry = executive_board(&roles, Arc::new(TemplateGenerator), &config.orchestrator);
    Orchestrator::new(registry, config.company, config.orchestrator)
}

fn delivery_output(
    orchestrator: &Orchestrator,
    mut failures: Vec<String>,
    summary: DrainSummary,
) -> DeliveryOutput {
    failures.extend(summary.failures.iter().map(ToString::to_string));
    DeliveryOutput {
        messages: orchestrator
            .processed_messages()
            .iter()
            .map(|entry| ProcessedOutput {
                message: entry.message.clone(),
                status: entry.message.status().to_string(),
                attempts: entry.attempts,
            })
            .collect(),
        failures,
        pending: orchestrator.pending_len(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
