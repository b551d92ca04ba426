use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use esg_bank::config::AppConfig;
use esg_bank::error::AppError;
use esg_bank::questionnaire::{bank_router, organize, OrganizedBank, Question};
use esg_bank::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "ESG Question Bank",
    about = "Serve and inspect ESG question banks from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect a question bank without starting the service
    Bank {
        #[command(subcommand)]
        command: BankCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum BankCommand {
    /// Organize a flat question list and print the display outline
    Organize(OrganizeArgs),
}

#[derive(Args, Debug)]
struct OrganizeArgs {
    /// Path to a JSON file holding the flat question list
    #[arg(long)]
    questions: PathBuf,
    /// Emit the organized bank as JSON instead of a text outline
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Bank {
            command: BankCommand::Organize(args),
        } => run_bank_organize(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(bank_router())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "question bank service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_bank_organize(args: OrganizeArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.questions)?;
    let questions: Vec<Question> = serde_json::from_str(&raw)
        .map_err(|err| AppError::InvalidInput(format!("question list does not parse: {err}")))?;

    let bank = organize(&questions);

    if args.json {
        let payload = json!({
            "questions": bank.questions,
            "categories": bank.categories,
            "warnings": bank.warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
        });
        println!("{payload:#}");
    } else {
        render_outline(&bank);
    }

    Ok(())
}

fn render_outline(bank: &OrganizedBank) {
    println!("Question bank outline");

    for entry in &bank.questions {
        let marker = if entry.question.is_not_question {
            " (title only)"
        } else {
            ""
        };
        println!("{} {}{}", entry.display_no, entry.question.title, marker);
    }

    println!("\nCategories");
    for bucket in &bank.categories {
        let name = bucket
            .category
            .as_ref()
            .map(|category| category.name.as_str())
            .unwrap_or("(uncategorized)");
        println!("- {}: {} question(s)", name, bucket.question_ids.len());
    }

    if bank.warnings.is_empty() {
        println!("\nWarnings: none");
    } else {
        println!("\nWarnings");
        for warning in &bank.warnings {
            println!("- {warning}");
        }
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
