use std::error::Error;
use std::fs::File;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::{info, warn};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use tokio::net::TcpListener;

use tutor::Provider;
use tutor::api::TutorClient;
use tutor::cli;
use tutor::core::config::{self, CliOverrides, ResolvedConfig};
use tutor::core::{
    ConceptSession, CourseCatalog, CourseContext, EventLog, QuestionBank, QuizSession,
};
use tutor::inference::ExplanationProvider;
use tutor::server::{self, AppState};

const LOG_FILE: &str = "tutor.log";

#[derive(Parser)]
#[command(
    name = "tutor",
    about = "Classroom AI tutor: concept explanations and practice quizzes"
)]
struct Args {
    /// LLM provider to use
    #[arg(short, long, value_enum, global = true)]
    provider: Option<Provider>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the REST backend
    Serve {
        /// Address to listen on, e.g. 127.0.0.1:3001
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Take a practice quiz for a unit
    Quiz {
        #[arg(short, long)]
        unit: Option<String>,
        /// Fetch questions from a running `tutor serve` instead of the built-in bank
        #[arg(long)]
        server: Option<String>,
        /// Print the recorded analytics events on exit
        #[arg(long)]
        dump_events: bool,
    },
    /// Ask the tutor to explain a concept
    Ask {
        #[arg(short, long)]
        unit: Option<String>,
        /// Send questions to a running `tutor serve` instead of the provider
        #[arg(long)]
        server: Option<String>,
        /// Print the recorded analytics events on exit
        #[arg(long)]
        dump_events: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The interactive subcommands own the terminal, so they log to the file only.
    init_logging(matches!(args.command, Command::Serve { .. }));

    let file_config = config::load_config()?;
    let mut overrides = CliOverrides {
        provider: args.provider.map(|p| p.as_str().to_string()),
        ..Default::default()
    };
    match &args.command {
        Command::Serve { bind } => overrides.bind_address = bind.clone(),
        Command::Quiz { unit, .. } | Command::Ask { unit, .. } => {
            overrides.unit_id = unit.clone()
        }
    }
    let config = config::resolve(&file_config, &overrides);
    info!(
        "Tutor starting up: provider={}, model={}, course={}/{}",
        config.provider, config.model_name, config.course_id, config.unit_id
    );

    match args.command {
        Command::Serve { .. } => serve(&config).await,
        Command::Quiz {
            server,
            dump_events,
            ..
        } => quiz(&config, server, dump_events).await,
        Command::Ask {
            server,
            dump_events,
            ..
        } => ask(&config, server, dump_events).await,
    }
}

fn init_logging(to_terminal: bool) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if to_terminal {
        loggers.push(TermLogger::new(
            LevelFilter::Info,
            log_config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if let Ok(log_file) = File::create(LOG_FILE) {
        loggers.push(WriteLogger::new(LevelFilter::Debug, log_config, log_file));
    }
    let _ = CombinedLogger::init(loggers);
}

fn course_for(config: &ResolvedConfig) -> CourseContext {
    CourseCatalog::builtin().context(
        Some(config.course_id.as_str()),
        Some(config.unit_id.as_str()),
    )
}

async fn serve(config: &ResolvedConfig) -> Result<(), Box<dyn Error>> {
    let explainer = cli::build_explainer(config)?;
    let state = AppState::new(explainer, EventLog::bounded(config.max_events));
    let listener = TcpListener::bind(&config.bind_address).await?;
    server::serve(listener, state, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            warn!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

async fn quiz(
    config: &ResolvedConfig,
    server: Option<String>,
    dump_events: bool,
) -> Result<(), Box<dyn Error>> {
    let events = EventLog::new();
    let mut session =
        QuizSession::new(&course_for(config), events.clone(), config.feedback_delay);

    match server {
        Some(url) => {
            let client = TutorClient::new(url);
            cli::quiz::run(&mut session, &client).await?;
            cli::forward_events(&client, &events).await;
        }
        None => {
            let bank = QuestionBank::builtin();
            cli::quiz::run(&mut session, &bank).await?;
        }
    }

    if dump_events {
        println!("{}", cli::dump_events(&events));
    }
    Ok(())
}

async fn ask(
    config: &ResolvedConfig,
    server: Option<String>,
    dump_events: bool,
) -> Result<(), Box<dyn Error>> {
    let events = EventLog::new();
    let client = server.map(TutorClient::new).map(Arc::new);
    let explainer: Arc<dyn ExplanationProvider> = match &client {
        Some(client) => Arc::clone(client) as Arc<dyn ExplanationProvider>,
        None => cli::build_explainer(config)?,
    };

    let mut session = ConceptSession::new(course_for(config), explainer, events.clone());
    cli::concept::run(&mut session).await?;

    if let Some(client) = &client {
        cli::forward_events(client, &events).await;
    }
    if dump_events {
        println!("{}", cli::dump_events(&events));
    }
    Ok(())
}
