//! CLI entrypoint for symptom-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use council_application::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use council_application::ports::progress::NoProgress;
use council_application::ports::search::SearchPort;
use council_application::{
    RunOrchestrationUseCase, RunSessionTurnInput, RunSessionTurnUseCase, SessionStorePort,
};
use council_domain::Model;
use council_infrastructure::{
    ConfigLoader, InMemorySessionStore, JsonlConversationLogger, KeywordSearchIndex,
    OpenAiGateway, SubredditSearchTool, resolve_api_key,
};
use council_presentation::{ChatRepl, Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        println!();
        println!("Known models:");
        for model in Model::known_models() {
            println!("  - {}", model);
        }
        return Ok(());
    }

    if cli.list_nodes {
        println!("{}", ConsoleFormatter::format_nodes());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    config.validate().context("Invalid configuration")?;
    let params = config.orchestration.to_params();

    info!("Starting symptom-council");

    // === Dependency Injection ===
    // Only search mode treats unreadable thread data as fatal
    let index = match KeywordSearchIndex::load(&config.search.data_path) {
        Ok(index) => index,
        Err(e) if cli.search.is_none() => {
            warn!("{}; thread search disabled", e);
            KeywordSearchIndex::empty()
        }
        Err(e) => return Err(e).context("Failed to load search data"),
    };
    let index: Arc<dyn SearchPort> = Arc::new(index);

    // Search mode needs no gateway
    if let Some(query) = &cli.search {
        let hits = index.search(query, params.search_limit);
        println!("{}", ConsoleFormatter::format_search(query, &hits));
        return Ok(());
    }

    let project_root = std::env::current_dir().context("Failed to read working directory")?;
    let api_key = resolve_api_key(&config.provider.api_key_env, &project_root)?;
    let gateway = Arc::new(OpenAiGateway::new(
        &config.provider.base_url,
        api_key,
        Duration::from_secs(config.provider.timeout_seconds),
    )?);

    let search_tool = Arc::new(
        SubredditSearchTool::new(Arc::clone(&index)).with_default_limit(params.search_limit),
    );

    let log_path = cli
        .log_file
        .clone()
        .or_else(|| config.logging.conversation_log.as_ref().map(PathBuf::from));
    let logger: Arc<dyn ConversationLogger> = match log_path
        .as_ref()
        .and_then(JsonlConversationLogger::open)
    {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => {
            if let Some(path) = &log_path {
                warn!("Conversation logging disabled; could not open {}", path.display());
            }
            Arc::new(NoConversationLogger)
        }
    };

    let store: Arc<dyn SessionStorePort> = match &config.session.store_path {
        Some(path) => Arc::new(InMemorySessionStore::with_persistence(path)),
        None => Arc::new(InMemorySessionStore::new()),
    };

    let orchestration = RunOrchestrationUseCase::new(gateway)
        .with_search_tool(search_tool)
        .with_params(params)
        .with_conversation_logger(logger);
    let use_case = RunSessionTurnUseCase::new(orchestration, store);

    let model = cli
        .model
        .as_deref()
        .map(Model::from)
        .unwrap_or_else(|| config.models.default_model());

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(use_case, &cli.session, model)
            .with_active_node(&cli.node)
            .with_enabled_nodes(cli.enable.clone())
            .with_output(cli.output)
            .with_progress(!cli.quiet);
        repl.run().await?;
        return Ok(());
    }

    // Single message mode - message is required
    let message = match cli.message {
        Some(m) => m,
        None => bail!("Message is required. Use --chat for interactive mode."),
    };

    let mut input = RunSessionTurnInput::new(&cli.session, message, model)
        .with_active_node(&cli.node)
        .with_enabled_nodes(cli.enable.clone());
    if let Some(query) = &cli.search_query {
        input = input.with_search_query(query);
    }
    if let Some(bucket) = &cli.save_to {
        input = input.with_save_to(bucket);
    }

    let result = if cli.quiet {
        use_case.execute(input, &NoProgress).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute(input, &progress).await?
    };

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Response => ConsoleFormatter::format_response_only(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };
    print!("{}", output);
    if cli.output != OutputFormat::Response {
        println!();
    }

    Ok(())
}
