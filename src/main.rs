use std::sync::Arc;

use clap::Parser;

use docchat::application::ports::CompletionClient;
use docchat::application::services::ChatSession;
use docchat::domain::{CompletionResult, FileSelection};
use docchat::infrastructure::llm::{GeminiClient, MockCompletionClient};
use docchat::infrastructure::observability::{TracingConfig, init_tracing};
use docchat::infrastructure::text_processing::CompositeFileLoader;
use docchat::presentation::{
    CliArgs, Environment, ScaffoldConfig, Settings, TerminalView, run_repl,
};

const SCAFFOLD_ANSWER: &str = "Scaffold mode is on, so no request was sent to the API.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();

    let environment = Environment::from_env()?;
    let settings = Settings::load(&args.config_dir, environment)?;

    init_tracing(&TracingConfig::new(
        environment.to_string(),
        &settings.logging.level,
        settings.logging.enable_json,
    ));

    let scaffold_config = ScaffoldConfig::from_env();
    let completion_client: Arc<dyn CompletionClient> = if scaffold_config.enabled {
        tracing::info!("Scaffold mode enabled, using mock completion client");
        Arc::new(
            MockCompletionClient::with_result(CompletionResult::text(SCAFFOLD_ANSWER))
                .delayed(scaffold_config.response_delay),
        )
    } else {
        Arc::new(GeminiClient::new(
            settings.gemini.api_key.clone(),
            &settings.gemini.model,
            &settings.gemini.base_url,
            settings.gemini.request_timeout(),
            settings.chat.default_system_instruction.clone(),
            settings.retry.policy(),
        )?)
    };

    let file_loader = Arc::new(CompositeFileLoader::with_default_adapters());
    let view = Arc::new(TerminalView::stdout());

    let mut session = ChatSession::new(
        completion_client,
        file_loader,
        view,
        settings.chat.max_context_chars,
    );

    if let Some(system) = args.system {
        session.set_system_instruction(system);
    }

    if let Some(path) = args.file {
        let selection = match args.media_type {
            Some(media_type) => FileSelection::new(path, media_type),
            None => FileSelection::from_path(path),
        };
        session.attach_file(&selection).await;
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_repl(&mut session, stdin, &mut stdout).await?;

    tracing::info!(turns = session.transcript().len(), "Chat ended");
    Ok(())
}
