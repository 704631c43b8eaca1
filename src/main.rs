//! resume-parser: turn resume documents into structured data

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_parser::cli::{self, Cli, Commands, ConfigAction};
use resume_parser::config::Config;
use resume_parser::input::file_detector::FileType;
use resume_parser::input::InputManager;
use resume_parser::llm::{ProviderName, ProviderRegistry};
use resume_parser::output::{save_report_to_file, suggest_filename, ParseReport, ReportGenerator};
use resume_parser::parsing::{parse_resume_cancellable, ParseMethod};
use resume_parser::{Result, ResumeParserError};
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Parse {
            resume,
            method,
            provider,
            output,
            save,
            detailed,
        } => {
            cli::validate_file_extension(&resume, &FileType::SUPPORTED_EXTENSIONS)
                .map_err(|e| ResumeParserError::InvalidInput(format!("Resume file: {}", e)))?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeParserError::InvalidInput)?,
                None => config.output.format,
            };
            let method: ParseMethod = match method {
                Some(name) => name.parse()?,
                None => config.parsing.default_method,
            };
            let provider = provider.or_else(|| config.parsing.default_provider.map(|p| p.to_string()));

            info!("Parsing {} with method {}", resume.display(), method);
            let registry = ProviderRegistry::from_config(&config.providers)?;

            let mut input_manager = InputManager::new().with_cache(config.parsing.cache_documents);
            let text = input_manager.extract_text(&resume).await?;
            info!("Extracted {} characters", text.len());

            let spinner = (method == ParseMethod::Llm).then(|| llm_spinner(provider.as_deref()));
            let started = Instant::now();
            let cancelled = async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, cancelling provider request");
                }
            };
            let result = parse_resume_cancellable(
                &text,
                method.as_str(),
                provider.as_deref(),
                &registry,
                cancelled,
            )
            .await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            let parsed = result?;

            if parsed.is_empty() {
                warn!("No resume sections were recognized; headings must be on their own line in capitals");
            } else {
                info!("Populated {} resume categories", parsed.populated_categories());
            }

            let mut report = ParseReport::new(parsed, resume.to_string_lossy(), method)
                .with_timing(started.elapsed().as_millis() as u64, text.len());
            if method == ParseMethod::Llm {
                if let Some(provider) = &provider {
                    report = report.with_provider(provider.clone());
                }
            }

            let mut output_config = config.output.clone();
            output_config.detailed |= detailed;
            let generator = ReportGenerator::from_config(&output_config);
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(&output_format, &resume.to_string_lossy(), true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)?;
                    println!("💾 Saved {:?} output to {}", output_format, path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Providers => {
            println!("🤖 LLM Providers\n");
            for name in ProviderName::ALL {
                let settings = config.providers.settings(name);
                let status = if settings.resolve_api_key().is_some() {
                    "✅ ready"
                } else {
                    "❌ no API key"
                };
                println!("  • {:<7} {} (model {}, key from ${})", name, status, settings.model, settings.api_key_env);
            }
            if let Some(default) = config.parsing.default_provider {
                println!("\nDefault provider: {}", default);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ResumeParserError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
            }
            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset successfully!");
            }
            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn llm_spinner(provider: Option<&str>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Waiting for {}...", provider.unwrap_or("provider")));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
