//! formflow command-line front end.
//!
//! # Usage
//!
//! ```bash
//! formflow submit -f navn=Ola -f epost=ola@eks.no -f telefon=99887766 -f prosjekt_type=Kjøkken
//! formflow check-config
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); the banner text goes to
//! stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use formflow_engine::formflow_config::{ConfigError, FormflowConfig};
use formflow_engine::{FormController, FormSchema, ResendClient, SubmitOutcome, SubmitRejection};

/// Validation rejected the form.
const EXIT_REJECTED: u8 = 2;
/// Delivery failed unmasked, or the mail settings are unusable.
const EXIT_FAILED: u8 = 1;

#[derive(Parser)]
#[command(name = "formflow", version, about = "Validate and deliver contact form submissions")]
struct Cli {
    /// Config file (default: $FORMFLOW_CONFIG or ~/.formflow/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the given field values and send them as one submission
    Submit {
        /// Field value as `name=value`; repeat for each field
        #[arg(long = "field", short = 'f', value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Which field declarations to validate against
        #[arg(long, value_enum, default_value_t = SchemaChoice::Configured)]
        schema: SchemaChoice,
    },
    /// Load the configuration and report what would be used
    CheckConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SchemaChoice {
    /// `[form] fields` from the config, or the contact form when unset
    Configured,
    /// The built-in contact form
    Contact,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("field name missing in `{raw}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn load_config(explicit: Option<&PathBuf>) -> Result<FormflowConfig, ConfigError> {
    match explicit {
        Some(path) => FormflowConfig::load_from(path),
        None => Ok(FormflowConfig::load()?.unwrap_or_default()),
    }
}

async fn submit(
    config: &FormflowConfig,
    fields: Vec<(String, String)>,
    schema: SchemaChoice,
) -> Result<ExitCode> {
    let mut settings = config.form_settings();
    if schema == SchemaChoice::Contact {
        settings.schema = FormSchema::contact();
    }
    let mail = config
        .mail_settings()
        .context("email delivery is not configured")?;
    let client = ResendClient::new(&mail).context("failed to build HTTP client")?;

    let mut controller = FormController::new(settings);
    for (name, value) in fields {
        controller.on_field_input(&name, value);
    }

    let outcome = controller.on_submit(&client).await;

    if let SubmitOutcome::Rejected(rejection) = &outcome {
        match rejection {
            SubmitRejection::Invalid { fields } => {
                for (name, err) in fields {
                    eprintln!("{name}: {}", err.user_message());
                }
            }
            SubmitRejection::Busy => eprintln!("{rejection}"),
        }
        return Ok(ExitCode::from(EXIT_REJECTED));
    }

    if let Some(banner) = controller.state().banner() {
        println!("{}", banner.text());
    }

    Ok(match outcome {
        SubmitOutcome::Failed(_) => ExitCode::from(EXIT_FAILED),
        _ => ExitCode::SUCCESS,
    })
}

fn check_config(config: &FormflowConfig, explicit: Option<&PathBuf>) -> Result<ExitCode> {
    let path = explicit.cloned().or_else(FormflowConfig::path);
    match path {
        Some(path) if path.exists() => println!("config: {}", path.display()),
        Some(path) => println!("config: {} (not found, using defaults)", path.display()),
        None => println!("config: none (using defaults)"),
    }

    let form = config.form_settings();
    println!(
        "form: {} field(s), mask_submission_failures={}, banner={}s",
        form.schema.len(),
        form.mask_submission_failures,
        form.banner_duration.as_secs()
    );

    match config.mail_settings() {
        Ok(mail) => {
            println!("mail: {} -> {} via {}", mail.from, mail.to, mail.endpoint);
            println!("mail: api key set (redacted)");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("mail: {err}");
            Ok(ExitCode::from(EXIT_FAILED))
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref()).context("failed to load configuration")?;

    match cli.command {
        Commands::Submit { fields, schema } => submit(&config, fields, schema).await,
        Commands::CheckConfig => check_config(&config, cli.config.as_ref()),
    }
}
