use anyhow::{Context, Result};
use std::path::Path;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use concretego_client::{
    ChargesRequest, Cli, ClientError, ClientRegistration, Command, Configuration,
    ReasonCodeResponse, from_xml, to_xml, to_xml_document,
};

fn init_logging(cli: &Cli) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.verbosity().log_filter()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn check_config(config: Option<&Path>, section: &str) -> Result<()> {
    let configuration = Configuration::load(config)
        .context("Failed to load configuration")?
        .with_environment_overrides(section);

    let registration = ClientRegistration::from_configuration_section(&configuration, section)
        .with_context(|| format!("Failed to bind section '{section}'"))?;

    match registration.build() {
        Ok(provider) => {
            let client = provider.client();
            println!(
                "Section '{}' is valid (username: {}, appId: {}{})",
                section,
                client.username(),
                client.app_id(),
                client
                    .slug()
                    .map(|slug| format!(", slug: {slug}"))
                    .unwrap_or_default()
            );
            Ok(())
        }
        Err(ClientError::OptionsValidation { section, failures }) => {
            for failure in &failures {
                eprintln!("{section}: {failure}");
            }
            anyhow::bail!(
                "{} required option(s) missing in section '{}'",
                failures.len(),
                section
            )
        }
        Err(other) => Err(other.into()),
    }
}

fn encode_charges(input: &Path, document: bool) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {:?}", input))?;
    let charges: ChargesRequest = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse charges request from {:?}", input))?;

    let xml = if document {
        to_xml_document(&charges)?
    } else {
        to_xml(&charges)?
    };
    println!("{xml}");
    Ok(())
}

fn decode_reason_codes(input: &Path) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {:?}", input))?;
    let response: ReasonCodeResponse = from_xml(&content)
        .with_context(|| format!("Failed to decode reason codes from {:?}", input))?;

    tracing::info!(count = response.reason_codes().len(), "decoded reason codes");
    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("Failed to serialize reason codes")?
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(&cli);

    match &cli.command {
        Command::CheckConfig { config, section } => check_config(config.as_deref(), section),
        Command::EncodeCharges { input, document } => encode_charges(input, *document),
        Command::DecodeReasonCodes { input } => decode_reason_codes(input),
    }
}

