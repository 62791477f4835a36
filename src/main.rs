use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payflow::application::correlator::SessionCorrelator;
use payflow::domain::config::{FundingSource, WebCheckoutParams};
use payflow::domain::ports::ConfigProviderArc;
use payflow::domain::signal::RelaunchSignal;
use payflow::error::CheckoutError;
use payflow::infrastructure::config_provider::{
    AlwaysForeground, FileConfigProvider, StaticConfigProvider,
};
use payflow::infrastructure::scripted::ScriptedWebClient;
use payflow::interfaces::csv::scenario_reader::{
    ScenarioOp, ScenarioReader, parse_finish_outcome, parse_start_outcome,
};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Drives a web-checkout correlator through a scripted scenario and prints
/// each terminal event as one JSON line.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scenario CSV file (columns: op, order, value)
    scenario: PathBuf,

    /// Path to a JSON checkout config. Defaults to a built-in sandbox config.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config: ConfigProviderArc = match &cli.config {
        Some(path) => Arc::new(FileConfigProvider::load(path).into_diagnostic()?),
        None => Arc::new(StaticConfigProvider::sandbox("demo-client")),
    };
    let client = Arc::new(ScriptedWebClient::new());
    let correlator =
        SessionCorrelator::new(Arc::clone(&client), config, Arc::new(AlwaysForeground));

    let file = File::open(&cli.scenario).into_diagnostic()?;
    let reader = ScenarioReader::new(file);
    for step in reader.steps() {
        let step = step.into_diagnostic()?;
        match step.op {
            ScenarioOp::ScriptStart => {
                let outcome = parse_start_outcome(step.require_value().into_diagnostic()?)
                    .into_diagnostic()?;
                client.push_start(outcome);
            }
            ScenarioOp::ScriptFinish => {
                let outcome = parse_finish_outcome(step.require_value().into_diagnostic()?)
                    .into_diagnostic()?;
                client.push_finish(outcome);
            }
            ScenarioOp::Initiate => {
                correlator.subscribe(|event| match serde_json::to_string(&event) {
                    Ok(line) => println!("{line}"),
                    Err(err) => eprintln!("Error encoding event: {err}"),
                });
                let order_id = step.order.clone().ok_or_else(|| {
                    CheckoutError::Scenario("initiate step needs an order id".to_string())
                })
                .into_diagnostic()?;
                let funding = FundingSource::parse(step.value.as_deref().unwrap_or("paypal"));
                correlator
                    .initiate(order_id, WebCheckoutParams { funding })
                    .await
                    .into_diagnostic()?;
            }
            ScenarioOp::Relaunch => {
                let signal = RelaunchSignal::parse(step.require_value().into_diagnostic()?)
                    .into_diagnostic()?;
                let handled = correlator.on_relaunch(&signal);
                tracing::debug!(handled, "relaunch signal routed");
            }
            ScenarioOp::Resume => correlator.on_foreground_resumed(),
            ScenarioOp::Wait => {
                let millis: u64 = step
                    .require_value()
                    .into_diagnostic()?
                    .parse()
                    .map_err(|_| CheckoutError::Scenario("bad wait duration".to_string()))
                    .into_diagnostic()?;
                tokio::time::sleep(Duration::from_millis(millis)).await;
            }
        }
    }

    Ok(())
}
