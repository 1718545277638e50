//! ledgerdash main entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use ledgerdash_api::start_server;
use ledgerdash_config::{Config, ConfigError, CurrencyConfig, Period, Regime};
use ledgerdash_core::{Dashboard, DashboardQuery, Ledger, TimeContext};
use ledgerdash_store::{load_or_seed, JsonFileStore, StoreRef};
use ledgerdash_utils::format_money;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "ledgerdash")]
#[command(version = "0.1.0")]
#[command(about = "Multi-company ledger dashboard with cash and accrual reporting", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Print the dashboard for a selection as JSON
    Report {
        /// "consolidated" or a company id
        #[arg(long)]
        scope: Option<String>,
        #[arg(long)]
        period: Option<Period>,
        #[arg(long)]
        regime: Option<Regime>,
        /// Start date for a custom period (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// End date for a custom period (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print the default configuration file
    InitConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(Command::InitConfig) = args.command {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, missing) = match Config::load(&args.config) {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), true),
        Err(e) => return Err(e).with_context(|| format!("Failed to load {}", args.config.display())),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();
    if missing {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }

    let rt = Runtime::new()?;
    rt.block_on(run(config, args.config, args.command))
}

async fn run(config: Config, config_path: PathBuf, command: Option<Command>) -> anyhow::Result<()> {
    let ledger_path = config.ledger_path();
    log::info!("Ledger file: {}", ledger_path.display());

    let store: StoreRef = Arc::new(JsonFileStore::new(ledger_path));
    let data = load_or_seed(store.as_ref())
        .await
        .context("Failed to load ledger document")?;
    let ledger = Ledger::with_companies(data, &config.companies);

    for issue in ledger.issues() {
        log::warn!("{}", issue);
    }

    match command {
        Some(Command::Report {
            scope,
            period,
            regime,
            start,
            end,
            format,
        }) => {
            let query = report_query(&config, &ledger, scope, period, regime, start, end)?;
            let dashboard = ledger.dashboard(&query, chrono::Local::now().date_naive());
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dashboard)?),
                OutputFormat::Text => print!("{}", render_text(&dashboard, &config.currency)),
            }
            Ok(())
        }
        _ => start_server(config, config_path, ledger, store).await,
    }
}

fn report_query(
    config: &Config,
    ledger: &Ledger,
    scope: Option<String>,
    period: Option<Period>,
    regime: Option<Regime>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> anyhow::Result<DashboardQuery> {
    let defaults = &config.dashboard;
    let scope = ledger.parse_scope(scope.as_deref().unwrap_or(defaults.default_scope.as_str()))?;
    let period = period.unwrap_or(defaults.default_period);
    let regime = regime.unwrap_or(defaults.default_regime);

    let time = match (period, start, end) {
        (Period::Custom, Some(start), Some(end)) => TimeContext::custom(start, end),
        (Period::Custom, _, _) => anyhow::bail!("--period custom needs both --start and --end"),
        (period, _, _) => TimeContext::new(period),
    };

    Ok(DashboardQuery::new(scope, time, regime).with_limits(defaults))
}

/// Plain-text summary of the headline figures
fn render_text(dashboard: &Dashboard, currency: &CurrencyConfig) -> String {
    let money = |amount| {
        format_money(
            amount,
            &currency.symbol,
            currency.decimal_places,
            &currency.thousands_separator,
            &currency.decimal_separator,
        )
    };
    let kpis = &dashboard.kpis;
    let treasury = &dashboard.treasury;
    let income = &dashboard.income_statement;

    let mut out = format!(
        "{} | {} | {}\n",
        dashboard.scope, dashboard.period.description, dashboard.regime
    );
    out.push_str(&format!("Revenue            {}\n", money(kpis.revenue)));
    out.push_str(&format!("Expense            {}\n", money(kpis.expense)));
    out.push_str(&format!("Profit             {}\n", money(kpis.profit)));
    out.push_str(&format!("Margin             {}%\n", kpis.margin.round_dp(2)));
    out.push_str(&format!("Fees               {}\n", money(kpis.fee_total)));
    out.push_str(&format!("Transactions       {}\n", kpis.transaction_count));
    out.push_str(&format!("Settled balance    {}\n", money(treasury.settled_balance)));
    out.push_str(&format!("Projected balance  {}\n", money(treasury.projected_balance)));
    out.push_str(&format!("Operating profit   {}\n", money(income.operating_profit)));
    out
}
