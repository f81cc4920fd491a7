use clap::{value_parser, Arg, ArgAction, Command};
use log::{info, warn};
use saas_boost_console::billing::BillingApi;
use saas_boost_console::config::Config;
use saas_boost_console::dashboard;
use saas_boost_console::http;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub fn build_cli() -> Command {
    Command::new("saas-boost-console")
        .about("SaaS Boost console client")
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .num_args(1)
                .global(true)
                .help("Override RUST_LOG level (e.g., info, debug)"),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .help("Print version and exit")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("plans")
                .about("Fetch billing plans and print them as JSON")
                .arg(
                    Arg::new("timeout-secs")
                        .long("timeout-secs")
                        .num_args(1)
                        .value_parser(value_parser!(u64))
                        .help("Abort the request after this many seconds"),
                ),
        )
        .subcommand(
            Command::new("extensions")
                .about("Show installed SaaS Boost modules")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
}

pub fn init_logging(level: Option<&str>) {
    // Respect explicit level, else default to info, allow env override via RUST_LOG
    if let Some(lvl) = level {
        std::env::set_var("RUST_LOG", lvl);
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

pub async fn run_plans(timeout_secs: Option<u64>) -> anyhow::Result<()> {
    let cfg = Config::from_env().map_err(anyhow::Error::msg)?;
    let client = http::build_client(&cfg)?;
    let api = BillingApi::new(client, &cfg)?;

    let cancel = CancellationToken::new();
    spawn_canceller(cancel.clone(), timeout_secs);

    match api.fetch_plans(&cancel).await {
        Ok(body) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        // User-initiated; nothing to report.
        Err(e) if e.is_aborted() => {
            info!("{}", e);
            Ok(())
        }
        // Only the generic message reaches the user; the cause was already logged.
        Err(e) => Err(anyhow::Error::msg(e.to_string())),
    }
}

pub fn run_extensions(json: bool) -> anyhow::Result<()> {
    let summary = dashboard::installed_extensions(());
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary);
    }
    Ok(())
}

// Cancel on Ctrl-C or when the optional timeout elapses.
fn spawn_canceller(cancel: CancellationToken, timeout_secs: Option<u64>) {
    let timeout = async move {
        match timeout_secs {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::spawn(cancel_on(cancel, tokio::signal::ctrl_c(), timeout));
}

// A signal future that fails to register only disables the interrupt path.
async fn cancel_on<S, T>(cancel: CancellationToken, signal: S, timeout: T)
where
    S: Future<Output = io::Result<()>>,
    T: Future<Output = ()>,
{
    let interrupt = async {
        match signal.await {
            Ok(()) => info!("interrupt received, canceling request"),
            Err(e) => {
                warn!("unable to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await
            }
        }
    };
    tokio::select! {
        _ = cancel.cancelled() => return,
        _ = interrupt => {}
        _ = timeout => info!("timeout elapsed, canceling request"),
    }
    cancel.cancel();
}
