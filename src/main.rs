mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let mut cmd = cli::build_cli();
    let matches = cmd.get_matches_mut();
    let log_level = matches
        .subcommand()
        .and_then(|(_, sub)| sub.get_one::<String>("log-level"))
        .or_else(|| matches.get_one::<String>("log-level"))
        .cloned();
    let version_flag = matches.get_flag("version");

    cli::init_logging(log_level.as_deref());

    if version_flag {
        println!("saas-boost-console {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match matches.subcommand() {
        Some(("plans", sub)) => cli::run_plans(sub.get_one::<u64>("timeout-secs").copied()).await,
        Some(("extensions", sub)) => cli::run_extensions(sub.get_flag("json")),
        _ => {
            cmd.print_help()?;
            Ok(())
        }
    }
}
