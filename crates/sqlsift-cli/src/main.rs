mod cli;
mod commands;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use cli::{ClassifyParams, LangsParams, ScanParams, TreeParams, build_cli};

fn main() {
    init_logging();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("scan", m)) => {
            let params = ScanParams::from_matches(m);
            commands::scan::run(params.into());
        }
        Some(("classify", m)) => {
            let params = ClassifyParams::from_matches(m);
            commands::classify::run(params.into());
        }
        Some(("tree", m)) => {
            let params = TreeParams::from_matches(m);
            commands::tree::run(params.into());
        }
        Some(("langs", m)) => {
            let _params = LangsParams::from_matches(m);
            commands::langs::run();
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Logs go to stderr so stdout stays valid JSON.
fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("SQLSIFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
