mod cli;
mod commands;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{CompileParams, DumpParams, build_cli, verbosity};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("compile", m)) => {
            init_tracing(verbosity(m));
            let params = CompileParams::from_matches(m);
            commands::compile::run(params.into());
        }
        Some(("dump", m)) => {
            init_tracing(verbosity(m));
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Log to stderr. `-v` forces debug, `-vv` trace; otherwise `RUST_LOG`
/// applies, defaulting to warnings only.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
