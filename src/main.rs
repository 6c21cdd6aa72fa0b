use std::path::PathBuf;

use anyhow::{bail, Context};
use patternkit::{init_logging, load_actions, replay, write_state, Config, Reducer, Summary};

const USAGE: &str = "usage: patternkit <actions.json> [--config <file>] [--out <file>]";

struct Args {
    actions: PathBuf,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut actions = None;
    let mut config = None;
    let mut out = None;

    let mut args = std::env::args_os().skip(1);
    while let Some(arg) = args.next() {
        let flag = arg.to_str().map(str::to_owned);
        match flag.as_deref() {
            Some("--config") => {
                config = Some(PathBuf::from(args.next().context("--config needs a file")?));
            }
            Some("--out") => {
                out = Some(PathBuf::from(args.next().context("--out needs a file")?));
            }
            Some("-h" | "--help") => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            Some(flag) if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            _ if actions.is_none() => actions = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument {}\n{USAGE}", arg.to_string_lossy()),
        }
    }

    Ok(Args {
        actions: actions.context(USAGE)?,
        config,
        out,
    })
}

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    let config = Config::load_or_default(args.config.as_deref())?;

    // Initialize logging
    init_logging(&config.logging)?;
    tracing::info!(
        version = patternkit::VERSION,
        built = patternkit::BUILD_DATE,
        "Starting replay"
    );

    let actions = load_actions(&args.actions)?;
    let reducer = Reducer::new(config.reducer_options());
    let state = replay(&reducer, actions);

    println!("{}", Summary::of(&state));
    if let Some(out) = &args.out {
        write_state(&state, out, config.replay.pretty)?;
        tracing::info!(path = %out.display(), "Wrote state");
    }

    Ok(())
}
