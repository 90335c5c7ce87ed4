use anyhow::Result;
use clap::Parser;
use console::Term;
use depin::runtime::RealRuntime;
use depin::update::update;
use std::path::PathBuf;

/// depin - dependency pinner
///
/// Fills in empty version constraints in the dependencies and devDependencies
/// tables of package.json with the latest version published to the npm
/// registry, prefixed with ^. Every other field in the file is left as is.
///
/// Examples:
///   depin                          # update ./package.json in place
///   depin -m web/package.json      # update a manifest elsewhere
#[derive(Parser, Debug)]
#[command(author, version = env!("DEPIN_VERSION"), about)]
struct Cli {
    /// Path to the manifest to update (also via DEPIN_MANIFEST)
    #[arg(
        long = "manifest",
        short = 'm',
        env = "DEPIN_MANIFEST",
        value_name = "PATH"
    )]
    manifest: Option<PathBuf>,

    /// Program used for registry lookups, defaults to npm (also via DEPIN_NPM_BIN)
    #[arg(long = "npm-bin", env = "DEPIN_NPM_BIN", value_name = "PROGRAM")]
    npm_bin: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    update(runtime, cli.manifest, cli.npm_bin).await?;

    wait_for_key();
    Ok(())
}

/// Holds the window open until a keypress when stdout is an interactive
/// terminal. Piped and scripted runs exit immediately.
fn wait_for_key() {
    let term = Term::stdout();
    if term.is_term() {
        println!("press any key to exit...");
        let _ = term.read_key();
    }
}
