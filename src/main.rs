use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use microspa::env::{Environment, HttpFetcher, JsonFileStore, MemoryHistory, MemoryStore};
use microspa::{AppConfig, Error, PageSnapshot, Result, RouteTable, Session};

/// Shell used when no --shell file is given: the three-page personal site.
const DEFAULT_SHELL: &str = r##"<!DOCTYPE html>
<html>
<body>
<nav>
  <a class="nav-link" href="/">Home</a>
  <a class="nav-link" href="/projects">Projects</a>
  <a class="nav-link" href="/certifications">Certifications</a>
  <button id="theme-toggle"><i class="fa-moon"></i></button>
</nav>
<main id="content-container"></main>
</body>
</html>"##;

#[derive(Parser)]
#[command(
    name = "microspa",
    version,
    about = "Headless single-page-app engine for static sites"
)]
struct Args {
    /// Base URL fragment resources are resolved against
    #[arg(long)]
    base: String,

    /// Static shell HTML file (a built-in three-page shell when omitted)
    #[arg(long)]
    shell: Option<PathBuf>,

    /// JSON file the theme preference is persisted in (in-memory when omitted)
    #[arg(long)]
    theme_file: Option<PathBuf>,

    /// Toggle the theme once before visiting any paths
    #[arg(long)]
    toggle_theme: bool,

    /// Print snapshots as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Logical paths to visit, in order
    #[arg(default_value = "/")]
    paths: Vec<String>,
}

fn print_snapshot(snapshot: &PageSnapshot, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(snapshot)
            .map_err(|e| Error::Other(format!("cannot serialize snapshot: {}", e)))?;
        println!("{}", line);
    } else {
        let active = snapshot.active_link.as_deref().unwrap_or("-");
        println!(
            "{} [active: {}] [theme: {}]{}",
            snapshot.path,
            active,
            snapshot.theme.as_str(),
            if snapshot.load_failed { " [load failed]" } else { "" }
        );
        println!("  {}", snapshot.text);
    }
    Ok(())
}

fn run(args: &Args) -> Result<bool> {
    let config = AppConfig::default();

    let shell_html = match &args.shell {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read shell {}: {}", path.display(), e)))?,
        None => DEFAULT_SHELL.to_string(),
    };

    let initial_path = args.paths.first().map(String::as_str).unwrap_or("/");
    let env = Environment {
        fetcher: Arc::new(HttpFetcher::new(&args.base, &config)?),
        history: Arc::new(MemoryHistory::new(initial_path)),
        store: match &args.theme_file {
            Some(path) => Arc::new(JsonFileStore::new(path)),
            None => Arc::new(MemoryStore::new()),
        },
    };

    let mut session = Session::new(config, RouteTable::personal_site(), &shell_html, env)?;

    if args.toggle_theme {
        session.toggle_theme()?;
    }

    session.start();
    print_snapshot(&session.snapshot(), args.json)?;

    for path in args.paths.iter().skip(1) {
        session.click(path);
        print_snapshot(&session.snapshot(), args.json)?;
    }

    Ok(session.snapshot().load_failed)
}

fn main() {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.log_to_stderr().start());

    let args = Args::parse();
    match run(&args) {
        Ok(false) => {}
        Ok(true) => std::process::exit(1),
        Err(e) => {
            eprintln!("microspa: {}", e);
            std::process::exit(1);
        }
    }
}
