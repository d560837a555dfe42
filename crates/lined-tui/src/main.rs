mod app;
mod input;
mod logging;
mod plain;
mod screen;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::error;

use lined_core::Session;

/// Menu-driven line editor
#[derive(Parser, Debug)]
#[command(name = "lined", version, about)]
struct Args {
    /// File to edit; created on first save if it does not exist
    file: PathBuf,

    /// Prompt line by line on stdin/stdout instead of the full-screen UI.
    /// Implied when stdin is not a terminal.
    #[arg(long)]
    plain: bool,

    /// Write logs to daily-rotated files in this directory
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    process::exit(run(args));
}

fn run(args: Args) -> i32 {
    let plain = args.plain || !io::stdin().is_terminal();
    let _log_guard = logging::init(args.log_dir.as_deref(), plain);

    let document = match lined_core::load(&args.file) {
        Ok(doc) => doc,
        Err(e) => {
            error!(error = %e, "load failed");
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let mut session = Session::new(document);

    let result = if plain {
        plain::run(&mut session, &mut io::stdin().lock(), &mut io::stdout().lock())
    } else {
        let mut app = app::App::new(session);
        let result = app.run();
        session = app.into_session();
        result
    };

    if let Err(e) = result {
        error!(error = %e, "terminal failure");
        eprintln!("Error: {}", e);
        return 1;
    }

    match session.outcome() {
        Some(outcome) => {
            if let (lined_core::Outcome::SaveFailed, Some(msg)) = (outcome, session.message()) {
                eprintln!("{}", msg);
            }
            println!("{}", outcome.farewell());
            outcome.exit_code()
        }
        None => 0,
    }
}
