//! termbank — a shared glossary kept in a flat dictionary file.
//!
//! Usage:
//!   termbank [dictionary.json] [--online] [--verbose]
//!
//! Starts an interactive loop. With `--online` the dictionary file is
//! treated as shared: `save` re-loads the on-disk snapshot and reconciles
//! it into the session before writing, so edits from other sessions are
//! kept and this session's deletes are not resurrected.

use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use termbank_cli::{CommandRegistry, Mode, Outcome, Session};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "termbank")]
#[command(about = "Personal/shared glossary store")]
struct Args {
    /// Dictionary file to open at startup
    dictionary: Option<PathBuf>,

    /// Treat the dictionary as shared (reconcile before every save)
    #[arg(long)]
    online: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let mut session = Session::new();
    if let Some(path) = args.dictionary {
        let mode = if args.online {
            Mode::Online
        } else {
            Mode::Offline
        };
        session.open(path, mode)?;
    }

    let registry = CommandRegistry::new();
    println!("termbank — type `help` for commands");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break; // EOF
        };
        match registry.dispatch(&mut session, &line?) {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Quit) => break,
            // command-level failures are reported, the loop continues
            Err(err) => println!("error: {err:#}"),
        }
    }
    Ok(())
}
