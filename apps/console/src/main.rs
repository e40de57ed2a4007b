//! # Marquee Console
//!
//! Interactive console front-end for the Marquee lending catalog.
//!
//! ## Module Organization
//! ```text
//! marquee-console/
//! ├── main.rs         ◄─── You are here (args, logging, startup)
//! ├── state.rs        ◄─── Lock-guarded Library handle
//! ├── input.rs        ◄─── Typed prompt/re-prompt loops
//! ├── menu.rs         ◄─── Main / staff / member menus
//! ├── display.rs      ◄─── Table rendering
//! └── seed.rs         ◄─── JSON seed file loading
//! ```
//!
//! ## Startup Sequence
//! ```text
//! 1. Parse arguments (clap)
//! 2. Initialize logging (tracing-subscriber, RUST_LOG overridable)
//! 3. Build LibraryState (empty library behind one Mutex)
//! 4. Apply --seed file if given
//! 5. Run the main menu loop over stdin
//! ```

mod display;
mod input;
mod menu;
mod seed;
mod state;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::input::Prompter;
use crate::state::LibraryState;

/// Marquee - a media lending catalog for the counter terminal.
#[derive(Debug, Parser)]
#[command(name = "marquee", version, about)]
struct Args {
    /// JSON seed file applied at startup (items and patrons)
    #[arg(long, value_name = "PATH")]
    seed: Option<PathBuf>,

    /// Log at debug level instead of info
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    info!("Starting Marquee console");

    let state = LibraryState::new();

    if let Some(path) = &args.seed {
        let seed = seed::load(path)?;
        let (items, patrons) =
            state.with_library_mut(|library| seed::apply(&seed, library));
        info!(items, patrons, seed = %path.display(), "seed applied");
    }

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock());
    menu::run_main_menu(&state, &mut prompter)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=marquee=trace` - Show trace for marquee crates only
/// - Default: INFO level (`--verbose` raises it to DEBUG)
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
