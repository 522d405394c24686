//! Arena session runner.
//!
//! Loads content, plays one session in the mode picked by `ARENA_MODE` and
//! prints the result as JSON on stdout.
//!
//! ```bash
//! ARENA_MODE=pvp ARENA_SEED=7 ARENA_DATA_DIR=data cargo run -p arena-client
//! ```

use anyhow::Result;
use arena_client::{ClientConfig, Session, logging};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env()?;
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting {} session (seed {})", config.mode, config.seed);
    let mut session = Session::new(config)?;
    let report = session.run()?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
