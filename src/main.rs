//! Binary entry point: read configuration, start logging, open the catalog,
//! and drive the terminal UI until the user exits.
use anyhow::Context;
use clap::Parser;
use library_catalog::config::Args;
use library_catalog::logging::init_logging;
use library_catalog::{close_catalog, open_catalog, run_app, App};

/// Returning a `Result` bubbles fatal problems (an unwritable data directory,
/// a corrupt database file) up to the shell instead of failing silently. The
/// connection is owned by `App`, so every early return drops and closes it.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_path()?, &args.log_level)?;

    let db_path = args.database_path()?;
    let conn = open_catalog(&db_path)
        .with_context(|| format!("failed to open catalog at {}", db_path.display()))?;

    let mut app = App::new(conn)?;
    let result = run_app(&mut app);
    let closed = close_catalog(app.into_connection());

    if let Err(err) = &result {
        tracing::error!(error = %err, "session ended with an error");
    }
    result?;
    closed?;
    tracing::info!("session closed");
    Ok(())
}
