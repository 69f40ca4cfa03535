//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `budget_notes_core` linkage.
//! - Run one add-note flow end to end against the configured store.

use budget_notes_core::db::{open_db, open_db_in_memory};
use budget_notes_core::{
    flush_logging, init_logging, AddNoteToBudgetCommand, AddNoteToBudgetHandler, CollectionPath,
    CoreConfig, DocumentRepository, SqliteDocumentRepository,
};
use log::warn;
use serde_json::json;
use std::process::ExitCode;

const DEMO_BUDGET_ID: &str = "demo-budget";

fn main() -> ExitCode {
    println!("budget_notes_core ping={}", budget_notes_core::ping());
    println!("budget_notes_core version={}", budget_notes_core::core_version());

    let outcome = run();
    flush_logging();
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = CoreConfig::from_env()?;
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    }

    let conn = match config.db_path.as_ref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let repo = SqliteDocumentRepository::try_new(&conn)?;

    if repo
        .get_document(CollectionPath::BUDGETS, DEMO_BUDGET_ID)?
        .is_none()
    {
        repo.create_document(
            CollectionPath::BUDGETS,
            DEMO_BUDGET_ID,
            &json!({
                "id": DEMO_BUDGET_ID,
                "name": "Demo",
                "amount": 0.0,
                "status": "draft",
                "category": "demo",
                "lastModified": 0
            }),
        )?;
    } else {
        warn!("event=cli_seed module=cli status=skipped budget_id={DEMO_BUDGET_ID}");
    }

    let command = AddNoteToBudgetCommand::new(DEMO_BUDGET_ID, "smoke", "cli smoke note", "cli")?;
    let result = AddNoteToBudgetHandler::new(&repo).execute(&command)?;
    println!(
        "add_note success={} note_id={} timestamp={}",
        result.success, result.note_id, result.timestamp
    );
    Ok(())
}
