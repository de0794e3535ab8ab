use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // All preferences (statuses, positions, modes, menu flags) share one key-value table
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS settings (
      key TEXT PRIMARY KEY,
      value TEXT NOT NULL
    );

    -- Default settings
    INSERT OR IGNORE INTO settings (key, value) VALUES ('filter_mode', 'ALL');
    INSERT OR IGNORE INTO settings (key, value) VALUES ('card_mode', 'RECALL');
    "#,
  )?;

  Ok(())
}
