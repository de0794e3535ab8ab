//! Raw access to the `settings` key-value table

use rusqlite::{params, Connection, Result};

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
    let mut rows = stmt.query(params![key])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row.get(0)?))
    } else {
        Ok(None)
    }
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

pub fn delete_setting(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key = ?1", params![key])?;
    Ok(())
}

// Prefix match uses substr rather than LIKE: keys contain '_', a LIKE wildcard.

pub fn setting_keys_with_prefix(conn: &Connection, prefix: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT key FROM settings WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
    )?;
    let keys = stmt
        .query_map(params![prefix], |row| row.get(0))?
        .collect::<Result<Vec<String>>>()?;
    Ok(keys)
}

pub fn settings_with_prefix(conn: &Connection, prefix: &str) -> Result<Vec<(String, String)>> {
    let mut stmt = conn.prepare(
        "SELECT key, value FROM settings WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
    )?;
    let entries = stmt
        .query_map(params![prefix], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<(String, String)>>>()?;
    Ok(entries)
}

pub fn delete_settings_with_prefix(conn: &Connection, prefix: &str) -> Result<usize> {
    conn.execute(
        "DELETE FROM settings WHERE substr(key, 1, length(?1)) = ?1",
        params![prefix],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::run_migrations;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_set_and_get_setting() {
        let conn = test_conn();
        assert_eq!(get_setting(&conn, "missing").unwrap(), None);

        set_setting(&conn, "position_N5-All-", "3").unwrap();
        set_setting(&conn, "position_N5-All-", "4").unwrap();
        assert_eq!(get_setting(&conn, "position_N5-All-").unwrap(), Some("4".to_string()));

        delete_setting(&conn, "position_N5-All-").unwrap();
        assert_eq!(get_setting(&conn, "position_N5-All-").unwrap(), None);
    }

    #[test]
    fn test_prefix_is_literal() {
        let conn = test_conn();
        set_setting(&conn, "status_a", "WRONG").unwrap();
        set_setting(&conn, "status_b", "CORRECT").unwrap();
        // '_' must not act as a wildcard
        set_setting(&conn, "statusXc", "WRONG").unwrap();
        set_setting(&conn, "position_x", "1").unwrap();

        assert_eq!(
            setting_keys_with_prefix(&conn, "status_").unwrap(),
            vec!["status_a".to_string(), "status_b".to_string()]
        );

        assert_eq!(
            settings_with_prefix(&conn, "status_").unwrap(),
            vec![
                ("status_a".to_string(), "WRONG".to_string()),
                ("status_b".to_string(), "CORRECT".to_string()),
            ]
        );

        assert_eq!(delete_settings_with_prefix(&conn, "status_").unwrap(), 2);
        assert_eq!(get_setting(&conn, "statusXc").unwrap(), Some("WRONG".to_string()));
        assert_eq!(get_setting(&conn, "position_x").unwrap(), Some("1".to_string()));
    }
}
