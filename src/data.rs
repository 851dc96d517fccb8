use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::internal_error::InternalResult;

pub type DBConnection = Arc<Mutex<Connection>>;

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;
    CREATE TABLE IF NOT EXISTS lists (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        list_id INTEGER NOT NULL REFERENCES lists (id) ON DELETE CASCADE,
        completed BOOLEAN NOT NULL DEFAULT 0
    );
";

pub fn create_schema(connection: &Connection) -> InternalResult<()> {
    connection.execute_batch(SCHEMA)?;
    Ok(())
}

pub fn open_database(location: &str) -> InternalResult<DBConnection> {
    let connection = Connection::open(location)?;
    create_schema(&connection)?;

    Ok(Arc::new(Mutex::new(connection)))
}
