use rusqlite::{params, Connection, OptionalExtension, Params, Row};

use std::fmt::Debug;

use crate::data::DBConnection;
use crate::internal_error::InternalResult;
use crate::todo::data::*;

use super::Persistence;

/// Lists and todos in separate tables; a list's todos are fetched with a
/// second query keyed on `list_id`.
pub struct DatabasePersistence {
    db_connection: DBConnection,
}

impl DatabasePersistence {
    pub fn new(db_connection: DBConnection) -> DatabasePersistence {
        DatabasePersistence { db_connection }
    }
}

fn execute<P: Params + Debug>(
    db_connection: &Connection,
    statement: &str,
    params: P,
) -> InternalResult<usize> {
    log::info!("{}: {:?}", statement, params);
    Ok(db_connection.execute(statement, params)?)
}

fn get_todo_from_row(row: &Row) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        name: row.get(1)?,
        completed: row.get(2)?,
    })
}

pub fn get_todos_for_list(list_id: ListID, db_connection: &Connection) -> InternalResult<Vec<Todo>> {
    let statement = "SELECT id, name, completed FROM todos WHERE list_id = ?1 ORDER BY id";
    log::info!("{}: {:?}", statement, (list_id,));

    let mut todos_statement = db_connection.prepare(statement)?;
    let todos = todos_statement
        .query_map(params![list_id], get_todo_from_row)?
        .collect::<rusqlite::Result<Vec<Todo>>>()?;

    Ok(todos)
}

pub fn get_list_from_db(id: ListID, db_connection: &Connection) -> InternalResult<Option<List>> {
    let statement = "SELECT id, name FROM lists WHERE id = ?1";
    log::info!("{}: {:?}", statement, (id,));

    let list = db_connection
        .query_row(statement, params![id], |row| {
            Ok(List::new(row.get(0)?, row.get::<usize, String>(1)?))
        })
        .optional()?;

    match list {
        Some(mut list) => {
            list.todos = get_todos_for_list(list.id, db_connection)?;
            Ok(Some(list))
        }
        None => Ok(None),
    }
}

pub fn get_all_lists_from_db(db_connection: &Connection) -> InternalResult<Vec<List>> {
    let statement = "SELECT id, name FROM lists ORDER BY id";
    log::info!("{}: ()", statement);

    let mut lists_statement = db_connection.prepare(statement)?;
    let mut lists = lists_statement
        .query_map([], |row| Ok(List::new(row.get(0)?, row.get::<usize, String>(1)?)))?
        .collect::<rusqlite::Result<Vec<List>>>()?;

    for list in lists.iter_mut() {
        list.todos = get_todos_for_list(list.id, db_connection)?;
    }

    Ok(lists)
}

impl Persistence for DatabasePersistence {
    fn find_list(&self, id: ListID) -> InternalResult<Option<List>> {
        let db_connection = self.db_connection.lock()?;
        get_list_from_db(id, &db_connection)
    }

    fn all_lists(&self) -> InternalResult<Vec<List>> {
        let db_connection = self.db_connection.lock()?;
        get_all_lists_from_db(&db_connection)
    }

    fn add_list(&self, name: &str) -> InternalResult<ListID> {
        let db_connection = self.db_connection.lock()?;
        execute(&db_connection, "INSERT INTO lists (name) VALUES (?1)", (name,))?;

        Ok(db_connection.last_insert_rowid())
    }

    fn delete_list(&self, id: ListID) -> InternalResult<()> {
        let db_connection = self.db_connection.lock()?;
        execute(&db_connection, "DELETE FROM lists WHERE id = ?1", (id,))?;

        Ok(())
    }

    fn update_list_name(&self, id: ListID, name: &str) -> InternalResult<()> {
        let db_connection = self.db_connection.lock()?;
        execute(
            &db_connection,
            "UPDATE lists SET name = ?1 WHERE id = ?2",
            (name, id),
        )?;

        Ok(())
    }

    fn add_todo(&self, list_id: ListID, name: &str) -> InternalResult<Option<TodoID>> {
        let db_connection = self.db_connection.lock()?;

        // INSERT ... SELECT writes nothing when the list is gone
        let inserted = execute(
            &db_connection,
            "INSERT INTO todos (name, list_id) SELECT ?1, id FROM lists WHERE id = ?2",
            (name, list_id),
        )?;

        if inserted == 0 {
            Ok(None)
        } else {
            Ok(Some(db_connection.last_insert_rowid()))
        }
    }

    fn update_todo_status(
        &self,
        list_id: ListID,
        todo_id: TodoID,
        completed: bool,
    ) -> InternalResult<()> {
        let db_connection = self.db_connection.lock()?;
        execute(
            &db_connection,
            "UPDATE todos SET completed = ?1 WHERE list_id = ?2 AND id = ?3",
            (completed, list_id, todo_id),
        )?;

        Ok(())
    }

    fn delete_todo(&self, list_id: ListID, todo_id: TodoID) -> InternalResult<()> {
        let db_connection = self.db_connection.lock()?;
        execute(
            &db_connection,
            "DELETE FROM todos WHERE list_id = ?1 AND id = ?2",
            (list_id, todo_id),
        )?;

        Ok(())
    }

    fn complete_all_todos(&self, list_id: ListID) -> InternalResult<()> {
        let db_connection = self.db_connection.lock()?;
        execute(
            &db_connection,
            "UPDATE todos SET completed = 1 WHERE list_id = ?1",
            (list_id,),
        )?;

        Ok(())
    }
}
