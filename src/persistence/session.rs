use crate::internal_error::InternalResult;
use crate::session::{SessionState, SharedSessionState};
use crate::todo::data::*;
use crate::todo::helpers::next_element_id;

use super::Persistence;

/// Lists held in the caller's session; todos live nested inside their list.
pub struct SessionPersistence {
    state: SharedSessionState,
}

impl SessionPersistence {
    pub fn new(state: SharedSessionState) -> SessionPersistence {
        SessionPersistence { state }
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut SessionState) -> T) -> InternalResult<T> {
        let mut state = self.state.lock()?;
        Ok(f(&mut state))
    }

    fn with_list<T>(
        &self,
        id: ListID,
        f: impl FnOnce(&mut List) -> T,
    ) -> InternalResult<Option<T>> {
        self.with_state(|state| state.lists.iter_mut().find(|list| list.id == id).map(f))
    }
}

impl Persistence for SessionPersistence {
    fn find_list(&self, id: ListID) -> InternalResult<Option<List>> {
        self.with_list(id, |list| list.clone())
    }

    fn all_lists(&self) -> InternalResult<Vec<List>> {
        self.with_state(|state| state.lists.clone())
    }

    fn add_list(&self, name: &str) -> InternalResult<ListID> {
        self.with_state(|state| {
            let id = next_element_id(state.lists.iter().map(|list| list.id));
            state.lists.push(List::new(id, name));
            id
        })
    }

    fn delete_list(&self, id: ListID) -> InternalResult<()> {
        self.with_state(|state| state.lists.retain(|list| list.id != id))
    }

    fn update_list_name(&self, id: ListID, name: &str) -> InternalResult<()> {
        self.with_list(id, |list| list.name = name.to_string())?;
        Ok(())
    }

    fn add_todo(&self, list_id: ListID, name: &str) -> InternalResult<Option<TodoID>> {
        self.with_list(list_id, |list| {
            let id = next_element_id(list.todos.iter().map(|todo| todo.id));
            list.todos.push(Todo::new(id, name));
            id
        })
    }

    fn update_todo_status(
        &self,
        list_id: ListID,
        todo_id: TodoID,
        completed: bool,
    ) -> InternalResult<()> {
        self.with_list(list_id, |list| {
            if let Some(todo) = list.todos.iter_mut().find(|todo| todo.id == todo_id) {
                todo.completed = completed;
            }
        })?;
        Ok(())
    }

    fn delete_todo(&self, list_id: ListID, todo_id: TodoID) -> InternalResult<()> {
        self.with_list(list_id, |list| list.todos.retain(|todo| todo.id != todo_id))?;
        Ok(())
    }

    fn complete_all_todos(&self, list_id: ListID) -> InternalResult<()> {
        self.with_list(list_id, |list| {
            for todo in list.todos.iter_mut() {
                todo.completed = true;
            }
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn writes_land_in_the_shared_session_state() {
        let state = Arc::new(Mutex::new(SessionState::default()));
        let store = SessionPersistence::new(state.clone());

        let id = store.add_list("Groceries").unwrap();
        store.add_todo(id, "milk").unwrap();

        let state = state.lock().unwrap();
        assert_eq!(state.lists.len(), 1);
        assert_eq!(state.lists[0].todos[0].name, "milk");
    }

    #[test]
    fn todo_ids_are_scoped_per_list() {
        let store = SessionPersistence::new(Arc::new(Mutex::new(SessionState::default())));
        let work = store.add_list("work").unwrap();
        let home = store.add_list("home").unwrap();

        assert_eq!(store.add_todo(work, "report").unwrap(), Some(1));
        assert_eq!(store.add_todo(home, "dishes").unwrap(), Some(1));
    }
}
