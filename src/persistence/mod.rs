//! The store behind every handler.
//!
//! [`Persistence`] is implemented twice: [`SessionPersistence`] keeps lists
//! nested inside the caller's session, [`DatabasePersistence`] keeps them in
//! the `lists` and `todos` tables. Both return the same shapes, and both
//! treat mutations aimed at a missing list or todo as no-ops. Handlers only
//! ever see a [`Store`].

use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};

use std::ops::Deref;

use crate::data::DBConnection;
use crate::internal_error::InternalResult;
use crate::session::Session;
use crate::todo::data::*;

mod database;
mod session;

pub use database::DatabasePersistence;
pub use session::SessionPersistence;

pub trait Persistence: Send + Sync {
    fn find_list(&self, id: ListID) -> InternalResult<Option<List>>;

    /// Every list, oldest first, with its todos resolved.
    fn all_lists(&self) -> InternalResult<Vec<List>>;

    /// Stores a new list and returns the id it was given.
    fn add_list(&self, name: &str) -> InternalResult<ListID>;

    fn delete_list(&self, id: ListID) -> InternalResult<()>;

    fn update_list_name(&self, id: ListID, name: &str) -> InternalResult<()>;

    /// Appends a todo to the list and returns its id, or `None` when the list
    /// does not exist.
    fn add_todo(&self, list_id: ListID, name: &str) -> InternalResult<Option<TodoID>>;

    fn update_todo_status(
        &self,
        list_id: ListID,
        todo_id: TodoID,
        completed: bool,
    ) -> InternalResult<()>;

    fn delete_todo(&self, list_id: ListID, todo_id: TodoID) -> InternalResult<()>;

    fn complete_all_todos(&self, list_id: ListID) -> InternalResult<()>;
}

/// The backend chosen at launch.
pub enum Backend {
    Session,
    Database(DBConnection),
}

pub struct Store(Box<dyn Persistence>);

impl Store {
    pub fn for_backend(backend: &Backend, session: &Session) -> Store {
        match backend {
            Backend::Session => Store(Box::new(SessionPersistence::new(session.state()))),
            Backend::Database(db_connection) => {
                Store(Box::new(DatabasePersistence::new(db_connection.clone())))
            }
        }
    }
}

impl Deref for Store {
    type Target = dyn Persistence;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Store {
    type Error = String;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let backend = match request.rocket().state::<Backend>() {
            Some(backend) => backend,
            None => {
                return Outcome::Error((
                    Status::InternalServerError,
                    "persistence backend is not managed".to_string(),
                ))
            }
        };

        request
            .guard::<Session>()
            .await
            .map(|session| Store::for_backend(backend, &session))
    }
}
