use rocket::FromForm;
use serde::Serialize;

pub type ListID = i64;
pub type TodoID = i64;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoID,
    pub name: String,
    pub completed: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub id: ListID,
    pub name: String,
    pub todos: Vec<Todo>,
}

impl List {
    pub fn new(id: ListID, name: impl Into<String>) -> List {
        List {
            id,
            name: name.into(),
            todos: vec![],
        }
    }
}

impl Todo {
    pub fn new(id: TodoID, name: impl Into<String>) -> Todo {
        Todo {
            id,
            name: name.into(),
            completed: false,
        }
    }
}

#[derive(FromForm, Debug)]
pub struct ListNameForm {
    pub list_name: String,
}

#[derive(FromForm, Debug)]
pub struct TodoForm {
    pub todo: String,
}

#[derive(FromForm, Debug)]
pub struct TodoStatusForm {
    pub completed: String,
}

impl TodoStatusForm {
    pub fn is_completed(&self) -> bool {
        self.completed == "true"
    }
}
