use serde::Serialize;

use crate::session::FlashMessages;

use super::data::*;
use super::helpers::*;

/// Context handed to every template: the page's own fields plus whatever
/// flash messages were pending.
#[derive(Serialize)]
pub struct Page<T: Serialize> {
    pub flash: FlashMessages,
    #[serde(flatten)]
    pub body: T,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct TodoView {
    pub id: TodoID,
    pub name: String,
    pub completed: bool,
    pub class: Option<&'static str>,
}

impl From<&Todo> for TodoView {
    fn from(todo: &Todo) -> TodoView {
        TodoView {
            id: todo.id,
            name: todo.name.clone(),
            completed: todo.completed,
            class: todo_class(todo),
        }
    }
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ListView {
    pub id: ListID,
    pub name: String,
    pub class: Option<&'static str>,
    pub remaining: usize,
    pub total: usize,
    pub todos: Vec<TodoView>,
}

impl From<&List> for ListView {
    fn from(list: &List) -> ListView {
        ListView {
            id: list.id,
            name: list.name.clone(),
            class: list_class(list),
            remaining: todos_remaining_count(list),
            total: todos_count(list),
            todos: sort_todos(&list.todos).map(TodoView::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct ListsPage {
    pub lists: Vec<ListView>,
}

impl ListsPage {
    pub fn new(lists: &[List]) -> ListsPage {
        ListsPage {
            lists: sort_lists(lists).map(ListView::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct ListPage {
    pub list: ListView,
    pub todo: String,
}

#[derive(Serialize)]
pub struct NewListPage {
    pub list_name: String,
}

#[derive(Serialize)]
pub struct EditListPage {
    pub list: ListView,
    pub list_name: String,
}
