use rocket::form::Form;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::response::Redirect;
use rocket::{get, post, uri, Responder};
use rocket_dyn_templates::Template;
use serde::Serialize;

use crate::internal_error::InternalResult;
use crate::persistence::Store;
use crate::session::Session;

use super::data::*;
use super::validation::{validate_list_name, validate_todo_name};
use super::views::*;

const LIST_NOT_FOUND: &str = "The specified list was not found.";

/// A path id that failed to parse names no list, same as an unknown one.
type IdParam<'a, T> = Result<T, &'a str>;

#[derive(Responder)]
pub enum PageResponse {
    Page(Template),
    Redirect(Redirect),
    Path(String),
    Status(Status),
}

/// Set when the request came from the page's own script rather than a form
/// submission.
pub struct XmlHttpRequest(pub bool);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for XmlHttpRequest {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let requested_with = request.headers().get_one("X-Requested-With");
        Outcome::Success(XmlHttpRequest(requested_with == Some("XMLHttpRequest")))
    }
}

fn render<T: Serialize>(
    name: &'static str,
    session: &Session,
    body: T,
) -> InternalResult<PageResponse> {
    let page = Page {
        flash: session.take_flash()?,
        body,
    };

    Ok(PageResponse::Page(Template::render(name, page)))
}

fn redirect_to_lists() -> PageResponse {
    PageResponse::Redirect(Redirect::to(uri!(lists_index)))
}

fn redirect_to_list(id: ListID) -> PageResponse {
    PageResponse::Redirect(Redirect::to(format!("/lists/{}", id)))
}

fn load_list(store: &Store, id: IdParam<'_, ListID>) -> InternalResult<Option<List>> {
    match id {
        Ok(id) => store.find_list(id),
        Err(_) => Ok(None),
    }
}

fn list_not_found(session: &Session) -> InternalResult<PageResponse> {
    session.flash_error(LIST_NOT_FOUND)?;
    Ok(redirect_to_lists())
}

#[get("/")]
pub fn index() -> Redirect {
    Redirect::to(uri!(lists_index))
}

#[get("/lists")]
pub fn lists_index(store: Store, session: Session) -> InternalResult<PageResponse> {
    let lists = store.all_lists()?;
    render("lists", &session, ListsPage::new(&lists))
}

#[get("/lists/new")]
pub fn new_list(session: Session) -> InternalResult<PageResponse> {
    render(
        "new_list",
        &session,
        NewListPage {
            list_name: String::new(),
        },
    )
}

#[post("/lists", data = "<form>")]
pub fn create_list(
    form: Form<ListNameForm>,
    store: Store,
    session: Session,
) -> InternalResult<PageResponse> {
    let lists = store.all_lists()?;

    match validate_list_name(&form.list_name, lists.iter().map(|list| &list.name)) {
        Ok(name) => {
            store.add_list(name)?;
            session.flash_success("The list has been created.")?;
            Ok(redirect_to_lists())
        }
        Err(error) => {
            session.flash_error(error.to_string())?;
            render(
                "new_list",
                &session,
                NewListPage {
                    list_name: form.list_name.trim().to_string(),
                },
            )
        }
    }
}

#[get("/lists/<id>")]
pub fn show_list(
    id: IdParam<'_, ListID>,
    store: Store,
    session: Session,
) -> InternalResult<PageResponse> {
    let Some(list) = load_list(&store, id)? else {
        return list_not_found(&session);
    };

    render(
        "list",
        &session,
        ListPage {
            list: ListView::from(&list),
            todo: String::new(),
        },
    )
}

#[get("/lists/<id>/edit")]
pub fn edit_list(
    id: IdParam<'_, ListID>,
    store: Store,
    session: Session,
) -> InternalResult<PageResponse> {
    let Some(list) = load_list(&store, id)? else {
        return list_not_found(&session);
    };

    let list_name = list.name.clone();
    render(
        "edit_list",
        &session,
        EditListPage {
            list: ListView::from(&list),
            list_name,
        },
    )
}

#[post("/lists/<id>", data = "<form>")]
pub fn update_list(
    id: IdParam<'_, ListID>,
    form: Form<ListNameForm>,
    store: Store,
    session: Session,
) -> InternalResult<PageResponse> {
    let Some(list) = load_list(&store, id)? else {
        return list_not_found(&session);
    };
    let id = list.id;

    // keeping the current name is not a clash with itself
    let lists = store.all_lists()?;
    let other_names = lists
        .iter()
        .filter(|other| other.id != id)
        .map(|other| &other.name);

    match validate_list_name(&form.list_name, other_names) {
        Ok(name) => {
            store.update_list_name(id, name)?;
            session.flash_success("The list has been updated.")?;
            Ok(redirect_to_list(id))
        }
        Err(error) => {
            session.flash_error(error.to_string())?;
            render(
                "edit_list",
                &session,
                EditListPage {
                    list: ListView::from(&list),
                    list_name: form.list_name.trim().to_string(),
                },
            )
        }
    }
}

#[post("/lists/<id>/destroy")]
pub fn destroy_list(
    id: IdParam<'_, ListID>,
    store: Store,
    session: Session,
    xhr: XmlHttpRequest,
) -> InternalResult<PageResponse> {
    if let Ok(id) = id {
        store.delete_list(id)?;
    }

    if xhr.0 {
        Ok(PageResponse::Path(uri!(lists_index).to_string()))
    } else {
        session.flash_success("The list has been deleted.")?;
        Ok(redirect_to_lists())
    }
}

#[post("/lists/<id>/todos", data = "<form>")]
pub fn create_todo(
    id: IdParam<'_, ListID>,
    form: Form<TodoForm>,
    store: Store,
    session: Session,
) -> InternalResult<PageResponse> {
    let Some(list) = load_list(&store, id)? else {
        return list_not_found(&session);
    };

    match validate_todo_name(&form.todo) {
        Ok(name) => {
            store.add_todo(list.id, name)?;
            session.flash_success("The todo was added.")?;
            Ok(redirect_to_list(list.id))
        }
        Err(error) => {
            session.flash_error(error.to_string())?;
            render(
                "list",
                &session,
                ListPage {
                    list: ListView::from(&list),
                    todo: form.todo.trim().to_string(),
                },
            )
        }
    }
}

#[post("/lists/<id>/todos/<todo_id>/destroy")]
pub fn destroy_todo(
    id: IdParam<'_, ListID>,
    todo_id: IdParam<'_, TodoID>,
    store: Store,
    session: Session,
    xhr: XmlHttpRequest,
) -> InternalResult<PageResponse> {
    let Some(list) = load_list(&store, id)? else {
        return list_not_found(&session);
    };
    let id = list.id;

    if let Ok(todo_id) = todo_id {
        store.delete_todo(id, todo_id)?;
    }

    if xhr.0 {
        Ok(PageResponse::Status(Status::NoContent))
    } else {
        session.flash_success("The todo has been deleted.")?;
        Ok(redirect_to_list(id))
    }
}

#[post("/lists/<id>/todos/<todo_id>", data = "<form>")]
pub fn update_todo(
    id: IdParam<'_, ListID>,
    todo_id: IdParam<'_, TodoID>,
    form: Form<TodoStatusForm>,
    store: Store,
    session: Session,
) -> InternalResult<PageResponse> {
    let Some(list) = load_list(&store, id)? else {
        return list_not_found(&session);
    };
    let id = list.id;

    if let Ok(todo_id) = todo_id {
        store.update_todo_status(id, todo_id, form.is_completed())?;
    }
    session.flash_success("The todo has been updated.")?;

    Ok(redirect_to_list(id))
}

#[post("/lists/<id>/complete_all")]
pub fn complete_all(
    id: IdParam<'_, ListID>,
    store: Store,
    session: Session,
) -> InternalResult<PageResponse> {
    let Some(list) = load_list(&store, id)? else {
        return list_not_found(&session);
    };
    let id = list.id;

    store.complete_all_todos(id)?;
    session.flash_success("All todos have been completed.")?;

    Ok(redirect_to_list(id))
}
