use rocket::fairing::AdHoc;
use rocket::figment::providers::{Env, Serialized};
use rocket::figment::Figment;
use rocket::fs::FileServer;
use rocket::{routes, Build, Config, Rocket};
use rocket_dyn_templates::Template;

mod config;
mod data;
mod internal_error;
mod persistence;
mod session;
mod todo;

use config::{AppConfig, BackendKind};
use internal_error::InternalResult;
use persistence::Backend;
use session::SessionRegistry;
use todo::endpoints;

fn figment() -> Figment {
    Config::figment()
        .join(Serialized::default(
            "template_dir",
            concat!(env!("CARGO_MANIFEST_DIR"), "/templates"),
        ))
        .merge(Env::raw().only(&["DATABASE_URL"]).global())
}

fn select_backend(figment: &Figment, config: &AppConfig) -> InternalResult<Backend> {
    match config.backend {
        BackendKind::Session => Ok(Backend::Session),
        BackendKind::Database => {
            let location = config.database_location(figment)?;
            log::info!("opening database at {}", location);
            Ok(Backend::Database(data::open_database(&location)?))
        }
    }
}

fn persistence_fairing() -> AdHoc {
    AdHoc::try_on_ignite("Persistence", |rocket| async move {
        let figment = rocket.figment().clone();

        let setup = AppConfig::from_figment(&figment).and_then(|config| {
            let backend = select_backend(&figment, &config)?;
            Ok((config, backend))
        });

        match setup {
            Ok((config, backend)) => {
                Ok(rocket
                    .manage(backend)
                    .manage(SessionRegistry::new(config.session_idle_timeout())))
            }
            Err(e) => {
                log::error!("{}", e);
                Err(rocket)
            }
        }
    })
}

pub fn rocket_from(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(Template::fairing())
        .attach(persistence_fairing())
        .mount(
            "/",
            routes![
                endpoints::index,
                endpoints::lists_index,
                endpoints::new_list,
                endpoints::create_list,
                endpoints::show_list,
                endpoints::edit_list,
                endpoints::update_list,
                endpoints::destroy_list,
                endpoints::create_todo,
                endpoints::destroy_todo,
                endpoints::update_todo,
                endpoints::complete_all,
            ],
        )
        .mount(
            "/",
            FileServer::from(concat!(env!("CARGO_MANIFEST_DIR"), "/public")).rank(15),
        )
}

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    rocket_from(figment()).launch().await?;

    Ok(())
}
