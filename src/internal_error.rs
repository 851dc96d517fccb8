use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use thiserror::Error;

use std::sync::PoisonError;

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("poisoned lock: {0}")]
    Poisoned(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("generic internal error: {0}")]
    Other(String),
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(e: PoisonError<T>) -> InternalError {
        InternalError::Poisoned(e.to_string())
    }
}

impl From<rocket::figment::Error> for InternalError {
    fn from(e: rocket::figment::Error) -> InternalError {
        InternalError::Config(e.to_string())
    }
}

impl From<&str> for InternalError {
    fn from(s: &str) -> InternalError {
        InternalError::Other(s.to_string())
    }
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        log::error!("{}", self);
        Err(Status::InternalServerError)
    }
}

pub type InternalResult<T> = Result<T, InternalError>;
