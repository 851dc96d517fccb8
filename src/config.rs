use chrono::Duration;
use rocket::figment::Figment;
use rocket::Config;
use serde::Deserialize;

use crate::internal_error::{InternalError, InternalResult};

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Session,
    Database,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default = "default_database_name")]
    pub database_name: String,
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_session_idle_minutes")]
    pub session_idle_minutes: i64,
}

fn default_database_name() -> String {
    "todo_tracker.db".to_string()
}

fn default_session_idle_minutes() -> i64 {
    120
}

/// One year.
const MAX_SESSION_IDLE_MINUTES: i64 = 60 * 24 * 365;

impl AppConfig {
    pub fn from_figment(figment: &Figment) -> InternalResult<AppConfig> {
        let config: AppConfig = figment.extract()?;

        if !(1..=MAX_SESSION_IDLE_MINUTES).contains(&config.session_idle_minutes) {
            return Err(InternalError::Config(format!(
                "session_idle_minutes must be between 1 and {}, got {}",
                MAX_SESSION_IDLE_MINUTES, config.session_idle_minutes
            )));
        }

        Ok(config)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::minutes(self.session_idle_minutes)
    }

    /// Production reads the connection string from `DATABASE_URL`; every
    /// other profile uses the fixed local database file.
    pub fn database_location(&self, figment: &Figment) -> InternalResult<String> {
        if *figment.profile() != Config::RELEASE_PROFILE {
            return Ok(self.database_name.clone());
        }

        match &self.database_url {
            Some(url) => Ok(url.strip_prefix("sqlite://").unwrap_or(url).to_string()),
            None => Err(InternalError::Config(
                "DATABASE_URL must be set in production".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::figment::providers::Serialized;

    fn figment(profile: &str) -> Figment {
        Figment::new().select(profile)
    }

    #[test]
    fn defaults_to_session_backend() {
        let config = AppConfig::from_figment(&figment("debug")).unwrap();

        assert_eq!(config.backend, BackendKind::Session);
        assert_eq!(config.database_name, "todo_tracker.db");
        assert_eq!(config.session_idle_minutes, 120);
    }

    #[test]
    fn reads_backend_name() {
        let figment = figment("debug").merge(Serialized::default("backend", "database"));
        let config = AppConfig::from_figment(&figment).unwrap();

        assert_eq!(config.backend, BackendKind::Database);
    }

    #[test]
    fn unknown_backend_is_a_config_error() {
        let figment = figment("debug").merge(Serialized::default("backend", "redis"));

        assert!(matches!(
            AppConfig::from_figment(&figment),
            Err(InternalError::Config(_))
        ));
    }

    #[test]
    fn session_idle_minutes_must_be_positive_and_bounded() {
        for minutes in [0, -5, i64::MAX] {
            let figment =
                figment("debug").merge(Serialized::default("session_idle_minutes", minutes));

            assert!(matches!(
                AppConfig::from_figment(&figment),
                Err(InternalError::Config(_))
            ));
        }

        let figment = figment("debug").merge(Serialized::default("session_idle_minutes", 30));
        let config = AppConfig::from_figment(&figment).unwrap();
        assert_eq!(config.session_idle_timeout(), Duration::minutes(30));
    }

    #[test]
    fn local_profile_ignores_database_url() {
        let figment = figment("debug")
            .merge(Serialized::default("database_url", "sqlite:///srv/todos.db"));
        let config = AppConfig::from_figment(&figment).unwrap();

        assert_eq!(config.database_location(&figment).unwrap(), "todo_tracker.db");
    }

    #[test]
    fn production_requires_database_url() {
        let figment = figment("release");
        let config = AppConfig::from_figment(&figment).unwrap();
        assert!(config.database_location(&figment).is_err());

        let figment = figment.merge(Serialized::default("database_url", "sqlite:///srv/todos.db"));
        let config = AppConfig::from_figment(&figment).unwrap();
        assert_eq!(config.database_location(&figment).unwrap(), "/srv/todos.db");
    }
}
