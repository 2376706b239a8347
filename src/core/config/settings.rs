use super::parsing::{
    env_optional, env_or_default, parse_bool, parse_cors_origins, parse_environment, parse_u16,
    parse_u32, parse_u64,
};
use super::secret::load_or_create_secret_key;
use super::types::{
    ApiSettings, ConfigError, CorsSettings, DatabaseSettings, RuntimeSettings, SecuritySettings,
    ServerHost, ServerPort, ServerSettings, Settings, TelemetrySettings,
};

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("DOCENTE_HOST", "0.0.0.0");
        let port = env_or_default("DOCENTE_PORT", "8080");

        let environment =
            parse_environment(env_optional("DOCENTE_ENV").or_else(|| env_optional("ENVIRONMENT")));
        let strict_config =
            env_optional("DOCENTE_STRICT_CONFIG").map(|value| parse_bool(&value)).unwrap_or(false)
                || environment.is_production();

        let project_name = env_or_default("PROJECT_NAME", "Gestion Docente API");
        let version = env_or_default("VERSION", env!("CARGO_PKG_VERSION"));
        let api_v1_str = env_or_default("API_V1_STR", "/api/v1");

        let (secret_key, secret_key_from_env) = match env_optional("SECRET_KEY") {
            Some(value) => (value, true),
            None => (load_or_create_secret_key(), false),
        };

        let access_token_expire_minutes = parse_u64(
            "ACCESS_TOKEN_EXPIRE_MINUTES",
            env_or_default("ACCESS_TOKEN_EXPIRE_MINUTES", "1440"),
        )?;
        let algorithm = env_or_default("ALGORITHM", "HS256");

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        let postgres_server = env_or_default("POSTGRES_SERVER", "localhost");
        let postgres_port = parse_u16("POSTGRES_PORT", env_or_default("POSTGRES_PORT", "5432"))?;
        let postgres_user = env_or_default("POSTGRES_USER", "docente");
        let postgres_password = env_or_default("POSTGRES_PASSWORD", "");
        let postgres_db = env_or_default("POSTGRES_DB", "gestion_docente");
        let database_url = env_optional("DATABASE_URL");
        let max_connections =
            parse_u32("DB_MAX_CONNECTIONS", env_or_default("DB_MAX_CONNECTIONS", "20"))?;

        let log_level = env_or_default("DOCENTE_LOG_LEVEL", "info");
        let json = env_optional("DOCENTE_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_enabled =
            env_optional("PROMETHEUS_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            server: ServerSettings {
                host: ServerHost::parse(host)?,
                port: ServerPort::parse(port)?,
            },
            runtime: RuntimeSettings { environment, strict_config },
            api: ApiSettings { project_name, version, api_v1_str },
            security: SecuritySettings {
                secret_key,
                secret_key_from_env,
                access_token_expire_minutes,
                algorithm,
            },
            cors: CorsSettings { origins: cors_origins },
            database: DatabaseSettings {
                postgres_server,
                postgres_port,
                postgres_user,
                postgres_password,
                postgres_db,
                database_url,
                max_connections,
            },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        };

        settings.validate()?;

        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.0
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn security(&self) -> &SecuritySettings {
        &self.security
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        if !self.api.api_v1_str.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "API_V1_STR",
                value: self.api.api_v1_str.clone(),
            });
        }

        if !(self.runtime.strict_config || self.runtime.environment.is_production()) {
            return Ok(());
        }

        if self.database.database_url.is_none() && self.database.postgres_password.is_empty() {
            return Err(ConfigError::MissingSecret("POSTGRES_PASSWORD"));
        }
        if !self.security.secret_key_from_env {
            return Err(ConfigError::MissingSecret("SECRET_KEY"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::config::{ConfigError, Environment, Settings};
    use crate::test_support;

    #[tokio::test]
    async fn load_uses_defaults_outside_strict_mode() {
        let _guard = test_support::env_lock().await;
        test_support::clear_config_env();
        std::env::set_var("SECRET_KEY", "test-secret");

        let settings = Settings::load().expect("settings");

        assert_eq!(settings.server_port(), 8080);
        assert_eq!(settings.api().api_v1_str, "/api/v1");
        assert_eq!(settings.runtime().environment, Environment::Development);
        assert!(!settings.telemetry().prometheus_enabled);
    }

    #[tokio::test]
    async fn strict_mode_requires_database_secret() {
        let _guard = test_support::env_lock().await;
        test_support::clear_config_env();
        std::env::set_var("SECRET_KEY", "test-secret");
        std::env::set_var("DOCENTE_STRICT_CONFIG", "1");

        let result = Settings::load();
        std::env::remove_var("DOCENTE_STRICT_CONFIG");

        assert!(matches!(result, Err(ConfigError::MissingSecret("POSTGRES_PASSWORD"))));
    }

    #[tokio::test]
    async fn production_requires_explicit_secret_key() {
        let _guard = test_support::env_lock().await;
        test_support::clear_config_env();
        std::env::set_var("DOCENTE_ENV", "production");
        std::env::set_var("DATABASE_URL", "postgresql://docente:pw@localhost/docente");

        let result = Settings::load();
        std::env::remove_var("DOCENTE_ENV");
        std::env::remove_var("DATABASE_URL");

        assert!(matches!(result, Err(ConfigError::MissingSecret("SECRET_KEY"))));
    }

    #[tokio::test]
    async fn rejects_zero_pool_size() {
        let _guard = test_support::env_lock().await;
        test_support::clear_config_env();
        std::env::set_var("SECRET_KEY", "test-secret");
        std::env::set_var("DB_MAX_CONNECTIONS", "0");

        let result = Settings::load();
        std::env::remove_var("DB_MAX_CONNECTIONS");

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field: "DB_MAX_CONNECTIONS", .. })
        ));
    }
}
