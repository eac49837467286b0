//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MultiDbConfig;
use crate::config::secret::secret_string;
use crate::domain::errors::DbError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Loads a `.env` file if one is present
/// 2. Reads the TOML file
/// 3. Performs environment variable substitution (`${VAR}` syntax)
/// 4. Parses the TOML into [`MultiDbConfig`]
/// 5. Applies environment variable overrides (`MULTIDB_*` prefix)
/// 6. Validates the configuration
///
/// # Errors
///
/// Returns `DbError::Configuration` if the file cannot be read, parsing
/// fails, a referenced environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use multidb::config::load_config;
///
/// let config = load_config("multidb.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MultiDbConfig> {
    let path = path.as_ref();

    // Optional .env support; silently ignored when absent
    let _ = dotenvy::dotenv();

    if !path.exists() {
        return Err(DbError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DbError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: MultiDbConfig = toml::from_str(&contents)
        .map_err(|e| DbError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config
        .validate()
        .map_err(|e| DbError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(DbError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `MULTIDB_*` prefix
///
/// Variables follow the pattern `MULTIDB_<SECTION>_<KEY>`, for example
/// `MULTIDB_POSTGRES_PASSWORD` or `MULTIDB_APPLICATION_LOG_LEVEL`. Only
/// sections present in the parsed file are overridden.
fn apply_env_overrides(config: &mut MultiDbConfig) {
    if let Ok(val) = std::env::var("MULTIDB_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Some(ref mut mongodb) = config.mongodb {
        if let Ok(val) = std::env::var("MULTIDB_MONGODB_HOST") {
            mongodb.host = val;
        }
        if let Ok(val) = std::env::var("MULTIDB_MONGODB_USERNAME") {
            mongodb.username = Some(val);
        }
        if let Ok(val) = std::env::var("MULTIDB_MONGODB_PASSWORD") {
            mongodb.password = Some(secret_string(val));
        }
        if let Ok(val) = std::env::var("MULTIDB_MONGODB_DATABASE") {
            mongodb.database = val;
        }
        if let Ok(val) = std::env::var("MULTIDB_MONGODB_COLLECTION") {
            mongodb.collection = val;
        }
    }

    if let Some(ref mut postgres) = config.postgres {
        if let Ok(val) = std::env::var("MULTIDB_POSTGRES_HOST") {
            postgres.host = val;
        }
        if let Ok(val) = std::env::var("MULTIDB_POSTGRES_USER") {
            postgres.user = val;
        }
        if let Ok(val) = std::env::var("MULTIDB_POSTGRES_PASSWORD") {
            postgres.password = secret_string(val);
        }
        if let Ok(val) = std::env::var("MULTIDB_POSTGRES_DATABASE") {
            postgres.database = val;
        }
    }

    if let Some(ref mut mysql) = config.mysql {
        if let Ok(val) = std::env::var("MULTIDB_MYSQL_HOST") {
            mysql.host = val;
        }
        if let Ok(val) = std::env::var("MULTIDB_MYSQL_USER") {
            mysql.user = val;
        }
        if let Ok(val) = std::env::var("MULTIDB_MYSQL_PASSWORD") {
            mysql.password = secret_string(val);
        }
        if let Ok(val) = std::env::var("MULTIDB_MYSQL_DATABASE") {
            mysql.database = val;
        }
    }

    if let Some(ref mut mssql) = config.mssql {
        if let Ok(val) = std::env::var("MULTIDB_MSSQL_HOST") {
            mssql.host = val;
        }
        if let Ok(val) = std::env::var("MULTIDB_MSSQL_USER") {
            mssql.user = val;
        }
        if let Ok(val) = std::env::var("MULTIDB_MSSQL_PASSWORD") {
            mssql.password = secret_string(val);
        }
        if let Ok(val) = std::env::var("MULTIDB_MSSQL_DATABASE") {
            mssql.database = val;
        }
    }

    if let Ok(val) = std::env::var("MULTIDB_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("MULTIDB_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("MULTIDB_TEST_SUBST_VAR", "test_value");
        let input = "password = \"${MULTIDB_TEST_SUBST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("MULTIDB_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("MULTIDB_TEST_MISSING_VAR");
        let input = "password = \"${MULTIDB_TEST_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# password = \"${MULTIDB_TEST_COMMENT_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${MULTIDB_TEST_COMMENT_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
backend = "postgres"

[application]
name = "multidb"
log_level = "info"

[postgres]
host = "localhost"
user = "postgres"
password = "pass"
database = "testdb"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.name, "multidb");
        assert_eq!(config.postgres.unwrap().host, "localhost");
    }

    #[test]
    fn test_load_config_rejects_missing_backend_section() {
        let toml_content = r#"
backend = "mssql"

[postgres]
host = "localhost"
user = "postgres"
password = "pass"
database = "testdb"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("validation failed"));
    }
}
