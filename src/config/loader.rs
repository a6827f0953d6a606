//! Layered settings loader
//!
//! Resolves where settings come from (a directory of TOML layers or a single
//! file), merges `SLACK_ERROR_*` environment overrides on top and validates
//! the result.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "SLACK_ERROR_CONFIG_DIR";

/// Environment variable for a single configuration file
const CONFIG_FILE_ENV: &str = "SLACK_ERROR_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix for overrides, e.g. `SLACK_ERROR_SLACK__WEBHOOK_URL`
const ENV_PREFIX: &str = "SLACK_ERROR";

/// Separator for nested keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Settings loader.
///
/// Sources, lowest priority first:
/// 1. `default.toml` (required)
/// 2. `{environment}.toml` (optional)
/// 3. `local.toml` (optional)
/// 4. `SLACK_ERROR_*` environment variables
///
/// In single-file mode only that file and the environment variables are read.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Loader configured from `SLACK_ERROR_CONFIG_DIR`,
    /// `SLACK_ERROR_CONFIG_FILE` and `SLACK_ERROR_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Fails when both the directory and the file variables are set.
    pub fn new() -> Result<Self, ConfigError> {
        let dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && dir_var.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "SLACK_ERROR_CONFIG_DIR and SLACK_ERROR_CONFIG_FILE cannot both be set. \
                 Use SLACK_ERROR_CONFIG_DIR for layered configuration or \
                 SLACK_ERROR_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Loader reading a single file, bypassing the directory layers
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Loader reading layers from `dir`
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: dir.into(),
            config_file: None,
            environment: AppEnvironment::from_env(),
        }
    }

    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Merge every source, deserialize and validate.
    ///
    /// # Errors
    ///
    /// - a required file is missing
    /// - the merged sources do not deserialize into `Settings`
    /// - validation fails (e.g. missing webhook URL)
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings: Settings = self.build_config()?.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = match self.config_file {
            Some(ref file) => Self::add_file_source(Config::builder(), file, true)?,
            None => self.add_layered_sources(Config::builder())?,
        };

        // FOO_SLACK__WEBHOOK_URL -> slack.webhook_url
        Self::add_env_source(builder)
            .build()
            .map_err(ConfigError::from)
    }

    fn add_layered_sources(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder =
            Self::add_file_source(builder, &self.config_dir.join("default.toml"), true)?;
        let builder = Self::add_file_source(
            builder,
            &self.config_dir.join(self.environment.config_file_name()),
            false,
        )?;
        Self::add_file_source(builder, &self.config_dir.join("local.toml"), false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(&path.to_string_lossy(), FileFormat::Toml).required(required),
        ))
    }

    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::DeliveryMode;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests touching process environment variables run one at a time
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const WEBHOOK: &str = "https://hooks.slack.com/services/T000/B000/XXXX";

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Restores touched environment variables on drop
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    fn clear_env(env: &mut EnvGuard) {
        env.remove(CONFIG_DIR_ENV);
        env.remove(CONFIG_FILE_ENV);
        env.remove(AppEnvironment::ENV_VAR);
        env.remove("SLACK_ERROR_SLACK__WEBHOOK_URL");
        env.remove("SLACK_ERROR_SLACK__CHANNEL");
    }

    #[test]
    fn test_new_defaults() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        clear_env(&mut env);

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_new_mutual_exclusivity_error() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        clear_env(&mut env);
        env.set(CONFIG_DIR_ENV, "/etc/slack-error");
        env.set(CONFIG_FILE_ENV, "/etc/slack-error/settings.toml");

        let err = ConfigLoader::new().unwrap_err();
        assert!(matches!(err, ConfigError::MutualExclusivityError(_)));
    }

    #[test]
    fn test_load_missing_default_toml() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        clear_env(&mut env);

        let dir = setup_config_dir(&[]);
        let err = ConfigLoader::from_dir(dir.path()).load().unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_default_toml_only() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        clear_env(&mut env);

        let dir = setup_config_dir(&[(
            "default.toml",
            &format!("[slack]\nwebhook_url = \"{WEBHOOK}\"\n"),
        )]);

        let settings = ConfigLoader::from_dir(dir.path()).load().unwrap();
        assert_eq!(settings.slack.webhook_url, WEBHOOK);
        assert_eq!(settings.slack.color, "#ff0000");
        assert_eq!(settings.logger.level, "info");
    }

    #[test]
    fn test_load_precedence_chain() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        clear_env(&mut env);

        let dir = setup_config_dir(&[
            (
                "default.toml",
                &format!(
                    "[slack]\nwebhook_url = \"{WEBHOOK}\"\ntitle = \"default\"\nchannel = \"#default\"\n"
                ),
            ),
            (
                "production.toml",
                "[slack]\ntitle = \"production\"\ndelivery = \"await\"\n",
            ),
            ("local.toml", "[slack]\nchannel = \"#local\"\n"),
        ]);
        env.set("SLACK_ERROR_SLACK__CHANNEL", "#from-env");

        let settings = ConfigLoader::from_dir(dir.path())
            .with_environment(AppEnvironment::Production)
            .load()
            .unwrap();

        assert_eq!(settings.slack.title, "production");
        assert_eq!(settings.slack.delivery, DeliveryMode::Await);
        assert_eq!(settings.slack.channel.as_deref(), Some("#from-env"));
    }

    #[test]
    fn test_load_single_file_mode() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        clear_env(&mut env);

        let dir = setup_config_dir(&[(
            "custom.toml",
            &format!("[slack]\nwebhook_url = \"{WEBHOOK}\"\n\n[logger]\nlevel = \"debug\"\n"),
        )]);

        let settings = ConfigLoader::from_file(dir.path().join("custom.toml"))
            .load()
            .unwrap();
        assert_eq!(settings.slack.webhook_url, WEBHOOK);
        assert_eq!(settings.logger.level, "debug");
    }

    #[test]
    fn test_load_rejects_missing_webhook() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        clear_env(&mut env);

        let dir = setup_config_dir(&[("default.toml", "[logger]\nlevel = \"info\"\n")]);
        let err = ConfigLoader::from_dir(dir.path()).load().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "slack.webhook_url")
        );
    }

    #[test]
    fn test_webhook_from_env_only() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        clear_env(&mut env);
        env.set("SLACK_ERROR_SLACK__WEBHOOK_URL", WEBHOOK);

        let dir = setup_config_dir(&[("default.toml", "")]);
        let settings = ConfigLoader::from_dir(dir.path()).load().unwrap();
        assert_eq!(settings.slack.webhook_url, WEBHOOK);
    }
}
