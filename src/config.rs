use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Main configuration structure for codesmith
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub completion: CompletionConfig,
    pub languages: LanguagesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// POST endpoint accepting {prompt, data} and returning the mode's JSON shape
    pub endpoint_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesConfig {
    /// Built-in language options, ending with the "custom" sentinel
    pub builtin: Vec<String>,
}

impl Config {
    /// Load configuration from file with environment variable overrides.
    /// ALWAYS returns a valid config - never fails.
    pub fn load() -> Self {
        if dotenvy::dotenv().is_ok() {
            tracing::info!("Loaded .env from current directory");
        }

        let config_path =
            env::var("CODESMITH_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {}", config_path);
                        config
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to parse config file {}: {} - using defaults",
                            config_path,
                            e
                        );
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to read config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            tracing::warn!("Config file not found at {} - using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();

        // Validate configuration - log warnings but don't fail
        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = env::var("CODESMITH_SERVER_NAME") {
            self.server.name = name;
        }
        if let Ok(version) = env::var("CODESMITH_SERVER_VERSION") {
            self.server.version = version;
        }
        if let Ok(bind) = env::var("CODESMITH_HTTP_BIND") {
            self.http.bind = bind;
        }
        if let Ok(url) = env::var("CODESMITH_COMPLETION_URL") {
            self.completion.endpoint_url = url;
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.http.bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!("http.bind is not a valid socket address: {}", self.http.bind).into());
        }

        if self.completion.endpoint_url.is_empty() {
            return Err("completion.endpoint_url cannot be empty".into());
        }

        if self.languages.builtin.is_empty() {
            return Err("languages.builtin cannot be empty".into());
        }
        if !self
            .languages
            .builtin
            .iter()
            .any(|l| l.eq_ignore_ascii_case("custom"))
        {
            return Err("languages.builtin must include the \"custom\" sentinel".into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "codesmith".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            http: HttpConfig {
                bind: "127.0.0.1:8788".to_string(),
            },
            completion: CompletionConfig {
                endpoint_url: "http://localhost:8080/api/ai_completion".to_string(),
            },
            languages: LanguagesConfig {
                builtin: [
                    "python",
                    "javascript",
                    "typescript",
                    "java",
                    "c++",
                    "c#",
                    "go",
                    "rust",
                    "ruby",
                    "php",
                    "swift",
                    "kotlin",
                    "html_css_javascript",
                    "custom",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            },
        }
    }
}
