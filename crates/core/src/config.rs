//! Configuration management for deptrag.
//!
//! Configuration is merged from, in increasing precedence:
//! - Built-in defaults
//! - The config file (`.deptrag/config.yaml` in the workspace)
//! - Environment variables
//! - Command-line flags
//!
//! Secrets are never stored in the config file itself. The file names the
//! environment variable that holds each key (`apiKeyEnv`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Providers the LLM factory knows how to build.
pub const KNOWN_PROVIDERS: [&str; 3] = ["azure-openai", "openai", "ollama"];

/// Default environment variable holding the search index key.
pub const DEFAULT_SEARCH_KEY_ENV: &str = "DEPTRAG_SEARCH_KEY";

/// Default Azure AI Search REST API version.
pub const DEFAULT_SEARCH_API_VERSION: &str = "2023-11-01";

/// Main application configuration.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .deptrag/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Active LLM provider ("azure-openai", "openai", "ollama")
    pub provider: String,

    /// Model or deployment identifier sent with every completion
    pub model: String,

    /// Explicit LLM API key (overrides the provider's apiKeyEnv)
    pub api_key: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// LLM provider configurations
    pub llm: Option<LlmConfig>,

    /// Search index settings
    pub search: SearchConfig,

    /// Path of the catalog database (relative paths resolve against the workspace)
    pub catalog_path: PathBuf,
}

/// LLM configuration from config.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(rename = "activeProvider")]
    pub active_provider: String,

    pub providers: HashMap<String, ProviderConfig>,
}

/// Provider-specific configuration.
///
/// Variants are matched in order, so the Azure variant (the only one with
/// `deployment`) comes first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderConfig {
    AzureOpenAI {
        #[serde(rename = "apiKeyEnv")]
        api_key_env: String,
        endpoint: String,
        deployment: String,
        #[serde(rename = "apiVersion")]
        api_version: Option<String>,
    },
    OpenAI {
        #[serde(rename = "apiKeyEnv")]
        api_key_env: String,
        model: String,
        endpoint: Option<String>,
    },
    Ollama {
        endpoint: String,
        model: String,
        timeout: Option<u64>,
    },
}

impl ProviderConfig {
    /// Model or deployment identifier for this provider.
    pub fn model(&self) -> &str {
        match self {
            Self::AzureOpenAI { deployment, .. } => deployment,
            Self::OpenAI { model, .. } => model,
            Self::Ollama { model, .. } => model,
        }
    }

    /// Endpoint override, if the provider has one.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::AzureOpenAI { endpoint, .. } => Some(endpoint),
            Self::OpenAI { endpoint, .. } => endpoint.as_deref(),
            Self::Ollama { endpoint, .. } => Some(endpoint),
        }
    }

    /// Environment variable holding the API key, for providers that need one.
    pub fn api_key_env(&self) -> Option<&str> {
        match self {
            Self::AzureOpenAI { api_key_env, .. } | Self::OpenAI { api_key_env, .. } => {
                Some(api_key_env)
            }
            Self::Ollama { .. } => None,
        }
    }
}

/// Search index settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search service endpoint (e.g. https://name.search.windows.net)
    pub endpoint: Option<String>,

    /// Name of the index holding document fragments
    #[serde(rename = "indexName")]
    pub index_name: Option<String>,

    /// Environment variable holding the search key
    #[serde(rename = "apiKeyEnv", default = "default_search_key_env")]
    pub api_key_env: String,

    /// REST API version
    #[serde(rename = "apiVersion", default = "default_search_api_version")]
    pub api_version: String,
}

fn default_search_key_env() -> String {
    DEFAULT_SEARCH_KEY_ENV.to_string()
}

fn default_search_api_version() -> String {
    DEFAULT_SEARCH_API_VERSION.to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            index_name: None,
            api_key_env: default_search_key_env(),
            api_version: default_search_api_version(),
        }
    }
}

/// Fully resolved search settings, ready to build a client from.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub endpoint: String,
    pub index_name: String,
    pub api_key: String,
    pub api_version: String,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmConfig>,
    search: Option<SearchConfig>,
    catalog: Option<CatalogConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "azure-openai".to_string(),
            model: "gpt-4o".to_string(),
            api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
            llm: None,
            search: SearchConfig::default(),
            catalog_path: PathBuf::from(".deptrag/catalog.db"),
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file, environment variables and defaults.
    ///
    /// Environment variables:
    /// - `DEPTRAG_WORKSPACE`: Override workspace path
    /// - `DEPTRAG_CONFIG`: Path to config file
    /// - `DEPTRAG_PROVIDER`: LLM provider
    /// - `DEPTRAG_MODEL`: Model or deployment identifier
    /// - `DEPTRAG_API_KEY`: LLM API key
    /// - `DEPTRAG_SEARCH_ENDPOINT`: Search service endpoint
    /// - `DEPTRAG_SEARCH_INDEX`: Search index name
    /// - `DEPTRAG_CATALOG`: Catalog database path
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use deptrag_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Workspace: {:?}", config.workspace);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None, None)
    }

    /// Load configuration with an explicit workspace and config file.
    ///
    /// `workspace` and `config_file` take precedence over `DEPTRAG_WORKSPACE`
    /// and `DEPTRAG_CONFIG`. They decide which file is merged, so they are
    /// applied before it is read.
    pub fn load_from(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) =
            workspace.or_else(|| std::env::var("DEPTRAG_WORKSPACE").ok().map(PathBuf::from))
        {
            config.workspace = workspace;
        }

        config.config_file =
            config_file.or_else(|| std::env::var("DEPTRAG_CONFIG").ok().map(PathBuf::from));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.deptrag_dir().join("config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("DEPTRAG_PROVIDER") {
            config.select_provider(provider);
        }

        if let Ok(model) = std::env::var("DEPTRAG_MODEL") {
            config.model = model;
        }

        if let Ok(endpoint) = std::env::var("DEPTRAG_SEARCH_ENDPOINT") {
            config.search.endpoint = Some(endpoint);
        }

        if let Ok(index) = std::env::var("DEPTRAG_SEARCH_INDEX") {
            config.search.index_name = Some(index);
        }

        if let Ok(catalog) = std::env::var("DEPTRAG_CATALOG") {
            config.catalog_path = PathBuf::from(catalog);
        }

        config.api_key = std::env::var("DEPTRAG_API_KEY").ok();
        config.log_level = std::env::var("RUST_LOG").ok().or(config.log_level);

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Switch the active provider.
    ///
    /// When the provider changes, the model follows the new provider's
    /// configured model or deployment, if the config file declares one.
    pub fn select_provider(&mut self, provider: String) {
        if provider != self.provider {
            if let Some(model) = self.get_provider_config(&provider).map(ProviderConfig::model) {
                self.model = model.to_string();
            }
        }
        self.provider = provider;
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self;

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(search) = config_file.search {
            result.search = search;
        }

        if let Some(path) = config_file.catalog.and_then(|c| c.path) {
            result.catalog_path = PathBuf::from(path);
        }

        if let Some(llm) = config_file.llm {
            result.provider = llm.active_provider.clone();

            if let Some(provider_config) = llm.providers.get(&llm.active_provider) {
                result.model = provider_config.model().to_string();
            }

            result.llm = Some(llm);
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config file.
    /// Workspace and config file flags go through [`AppConfig::load_from`]
    /// instead, since they choose the file being merged.
    pub fn with_overrides(
        mut self,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(provider) = provider {
            self.select_provider(provider);
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .deptrag directory.
    pub fn deptrag_dir(&self) -> PathBuf {
        self.workspace.join(".deptrag")
    }

    /// Ensure the .deptrag directory exists.
    pub fn ensure_deptrag_dir(&self) -> AppResult<()> {
        let dir = self.deptrag_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| {
                AppError::Config(format!("Failed to create .deptrag directory: {}", e))
            })?;
        }
        Ok(())
    }

    /// Absolute path of the catalog database.
    pub fn catalog_db_path(&self) -> PathBuf {
        if self.catalog_path.is_absolute() {
            self.catalog_path.clone()
        } else {
            self.workspace.join(&self.catalog_path)
        }
    }

    /// Get the configuration of a provider, if the config file declares one.
    pub fn get_provider_config(&self, provider: &str) -> Option<&ProviderConfig> {
        self.llm.as_ref().and_then(|llm| llm.providers.get(provider))
    }

    /// Endpoint configured for a provider.
    pub fn resolve_endpoint(&self, provider: &str) -> Option<String> {
        self.get_provider_config(provider)
            .and_then(ProviderConfig::endpoint)
            .map(str::to_string)
    }

    /// API version configured for a provider (Azure only).
    pub fn resolve_api_version(&self, provider: &str) -> Option<String> {
        match self.get_provider_config(provider) {
            Some(ProviderConfig::AzureOpenAI { api_version, .. }) => api_version.clone(),
            _ => None,
        }
    }

    /// Request timeout configured for a provider (Ollama only).
    pub fn resolve_timeout(&self, provider: &str) -> Option<u64> {
        match self.get_provider_config(provider) {
            Some(ProviderConfig::Ollama { timeout, .. }) => *timeout,
            _ => None,
        }
    }

    /// Resolve the LLM API key.
    ///
    /// `DEPTRAG_API_KEY` wins, then the provider's `apiKeyEnv` variable.
    pub fn resolve_api_key(&self, provider: &str) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        self.get_provider_config(provider)
            .and_then(ProviderConfig::api_key_env)
            .and_then(|env_var| std::env::var(env_var).ok())
    }

    /// Resolve everything needed to talk to the search index.
    pub fn search_settings(&self) -> AppResult<SearchSettings> {
        let endpoint = self.search.endpoint.clone().ok_or_else(|| {
            AppError::Config(
                "Search endpoint not configured (search.endpoint or DEPTRAG_SEARCH_ENDPOINT)"
                    .to_string(),
            )
        })?;

        let index_name = self.search.index_name.clone().ok_or_else(|| {
            AppError::Config(
                "Search index not configured (search.indexName or DEPTRAG_SEARCH_INDEX)"
                    .to_string(),
            )
        })?;

        let api_key = std::env::var(&self.search.api_key_env).map_err(|_| {
            AppError::Config(format!(
                "Search key not found in environment variable: {}",
                self.search.api_key_env
            ))
        })?;

        Ok(SearchSettings {
            endpoint,
            index_name,
            api_key,
            api_version: self.search.api_version.clone(),
        })
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.provider.as_str();

        if !KNOWN_PROVIDERS.contains(&provider) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config(
                "Model/deployment identifier cannot be empty".to_string(),
            ));
        }

        if provider == "azure-openai" && self.resolve_endpoint(provider).is_none() {
            return Err(AppError::Config(
                "azure-openai requires an endpoint in llm.providers".to_string(),
            ));
        }

        if provider != "ollama" && self.resolve_api_key(provider).is_none() {
            let source = self
                .get_provider_config(provider)
                .and_then(ProviderConfig::api_key_env)
                .unwrap_or("DEPTRAG_API_KEY");
            return Err(AppError::Config(format!(
                "API key not found in environment variable: {}",
                source
            )));
        }

        Ok(())
    }
}
