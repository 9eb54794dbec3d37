use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub data_path: PathBuf,
    /// Optional YAML analysis profile; built-in defaults apply when unset.
    pub profile_path: Option<PathBuf>,
    pub log_level: String,
    /// How many ranked candidates reports show by default.
    pub top_n: usize,
}
