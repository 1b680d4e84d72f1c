use config::{Config, ConfigError, Environment, Map};
use serde::Deserialize;

/// Process settings, read once from the environment at startup and handed to
/// the components that need them through `AppState`.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Settings {
    pub listen_port: u16,
    pub database_url: String,
    pub database_pool_max_connections: u32,
    /// comma separated list of origins allowed by CORS
    pub allowed_origins: String,
    pub max_upload_bytes: usize,
    pub notify_timeout_secs: u64,
    pub admin_token_ttl_hours: i64,
    pub hackathon_max_team_size: i64,
    //telegram
    pub telegram_api_base: String,
    pub telegram_career_bot_token: Option<String>,
    pub telegram_career_chat_id: Option<String>,
    pub telegram_contact_bot_token: Option<String>,
    pub telegram_contact_chat_id: Option<String>,
    pub telegram_cpu_bot_token: Option<String>,
    pub telegram_cpu_chat_id: Option<String>,
    pub telegram_hackathon_bot_token: Option<String>,
    pub telegram_hackathon_chat_id: Option<String>,
    //cloudinary
    pub cloudinary_api_base: String,
    pub cloudinary_cloud_name: Option<String>,
    pub cloudinary_api_key: Option<String>,
    pub cloudinary_api_secret: Option<String>,
    pub cloudinary_folder: String,
    //sheets
    pub sheets_api_base: String,
    pub google_service_account_file: Option<String>,
    pub google_sheet_id: Option<String>,
    pub google_sheet_range: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            listen_port: 8000,
            database_url: "sqlite://formdesk.db?mode=rwc".into(),
            database_pool_max_connections: 5,
            allowed_origins: "https://cits.org.in,https://www.cits.org.in".into(),
            max_upload_bytes: 10 * 1024 * 1024,
            notify_timeout_secs: 5,
            admin_token_ttl_hours: 24 * 30,
            hackathon_max_team_size: 4,
            telegram_api_base: "https://api.telegram.org".into(),
            telegram_career_bot_token: None,
            telegram_career_chat_id: None,
            telegram_contact_bot_token: None,
            telegram_contact_chat_id: None,
            telegram_cpu_bot_token: None,
            telegram_cpu_chat_id: None,
            telegram_hackathon_bot_token: None,
            telegram_hackathon_chat_id: None,
            cloudinary_api_base: "https://api.cloudinary.com".into(),
            cloudinary_cloud_name: None,
            cloudinary_api_key: None,
            cloudinary_api_secret: None,
            cloudinary_folder: "media".into(),
            sheets_api_base: "https://sheets.googleapis.com".into(),
            google_service_account_file: None,
            google_sheet_id: None,
            google_sheet_range: "Sheet1".into(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_env(Environment::default())
    }

    /// Builds settings from an explicit variable map instead of the process
    /// environment.
    pub fn from_map(vars: Map<String, String>) -> Result<Self, ConfigError> {
        Self::from_env(Environment::default().source(Some(vars)))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .add_source(env.ignore_empty(true))
            .build()?;
        let s: Settings = conf.try_deserialize()?;
        if s.hackathon_max_team_size < 1 {
            return Err(ConfigError::Message(
                "hackathon_max_team_size must be at least 1".into(),
            ));
        }
        Ok(s)
    }

    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect()
    }
}
