use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Account the outgoing mail is sent from
    pub sender: String,
    pub smtp_pass: String,
    #[serde(default = "default_smtp_relay")]
    pub smtp_relay: String,
    /// Login for the relay, defaults to `sender`
    #[serde(default)]
    pub smtp_username: Option<String>,
    /// Where owner notifications go, defaults to `sender`
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default = "default_owner_name")]
    pub owner_name: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Config {
    pub fn smtp_username(&self) -> &str {
        self.smtp_username.as_deref().unwrap_or(&self.sender)
    }

    pub fn recipient(&self) -> &str {
        self.recipient.as_deref().unwrap_or(&self.sender)
    }
}

fn default_smtp_relay() -> String {
    "smtp.gmail.com".to_string()
}

fn default_owner_name() -> String {
    "Portfolio Owner".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn load_from_env() -> Result<Config, Box<dyn std::error::Error>> {
    let sender =
        env::var("EMAIL_USER").map_err(|_| "EMAIL_USER environment variable is required")?;
    let smtp_pass =
        env::var("EMAIL_PASS").map_err(|_| "EMAIL_PASS environment variable is required")?;

    let port = match env::var("PORT") {
        Ok(port) => port
            .parse::<u16>()
            .map_err(|e| format!("Failed to parse PORT: {e}"))?,
        Err(_) => default_port(),
    };

    Ok(Config {
        sender,
        smtp_pass,
        smtp_relay: env::var("SMTP_RELAY").unwrap_or_else(|_| default_smtp_relay()),
        smtp_username: env::var("SMTP_USERNAME").ok(),
        recipient: env::var("CONTACT_RECIPIENT").ok(),
        owner_name: env::var("OWNER_NAME").unwrap_or_else(|_| default_owner_name()),
        port,
    })
}

fn load_from_file(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(Into::into)
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path =
        env::var("CONTACT_SERVICE_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return load_from_file(&config_path);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return load_from_file("config.yaml");
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Successfully loaded configuration from environment variables");
            Ok(config)
        }
        Err(e) => Err(format!(
            "Config file not found and environment variables are incomplete. \
             Tried: '{config_path}', 'config.yaml', and environment variables. \
             Error: {e}"
        )
        .into()),
    }
}
