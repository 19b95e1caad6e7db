use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub llm: LLMConfig,
    pub search: SearchConfig,
    pub cc98: Cc98Config,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

/// Limits applied to every outbound call.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_idle_per_host: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub qianfan_api_key: String,
    pub qianfan_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cc98Config {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
    pub api_base_url: String,
    pub auth_url: String,
    pub web_base_url: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            max_idle_per_host: 5,
        }
    }
}

impl HttpConfig {
    /// Build the client shared by every adapter.
    pub fn build_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .pool_max_idle_per_host(self.max_idle_per_host)
            .build()
    }
}

impl Cc98Config {
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "*".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
            http: HttpConfig {
                connect_timeout_secs: env::var("HTTP_CONNECT_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
                request_timeout_secs: env::var("HTTP_REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()?,
                max_idle_per_host: env::var("HTTP_MAX_IDLE_PER_HOST")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()?,
            },
            llm: LLMConfig {
                api_key: env::var("DEEPSEEK_API_KEY").unwrap_or_default(),
                base_url: env::var("DEEPSEEK_BASE_URL")
                    .unwrap_or_else(|_| "https://api.deepseek.com".to_string()),
                model: env::var("DEEPSEEK_MODEL").unwrap_or_else(|_| "deepseek-chat".to_string()),
            },
            search: SearchConfig {
                qianfan_api_key: env::var("BAIDU_API_KEY").unwrap_or_default(),
                qianfan_url: env::var("BAIDU_SEARCH_URL").unwrap_or_else(|_| {
                    "https://qianfan.baidubce.com/v2/ai_search/chat/completions".to_string()
                }),
            },
            cc98: Cc98Config {
                username: env::var("CC98_USERNAME").unwrap_or_default(),
                password: env::var("CC98_PASSWORD").unwrap_or_default(),
                client_id: env::var("CC98_CLIENT_ID").unwrap_or_default(),
                client_secret: env::var("CC98_CLIENT_SECRET").unwrap_or_default(),
                api_base_url: env::var("CC98_API_BASE_URL")
                    .unwrap_or_else(|_| "https://api.cc98.org".to_string()),
                auth_url: env::var("CC98_AUTH_URL")
                    .unwrap_or_else(|_| "https://openid.cc98.org/connect/token".to_string()),
                web_base_url: env::var("CC98_WEB_BASE_URL")
                    .unwrap_or_else(|_| "https://www.cc98.org".to_string()),
            },
        })
    }
}
