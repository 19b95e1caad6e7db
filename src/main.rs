use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use search_assistant::{config::Config, create_router, utils::init_logger, AppState};

#[derive(Parser, Debug)]
#[command(name = "search-assistant")]
#[command(about = "Keyword search augmentation service", long_about = None)]
struct Args {
    /// Bind address (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logger();

    let mut config = Config::from_env()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    info!("Configuration loaded: {:?}", config.server);

    if config.search.qianfan_api_key.is_empty() {
        info!("BAIDU_API_KEY not set, direct search will return no results");
    }
    if !config.cc98.has_credentials() {
        info!("CC98 credentials not set, forum search will fall back to direct search");
    }
    if config.llm.api_key.is_empty() {
        info!("DEEPSEEK_API_KEY not set, using local keyword and summary fallbacks");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(config)?;
    let app = create_router(state);

    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
