use anyhow::Result;
use poem::{listener::TcpListener, Server};
use team_roster::{api, config::Config, db::Db, view::Views};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    info!(database = %config.redacted_database_url(), "connecting");

    let db = Db::connect(config.database_url.as_str()).await?;
    if config.init_schema {
        db.init_schema().await?;
    }

    let app = api::app(db, Views::new()?, &config)?;

    info!(addr = %config.listen_addr, "listening");
    Server::new(TcpListener::bind(config.listen_addr.clone()))
        .run(app)
        .await?;

    Ok(())
}
