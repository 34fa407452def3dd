use clap::Parser;

use boldmove_infrastructure::config::AppConfig;
use boldmove_infrastructure::logging;
use boldmove_lib::presentation::{bootstrap, cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_path);
    let mut config = AppConfig::load_from(&config_path)?;

    logging::init_logger(config.log_dir.clone())?;

    let service = bootstrap::build_service(&mut config, &config_path).await?;
    cli::run(&args, &service).await
}
