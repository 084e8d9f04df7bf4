use anyhow::Result;
use registra::app::App;
use registra::cli::{self, actions, actions::Action};
use registra::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let action = cli::start()?;

    let config = AppConfig::load()?;
    let mut app = App::build(&config)?;

    match action {
        Action::Open { route, page } => actions::open(&mut app, &route, page).await?,
    }

    Ok(())
}
