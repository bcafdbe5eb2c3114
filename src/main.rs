use tic_tac_toe::{term, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env()?;
    log::debug!("{config:?}");
    term::play(config).await?;
    Ok(())
}
