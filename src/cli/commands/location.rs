use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_location(config: &Config, query: &str) -> anyhow::Result<()> {
    let shared = SharedState::new(config.clone()).await?;

    let location = shared.lookup.location(query).await?;
    println!("{}", serde_json::to_string_pretty(&location)?);

    Ok(())
}
