use crate::config::Config;
use crate::db::Store;

pub async fn cmd_initdb(config: &Config, drop: bool) -> anyhow::Result<()> {
    // Connecting applies any pending migrations
    let store = Store::from_config(&config.general).await?;

    if drop {
        store.reset_schema().await?;
    }

    println!("Initialized database.");
    Ok(())
}
