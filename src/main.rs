use anyhow::Result;
use calor::Config;
use calor::driver::Driver;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    calor::logging::init_logging(&config.logging)?;

    info!("Calor heat-pump controller starting up");

    let mut driver = Driver::new(config)?;

    match driver.run().await {
        Ok(writes) => {
            info!("Run complete, {} register writes issued", writes);
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {}", e);
            Err(anyhow::anyhow!("Run failed: {}", e))
        }
    }
}
