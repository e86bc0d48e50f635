use mindsync_core::Config;

use super::{client, CmdResult};

pub async fn run(api_url: Option<&str>) -> CmdResult {
    let config = Config::load()?;
    let client = client(&config, api_url)?;
    if client.health().await? {
        println!("ok: {}", client.base_url());
        Ok(())
    } else {
        Err(format!("{} answered but did not report ok", client.base_url()).into())
    }
}
