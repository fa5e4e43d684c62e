use std::fs;
use std::path::Path;

use tracing::info;
use vantage_base::Result;
use vantage_nav::NavConfig;

pub fn load_config(path: impl AsRef<Path>) -> Result<NavConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let config: NavConfig = serde_json::from_str(&text)?;
    info!(path = %path.display(), "loaded navigation config");
    Ok(config)
}
