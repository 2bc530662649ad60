use crate::config::Config;

pub fn validate(config: &Config) -> Result<(), String> {
    if config.input.config_column.trim().is_empty() {
        return Err("config_column cannot be empty".into());
    }
    if config.oracle.timeout_ms == 0 {
        return Err("timeout_ms must be > 0".into());
    }
    if config.oracle.attempts == 0 {
        return Err("attempts must be > 0".into());
    }
    for url in [&config.oracle.canid_url, &config.oracle.ripestat_url] {
        let parsed = reqwest::Url::parse(url).map_err(|e| format!("invalid oracle url {url}: {e}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!("oracle url must be http or https: {url}"));
        }
    }
    Ok(())
}
