use super::schema::Config;

const MAX_RETRIES: usize = 10;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    match (&config.source.base_url, &config.source.data_dir) {
        (None, None) => {
            errors.push("source: set either base_url or data_dir".to_string());
        }
        (Some(_), Some(_)) => {
            errors.push("source: base_url and data_dir are mutually exclusive".to_string());
        }
        (Some(url), None) => {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(format!(
                    "source.base_url: '{}' must start with http:// or https://",
                    url
                ));
            }
        }
        (None, Some(_)) => {}
    }

    if let Err(e) = humantime::parse_duration(&config.fetch.timeout) {
        errors.push(format!(
            "fetch.timeout: invalid duration '{}' - {}",
            config.fetch.timeout, e
        ));
    }

    if config.fetch.retries > MAX_RETRIES {
        errors.push(format!(
            "fetch.retries: {} exceeds the maximum of {}",
            config.fetch.retries, MAX_RETRIES
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
