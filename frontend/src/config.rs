use shared::{client::DEFAULT_SERVICE_BASE_URL, ClientConfig, RefetchPolicy};
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

const SERVICE_URL_META: &str = "voter-service-url";
const LOG_LEVEL_META: &str = "voter-log-level";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub client: ClientConfig,
    pub refetch: RefetchPolicy,
    pub log_level: LevelFilter,
}

impl Config {
    /// Host page `<meta>` tags win over the build-time `VOTER_SERVICE_URL`.
    pub fn load() -> Self {
        let service_base_url = meta_content(SERVICE_URL_META)
            .or_else(|| option_env!("VOTER_SERVICE_URL").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_SERVICE_BASE_URL.to_string());
        let log_level = meta_content(LOG_LEVEL_META)
            .and_then(|level| LevelFilter::from_str(&level).ok())
            .unwrap_or(LevelFilter::INFO);

        Self {
            client: ClientConfig::new(service_base_url),
            refetch: RefetchPolicy::OnMount,
            log_level,
        }
    }
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document.query_selector(&format!("meta[name=\"{name}\"]")).ok()??;
    meta.get_attribute("content")
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}
