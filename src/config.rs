use std::time::Duration;

use crate::args::Args;

pub const DEFAULT_CDX_ENDPOINT: &str = "https://web.archive.org/cdx/search/cdx";
pub const DEFAULT_ARCHIVE_BASE: &str = "https://web.archive.org/web";
pub const DEFAULT_USER_AGENT: &str = "WebTimeMachine/1.0";
pub const DEFAULT_PAGE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_INDEX_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOOKBACK_YEARS: u32 = 10;
pub const DEFAULT_ROW_LIMIT: u32 = 500;

#[derive(Debug, Clone)]
pub struct Config {
    pub cdx_endpoint: String,
    pub archive_base: String,
    pub user_agent: String,
    pub page_timeout: Duration,
    pub index_timeout: Duration,
    pub lookback_years: u32,
    pub row_limit: u32,
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cdx_endpoint: DEFAULT_CDX_ENDPOINT.to_string(),
            archive_base: DEFAULT_ARCHIVE_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_timeout: Duration::from_secs(DEFAULT_PAGE_TIMEOUT_SECS),
            index_timeout: Duration::from_secs(DEFAULT_INDEX_TIMEOUT_SECS),
            lookback_years: DEFAULT_LOOKBACK_YEARS,
            row_limit: DEFAULT_ROW_LIMIT,
            workers: default_workers(),
        }
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        let defaults = Config::default();
        Config {
            cdx_endpoint: args
                .cdx_endpoint
                .clone()
                .unwrap_or(defaults.cdx_endpoint),
            archive_base: args
                .archive_base
                .clone()
                .unwrap_or(defaults.archive_base),
            user_agent: args.user_agent.clone().unwrap_or(defaults.user_agent),
            page_timeout: args
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.page_timeout),
            index_timeout: args
                .index_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.index_timeout),
            lookback_years: defaults.lookback_years,
            row_limit: defaults.row_limit,
            workers: args.workers.unwrap_or(defaults.workers),
        }
    }
}

pub fn default_workers() -> usize {
    let cpu_count = num_cpus::get();
    std::cmp::min(cpu_count, 8)
}
