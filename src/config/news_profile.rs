use serde::Deserialize;
use config::{Config, File};
use anyhow::Result;
use tracing::warn;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EndpointConfig {
    pub rsshub_base: String,
    pub rsshub_mirror: String,
    pub serverchan: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            rsshub_base: "https://rsshub.app".to_string(),
            rsshub_mirror: "https://rsshub.rssforever.com".to_string(),
            serverchan: "https://sctapi.ftqq.com".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TimingConfig {
    pub fetch_timeout_sec: u64,
    pub push_timeout_sec: u64,
    pub source_gap_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_sec: 10,
            push_timeout_sec: 10,
            source_gap_ms: 500,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetryConfig {
    /// 对整条策略链的整体重试次数（含首次）
    pub attempts: u32,
    pub pause_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { attempts: 2, pause_secs: 1 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NewsProfile {
    pub enabled_sources: Vec<String>,
    pub endpoints: EndpointConfig,
    pub timing: TimingConfig,
    pub retry: RetryConfig,
}

impl Default for NewsProfile {
    fn default() -> Self {
        Self {
            enabled_sources: ["weibo", "zhihu", "bilibili", "toutiao", "cctv", "usa"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            endpoints: EndpointConfig::default(),
            timing: TimingConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl NewsProfile {
    /// 配置文件缺失或损坏时退回内置默认值，不阻断运行
    pub fn load() -> Self {
        match Self::from_file() {
            Ok(profile) => profile,
            Err(e) => {
                warn!("⚠️ 读取 news_config 失败: {}。使用内置默认配置。", e);
                Self::default()
            }
        }
    }

    fn from_file() -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name("news_config"))
            .build()?;

        let profile: NewsProfile = settings.try_deserialize()?;
        Ok(profile)
    }

    pub fn is_source_enabled(&self, id: &str) -> bool {
        self.enabled_sources.iter().any(|s| s == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_enables_all_sources() {
        let profile = NewsProfile::default();
        assert_eq!(profile.enabled_sources.len(), 6);
        assert!(profile.is_source_enabled("weibo"));
        assert!(profile.is_source_enabled("usa"));
        assert!(!profile.is_source_enabled("hackernews"));
    }

    #[test]
    fn default_timing_is_bounded() {
        let timing = TimingConfig::default();
        assert_eq!(timing.fetch_timeout_sec, 10);
        assert_eq!(timing.source_gap_ms, 500);
    }
}
