use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// 区分真实抓取结果和兜底占位内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Live,
    Degraded,
}

/// 单个抓取策略：一个端点 + 一条解析规则。
/// 链式回退由 collector 驱动，策略本身只管成败。
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    fn label(&self) -> &str;

    fn origin(&self) -> Origin {
        Origin::Live
    }

    /// 成功的定义：请求成功且至少解析出一条标题。
    /// HTTP 200 但列表为空同样算失败，交给下一个策略。
    async fn attempt(&self, client: &Client) -> Result<Vec<String>>;
}

/// 平台官方 JSON 接口
pub struct JsonApiStrategy {
    label: String,
    url: String,
    timeout: Duration,
    parse: fn(&Value) -> Vec<String>,
}

impl JsonApiStrategy {
    pub fn new(
        label: impl Into<String>,
        url: impl Into<String>,
        timeout: Duration,
        parse: fn(&Value) -> Vec<String>,
    ) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            timeout,
            parse,
        }
    }
}

#[async_trait]
impl FetchStrategy for JsonApiStrategy {
    fn label(&self) -> &str {
        &self.label
    }

    async fn attempt(&self, client: &Client) -> Result<Vec<String>> {
        let resp = client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await?;

        if !resp.status().is_success() {
            bail!("HTTP {}", resp.status());
        }

        let json: Value = resp.json().await?;
        let titles = (self.parse)(&json);
        if titles.is_empty() {
            bail!("接口返回空列表");
        }
        Ok(titles)
    }
}

/// RSSHub / 标准 RSS 2.0 源
pub struct RssStrategy {
    label: String,
    url: String,
    timeout: Duration,
}

impl RssStrategy {
    pub fn new(label: impl Into<String>, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            timeout,
        }
    }

    /// 纯解析函数，测试无需联网
    pub fn parse_titles(channel: &rss::Channel) -> Vec<String> {
        channel
            .items()
            .iter()
            .filter_map(|item| item.title())
            .map(|t| t.to_string())
            .collect()
    }
}

#[async_trait]
impl FetchStrategy for RssStrategy {
    fn label(&self) -> &str {
        &self.label
    }

    async fn attempt(&self, client: &Client) -> Result<Vec<String>> {
        let resp = client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await?;

        if !resp.status().is_success() {
            bail!("HTTP {}", resp.status());
        }

        let body = resp.bytes().await?;
        let channel = rss::Channel::read_from(body.as_ref()).context("RSS 解析失败")?;
        let titles = Self::parse_titles(&channel);
        if titles.is_empty() {
            bail!("RSS 无条目");
        }
        Ok(titles)
    }
}

/// 静态兜底策略：挂在每条链的末尾，让降级路径和正常路径走同一套流程
pub struct StaticStrategy {
    label: String,
    lines: Vec<String>,
}

impl StaticStrategy {
    pub fn placeholder() -> Self {
        Self::with_lines(vec!["获取失败".to_string()])
    }

    pub fn with_lines(lines: Vec<String>) -> Self {
        Self {
            label: "static".to_string(),
            lines,
        }
    }
}

#[async_trait]
impl FetchStrategy for StaticStrategy {
    fn label(&self) -> &str {
        &self.label
    }

    fn origin(&self) -> Origin {
        Origin::Degraded
    }

    async fn attempt(&self, _client: &Client) -> Result<Vec<String>> {
        Ok(self.lines.clone())
    }
}
