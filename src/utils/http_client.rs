use reqwest::Client;
use std::time::Duration;
use anyhow::Result;
use tracing::info;

/// 部分平台接口（微博/头条）会拒绝 reqwest 默认 UA，统一伪装成浏览器
const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// 创建通用 HTTP Client，抓取热榜与推送网关共用一个
    pub fn create() -> Result<Client> {
        let builder = Client::builder()
            .user_agent(BROWSER_UA)
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(30)));

        let client = builder.build()?;
        info!("🌐 [Http Client] ready");
        Ok(client)
    }
}
