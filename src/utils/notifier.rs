use anyhow::{anyhow, Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// ServerChan（Server酱）推送客户端。
/// Key 直接拼在 URL 路径里，网关无签名机制。
pub struct ServerChanNotifier {
    client: Client,
    endpoint: String,
    sckey: String,
    timeout: Duration,
}

impl ServerChanNotifier {
    pub fn new(
        client: Client,
        endpoint: impl Into<String>,
        sckey: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            sckey: sckey.into(),
            timeout,
        }
    }

    fn push_url(&self) -> String {
        format!("{}/{}.send", self.endpoint.trim_end_matches('/'), self.sckey)
    }

    /// 推送一条 markdown 消息到微信。
    /// 单次同步请求，失败不重试，重复调用会产生重复推送。
    pub async fn push(&self, title: &str, desp: &str) -> Result<()> {
        let params = [("title", title), ("desp", desp)];

        let resp = self
            .client
            .post(self.push_url())
            .form(&params)
            .timeout(self.timeout)
            .send()
            .await
            .context("ServerChan 请求失败")?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Self::evaluate(status, &body)
    }

    /// 判定网关响应：HTTP 2xx 且应用层 code == 0 才算送达
    fn evaluate(status: StatusCode, body: &str) -> Result<()> {
        if !status.is_success() {
            return Err(anyhow!("HTTP 错误: {}", status));
        }

        let json: Value =
            serde_json::from_str(body).with_context(|| format!("网关返回非 JSON 响应: {}", body))?;

        match json["code"].as_i64() {
            Some(0) => Ok(()),
            Some(code) => Err(anyhow!(
                "网关拒绝: code={} message={}",
                code,
                json["message"].as_str().unwrap_or("-")
            )),
            None => Err(anyhow!("网关响应缺少 code 字段: {}", body)),
        }
    }
}
