mod config;
mod utils;
mod modules;

use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use tracing::{error, info};

use crate::config::NewsProfile;
use crate::modules::aggregator::{NewsCollector, RetryPolicy, SourceCatalog};
use crate::modules::digest::Digest;
use crate::utils::{HttpClientFactory, ServerChanNotifier};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    // 任何未预期的错误都在这里兜住，以日志而不是 panic 收场
    if let Err(e) = run().await {
        error!("❌ 程序运行错误: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    info!("Starting Hot News Bot V2.1...");

    // 凭证缺失是致命配置错误，必须在任何网络请求之前失败
    let sckey = env::var("SERVERCHAN_KEY").unwrap_or_default().trim().to_string();
    if sckey.is_empty() {
        bail!("SERVERCHAN_KEY 未设置！");
    }

    let profile = NewsProfile::load();
    let client = HttpClientFactory::create()?;

    let catalog = SourceCatalog::build(&profile);
    info!("📋 已启用 {} 个资讯源", catalog.len());

    let collector = NewsCollector::new(
        client.clone(),
        RetryPolicy {
            attempts: profile.retry.attempts,
            pause: Duration::from_secs(profile.retry.pause_secs),
        },
        Duration::from_millis(profile.timing.source_gap_ms),
    );

    info!("开始收集新闻...");
    let sections = collector.collect(&catalog).await;
    let digest = Digest::assemble(sections);

    info!("开始推送微信...");
    let notifier = ServerChanNotifier::new(
        client,
        &profile.endpoints.serverchan,
        &sckey,
        Duration::from_secs(profile.timing.push_timeout_sec),
    );

    notifier
        .push(&digest.title(), &digest.render())
        .await
        .context("推送失败")?;

    info!("✅ 推送成功！");
    Ok(())
}
