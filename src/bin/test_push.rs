use dotenvy::dotenv;
use reqwest::Client;
use std::env;
use std::time::{Duration, Instant};

/// 手动验证 ServerChan Key 是否可用：cargo run --bin test_push
#[tokio::main]
async fn main() {
    dotenv().ok();
    let sckey = env::var("SERVERCHAN_KEY").expect("SERVERCHAN_KEY not set");
    let endpoint =
        env::var("SERVERCHAN_ENDPOINT").unwrap_or("https://sctapi.ftqq.com".to_string());

    let client = Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .unwrap();

    let url = format!("{}/{}.send", endpoint.trim_end_matches('/'), sckey);
    println!("🔗 Testing push via: {}/<key>.send", endpoint);

    let params = [
        ("title", "📬 推送通道测试"),
        ("desp", "如果你看到这条消息，说明 ServerChan 配置正确。"),
    ];

    let start = Instant::now();
    match client.post(&url).form(&params).send().await {
        Ok(resp) => {
            println!("⏱️  Time taken: {:.2?}", start.elapsed());
            println!("📡 Status: {}", resp.status());
            let body = resp.text().await.unwrap_or_default();
            if body.contains("\"code\":0") {
                println!("✅ Success! Push channel is healthy.");
            } else {
                println!("❌ Gateway response: {}", body);
            }
        }
        Err(e) => {
            println!("🔥 Network Error: {}", e);
            if e.is_timeout() {
                println!("   (The request timed out. Check your network.)");
            }
            if e.is_connect() {
                println!("   (Could not connect. DNS or Firewall issue)");
            }
        }
    }
}
