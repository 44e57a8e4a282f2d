use std::time::Duration;

use serde_json::Value;

use crate::config::NewsProfile;
use super::collector::SourceSpec;
use super::strategy::{FetchStrategy, JsonApiStrategy, RssStrategy, StaticStrategy};

/// 内置资讯源目录。目录顺序即摘要里的展示顺序。
/// 每个源：官方接口优先，RSSHub 主站回退，镜像站再回退，静态兜底收尾。
pub struct SourceCatalog;

impl SourceCatalog {
    pub fn build(profile: &NewsProfile) -> Vec<SourceSpec> {
        let timeout = Duration::from_secs(profile.timing.fetch_timeout_sec);
        let hub = profile.endpoints.rsshub_base.trim_end_matches('/').to_string();
        let mirror = profile
            .endpoints
            .rsshub_mirror
            .trim_end_matches('/')
            .to_string();

        let mut catalog = Vec::new();

        if profile.is_source_enabled("weibo") {
            catalog.push(SourceSpec {
                name: "微博热搜".to_string(),
                icon: "🐦".to_string(),
                take: 5,
                max_chars: 30,
                strategies: with_static_tail(vec![
                    Box::new(JsonApiStrategy::new(
                        "weibo-api",
                        "https://weibo.com/ajax/side/hotSearch",
                        timeout,
                        parse_weibo,
                    )),
                    Box::new(RssStrategy::new(
                        "weibo-rsshub",
                        format!("{}/weibo/search/hot", hub),
                        timeout,
                    )),
                    Box::new(RssStrategy::new(
                        "weibo-rsshub-mirror",
                        format!("{}/weibo/search/hot", mirror),
                        timeout,
                    )),
                ]),
            });
        }

        if profile.is_source_enabled("zhihu") {
            catalog.push(SourceSpec {
                name: "知乎热榜".to_string(),
                icon: "📚".to_string(),
                take: 5,
                max_chars: 35,
                strategies: with_static_tail(vec![
                    Box::new(JsonApiStrategy::new(
                        "zhihu-api",
                        "https://api.zhihu.com/topstory/hot-list?limit=10",
                        timeout,
                        parse_zhihu,
                    )),
                    Box::new(RssStrategy::new(
                        "zhihu-rsshub",
                        format!("{}/zhihu/hotlist", hub),
                        timeout,
                    )),
                    Box::new(RssStrategy::new(
                        "zhihu-rsshub-mirror",
                        format!("{}/zhihu/hotlist", mirror),
                        timeout,
                    )),
                ]),
            });
        }

        if profile.is_source_enabled("bilibili") {
            catalog.push(SourceSpec {
                name: "B站热榜".to_string(),
                icon: "🎬".to_string(),
                take: 5,
                max_chars: 32,
                strategies: with_static_tail(vec![
                    Box::new(JsonApiStrategy::new(
                        "bilibili-api",
                        "https://api.bilibili.com/x/web-interface/popular",
                        timeout,
                        parse_bilibili,
                    )),
                    Box::new(RssStrategy::new(
                        "bilibili-rsshub",
                        format!("{}/bilibili/ranking/0/3", hub),
                        timeout,
                    )),
                    Box::new(RssStrategy::new(
                        "bilibili-rsshub-mirror",
                        format!("{}/bilibili/ranking/0/3", mirror),
                        timeout,
                    )),
                ]),
            });
        }

        if profile.is_source_enabled("toutiao") {
            catalog.push(SourceSpec {
                name: "今日头条".to_string(),
                icon: "📰".to_string(),
                take: 5,
                max_chars: 35,
                strategies: with_static_tail(vec![
                    Box::new(JsonApiStrategy::new(
                        "toutiao-api",
                        "https://www.toutiao.com/hot-event/hot-board/?origin=toutiao_pc",
                        timeout,
                        parse_toutiao,
                    )),
                    Box::new(RssStrategy::new(
                        "toutiao-rsshub",
                        format!("{}/toutiao/hot", hub),
                        timeout,
                    )),
                ]),
            });
        }

        if profile.is_source_enabled("cctv") {
            catalog.push(SourceSpec {
                name: "央视新闻".to_string(),
                icon: "📺".to_string(),
                take: 5,
                max_chars: 35,
                strategies: with_static_tail(vec![
                    Box::new(RssStrategy::new(
                        "cctv-rsshub",
                        format!("{}/cctv/news", hub),
                        timeout,
                    )),
                    Box::new(RssStrategy::new(
                        "cctv-rsshub-mirror",
                        format!("{}/cctv/news", mirror),
                        timeout,
                    )),
                ]),
            });
        }

        if profile.is_source_enabled("usa") {
            catalog.push(SourceSpec {
                name: "美国热点".to_string(),
                icon: "🇺🇸".to_string(),
                take: 3,
                max_chars: 35,
                strategies: with_static_tail(vec![
                    Box::new(RssStrategy::new(
                        "reuters-rsshub",
                        format!("{}/reuters/world/us", hub),
                        timeout,
                    )),
                    Box::new(RssStrategy::new(
                        "reuters-rsshub-mirror",
                        format!("{}/reuters/world/us", mirror),
                        timeout,
                    )),
                ]),
            });
        }

        catalog
    }
}

fn with_static_tail(mut strategies: Vec<Box<dyn FetchStrategy>>) -> Vec<Box<dyn FetchStrategy>> {
    strategies.push(Box::new(StaticStrategy::placeholder()));
    strategies
}

/// 微博侧边栏热搜接口：data.realtime[].word
fn parse_weibo(json: &Value) -> Vec<String> {
    json["data"]["realtime"]
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|item| item["word"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// 知乎热榜接口：data[].target.title
fn parse_zhihu(json: &Value) -> Vec<String> {
    json["data"]
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|item| item["target"]["title"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// B 站综合热门接口：data.list[].title
fn parse_bilibili(json: &Value) -> Vec<String> {
    json["data"]["list"]
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|item| item["title"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// 头条热榜接口：data[].Title（字段名是大写开头）
fn parse_toutiao(json: &Value) -> Vec<String> {
    json["data"]
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|item| item["Title"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
