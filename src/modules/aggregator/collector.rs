use std::time::Duration;

use reqwest::Client;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::strategy::{FetchStrategy, Origin};
use super::title::{clean_title, truncate_title};

/// 所有策略都失败时的占位文案
pub const FALLBACK_TEXT: &str = "获取失败";

/// 一个资讯源的静态描述：展示名、图标、条数与截断长度、策略链。
/// 配置期构建，运行期只读。
pub struct SourceSpec {
    pub name: String,
    pub icon: String,
    /// 取前几条
    pub take: usize,
    /// 单条标题的展示字符数上限
    pub max_chars: usize,
    pub strategies: Vec<Box<dyn FetchStrategy>>,
}

/// 单个源的聚合结果，生成后不再修改
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub icon: String,
    pub titles: Vec<String>,
    pub origin: Origin,
}

impl Section {
    fn degraded(spec: &SourceSpec) -> Self {
        Self {
            name: spec.name.clone(),
            icon: spec.icon.clone(),
            titles: vec![FALLBACK_TEXT.to_string()],
            origin: Origin::Degraded,
        }
    }
}

/// 外层重试策略。和链内回退正交：重试的是整条策略链。
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// 总尝试轮数（含首轮）
    pub attempts: u32,
    pub pause: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 2,
            pause: Duration::from_secs(1),
        }
    }
}

pub struct NewsCollector {
    client: Client,
    retry: RetryPolicy,
    source_gap: Duration,
}

impl NewsCollector {
    pub fn new(client: Client, retry: RetryPolicy, source_gap: Duration) -> Self {
        Self {
            client,
            retry,
            source_gap,
        }
    }

    /// 按声明顺序逐个源解析。返回的 Section 数量与顺序恒等于输入，
    /// 单个源失败只会降级，不会让整次运行中断。
    pub async fn collect(&self, sources: &[SourceSpec]) -> Vec<Section> {
        let mut sections = Vec::with_capacity(sources.len());

        for (i, spec) in sources.iter().enumerate() {
            if i > 0 && !self.source_gap.is_zero() {
                // 源与源之间稍作停顿，避免触发上游限流
                sleep(self.source_gap).await;
            }

            info!("🔍 正在抓取 {}...", spec.name);
            let section = self.resolve(spec).await;
            match section.origin {
                Origin::Live => info!("✅ {} 获取 {} 条", spec.name, section.titles.len()),
                Origin::Degraded => warn!("⚠️ {} 所有策略均失败，使用占位内容", spec.name),
            }
            sections.push(section);
        }

        sections
    }

    /// 外层重试 × 内层策略链。兜底结果只在重试轮数耗尽后才被接受，
    /// 否则首轮命中静态策略就会白白吃掉重试预算。
    async fn resolve(&self, spec: &SourceSpec) -> Section {
        let attempts = self.retry.attempts.max(1);
        let mut degraded: Option<Section> = None;

        for attempt in 1..=attempts {
            match self.run_chain(spec).await {
                Some(section) if section.origin == Origin::Live => return section,
                Some(section) => degraded = Some(section),
                None => {}
            }

            if attempt < attempts {
                warn!(
                    "⚠️ {} 第 {}/{} 轮未命中，{}s 后重试",
                    spec.name,
                    attempt,
                    attempts,
                    self.retry.pause.as_secs()
                );
                if !self.retry.pause.is_zero() {
                    sleep(self.retry.pause).await;
                }
            }
        }

        degraded.unwrap_or_else(|| Section::degraded(spec))
    }

    /// 顺序尝试策略链，第一个产出非空标题的策略胜出。
    /// 网络错误、解析失败、空列表一视同仁：继续下一个候选。
    async fn run_chain(&self, spec: &SourceSpec) -> Option<Section> {
        for strategy in &spec.strategies {
            let raw_titles = match strategy.attempt(&self.client).await {
                Ok(titles) => titles,
                Err(e) => {
                    debug!("[{}] 策略 {} 失败: {}", spec.name, strategy.label(), e);
                    continue;
                }
            };

            let titles: Vec<String> = raw_titles
                .iter()
                .map(|t| clean_title(t))
                .filter(|t| !t.is_empty())
                .take(spec.take)
                .map(|t| truncate_title(&t, spec.max_chars))
                .collect();

            if titles.is_empty() {
                debug!("[{}] 策略 {} 清洗后无内容", spec.name, strategy.label());
                continue;
            }

            return Some(Section {
                name: spec.name.clone(),
                icon: spec.icon.clone(),
                titles,
                origin: strategy.origin(),
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::aggregator::strategy::StaticStrategy;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// 确定性成功的 Live 策略
    struct FixedStrategy {
        titles: Vec<String>,
    }

    impl FixedStrategy {
        fn of(titles: &[&str]) -> Box<Self> {
            Box::new(Self {
                titles: titles.iter().map(|s| s.to_string()).collect(),
            })
        }
    }

    #[async_trait]
    impl FetchStrategy for FixedStrategy {
        fn label(&self) -> &str {
            "fixed"
        }

        async fn attempt(&self, _client: &Client) -> Result<Vec<String>> {
            Ok(self.titles.clone())
        }
    }

    /// 永远失败的策略，记录被调用的次数
    struct FailingStrategy {
        calls: Arc<AtomicU32>,
    }

    impl FailingStrategy {
        fn counted(calls: &Arc<AtomicU32>) -> Box<Self> {
            Box::new(Self {
                calls: calls.clone(),
            })
        }

        fn new() -> Box<Self> {
            Self::counted(&Arc::new(AtomicU32::new(0)))
        }
    }

    #[async_trait]
    impl FetchStrategy for FailingStrategy {
        fn label(&self) -> &str {
            "failing"
        }

        async fn attempt(&self, _client: &Client) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow!("boom"))
        }
    }

    fn spec(name: &str, strategies: Vec<Box<dyn FetchStrategy>>) -> SourceSpec {
        SourceSpec {
            name: name.to_string(),
            icon: "📰".to_string(),
            take: 5,
            max_chars: 30,
            strategies,
        }
    }

    fn collector() -> NewsCollector {
        NewsCollector::new(
            Client::new(),
            RetryPolicy {
                attempts: 2,
                pause: Duration::ZERO,
            },
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn live_source_takes_min_of_k_and_available() {
        let few = spec("少量", vec![FixedStrategy::of(&["a", "b"])]);
        let many = spec(
            "超量",
            vec![FixedStrategy::of(&["1", "2", "3", "4", "5", "6", "7"])],
        );

        let sections = collector().collect(&[few, many]).await;

        assert_eq!(sections[0].origin, Origin::Live);
        assert_eq!(sections[0].titles.len(), 2);
        assert_eq!(sections[1].titles.len(), 5);
    }

    #[tokio::test]
    async fn exhausted_source_degrades_to_single_placeholder() {
        let sections = collector()
            .collect(&[spec("全挂", vec![FailingStrategy::new(), FailingStrategy::new()])])
            .await;

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].origin, Origin::Degraded);
        assert_eq!(sections[0].titles, vec![FALLBACK_TEXT.to_string()]);
    }

    #[tokio::test]
    async fn fallback_advances_to_second_strategy() {
        let source = spec(
            "备用命中",
            vec![FailingStrategy::new(), FixedStrategy::of(&["Gamma"])],
        );

        let sections = collector().collect(&[source]).await;

        assert_eq!(sections[0].origin, Origin::Live);
        assert_eq!(sections[0].titles, vec!["Gamma".to_string()]);
    }

    #[tokio::test]
    async fn section_order_matches_source_order() {
        // 端到端场景：A 首选命中 2 条，B 全挂，C 第二个策略命中 1 条
        let a = spec("A", vec![FixedStrategy::of(&["Alpha", "Beta"])]);
        let b = spec("B", vec![FailingStrategy::new(), FailingStrategy::new()]);
        let c = spec(
            "C",
            vec![FailingStrategy::new(), FixedStrategy::of(&["Gamma"])],
        );

        let sections = collector().collect(&[a, b, c]).await;

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].name, "A");
        assert_eq!(sections[0].titles, vec!["Alpha", "Beta"]);
        assert_eq!(sections[0].origin, Origin::Live);
        assert_eq!(sections[1].name, "B");
        assert_eq!(sections[1].origin, Origin::Degraded);
        assert_eq!(sections[2].name, "C");
        assert_eq!(sections[2].titles, vec!["Gamma"]);
        assert_eq!(sections[2].origin, Origin::Live);
    }

    #[tokio::test]
    async fn collect_is_idempotent_for_deterministic_strategies() {
        let build = || {
            vec![
                spec("甲", vec![FixedStrategy::of(&["x", "y"])]),
                spec("乙", vec![FailingStrategy::new()]),
            ]
        };

        let first = collector().collect(&build()).await;
        let second = collector().collect(&build()).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn retry_reruns_the_whole_chain() {
        // 2 个网络策略 × 2 轮重试 = 每个策略各被调用 2 次
        let calls_a = Arc::new(AtomicU32::new(0));
        let calls_b = Arc::new(AtomicU32::new(0));
        let source = spec(
            "重试",
            vec![
                FailingStrategy::counted(&calls_a),
                FailingStrategy::counted(&calls_b),
            ],
        );

        collector().collect(&[source]).await;

        assert_eq!(calls_a.load(Ordering::SeqCst), 2);
        assert_eq!(calls_b.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn static_tail_only_accepted_after_retries_spent() {
        let calls = Arc::new(AtomicU32::new(0));
        let source = spec(
            "兜底",
            vec![
                FailingStrategy::counted(&calls),
                Box::new(StaticStrategy::with_lines(vec!["稍后再试".to_string()])),
            ],
        );

        let sections = collector().collect(&[source]).await;

        // 静态策略首轮就命中，但重试预算仍要花在网络策略上
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(sections[0].origin, Origin::Degraded);
        assert_eq!(sections[0].titles, vec!["稍后再试".to_string()]);
    }

    #[tokio::test]
    async fn titles_cleaned_to_empty_advance_the_chain() {
        let source = spec(
            "清洗",
            vec![
                FixedStrategy::of(&["【】", "   "]),
                FixedStrategy::of(&["有效标题"]),
            ],
        );

        let sections = collector().collect(&[source]).await;

        assert_eq!(sections[0].origin, Origin::Live);
        assert_eq!(sections[0].titles, vec!["有效标题".to_string()]);
    }

    #[tokio::test]
    async fn long_titles_are_truncated_per_source_limit() {
        let mut source = spec("截断", vec![FixedStrategy::of(&["一二三四五六七八"])]);
        source.max_chars = 4;

        let sections = collector().collect(&[source]).await;

        assert_eq!(sections[0].titles, vec!["一二三四...".to_string()]);
    }
}
