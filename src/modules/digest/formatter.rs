use chrono::{DateTime, FixedOffset, Utc};

use crate::modules::aggregator::{Origin, Section};

const TITLE_PREFIX: &str = "📰 每日热点新闻";
const PROVENANCE: &str = "🤖 由定时任务自动推送";

/// 北京时间（UTC+8）。展示用时间一律取它，与运行机器的时区无关。
pub fn beijing_now() -> DateTime<FixedOffset> {
    let cst = FixedOffset::east_opt(8 * 3600).expect("UTC+8 is a valid offset");
    Utc::now().with_timezone(&cst)
}

/// 单次运行的完整摘要：按序的 Section + 生成时间 + 固定页脚。
/// 推送完即丢弃，不落盘。
pub struct Digest {
    pub sections: Vec<Section>,
    pub generated_at: DateTime<FixedOffset>,
}

impl Digest {
    pub fn assemble(sections: Vec<Section>) -> Self {
        Self::assemble_at(sections, beijing_now())
    }

    pub fn assemble_at(sections: Vec<Section>, generated_at: DateTime<FixedOffset>) -> Self {
        Self {
            sections,
            generated_at,
        }
    }

    /// 推送标题：固定前缀 + 当天日期
    pub fn title(&self) -> String {
        format!("{} {}", TITLE_PREFIX, self.generated_at.format("%Y-%m-%d"))
    }

    /// 渲染 markdown 正文
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "## {} {}\n",
            TITLE_PREFIX,
            self.generated_at.format("%Y-%m-%d")
        ));

        for section in &self.sections {
            out.push('\n');
            out.push_str(&format!("### {} {}\n", section.icon, section.name));

            match section.origin {
                Origin::Live => {
                    for (i, title) in section.titles.iter().enumerate() {
                        out.push_str(&format!("{}. {}\n", i + 1, title));
                    }
                }
                Origin::Degraded => {
                    for line in &section.titles {
                        out.push_str(&format!("> *{}*\n", line));
                    }
                }
            }
        }

        out.push_str("\n---\n");
        out.push_str(&format!(
            "📅 更新时间: {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M")
        ));
        out.push_str(PROVENANCE);
        out.push('\n');
        out
    }
}
