/// 清洗标题：去掉全角括号装饰符，压缩首尾空白。
/// 微博/B站的标题常带【】做修饰，推送里不需要。
pub fn clean_title(raw: &str) -> String {
    raw.replace(['【', '】'], "").trim().to_string()
}

/// 按字符数截断（汉字算一个字符），超长才补 "..."
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_string();
    }
    let cut: String = title.chars().take(max_chars).collect();
    format!("{}...", cut)
}
