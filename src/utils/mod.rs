pub mod ip;
pub mod password;
pub mod short_code;
pub mod url_validator;

pub use short_code::generate_short_code;

/// 截断长文本，超出部分以 `...` 结尾（按字符计数）
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
