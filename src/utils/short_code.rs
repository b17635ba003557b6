//! 短码生成
//!
//! 非加密随机：短码只用于标识，不承担访问控制。

/// base-36 字母表（小写）
pub const SHORT_CODE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub const DEFAULT_SHORT_CODE_LENGTH: usize = 6;

/// Generate `length` characters drawn uniformly from `[0-9a-z]`.
pub fn generate_short_code(length: usize) -> String {
    std::iter::repeat_with(|| {
        SHORT_CODE_ALPHABET[rand::random_range(0..SHORT_CODE_ALPHABET.len())] as char
    })
    .take(length)
    .collect()
}

/// 校验路径中的短码字符，避免无意义的数据库查询
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= 32
        && code
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
}
