use woothee::parser::Parser;

pub const UNKNOWN_BROWSER: &str = "Unknown";

/// Browser family name as reported by woothee, or `"Unknown"`.
pub fn browser_family(parser: &Parser, user_agent: &str) -> String {
    if user_agent.is_empty() {
        return UNKNOWN_BROWSER.to_string();
    }

    let result = parser.parse(user_agent).unwrap_or_default();
    if result.name.is_empty() || result.name == "UNKNOWN" {
        UNKNOWN_BROWSER.to_string()
    } else {
        result.name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_browsers() {
        let parser = Parser::new();
        assert_eq!(
            browser_family(
                &parser,
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
            ),
            "Chrome"
        );
        assert_eq!(
            browser_family(
                &parser,
                "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0"
            ),
            "Firefox"
        );
    }

    #[test]
    fn test_unknown() {
        let parser = Parser::new();
        assert_eq!(browser_family(&parser, ""), UNKNOWN_BROWSER);
        assert_eq!(browser_family(&parser, "zzz-not-a-browser"), UNKNOWN_BROWSER);
    }
}
