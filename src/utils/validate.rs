use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

// 支持 #FFF 和 #FFFFFF 两种写法
static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}){1,2}$").expect("Invalid hex color regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 校验邮箱域名是否在允许范围内，allowed 为空表示不限制
pub fn validate_email_domain(email: &str, allowed: &str) -> Result<(), String> {
    if allowed.is_empty() {
        return Ok(());
    }
    let domain = email.rsplit_once('@').map(|(_, d)| d).unwrap_or("");
    if domain.eq_ignore_ascii_case(allowed) {
        Ok(())
    } else {
        Err(format!("Email domain must be {allowed}"))
    }
}

pub fn validate_hex_color(color: &str) -> Result<(), &'static str> {
    if !HEX_COLOR_RE.is_match(color) {
        return Err("Enter a valid hex color code, e.g., #FFF or #FFFFFF");
    }
    Ok(())
}

/// 校验颜色组：必须恰好 5 个合法的十六进制颜色
pub fn validate_color_set(colors: &[String]) -> Result<(), String> {
    if colors.len() != 5 {
        return Err(format!("Expected exactly 5 colors, got {}", colors.len()));
    }
    for color in colors {
        validate_hex_color(color).map_err(|e| format!("{e}: {color}"))?;
    }
    Ok(())
}

/// 校验 Likert 评分取值范围
pub fn validate_rating(rating: i32) -> Result<(), &'static str> {
    if !(1..=5).contains(&rating) {
        return Err("Rating must be between 1 and 5");
    }
    Ok(())
}

/// 校验标签组：必须恰好 5 个非空标签
pub fn validate_option_labels(labels: &[String]) -> Result<(), String> {
    if labels.len() != 5 {
        return Err(format!("Expected exactly 5 labels, got {}", labels.len()));
    }
    if labels.iter().any(|l| l.trim().is_empty()) {
        return Err("Option labels must not be empty".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(validate_email("alice@example.edu").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_email_domain() {
        assert!(validate_email_domain("alice@bc.edu", "bc.edu").is_ok());
        assert!(validate_email_domain("alice@BC.EDU", "bc.edu").is_ok());
        assert!(validate_email_domain("alice@gmail.com", "bc.edu").is_err());
        // 空配置不限制域名
        assert!(validate_email_domain("alice@gmail.com", "").is_ok());
    }

    #[test]
    fn test_hex_color() {
        assert!(validate_hex_color("#FFF").is_ok());
        assert!(validate_hex_color("#872729").is_ok());
        assert!(validate_hex_color("872729").is_err());
        assert!(validate_hex_color("#87272").is_err());
        assert!(validate_hex_color("#GGGGGG").is_err());
    }

    #[test]
    fn test_color_set() {
        let ok: Vec<String> = ["#111111", "#222222", "#333333", "#444444", "#555555"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(validate_color_set(&ok).is_ok());

        let short = ok[..4].to_vec();
        assert!(validate_color_set(&short).is_err());

        let mut bad = ok.clone();
        bad[2] = "oops".to_string();
        assert!(validate_color_set(&bad).is_err());
    }

    #[test]
    fn test_rating_range() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }
}
