use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：5 <= x <= 16
    if username.len() < 5 || username.len() > 16 {
        return Err("Username length must be between 5 and 16 characters");
    }
    // 用户名格式校验：只能包含字母、数字、下划线或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 解析 `HH:MM` 格式的时间，返回自零点起的分钟数
pub fn parse_clock_time(value: &str) -> Option<u32> {
    let (hour, minute) = value.trim().split_once(':')?;
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hour) || !two_digits(minute) {
        return None;
    }
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    (hour < 24 && minute < 60).then_some(hour * 60 + minute)
}

/// 开始时间必须早于结束时间
pub fn validate_time_range(start: &str, end: &str) -> Result<(), &'static str> {
    match (parse_clock_time(start), parse_clock_time(end)) {
        (Some(s), Some(e)) if s < e => Ok(()),
        (Some(_), Some(_)) => Err("Start time must be before end time"),
        _ => Err("Time must use the HH:MM format"),
    }
}

/// 0 = 周日 … 6 = 周六
pub fn validate_day_of_week(day: i32) -> Result<(), &'static str> {
    if (0..=6).contains(&day) {
        Ok(())
    } else {
        Err("Day of week must be between 0 (Sunday) and 6 (Saturday)")
    }
}

pub fn validate_percentage(value: f64) -> Result<(), &'static str> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err("Percentage must be between 0 and 100")
    }
}

pub fn validate_non_negative_amount(value: f64) -> Result<(), &'static str> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err("Amount must not be negative")
    }
}

pub fn validate_positive_amount(value: f64) -> Result<(), &'static str> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err("Amount must be greater than zero")
    }
}

/// ISO 4217 三位大写字母货币代码
pub fn validate_currency(code: &str) -> Result<(), &'static str> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err("Currency must be a three letter ISO code")
    }
}

/// 闭区间日期范围，跨度不超过 `max_days` 天
pub fn validate_date_range(
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
    max_days: i64,
) -> Result<(), &'static str> {
    if start > end {
        return Err("Start date must not be after end date");
    }
    if (end - start).num_days() + 1 > max_days {
        return Err("Date range is too long");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 可选：特殊字符（增强安全性）
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    // 1. 长度检查：至少 8 个字符
    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    // 2. 大写字母检查
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    // 3. 小写字母检查
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    // 4. 数字检查
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    // 5. 常见弱密码检查
    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_username_and_email() {
        assert!(validate_username("alice_01").is_ok());
        assert!(validate_username("bob").is_err());
        assert!(validate_username("alice smith").is_err());
        assert!(validate_email("owner@acme.test").is_ok());
        assert!(validate_email("owner@acme").is_err());
    }

    #[test]
    fn test_clock_time() {
        assert_eq!(parse_clock_time("09:30"), Some(570));
        assert_eq!(parse_clock_time("00:00"), Some(0));
        assert_eq!(parse_clock_time("23:59"), Some(1439));
        assert_eq!(parse_clock_time("24:00"), None);
        assert_eq!(parse_clock_time("9:30"), None);
        assert_eq!(parse_clock_time("09:60"), None);
        assert_eq!(parse_clock_time("+9:00"), None);
        assert_eq!(parse_clock_time("09:+5"), None);
        assert!(validate_time_range("09:00", "10:00").is_ok());
        assert!(validate_time_range("10:00", "10:00").is_err());
        assert!(validate_time_range("ab:cd", "10:00").is_err());
    }

    #[test]
    fn test_numeric_rules() {
        assert!(validate_day_of_week(0).is_ok());
        assert!(validate_day_of_week(7).is_err());
        assert!(validate_percentage(100.0).is_ok());
        assert!(validate_percentage(-0.5).is_err());
        assert!(validate_percentage(f64::NAN).is_err());
        assert!(validate_positive_amount(0.0).is_err());
        assert!(validate_non_negative_amount(0.0).is_ok());
        assert!(validate_currency("USD").is_ok());
        assert!(validate_currency("usd").is_err());
    }

    #[test]
    fn test_date_range() {
        let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        assert!(validate_date_range(d(1, 1), d(1, 1), 366).is_ok());
        assert!(validate_date_range(d(1, 2), d(1, 1), 366).is_err());
        assert!(validate_date_range(d(1, 1), d(1, 7), 7).is_ok());
        assert!(validate_date_range(d(1, 1), d(1, 8), 7).is_err());
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_no_uppercase() {
        let result = validate_password("abcd1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
    }

    #[test]
    fn test_no_lowercase() {
        let result = validate_password("ABCD1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one lowercase letter")
        );
    }

    #[test]
    fn test_no_digit() {
        let result = validate_password("AbcdEfgh");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
