use rand::Rng;
use rand::distr::Alphanumeric;

/// 生成指定长度的随机字母数字串
pub fn generate_random_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// 生成满足密码策略的初始密码（种子所有者账号使用）
pub fn generate_initial_password() -> String {
    let mut rng = rand::rng();
    let upper = rng.random_range(b'A'..=b'Z') as char;
    let lower = rng.random_range(b'a'..=b'z') as char;
    let digit = rng.random_range(b'0'..=b'9') as char;
    format!("{upper}{lower}{digit}{}", generate_random_code(13))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::validate_password;

    #[test]
    fn test_random_code_length() {
        let code = generate_random_code(8);
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_initial_password_passes_policy() {
        for _ in 0..20 {
            assert!(validate_password(&generate_initial_password()).is_valid);
        }
    }
}
