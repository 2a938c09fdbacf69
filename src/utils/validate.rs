use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// 允许国际区号、空格、连字符和括号
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9(][0-9 ()-]{5,19}$").expect("Invalid phone regex"));

/// Firebase 对密码的最低要求
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email.trim()) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 空号码视为未填写
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let phone = phone.trim();
    if !phone.is_empty() && !PHONE_RE.is_match(phone) {
        return Err("Phone number format is invalid");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 6 characters long");
    }
    Ok(())
}

pub fn validate_full_name(name: &str) -> Result<(), &'static str> {
    let len = name.trim().chars().count();
    if len == 0 || len > 100 {
        return Err("Full name must be between 1 and 100 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("ada@school.test").is_ok());
        assert!(validate_email(" ada.obi+hr@mail.school.ng ").is_ok());
        assert!(validate_email("ada@school").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("").is_ok());
        assert!(validate_phone("+234 801 234 5678").is_ok());
        assert!(validate_phone("(020) 7946-0958").is_ok());
        assert!(validate_phone("12ab").is_err());
        assert!(validate_phone("-123456").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("abc12").is_err());
        assert!(validate_password("abc123").is_ok());
    }

    #[test]
    fn test_full_name() {
        assert!(validate_full_name("Ada Obi").is_ok());
        assert!(validate_full_name("   ").is_err());
    }
}
