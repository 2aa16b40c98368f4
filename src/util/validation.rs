use once_cell::sync::Lazy;
use regex::Regex;

// Deliberately unanchored: any `<run>@<run>.<run>` substring passes, which
// is the historical behavior sign-up clients were built against. It is a
// shape check, not an RFC 5322 parser.
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("compile email regex"));

const USERNAME_MIN: usize = 3;
const PASSWORD_MIN: usize = 8;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_username(name: &str) -> bool {
    name.len() >= USERNAME_MIN
}

pub fn is_valid_password(pass: &str) -> bool {
    pass.len() >= PASSWORD_MIN
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, is_valid_password, is_valid_username};

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("bob@example.com"));
        assert!(is_valid_email("sally+tag@mail.example.org"));
        // unanchored: surrounding text does not disqualify a valid run
        assert!(is_valid_email("contact me at bob@example.com please"));

        assert!(!is_valid_email("nada_neutho"));
        assert!(!is_valid_email("bob@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("bob @example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_is_valid_username() {
        assert!(is_valid_username("bob"));
        assert!(is_valid_username("newbob"));

        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username(""));
    }

    #[test]
    fn test_is_valid_password() {
        assert!(is_valid_password("simplepass"));
        assert!(is_valid_password("12345678"));

        assert!(!is_valid_password("short"));
        assert!(!is_valid_password("1234567"));
    }
}
