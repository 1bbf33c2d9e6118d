#[derive(Debug)]
pub enum Validity {
    Valid,
    Invalid(String),
}

impl Validity {
    #[allow(dead_code)]
    pub fn is_valid(&self) -> bool {
        match &self {
            Validity::Valid => true,
            Validity::Invalid(_) => false,
        }
    }
}

pub fn validate_phone_number(phone_number: &str) -> Validity {
    if phone_number.is_empty() {
        return Validity::Invalid(String::from("Phone number cannot be empty."));
    }

    if !phone_number.chars().all(|c| c.is_ascii_digit()) {
        return Validity::Invalid(String::from("Phone number must contain only digits."));
    }

    if phone_number.len() < 10 || phone_number.len() > 13 {
        return Validity::Invalid(String::from(
            "Phone number must be between 10 and 13 digits long.",
        ));
    }

    Validity::Valid
}

pub fn validate_pin(pin: &str) -> Validity {
    if pin.len() != 6 || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Validity::Invalid(String::from("PIN must be exactly 6 digits."));
    }

    Validity::Valid
}

pub fn validate_otp(otp: &str) -> Validity {
    if otp.len() != 6 || !otp.chars().all(|c| c.is_ascii_digit()) {
        return Validity::Invalid(String::from("OTP code must be exactly 6 digits."));
    }

    Validity::Valid
}

pub fn validate_password(password: &str) -> Validity {
    if password.chars().count() < 8 {
        return Validity::Invalid(String::from(
            "Password must be at least 8 characters long.",
        ));
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Validity::Invalid(String::from(
            "Password must contain at least one uppercase letter.",
        ));
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        return Validity::Invalid(String::from(
            "Password must contain at least one lowercase letter.",
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Validity::Invalid(String::from("Password must contain at least one digit."));
    }

    if !password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
    {
        return Validity::Invalid(String::from("Password must contain at least one symbol."));
    }

    Validity::Valid
}

pub fn validate_username(username: &str) -> Validity {
    if username.chars().count() < 5 || username.chars().count() > 20 {
        return Validity::Invalid(String::from(
            "Username must be between 5 and 20 characters long.",
        ));
    }

    Validity::Valid
}

pub fn validate_full_name(full_name: &str) -> Validity {
    if full_name.is_empty() {
        return Validity::Invalid(String::from("Full name cannot be empty."));
    }

    if full_name.chars().count() > 255 {
        return Validity::Invalid(String::from(
            "Full name cannot be longer than 255 characters.",
        ));
    }

    if !full_name
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '\'' || c == '-')
    {
        return Validity::Invalid(String::from(
            "Full name can only contain letters, spaces, apostrophes, and hyphens.",
        ));
    }

    Validity::Valid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone_number() {
        // Valid
        const TEN_DIGITS: &str = "0812345678";
        const THIRTEEN_DIGITS: &str = "0812345678901";
        const ELEVEN_DIGITS: &str = "08123456789";

        assert!(validate_phone_number(TEN_DIGITS).is_valid());
        assert!(validate_phone_number(THIRTEEN_DIGITS).is_valid());
        assert!(validate_phone_number(ELEVEN_DIGITS).is_valid());

        // Invalid
        const EMPTY: &str = "";
        const TOO_SHORT: &str = "081234567";
        const TOO_LONG: &str = "08123456789012";
        const WITH_LETTER: &str = "08123456a89";
        const WITH_PLUS: &str = "+6281234567";
        const WITH_SPACE: &str = "0812 345678";

        assert!(!validate_phone_number(EMPTY).is_valid());
        assert!(!validate_phone_number(TOO_SHORT).is_valid());
        assert!(!validate_phone_number(TOO_LONG).is_valid());
        assert!(!validate_phone_number(WITH_LETTER).is_valid());
        assert!(!validate_phone_number(WITH_PLUS).is_valid());
        assert!(!validate_phone_number(WITH_SPACE).is_valid());
    }

    #[test]
    fn test_validate_pin() {
        assert!(validate_pin("123456").is_valid());
        assert!(validate_pin("000000").is_valid());

        assert!(!validate_pin("").is_valid());
        assert!(!validate_pin("12345").is_valid());
        assert!(!validate_pin("1234567").is_valid());
        assert!(!validate_pin("12345a").is_valid());
        assert!(!validate_pin("12 456").is_valid());
    }

    #[test]
    fn test_validate_otp() {
        assert!(validate_otp("482910").is_valid());

        assert!(!validate_otp("").is_valid());
        assert!(!validate_otp("48291").is_valid());
        assert!(!validate_otp("4829101").is_valid());
        assert!(!validate_otp("48a910").is_valid());
    }

    #[test]
    fn test_validate_password() {
        // Valid
        const NORMAL: &str = "Passw0rd!";
        const LONG: &str = "aVeryL0ngPassword$WithManyCharacters";
        const MINIMUM: &str = "Aa1!bcde";

        assert!(validate_password(NORMAL).is_valid());
        assert!(validate_password(LONG).is_valid());
        assert!(validate_password(MINIMUM).is_valid());

        // Invalid
        const TOO_SHORT: &str = "Aa1!bcd";
        const NO_UPPERCASE: &str = "passw0rd!";
        const NO_LOWERCASE: &str = "PASSW0RD!";
        const NO_DIGIT: &str = "Password!";
        const NO_SYMBOL: &str = "Passw0rda";

        assert!(!validate_password(TOO_SHORT).is_valid());
        assert!(!validate_password(NO_UPPERCASE).is_valid());
        assert!(!validate_password(NO_LOWERCASE).is_valid());
        assert!(!validate_password(NO_DIGIT).is_valid());
        assert!(!validate_password(NO_SYMBOL).is_valid());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("user1").is_valid());
        assert!(validate_username("a_twenty_char_name20").is_valid());

        assert!(!validate_username("usr").is_valid());
        assert!(!validate_username("a_name_that_is_way_too_long").is_valid());
        assert!(!validate_username("").is_valid());
    }

    #[test]
    fn test_validate_full_name() {
        assert!(validate_full_name("John Smith").is_valid());
        assert!(validate_full_name("Mary-Jane O'Brien").is_valid());

        assert!(!validate_full_name("").is_valid());
        assert!(!validate_full_name("John Smith 2nd").is_valid());
        assert!(!validate_full_name(&"a".repeat(256)).is_valid());
    }
}
