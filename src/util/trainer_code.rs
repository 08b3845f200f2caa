use crate::error::ValidationError;

const TRAINER_CODE_DIGITS: usize = 12;

/// Strips whitespace from a trainer code and checks it is exactly twelve digits.
///
/// Codes are commonly shared in groups of four (`"1234 5678 9012"`), so any
/// whitespace is accepted and removed.
///
/// # Returns
/// - `Ok(String)` - The twelve digits with whitespace removed
/// - `Err(ValidationError::MalformedTrainerCode)` - Anything else remains
pub fn normalize(code: &str) -> Result<String, ValidationError> {
    let digits: String = code.chars().filter(|c| !c.is_whitespace()).collect();

    if digits.len() == TRAINER_CODE_DIGITS && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(digits)
    } else {
        Err(ValidationError::MalformedTrainerCode(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_whitespace() {
        assert_eq!(normalize("1234 5678 9012").unwrap(), "123456789012");
        assert_eq!(normalize(" 123456789012\n").unwrap(), "123456789012");
    }

    #[test]
    fn rejects_malformed_codes() {
        for code in ["", "1234", "1234 5678 901a", "1234567890123"] {
            assert_eq!(
                normalize(code),
                Err(ValidationError::MalformedTrainerCode(code.to_string()))
            );
        }
    }
}
