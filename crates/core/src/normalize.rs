//! Normalization of free-form numeric input

/// Strip spaces and hyphens from a card or bank account number
///
/// Users paste numbers grouped as `4242 4242-4242 4242`; the API expects the
/// bare digits. Any other character is preserved so validation can reject it.
#[must_use]
pub fn clean_number(number: &str) -> String {
    number.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clean_number() {
        assert_eq!(clean_number("4242 4242-4242 4242"), "4242424242424242");
        assert_eq!(clean_number("000123456789"), "000123456789");
        assert_eq!(clean_number(" - "), "");
    }

    #[test]
    fn test_other_characters_survive() {
        assert_eq!(clean_number("4242\t4242"), "4242\t4242");
    }

    proptest! {
        #[test]
        fn clean_is_idempotent(s in "[0-9 \\-]{0,32}") {
            let once = clean_number(&s);
            prop_assert_eq!(clean_number(&once), once);
        }

        #[test]
        fn clean_leaves_only_digits(s in "[0-9 \\-]{0,32}") {
            prop_assert!(clean_number(&s).bytes().all(|b| b.is_ascii_digit()));
        }

        #[test]
        fn clean_keeps_digit_order(digits in "[0-9]{1,19}", sep in "[ \\-]{0,2}") {
            let grouped: String = digits
                .chars()
                .map(|c| format!("{c}{sep}"))
                .collect();
            prop_assert_eq!(clean_number(&grouped), digits);
        }
    }
}
