//! Payee and memo derivation from free-text descriptions

/// Separators tried in priority order; text after the first match is the payee
const SEPARATORS: [&str; 3] = [" at ", " from ", " via "];

/// Payee and memo pair written for one transaction record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayeeMemo {
    pub payee: String,
    /// Empty when no memo is known
    pub memo: String,
}

/// Derive the payee and memo for a transaction
///
/// An explicit memo always wins and leaves the description as the payee. With
/// splitting enabled and no memo, `"Coffee at Joe's"` becomes payee `"Joe's"`
/// and memo `"Coffee"`.
pub fn extract_payee_memo(description: &str, memo: Option<&str>, split_enabled: bool) -> PayeeMemo {
    let memo = memo.unwrap_or_default();
    if !split_enabled || !memo.is_empty() {
        return PayeeMemo {
            payee: description.to_string(),
            memo: memo.to_string(),
        };
    }

    for separator in SEPARATORS {
        if let Some(index) = description.find(separator) {
            let trailing = &description[index + separator.len()..];
            if index > 0 && !trailing.is_empty() {
                return PayeeMemo {
                    payee: capitalize_first(trailing),
                    memo: description[..index].to_string(),
                };
            }
        }
    }

    PayeeMemo {
        payee: description.to_string(),
        memo: String::new(),
    }
}

/// Upper-case the first character if it is an ASCII letter
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let mut capitalized = String::with_capacity(text.len());
            capitalized.push(first.to_ascii_uppercase());
            capitalized.push_str(chars.as_str());
            capitalized
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payee_split_from_description() {
        let result = extract_payee_memo("Coffee at Joe's", None, true);
        assert_eq!(result.payee, "Joe's");
        assert_eq!(result.memo, "Coffee");

        let result = extract_payee_memo("Refund from acme corp", None, true);
        assert_eq!(result.payee, "Acme corp");
        assert_eq!(result.memo, "Refund");

        let result = extract_payee_memo("Transfer via wire", Some(""), true);
        assert_eq!(result.payee, "Wire");
        assert_eq!(result.memo, "Transfer");
    }

    #[test]
    fn test_description_without_separator() {
        let result = extract_payee_memo("Grocery run", None, true);
        assert_eq!(result.payee, "Grocery run");
        assert_eq!(result.memo, "");
    }

    #[test]
    fn test_separator_priority_and_bounds() {
        // " at " wins over an earlier " from "
        let result = extract_payee_memo("Gift from Ann at Mall", None, true);
        assert_eq!(result.payee, "Mall");
        assert_eq!(result.memo, "Gift from Ann");

        // nothing after the separator
        let result = extract_payee_memo("Paid at ", None, true);
        assert_eq!(result.payee, "Paid at ");
        assert_eq!(result.memo, "");

        // nothing before the separator
        let result = extract_payee_memo(" at home", None, true);
        assert_eq!(result.payee, " at home");
    }

    #[test]
    fn test_explicit_memo_or_disabled_keeps_description() {
        let result = extract_payee_memo("Coffee at Joe's", Some("morning"), true);
        assert_eq!(result.payee, "Coffee at Joe's");
        assert_eq!(result.memo, "morning");

        let result = extract_payee_memo("Coffee at Joe's", None, false);
        assert_eq!(result.payee, "Coffee at Joe's");
        assert_eq!(result.memo, "");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("liability"), "Liability");
        assert_eq!(capitalize_first("x"), "X");
        assert_eq!(capitalize_first("élan"), "élan");
        assert_eq!(capitalize_first(""), "");
    }
}
