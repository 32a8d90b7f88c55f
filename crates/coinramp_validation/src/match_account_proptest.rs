#[cfg(test)]
mod tests {
    use crate::match_account::matches_account_field;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        #[test]
        fn test_account_number_always_matches(
            account_number in "[0-9]{0,17}",
            routing_number in "[0-9]{9}",
        ) {
            let related = json!({
                "account_number": account_number.clone(),
                "routing_number": routing_number,
            });
            prop_assert!(matches_account_field(&json!(account_number), Some(&related)));
        }

        #[test]
        fn test_routing_number_matches_when_account_differs(
            account_number in "[0-9]{4,17}",
            routing_number in "[0-9]{9}",
        ) {
            prop_assume!(account_number != routing_number);
            let related = json!({
                "account_number": account_number,
                "routing_number": routing_number.clone(),
            });
            prop_assert!(matches_account_field(&json!(routing_number), Some(&related)));
        }

        #[test]
        fn test_other_values_never_match(
            subject in "[0-9A-Za-z]{0,17}",
            account_number in "[0-9]{4,17}",
            routing_number in "[0-9]{9}",
        ) {
            prop_assume!(subject != account_number && subject != routing_number);
            let related = json!({
                "account_number": account_number,
                "routing_number": routing_number,
            });
            prop_assert!(!matches_account_field(&json!(subject), Some(&related)));
        }
    }
}
