use proptest::prelude::*;
use saveserve_core::chart::{chart_points, smooth_path};
use saveserve_core::form::{validate_email, validate_message, validate_name, FieldError};
use saveserve_core::scroll::scroll_fraction;

proptest! {
    /// Property: the scroll fraction never leaves [0, 1]
    #[test]
    fn prop_scroll_fraction_in_unit_range(
        top in any::<f64>(),
        doc in any::<f64>(),
        viewport in any::<f64>(),
    ) {
        let p = scroll_fraction(top, doc, viewport);
        prop_assert!((0.0..=1.0).contains(&p));
    }

    /// Property: no overflow means no progress
    #[test]
    fn prop_no_overflow_is_zero(top in -1e6f64..1e6, height in 0f64..1e6) {
        prop_assert_eq!(scroll_fraction(top, height, height), 0.0);
    }

    /// Property: names of two or more visible characters pass
    #[test]
    fn prop_names_of_two_chars_pass(name in "[a-zA-Z]{2,40}") {
        prop_assert_eq!(validate_name(&name), None);
    }

    /// Property: single characters never pass
    #[test]
    fn prop_single_char_name_fails(name in "[a-zA-Z]") {
        prop_assert_eq!(validate_name(&name), Some(FieldError::TooShort { min: 2 }));
    }

    /// Property: strings without an '@' are never valid emails
    #[test]
    fn prop_email_without_at_fails(email in "[a-z0-9.]{1,30}") {
        prop_assert_eq!(validate_email(&email), Some(FieldError::InvalidFormat));
    }

    /// Property: well-formed local@domain.tld addresses pass
    #[test]
    fn prop_simple_email_passes(
        local in "[a-z0-9]{1,12}",
        domain in "[a-z0-9]{1,12}",
        tld in "[a-z]{2,6}",
    ) {
        let email = format!("{}@{}.{}", local, domain, tld);
        prop_assert_eq!(validate_email(&email), None);
    }

    /// Property: non-empty messages under 10 chars fail, 10+ pass
    #[test]
    fn prop_message_length_threshold(message in "[a-z ]{1,30}") {
        let expected = if message.chars().count() < 10 {
            Some(FieldError::TooShort { min: 10 })
        } else {
            None
        };
        prop_assert_eq!(validate_message(&message), expected);
    }

    /// Property: one cubic segment per gap, points inverted onto the chart
    #[test]
    fn prop_path_shape(values in prop::collection::vec(0f64..=100.0, 2..20)) {
        let path = smooth_path(&values, 600.0, 200.0);
        prop_assert!(path.starts_with("M "));
        prop_assert_eq!(path.matches(" C ").count(), values.len() - 1);
        prop_assert_eq!(path.clone(), smooth_path(&values, 600.0, 200.0));

        for point in chart_points(&values, 600.0, 200.0) {
            prop_assert!((0.0..=600.0 + 1e-9).contains(&point.x));
            prop_assert!((-1e-9..=200.0 + 1e-9).contains(&point.y));
        }
    }
}
