//! Assertion macros shared by the integration tests

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert that positions are exactly `0..len`
#[macro_export]
macro_rules! assert_dense {
    ($positions:expr) => {{
        let positions: Vec<i64> = $positions;
        let expected: Vec<i64> = (0..positions.len() as i64).collect();
        assert_eq!(positions, expected, "Positions are not dense");
    }};
}
