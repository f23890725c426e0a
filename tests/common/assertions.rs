//! Custom assertion macros
//!
//! Provides assertion macros with descriptive failure output.

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

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

/// Assert that `(id, position)` pairs hold exactly the positions `0..n`
#[macro_export]
macro_rules! assert_contiguous {
    ($positions:expr) => {
        let mut positions: Vec<i64> = $positions.iter().map(|(_, p)| *p).collect();
        positions.sort_unstable();
        let expected: Vec<i64> = (0..positions.len() as i64).collect();
        assert_eq!(positions, expected, "positions are not contiguous");
    };
}

/// Assert an API failure: status code and envelope message
#[macro_export]
macro_rules! assert_api_error {
    ($response:expr, $status:expr, $message:expr) => {
        assert_eq!($response.status, $status, "unexpected status, body: {}", $response.body);
        assert_eq!($response.body["status"], serde_json::json!(false));
        assert_eq!($response.message(), $message);
    };
}
