//! Webhook subscription verification.
//!
//! Meta verifies a webhook URL with a GET carrying `hub.mode`,
//! `hub.verify_token` and `hub.challenge`; the endpoint must echo the
//! challenge when the token matches the configured one.

use crate::error::CloudError;

/// Mode value Meta sends when subscribing.
pub const SUBSCRIBE_MODE: &str = "subscribe";

/// Check a verification request and return the challenge to echo.
///
/// A missing challenge echoes as an empty string. An empty expected token
/// never matches.
pub fn verify_subscription(
    mode: Option<&str>,
    token: Option<&str>,
    challenge: Option<&str>,
    expected_token: &str,
) -> Result<String, CloudError> {
    match (mode, token) {
        (Some(SUBSCRIBE_MODE), Some(token)) if !token.is_empty() && token == expected_token => {
            Ok(challenge.unwrap_or_default().to_string())
        }
        _ => Err(CloudError::Verification),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_token_echoes_challenge() {
        let challenge =
            verify_subscription(Some("subscribe"), Some("secret"), Some("1158201444"), "secret")
                .unwrap();
        assert_eq!(challenge, "1158201444");
    }

    #[test]
    fn test_missing_challenge_echoes_empty() {
        let challenge = verify_subscription(Some("subscribe"), Some("secret"), None, "secret");
        assert_eq!(challenge.unwrap(), "");
    }

    #[test]
    fn test_rejects_wrong_token_or_mode() {
        assert!(verify_subscription(Some("subscribe"), Some("nope"), Some("c"), "secret").is_err());
        assert!(verify_subscription(Some("unsubscribe"), Some("secret"), Some("c"), "secret").is_err());
        assert!(verify_subscription(None, Some("secret"), Some("c"), "secret").is_err());
        assert!(verify_subscription(Some("subscribe"), None, Some("c"), "secret").is_err());
    }

    #[test]
    fn test_empty_expected_token_never_matches() {
        assert!(verify_subscription(Some("subscribe"), Some(""), Some("c"), "").is_err());
    }
}
