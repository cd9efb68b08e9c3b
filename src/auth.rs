/// Authorization scheme used by every Kakao REST API.
pub const DEFAULT_KEY_PREFIX: &str = "KakaoAK";

/// Format a raw REST API key into an `Authorization` header value.
///
/// Surrounding whitespace on the secret is dropped. An empty secret still
/// produces a value (just the prefix and a space); the server rejects it with
/// a 401 rather than this function failing.
///
/// ```
/// assert_eq!(kakao_api::format_key("KakaoAK", "  abc123\n"), "KakaoAK abc123");
/// ```
pub fn format_key(prefix: &str, secret: &str) -> String {
    format!("{prefix} {}", secret.trim())
}
