//! Reading the anti-forgery token out of a cookie string.

use percent_encoding::percent_decode_str;

/// Cookie the server sets with the anti-forgery token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Find the `csrftoken` value in a `name=value; name=value` cookie string.
///
/// The value is percent-decoded. A missing cookie yields an empty token; the
/// server then rejects the request, which is the same outcome a browser gets.
pub fn token_from_cookies(cookies: &str) -> String {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(CSRF_COOKIE)?.strip_prefix('='))
        .map(|value| percent_decode_str(value).decode_utf8_lossy().into_owned())
        .unwrap_or_default()
}
