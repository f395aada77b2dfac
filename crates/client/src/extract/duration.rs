//! Lenient race length parsing.

/// Parse a race length such as `"1h 30 minutes"` into minutes.
///
/// Tokens are whitespace-separated:
/// - a token ending in `h` adds 60 × its numeric prefix
/// - `minute` / `minutes` adds the value of the token before it
/// - anything else adds nothing
///
/// Prefixes that are not numbers count as 0, so this never fails.
pub fn parse_duration_minutes(raw: &str) -> u32 {
    let tokens: Vec<&str> = raw.split_whitespace().collect();

    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            if let Some(hours) = token.strip_suffix('h') {
                number(hours).saturating_mul(60)
            } else if matches!(*token, "minute" | "minutes") && i > 0 {
                number(tokens[i - 1])
            } else {
                0
            }
        })
        .fold(0, u32::saturating_add)
}

fn number(token: &str) -> u32 {
    token.parse().unwrap_or(0)
}
