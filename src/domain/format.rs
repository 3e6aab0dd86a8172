/// Removes every `<...>` tag span from the input. Unterminated tags are
/// dropped through to the end of the string.
pub fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Free-text sanitizer for attribute values: strips tags, drops control
/// characters, collapses runs of whitespace and trims the ends.
pub fn sanitize_text(input: &str) -> String {
    let stripped = strip_markup(input);
    let cleaned: String = stripped
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Renders a stored price value with grouped thousands and the configured
/// prefix. Empty, unparsable and zero values all render as the empty
/// string so the price line can be skipped entirely.
pub fn format_price(value: &str, prefix: &str) -> String {
    match parse_amount(value) {
        Some(n) if n != 0 => format!("{prefix}{}", group_thousands(n)),
        _ => String::new(),
    }
}

/// Same as `format_price` but the unit goes after the number, separated
/// by one space.
pub fn format_size(value: &str, suffix: &str) -> String {
    match parse_amount(value) {
        Some(n) if n != 0 => format!("{} {suffix}", group_thousands(n)),
        _ => String::new(),
    }
}

/// Word-limited excerpt: strips markup, then keeps the first `word_limit`
/// whitespace-separated words with a trailing ellipsis when the text runs
/// longer. Shorter text comes back stripped but otherwise unchanged.
pub fn excerpt(text: &str, word_limit: usize) -> String {
    let clean = strip_markup(text);
    let words: Vec<&str> = clean.split_whitespace().collect();
    if words.len() > word_limit {
        let mut out = words[..word_limit].join(" ");
        out.push_str("...");
        out
    } else {
        clean
    }
}

/// Leading-numeric parse in the manner of PHP's floatval: reads an
/// optional sign and the longest digit/decimal prefix, ignoring the rest.
/// Rounds to the nearest whole unit.
fn parse_amount(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, ch) in trimmed.char_indices() {
        match ch {
            '-' | '+' if i == 0 => end = ch.len_utf8(),
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            '0'..='9' => end = i + 1,
            _ => break,
        }
    }
    trimmed[..end].parse::<f64>().ok().map(|f| f.round() as i64)
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
