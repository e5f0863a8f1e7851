//! Number formatting for stderr summaries.

/// Formats a count with comma separators for thousands.
///
/// # Examples
///
/// ```
/// use rare_segments::utils::format::format_number;
///
/// assert_eq!(format_number(1234), "1,234");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let lead = digits.len() % 3;

    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}
