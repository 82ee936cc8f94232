// KPI number formatting with thousands separators
//
// The dashboard shows "20,000.00", "1,234" and "$2.50" style values; the
// renderer receives them as finished strings.

/// Format with comma digit grouping and a fixed number of decimals.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{value:.decimals$}");
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    // Insert a comma every three digits, walking the integer part from the
    // right. The sign never gets a separator after it.
    let mut grouped = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 && c != '-' {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let integer_grouped: String = grouped.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{integer_grouped}.{d}"),
        None => integer_grouped,
    }
}

/// `$`-prefixed currency with two decimals.
pub fn currency(value: f64) -> String {
    format!("${}", group_thousands(value, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(20.0, 2), "20.00");
        assert_eq!(group_thousands(1234.0, 0), "1,234");
        assert_eq!(group_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(group_thousands(-4321.5, 2), "-4,321.50");
        assert_eq!(group_thousands(0.0, 0), "0");
    }

    #[test]
    fn test_currency() {
        assert_eq!(currency(2.5), "$2.50");
        assert_eq!(currency(12345.678), "$12,345.68");
    }
}
