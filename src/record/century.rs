//! Century-of-birth classification
//!
//! Years map to centuries with the "no year zero" rule: 1..=100 is the
//! first century, 101..=200 the second, and so on.

/// Word placed before the numeral when no other is configured
pub const DEFAULT_CENTURY_WORD: &str = "century";

const ROMAN_PAIRS: [(u32, &str); 9] = [
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Returns the century number for a year: `floor((year - 1) / 100) + 1`
pub fn century_of_year(year: i32) -> i32 {
    (year - 1).div_euclid(100) + 1
}

/// Renders a positive integer as a Roman numeral
///
/// Values above a few hundred produce long runs of `C`; birth years never
/// get there. Zero renders as an empty string.
pub fn to_roman(mut value: u32) -> String {
    let mut numeral = String::new();
    for (amount, symbol) in ROMAN_PAIRS {
        while value >= amount {
            numeral.push_str(symbol);
            value -= amount;
        }
    }
    numeral
}

/// Builds the century label for a birth year, e.g. `1564 -> "century XVI"`
///
/// # Arguments
///
/// * `year` - The birth year
/// * `word` - The word preceding the numeral ("century", "siglo", ...)
pub fn century_label(year: i32, word: &str) -> String {
    let century = century_of_year(year).max(0) as u32;
    format!("{} {}", word, to_roman(century))
}
