//! Spelled-out class names for classes that only have a numeric name.

const DIGIT_WORDS: [&str; 10] = [
    "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

/// `42` → `"FourTwo"`.
pub fn spell_digits(value: u64) -> String {
    value
        .to_string()
        .bytes()
        .map(|digit| DIGIT_WORDS[usize::from(digit - b'0')])
        .collect()
}
