//! Amount in words using the Indian numbering system (thousand, lakh, crore)

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use std::str::FromStr;

use crate::utils::money::round2;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Group labels, least significant first
const LABELS: [&str; 4] = ["", "Thousand", "Lakh", "Crore"];

/// Spell out a rupee amount, e.g. `54850.50` becomes
/// "Fifty Four Thousand Eight Hundred and Fifty Rupees and 50/100 Paise Only".
///
/// The sign is ignored. Above the crore group only the lowest two digits
/// are read, so amounts should stay below one thousand crore.
pub fn amount_in_words(amount: &BigDecimal) -> String {
    let magnitude = round2(&amount.abs());
    if magnitude < zero_threshold() {
        return "Zero Rupees Only".to_string();
    }

    let whole = magnitude.with_scale_round(0, RoundingMode::Down);
    let rupees = whole.to_u128().unwrap_or_default();
    let paise = ((&magnitude - &whole) * BigDecimal::from(100))
        .with_scale_round(0, RoundingMode::HalfUp)
        .to_u32()
        .unwrap_or_default();

    let mut words = rupees_in_words(rupees);
    if words.is_empty() {
        words = "Zero".to_string();
    }

    if paise == 0 {
        format!("{words} Rupees Only")
    } else {
        format!("{words} Rupees and {paise}/100 Paise Only")
    }
}

fn zero_threshold() -> BigDecimal {
    BigDecimal::from_str("0.005").unwrap_or_else(|_| BigDecimal::from(0))
}

/// Words for the whole-rupee part; empty for zero
fn rupees_in_words(rupees: u128) -> String {
    let mut n = rupees;
    let mut groups = [0u32; 4];
    groups[0] = (n % 1000) as u32;
    n /= 1000;
    for group in groups.iter_mut().skip(1) {
        *group = (n % 100) as u32;
        n /= 100;
    }

    let mut words: Vec<String> = Vec::new();
    for (index, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        let chunk = if index == 0 {
            three_digits(group)
        } else {
            two_digits(group)
        };
        if LABELS[index].is_empty() {
            words.push(chunk);
        } else {
            words.push(format!("{chunk} {}", LABELS[index]));
        }
    }
    words.join(" ")
}

fn two_digits(n: u32) -> String {
    if n < 20 {
        return ONES[n as usize].to_string();
    }
    let tens = TENS[(n / 10) as usize];
    match n % 10 {
        0 => tens.to_string(),
        ones => format!("{tens} {}", ONES[ones as usize]),
    }
}

fn three_digits(n: u32) -> String {
    let mut out = String::new();
    if n > 99 {
        out.push_str(ONES[(n / 100) as usize]);
        out.push_str(" Hundred");
        if n % 100 != 0 {
            out.push_str(" and ");
        }
    }
    if n % 100 != 0 {
        out.push_str(&two_digits(n % 100));
    }
    out
}
