//! Display formatting shared by the command-line views.

use rust_decimal::Decimal;

use rethread_core::{CurrencyCode, Price};

use crate::models::Product;

/// Format an amount with the currency symbol and two decimals, e.g. `₹1,299.00`.
#[must_use]
pub fn money(amount: Decimal, currency: CurrencyCode) -> String {
    let plain = Price::new(amount, currency).to_string();
    let symbol = currency.symbol();
    let digits = plain.strip_prefix(symbol).unwrap_or(&plain);
    let (sign, digits) = digits
        .strip_prefix('-')
        .map_or(("", digits), |rest| ("-", rest));
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, "00"));
    format!("{sign}{symbol}{}.{fraction}", group_thousands(whole))
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// A fractional rate as a percentage, e.g. `0.05` → `"5%"`.
#[must_use]
pub fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// `"1 item"`, `"3 items"`.
#[must_use]
pub fn pluralize<N>(count: N, noun: &str) -> String
where
    N: std::fmt::Display + PartialEq + From<u8>,
{
    if count == N::from(1) {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Asking price, plus the original price and saving when discounted.
#[must_use]
pub fn price_line(product: &Product, currency: CurrencyCode) -> String {
    let price = money(product.price, currency);
    match (product.original_price, product.discount_percent()) {
        (Some(original), Some(percent)) => {
            format!("{price} (was {}, {percent}% off)", money(original, currency))
        }
        _ => price,
    }
}
