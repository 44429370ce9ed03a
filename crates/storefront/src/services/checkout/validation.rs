//! Checkout form field rules.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};

use rethread_core::Email;

static CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{16}$").expect("Invalid regex"));
static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/[0-9]{2}$").expect("Invalid regex"));
static CVV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3,4}$").expect("Invalid regex"));

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drop the message for `field`, e.g. once the user edits it.
    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub(crate) fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Shipping step fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl ShippingDetails {
    /// Check every shipping field.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "first_name", &self.first_name, "First name is required");
        require(&mut errors, "last_name", &self.last_name, "Last name is required");
        if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
        } else if Email::parse(&self.email).is_err() {
            errors.insert("email", "Email is invalid");
        }
        require(&mut errors, "phone", &self.phone, "Phone number is required");
        require(&mut errors, "address", &self.address, "Address is required");
        require(&mut errors, "city", &self.city, "City is required");
        require(&mut errors, "state", &self.state, "State is required");
        require(&mut errors, "pincode", &self.pincode, "Pincode is required");
        errors
    }

    /// `"First Last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Payment step fields. Card number and CVV never appear in `Debug` output.
#[derive(Debug, Clone)]
pub struct PaymentDetails {
    pub card_name: String,
    pub card_number: SecretString,
    pub expiry: String,
    pub cvv: SecretString,
}

impl Default for PaymentDetails {
    fn default() -> Self {
        Self {
            card_name: String::new(),
            card_number: SecretString::from(String::new()),
            expiry: String::new(),
            cvv: SecretString::from(String::new()),
        }
    }
}

impl PaymentDetails {
    /// Check every payment field.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "card_name", &self.card_name, "Name on card is required");

        let card_number: String = self
            .card_number
            .expose_secret()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if card_number.is_empty() {
            errors.insert("card_number", "Card number is required");
        } else if !CARD_NUMBER_RE.is_match(&card_number) {
            errors.insert("card_number", "Card number must be 16 digits");
        }

        let expiry = self.expiry.trim();
        if expiry.is_empty() {
            errors.insert("expiry", "Expiry date is required");
        } else if !EXPIRY_RE.is_match(expiry) {
            errors.insert("expiry", "Expiry date must be in MM/YY format");
        }

        let cvv = self.cvv.expose_secret().trim();
        if cvv.is_empty() {
            errors.insert("cvv", "CVV is required");
        } else if !CVV_RE.is_match(cvv) {
            errors.insert("cvv", "CVV must be 3 or 4 digits");
        }

        errors
    }

    /// Last four card digits for display, e.g. `"4242"`.
    #[must_use]
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self
            .card_number
            .expose_secret()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        digits.iter().skip(digits.len().saturating_sub(4)).collect()
    }
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn shipping() -> ShippingDetails {
        ShippingDetails {
            first_name: "Asha".to_owned(),
            last_name: "Rao".to_owned(),
            email: "asha@rethread.in".to_owned(),
            phone: "9876543210".to_owned(),
            address: "12 MG Road".to_owned(),
            city: "Bengaluru".to_owned(),
            state: "Karnataka".to_owned(),
            pincode: "560001".to_owned(),
        }
    }

    pub fn payment() -> PaymentDetails {
        PaymentDetails {
            card_name: "Asha Rao".to_owned(),
            card_number: SecretString::from("4242 4242 4242 4242"),
            expiry: "08/27".to_owned(),
            cvv: SecretString::from("123"),
        }
    }
}
