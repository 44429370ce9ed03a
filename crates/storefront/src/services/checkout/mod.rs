//! Multi-step checkout.
//!
//! The form walks Shipping → Payment → Review. Each step must validate before
//! the next is reachable. Placing the order re-validates everything, rejects
//! an empty cart, waits out the simulated latency, snapshots the totals and
//! clears the cart. No payment is taken.

mod validation;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use rethread_core::Email;

use crate::cart::CartLedger;
use crate::models::{CartLine, CartTotals};
use crate::providers::{Clock, Latency, OrderNumberSource};
use crate::store::{KeyValueStore, StoreError};

pub use validation::{FieldErrors, PaymentDetails, ShippingDetails};

#[cfg(test)]
pub(crate) use validation::fixtures;

/// Errors from placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("your cart is empty")]
    EmptyCart,

    /// One or more fields failed validation.
    #[error("please fix the highlighted fields: {0}")]
    Invalid(FieldErrors),

    /// The form has not reached the review step.
    #[error("checkout is still on the {0} step")]
    NotReady(CheckoutStep),

    /// Store error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Checkout steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Payment,
    Review,
}

impl CheckoutStep {
    /// 1-based position for progress indicators.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Shipping => 1,
            Self::Payment => 2,
            Self::Review => 3,
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Shipping => Self::Payment,
            Self::Payment | Self::Review => Self::Review,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Shipping | Self::Payment => Self::Shipping,
            Self::Review => Self::Payment,
        }
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Shipping => "shipping",
            Self::Payment => "payment",
            Self::Review => "review",
        })
    }
}

/// Checkout form state.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub shipping: ShippingDetails,
    pub payment: PaymentDetails,
    step: CheckoutStep,
    errors: FieldErrors,
}

impl CheckoutForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from already-collected details, on the shipping step.
    #[must_use]
    pub fn with_details(shipping: ShippingDetails, payment: PaymentDetails) -> Self {
        Self {
            shipping,
            payment,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Messages from the last failed [`Self::next_step`].
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Errors for `step` as the fields currently stand. Review has no fields.
    #[must_use]
    pub fn validate_step(&self, step: CheckoutStep) -> FieldErrors {
        match step {
            CheckoutStep::Shipping => self.shipping.validate(),
            CheckoutStep::Payment => self.payment.validate(),
            CheckoutStep::Review => FieldErrors::new(),
        }
    }

    /// Errors across every step.
    #[must_use]
    pub fn validate_all(&self) -> FieldErrors {
        let mut errors = self.shipping.validate();
        errors.extend(self.payment.validate());
        errors
    }

    /// Advance if the current step validates; otherwise record its errors.
    ///
    /// # Errors
    ///
    /// Returns the current step's field errors, leaving the step unchanged.
    pub fn next_step(&mut self) -> Result<CheckoutStep, FieldErrors> {
        let errors = self.validate_step(self.step);
        if errors.is_empty() {
            self.errors = FieldErrors::new();
            self.step = self.step.next();
            Ok(self.step)
        } else {
            self.errors = errors.clone();
            Err(errors)
        }
    }

    /// Go back one step; stays on Shipping.
    pub fn previous_step(&mut self) -> CheckoutStep {
        self.step = self.step.previous();
        self.step
    }

    /// Update a field by name and clear its error.
    ///
    /// Returns `false` for an unknown field name.
    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        let value = value.to_owned();
        match field {
            "first_name" => self.shipping.first_name = value,
            "last_name" => self.shipping.last_name = value,
            "email" => self.shipping.email = value,
            "phone" => self.shipping.phone = value,
            "address" => self.shipping.address = value,
            "city" => self.shipping.city = value,
            "state" => self.shipping.state = value,
            "pincode" => self.shipping.pincode = value,
            "card_name" => self.payment.card_name = value,
            "card_number" => self.payment.card_number = value.into(),
            "expiry" => self.payment.expiry = value,
            "cvv" => self.payment.cvv = value.into(),
            _ => return false,
        }
        self.errors.clear(field);
        true
    }
}

/// A placed (simulated) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    /// Six-digit order number.
    pub order_number: u32,
    pub placed_on: DateTime<Utc>,
    pub ship_to: String,
    pub email: Email,
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl OrderConfirmation {
    /// Order date as shown on the confirmation page, e.g. `"June 12, 2024"`.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.placed_on.format("%B %-d, %Y").to_string()
    }
}

/// Order placement over a cart ledger.
pub struct Checkout<'a, S> {
    ledger: &'a CartLedger<S>,
    orders: &'a dyn OrderNumberSource,
    clock: &'a dyn Clock,
    latency: Latency,
}

impl<'a, S: KeyValueStore> Checkout<'a, S> {
    pub fn new(
        ledger: &'a CartLedger<S>,
        orders: &'a dyn OrderNumberSource,
        clock: &'a dyn Clock,
        latency: Latency,
    ) -> Self {
        Self {
            ledger,
            orders,
            clock,
            latency,
        }
    }

    /// Fail fast when there is nothing to buy.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for an empty cart.
    pub fn ensure_cart(&self) -> Result<Vec<CartLine>, CheckoutError> {
        let lines = self.ledger.lines()?;
        if lines.is_empty() {
            tracing::info!("Checkout attempted with an empty cart");
            return Err(CheckoutError::EmptyCart);
        }
        Ok(lines)
    }

    /// Place the order described by `form` and clear the cart.
    ///
    /// Nothing is written unless the order succeeds.
    ///
    /// # Errors
    ///
    /// - `CheckoutError::EmptyCart` if the cart has no lines
    /// - `CheckoutError::NotReady` if the form is not on the review step
    /// - `CheckoutError::Invalid` if any field fails validation
    /// - `CheckoutError::Store` if the store fails
    #[instrument(skip(self, form), fields(step = %form.step()))]
    pub async fn place_order(
        &self,
        form: &CheckoutForm,
    ) -> Result<OrderConfirmation, CheckoutError> {
        self.ensure_cart()?;

        if form.step() != CheckoutStep::Review {
            return Err(CheckoutError::NotReady(form.step()));
        }

        let errors = form.validate_all();
        if !errors.is_empty() {
            return Err(CheckoutError::Invalid(errors));
        }
        let email = Email::parse(&form.shipping.email).map_err(|e| {
            let mut errors = FieldErrors::new();
            errors.insert("email", e.to_string());
            CheckoutError::Invalid(errors)
        })?;

        self.latency.simulate().await;

        // The cart may have changed during the delay; order what is there now.
        let lines = self.ledger.take()?;
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let totals = CartTotals::compute(&lines, self.ledger.tax_rate());

        let confirmation = OrderConfirmation {
            order_number: self.orders.next_order_number(),
            placed_on: self.clock.now(),
            ship_to: form.shipping.full_name(),
            email,
            lines,
            totals,
        };

        tracing::info!(
            order_number = confirmation.order_number,
            total = %confirmation.totals.total,
            lines = confirmation.lines.len(),
            "Order placed"
        );

        Ok(confirmation)
    }
}
