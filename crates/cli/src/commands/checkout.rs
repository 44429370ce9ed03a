//! Checkout command.
//!
//! Walks the shipping and payment steps with the supplied flags, then places
//! the order. Name and email default to the signed-in user.
//!
//! # Usage
//!
//! ```bash
//! rethread checkout \
//!     --first-name Asha --last-name Rao --email asha@example.com \
//!     --phone 9876543210 --address "12 MG Road" --city Bengaluru \
//!     --state Karnataka --pincode 560001 \
//!     --card-name "Asha Rao" --card-number "4242 4242 4242 4242" \
//!     --expiry 08/27 --cvv 123
//! ```

use secrecy::SecretString;

use rethread_storefront::filters::{money, pluralize};
use rethread_storefront::services::checkout::{
    CheckoutError, CheckoutForm, FieldErrors, PaymentDetails, ShippingDetails,
};
use rethread_storefront::store::KeyValueStore;
use rethread_storefront::{AppError, Storefront};

/// Shipping and payment flags.
#[derive(clap::Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long, default_value = "")]
    state: String,
    #[arg(long, default_value = "")]
    pincode: String,

    /// Name on card
    #[arg(long, default_value = "")]
    card_name: String,
    /// 16-digit card number; spaces are ignored
    #[arg(long, default_value = "")]
    card_number: String,
    /// Expiry as MM/YY
    #[arg(long, default_value = "")]
    expiry: String,
    #[arg(long, default_value = "")]
    cvv: String,
}

fn print_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        println!("  {field}: {message}");
    }
}

/// Validate each step and place the order.
///
/// # Errors
///
/// Returns `AppError::Checkout` if the cart is empty or a step fails
/// validation, or `AppError::Session`/`AppError::Store` on store failure.
pub async fn run<S: KeyValueStore>(storefront: &Storefront<S>, args: CheckoutArgs) -> Result<(), AppError> {
    let checkout = storefront.checkout();
    checkout.ensure_cart()?;

    let user = storefront.sessions().current_user()?;
    let (first, last) = user.as_ref().map_or_else(Default::default, |u| {
        let (first, last) = u.name.split_once(' ').unwrap_or((u.name.as_str(), ""));
        (first.to_owned(), last.trim().to_owned())
    });

    let shipping = ShippingDetails {
        first_name: args.first_name.unwrap_or(first),
        last_name: args.last_name.unwrap_or(last),
        email: args
            .email
            .or_else(|| user.as_ref().map(|u| u.email.to_string()))
            .unwrap_or_default(),
        phone: args.phone,
        address: args.address,
        city: args.city,
        state: args.state,
        pincode: args.pincode,
    };
    let payment = PaymentDetails {
        card_name: args.card_name,
        card_number: SecretString::from(args.card_number),
        expiry: args.expiry,
        cvv: SecretString::from(args.cvv),
    };

    let mut form = CheckoutForm::with_details(shipping, payment);
    for _ in 0..2 {
        let step = form.step();
        if let Err(errors) = form.next_step() {
            println!("Step {} ({step}) needs attention:", step.number());
            print_errors(&errors);
            return Err(CheckoutError::Invalid(errors).into());
        }
    }

    let card = form.payment.last_four();
    let confirmation = checkout.place_order(&form).await?;
    let currency = storefront.config().currency;

    println!("Thank you for your order!");
    println!("  Order number: #{}", confirmation.order_number);
    println!("  Date:         {}", confirmation.formatted_date());
    println!("  Ship to:      {}", confirmation.ship_to);
    println!("  Receipt to:   {}", confirmation.email);
    println!("  Paid with:    card ending {card}");
    println!(
        "  {}, total {}",
        pluralize(confirmation.lines.len(), "line"),
        money(confirmation.totals.total, currency)
    );
    Ok(())
}
