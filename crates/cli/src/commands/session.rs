//! Simulated sign-in commands.

use rethread_core::{Email, Role};
use rethread_storefront::models::User;
use rethread_storefront::store::KeyValueStore;
use rethread_storefront::{AppError, Storefront};

/// Sign in as `name` with `role`.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an invalid email, or a session error.
pub fn login<S: KeyValueStore>(
    storefront: &Storefront<S>,
    name: &str,
    email: &str,
    role: Role,
) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_owned()));
    }
    let email = Email::parse(email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = User::new(name, email, role);
    storefront.sessions().login(&user)?;
    println!("Signed in as {} ({})", user.name, user.role);
    Ok(())
}

/// Sign out.
///
/// # Errors
///
/// Returns a session error if the store cannot be written.
pub fn logout<S: KeyValueStore>(storefront: &Storefront<S>) -> Result<(), AppError> {
    storefront.sessions().logout()?;
    println!("Signed out.");
    Ok(())
}

/// Print the signed-in user.
///
/// # Errors
///
/// Returns a session error if the store cannot be read.
pub fn whoami<S: KeyValueStore>(storefront: &Storefront<S>) -> Result<(), AppError> {
    match storefront.sessions().current_user()? {
        Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role),
        None => println!("Not signed in."),
    }
    Ok(())
}
