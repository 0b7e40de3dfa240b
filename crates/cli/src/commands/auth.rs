//! Account commands.

use qkart_storefront::app::StorefrontApp;
use qkart_storefront::auth::{LoginForm, RegisterForm};

/// Create an account. The confirmation field is implied: the CLI takes the
/// password once, so it always matches.
pub async fn register(app: &mut StorefrontApp, username: String, password: String) {
    let form = RegisterForm {
        username,
        confirm_password: password.clone(),
        password,
    };
    app.register(&form).await;
}

/// Log in and persist the session for later invocations.
#[allow(clippy::print_stdout)]
pub async fn login(app: &mut StorefrontApp, username: String, password: String) {
    let form = LoginForm { username, password };
    if app.login(&form).await
        && let Some(session) = app.session()
    {
        println!("Logged in as {} (balance: {})", session.username, session.balance);
    }
}

/// Destroy the persisted session.
#[allow(clippy::print_stdout)]
pub fn logout(app: &mut StorefrontApp) {
    app.logout();
    println!("Logged out");
}
