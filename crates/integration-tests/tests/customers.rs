//! Signup and login against the in-memory customer store.

use ubermelon_core::Email;
use ubermelon_integration_tests::{SEED_EMAIL, SEED_PASSWORD, TestContext, assert_redirect};

fn signup_form<'a>(email: &'a str, password: &'a str) -> [(&'static str, &'a str); 4] {
    [
        ("first_name", "Casey"),
        ("last_name", "Melon"),
        ("email", email),
        ("password", password),
    ]
}

#[tokio::test]
async fn test_login_failures_are_flashed() {
    let ctx = TestContext::new().await;

    ctx.login(SEED_EMAIL, "not-my-password", "/login").await;
    assert!(ctx.page("/login").await.contains("Incorrect password."));

    ctx.login("nobody@ubermelon.com", SEED_PASSWORD, "/login").await;
    assert!(
        ctx.page("/login")
            .await
            .contains("No customer with that email found.")
    );

    ctx.login("not an email", SEED_PASSWORD, "/login").await;
    assert!(
        ctx.page("/login")
            .await
            .contains("No customer with that email found.")
    );
}

#[tokio::test]
async fn test_login_is_case_insensitive_on_email() {
    let ctx = TestContext::new().await;

    ctx.login(&SEED_EMAIL.to_uppercase(), SEED_PASSWORD, "/melons").await;
    assert!(ctx.page("/melons").await.contains("Hello, Joel"));
}

#[tokio::test]
async fn test_signup_then_login() {
    let ctx = TestContext::new().await;
    let email = Email::parse(" Casey@Melons.test ").unwrap_or_else(|e| panic!("{e}"));

    let response = ctx
        .post_form("/signup", &signup_form(" Casey@Melons.test ", "sugarbaby"))
        .await;
    assert_redirect(&response, "/login");
    assert!(
        ctx.page("/login")
            .await
            .contains(&format!("Account created for {email}. Please log in."))
    );

    ctx.login(email.as_str(), "sugarbaby", "/melons").await;
    assert!(ctx.page("/melons").await.contains("Hello, Casey"));
}

#[tokio::test]
async fn test_duplicate_signup_is_rejected() {
    let ctx = TestContext::new().await;

    let response = ctx
        .post_form("/signup", &signup_form(SEED_EMAIL, "another-password"))
        .await;
    assert_redirect(&response, "/signup");
    assert!(
        ctx.page("/signup")
            .await
            .contains("An account with that email already exists.")
    );

    // The seeded password still works
    ctx.login(SEED_EMAIL, SEED_PASSWORD, "/melons").await;
}

#[tokio::test]
async fn test_signup_validation() {
    let ctx = TestContext::new().await;

    let response = ctx
        .post_form("/signup", &signup_form("short@melons.test", "abc"))
        .await;
    assert_redirect(&response, "/signup");
    assert!(ctx.page("/signup").await.contains("Please choose a longer password"));

    let response = ctx
        .post_form("/signup", &signup_form("not-an-email", "longenough"))
        .await;
    assert_redirect(&response, "/signup");
    assert!(
        ctx.page("/signup")
            .await
            .contains("Please enter a valid email address")
    );

    ctx.login("short@melons.test", "abc", "/login").await;
}

#[tokio::test]
async fn test_signup_rejects_bad_names() {
    let ctx = TestContext::new().await;

    let response = ctx
        .post_form(
            "/signup",
            &[
                ("first_name", "Ca|sey"),
                ("last_name", "Melon"),
                ("email", "piped@melons.test"),
                ("password", "longenough"),
            ],
        )
        .await;
    assert_redirect(&response, "/signup");
    assert!(
        ctx.page("/signup")
            .await
            .contains("Please enter a valid first name.")
    );

    let long_name = "m".repeat(101);
    let response = ctx
        .post_form(
            "/signup",
            &[
                ("first_name", "Casey"),
                ("last_name", long_name.as_str()),
                ("email", "long@melons.test"),
                ("password", "longenough"),
            ],
        )
        .await;
    assert_redirect(&response, "/signup");
    assert!(
        ctx.page("/signup")
            .await
            .contains("Please enter a valid last name.")
    );

    ctx.login("piped@melons.test", "longenough", "/login").await;
    ctx.login("long@melons.test", "longenough", "/login").await;
}
