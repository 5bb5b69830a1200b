//! Authentication service.
//!
//! Signup and password login against the in-memory customer repository.

mod error;
mod password;

pub use error::AuthError;
pub(crate) use password::{hash_password, verify_password};

use secrecy::SecretString;
use ubermelon_core::Email;

use crate::db::{CustomerRepository, RepositoryError};
use crate::models::{Customer, NewCustomer};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 4;

/// Maximum length of a first or last name.
const MAX_NAME_LENGTH: usize = 100;

/// Signup form fields, as submitted.
#[derive(Debug)]
pub struct Signup<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Authentication service.
pub struct AuthService<'a> {
    customers: &'a CustomerRepository,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(customers: &'a CustomerRepository) -> Self {
        Self { customers }
    }

    /// Register a new customer.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::InvalidName` if a name is blank or too long.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub fn signup(&self, form: &Signup<'_>) -> Result<Customer, AuthError> {
        let first_name = validate_name(form.first_name, "first name")?;
        let last_name = validate_name(form.last_name, "last name")?;
        let email = Email::parse(form.email)?;
        validate_password(form.password)?;

        self.customers
            .create(NewCustomer {
                first_name,
                last_name,
                email,
                password: SecretString::from(form.password.to_owned()),
            })
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                RepositoryError::PasswordHash => AuthError::PasswordHash,
                other => AuthError::Repository(other),
            })
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid,
    /// `AuthError::UserNotFound` if no customer has that email, and
    /// `AuthError::InvalidCredentials` if the password is wrong.
    pub fn login(&self, email: &str, password: &str) -> Result<Customer, AuthError> {
        let email = Email::parse(email)?;

        let customer = self
            .customers
            .get_by_email(&email)
            .ok_or(AuthError::UserNotFound)?;

        verify_password(password, &customer.password_hash)?;

        Ok(customer)
    }
}

fn validate_name(raw: &str, field: &'static str) -> Result<String, AuthError> {
    let name = raw.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH || name.contains('|') {
        return Err(AuthError::InvalidName(field));
    }
    Ok(name.to_owned())
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn signup<'a>(email: &'a str, password: &'a str) -> Signup<'a> {
        Signup {
            first_name: " Juliet ",
            last_name: "Capulet",
            email,
            password,
        }
    }

    #[test]
    fn test_signup_then_login() {
        let repo = CustomerRepository::new();
        let auth = AuthService::new(&repo);

        let customer = auth.signup(&signup("Juliet@Verona.it", "romeo")).unwrap();
        assert_eq!(customer.first_name, "Juliet");
        assert_eq!(customer.email.as_str(), "juliet@verona.it");

        let logged_in = auth.login("juliet@verona.it", "romeo").unwrap();
        assert_eq!(logged_in.email, customer.email);
    }

    #[test]
    fn test_login_unknown_email() {
        let repo = CustomerRepository::new();
        let auth = AuthService::new(&repo);
        assert!(matches!(
            auth.login("nobody@verona.it", "pw"),
            Err(AuthError::UserNotFound)
        ));
    }

    #[test]
    fn test_login_wrong_password() {
        let repo = CustomerRepository::new();
        let auth = AuthService::new(&repo);
        auth.signup(&signup("juliet@verona.it", "romeo")).unwrap();

        let err = auth.login("juliet@verona.it", "tybalt").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.user_message(), "Incorrect password.");
    }

    #[test]
    fn test_signup_duplicate() {
        let repo = CustomerRepository::new();
        let auth = AuthService::new(&repo);
        auth.signup(&signup("juliet@verona.it", "romeo")).unwrap();

        assert!(matches!(
            auth.signup(&signup("JULIET@verona.it", "other")),
            Err(AuthError::UserAlreadyExists)
        ));
    }

    #[test]
    fn test_signup_validation() {
        let repo = CustomerRepository::new();
        let auth = AuthService::new(&repo);

        assert!(matches!(
            auth.signup(&signup("not-an-email", "romeo")),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            auth.signup(&signup("juliet@verona.it", "abc")),
            Err(AuthError::WeakPassword(_))
        ));

        let blank = Signup {
            first_name: "  ",
            ..signup("juliet@verona.it", "romeo")
        };
        assert!(matches!(
            auth.signup(&blank),
            Err(AuthError::InvalidName("first name"))
        ));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_signup_rejects_field_separator_in_name() {
        let repo = CustomerRepository::new();
        let auth = AuthService::new(&repo);

        let piped = Signup {
            first_name: "Ju|liet",
            ..signup("juliet@verona.it", "romeo")
        };
        let err = auth.signup(&piped).unwrap_err();
        assert!(matches!(err, AuthError::InvalidName("first name")));
        assert_eq!(err.user_message(), "Please enter a valid first name.");
        assert!(repo.is_empty());
    }

    #[test]
    fn test_signup_name_length_limit() {
        let repo = CustomerRepository::new();
        let auth = AuthService::new(&repo);

        let too_long = "a".repeat(MAX_NAME_LENGTH + 1);
        let long_last = Signup {
            last_name: &too_long,
            ..signup("juliet@verona.it", "romeo")
        };
        assert!(matches!(
            auth.signup(&long_last),
            Err(AuthError::InvalidName("last name"))
        ));
        assert!(repo.is_empty());

        let just_fits = "a".repeat(MAX_NAME_LENGTH);
        let longest_last = Signup {
            last_name: &just_fits,
            ..signup("juliet@verona.it", "romeo")
        };
        assert_eq!(auth.signup(&longest_last).unwrap().last_name, just_fits);
    }
}
