//! Customer repository.
//!
//! Customers are seeded from a flat file at startup and kept in a
//! process-wide map keyed by email. Signups are added to the map only; the
//! file is never rewritten, so they are lost on restart.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use secrecy::{ExposeSecret, SecretString};
use ubermelon_core::Email;

use super::{RepositoryError, records};
use crate::models::{Customer, NewCustomer};
use crate::services::auth::hash_password;

const FIELD_COUNT: usize = 4;

/// In-memory customer store.
#[derive(Debug, Default)]
pub struct CustomerRepository {
    customers: RwLock<HashMap<Email, Customer>>,
}

impl CustomerRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load customers from a file.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be read, `Malformed`
    /// for invalid lines, `Conflict` for duplicate emails and `PasswordHash`
    /// if a password cannot be hashed.
    pub fn load(path: &Path) -> Result<Self, RepositoryError> {
        let file = File::open(path)?;
        let repo = Self::from_reader(BufReader::new(file))?;
        tracing::info!(path = %path.display(), customers = repo.len(), "Loaded customers");
        Ok(repo)
    }

    /// Parse customers from `first_name|last_name|email|password` lines.
    ///
    /// Plaintext passwords from the file are hashed on the way in.
    ///
    /// # Errors
    ///
    /// See [`CustomerRepository::load`].
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, RepositoryError> {
        let repo = Self::new();

        for record in records(reader, FIELD_COUNT) {
            let record = record?;
            let line = record.line;
            let [first_name, last_name, email, password]: [String; FIELD_COUNT] = record
                .fields
                .try_into()
                .map_err(|_| RepositoryError::Malformed {
                    line,
                    reason: "wrong number of fields".to_string(),
                })?;

            let email = Email::parse(&email).map_err(|e| RepositoryError::Malformed {
                line,
                reason: e.to_string(),
            })?;

            repo.create(NewCustomer {
                first_name,
                last_name,
                email,
                password: SecretString::from(password),
            })
            .map_err(|e| match e {
                RepositoryError::Conflict(reason) => RepositoryError::Malformed { line, reason },
                other => other,
            })?;
        }

        Ok(repo)
    }

    /// Look up a customer by email.
    #[must_use]
    pub fn get_by_email(&self, email: &Email) -> Option<Customer> {
        self.customers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(email)
            .cloned()
    }

    /// Hash the password and add a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists and
    /// `RepositoryError::PasswordHash` if hashing fails.
    pub fn create(&self, new: NewCustomer) -> Result<Customer, RepositoryError> {
        if self.contains(&new.email) {
            return Err(conflict(&new.email));
        }

        // Hash outside the lock; Argon2 is deliberately slow.
        let password_hash = hash_password(new.password.expose_secret())
            .map_err(|_| RepositoryError::PasswordHash)?;

        let customer = Customer {
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            password_hash,
        };

        let mut customers = self
            .customers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if customers.contains_key(&customer.email) {
            return Err(conflict(&customer.email));
        }
        customers.insert(customer.email.clone(), customer.clone());

        Ok(customer)
    }

    /// Whether a customer with this email exists.
    #[must_use]
    pub fn contains(&self, email: &Email) -> bool {
        self.customers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(email)
    }

    /// Number of customers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.customers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn conflict(email: &Email) -> RepositoryError {
    RepositoryError::Conflict(format!("email '{email}' already exists"))
}
