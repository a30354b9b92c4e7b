use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::normalize_email;

/// Customer record as stored in the database.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub created: NaiveDateTime,
    /// Set on every modification, `None` until the first update.
    pub updated: Option<NaiveDateTime>,
}

/// Customer awaiting insertion. The identifier is assigned by the store.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewCustomer {
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub created: NaiveDateTime,
}

impl NewCustomer {
    #[must_use]
    pub fn new(first_name: String, surname: String, email: String, password: String) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            surname: surname.trim().to_string(),
            email: normalize_email(&email),
            password,
            created: Utc::now().naive_utc(),
        }
    }
}

/// Full replacement of the mutable customer fields.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpdateCustomer {
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub updated: NaiveDateTime,
}

impl UpdateCustomer {
    #[must_use]
    pub fn new(first_name: String, surname: String, email: String, password: String) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            surname: surname.trim().to_string(),
            email: normalize_email(&email),
            password,
            updated: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_customer_normalizes_names_and_email() {
        let customer = NewCustomer::new(
            "  Ada ".to_string(),
            " Lovelace".to_string(),
            " Ada@Example.com ".to_string(),
            "Password01@".to_string(),
        );

        assert_eq!(customer.first_name, "Ada");
        assert_eq!(customer.surname, "Lovelace");
        assert_eq!(customer.email, "ada@example.com");
        assert_eq!(customer.password, "Password01@");
    }

    #[test]
    fn update_customer_stamps_modification_time() {
        let before = Utc::now().naive_utc();
        let update = UpdateCustomer::new(
            "Ada".to_string(),
            "Byron".to_string(),
            "ada@example.com".to_string(),
            "Password01@".to_string(),
        );

        assert!(update.updated >= before);
    }
}
