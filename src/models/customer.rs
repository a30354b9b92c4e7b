use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{
    Customer as DomainCustomer, NewCustomer as DomainNewCustomer,
    UpdateCustomer as DomainUpdateCustomer,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::customers)]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub created: NaiveDateTime,
    pub updated: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
/// Insertable form of [`Customer`].
pub struct NewCustomer<'a> {
    pub first_name: &'a str,
    pub surname: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub created: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
/// Data used when updating a [`Customer`] record. `id` and `created` are
/// never part of an update.
pub struct UpdateCustomer<'a> {
    pub first_name: &'a str,
    pub surname: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub updated: NaiveDateTime,
}

impl From<Customer> for DomainCustomer {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            surname: customer.surname,
            email: customer.email,
            password: customer.password,
            created: customer.created,
            updated: customer.updated,
        }
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(customer: &'a DomainNewCustomer) -> Self {
        Self {
            first_name: customer.first_name.as_str(),
            surname: customer.surname.as_str(),
            email: customer.email.as_str(),
            password: customer.password.as_str(),
            created: customer.created,
        }
    }
}

impl<'a> From<&'a DomainUpdateCustomer> for UpdateCustomer<'a> {
    fn from(customer: &'a DomainUpdateCustomer) -> Self {
        Self {
            first_name: customer.first_name.as_str(),
            surname: customer.surname.as_str(),
            email: customer.email.as_str(),
            password: customer.password.as_str(),
            updated: customer.updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_domain_new() -> DomainNewCustomer {
        DomainNewCustomer::new(
            "John".to_string(),
            "Smith".to_string(),
            "john@example.com".to_string(),
            "Password01@".to_string(),
        )
    }

    #[test]
    fn from_domain_new_creates_newcustomer() {
        let domain = sample_domain_new();
        let new: NewCustomer = (&domain).into();
        assert_eq!(new.first_name, domain.first_name);
        assert_eq!(new.surname, domain.surname);
        assert_eq!(new.email, domain.email);
        assert_eq!(new.password, domain.password);
        assert_eq!(new.created, domain.created);
    }

    #[test]
    fn from_domain_update_creates_updatecustomer() {
        let domain = DomainUpdateCustomer::new(
            "Jane".to_string(),
            "Doe".to_string(),
            "jane@example.com".to_string(),
            "Password02@".to_string(),
        );
        let update: UpdateCustomer = (&domain).into();
        assert_eq!(update.first_name, "Jane");
        assert_eq!(update.surname, "Doe");
        assert_eq!(update.email, "jane@example.com");
        assert_eq!(update.password, "Password02@");
        assert_eq!(update.updated, domain.updated);
    }

    #[test]
    fn customer_into_domain() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let db_customer = Customer {
            id: 1,
            first_name: "f".to_string(),
            surname: "s".to_string(),
            email: "e@example.com".to_string(),
            password: "p".to_string(),
            created: now,
            updated: None,
        };
        let domain: DomainCustomer = db_customer.into();
        assert_eq!(domain.id, 1);
        assert_eq!(domain.first_name, "f");
        assert_eq!(domain.surname, "s");
        assert_eq!(domain.email, "e@example.com");
        assert_eq!(domain.password, "p");
        assert_eq!(domain.created, now);
        assert_eq!(domain.updated, None);
    }
}
