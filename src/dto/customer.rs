//! Response shapes for customer endpoints. The password never leaves the
//! service.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::customer::Customer;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponseDto {
    pub id: i32,
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub created: NaiveDateTime,
    pub updated: Option<NaiveDateTime>,
}

impl From<Customer> for CustomerResponseDto {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            surname: customer.surname,
            email: customer.email,
            created: customer.created,
            updated: customer.updated,
        }
    }
}

/// Body of a successful create.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CreatedCustomerDto {
    pub id: i32,
}
