use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::customer::{NewCustomer, UpdateCustomer};
use crate::domain::types::{CustomerEmail, CustomerId, normalize_email};
use crate::forms::FormError;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, MAX_ITEMS_PER_PAGE};
use crate::repository::CustomerFilter;

/// Requires upper- and lower-case letters, a digit and a special character.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    if has_upper && has_lower && has_digit && has_special {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength").with_message(
            "password must contain upper and lower case letters, a digit and a special character"
                .into(),
        ))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// Body of `POST /customer` and `PUT /customer/{id}`.
///
/// Unknown fields (such as `id` or `created`) are rejected during binding.
pub struct CustomerRequestDto {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "first name is required (max 100 characters)"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "surname is required (max 100 characters)"))]
    pub surname: String,
    #[serde(default)]
    #[validate(
        email(message = "email must be a valid address"),
        length(max = 100, message = "email must be at most 100 characters")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(
        length(min = 8, max = 2000, message = "password must be 8 to 2000 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
}

impl TryFrom<&CustomerRequestDto> for NewCustomer {
    type Error = FormError;

    fn try_from(dto: &CustomerRequestDto) -> Result<Self, Self::Error> {
        dto.validate()?;
        let email = CustomerEmail::new(&dto.email).map_err(|_| FormError::InvalidEmail)?;

        Ok(NewCustomer::new(
            dto.first_name.clone(),
            dto.surname.clone(),
            email.into_inner(),
            dto.password.clone(),
        ))
    }
}

impl TryFrom<&CustomerRequestDto> for UpdateCustomer {
    type Error = FormError;

    fn try_from(dto: &CustomerRequestDto) -> Result<Self, Self::Error> {
        dto.validate()?;
        let email = CustomerEmail::new(&dto.email).map_err(|_| FormError::InvalidEmail)?;

        Ok(UpdateCustomer::new(
            dto.first_name.clone(),
            dto.surname.clone(),
            email.into_inner(),
            dto.password.clone(),
        ))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Query string of `GET /customer`.
pub struct CustomerFilterDto {
    #[validate(range(min = 1, message = "id must be greater than zero"))]
    pub id: Option<i32>,
    #[validate(length(max = 100, message = "email filter must be at most 100 characters"))]
    pub email: Option<String>,
    /// Capped at `i64::MAX / MAX_ITEMS_PER_PAGE` so the row offset fits in `i64`.
    #[validate(range(
        min = 1,
        max = 92_233_720_368_547_758_i64,
        message = "page must be between 1 and 92233720368547758"
    ))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100, message = "pageSize must be between 1 and 100"))]
    pub page_size: Option<i64>,
}

impl CustomerFilterDto {
    /// Filter for a single customer identified by `id`.
    pub fn by_id(id: CustomerId) -> Self {
        Self {
            id: Some(id.get()),
            ..Self::default()
        }
    }

    /// Requested page, defaulting to the first one.
    pub fn page(&self) -> usize {
        self.page.map_or(1, |page| page.max(1) as usize)
    }

    /// Requested page size, defaulting to [`DEFAULT_ITEMS_PER_PAGE`].
    pub fn page_size(&self) -> usize {
        self.page_size.map_or(DEFAULT_ITEMS_PER_PAGE, |size| {
            size.clamp(1, MAX_ITEMS_PER_PAGE as i64) as usize
        })
    }

    fn base_filter(&self) -> Result<CustomerFilter, FormError> {
        self.validate()?;

        let mut filter = CustomerFilter::new();
        if let Some(id) = self.id {
            filter = filter.id(CustomerId::new(id).map_err(|_| FormError::InvalidCustomerId)?);
        }
        Ok(filter)
    }

    /// Filter for a paginated list; the email is matched as a substring.
    pub fn to_list_filter(&self) -> Result<CustomerFilter, FormError> {
        let mut filter = self.base_filter()?;
        if let Some(email) = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            filter = filter.email(email);
        }
        Ok(filter.paginate(self.page(), self.page_size()))
    }

    /// Filter for a single-record lookup; the email is matched exactly after
    /// normalization.
    pub fn to_lookup_filter(&self) -> Result<CustomerFilter, FormError> {
        let mut filter = self.base_filter()?;
        if let Some(email) = self.email.as_deref().map(normalize_email).filter(|e| !e.is_empty()) {
            filter = filter.email(email);
        }
        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CustomerRequestDto {
        CustomerRequestDto {
            first_name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            email: "Ada@Example.com".to_string(),
            password: "Password01@".to_string(),
        }
    }

    #[test]
    fn valid_request_converts_into_new_customer() {
        let new: NewCustomer = (&valid_request()).try_into().unwrap();
        assert_eq!(new.email, "ada@example.com");
        assert_eq!(new.first_name, "Ada");
    }

    #[test]
    fn missing_fields_report_each_field() {
        let dto: CustomerRequestDto = serde_json::from_str("{}").unwrap();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("surname"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let body = r#"{"id": 5, "firstName": "A", "surname": "B", "email": "a@b.com", "password": "Password01@"}"#;
        assert!(serde_json::from_str::<CustomerRequestDto>(body).is_err());
    }

    #[test]
    fn weak_password_is_rejected() {
        let mut dto = valid_request();
        dto.password = "password".to_string();

        let result = NewCustomer::try_from(&dto);

        assert!(matches!(result, Err(FormError::Validation(_))));
    }

    #[test]
    fn overlong_names_are_rejected() {
        let mut dto = valid_request();
        dto.surname = "x".repeat(101);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn filter_defaults_to_first_page() {
        let filter = CustomerFilterDto::default().to_list_filter().unwrap();
        let pagination = filter.pagination.unwrap();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, DEFAULT_ITEMS_PER_PAGE);
    }

    #[test]
    fn negative_page_size_is_rejected() {
        let dto = CustomerFilterDto {
            page_size: Some(-1),
            ..CustomerFilterDto::default()
        };
        assert!(matches!(dto.to_list_filter(), Err(FormError::Validation(_))));
    }

    #[test]
    fn page_beyond_addressable_rows_is_rejected() {
        let dto = CustomerFilterDto {
            page: Some(i64::MAX),
            page_size: Some(20),
            ..CustomerFilterDto::default()
        };
        assert!(matches!(dto.to_list_filter(), Err(FormError::Validation(_))));
    }

    #[test]
    fn largest_page_keeps_offset_in_range() {
        let last_page = i64::MAX / MAX_ITEMS_PER_PAGE as i64;
        let dto = CustomerFilterDto {
            page: Some(last_page),
            page_size: Some(MAX_ITEMS_PER_PAGE as i64),
            ..CustomerFilterDto::default()
        };

        let filter = dto.to_list_filter().unwrap();
        let pagination = filter.pagination.unwrap();
        let offset = (pagination.page as i64 - 1).checked_mul(pagination.per_page as i64);

        assert!(offset.is_some());
        assert!(
            CustomerFilterDto {
                page: Some(last_page + 1),
                ..CustomerFilterDto::default()
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn lookup_filter_normalizes_email() {
        let dto = CustomerFilterDto {
            email: Some(" Test1@Test.com ".to_string()),
            ..CustomerFilterDto::default()
        };
        let filter = dto.to_lookup_filter().unwrap();
        assert_eq!(filter.email.as_deref(), Some("test1@test.com"));
        assert_eq!(filter.pagination, None);
    }
}
