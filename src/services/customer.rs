use crate::domain::customer::{NewCustomer, UpdateCustomer};
use crate::domain::types::CustomerId;
use crate::dto::customer::CustomerResponseDto;
use crate::forms::customer::{CustomerFilterDto, CustomerRequestDto};
use crate::pagination::Paginated;
use crate::repository::{CustomerChangeSet, CustomerFilter, CustomerReader, CustomerWriter};
use crate::services::{ServiceError, ServiceResult};

/// Returns a page of customers whose email contains the requested fragment.
pub fn list_customers<R>(
    repo: &R,
    filter: &CustomerFilterDto,
) -> ServiceResult<Paginated<CustomerResponseDto>>
where
    R: CustomerReader + ?Sized,
{
    let query = filter.to_list_filter()?;
    let (total, customers) = repo.list_customers(&query)?;

    Ok(Paginated::new(customers, total, filter.page(), filter.page_size())
        .map(CustomerResponseDto::from))
}

/// Looks up a single customer by id or exact email. `Ok(None)` when absent.
pub fn get_customer<R>(
    repo: &R,
    filter: &CustomerFilterDto,
) -> ServiceResult<Option<CustomerResponseDto>>
where
    R: CustomerReader + ?Sized,
{
    let query = filter.to_lookup_filter()?;
    if query.id.is_none() && query.email.is_none() {
        return Err(ServiceError::Validation(
            "an id or an email is required".to_string(),
        ));
    }

    let customer = repo.get_customer_by_filter(&query)?;
    Ok(customer.map(CustomerResponseDto::from))
}

/// Rejects `email` when it belongs to a customer other than `owner`.
fn ensure_email_available<R>(repo: &R, email: &str, owner: Option<CustomerId>) -> ServiceResult<()>
where
    R: CustomerReader + ?Sized,
{
    let existing = repo.get_customer_by_filter(&CustomerFilter::new().email(email))?;

    match existing {
        Some(customer) if Some(customer.id) != owner.map(CustomerId::get) => Err(
            ServiceError::Validation("email is already registered".to_string()),
        ),
        _ => Ok(()),
    }
}

fn ensure_exists<R>(repo: &R, id: CustomerId) -> ServiceResult<()>
where
    R: CustomerReader + ?Sized,
{
    match repo.get_customer_by_filter(&CustomerFilter::new().id(id))? {
        Some(_) => Ok(()),
        None => Err(ServiceError::NotFound),
    }
}

/// Creates a customer and returns the identifier assigned by the store.
pub fn create_customer<R>(repo: &R, request: &CustomerRequestDto) -> ServiceResult<CustomerId>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let new_customer = NewCustomer::try_from(request)?;
    ensure_email_available(repo, &new_customer.email, None)?;

    let mut changes = CustomerChangeSet::new();
    changes.add(new_customer);
    let saved = repo.save_changes(changes)?;

    let id = saved.inserted.first().copied().ok_or_else(|| {
        ServiceError::Persistence("store did not return the new customer id".to_string())
    })?;

    log::info!("Created customer {id}");
    Ok(id)
}

/// Replaces the mutable fields of an existing customer.
pub fn update_customer<R>(
    repo: &R,
    id: CustomerId,
    request: &CustomerRequestDto,
) -> ServiceResult<()>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let updates = UpdateCustomer::try_from(request)?;
    ensure_exists(repo, id)?;
    ensure_email_available(repo, &updates.email, Some(id))?;

    let mut changes = CustomerChangeSet::new();
    changes.update(id, updates);
    repo.save_changes(changes)?;

    log::info!("Updated customer {id}");
    Ok(())
}

/// Permanently removes a customer.
pub fn delete_customer<R>(repo: &R, id: CustomerId) -> ServiceResult<()>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    ensure_exists(repo, id)?;

    let mut changes = CustomerChangeSet::new();
    changes.remove(id);
    repo.save_changes(changes)?;

    log::info!("Deleted customer {id}");
    Ok(())
}
