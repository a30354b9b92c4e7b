//! Diesel implementation of the customer repository traits.

use diesel::sqlite::Sqlite;
use diesel::{Connection, prelude::*};

use crate::{
    domain::{customer::Customer, types::CustomerId},
    models::customer::{
        Customer as DbCustomer, NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
    },
    repository::{
        CustomerChangeSet, CustomerFilter, CustomerReader, CustomerWriter, DieselRepository,
        Pagination, SavedChanges, StagedChange,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::customers,
};

/// Escapes `LIKE` wildcards so the term is matched literally as a substring.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// `LIMIT` and `OFFSET` for a page, or `None` when the offset overflows.
fn page_window(pagination: &Pagination) -> Option<(i64, i64)> {
    let limit = i64::try_from(pagination.per_page.max(1)).ok()?;
    let skipped = i64::try_from(pagination.page.max(1) - 1).ok()?;
    Some((limit, skipped.checked_mul(limit)?))
}

/// Builds the list query shared by the page fetch and the total count.
fn filtered(filter: &CustomerFilter) -> customers::BoxedQuery<'static, Sqlite> {
    let mut query = customers::table.into_boxed();

    if let Some(id) = filter.id {
        query = query.filter(customers::id.eq(id.get()));
    }

    if let Some(email) = &filter.email {
        query = query.filter(customers::email.like(contains_pattern(email)).escape('\\'));
    }

    query
}

impl CustomerReader for DieselRepository {
    fn get_customer_by_filter(
        &self,
        filter: &CustomerFilter,
    ) -> RepositoryResult<Option<Customer>> {
        let mut conn = self.conn()?;

        let customer = if let Some(id) = filter.id {
            customers::table
                .find(id.get())
                .first::<DbCustomer>(&mut conn)
                .optional()?
        } else if let Some(email) = &filter.email {
            customers::table
                .filter(customers::email.eq(email.as_str()))
                .first::<DbCustomer>(&mut conn)
                .optional()?
        } else {
            None
        };

        Ok(customer.map(Into::into))
    }

    fn list_customers(&self, filter: &CustomerFilter) -> RepositoryResult<(usize, Vec<Customer>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(filter).count().get_result(&mut conn)?;

        let mut items = filtered(filter).order(customers::id.asc());

        if let Some(pagination) = &filter.pagination {
            match page_window(pagination) {
                Some((limit, offset)) => items = items.limit(limit).offset(offset),
                // A page past the addressable range can only be empty.
                None => return Ok((total as usize, Vec::new())),
            }
        }

        let items = items
            .load::<DbCustomer>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Customer>>();

        Ok((total as usize, items))
    }
}

impl CustomerWriter for DieselRepository {
    fn save_changes(&self, changes: CustomerChangeSet) -> RepositoryResult<SavedChanges> {
        let mut conn = self.conn()?;

        conn.transaction::<SavedChanges, RepositoryError, _>(|conn| {
            let mut saved = SavedChanges::default();

            for change in changes {
                match change {
                    StagedChange::Add(new_customer) => {
                        let db_new_customer: DbNewCustomer = (&new_customer).into();
                        let id = diesel::insert_into(customers::table)
                            .values(&db_new_customer)
                            .returning(customers::id)
                            .get_result::<i32>(conn)?;
                        saved.affected += 1;
                        saved.inserted.push(CustomerId::new(id)?);
                    }
                    StagedChange::Update(id, updates) => {
                        let db_updates: DbUpdateCustomer = (&updates).into();
                        let affected = diesel::update(customers::table.find(id.get()))
                            .set(&db_updates)
                            .execute(conn)?;
                        if affected == 0 {
                            return Err(RepositoryError::NotFound);
                        }
                        saved.affected += affected;
                    }
                    StagedChange::Remove(id) => {
                        let affected =
                            diesel::delete(customers::table.find(id.get())).execute(conn)?;
                        if affected == 0 {
                            return Err(RepositoryError::NotFound);
                        }
                        saved.affected += affected;
                    }
                }
            }

            Ok(saved)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_pattern_wraps_term_in_wildcards() {
        assert_eq!(contains_pattern("test"), "%test%");
    }

    #[test]
    fn contains_pattern_escapes_like_metacharacters() {
        assert_eq!(contains_pattern("a_b%c\\d"), "%a\\_b\\%c\\\\d%");
    }

    #[test]
    fn page_window_skips_previous_pages() {
        let window = page_window(&Pagination {
            page: 3,
            per_page: 20,
        });
        assert_eq!(window, Some((20, 40)));
    }

    #[test]
    fn page_window_treats_page_zero_as_first() {
        let window = page_window(&Pagination {
            page: 0,
            per_page: 0,
        });
        assert_eq!(window, Some((1, 0)));
    }

    #[test]
    fn page_window_is_none_when_offset_overflows() {
        let window = page_window(&Pagination {
            page: usize::MAX / 2,
            per_page: 20,
        });
        assert_eq!(window, None);
    }
}
