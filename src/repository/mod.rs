use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::types::CustomerId;
use crate::repository::errors::RepositoryResult;

pub mod customer;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Query filter shared by single-record lookups and list queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub id: Option<CustomerId>,
    /// Exact match for single lookups, substring match for lists.
    pub email: Option<String>,
    pub pagination: Option<Pagination>,
}

impl CustomerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// A single pending mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum StagedChange {
    Add(NewCustomer),
    Update(CustomerId, UpdateCustomer),
    Remove(CustomerId),
}

/// Mutations staged in memory until [`CustomerWriter::save_changes`] commits
/// them. Staging never touches the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerChangeSet {
    changes: Vec<StagedChange>,
}

impl CustomerChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, customer: NewCustomer) -> &mut Self {
        self.changes.push(StagedChange::Add(customer));
        self
    }

    pub fn update(&mut self, id: CustomerId, updates: UpdateCustomer) -> &mut Self {
        self.changes.push(StagedChange::Update(id, updates));
        self
    }

    pub fn remove(&mut self, id: CustomerId) -> &mut Self {
        self.changes.push(StagedChange::Remove(id));
        self
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn changes(&self) -> &[StagedChange] {
        &self.changes
    }
}

impl IntoIterator for CustomerChangeSet {
    type Item = StagedChange;
    type IntoIter = std::vec::IntoIter<StagedChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

/// Outcome of a committed change set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedChanges {
    /// Total rows inserted, updated or deleted.
    pub affected: usize,
    /// Identifiers generated for staged adds, in staging order.
    pub inserted: Vec<CustomerId>,
}

pub trait CustomerReader {
    fn get_customer_by_filter(&self, filter: &CustomerFilter)
    -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, filter: &CustomerFilter) -> RepositoryResult<(usize, Vec<Customer>)>;
}

pub trait CustomerWriter {
    fn save_changes(&self, changes: CustomerChangeSet) -> RepositoryResult<SavedChanges>;
}

/// Diesel-backed repository sharing a SQLite connection pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}
