//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::customer::Customer;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CustomerChangeSet, CustomerFilter, CustomerReader, CustomerWriter, SavedChanges,
};

mock! {
    pub Repository {}

    impl CustomerReader for Repository {
        fn get_customer_by_filter(
            &self,
            filter: &CustomerFilter,
        ) -> RepositoryResult<Option<Customer>>;
        fn list_customers(
            &self,
            filter: &CustomerFilter,
        ) -> RepositoryResult<(usize, Vec<Customer>)>;
    }

    impl CustomerWriter for Repository {
        fn save_changes(&self, changes: CustomerChangeSet) -> RepositoryResult<SavedChanges>;
    }
}
