mod config;
mod error;
mod store;

pub use config::KvConfig;
pub use error::KvError;
pub use store::RestKvStore;

use crate::dao::storage::StorageError;

impl From<KvError> for StorageError {
    fn from(err: KvError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
