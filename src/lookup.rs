//! Point lookups by IP address.
//!
//! [`LookupService`] validates the caller's address string and asks a
//! [`LocationStore`] for the matching record.

use std::future::Future;
use std::net::IpAddr;

use sqlx::SqlitePool;

use crate::error_handling::{DatabaseError, LookupError};
use crate::models::StoredGeolocation;
use crate::storage;

/// Storage backend for point lookups.
pub trait LocationStore {
    /// Returns the record for `ip`, or `None` if the address is unknown.
    fn lookup_location(
        &self,
        ip: IpAddr,
    ) -> impl Future<Output = Result<Option<StoredGeolocation>, DatabaseError>> + Send;
}

impl LocationStore for SqlitePool {
    async fn lookup_location(
        &self,
        ip: IpAddr,
    ) -> Result<Option<StoredGeolocation>, DatabaseError> {
        storage::lookup_location(self, ip).await
    }
}

/// Lookup facade used by the HTTP server.
#[derive(Debug, Clone)]
pub struct LookupService<S> {
    store: S,
}

impl<S: LocationStore> LookupService<S> {
    pub fn new(store: S) -> Self {
        LookupService { store }
    }

    /// Looks up the location stored for `ip`.
    ///
    /// # Errors
    ///
    /// - [`LookupError::BadIpAddressFormat`] if `ip` is not an IPv4/IPv6 literal
    /// - [`LookupError::Database`] if the store fails (logged here with the address)
    pub async fn lookup_location(
        &self,
        ip: &str,
    ) -> Result<Option<StoredGeolocation>, LookupError> {
        let addr: IpAddr = ip.parse().map_err(|_| LookupError::BadIpAddressFormat)?;

        self.store.lookup_location(addr).await.map_err(|e| {
            log::error!("cannot get location from database for {}: {}", addr, e);
            LookupError::Database(e)
        })
    }
}
