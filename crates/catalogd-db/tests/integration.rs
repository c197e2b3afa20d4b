//! Offline unit tests for catalogd-db pool configuration and error types.
//! These tests do not require a live database connection.

use catalogd_core::{AppConfig, Environment};
use catalogd_db::{PoolConfig, StoreError};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        seed_dir: PathBuf::from("./seeds"),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// The display strings below travel in API error envelopes, so handlers rely
/// on them staying put.
#[test]
fn store_error_messages_are_stable() {
    assert_eq!(StoreError::NotFound.to_string(), "product not found");
    assert_eq!(
        StoreError::InvalidCategory.to_string(),
        "category code and name must be non-empty"
    );
    assert_eq!(
        StoreError::UnsupportedFilter("brand".to_string()).to_string(),
        "unsupported filter key: brand"
    );
    assert_eq!(
        StoreError::InvalidFilterValue {
            key: "price".to_string(),
            value: "abc".to_string(),
        }
        .to_string(),
        "invalid value for price filter: abc"
    );
}
