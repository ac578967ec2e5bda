//! Embedded PostgreSQL helpers shared by the database-backed suites.
//!
//! Every suite borrows one process-wide cluster and provisions a fresh,
//! migrated database per test so rows never leak between cases.

use std::time::Duration;

use exercise_log::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};

const CLUSTER_ATTEMPTS: usize = 5;
const CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// True when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes` (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker line when skipping is allowed, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("embedded PostgreSQL unavailable: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// The shared cluster, started on first use.
///
/// Bootstrap can race with a cluster still shutting down from a previous
/// binary, so start-up is retried a few times.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= CLUSTER_ATTEMPTS => return Err(error.to_string()),
            Err(_) => {
                std::thread::sleep(CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// A throwaway database with the exercise log schema applied.
pub fn provision_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let name = format!("test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("create database: {err}"))?;
    let url = database.url().to_string();
    run_pending_migrations(&url).map_err(|err| format!("migrate {url}: {err}"))?;
    Ok(database)
}
