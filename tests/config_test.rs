//! Configuration parsing from environment variables.
//!
//! Note: these tests modify global environment variables and must run
//! serially.

use pretty_assertions::assert_eq;
use serial_test::serial;
use serptrack::config::{SchedulerConfig, SerpConfig};
use std::time::Duration;

#[test]
#[serial]
fn scheduler_config_defaults() {
    std::env::remove_var("SCHEDULER_ENABLED");
    std::env::remove_var("SCHEDULER_INTERVAL_SECS");
    std::env::remove_var("SCHEDULER_BATCH_SIZE");

    let config = SchedulerConfig::from_env();

    assert!(config.enabled);
    assert_eq!(config.interval, Duration::from_secs(86400));
    assert_eq!(config.batch_size, 20);
}

#[test]
#[serial]
fn scheduler_config_custom_values() {
    std::env::set_var("SCHEDULER_ENABLED", "false");
    std::env::set_var("SCHEDULER_INTERVAL_SECS", "3600");
    std::env::set_var("SCHEDULER_BATCH_SIZE", "5");

    let config = SchedulerConfig::from_env();

    assert!(!config.enabled);
    assert_eq!(config.interval, Duration::from_secs(3600));
    assert_eq!(config.batch_size, 5);

    std::env::remove_var("SCHEDULER_ENABLED");
    std::env::remove_var("SCHEDULER_INTERVAL_SECS");
    std::env::remove_var("SCHEDULER_BATCH_SIZE");
}

#[test]
#[serial]
fn scheduler_config_invalid_values_use_defaults() {
    std::env::set_var("SCHEDULER_INTERVAL_SECS", "not-a-number");
    std::env::set_var("SCHEDULER_BATCH_SIZE", "lots");

    let config = SchedulerConfig::from_env();

    assert_eq!(config.interval, Duration::from_secs(86400));
    assert_eq!(config.batch_size, 20);

    std::env::remove_var("SCHEDULER_INTERVAL_SECS");
    std::env::remove_var("SCHEDULER_BATCH_SIZE");
}

#[test]
#[serial]
fn scheduler_batch_size_clamps_to_at_least_one() {
    std::env::set_var("SCHEDULER_BATCH_SIZE", "-5");
    assert_eq!(SchedulerConfig::from_env().batch_size, 1);

    std::env::set_var("SCHEDULER_BATCH_SIZE", "0");
    assert_eq!(SchedulerConfig::from_env().batch_size, 1);

    std::env::remove_var("SCHEDULER_BATCH_SIZE");
}

#[test]
#[serial]
fn serp_config_timeout() {
    std::env::remove_var("SERP_REQUEST_TIMEOUT_SECS");
    assert_eq!(
        SerpConfig::from_env().request_timeout,
        Duration::from_secs(30)
    );

    std::env::set_var("SERP_REQUEST_TIMEOUT_SECS", "10");
    assert_eq!(
        SerpConfig::from_env().request_timeout,
        Duration::from_secs(10)
    );
    std::env::remove_var("SERP_REQUEST_TIMEOUT_SECS");
}
