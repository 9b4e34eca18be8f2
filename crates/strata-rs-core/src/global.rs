//! Process-wide configuration slot.
//!
//! Loads replace the published configuration atomically: readers see either
//! the previous snapshot or the new one, never a partial merge. A failed
//! load leaves the previous snapshot in place.

use crate::{Config, LoadError, Loader};
use log::{info, warn};
use parking_lot::{Mutex, RwLock, const_mutex};
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};
use strata_rs_protocol::Value;

static CURRENT: LazyLock<RwLock<Arc<Config>>> =
    LazyLock::new(|| RwLock::new(Arc::new(Config::empty())));

static LOAD_GUARD: Mutex<()> = const_mutex(());

/// Run `loader` and publish the result.
///
/// Returns [`LoadError::LoadInProgress`] if another thread is loading.
pub fn load(loader: &Loader) -> Result<Arc<Config>, LoadError> {
    let Some(_guard) = LOAD_GUARD.try_lock() else {
        warn!("configuration load rejected: another load is running");
        return Err(LoadError::LoadInProgress);
    };
    let config = Arc::new(loader.load()?);
    *CURRENT.write() = Arc::clone(&config);
    info!("published configuration (keys={})", config.document().len());
    Ok(config)
}

/// Snapshot of the published configuration.
pub fn current() -> Arc<Config> {
    Arc::clone(&CURRENT.read())
}

/// Publish an explicit configuration.
pub fn set(config: Config) {
    *CURRENT.write() = Arc::new(config);
}

/// Publish the empty configuration.
pub fn reset() {
    set(Config::empty());
}

/// [`Config::get_string`] against the published configuration.
pub fn get_string(path: &str, fallback: &str) -> String {
    current().get_string(path, fallback)
}

/// [`Config::get_int`] against the published configuration.
pub fn get_int(path: &str, fallback: i64) -> i64 {
    current().get_int(path, fallback)
}

/// [`Config::get_float`] against the published configuration.
pub fn get_float(path: &str, fallback: f64) -> f64 {
    current().get_float(path, fallback)
}

/// [`Config::get_bool`] against the published configuration.
pub fn get_bool(path: &str, fallback: bool) -> bool {
    current().get_bool(path, fallback)
}

/// [`Config::get_any`] against the published configuration.
pub fn get_any(path: &str, fallback: Value) -> Value {
    current().get_any(path, fallback)
}

/// [`Config::get_string_slice`] against the published configuration.
pub fn get_string_slice(path: &str, fallback: Vec<String>) -> Vec<String> {
    current().get_string_slice(path, fallback)
}

/// [`Config::get_int_slice`] against the published configuration.
pub fn get_int_slice(path: &str, fallback: Vec<i64>) -> Vec<i64> {
    current().get_int_slice(path, fallback)
}

/// [`Config::get_float_slice`] against the published configuration.
pub fn get_float_slice(path: &str, fallback: Vec<f64>) -> Vec<f64> {
    current().get_float_slice(path, fallback)
}

/// [`Config::get_bool_slice`] against the published configuration.
pub fn get_bool_slice(path: &str, fallback: Vec<bool>) -> Vec<bool> {
    current().get_bool_slice(path, fallback)
}

/// [`Config::get_string_map`] against the published configuration.
pub fn get_string_map(path: &str, fallback: BTreeMap<String, String>) -> BTreeMap<String, String> {
    current().get_string_map(path, fallback)
}

/// [`Config::get_map`] against the published configuration.
pub fn get_any_map(path: &str, fallback: BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    current().get_map(path, fallback)
}

/// [`Config::get_int_map`] against the published configuration.
pub fn get_int_map(path: &str, fallback: BTreeMap<String, i64>) -> BTreeMap<String, i64> {
    current().get_int_map(path, fallback)
}

/// [`Config::get_float_map`] against the published configuration.
pub fn get_float_map(path: &str, fallback: BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    current().get_float_map(path, fallback)
}

/// [`Config::get_bool_map`] against the published configuration.
pub fn get_bool_map(path: &str, fallback: BTreeMap<String, bool>) -> BTreeMap<String, bool> {
    current().get_bool_map(path, fallback)
}
