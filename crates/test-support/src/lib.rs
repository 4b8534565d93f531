//! Helpers shared by tests that touch process-wide state (environment
//! variables, the asset directory).

use std::{
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, OnceLock},
};

pub const ASSET_DIR_ENV: &str = "TRACKFLOW_ASSET_DIR";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

pub fn test_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Fresh directory under the system temp dir that outlives the call.
pub fn temp_root(prefix: &str) -> PathBuf {
    tempfile::Builder::new()
        .prefix(&format!("trackflow-{prefix}-"))
        .tempdir()
        .expect("create temp dir")
        .keep()
}

/// Sets environment variables for the lifetime of the guard and restores the
/// previous values on drop. Holding the guard serializes env-mutating tests.
pub struct TestEnvGuard {
    _lock: MutexGuard<'static, ()>,
    previous: Vec<(String, Option<String>)>,
}

impl TestEnvGuard {
    pub fn new(temp_root: &Path, db_url: String) -> Self {
        let root = temp_root.to_string_lossy().into_owned();
        Self::with_vars(&[(ASSET_DIR_ENV, root.as_str()), (DATABASE_URL_ENV, db_url.as_str())])
    }

    pub fn with_vars(vars: &[(&str, &str)]) -> Self {
        let lock = test_lock().lock().unwrap_or_else(|err| err.into_inner());
        let mut previous = Vec::with_capacity(vars.len());
        for (key, value) in vars {
            previous.push((key.to_string(), std::env::var(key).ok()));
            // SAFETY: tests using TestEnvGuard are serialized by test_lock.
            unsafe {
                std::env::set_var(key, value);
            }
        }

        Self {
            _lock: lock,
            previous,
        }
    }
}

impl Drop for TestEnvGuard {
    fn drop(&mut self) {
        // SAFETY: tests using TestEnvGuard are serialized by test_lock.
        unsafe {
            for (key, value) in self.previous.drain(..).rev() {
                match value {
                    Some(value) => std::env::set_var(&key, value),
                    None => std::env::remove_var(&key),
                }
            }
        }
    }
}
