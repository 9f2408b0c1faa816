//! Capture of "where" and "with what environment" a command ran
//!
//! The history manager consults one [`LocationGetter`] and one
//! [`EnvironmentGetter`] per insert. The defaults read the real process
//! state; the fixed variants pin a value, which is what tests and the
//! `--directory` override use.

use crate::error::Result;
use std::env;

/// Source of the location a command ran in
pub trait LocationGetter {
    /// Resolve the current location
    fn get(&self) -> Result<String>;
}

/// Source of the environment snapshot stored with a command
pub trait EnvironmentGetter {
    /// Resolve the current environment as `KEY=VALUE` strings
    fn get(&self) -> Result<Vec<String>>;
}

/// Reads the process working directory
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentDirectory;

impl LocationGetter for CurrentDirectory {
    fn get(&self) -> Result<String> {
        let dir = env::current_dir()?;
        Ok(dir.to_string_lossy().to_string())
    }
}

/// Reads the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentGetter for ProcessEnvironment {
    fn get(&self) -> Result<Vec<String>> {
        Ok(env::vars_os()
            .map(|(key, value)| format!("{}={}", key.to_string_lossy(), value.to_string_lossy()))
            .collect())
    }
}

/// Always reports the same location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocation(pub String);

impl FixedLocation {
    pub fn new<S: Into<String>>(location: S) -> Self {
        Self(location.into())
    }
}

impl LocationGetter for FixedLocation {
    fn get(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Always reports the same environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedEnvironment(pub Vec<String>);

impl FixedEnvironment {
    pub fn new(env: Vec<String>) -> Self {
        Self(env)
    }
}

impl EnvironmentGetter for FixedEnvironment {
    fn get(&self) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}
