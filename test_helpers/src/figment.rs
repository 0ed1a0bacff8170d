//! Running configuration tests inside a `figment::Jail`.
//!
//! A jail gives each test its own working directory and environment, so
//! tests can write `*.toml` files and set variables without leaking state.

use anyhow::{Context, Result, anyhow};
use figment::Jail;
use fixture_inject::InjectResult;

/// Runs `test` in a fresh jail and hands back what it produced.
///
/// # Errors
///
/// Fails when the jail cannot be set up or `test` returns an error.
pub fn with_jail<T>(test: impl FnOnce(&mut Jail) -> figment::Result<T>) -> Result<T> {
    let mut produced = None;
    Jail::try_with(|jail| test(jail).map(|value| produced = Some(value)))
        .map_err(|err| anyhow!("jailed configuration test failed: {err}"))?;
    produced.context("jail finished without running the test")
}

/// Lets injection results use `?` inside a jail closure.
pub trait InjectResultExt<T> {
    /// Re-raises an injection error as a `figment` error carrying its message.
    ///
    /// # Errors
    ///
    /// Returns the injection error rendered into a [`figment::Error`].
    fn into_jail_result(self) -> figment::Result<T>;
}

impl<T> InjectResultExt<T> for InjectResult<T> {
    fn into_jail_result(self) -> figment::Result<T> {
        self.map_err(|err| figment::Error::from(err.to_string()))
    }
}
