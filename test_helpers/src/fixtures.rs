//! Fixture values for exercising the injector.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use fixture_inject::{Object, ProviderError, Value, ValueProvider};
use tempfile::TempDir;

/// A temporary directory that lives as long as the fixture.
#[derive(Debug)]
pub struct TempDirFixture {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl TempDirFixture {
    /// Creates a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path is not UTF-8: {}", path.display()))?;
        Ok(Self { _dir: dir, path })
    }

    /// Path of the directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// A provider yielding the directory path as an `Arc<Utf8PathBuf>`.
    #[must_use]
    pub fn provider(&self) -> DirectoryProvider {
        DirectoryProvider {
            path: self.path.clone(),
        }
    }
}

/// Yields a directory path when asked.
#[derive(Clone, Debug)]
pub struct DirectoryProvider {
    path: Utf8PathBuf,
}

impl ValueProvider for DirectoryProvider {
    fn provide(&self) -> Result<Option<Value>, ProviderError> {
        Ok(Some(Value::object(Arc::new(self.path.clone()))))
    }
}

/// A provider that always fails with `message`.
#[derive(Clone, Copy, Debug)]
pub struct FailingProvider {
    /// Message carried by the provider error.
    pub message: &'static str,
}

impl ValueProvider for FailingProvider {
    fn provide(&self) -> Result<Option<Value>, ProviderError> {
        Err(self.message.into())
    }
}

/// A provider yielding a fixed value and counting how often it is asked.
#[derive(Clone, Debug)]
pub struct CountingProvider {
    value: Option<Value>,
    calls: Rc<Cell<usize>>,
}

impl CountingProvider {
    /// Wraps `value`, returning the provider and a shared call counter.
    #[must_use]
    pub fn new(value: Option<Value>) -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (
            Self {
                value,
                calls: Rc::clone(&calls),
            },
            calls,
        )
    }
}

impl ValueProvider for CountingProvider {
    fn provide(&self) -> Result<Option<Value>, ProviderError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.value.clone())
    }
}

/// Yields increasing `i64` identifiers, starting at `first`.
#[derive(Debug)]
pub struct SequenceProvider {
    next: Cell<i64>,
}

impl SequenceProvider {
    /// Starts the sequence at `first`.
    #[must_use]
    pub const fn starting_at(first: i64) -> Self {
        Self {
            next: Cell::new(first),
        }
    }
}

impl ValueProvider for SequenceProvider {
    fn provide(&self) -> Result<Option<Value>, ProviderError> {
        let id = self.next.get();
        self.next.set(id + 1);
        Ok(Some(Value::Long(id)))
    }
}

/// Storage abstraction used to exercise trait-typed members.
pub trait Repository {
    /// Name the repository was created with.
    fn name(&self) -> &str;
}

/// In-memory [`Repository`].
#[derive(Debug, PartialEq, Eq)]
pub struct MemoryRepository {
    name: String,
}

impl MemoryRepository {
    /// Creates a repository called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Repository for MemoryRepository {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A [`MemoryRepository`] object assignable to both `Arc<MemoryRepository>`
/// and `Arc<dyn Repository>` members.
#[must_use]
pub fn repository(name: &str) -> Object {
    let shared = Arc::new(MemoryRepository::new(name));
    Object::new(Arc::clone(&shared)).with_view(shared as Arc<dyn Repository>)
}
