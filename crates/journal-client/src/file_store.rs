//! Directory-backed token store for native shells.
//!
//! Each key is a file in a capability-scoped directory. Writes go to a
//! hidden temporary file that is renamed over the target, so a crash never
//! leaves a half-written token behind.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Component, Utf8Path};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

use crate::error::StoreError;
use crate::session::TokenStore;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Token store keeping one file per key inside a directory.
///
/// # Examples
/// ```
/// use journal_client::{FileTokenStore, TokenStore};
///
/// let dir = std::env::temp_dir().join(format!("journal-client-doc-{}", std::process::id()));
/// std::fs::create_dir_all(&dir)?;
/// let store = FileTokenStore::open(&dir)?;
/// store.set("um.token", "a.b.c")?;
/// assert_eq!(store.get("um.token")?.as_deref(), Some("a.b.c"));
/// store.remove("um.token")?;
/// # std::fs::remove_dir_all(&dir)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct FileTokenStore {
    dir: Dir,
}

impl FileTokenStore {
    /// Open an existing directory.
    ///
    /// # Errors
    /// Returns [`io::Error`] if the directory cannot be opened.
    pub fn open(path: impl AsRef<std::path::Path>) -> io::Result<Self> {
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self { dir })
    }

    /// Wrap an already opened directory.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }
}

fn io_error(key: &str, err: &io::Error) -> StoreError {
    StoreError::Io {
        key: key.to_owned(),
        message: err.to_string(),
    }
}

/// Accept only a single normal path component, so keys cannot escape the
/// directory or name hidden temporaries.
fn file_name(key: &str) -> Result<&str, StoreError> {
    let mut components = Utf8Path::new(key).components();
    match (components.next(), components.next()) {
        (Some(Utf8Component::Normal(name)), None) if !name.starts_with('.') => Ok(name),
        _ => Err(StoreError::InvalidKey {
            key: key.to_owned(),
        }),
    }
}

impl FileTokenStore {
    fn write_atomic(&self, name: &str, contents: &str) -> io::Result<()> {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(".{name}.tmp.{}.{counter}", std::process::id());

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let written = self.dir.open_with(&tmp_name, &options).and_then(|mut file| {
            file.write_all(contents.as_bytes())?;
            file.sync_all()
        });
        let renamed = written.and_then(|()| self.dir.rename(&tmp_name, &self.dir, name));
        if renamed.is_err() {
            // The temporary may never have been created.
            drop(self.dir.remove_file(&tmp_name));
        }
        renamed
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let name = file_name(key)?;
        match self.dir.read_to_string(name) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(key, &err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let name = file_name(key)?;
        self.write_atomic(name, value)
            .map_err(|err| io_error(key, &err))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let name = file_name(key)?;
        match self.dir.remove_file(name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(key, &err)),
        }
    }
}
