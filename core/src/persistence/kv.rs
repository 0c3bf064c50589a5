use std::{
	collections::HashMap,
	fs, io,
	path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::trace;

/// Key-value store error, carrying the file path when the store is file backed.
#[derive(Error, Debug)]
pub enum KvError {
	#[error("file I/O error: {source}; path: '{}'", path.display())]
	FileIO {
		path: Box<Path>,
		#[source]
		source: io::Error,
	},
	#[error("store unavailable: {0}")]
	Unavailable(String),
}

impl KvError {
	pub fn from_std_io_err(path: impl AsRef<Path>, source: io::Error) -> Self {
		Self::FileIO {
			path: path.as_ref().into(),
			source,
		}
	}
}

/// Process-wide string key-value store.
pub trait KvStore {
	fn get(&self, key: &str) -> Result<Option<String>, KvError>;

	fn set(&mut self, key: &str, value: &str) -> Result<(), KvError>;

	/// Removing a missing key is not an error.
	fn remove(&mut self, key: &str) -> Result<(), KvError>;
}

/// One `<key>.json` file per key inside a directory.
///
/// Writes go to a temporary sibling file first and are renamed into place, so a crash mid-write
/// leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileKvStore {
	dir: PathBuf,
}

impl FileKvStore {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	#[must_use]
	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn path_for(&self, key: &str) -> PathBuf {
		self.dir.join(format!("{key}.json"))
	}
}

impl KvStore for FileKvStore {
	fn get(&self, key: &str) -> Result<Option<String>, KvError> {
		let path = self.path_for(key);

		match fs::read_to_string(&path) {
			Ok(value) => Ok(Some(value)),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(e) => Err(KvError::from_std_io_err(path, e)),
		}
	}

	fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
		fs::create_dir_all(&self.dir).map_err(|e| KvError::from_std_io_err(&self.dir, e))?;

		let path = self.path_for(key);
		let tmp_path = path.with_extension("json.tmp");

		if let Err(e) = fs::write(&tmp_path, value) {
			discard_tmp(&tmp_path);
			return Err(KvError::from_std_io_err(&tmp_path, e));
		}
		if let Err(e) = fs::rename(&tmp_path, &path) {
			discard_tmp(&tmp_path);
			return Err(KvError::from_std_io_err(&path, e));
		}
		trace!(?path, bytes = value.len(), "stored key");

		Ok(())
	}

	fn remove(&mut self, key: &str) -> Result<(), KvError> {
		let path = self.path_for(key);

		match fs::remove_file(&path) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(KvError::from_std_io_err(path, e)),
		}
	}
}

fn discard_tmp(tmp_path: &Path) {
	if let Err(e) = fs::remove_file(tmp_path) {
		if e.kind() != io::ErrorKind::NotFound {
			trace!(?tmp_path, error = %e, "failed to remove temporary file");
		}
	}
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
	values: HashMap<String, String>,
}

impl MemoryKvStore {
	pub fn with_values<K: Into<String>, V: Into<String>>(
		values: impl IntoIterator<Item = (K, V)>,
	) -> Self {
		Self {
			values: values
				.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		}
	}
}

impl KvStore for MemoryKvStore {
	fn get(&self, key: &str) -> Result<Option<String>, KvError> {
		Ok(self.values.get(key).cloned())
	}

	fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
		self.values.insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&mut self, key: &str) -> Result<(), KvError> {
		self.values.remove(key);
		Ok(())
	}
}
