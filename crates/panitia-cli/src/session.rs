//! Local cache of the admin secret, so reopening the dashboard does not ask
//! for it again. Logging out deletes the file.

use std::{
  fs, io,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const FILE_NAME: &str = "session.toml";

#[derive(Debug, Serialize, Deserialize)]
struct Session {
  admin_password: String,
}

/// The session file at a fixed path.
#[derive(Debug, Clone)]
pub struct SessionFile {
  path: PathBuf,
}

impl SessionFile {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  /// `$XDG_CACHE_HOME/panitia/session.toml`, falling back to
  /// `~/.cache/panitia/session.toml`, then the working directory.
  pub fn default_path() -> PathBuf {
    let cache = std::env::var_os("XDG_CACHE_HOME")
      .map(PathBuf::from)
      .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".cache")));
    match cache {
      Some(dir) => dir.join("panitia").join(FILE_NAME),
      None => PathBuf::from(FILE_NAME),
    }
  }

  pub fn path(&self) -> &Path { &self.path }

  /// The cached secret, or `None` when there is no session.
  pub fn load(&self) -> Result<Option<String>> {
    let raw = match fs::read_to_string(&self.path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(e) => {
        return Err(e).with_context(|| format!("reading {}", self.path.display()));
      }
    };
    let session: Session = toml::from_str(&raw)
      .with_context(|| format!("parsing {}", self.path.display()))?;
    Ok(Some(session.admin_password).filter(|p| !p.is_empty()))
  }

  pub fn save(&self, admin_password: &str) -> Result<()> {
    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent)
        .with_context(|| format!("creating {}", parent.display()))?;
    }
    let raw = toml::to_string(&Session { admin_password: admin_password.to_owned() })
      .context("serialising session")?;
    fs::write(&self.path, raw)
      .with_context(|| format!("writing {}", self.path.display()))?;
    restrict_permissions(&self.path)
  }

  /// Remove the session. A missing file is not an error.
  pub fn clear(&self) -> Result<()> {
    match fs::remove_file(&self.path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e).with_context(|| format!("removing {}", self.path.display())),
    }
  }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;
  fs::set_permissions(path, fs::Permissions::from_mode(0o600))
    .with_context(|| format!("restricting {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> { Ok(()) }

#[cfg(test)]
mod tests {
  use super::*;

  fn temp_session(name: &str) -> SessionFile {
    let dir = std::env::temp_dir().join(format!("panitia-cli-{}-{name}", std::process::id()));
    SessionFile::new(dir.join("nested").join(FILE_NAME))
  }

  #[test]
  fn missing_file_is_no_session() {
    let s = temp_session("missing");
    assert_eq!(s.load().unwrap(), None);
    s.clear().unwrap();
  }

  #[test]
  fn save_load_clear() {
    let s = temp_session("roundtrip");
    s.save("rahasia").unwrap();
    assert_eq!(s.load().unwrap().as_deref(), Some("rahasia"));

    s.clear().unwrap();
    assert_eq!(s.load().unwrap(), None);
  }

  #[test]
  fn garbage_is_an_error() {
    let s = temp_session("garbage");
    fs::create_dir_all(s.path().parent().unwrap()).unwrap();
    fs::write(s.path(), "not = [toml").unwrap();
    assert!(s.load().is_err());
    s.clear().unwrap();
  }
}
