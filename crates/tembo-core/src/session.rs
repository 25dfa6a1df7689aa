//! Session identity and its persistence.
//!
//! The signed-in identity is an explicit [`SessionContext`] value: it is
//! created at sign-in, handed to whatever needs it, persisted by a
//! [`SessionStore`], and cleared at sign-out.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AdminError, Result};
use crate::models::{StaffInfo, StaffProfile};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Who is signed in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaffIdentity {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<StaffInfo> for StaffIdentity {
    fn from(info: StaffInfo) -> Self {
        Self {
            id: info.id,
            email: info.email,
            name: info.name,
            role: info.role,
        }
    }
}

impl StaffIdentity {
    /// Identity refreshed from an updated profile, keeping known values
    /// where the profile has none.
    pub fn updated_from(&self, profile: &StaffProfile) -> Self {
        let name = profile.full_name();
        Self {
            id: if profile.id.is_empty() {
                self.id.clone()
            } else {
                profile.id.clone()
            },
            email: if profile.email.is_empty() {
                self.email.clone()
            } else {
                profile.email.clone()
            },
            name: if name.is_empty() { self.name.clone() } else { name },
            role: if profile.role.is_empty() {
                self.role.clone()
            } else {
                profile.role.clone()
            },
        }
    }
}

/// The access/refresh cookie pair issued by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTokens {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl SessionTokens {
    pub fn has_any(&self) -> bool {
        self.access_token.is_some() || self.refresh_token.is_some()
    }

    /// `Cookie` header value carrying the tokens, if any.
    pub fn cookie_header(&self) -> Option<String> {
        let pairs: Vec<String> = [
            (ACCESS_TOKEN_COOKIE, &self.access_token),
            (REFRESH_TOKEN_COOKIE, &self.refresh_token),
        ]
        .iter()
        .filter_map(|(name, value)| value.as_ref().map(|value| format!("{name}={value}")))
        .collect();
        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }

    /// Take any token the backend set on a response.
    pub fn absorb(&mut self, name: &str, value: &str) -> bool {
        let slot = match name {
            ACCESS_TOKEN_COOKIE => &mut self.access_token,
            REFRESH_TOKEN_COOKIE => &mut self.refresh_token,
            _ => return false,
        };
        *slot = if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
        true
    }
}

/// Everything known about the current session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionContext {
    pub staff: StaffIdentity,
    #[serde(default)]
    pub tokens: SessionTokens,
}

impl SessionContext {
    pub fn new(staff: StaffIdentity, tokens: SessionTokens) -> Self {
        Self { staff, tokens }
    }
}

/// JSON file holding the session between invocations.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_STATE_HOME/tembo/session.json`.
    pub fn default_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("tembo")
            .place_state_file("session.json")
            .map_err(|e| AdminError::XdgDirectory(e.to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored session, or `None` if nobody is signed in.
    pub fn load(&self) -> Result<Option<SessionContext>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AdminError::file_system(&self.path, e)),
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&contents)?))
    }

    pub fn save(&self, context: &SessionContext) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| AdminError::file_system(parent, e))?;
        }
        let contents = serde_json::to_string_pretty(context)?;
        self.write_private(contents.as_bytes())
            .map_err(|e| AdminError::file_system(&self.path, e))?;
        log::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    /// Write the file readable by its owner only; it holds live tokens.
    fn write_private(&self, contents: &[u8]) -> std::io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        std::os::unix::fs::OpenOptionsExt::mode(&mut options, 0o600);
        let mut file = options.open(&self.path)?;
        // The mode only applies when the file is created.
        #[cfg(unix)]
        file.set_permissions(std::os::unix::fs::PermissionsExt::from_mode(0o600))?;
        file.write_all(contents)?;
        file.sync_all()
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AdminError::file_system(&self.path, e)),
        }
    }
}
