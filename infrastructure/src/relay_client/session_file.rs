//! Session id persisted in a small file under the user data directory.

use genie_application::ports::relay_client::ClientError;
use genie_application::ports::session_id_store::SessionIdStore;
use genie_domain::SessionId;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "gift-genie";
const FILE_NAME: &str = "session_id";

pub struct FileSessionIdStore {
    path: PathBuf,
}

impl FileSessionIdStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_DATA_HOME/gift-genie/session_id` or the platform equivalent.
    pub fn default_location() -> Option<Self> {
        dirs::data_dir().map(|dir| Self::new(dir.join(APP_DIR).join(FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionIdStore for FileSessionIdStore {
    fn load(&self) -> Option<SessionId> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let id = content.trim();
        (!id.is_empty()).then(|| SessionId::new(id))
    }

    fn save(&self, id: &SessionId) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ClientError::Storage(e.to_string()))?;
        }
        std::fs::write(&self.path, id.as_str()).map_err(|e| ClientError::Storage(e.to_string()))
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(e.to_string())),
        }
    }
}
