use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::avatar::{color_for, initials, AvatarColor};
use crate::models::{AvatarAsset, Contact};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Assets path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to read assets directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Avatar asset handles that resolve to a file on disk.
#[derive(Debug, Clone, Default)]
pub struct AvatarCatalog {
    handles: HashSet<String>,
}

impl AvatarCatalog {
    /// A catalog in which nothing resolves.
    pub fn empty() -> Self {
        AvatarCatalog::default()
    }

    /// Collect the file names of the regular files directly inside `dir`.
    pub fn scan(dir: &Path) -> Result<Self, AssetError> {
        if !dir.is_dir() {
            return Err(AssetError::NotADirectory(dir.to_path_buf()));
        }

        let io_err = |source: std::io::Error| AssetError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut handles = HashSet::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if !entry.file_type().map_err(io_err)?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                debug!("Found avatar asset {}", name);
                handles.insert(name.to_string());
            }
        }

        info!("Loaded {} avatar assets from {}", handles.len(), dir.display());
        Ok(AvatarCatalog { handles })
    }

    pub fn resolves(&self, asset: &AvatarAsset) -> bool {
        self.handles.contains(asset.handle())
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// How a contact's avatar is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarView {
    Image(AvatarAsset),
    Placeholder { color: AvatarColor, initials: String },
}

impl AvatarView {
    /// Uses the contact's image when it resolves, otherwise the name-derived placeholder.
    pub fn for_contact(contact: &Contact, catalog: &AvatarCatalog) -> Self {
        match &contact.avatar {
            Some(asset) if catalog.resolves(asset) => AvatarView::Image(asset.clone()),
            _ => AvatarView::Placeholder {
                color: color_for(&contact.name),
                initials: initials(&contact.name),
            },
        }
    }
}
