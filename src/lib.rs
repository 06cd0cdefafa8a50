pub mod assets;
pub mod avatar;
pub mod directory;
pub mod models;

// Re-export main types for convenience
pub use assets::{AssetError, AvatarCatalog, AvatarView};
pub use avatar::{color_for, AvatarColor};
pub use directory::ContactDirectory;
pub use models::*;
