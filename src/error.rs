use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid plugin name '{0}' : {1}")]
    InvalidPluginName(String, &'static str),
    #[error("Plugin source file not found : {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Plugins directory not found : {}", .0.display())]
    DestinationNotFound(PathBuf),
    #[error("Permission denied : {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("Source and destination are the same file : {}", .0.display())]
    SameFile(PathBuf),
    #[error("Failed to obtain the home directory. Pass it with --home")]
    HomeNotFound,
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
