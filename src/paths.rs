use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Location of the Roblox Studio plugins folder relative to the home directory.
pub const PLUGINS_SUBPATH: [&str; 4] = ["AppData", "Local", "Roblox", "Plugins"];

/// Returns the plugins folder under `home`.
pub fn plugins_dir(home: impl AsRef<Path>) -> PathBuf {
    PLUGINS_SUBPATH
        .iter()
        .fold(home.as_ref().to_path_buf(), |path, comp| path.join(comp))
}

pub fn home_directory() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        log::error!("Failed to get the home directory of the current user");
        Error::HomeNotFound
    })
}

pub fn current_working_directory() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

/// Makes `path` absolute against `cwd` and resolves `.` and `..` lexically.
/// The filesystem is never consulted so the path does not need to exist.
pub fn weakly_canonical(path: impl AsRef<Path>, cwd: impl Into<PathBuf>) -> PathBuf {
    // Adapted from
    // https://github.com/rust-lang/cargo/blob/fede83ccf973457de319ba6fa0e36ead454d2e20/src/cargo/util/paths.rs#L61
    let path = path.as_ref();

    let mut components = path.components().peekable();
    let mut canonical = cwd.into();
    let prefix = if let Some(c @ Component::Prefix(..)) = components.peek().cloned() {
        components.next();
        PathBuf::from(c.as_os_str())
    } else {
        PathBuf::new()
    };

    for component in components {
        match component {
            Component::Prefix(_) => unreachable!(),
            Component::RootDir => {
                canonical = prefix.clone();
                canonical.push(component.as_os_str())
            }
            Component::CurDir => {}
            Component::ParentDir => {
                canonical.pop();
            }
            Component::Normal(p) => canonical.push(p),
        };
    }

    canonical
}
