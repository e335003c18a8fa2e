use std::{
    ffi::OsStr,
    fmt,
    fs::File,
    io::{ErrorKind, Write},
    path::{Path, PathBuf, MAIN_SEPARATOR},
};

use crate::{paths, Error, Result};

/// Extension of plugin source files.
pub const SOURCE_EXTENSION: &str = "lua";

pub const DEFAULT_PLUGIN_NAME: &str = "MtObjectBrowser";

/// Name of a plugin without its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginName(String);

impl PluginName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name.contains(['/', '\\']) {
            Some("name contains a path separator")
        } else if name == "." || name == ".." {
            Some("name is a relative path component")
        } else if Path::new(&name).extension() == Some(OsStr::new(SOURCE_EXTENSION)) {
            Some("name must not include the .lua extension")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(Error::InvalidPluginName(name, reason)),
            None => Ok(Self(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<name>.lua`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, SOURCE_EXTENSION)
    }
}

impl Default for PluginName {
    fn default() -> Self {
        Self(DEFAULT_PLUGIN_NAME.to_string())
    }
}

impl std::str::FromStr for PluginName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for PluginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct DeployParams {
    /// Directory containing `<name>.lua`.
    pub source_dir: PathBuf,
    /// Directory the plugin is copied into. It must already exist.
    pub plugins_dir: PathBuf,
}

impl DeployParams {
    pub fn from_home(source_dir: impl Into<PathBuf>, home: impl AsRef<Path>) -> Self {
        Self {
            source_dir: source_dir.into(),
            plugins_dir: paths::plugins_dir(home),
        }
    }
}

/// Progress reported by [`Deployer::deploy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status<'a> {
    Copying {
        source: &'a Path,
        plugins_dir: &'a Path,
    },
    Copied {
        destination: &'a Path,
    },
}

impl Status<'_> {
    pub const SUCCESS: &'static str = "Success!";
    pub const RELOAD_REMINDER: &'static str =
        "Reload the plugin in roblox studio using the plugin debug service before testing.";
}

impl fmt::Display for Status<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Copying {
                source,
                plugins_dir,
            } => {
                let file_name = source.file_name().unwrap_or(source.as_os_str());
                write!(
                    f,
                    "Copying {} to {}",
                    Path::new(file_name).display(),
                    plugins_dir.display()
                )?;
                if !plugins_dir.as_os_str().to_string_lossy().ends_with(MAIN_SEPARATOR) {
                    write!(f, "{}", MAIN_SEPARATOR)?;
                }
                Ok(())
            }
            Status::Copied { .. } => write!(f, "{} {}", Self::SUCCESS, Self::RELOAD_REMINDER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, Clone)]
pub struct Deployer {
    name: PluginName,
    params: DeployParams,
}

impl Deployer {
    pub fn new(name: PluginName, params: DeployParams) -> Self {
        Self { name, params }
    }

    pub fn name(&self) -> &PluginName {
        &self.name
    }

    pub fn source(&self) -> PathBuf {
        self.params.source_dir.join(self.name.file_name())
    }

    pub fn destination(&self) -> PathBuf {
        self.params.plugins_dir.join(self.name.file_name())
    }

    /// Copies the plugin into the plugins directory, overwriting any previous copy.
    ///
    /// Fails without touching the destination if the source file is missing, and
    /// never creates the plugins directory.
    pub fn deploy(&self, mut report: impl FnMut(Status<'_>)) -> Result<Deployment> {
        let source = self.source();
        let destination = self.destination();
        let plugins_dir = &self.params.plugins_dir;

        report(Status::Copying {
            source: &source,
            plugins_dir,
        });

        if !source.is_file() {
            log::debug!("source {} is not a file", source.display());
            return Err(Error::SourceNotFound(source));
        }
        if !plugins_dir.is_dir() {
            log::debug!("plugins directory {} is missing", plugins_dir.display());
            return Err(Error::DestinationNotFound(plugins_dir.clone()));
        }

        if is_same_file(&source, &destination)? {
            log::debug!("{} is already in the plugins directory", source.display());
            return Err(Error::SameFile(source));
        }

        log::trace!("copying {} -> {}", source.display(), destination.display());
        let mut reader = File::open(&source).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::SourceNotFound(source.clone()),
            ErrorKind::PermissionDenied => Error::PermissionDenied(source.clone()),
            _ => Error::IOError(e),
        })?;
        let mut writer = File::create(&destination).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::DestinationNotFound(plugins_dir.clone()),
            ErrorKind::PermissionDenied => Error::PermissionDenied(destination.clone()),
            _ => Error::IOError(e),
        })?;
        let bytes = std::io::copy(&mut reader, &mut writer)?;
        writer.flush()?;
        log::info!("Copied {} bytes to {}", bytes, destination.display());

        report(Status::Copied {
            destination: &destination,
        });

        Ok(Deployment {
            source,
            destination,
            bytes,
        })
    }
}

/// Both paths name the same file, through links or differently spelled directories.
/// A destination that does not exist yet is never the same file.
fn is_same_file(source: &Path, destination: &Path) -> Result<bool> {
    if !destination.exists() {
        return Ok(false);
    }
    Ok(source.canonicalize()? == destination.canonicalize()?)
}
