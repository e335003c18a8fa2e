mod error;

pub mod deploy;
pub mod paths;

pub use deploy::{DeployParams, Deployer, Deployment, PluginName, Status};
pub use error::{Error, Result};
