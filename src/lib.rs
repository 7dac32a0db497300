pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{BatchArgs, CliConfig, Command};

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{engine::BatchEngine, pipeline::BatchPipeline};
pub use domain::cpf::{check_digits, complete, mask, normalize, validate, Cpf};
pub use domain::model::{Digits, InvalidReason, ValidationOutcome};
pub use utils::error::{CpfError, Result};
