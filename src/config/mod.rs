pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::{BatchArgs, CliConfig, Command};

#[cfg(feature = "cli")]
mod args {
    use crate::config::toml_config::DEFAULT_REPORT_FILENAME;
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::{Args, Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "cpf-check")]
    #[command(about = "Validate, mask and batch-check Brazilian CPF numbers")]
    pub struct CliConfig {
        #[command(subcommand)]
        pub command: Command,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON lines")]
        pub log_json: bool,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Validate one or more CPFs
        Validate {
            #[arg(required = true)]
            inputs: Vec<String>,

            /// Print one JSON object per input
            #[arg(long)]
            json: bool,
        },
        /// Format digits as XXX.XXX.XXX-XX
        Mask { input: String },
        /// Append check digits to a 9-digit base
        Complete { base: String },
        /// Validate every line of a file and write reports
        Batch(BatchArgs),
    }

    #[derive(Debug, Clone, Args)]
    pub struct BatchArgs {
        /// TOML job file; other batch flags are ignored when set
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(short, long)]
        pub input: Option<String>,

        #[arg(short, long, default_value = "./output")]
        pub output: String,

        #[arg(long, value_delimiter = ',', default_value = "csv")]
        pub format: Vec<String>,

        #[arg(long, default_value = DEFAULT_REPORT_FILENAME)]
        pub filename: String,

        #[arg(long)]
        pub only_invalid: bool,
    }

    impl ConfigProvider for BatchArgs {
        fn input_path(&self) -> &str {
            self.input.as_deref().unwrap_or_default()
        }

        fn output_path(&self) -> &str {
            &self.output
        }

        fn output_formats(&self) -> &[String] {
            &self.format
        }

        fn report_filename(&self) -> &str {
            &self.filename
        }

        fn only_invalid(&self) -> bool {
            self.only_invalid
        }
    }

    impl Validate for BatchArgs {
        fn validate(&self) -> Result<()> {
            let input = validation::validate_required_field("--input", &self.input)?;
            validation::validate_path("--input", input)?;
            validation::validate_path("--output", &self.output)?;
            validation::validate_output_formats("--format", &self.format)?;
            validation::validate_file_stem("--filename", &self.filename)?;
            Ok(())
        }
    }

}
