use anyhow::Context;
use clap::Parser;
use cpf_check::config::toml_config::TomlConfig;
use cpf_check::core::ConfigProvider;
use cpf_check::utils::error::ErrorSeverity;
use cpf_check::utils::{logger, validation::Validate};
use cpf_check::{
    BatchArgs, BatchEngine, BatchPipeline, CliConfig, Command, CpfError, LocalStorage,
    ValidationOutcome,
};

const EXIT_INVALID_CPF: i32 = 4;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let exit_code = match config.command {
        Command::Validate { inputs, json } => run_validate(&inputs, json)?,
        Command::Mask { input } => {
            println!("{}", cpf_check::mask(&input));
            0
        }
        Command::Complete { base } => match cpf_check::complete(&base) {
            Ok(cpf) => {
                println!("{}", cpf);
                0
            }
            Err(e) => report_failure(&e),
        },
        Command::Batch(args) => match run_batch(args) {
            Ok(()) => 0,
            Err(e) => report_failure(&e),
        },
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn run_validate(inputs: &[String], json: bool) -> anyhow::Result<i32> {
    let mut all_valid = true;

    for input in inputs {
        let outcome = cpf_check::validate(input);
        all_valid &= outcome.is_valid();

        if json {
            let line = serde_json::json!({
                "input": input,
                "digits": cpf_check::normalize(input),
                "masked": cpf_check::mask(input),
                "outcome": outcome,
                "message": outcome.reason().map(|r| r.to_string()),
            });
            println!(
                "{}",
                serde_json::to_string(&line).context("failed to encode validation result")?
            );
        } else {
            match outcome {
                ValidationOutcome::Valid => println!("✅ {} valid", cpf_check::mask(input)),
                ValidationOutcome::Invalid(reason) => {
                    println!("❌ {} invalid: {}", input, reason)
                }
            }
        }
    }

    Ok(if all_valid { 0 } else { EXIT_INVALID_CPF })
}

fn run_batch(args: BatchArgs) -> cpf_check::Result<()> {
    let storage = LocalStorage::new(".");

    // 有 TOML 設定檔時以設定檔為準
    if let Some(path) = &args.config {
        tracing::info!("📁 Loading configuration from: {}", path);
        let config = TomlConfig::from_file(path)?;
        config.validate()?;
        tracing::info!("🚀 Running job '{}'", config.job_name());
        return execute(BatchPipeline::new(storage, config));
    }

    args.validate()?;
    tracing::info!("🚀 Validating {}", args.input_path());
    execute(BatchPipeline::new(storage, args))
}

fn execute<C: ConfigProvider>(pipeline: BatchPipeline<LocalStorage, C>) -> cpf_check::Result<()> {
    let run = BatchEngine::new(pipeline).run()?;

    println!(
        "✅ {} checked: {} valid, {} invalid",
        run.summary.total,
        run.summary.valid,
        run.summary.invalid()
    );
    for path in &run.outputs {
        println!("📁 {}", path);
    }
    Ok(())
}

fn report_failure(e: &CpfError) -> i32 {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    match e.severity() {
        ErrorSeverity::Low => EXIT_INVALID_CPF,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
