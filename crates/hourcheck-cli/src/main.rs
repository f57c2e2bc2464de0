use anyhow::{Context, Result};
use clap::Parser;
use hourcheck_core::{check_hour, CheckOptions, Clock, Config, HourStamp, OutputFormat, Profile, SystemHost};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// 命令行入口（基于 clap）
/// 必填项（class、传感器文件）由核心库校验，缺失时与其他配置错误一样以退出码 1 结束
#[derive(Parser, Debug)]
#[command(name = "silk-hour-check", version, about = "Ensure SiLK sensors are producing hourly flow files")]
struct Cli {
    /// Silk class name to check
    #[arg(short = 'c', long = "silk-class")]
    silk_class: Option<String>,

    /// Hours before the current hour to check (integer 1-100, default 0)
    #[arg(short = 'o', long = "offset-hours", allow_hyphen_values = true)]
    offset_hours: Option<String>,

    /// Silk data parent directory (default /data)
    #[arg(short = 'p', long = "silk-data-dir")]
    silk_data_dir: Option<String>,

    /// File listing sensor names, one per line
    #[arg(short = 's', long = "sensor-file")]
    sensor_file: Option<PathBuf>,

    /// Comma-separated silk types (default in,inweb,out,outweb)
    #[arg(short = 't', long = "silk-types")]
    silk_types: Option<String>,

    /// TOML config file (data_dir, template, types, dev_hosts)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data layout profile; detected from the hostname when omitted
    #[arg(long, value_parser = ["standard", "dev"])]
    profile: Option<String>,

    /// Compute the target hour in UTC instead of local time
    #[arg(long)]
    utc: bool,

    /// Output format: text or json
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

fn main() -> ExitCode {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // 错误信息与诊断一样写到 stdout，便于 cron 邮件一并收到
            println!("ERROR: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let format = match cli.format.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Text,
    };
    let opts = CheckOptions {
        silk_class: cli.silk_class,
        offset_hours: cli.offset_hours,
        silk_data_dir: cli.silk_data_dir,
        sensor_file: cli.sensor_file,
        silk_types: cli.silk_types,
        config_file: cli.config,
        profile: cli.profile.as_deref().and_then(Profile::from_name),
        clock: if cli.utc { Clock::Utc } else { Clock::Local },
    };

    let config = Config::resolve(&opts, &SystemHost)?;
    let stamp = HourStamp::hours_before(config.clock.now(), config.offset_hours);
    info!(hour = %stamp, class = %config.silk_class, profile = config.profile.name(), "starting check");

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stats = check_hour(&config, &stamp, &mut out, format).context("check hour files")?;
    out.flush().context("flush output")?;

    info!(
        pairs_checked = stats.pairs_checked,
        missing = stats.missing,
        empty = stats.empty,
        "check finished"
    );
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // stdout 只留给诊断输出，日志走 stderr；默认只显示 warn 及以上
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
