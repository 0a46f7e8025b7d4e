use clap::Parser;
use simpledown::cli::{self, Args};
use simpledown::config::Config;
use simpledown::core::{status_channel, TransferWorker};
use simpledown::ui::{ProgressReporter, TransferOutcome};
use simpledown::utils::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let Some(url) = args.url.clone() else {
        eprintln!("{}", cli::usage(&cli::program_name()));
        std::process::exit(1);
    };

    init_logger(args.log_level());
    log::info!("程序启动");

    // 合并命令行参数到配置
    let mut config = Config::default();
    config.merge_from_args(&args);
    config.validate()?;
    log::debug!("{}", config.get_summary());

    let options = config.to_options(args.destination(&url));
    log::info!("下载 {} -> {}", url, options.filepath.display());

    let worker = TransferWorker::from_config(&config, options)?;
    let (status_tx, status_rx) = status_channel();
    tokio::spawn(worker.run(url, status_tx));

    let mut reporter = ProgressReporter::stdio(config.tick_interval);
    match reporter.run(status_rx).await? {
        TransferOutcome::Completed(bytes) => {
            log::info!("程序结束，共写入 {} 字节", bytes);
            Ok(())
        }
        TransferOutcome::Failed(_) => {
            // 错误信息已由进度显示输出
            std::process::exit(1);
        }
    }
}
