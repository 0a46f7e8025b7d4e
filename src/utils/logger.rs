use chrono::Local; // 用于获取本地时间
use log::LevelFilter; // 用于设置日志级别
use std::io::Write;

/// 根据 `-v` 的次数选择日志级别
pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// 初始化日志，输出到标准错误
///
/// 格式：`2024-01-01 12:00:00 [INFO] - 消息`。重复初始化会被忽略。
pub fn init_logger(level: LevelFilter) {
    // 只有测试中会重复初始化，失败时不输出任何内容
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .try_init();
}
