//! CLI: 命令行接口和参数解析模块
//!
//! ## 支持的命令
//!
//! - 基本下载：`simpledown <url>`
//! - 指定保存路径：`simpledown -o out.zip <url>`
//! - 指定拷贝缓冲区：`simpledown -b 65536 <url>`
//! - 输出日志：`simpledown -vv <url>`

use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

use crate::utils::filename::filename_from_url;
use crate::utils::logger::level_from_verbosity;

/// 程序名缺失时使用的默认名称
const DEFAULT_PROGRAM_NAME: &str = "simpledown";

/// simpledown 命令行参数
///
/// 示例用法：
///   simpledown https://example.com/file.zip
///   simpledown -o /tmp/file.zip https://example.com/file.zip
#[derive(Parser, Debug, Clone)]
#[command(
    name = "simpledown",
    author = "panzhifu",
    version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("VERGEN_BUILD_TIMESTAMP"), ")"),
    about = "单文件 HTTP 下载工具，实时显示已下载大小"
)]
pub struct Args {
    /// 要下载的URL
    ///
    /// 在 clap 层面是可选的，缺失时由 `main` 打印用法并以 1 退出。
    #[arg(value_name = "URL", help = "要下载的URL。")]
    pub url: Option<String>,

    /// 保存路径，默认取URL最后一段
    #[arg(short = 'o', long, help = "保存路径，覆盖从URL推断的文件名。")]
    pub output: Option<PathBuf>,

    /// 拷贝缓冲区大小（字节）
    #[arg(short = 'b', long, help = "每次读写的缓冲区大小（字节），默认 4096。")]
    pub buffer_size: Option<usize>,

    /// 日志详细程度
    #[arg(short = 'v', long, action = ArgAction::Count, help = "输出日志到标准错误，可重复以提高详细程度。")]
    pub verbose: u8,
}

impl Args {
    /// 目标文件路径：`--output` 优先，否则取URL最后一段
    pub fn destination(&self, url: &str) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => PathBuf::from(filename_from_url(url)),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        level_from_verbosity(self.verbose)
    }
}

/// 缺少URL时打印的用法说明
pub fn usage(program: &str) -> String {
    format!("usage: {} [options] URL", program)
}

/// 当前程序名（argv[0]）
pub fn program_name() -> String {
    std::env::args()
        .next()
        .unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string())
}
