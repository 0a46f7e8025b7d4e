//! simpledown: 单文件 HTTP 下载工具
//!
//! 下载 worker 把每次读写后的状态通过通道发给进度显示，
//! 进度显示按固定间隔刷新终端并决定程序何时结束。

pub mod cli;
pub mod config;
pub mod core;
pub mod ui;
pub mod utils;
