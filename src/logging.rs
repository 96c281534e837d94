//! 日志初始化
//!
//! TUI 占用了终端，日志写入数据目录下的文件

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// 获取数据目录路径 (~/.local/share/eat-n-split/)
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
        .join("eat-n-split");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 初始化 tracing，返回日志文件路径
pub fn init() -> io::Result<PathBuf> {
    let log_path = get_data_dir()?.join("eat-n-split.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("eat_n_split=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(log_path)
}
