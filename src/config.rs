//! 配置加载 (~/.config/eat-n-split/config.toml)
//!
//! 配置只在启动时读取一次，从不写回

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::models::Friend;

pub const DEFAULT_IMAGE: &str = "https://i.pravatar.cc/48";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 添加朋友表单中头像地址的初始值
    pub default_image: String,
    pub currency: String,
    /// 启动时的朋友列表
    pub friends: Vec<Friend>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_image: DEFAULT_IMAGE.to_string(),
            currency: "$".to_string(),
            friends: default_friends(),
        }
    }
}

fn default_friends() -> Vec<Friend> {
    [("118836", "Clark", -7.0), ("933372", "Sarah", 20.0), ("499476", "Anthony", 0.0)]
        .into_iter()
        .map(|(id, name, balance)| Friend {
            id: id.to_string(),
            name: name.to_string(),
            image: format!("{}?u={}", DEFAULT_IMAGE, id),
            balance,
        })
        .collect()
}

/// 获取配置文件路径
pub fn config_path() -> io::Result<PathBuf> {
    let path = dirs::config_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户配置目录"))?
        .join("eat-n-split")
        .join("config.toml");
    Ok(path)
}

impl Config {
    pub fn parse(content: &str) -> io::Result<Self> {
        toml::from_str(content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// 从TOML文件加载配置，文件不存在时使用默认值
    pub fn load(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }
}
