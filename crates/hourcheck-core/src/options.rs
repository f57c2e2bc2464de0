//! 检查选项（未经校验的原始输入）、时钟与输出格式
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime, Utc};

use crate::profile::Profile;

/// 计算目标小时所用的时钟
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// 本地挂钟时间
    #[default]
    Local,
    /// UTC（SiLK 小时文件通常按 UTC 命名）
    Utc,
}

impl Clock {
    pub fn now(self) -> NaiveDateTime {
        match self {
            Clock::Local => Local::now().naive_local(),
            Clock::Utc => Utc::now().naive_utc(),
        }
    }
}

/// 诊断输出格式
/// - Text：每个问题一行（默认）
/// - Json：问题项组成的 JSON 数组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 检查选项：字段与命令行参数一一对应，全部可缺省，由 `Config::resolve` 校验
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// silk class（必填，缺失时报错）
    pub silk_class: Option<String>,
    /// 偏移小时数（原始字符串，1-100）
    pub offset_hours: Option<String>,
    /// 数据根目录覆盖
    pub silk_data_dir: Option<String>,
    /// 传感器列表文件（必填）
    pub sensor_file: Option<PathBuf>,
    /// 逗号分隔的类型列表
    pub silk_types: Option<String>,
    /// TOML 配置文件
    pub config_file: Option<PathBuf>,
    /// 显式指定布局；None 表示按主机名探测
    pub profile: Option<Profile>,
    pub clock: Clock,
}

/// 检查统计信息（便于 CLI 打印汇总日志）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckStats {
    pub pairs_checked: usize,
    pub missing: usize,
    pub empty: usize,
}
