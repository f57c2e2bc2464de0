//! 错误类型：配置错误 / 模板错误（均为致命错误，检查开始前抛出）
use std::path::PathBuf;
use thiserror::Error;

use crate::template::Field;

/// 命令行输入或运行环境前置条件不满足
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Silk data dir '{}' does not exist", .0.display())]
    DataDirMissing(PathBuf),

    #[error("Silk Class argument required. See -h")]
    ClassRequired,

    #[error("Offset hours must be an integer between 1-100")]
    InvalidOffset,

    #[error("Sensor file path required. See -h")]
    SensorFileRequired,

    #[error("Sensor file path provided is not a file: {}", .0.display())]
    SensorFileNotFile(PathBuf),

    #[error("Failed to read sensor file {}", path.display())]
    SensorFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config file {}", path.display())]
    ConfigFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}", path.display())]
    ConfigFileParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 路径模板本身有误，或模板字段缺少取值
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error(
        "Unknown placeholder '{name}' in path template (expected one of: sclass, stype, year, month, day, sensor, hour)"
    )]
    UnknownPlaceholder { name: String },

    #[error("Invalid placeholder at byte {offset} in path template")]
    InvalidPlaceholder { offset: usize },

    #[error("Path template field '{0}' has no value")]
    EmptyField(Field),
}

/// 解析配置阶段的统一错误
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}
