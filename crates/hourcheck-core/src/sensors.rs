//! 传感器列表加载 / 类型列表解析
use std::path::Path;

use crate::error::ConfigError;

/// 未指定 `--silk-types` 时检查的类型
pub const DEFAULT_TYPES: [&str; 4] = ["in", "inweb", "out", "outweb"];

/// 从文件加载传感器列表（排序后返回）
pub fn load_sensor_list(path: &Path) -> Result<Vec<String>, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::SensorFileNotFile(path.to_path_buf()));
    }
    let txt = std::fs::read_to_string(path).map_err(|source| ConfigError::SensorFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_sensor_list(&txt))
}

/// 每行一个传感器名：去除首尾空白，跳过空行与 `#` 注释行
pub fn parse_sensor_list(text: &str) -> Vec<String> {
    let mut sensors: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect();
    sensors.sort();
    sensors
}

/// 解析逗号分隔的类型列表；空条目原样保留（由模板绑定检查拒绝）
pub fn parse_type_list(raw: &str) -> Vec<String> {
    let mut types: Vec<String> = raw.split(',').map(|t| t.trim().to_string()).collect();
    types.sort();
    types
}

/// 默认类型列表
pub fn default_types() -> Vec<String> {
    DEFAULT_TYPES.iter().map(|t| t.to_string()).collect()
}
