//! 公共类型（对外暴露）
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// 单个小时文件的检查状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Ok,
    Missing,
    Empty,
}

/// 单个 (传感器, 类型) 组合的检查结果（对应 JSON 输出的单个元素）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub sensor: String,
    #[serde(rename = "type")]
    pub stype: String,
    pub path: PathBuf,
    pub status: FileStatus,
}

/// 文本诊断行；Ok 不产生输出，此处按空串处理
impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            FileStatus::Ok => Ok(()),
            FileStatus::Missing => {
                write!(f, "Sensor {} missing file {}", self.sensor, self.path.display())
            }
            FileStatus::Empty => {
                write!(f, "Sensor {} file {} has zero bytes", self.sensor, self.path.display())
            }
        }
    }
}
