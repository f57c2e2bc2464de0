//! SiLK 小时文件检查核心库
//!
//! 设计要点：
//! - 配置一次性解析为不可变的 `Config`，所有校验（含模板）在检查开始前完成。
//! - 目录布局按主机名选择 profile，主机名探测通过 `HostProbe` 注入，便于测试。
//! - 检查顺序为 传感器字典序 → 类型字典序，输出稳定可复现。
//! - 单个文件缺失/为空只产生诊断行，不影响退出码。

mod check;
mod config;
mod error;
mod options;
mod profile;
mod sensors;
mod template;
mod timestamp;
mod types;

pub use check::{check_hour, check_results, file_status};
pub use config::{Config, DEFAULT_DATA_DIR, OFFSET_RANGE};
pub use error::{ConfigError, Error, TemplateError};
pub use options::{CheckOptions, CheckStats, Clock, OutputFormat};
pub use profile::{FixedHost, HostProbe, Profile, SystemHost, DEV_TEMPLATE, STANDARD_TEMPLATE};
pub use sensors::{load_sensor_list, parse_sensor_list, parse_type_list, DEFAULT_TYPES};
pub use template::{Field, FieldValues, PathTemplate};
pub use timestamp::HourStamp;
pub use types::{CheckResult, FileStatus};
