//! 配置解析：默认值 → 主机 profile → 配置文件（TOML）→ 命令行，合并为不可变的 `Config`
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, Error, TemplateError};
use crate::options::{CheckOptions, Clock};
use crate::profile::{HostProbe, Profile, DEFAULT_DEV_HOSTS};
use crate::sensors::{default_types, load_sensor_list, parse_type_list};
use crate::template::{Field, FieldValues, PathTemplate};
use crate::timestamp::HourStamp;

/// 默认数据根目录
pub const DEFAULT_DATA_DIR: &str = "/data";

/// 偏移小时的合法范围（仅对显式传入的值校验）
pub const OFFSET_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// 配置文件结构（所有键均可选）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    data_dir: Option<String>,
    #[serde(default)]
    template: Option<String>,
    #[serde(default)]
    types: Option<Vec<String>>,
    #[serde(default)]
    dev_hosts: Option<Vec<String>>,
}

fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let txt = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&txt).map_err(|source| ConfigError::ConfigFileParse {
        path: path.to_path_buf(),
        source,
    })
}

/// 生效配置（构建一次，之后只读传递）
#[derive(Debug, Clone)]
pub struct Config {
    /// 数据根目录（已去除末尾 `/`）
    pub data_dir: PathBuf,
    /// 数据根目录之下的路径模板
    pub template: PathTemplate,
    pub silk_class: String,
    /// 已排序
    pub types: Vec<String>,
    /// 已排序
    pub sensors: Vec<String>,
    pub offset_hours: u32,
    pub profile: Profile,
    pub clock: Clock,
}

impl Config {
    /// 校验并合并选项。校验顺序固定：
    /// 配置文件 → 数据目录 → class → 偏移 → 传感器文件 → 类型 → profile/模板 → 字段绑定
    pub fn resolve(opts: &CheckOptions, host: &dyn HostProbe) -> Result<Self, Error> {
        let file = match &opts.config_file {
            Some(p) => load_file_config(p)?,
            None => FileConfig::default(),
        };

        // 空字符串视同未指定
        let raw_dir = opts
            .silk_data_dir
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(file.data_dir.as_deref().filter(|d| !d.is_empty()))
            .unwrap_or(DEFAULT_DATA_DIR);
        let data_dir = strip_trailing_slashes(raw_dir);
        if !dir_exists(&data_dir) {
            return Err(ConfigError::DataDirMissing(data_dir).into());
        }

        let silk_class = match opts.silk_class.as_deref() {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => return Err(ConfigError::ClassRequired.into()),
        };

        let offset_hours = match opts.offset_hours.as_deref() {
            Some(raw) if !raw.is_empty() => parse_offset(raw)?,
            _ => 0,
        };

        let sensor_file = opts.sensor_file.as_deref().ok_or(ConfigError::SensorFileRequired)?;
        let sensors = load_sensor_list(sensor_file)?;

        let types = match (opts.silk_types.as_deref(), &file.types) {
            (Some(raw), _) if !raw.is_empty() => parse_type_list(raw),
            (_, Some(list)) => {
                let mut list: Vec<String> = list.iter().map(|t| t.trim().to_string()).collect();
                list.sort();
                list
            }
            _ => default_types(),
        };

        let profile = match opts.profile {
            Some(p) => p,
            None => {
                let dev_hosts = file
                    .dev_hosts
                    .clone()
                    .unwrap_or_else(|| DEFAULT_DEV_HOSTS.iter().map(|h| h.to_string()).collect());
                Profile::detect(host, &dev_hosts)
            }
        };
        let template = PathTemplate::parse(file.template.as_deref().unwrap_or(profile.template()))?;

        let config = Config {
            data_dir,
            template,
            silk_class,
            types,
            sensors,
            offset_hours,
            profile,
            clock: opts.clock,
        };
        config.check_bindings()?;

        debug!(
            data_dir = %config.data_dir.display(),
            template = %config.template,
            profile = config.profile.name(),
            sensors = config.sensors.len(),
            types = ?config.types,
            offset_hours = config.offset_hours,
            "configuration resolved"
        );
        Ok(config)
    }

    /// 模板引用的每个字段都必须有非空取值（检查开始前一次性校验）
    fn check_bindings(&self) -> Result<(), TemplateError> {
        if self.template.uses(Field::Class) && self.silk_class.is_empty() {
            return Err(TemplateError::EmptyField(Field::Class));
        }
        if self.template.uses(Field::Type) && self.types.iter().any(|t| t.is_empty()) {
            return Err(TemplateError::EmptyField(Field::Type));
        }
        if self.template.uses(Field::Sensor) && self.sensors.iter().any(|s| s.is_empty()) {
            return Err(TemplateError::EmptyField(Field::Sensor));
        }
        Ok(())
    }

    /// 某传感器/类型在目标小时对应的文件路径
    pub fn hour_file_path(&self, sensor: &str, stype: &str, stamp: &HourStamp) -> PathBuf {
        let rendered = self.template.render(&FieldValues {
            sclass: &self.silk_class,
            stype,
            sensor,
            stamp,
        });
        // 模板以 `/` 开头，直接拼接而非 join（join 遇绝对路径会整体替换）
        let mut path = OsString::from(self.data_dir.as_os_str());
        path.push(rendered);
        PathBuf::from(path)
    }
}

/// 去除末尾 `/`；根目录 `/` 变为空前缀
fn strip_trailing_slashes(raw: &str) -> PathBuf {
    PathBuf::from(raw.trim_end_matches('/'))
}

fn dir_exists(dir: &Path) -> bool {
    if dir.as_os_str().is_empty() {
        return Path::new("/").is_dir();
    }
    dir.is_dir()
}

fn parse_offset(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| OFFSET_RANGE.contains(n))
        .ok_or(ConfigError::InvalidOffset)
}
