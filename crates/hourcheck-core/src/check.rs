//! 检查主流程：传感器 × 类型 双层循环，逐个 stat 小时文件
use anyhow::Result;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, warn};

use crate::config::Config;
use crate::options::{CheckStats, OutputFormat};
use crate::timestamp::HourStamp;
use crate::types::{CheckResult, FileStatus};

/// 判定单个路径的状态
/// - 不是普通文件或 stat 失败 → Missing（不再读取大小）
/// - 大小为 0 → Empty
pub fn file_status(path: &Path) -> FileStatus {
    match std::fs::metadata(path) {
        Ok(md) if !md.is_file() => FileStatus::Missing,
        Ok(md) if md.len() == 0 => FileStatus::Empty,
        Ok(_) => FileStatus::Ok,
        Err(e) => {
            // 非 NotFound 的错误（权限等）仍按缺失上报，但保留底层原因
            if e.kind() != ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "stat failed");
            }
            FileStatus::Missing
        }
    }
}

/// 按排序后的 传感器 × 类型 顺序生成检查结果（包括 Ok）
pub fn check_results<'a>(config: &'a Config, stamp: &'a HourStamp) -> impl Iterator<Item = CheckResult> + 'a {
    config.sensors.iter().flat_map(move |sensor| {
        config.types.iter().map(move |stype| {
            let path = config.hour_file_path(sensor, stype, stamp);
            let status = file_status(&path);
            CheckResult { sensor: sensor.clone(), stype: stype.clone(), path, status }
        })
    })
}

/// 检查目标小时的全部文件，并将问题项写入 `out`
/// 稳定性保证：输出顺序 = 传感器字典序 → 类型字典序，与输入顺序无关
pub fn check_hour(
    config: &Config,
    stamp: &HourStamp,
    out: &mut dyn Write,
    format: OutputFormat,
) -> Result<CheckStats> {
    if config.sensors.is_empty() {
        warn!("sensor list is empty, nothing to check");
    }

    let mut stats = CheckStats::default();
    let mut first = true;
    if format == OutputFormat::Json {
        write!(out, "[")?;
    }

    for result in check_results(config, stamp) {
        stats.pairs_checked += 1;
        match result.status {
            FileStatus::Ok => continue,
            FileStatus::Missing => stats.missing += 1,
            FileStatus::Empty => stats.empty += 1,
        }
        debug!(sensor = %result.sensor, stype = %result.stype, status = ?result.status, "problem found");

        match format {
            OutputFormat::Text => writeln!(out, "{result}")?,
            OutputFormat::Json => {
                if !first {
                    write!(out, ",")?;
                } else {
                    first = false;
                }
                serde_json::to_writer(&mut *out, &result)?;
            }
        }
    }

    if format == OutputFormat::Json {
        writeln!(out, "]")?;
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CheckOptions;
    use crate::profile::FixedHost;
    use std::fs;
    use tempfile::TempDir;

    /// 数据目录 + 简化模板（不含时间字段，结果与当前时间无关）
    fn setup(sensors: &str, types: &str) -> (TempDir, Config) {
        setup_with_template(sensors, types, "/${sclass}/${stype}-${sensor}.${hour}")
    }

    fn setup_with_template(sensors: &str, types: &str, template: &str) -> (TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir_all(data.join("C1")).unwrap();
        fs::write(dir.path().join("sensors.txt"), sensors).unwrap();
        let cfg_path = dir.path().join("hourcheck.toml");
        fs::write(&cfg_path, format!("template = {template:?}\n")).unwrap();

        let opts = CheckOptions {
            silk_class: Some("C1".into()),
            silk_data_dir: Some(data.to_string_lossy().into_owned()),
            sensor_file: Some(dir.path().join("sensors.txt")),
            silk_types: Some(types.into()),
            config_file: Some(cfg_path),
            ..CheckOptions::default()
        };
        let cfg = Config::resolve(&opts, &FixedHost(None)).unwrap();
        (dir, cfg)
    }

    fn stamp() -> HourStamp {
        HourStamp {
            year: "2024".into(),
            month: "03".into(),
            day: "05".into(),
            hour: "07".into(),
        }
    }

    fn run(cfg: &Config, format: OutputFormat) -> (String, CheckStats) {
        let mut buf = Vec::new();
        let stats = check_hour(cfg, &stamp(), &mut buf, format).unwrap();
        (String::from_utf8(buf).unwrap(), stats)
    }

    #[test]
    fn reports_missing_and_empty_files_in_sorted_order() {
        let (dir, cfg) = setup("S2\nS1\n", "out,in");
        let class_dir = dir.path().join("data/C1");
        fs::write(class_dir.join("in-S1.07"), b"flow").unwrap();
        fs::write(class_dir.join("out-S1.07"), b"").unwrap();
        fs::write(class_dir.join("in-S2.07"), b"flow").unwrap();

        let (text, stats) = run(&cfg, OutputFormat::Text);
        let d = cfg.data_dir.display();
        assert_eq!(
            text,
            format!(
                "Sensor S1 file {d}/C1/out-S1.07 has zero bytes\nSensor S2 missing file {d}/C1/out-S2.07\n"
            )
        );
        assert_eq!(stats, CheckStats { pairs_checked: 4, missing: 1, empty: 1 });
    }

    #[test]
    fn all_present_is_silent() {
        let (dir, cfg) = setup("S1\n", "in");
        fs::write(dir.path().join("data/C1/in-S1.07"), b"x").unwrap();
        let (text, stats) = run(&cfg, OutputFormat::Text);
        assert!(text.is_empty());
        assert_eq!(stats.pairs_checked, 1);
    }

    #[test]
    fn directory_at_file_path_counts_as_missing() {
        let (dir, cfg) = setup("S1\n", "in");
        fs::create_dir(dir.path().join("data/C1/in-S1.07")).unwrap();
        assert_eq!(file_status(&dir.path().join("data/C1/in-S1.07")), FileStatus::Missing);
        let (text, _) = run(&cfg, OutputFormat::Text);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Sensor S1 missing file "));
    }

    #[test]
    fn stat_error_is_reported_as_missing_and_loop_continues() {
        let (dir, cfg) =
            setup_with_template("S2\nS1\n", "in,out", "/${sclass}/${sensor}/${stype}.${hour}");
        let class_dir = dir.path().join("data/C1");
        // S1 本应是目录却是普通文件：stat 其下路径得到 ENOTDIR 而非 NotFound
        fs::write(class_dir.join("S1"), b"not a dir").unwrap();
        fs::create_dir(class_dir.join("S2")).unwrap();
        fs::write(class_dir.join("S2/in.07"), b"flow").unwrap();

        let blocked = class_dir.join("S1/in.07");
        let kind = fs::metadata(&blocked).unwrap_err().kind();
        assert_ne!(kind, std::io::ErrorKind::NotFound);
        assert_eq!(file_status(&blocked), FileStatus::Missing);

        let (text, stats) = run(&cfg, OutputFormat::Text);
        let d = cfg.data_dir.display();
        assert_eq!(
            text,
            format!(
                "Sensor S1 missing file {d}/C1/S1/in.07\nSensor S1 missing file {d}/C1/S1/out.07\nSensor S2 missing file {d}/C1/S2/out.07\n"
            )
        );
        assert_eq!(stats, CheckStats { pairs_checked: 4, missing: 3, empty: 0 });
    }

    #[test]
    fn json_output_lists_problems() {
        let (dir, cfg) = setup("S1\n", "in,out");
        fs::write(dir.path().join("data/C1/in-S1.07"), b"").unwrap();
        let (text, _) = run(&cfg, OutputFormat::Json);
        let items: serde_json::Value = serde_json::from_str(&text).unwrap();
        let items = items.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["sensor"], "S1");
        assert_eq!(items[0]["type"], "in");
        assert_eq!(items[0]["status"], "empty");
        assert_eq!(items[1]["type"], "out");
        assert_eq!(items[1]["status"], "missing");
    }

    #[test]
    fn empty_sensor_list_checks_nothing() {
        let (_dir, cfg) = setup("# none yet\n", "in");
        let (text, stats) = run(&cfg, OutputFormat::Json);
        assert_eq!(text.trim(), "[]");
        assert_eq!(stats.pairs_checked, 0);
    }
}
