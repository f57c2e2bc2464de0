//! 数据目录布局 profile 与主机探测
//!
//! 部署环境的目录布局各不相同：标准布局以 class 为首层目录，
//! 开发机上的数据没有 class 层。布局由主机名选出，主机名通过 `HostProbe` 注入，
//! 测试时可替换为固定值。

/// 标准布局：class/type/年/月/日/文件
pub const STANDARD_TEMPLATE: &str =
    "/${sclass}/${stype}/${year}/${month}/${day}/${stype}-${sensor}_${year}${month}${day}.${hour}";

/// 开发机布局：无 class 层
pub const DEV_TEMPLATE: &str =
    "/${stype}/${year}/${month}/${day}/${stype}-${sensor}_${year}${month}${day}.${hour}";

/// 默认被识别为开发机的主机名
pub const DEFAULT_DEV_HOSTS: [&str; 1] = ["ub1404"];

/// 目录布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Standard,
    Dev,
}

impl Profile {
    pub fn template(self) -> &'static str {
        match self {
            Profile::Standard => STANDARD_TEMPLATE,
            Profile::Dev => DEV_TEMPLATE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Profile::Standard => "standard",
            Profile::Dev => "dev",
        }
    }

    pub fn from_name(name: &str) -> Option<Profile> {
        match name {
            "standard" => Some(Profile::Standard),
            "dev" => Some(Profile::Dev),
            _ => None,
        }
    }

    /// 主机名命中 `dev_hosts` 则为 Dev，否则（包括取不到主机名）为 Standard
    pub fn detect(probe: &dyn HostProbe, dev_hosts: &[String]) -> Profile {
        match probe.hostname() {
            Some(host) if dev_hosts.iter().any(|h| *h == host) => Profile::Dev,
            _ => Profile::Standard,
        }
    }
}

/// 主机信息探测
pub trait HostProbe {
    fn hostname(&self) -> Option<String>;
}

/// 读取真实主机名
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl HostProbe for SystemHost {
    fn hostname(&self) -> Option<String> {
        gethostname::gethostname().into_string().ok()
    }
}

/// 固定主机名（测试 / 显式注入用）
#[derive(Debug, Clone)]
pub struct FixedHost(pub Option<String>);

impl HostProbe for FixedHost {
    fn hostname(&self) -> Option<String> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev_hosts() -> Vec<String> {
        DEFAULT_DEV_HOSTS.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn dev_host_selects_dev_layout() {
        let probe = FixedHost(Some("ub1404".into()));
        assert_eq!(Profile::detect(&probe, &dev_hosts()), Profile::Dev);
    }

    #[test]
    fn other_or_unknown_host_selects_standard_layout() {
        assert_eq!(Profile::detect(&FixedHost(Some("sensor-gw".into())), &dev_hosts()), Profile::Standard);
        assert_eq!(Profile::detect(&FixedHost(None), &dev_hosts()), Profile::Standard);
    }

    #[test]
    fn dev_layout_has_no_class_level() {
        assert!(!Profile::Dev.template().contains("${sclass}"));
        assert!(Profile::Standard.template().starts_with("/${sclass}/"));
    }

    #[test]
    fn names_round_trip() {
        for p in [Profile::Standard, Profile::Dev] {
            assert_eq!(Profile::from_name(p.name()), Some(p));
        }
        assert_eq!(Profile::from_name("prod"), None);
    }
}
