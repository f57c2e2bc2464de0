//! 目标小时计算（当前时间 - 偏移小时）
use std::ops::Sub;

use chrono::{Datelike, Duration, Timelike};

/// 目标小时的各字段（定宽补零字符串，直接用于模板代入）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourStamp {
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
}

impl HourStamp {
    /// 从任意日期时间提取 年(4位)/月/日/时(2位)
    pub fn from_datetime<T: Datelike + Timelike>(dt: &T) -> Self {
        Self {
            year: format!("{:04}", dt.year()),
            month: format!("{:02}", dt.month()),
            day: format!("{:02}", dt.day()),
            hour: format!("{:02}", dt.hour()),
        }
    }

    /// `now` 回退 `offset_hours` 小时后的目标小时；跨日/月/年由 chrono 的日历运算处理
    pub fn hours_before<T>(now: T, offset_hours: u32) -> Self
    where
        T: Sub<Duration, Output = T> + Datelike + Timelike,
    {
        let target = now - Duration::hours(i64::from(offset_hours));
        Self::from_datetime(&target)
    }
}

impl std::fmt::Display for HourStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}T{}", self.year, self.month, self.day, self.hour)
    }
}
