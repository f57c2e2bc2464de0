//! 路径模板（`${name}` / `$name` 占位符，`$$` 转义为 `$`）
//!
//! 模板在解析配置时一次性编译为片段列表：
//! - 未知占位符、非法 `$` 用法在解析阶段即报错，不会拖到逐个传感器检查时才暴露；
//! - 渲染只做字段查表拼接，不涉及任何动态求值。
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::TemplateError;
use crate::timestamp::HourStamp;

/// 模板可识别的七个字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Class,
    Type,
    Year,
    Month,
    Day,
    Sensor,
    Hour,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Class,
        Field::Type,
        Field::Year,
        Field::Month,
        Field::Day,
        Field::Sensor,
        Field::Hour,
    ];

    /// 模板中使用的占位符名
    pub fn name(self) -> &'static str {
        match self {
            Field::Class => "sclass",
            Field::Type => "stype",
            Field::Year => "year",
            Field::Month => "month",
            Field::Day => "day",
            Field::Sensor => "sensor",
            Field::Hour => "hour",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 渲染单条路径所需的全部字段取值
#[derive(Debug, Clone, Copy)]
pub struct FieldValues<'a> {
    pub sclass: &'a str,
    pub stype: &'a str,
    pub sensor: &'a str,
    pub stamp: &'a HourStamp,
}

impl<'a> FieldValues<'a> {
    fn get(&self, field: Field) -> &'a str {
        let stamp: &'a HourStamp = self.stamp;
        match field {
            Field::Class => self.sclass,
            Field::Type => self.stype,
            Field::Sensor => self.sensor,
            Field::Year => &stamp.year,
            Field::Month => &stamp.month,
            Field::Day => &stamp.day,
            Field::Hour => &stamp.hour,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// 编译后的路径模板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    segments: Vec<Segment>,
}

/// 分组：1 = `$$`，2 = `${name}`，3 = `$name`；均未命中即为非法 `$`
fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$(?:(\$)|\{([_A-Za-z][_A-Za-z0-9]*)\}|([_A-Za-z][_A-Za-z0-9]*))?")
            .expect("placeholder regex is valid")
    })
}

impl PathTemplate {
    /// 解析模板文本；未知占位符或非法 `$` 立即返回 TemplateError
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut tpl = PathTemplate { source: source.to_string(), segments: Vec::new() };
        let mut last = 0;

        for caps in placeholder_regex().captures_iter(source) {
            let Some(whole) = caps.get(0) else { continue };
            tpl.push_literal(&source[last..whole.start()]);

            if caps.get(1).is_some() {
                tpl.push_literal("$");
            } else if let Some(name) = caps.get(2).or_else(|| caps.get(3)) {
                let field = Field::from_name(name.as_str()).ok_or_else(|| {
                    TemplateError::UnknownPlaceholder { name: name.as_str().to_string() }
                })?;
                tpl.segments.push(Segment::Field(field));
            } else {
                return Err(TemplateError::InvalidPlaceholder { offset: whole.start() });
            }
            last = whole.end();
        }
        tpl.push_literal(&source[last..]);

        Ok(tpl)
    }

    /// 模板原文
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 模板是否引用了某字段
    pub fn uses(&self, field: Field) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Field(f) if *f == field))
    }

    /// 代入字段取值，返回字面路径
    pub fn render(&self, values: &FieldValues<'_>) -> String {
        let mut out = String::with_capacity(self.source.len() + 32);
        for seg in &self.segments {
            match seg {
                Segment::Literal(s) => out.push_str(s),
                Segment::Field(f) => out.push_str(values.get(*f)),
            }
        }
        out
    }

    // 相邻字面量合并，保持片段列表紧凑
    fn push_literal(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if let Some(Segment::Literal(prev)) = self.segments.last_mut() {
            prev.push_str(s);
        } else {
            self.segments.push(Segment::Literal(s.to_string()));
        }
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
