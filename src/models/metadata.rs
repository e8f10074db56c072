use serde::{Deserialize, Serialize};

/// 调用方提供的考试元数据，原样复制到每道题目上
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_year"
    )]
    pub year: Option<String>,
}

impl ExamMetadata {
    /// 用命令行参数覆盖已有字段；空字符串视为未提供
    pub fn merge(self, overrides: ExamMetadata) -> ExamMetadata {
        ExamMetadata {
            exam_type: non_empty(overrides.exam_type).or(self.exam_type),
            subject: non_empty(overrides.subject).or(self.subject),
            topic: non_empty(overrides.topic).or(self.topic),
            year: non_empty(overrides.year).or(self.year),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exam_type.is_none() && self.subject.is_none() && self.topic.is_none() && self.year.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// 年份既可以写成字符串也可以写成整数
fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct YearVisitor;

    impl<'de> Visitor<'de> for YearVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer representing a year")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(YearVisitor)
}
