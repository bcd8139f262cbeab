use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学期
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum Semester {
    Spring, // 春季
    Fall,   // 秋季
}

impl Semester {
    pub const SPRING: &'static str = "spring";
    pub const FALL: &'static str = "fall";
}

impl<'de> Deserialize<'de> for Semester {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            Semester::SPRING => Ok(Semester::Spring),
            Semester::FALL => Ok(Semester::Fall),
            _ => Err(serde::de::Error::custom(format!(
                "无效的学期: '{s}'. 支持的学期: spring, fall"
            ))),
        }
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Semester::Spring => write!(f, "{}", Semester::SPRING),
            Semester::Fall => write!(f, "{}", Semester::FALL),
        }
    }
}

impl std::str::FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spring" => Ok(Semester::Spring),
            "fall" => Ok(Semester::Fall),
            _ => Err(format!("Invalid semester: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    // 课程ID
    pub id: i64,
    // 课程编号，如 CSCI2254
    pub code: String,
    // 课程名称
    pub title: String,
    // 学期
    pub semester: Semester,
    // 学年
    pub year: i32,
    // 卡片颜色（十六进制）
    pub color: String,
    // 任课教授ID
    pub professor_id: i64,
    // 加入码
    pub join_code: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 课程卡片调色板，创建课程不指定颜色时随机取一个
pub const COURSE_COLOR_PALETTE: [&str; 19] = [
    "#ff6b6b", "#4CAF50", "#3498db", "#f39c12", "#9b59b6", "#e74c3c", "#1abc9c", "#e67e22",
    "#2ecc71", "#8e44ad", "#c0392b", "#16a085", "#f1c40f", "#d35400", "#27ae60", "#2980b9",
    "#7f8c8d", "#bdc3c7", "#34495e",
];
