//! 业务模型定义
//!
//! 每个领域一个子模块，内部按 entities / requests / responses 划分。
//! common 存放 API 响应壳、错误码和分页类型。

pub mod auth;
pub mod common;
pub mod courses;
pub mod forms;
pub mod responses;
pub mod teams;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间，用于系统运行状态统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
