//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod forms;
mod responses;
mod teams;
mod users;

use crate::config::AppConfig;
use crate::errors::{CollabRateError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CollabRateError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CollabRateError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CollabRateError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CollabRateError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    common::PaginationQuery,
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::{CourseListResponse, CourseStudentListResponse},
    },
    forms::{
        entities::{CourseForm, FormState, LikertQuestion, OpenEndedQuestion},
        requests::{FormUpdateData, FormWriteData, LikertQuestionSeed},
        responses::FormDetailResponse,
    },
    responses::{
        entities::{LikertResponse, OpenEndedResponse, ResponseKey},
        responses::MyResponsesResponse,
    },
    teams::{
        entities::{Team, TeamWithMembers},
        requests::{CreateTeamRequest, UpdateTeamRequest},
    },
    users::{
        entities::{User, UserRole},
        requests::{UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_oauth_user(
        &self,
        subject: &str,
        email: &str,
        username: &str,
        profile_name: &str,
        role: UserRole,
    ) -> Result<User> {
        self.create_oauth_user_impl(subject, email, username, profile_name, role)
            .await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_oauth_subject(&self, subject: &str) -> Result<Option<User>> {
        self.get_user_by_oauth_subject_impl(subject).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 课程模块
    async fn create_course(
        &self,
        professor_id: i64,
        course: CreateCourseRequest,
    ) -> Result<Course> {
        self.create_course_impl(professor_id, course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn get_course_by_code(&self, join_code: &str) -> Result<Option<Course>> {
        self.get_course_by_code_impl(join_code).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    async fn enroll_student(&self, course_id: i64, user_id: i64) -> Result<bool> {
        self.enroll_student_impl(course_id, user_id).await
    }

    async fn unenroll_student(&self, course_id: i64, user_id: i64) -> Result<bool> {
        self.unenroll_student_impl(course_id, user_id).await
    }

    async fn is_student_enrolled(&self, course_id: i64, user_id: i64) -> Result<bool> {
        self.is_student_enrolled_impl(course_id, user_id).await
    }

    async fn list_course_students_with_pagination(
        &self,
        course_id: i64,
        query: PaginationQuery,
    ) -> Result<CourseStudentListResponse> {
        self.list_course_students_with_pagination_impl(course_id, query)
            .await
    }

    // 小组模块
    async fn create_team(
        &self,
        course_id: i64,
        team: CreateTeamRequest,
    ) -> Result<TeamWithMembers> {
        self.create_team_impl(course_id, team).await
    }

    async fn get_team_by_id(&self, team_id: i64) -> Result<Option<Team>> {
        self.get_team_by_id_impl(team_id).await
    }

    async fn get_team_with_members(&self, team_id: i64) -> Result<Option<TeamWithMembers>> {
        self.get_team_with_members_impl(team_id).await
    }

    async fn list_course_teams(&self, course_id: i64) -> Result<Vec<TeamWithMembers>> {
        self.list_course_teams_impl(course_id).await
    }

    async fn update_team(
        &self,
        team_id: i64,
        update: UpdateTeamRequest,
    ) -> Result<Option<TeamWithMembers>> {
        self.update_team_impl(team_id, update).await
    }

    async fn delete_team(&self, team_id: i64) -> Result<bool> {
        self.delete_team_impl(team_id).await
    }

    async fn get_user_team_in_course(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Option<Team>> {
        self.get_user_team_in_course_impl(course_id, user_id).await
    }

    async fn list_team_member_ids(&self, team_id: i64) -> Result<Vec<i64>> {
        self.list_team_member_ids_impl(team_id).await
    }

    // 表单模块
    async fn create_form(
        &self,
        course_id: i64,
        data: FormWriteData,
        likert: Vec<LikertQuestionSeed>,
        open_ended: Vec<String>,
    ) -> Result<FormDetailResponse> {
        self.create_form_impl(course_id, data, likert, open_ended)
            .await
    }

    async fn get_form_by_id(&self, form_id: i64) -> Result<Option<CourseForm>> {
        self.get_form_by_id_impl(form_id).await
    }

    async fn get_form_detail(&self, form_id: i64) -> Result<Option<FormDetailResponse>> {
        self.get_form_detail_impl(form_id).await
    }

    async fn list_course_forms(&self, course_id: i64) -> Result<Vec<CourseForm>> {
        self.list_course_forms_impl(course_id).await
    }

    async fn update_form(
        &self,
        form_id: i64,
        update: FormUpdateData,
    ) -> Result<Option<CourseForm>> {
        self.update_form_impl(form_id, update).await
    }

    async fn set_form_state(&self, form_id: i64, state: FormState) -> Result<bool> {
        self.set_form_state_impl(form_id, state).await
    }

    async fn replace_form_questions(
        &self,
        form_id: i64,
        likert: Vec<LikertQuestionSeed>,
        open_ended: Vec<String>,
    ) -> Result<Option<FormDetailResponse>> {
        self.replace_form_questions_impl(form_id, likert, open_ended)
            .await
    }

    async fn delete_form(&self, form_id: i64) -> Result<bool> {
        self.delete_form_impl(form_id).await
    }

    async fn get_likert_question(&self, question_id: i64) -> Result<Option<LikertQuestion>> {
        self.get_likert_question_impl(question_id).await
    }

    async fn get_open_ended_question(
        &self,
        question_id: i64,
    ) -> Result<Option<OpenEndedQuestion>> {
        self.get_open_ended_question_impl(question_id).await
    }

    // 回答模块
    async fn upsert_likert_response(
        &self,
        key: ResponseKey,
        rating: i32,
    ) -> Result<LikertResponse> {
        self.upsert_likert_response_impl(key, rating).await
    }

    async fn upsert_open_ended_response(
        &self,
        key: ResponseKey,
        text: &str,
    ) -> Result<OpenEndedResponse> {
        self.upsert_open_ended_response_impl(key, text).await
    }

    async fn list_my_responses(
        &self,
        form_id: i64,
        evaluator_id: i64,
        evaluee_id: i64,
    ) -> Result<MyResponsesResponse> {
        self.list_my_responses_impl(form_id, evaluator_id, evaluee_id)
            .await
    }

    async fn list_likert_responses_for_evaluee(
        &self,
        question_id: i64,
        evaluee_id: i64,
    ) -> Result<Vec<LikertResponse>> {
        self.list_likert_responses_for_evaluee_impl(question_id, evaluee_id)
            .await
    }

    async fn list_open_ended_responses_for_evaluee(
        &self,
        question_id: i64,
        evaluee_id: i64,
    ) -> Result<Vec<OpenEndedResponse>> {
        self.list_open_ended_responses_for_evaluee_impl(question_id, evaluee_id)
            .await
    }
}
