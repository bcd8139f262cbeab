use std::sync::Arc;

use crate::models::{
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

use crate::models::common::PaginationQuery;

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建 OAuth 用户（首次登录自动注册）
    async fn create_oauth_user(
        &self,
        subject: &str,
        email: &str,
        username: &str,
        profile_name: &str,
        role: UserRole,
    ) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过 OAuth subject 获取用户信息
    async fn get_user_by_oauth_subject(&self, subject: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 课程管理方法
    // 创建课程，加入码和卡片颜色由存储层生成
    async fn create_course(
        &self,
        professor_id: i64,
        course: CreateCourseRequest,
    ) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 通过加入码获取课程信息
    async fn get_course_by_code(&self, join_code: &str) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程信息
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程
    async fn delete_course(&self, course_id: i64) -> Result<bool>;
    // 学生加入课程，已加入时返回 false
    async fn enroll_student(&self, course_id: i64, user_id: i64) -> Result<bool>;
    // 学生退出课程，课程内的小组成员资格一并移除；未加入时返回 false
    async fn unenroll_student(&self, course_id: i64, user_id: i64) -> Result<bool>;
    // 查询学生是否在课程中
    async fn is_student_enrolled(&self, course_id: i64, user_id: i64) -> Result<bool>;
    // 列出课程学生名单
    async fn list_course_students_with_pagination(
        &self,
        course_id: i64,
        query: PaginationQuery,
    ) -> Result<CourseStudentListResponse>;

    /// 小组管理方法
    // 创建小组
    async fn create_team(
        &self,
        course_id: i64,
        team: CreateTeamRequest,
    ) -> Result<TeamWithMembers>;
    // 通过ID获取小组信息
    async fn get_team_by_id(&self, team_id: i64) -> Result<Option<Team>>;
    // 获取小组及其成员
    async fn get_team_with_members(&self, team_id: i64) -> Result<Option<TeamWithMembers>>;
    // 列出课程下的小组
    async fn list_course_teams(&self, course_id: i64) -> Result<Vec<TeamWithMembers>>;
    // 更新小组信息
    async fn update_team(
        &self,
        team_id: i64,
        update: UpdateTeamRequest,
    ) -> Result<Option<TeamWithMembers>>;
    // 删除小组
    async fn delete_team(&self, team_id: i64) -> Result<bool>;
    // 获取学生在课程内所属的小组
    async fn get_user_team_in_course(&self, course_id: i64, user_id: i64)
    -> Result<Option<Team>>;
    // 列出小组成员ID
    async fn list_team_member_ids(&self, team_id: i64) -> Result<Vec<i64>>;

    /// 表单管理方法
    // 创建表单及其问题
    async fn create_form(
        &self,
        course_id: i64,
        data: FormWriteData,
        likert: Vec<LikertQuestionSeed>,
        open_ended: Vec<String>,
    ) -> Result<FormDetailResponse>;
    // 通过ID获取表单信息
    async fn get_form_by_id(&self, form_id: i64) -> Result<Option<CourseForm>>;
    // 获取表单及其问题
    async fn get_form_detail(&self, form_id: i64) -> Result<Option<FormDetailResponse>>;
    // 列出课程下的表单
    async fn list_course_forms(&self, course_id: i64) -> Result<Vec<CourseForm>>;
    // 更新表单基本信息
    async fn update_form(
        &self,
        form_id: i64,
        update: FormUpdateData,
    ) -> Result<Option<CourseForm>>;
    // 推进表单状态
    async fn set_form_state(&self, form_id: i64, state: FormState) -> Result<bool>;
    // 整组替换表单问题，旧问题连同回答一并删除
    async fn replace_form_questions(
        &self,
        form_id: i64,
        likert: Vec<LikertQuestionSeed>,
        open_ended: Vec<String>,
    ) -> Result<Option<FormDetailResponse>>;
    // 删除表单
    async fn delete_form(&self, form_id: i64) -> Result<bool>;
    // 获取单个 Likert 问题
    async fn get_likert_question(&self, question_id: i64) -> Result<Option<LikertQuestion>>;
    // 获取单个开放问题
    async fn get_open_ended_question(
        &self,
        question_id: i64,
    ) -> Result<Option<OpenEndedQuestion>>;

    /// 回答管理方法
    // 写入 Likert 回答，同键覆盖旧值
    async fn upsert_likert_response(
        &self,
        key: ResponseKey,
        rating: i32,
    ) -> Result<LikertResponse>;
    // 写入开放问题回答，同键覆盖旧值
    async fn upsert_open_ended_response(
        &self,
        key: ResponseKey,
        text: &str,
    ) -> Result<OpenEndedResponse>;
    // 查询自己对某人的全部回答
    async fn list_my_responses(
        &self,
        form_id: i64,
        evaluator_id: i64,
        evaluee_id: i64,
    ) -> Result<MyResponsesResponse>;
    // 某个 Likert 问题下某人收到的全部回答
    async fn list_likert_responses_for_evaluee(
        &self,
        question_id: i64,
        evaluee_id: i64,
    ) -> Result<Vec<LikertResponse>>;
    // 某个开放问题下某人收到的全部回答，按评估人ID排序
    async fn list_open_ended_responses_for_evaluee(
        &self,
        question_id: i64,
        evaluee_id: i64,
    ) -> Result<Vec<OpenEndedResponse>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
