//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::course_students;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::team_members;
use crate::entity::users;
use crate::errors::{CollabRateError, Result};
use crate::models::{
    PaginationInfo,
    common::PaginationQuery,
    courses::{
        entities::{COURSE_COLOR_PALETTE, Course},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::{CourseListResponse, CourseStudentListResponse},
    },
};
use crate::utils::{escape_like_pattern, random_code::generate_random_code};
use rand::seq::IndexedRandom;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 生成不与现有课程冲突的加入码
    async fn unique_join_code(&self) -> Result<String> {
        loop {
            let code = generate_random_code(6);
            let exists = Courses::find()
                .filter(Column::JoinCode.eq(&code))
                .one(&self.db)
                .await
                .map_err(|e| {
                    CollabRateError::database_operation(format!("查询加入码失败: {e}"))
                })?;
            if exists.is_none() {
                return Ok(code);
            }
        }
    }

    /// 创建课程，加入码和卡片颜色在这里生成
    pub async fn create_course_impl(
        &self,
        professor_id: i64,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();
        let join_code = self.unique_join_code().await?;

        let color = match req.color {
            Some(c) => c,
            None => {
                let mut rng = rand::rng();
                COURSE_COLOR_PALETTE
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or("#3498db")
                    .to_string()
            }
        };

        let model = ActiveModel {
            professor_id: Set(professor_id),
            join_code: Set(join_code),
            code: Set(req.code),
            title: Set(req.title),
            semester: Set(req.semester.to_string()),
            year: Set(req.year),
            color: Set(color),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 通过加入码获取课程
    pub async fn get_course_by_code_impl(&self, join_code: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::JoinCode.eq(join_code))
            .one(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Courses::find();

        // 教授筛选
        if let Some(professor_id) = query.professor_id {
            select = select.filter(Column::ProfessorId.eq(professor_id));
        }

        // 学生筛选（已加入的课程）
        if let Some(student_id) = query.student_id {
            select = select
                .join(JoinType::InnerJoin, crate::entity::courses::Relation::CourseStudents.def())
                .filter(course_students::Column::UserId.eq(student_id));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Code.contains(&escaped))
                    .add(Column::Title.contains(&escaped)),
            );
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询课程总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询课程页数失败: {e}")))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let existing = self.get_course_by_id_impl(course_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(course_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(code) = update.code {
            model.code = Set(code);
        }

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(semester) = update.semester {
            model.semester = Set(semester.to_string());
        }

        if let Some(year) = update.year {
            model.year = Set(year);
        }

        if let Some(color) = update.color {
            model.color = Set(color);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("更新课程失败: {e}")))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 删除课程
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(course_id)
            .exec(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生加入课程，已加入时返回 false
    pub async fn enroll_student_impl(&self, course_id: i64, user_id: i64) -> Result<bool> {
        if self.is_student_enrolled_impl(course_id, user_id).await? {
            return Ok(false);
        }

        let model = course_students::ActiveModel {
            course_id: Set(course_id),
            user_id: Set(user_id),
            joined_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("加入课程失败: {e}")))?;

        Ok(true)
    }

    /// 学生退出课程，课程内的小组成员资格一并移除
    pub async fn unenroll_student_impl(&self, course_id: i64, user_id: i64) -> Result<bool> {
        if let Some(team) = self.get_user_team_in_course_impl(course_id, user_id).await? {
            team_members::Entity::delete_many()
                .filter(team_members::Column::TeamId.eq(team.id))
                .filter(team_members::Column::UserId.eq(user_id))
                .exec(&self.db)
                .await
                .map_err(|e| {
                    CollabRateError::database_operation(format!("移除小组成员失败: {e}"))
                })?;
        }

        let result = course_students::Entity::delete_many()
            .filter(course_students::Column::CourseId.eq(course_id))
            .filter(course_students::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("退出课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 查询学生是否在课程中
    pub async fn is_student_enrolled_impl(&self, course_id: i64, user_id: i64) -> Result<bool> {
        let count = course_students::Entity::find()
            .filter(course_students::Column::CourseId.eq(course_id))
            .filter(course_students::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(count > 0)
    }

    /// 分页列出课程学生名单
    pub async fn list_course_students_with_pagination_impl(
        &self,
        course_id: i64,
        query: PaginationQuery,
    ) -> Result<CourseStudentListResponse> {
        let page = query.page.max(1) as u64;
        let size = query.size.clamp(1, 100) as u64;

        let select = users::Entity::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::users::Relation::CourseStudents.def(),
            )
            .filter(course_students::Column::CourseId.eq(course_id))
            .order_by_asc(users::Column::Username);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            CollabRateError::database_operation(format!("查询学生总数失败: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            CollabRateError::database_operation(format!("查询学生页数失败: {e}"))
        })?;

        let students = paginator.fetch_page(page - 1).await.map_err(|e| {
            CollabRateError::database_operation(format!("查询学生名单失败: {e}"))
        })?;

        Ok(CourseStudentListResponse {
            items: students.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{courses, users};
    use crate::models::teams::requests::CreateTeamRequest;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    // 内存库 + 迁移 + 最小数据集：一个教授、两个学生、一门课程
    async fn storage_with_fixtures() -> SeaOrmStorage {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        let storage = SeaOrmStorage { db };

        let now = chrono::Utc::now().timestamp();
        for (id, name) in [(1, "prof"), (2, "alice"), (3, "bob")] {
            let user = users::ActiveModel {
                id: Set(id),
                username: Set(name.to_string()),
                email: Set(format!("{name}@example.edu")),
                oauth_subject: Set(format!("sub-{name}")),
                role: Set(if id == 1 { "professor" } else { "student" }.to_string()),
                status: Set("active".to_string()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            user.insert(&storage.db).await.expect("insert user");
        }

        let course = courses::ActiveModel {
            id: Set(1),
            professor_id: Set(1),
            join_code: Set("ABC123".to_string()),
            code: Set("CSCI2254".to_string()),
            title: Set("Web Application Development".to_string()),
            semester: Set("fall".to_string()),
            year: Set(2026),
            color: Set("#3498db".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        course.insert(&storage.db).await.expect("insert course");

        storage
    }

    #[tokio::test]
    async fn duplicate_enrollment_is_rejected() {
        let storage = storage_with_fixtures().await;

        assert!(storage.enroll_student_impl(1, 2).await.unwrap());
        assert!(!storage.enroll_student_impl(1, 2).await.unwrap());
        assert!(storage.is_student_enrolled_impl(1, 2).await.unwrap());
    }

    #[tokio::test]
    async fn leaving_removes_enrollment_and_team_membership() {
        let storage = storage_with_fixtures().await;

        storage.enroll_student_impl(1, 2).await.unwrap();
        storage.enroll_student_impl(1, 3).await.unwrap();
        let team = storage
            .create_team_impl(
                1,
                CreateTeamRequest {
                    name: "Team Rocket".to_string(),
                    member_ids: vec![2, 3],
                },
            )
            .await
            .unwrap();

        assert!(storage.unenroll_student_impl(1, 2).await.unwrap());

        assert!(!storage.is_student_enrolled_impl(1, 2).await.unwrap());
        assert!(
            storage
                .get_user_team_in_course_impl(1, 2)
                .await
                .unwrap()
                .is_none()
        );
        // 同组的其他成员不受影响
        assert_eq!(
            storage.list_team_member_ids_impl(team.team.id).await.unwrap(),
            vec![3]
        );
    }

    #[tokio::test]
    async fn leaving_without_enrollment_reports_false() {
        let storage = storage_with_fixtures().await;

        assert!(!storage.unenroll_student_impl(1, 2).await.unwrap());
    }
}
