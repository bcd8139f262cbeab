use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::OauthSubject)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::ProfileName).string().null())
                    .col(ColumnDef::new(Users::AvatarUrl).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::ProfessorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Courses::JoinCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::Code).string().not_null())
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Semester).string().not_null())
                    .col(ColumnDef::new(Courses::Year).integer().not_null())
                    .col(ColumnDef::new(Courses::Color).string().not_null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::ProfessorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建选课表（学生-课程关联）
        manager
            .create_table(
                Table::create()
                    .table(CourseStudents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseStudents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourseStudents::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseStudents::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseStudents::JoinedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseStudents::Table, CourseStudents::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseStudents::Table, CourseStudents::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建小组表
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teams::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Teams::Name).string().not_null())
                    .col(ColumnDef::new(Teams::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Teams::Table, Teams::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建小组成员表
        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeamMembers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeamMembers::TeamId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamMembers::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamMembers::Table, TeamMembers::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamMembers::Table, TeamMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评价表单表
        manager
            .create_table(
                Table::create()
                    .table(CourseForms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseForms::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourseForms::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseForms::Name).string().not_null())
                    .col(ColumnDef::new(CourseForms::State).string().not_null())
                    .col(ColumnDef::new(CourseForms::DueAt).big_integer().null())
                    .col(
                        ColumnDef::new(CourseForms::AllowLate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CourseForms::SelfEvaluate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(CourseForms::Color1).string().not_null())
                    .col(ColumnDef::new(CourseForms::Color2).string().not_null())
                    .col(ColumnDef::new(CourseForms::Color3).string().not_null())
                    .col(ColumnDef::new(CourseForms::Color4).string().not_null())
                    .col(ColumnDef::new(CourseForms::Color5).string().not_null())
                    .col(
                        ColumnDef::new(CourseForms::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseForms::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseForms::Table, CourseForms::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建表单-小组关联表（限定互评范围）
        manager
            .create_table(
                Table::create()
                    .table(FormTeams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FormTeams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FormTeams::FormId).big_integer().not_null())
                    .col(ColumnDef::new(FormTeams::TeamId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(FormTeams::Table, FormTeams::FormId)
                            .to(CourseForms::Table, CourseForms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FormTeams::Table, FormTeams::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建李克特量表问题表
        manager
            .create_table(
                Table::create()
                    .table(LikertQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LikertQuestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LikertQuestions::FormId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LikertQuestions::Prompt).text().not_null())
                    .col(
                        ColumnDef::new(LikertQuestions::Order)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LikertQuestions::Option1)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LikertQuestions::Option2)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LikertQuestions::Option3)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LikertQuestions::Option4)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LikertQuestions::Option5)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LikertQuestions::Table, LikertQuestions::FormId)
                            .to(CourseForms::Table, CourseForms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建开放式问题表
        manager
            .create_table(
                Table::create()
                    .table(OpenEndedQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OpenEndedQuestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OpenEndedQuestions::FormId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OpenEndedQuestions::Prompt)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OpenEndedQuestions::Order)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OpenEndedQuestions::Table, OpenEndedQuestions::FormId)
                            .to(CourseForms::Table, CourseForms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建李克特回答表
        manager
            .create_table(
                Table::create()
                    .table(LikertResponses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LikertResponses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LikertResponses::EvaluatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LikertResponses::EvalueeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LikertResponses::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LikertResponses::Answer)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LikertResponses::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LikertResponses::Table, LikertResponses::EvaluatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LikertResponses::Table, LikertResponses::EvalueeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LikertResponses::Table, LikertResponses::QuestionId)
                            .to(LikertQuestions::Table, LikertQuestions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建开放式回答表
        manager
            .create_table(
                Table::create()
                    .table(OpenEndedResponses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OpenEndedResponses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OpenEndedResponses::EvaluatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OpenEndedResponses::EvalueeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OpenEndedResponses::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OpenEndedResponses::Answer)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OpenEndedResponses::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OpenEndedResponses::Table, OpenEndedResponses::EvaluatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OpenEndedResponses::Table, OpenEndedResponses::EvalueeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OpenEndedResponses::Table, OpenEndedResponses::QuestionId)
                            .to(OpenEndedQuestions::Table, OpenEndedQuestions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 回答表的 (评价者, 被评价者, 问题) 三元组唯一索引，支撑 upsert 语义
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_likert_responses_triple")
                    .table(LikertResponses::Table)
                    .col(LikertResponses::EvaluatorId)
                    .col(LikertResponses::EvalueeId)
                    .col(LikertResponses::QuestionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_open_ended_responses_triple")
                    .table(OpenEndedResponses::Table)
                    .col(OpenEndedResponses::EvaluatorId)
                    .col(OpenEndedResponses::EvalueeId)
                    .col(OpenEndedResponses::QuestionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 聚合查询按 (问题, 被评价者) 扫描
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_likert_responses_question_evaluee")
                    .table(LikertResponses::Table)
                    .col(LikertResponses::QuestionId)
                    .col(LikertResponses::EvalueeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_open_ended_responses_question_evaluee")
                    .table(OpenEndedResponses::Table)
                    .col(OpenEndedResponses::QuestionId)
                    .col(OpenEndedResponses::EvalueeId)
                    .to_owned(),
            )
            .await?;

        // 课程表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courses_join_code")
                    .table(Courses::Table)
                    .col(Courses::JoinCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courses_professor_id")
                    .table(Courses::Table)
                    .col(Courses::ProfessorId)
                    .to_owned(),
            )
            .await?;

        // 选课表唯一索引（同一学生不能重复加入同一课程）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_students_course_user")
                    .table(CourseStudents::Table)
                    .col(CourseStudents::CourseId)
                    .col(CourseStudents::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 小组成员唯一索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_team_members_team_user")
                    .table(TeamMembers::Table)
                    .col(TeamMembers::TeamId)
                    .col(TeamMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 表单表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_forms_course_id")
                    .table(CourseForms::Table)
                    .col(CourseForms::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(OpenEndedResponses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LikertResponses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OpenEndedQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LikertQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FormTeams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseForms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseStudents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    OauthSubject,
    Role,
    Status,
    ProfileName,
    AvatarUrl,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    ProfessorId,
    JoinCode,
    Code,
    Title,
    Semester,
    Year,
    Color,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CourseStudents {
    #[sea_orm(iden = "course_students")]
    Table,
    Id,
    CourseId,
    UserId,
    JoinedAt,
}

#[derive(DeriveIden)]
enum Teams {
    #[sea_orm(iden = "teams")]
    Table,
    Id,
    CourseId,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TeamMembers {
    #[sea_orm(iden = "team_members")]
    Table,
    Id,
    TeamId,
    UserId,
}

#[derive(DeriveIden)]
enum CourseForms {
    #[sea_orm(iden = "course_forms")]
    Table,
    Id,
    CourseId,
    Name,
    State,
    DueAt,
    AllowLate,
    SelfEvaluate,
    #[sea_orm(iden = "color_1")]
    Color1,
    #[sea_orm(iden = "color_2")]
    Color2,
    #[sea_orm(iden = "color_3")]
    Color3,
    #[sea_orm(iden = "color_4")]
    Color4,
    #[sea_orm(iden = "color_5")]
    Color5,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FormTeams {
    #[sea_orm(iden = "form_teams")]
    Table,
    Id,
    FormId,
    TeamId,
}

#[derive(DeriveIden)]
enum LikertQuestions {
    #[sea_orm(iden = "likert_questions")]
    Table,
    Id,
    FormId,
    Prompt,
    Order,
    #[sea_orm(iden = "option_1")]
    Option1,
    #[sea_orm(iden = "option_2")]
    Option2,
    #[sea_orm(iden = "option_3")]
    Option3,
    #[sea_orm(iden = "option_4")]
    Option4,
    #[sea_orm(iden = "option_5")]
    Option5,
}

#[derive(DeriveIden)]
enum OpenEndedQuestions {
    #[sea_orm(iden = "open_ended_questions")]
    Table,
    Id,
    FormId,
    Prompt,
    Order,
}

#[derive(DeriveIden)]
enum LikertResponses {
    #[sea_orm(iden = "likert_responses")]
    Table,
    Id,
    EvaluatorId,
    EvalueeId,
    QuestionId,
    Answer,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum OpenEndedResponses {
    #[sea_orm(iden = "open_ended_responses")]
    Table,
    Id,
    EvaluatorId,
    EvalueeId,
    QuestionId,
    Answer,
    SubmittedAt,
}
