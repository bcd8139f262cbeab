pub use super::course_forms::Entity as CourseForms;
pub use super::course_students::Entity as CourseStudents;
pub use super::courses::Entity as Courses;
pub use super::form_teams::Entity as FormTeams;
pub use super::likert_questions::Entity as LikertQuestions;
pub use super::likert_responses::Entity as LikertResponses;
pub use super::open_ended_questions::Entity as OpenEndedQuestions;
pub use super::open_ended_responses::Entity as OpenEndedResponses;
pub use super::team_members::Entity as TeamMembers;
pub use super::teams::Entity as Teams;
pub use super::users::Entity as Users;
