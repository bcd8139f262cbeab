pub mod auth;
pub mod courses;
pub mod forms;
pub mod responses;
pub mod teams;
pub mod users;

pub use auth::AuthService;
pub use courses::CourseService;
pub use forms::FormService;
pub use responses::ResponseService;
pub use teams::TeamService;
pub use users::UserService;
