pub mod auth;

pub mod users;

pub mod courses;

pub mod teams;

pub mod forms;

pub mod responses;

pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use forms::configure_forms_routes;
pub use responses::configure_responses_routes;
pub use teams::configure_teams_routes;
pub use users::configure_user_routes;
