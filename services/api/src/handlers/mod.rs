pub mod apps;
pub mod auth;
pub mod comments;
pub mod dashboard;
pub mod evidence;
pub mod findings;
pub mod risks;
pub mod users;
