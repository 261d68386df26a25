pub mod auth;
pub mod dashboard;
pub mod users;

pub use self::auth::service::{AccountError, AuthService};
pub use self::dashboard::controller::DashboardResponse;
