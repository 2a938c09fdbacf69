pub mod auth;

pub mod profile;

pub mod hr;

pub mod teacher;

pub use auth::configure_auth_routes;
pub use hr::configure_hr_routes;
pub use profile::configure_profile_routes;
pub use teacher::configure_teacher_routes;
