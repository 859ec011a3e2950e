pub mod attendance_service;
pub mod user_service;
