pub mod attendance_dto;
pub mod auth_dto;
