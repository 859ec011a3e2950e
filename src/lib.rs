pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Arc;

use crate::database::repository::Repository;
use crate::services::{attendance_service::AttendanceService, user_service::UserService};
use crate::storage::FileStorage;

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub attendance_service: AttendanceService,
}

impl AppState {
    pub fn new(repository: Arc<dyn Repository>, storage: Arc<dyn FileStorage>) -> Self {
        let user_service = UserService::new(repository.clone());
        let attendance_service = AttendanceService::new(repository, storage);

        Self {
            user_service,
            attendance_service,
        }
    }
}
