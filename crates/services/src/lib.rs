#![forbid(unsafe_code)]

pub mod api_client;
pub mod app_services;
pub mod desk;
pub mod error;
pub mod state_service;
pub mod task_service;

pub use desk_core::Clock;

pub use api_client::ApiClient;
pub use app_services::AppServices;
pub use desk::StudyDesk;
pub use error::{
    ApiClientError, AppServicesError, PersistError, SaveExamError, StateServiceError,
    TaskServiceError,
};
pub use state_service::{DeskState, StateService};
pub use task_service::TaskService;
