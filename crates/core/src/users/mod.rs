//! Users module - account records and registration rules.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{NewUser, User};
pub use users_service::{validate_password, UserService};
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
