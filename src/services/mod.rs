pub mod auth;
pub use auth::{AuthError, AuthService};

pub mod uploads;
pub use uploads::{UploadError, UploadService, UploadedFile};
