pub mod auth;
pub mod extract;
pub mod response;

pub use auth::{authenticate, require_admin, require_role, CurrentUser};
pub use extract::Json;
pub use response::{ApiResponse, ApiResult, MessageBody, MessageWithData};
