pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use claims::Identity;
pub use errors::AuthError;
pub use errors::IssueError;
pub use handler::JwtHandler;
pub use handler::DEFAULT_TOKEN_TTL_MINUTES;
