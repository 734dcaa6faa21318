pub mod argon2;
pub mod bcrypt;
pub mod errors;
pub mod hasher;
pub mod pbkdf2;
pub mod scheme;

pub use self::argon2::Argon2Scheme;
pub use self::bcrypt::BcryptScheme;
pub use self::errors::PasswordError;
pub use self::hasher::PasswordHasher;
pub use self::pbkdf2::Pbkdf2Scheme;
pub use self::scheme::PasswordScheme;
