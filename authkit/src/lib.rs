//! Authentication primitives
//!
//! Building blocks for credential verification and token issuance:
//! - Password hashing (Argon2id)
//! - Signed, time-bound JWTs with an access/refresh discriminator
//! - Opaque token generation and keyed hashing for stored secrets
//!
//! The service crate defines its own ports and wires these implementations in.
//! Nothing here touches storage or transport.
//!
//! # Examples
//!
//! ## Password hashing
//! ```
//! use authkit::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Signed tokens
//! ```
//! use authkit::{Claims, TokenSigner};
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let signer = TokenSigner::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::access(Uuid::new_v4(), "user@example.com", Duration::minutes(15));
//! let token = signer.issue(&claims).unwrap();
//! assert_eq!(signer.verify(&token).unwrap(), claims);
//! ```
//!
//! ## Opaque tokens
//! ```
//! use authkit::{generate_token, TokenHasher};
//!
//! let token = generate_token();
//! let hasher = TokenHasher::new(b"hash_key");
//! // Deterministic: the same token always hashes to the same digest.
//! assert_eq!(hasher.hash(&token), hasher.hash(&token));
//! ```

pub mod jwt;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenKind;
pub use jwt::TokenSigner;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::generate_token;
pub use token::TokenHasher;
