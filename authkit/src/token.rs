use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Digest;
use sha2::Sha256;

/// Raw size of a generated opaque token (256 bits of entropy).
const TOKEN_BYTES: usize = 32;

/// Generate a cryptographically random opaque token.
///
/// Draws 32 bytes from the operating system RNG and hex-encodes them,
/// giving a 64-character token with 256 bits of entropy. Suitable for
/// out-of-band credentials such as password-reset tokens.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Keyed deterministic digest for opaque tokens.
///
/// Unlike the salted password hash, this digest is stable for a given key and
/// token, so stored token hashes can be found by an indexed equality lookup.
/// The key keeps a leaked table of digests from being checked against
/// candidate tokens without also holding server configuration.
///
/// Only ever feed this high-entropy generated tokens, never user-chosen
/// secrets: determinism makes low-entropy inputs enumerable.
pub struct TokenHasher {
    key: Vec<u8>,
}

impl TokenHasher {
    pub fn new(key: &[u8]) -> Self {
        Self { key: key.to_vec() }
    }

    /// Digest a token to its stored lookup form (hex-encoded SHA-256 over
    /// key and token).
    pub fn hash(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.key);
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}
