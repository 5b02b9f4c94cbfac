/// Token prefix. Every JAB token starts with `JAB|`.
pub const PREFIX: &str = "JAB";

/// Separates the prefix, the schema id and the bracketed sections.
pub const DELIMITER: &str = "|";

/// 2^53 - 1, the largest integer a JSON/JavaScript number holds exactly.
/// Identity hashes are reduced modulo this value.
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Identity hashes fold the 32-byte digest down to this many bytes.
pub const HASH_FOLD_LEN: usize = 8;

/// PBKDF2-HMAC-SHA256 defaults for passphrase-derived keys.
pub const DEFAULT_KDF_ITERATIONS: u32 = 65_536;
pub const KDF_OUTPUT_LEN: usize = 32;

/// Deflate level used when no config overrides it.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Algorithm names. They take part in key identity hashing, so changing one
/// changes every key id derived with it.
pub mod alg_names {
    pub const AES256_GCM: &str = "AES-256-GCM";
    pub const CHACHA20_POLY1305: &str = "ChaCha20-Poly1305";
    pub const HMAC_SHA256: &str = "HmacSHA256";
    pub const ED25519: &str = "Ed25519";
    pub const X25519_CHACHA20_POLY1305: &str = "X25519-ChaCha20-Poly1305";
}

/// Key and IV lengths (bytes).
pub const SYMMETRIC_KEY_LEN: usize = 32;
pub const IV_LEN_12: usize = 12;
pub const MAC_KEY_LEN: usize = 32;
pub const X25519_KEY_LEN: usize = 32;
pub const ED25519_KEY_LEN: usize = 32;
