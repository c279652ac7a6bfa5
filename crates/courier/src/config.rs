//! Codec configuration.

use courier_perms::ParserConfig;

/// Default cap on permission sets per token.
pub const DEFAULT_MAX_PERMISSION_SETS: usize = 64;

/// Default cap on the size of one permission block (1 MiB).
pub const DEFAULT_MAX_BLOCK_LEN: usize = 1024 * 1024;

/// Configuration for the remote access codec.
///
/// Limits apply on both sides: encoding past a limit fails with
/// [`CodecError::Serialization`](crate::CodecError::Serialization), decoding
/// past one fails with [`CodecError::Deserialization`](crate::CodecError::Deserialization)
/// before anything is allocated for the offending field.
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Maximum number of permission sets in one intersection.
    pub max_permission_sets: usize,
    /// Maximum size in bytes of one permission block.
    pub max_block_len: usize,
    /// How raw permission blocks are parsed.
    pub parser: ParserConfig,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_permission_sets: DEFAULT_MAX_PERMISSION_SETS,
            max_block_len: DEFAULT_MAX_BLOCK_LEN,
            parser: ParserConfig::default(),
        }
    }
}
