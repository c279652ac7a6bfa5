//! The remote access token codec.
//!
//! A token is the Base64 text of one binary buffer:
//!
//! ```text
//! [version: vint][credential bytes][count: vint][block: vint len + JSON]*count
//! ```
//!
//! The version tag comes first so a reader can configure itself before any
//! version-gated credential field is read.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use courier_context::ContextStore;
use courier_core::{Credential, StreamInput, StreamOutput};
use courier_perms::{
    write_permission_block, ParserConfig, PermissionDescriptor, PermissionIntersection,
    PermissionSet,
};

use crate::block::RawPermissionBlock;
use crate::config::CodecConfig;
use crate::error::{CodecError, DecodeError, Result};
use crate::fingerprint::TokenFingerprint;

/// Header key under which the token travels in a request context.
pub const REMOTE_ACCESS_AUTHENTICATION_HEADER: &str = "_remote_access_authentication";

/// A decoded token: the credential plus its permission blocks, unparsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteAccessAuthentication<C> {
    authentication: C,
    permission_blocks: Vec<RawPermissionBlock>,
}

impl<C> RemoteAccessAuthentication<C> {
    pub fn new(authentication: C, permission_blocks: Vec<RawPermissionBlock>) -> Self {
        Self {
            authentication,
            permission_blocks,
        }
    }

    pub fn authentication(&self) -> &C {
        &self.authentication
    }

    /// Blocks in the order they were encoded.
    pub fn permission_blocks(&self) -> &[RawPermissionBlock] {
        &self.permission_blocks
    }

    pub fn into_parts(self) -> (C, Vec<RawPermissionBlock>) {
        (self.authentication, self.permission_blocks)
    }

    /// Parse every block, stopping at the first malformed one.
    ///
    /// Uses the default parser configuration; see
    /// [`RemoteAccessCodec::parse_permission_sets`] for a configured parse.
    pub fn parse_permission_sets<D: PermissionDescriptor>(
        &self,
    ) -> Result<PermissionIntersection<D>> {
        self.parse_permission_sets_with(&ParserConfig::default())
    }

    pub fn parse_permission_sets_with<D: PermissionDescriptor>(
        &self,
        config: &ParserConfig,
    ) -> Result<PermissionIntersection<D>> {
        let sets = self
            .permission_blocks
            .iter()
            .map(|block| block.parse_with::<D>(config))
            .collect::<std::result::Result<Vec<PermissionSet<D>>, _>>()?;
        Ok(PermissionIntersection::new(sets))
    }
}

/// Encodes and decodes remote access tokens under a [`CodecConfig`].
#[derive(Debug, Clone, Default)]
pub struct RemoteAccessCodec {
    config: CodecConfig,
}

impl RemoteAccessCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Parse every block of `decoded` with this codec's parser configuration.
    pub fn parse_permission_sets<C, D: PermissionDescriptor>(
        &self,
        decoded: &RemoteAccessAuthentication<C>,
    ) -> Result<PermissionIntersection<D>> {
        decoded.parse_permission_sets_with(&self.config.parser)
    }

    /// Encode a credential and a permission intersection into a token.
    ///
    /// Nothing is produced on failure.
    pub fn encode<C, D>(
        &self,
        authentication: &C,
        intersection: &PermissionIntersection<D>,
    ) -> Result<String>
    where
        C: Credential,
        D: PermissionDescriptor,
    {
        if intersection.len() > self.config.max_permission_sets {
            return Err(CodecError::Serialization(format!(
                "{} permission sets exceeds limit of {}",
                intersection.len(),
                self.config.max_permission_sets
            )));
        }

        let version = authentication.version();
        let mut out = StreamOutput::with_version(version);
        out.write_version(version);
        authentication
            .write_to(&mut out)
            .map_err(|e| CodecError::Serialization(format!("credential: {e}")))?;
        out.write_len(intersection.len())
            .map_err(|e| CodecError::Serialization(e.to_string()))?;

        for (i, set) in intersection.iter().enumerate() {
            let block = write_permission_block(set)
                .map_err(|e| CodecError::Serialization(format!("permission set [{i}]: {e}")))?;
            if block.len() > self.config.max_block_len {
                return Err(CodecError::Serialization(format!(
                    "permission set [{i}] is {} bytes, limit is {}",
                    block.len(),
                    self.config.max_block_len
                )));
            }
            out.write_bytes_block(&block)
                .map_err(|e| CodecError::Serialization(format!("permission set [{i}]: {e}")))?;
        }

        Ok(STANDARD.encode(out.freeze()))
    }

    /// Decode a token into its credential and raw permission blocks.
    ///
    /// Blocks are sliced out but not parsed. The token carries no checksum,
    /// so only structural damage is rejected: bad Base64, truncation, an
    /// unknown version, an invalid field value, or trailing bytes. A change
    /// that keeps the structure intact decodes to a different value.
    pub fn decode<C: Credential>(&self, token: &str) -> Result<RemoteAccessAuthentication<C>> {
        Ok(self.decode_inner(token)?)
    }

    fn decode_inner<C: Credential>(
        &self,
        token: &str,
    ) -> std::result::Result<RemoteAccessAuthentication<C>, DecodeError> {
        let bytes = STANDARD.decode(token)?;
        let mut input = StreamInput::new(bytes);

        let version = input.read_version()?;
        input.set_version(version);
        let authentication = C::read_from(&mut input)?;

        let count = input.read_len()?;
        if count > self.config.max_permission_sets {
            return Err(DecodeError::TooManyPermissionSets {
                declared: count,
                max: self.config.max_permission_sets,
            });
        }

        let mut permission_blocks = Vec::with_capacity(count);
        for _ in 0..count {
            let block = input.read_bytes_block()?;
            if block.len() > self.config.max_block_len {
                return Err(DecodeError::BlockTooLarge {
                    len: block.len(),
                    max: self.config.max_block_len,
                });
            }
            permission_blocks.push(RawPermissionBlock::from(block));
        }
        input.ensure_exhausted()?;

        Ok(RemoteAccessAuthentication::new(
            authentication,
            permission_blocks,
        ))
    }

    /// Encode and store the token under [`REMOTE_ACCESS_AUTHENTICATION_HEADER`].
    ///
    /// Duplicate handling is the store's: [`courier_context::ThreadContext`]
    /// refuses a second write.
    pub fn write_to_context<S, C, D>(
        &self,
        store: &S,
        authentication: &C,
        intersection: &PermissionIntersection<D>,
    ) -> Result<()>
    where
        S: ContextStore + ?Sized,
        C: Credential,
        D: PermissionDescriptor,
    {
        let token = self.encode(authentication, intersection)?;
        let fingerprint = TokenFingerprint::of(&token);
        store.put_header(REMOTE_ACCESS_AUTHENTICATION_HEADER, token)?;

        tracing::debug!(
            header = REMOTE_ACCESS_AUTHENTICATION_HEADER,
            %fingerprint,
            blocks = intersection.len(),
            "wrote remote access authentication"
        );
        Ok(())
    }

    /// Fetch and decode the token from the context.
    ///
    /// A missing header is [`CodecError::NotPresent`], never a decode error.
    pub fn read_from_context<S, C>(&self, store: &S) -> Result<RemoteAccessAuthentication<C>>
    where
        S: ContextStore + ?Sized,
        C: Credential,
    {
        let token = store
            .get_header(REMOTE_ACCESS_AUTHENTICATION_HEADER)
            .ok_or_else(|| CodecError::NotPresent(REMOTE_ACCESS_AUTHENTICATION_HEADER.to_string()))?;
        let fingerprint = TokenFingerprint::of(&token);

        match self.decode(&token) {
            Ok(decoded) => {
                tracing::debug!(
                    header = REMOTE_ACCESS_AUTHENTICATION_HEADER,
                    %fingerprint,
                    blocks = decoded.permission_blocks().len(),
                    "read remote access authentication"
                );
                Ok(decoded)
            }
            Err(e) => {
                tracing::warn!(%fingerprint, "invalid remote access authentication header: {}", e);
                Err(e)
            }
        }
    }
}

/// [`RemoteAccessCodec::encode`] with the default configuration.
pub fn encode<C, D>(authentication: &C, intersection: &PermissionIntersection<D>) -> Result<String>
where
    C: Credential,
    D: PermissionDescriptor,
{
    RemoteAccessCodec::default().encode(authentication, intersection)
}

/// [`RemoteAccessCodec::decode`] with the default configuration.
pub fn decode<C: Credential>(token: &str) -> Result<RemoteAccessAuthentication<C>> {
    RemoteAccessCodec::default().decode(token)
}

/// [`RemoteAccessCodec::write_to_context`] with the default configuration.
pub fn write_to_context<S, C, D>(
    store: &S,
    authentication: &C,
    intersection: &PermissionIntersection<D>,
) -> Result<()>
where
    S: ContextStore + ?Sized,
    C: Credential,
    D: PermissionDescriptor,
{
    RemoteAccessCodec::default().write_to_context(store, authentication, intersection)
}

/// [`RemoteAccessCodec::read_from_context`] with the default configuration.
pub fn read_from_context<S, C>(store: &S) -> Result<RemoteAccessAuthentication<C>>
where
    S: ContextStore + ?Sized,
    C: Credential,
{
    RemoteAccessCodec::default().read_from_context(store)
}
