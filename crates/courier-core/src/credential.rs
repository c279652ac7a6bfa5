//! The credential carried inside a remote access token.

use crate::error::Result;
use crate::stream::{StreamInput, StreamOutput};
use crate::version::ProtocolVersion;

/// A versioned, self-describing binary-serializable identity.
///
/// The codec writes [`Credential::version`] as a tag ahead of the credential
/// bytes and configures both the writer and the reader to that version, so
/// that version-gated fields line up on both ends.
pub trait Credential: Sized {
    /// The protocol version this credential is written for.
    fn version(&self) -> ProtocolVersion;

    /// Serialize into `out`, honoring `out.version()`.
    fn write_to(&self, out: &mut StreamOutput) -> Result<()>;

    /// Deserialize from `input`, honoring `input.version()`.
    fn read_from(input: &mut StreamInput) -> Result<Self>;
}
