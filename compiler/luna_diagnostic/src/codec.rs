//! Binary persistence for [`DiagnosticInfo`].
//!
//! The blob is opaque bincode. The only contract is the round-trip: decoding
//! an encoded info yields an equal info.

use crate::DiagnosticInfo;

/// Error encoding or decoding a diagnostic blob.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to encode diagnostic: {0}")]
    Encode(#[source] bincode::Error),
    #[error("failed to decode diagnostic: {0}")]
    Decode(#[source] bincode::Error),
}

pub fn encode_info(info: &DiagnosticInfo) -> Result<Vec<u8>, CodecError> {
    bincode::serialize(info).map_err(CodecError::Encode)
}

pub fn decode_info(bytes: &[u8]) -> Result<DiagnosticInfo, CodecError> {
    bincode::deserialize(bytes).map_err(CodecError::Decode)
}

/// Encode a batch, e.g. the syntax diagnostics of a cached tree.
pub fn encode_infos(infos: &[DiagnosticInfo]) -> Result<Vec<u8>, CodecError> {
    bincode::serialize(infos).map_err(CodecError::Encode)
}

pub fn decode_infos(bytes: &[u8]) -> Result<Vec<DiagnosticInfo>, CodecError> {
    bincode::deserialize(bytes).map_err(CodecError::Decode)
}
