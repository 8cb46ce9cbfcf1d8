//! Synthesis-time error types.
//!
//! Only unresolved input aborts a profile. Duplicate pair declarations are
//! deliberately not pre-detected: they surface as duplicate-member compile
//! errors in the generated C#, which points straight at the offending
//! profile. Unmapped-pair and null-argument failures exist only inside the
//! generated code and are the artifact caller's concern.

use thiserror::Error;

/// Errors that abort a single profile's artifact.
///
/// The generation pass continues with the remaining profiles; failures are
/// collected and reported to the host with the profile name and pair index
/// so the offending declaration can be located.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisError {
    #[error("profile `{profile}`: pair {pair_index} references unresolved type `{type_name}`")]
    UnresolvedInput {
        profile: String,
        pair_index: usize,
        type_name: String,
    },
}
