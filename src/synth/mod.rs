//! Per-profile synthesis: expansion, correlation and assembly of the
//! interface and implementation blocks for one profile.
//!
//! The heavy lifting lives in the submodules; this module wires one
//! [`MappingSpec`] through expansion into a rendered artifact.
//!
//! ## See also
//! - [`conversion`]: the three per-pair routines
//! - [`dispatch`]: the ordered dispatch table and the two `Map` entry points
//! - [`crate::emit`]: namespace-scoped buffering and rendering

pub mod conversion;
pub mod dispatch;

use std::fmt::Write;

use crate::emit::NamespaceBuffer;
use crate::error::SynthesisError;
use crate::expand;
use crate::model::{GeneratedArtifact, MappingProfile, MappingSpec};

/// File-name convention for per-profile artifacts.
pub fn artifact_file_name(profile_name: &str) -> String {
    format!("M_{profile_name}.g.cs")
}

/// Synthesize one profile into its rendered artifact.
///
/// Expansion failures abort this profile only; the caller decides what to do
/// with the rest of the pass.
#[tracing::instrument(skip_all, fields(profile = %spec.profile_name, pair_count = spec.pairs.len()))]
pub fn synthesize_profile(
    spec: &MappingSpec,
    run_stamp: u32,
    timestamp: &str,
) -> Result<GeneratedArtifact, SynthesisError> {
    let profile = expand::expand(spec)?;
    tracing::debug!(effective_pairs = profile.effective_pairs.len(), "expanded profile");

    let file_name = artifact_file_name(&profile.name);
    let mut buffer = NamespaceBuffer::new(file_name.as_str(), run_stamp, timestamp);
    let scope = buffer.namespace_mut(&profile.namespace);
    scope.register_import("System");
    scope.register_import("System.Collections.Generic");
    scope.register_import("System.Linq");
    scope.push_block(&interface_block(&profile));
    scope.push_blank();
    scope.push_block(&implementation_block(&profile));

    Ok(GeneratedArtifact {
        file_name,
        run_stamp,
        contents: buffer.render(),
    })
}

/// `public partial interface I<Profile>` declaring the per-pair contract.
/// The two `Map` entry points come from the inherited `StaticMapper.IMapper`.
fn interface_block(profile: &MappingProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "public partial interface I{} : StaticMapper.IMapper", profile.name);
    out.push_str("{\n");
    for (index, pair) in profile.effective_pairs.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", conversion::pair_comment(pair));
        out.push_str(&conversion::interface_declarations(pair));
    }
    out.push_str("}\n");
    out
}

/// `internal partial class <Profile>`: the three routines per pair followed
/// by the two dispatch entry points.
fn implementation_block(profile: &MappingProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "internal partial class {name} : I{name}", name = profile.name);
    out.push_str("{\n");
    for pair in &profile.effective_pairs {
        let _ = writeln!(out, "{}", conversion::pair_comment(pair));
        out.push_str(&conversion::copy_into(pair));
        out.push('\n');
        out.push_str(&conversion::construct_new(pair));
        out.push('\n');
        out.push_str(&conversion::map_sequence(pair));
        out.push('\n');
    }
    let arms = dispatch::arms(profile);
    out.push_str(&dispatch::map_to_destination(&arms));
    out.push('\n');
    out.push_str(&dispatch::map_into_existing(&arms));
    out.push_str("}\n");
    out
}
