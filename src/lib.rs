#![forbid(unsafe_code)]
//! staticmap — compile-time mapping code generator core
//!
//! Given declarative mapping profiles (an ordered set of source-shape /
//! destination-shape pairs, with optional reverse expansion), this crate
//! emits the C# source implementing member-by-member conversions: a
//! copy-into-existing routine, a construct-new routine and a lazy sequence
//! routine per pair, plus one runtime-dispatching `Map` entry point per
//! profile.
//!
//! The pipeline is:
//! 1. A front end (host compiler analysis, out of scope here) resolves profile declarations into [`MappingSpec`] values
//! 2. [`expand`] turns raw pairs into the ordered effective sequence
//! 3. [`correlate`] intersects member names per effective pair
//! 4. [`synth`] renders conversion routines and dispatch into a namespace-scoped buffer
//! 5. [`Generator`] assembles one artifact per profile plus a pass summary for the host sink
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: The synthesis modules emit `throw` statements as *string literals* in generated C#. These are
//!   output text, not control flow in this crate.
//!
//! - **True invariants**: If a panic represents a generator bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation.

pub mod correlate;
pub mod emit;
pub mod error;
pub mod expand;
pub mod generator;
pub mod model;
pub mod run_counter;
pub mod synth;

pub use error::SynthesisError;
pub use generator::{ArtifactSink, GenerationPass, Generator, MemorySink, SUMMARY_FILE_NAME};
pub use model::{EffectivePair, GeneratedArtifact, MappingPair, MappingProfile, MappingSpec, ShapeRef, TypeShape};
pub use run_counter::RunCounter;
