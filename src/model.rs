//! Input and output data model for the mapping generator.
//!
//! The front end resolves profile declarations into [`MappingSpec`] values;
//! the generator turns each spec into one [`GeneratedArtifact`]. Everything
//! here is a transient snapshot rebuilt wholesale on every generation pass.
//! The input types derive serde so hosts can hand specs across a process
//! boundary as data.

use serde::{Deserialize, Serialize};

/// A type's exposed member-name surface.
///
/// Members are the flattened property list in declaration order: own members
/// first, then inherited members, exactly as the front end walked them. The
/// order is observable in generated assignment statements and must be stable
/// across regeneration.
///
/// Identity is the qualified name: two shapes with the same qualified name
/// compare equal regardless of their member lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeShape {
    pub qualified_name: String,
    pub namespace: String,
    pub members: Vec<String>,
}

impl TypeShape {
    /// Build a shape from a dotted qualified name; the namespace is
    /// everything before the last segment.
    pub fn new<N, M, I>(qualified_name: N, members: I) -> Self
    where
        N: Into<String>,
        M: Into<String>,
        I: IntoIterator<Item = M>,
    {
        let qualified_name = qualified_name.into();
        let namespace = match qualified_name.rfind('.') {
            Some(index) => qualified_name[..index].to_string(),
            None => String::new(),
        };
        Self {
            qualified_name,
            namespace,
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Short name: the last dot-segment of the qualified name.
    pub fn name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }
}

impl PartialEq for TypeShape {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for TypeShape {}

impl std::hash::Hash for TypeShape {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.qualified_name.hash(state);
    }
}

/// A possibly-unresolved reference to a shape.
///
/// The front end is expected to exclude unresolved types before invoking the
/// core; when one leaks through anyway the affected profile fails with
/// [`UnresolvedInput`](crate::error::SynthesisError::UnresolvedInput) instead
/// of producing a partial artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeRef {
    Resolved(TypeShape),
    Unresolved { name: String },
}

impl ShapeRef {
    /// The qualified name for resolved shapes, the raw spelling otherwise.
    pub fn display_name(&self) -> &str {
        match self {
            ShapeRef::Resolved(shape) => &shape.qualified_name,
            ShapeRef::Unresolved { name } => name,
        }
    }
}

impl From<TypeShape> for ShapeRef {
    fn from(shape: TypeShape) -> Self {
        ShapeRef::Resolved(shape)
    }
}

/// One `CreateMap<S, D>()` statement, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingPair {
    pub source: ShapeRef,
    pub destination: ShapeRef,
    /// When set, a swapped destination→source pair is synthesized
    /// immediately after this one.
    pub reverse: bool,
}

impl MappingPair {
    pub fn new(source: impl Into<ShapeRef>, destination: impl Into<ShapeRef>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            reverse: false,
        }
    }

    /// Request the swapped companion pair.
    pub fn reverse_map(&mut self) -> &mut Self {
        self.reverse = true;
        self
    }
}

/// Parsed representation of one profile class: declared name, owning
/// namespace and the raw pairs in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingSpec {
    pub profile_name: String,
    pub namespace: String,
    pub pairs: Vec<MappingPair>,
}

impl MappingSpec {
    pub fn new(profile_name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            profile_name: profile_name.into(),
            namespace: namespace.into(),
            pairs: Vec::new(),
        }
    }

    /// Declare a mapping pair; declaration order is the vector order. The
    /// returned reference allows chaining `.reverse_map()`.
    pub fn create_map(
        &mut self,
        source: impl Into<ShapeRef>,
        destination: impl Into<ShapeRef>,
    ) -> &mut MappingPair {
        self.pairs.push(MappingPair::new(source, destination));
        self.pairs
            .last_mut()
            .expect("INVARIANT: pair was just pushed")
    }
}

/// The expanded, directional unit actually synthesized.
///
/// Sequence numbers are contiguous over the effective sequence (not the raw
/// declarations) and drive both dispatch order and the temporary variable
/// names in generated dispatch code.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectivePair {
    pub source: TypeShape,
    pub destination: TypeShape,
    pub sequence: usize,
}

/// A profile after reverse expansion, ready for synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingProfile {
    pub name: String,
    pub namespace: String,
    pub effective_pairs: Vec<EffectivePair>,
}

/// One generated text unit handed to the host sink.
///
/// Artifacts are regenerated wholesale on every pass and never patched; the
/// run stamp ties an artifact to the pass that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedArtifact {
    pub file_name: String,
    pub run_stamp: u32,
    pub contents: String,
}
