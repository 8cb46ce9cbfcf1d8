//! Reverse expansion of declared pairs into the effective sequence.

use crate::error::SynthesisError;
use crate::model::{EffectivePair, MappingProfile, MappingSpec, ShapeRef, TypeShape};

/// Expand a spec's raw pairs into the ordered effective sequence.
///
/// Forward pairs keep declaration order; a reverse-flagged pair's swapped
/// companion is inserted directly after it, never reordered by name or type.
/// Sequence numbers are contiguous over the *effective* sequence, which is
/// what dispatch order and generated temporary names rely on.
///
/// Duplicate declarations pass through untouched: two identical pairs
/// produce two conflicting generated members, a compile error in the
/// generated code that points at the profile itself.
pub fn expand(spec: &MappingSpec) -> Result<MappingProfile, SynthesisError> {
    let mut effective_pairs = Vec::with_capacity(spec.pairs.len());
    for (pair_index, pair) in spec.pairs.iter().enumerate() {
        let source = resolve(&pair.source, spec, pair_index)?;
        let destination = resolve(&pair.destination, spec, pair_index)?;
        effective_pairs.push(EffectivePair {
            source: source.clone(),
            destination: destination.clone(),
            sequence: effective_pairs.len(),
        });
        if pair.reverse {
            effective_pairs.push(EffectivePair {
                source: destination.clone(),
                destination: source.clone(),
                sequence: effective_pairs.len(),
            });
        }
    }
    Ok(MappingProfile {
        name: spec.profile_name.clone(),
        namespace: spec.namespace.clone(),
        effective_pairs,
    })
}

fn resolve<'a>(
    shape: &'a ShapeRef,
    spec: &MappingSpec,
    pair_index: usize,
) -> Result<&'a TypeShape, SynthesisError> {
    match shape {
        ShapeRef::Resolved(shape) => Ok(shape),
        ShapeRef::Unresolved { name } => Err(SynthesisError::UnresolvedInput {
            profile: spec.profile_name.clone(),
            pair_index,
            type_name: name.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes() -> (TypeShape, TypeShape) {
        (
            TypeShape::new("Demo.User", ["Id", "UserName"]),
            TypeShape::new("Demo.UserDto", ["Id", "UserName"]),
        )
    }

    #[test]
    fn forward_pairs_keep_declaration_order() {
        let (user, dto) = shapes();
        let blog = TypeShape::new("Demo.Blog", ["Id", "Title"]);
        let mut spec = MappingSpec::new("DemoMapper", "Demo");
        spec.create_map(user.clone(), dto.clone());
        spec.create_map(blog.clone(), dto.clone());

        let profile = expand(&spec).unwrap();
        assert_eq!(profile.effective_pairs.len(), 2);
        assert_eq!(profile.effective_pairs[0].source, user);
        assert_eq!(profile.effective_pairs[1].source, blog);
    }

    #[test]
    fn reverse_pair_is_inserted_directly_after_its_forward() {
        let (user, dto) = shapes();
        let blog = TypeShape::new("Demo.Blog", ["Id"]);
        let mut spec = MappingSpec::new("DemoMapper", "Demo");
        spec.create_map(dto.clone(), user.clone()).reverse_map();
        spec.create_map(blog.clone(), dto.clone());

        let profile = expand(&spec).unwrap();
        assert_eq!(profile.effective_pairs.len(), 3);
        assert_eq!(profile.effective_pairs[0].source, dto);
        assert_eq!(profile.effective_pairs[0].destination, user);
        assert_eq!(profile.effective_pairs[1].source, user);
        assert_eq!(profile.effective_pairs[1].destination, dto);
        assert_eq!(profile.effective_pairs[2].source, blog);
    }

    #[test]
    fn sequence_numbers_are_contiguous_over_the_effective_sequence() {
        let (user, dto) = shapes();
        let mut spec = MappingSpec::new("DemoMapper", "Demo");
        spec.create_map(user.clone(), dto.clone()).reverse_map();
        spec.create_map(user, dto).reverse_map();

        let profile = expand(&spec).unwrap();
        let sequences: Vec<usize> = profile.effective_pairs.iter().map(|p| p.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2, 3]);
    }

    #[test]
    fn duplicate_declarations_are_not_deduplicated() {
        let (user, dto) = shapes();
        let mut spec = MappingSpec::new("DemoMapper", "Demo");
        spec.create_map(user.clone(), dto.clone());
        spec.create_map(user, dto);

        let profile = expand(&spec).unwrap();
        assert_eq!(profile.effective_pairs.len(), 2);
        assert_eq!(
            profile.effective_pairs[0].source,
            profile.effective_pairs[1].source
        );
    }

    #[test]
    fn unresolved_shape_aborts_the_profile_with_context() {
        let (user, _) = shapes();
        let mut spec = MappingSpec::new("DemoMapper", "Demo");
        spec.create_map(
            user,
            ShapeRef::Unresolved {
                name: "Demo.Missing".to_string(),
            },
        );

        let error = expand(&spec).unwrap_err();
        assert_eq!(
            error,
            SynthesisError::UnresolvedInput {
                profile: "DemoMapper".to_string(),
                pair_index: 0,
                type_name: "Demo.Missing".to_string(),
            }
        );
    }
}
