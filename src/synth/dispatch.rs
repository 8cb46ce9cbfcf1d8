//! Profile-level runtime dispatch synthesis.
//!
//! Dispatch is built as data first: one arm per effective pair, in ascending
//! sequence order, so ordering and matching stay testable independently of
//! rendering. The rendered `Map` members scan the arms in order and the
//! first match wins; ambiguity between overlapping declarations resolves to
//! the earliest-declared pair.

use std::fmt::Write;

use super::conversion;
use crate::model::{EffectivePair, MappingProfile};

/// One dispatch candidate: an effective pair in the profile's ordered table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchArm<'a> {
    pub pair: &'a EffectivePair,
}

/// The profile's dispatch table, in ascending effective-sequence order.
pub fn arms(profile: &MappingProfile) -> Vec<DispatchArm<'_>> {
    let mut arms: Vec<DispatchArm<'_>> = profile
        .effective_pairs
        .iter()
        .map(|pair| DispatchArm { pair })
        .collect();
    arms.sort_by_key(|arm| arm.pair.sequence);
    arms
}

/// `TDestination Map<TDestination>(object source)`: each arm is checked in
/// four destination forms (bare instance, `List<D>`, `D[]`,
/// `IEnumerable<D>`), each guarded by the arm's runtime source shape.
/// Falling through every arm throws, naming the concrete runtime source
/// type and the requested destination type.
pub fn map_to_destination(arms: &[DispatchArm<'_>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\tpublic TDestination Map<TDestination>(object source)");
    let _ = writeln!(out, "\t\twhere TDestination : class");
    let _ = writeln!(out, "\t{{");
    let _ = writeln!(out, "\t\tif (source is null) throw new ArgumentNullException(nameof(source));");
    for arm in arms {
        let source = &arm.pair.source.qualified_name;
        let destination = &arm.pair.destination.qualified_name;
        let method = conversion::method_name(arm.pair);
        let seq = arm.pair.sequence;
        let _ = writeln!(
            out,
            "\t\tif (typeof(TDestination) == typeof({destination}) && source is {source} source{seq})"
        );
        let _ = writeln!(out, "\t\t{{");
        let _ = writeln!(out, "\t\t\treturn (TDestination)(object){method}(source{seq});");
        let _ = writeln!(out, "\t\t}}");
        let _ = writeln!(
            out,
            "\t\tif (typeof(TDestination) == typeof(List<{destination}>) && source is IEnumerable<{source}> list{seq})"
        );
        let _ = writeln!(out, "\t\t{{");
        let _ = writeln!(out, "\t\t\treturn (TDestination)(object){method}(list{seq}).ToList();");
        let _ = writeln!(out, "\t\t}}");
        let _ = writeln!(
            out,
            "\t\tif (typeof(TDestination) == typeof({destination}[]) && source is IEnumerable<{source}> array{seq})"
        );
        let _ = writeln!(out, "\t\t{{");
        let _ = writeln!(out, "\t\t\treturn (TDestination)(object){method}(array{seq}).ToArray();");
        let _ = writeln!(out, "\t\t}}");
        let _ = writeln!(
            out,
            "\t\tif (typeof(TDestination) == typeof(IEnumerable<{destination}>) && source is IEnumerable<{source}> sequence{seq})"
        );
        let _ = writeln!(out, "\t\t{{");
        let _ = writeln!(out, "\t\t\treturn (TDestination)(object){method}(sequence{seq});");
        let _ = writeln!(out, "\t\t}}");
    }
    let _ = writeln!(
        out,
        "\t\tthrow new InvalidOperationException($\"No mapping registered from {{source.GetType()}} to {{typeof(TDestination)}}\");"
    );
    let _ = writeln!(out, "\t}}");
    out
}

/// `void Map(object source, object destination)`: runtime-type test of both
/// arguments, dispatching to the matching copy-into routine; same
/// fall-through error shape as the generic overload.
pub fn map_into_existing(arms: &[DispatchArm<'_>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\tpublic void Map(object source, object destination)");
    let _ = writeln!(out, "\t{{");
    let _ = writeln!(out, "\t\tif (source is null) throw new ArgumentNullException(nameof(source));");
    let _ = writeln!(out, "\t\tif (destination is null) throw new ArgumentNullException(nameof(destination));");
    for arm in arms {
        let source = &arm.pair.source.qualified_name;
        let destination = &arm.pair.destination.qualified_name;
        let method = conversion::method_name(arm.pair);
        let seq = arm.pair.sequence;
        let _ = writeln!(
            out,
            "\t\tif (source is {source} source{seq} && destination is {destination} destination{seq})"
        );
        let _ = writeln!(out, "\t\t{{");
        let _ = writeln!(out, "\t\t\t{method}(source{seq}, destination{seq});");
        let _ = writeln!(out, "\t\t\treturn;");
        let _ = writeln!(out, "\t\t}}");
    }
    let _ = writeln!(
        out,
        "\t\tthrow new InvalidOperationException($\"No mapping registered from {{source.GetType()}} to {{destination.GetType()}}\");"
    );
    let _ = writeln!(out, "\t}}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeShape;

    fn profile(pairs: Vec<(TypeShape, TypeShape)>) -> MappingProfile {
        MappingProfile {
            name: "DemoMapper".to_string(),
            namespace: "Demo".to_string(),
            effective_pairs: pairs
                .into_iter()
                .enumerate()
                .map(|(sequence, (source, destination))| EffectivePair {
                    source,
                    destination,
                    sequence,
                })
                .collect(),
        }
    }

    fn user() -> TypeShape {
        TypeShape::new("Demo.User", ["UserName"])
    }

    fn dto() -> TypeShape {
        TypeShape::new("Demo.UserInputDto", ["UserName"])
    }

    #[test]
    fn arms_follow_the_effective_sequence() {
        let profile = profile(vec![(user(), dto()), (dto(), user())]);
        let arms = arms(&profile);
        let sequences: Vec<usize> = arms.iter().map(|arm| arm.pair.sequence).collect();
        assert_eq!(sequences, vec![0, 1]);
    }

    #[test]
    fn generic_map_checks_all_four_destination_forms_per_arm() {
        let profile = profile(vec![(user(), dto())]);
        let rendered = map_to_destination(&arms(&profile));
        assert!(rendered.contains("typeof(Demo.UserInputDto) && source is Demo.User source0"));
        assert!(rendered.contains("typeof(List<Demo.UserInputDto>)"));
        assert!(rendered.contains("typeof(Demo.UserInputDto[])"));
        assert!(rendered.contains("typeof(IEnumerable<Demo.UserInputDto>)"));
    }

    #[test]
    fn earlier_declared_arms_render_first() {
        let profile = profile(vec![(user(), dto()), (user(), dto())]);
        let rendered = map_to_destination(&arms(&profile));
        let first = rendered.find("source is Demo.User source0").unwrap();
        let second = rendered.find("source is Demo.User source1").unwrap();
        assert!(first < second);
    }

    #[test]
    fn fall_through_names_both_types_in_the_error() {
        let profile = profile(vec![(user(), dto())]);
        let generic = map_to_destination(&arms(&profile));
        assert!(generic.contains(
            "throw new InvalidOperationException($\"No mapping registered from {source.GetType()} to {typeof(TDestination)}\");"
        ));
        let existing = map_into_existing(&arms(&profile));
        assert!(existing.contains(
            "throw new InvalidOperationException($\"No mapping registered from {source.GetType()} to {destination.GetType()}\");"
        ));
    }

    #[test]
    fn copy_dispatch_tests_both_runtime_types() {
        let profile = profile(vec![(user(), dto())]);
        let rendered = map_into_existing(&arms(&profile));
        assert!(rendered.contains(
            "if (source is Demo.User source0 && destination is Demo.UserInputDto destination0)"
        ));
        assert!(rendered.contains("MapToUserInputDto(source0, destination0);"));
    }

    #[test]
    fn temporary_names_embed_the_sequence_number() {
        let profile = profile(vec![(user(), dto()), (dto(), user())]);
        let rendered = map_to_destination(&arms(&profile));
        assert!(rendered.contains("sequence0"));
        assert!(rendered.contains("list1"));
        assert!(rendered.contains("array1"));
    }
}
