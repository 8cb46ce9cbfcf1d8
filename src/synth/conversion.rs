//! Per-pair conversion routine synthesis.
//!
//! Every effective pair gets three routines named `MapTo<Destination>`:
//! copy-into-existing, construct-new and map-sequence. The sequence routine
//! is a C# iterator: lazy, order-preserving, single pass over its input,
//! failing per element. Routines carry no state; copy-into mutates only its
//! destination argument.
//!
//! Rendered text is indented relative to the namespace interior (the class
//! sits at relative column zero); the namespace buffer re-indents whole
//! blocks to their nesting depth.

use std::fmt::Write;

use crate::correlate;
use crate::model::EffectivePair;

/// `MapTo<ShortDestinationName>`.
pub fn method_name(pair: &EffectivePair) -> String {
    format!("MapTo{}", pair.destination.name())
}

/// `// Source: ..., Destination: ...` marker above each pair's group.
pub fn pair_comment(pair: &EffectivePair) -> String {
    format!(
        "\t// Source: {}, Destination: {}",
        pair.source.qualified_name, pair.destination.qualified_name
    )
}

/// Interface declarations for one pair: copy-into, construct-new and
/// map-sequence signatures.
pub fn interface_declarations(pair: &EffectivePair) -> String {
    let source = &pair.source.qualified_name;
    let destination = &pair.destination.qualified_name;
    let method = method_name(pair);
    let mut out = String::new();
    let _ = writeln!(out, "\tvoid {method}({source} source, {destination} destination);");
    let _ = writeln!(out, "\t{destination} {method}({source} source);");
    let _ = writeln!(out, "\tIEnumerable<{destination}> {method}(IEnumerable<{source}> source);");
    out
}

/// Copy-into-existing: null-guards both arguments, then one assignment per
/// correlated member, in correlated order.
pub fn copy_into(pair: &EffectivePair) -> String {
    let source = &pair.source.qualified_name;
    let destination = &pair.destination.qualified_name;
    let method = method_name(pair);
    let mut out = String::new();
    let _ = writeln!(out, "\tpublic void {method}({source} source, {destination} destination)");
    let _ = writeln!(out, "\t{{");
    let _ = writeln!(out, "\t\tif (source is null) throw new ArgumentNullException(nameof(source));");
    let _ = writeln!(out, "\t\tif (destination is null) throw new ArgumentNullException(nameof(destination));");
    for member in correlate::correlate(&pair.source, &pair.destination) {
        let _ = writeln!(out, "\t\tdestination.{member} = source.{member};");
    }
    let _ = writeln!(out, "\t}}");
    out
}

/// Construct-new: allocate the destination, delegate to copy-into, return.
pub fn construct_new(pair: &EffectivePair) -> String {
    let source = &pair.source.qualified_name;
    let destination = &pair.destination.qualified_name;
    let method = method_name(pair);
    let mut out = String::new();
    let _ = writeln!(out, "\tpublic {destination} {method}({source} source)");
    let _ = writeln!(out, "\t{{");
    let _ = writeln!(out, "\t\tvar destination = new {destination}();");
    let _ = writeln!(out, "\t\t{method}(source, destination);");
    let _ = writeln!(out, "\t\treturn destination;");
    let _ = writeln!(out, "\t}}");
    out
}

/// Map-sequence: a C# iterator over construct-new, one element at a time.
pub fn map_sequence(pair: &EffectivePair) -> String {
    let source = &pair.source.qualified_name;
    let destination = &pair.destination.qualified_name;
    let method = method_name(pair);
    let mut out = String::new();
    let _ = writeln!(out, "\tpublic IEnumerable<{destination}> {method}(IEnumerable<{source}> source)");
    let _ = writeln!(out, "\t{{");
    let _ = writeln!(out, "\t\tforeach (var item in source)");
    let _ = writeln!(out, "\t\t{{");
    let _ = writeln!(out, "\t\t\tyield return {method}(item);");
    let _ = writeln!(out, "\t\t}}");
    let _ = writeln!(out, "\t}}");
    out
}
