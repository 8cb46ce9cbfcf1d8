//! Namespace-scoped text accumulation and artifact rendering.
//!
//! [`NamespaceBuffer`] is an owned tree of buffers keyed by namespace
//! segment. Synthesis appends blocks to the buffer for a profile's
//! namespace; rendering assembles the deterministic header, the sorted
//! deduplicated `using` block (a namespace's rendered imports are the union
//! of its own and all descendants') and the namespace-wrapped bodies,
//! recursing into children in lexicographic key order.
//!
//! Rendering is pure and repeatable: identical input and run stamp give
//! identical bytes; only the compile-time line varies between passes, and
//! the generator injects that string so tests can pin it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

/// Hierarchical text buffer for one artifact file.
///
/// The buffer created by [`NamespaceBuffer::new`] is the global namespace;
/// nested namespaces are materialized on demand by [`namespace_mut`] and
/// indent their body one tab per nesting level.
///
/// [`namespace_mut`]: NamespaceBuffer::namespace_mut
#[derive(Debug)]
pub struct NamespaceBuffer {
    file_name: String,
    run_stamp: u32,
    timestamp: String,
    depth: usize,
    imports: BTreeSet<String>,
    children: BTreeMap<String, NamespaceBuffer>,
    body: String,
}

impl NamespaceBuffer {
    /// Root buffer for one artifact file, in the global namespace.
    pub fn new(file_name: impl Into<String>, run_stamp: u32, timestamp: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            run_stamp,
            timestamp: timestamp.into(),
            depth: 0,
            imports: BTreeSet::new(),
            children: BTreeMap::new(),
            body: String::new(),
        }
    }

    fn child_template(&self) -> Self {
        Self {
            file_name: self.file_name.clone(),
            run_stamp: self.run_stamp,
            timestamp: self.timestamp.clone(),
            depth: self.depth + 1,
            imports: BTreeSet::new(),
            children: BTreeMap::new(),
            body: String::new(),
        }
    }

    /// Buffer for a dotted namespace path, materializing intermediate
    /// segments as needed. Re-acquiring the same path returns the same
    /// buffer; the empty path is the buffer itself.
    pub fn namespace_mut(&mut self, path: &str) -> &mut NamespaceBuffer {
        let mut current = self;
        for segment in path.split('.').filter(|segment| !segment.is_empty()) {
            if !current.children.contains_key(segment) {
                let child = current.child_template();
                current.children.insert(segment.to_string(), child);
            }
            current = current
                .children
                .get_mut(segment)
                .expect("INVARIANT: child inserted above");
        }
        current
    }

    fn prefix(&self) -> String {
        "\t".repeat(self.depth)
    }

    /// Append one line at this buffer's nesting indent.
    pub fn push_line(&mut self, line: &str) {
        self.body.push_str(&self.prefix());
        self.body.push_str(line);
        self.body.push('\n');
    }

    /// Append text verbatim, no indent and no trailing newline.
    pub fn push_raw(&mut self, text: &str) {
        self.body.push_str(text);
    }

    /// Append a blank line.
    pub fn push_blank(&mut self) {
        self.body.push('\n');
    }

    /// Append a multi-line block, re-indenting every non-blank line to this
    /// buffer's nesting indent. Blank lines pass through untouched.
    pub fn push_block(&mut self, block: &str) {
        let prefix = self.prefix();
        for line in block.lines() {
            if line.trim().is_empty() {
                self.body.push('\n');
            } else {
                self.body.push_str(&prefix);
                self.body.push_str(line);
                self.body.push('\n');
            }
        }
    }

    /// Record an import; duplicates collapse, comparison is case-sensitive.
    pub fn register_import(&mut self, namespace: &str) {
        let namespace = namespace.trim();
        if !namespace.is_empty() {
            self.imports.insert(namespace.to_string());
        }
    }

    fn collect_imports(&self, into: &mut BTreeSet<String>) {
        into.extend(self.imports.iter().cloned());
        for child in self.children.values() {
            child.collect_imports(into);
        }
    }

    /// Render the full artifact text: header, sorted import block, then the
    /// namespace-wrapped bodies. The wrapping declaration is omitted
    /// entirely for the global namespace.
    pub fn render(&self) -> String {
        let mut out = self.header();

        let mut imports = BTreeSet::new();
        self.collect_imports(&mut imports);
        if !imports.is_empty() {
            out.push('\n');
            for import in &imports {
                let _ = writeln!(out, "using {import};");
            }
        }

        let mut tree = String::new();
        self.render_tree(&mut tree);
        if !tree.is_empty() {
            out.push('\n');
            out.push_str(&tree);
        }
        out
    }

    fn render_tree(&self, out: &mut String) {
        let block_start = out.len();
        out.push_str(&self.body);
        for (segment, child) in &self.children {
            if out.len() > block_start {
                out.push('\n');
            }
            let indent = self.prefix();
            let _ = writeln!(out, "{indent}namespace {segment}");
            let _ = writeln!(out, "{indent}{{");
            child.render_tree(out);
            let _ = writeln!(out, "{indent}}}");
        }
    }

    fn header(&self) -> String {
        format!(
            "// ----------------------------------------------------------------------------------------------\n\
             // <auto-generated>\n\
             //     This code was generated by the staticmap source generator.\n\
             //     Changes to this file may cause incorrect behavior and will be lost if the code is regenerated.\n\
             // </auto-generated>\n\
             // ----------------------------------------------------------------------------------------------\n\
             // File Name    : {file}\n\
             // Compile Time : {time}\n\
             // Counter      : {run}\n",
            file = self.file_name,
            time = self.timestamp,
            run = self.run_stamp,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> NamespaceBuffer {
        NamespaceBuffer::new("Test.g.cs", 7, "2026-01-01 00:00:00")
    }

    #[test]
    fn reacquiring_a_namespace_returns_the_same_buffer() {
        let mut root = buffer();
        root.namespace_mut("Demo.App").push_line("class A { }");
        root.namespace_mut("Demo.App").push_line("class B { }");
        let rendered = root.render();
        assert_eq!(rendered.matches("namespace Demo").count(), 1);
        assert_eq!(rendered.matches("namespace App").count(), 1);
        assert!(rendered.contains("\t\tclass A { }\n\t\tclass B { }"));
    }

    #[test]
    fn nested_namespaces_indent_one_tab_per_level() {
        let mut root = buffer();
        root.namespace_mut("Demo.App").push_line("class X { }");
        let rendered = root.render();
        assert!(rendered.contains("namespace Demo\n{\n\tnamespace App\n\t{\n\t\tclass X { }\n\t}\n}\n"));
    }

    #[test]
    fn raw_text_is_appended_verbatim_without_indent_or_newline() {
        let mut root = buffer();
        let scope = root.namespace_mut("Demo");
        scope.push_raw("class ");
        scope.push_raw("X { }");
        scope.push_raw("\n");
        scope.push_line("class Y { }");
        let rendered = root.render();
        // Raw fragments bypass the nesting indent entirely; only the
        // following push_line is indented.
        assert!(rendered.contains("{\nclass X { }\n\tclass Y { }\n}"));
    }

    #[test]
    fn global_namespace_omits_the_wrapping_declaration() {
        let mut root = buffer();
        root.push_line("// trace entry");
        let rendered = root.render();
        assert!(!rendered.contains("namespace"));
        assert!(rendered.contains("\n// trace entry\n"));
    }

    #[test]
    fn imports_are_deduplicated_sorted_and_hoisted_from_descendants() {
        let mut root = buffer();
        root.register_import("System.Linq");
        let scope = root.namespace_mut("Demo");
        scope.register_import("System");
        scope.register_import("System");
        scope.register_import("System.Collections.Generic");
        scope.push_line("class X { }");
        let rendered = root.render();
        let expected = "using System;\nusing System.Collections.Generic;\nusing System.Linq;\n";
        assert!(rendered.contains(expected));
        assert_eq!(rendered.matches("using ").count(), 3);
    }

    #[test]
    fn imports_are_case_sensitive() {
        let mut root = buffer();
        root.register_import("System");
        root.register_import("system");
        root.push_line("// body");
        assert_eq!(root.render().matches("using ").count(), 2);
    }

    #[test]
    fn blocks_are_reindented_line_by_line_with_blank_passthrough() {
        let mut root = buffer();
        let scope = root.namespace_mut("Demo");
        scope.push_block("class X\n{\n\n\tint Y;\n}");
        let rendered = root.render();
        assert!(rendered.contains("\tclass X\n\t{\n\n\t\tint Y;\n\t}\n"));
    }

    #[test]
    fn children_render_in_lexicographic_key_order() {
        let mut root = buffer();
        root.namespace_mut("Zeta").push_line("// z");
        root.namespace_mut("Alpha").push_line("// a");
        let rendered = root.render();
        let alpha = rendered.find("namespace Alpha").unwrap();
        let zeta = rendered.find("namespace Zeta").unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn header_carries_file_name_timestamp_and_run_stamp() {
        let rendered = buffer().render();
        assert!(rendered.contains("// File Name    : Test.g.cs\n"));
        assert!(rendered.contains("// Compile Time : 2026-01-01 00:00:00\n"));
        assert!(rendered.contains("// Counter      : 7\n"));
    }

    #[test]
    fn rendering_is_repeatable() {
        let build = || {
            let mut root = buffer();
            root.register_import("System");
            root.namespace_mut("Demo.App").push_line("class X { }");
            root.render()
        };
        assert_eq!(build(), build());
    }
}
