//! Shader-side view of the layout contract.
//!
//! Two forms are provided:
//! - [`prelude`]: WGSL `const` declarations plus the `Uniforms` struct, to be
//!   placed at the top of a shader module
//! - [`expand`]: `${NAME}` placeholder substitution for attribute arguments
//!   (`@location`, `@binding`) that take literals
//!
//! Both read from the same tables as the Rust enums.

use crate::error::{TemplateError, TemplateErrorKind};
use crate::index::{BufferIndex, VertexAttribute};

const UNIFORMS_STRUCT: &str = "struct Uniforms {\n    transform: mat4x4<f32>,\n}\n";

/// `(name, value)` for every binding constant, buffers first.
pub fn constants() -> impl Iterator<Item = (&'static str, u32)> {
    BufferIndex::ALL
        .iter()
        .map(|b| (b.const_name(), b.index()))
        .chain(VertexAttribute::ALL.iter().map(|a| (a.const_name(), a.index())))
}

/// Value of the binding constant called `name`.
pub fn lookup(name: &str) -> Option<u32> {
    constants().find(|(n, _)| *n == name).map(|(_, v)| v)
}

/// WGSL declarations for every binding constant and for `Uniforms`.
pub fn prelude() -> String {
    let mut out = String::from("// prism-layout: shared binding indices\n");
    for (name, value) in constants() {
        out.push_str(&format!("const {name}: u32 = {value}u;\n"));
    }
    out.push('\n');
    out.push_str(UNIFORMS_STRUCT);
    out
}

/// Replaces each `${NAME}` in `template` with the decimal value of the binding
/// constant `NAME`.
pub fn expand(template: &str) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut base = 0;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);

        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            return Err(TemplateError::new(TemplateErrorKind::Unterminated, base + start));
        };

        let name = after[..end].trim();
        let value = lookup(name).ok_or_else(|| {
            TemplateError::new(TemplateErrorKind::UnknownName(name.to_string()), base + start)
        })?;
        out.push_str(&value.to_string());

        let consumed = start + 2 + end + 1;
        base += consumed;
        rest = &rest[consumed..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Full shader source: [`prelude`] followed by the expanded `body`.
pub fn compose(body: &str) -> Result<String, TemplateError> {
    let mut src = prelude();
    src.push('\n');
    src.push_str(&expand(body)?);
    Ok(src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::*;

    /// Reads `const NAME: u32 = Nu;` back out of the prelude.
    fn prelude_value(prelude: &str, name: &str) -> Option<u32> {
        let prefix = format!("const {name}: u32 = ");
        prelude.lines().find_map(|line| {
            line.strip_prefix(&prefix)?
                .strip_suffix("u;")?
                .parse()
                .ok()
        })
    }

    // ── prelude ───────────────────────────────────────────────────────────

    #[test]
    fn prelude_matches_enums() {
        let p = prelude();
        for &b in BufferIndex::ALL {
            assert_eq!(prelude_value(&p, b.const_name()), Some(b.index()));
        }
        for &a in VertexAttribute::ALL {
            assert_eq!(prelude_value(&p, a.const_name()), Some(a.index()));
        }
        assert_eq!(prelude_value(&p, "BUFFER_INDEX_UNIFORMS"), Some(2));
    }

    #[test]
    fn prelude_declares_uniforms_struct() {
        let p = prelude();
        assert!(p.contains("struct Uniforms {"));
        assert!(p.contains("transform: mat4x4<f32>,"));
    }

    // ── expand ────────────────────────────────────────────────────────────

    #[test]
    fn expand_substitutes_every_constant() {
        for (name, value) in constants() {
            let out = expand(&format!("@location(${{{name}}})")).unwrap();
            assert_eq!(out, format!("@location({value})"));
        }
    }

    #[test]
    fn expand_agrees_with_flat_constants() {
        let out = expand("${BUFFER_INDEX_UNIFORMS} ${VERTEX_ATTRIBUTE_COLOR}").unwrap();
        assert_eq!(out, format!("{BUFFER_INDEX_UNIFORMS} {VERTEX_ATTRIBUTE_COLOR}"));
    }

    #[test]
    fn expand_leaves_plain_text_alone() {
        let src = "fn main() { let x = 1; }";
        assert_eq!(expand(src).unwrap(), src);
    }

    #[test]
    fn expand_allows_padding_inside_braces() {
        assert_eq!(expand("${ VERTEX_ATTRIBUTE_POSITION }").unwrap(), "0");
    }

    #[test]
    fn expand_reports_unknown_name_with_offset() {
        let err = expand("ab${NOPE}").unwrap_err();
        assert_eq!(err.kind, TemplateErrorKind::UnknownName("NOPE".into()));
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn expand_reports_unterminated_after_earlier_placeholder() {
        let err = expand("${BUFFER_INDEX_MESH_COLORS} ${BUFFER").unwrap_err();
        assert_eq!(err.kind, TemplateErrorKind::Unterminated);
        assert_eq!(err.offset, 28);
    }

    // ── compose ───────────────────────────────────────────────────────────

    #[test]
    fn compose_prepends_prelude() {
        let src = compose("@group(0) @binding(${BUFFER_INDEX_UNIFORMS}) var<uniform> u: Uniforms;")
            .unwrap();
        assert!(src.starts_with(&prelude()));
        assert!(src.ends_with("@binding(2) var<uniform> u: Uniforms;"));
    }

    #[test]
    fn lookup_unknown_is_none() {
        assert_eq!(lookup("BUFFER_INDEX_NOPE"), None);
        assert_eq!(lookup("BUFFER_INDEX_MESH_COLORS"), Some(1));
    }
}
