//! Text of the generated files.
//!
//! Every function here is pure: config in, file body out. Bodies are written
//! as `{{KEY}}` templates and filled with [`fill`], so JavaScript template
//! literals (`${x}`) and object braces need no escaping.

pub mod backend_configs;
pub mod backend_sources;
pub mod ci;
pub mod docker;
pub mod frontend;
pub mod readme;
pub mod yaml;

use crate::domain::BackendLang;

/// Replace every `{{KEY}}` with its value in one left-to-right pass.
/// Inserted values are copied verbatim, so placeholders inside a value are
/// never expanded. Unknown keys are left as they are.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let hit = after.find("}}").and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (end, *value))
        });
        match hit {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                // Step one brace so `{{{KEY}}}` still finds its placeholder.
                out.push('{');
                rest = &rest[start + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Join non-empty fragments with newlines. Lets templates drop optional
/// blocks by passing an empty string.
pub fn join_blocks<I, S>(blocks: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for block in blocks {
        let block = block.as_ref();
        if block.is_empty() {
            continue;
        }
        out.push_str(block);
        if !block.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Module-syntax differences between the two backend dialects.
///
/// TypeScript sources use ES module syntax (compiled to CommonJS by `tsc`);
/// JavaScript sources use CommonJS directly.
#[derive(Debug, Clone, Copy)]
pub struct Dialect(pub BackendLang);

impl Dialect {
    pub fn is_ts(&self) -> bool {
        self.0.is_typescript()
    }

    pub fn ext(&self) -> &'static str {
        self.0.extension()
    }

    pub fn import_default(&self, name: &str, module: &str) -> String {
        if self.is_ts() {
            format!("import {name} from '{module}';")
        } else {
            format!("const {name} = require('{module}');")
        }
    }

    pub fn import_named(&self, names: &[&str], module: &str) -> String {
        let names = names.join(", ");
        if self.is_ts() {
            format!("import {{ {names} }} from '{module}';")
        } else {
            format!("const {{ {names} }} = require('{module}');")
        }
    }

    /// Side-effect import (`dotenv/config`).
    pub fn import_bare(&self, module: &str) -> String {
        if self.is_ts() {
            format!("import '{module}';")
        } else {
            format!("require('{module}');")
        }
    }

    /// Type-only import; nothing in JavaScript.
    pub fn import_types(&self, names: &[&str], module: &str) -> String {
        if self.is_ts() {
            format!("import type {{ {} }} from '{module}';", names.join(", "))
        } else {
            String::new()
        }
    }

    pub fn export_named(&self, names: &[&str]) -> String {
        let names = names.join(", ");
        if self.is_ts() {
            format!("export {{ {names} }};")
        } else {
            format!("module.exports = {{ {names} }};")
        }
    }

    /// `: Type` annotation, or nothing in JavaScript.
    pub fn ty(&self, ty: &str) -> String {
        if self.is_ts() {
            format!(": {ty}")
        } else {
            String::new()
        }
    }

    /// A typed parameter list, e.g. `(req: Request, res: Response)`.
    pub fn params(&self, params: &[(&str, &str)]) -> String {
        let rendered: Vec<String> = params
            .iter()
            .map(|(name, ty)| format!("{name}{}", self.ty(ty)))
            .collect();
        format!("({})", rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_replaces_only_known_keys() {
        let out = fill("port {{PORT}} at ${url} {{OTHER}}", &[("PORT", "5000")]);
        assert_eq!(out, "port 5000 at ${url} {{OTHER}}");
    }

    #[test]
    fn fill_does_not_expand_placeholders_inside_values() {
        let out = fill(
            "{{DESCRIPTION}} on {{PORT}}",
            &[("DESCRIPTION", "uses {{PORT}} literally"), ("PORT", "5000")],
        );
        assert_eq!(out, "uses {{PORT}} literally on 5000");
    }

    #[test]
    fn fill_handles_braces_next_to_placeholders() {
        assert_eq!(fill("{{{NAME}}}", &[("NAME", "x")]), "{x}");
        assert_eq!(fill("a {{ b }} {{", &[("NAME", "x")]), "a {{ b }} {{");
    }

    #[test]
    fn html_escape_covers_markup_characters() {
        assert_eq!(
            html_escape(r#"Tom & "Jerry" <script>"#),
            "Tom &amp; &quot;Jerry&quot; &lt;script&gt;"
        );
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn join_blocks_skips_empty_fragments() {
        assert_eq!(join_blocks(["a", "", "b\n"]), "a\nb\n");
    }

    #[test]
    fn dialect_imports() {
        let ts = Dialect(BackendLang::TypeScript);
        let js = Dialect(BackendLang::JavaScript);
        assert_eq!(ts.import_default("cors", "cors"), "import cors from 'cors';");
        assert_eq!(js.import_default("cors", "cors"), "const cors = require('cors');");
        assert_eq!(
            js.import_named(&["Router"], "express"),
            "const { Router } = require('express');"
        );
        assert!(js.import_types(&["Request"], "express").is_empty());
    }

    #[test]
    fn dialect_params_strip_types_for_javascript() {
        let params = [("req", "Request"), ("res", "Response")];
        assert_eq!(
            Dialect(BackendLang::TypeScript).params(&params),
            "(req: Request, res: Response)"
        );
        assert_eq!(Dialect(BackendLang::JavaScript).params(&params), "(req, res)");
    }
}
