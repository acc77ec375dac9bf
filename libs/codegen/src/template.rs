//! Placeholder template rendering
//!
//! Templates carry `$NAME` placeholders that are substituted from an
//! explicit substitution set. Substitutions are applied longest-name-first
//! so `$UNIT_NAME` is never clipped by a `$UNIT` entry. Placeholders with no
//! substitution are left verbatim.

/// Render a template against a substitution set.
pub fn render(template: &str, substitutions: &[(&str, String)]) -> String {
    let mut ordered: Vec<&(&str, String)> = substitutions.iter().collect();
    ordered.sort_by_key(|(name, _)| std::cmp::Reverse(name.len()));

    let mut out = template.to_string();
    for (name, value) in ordered {
        out = out.replace(&format!("${name}"), value);
    }
    out
}
