//! Placeholder substitution against a resolved environment.

use std::collections::BTreeSet;

use nomen_domain::{Environment, ResolvedOutput, UnresolvedPolicy};

use super::parser::parse_placeholders;
use crate::error::ResolutionError;

/// Replaces every placeholder whose name has a value in `environment`.
///
/// The template is scanned once: text inserted from the environment is never
/// re-scanned, even when it contains `{...}`. Every occurrence of a name gets
/// the same value. Names carried in verbatim by a substituted value are
/// reported alongside the template's own unmatched names.
///
/// # Errors
///
/// Returns [`ResolutionError::UnresolvedPlaceholder`] under
/// [`UnresolvedPolicy::Error`] if any name is left unresolved.
pub fn substitute(
    template: &str,
    environment: &Environment,
    policy: UnresolvedPolicy,
) -> Result<ResolvedOutput, ResolutionError> {
    let placeholders = parse_placeholders(template);

    if placeholders.is_empty() {
        return Ok(ResolvedOutput::unchanged(template));
    }

    let mut value = String::with_capacity(template.len());
    let mut unresolved = BTreeSet::new();
    let mut last_end = 0;

    for placeholder in &placeholders {
        value.push_str(&template[last_end..placeholder.span.start]);

        if let Some(resolved) = environment.get(&placeholder.name) {
            value.push_str(&resolved.value);
            unresolved.extend(resolved.unresolved.iter().cloned());
        } else {
            value.push_str(&template[placeholder.span.clone()]);
            unresolved.insert(placeholder.name.clone());
        }

        last_end = placeholder.span.end;
    }

    value.push_str(&template[last_end..]);

    if policy == UnresolvedPolicy::Error && !unresolved.is_empty() {
        return Err(ResolutionError::UnresolvedPlaceholder {
            names: unresolved.into_iter().collect(),
        });
    }

    Ok(ResolvedOutput { value, unresolved })
}
