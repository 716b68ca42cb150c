//! The `collect_fields` algorithm, per the GraphQL spec's Field Collection
//! section (§6.3.2): turns a selection set into field
//! groups keyed by response key, honoring `@skip`/`@include` and expanding
//! fragment spreads. This crate runs it once the concrete object type at a
//! position is already known (field execution step 5 resolves abstract
//! types to a concrete one before recursing), so every spread's type
//! condition can be checked immediately rather than deferred.

use crate::error::ExecutionError;
use crate::path::Path;
use crate::value::ResolvedValue;
use indexmap::IndexMap;
use libgraphql_parser::ast;
use std::collections::HashMap;
use std::collections::HashSet;

/// Evaluates `@skip(if: ...)` / `@include(if: ...)` on a selection, if
/// present, returning whether the selection should be kept.
fn passes_skip_include(
    directives: &[ast::DirectiveAnnotation],
    variable_values: &IndexMap<String, ResolvedValue>,
    path: &Path,
) -> Result<bool, ExecutionError> {
    for directive in directives {
        let relevant = match directive.name.as_str() {
            "skip" => false,
            "include" => true,
            _ => continue,
        };
        let if_value = directive.argument("if").ok_or_else(|| ExecutionError::internal("missing `if` argument", path.clone()))?;
        let keep_when_true = boolean_value(if_value, variable_values)
            .ok_or_else(|| ExecutionError::internal("`if` argument did not resolve to a boolean", path.clone()))?;
        let keep = if relevant { keep_when_true } else { !keep_when_true };
        if !keep {
            return Ok(false);
        }
    }
    Ok(true)
}

fn boolean_value(value: &ast::Value, variable_values: &IndexMap<String, ResolvedValue>) -> Option<bool> {
    match value {
        ast::Value::Boolean { value, .. } => Some(*value),
        ast::Value::Variable { name, .. } => variable_values.get(name).and_then(ResolvedValue::as_bool),
        _ => None,
    }
}

/// Groups selections applicable to `type_name` by response key, in
/// first-occurrence order, recursively expanding fragment spreads whose type
/// condition applies.
pub fn collect_fields<'a>(
    selection_set: &'a ast::SelectionSet,
    type_name: &str,
    implements: impl Fn(&str, &str) -> bool + Copy,
    fragments: &'a HashMap<String, ast::FragmentDefinition>,
    variable_values: &IndexMap<String, ResolvedValue>,
    path: &Path,
) -> Result<IndexMap<String, Vec<&'a ast::Field>>, ExecutionError> {
    let mut visited_fragments = HashSet::new();
    let mut groups: IndexMap<String, Vec<&'a ast::Field>> = IndexMap::new();
    collect_fields_impl(selection_set, type_name, implements, fragments, variable_values, path, &mut visited_fragments, &mut groups)?;
    Ok(groups)
}

#[allow(clippy::too_many_arguments)]
fn collect_fields_impl<'a>(
    selection_set: &'a ast::SelectionSet,
    type_name: &str,
    implements: impl Fn(&str, &str) -> bool + Copy,
    fragments: &'a HashMap<String, ast::FragmentDefinition>,
    variable_values: &IndexMap<String, ResolvedValue>,
    path: &Path,
    visited_fragments: &mut HashSet<String>,
    groups: &mut IndexMap<String, Vec<&'a ast::Field>>,
) -> Result<(), ExecutionError> {
    for selection in &selection_set.selections {
        if !passes_skip_include(selection.directives(), variable_values, path)? {
            continue;
        }
        match selection {
            ast::Selection::Field(field) => {
                groups.entry(field.response_key().to_string()).or_default().push(field);
            }
            ast::Selection::FragmentSpread(spread) => {
                if !visited_fragments.insert(spread.fragment_name.clone()) {
                    continue;
                }
                let Some(def) = fragments.get(&spread.fragment_name) else {
                    return Err(ExecutionError::internal(format!("unknown fragment `{}`", spread.fragment_name), path.clone()));
                };
                if type_condition_applies(&def.type_condition, type_name, implements) {
                    collect_fields_impl(&def.selection_set, type_name, implements, fragments, variable_values, path, visited_fragments, groups)?;
                }
            }
            ast::Selection::InlineFragment(inline) => {
                let applies = match &inline.type_condition {
                    Some(condition) => type_condition_applies(condition, type_name, implements),
                    None => true,
                };
                if applies {
                    collect_fields_impl(&inline.selection_set, type_name, implements, fragments, variable_values, path, visited_fragments, groups)?;
                }
            }
        }
    }
    Ok(())
}

fn type_condition_applies(condition: &str, type_name: &str, implements: impl Fn(&str, &str) -> bool) -> bool {
    condition == type_name || implements(type_name, condition)
}
