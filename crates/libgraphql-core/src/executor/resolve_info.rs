//! Everything a resolver can learn about the field it's being asked to
//! produce a value for, beyond the arguments already bundled into
//! [`crate::resolver::FieldContext`].

use crate::coercion::coerce_literal_value;
use crate::error::ExecutionError;
use crate::path::Path;
use crate::schema::Schema;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::value::ResolvedValue;
use indexmap::IndexMap;
use libgraphql_parser::ast;
use std::collections::HashMap;

pub struct ResolveInfo<'a> {
    pub field_def: &'a Field,
    pub parent_type: &'a GraphQLType,
    pub path: Path,
    pub schema: &'a Schema,
    pub variable_values: &'a IndexMap<String, ResolvedValue>,
    pub operation: &'a ast::OperationDefinition,
    pub fragments: &'a HashMap<String, ast::FragmentDefinition>,
    /// The query-side AST field node being resolved, kept around solely so
    /// [`Self::get_directive_arguments`] can read its applied directives.
    pub query_field: &'a ast::Field,
}

impl<'a> ResolveInfo<'a> {
    /// Coerced arguments for the (single) application of `directive_name` on
    /// this field, or `None` if it wasn't applied at all. Errors if more
    /// than one application is present — use
    /// [`Self::get_all_directive_arguments`] for `repeatable` directives.
    pub fn get_directive_arguments(&self, directive_name: &str) -> Result<Option<IndexMap<String, ResolvedValue>>, ExecutionError> {
        let mut all = self.get_all_directive_arguments(directive_name)?;
        match all.len() {
            0 => Ok(None),
            1 => Ok(Some(all.remove(0))),
            _ => Err(ExecutionError::internal(format!("directive `@{directive_name}` is applied more than once"), self.path.clone())),
        }
    }

    /// Every application of `directive_name` on this field, in source order
    /// — the entry point for `repeatable` directives (§3.13): applying
    /// `@tag` twice resolves to two argument maps in declaration order.
    pub fn get_all_directive_arguments(&self, directive_name: &str) -> Result<Vec<IndexMap<String, ResolvedValue>>, ExecutionError> {
        let Some(directive_def) = self.schema.get_directive(directive_name) else {
            return Err(ExecutionError::UnknownDirective { name: directive_name.to_string() });
        };

        let mut results = Vec::new();
        for applied in &self.query_field.directives {
            if applied.name != directive_name {
                continue;
            }
            let mut coerced = IndexMap::new();
            for arg_def in &directive_def.arguments {
                let supplied = applied.arguments.iter().find(|a| a.name == arg_def.name);
                let value = match supplied {
                    Some(a) => coerce_literal_value(
                        self.schema,
                        &arg_def.type_annotation,
                        &a.value,
                        self.variable_values,
                        &self.path.field(format!("@{directive_name}.{}", arg_def.name)),
                    )
                    .map_err(|e| ExecutionError::internal(e.to_string(), self.path.clone()))?,
                    None => match &arg_def.default_value {
                        Some(default) => coerce_literal_value(self.schema, &arg_def.type_annotation, default, self.variable_values, &self.path)
                            .map_err(|e| ExecutionError::internal(e.to_string(), self.path.clone()))?,
                        None => ResolvedValue::Null,
                    },
                };
                coerced.insert(arg_def.name.clone(), value);
            }
            results.push(coerced);
        }
        Ok(results)
    }
}
