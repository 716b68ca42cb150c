//! Query validation, per the GraphQL spec's Validation section (§5):
//! roughly twenty rules that reject a syntactically
//! valid document before it ever reaches the executor.
//!
//! A handful of rules need whole-document context a single traversal can't
//! give them cheaply (fragment name uniqueness, fragment cycles, unused
//! fragments, operation name uniqueness) and are implemented as plain
//! functions over [`ast::Document`]. Everything else — field existence,
//! argument shape, directive legality, selection-set shape, variable usage —
//! shares the same running "what composite type am I inside right now"
//! state, so it's kept as one [`SelectionValidator`] that walks the document
//! once via [`libgraphql_parser::visitor::walk_document`], rather than many
//! independent rule objects fanned through `ChainedVisitor`: splitting this
//! particular state across independent visitors would only mean threading
//! it through `RefCell`s for no real benefit.

use crate::coercion::coerce_literal_value;
use crate::error::ValidationError;
use crate::path::Path;
use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::InputValue;
use crate::types::TypeAnnotation;
use crate::value::ResolvedValue;
use indexmap::IndexMap;
use libgraphql_parser::ast;
use libgraphql_parser::ast::DirectiveLocationKind;
use libgraphql_parser::visitor::walk_document;
use libgraphql_parser::visitor::VisitControl;
use libgraphql_parser::visitor::Visitor;
use libgraphql_parser::SourcePosition;
use std::collections::HashMap;
use std::collections::HashSet;

/// Knobs the executable-document validator takes from its caller, per the
/// "builders/validators/executors take their dependencies by parameter"
/// convention — see [`crate::executor::ExecutionOptions`].
#[derive(Clone, Debug)]
pub struct ValidationOptions {
    /// Rejects operations whose selection nesting exceeds this depth.
    /// `None` (the default) disables the check.
    pub max_depth: Option<usize>,
    /// When `false`, rejects any operation that queries `__schema` or
    /// `__type` (the introspection entry points), the way a production
    /// deployment commonly locks down introspection without removing the
    /// meta-schema itself. `__typename` is unaffected — it's always
    /// queryable, per the GraphQL spec.
    pub enable_introspection: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions { max_depth: None, enable_introspection: true }
    }
}

/// Runs every rule against `document` and returns every violation found;
/// an empty vector means the document is safe to hand to the executor.
///
/// `variable_values`, when supplied, lets the "values of correct type" rule
/// also check literal argument/default values that reference a variable
/// against that variable's concrete runtime value, not just its declared
/// type. Passing `None` (as when validating a document ahead of knowing its
/// variables) skips only that literal-shape cross-check; every other rule
/// still runs.
pub fn validate(
    schema: &Schema,
    document: &ast::Document,
    variable_values: Option<&IndexMap<String, ResolvedValue>>,
    options: &ValidationOptions,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(check_executable_definitions_only(document));
    errors.extend(check_operation_names(document));
    errors.extend(check_subscriptions_have_one_root_field(document));
    errors.extend(check_fragment_definitions(document));
    errors.extend(check_selection_merging(document));
    if let Some(max_depth) = options.max_depth {
        errors.extend(check_max_depth(document, max_depth));
    }
    if !options.enable_introspection {
        errors.extend(check_introspection_disabled(document));
    }

    let mut pass = SelectionValidator::new(schema, document, variable_values);
    walk_document(document, &mut pass);
    errors.extend(pass.errors);

    tracing::debug!(error_count = errors.len(), "validation pass complete");
    errors
}

fn check_executable_definitions_only(document: &ast::Document) -> Vec<ValidationError> {
    document
        .definitions
        .iter()
        .filter(|def| {
            matches!(
                def,
                ast::Definition::TypeSystem(_) | ast::Definition::TypeSystemExtension(_) | ast::Definition::Schema(_) | ast::Definition::Directive(_)
            )
        })
        .map(|def| ValidationError::new("only operation and fragment definitions are allowed in an executable document", vec![def.span().start]))
        .collect()
}

fn check_operation_names(document: &ast::Document) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let ops: Vec<_> = document.operations().collect();

    let mut seen: HashSet<&str> = HashSet::new();
    for op in &ops {
        if let Some(name) = &op.name {
            if !seen.insert(name.as_str()) {
                errors.push(ValidationError::new(format!("multiple operations are named `{name}`"), vec![op.span.start]));
            }
        }
    }

    if ops.len() > 1 {
        let anonymous_positions: Vec<SourcePosition> = ops.iter().filter(|op| op.name.is_none()).map(|op| op.span.start).collect();
        if !anonymous_positions.is_empty() {
            errors.push(ValidationError::new(
                "an anonymous operation must be the only operation in the document",
                anonymous_positions,
            ));
        }
    }

    errors
}

fn check_subscriptions_have_one_root_field(document: &ast::Document) -> Vec<ValidationError> {
    document
        .operations()
        .filter(|op| op.kind == ast::OperationKind::Subscription && op.selection_set.selections.len() != 1)
        .map(|op| ValidationError::new("a subscription operation must select exactly one top-level field", vec![op.span.start]))
        .collect()
}

fn check_fragment_definitions(document: &ast::Document) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let fragments: Vec<&ast::FragmentDefinition> = document.fragments().collect();
    let by_name: HashMap<&str, &ast::FragmentDefinition> = fragments.iter().map(|f| (f.name.as_str(), *f)).collect();

    let mut seen: HashSet<&str> = HashSet::new();
    for frag in &fragments {
        if !seen.insert(frag.name.as_str()) {
            errors.push(ValidationError::new(format!("multiple fragments are named `{}`", frag.name), vec![frag.span.start]));
        }
    }

    for frag in &fragments {
        let mut visiting = HashSet::new();
        if let Some(pos) = find_fragment_cycle(&frag.name, &frag.selection_set, &by_name, &mut visiting) {
            errors.push(ValidationError::new(format!("fragment `{}` spreads itself, directly or transitively", frag.name), vec![pos]));
        }
    }

    let mut used: HashSet<String> = HashSet::new();
    for op in document.operations() {
        collect_used_fragments(&op.selection_set, &by_name, &mut used);
    }
    for frag in &fragments {
        if !used.contains(&frag.name) {
            errors.push(ValidationError::new(format!("fragment `{}` is never used", frag.name), vec![frag.span.start]));
        }
    }

    errors
}

fn find_fragment_cycle(
    root: &str,
    set: &ast::SelectionSet,
    by_name: &HashMap<&str, &ast::FragmentDefinition>,
    visiting: &mut HashSet<String>,
) -> Option<SourcePosition> {
    for sel in &set.selections {
        match sel {
            ast::Selection::FragmentSpread(fs) => {
                if fs.fragment_name == root {
                    return Some(fs.span.start);
                }
                if !visiting.insert(fs.fragment_name.clone()) {
                    continue;
                }
                let found = by_name.get(fs.fragment_name.as_str()).and_then(|target| find_fragment_cycle(root, &target.selection_set, by_name, visiting));
                if found.is_some() {
                    return found;
                }
            }
            ast::Selection::InlineFragment(inf) => {
                if let Some(pos) = find_fragment_cycle(root, &inf.selection_set, by_name, visiting) {
                    return Some(pos);
                }
            }
            ast::Selection::Field(field) => {
                if let Some(inner) = &field.selection_set {
                    if let Some(pos) = find_fragment_cycle(root, inner, by_name, visiting) {
                        return Some(pos);
                    }
                }
            }
        }
    }
    None
}

fn collect_used_fragments(set: &ast::SelectionSet, by_name: &HashMap<&str, &ast::FragmentDefinition>, used: &mut HashSet<String>) {
    for sel in &set.selections {
        match sel {
            ast::Selection::FragmentSpread(fs) => {
                if used.insert(fs.fragment_name.clone()) {
                    if let Some(target) = by_name.get(fs.fragment_name.as_str()) {
                        collect_used_fragments(&target.selection_set, by_name, used);
                    }
                }
            }
            ast::Selection::InlineFragment(inf) => collect_used_fragments(&inf.selection_set, by_name, used),
            ast::Selection::Field(field) => {
                if let Some(inner) = &field.selection_set {
                    collect_used_fragments(inner, by_name, used);
                }
            }
        }
    }
}

/// A simplified "fields in set can merge" check (§5.3.2): within one literal
/// selection set, two fields that report under the same response key must
/// select the same field name with textually identical arguments. This
/// doesn't expand fragment spreads into the set before comparing (the full
/// GraphQL algorithm does), the same simplification the executor's own
/// `merge_selection_sets` makes for the analogous runtime operation.
fn check_selection_merging(document: &ast::Document) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for op in document.operations() {
        check_selection_set_merging(&op.selection_set, &mut errors);
    }
    for frag in document.fragments() {
        check_selection_set_merging(&frag.selection_set, &mut errors);
    }
    errors
}

fn check_selection_set_merging(set: &ast::SelectionSet, errors: &mut Vec<ValidationError>) {
    let mut by_key: HashMap<&str, &ast::Field> = HashMap::new();
    for sel in &set.selections {
        match sel {
            ast::Selection::Field(field) => {
                match by_key.get(field.response_key()) {
                    Some(existing) if existing.name != field.name || existing.arguments != field.arguments => {
                        errors.push(ValidationError::new(
                            format!("fields at response key `{}` select different field names or arguments and cannot be merged", field.response_key()),
                            vec![existing.span.start, field.span.start],
                        ));
                    }
                    _ => {
                        by_key.insert(field.response_key(), field);
                    }
                }
                if let Some(inner) = &field.selection_set {
                    check_selection_set_merging(inner, errors);
                }
            }
            ast::Selection::InlineFragment(inf) => check_selection_set_merging(&inf.selection_set, errors),
            ast::Selection::FragmentSpread(_) => {}
        }
    }
}

fn check_max_depth(document: &ast::Document, max_depth: usize) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for op in document.operations() {
        let mut visiting = HashSet::new();
        if selection_set_depth(&op.selection_set, document, &mut visiting) > max_depth {
            errors.push(ValidationError::new(format!("operation exceeds the maximum allowed selection depth of {max_depth}"), vec![op.span.start]));
        }
    }
    errors
}

fn selection_set_depth(set: &ast::SelectionSet, document: &ast::Document, visiting: &mut HashSet<String>) -> usize {
    set.selections.iter().map(|sel| selection_depth(sel, document, visiting)).max().unwrap_or(0)
}

fn selection_depth(sel: &ast::Selection, document: &ast::Document, visiting: &mut HashSet<String>) -> usize {
    match sel {
        ast::Selection::Field(field) => 1 + field.selection_set.as_ref().map(|s| selection_set_depth(s, document, visiting)).unwrap_or(0),
        ast::Selection::InlineFragment(inf) => selection_set_depth(&inf.selection_set, document, visiting),
        ast::Selection::FragmentSpread(fs) => {
            if !visiting.insert(fs.fragment_name.clone()) {
                return 0;
            }
            let depth =
                document.fragments().find(|f| f.name == fs.fragment_name).map(|f| selection_set_depth(&f.selection_set, document, visiting)).unwrap_or(0);
            visiting.remove(&fs.fragment_name);
            depth
        }
    }
}

//fn check_introspection_disabled(document: &ast::Document) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for op in document.operations() {
        let mut visiting = HashSet::new();
        check_no_introspection_root_fields(&op.selection_set, document, &mut visiting, &mut errors);
    }
    errors
}

fn check_no_introspection_root_fields(
    set: &ast::SelectionSet,
    document: &ast::Document,
    visiting: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for selection in &set.selections {
        match selection {
            ast::Selection::Field(field) => {
                if field.name == "__schema" || field.name == "__type" {
                    errors.push(ValidationError::new(format!("introspection is disabled: field `{}` is not queryable", field.name), vec![
                        field.span.start,
                    ]));
                }
                if let Some(inner) = &field.selection_set {
                    check_no_introspection_root_fields(inner, document, visiting, errors);
                }
            }
            ast::Selection::InlineFragment(inf) => check_no_introspection_root_fields(&inf.selection_set, document, visiting, errors),
            ast::Selection::FragmentSpread(fs) => {
                if !visiting.insert(fs.fragment_name.clone()) {
                    continue;
                }
                if let Some(target) = document.fragments().find(|f| f.name == fs.fragment_name) {
                    check_no_introspection_root_fields(&target.selection_set, document, visiting, errors);
                }
                visiting.remove(&fs.fragment_name);
            }
        }
    }
}

/ The single-pass half of the validator: field existence, argument shape,
/// directive legality, leaf/composite selection shape, fragment spread
/// applicability, and variable usage, all sharing one "current type" stack.
struct SelectionValidator<'a> {
    schema: &'a Schema,
    document: &'a ast::Document,
    variable_values: Option<&'a IndexMap<String, ResolvedValue>>,
    errors: Vec<ValidationError>,
    type_stack: Vec<Option<&'a GraphQLType>>,
    current_location: DirectiveLocationKind,
    variable_defs: HashMap<String, ast::VariableDefinition>,
    used_variables: HashSet<String>,
}

impl<'a> SelectionValidator<'a> {
    fn new(schema: &'a Schema, document: &'a ast::Document, variable_values: Option<&'a IndexMap<String, ResolvedValue>>) -> Self {
        SelectionValidator {
            schema,
            document,
            variable_values,
            errors: Vec::new(),
            type_stack: Vec::new(),
            current_location: DirectiveLocationKind::Query,
            variable_defs: HashMap::new(),
            used_variables: HashSet::new(),
        }
    }

    fn current_type(&self) -> Option<&'a GraphQLType> {
        self.type_stack.last().copied().flatten()
    }

    fn push_type(&mut self, ty: Option<&'a GraphQLType>) {
        self.type_stack.push(ty);
    }

    fn pop_type(&mut self) {
        self.type_stack.pop();
    }

    fn root_type_for(&self, kind: ast::OperationKind) -> Option<&'a GraphQLType> {
        match kind {
            ast::OperationKind::Query => self.schema.query_type().ok(),
            ast::OperationKind::Mutation => self.schema.mutation_type().and_then(|r| r.ok()),
            ast::OperationKind::Subscription => self.schema.subscription_type().and_then(|r| r.ok()),
        }
    }

    fn possible_concrete_types(&self, ty: &'a GraphQLType) -> HashSet<&'a str> {
        match ty {
            GraphQLType::Object(object) => std::iter::once(object.name.as_str()).collect(),
            GraphQLType::Interface(interface) => self
                .schema
                .types
                .values()
                .filter_map(|t| match t {
                    GraphQLType::Object(object) if object.interfaces.iter().any(|i| i.name() == interface.name) => Some(object.name.as_str()),
                    _ => None,
                })
                .collect(),
            GraphQLType::Union(union_type) => union_type.member_types.iter().map(|m| m.name()).collect(),
            _ => HashSet::new(),
        }
    }

    fn type_condition_possible(&self, parent: &'a GraphQLType, fragment_type: &'a GraphQLType) -> bool {
        let parent_possible = self.possible_concrete_types(parent);
        let fragment_possible = self.possible_concrete_types(fragment_type);
        parent_possible.intersection(&fragment_possible).next().is_some()
    }

    fn check_directives(&mut self, directives: &[ast::DirectiveAnnotation], location: DirectiveLocationKind) {
        let mut seen: HashSet<&str> = HashSet::new();
        for annotation in directives {
            match self.schema.get_directive(&annotation.name) {
                Some(def) => {
                    if !def.is_valid_at(location) {
                        self.errors.push(ValidationError::new(
                            format!("directive `@{}` is not valid at this location", annotation.name),
                            vec![annotation.span.start],
                        ));
                    }
                    if !def.repeatable && seen.contains(annotation.name.as_str()) {
                        self.errors.push(ValidationError::new(
                            format!("directive `@{}` is not repeatable but is applied more than once here", annotation.name),
                            vec![annotation.span.start],
                        ));
                    }
                    let declared = def.arguments.clone();
                    self.check_arguments(&annotation.arguments, &declared, &format!("directive `@{}`", annotation.name), annotation.span.start);
                }
                None => {
                    self.errors.push(ValidationError::new(format!("unknown directive `@{}`", annotation.name), vec![annotation.span.start]));
                }
            }
            seen.insert(&annotation.name);
        }
    }

    fn check_arguments(&mut self, supplied: &[ast::Argument], declared: &[InputValue], owner_desc: &str, owner_pos: SourcePosition) {
        let mut seen: HashSet<&str> = HashSet::new();
        for arg in supplied {
            if !seen.insert(arg.name.as_str()) {
                self.errors.push(ValidationError::new(format!("{owner_desc} has a duplicate argument `{}`", arg.name), vec![arg.span.start]));
            }
            match declared.iter().find(|d| d.name == arg.name) {
                Some(decl) => {
                    let type_annotation = decl.type_annotation.clone();
                    self.check_value(&arg.value, &type_annotation, &format!("{owner_desc} argument `{}`", arg.name));
                }
                None => {
                    self.errors.push(ValidationError::new(format!("{owner_desc} does not accept argument `{}`", arg.name), vec![arg.span.start]));
                }
            }
        }
        for decl in declared {
            if decl.is_required() && !supplied.iter().any(|a| a.name == decl.name) {
                self.errors.push(ValidationError::new(format!("{owner_desc} is missing required argument `{}`", decl.name), vec![owner_pos]));
            }
        }
    }

    fn check_value(&mut self, value: &ast::Value, type_annotation: &TypeAnnotation, context: &str) {
        if let ast::Value::Variable { name, span } = value {
            self.used_variables.insert(name.clone());
            match self.variable_defs.get(name) {
                Some(var_def) => {
                    let declared = TypeAnnotation::from_ast(var_def.span, &var_def.var_type);
                    if !declared.is_subtype_of(type_annotation) {
                        self.errors.push(ValidationError::new(
                            format!("variable `${name}` of type `{declared}` cannot be used where {context} expects `{type_annotation}`"),
                            vec![*span],
                        ));
                    }
                }
                None => {
                    self.errors.push(ValidationError::new(format!("variable `${name}` is not defined"), vec![*span]));
                }
            }
            return;
        }

        if let Some(variables) = self.variable_values {
            if coerce_literal_value(self.schema, type_annotation, value, variables, &Path::root()).is_err() {
                self.errors.push(ValidationError::new(
                    format!("value supplied for {context} does not match its declared type `{type_annotation}`"),
                    vec![value.span()],
                ));
            }
        }
    }
}

impl<'a> Visitor for SelectionValidator<'a> {
    fn enter_operation(&mut self, node: &ast::OperationDefinition) -> VisitControl {
        self.current_location = match node.kind {
            ast::OperationKind::Query => DirectiveLocationKind::Query,
            ast::OperationKind::Mutation => DirectiveLocationKind::Mutation,
            ast::OperationKind::Subscription => DirectiveLocationKind::Subscription,
        };
        self.variable_defs = node.variable_definitions.iter().map(|vd| (vd.name.clone(), vd.clone())).collect();
        self.used_variables.clear();

        let root_type = self.root_type_for(node.kind);
        if root_type.is_none() {
            self.errors.push(ValidationError::new(format!("no root `{}` type is defined for this schema", node.kind), vec![node.span.start]));
        }
        self.push_type(root_type);

        let location = self.current_location;
        self.check_directives(&node.directives, location);
        VisitControl::Continue
    }

    fn leave_operation(&mut self, node: &ast::OperationDefinition) {
        self.pop_type();
        for vd in &node.variable_definitions {
            if !self.used_variables.contains(&vd.name) {
                self.errors.push(ValidationError::new(format!("variable `${}` is never used", vd.name), vec![vd.span.start]));
            }
        }
    }

    fn enter_variable_definition(&mut self, node: &ast::VariableDefinition) -> VisitControl {
        if let Some(default) = &node.default_value {
            let declared = TypeAnnotation::from_ast(node.span, &node.var_type);
            self.check_value(default, &declared, &format!("variable `${}`'s default value", node.name));
        }
        VisitControl::Continue
    }

    fn enter_fragment_definition(&mut self, node: &ast::FragmentDefinition) -> VisitControl {
        self.current_location = DirectiveLocationKind::FragmentDefinition;
        match self.schema.get_type(&node.type_condition) {
            Some(t) if t.is_composite() => self.push_type(Some(t)),
            Some(t) => {
                self.errors.push(ValidationError::new(
                    format!("fragment `{}` cannot condition on non-composite type `{}`", node.name, t.name()),
                    vec![node.span.start],
                ));
                self.push_type(None);
            }
            None => {
                self.errors.push(ValidationError::new(
                    format!("fragment `{}` conditions on unknown type `{}`", node.name, node.type_condition),
                    vec![node.span.start],
                ));
                self.push_type(None);
            }
        }

        let location = self.current_location;
        self.check_directives(&node.directives, location);
        VisitControl::Continue
    }

    fn leave_fragment_definition(&mut self, _node: &ast::FragmentDefinition) {
        self.pop_type();
    }

    fn enter_inline_fragment(&mut self, node: &ast::InlineFragment) -> VisitControl {
        self.current_location = DirectiveLocationKind::InlineFragment;
        let new_type = match &node.type_condition {
            Some(name) => match self.schema.get_type(name) {
                Some(t) if t.is_composite() => {
                    if let Some(parent) = self.current_type() {
                        if !self.type_condition_possible(parent, t) {
                            self.errors.push(ValidationError::new(
                                format!("inline fragment on `{}` can never apply within `{}`", t.name(), parent.name()),
                                vec![node.span.start],
                            ));
                        }
                    }
                    Some(t)
                }
                Some(t) => {
                    self.errors.push(ValidationError::new(format!("inline fragment cannot condition on non-composite type `{}`", t.name()), vec![node.span.start]));
                    None
                }
                None => {
                    self.errors.push(ValidationError::new(format!("inline fragment conditions on unknown type `{name}`"), vec![node.span.start]));
                    None
                }
            },
            None => self.current_type(),
        };
        self.push_type(new_type);

        let location = self.current_location;
        self.check_directives(&node.directives, location);
        VisitControl::Continue
    }

    fn leave_inline_fragment(&mut self, _node: &ast::InlineFragment) {
        self.pop_type();
    }

    fn enter_fragment_spread(&mut self, node: &ast::FragmentSpread) -> VisitControl {
        self.current_location = DirectiveLocationKind::FragmentSpread;
        match self.document.fragments().find(|f| f.name == node.fragment_name) {
            Some(target) => {
                if let (Some(parent), Some(target_type)) = (self.current_type(), self.schema.get_type(&target.type_condition)) {
                    if !self.type_condition_possible(parent, target_type) {
                        self.errors.push(ValidationError::new(
                            format!("fragment `{}` on `{}` can never apply within `{}`", target.name, target_type.name(), parent.name()),
                            vec![node.span.start],
                        ));
                    }
                }
            }
            None => {
                self.errors.push(ValidationError::new(format!("fragment `{}` is not defined", node.fragment_name), vec![node.span.start]));
            }
        }

        let location = self.current_location;
        self.check_directives(&node.directives, location);
        VisitControl::Continue
    }

    fn enter_field(&mut self, node: &ast::Field) -> VisitControl {
        self.current_location = DirectiveLocationKind::Field;
        let parent_type = self.current_type();

        if node.name == "__typename" && parent_type.is_some_and(GraphQLType::is_composite) {
            let location = self.current_location;
            self.check_directives(&node.directives, location);
            if node.selection_set.is_some() {
                self.errors.push(ValidationError::new(
                    format!("field `{}` is a scalar or enum and cannot have a selection set", node.response_key()),
                    vec![node.span.start],
                ));
            }
            self.push_type(None);
            return VisitControl::Continue;
        }

        let field_def = parent_type.and_then(|t| t.field(&node.name));

        if parent_type.is_some() && field_def.is_none() {
            let parent_name = parent_type.map(|t| t.name()).unwrap_or("?");
            self.errors.push(ValidationError::new(format!("field `{}` is not defined on type `{parent_name}`", node.name), vec![node.span.start]));
        }

        let location = self.current_location;
        self.check_directives(&node.directives, location);

        match field_def {
            Some(field) => {
                let declared = field.arguments.clone();
                self.check_arguments(&node.arguments, &declared, &format!("field `{}`", node.response_key()), node.span.start);

                let return_type = field.type_annotation.inner_type(self.schema).ok();
                match return_type {
                    Some(t) if t.is_composite() => {
                        if node.selection_set.is_none() {
                            self.errors.push(ValidationError::new(
                                format!("field `{}` returns composite type `{}` and must have a selection set", node.response_key(), t.name()),
                                vec![node.span.start],
                            ));
                        }
                    }
                    Some(_) => {
                        if node.selection_set.is_some() {
                            self.errors.push(ValidationError::new(
                                format!("field `{}` is a scalar or enum and cannot have a selection set", node.response_key()),
                                vec![node.span.start],
                            ));
                        }
                    }
                    None => {}
                }
                self.push_type(return_type);
            }
            None => self.push_type(None),
        }

        VisitControl::Continue
    }

    fn leave_field(&mut self, _node: &ast::Field) {
        self.pop_type();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema_builder::SchemaBuilder;
    use libgraphql_parser::parser::parse_query;
    use libgraphql_parser::parser::parse_schema;

    fn build_schema(sdl: &str) -> Schema {
        let document = parse_schema(sdl).expect("valid SDL");
        SchemaBuilder::new(&document).build().expect("schema builds")
    }

    const SDL: &str = r#"
        type Query {
            hero(id: ID!): Character
            heroes: [Character!]!
        }

        interface Character {
            name: String!
        }

        type Human implements Character {
            name: String!
            homePlanet: String
        }

        type Droid implements Character {
            name: String!
            primaryFunction: String
        }
    "#;

    fn run(schema: &Schema, query: &str) -> Vec<ValidationError> {
        let document = parse_query(query).expect("valid query syntax");
        validate(schema, &document, None, &ValidationOptions::default())
    }

    #[test]
    fn accepts_a_well_formed_query() {
        let schema = build_schema(SDL);
        let errors = run(&schema, "query { hero(id: \"1\") { name } }");
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn rejects_an_undefined_field() {
        let schema = build_schema(SDL);
        let errors = run(&schema, "query { hero(id: \"1\") { nickname } }");
        assert!(errors.iter().any(|e| e.message.contains("nickname")));
    }

    #[test]
    fn rejects_a_missing_required_argument() {
        let schema = build_schema(SDL);
        let errors = run(&schema, "query { hero { name } }");
        assert!(errors.iter().any(|e| e.message.contains("required argument")));
    }

    #[test]
    fn rejects_a_scalar_field_with_a_selection_set() {
        let schema = build_schema(SDL);
        let errors = run(&schema, "query { hero(id: \"1\") { name { nope } } }");
        assert!(errors.iter().any(|e| e.message.contains("cannot have a selection set")));
    }

    #[test]
    fn rejects_a_composite_field_without_a_selection_set() {
        let schema = build_schema(SDL);
        let errors = run(&schema, "query { hero(id: \"1\") }");
        assert!(errors.iter().any(|e| e.message.contains("must have a selection set")));
    }

    #[test]
    fn rejects_an_undefined_fragment_spread() {
        let schema = build_schema(SDL);
        let errors = run(&schema, "query { hero(id: \"1\") { ...Missing } }");
        assert!(errors.iter().any(|e| e.message.contains("is not defined")));
    }

    #[test]
    fn rejects_an_unused_fragment() {
        let schema = build_schema(SDL);
        let query = r#"
            fragment CharacterName on Character { name }
            query { heroes { name } }
        "#;
        let errors = run(&schema, query);
        assert!(errors.iter().any(|e| e.message.contains("never used")));
    }

    #[test]
    fn rejects_a_fragment_cycle() {
        let schema = build_schema(SDL);
        let query = r#"
            fragment A on Character { name ...B }
            fragment B on Character { name ...A }
            query { heroes { ...A } }
        "#;
        let errors = run(&schema, query);
        assert!(errors.iter().any(|e| e.message.contains("spreads itself")));
    }

    #[test]
    fn rejects_an_inline_fragment_on_an_impossible_type() {
        let schema = build_schema(SDL);
        let query = "query { heroes { ... on Query { hero { name } } } }";
        let errors = run(&schema, query);
        assert!(errors.iter().any(|e| e.message.contains("can never apply")));
    }

    #[test]
    fn rejects_an_undefined_variable() {
        let schema = build_schema(SDL);
        let errors = run(&schema, "query { hero(id: $missing) { name } }");
        assert!(errors.iter().any(|e| e.message.contains("is not defined")));
    }

    #[test]
    fn rejects_an_unused_variable() {
        let schema = build_schema(SDL);
        let errors = run(&schema, "query($id: ID!) { heroes { name } }");
        assert!(errors.iter().any(|e| e.message.contains("is never used")));
    }

    #[test]
    fn rejects_an_unknown_directive() {
        let schema = build_schema(SDL);
        let errors = run(&schema, "query { hero(id: \"1\") { name @bogus } }");
        assert!(errors.iter().any(|e| e.message.contains("unknown directive")));
    }

    #[test]
    fn rejects_a_directive_in_the_wrong_location() {
        let schema = build_schema(SDL);
        let errors = run(&schema, "query @skip(if: true) { hero(id: \"1\") { name } }");
        assert!(errors.iter().any(|e| e.message.contains("not valid at this location")));
    }

    #[test]
    fn rejects_a_second_anonymous_operation() {
        let schema = build_schema(SDL);
        let query = r#"
            query { heroes { name } }
            query { heroes { name } }
        "#;
        let errors = run(&schema, query);
        assert!(errors.iter().any(|e| e.message.contains("must be the only operation")));
    }

    #[test]
    fn enforces_single_subscription_root_field() {
        let schema_sdl = format!("{SDL}\n type Subscription {{ heroAdded: Character! bogus: Character! }}");
        let schema = build_schema(&schema_sdl);
        let errors = run(&schema, "subscription { heroAdded { name } bogus { name } }");
        assert!(errors.iter().any(|e| e.message.contains("exactly one top-level field")));
    }
}
