//! Renders a built [`crate::schema::Schema`] back to SDL text.
//!
//! This is the schema-model counterpart to
//! [`libgraphql_parser::printer::print_ast`]: where that function prints an
//! already-parsed `Document`, `print_schema` prints the resolved, validated
//! model a [`crate::schema_builder::SchemaBuilder`] produces. Re-parsing and
//! rebuilding the output is expected to reproduce an equal schema modulo
//! declaration order — built-in scalars and directives are never printed,
//! since [`crate::schema::Schema::empty`] injects them unconditionally.

use crate::schema::Schema;
use crate::schema::BUILTIN_SCALAR_NAMES;
use crate::types::GraphQLType;
use libgraphql_parser::ast::DirectiveLocationKind;
use libgraphql_parser::printer::print_value;

pub fn print_schema(schema: &Schema) -> String {
    let mut out = String::new();
    print_schema_definition(schema, &mut out);

    let mut names: Vec<&String> = schema.types.keys().filter(|n| !BUILTIN_SCALAR_NAMES.contains(&n.as_str()) && !n.starts_with("__")).collect();
    names.sort();
    for name in names {
        let type_def = &schema.types[name];
        out.push('\n');
        print_type(type_def, &mut out);
    }

    let mut directive_names: Vec<&String> = schema.directives.keys().filter(|n| !is_builtin_directive(n)).collect();
    directive_names.sort();
    for name in directive_names {
        out.push('\n');
        print_directive_def(&schema.directives[name], &mut out);
    }

    out
}

fn is_builtin_directive(name: &str) -> bool {
    matches!(name, "skip" | "include" | "deprecated")
}

fn print_schema_definition(schema: &Schema, out: &mut String) {
    let query = schema.query_type().ok().map(GraphQLType::name);
    let mutation = schema.mutation_type().and_then(Result::ok).map(GraphQLType::name);
    let subscription = schema.subscription_type().and_then(Result::ok).map(GraphQLType::name);

    let matches_default_names =
        query == Some("Query") && mutation.unwrap_or("Mutation") == "Mutation" && subscription.unwrap_or("Subscription") == "Subscription";
    if matches_default_names {
        return;
    }

    out.push_str("schema {\n");
    if let Some(name) = query {
        out.push_str(&format!("  query: {name}\n"));
    }
    if let Some(name) = mutation {
        out.push_str(&format!("  mutation: {name}\n"));
    }
    if let Some(name) = subscription {
        out.push_str(&format!("  subscription: {name}\n"));
    }
    out.push_str("}\n");
}

fn print_description(description: &Option<String>, out: &mut String) {
    if let Some(text) = description {
        out.push_str("\"\"\"\n");
        out.push_str(text);
        out.push_str("\n\"\"\"\n");
    }
}

fn print_type(type_def: &GraphQLType, out: &mut String) {
    match type_def {
        GraphQLType::Scalar(t) => {
            print_description(&t.description, out);
            out.push_str(&format!("scalar {}\n", t.name));
        }
        GraphQLType::Object(t) => {
            print_description(&t.description, out);
            out.push_str(&format!("type {}", t.name));
            if !t.interfaces.is_empty() {
                let names: Vec<&str> = t.interfaces.iter().map(|i| i.name()).collect();
                out.push_str(" implements ");
                out.push_str(&names.join(" & "));
            }
            out.push_str(" {\n");
            let mut names: Vec<&String> = t.fields.keys().filter(|n| !n.starts_with("__")).collect();
            names.sort();
            for name in names {
                print_field(&t.fields[name], out);
            }
            out.push_str("}\n");
        }
        GraphQLType::Interface(t) => {
            print_description(&t.description, out);
            out.push_str(&format!("interface {} {{\n", t.name));
            let mut names: Vec<&String> = t.fields.keys().filter(|n| !n.starts_with("__")).collect();
            names.sort();
            for name in names {
                print_field(&t.fields[name], out);
            }
            out.push_str("}\n");
        }
        GraphQLType::Union(t) => {
            print_description(&t.description, out);
            let names: Vec<&str> = t.member_types.iter().map(|m| m.name()).collect();
            out.push_str(&format!("union {} = {}\n", t.name, names.join(" | ")));
        }
        GraphQLType::Enum(t) => {
            print_description(&t.description, out);
            out.push_str(&format!("enum {} {{\n", t.name));
            for value in &t.values {
                out.push_str("  ");
                out.push_str(&value.name);
                if let Some(reason) = &value.deprecated {
                    out.push_str(&format!(" @deprecated(reason: \"{reason}\")"));
                }
                out.push('\n');
            }
            out.push_str("}\n");
        }
        GraphQLType::InputObject(t) => {
            print_description(&t.description, out);
            out.push_str(&format!("input {} {{\n", t.name));
            let mut names: Vec<&String> = t.fields.keys().collect();
            names.sort();
            for name in names {
                out.push_str("  ");
                print_input_value(&t.fields[name], out);
                out.push('\n');
            }
            out.push_str("}\n");
        }
    }
}

fn print_field(field: &crate::types::Field, out: &mut String) {
    out.push_str("  ");
    out.push_str(&field.name);
    if !field.arguments.is_empty() {
        out.push('(');
        for (i, arg) in field.arguments.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            print_input_value(arg, out);
        }
        out.push(')');
    }
    out.push_str(": ");
    out.push_str(&field.type_annotation.to_string());
    if let Some(reason) = &field.deprecated {
        out.push_str(&format!(" @deprecated(reason: \"{reason}\")"));
    }
    out.push('\n');
}

fn print_input_value(input_value: &crate::types::InputValue, out: &mut String) {
    out.push_str(&input_value.name);
    out.push_str(": ");
    out.push_str(&input_value.type_annotation.to_string());
    if let Some(default) = &input_value.default_value {
        out.push_str(" = ");
        print_value(default, out);
    }
}

fn print_directive_def(directive: &crate::types::DirectiveDef, out: &mut String) {
    print_description(&directive.description, out);
    out.push_str(&format!("directive @{}", directive.name));
    if !directive.arguments.is_empty() {
        out.push('(');
        for (i, arg) in directive.arguments.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            print_input_value(arg, out);
        }
        out.push(')');
    }
    if directive.repeatable {
        out.push_str(" repeatable");
    }
    out.push_str(" on ");
    let locations: Vec<&str> = directive.locations.iter().map(location_name).collect();
    out.push_str(&locations.join(" | "));
    out.push('\n');
}

pub(crate) fn location_name(location: &DirectiveLocationKind) -> &'static str {
    match location {
        DirectiveLocationKind::Query => "QUERY",
        DirectiveLocationKind::Mutation => "MUTATION",
        DirectiveLocationKind::Subscription => "SUBSCRIPTION",
        DirectiveLocationKind::Field => "FIELD",
        DirectiveLocationKind::FragmentDefinition => "FRAGMENT_DEFINITION",
        DirectiveLocationKind::FragmentSpread => "FRAGMENT_SPREAD",
        DirectiveLocationKind::InlineFragment => "INLINE_FRAGMENT",
        DirectiveLocationKind::VariableDefinition => "VARIABLE_DEFINITION",
        DirectiveLocationKind::Schema => "SCHEMA",
        DirectiveLocationKind::Scalar => "SCALAR",
        DirectiveLocationKind::Object => "OBJECT",
        DirectiveLocationKind::FieldDefinition => "FIELD_DEFINITION",
        DirectiveLocationKind::ArgumentDefinition => "ARGUMENT_DEFINITION",
        DirectiveLocationKind::Interface => "INTERFACE",
        DirectiveLocationKind::Union => "UNION",
        DirectiveLocationKind::Enum => "ENUM",
        DirectiveLocationKind::EnumValue => "ENUM_VALUE",
        DirectiveLocationKind::InputObject => "INPUT_OBJECT",
        DirectiveLocationKind::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema_builder::SchemaBuilder;
    use libgraphql_parser::parser::parse_schema;

    fn build(sdl: &str) -> Schema {
        let document = parse_schema(sdl).expect("parses");
        SchemaBuilder::new(&document).build().expect("builds")
    }

    #[test]
    fn round_trips_a_simple_schema() {
        let sdl = "type Query {\n  hero: String\n}\n";
        let schema = build(sdl);
        let printed = print_schema(&schema);
        let reparsed = build(&printed);
        assert_eq!(schema.get_type("Query"), reparsed.get_type("Query"));
    }

    #[test]
    fn omits_builtin_scalars_and_directives() {
        let schema = build("type Query {\n  hero: String\n}\n");
        let printed = print_schema(&schema);
        assert!(!printed.contains("scalar Int"));
        assert!(!printed.contains("directive @skip"));
    }

    #[test]
    fn prints_enum_values_and_deprecations() {
        let sdl = "type Query { status: Status }\nenum Status {\n  OK\n  BAD @deprecated(reason: \"unused\")\n}\n";
        let schema = build(sdl);
        let printed = print_schema(&schema);
        assert!(printed.contains("enum Status"));
        assert!(printed.contains("BAD @deprecated(reason: \"unused\")"));
    }

    #[test]
    fn prints_interfaces_and_implements_clause() {
        let sdl = "type Query { node: Node }\ninterface Node { id: ID! }\ntype Item implements Node { id: ID! }\n";
        let schema = build(sdl);
        let printed = print_schema(&schema);
        assert!(printed.contains("interface Node"));
        assert!(printed.contains("type Item implements Node"));
    }
}
