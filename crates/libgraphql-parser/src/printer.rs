//! Renders AST nodes back to canonical GraphQL source text.
//!
//! `print_ast(&document)` round-trips with `parse_query`/`parse_schema`:
//! reparsing printed output yields a structurally equal AST (whitespace and
//! comments are not preserved — this crate has no lossless/trivia layer).

use crate::ast::*;

pub fn print_ast(document: &Document) -> String {
    let mut out = String::new();
    for (i, def) in document.definitions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        print_definition(def, &mut out);
        out.push('\n');
    }
    out
}

fn print_definition(def: &Definition, out: &mut String) {
    match def {
        Definition::Operation(op) => print_operation(op, out),
        Definition::Fragment(frag) => print_fragment(frag, out),
        Definition::TypeSystem(td) => print_type_definition(td, out),
        Definition::TypeSystemExtension(ext) => print_type_extension(ext, out),
        Definition::Schema(sd) => print_schema_definition(sd, out),
        Definition::Directive(dd) => print_directive_definition(dd, out),
    }
}

fn print_operation(op: &OperationDefinition, out: &mut String) {
    let is_shorthand = op.name.is_none()
        && op.kind == OperationKind::Query
        && op.variable_definitions.is_empty()
        && op.directives.is_empty();
    if !is_shorthand {
        out.push_str(&op.kind.to_string());
        if let Some(name) = &op.name {
            out.push(' ');
            out.push_str(name);
        }
        if !op.variable_definitions.is_empty() {
            out.push('(');
            for (i, vd) in op.variable_definitions.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                print_variable_definition(vd, out);
            }
            out.push(')');
        }
        print_directives(&op.directives, out);
        out.push(' ');
    }
    print_selection_set(&op.selection_set, out);
}

fn print_variable_definition(vd: &VariableDefinition, out: &mut String) {
    out.push('$');
    out.push_str(&vd.name);
    out.push_str(": ");
    out.push_str(&vd.var_type.to_string());
    if let Some(default) = &vd.default_value {
        out.push_str(" = ");
        print_value(default, out);
    }
    print_directives(&vd.directives, out);
}

fn print_fragment(frag: &FragmentDefinition, out: &mut String) {
    out.push_str("fragment ");
    out.push_str(&frag.name);
    out.push_str(" on ");
    out.push_str(&frag.type_condition);
    print_directives(&frag.directives, out);
    out.push(' ');
    print_selection_set(&frag.selection_set, out);
}

fn print_selection_set(set: &SelectionSet, out: &mut String) {
    out.push('{');
    for (i, sel) in set.selections.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        print_selection(sel, out);
    }
    out.push('}');
}

fn print_selection(sel: &Selection, out: &mut String) {
    match sel {
        Selection::Field(f) => print_field(f, out),
        Selection::FragmentSpread(fs) => print_fragment_spread(fs, out),
        Selection::InlineFragment(inf) => print_inline_fragment(inf, out),
    }
}

fn print_field(field: &Field, out: &mut String) {
    if let Some(alias) = &field.alias {
        out.push_str(alias);
        out.push_str(": ");
    }
    out.push_str(&field.name);
    if !field.arguments.is_empty() {
        out.push('(');
        for (i, arg) in field.arguments.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            print_argument(arg, out);
        }
        out.push(')');
    }
    print_directives(&field.directives, out);
    if let Some(set) = &field.selection_set {
        out.push(' ');
        print_selection_set(set, out);
    }
}

fn print_fragment_spread(fs: &FragmentSpread, out: &mut String) {
    out.push_str("...");
    out.push_str(&fs.fragment_name);
    print_directives(&fs.directives, out);
}

fn print_inline_fragment(inf: &InlineFragment, out: &mut String) {
    out.push_str("...");
    if let Some(cond) = &inf.type_condition {
        out.push_str(" on ");
        out.push_str(cond);
    }
    print_directives(&inf.directives, out);
    out.push(' ');
    print_selection_set(&inf.selection_set, out);
}

fn print_argument(arg: &Argument, out: &mut String) {
    out.push_str(&arg.name);
    out.push_str(": ");
    print_value(&arg.value, out);
}

fn print_directives(directives: &[DirectiveAnnotation], out: &mut String) {
    for d in directives {
        out.push(' ');
        out.push('@');
        out.push_str(&d.name);
        if !d.arguments.is_empty() {
            out.push('(');
            for (i, arg) in d.arguments.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                print_argument(arg, out);
            }
            out.push(')');
        }
    }
}

pub fn print_value(value: &Value, out: &mut String) {
    match value {
        Value::Variable { name, .. } => {
            out.push('$');
            out.push_str(name);
        }
        Value::Int { raw, .. } | Value::Float { raw, .. } => out.push_str(raw),
        Value::String { value, block, .. } => {
            if *block {
                print_block_string(value, out);
            } else {
                print_quoted_string(value, out);
            }
        }
        Value::Boolean { value, .. } => out.push_str(if *value { "true" } else { "false" }),
        Value::Null { .. } => out.push_str("null"),
        Value::Enum { name, .. } => out.push_str(name),
        Value::List { values, .. } => {
            out.push('[');
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                print_value(v, out);
            }
            out.push(']');
        }
        Value::Object { fields, .. } => {
            out.push('{');
            for (i, f) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&f.name);
                out.push_str(": ");
                print_value(&f.value, out);
            }
            out.push('}');
        }
    }
}

fn print_quoted_string(value: &str, out: &mut String) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn print_block_string(value: &str, out: &mut String) {
    out.push_str("\"\"\"");
    out.push_str(&value.replace("\"\"\"", "\\\"\"\""));
    out.push_str("\"\"\"");
}

fn print_description(description: &Description, out: &mut String) {
    if let Some(desc) = description {
        print_block_string(desc, out);
        out.push('\n');
    }
}

fn print_type_definition(td: &TypeDefinition, out: &mut String) {
    match td {
        TypeDefinition::Scalar(d) => {
            print_description(&d.description, out);
            out.push_str("scalar ");
            out.push_str(&d.name);
            print_directives(&d.directives, out);
        }
        TypeDefinition::Object(d) => {
            print_description(&d.description, out);
            out.push_str("type ");
            out.push_str(&d.name);
            print_implements(&d.implements_interfaces, out);
            print_directives(&d.directives, out);
            print_field_definitions(&d.fields, out);
        }
        TypeDefinition::Interface(d) => {
            print_description(&d.description, out);
            out.push_str("interface ");
            out.push_str(&d.name);
            print_implements(&d.implements_interfaces, out);
            print_directives(&d.directives, out);
            print_field_definitions(&d.fields, out);
        }
        TypeDefinition::Union(d) => {
            print_description(&d.description, out);
            out.push_str("union ");
            out.push_str(&d.name);
            print_directives(&d.directives, out);
            if !d.member_types.is_empty() {
                out.push_str(" = ");
                out.push_str(&d.member_types.join(" | "));
            }
        }
        TypeDefinition::Enum(d) => {
            print_description(&d.description, out);
            out.push_str("enum ");
            out.push_str(&d.name);
            print_directives(&d.directives, out);
            out.push_str(" {");
            for v in &d.values {
                out.push('\n');
                print_description(&v.description, out);
                out.push_str("  ");
                out.push_str(&v.name);
                print_directives(&v.directives, out);
            }
            out.push_str("\n}");
        }
        TypeDefinition::InputObject(d) => {
            print_description(&d.description, out);
            out.push_str("input ");
            out.push_str(&d.name);
            print_directives(&d.directives, out);
            out.push_str(" {");
            for f in &d.fields {
                out.push('\n');
                print_description(&f.description, out);
                out.push_str("  ");
                print_input_value_definition(f, out);
            }
            out.push_str("\n}");
        }
    }
}

fn print_implements(interfaces: &[String], out: &mut String) {
    if !interfaces.is_empty() {
        out.push_str(" implements ");
        out.push_str(&interfaces.join(" & "));
    }
}

fn print_field_definitions(fields: &[FieldDefinition], out: &mut String) {
    if fields.is_empty() {
        return;
    }
    out.push_str(" {");
    for f in fields {
        out.push('\n');
        print_description(&f.description, out);
        out.push_str("  ");
        out.push_str(&f.name);
        if !f.arguments.is_empty() {
            out.push('(');
            for (i, a) in f.arguments.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                print_input_value_definition(a, out);
            }
            out.push(')');
        }
        out.push_str(": ");
        out.push_str(&f.field_type.to_string());
        print_directives(&f.directives, out);
    }
    out.push_str("\n}");
}

fn print_input_value_definition(iv: &InputValueDefinition, out: &mut String) {
    out.push_str(&iv.name);
    out.push_str(": ");
    out.push_str(&iv.value_type.to_string());
    if let Some(default) = &iv.default_value {
        out.push_str(" = ");
        print_value(default, out);
    }
    print_directives(&iv.directives, out);
}

fn print_schema_definition(sd: &SchemaDefinition, out: &mut String) {
    print_description(&sd.description, out);
    out.push_str("schema");
    print_directives(&sd.directives, out);
    out.push_str(" {");
    for rot in &sd.root_operation_types {
        out.push('\n');
        out.push_str("  ");
        out.push_str(&rot.operation.to_string());
        out.push_str(": ");
        out.push_str(&rot.named_type);
    }
    out.push_str("\n}");
}

fn print_directive_definition(dd: &DirectiveDefinition, out: &mut String) {
    print_description(&dd.description, out);
    out.push_str("directive @");
    out.push_str(&dd.name);
    if !dd.arguments.is_empty() {
        out.push('(');
        for (i, a) in dd.arguments.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            print_input_value_definition(a, out);
        }
        out.push(')');
    }
    if dd.repeatable {
        out.push_str(" repeatable");
    }
    out.push_str(" on ");
    out.push_str(
        &dd.locations
            .iter()
            .map(|l| l.kind.name())
            .collect::<Vec<_>>()
            .join(" | "),
    );
}

fn print_type_extension(ext: &TypeExtension, out: &mut String) {
    out.push_str("extend ");
    match ext {
        TypeExtension::Schema(sd) => {
            out.push_str("schema");
            print_directives(&sd.directives, out);
            if !sd.root_operation_types.is_empty() {
                out.push_str(" {");
                for rot in &sd.root_operation_types {
                    out.push('\n');
                    out.push_str("  ");
                    out.push_str(&rot.operation.to_string());
                    out.push_str(": ");
                    out.push_str(&rot.named_type);
                }
                out.push_str("\n}");
            }
        }
        TypeExtension::Scalar(d) => {
            out.push_str("scalar ");
            out.push_str(&d.name);
            print_directives(&d.directives, out);
        }
        TypeExtension::Object(d) => {
            out.push_str("type ");
            out.push_str(&d.name);
            print_implements(&d.implements_interfaces, out);
            print_directives(&d.directives, out);
            print_field_definitions(&d.fields, out);
        }
        TypeExtension::Interface(d) => {
            out.push_str("interface ");
            out.push_str(&d.name);
            print_implements(&d.implements_interfaces, out);
            print_directives(&d.directives, out);
            print_field_definitions(&d.fields, out);
        }
        TypeExtension::Union(d) => {
            out.push_str("union ");
            out.push_str(&d.name);
            print_directives(&d.directives, out);
            if !d.member_types.is_empty() {
                out.push_str(" = ");
                out.push_str(&d.member_types.join(" | "));
            }
        }
        TypeExtension::Enum(d) => {
            out.push_str("enum ");
            out.push_str(&d.name);
            print_directives(&d.directives, out);
            if !d.values.is_empty() {
                out.push_str(" {");
                for v in &d.values {
                    out.push('\n');
                    out.push_str("  ");
                    out.push_str(&v.name);
                    print_directives(&v.directives, out);
                }
                out.push_str("\n}");
            }
        }
        TypeExtension::InputObject(d) => {
            out.push_str("input ");
            out.push_str(&d.name);
            print_directives(&d.directives, out);
            if !d.fields.is_empty() {
                out.push_str(" {");
                for f in &d.fields {
                    out.push('\n');
                    out.push_str("  ");
                    print_input_value_definition(f, out);
                }
                out.push_str("\n}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;
    use crate::parser::parse_query;
    use crate::parser::ParserOptions;

    fn parse_no_location(source: &str) -> Document {
        parse_document(source, ParserOptions { allow_type_system: false, no_location: true }).unwrap()
    }

    #[test]
    fn round_trips_simple_query() {
        let source = "query Greeting { hello(name: \"world\") alias: other }";
        let doc = parse_no_location(source);
        let printed = print_ast(&doc);
        let reparsed = parse_no_location(&printed);
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn shorthand_query_has_no_keyword() {
        let doc = parse_query("{ hello }").unwrap();
        let printed = print_ast(&doc);
        assert!(!printed.contains("query"));
    }
}
