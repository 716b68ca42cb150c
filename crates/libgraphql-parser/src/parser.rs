//! A one-token-lookahead recursive-descent parser for both the executable
//! query language grammar and the Schema Definition Language (SDL) grammar.
//!
//! The two grammars share a single [`Parser`]; which top-level definitions
//! are accepted is controlled by [`ParserOptions::allow_type_system`], since
//! a document may legally mix both only when the caller explicitly permits
//! it (an executable-query CLI never does; a schema-building pipeline
//! always does).

use crate::ast::*;
use crate::error::SyntaxError;
use crate::lexer::Lexer;
use crate::source_position::Span;
use crate::token::Token;
use crate::token::TokenKind;

#[derive(Clone, Copy, Debug, Default)]
pub struct ParserOptions {
    /// Accept SDL (`type`, `schema`, `directive`, `extend`, ...) definitions
    /// in addition to executable ones.
    pub allow_type_system: bool,
    /// Discard real source locations, replacing every span with
    /// [`Span::dummy`]. Useful for tests that compare ASTs structurally
    /// without caring about where in the source something appeared.
    pub no_location: bool,
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    options: ParserOptions,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, options: ParserOptions) -> Result<Self, SyntaxError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.advance()?;
        Ok(Parser { lexer, current, options })
    }

    fn bump(&mut self) -> Result<Token, SyntaxError> {
        let next = self.lexer.advance()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Closes a span at the position of the not-yet-consumed lookahead
    /// token: since the parser doesn't retain a general "last consumed
    /// token" slot, this is measured from where the next token starts
    /// rather than from the end of the node's true last token. The two
    /// coincide except across intervening ignored whitespace/comments.
    fn span_from(&self, start: Span) -> Span {
        if self.options.no_location {
            Span::dummy()
        } else {
            Span::new(start.start, self.current.span.start, start.start_byte, self.current.span.start_byte)
        }
    }

    /// Closes a span using the *just-consumed* token's end, for cases where
    /// `self.current` has already moved past the node's last token.
    fn span_ending_at(&self, start: Span, last_consumed: &Token) -> Span {
        if self.options.no_location {
            Span::dummy()
        } else {
            Span::new(start.start, last_consumed.span.end, start.start_byte, last_consumed.span.end_byte)
        }
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let pos = self.current.span.start;
        SyntaxError::new(
            format!("Expected {expected}, found {}", self.current.kind.describe()),
            pos,
            self.lexer_snippet(pos.line),
        )
    }

    fn lexer_snippet(&self, _line: usize) -> Option<String> {
        // Span already carries enough for the common case; detailed snippet
        // reconstruction lives in the lexer's own error path.
        None
    }

    fn at_eof(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    fn at_name(&self, name: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Name(n) if n == name)
    }

    fn at_punct(&self, kind: &TokenKind) -> bool {
        &self.current.kind == kind
    }

    fn expect_punct(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        if self.current.kind == kind {
            self.bump()
        } else {
            Err(self.unexpected(&kind.describe()))
        }
    }

    fn skip_punct(&mut self, kind: &TokenKind) -> Result<bool, SyntaxError> {
        if &self.current.kind == kind {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect_name(&mut self) -> Result<(String, Span), SyntaxError> {
        match &self.current.kind {
            TokenKind::Name(_) => {
                let tok = self.bump()?;
                let TokenKind::Name(name) = tok.kind else { unreachable!() };
                Ok((name, tok.span))
            }
            _ => Err(self.unexpected("Name")),
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<Span, SyntaxError> {
        if self.at_name(keyword) {
            Ok(self.bump()?.span)
        } else {
            Err(self.unexpected(&format!("\"{keyword}\"")))
        }
    }

    // ---- Document ----

    pub fn parse_document(&mut self) -> Result<Document, SyntaxError> {
        let mut definitions = Vec::new();
        while !self.at_eof() {
            definitions.push(self.parse_definition()?);
        }
        Ok(Document { definitions })
    }

    fn parse_definition(&mut self) -> Result<Definition, SyntaxError> {
        let description = self.parse_optional_description()?;
        if description.is_some() && !self.options.allow_type_system {
            return Err(self.unexpected("executable definition"));
        }

        if self.at_punct(&TokenKind::BraceOpen) {
            return Ok(Definition::Operation(self.parse_operation_definition()?));
        }

        match &self.current.kind {
            TokenKind::Name(n) if n == "query" || n == "mutation" || n == "subscription" => {
                Ok(Definition::Operation(self.parse_operation_definition()?))
            }
            TokenKind::Name(n) if n == "fragment" => {
                Ok(Definition::Fragment(self.parse_fragment_definition()?))
            }
            TokenKind::Name(n) if n == "schema" && self.options.allow_type_system => {
                Ok(Definition::Schema(self.parse_schema_definition(description)?))
            }
            TokenKind::Name(n) if n == "directive" && self.options.allow_type_system => {
                Ok(Definition::Directive(self.parse_directive_definition(description)?))
            }
            TokenKind::Name(n)
                if self.options.allow_type_system
                    && matches!(n.as_str(), "scalar" | "type" | "interface" | "union" | "enum" | "input") =>
            {
                Ok(Definition::TypeSystem(self.parse_type_definition(description)?))
            }
            TokenKind::Name(n) if n == "extend" && self.options.allow_type_system => {
                Ok(Definition::TypeSystemExtension(self.parse_type_extension()?))
            }
            _ => Err(self.unexpected("definition")),
        }
    }

    fn parse_optional_description(&mut self) -> Result<Description, SyntaxError> {
        match &self.current.kind {
            TokenKind::Str(_) | TokenKind::BlockStr(_) => {
                let tok = self.bump()?;
                let value = match tok.kind {
                    TokenKind::Str(s) | TokenKind::BlockStr(s) => s,
                    _ => unreachable!(),
                };
                Ok(Some(value))
            }
            _ => Ok(None),
        }
    }

    // ---- Executable definitions ----

    fn parse_operation_definition(&mut self) -> Result<OperationDefinition, SyntaxError> {
        let start = self.current.span;
        let kind = match &self.current.kind {
            TokenKind::Name(n) => match n.as_str() {
                "query" => { self.bump()?; OperationKind::Query }
                "mutation" => { self.bump()?; OperationKind::Mutation }
                "subscription" => { self.bump()?; OperationKind::Subscription }
                _ => OperationKind::Query,
            },
            _ => OperationKind::Query,
        };

        let name = if matches!(self.current.kind, TokenKind::Name(_)) {
            Some(self.expect_name()?.0)
        } else {
            None
        };

        let variable_definitions = if self.at_punct(&TokenKind::ParenOpen) {
            self.parse_variable_definitions()?
        } else {
            Vec::new()
        };

        let directives = self.parse_directives()?;
        let selection_set = self.parse_selection_set()?;
        let span = self.span_from(start);
        Ok(OperationDefinition { kind, name, variable_definitions, directives, selection_set, span })
    }

    fn parse_variable_definitions(&mut self) -> Result<Vec<VariableDefinition>, SyntaxError> {
        self.expect_punct(TokenKind::ParenOpen)?;
        let mut defs = Vec::new();
        while !self.at_punct(&TokenKind::ParenClose) {
            defs.push(self.parse_variable_definition()?);
        }
        self.expect_punct(TokenKind::ParenClose)?;
        Ok(defs)
    }

    fn parse_variable_definition(&mut self) -> Result<VariableDefinition, SyntaxError> {
        let start = self.current.span;
        self.expect_punct(TokenKind::Dollar)?;
        let (name, _) = self.expect_name()?;
        self.expect_punct(TokenKind::Colon)?;
        let var_type = self.parse_type_annotation()?;
        let default_value = if self.skip_punct(&TokenKind::Equals)? {
            Some(self.parse_value(true)?)
        } else {
            None
        };
        let directives = self.parse_directives()?;
        let span = self.span_from(start);
        Ok(VariableDefinition { name, var_type, default_value, directives, span })
    }

    fn parse_fragment_definition(&mut self) -> Result<FragmentDefinition, SyntaxError> {
        let start = self.current.span;
        self.expect_keyword("fragment")?;
        let (name, _) = self.expect_name()?;
        self.expect_keyword("on")?;
        let (type_condition, _) = self.expect_name()?;
        let directives = self.parse_directives()?;
        let selection_set = self.parse_selection_set()?;
        let span = self.span_from(start);
        Ok(FragmentDefinition { name, type_condition, directives, selection_set, span })
    }

    fn parse_selection_set(&mut self) -> Result<SelectionSet, SyntaxError> {
        let start = self.current.span;
        self.expect_punct(TokenKind::BraceOpen)?;
        let mut selections = Vec::new();
        while !self.at_punct(&TokenKind::BraceClose) {
            selections.push(self.parse_selection()?);
        }
        let closing = self.expect_punct(TokenKind::BraceClose)?;
        Ok(SelectionSet { selections, span: self.span_ending_at(start, &closing) })
    }

    fn parse_selection(&mut self) -> Result<Selection, SyntaxError> {
        if self.at_punct(&TokenKind::Ellipsis) {
            self.parse_fragment_selection()
        } else {
            Ok(Selection::Field(self.parse_field()?))
        }
    }

    fn parse_fragment_selection(&mut self) -> Result<Selection, SyntaxError> {
        let start = self.current.span;
        self.expect_punct(TokenKind::Ellipsis)?;
        if self.at_name("on") {
            self.bump()?;
            let (type_condition, _) = self.expect_name()?;
            let directives = self.parse_directives()?;
            let selection_set = self.parse_selection_set()?;
            let span = self.span_from(start);
            return Ok(Selection::InlineFragment(InlineFragment {
                type_condition: Some(type_condition),
                directives,
                selection_set,
                span,
            }));
        }
        if matches!(&self.current.kind, TokenKind::Name(n) if n != "on") {
            let (fragment_name, _) = self.expect_name()?;
            let directives = self.parse_directives()?;
            let span = self.span_from(start);
            return Ok(Selection::FragmentSpread(FragmentSpread { fragment_name, directives, span }));
        }
        // Untyped inline fragment: `... @dir { ... }` / `... { ... }`.
        let directives = self.parse_directives()?;
        let selection_set = self.parse_selection_set()?;
        let span = self.span_from(start);
        Ok(Selection::InlineFragment(InlineFragment { type_condition: None, directives, selection_set, span }))
    }

    fn parse_field(&mut self) -> Result<Field, SyntaxError> {
        let start = self.current.span;
        let (first, _) = self.expect_name()?;
        let (alias, name) = if self.skip_punct(&TokenKind::Colon)? {
            let (name, _) = self.expect_name()?;
            (Some(first), name)
        } else {
            (None, first)
        };

        let arguments = if self.at_punct(&TokenKind::ParenOpen) {
            self.parse_arguments(false)?
        } else {
            Vec::new()
        };
        let directives = self.parse_directives()?;
        let selection_set = if self.at_punct(&TokenKind::BraceOpen) {
            Some(self.parse_selection_set()?)
        } else {
            None
        };
        let span = self.span_from(start);
        Ok(Field { alias, name, arguments, directives, selection_set, span })
    }

    fn parse_arguments(&mut self, const_only: bool) -> Result<Vec<Argument>, SyntaxError> {
        self.expect_punct(TokenKind::ParenOpen)?;
        let mut args = Vec::new();
        while !self.at_punct(&TokenKind::ParenClose) {
            let start = self.current.span;
            let (name, _) = self.expect_name()?;
            self.expect_punct(TokenKind::Colon)?;
            let value = self.parse_value(const_only)?;
            let span = self.span_from(start);
            args.push(Argument { name, value, span });
        }
        self.expect_punct(TokenKind::ParenClose)?;
        Ok(args)
    }

    fn parse_directives(&mut self) -> Result<Vec<DirectiveAnnotation>, SyntaxError> {
        let mut directives = Vec::new();
        while self.at_punct(&TokenKind::At) {
            let start = self.current.span;
            self.bump()?;
            let (name, _) = self.expect_name()?;
            let arguments = if self.at_punct(&TokenKind::ParenOpen) {
                self.parse_arguments(false)?
            } else {
                Vec::new()
            };
            let span = self.span_from(start);
            directives.push(DirectiveAnnotation { name, arguments, span });
        }
        Ok(directives)
    }

    // ---- Values ----

    fn parse_value(&mut self, const_only: bool) -> Result<Value, SyntaxError> {
        let start = self.current.span;
        match self.current.kind.clone() {
            TokenKind::Dollar => {
                if const_only {
                    return Err(self.unexpected("constant value (variables are not allowed here)"));
                }
                self.bump()?;
                let (name, _) = self.expect_name()?;
                Ok(Value::Variable { name, span: self.span_from(start) })
            }
            TokenKind::Int(raw) => {
                self.bump()?;
                Ok(Value::Int { raw, span: self.span_from(start) })
            }
            TokenKind::Float(raw) => {
                self.bump()?;
                Ok(Value::Float { raw, span: self.span_from(start) })
            }
            TokenKind::Str(value) => {
                self.bump()?;
                Ok(Value::String { value, block: false, span: self.span_from(start) })
            }
            TokenKind::BlockStr(value) => {
                self.bump()?;
                Ok(Value::String { value, block: true, span: self.span_from(start) })
            }
            TokenKind::Name(n) => {
                self.bump()?;
                match n.as_str() {
                    "true" => Ok(Value::Boolean { value: true, span: self.span_from(start) }),
                    "false" => Ok(Value::Boolean { value: false, span: self.span_from(start) }),
                    "null" => Ok(Value::Null { span: self.span_from(start) }),
                    _ => Ok(Value::Enum { name: n, span: self.span_from(start) }),
                }
            }
            TokenKind::BracketOpen => self.parse_list_value(const_only, start),
            TokenKind::BraceOpen => self.parse_object_value(const_only, start),
            _ => Err(self.unexpected("value")),
        }
    }

    fn parse_list_value(&mut self, const_only: bool, start: Span) -> Result<Value, SyntaxError> {
        self.expect_punct(TokenKind::BracketOpen)?;
        let mut values = Vec::new();
        while !self.at_punct(&TokenKind::BracketClose) {
            values.push(self.parse_value(const_only)?);
        }
        self.expect_punct(TokenKind::BracketClose)?;
        Ok(Value::List { values, span: self.span_from(start) })
    }

    fn parse_object_value(&mut self, const_only: bool, start: Span) -> Result<Value, SyntaxError> {
        self.expect_punct(TokenKind::BraceOpen)?;
        let mut fields = Vec::new();
        while !self.at_punct(&TokenKind::BraceClose) {
            let field_start = self.current.span;
            let (name, _) = self.expect_name()?;
            self.expect_punct(TokenKind::Colon)?;
            let value = self.parse_value(const_only)?;
            fields.push(ObjectField { name, value, span: self.span_from(field_start) });
        }
        self.expect_punct(TokenKind::BraceClose)?;
        Ok(Value::Object { fields, span: self.span_from(start) })
    }

    // ---- Type annotations ----

    fn parse_type_annotation(&mut self) -> Result<TypeAnnotation, SyntaxError> {
        let start = self.current.span;
        let inner = if self.at_punct(&TokenKind::BracketOpen) {
            self.bump()?;
            let element = self.parse_type_annotation()?;
            self.expect_punct(TokenKind::BracketClose)?;
            TypeAnnotation::List { inner: Box::new(element), span: self.span_from(start) }
        } else {
            let (name, _) = self.expect_name()?;
            TypeAnnotation::Named { name, span: self.span_from(start) }
        };

        if self.skip_punct(&TokenKind::Bang)? {
            Ok(TypeAnnotation::NonNull { inner: Box::new(inner), span: self.span_from(start) })
        } else {
            Ok(inner)
        }
    }

    // ---- SDL: type system definitions ----

    fn parse_schema_definition(&mut self, description: Description) -> Result<SchemaDefinition, SyntaxError> {
        let start = self.current.span;
        self.expect_keyword("schema")?;
        let directives = self.parse_directives()?;
        self.expect_punct(TokenKind::BraceOpen)?;
        let mut root_operation_types = Vec::new();
        while !self.at_punct(&TokenKind::BraceClose) {
            root_operation_types.push(self.parse_root_operation_type_definition()?);
        }
        self.expect_punct(TokenKind::BraceClose)?;
        let span = self.span_from(start);
        Ok(SchemaDefinition { description, directives, root_operation_types, span })
    }

    fn parse_root_operation_type_definition(&mut self) -> Result<RootOperationTypeDefinition, SyntaxError> {
        let start = self.current.span;
        let (op_name, _) = self.expect_name()?;
        let operation = match op_name.as_str() {
            "query" => OperationKind::Query,
            "mutation" => OperationKind::Mutation,
            "subscription" => OperationKind::Subscription,
            _ => return Err(self.unexpected("\"query\", \"mutation\", or \"subscription\"")),
        };
        self.expect_punct(TokenKind::Colon)?;
        let (named_type, _) = self.expect_name()?;
        let span = self.span_from(start);
        Ok(RootOperationTypeDefinition { operation, named_type, span })
    }

    fn parse_type_definition(&mut self, description: Description) -> Result<TypeDefinition, SyntaxError> {
        let start = self.current.span;
        let (keyword, _) = self.expect_name()?;
        match keyword.as_str() {
            "scalar" => {
                let (name, _) = self.expect_name()?;
                let directives = self.parse_directives()?;
                let span = self.span_from(start);
                Ok(TypeDefinition::Scalar(ScalarTypeDefinition { description, name, directives, span }))
            }
            "type" => {
                let (name, _) = self.expect_name()?;
                let implements_interfaces = self.parse_implements_interfaces()?;
                let directives = self.parse_directives()?;
                let fields = self.parse_field_definitions()?;
                let span = self.span_from(start);
                Ok(TypeDefinition::Object(ObjectTypeDefinition {
                    description, name, implements_interfaces, directives, fields, span,
                }))
            }
            "interface" => {
                let (name, _) = self.expect_name()?;
                let implements_interfaces = self.parse_implements_interfaces()?;
                let directives = self.parse_directives()?;
                let fields = self.parse_field_definitions()?;
                let span = self.span_from(start);
                Ok(TypeDefinition::Interface(InterfaceTypeDefinition {
                    description, name, implements_interfaces, directives, fields, span,
                }))
            }
            "union" => {
                let (name, _) = self.expect_name()?;
                let directives = self.parse_directives()?;
                let member_types = self.parse_union_member_types()?;
                let span = self.span_from(start);
                Ok(TypeDefinition::Union(UnionTypeDefinition { description, name, directives, member_types, span }))
            }
            "enum" => {
                let (name, _) = self.expect_name()?;
                let directives = self.parse_directives()?;
                let values = self.parse_enum_value_definitions()?;
                let span = self.span_from(start);
                Ok(TypeDefinition::Enum(EnumTypeDefinition { description, name, directives, values, span }))
            }
            "input" => {
                let (name, _) = self.expect_name()?;
                let directives = self.parse_directives()?;
                let fields = self.parse_input_value_definitions(TokenKind::BraceOpen, TokenKind::BraceClose)?;
                let span = self.span_from(start);
                Ok(TypeDefinition::InputObject(InputObjectTypeDefinition { description, name, directives, fields, span }))
            }
            _ => Err(self.unexpected("type system definition")),
        }
    }

    fn parse_implements_interfaces(&mut self) -> Result<Vec<String>, SyntaxError> {
        let mut interfaces = Vec::new();
        if self.at_name("implements") {
            self.bump()?;
            self.skip_punct(&TokenKind::Ampersand)?;
            loop {
                let (name, _) = self.expect_name()?;
                interfaces.push(name);
                if !self.skip_punct(&TokenKind::Ampersand)? {
                    break;
                }
            }
        }
        Ok(interfaces)
    }

    fn parse_field_definitions(&mut self) -> Result<Vec<FieldDefinition>, SyntaxError> {
        if !self.skip_punct(&TokenKind::BraceOpen)? {
            return Ok(Vec::new());
        }
        let mut fields = Vec::new();
        while !self.at_punct(&TokenKind::BraceClose) {
            fields.push(self.parse_field_definition()?);
        }
        self.expect_punct(TokenKind::BraceClose)?;
        Ok(fields)
    }

    fn parse_field_definition(&mut self) -> Result<FieldDefinition, SyntaxError> {
        let start = self.current.span;
        let description = self.parse_optional_description()?;
        let (name, _) = self.expect_name()?;
        let arguments = self.parse_input_value_definitions(TokenKind::ParenOpen, TokenKind::ParenClose)?;
        self.expect_punct(TokenKind::Colon)?;
        let field_type = self.parse_type_annotation()?;
        let directives = self.parse_directives()?;
        let span = self.span_from(start);
        Ok(FieldDefinition { description, name, arguments, field_type, directives, span })
    }

    fn parse_input_value_definitions(
        &mut self,
        open: TokenKind,
        close: TokenKind,
    ) -> Result<Vec<InputValueDefinition>, SyntaxError> {
        if !self.skip_punct(&open)? {
            return Ok(Vec::new());
        }
        let mut values = Vec::new();
        while !self.at_punct(&close) {
            values.push(self.parse_input_value_definition()?);
        }
        self.expect_punct(close)?;
        Ok(values)
    }

    fn parse_input_value_definition(&mut self) -> Result<InputValueDefinition, SyntaxError> {
        let start = self.current.span;
        let description = self.parse_optional_description()?;
        let (name, _) = self.expect_name()?;
        self.expect_punct(TokenKind::Colon)?;
        let value_type = self.parse_type_annotation()?;
        let default_value = if self.skip_punct(&TokenKind::Equals)? {
            Some(self.parse_value(true)?)
        } else {
            None
        };
        let directives = self.parse_directives()?;
        let span = self.span_from(start);
        Ok(InputValueDefinition { description, name, value_type, default_value, directives, span })
    }

    fn parse_union_member_types(&mut self) -> Result<Vec<String>, SyntaxError> {
        let mut members = Vec::new();
        if self.skip_punct(&TokenKind::Equals)? {
            self.skip_punct(&TokenKind::Pipe)?;
            loop {
                let (name, _) = self.expect_name()?;
                members.push(name);
                if !self.skip_punct(&TokenKind::Pipe)? {
                    break;
                }
            }
        }
        Ok(members)
    }

    fn parse_enum_value_definitions(&mut self) -> Result<Vec<EnumValueDefinition>, SyntaxError> {
        if !self.skip_punct(&TokenKind::BraceOpen)? {
            return Ok(Vec::new());
        }
        let mut values = Vec::new();
        while !self.at_punct(&TokenKind::BraceClose) {
            let start = self.current.span;
            let description = self.parse_optional_description()?;
            let (name, _) = self.expect_name()?;
            let directives = self.parse_directives()?;
            let span = self.span_from(start);
            values.push(EnumValueDefinition { description, name, directives, span });
        }
        self.expect_punct(TokenKind::BraceClose)?;
        Ok(values)
    }

    fn parse_directive_definition(&mut self, description: Description) -> Result<DirectiveDefinition, SyntaxError> {
        let start = self.current.span;
        self.expect_keyword("directive")?;
        self.expect_punct(TokenKind::At)?;
        let (name, _) = self.expect_name()?;
        let arguments = self.parse_input_value_definitions(TokenKind::ParenOpen, TokenKind::ParenClose)?;
        let repeatable = self.at_name("repeatable");
        if repeatable {
            self.bump()?;
        }
        self.expect_keyword("on")?;
        self.skip_punct(&TokenKind::Pipe)?;
        let mut locations = Vec::new();
        loop {
            let loc_start = self.current.span;
            let (loc_name, _) = self.expect_name()?;
            let kind = DirectiveLocationKind::from_name(&loc_name)
                .ok_or_else(|| self.unexpected("directive location"))?;
            locations.push(DirectiveLocation { kind, span: self.span_from(loc_start) });
            if !self.skip_punct(&TokenKind::Pipe)? {
                break;
            }
        }
        let span = self.span_from(start);
        Ok(DirectiveDefinition { description, name, arguments, repeatable, locations, span })
    }

    fn parse_type_extension(&mut self) -> Result<TypeExtension, SyntaxError> {
        let start = self.current.span;
        self.expect_keyword("extend")?;
        let (keyword, _) = self.expect_name()?;
        match keyword.as_str() {
            "schema" => {
                let directives = self.parse_directives()?;
                let root_operation_types = if self.at_punct(&TokenKind::BraceOpen) {
                    self.bump()?;
                    let mut v = Vec::new();
                    while !self.at_punct(&TokenKind::BraceClose) {
                        v.push(self.parse_root_operation_type_definition()?);
                    }
                    self.expect_punct(TokenKind::BraceClose)?;
                    v
                } else {
                    Vec::new()
                };
                let span = self.span_from(start);
                Ok(TypeExtension::Schema(SchemaDefinition { description: None, directives, root_operation_types, span }))
            }
            "scalar" => {
                let (name, _) = self.expect_name()?;
                let directives = self.parse_directives()?;
                let span = self.span_from(start);
                Ok(TypeExtension::Scalar(ScalarTypeDefinition { description: None, name, directives, span }))
            }
            "type" => {
                let (name, _) = self.expect_name()?;
                let implements_interfaces = self.parse_implements_interfaces()?;
                let directives = self.parse_directives()?;
                let fields = self.parse_field_definitions()?;
                let span = self.span_from(start);
                Ok(TypeExtension::Object(ObjectTypeDefinition {
                    description: None, name, implements_interfaces, directives, fields, span,
                }))
            }
            "interface" => {
                let (name, _) = self.expect_name()?;
                let implements_interfaces = self.parse_implements_interfaces()?;
                let directives = self.parse_directives()?;
                let fields = self.parse_field_definitions()?;
                let span = self.span_from(start);
                Ok(TypeExtension::Interface(InterfaceTypeDefinition {
                    description: None, name, implements_interfaces, directives, fields, span,
                }))
            }
            "union" => {
                let (name, _) = self.expect_name()?;
                let directives = self.parse_directives()?;
                let member_types = self.parse_union_member_types()?;
                let span = self.span_from(start);
                Ok(TypeExtension::Union(UnionTypeDefinition { description: None, name, directives, member_types, span }))
            }
            "enum" => {
                let (name, _) = self.expect_name()?;
                let directives = self.parse_directives()?;
                let values = self.parse_enum_value_definitions()?;
                let span = self.span_from(start);
                Ok(TypeExtension::Enum(EnumTypeDefinition { description: None, name, directives, values, span }))
            }
            "input" => {
                let (name, _) = self.expect_name()?;
                let directives = self.parse_directives()?;
                let fields = self.parse_input_value_definitions(TokenKind::BraceOpen, TokenKind::BraceClose)?;
                let span = self.span_from(start);
                Ok(TypeExtension::InputObject(InputObjectTypeDefinition { description: None, name, directives, fields, span }))
            }
            _ => Err(self.unexpected("type system extension")),
        }
    }
}

/// Parses an executable (query-language) document. Type system definitions
/// are rejected.
pub fn parse_query(source: &str) -> Result<Document, SyntaxError> {
    parse_document(source, ParserOptions { allow_type_system: false, no_location: false })
}

/// Parses a document that may contain SDL type system definitions (and, per
/// the grammar, executable ones too — schemas are occasionally assembled
/// from documents that embed example operations alongside their types).
pub fn parse_schema(source: &str) -> Result<Document, SyntaxError> {
    parse_document(source, ParserOptions { allow_type_system: true, no_location: false })
}

pub fn parse_document(source: &str, options: ParserOptions) -> Result<Document, SyntaxError> {
    let mut parser = Parser::new(source, options)?;
    parser.parse_document()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shorthand_query() {
        let doc = parse_query("{ hello }").unwrap();
        assert_eq!(doc.definitions.len(), 1);
        let op = doc.operations().next().unwrap();
        assert_eq!(op.kind, OperationKind::Query);
        assert_eq!(op.selection_set.selections.len(), 1);
    }

    #[test]
    fn parses_named_operation_with_variables_and_directives() {
        let src = r#"
            query Greeting($name: String! = "world") @cached(ttl: 60) {
                hello(name: $name) @include(if: true)
                ...Frag
                ... on Other { id }
            }
            fragment Frag on Query { extra }
        "#;
        let doc = parse_query(src).unwrap();
        assert_eq!(doc.operations().count(), 1);
        assert_eq!(doc.fragments().count(), 1);
        let op = doc.operations().next().unwrap();
        assert_eq!(op.name.as_deref(), Some("Greeting"));
        assert_eq!(op.variable_definitions.len(), 1);
        assert_eq!(op.directives.len(), 1);
        assert_eq!(op.selection_set.selections.len(), 3);
    }

    #[test]
    fn rejects_type_system_definitions_in_query_mode() {
        let err = parse_query("type Foo { id: ID }").unwrap_err();
        assert!(err.message.contains("Expected"));
    }

    #[test]
    fn parses_object_type_definition_with_interfaces_and_directives() {
        let src = r#"
            """A node."""
            type Foo implements Bar & Baz @deprecated {
                id: ID!
                name(prefix: String = "x"): String
            }
        "#;
        let doc = parse_schema(src).unwrap();
        let Definition::TypeSystem(td) = &doc.definitions[0] else { panic!("expected type system definition") };
        let TypeDefinition::Object(obj) = td else { panic!("expected object type") };
        assert_eq!(obj.name, "Foo");
        assert_eq!(obj.implements_interfaces, vec!["Bar".to_string(), "Baz".to_string()]);
        assert_eq!(obj.fields.len(), 2);
        assert_eq!(obj.description.as_deref(), Some("A node."));
    }

    #[test]
    fn parses_directive_definition_with_repeatable_and_locations() {
        let src = "directive @cached(ttl: Int!) repeatable on FIELD | FIELD_DEFINITION";
        let doc = parse_schema(src).unwrap();
        let Definition::Directive(dd) = &doc.definitions[0] else { panic!("expected directive definition") };
        assert_eq!(dd.name, "cached");
        assert!(dd.repeatable);
        assert_eq!(dd.locations.len(), 2);
    }

    #[test]
    fn parses_schema_definition_and_extension() {
        let src = r#"
            schema { query: Query mutation: Mutation }
            extend schema { subscription: Subscription }
        "#;
        let doc = parse_schema(src).unwrap();
        assert_eq!(doc.definitions.len(), 2);
    }

    #[test]
    fn rejects_leading_zero_int_followed_by_digit() {
        let err = parse_query("{ f(x: 01) }").unwrap_err();
        assert!(err.message.contains("digit after 0"));
    }

    #[test]
    fn no_location_option_yields_dummy_spans() {
        let doc =
            parse_document("{ hello }", ParserOptions { allow_type_system: false, no_location: true }).unwrap();
        let op = doc.operations().next().unwrap();
        assert_eq!(op.span, Span::dummy());
    }
}
