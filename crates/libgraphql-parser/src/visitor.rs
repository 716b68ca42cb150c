//! A generic document-order traversal over executable ASTs.
//!
//! Visitors implement [`Visitor`] and receive `enter`/`leave` callbacks for
//! every node kind, plus [`Visitor::on_child`] for containment edges (useful
//! for validators that need to know "this is argument 2 of field `foo`").
//! Callbacks return a [`VisitControl`] sentinel to skip a subtree or halt
//! the whole traversal early; both the validator (multiple rule visitors
//! sharing one pass) and a future formatter/linter can build on this.
//!
//! [`ChainedVisitor`] fans a single traversal out to multiple visitors: on
//! `enter` it calls each child visitor in order, on `leave` in reverse
//! order, the same chained-visitor contract used by `graphql-js`.

use crate::ast::Argument;
use crate::ast::DirectiveAnnotation;
use crate::ast::Document;
use crate::ast::Field;
use crate::ast::FragmentDefinition;
use crate::ast::FragmentSpread;
use crate::ast::InlineFragment;
use crate::ast::OperationDefinition;
use crate::ast::Selection;
use crate::ast::SelectionSet;
use crate::ast::Value;
use crate::ast::VariableDefinition;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VisitControl {
    Continue,
    SkipSubtree,
    Halt,
}

impl VisitControl {
    pub fn is_halt(self) -> bool {
        matches!(self, VisitControl::Halt)
    }
}

/// Identifies a node's containing field/slot in its parent, for visitors
/// that need to know how a node relates to its parent (e.g. "argument at
/// index 2 of this field").
#[derive(Clone, Copy, Debug)]
pub enum ChildSlot<'a> {
    OperationDefinitions,
    FragmentDefinitions,
    SelectionSetOf(&'a str),
    ArgumentOf(&'a str, usize),
}

#[allow(unused_variables)]
pub trait Visitor {
    fn enter_document(&mut self, node: &Document) -> VisitControl { VisitControl::Continue }
    fn leave_document(&mut self, node: &Document) {}

    fn enter_operation(&mut self, node: &OperationDefinition) -> VisitControl { VisitControl::Continue }
    fn leave_operation(&mut self, node: &OperationDefinition) {}

    fn enter_variable_definition(&mut self, node: &VariableDefinition) -> VisitControl { VisitControl::Continue }
    fn leave_variable_definition(&mut self, node: &VariableDefinition) {}

    fn enter_fragment_definition(&mut self, node: &FragmentDefinition) -> VisitControl { VisitControl::Continue }
    fn leave_fragment_definition(&mut self, node: &FragmentDefinition) {}

    fn enter_selection_set(&mut self, node: &SelectionSet) -> VisitControl { VisitControl::Continue }
    fn leave_selection_set(&mut self, node: &SelectionSet) {}

    fn enter_field(&mut self, node: &Field) -> VisitControl { VisitControl::Continue }
    fn leave_field(&mut self, node: &Field) {}

    fn enter_fragment_spread(&mut self, node: &FragmentSpread) -> VisitControl { VisitControl::Continue }
    fn leave_fragment_spread(&mut self, node: &FragmentSpread) {}

    fn enter_inline_fragment(&mut self, node: &InlineFragment) -> VisitControl { VisitControl::Continue }
    fn leave_inline_fragment(&mut self, node: &InlineFragment) {}

    fn enter_argument(&mut self, node: &Argument) -> VisitControl { VisitControl::Continue }
    fn leave_argument(&mut self, node: &Argument) {}

    fn enter_directive(&mut self, node: &DirectiveAnnotation) -> VisitControl { VisitControl::Continue }
    fn leave_directive(&mut self, node: &DirectiveAnnotation) {}

    fn enter_value(&mut self, node: &Value) -> VisitControl { VisitControl::Continue }
    fn leave_value(&mut self, node: &Value) {}

    fn on_child(&mut self, _slot: ChildSlot<'_>) {}
}

pub fn walk_document(document: &Document, visitor: &mut dyn Visitor) {
    if visitor.enter_document(document).is_halt() {
        return;
    }
    visitor.on_child(ChildSlot::OperationDefinitions);
    for op in document.operations() {
        if walk_operation(op, visitor) == VisitControl::Halt {
            return;
        }
    }
    visitor.on_child(ChildSlot::FragmentDefinitions);
    for frag in document.fragments() {
        if walk_fragment_definition(frag, visitor) == VisitControl::Halt {
            return;
        }
    }
    visitor.leave_document(document);
}

fn walk_operation(op: &OperationDefinition, visitor: &mut dyn Visitor) -> VisitControl {
    let ctl = visitor.enter_operation(op);
    if ctl != VisitControl::SkipSubtree && ctl != VisitControl::Halt {
        for vd in &op.variable_definitions {
            if walk_variable_definition(vd, visitor) == VisitControl::Halt {
                return VisitControl::Halt;
            }
        }
        for d in &op.directives {
            if walk_directive(d, visitor) == VisitControl::Halt {
                return VisitControl::Halt;
            }
        }
        if walk_selection_set(&op.selection_set, visitor) == VisitControl::Halt {
            return VisitControl::Halt;
        }
    }
    visitor.leave_operation(op);
    if ctl.is_halt() { VisitControl::Halt } else { VisitControl::Continue }
}

fn walk_variable_definition(vd: &VariableDefinition, visitor: &mut dyn Visitor) -> VisitControl {
    let ctl = visitor.enter_variable_definition(vd);
    if let Some(default) = &vd.default_value {
        if ctl != VisitControl::SkipSubtree {
            walk_value(default, visitor);
        }
    }
    visitor.leave_variable_definition(vd);
    if ctl.is_halt() { VisitControl::Halt } else { VisitControl::Continue }
}

fn walk_fragment_definition(frag: &FragmentDefinition, visitor: &mut dyn Visitor) -> VisitControl {
    let ctl = visitor.enter_fragment_definition(frag);
    if ctl != VisitControl::SkipSubtree && ctl != VisitControl::Halt {
        for d in &frag.directives {
            if walk_directive(d, visitor) == VisitControl::Halt {
                return VisitControl::Halt;
            }
        }
        if walk_selection_set(&frag.selection_set, visitor) == VisitControl::Halt {
            return VisitControl::Halt;
        }
    }
    visitor.leave_fragment_definition(frag);
    if ctl.is_halt() { VisitControl::Halt } else { VisitControl::Continue }
}

fn walk_selection_set(set: &SelectionSet, visitor: &mut dyn Visitor) -> VisitControl {
    let ctl = visitor.enter_selection_set(set);
    if ctl != VisitControl::SkipSubtree && ctl != VisitControl::Halt {
        for sel in &set.selections {
            let r = match sel {
                Selection::Field(f) => walk_field(f, visitor),
                Selection::FragmentSpread(fs) => walk_fragment_spread(fs, visitor),
                Selection::InlineFragment(inf) => walk_inline_fragment(inf, visitor),
            };
            if r == VisitControl::Halt {
                return VisitControl::Halt;
            }
        }
    }
    visitor.leave_selection_set(set);
    if ctl.is_halt() { VisitControl::Halt } else { VisitControl::Continue }
}

fn walk_field(field: &Field, visitor: &mut dyn Visitor) -> VisitControl {
    let ctl = visitor.enter_field(field);
    if ctl != VisitControl::SkipSubtree && ctl != VisitControl::Halt {
        for (i, a) in field.arguments.iter().enumerate() {
            visitor.on_child(ChildSlot::ArgumentOf(&field.name, i));
            if walk_argument(a, visitor) == VisitControl::Halt {
                return VisitControl::Halt;
            }
        }
        for d in &field.directives {
            if walk_directive(d, visitor) == VisitControl::Halt {
                return VisitControl::Halt;
            }
        }
        if let Some(set) = &field.selection_set {
            visitor.on_child(ChildSlot::SelectionSetOf(field.response_key()));
            if walk_selection_set(set, visitor) == VisitControl::Halt {
                return VisitControl::Halt;
            }
        }
    }
    visitor.leave_field(field);
    if ctl.is_halt() { VisitControl::Halt } else { VisitControl::Continue }
}

fn walk_fragment_spread(fs: &FragmentSpread, visitor: &mut dyn Visitor) -> VisitControl {
    let ctl = visitor.enter_fragment_spread(fs);
    if ctl != VisitControl::SkipSubtree && ctl != VisitControl::Halt {
        for d in &fs.directives {
            if walk_directive(d, visitor) == VisitControl::Halt {
                return VisitControl::Halt;
            }
        }
    }
    visitor.leave_fragment_spread(fs);
    if ctl.is_halt() { VisitControl::Halt } else { VisitControl::Continue }
}

fn walk_inline_fragment(inf: &InlineFragment, visitor: &mut dyn Visitor) -> VisitControl {
    let ctl = visitor.enter_inline_fragment(inf);
    if ctl != VisitControl::SkipSubtree && ctl != VisitControl::Halt {
        for d in &inf.directives {
            if walk_directive(d, visitor) == VisitControl::Halt {
                return VisitControl::Halt;
            }
        }
        if walk_selection_set(&inf.selection_set, visitor) == VisitControl::Halt {
            return VisitControl::Halt;
        }
    }
    visitor.leave_inline_fragment(inf);
    if ctl.is_halt() { VisitControl::Halt } else { VisitControl::Continue }
}

fn walk_argument(arg: &Argument, visitor: &mut dyn Visitor) -> VisitControl {
    let ctl = visitor.enter_argument(arg);
    if ctl != VisitControl::SkipSubtree && ctl != VisitControl::Halt {
        walk_value(&arg.value, visitor);
    }
    visitor.leave_argument(arg);
    if ctl.is_halt() { VisitControl::Halt } else { VisitControl::Continue }
}

fn walk_directive(d: &DirectiveAnnotation, visitor: &mut dyn Visitor) -> VisitControl {
    let ctl = visitor.enter_directive(d);
    if ctl != VisitControl::SkipSubtree && ctl != VisitControl::Halt {
        for a in &d.arguments {
            if walk_argument(a, visitor) == VisitControl::Halt {
                return VisitControl::Halt;
            }
        }
    }
    visitor.leave_directive(d);
    if ctl.is_halt() { VisitControl::Halt } else { VisitControl::Continue }
}

fn walk_value(value: &Value, visitor: &mut dyn Visitor) -> VisitControl {
    let ctl = visitor.enter_value(value);
    if ctl != VisitControl::SkipSubtree && ctl != VisitControl::Halt {
        match value {
            Value::List { values, .. } => {
                for v in values {
                    if walk_value(v, visitor) == VisitControl::Halt {
                        return VisitControl::Halt;
                    }
                }
            }
            Value::Object { fields, .. } => {
                for f in fields {
                    if walk_value(&f.value, visitor) == VisitControl::Halt {
                        return VisitControl::Halt;
                    }
                }
            }
            _ => {}
        }
    }
    visitor.leave_value(value);
    if ctl.is_halt() { VisitControl::Halt } else { VisitControl::Continue }
}

/// Composes multiple visitors into one pass: `enter` callbacks fire in
/// chain order, `leave` callbacks fire in reverse order.
pub struct ChainedVisitor<'a> {
    pub visitors: Vec<&'a mut dyn Visitor>,
}

macro_rules! chained_hook {
    ($enter:ident, $leave:ident, $node_ty:ty) => {
        fn $enter(&mut self, node: &$node_ty) -> VisitControl {
            let mut halted = false;
            for v in self.visitors.iter_mut() {
                if v.$enter(node) == VisitControl::Halt {
                    halted = true;
                }
            }
            if halted { VisitControl::Halt } else { VisitControl::Continue }
        }

        fn $leave(&mut self, node: &$node_ty) {
            for v in self.visitors.iter_mut().rev() {
                v.$leave(node);
            }
        }
    };
}

impl<'a> Visitor for ChainedVisitor<'a> {
    chained_hook!(enter_document, leave_document, Document);
    chained_hook!(enter_operation, leave_operation, OperationDefinition);
    chained_hook!(enter_variable_definition, leave_variable_definition, VariableDefinition);
    chained_hook!(enter_fragment_definition, leave_fragment_definition, FragmentDefinition);
    chained_hook!(enter_selection_set, leave_selection_set, SelectionSet);
    chained_hook!(enter_field, leave_field, Field);
    chained_hook!(enter_fragment_spread, leave_fragment_spread, FragmentSpread);
    chained_hook!(enter_inline_fragment, leave_inline_fragment, InlineFragment);
    chained_hook!(enter_argument, leave_argument, Argument);
    chained_hook!(enter_directive, leave_directive, DirectiveAnnotation);
    chained_hook!(enter_value, leave_value, Value);

    fn on_child(&mut self, slot: ChildSlot<'_>) {
        for v in self.visitors.iter_mut() {
            v.on_child(slot);
        }
    }
}
