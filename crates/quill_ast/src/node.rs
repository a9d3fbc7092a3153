//! Syntax node definitions.
//!
//! Nodes live in a [`SyntaxArena`](crate::SyntaxArena) and refer to their
//! children by [`NodeId`] and [`ListId`]. Every node carries the shared header
//! (kind, range, flags, context flags) plus a [`NodeData`] payload whose shape
//! depends on the production. Several kinds share one payload shape; for
//! example `WhileStatement` and `WithStatement` both use [`NodeData::Loop`].

use crate::syntax_kind::SyntaxKind;
use crate::types::{ContextFlags, NodeFlags};
use quill_core::intern::InternedString;
use quill_core::text::TextRange;

/// Index of a node in its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a node list in its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListId(pub u32);

impl ListId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A syntax node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: SyntaxKind,
    /// From the full start (before leading trivia) to the end of the last token.
    pub range: TextRange,
    pub flags: NodeFlags,
    pub context_flags: ContextFlags,
    pub data: NodeData,
}

impl Node {
    #[inline]
    pub fn pos(&self) -> u32 {
        self.range.pos
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.range.end
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.flags.contains(NodeFlags::MISSING)
    }

    #[inline]
    pub fn has_error(&self) -> bool {
        self.flags.contains(NodeFlags::THIS_NODE_HAS_ERROR)
    }
}

/// An ordered sequence of child nodes with its own range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeList {
    pub range: TextRange,
    pub has_trailing_comma: bool,
    /// Stands in for a required list whose opening token was absent.
    pub is_missing: bool,
    pub elements: Vec<NodeId>,
}

impl NodeList {
    pub fn new(range: TextRange, elements: Vec<NodeId>) -> Self {
        Self {
            range,
            has_trailing_comma: false,
            is_missing: false,
            elements,
        }
    }

    pub fn missing(pos: u32) -> Self {
        Self {
            is_missing: true,
            ..Self::new(TextRange::new(pos, pos), Vec::new())
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.elements.iter().copied()
    }
}

/// A child slot of a node: either a single node or a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    Node(NodeId),
    List(ListId),
}

/// A payload field, as seen by generic traversal and dumping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Node(NodeId),
    OptNode(Option<NodeId>),
    List(ListId),
    OptList(Option<ListId>),
    Text(InternedString),
    Bool(bool),
    Kind(SyntaxKind),
    OptKind(Option<SyntaxKind>),
}

impl Field {
    /// The child this field refers to, if any.
    #[inline]
    pub fn child(self) -> Option<Child> {
        match self {
            Field::Node(id) | Field::OptNode(Some(id)) => Some(Child::Node(id)),
            Field::List(id) | Field::OptList(Some(id)) => Some(Child::List(id)),
            _ => None,
        }
    }
}

/// Conversion of payload field types to [`Field`].
pub trait FieldValue {
    fn field(&self) -> Field;

    /// Rewrite any child reference held by this field.
    fn remap(&mut self, _f: &mut dyn FnMut(Child) -> Child) {}
}

impl FieldValue for NodeId {
    fn field(&self) -> Field {
        Field::Node(*self)
    }

    fn remap(&mut self, f: &mut dyn FnMut(Child) -> Child) {
        if let Child::Node(id) = f(Child::Node(*self)) {
            *self = id;
        }
    }
}

impl FieldValue for Option<NodeId> {
    fn field(&self) -> Field {
        Field::OptNode(*self)
    }

    fn remap(&mut self, f: &mut dyn FnMut(Child) -> Child) {
        if let Some(id) = self {
            id.remap(f);
        }
    }
}

impl FieldValue for ListId {
    fn field(&self) -> Field {
        Field::List(*self)
    }

    fn remap(&mut self, f: &mut dyn FnMut(Child) -> Child) {
        if let Child::List(id) = f(Child::List(*self)) {
            *self = id;
        }
    }
}

impl FieldValue for Option<ListId> {
    fn field(&self) -> Field {
        Field::OptList(*self)
    }

    fn remap(&mut self, f: &mut dyn FnMut(Child) -> Child) {
        if let Some(id) = self {
            id.remap(f);
        }
    }
}

impl FieldValue for InternedString {
    fn field(&self) -> Field {
        Field::Text(*self)
    }
}

impl FieldValue for bool {
    fn field(&self) -> Field {
        Field::Bool(*self)
    }
}

impl FieldValue for SyntaxKind {
    fn field(&self) -> Field {
        Field::Kind(*self)
    }
}

impl FieldValue for Option<SyntaxKind> {
    fn field(&self) -> Field {
        Field::OptKind(*self)
    }
}

/// Declares [`NodeData`] and generates field enumeration for every variant.
/// Fields must be listed in source order; traversal relies on it.
macro_rules! define_nodes {
    ($(
        $(#[$meta:meta])*
        $variant:ident { $($field:ident : $ty:ty),* $(,)? }
    ),* $(,)?) => {
        /// Per-production payload of a [`Node`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum NodeData {
            $(
                $(#[$meta])*
                $variant { $($field: $ty),* },
            )*
        }

        impl NodeData {
            /// Name of the payload shape.
            pub fn shape_name(&self) -> &'static str {
                match self {
                    $(NodeData::$variant { .. } => stringify!($variant),)*
                }
            }

            /// Visit every field with its name, in source order.
            #[allow(unused_variables)]
            pub fn for_each_field(&self, f: &mut dyn FnMut(&'static str, Field)) {
                match self {
                    $(NodeData::$variant { $($field),* } => {
                        $(f(stringify!($field), FieldValue::field($field));)*
                    })*
                }
            }

            /// Rewrite every child reference in place.
            #[allow(unused_variables)]
            pub fn remap_children(&mut self, f: &mut dyn FnMut(Child) -> Child) {
                match self {
                    $(NodeData::$variant { $($field),* } => {
                        $(FieldValue::remap($field, f);)*
                    })*
                }
            }
        }
    };
}

define_nodes! {
    /// Punctuation, keyword and keyword-type tokens, plus childless nodes such
    /// as `EmptyStatement` and `OmittedExpression`.
    Token {},
    Identifier { text: InternedString, original_keyword: Option<SyntaxKind> },
    PrivateIdentifier { text: InternedString },
    /// Numeric, bigint, string, regex, template and markup-text literals.
    Literal { text: InternedString, is_unterminated: bool },
    QualifiedName { left: NodeId, right: NodeId },
    /// Nodes wrapping exactly one expression: computed names, decorators,
    /// parenthesized/unary-keyword/spread/non-null expressions, expression and
    /// throw statements, spread assignments and attributes, module references.
    Expr { expression: NodeId },
    /// `return` and friends whose operand may be absent.
    OptionalExpr { expression: Option<NodeId> },

    TypeParameter { name: NodeId, constraint: Option<NodeId>, default: Option<NodeId> },
    Parameter {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        dot_dot_dot_token: Option<NodeId>,
        name: NodeId,
        question_token: Option<NodeId>,
        type_annotation: Option<NodeId>,
        initializer: Option<NodeId>,
    },

    PropertySignature {
        modifiers: Option<ListId>,
        name: NodeId,
        question_token: Option<NodeId>,
        type_annotation: Option<NodeId>,
    },
    PropertyDeclaration {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        name: NodeId,
        question_token: Option<NodeId>,
        exclamation_token: Option<NodeId>,
        type_annotation: Option<NodeId>,
        initializer: Option<NodeId>,
    },
    MethodSignature {
        modifiers: Option<ListId>,
        name: NodeId,
        question_token: Option<NodeId>,
        type_parameters: Option<ListId>,
        parameters: ListId,
        type_annotation: Option<NodeId>,
    },
    MethodDeclaration {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        asterisk_token: Option<NodeId>,
        name: NodeId,
        question_token: Option<NodeId>,
        type_parameters: Option<ListId>,
        parameters: ListId,
        type_annotation: Option<NodeId>,
        body: Option<NodeId>,
    },
    ClassStaticBlock { body: NodeId },
    Constructor {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        type_parameters: Option<ListId>,
        parameters: ListId,
        type_annotation: Option<NodeId>,
        body: Option<NodeId>,
    },
    /// `get` and `set` accessors.
    Accessor {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        name: NodeId,
        type_parameters: Option<ListId>,
        parameters: ListId,
        type_annotation: Option<NodeId>,
        body: Option<NodeId>,
    },
    /// Call and construct signatures.
    Signature {
        type_parameters: Option<ListId>,
        parameters: ListId,
        type_annotation: Option<NodeId>,
    },
    IndexSignature {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        parameters: ListId,
        type_annotation: Option<NodeId>,
    },

    TypePredicate {
        asserts_modifier: Option<NodeId>,
        parameter_name: NodeId,
        type_node: Option<NodeId>,
    },
    /// Type references, including the JSDoc flavor.
    TypeReference { type_name: NodeId, type_arguments: Option<ListId> },
    /// Function and constructor types.
    FunctionType {
        modifiers: Option<ListId>,
        type_parameters: Option<ListId>,
        parameters: ListId,
        type_node: NodeId,
    },
    TypeQuery { expr_name: NodeId, type_arguments: Option<ListId> },
    /// Type literals and JSDoc record types.
    Members { members: ListId },
    ArrayType { element_type: NodeId },
    /// Unions, intersections and tuples.
    TypeList { types: ListId },
    /// Types wrapping one type: optional, rest, parenthesized and the JSDoc
    /// postfix/prefix forms.
    InnerType { type_node: NodeId },
    ConditionalType {
        check_type: NodeId,
        extends_type: NodeId,
        true_type: NodeId,
        false_type: NodeId,
    },
    InferType { type_parameter: NodeId },
    TypeOperator { operator: SyntaxKind, type_node: NodeId },
    IndexedAccessType { object_type: NodeId, index_type: NodeId },
    MappedType {
        readonly_token: Option<NodeId>,
        type_parameter: NodeId,
        name_type: Option<NodeId>,
        question_token: Option<NodeId>,
        type_node: Option<NodeId>,
    },
    LiteralType { literal: NodeId },
    NamedTupleMember {
        dot_dot_dot_token: Option<NodeId>,
        name: NodeId,
        question_token: Option<NodeId>,
        type_node: NodeId,
    },
    /// Template expressions and template literal types.
    Template { head: NodeId, template_spans: ListId },
    TemplateSpan { expression: NodeId, literal: NodeId },
    TemplateLiteralTypeSpan { type_node: NodeId, literal: NodeId },

    BindingPattern { elements: ListId },
    BindingElement {
        dot_dot_dot_token: Option<NodeId>,
        property_name: Option<NodeId>,
        name: NodeId,
        initializer: Option<NodeId>,
    },

    ArrayLiteral { elements: ListId, multi_line: bool },
    ObjectLiteral { properties: ListId, multi_line: bool },
    PropertyAccess {
        expression: NodeId,
        question_dot_token: Option<NodeId>,
        name: NodeId,
    },
    ElementAccess {
        expression: NodeId,
        question_dot_token: Option<NodeId>,
        argument_expression: NodeId,
    },
    /// Call and `new` expressions. `new` may omit its argument list.
    Call {
        expression: NodeId,
        question_dot_token: Option<NodeId>,
        type_arguments: Option<ListId>,
        arguments: Option<ListId>,
    },
    TaggedTemplate { tag: NodeId, type_arguments: Option<ListId>, template: NodeId },
    TypeAssertion { type_node: NodeId, expression: NodeId },
    /// Function declarations and expressions.
    Function {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        asterisk_token: Option<NodeId>,
        name: Option<NodeId>,
        type_parameters: Option<ListId>,
        parameters: ListId,
        type_annotation: Option<NodeId>,
        body: Option<NodeId>,
    },
    ArrowFunction {
        modifiers: Option<ListId>,
        type_parameters: Option<ListId>,
        parameters: ListId,
        type_annotation: Option<NodeId>,
        equals_greater_than_token: NodeId,
        body: NodeId,
    },
    PrefixUnary { operator: SyntaxKind, operand: NodeId },
    PostfixUnary { operand: NodeId, operator: SyntaxKind },
    Binary { left: NodeId, operator_token: NodeId, right: NodeId },
    Conditional {
        condition: NodeId,
        question_token: NodeId,
        when_true: NodeId,
        colon_token: NodeId,
        when_false: NodeId,
    },
    Yield { asterisk_token: Option<NodeId>, expression: Option<NodeId> },
    /// Class declarations and expressions.
    Class {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        name: Option<NodeId>,
        type_parameters: Option<ListId>,
        heritage_clauses: Option<ListId>,
        members: ListId,
    },
    ExpressionWithTypeArguments { expression: NodeId, type_arguments: Option<ListId> },
    /// `as` and `satisfies` expressions.
    ExpressionWithType { expression: NodeId, type_node: NodeId },
    MetaProperty { keyword_token: SyntaxKind, name: NodeId },

    /// Blocks and module blocks.
    Block { statements: ListId, multi_line: bool },
    VariableStatement {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        declaration_list: NodeId,
    },
    If { expression: NodeId, then_statement: NodeId, else_statement: Option<NodeId> },
    Do { statement: NodeId, expression: NodeId },
    /// `while` and `with` statements.
    Loop { expression: NodeId, statement: NodeId },
    For {
        initializer: Option<NodeId>,
        condition: Option<NodeId>,
        incrementor: Option<NodeId>,
        statement: NodeId,
    },
    ForInOrOf {
        await_modifier: Option<NodeId>,
        initializer: NodeId,
        expression: NodeId,
        statement: NodeId,
    },
    /// `break` and `continue`.
    Jump { label: Option<NodeId> },
    Switch { expression: NodeId, case_block: NodeId },
    Labeled { label: NodeId, statement: NodeId },
    Try { try_block: NodeId, catch_clause: Option<NodeId>, finally_block: Option<NodeId> },
    VariableDeclaration {
        name: NodeId,
        exclamation_token: Option<NodeId>,
        type_annotation: Option<NodeId>,
        initializer: Option<NodeId>,
    },
    VariableDeclarationList { declarations: ListId },
    Interface {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        name: NodeId,
        type_parameters: Option<ListId>,
        heritage_clauses: Option<ListId>,
        members: ListId,
    },
    TypeAlias {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        name: NodeId,
        type_parameters: Option<ListId>,
        type_node: NodeId,
    },
    Enum {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        name: NodeId,
        members: ListId,
    },
    /// Namespaces and ambient modules. `body` is a module block or, for dotted
    /// names, the next nested module.
    Module {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        name: NodeId,
        body: Option<NodeId>,
    },
    CaseBlock { clauses: ListId },
    ImportEquals {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        is_type_only: bool,
        name: NodeId,
        module_reference: NodeId,
    },
    Import {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        import_clause: Option<NodeId>,
        module_specifier: NodeId,
    },
    ImportClause {
        is_type_only: bool,
        name: Option<NodeId>,
        named_bindings: Option<NodeId>,
    },
    /// `* as name` in imports and exports.
    NamespaceBinding { name: NodeId },
    /// `{ a, b as c }` in imports and exports.
    Specifiers { elements: ListId },
    Specifier { is_type_only: bool, property_name: Option<NodeId>, name: NodeId },
    ExportAssignment {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        is_export_equals: bool,
        expression: NodeId,
    },
    ExportDeclaration {
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        is_type_only: bool,
        export_clause: Option<NodeId>,
        module_specifier: Option<NodeId>,
    },
    MissingDeclaration { decorators: Option<ListId>, modifiers: Option<ListId> },

    JsxElement { opening_element: NodeId, children: ListId, closing_element: NodeId },
    /// Opening and self-closing elements.
    JsxTag { tag_name: NodeId, type_arguments: Option<ListId>, attributes: NodeId },
    JsxClosingElement { tag_name: NodeId },
    JsxFragment { opening_fragment: NodeId, children: ListId, closing_fragment: NodeId },
    JsxAttribute { name: NodeId, initializer: Option<NodeId> },
    JsxAttributes { properties: ListId },
    JsxExpression { dot_dot_dot_token: Option<NodeId>, expression: Option<NodeId> },
    JsxNamespacedName { namespace: NodeId, name: NodeId },

    CaseClause { expression: NodeId, statements: ListId },
    DefaultClause { statements: ListId },
    HeritageClause { token: SyntaxKind, types: ListId },
    CatchClause { variable_declaration: Option<NodeId>, block: NodeId },

    PropertyAssignment { name: NodeId, initializer: NodeId },
    ShorthandPropertyAssignment {
        name: NodeId,
        equals_token: Option<NodeId>,
        object_assignment_initializer: Option<NodeId>,
    },
    EnumMember { name: NodeId, initializer: Option<NodeId> },

    SourceFile { statements: ListId, end_of_file_token: NodeId },

    JSDocFunctionType { parameters: ListId, type_node: Option<NodeId> },
    JSDocRecordMember { name: NodeId, type_node: Option<NodeId> },
    JSDocComment { tags: Option<ListId> },
    JSDocTag { at_token: NodeId, tag_name: NodeId },
    JSDocParameterTag {
        at_token: NodeId,
        tag_name: NodeId,
        pre_parameter_name: Option<NodeId>,
        type_expression: Option<NodeId>,
        post_parameter_name: Option<NodeId>,
        is_bracketed: bool,
    },
    /// `@return`, `@returns` and `@type`.
    JSDocTypedTag { at_token: NodeId, tag_name: NodeId, type_expression: Option<NodeId> },
    JSDocTemplateTag { at_token: NodeId, tag_name: NodeId, type_parameters: ListId },
}

impl NodeData {
    /// Visit every child node and list, in source order.
    pub fn for_each_child(&self, mut f: impl FnMut(Child)) {
        self.for_each_field(&mut |_, field| {
            if let Some(child) = field.child() {
                f(child);
            }
        });
    }

    /// Children in source order.
    pub fn children(&self) -> Vec<Child> {
        let mut out = Vec::new();
        self.for_each_child(|child| out.push(child));
        out
    }

    /// The declared name of this node, for payloads that carry one.
    pub fn name(&self) -> Option<NodeId> {
        let mut name = None;
        self.for_each_field(&mut |field_name, field| {
            if field_name == "name" {
                match field {
                    Field::Node(id) | Field::OptNode(Some(id)) => name = Some(id),
                    _ => {}
                }
            }
        });
        name
    }

    /// The modifier list, for declarations.
    pub fn modifiers(&self) -> Option<ListId> {
        let mut modifiers = None;
        self.for_each_field(&mut |field_name, field| {
            if field_name == "modifiers" {
                if let Field::OptList(list) = field {
                    modifiers = list;
                }
            }
        });
        modifiers
    }

    /// The initializer, for variables, parameters, properties and members.
    pub fn initializer(&self) -> Option<NodeId> {
        match *self {
            NodeData::VariableDeclaration { initializer, .. }
            | NodeData::Parameter { initializer, .. }
            | NodeData::PropertyDeclaration { initializer, .. }
            | NodeData::BindingElement { initializer, .. }
            | NodeData::EnumMember { initializer, .. } => initializer,
            NodeData::PropertyAssignment { initializer, .. } => Some(initializer),
            _ => None,
        }
    }
}
