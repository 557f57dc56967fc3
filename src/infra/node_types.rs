//! Fish Node Type Classification
//!
//! Node tags follow tree-sitter-fish's `src/node-types.json`. The tag set is
//! closed: anything the grammar names that is not listed maps to `Unknown`,
//! and every anonymous token (keywords, punctuation) maps to `Anonymous`.

use super::syntax::SyntaxNode;

/// Tree-sitter-fish node tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    Comment,
    FunctionDefinition,
    Command,
    Word,
    Integer,
    Float,
    VariableName,
    VariableExpansion,
    Index,
    Concatenation,
    DoubleQuoteString,
    SingleQuoteString,
    EscapeSequence,
    CommandSubstitution,
    ForStatement,
    WhileStatement,
    IfStatement,
    ElseIfClause,
    ElseClause,
    SwitchStatement,
    CaseClause,
    BeginStatement,
    ConditionalExecution,
    NegatedStatement,
    Pipe,
    RedirectedStatement,
    FileRedirect,
    StreamRedirect,
    Return,
    Break,
    Continue,
    HomeDirExpansion,
    Glob,
    BraceExpansion,
    Error,
    Unknown,
    Anonymous,
}

/// Static capabilities of a node tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Opens a lexical region (program, function body, block)
    pub scope: bool,
    pub is_loop: bool,
    pub statement: bool,
    /// Introduces a name by itself, independent of context
    pub definition: bool,
}

impl Capabilities {
    const NONE: Self = Self::new(false, false, false, false);
    const STATEMENT: Self = Self::new(false, false, true, false);
    const BLOCK: Self = Self::new(true, false, true, false);
    const LOOP: Self = Self::new(true, true, true, false);

    const fn new(scope: bool, is_loop: bool, statement: bool, definition: bool) -> Self {
        Self {
            scope,
            is_loop,
            statement,
            definition,
        }
    }
}

impl NodeKind {
    /// Map a grammar tag to its kind
    pub fn from_grammar_name(name: &str, named: bool) -> Self {
        if !named {
            return Self::Anonymous;
        }
        match name {
            "program" => Self::Program,
            "comment" => Self::Comment,
            "function_definition" => Self::FunctionDefinition,
            "command" => Self::Command,
            "word" => Self::Word,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "variable_name" => Self::VariableName,
            "variable_expansion" => Self::VariableExpansion,
            "index" => Self::Index,
            "concatenation" => Self::Concatenation,
            "double_quote_string" => Self::DoubleQuoteString,
            "single_quote_string" => Self::SingleQuoteString,
            "escape_sequence" => Self::EscapeSequence,
            "command_substitution" => Self::CommandSubstitution,
            "for_statement" => Self::ForStatement,
            "while_statement" => Self::WhileStatement,
            "if_statement" => Self::IfStatement,
            "else_if_clause" => Self::ElseIfClause,
            "else_clause" => Self::ElseClause,
            "switch_statement" => Self::SwitchStatement,
            "case_clause" => Self::CaseClause,
            "begin_statement" => Self::BeginStatement,
            "conditional_execution" => Self::ConditionalExecution,
            "negated_statement" => Self::NegatedStatement,
            "pipe" => Self::Pipe,
            "redirected_statement" => Self::RedirectedStatement,
            "file_redirect" => Self::FileRedirect,
            "stream_redirect" => Self::StreamRedirect,
            "return" => Self::Return,
            "break" => Self::Break,
            "continue" => Self::Continue,
            "home_dir_expansion" => Self::HomeDirExpansion,
            "glob" => Self::Glob,
            "brace_expansion" => Self::BraceExpansion,
            "ERROR" => Self::Error,
            _ => Self::Unknown,
        }
    }

    /// Grammar tag, `None` for kinds that do not carry one
    pub fn grammar_name(&self) -> Option<&'static str> {
        let name = match self {
            Self::Program => "program",
            Self::Comment => "comment",
            Self::FunctionDefinition => "function_definition",
            Self::Command => "command",
            Self::Word => "word",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::VariableName => "variable_name",
            Self::VariableExpansion => "variable_expansion",
            Self::Index => "index",
            Self::Concatenation => "concatenation",
            Self::DoubleQuoteString => "double_quote_string",
            Self::SingleQuoteString => "single_quote_string",
            Self::EscapeSequence => "escape_sequence",
            Self::CommandSubstitution => "command_substitution",
            Self::ForStatement => "for_statement",
            Self::WhileStatement => "while_statement",
            Self::IfStatement => "if_statement",
            Self::ElseIfClause => "else_if_clause",
            Self::ElseClause => "else_clause",
            Self::SwitchStatement => "switch_statement",
            Self::CaseClause => "case_clause",
            Self::BeginStatement => "begin_statement",
            Self::ConditionalExecution => "conditional_execution",
            Self::NegatedStatement => "negated_statement",
            Self::Pipe => "pipe",
            Self::RedirectedStatement => "redirected_statement",
            Self::FileRedirect => "file_redirect",
            Self::StreamRedirect => "stream_redirect",
            Self::Return => "return",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::HomeDirExpansion => "home_dir_expansion",
            Self::Glob => "glob",
            Self::BraceExpansion => "brace_expansion",
            Self::Error => "ERROR",
            Self::Unknown | Self::Anonymous => return None,
        };
        Some(name)
    }

    pub fn is_named(&self) -> bool {
        *self != Self::Anonymous
    }

    /// Capability table for this tag
    pub const fn capabilities(self) -> Capabilities {
        match self {
            Self::Program | Self::ElseIfClause | Self::ElseClause | Self::CaseClause => {
                Capabilities::new(true, false, false, false)
            }
            Self::FunctionDefinition => Capabilities::new(true, false, true, true),
            Self::ForStatement | Self::WhileStatement => Capabilities::LOOP,
            Self::IfStatement | Self::SwitchStatement | Self::BeginStatement => {
                Capabilities::BLOCK
            }
            Self::Command
            | Self::ConditionalExecution
            | Self::NegatedStatement
            | Self::Pipe
            | Self::RedirectedStatement
            | Self::Return
            | Self::Break
            | Self::Continue => Capabilities::STATEMENT,
            _ => Capabilities::NONE,
        }
    }
}

// =============================================================================
// Node predicates
// =============================================================================

const SET_NON_DEFINING_FLAGS: &[&str] = &["-q", "--query", "-e", "--erase", "-S", "--show", "-n", "--names"];

/// `read` options whose value is the following argument
const READ_VALUE_FLAGS: &[&str] = &[
    "-p",
    "--prompt",
    "-P",
    "--prompt-str",
    "-R",
    "--right-prompt",
    "-c",
    "--command",
    "-d",
    "--delimiter",
    "-n",
    "--nchars",
];

const ARGUMENT_NAMES_FLAGS: &[&str] = &["-a", "--argument-names"];

pub fn is_program(node: SyntaxNode<'_>) -> bool {
    node.kind() == NodeKind::Program
}

pub fn is_comment(node: SyntaxNode<'_>) -> bool {
    node.kind() == NodeKind::Comment
}

pub fn is_function_definition(node: SyntaxNode<'_>) -> bool {
    node.kind() == NodeKind::FunctionDefinition
}

pub fn is_for_loop(node: SyntaxNode<'_>) -> bool {
    node.kind() == NodeKind::ForStatement
}

/// `for` and `while` bodies
pub fn is_loop(node: SyntaxNode<'_>) -> bool {
    node.kind().capabilities().is_loop
}

/// A construct that introduces a name by itself
pub fn is_definition(node: SyntaxNode<'_>) -> bool {
    node.kind().capabilities().definition
}

pub fn is_scope(node: SyntaxNode<'_>) -> bool {
    node.kind().capabilities().scope
}

pub fn is_statement(node: SyntaxNode<'_>) -> bool {
    node.kind().capabilities().statement
}

pub fn is_command(node: SyntaxNode<'_>) -> bool {
    node.kind() == NodeKind::Command
}

/// The name token of a `function` definition
pub fn is_function_definition_name(node: SyntaxNode<'_>) -> bool {
    node.parent()
        .filter(|parent| is_function_definition(*parent))
        .and_then(|parent| parent.first_named_child())
        .is_some_and(|name| name == node)
}

/// The name token of a command invocation
pub fn is_command_name(node: SyntaxNode<'_>) -> bool {
    node.parent()
        .filter(|parent| is_command(*parent))
        .and_then(|parent| parent.first_named_child())
        .is_some_and(|name| name == node)
}

/// A node that introduces a variable name
pub fn is_variable_definition(node: SyntaxNode<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    match (node.kind(), parent.kind()) {
        (NodeKind::VariableName, NodeKind::ForStatement) => true,
        (NodeKind::Word, NodeKind::Command) => is_command_variable_definition(node, parent),
        (NodeKind::Word, NodeKind::FunctionDefinition) => is_argument_name(node, parent),
        _ => false,
    }
}

/// A variable reference or definition
pub fn is_variable(node: SyntaxNode<'_>) -> bool {
    node.kind() == NodeKind::VariableName || is_variable_definition(node)
}

/// Nearest enclosing `function_definition` or `program`.
///
/// A function's own name lives in the scope around the function.
pub fn definition_scope(node: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    let start = if is_function_definition_name(node) {
        node.parent()?.parent()
    } else {
        node.parent()
    };

    let mut current = start;
    while let Some(candidate) = current {
        if is_function_definition(candidate) || is_program(candidate) {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}

/// Nearest enclosing command (including the node itself)
pub fn find_parent_command(node: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    let mut current = Some(node);
    while let Some(candidate) = current {
        if is_command(candidate) {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}

fn is_command_variable_definition(node: SyntaxNode<'_>, command: SyntaxNode<'_>) -> bool {
    let mut args = command.named_children();
    let Some(name) = args.next() else {
        return false;
    };
    if name == node {
        return false;
    }

    match name.text() {
        "set" => {
            let mut first_positional = None;
            for arg in args {
                let text = arg.text();
                if text.starts_with('-') {
                    if SET_NON_DEFINING_FLAGS.contains(&text) {
                        return false;
                    }
                    continue;
                }
                first_positional = Some(arg);
                break;
            }
            first_positional == Some(node)
        }
        "read" => {
            let mut skip_value = false;
            for arg in args {
                let text = arg.text();
                if skip_value {
                    skip_value = false;
                    if arg == node {
                        return false;
                    }
                    continue;
                }
                if text.starts_with('-') {
                    skip_value = READ_VALUE_FLAGS.contains(&text);
                    if arg == node {
                        return false;
                    }
                    continue;
                }
                if arg == node {
                    return true;
                }
            }
            false
        }
        _ => false,
    }
}

fn is_argument_name(node: SyntaxNode<'_>, function: SyntaxNode<'_>) -> bool {
    let mut collecting = false;
    // the first named child is the function name
    for arg in function.named_children().skip(1) {
        if arg.kind() != NodeKind::Word {
            break;
        }
        let text = arg.text();
        if text.starts_with('-') {
            collecting = ARGUMENT_NAMES_FLAGS.contains(&text);
            continue;
        }
        if arg == node {
            return collecting;
        }
    }
    false
}
