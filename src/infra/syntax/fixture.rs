//! Test fixture: a small fish parser producing tree-sitter-fish shaped trees.
//!
//! Covers the statements the resolver cares about (functions, loops,
//! conditionals, blocks, commands, comments) plus variable expansions,
//! quoting and command substitution. Not a general fish parser.

use super::{NodeDump, Point, SyntaxTree, TreeDump};
use crate::infra::node_types::NodeKind;

/// Parse `source`, panicking on input the fixture cannot represent
pub(crate) fn parse(source: &str) -> SyntaxTree {
    let mut parser = Parser { src: source, pos: 0 };
    let children = parser.statements(&[]);
    let root = Raw::named(NodeKind::Program, 0, source.len(), children);

    let lines = LineIndex::new(source);
    let dump = TreeDump {
        source: source.to_string(),
        root: root.into_dump(source, &lines),
    };
    SyntaxTree::from_dump(&dump).expect("fixture trees are well formed")
}

struct Raw {
    kind: Option<NodeKind>,
    start: usize,
    end: usize,
    children: Vec<Raw>,
}

impl Raw {
    fn named(kind: NodeKind, start: usize, end: usize, children: Vec<Raw>) -> Self {
        Self {
            kind: Some(kind),
            start,
            end,
            children,
        }
    }

    fn token(start: usize, end: usize) -> Self {
        Self {
            kind: None,
            start,
            end,
            children: Vec::new(),
        }
    }

    fn into_dump(self, source: &str, lines: &LineIndex) -> NodeDump {
        let (kind, named) = match self.kind.and_then(|k| k.grammar_name()) {
            Some(name) => (name.to_string(), true),
            None => (source[self.start..self.end].to_string(), false),
        };
        NodeDump {
            kind,
            named,
            start_byte: self.start,
            end_byte: self.end,
            start: lines.point(self.start),
            end: lines.point(self.end),
            children: self
                .children
                .into_iter()
                .map(|c| c.into_dump(source, lines))
                .collect(),
        }
    }
}

struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn point(&self, offset: usize) -> Point {
        let row = self.starts.partition_point(|s| *s <= offset) - 1;
        Point::new(row as u32, (offset - self.starts[row]) as u32)
    }
}

struct Parser<'s> {
    src: &'s str,
    pos: usize,
}

fn is_word_delimiter(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b';' | b'(' | b')' | b'"' | b'\'' | b'$')
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn skip_blank(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.pos += 1;
        }
    }

    fn skip_separators(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b';')) {
            self.pos += 1;
        }
    }

    fn at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some(b'\n' | b';' | b'#' | b')'))
    }

    fn scan_word(&self) -> usize {
        let bytes = self.src.as_bytes();
        let mut end = self.pos;
        while end < bytes.len() && !is_word_delimiter(bytes[end]) {
            end += if bytes[end] == b'\\' { 2 } else { 1 };
        }
        end.min(bytes.len())
    }

    fn next_word(&self) -> &str {
        &self.src[self.pos..self.scan_word()]
    }

    fn keyword(&mut self, expected: &str) -> Raw {
        self.skip_blank();
        let start = self.pos;
        if self.next_word() == expected {
            self.pos += expected.len();
        }
        Raw::token(start, self.pos)
    }

    fn statements(&mut self, terminators: &[&str]) -> Vec<Raw> {
        let mut result = Vec::new();
        loop {
            self.skip_separators();
            match self.peek() {
                None | Some(b')') => break,
                Some(b'#') => result.push(self.comment()),
                Some(_) if terminators.contains(&self.next_word()) => break,
                Some(_) => result.push(self.statement()),
            }
        }
        result
    }

    fn statement(&mut self) -> Raw {
        match self.next_word() {
            "function" => self.function_definition(),
            "for" => self.for_statement(),
            "while" => self.block(NodeKind::WhileStatement, "while", true),
            "begin" => self.block(NodeKind::BeginStatement, "begin", false),
            "if" => self.if_statement(),
            _ => self.command(),
        }
    }

    fn comment(&mut self) -> Raw {
        let start = self.pos;
        let end = self.src[start..]
            .find('\n')
            .map_or(self.src.len(), |i| start + i);
        self.pos = end;
        Raw::named(NodeKind::Comment, start, end, Vec::new())
    }

    fn line_arguments(&mut self, children: &mut Vec<Raw>) {
        loop {
            self.skip_blank();
            if self.at_line_end() {
                return;
            }
            children.push(self.argument());
        }
    }

    fn function_definition(&mut self) -> Raw {
        let start = self.pos;
        let mut children = vec![self.keyword("function")];
        self.line_arguments(&mut children);
        children.extend(self.statements(&["end"]));
        children.push(self.keyword("end"));
        Raw::named(NodeKind::FunctionDefinition, start, self.pos, children)
    }

    fn for_statement(&mut self) -> Raw {
        let start = self.pos;
        let mut children = vec![self.keyword("for")];
        self.skip_blank();
        let name_start = self.pos;
        self.pos = self.scan_word();
        children.push(Raw::named(NodeKind::VariableName, name_start, self.pos, Vec::new()));
        children.push(self.keyword("in"));
        self.line_arguments(&mut children);
        children.extend(self.statements(&["end"]));
        children.push(self.keyword("end"));
        Raw::named(NodeKind::ForStatement, start, self.pos, children)
    }

    fn block(&mut self, kind: NodeKind, keyword: &str, has_condition: bool) -> Raw {
        let start = self.pos;
        let mut children = vec![self.keyword(keyword)];
        if has_condition {
            self.skip_blank();
            children.push(self.command());
        }
        children.extend(self.statements(&["end"]));
        children.push(self.keyword("end"));
        Raw::named(kind, start, self.pos, children)
    }

    fn if_statement(&mut self) -> Raw {
        let start = self.pos;
        let mut children = vec![self.keyword("if")];
        self.skip_blank();
        children.push(self.command());
        children.extend(self.statements(&["end", "else"]));

        while self.next_word() == "else" {
            let clause_start = self.pos;
            let mut clause = vec![self.keyword("else")];
            self.skip_blank();
            if self.next_word() == "if" {
                clause.push(self.keyword("if"));
                self.skip_blank();
                clause.push(self.command());
                clause.extend(self.statements(&["end", "else"]));
                let end = clause.last().map_or(clause_start, |c| c.end);
                children.push(Raw::named(NodeKind::ElseIfClause, clause_start, end, clause));
            } else {
                clause.extend(self.statements(&["end"]));
                let end = clause.last().map_or(clause_start, |c| c.end);
                children.push(Raw::named(NodeKind::ElseClause, clause_start, end, clause));
            }
        }

        children.push(self.keyword("end"));
        Raw::named(NodeKind::IfStatement, start, self.pos, children)
    }

    fn command(&mut self) -> Raw {
        let start = self.pos;
        let mut children = Vec::new();
        self.line_arguments(&mut children);
        if children.is_empty() {
            self.pos = (self.pos + 1).min(self.src.len());
            return Raw::named(NodeKind::Error, start, self.pos, Vec::new());
        }
        let end = children.last().map_or(start, |c| c.end);
        Raw::named(NodeKind::Command, start, end, children)
    }

    fn argument(&mut self) -> Raw {
        let start = self.pos;
        let mut pieces = Vec::new();
        while let Some(c) = self.peek() {
            let piece = match c {
                b' ' | b'\t' | b'\n' | b';' | b')' => break,
                b'$' => self.variable_expansion(),
                b'"' => self.double_quote_string(),
                b'\'' => self.single_quote_string(),
                b'(' => self.command_substitution(),
                _ => self.bare_word(),
            };
            pieces.push(piece);
        }
        if pieces.len() == 1 {
            return pieces.remove(0);
        }
        Raw::named(NodeKind::Concatenation, start, self.pos, pieces)
    }

    fn bare_word(&mut self) -> Raw {
        let start = self.pos;
        self.pos = self.scan_word();
        let text = &self.src[start..self.pos];
        let kind = if text.bytes().all(|b| b.is_ascii_digit()) {
            NodeKind::Integer
        } else {
            NodeKind::Word
        };
        Raw::named(kind, start, self.pos, Vec::new())
    }

    fn variable_expansion(&mut self) -> Raw {
        let start = self.pos;
        self.pos += 1;
        let mut children = vec![Raw::token(start, self.pos)];

        let name_start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'_') {
            self.pos += 1;
        }
        if self.pos > name_start {
            children.push(Raw::named(NodeKind::VariableName, name_start, self.pos, Vec::new()));
        }

        if self.peek() == Some(b'[') {
            let index_start = self.pos;
            self.pos += 1;
            let mut index = vec![Raw::token(index_start, self.pos)];
            let value_start = self.pos;
            while !matches!(self.peek(), None | Some(b']' | b'\n')) {
                self.pos += 1;
            }
            if self.pos > value_start {
                let value = &self.src[value_start..self.pos];
                let kind = if value.bytes().all(|b| b.is_ascii_digit()) {
                    NodeKind::Integer
                } else {
                    NodeKind::Word
                };
                index.push(Raw::named(kind, value_start, self.pos, Vec::new()));
            }
            if self.peek() == Some(b']') {
                index.push(Raw::token(self.pos, self.pos + 1));
                self.pos += 1;
            }
            children.push(Raw::named(NodeKind::Index, index_start, self.pos, index));
        }

        Raw::named(NodeKind::VariableExpansion, start, self.pos, children)
    }

    fn double_quote_string(&mut self) -> Raw {
        let start = self.pos;
        self.pos += 1;
        let mut children = vec![Raw::token(start, self.pos)];
        while let Some(c) = self.peek() {
            match c {
                b'"' => {
                    children.push(Raw::token(self.pos, self.pos + 1));
                    self.pos += 1;
                    break;
                }
                b'$' => children.push(self.variable_expansion()),
                b'\\' => self.pos = (self.pos + 2).min(self.src.len()),
                _ => self.pos += 1,
            }
        }
        Raw::named(NodeKind::DoubleQuoteString, start, self.pos, children)
    }

    fn single_quote_string(&mut self) -> Raw {
        let start = self.pos;
        self.pos = self.src[start + 1..]
            .find('\'')
            .map_or(self.src.len(), |i| start + i + 2);
        Raw::named(NodeKind::SingleQuoteString, start, self.pos, Vec::new())
    }

    fn command_substitution(&mut self) -> Raw {
        let start = self.pos;
        self.pos += 1;
        let mut children = vec![Raw::token(start, self.pos)];
        children.extend(self.statements(&[]));
        if self.peek() == Some(b')') {
            children.push(Raw::token(self.pos, self.pos + 1));
            self.pos += 1;
        }
        Raw::named(NodeKind::CommandSubstitution, start, self.pos, children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::syntax::SyntaxNode;

    fn shape(node: SyntaxNode<'_>) -> String {
        let kind = match node.kind().grammar_name() {
            Some(name) => name.to_string(),
            None => format!("{:?}", node.text()),
        };
        if node.child_count() == 0 {
            return kind;
        }
        let children: Vec<String> = node.children().map(shape).collect();
        format!("({} {})", kind, children.join(" "))
    }

    #[test]
    fn test_function_shape() {
        let tree = parse("function greet\n    set -l name $argv[1]\n    echo \"hi $name\"\nend\ngreet Bob");
        let root = tree.root().unwrap();
        assert_eq!(
            shape(root),
            "(program (function_definition \"function\" word \
             (command word word word (variable_expansion \"$\" variable_name (index \"[\" integer \"]\"))) \
             (command word (double_quote_string \"\\\"\" (variable_expansion \"$\" variable_name) \"\\\"\")) \
             \"end\") (command word word))"
        );
    }

    #[test]
    fn test_for_and_if_shape() {
        let tree = parse("for i in 1 2\n    if test $i\n        echo a\n    else if true\n    else\n    end\nend\n");
        let root = tree.root().unwrap();
        assert_eq!(
            shape(root),
            "(program (for_statement \"for\" variable_name \"in\" integer integer \
             (if_statement \"if\" (command word (variable_expansion \"$\" variable_name)) \
             (command word word) \
             (else_if_clause \"else\" \"if\" (command word)) \
             (else_clause \"else\") \
             \"end\") \"end\"))"
        );
    }

    #[test]
    fn test_positions_and_separators() {
        let tree = parse("echo a; # note\necho (set x 1)'q'\n");
        let root = tree.root().unwrap();
        let kids: Vec<_> = root.children().collect();
        assert_eq!(kids.len(), 3);
        assert_eq!(kids[1].kind(), NodeKind::Comment);
        assert_eq!(kids[1].text(), "# note");
        assert_eq!(kids[2].start_position(), Point::new(1, 0));
        assert_eq!(
            shape(kids[2]),
            "(command word (concatenation (command_substitution \"(\" (command word word integer) \")\") single_quote_string))"
        );
    }
}
