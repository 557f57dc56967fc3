//! Builtin command lookup
//!
//! Builtins have no definition site, so the resolver asks a registry before
//! searching the tree.

use std::collections::HashSet;

use crate::models::config::AnalysisConfig;

/// Answers whether a name is a shell builtin
pub trait BuiltinRegistry: Send + Sync {
    fn is_builtin(&self, name: &str) -> bool;
}

impl<F> BuiltinRegistry for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_builtin(&self, name: &str) -> bool {
        self(name)
    }
}

/// Names listed by `builtin --names`, sorted
const FISH_BUILTINS: &[&str] = &[
    ".",
    ":",
    "[",
    "_",
    "abbr",
    "and",
    "argparse",
    "begin",
    "bg",
    "bind",
    "block",
    "break",
    "breakpoint",
    "builtin",
    "case",
    "cd",
    "command",
    "commandline",
    "complete",
    "contains",
    "continue",
    "count",
    "disown",
    "echo",
    "else",
    "emit",
    "end",
    "eval",
    "exec",
    "exit",
    "false",
    "fg",
    "fish_indent",
    "fish_key_reader",
    "for",
    "function",
    "functions",
    "history",
    "if",
    "jobs",
    "math",
    "not",
    "or",
    "path",
    "printf",
    "pwd",
    "random",
    "read",
    "realpath",
    "return",
    "set",
    "set_color",
    "source",
    "status",
    "string",
    "switch",
    "test",
    "time",
    "true",
    "type",
    "ulimit",
    "wait",
    "while",
];

/// fish's builtin set, optionally extended with configured names
#[derive(Debug, Clone, Default)]
pub struct FishBuiltins {
    extras: HashSet<String>,
}

impl FishBuiltins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extras<I, S>(extras: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extras: extras.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::with_extras(config.extra_builtins.iter().cloned())
    }
}

impl BuiltinRegistry for FishBuiltins {
    fn is_builtin(&self, name: &str) -> bool {
        FISH_BUILTINS.binary_search(&name).is_ok() || self.extras.contains(name)
    }
}
