//! Cross-file dependency lookup
//!
//! Maps a command name or a `source` argument to the fish file that defines
//! it. This is the only place that touches the file system during
//! resolution.

use std::path::{Path, PathBuf};

use super::node_types::is_command;
use super::syntax::SyntaxNode;
use crate::models::config::PathsConfig;
use crate::models::lsp::uri_to_path;

/// Resolves a node to the file it refers to
pub trait DependencyResolver: Send + Sync {
    fn resolve(&self, node: SyntaxNode<'_>, base_uri: &str) -> Option<PathBuf>;
}

/// Looks for `<name>.fish` along a list of directories
#[derive(Debug, Clone, Default)]
pub struct SearchPathResolver {
    search_paths: Vec<PathBuf>,
}

impl SearchPathResolver {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    pub fn from_config(config: &PathsConfig) -> Self {
        let mut search_paths: Vec<PathBuf> = config
            .function_paths
            .iter()
            .map(|p| expand_home(p))
            .collect();

        if config.include_env_path
            && let Some(path) = std::env::var_os("PATH")
        {
            search_paths.extend(std::env::split_paths(&path));
        }

        Self::new(search_paths)
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl DependencyResolver for SearchPathResolver {
    fn resolve(&self, node: SyntaxNode<'_>, base_uri: &str) -> Option<PathBuf> {
        let mut filename = dependency_name(node)?;
        if !filename.ends_with(".fish") {
            filename.push_str(".fish");
        }

        for dir in &self.search_paths {
            let candidate = dir.join(&filename);
            if candidate.is_file() {
                tracing::trace!("Dependency found: {}", candidate.display());
                return Some(candidate);
            }
        }

        let base = uri_to_path(base_uri);
        let dir = base.parent().unwrap_or(Path::new("."));
        Some(dir.join(filename))
    }
}

/// File name a node points at: the argument of `source`/`.`, else the
/// command name itself
fn dependency_name(node: SyntaxNode<'_>) -> Option<String> {
    let command = if is_command(node) {
        Some(node)
    } else {
        node.parent().filter(|p| is_command(*p))
    };
    let Some(command) = command else {
        return Some(node.text().to_string());
    };

    match command.child(0).map(|n| n.text()) {
        Some("source" | ".") => Some(command.child(1)?.text().replace(['"', '\''], "")),
        Some(name) if command == node => Some(name.to_string()),
        _ => Some(node.text().to_string()),
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
