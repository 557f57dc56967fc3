//! Application container for fishscope

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::cli::OutputContext;
use crate::infra::syntax::SyntaxTree;
use crate::models::config::FishscopeConfig;
use crate::models::lsp::path_to_uri;
use crate::services::analyzer::{Analyzer, InMemoryDocuments};
use crate::services::config::{ConfigService, DefaultConfigService};

pub struct App {
    root: PathBuf,
    pub(crate) output: OutputContext,
    pub(crate) config_service: Arc<dyn ConfigService>,
    pub(crate) config: FishscopeConfig,
}

/// A syntax tree dump loaded for one command
pub struct LoadedDocument {
    pub uri: String,
    /// Display path of the document
    pub file: String,
    pub source: String,
    pub analyzer: Analyzer,
}

impl App {
    pub fn new(pretty: bool) -> anyhow::Result<Self> {
        let root = std::env::current_dir()?;

        tracing::debug!("Initializing fishscope at {:?}", root);

        let config_service = Arc::new(DefaultConfigService::new(&root));
        let config = config_service.load(false).unwrap_or_else(|e| {
            tracing::warn!("Ignoring config: {}", e);
            FishscopeConfig::default()
        });
        let output = OutputContext::new(root.clone(), pretty || config.output.pretty);

        Ok(Self {
            root,
            output,
            config_service,
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &FishscopeConfig {
        &self.config
    }

    /// Load a tree dump. `source_path` names the fish file the tree was
    /// parsed from; it anchors output paths and `source` lookups.
    pub fn load_document(
        &self,
        tree_path: &Path,
        source_path: Option<&Path>,
    ) -> anyhow::Result<LoadedDocument> {
        let content = std::fs::read_to_string(tree_path)
            .with_context(|| format!("Failed to read tree: {}", tree_path.display()))?;
        let tree = SyntaxTree::from_json(&content)
            .with_context(|| format!("Invalid tree: {}", tree_path.display()))?;

        let document_path = source_path.unwrap_or(tree_path);
        let uri = path_to_uri(document_path);
        let file = self.output.relative_path(&self.root.join(document_path));
        let source = tree.source().to_string();
        tracing::debug!("Loaded {} ({} nodes)", file, tree.len());

        let mut documents = InMemoryDocuments::new();
        documents.insert(uri.clone(), tree);
        let analyzer = Analyzer::from_config(Arc::new(documents), &self.config);

        Ok(LoadedDocument {
            uri,
            file,
            source,
            analyzer,
        })
    }
}
