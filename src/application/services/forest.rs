//! Forest service: record files in, forests out.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::application::records::{load_records, Record, RecordSchema};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{BuildOptions, Forest, Tree, TreeBuilder};

/// Builds and reshapes record forests according to [`Settings`].
#[derive(Debug, Clone)]
pub struct ForestService {
    settings: Settings,
}

impl ForestService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn schema(&self) -> RecordSchema {
        RecordSchema::from(&self.settings)
    }

    fn builder(&self) -> TreeBuilder {
        TreeBuilder::with_options(BuildOptions {
            max_depth: self.settings.max_depth,
        })
    }

    /// Link records by key and parent key.
    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn build(&self, records: Vec<Record>) -> ApplicationResult<Forest<Record>> {
        let forest = self.builder().build_from_flat_relation(
            records,
            |record: &Record| record.key.clone(),
            |record: &Record| record.parent.clone(),
        )?;
        debug!(trees = forest.len(), "built record forest");
        Ok(forest)
    }

    /// Load a record file and build its forest.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Forest<Record>> {
        let records = load_records(path, &self.schema())?;
        info!(path = %path.display(), count = records.len(), "loaded records");
        self.build(records)
    }

    /// Copy the forest without the records whose key is listed in `drop`.
    ///
    /// Dropped records take their whole subtree with them, roots included.
    #[instrument(level = "debug", skip(self, forest))]
    pub fn prune(&self, forest: &[Tree<Record>], drop: &[String]) -> Forest<Record> {
        let is_dropped = |record: &Record| drop.contains(&record.key.to_string());
        forest
            .iter()
            .filter(|tree| !is_dropped(&tree[tree.root()]))
            .map(|tree| tree.copy_filtered(|node| !is_dropped(node.model())))
            .collect()
    }

    /// Leaf-to-root label paths of every tree.
    pub fn branches(&self, forest: &[Tree<Record>]) -> Vec<Vec<String>> {
        forest
            .iter()
            .flat_map(|tree| {
                tree.branches().into_iter().map(move |branch| {
                    branch
                        .into_iter()
                        .map(|id| tree[id].label.clone())
                        .collect::<Vec<_>>()
                })
            })
            .collect()
    }
}

impl Default for ForestService {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
