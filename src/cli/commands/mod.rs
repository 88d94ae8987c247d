//! Command implementations

mod lint;
mod list;
mod owners;
mod package;

use std::path::PathBuf;

use packwright::adapters::build_file::BuildFileRepository;
use packwright::config::ProjectOptions;
use packwright::core::models::Specs;
use packwright::core::ports::TargetRepository;
use packwright::core::services::{BuildGraph, Selection, select};
use packwright::paths;

pub use lint::{GoalArgs, fmt, lint};
pub use list::list;
pub use owners::owners;
pub use package::{package, plan};

/// Build root and options shared by every command
#[derive(Debug)]
pub struct Context {
    /// Build root
    pub root: PathBuf,
    /// Loaded options
    pub options: ProjectOptions,
}

impl Context {
    /// Find the build root and load its options
    pub fn load(build_root: Option<PathBuf>, config_files: &[PathBuf], flags: &[String]) -> anyhow::Result<Self> {
        let root = match build_root {
            Some(root) => root,
            None => paths::find_build_root(&std::env::current_dir()?),
        };
        let options = ProjectOptions::load(&root, config_files, flags)?;
        Ok(Self { root, options })
    }

    fn repository(&self) -> BuildFileRepository {
        BuildFileRepository::new(
            self.root.clone(),
            &self.options.global.build_file_name,
            &self.options.global.distdir,
        )
    }

    /// Output directory for distributions
    pub fn distdir(&self) -> PathBuf {
        paths::to_fs_path(&self.root, &self.options.global.distdir)
    }
}

/// The target graph plus every file in the workspace
#[derive(Debug)]
pub struct Workspace {
    /// Validated target graph
    pub graph: BuildGraph,
    /// Every file under the build root, sorted
    pub files: Vec<String>,
}

impl Workspace {
    /// Load BUILD files and list files under the build root
    pub fn load(ctx: &Context) -> anyhow::Result<Self> {
        let repo = ctx.repository();
        let graph = BuildGraph::new(repo.load_targets()?)?;
        let files = repo.list_files()?;
        log::debug!("Loaded {} target(s), {} file(s)", graph.len(), files.len());
        Ok(Self { graph, files })
    }

    /// Resolve command-line specs
    pub fn select(&self, specs: &[String]) -> anyhow::Result<Selection> {
        let specs = Specs::parse(specs)?;
        Ok(select(&self.graph, &self.files, &specs)?)
    }
}
