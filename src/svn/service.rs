use std::path::PathBuf;
use std::sync::Arc;

use crate::config::SvnConfig;
use crate::error::Result;
use crate::svn::command::{CommandRunner, ProcessRunner};

/// Entry point for every repository query.
///
/// Holds no per-request state: each operation resolves a handle, runs its
/// commands and builds fresh results, so one instance is shared freely
/// across concurrent requests.
pub struct SvnService {
    pub config: SvnConfig,
    runner: Arc<dyn CommandRunner>,
}

impl SvnService {
    pub fn new(config: SvnConfig) -> Self {
        let runner = Arc::new(ProcessRunner::new(config.command_timeout));
        Self::with_runner(config, runner)
    }

    pub fn with_runner(config: SvnConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    pub fn store_path(&self, name: &str) -> PathBuf {
        self.config.repos_root.join(name)
    }

    /// Run `svnlook` and return stdout as text.
    pub(crate) async fn look(&self, args: Vec<String>) -> Result<String> {
        self.runner.run_text(&self.config.svnlook, &args).await
    }

    /// Run `svnlook` and return stdout untouched.
    pub(crate) async fn look_raw(&self, args: Vec<String>) -> Result<Vec<u8>> {
        self.runner.run(&self.config.svnlook, &args).await
    }

    pub(crate) async fn admin(&self, args: Vec<String>) -> Result<String> {
        self.runner.run_text(&self.config.svnadmin, &args).await
    }
}

pub type SharedSvn = Arc<SvnService>;
