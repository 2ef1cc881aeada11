//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::Path;
use std::sync::Arc;

use crate::application::services::{LayoutOrchestrator, LayoutService};
use crate::config::Settings;
use crate::domain::RelativeCallback;
use crate::infrastructure::layered::LayeredLayoutEngine;
use crate::infrastructure::traits::{FileSystem, JsonFileSource, LayoutEngine, RealFileSystem};

/// Container holding the shared dependencies of all services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Layout engine behind the adapter
    pub engine: Arc<dyn LayoutEngine>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(LayeredLayoutEngine::new()),
            Arc::new(RealFileSystem),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        engine: Arc<dyn LayoutEngine>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            engine,
            fs,
        }
    }

    /// Layout adapter configured from the settings' options, sizing and timeout.
    pub fn layout_service(&self) -> Arc<LayoutService> {
        Arc::new(
            LayoutService::new(
                self.engine.clone(),
                self.settings.sizing,
                self.settings.timeout(),
            )
            .with_defaults(self.settings.layout),
        )
    }

    /// Orchestrator over a fresh layout adapter.
    pub fn orchestrator(
        &self,
        on_add_relative: RelativeCallback,
        on_node_click: RelativeCallback,
    ) -> LayoutOrchestrator {
        LayoutOrchestrator::new(
            self.layout_service(),
            self.settings.clone(),
            on_add_relative,
            on_node_click,
        )
    }

    /// JSON tree source reading through the container's filesystem.
    pub fn json_source(&self, path: &Path) -> JsonFileSource {
        JsonFileSource::new(self.fs.clone(), path)
    }
}
