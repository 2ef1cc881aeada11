//! Layout orchestration
//!
//! Drives build → depth window → layout → callback attachment whenever the
//! tree data changes, and publishes the result as immutable snapshots.
//!
//! ```text
//!            set_tree_data / set_depth_window
//!   Idle ──────────────────────────────► Loading ──► Ready
//!                                           │
//!                                           └──────► Failed { message }
//! ```
//!
//! Every run gets a request id. Only the run holding the latest id may commit;
//! a slower, superseded run is dropped when it finishes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::application::services::LayoutService;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{
    build_graph, filter_graph_by_depth, validate_graph, Graph, RelativeCallback, TreeData,
    TreeEdge, TreeNode,
};

/// Orchestrator lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed { message: String },
}

/// What the rendering surface sees.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrchestratorSnapshot {
    pub phase: Phase,
    pub nodes: Vec<TreeNode>,
    pub edges: Vec<TreeEdge>,
    pub loading: bool,
    pub error: Option<String>,
}

impl OrchestratorSnapshot {
    fn loading_from(previous: &OrchestratorSnapshot) -> Self {
        Self {
            phase: Phase::Loading,
            nodes: previous.nodes.clone(),
            edges: previous.edges.clone(),
            loading: true,
            error: None,
        }
    }

    fn ready(graph: Graph) -> Self {
        Self {
            phase: Phase::Ready,
            nodes: graph.nodes,
            edges: graph.edges,
            loading: false,
            error: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            phase: Phase::Failed {
                message: message.clone(),
            },
            nodes: Vec::new(),
            edges: Vec::new(),
            loading: false,
            error: Some(message),
        }
    }

    /// True once the run that produced this snapshot has finished.
    pub fn is_settled(&self) -> bool {
        matches!(self.phase, Phase::Ready | Phase::Failed { .. })
    }
}

/// Restrict the laid-out graph to `max_depth` hops around `proband_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepthWindow {
    pub proband_id: String,
    pub max_depth: usize,
}

impl DepthWindow {
    pub fn new(proband_id: impl Into<String>, max_depth: usize) -> Self {
        Self {
            proband_id: proband_id.into(),
            max_depth,
        }
    }
}

/// Attach `callback` to every person node. Union nodes are left untouched.
pub fn attach_callbacks(nodes: Vec<TreeNode>, callback: &RelativeCallback) -> Vec<TreeNode> {
    nodes
        .into_iter()
        .map(|mut node| {
            if node.is_person() {
                node.on_add_relative = Some(callback.clone());
            }
            node
        })
        .collect()
}

#[derive(Default)]
struct Input {
    data: Option<Arc<TreeData>>,
    window: Option<DepthWindow>,
}

struct Inner {
    layout: Arc<LayoutService>,
    settings: Arc<Settings>,
    on_add_relative: RelativeCallback,
    on_node_click: RelativeCallback,
    latest: AtomicU64,
    input: Mutex<Input>,
    state: watch::Sender<OrchestratorSnapshot>,
}

/// Reactive owner of the displayed graph.
///
/// Cheap to clone; clones share state. Methods that start a run spawn onto the
/// current tokio runtime.
#[derive(Clone)]
pub struct LayoutOrchestrator {
    inner: Arc<Inner>,
}

impl LayoutOrchestrator {
    pub fn new(
        layout: Arc<LayoutService>,
        settings: Arc<Settings>,
        on_add_relative: RelativeCallback,
        on_node_click: RelativeCallback,
    ) -> Self {
        let (state, _) = watch::channel(OrchestratorSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                layout,
                settings,
                on_add_relative,
                on_node_click,
                latest: AtomicU64::new(0),
                input: Mutex::new(Input::default()),
                state,
            }),
        }
    }

    /// Receiver that observes every committed snapshot.
    pub fn subscribe(&self) -> watch::Receiver<OrchestratorSnapshot> {
        self.inner.state.subscribe()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> OrchestratorSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Replace the tree data and lay it out.
    ///
    /// Passing the same `Arc` again while `Ready` does nothing and returns `None`.
    /// Otherwise returns the handle of the spawned run.
    #[instrument(level = "debug", skip(self, data))]
    pub fn set_tree_data(&self, data: Arc<TreeData>) -> Option<JoinHandle<()>> {
        let (request, window) = {
            let mut input = self.inner.input.lock().unwrap_or_else(PoisonError::into_inner);
            let unchanged = input
                .data
                .as_ref()
                .is_some_and(|current| Arc::ptr_eq(current, &data));
            if unchanged && self.inner.state.borrow().phase == Phase::Ready {
                debug!("set_tree_data: same data while ready, nothing to do");
                return None;
            }
            input.data = Some(data.clone());
            (self.begin(), input.window.clone())
        };
        Some(self.spawn_run(request, data, window))
    }

    /// Change the depth window and re-run over the current data.
    ///
    /// Returns `None` when no data has been set yet.
    #[instrument(level = "debug", skip(self))]
    pub fn set_depth_window(&self, window: Option<DepthWindow>) -> Option<JoinHandle<()>> {
        let (request, data) = {
            let mut input = self.inner.input.lock().unwrap_or_else(PoisonError::into_inner);
            input.window = window.clone();
            match input.data.clone() {
                Some(data) => (self.begin(), data),
                None => {
                    debug!("set_depth_window: no data yet");
                    return None;
                }
            }
        };
        Some(self.spawn_run(request, data, window))
    }

    /// Forward a click on `node_id` to the click handler.
    ///
    /// Only displayed person nodes are clickable. While loading, the previous
    /// graph stays on screen and its person nodes keep accepting clicks.
    /// Returns whether the handler ran.
    pub fn node_clicked(&self, node_id: &str) -> bool {
        let is_person = {
            let snapshot = self.inner.state.borrow();
            matches!(snapshot.phase, Phase::Ready | Phase::Loading)
                && snapshot
                    .nodes
                    .iter()
                    .any(|n| n.id == node_id && n.is_person())
        };
        if is_person {
            self.inner.on_node_click.call(node_id);
        } else {
            debug!("node_clicked: {} is not a displayed person node", node_id);
        }
        is_person
    }

    /// Issue the next request id and publish `Loading`.
    ///
    /// Must be called while holding the `input` lock, so request ids follow the
    /// order in which inputs were stored.
    fn begin(&self) -> u64 {
        let request = self.inner.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner
            .state
            .send_modify(|snapshot| *snapshot = OrchestratorSnapshot::loading_from(snapshot));
        debug!("begin: request {}", request);
        request
    }

    fn spawn_run(
        &self,
        request: u64,
        data: Arc<TreeData>,
        window: Option<DepthWindow>,
    ) -> JoinHandle<()> {
        let inner = self.inner.clone();
        tokio::spawn(async move {
            let worker = tokio::spawn(run_pipeline(
                inner.layout.clone(),
                inner.settings.validate_graph,
                inner.on_add_relative.clone(),
                data,
                window,
            ));
            let outcome = match worker.await {
                Ok(outcome) => outcome,
                Err(e) => Err(ApplicationError::Pipeline {
                    message: format!("layout task aborted: {}", e),
                }),
            };
            let next = match outcome {
                Ok(graph) => OrchestratorSnapshot::ready(graph),
                Err(e) => {
                    warn!("Layout pipeline failed: {}", e);
                    OrchestratorSnapshot::failed(e.to_string())
                }
            };

            let committed = inner.state.send_if_modified(|snapshot| {
                if inner.latest.load(Ordering::SeqCst) != request {
                    return false;
                }
                *snapshot = next;
                true
            });
            if !committed {
                debug!("request {} superseded, result discarded", request);
            }
        })
    }
}

async fn run_pipeline(
    layout: Arc<LayoutService>,
    strict: bool,
    callback: RelativeCallback,
    data: Arc<TreeData>,
    window: Option<DepthWindow>,
) -> ApplicationResult<Graph> {
    let mut graph = build_graph(&data);

    if strict {
        validate_graph(&graph.nodes, &graph.edges).into_result()?;
    }

    if let Some(window) = &window {
        graph = filter_graph_by_depth(&graph.nodes, &graph.edges, &window.proband_id, window.max_depth);
        if graph.is_empty() {
            warn!("Depth window around {} selected no nodes", window.proband_id);
        }
    }

    let nodes = layout.apply_layout(&graph.nodes, &graph.edges, None).await;
    Ok(Graph::new(attach_callbacks(nodes, &callback), graph.edges))
}
