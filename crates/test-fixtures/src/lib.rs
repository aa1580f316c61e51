//! Program graph builders for tests and benches.
//!
//! The structural graph auditmon records into is normally produced by a
//! program indexer. These helpers build small, hand-shaped ones.

use auditmon_core::constants::{CLASS, DECLARES, METHOD, NAME, PACKAGE, PROJECT, SOURCE_FILE};
use auditmon_core::models::{AttrValue, NodeId};
use auditmon_core::IGraphStore;
use auditmon_graph::ProgramGraph;

/// Builds `declares` hierarchies on a [`ProgramGraph`].
pub struct ProgramGraphBuilder {
    graph: ProgramGraph,
}

impl ProgramGraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: ProgramGraph::new(),
        }
    }

    /// Build on an existing graph.
    pub fn on(graph: ProgramGraph) -> Self {
        Self { graph }
    }

    fn element(&self, parent: Option<NodeId>, name: &str, tag: &str) -> NodeId {
        let node = self
            .graph
            .add_named_node(name, &[tag])
            .expect("fixture node");
        if let Some(parent) = parent {
            self.graph
                .create_edge(parent, node, &[DECLARES])
                .expect("fixture declares edge");
        }
        node
    }

    pub fn project(&self, name: &str) -> NodeId {
        self.element(None, name, PROJECT)
    }

    pub fn package(&self, project: NodeId, name: &str) -> NodeId {
        self.element(Some(project), name, PACKAGE)
    }

    pub fn class(&self, parent: NodeId, name: &str) -> NodeId {
        self.element(Some(parent), name, CLASS)
    }

    pub fn method(&self, parent: NodeId, name: &str) -> NodeId {
        self.element(Some(parent), name, METHOD)
    }

    /// Record the file a top-level class lives in.
    pub fn source_file(&self, class: NodeId, file: &str) {
        self.graph
            .set_node_attr(class, SOURCE_FILE, AttrValue::Scalar(file.to_string()))
            .expect("fixture source file");
    }

    /// A bare node with no tags or structure.
    pub fn loose(&self, name: &str) -> NodeId {
        let node = self.graph.create_node(&[]).expect("fixture node");
        self.graph
            .set_node_attr(node, NAME, AttrValue::Scalar(name.to_string()))
            .expect("fixture name");
        node
    }

    pub fn build(self) -> ProgramGraph {
        self.graph
    }
}

impl Default for ProgramGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A small two-package program.
///
/// ```text
/// demo (project)
/// ├── com.example (package)
/// │   └── Outer (class, Outer.java)
/// │       ├── run (method)
/// │       │   └── 1 (class declared in run)
/// │       ├── stop (method)
/// │       └── Inner (class)
/// │           └── poll (method)
/// └── "" (default package)
///     └── Main (class)
///         └── main (method)
/// ```
pub struct SampleProgram {
    pub graph: ProgramGraph,
    pub project: NodeId,
    pub package: NodeId,
    pub default_package: NodeId,
    pub outer: NodeId,
    pub run: NodeId,
    pub stop: NodeId,
    pub anonymous: NodeId,
    pub inner: NodeId,
    pub poll: NodeId,
    pub main_class: NodeId,
    pub main: NodeId,
}

impl SampleProgram {
    pub fn build() -> Self {
        let b = ProgramGraphBuilder::new();
        let project = b.project("demo");
        let package = b.package(project, "com.example");
        let outer = b.class(package, "Outer");
        b.source_file(outer, "Outer.java");
        let run = b.method(outer, "run");
        let anonymous = b.class(run, "1");
        let stop = b.method(outer, "stop");
        let inner = b.class(outer, "Inner");
        let poll = b.method(inner, "poll");
        let default_package = b.package(project, "");
        let main_class = b.class(default_package, "Main");
        let main = b.method(main_class, "main");
        Self {
            graph: b.build(),
            project,
            package,
            default_package,
            outer,
            run,
            stop,
            anonymous,
            inner,
            poll,
            main_class,
            main,
        }
    }

    /// Every method node, in declaration order.
    pub fn methods(&self) -> Vec<NodeId> {
        vec![self.run, self.stop, self.poll, self.main]
    }
}

/// `count` loose artifacts on a fresh graph, for benches and property tests.
pub fn flat_program(count: usize) -> (ProgramGraph, Vec<NodeId>) {
    let b = ProgramGraphBuilder::new();
    let nodes = (0..count).map(|i| b.loose(&format!("a{i}"))).collect();
    (b.build(), nodes)
}
