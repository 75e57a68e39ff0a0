//! Diagram to DOT (Graphviz) conversion.
//!
//! The exporter only uses the session's read-only accessors, so it sees the
//! diagram exactly as any other client would.
//!
//! # DOT Format
//!
//! The generated DOT output follows these conventions:
//! - **Terminal nodes** (0 and 1) are rendered as squares at the bottom (sink rank)
//! - **Decision nodes** are rendered as circles labeled with the variable name,
//!   grouped by their rank in the ordering
//! - **Edges**: solid lines are high (1) edges, dashed lines are low (0) edges
//! - **Root nodes** are rendered as rectangles at the top (source rank)
//!
//! # Examples
//!
//! ```
//! use robdd_equiv::session::Session;
//!
//! let s = Session::new("A B".parse().unwrap());
//! let f = s.build(&"A B AND".parse().unwrap()).unwrap();
//!
//! let dot = s.to_dot(&[f]).unwrap();
//! assert!(dot.contains("label=\"A\""));
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::node::Node;
use crate::reference::Ref;
use crate::session::Session;
use crate::types::Var;

/// Configuration options for DOT output generation.
///
/// ```
/// use robdd_equiv::dot::DotConfig;
/// use robdd_equiv::session::Session;
///
/// let s = Session::new("A B".parse().unwrap());
/// let f = s.mk_var("B").unwrap();
/// let config = DotConfig {
///     node_shape: "ellipse",
///     root_labels: vec!["f".to_string()],
///     ..DotConfig::default()
/// };
///
/// let dot = s.to_dot_with_config(&[f], &config).unwrap();
/// assert!(dot.contains("label=\"f\""));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for decision nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for terminal nodes (default: "square")
    pub terminal_shape: &'static str,
    /// Shape for root nodes (default: "rect")
    pub root_shape: &'static str,
    /// Style for high edges (default: "solid")
    pub high_edge_style: &'static str,
    /// Style for low edges (default: "dashed")
    pub low_edge_style: &'static str,
    /// Labels of the root nodes, by position; missing ones fall back to the ref.
    pub root_labels: Vec<String>,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            terminal_shape: "square",
            root_shape: "rect",
            high_edge_style: "solid",
            low_edge_style: "dashed",
            root_labels: Vec::new(),
        }
    }
}

/// Quote `text` as a DOT string literal.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

impl Session {
    /// Converts the diagrams rooted at `roots` to DOT format.
    ///
    /// Shared nodes are emitted once, even when reachable from several roots.
    pub fn to_dot(&self, roots: &[Ref]) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(roots, &DotConfig::default())
    }

    /// Converts the diagrams rooted at `roots` to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, roots: &[Ref], config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "node [shape={}];", config.node_shape)?;

        let all_nodes = self.descendants(roots.iter().copied());

        // Terminals first, then decision nodes grouped by rank
        let mut levels = BTreeMap::<Var, Vec<Ref>>::new();
        writeln!(dot, "{{ rank=sink")?;
        for &node in all_nodes.iter() {
            match self.node(node) {
                Node::Terminal(value) => {
                    writeln!(
                        dot,
                        "{} [shape={}, label=\"{}\"];",
                        node.get(),
                        config.terminal_shape,
                        value as u8
                    )?;
                }
                Node::Decision { variable, .. } => levels.entry(variable).or_default().push(node),
            }
        }
        writeln!(dot, "}}")?;

        for (&variable, level) in levels.iter() {
            let label = quote(self.ordering().name(variable).unwrap_or("?"));
            writeln!(dot, "{{ rank=same")?;
            for &node in level.iter() {
                writeln!(dot, "{} [label={}];", node.get(), label)?;
            }
            writeln!(dot, "}}")?;
        }

        for level in levels.values() {
            for &node in level.iter() {
                if let Node::Decision { low, high, .. } = self.node(node) {
                    writeln!(dot, "{} -- {} [style={}];", node.get(), high.get(), config.high_edge_style)?;
                    writeln!(dot, "{} -- {} [style={}];", node.get(), low.get(), config.low_edge_style)?;
                }
            }
        }

        writeln!(dot, "{{ rank=source")?;
        for (i, root) in roots.iter().enumerate() {
            let label = match config.root_labels.get(i) {
                Some(label) => quote(label),
                None => quote(&root.to_string()),
            };
            writeln!(dot, "r{} [shape={}, label={}];", i, config.root_shape, label)?;
        }
        writeln!(dot, "}}")?;

        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} -- {};", i, root.get())?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
