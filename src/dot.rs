//! Graphviz rendering of the tree shape, for debugging rebalancing.

use std::fmt::{Debug, Write};

use crate::index::IndexType;
use crate::node::{Color, Node};
use crate::rbtree::RbTree;

impl<K, V, C, Ix> RbTree<K, V, C, Ix>
where
    K: Debug,
    Ix: IndexType,
{
    /// Render the tree as a DOT digraph, one vertex per node labelled with
    /// its key and filled with its color.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let tree: RbTree<_, _> = [(2, ()), (1, ()), (3, ())].into_iter().collect();
    /// let dot = tree.to_dot();
    /// assert!(dot.starts_with("digraph"));
    /// assert!(dot.contains("label=\"2\""));
    /// ```
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph rbtree {\n    node [style=filled, fontcolor=white];\n");
        let mut stack = vec![self.root];
        while let Some(x) = stack.pop() {
            if x.is_sentinel() {
                continue;
            }
            let (label, fill) = self.node_ref(x, |n| {
                let fill = match n.color() {
                    Color::Red => "red",
                    Color::Black => "black",
                };
                (format!("{:?}", n.key()).replace('"', "\\\""), fill)
            });
            let _ignore = writeln!(
                out,
                "    n{} [label=\"{label}\", fillcolor={fill}];",
                x.index()
            );
            for child in [self.node_ref(x, Node::left), self.node_ref(x, Node::right)] {
                if !child.is_sentinel() {
                    let _ignore = writeln!(out, "    n{} -> n{};", x.index(), child.index());
                }
            }
            stack.push(self.node_ref(x, Node::right));
            stack.push(self.node_ref(x, Node::left));
        }
        out.push_str("}\n");
        out
    }
}
