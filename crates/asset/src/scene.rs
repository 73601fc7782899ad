//! Owned scene graph: a node arena built once from the parser's output.
//!
//! Traversal is iterative with an explicit stack, so scene depth never
//! translates into call-stack depth.

/// Index of a node within a [`SceneGraph`] arena.
pub type NodeIndex = usize;

/// One scene node: zero or more meshes, zero or more children.
///
/// `meshes` holds indices into the importer's flattened primitive list.
#[derive(Clone, Debug, Default)]
pub struct SceneNode {
    pub name: Option<String>,
    pub meshes: Vec<usize>,
    pub children: Vec<NodeIndex>,
}

/// Arena of scene nodes plus the root set of the active scene.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeIndex>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: SceneNode) -> NodeIndex {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn add_root(&mut self, index: NodeIndex) {
        self.roots.push(index);
    }

    pub fn node(&self, index: NodeIndex) -> &SceneNode {
        &self.nodes[index]
    }

    pub fn node_mut(&mut self, index: NodeIndex) -> &mut SceneNode {
        &mut self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    /// Depth-first walk: a node is yielded before its children, children in
    /// left-to-right order, every reachable node exactly once.
    pub fn walk(&self) -> Walk<'_> {
        let mut stack = self.roots.clone();
        stack.reverse();
        Walk { graph: self, stack }
    }
}

/// Iterator over a [`SceneGraph`] in depth-first order.
pub struct Walk<'a> {
    graph: &'a SceneGraph,
    stack: Vec<NodeIndex>,
}

impl Iterator for Walk<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let index = self.stack.pop()?;
        // Reversed push keeps pop order left-to-right.
        let children = &self.graph.node(index).children;
        self.stack.extend(children.iter().rev().copied());
        Some(index)
    }
}
