//! [TreeBuilder] implementation for [ClassTree].

use crate::model::attributes::Attributes;
use crate::model::tree::{ClassTree, VertexIndex};
use crate::model::tree_builder::TreeBuilder;
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};

/// Builds [ClassTree]s.
#[derive(Debug, Default)]
pub struct ClassTreeBuilder {
    current_tree: Option<ClassTree>,
}

impl ClassTreeBuilder {
    /// Creates a new builder with no tree under construction.
    pub fn new() -> Self {
        Self { current_tree: None }
    }

    fn current(&mut self) -> Result<&mut ClassTree, ParsingError> {
        self.current_tree
            .as_mut()
            .ok_or_else(|| ParsingError::without_context(ParsingErrorType::BuilderNotInitialized))
    }
}

impl TreeBuilder for ClassTreeBuilder {
    type VertexIdx = VertexIndex;
    type Tree = ClassTree;

    fn init_next(&mut self, capacity: usize) {
        self.current_tree = Some(ClassTree::with_capacity(capacity));
    }

    fn add_root(&mut self, tag: String, attributes: Attributes) -> Result<VertexIndex, ParsingError> {
        Ok(self.current()?.add_root(tag, attributes))
    }

    fn add_child(
        &mut self,
        parent: VertexIndex,
        tag: String,
        attributes: Attributes,
    ) -> Result<VertexIndex, ParsingError> {
        Ok(self.current()?.add_child(parent, tag, attributes))
    }

    fn finish_tree(&mut self) -> Option<ClassTree> {
        self.current_tree.take()
    }
}
