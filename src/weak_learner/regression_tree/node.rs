//! Defines the inner representation
//! of the Regression Tree class.
use serde::{Serialize, Deserialize};

use crate::{Regressor, Sample};
use crate::weak_learner::common::{
    type_and_struct::*,
    split_rule::*,
};


/// Enumeration of `BranchNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// A node that have two childrens.
    Branch(BranchNode),


    /// A node that have no child.
    Leaf(LeafNode),
}


/// Represents the branch nodes of regression tree.
/// Each `BranchNode` must have two childrens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub(super) rule: Splitter,
    pub(super) left: Box<Node>,
    pub(super) right: Box<Node>,
}


/// Represents the leaf nodes of regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub(super) prediction: Prediction<f64>,
}


impl Node {
    /// A leaf that predicts `prediction`.
    #[inline]
    pub(super) fn leaf(prediction: f64) -> Self {
        Node::Leaf(LeafNode { prediction: prediction.into() })
    }


    /// A branch node with the given children.
    #[inline]
    pub(super) fn branch(rule: Splitter, left: Node, right: Node) -> Self {
        Node::Branch(BranchNode {
            rule,
            left: Box::new(left),
            right: Box::new(right),
        })
    }


    /// Returns the number of leaves of this sub-tree.
    pub(super) fn leaves(&self) -> usize {
        match self {
            Node::Branch(node) => node.left.leaves() + node.right.leaves(),
            Node::Leaf(_) => 1_usize,
        }
    }


    /// Returns the depth of this sub-tree. A single leaf has depth `0`.
    pub(super) fn depth(&self) -> usize {
        match self {
            Node::Branch(node) => {
                1 + node.left.depth().max(node.right.depth())
            },
            Node::Leaf(_) => 0_usize,
        }
    }


    /// Returns `true` if every leaf value is finite.
    pub(super) fn is_finite(&self) -> bool {
        match self {
            Node::Branch(node) => {
                node.rule.threshold.0.is_finite()
                    && node.left.is_finite()
                    && node.right.is_finite()
            },
            Node::Leaf(node) => node.prediction.0.is_finite(),
        }
    }
}


impl Regressor for LeafNode {
    #[inline]
    fn predict(&self, _sample: &Sample) -> f64 {
        self.prediction.0
    }
}


impl Regressor for BranchNode {
    #[inline]
    fn predict(&self, sample: &Sample) -> f64 {
        match self.rule.split(sample) {
            LR::Left => self.left.predict(sample),
            LR::Right => self.right.predict(sample),
        }
    }
}


impl Regressor for Node {
    #[inline]
    fn predict(&self, sample: &Sample) -> f64 {
        match self {
            Node::Branch(ref node) => node.predict(sample),
            Node::Leaf(ref node) => node.predict(sample),
        }
    }
}
