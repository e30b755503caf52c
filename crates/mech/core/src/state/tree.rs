use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{PartId, PartInstance};

/// Position of a node: index among the top-level parts, then child indices.
type NodePath = Vec<usize>;

/// The hierarchical template being built.
///
/// Owns every [`PartInstance`]. Nodes are only ever appended, so a node's path
/// never changes once assigned; the `index` maps each `PartId` to that path so
/// lookups avoid a recursive search.
///
/// Serialized as `{ "parts": [...] }`. Restoring rebuilds the index and resumes
/// the ID counter after the largest `PartID` found anywhere in the tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "TemplateSnapshot", into = "TemplateSnapshot")]
pub struct PartTree {
    roots: Vec<PartInstance>,
    /// Last assigned ID; the next attach receives `last_id + 1`.
    last_id: u32,
    index: HashMap<PartId, NodePath>,
}

/// Persisted shape of a [`PartTree`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct TemplateSnapshot {
    #[serde(default)]
    parts: Vec<PartInstance>,
}

impl From<TemplateSnapshot> for PartTree {
    fn from(snapshot: TemplateSnapshot) -> Self {
        Self::from_roots(snapshot.parts)
    }
}

impl From<PartTree> for TemplateSnapshot {
    fn from(tree: PartTree) -> Self {
        Self { parts: tree.roots }
    }
}

impl PartTree {
    /// Creates an empty tree; the first attach receives `PartId(1)`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a tree from restored top-level parts.
    ///
    /// When the same `PartID` appears twice the first occurrence wins the index
    /// slot; the counter still resumes above the largest ID seen.
    pub fn from_roots(roots: Vec<PartInstance>) -> Self {
        let mut tree = Self {
            roots,
            last_id: 0,
            index: HashMap::new(),
        };
        tree.rebuild_index();
        tree
    }

    fn rebuild_index(&mut self) {
        let mut index = HashMap::new();
        let mut last_id = 0;
        let mut stack: Vec<(NodePath, &PartInstance)> = self
            .roots
            .iter()
            .enumerate()
            .rev()
            .map(|(i, node)| (vec![i], node))
            .collect();

        while let Some((path, node)) = stack.pop() {
            last_id = last_id.max(node.part_id.0);
            if index.contains_key(&node.part_id) {
                tracing::warn!("Duplicate PartID {} in restored template", node.part_id);
            } else {
                index.insert(node.part_id, path.clone());
            }
            for (i, child) in node.children.iter().enumerate().rev() {
                let mut child_path = path.clone();
                child_path.push(i);
                stack.push((child_path, child));
            }
        }

        self.index = index;
        self.last_id = last_id;
    }

    /// Top-level parts in insertion order.
    pub fn roots(&self) -> &[PartInstance] {
        &self.roots
    }

    /// Children of `parent`, or the top-level parts when `parent` is `None`.
    pub fn children_of(&self, parent: Option<PartId>) -> Option<&[PartInstance]> {
        match parent {
            None => Some(&self.roots),
            Some(id) => self.get(id).map(|node| node.children.as_slice()),
        }
    }

    pub fn get(&self, id: PartId) -> Option<&PartInstance> {
        let path = self.index.get(&id)?;
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get(*first)?;
        for &i in rest {
            node = node.children.get(i)?;
        }
        Some(node)
    }

    fn get_mut(&mut self, id: PartId) -> Option<&mut PartInstance> {
        let path = self.index.get(&id)?;
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get_mut(*first)?;
        for &i in rest {
            node = node.children.get_mut(i)?;
        }
        Some(node)
    }

    pub fn contains(&self, id: PartId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of placed parts, at any depth.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first iterator over every placed part.
    pub fn iter(&self) -> impl Iterator<Item = &PartInstance> {
        self.roots.iter().flat_map(PartInstance::iter)
    }

    /// Largest `PartID` present, if any.
    pub fn max_part_id(&self) -> Option<PartId> {
        self.iter().map(|node| node.part_id).max()
    }

    /// Last ID handed out (or restored). Zero for a fresh tree.
    pub fn last_id(&self) -> u32 {
        self.last_id
    }

    /// ID the next successful attach will receive.
    pub fn next_part_id(&self) -> Option<PartId> {
        PartId(self.last_id).next()
    }

    /// Appends `instance` under `parent` (or at the top level) and commits its ID.
    ///
    /// The caller has validated the parent and taken the ID from
    /// [`Self::next_part_id`]. Returns the instance back if the parent vanished.
    pub(crate) fn append(
        &mut self,
        parent: Option<PartId>,
        instance: PartInstance,
    ) -> Result<PartId, PartInstance> {
        let id = instance.part_id;
        let path = match parent {
            None => {
                self.roots.push(instance);
                vec![self.roots.len() - 1]
            }
            Some(parent_id) => {
                let Some(parent_path) = self.index.get(&parent_id).cloned() else {
                    return Err(instance);
                };
                let Some(parent_node) = self.get_mut(parent_id) else {
                    return Err(instance);
                };
                parent_node.children.push(instance);
                let mut path = parent_path;
                path.push(parent_node.children.len() - 1);
                path
            }
        };
        self.index.insert(id, path);
        self.last_id = self.last_id.max(id.0);
        Ok(id)
    }
}
