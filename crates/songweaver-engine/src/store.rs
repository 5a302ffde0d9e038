//! Ordered block list with snapshot semantics.
//!
//! Every mutation installs a new `Arc<[Block<V>]>`. A caller that took a
//! [`BlockList::snapshot`] before the mutation keeps seeing the old order and
//! values, so snapshots can be handed to renderers and exporters as
//! immutable views.

use std::sync::Arc;

use crate::blocks::{Block, BlockId, BlockKind, BlockValue};
use crate::drag::Reorder;

#[derive(Debug, Clone)]
pub struct BlockList<V> {
    blocks: Arc<[Block<V>]>,
}

impl<V: BlockValue> Default for BlockList<V> {
    fn default() -> Self {
        Self {
            blocks: Arc::from(Vec::new()),
        }
    }
}

impl<V: BlockValue> BlockList<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block<V>>) -> Self {
        Self {
            blocks: Arc::from(blocks),
        }
    }

    /// Immutable view of the current order
    pub fn snapshot(&self) -> Arc<[Block<V>]> {
        Arc::clone(&self.blocks)
    }

    pub fn as_slice(&self) -> &[Block<V>] {
        &self.blocks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block<V>> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block<V>> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    pub fn contains_kind(&self, kind: V::Kind) -> bool {
        self.blocks.iter().any(|b| b.kind() == kind)
    }

    /// Append a block of `kind` with its default value
    pub fn add(&mut self, kind: V::Kind) -> BlockId {
        let block = Block::new(kind);
        let id = block.id.clone();
        log::debug!("add {} block {id}", kind.label());
        self.install(|blocks| blocks.push(block));
        id
    }

    /// Append `kind` unless the list already holds one
    pub fn add_unique(&mut self, kind: V::Kind) -> Option<BlockId> {
        if self.contains_kind(kind) {
            log::debug!("refusing second {} block", kind.label());
            return None;
        }
        Some(self.add(kind))
    }

    /// Replace the value of block `id`.
    ///
    /// Returns `false` when no block matches, or when `value` is of a
    /// different kind than the block (a block never changes type).
    pub fn update(&mut self, id: &BlockId, value: V) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if self.blocks[index].kind() != value.kind() {
            log::warn!(
                "ignoring {} value for {} block {id}",
                value.kind().label(),
                self.blocks[index].kind().label()
            );
            return false;
        }

        self.install(|blocks| blocks[index].value = value);
        true
    }

    pub fn remove(&mut self, id: &BlockId) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        log::debug!("remove block {id}");
        self.install(|blocks| blocks.retain(|b| &b.id != id));
        true
    }

    /// Splice the block at `from` out and back in at `to`.
    ///
    /// Both indices must be valid for the current length; anything else is a
    /// caller error and leaves the list untouched.
    pub fn move_block(&mut self, from: usize, to: usize) -> bool {
        let len = self.len();
        if from >= len || to >= len {
            log::warn!("ignoring move {from} -> {to} in list of {len}");
            return false;
        }
        if from == to {
            return true;
        }

        self.install(|blocks| {
            let block = blocks.remove(from);
            blocks.insert(to, block);
        });
        true
    }

    pub fn replace_all(&mut self, blocks: Vec<Block<V>>) {
        log::debug!("replacing list with {} blocks", blocks.len());
        self.blocks = Arc::from(blocks);
    }

    pub fn clear(&mut self) {
        self.replace_all(Vec::new());
    }

    fn install(&mut self, edit: impl FnOnce(&mut Vec<Block<V>>)) {
        let mut blocks = self.blocks.to_vec();
        edit(&mut blocks);
        self.blocks = Arc::from(blocks);
    }
}

impl<V: BlockValue> Reorder for BlockList<V> {
    fn len(&self) -> usize {
        BlockList::len(self)
    }

    fn move_block(&mut self, from: usize, to: usize) -> bool {
        BlockList::move_block(self, from, to)
    }
}
