//! Drag-to-reorder controller.
//!
//! One gesture runs idle -> dragging -> (hover)* -> idle. While dragging,
//! each hover over another card is tested against that card's vertical
//! midpoint: a card below the dragged one only swaps once the pointer is in
//! its lower half, a card above only once the pointer is in its upper half.
//! This keeps a swap from immediately undoing itself while the pointer is
//! still over the card that just moved.

use crate::blocks::BlockId;

/// Anything the controller can reorder
pub trait Reorder {
    fn len(&self) -> usize;

    fn move_block(&mut self, from: usize, to: usize) -> bool;
}

/// Vertical extent of a rendered card, in any consistent unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardBounds {
    pub top: f32,
    pub bottom: f32,
}

impl CardBounds {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    fn half_height(&self) -> f32 {
        (self.bottom - self.top) / 2.0
    }
}

/// The card being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragItem {
    pub id: BlockId,
    /// Current position of the dragged block; follows every applied move
    pub index: usize,
}

/// A move the controller applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reordered {
    pub from: usize,
    pub to: usize,
}

/// Decide whether hovering `hover_index` at `pointer_y` should move the
/// block currently at `drag_index`.
pub fn should_swap(
    drag_index: usize,
    hover_index: usize,
    bounds: CardBounds,
    pointer_y: f32,
) -> bool {
    if drag_index == hover_index {
        return false;
    }

    let hover_middle = bounds.half_height();
    let hover_offset = pointer_y - bounds.top;

    // Dragging downwards: wait for the lower half
    if drag_index < hover_index && hover_offset < hover_middle {
        return false;
    }
    // Dragging upwards: wait for the upper half
    if drag_index > hover_index && hover_offset > hover_middle {
        return false;
    }
    true
}

#[derive(Debug, Default)]
pub struct DragController {
    item: Option<DragItem>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, id: BlockId, index: usize) {
        log::debug!("drag start {id} at {index}");
        self.item = Some(DragItem { id, index });
    }

    pub fn is_dragging(&self) -> bool {
        self.item.is_some()
    }

    pub fn item(&self) -> Option<&DragItem> {
        self.item.as_ref()
    }

    pub fn is_dragging_id(&self, id: &BlockId) -> bool {
        self.item.as_ref().is_some_and(|item| &item.id == id)
    }

    /// Evaluate a hover over the card at `hover_index`.
    ///
    /// `pointer_y` is `None` when the pointer position is unknown, which
    /// never moves anything.
    pub fn hover<R: Reorder + ?Sized>(
        &mut self,
        list: &mut R,
        hover_index: usize,
        bounds: CardBounds,
        pointer_y: Option<f32>,
    ) -> Option<Reordered> {
        let item = self.item.as_mut()?;
        let pointer_y = pointer_y?;

        if hover_index >= list.len() || !should_swap(item.index, hover_index, bounds, pointer_y) {
            return None;
        }

        let from = item.index;
        if !list.move_block(from, hover_index) {
            return None;
        }
        item.index = hover_index;
        Some(Reordered {
            from,
            to: hover_index,
        })
    }

    /// End the gesture; moves already applied stay applied
    pub fn drop(&mut self) -> Option<DragItem> {
        let item = self.item.take();
        if let Some(item) = &item {
            log::debug!("drag end {} at {}", item.id, item.index);
        }
        item
    }

    pub fn cancel(&mut self) {
        self.item = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Block;
    use crate::blocks::prompt::PromptValue;
    use crate::store::BlockList;
    use pretty_assertions::assert_eq;

    const CARD_HEIGHT: f32 = 40.0;

    fn bounds(index: usize) -> CardBounds {
        let top = index as f32 * CARD_HEIGHT;
        CardBounds::new(top, top + CARD_HEIGHT)
    }

    fn list(n: u32) -> BlockList<PromptValue> {
        BlockList::from_blocks(
            (0..n)
                .map(|i| Block {
                    id: BlockId::from(format!("b{i}")),
                    value: PromptValue::Tempo(i),
                })
                .collect(),
        )
    }

    fn order(list: &BlockList<PromptValue>) -> Vec<u32> {
        list.iter()
            .map(|b| match b.value {
                PromptValue::Tempo(i) => i,
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn test_downward_drag_waits_for_lower_half() {
        let b = bounds(2);
        assert!(!should_swap(1, 2, b, b.top + 5.0));
        assert!(should_swap(1, 2, b, b.top + 25.0));
    }

    #[test]
    fn test_upward_drag_waits_for_upper_half() {
        let b = bounds(1);
        assert!(!should_swap(3, 1, b, b.top + 30.0));
        assert!(should_swap(3, 1, b, b.top + 10.0));
    }

    #[test]
    fn test_hover_over_self_never_swaps() {
        let b = bounds(2);
        assert!(!should_swap(2, 2, b, b.top + 1.0));
        assert!(!should_swap(2, 2, b, b.bottom - 1.0));
    }

    #[test]
    fn test_drag_from_three_to_zero_through_each_card() {
        let mut blocks = list(5);
        let mut drag = DragController::new();
        drag.begin("b3".into(), 3);

        // Pointer travels upwards, entering each card near its top edge
        for target in (0..3).rev() {
            let b = bounds(target);
            drag.hover(&mut blocks, target, b, Some(b.bottom - 1.0));
            drag.hover(&mut blocks, target, b, Some(b.top + 5.0));
        }
        let dropped = drag.drop().unwrap();

        assert_eq!(order(&blocks), vec![3, 0, 1, 2, 4]);
        assert_eq!(dropped.index, 0);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drag_from_three_to_zero_in_one_hover() {
        let mut blocks = list(5);
        let mut drag = DragController::new();
        drag.begin("b3".into(), 3);

        let moved = drag.hover(&mut blocks, 0, bounds(0), Some(2.0));

        assert_eq!(moved, Some(Reordered { from: 3, to: 0 }));
        assert_eq!(order(&blocks), vec![3, 0, 1, 2, 4]);
    }

    #[test]
    fn test_tracked_index_prevents_oscillation() {
        let mut blocks = list(3);
        let mut drag = DragController::new();
        drag.begin("b0".into(), 0);

        let b = bounds(1);
        assert!(drag.hover(&mut blocks, 1, b, Some(b.top + 30.0)).is_some());
        // The dragged block now sits at 1; hovering the same card again is a no-op
        assert!(drag.hover(&mut blocks, 1, b, Some(b.top + 35.0)).is_none());
        assert_eq!(order(&blocks), vec![1, 0, 2]);
        assert_eq!(drag.item().unwrap().index, 1);
    }

    #[test]
    fn test_hover_without_pointer_or_drag_is_ignored() {
        let mut blocks = list(3);
        let mut drag = DragController::new();

        assert!(drag.hover(&mut blocks, 1, bounds(1), Some(50.0)).is_none());

        drag.begin("b0".into(), 0);
        assert!(drag.hover(&mut blocks, 2, bounds(2), None).is_none());
        assert_eq!(order(&blocks), vec![0, 1, 2]);
    }

    #[test]
    fn test_cancel_keeps_applied_moves() {
        let mut blocks = list(3);
        let mut drag = DragController::new();
        drag.begin("b2".into(), 2);
        drag.hover(&mut blocks, 1, bounds(1), Some(41.0));
        drag.cancel();

        assert_eq!(order(&blocks), vec![0, 2, 1]);
        assert!(drag.drop().is_none());
    }
}
