//! Per-page editing state.
//!
//! All three block pages share [`PageState`]; the app talks to whichever is
//! active through the object-safe [`PageOps`] so key handling and drawing
//! exist once.

use songweaver_engine::{Block, BlockId, BlockKind, BlockList, BlockValue, Reorder};

use crate::edit::{EditError, Editable, Field};

/// What a card shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: &'static str,
    pub lines: Vec<(&'static str, String)>,
}

#[derive(Debug)]
pub struct PageState<V: BlockValue> {
    pub list: BlockList<V>,
    selected: usize,
    field: usize,
    sidebar: usize,
}

impl<V: Editable> PageState<V> {
    pub fn new(blocks: Vec<Block<V>>) -> Self {
        Self {
            list: BlockList::from_blocks(blocks),
            selected: 0,
            field: 0,
            sidebar: 0,
        }
    }

    fn selected_block(&self) -> Option<&Block<V>> {
        self.list.as_slice().get(self.selected)
    }

    fn clamp(&mut self) {
        self.selected = self.selected.min(self.list.len().saturating_sub(1));
        let fields = self.selected_block().map_or(0, |b| b.value.fields().len());
        self.field = self.field.min(fields.saturating_sub(1));
    }

    /// Apply `edit` to a copy of the selected value and store it
    fn edit_selected(&mut self, edit: impl FnOnce(&mut V) -> bool) -> bool {
        let Some(block) = self.selected_block() else {
            return false;
        };
        let id = block.id.clone();
        let mut value = block.value.clone();
        if !edit(&mut value) {
            return false;
        }
        let changed = self.list.update(&id, value);
        self.clamp();
        changed
    }
}

/// Operations the app performs on the active page
pub trait PageOps {
    fn kind_labels(&self) -> Vec<&'static str>;

    fn sidebar(&self) -> usize;

    fn sidebar_step(&mut self, forward: bool);

    /// Add a block of the highlighted sidebar kind
    fn add_highlighted(&mut self) -> Option<BlockId>;

    fn len(&self) -> usize;

    fn selected(&self) -> Option<usize>;

    fn select(&mut self, index: usize);

    fn select_step(&mut self, forward: bool);

    fn field_index(&self) -> usize;

    fn field_step(&mut self, forward: bool);

    fn current_field(&self) -> Option<Field>;

    fn read_current(&self) -> Option<String>;

    fn write_current(&mut self, field: &Field, input: &str) -> Result<bool, EditError>;

    fn options(&self, field: &Field) -> &'static [&'static str];

    fn selected_options(&self, field: &Field) -> Vec<String>;

    fn toggle_option(&mut self, field: &Field, option: &str) -> bool;

    fn step_current(&mut self, forward: bool) -> bool;

    fn switch_current(&mut self) -> bool;

    fn add_item(&mut self) -> bool;

    fn remove_current_item(&mut self) -> bool;

    /// Move the selected card one place up or down
    fn nudge_selected(&mut self, up: bool) -> bool;

    fn remove_selected(&mut self) -> bool;

    fn id_at(&self, index: usize) -> Option<BlockId>;

    fn cards(&self) -> Vec<Card>;

    fn reorder(&mut self) -> &mut dyn Reorder;
}

impl<V: Editable> PageOps for PageState<V> {
    fn kind_labels(&self) -> Vec<&'static str> {
        V::Kind::ALL.iter().map(|k| k.label()).collect()
    }

    fn sidebar(&self) -> usize {
        self.sidebar
    }

    fn sidebar_step(&mut self, forward: bool) {
        let len = V::Kind::ALL.len();
        self.sidebar = if forward {
            (self.sidebar + 1) % len
        } else {
            (self.sidebar + len - 1) % len
        };
    }

    fn add_highlighted(&mut self) -> Option<BlockId> {
        let kind = *V::Kind::ALL.get(self.sidebar)?;
        let id = if V::UNIQUE_KINDS {
            self.list.add_unique(kind)?
        } else {
            self.list.add(kind)
        };
        self.selected = self.list.len() - 1;
        self.field = 0;
        Some(id)
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn selected(&self) -> Option<usize> {
        (!self.list.is_empty()).then_some(self.selected)
    }

    fn select(&mut self, index: usize) {
        if index != self.selected {
            self.field = 0;
        }
        self.selected = index;
        self.clamp();
    }

    fn select_step(&mut self, forward: bool) {
        if self.list.is_empty() {
            return;
        }
        let next = if forward {
            (self.selected + 1).min(self.list.len() - 1)
        } else {
            self.selected.saturating_sub(1)
        };
        self.select(next);
    }

    fn field_index(&self) -> usize {
        self.field
    }

    fn field_step(&mut self, forward: bool) {
        let fields = self.selected_block().map_or(0, |b| b.value.fields().len());
        if fields == 0 {
            return;
        }
        self.field = if forward {
            (self.field + 1) % fields
        } else {
            (self.field + fields - 1) % fields
        };
    }

    fn current_field(&self) -> Option<Field> {
        self.selected_block()?.value.fields().into_iter().nth(self.field)
    }

    fn read_current(&self) -> Option<String> {
        let field = self.current_field()?;
        Some(self.selected_block()?.value.read(&field))
    }

    fn write_current(&mut self, field: &Field, input: &str) -> Result<bool, EditError> {
        let Some(block) = self.selected_block() else {
            return Ok(false);
        };
        let mut value = block.value.clone();
        value.write(field, input)?;
        let id = block.id.clone();
        Ok(self.list.update(&id, value))
    }

    fn options(&self, field: &Field) -> &'static [&'static str] {
        match self.selected_block() {
            Some(block) => block.value.options(field),
            None => &[],
        }
    }

    fn selected_options(&self, field: &Field) -> Vec<String> {
        self.selected_block()
            .map(|b| b.value.selected_options(field).to_vec())
            .unwrap_or_default()
    }

    fn toggle_option(&mut self, field: &Field, option: &str) -> bool {
        self.edit_selected(|v| v.toggle_option(field, option))
    }

    fn step_current(&mut self, forward: bool) -> bool {
        let Some(field) = self.current_field() else {
            return false;
        };
        self.edit_selected(|v| v.step(&field, forward))
    }

    fn switch_current(&mut self) -> bool {
        let Some(field) = self.current_field() else {
            return false;
        };
        self.edit_selected(|v| v.switch(&field))
    }

    fn add_item(&mut self) -> bool {
        let added = self.edit_selected(|v| v.add_item());
        if added {
            // Focus the first field of the new item
            let fields = self.selected_block().map_or(Vec::new(), |b| b.value.fields());
            let new_item = fields.last().and_then(|f| f.item_id().map(str::to_string));
            self.field = fields
                .iter()
                .position(|f| f.item_id() == new_item.as_deref())
                .unwrap_or(0);
        }
        added
    }

    fn remove_current_item(&mut self) -> bool {
        let Some(item_id) = self
            .current_field()
            .and_then(|f| f.item_id().map(str::to_string))
        else {
            return false;
        };
        self.edit_selected(|v| v.remove_item(&item_id))
    }

    fn nudge_selected(&mut self, up: bool) -> bool {
        let Some(from) = self.selected() else {
            return false;
        };
        let to = if up {
            from.checked_sub(1)
        } else {
            Some(from + 1).filter(|&i| i < self.list.len())
        };
        let Some(to) = to else {
            return false;
        };
        if self.list.move_block(from, to) {
            self.selected = to;
            return true;
        }
        false
    }

    fn remove_selected(&mut self) -> bool {
        let Some(id) = self.selected_block().map(|b| b.id.clone()) else {
            return false;
        };
        let removed = self.list.remove(&id);
        self.clamp();
        removed
    }

    fn id_at(&self, index: usize) -> Option<BlockId> {
        self.list.as_slice().get(index).map(|b| b.id.clone())
    }

    fn cards(&self) -> Vec<Card> {
        self.list
            .iter()
            .map(|block| Card {
                title: block.kind().label(),
                lines: block
                    .value
                    .fields()
                    .iter()
                    .map(|f| (f.label(), block.value.read(f)))
                    .collect(),
            })
            .collect()
    }

    fn reorder(&mut self) -> &mut dyn Reorder {
        &mut self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use songweaver_engine::{AlbumValue, BioValue, PromptKind, PromptValue, starter_album};

    fn prompt_page() -> PageState<PromptValue> {
        PageState::new(Vec::new())
    }

    #[test]
    fn test_add_from_sidebar_selects_new_card() {
        let mut page = prompt_page();
        page.sidebar_step(true);
        page.add_highlighted();
        page.sidebar_step(false);
        page.add_highlighted();

        assert_eq!(page.len(), 2);
        assert_eq!(page.selected(), Some(1));
        assert_eq!(page.cards()[0].title, "Lyrics");
        assert_eq!(page.cards()[1].title, "Structure");
    }

    #[test]
    fn test_album_page_refuses_second_header() {
        let mut page: PageState<AlbumValue> = PageState::new(starter_album("", ""));

        assert!(page.add_highlighted().is_none());
        assert_eq!(page.len(), 2);
    }

    #[test]
    fn test_nudge_moves_and_follows_selection() {
        let mut page = prompt_page();
        for _ in 0..3 {
            page.add_highlighted();
        }
        page.select(2);

        assert!(page.nudge_selected(true));
        assert_eq!(page.selected(), Some(1));
        assert!(page.nudge_selected(true));
        assert!(!page.nudge_selected(true));
        assert_eq!(page.selected(), Some(0));
    }

    #[test]
    fn test_remove_keeps_selection_in_range() {
        let mut page = prompt_page();
        page.add_highlighted();
        page.add_highlighted();

        assert!(page.remove_selected());
        assert_eq!(page.selected(), Some(0));
        assert!(page.remove_selected());
        assert_eq!(page.selected(), None);
        assert!(!page.remove_selected());
    }

    #[test]
    fn test_write_and_step_current_field() {
        let mut page = prompt_page();
        while page.kind_labels()[page.sidebar()] != PromptKind::Tempo.label() {
            page.sidebar_step(true);
        }
        page.add_highlighted();

        let field = page.current_field().unwrap();
        assert!(page.write_current(&field, "100").unwrap());
        page.step_current(true);

        assert_eq!(page.read_current().as_deref(), Some("101"));
    }

    #[test]
    fn test_links_item_lifecycle() {
        let mut page: PageState<BioValue> = PageState::new(Vec::new());
        while page.kind_labels()[page.sidebar()] != "Links" {
            page.sidebar_step(true);
        }
        page.add_highlighted();

        assert!(page.add_item());
        assert!(page.add_item());
        assert_eq!(page.field_index(), 2);
        assert_eq!(page.cards()[0].lines.len(), 4);

        assert!(page.remove_current_item());
        assert_eq!(page.cards()[0].lines.len(), 2);
        assert_eq!(page.field_index(), 1);
    }
}
