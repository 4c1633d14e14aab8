//! Column arena with free-list slot reuse.
//!
//! Columns are addressed by [`ColumnId`] handles that stay stable while the
//! board splits and merges its node map. Released slots go to a free list
//! and are handed out again by the next insert.

use crate::column::Column;

/// Stable handle to a column slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(u32);

impl ColumnId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Default)]
pub struct ColumnArena {
    slots: Vec<Option<Column>>,
    free_list: Vec<ColumnId>,
    live: usize,
}

impl ColumnArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: Column) -> ColumnId {
        self.live += 1;
        if let Some(id) = self.free_list.pop() {
            self.slots[id.index()] = Some(column);
            return id;
        }
        let id = ColumnId(self.slots.len() as u32);
        self.slots.push(Some(column));
        id
    }

    pub fn remove(&mut self, id: ColumnId) -> Option<Column> {
        let column = self.slots.get_mut(id.index())?.take()?;
        self.live -= 1;
        self.free_list.push(id);
        Some(column)
    }

    /// Column behind a live handle
    ///
    /// Panics on a released handle; handles never outlive a placement call.
    #[inline(always)]
    pub fn get(&self, id: ColumnId) -> &Column {
        match &self.slots[id.index()] {
            Some(column) => column,
            None => panic!("column slot {} was released", id.index()),
        }
    }

    #[inline(always)]
    pub fn get_mut(&mut self, id: ColumnId) -> &mut Column {
        match &mut self.slots[id.index()] {
            Some(column) => column,
            None => panic!("column slot {} was released", id.index()),
        }
    }

    pub fn contains(&self, id: ColumnId) -> bool {
        matches!(self.slots.get(id.index()), Some(Some(_)))
    }

    /// Number of live columns
    pub fn len(&self) -> usize {
        self.live
    }
}
