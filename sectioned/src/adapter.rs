use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use crate::section::{Section, SectionExt};
use crate::{
    Change, ContentKind, Error, LayoutId, ResolvedPosition, Result, Role, SectionSnapshot, Slot,
    ViewType,
};

/// A callback fired for every change notification the rendering surface must receive.
pub type OnChangeCallback = Arc<dyn Fn(Change) + Send + Sync>;

struct Entry<H> {
    key: String,
    view_type_base: ViewType,
    section: Box<dyn Section<H>>,
}

#[derive(Clone, Copy, Debug)]
struct Located {
    index: usize,
    start: usize,
    offset: usize,
    role: Role,
}

fn role_at<H>(section: &dyn Section<H>, offset: usize, span: usize) -> Role {
    if section.has_header() && offset == 0 {
        Role::Header
    } else if section.has_footer() && offset + 1 == span {
        Role::Footer
    } else {
        Role::Content(ContentKind::from(section.state()))
    }
}

/// Composes independently configured sections into one flat list.
///
/// This type is UI-agnostic:
/// - It owns the sections, keyed by a caller-chosen string and kept in registration order.
/// - Every query linearizes the visible sections on demand; nothing is cached, so section
///   mutations take effect immediately.
/// - The rendering surface is kept in sync through the `on_change` callback.
///
/// Holders are of the host's type `H`; the adapter never creates them on its own and only
/// calls the inflater passed to [`SectionedAdapter::create_holder`].
///
/// All access is expected to happen on a single (UI) thread.
pub struct SectionedAdapter<H> {
    entries: Vec<Entry<H>>,
    next_view_type: ViewType,
    next_auto_key: u64,
    on_change: Option<OnChangeCallback>,
    notify_depth: usize,
    notify_pending: bool,
}

impl<H> Default for SectionedAdapter<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for SectionedAdapter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.entries.iter().map(|e| e.key.as_str()).collect();
        f.debug_struct("SectionedAdapter")
            .field("keys", &keys)
            .field("next_view_type", &self.next_view_type)
            .field("notify_depth", &self.notify_depth)
            .finish_non_exhaustive()
    }
}

impl<H> SectionedAdapter<H> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_view_type: 0,
            next_auto_key: 0,
            on_change: None,
            notify_depth: 0,
            notify_pending: false,
        }
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(Change) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn set_on_change(&mut self, on_change: Option<impl Fn(Change) + Send + Sync + 'static>) {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self, change: Change) {
        if let Some(cb) = &self.on_change {
            cb(change);
        }
    }

    fn notify(&mut self, change: Change) {
        if self.notify_depth > 0 {
            self.notify_pending = true;
            return;
        }
        self.notify_now(change);
    }

    /// Batches several mutations into a single `DataSetChanged` notification.
    ///
    /// Any notification raised inside `f` (narrow or not) is coalesced. Nothing is emitted if
    /// `f` raised none. Returns whatever `f` returns.
    pub fn batch_update<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.notify_depth = self.notify_depth.saturating_add(1);

        let out = f(self);

        debug_assert!(self.notify_depth > 0, "notify_depth underflow");
        self.notify_depth = self.notify_depth.saturating_sub(1);

        if self.notify_depth == 0 && core::mem::take(&mut self.notify_pending) {
            self.notify_now(Change::DataSetChanged);
        }
        out
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    fn entry(&self, key: &str) -> Result<&Entry<H>> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .ok_or_else(|| Error::NotFound(key.into()))
    }

    fn entry_mut(&mut self, key: &str) -> Result<&mut Entry<H>> {
        self.entries
            .iter_mut()
            .find(|e| e.key == key)
            .ok_or_else(|| Error::NotFound(key.into()))
    }

    fn insert_entry(&mut self, key: String, section: Box<dyn Section<H>>) -> Result<()> {
        let view_type_base = self.next_view_type;
        let Some(next) = view_type_base.checked_add(Slot::COUNT) else {
            swarn!(key = %key, "add_section: view types exhausted");
            return Err(Error::ViewTypesExhausted);
        };
        self.next_view_type = next;
        sdebug!(key = %key, view_type_base, "add_section");
        self.entries.push(Entry {
            key,
            view_type_base,
            section,
        });
        self.notify(Change::DataSetChanged);
        Ok(())
    }

    /// Appends a section under `key`.
    ///
    /// Fails with [`Error::DuplicateKey`] (leaving the adapter unchanged) if `key` is taken, and
    /// with [`Error::ViewTypesExhausted`] once the view type space is used up.
    pub fn add_section(
        &mut self,
        key: impl Into<String>,
        section: impl Section<H> + 'static,
    ) -> Result<()> {
        self.add_boxed_section(key, Box::new(section))
    }

    pub fn add_boxed_section(
        &mut self,
        key: impl Into<String>,
        section: Box<dyn Section<H>>,
    ) -> Result<()> {
        let key = key.into();
        if self.index_of(&key).is_some() {
            swarn!(key = %key, "add_section: duplicate key");
            return Err(Error::DuplicateKey(key));
        }
        self.insert_entry(key, section)
    }

    /// Appends a section under a generated key and returns that key.
    pub fn push_section(&mut self, section: impl Section<H> + 'static) -> Result<String> {
        let key = loop {
            let candidate = format!("section-{}", self.next_auto_key);
            self.next_auto_key = self.next_auto_key.wrapping_add(1);
            if self.index_of(&candidate).is_none() {
                break candidate;
            }
        };
        self.insert_entry(key.clone(), Box::new(section))?;
        Ok(key)
    }

    #[cfg(test)]
    pub(crate) fn set_next_view_type(&mut self, next: ViewType) {
        self.next_view_type = next;
    }

    /// Removes and returns the section registered under `key`.
    ///
    /// Its view types are retired and never handed out again.
    pub fn remove_section(&mut self, key: &str) -> Result<Box<dyn Section<H>>> {
        let Some(index) = self.index_of(key) else {
            swarn!(key, "remove_section: unknown key");
            return Err(Error::NotFound(key.into()));
        };
        let entry = self.entries.remove(index);
        sdebug!(key, "remove_section");
        self.notify(Change::DataSetChanged);
        Ok(entry.section)
    }

    pub fn remove_all_sections(&mut self) {
        sdebug!(count = self.entries.len(), "remove_all_sections");
        self.entries.clear();
        self.notify(Change::DataSetChanged);
    }

    pub fn section(&self, key: &str) -> Result<&dyn Section<H>> {
        Ok(self.entry(key)?.section.as_ref())
    }

    /// Mutable access to a section. Changes made through it are not observed; call one of the
    /// `notify_*` methods afterwards.
    pub fn section_mut(&mut self, key: &str) -> Result<&mut dyn Section<H>> {
        Ok(self.entry_mut(key)?.section.as_mut())
    }

    pub fn contains_section(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// Number of registered sections, hidden ones included.
    pub fn section_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn set_section_state(&mut self, key: &str, state: crate::State) -> Result<()> {
        self.entry_mut(key)?.section.set_state(state);
        self.notify(Change::DataSetChanged);
        Ok(())
    }

    pub fn set_section_visible(&mut self, key: &str, visible: bool) -> Result<()> {
        self.entry_mut(key)?.section.set_visible(visible);
        self.notify(Change::DataSetChanged);
        Ok(())
    }

    pub fn set_section_has_header(&mut self, key: &str, has_header: bool) -> Result<()> {
        self.entry_mut(key)?.section.set_has_header(has_header);
        self.notify(Change::DataSetChanged);
        Ok(())
    }

    pub fn set_section_has_footer(&mut self, key: &str, has_footer: bool) -> Result<()> {
        self.entry_mut(key)?.section.set_has_footer(has_footer);
        self.notify(Change::DataSetChanged);
        Ok(())
    }

    /// Total number of rows across all visible sections.
    pub fn item_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.section.is_visible())
            .map(|e| e.section.section_items_total())
            .sum()
    }

    fn locate(&self, position: usize) -> Result<Located> {
        let mut start = 0usize;
        for (index, entry) in self.entries.iter().enumerate() {
            let section = entry.section.as_ref();
            if !section.is_visible() {
                continue;
            }
            let span = section.section_items_total();
            if position < start + span {
                let offset = position - start;
                return Ok(Located {
                    index,
                    start,
                    offset,
                    role: role_at(section, offset, span),
                });
            }
            start += span;
        }
        swarn!(position, count = start, "position out of range");
        Err(Error::OutOfRange {
            position,
            count: start,
        })
    }

    /// Translates a flat position into its section, role and offset.
    ///
    /// Within a section the order is fixed: header (if shown), then content or the single
    /// placeholder, then footer (if shown).
    pub fn resolve(&self, position: usize) -> Result<ResolvedPosition<'_>> {
        let loc = self.locate(position)?;
        let entry = &self.entries[loc.index];
        strace!(position, key = %entry.key, offset = loc.offset, "resolve");
        Ok(ResolvedPosition {
            section_index: loc.index,
            key: &entry.key,
            section_start: loc.start,
            offset: loc.offset,
            role: loc.role,
            has_header: entry.section.has_header(),
        })
    }

    pub fn section_for_position(&self, position: usize) -> Result<&dyn Section<H>> {
        let loc = self.locate(position)?;
        Ok(self.entries[loc.index].section.as_ref())
    }

    /// Returns the view type of the row at `position`.
    ///
    /// Each registration reserves [`Slot::COUNT`] consecutive view types, so rows of different
    /// sections never share a recycling pool even if their layouts are identical.
    pub fn view_type(&self, position: usize) -> Result<ViewType> {
        let loc = self.locate(position)?;
        Ok(self.entries[loc.index].view_type_base + Slot::from(loc.role).offset())
    }

    fn find_view_type(&self, view_type: ViewType) -> Result<(usize, Slot)> {
        for (index, entry) in self.entries.iter().enumerate() {
            let base = entry.view_type_base;
            if view_type >= base && view_type - base < Slot::COUNT {
                if let Some(slot) = Slot::from_offset(view_type - base) {
                    return Ok((index, slot));
                }
            }
        }
        swarn!(view_type, "unknown view type");
        Err(Error::UnknownViewType(view_type))
    }

    /// Maps a view type back to the owning section's key and the slot it stands for.
    pub fn decode_view_type(&self, view_type: ViewType) -> Result<(&str, Slot)> {
        let (index, slot) = self.find_view_type(view_type)?;
        Ok((&self.entries[index].key, slot))
    }

    /// Creates a holder for `view_type`.
    ///
    /// `inflate` is called once with the slot's layout; its result goes through the section's
    /// holder hook for that slot. Fails with [`Error::MissingLayout`] if the section was
    /// configured without a layout for the slot.
    pub fn create_holder(
        &self,
        view_type: ViewType,
        inflate: impl FnOnce(LayoutId) -> H,
    ) -> Result<H> {
        let (index, slot) = self.find_view_type(view_type)?;
        let entry = &self.entries[index];
        let Some(layout) = entry.section.layouts().get(slot) else {
            swarn!(key = %entry.key, slot = slot.name(), "create_holder: missing layout");
            return Err(Error::MissingLayout {
                key: entry.key.clone(),
                slot,
            });
        };
        strace!(view_type, layout, "create_holder");
        Ok(entry.section.make_holder(slot, inflate(layout)))
    }

    /// Binds the row at `position` by dispatching to the owning section's hook for its role.
    pub fn bind(&mut self, position: usize, holder: &mut H) -> Result<()> {
        let loc = self.locate(position)?;
        let section = self.entries[loc.index].section.as_mut();
        match loc.role {
            Role::Header => section.bind_header(holder),
            Role::Footer => section.bind_footer(holder),
            Role::Content(_) => {
                let index = loc.offset - usize::from(section.has_header());
                section.bind_content(holder, index);
            }
        }
        Ok(())
    }

    /// Visits every flat position in order, in a single pass over the sections.
    pub fn for_each_position<'a>(&'a self, mut f: impl FnMut(ResolvedPosition<'a>)) {
        let mut start = 0usize;
        for (index, entry) in self.entries.iter().enumerate() {
            let section = entry.section.as_ref();
            if !section.is_visible() {
                continue;
            }
            let span = section.section_items_total();
            let has_header = section.has_header();
            for offset in 0..span {
                f(ResolvedPosition {
                    section_index: index,
                    key: &entry.key,
                    section_start: start,
                    offset,
                    role: role_at(section, offset, span),
                    has_header,
                });
            }
            start += span;
        }
    }

    /// Visits the flat span of every visible section in order. Empty spans are included.
    pub fn for_each_section_range<'a>(&'a self, mut f: impl FnMut(&'a str, Range<usize>)) {
        let mut start = 0usize;
        for entry in &self.entries {
            if !entry.section.is_visible() {
                continue;
            }
            let end = start + entry.section.section_items_total();
            f(&entry.key, start..end);
            start = end;
        }
    }

    /// Flat span of a visible section.
    pub fn section_range(&self, key: &str) -> Result<Range<usize>> {
        let mut start = 0usize;
        for entry in &self.entries {
            let visible = entry.section.is_visible();
            if entry.key == key {
                if !visible {
                    return Err(Error::Hidden(key.into()));
                }
                return Ok(start..start + entry.section.section_items_total());
            }
            if visible {
                start += entry.section.section_items_total();
            }
        }
        Err(Error::NotFound(key.into()))
    }

    /// Flat position of the first row of a visible section.
    pub fn section_position(&self, key: &str) -> Result<usize> {
        Ok(self.section_range(key)?.start)
    }

    pub fn header_position(&self, key: &str) -> Result<usize> {
        let range = self.section_range(key)?;
        if !self.entry(key)?.section.has_header() {
            return Err(Error::NotShown {
                key: key.into(),
                slot: Slot::Header,
            });
        }
        Ok(range.start)
    }

    pub fn footer_position(&self, key: &str) -> Result<usize> {
        let range = self.section_range(key)?;
        if !self.entry(key)?.section.has_footer() {
            return Err(Error::NotShown {
                key: key.into(),
                slot: Slot::Footer,
            });
        }
        Ok(range.end - 1)
    }

    /// Flat position of content row `position` of a section.
    ///
    /// Pure arithmetic on the section's current start: `position` is not checked against the
    /// content count, so it can describe rows that were just removed.
    pub fn position_in_adapter(&self, key: &str, position: usize) -> Result<usize> {
        let start = self.section_position(key)?;
        let header = usize::from(self.entry(key)?.section.has_header());
        Ok(start + header + position)
    }

    pub fn notify_data_set_changed(&mut self) {
        self.notify(Change::DataSetChanged);
    }

    /// Notifies that every row of a section changed in place.
    pub fn notify_section_changed(&mut self, key: &str) -> Result<()> {
        let range = self.section_range(key)?;
        self.notify(Change::ItemRangeChanged {
            start: range.start,
            count: range.len(),
        });
        Ok(())
    }

    pub fn notify_item_inserted_in_section(&mut self, key: &str, position: usize) -> Result<()> {
        self.notify_item_range_inserted_in_section(key, position, 1)
    }

    pub fn notify_item_range_inserted_in_section(
        &mut self,
        key: &str,
        position: usize,
        count: usize,
    ) -> Result<()> {
        let start = self.position_in_adapter(key, position)?;
        self.notify(Change::ItemRangeInserted { start, count });
        Ok(())
    }

    pub fn notify_item_removed_in_section(&mut self, key: &str, position: usize) -> Result<()> {
        self.notify_item_range_removed_in_section(key, position, 1)
    }

    pub fn notify_item_range_removed_in_section(
        &mut self,
        key: &str,
        position: usize,
        count: usize,
    ) -> Result<()> {
        let start = self.position_in_adapter(key, position)?;
        self.notify(Change::ItemRangeRemoved { start, count });
        Ok(())
    }

    pub fn notify_item_changed_in_section(&mut self, key: &str, position: usize) -> Result<()> {
        self.notify_item_range_changed_in_section(key, position, 1)
    }

    pub fn notify_item_range_changed_in_section(
        &mut self,
        key: &str,
        position: usize,
        count: usize,
    ) -> Result<()> {
        let start = self.position_in_adapter(key, position)?;
        self.notify(Change::ItemRangeChanged { start, count });
        Ok(())
    }

    pub fn notify_item_moved_in_section(
        &mut self,
        key: &str,
        from_position: usize,
        to_position: usize,
    ) -> Result<()> {
        let from = self.position_in_adapter(key, from_position)?;
        let to = self.position_in_adapter(key, to_position)?;
        self.notify(Change::ItemMoved { from, to });
        Ok(())
    }

    pub fn notify_header_changed_in_section(&mut self, key: &str) -> Result<()> {
        let start = self.header_position(key)?;
        self.notify(Change::ItemRangeChanged { start, count: 1 });
        Ok(())
    }

    pub fn notify_footer_changed_in_section(&mut self, key: &str) -> Result<()> {
        let start = self.footer_position(key)?;
        self.notify(Change::ItemRangeChanged { start, count: 1 });
        Ok(())
    }

    /// Captures the runtime flags of every section, in registration order.
    pub fn snapshot(&self) -> Vec<SectionSnapshot> {
        self.entries
            .iter()
            .map(|e| SectionSnapshot {
                key: e.key.clone(),
                state: e.section.state(),
                visible: e.section.is_visible(),
                has_header: e.section.has_header(),
                has_footer: e.section.has_footer(),
            })
            .collect()
    }

    /// Applies previously captured flags to the sections whose keys match.
    ///
    /// Unknown keys are skipped. Returns the number of sections updated; a single
    /// `DataSetChanged` is emitted if it is non-zero.
    pub fn restore(&mut self, snapshot: &[SectionSnapshot]) -> usize {
        let mut applied = 0usize;
        for snap in snapshot {
            let Ok(entry) = self.entry_mut(&snap.key) else {
                continue;
            };
            let props = entry.section.props_mut();
            props.set_state(snap.state);
            props.set_visible(snap.visible);
            props.set_has_header(snap.has_header);
            props.set_has_footer(snap.has_footer);
            applied += 1;
        }
        sdebug!(applied, total = snapshot.len(), "restore");
        if applied > 0 {
            self.notify(Change::DataSetChanged);
        }
        applied
    }
}
