use alloc::vec::Vec;
use core::ops::Range;

use sectioned::{LayoutId, Result, SectionedAdapter, ViewType};

use crate::{HolderPool, SectionAnchor, capture_anchor, resolve_anchor};

/// A row currently realized by a [`Controller`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Realized<H> {
    pub position: usize,
    pub view_type: ViewType,
    pub holder: H,
}

/// A framework-neutral controller that wraps a `sectioned::SectionedAdapter` and plays the
/// part of a recycling list surface.
///
/// This type does not hold any UI objects beyond the host's holders. Adapters drive it by
/// calling `render(range, inflate)` whenever the visible range or the data changes. Rows that
/// stay on screen keep their holders; rows that leave it are recycled by view type before new
/// holders are inflated.
#[derive(Debug)]
pub struct Controller<H> {
    adapter: SectionedAdapter<H>,
    pool: HolderPool<H>,
    realized: Vec<Realized<H>>,
    created: usize,
}

impl<H> Default for Controller<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Controller<H> {
    pub fn new() -> Self {
        Self::from_adapter(SectionedAdapter::new())
    }

    pub fn from_adapter(adapter: SectionedAdapter<H>) -> Self {
        Self {
            adapter,
            pool: HolderPool::new(),
            realized: Vec::new(),
            created: 0,
        }
    }

    pub fn adapter(&self) -> &SectionedAdapter<H> {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut SectionedAdapter<H> {
        &mut self.adapter
    }

    pub fn into_adapter(self) -> SectionedAdapter<H> {
        self.adapter
    }

    pub fn pool(&self) -> &HolderPool<H> {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut HolderPool<H> {
        &mut self.pool
    }

    /// Rows bound by the last `render`, in flat order.
    pub fn realized(&self) -> &[Realized<H>] {
        &self.realized
    }

    /// Number of holders inflated so far.
    pub fn holders_created(&self) -> usize {
        self.created
    }

    /// Detaches every realized row into the pool.
    pub fn recycle_all(&mut self) {
        for row in self.realized.drain(..) {
            self.pool.put(row.view_type, row.holder);
        }
    }

    /// Realizes the rows in `range` (clamped to the item count).
    ///
    /// Rows already realized at a position that stays in range with the same view type keep
    /// their holder. Every other row reuses a pooled holder of its view type when one exists
    /// and otherwise inflates a new one. All rows are rebound. Pooled holders of removed
    /// sections are dropped.
    pub fn render(
        &mut self,
        range: Range<usize>,
        mut inflate: impl FnMut(LayoutId) -> H,
    ) -> Result<()> {
        let end = range.end.min(self.adapter.item_count());
        let start = range.start.min(end);

        let mut kept = Vec::with_capacity(self.realized.len());
        for row in self.realized.drain(..) {
            let stays = (start..end).contains(&row.position)
                && self.adapter.view_type(row.position).ok() == Some(row.view_type);
            if stays {
                kept.push(row);
            } else {
                self.pool.put(row.view_type, row.holder);
            }
        }
        let adapter = &self.adapter;
        self.pool
            .retain(|view_type| adapter.decode_view_type(view_type).is_ok());

        let mut kept = kept.into_iter().peekable();
        for position in start..end {
            let view_type = self.adapter.view_type(position)?;
            let mut holder = match kept.next_if(|row| row.position == position) {
                Some(row) => row.holder,
                None => match self.pool.take(view_type) {
                    Some(holder) => holder,
                    None => {
                        let holder = self.adapter.create_holder(view_type, &mut inflate)?;
                        self.created += 1;
                        holder
                    }
                },
            };
            self.adapter.bind(position, &mut holder)?;
            self.realized.push(Realized {
                position,
                view_type,
                holder,
            });
        }
        adebug!(
            start,
            end,
            created = self.created,
            pooled = self.pool.len(),
            "Controller::render"
        );
        Ok(())
    }

    pub fn capture_anchor(&self, position: usize) -> Option<SectionAnchor> {
        capture_anchor(&self.adapter, position)
    }

    pub fn resolve_anchor(&self, anchor: &SectionAnchor) -> Option<usize> {
        resolve_anchor(&self.adapter, anchor)
    }
}
