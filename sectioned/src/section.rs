use crate::{ContentKind, LayoutId, Slot, State};

/// Layout templates of a section.
///
/// Only the item layout is required. Header and footer presence is derived from whether their
/// layouts are set; the loading/failed layouts are only needed if the section ever enters
/// those states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionLayouts {
    pub item: LayoutId,
    pub header: Option<LayoutId>,
    pub footer: Option<LayoutId>,
    pub loading: Option<LayoutId>,
    pub failed: Option<LayoutId>,
}

impl SectionLayouts {
    pub fn new(item: LayoutId) -> Self {
        Self {
            item,
            header: None,
            footer: None,
            loading: None,
            failed: None,
        }
    }

    pub fn with_header(mut self, header: LayoutId) -> Self {
        self.header = Some(header);
        self
    }

    pub fn with_footer(mut self, footer: LayoutId) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn with_loading(mut self, loading: LayoutId) -> Self {
        self.loading = Some(loading);
        self
    }

    pub fn with_failed(mut self, failed: LayoutId) -> Self {
        self.failed = Some(failed);
        self
    }

    /// Returns the layout configured for `slot`, if any.
    pub fn get(&self, slot: Slot) -> Option<LayoutId> {
        match slot {
            Slot::Item => Some(self.item),
            Slot::Header => self.header,
            Slot::Footer => self.footer,
            Slot::Loading => self.loading,
            Slot::Failed => self.failed,
        }
    }
}

/// Per-section state: load state, visibility and header/footer presence.
///
/// Every flag is a plain value set by the owner; nothing here transitions on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionProps {
    state: State,
    visible: bool,
    has_header: bool,
    has_footer: bool,
    layouts: SectionLayouts,
}

impl SectionProps {
    /// Creates props in the `Loaded` state, visible, with header/footer presence taken from
    /// `layouts`.
    pub fn new(layouts: SectionLayouts) -> Self {
        Self {
            state: State::Loaded,
            visible: true,
            has_header: layouts.header.is_some(),
            has_footer: layouts.footer.is_some(),
            layouts,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn set_state(&mut self, state: State) {
        self.state = state;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    pub fn set_has_header(&mut self, has_header: bool) {
        self.has_header = has_header;
    }

    pub fn has_footer(&self) -> bool {
        self.has_footer
    }

    pub fn set_has_footer(&mut self, has_footer: bool) {
        self.has_footer = has_footer;
    }

    pub fn layouts(&self) -> &SectionLayouts {
        &self.layouts
    }

    /// Rows taken by content: one placeholder unless loaded.
    pub fn content_span(&self, content_items_total: usize) -> usize {
        match self.state {
            State::Loading | State::Failed => 1,
            State::Loaded => content_items_total,
        }
    }

    /// Rows taken by the whole section: header, content (or placeholder) and footer.
    pub fn section_items_total(&self, content_items_total: usize) -> usize {
        self.content_span(content_items_total)
            + usize::from(self.has_header)
            + usize::from(self.has_footer)
    }
}

/// A section rendered into holders of type `H`.
///
/// Only the content count and item binding are required. The holder hooks receive the freshly
/// inflated view and return the holder to use for it; by default the view itself is the
/// holder. The bind hooks for header, footer and placeholders do nothing by default.
pub trait Section<H> {
    fn props(&self) -> &SectionProps;

    fn props_mut(&mut self) -> &mut SectionProps;

    /// Number of real items. Only consulted while the section is `Loaded`.
    fn content_items_total(&self) -> usize;

    /// Binds the item at `position` (relative to the section's content, not the flat list).
    fn bind_item(&mut self, holder: &mut H, position: usize);

    fn item_holder(&self, view: H) -> H {
        view
    }

    fn header_holder(&self, view: H) -> H {
        view
    }

    fn bind_header(&mut self, _holder: &mut H) {}

    fn footer_holder(&self, view: H) -> H {
        view
    }

    fn bind_footer(&mut self, _holder: &mut H) {}

    fn loading_holder(&self, view: H) -> H {
        view
    }

    fn bind_loading(&mut self, _holder: &mut H) {}

    fn failed_holder(&self, view: H) -> H {
        view
    }

    fn bind_failed(&mut self, _holder: &mut H) {}
}

/// Accessors and derived geometry shared by every [`Section`].
///
/// Implemented for all sections (trait objects included) and not meant to be overridden.
pub trait SectionExt<H>: Section<H> {
    fn state(&self) -> State {
        self.props().state()
    }

    /// Sets the load state. The owning adapter is not told; notify it afterwards.
    fn set_state(&mut self, state: State) {
        self.props_mut().set_state(state);
    }

    fn is_visible(&self) -> bool {
        self.props().is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.props_mut().set_visible(visible);
    }

    fn has_header(&self) -> bool {
        self.props().has_header()
    }

    fn set_has_header(&mut self, has_header: bool) {
        self.props_mut().set_has_header(has_header);
    }

    fn has_footer(&self) -> bool {
        self.props().has_footer()
    }

    fn set_has_footer(&mut self, has_footer: bool) {
        self.props_mut().set_has_footer(has_footer);
    }

    fn layouts(&self) -> &SectionLayouts {
        self.props().layouts()
    }

    /// Rows contributed when visible. Recomputed on every call.
    fn section_items_total(&self) -> usize {
        let props = self.props();
        let content = match props.state() {
            State::Loaded => self.content_items_total(),
            State::Loading | State::Failed => 1,
        };
        props.section_items_total(content)
    }

    /// Binds a content row according to the current state.
    fn bind_content(&mut self, holder: &mut H, position: usize) {
        match ContentKind::from(self.state()) {
            ContentKind::Loading => self.bind_loading(holder),
            ContentKind::Item => self.bind_item(holder, position),
            ContentKind::Failed => self.bind_failed(holder),
        }
    }

    /// Passes an inflated view through the holder hook for `slot`.
    fn make_holder(&self, slot: Slot, view: H) -> H {
        match slot {
            Slot::Header => self.header_holder(view),
            Slot::Footer => self.footer_holder(view),
            Slot::Item => self.item_holder(view),
            Slot::Loading => self.loading_holder(view),
            Slot::Failed => self.failed_holder(view),
        }
    }
}

impl<H, S: Section<H> + ?Sized> SectionExt<H> for S {}

/// A section that never shows loading or failed placeholders.
///
/// Wrap it in [`Stateless`] to register it. It has no placeholder hooks to override.
pub trait StatelessSection<H> {
    fn props(&self) -> &SectionProps;

    fn props_mut(&mut self) -> &mut SectionProps;

    fn content_items_total(&self) -> usize;

    fn bind_item(&mut self, holder: &mut H, position: usize);

    fn item_holder(&self, view: H) -> H {
        view
    }

    fn header_holder(&self, view: H) -> H {
        view
    }

    fn bind_header(&mut self, _holder: &mut H) {}

    fn footer_holder(&self, view: H) -> H {
        view
    }

    fn bind_footer(&mut self, _holder: &mut H) {}
}

/// Adapts a [`StatelessSection`] into a [`Section`] whose placeholder hooks stay inert.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stateless<S>(pub S);

impl<S> Stateless<S> {
    pub fn into_inner(self) -> S {
        self.0
    }
}

impl<H, S: StatelessSection<H>> Section<H> for Stateless<S> {
    fn props(&self) -> &SectionProps {
        self.0.props()
    }

    fn props_mut(&mut self) -> &mut SectionProps {
        self.0.props_mut()
    }

    fn content_items_total(&self) -> usize {
        self.0.content_items_total()
    }

    fn bind_item(&mut self, holder: &mut H, position: usize) {
        self.0.bind_item(holder, position);
    }

    fn item_holder(&self, view: H) -> H {
        self.0.item_holder(view)
    }

    fn header_holder(&self, view: H) -> H {
        self.0.header_holder(view)
    }

    fn bind_header(&mut self, holder: &mut H) {
        self.0.bind_header(holder);
    }

    fn footer_holder(&self, view: H) -> H {
        self.0.footer_holder(view)
    }

    fn bind_footer(&mut self, holder: &mut H) {
        self.0.bind_footer(holder);
    }
}
