use core::fmt;

/// Host-defined identifier of a layout template (e.g. a resource id).
pub type LayoutId = u32;

/// Recycling-pool key for the rendering surface.
///
/// Two flat positions share a view type only when they belong to the same registered section
/// and occupy the same [`Slot`].
pub type ViewType = u32;

/// Load state of a section.
///
/// There is no transition graph: any state can be set from any other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum State {
    Loading,
    #[default]
    Loaded,
    Failed,
}

/// What a content row shows, derived from the section's [`State`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentKind {
    /// The single loading placeholder.
    Loading,
    /// A real item.
    Item,
    /// The single failed placeholder.
    Failed,
}

impl From<State> for ContentKind {
    fn from(state: State) -> Self {
        match state {
            State::Loading => Self::Loading,
            State::Loaded => Self::Item,
            State::Failed => Self::Failed,
        }
    }
}

/// Classification of a flat position inside its section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Header,
    Footer,
    Content(ContentKind),
}

impl Role {
    pub fn is_content(self) -> bool {
        matches!(self, Self::Content(_))
    }
}

/// A layout slot of a section. Each slot maps to one view type per registered section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    Header,
    Footer,
    Item,
    Loading,
    Failed,
}

impl Slot {
    /// Number of slots, i.e. the number of view types reserved per registered section.
    pub const COUNT: u32 = 5;

    pub const ALL: [Slot; 5] = [
        Slot::Header,
        Slot::Footer,
        Slot::Item,
        Slot::Loading,
        Slot::Failed,
    ];

    pub(crate) fn offset(self) -> u32 {
        match self {
            Self::Header => 0,
            Self::Footer => 1,
            Self::Item => 2,
            Self::Loading => 3,
            Self::Failed => 4,
        }
    }

    pub(crate) fn from_offset(offset: u32) -> Option<Self> {
        Self::ALL.get(offset as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Item => "item",
            Self::Loading => "loading",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Role> for Slot {
    fn from(role: Role) -> Self {
        match role {
            Role::Header => Self::Header,
            Role::Footer => Self::Footer,
            Role::Content(ContentKind::Item) => Self::Item,
            Role::Content(ContentKind::Loading) => Self::Loading,
            Role::Content(ContentKind::Failed) => Self::Failed,
        }
    }
}

/// The result of translating a flat position back into section coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedPosition<'a> {
    /// Index of the owning section in registration order (hidden sections included).
    pub section_index: usize,
    pub key: &'a str,
    /// Flat position of the section's first row.
    pub section_start: usize,
    /// Offset of the position inside the section's span.
    pub offset: usize,
    pub role: Role,
    pub(crate) has_header: bool,
}

impl ResolvedPosition<'_> {
    pub fn flat_position(&self) -> usize {
        self.section_start + self.offset
    }

    /// Position among the section's content rows, or `None` for headers and footers.
    pub fn content_index(&self) -> Option<usize> {
        if !self.role.is_content() {
            return None;
        }
        Some(self.offset - usize::from(self.has_header))
    }
}

/// A change notification for the rendering surface, in flat coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Change {
    DataSetChanged,
    ItemRangeChanged { start: usize, count: usize },
    ItemRangeInserted { start: usize, count: usize },
    ItemRangeRemoved { start: usize, count: usize },
    ItemMoved { from: usize, to: usize },
}
