use crate::*;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use sectioned::{
    ContentKind, LayoutId, Role, Section, SectionLayouts, SectionProps, SectionedAdapter, State,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Row {
    id: usize,
    layout: LayoutId,
    text: String,
}

struct Numbers {
    props: SectionProps,
    len: usize,
}

impl Numbers {
    fn new(layouts: SectionLayouts, len: usize) -> Self {
        Self {
            props: SectionProps::new(layouts),
            len,
        }
    }
}

impl Section<Row> for Numbers {
    fn props(&self) -> &SectionProps {
        &self.props
    }

    fn props_mut(&mut self) -> &mut SectionProps {
        &mut self.props
    }

    fn content_items_total(&self) -> usize {
        self.len
    }

    fn bind_item(&mut self, holder: &mut Row, position: usize) {
        holder.text = alloc::format!("#{position}");
    }

    fn bind_header(&mut self, holder: &mut Row) {
        holder.text = "header".to_string();
    }

    fn bind_footer(&mut self, holder: &mut Row) {
        holder.text = "footer".to_string();
    }

    fn bind_loading(&mut self, holder: &mut Row) {
        holder.text = "loading".to_string();
    }
}

fn decorated(len: usize) -> Numbers {
    Numbers::new(
        SectionLayouts::new(1)
            .with_header(2)
            .with_footer(3)
            .with_loading(4),
        len,
    )
}

fn adapter() -> SectionedAdapter<Row> {
    let mut a = SectionedAdapter::new();
    a.add_section("top", decorated(3)).unwrap();
    a.add_section("bottom", decorated(10)).unwrap();
    a
}

fn inflater(next_id: &mut usize) -> impl FnMut(LayoutId) -> Row + '_ {
    move |layout| {
        *next_id += 1;
        Row {
            id: *next_id,
            layout,
            text: String::new(),
        }
    }
}

#[test]
fn anchor_follows_content_row_when_section_above_is_hidden() {
    let mut a = adapter();
    // top: 0 header, 1..4 items, 4 footer; bottom: 5 header, 6.. items
    let anchor = capture_anchor(&a, 8).unwrap();
    assert_eq!(anchor.key, "bottom");
    assert_eq!(anchor.role, Role::Content(ContentKind::Item));
    assert_eq!(anchor.content_index, Some(2));

    a.set_section_visible("top", false).unwrap();
    assert_eq!(resolve_anchor(&a, &anchor), Some(3));

    a.set_section_visible("top", true).unwrap();
    assert_eq!(resolve_anchor(&a, &anchor), Some(8));
}

#[test]
fn anchor_clamps_into_placeholder_while_loading() {
    let mut a = adapter();
    let anchor = capture_anchor(&a, 12).unwrap();
    a.set_section_state("bottom", State::Loading).unwrap();
    // bottom: 5 header, 6 loading, 7 footer
    assert_eq!(resolve_anchor(&a, &anchor), Some(6));
}

#[test]
fn anchor_on_header_or_removed_section() {
    let mut a = adapter();
    let header = capture_anchor(&a, 5).unwrap();
    assert_eq!(header.role, Role::Header);
    assert_eq!(resolve_anchor(&a, &header), Some(5));

    a.set_section_has_header("bottom", false).unwrap();
    assert_eq!(resolve_anchor(&a, &header), None);

    let content = capture_anchor(&a, 6).unwrap();
    a.remove_section("bottom").unwrap();
    assert_eq!(resolve_anchor(&a, &content), None);
    assert_eq!(capture_anchor(&a, 99), None);
}

#[test]
fn anchor_in_emptied_section_falls_back_to_first_row() {
    let mut a = SectionedAdapter::new();
    a.add_section("only", decorated(4)).unwrap();
    let anchor = capture_anchor(&a, 3).unwrap();

    a.remove_section("only").unwrap();
    a.add_section("only", decorated(0)).unwrap();
    // header 0, footer 1
    assert_eq!(resolve_anchor(&a, &anchor), Some(0));
}

#[test]
fn pool_is_bounded_per_view_type() {
    let mut pool = HolderPool::with_max_per_type(2);
    assert!(pool.put(7, 'a'));
    assert!(pool.put(7, 'b'));
    assert!(!pool.put(7, 'c'));
    assert!(pool.put(8, 'd'));
    assert_eq!(pool.len(), 3);
    assert_eq!(pool.len_of(7), 2);

    assert_eq!(pool.take(7), Some('b'));
    assert_eq!(pool.take(9), None);

    pool.set_max_per_type(0);
    assert!(pool.is_empty());
}

#[test]
fn controller_renders_range_and_binds_rows() {
    let mut c = Controller::from_adapter(adapter());
    let mut next_id = 0usize;
    c.render(3..7, inflater(&mut next_id)).unwrap();

    let texts: Vec<&str> = c.realized().iter().map(|r| r.holder.text.as_str()).collect();
    assert_eq!(texts, ["#2", "footer", "header", "#0"]);
    let layouts: Vec<LayoutId> = c.realized().iter().map(|r| r.holder.layout).collect();
    assert_eq!(layouts, [1, 3, 2, 1]);
    assert_eq!(c.holders_created(), 4);

    // Clamped to the item count.
    c.render(15..100, inflater(&mut next_id)).unwrap();
    assert_eq!(c.realized().len(), 2);
    assert_eq!(c.realized()[1].holder.text, "footer");
}

#[test]
fn controller_reuses_holders_of_the_same_view_type() {
    let mut c = Controller::from_adapter(adapter());
    let mut next_id = 0usize;

    c.render(6..10, inflater(&mut next_id)).unwrap();
    assert_eq!(c.holders_created(), 4);
    let ids: Vec<usize> = c.realized().iter().map(|r| r.holder.id).collect();

    // Scroll by one row inside the same section: every holder is recycled.
    c.render(7..11, inflater(&mut next_id)).unwrap();
    assert_eq!(c.holders_created(), 4);
    let mut reused: Vec<usize> = c.realized().iter().map(|r| r.holder.id).collect();
    reused.sort_unstable();
    assert_eq!(reused, ids);
    assert_eq!(c.realized()[0].holder.text, "#1");

    // Rows of another section never take these holders.
    c.render(0..2, inflater(&mut next_id)).unwrap();
    assert_eq!(c.holders_created(), 6);
}

#[test]
fn controller_drops_pooled_holders_of_removed_sections() {
    let mut c = Controller::from_adapter(adapter());
    let mut next_id = 0usize;
    c.render(0..5, inflater(&mut next_id)).unwrap();

    c.adapter_mut().remove_section("top").unwrap();
    c.render(0..2, inflater(&mut next_id)).unwrap();

    let mut types = Vec::new();
    for r in c.realized() {
        types.push(r.view_type);
    }
    assert!(
        types
            .iter()
            .all(|&vt| c.adapter().decode_view_type(vt).unwrap().0 == "bottom")
    );
    assert_eq!(c.pool().len(), 0);
}

#[test]
fn controller_reports_missing_layouts() {
    let mut a = SectionedAdapter::new();
    let mut s = Numbers::new(SectionLayouts::new(1), 2);
    s.props_mut().set_state(State::Failed);
    a.add_section("bare", s).unwrap();

    let mut c = Controller::from_adapter(a);
    let mut next_id = 0usize;
    let err = c.render(0..1, inflater(&mut next_id)).unwrap_err();
    assert!(matches!(err, sectioned::Error::MissingLayout { .. }));
    assert_eq!(next_id, 0);

    let anchor = c.capture_anchor(0).unwrap();
    assert_eq!(c.resolve_anchor(&anchor), Some(0));
    assert_eq!(c.into_adapter().item_count(), 1);
}

#[test]
fn controller_keeps_holders_of_rows_that_stay_on_screen() {
    let mut a = SectionedAdapter::new();
    a.add_section("long", Numbers::new(SectionLayouts::new(1), 100))
        .unwrap();
    let mut c = Controller::from_adapter(a);
    let mut next_id = 0usize;

    c.render(0..20, inflater(&mut next_id)).unwrap();
    assert_eq!(c.holders_created(), 20);
    let before: Vec<(usize, usize)> = c
        .realized()
        .iter()
        .map(|r| (r.position, r.holder.id))
        .collect();

    // More rows of one view type than the pool keeps per type.
    assert!(c.realized().len() > HolderPool::<Row>::DEFAULT_MAX_PER_TYPE);

    c.render(1..21, inflater(&mut next_id)).unwrap();
    assert_eq!(c.holders_created(), 20);
    for (row, (position, id)) in c.realized().iter().zip(before.iter().skip(1)) {
        assert_eq!(row.position, *position);
        assert_eq!(row.holder.id, *id);
    }
    assert_eq!(c.realized()[19].position, 20);
    assert_eq!(c.realized()[19].holder.id, before[0].1);
    assert_eq!(c.realized()[19].holder.text, "#20");

    // A jump far away still reuses what fits in the pool.
    c.render(50..70, inflater(&mut next_id)).unwrap();
    assert_eq!(
        c.holders_created(),
        20 + 20 - HolderPool::<Row>::DEFAULT_MAX_PER_TYPE
    );
}

#[test]
fn controller_replaces_holders_whose_row_changed_kind() {
    let mut c = Controller::from_adapter(adapter());
    let mut next_id = 0usize;
    c.render(5..9, inflater(&mut next_id)).unwrap();
    let header_id = c.realized()[0].holder.id;

    c.adapter_mut()
        .set_section_state("bottom", State::Loading)
        .unwrap();
    c.render(5..9, inflater(&mut next_id)).unwrap();

    // bottom: 5 header, 6 loading, 7 footer
    let texts: Vec<&str> = c.realized().iter().map(|r| r.holder.text.as_str()).collect();
    assert_eq!(texts, ["header", "loading", "footer"]);
    assert_eq!(c.realized()[0].holder.id, header_id);
    let layouts: Vec<LayoutId> = c.realized().iter().map(|r| r.holder.layout).collect();
    assert_eq!(layouts, [2, 4, 3]);
}
