// Example: translating section-local edits into flat change notifications.
use std::cell::RefCell;
use std::rc::Rc;

use sectioned::{Change, Section, SectionLayouts, SectionProps, SectionedAdapter};

struct Messages {
    props: SectionProps,
    lines: Rc<RefCell<Vec<String>>>,
}

impl Section<String> for Messages {
    fn props(&self) -> &SectionProps {
        &self.props
    }

    fn props_mut(&mut self) -> &mut SectionProps {
        &mut self.props
    }

    fn content_items_total(&self) -> usize {
        self.lines.borrow().len()
    }

    fn bind_item(&mut self, holder: &mut String, position: usize) {
        holder.clone_from(&self.lines.borrow()[position]);
    }
}

fn messages(n: usize) -> (Messages, Rc<RefCell<Vec<String>>>) {
    let lines = Rc::new(RefCell::new((0..n).map(|i| format!("message {i}")).collect()));
    let section = Messages {
        props: SectionProps::new(SectionLayouts::new(1).with_header(2).with_footer(3)),
        lines: Rc::clone(&lines),
    };
    (section, lines)
}

fn main() -> Result<(), sectioned::Error> {
    let mut adapter = SectionedAdapter::new()
        .with_on_change(Some(|c: Change| println!("surface <- {c:?}")));

    let (pinned, _) = messages(2);
    let (inbox, inbox_lines) = messages(5);
    adapter.add_section("pinned", pinned)?;
    adapter.add_section("inbox", inbox)?;

    // A new message arrives at the top of the inbox.
    inbox_lines.borrow_mut().insert(0, "hello".to_string());
    adapter.notify_item_inserted_in_section("inbox", 0)?;
    adapter.notify_footer_changed_in_section("inbox")?;

    // Several edits, one notification.
    adapter.batch_update(|a| -> sectioned::Result<()> {
        a.set_section_visible("pinned", false)?;
        a.notify_section_changed("inbox")
    })?;

    let mut first = String::new();
    adapter.bind(adapter.position_in_adapter("inbox", 0)?, &mut first)?;
    println!(
        "inbox now starts at {}, first message={first:?}",
        adapter.section_position("inbox")?
    );
    Ok(())
}
