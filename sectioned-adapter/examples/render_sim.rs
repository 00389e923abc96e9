// Example: a host without a recycling list widget drives the controller frame by frame.
use sectioned::{Section, SectionLayouts, SectionProps, State};
use sectioned_adapter::Controller;

#[derive(Debug)]
struct Cell {
    id: usize,
    text: String,
}

struct Feed {
    props: SectionProps,
    title: &'static str,
    len: usize,
}

impl Feed {
    fn new(title: &'static str, len: usize) -> Self {
        let layouts = SectionLayouts::new(1)
            .with_header(2)
            .with_loading(3)
            .with_failed(4);
        Self {
            props: SectionProps::new(layouts),
            title,
            len,
        }
    }
}

impl Section<Cell> for Feed {
    fn props(&self) -> &SectionProps {
        &self.props
    }

    fn props_mut(&mut self) -> &mut SectionProps {
        &mut self.props
    }

    fn content_items_total(&self) -> usize {
        self.len
    }

    fn bind_item(&mut self, holder: &mut Cell, position: usize) {
        holder.text = format!("{} post {position}", self.title);
    }

    fn bind_header(&mut self, holder: &mut Cell) {
        holder.text = format!("# {}", self.title);
    }

    fn bind_loading(&mut self, holder: &mut Cell) {
        holder.text = format!("{}: loading...", self.title);
    }

    fn bind_failed(&mut self, holder: &mut Cell) {
        holder.text = format!("{}: failed, pull to retry", self.title);
    }
}

fn print_frame(c: &Controller<Cell>) {
    for row in c.realized() {
        println!(
            "  {:>3} [cell {:>2}] {}",
            row.position, row.holder.id, row.holder.text
        );
    }
}

fn main() -> Result<(), sectioned::Error> {
    let mut c = Controller::new();
    c.adapter_mut().add_section("friends", Feed::new("friends", 4))?;
    c.adapter_mut().add_section("news", Feed::new("news", 50))?;
    c.adapter_mut().set_section_state("news", State::Loading)?;

    let mut next_id = 0usize;
    let mut inflate = |_layout: sectioned::LayoutId| {
        next_id += 1;
        Cell {
            id: next_id,
            text: String::new(),
        }
    };

    println!("frame 1 (viewport 0..8)");
    c.render(0..8, &mut inflate)?;
    print_frame(&c);

    // News finished loading; keep the first visible row anchored while the list changes.
    let anchor = c.capture_anchor(6);
    c.adapter_mut().set_section_visible("friends", false)?;
    c.adapter_mut().set_section_state("news", State::Loaded)?;
    let top = anchor.and_then(|a| c.resolve_anchor(&a)).unwrap_or(0);

    println!("frame 2 (viewport {top}..{})", top + 8);
    c.render(top..top + 8, &mut inflate)?;
    print_frame(&c);
    println!("cells inflated: {}", c.holders_created());
    Ok(())
}
