use sectioned::{Section, SectionLayouts, SectionProps, SectionedAdapter, State};

#[derive(Debug, Default)]
struct Row {
    layout: u32,
    text: String,
}

struct Fruits {
    props: SectionProps,
    names: Vec<&'static str>,
}

impl Section<Row> for Fruits {
    fn props(&self) -> &SectionProps {
        &self.props
    }

    fn props_mut(&mut self) -> &mut SectionProps {
        &mut self.props
    }

    fn content_items_total(&self) -> usize {
        self.names.len()
    }

    fn bind_item(&mut self, holder: &mut Row, position: usize) {
        holder.text = self.names[position].to_string();
    }

    fn bind_header(&mut self, holder: &mut Row) {
        holder.text = "== fruits ==".to_string();
    }

    fn bind_loading(&mut self, holder: &mut Row) {
        holder.text = "loading...".to_string();
    }
}

fn render(adapter: &mut SectionedAdapter<Row>) -> Result<(), sectioned::Error> {
    for p in 0..adapter.item_count() {
        let view_type = adapter.view_type(p)?;
        let mut row = adapter.create_holder(view_type, |layout| Row {
            layout,
            ..Row::default()
        })?;
        adapter.bind(p, &mut row)?;
        println!("{p:>2} [type {view_type:>2}, layout {}] {}", row.layout, row.text);
    }
    Ok(())
}

fn main() -> Result<(), sectioned::Error> {
    let mut adapter = SectionedAdapter::new();
    adapter.add_section(
        "fruits",
        Fruits {
            props: SectionProps::new(SectionLayouts::new(1).with_header(2).with_loading(3)),
            names: vec!["apple", "banana", "cherry"],
        },
    )?;

    println!("total={}", adapter.item_count());
    render(&mut adapter)?;

    adapter.set_section_state("fruits", State::Loading)?;
    println!("total={} (loading)", adapter.item_count());
    render(&mut adapter)?;
    Ok(())
}
