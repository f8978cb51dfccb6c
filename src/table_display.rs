use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;

use tabview::data::render::RenderedPage;

pub fn display_page(page: &RenderedPage) {
    if page.is_empty {
        println!("{}", page.empty_title.as_str().yellow());
        println!("{}", page.empty_text);
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut headers = vec![Cell::new("#").add_attribute(Attribute::Bold)];
    headers.extend(
        page.headers
            .iter()
            .map(|h| Cell::new(h.title()).add_attribute(Attribute::Bold)),
    );
    table.set_header(headers);

    for row in &page.rows {
        let mut cells = vec![(row.index + 1).to_string()];
        cells.extend(row.cells.iter().cloned());
        table.add_row(cells);
    }

    println!("{table}");
    println!();
    println!("{}", page.summary().green());
    println!(
        "Page {} of {}:  {}",
        page.pagination.current_page,
        page.pagination.total_pages,
        page.page_selector()
    );
}
