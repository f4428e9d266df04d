//! Demo host for the dropdown menu.
//!
//! Plays a scripted session against a headless navigation container: open the
//! menu, type a query, pick a row, and print what a renderer would draw along
//! the way.
//!
//! Run with: cargo run -p dropdown-menu --example demo
//! Set `RUST_LOG=dropdown_menu=debug` to see the state machine trace.

use std::time::Duration;

use dropdown_menu::prelude::*;

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let ctx = UiContext::new();
    let mut container = NavigationContainer::new(Rect::new(0.0, 0.0, 375.0, 667.0), 64.0);

    let config = match std::env::args().nth(1) {
        Some(path) => MenuConfig::load(path)?,
        None => MenuConfig::default().with_search_enabled(true),
    };

    let items = ["Julianne", "Eddie", "Patricia", "J.K.", "Alejandro"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let menu = DropdownMenu::new(items, &ctx).with_config(config)?;
    menu.item_selected.connect(|(item, index)| {
        println!("selected {item:?} at row {index}");
    });
    menu.state_changed.connect(|state| println!("state -> {state}"));
    container.set_dropdown_menu(Some(menu));

    let menu = container
        .dropdown_menu_mut()
        .ok_or("dropdown menu was not attached")?;

    menu.show();
    run_frames(&ctx, menu);
    print_rows(menu);

    if menu.is_search_enabled() {
        menu.set_query("j");
        ctx.process_events_until(Duration::from_secs(1), || !menu.is_filter_pending());
        println!("query {:?}:", menu.last_applied_query());
        print_rows(menu);
    }

    menu.select_row(0);
    run_frames(&ctx, menu);

    Ok(())
}

/// Pump the UI context and animate until the menu is at rest.
fn run_frames(ctx: &UiContext, menu: &mut DropdownMenu) {
    while menu.is_animating() {
        ctx.process_events();
        menu.advance(FRAME);
        if let Some(frame) = menu.panel_frame() {
            println!(
                "  panel y={:>7.1} h={:>5.1}  backdrop {}",
                frame.top(),
                frame.height(),
                menu.backdrop_fill()
            );
        }
    }
}

fn print_rows(menu: &DropdownMenu) {
    for section in 0..menu.section_count() {
        for row in 0..menu.row_count(section) {
            if let Some(content) = menu.row(section, row) {
                println!("  [{section}:{row}] {content}");
            }
        }
    }
}
