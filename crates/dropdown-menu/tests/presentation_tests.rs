//! Presentation state machine tests driven through a navigation container.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use dropdown_menu::prelude::*;

const FRAME: Duration = Duration::from_millis(16);

fn container_with_menu(ctx: &UiContext, config: MenuConfig) -> NavigationContainer {
    let mut container = NavigationContainer::new(Rect::new(0.0, 0.0, 375.0, 667.0), 64.0);
    let items = ["Inbox", "Drafts", "Sent", "Archive"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let menu = DropdownMenu::new(items, ctx)
        .with_config(config)
        .expect("test config is valid");
    container.set_dropdown_menu(Some(menu));
    container
}

fn settle(menu: &mut DropdownMenu) -> usize {
    let mut frames = 0;
    while menu.is_animating() {
        menu.advance(FRAME);
        frames += 1;
        assert!(frames < 10_000, "animation never finished");
    }
    frames
}

fn record_states(menu: &DropdownMenu) -> Arc<Mutex<Vec<PresentationState>>> {
    let states = Arc::new(Mutex::new(Vec::new()));
    let states_clone = states.clone();
    menu.state_changed.connect(move |state| states_clone.lock().push(*state));
    states
}

#[test]
fn test_open_close_cycle() {
    let ctx = UiContext::new();
    let mut container = container_with_menu(&ctx, MenuConfig::default());
    let menu = container.dropdown_menu_mut().unwrap();
    let states = record_states(menu);

    menu.show();
    let frames = settle(menu);
    // 0.5 s at 16 ms per frame.
    assert_eq!(frames, 32);

    menu.hide();
    settle(menu);

    assert_eq!(
        *states.lock(),
        vec![
            PresentationState::Showing,
            PresentationState::Shown,
            PresentationState::Hiding,
            PresentationState::Hidden,
        ]
    );
    assert!(!menu.is_visible());
}

#[test]
fn test_show_while_shown_starts_nothing() {
    let ctx = UiContext::new();
    let mut container = container_with_menu(&ctx, MenuConfig::default());
    let menu = container.dropdown_menu_mut().unwrap();
    menu.show();
    settle(menu);
    let states = record_states(menu);

    for _ in 0..3 {
        menu.show();
        assert!(!menu.is_animating());
    }
    menu.advance(FRAME);
    assert_eq!(menu.state(), PresentationState::Shown);
    assert!(states.lock().is_empty());
}

#[test]
fn test_completion_fires_once_under_interruptions() {
    let ctx = UiContext::new();
    let mut container = container_with_menu(&ctx, MenuConfig::default());
    let menu = container.dropdown_menu_mut().unwrap();
    let states = record_states(menu);

    menu.show();
    menu.advance(FRAME);
    menu.hide();
    menu.advance(FRAME);
    menu.show();
    menu.advance(FRAME);
    menu.hide();
    settle(menu);

    let states = states.lock();
    assert_eq!(states.last(), Some(&PresentationState::Hidden));
    assert_eq!(
        states.iter().filter(|s| **s == PresentationState::Hidden).count(),
        1
    );
    assert!(!states.contains(&PresentationState::Shown));
}

#[test]
fn test_backdrop_and_panel_follow_animation() {
    let ctx = UiContext::new();
    let config = MenuConfig::default().with_backdrop(Color::from_rgb8(0, 0, 0), 0.5);
    let mut container = container_with_menu(&ctx, config);
    let menu = container.dropdown_menu_mut().unwrap();

    let geometry = menu.geometry().unwrap();
    assert_eq!(geometry.overlay_frame, Rect::new(0.0, 64.0, 375.0, 603.0));
    assert_eq!(geometry.panel_frame, Rect::new(0.0, 64.0, 375.0, 176.0));

    menu.show();
    assert_eq!(menu.panel_frame(), Some(Rect::new(0.0, -112.0, 375.0, 176.0)));
    assert_eq!(menu.backdrop_opacity(), 0.0);

    menu.advance(Duration::from_millis(100));
    assert!(menu.backdrop_opacity() > 0.0);
    assert!(menu.panel_offset() > -176.0);

    settle(menu);
    assert_eq!(menu.backdrop_opacity(), 0.5);
    assert_eq!(menu.panel_frame(), Some(geometry.panel_frame));
}

#[test]
fn test_search_header_hidden_under_bar() {
    let ctx = UiContext::new();
    let config = MenuConfig::default().with_search_enabled(true);
    let mut container = container_with_menu(&ctx, config);
    let menu = container.dropdown_menu_mut().unwrap();

    menu.show();
    settle(menu);

    let geometry = menu.geometry().unwrap();
    assert_eq!(geometry.panel_frame.top(), 20.0);
    assert_eq!(geometry.panel_frame.height(), 220.0);
    assert_eq!(menu.content_offset(), 44.0);
    assert_eq!(menu.row_count(0), 1);
}

#[test]
fn test_selection_closes_menu() {
    let ctx = UiContext::new();
    let mut container = container_with_menu(&ctx, MenuConfig::default());
    let menu = container.dropdown_menu_mut().unwrap();
    let selected = Arc::new(Mutex::new(None));

    let selected_clone = selected.clone();
    menu.item_selected.connect(move |(item, index)| {
        *selected_clone.lock() = Some((item.clone(), *index));
    });

    menu.show();
    settle(menu);
    assert!(menu.did_select_row(1, 3));
    assert_eq!(*selected.lock(), Some(("Archive".to_string(), 3)));

    settle(menu);
    assert_eq!(menu.state(), PresentationState::Hidden);
}

#[test]
fn test_menu_without_container_cannot_show() {
    let ctx = UiContext::new();
    let mut menu = DropdownMenu::new(vec!["a".into()], &ctx);
    menu.toggle();
    assert_eq!(menu.state(), PresentationState::Hidden);
    assert!(menu.geometry().is_none());
}

#[test]
fn test_config_from_toml_drives_animation() {
    let config = MenuConfig::from_toml_str(
        r##"
        animation_duration = 0.25
        spring_damping = 1.0
        spring_velocity = 0.0
        backdrop_color = "#202020"
        "##,
    )
    .unwrap();

    let ctx = UiContext::new();
    let mut container = container_with_menu(&ctx, config);
    let menu = container.dropdown_menu_mut().unwrap();

    menu.show();
    let mut previous = menu.panel_offset();
    let mut frames = 0;
    while menu.is_animating() {
        menu.advance(FRAME);
        frames += 1;
        // Critically damped: the panel never overshoots its resting position.
        assert!(menu.panel_offset() <= 0.0);
        assert!(menu.panel_offset() >= previous);
        previous = menu.panel_offset();
    }
    assert_eq!(frames, 16);
    assert_eq!(menu.backdrop_fill(), Color::from_rgba8(0x20, 0x20, 0x20, 77));
}
