// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown menu on a simulated page.
//!
//! The page implements both host traits: it tracks focus, lists tabbable children, measures
//! elements from a table of rectangles, and records where the menu was placed. The trigger
//! sits near the bottom of the viewport, so the menu flips above it.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p trellis_demos --example dropdown_menu`

use std::collections::HashMap;

use kurbo::{Rect, Size};
use trellis_disclosure::{BinaryActions, Menu, WidgetConfig};
use trellis_float::{Align, MeasureHost, ObserverId, PositionRequest, PositionResult, Side};
use trellis_focus_trap::FocusHost;
use trellis_host::{HostError, Key, KeyEvent};
use trellis_roving::Item;
use tracing_subscriber::EnvFilter;

const TRIGGER: u32 = 1;
const MENU: u32 = 2;

#[derive(Debug, Default)]
struct Page {
    focused: Option<u32>,
    rects: HashMap<u32, Rect>,
    next_observer: u64,
    placed: Option<PositionResult>,
}

impl FocusHost for Page {
    type Handle = u32;

    fn focused(&self) -> Result<Option<u32>, HostError> {
        Ok(self.focused)
    }

    fn focus(&mut self, target: u32) -> Result<(), HostError> {
        println!("  focus -> #{target}");
        self.focused = Some(target);
        Ok(())
    }

    fn focusables(&self, _container: u32) -> Result<Vec<u32>, HostError> {
        Ok(Vec::new())
    }

    fn is_attached(&self, target: u32) -> bool {
        self.rects.contains_key(&target)
    }
}

impl MeasureHost for Page {
    type Handle = u32;

    fn rect(&self, target: u32) -> Result<Rect, HostError> {
        self.rects.get(&target).copied().ok_or(HostError::Detached)
    }

    fn size(&self, target: u32) -> Result<Size, HostError> {
        self.rect(target).map(|r| r.size())
    }

    fn viewport(&self) -> Result<Rect, HostError> {
        Ok(Rect::new(0.0, 0.0, 640.0, 480.0))
    }

    fn observe(&mut self, _anchor: u32, _floating: u32) -> Result<ObserverId, HostError> {
        self.next_observer += 1;
        Ok(ObserverId(self.next_observer))
    }

    fn unobserve(&mut self, id: ObserverId) -> Result<(), HostError> {
        println!("  stop observing {id:?}");
        Ok(())
    }

    fn apply_position(&mut self, _floating: u32, result: &PositionResult) -> Result<(), HostError> {
        self.placed = Some(*result);
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut page = Page::default();
    page.rects.insert(TRIGGER, Rect::new(40.0, 420.0, 140.0, 450.0));
    page.rects.insert(MENU, Rect::new(0.0, 0.0, 180.0, 160.0));
    page.focused = Some(TRIGGER);

    let mut menu = Menu::new(&WidgetConfig::new("file")).with_position(
        PositionRequest::default()
            .with_placement(Side::Bottom, Align::Start)
            .with_offsets(4.0, 0.0)
            .with_collision_padding(8.0),
    );
    menu.binary_mut().register_trigger(TRIGGER);
    menu.binary_mut().register_content(&mut page, MENU);
    let labels = ["New", "Open", "Open Recent", "Save", "Close"];
    for (id, label) in (1_u32..).zip(labels) {
        if let Err(err) = menu.register_item(Item::new(id).with_label(label)) {
            eprintln!("failed to register {label}: {err}");
            return;
        }
    }

    println!("ArrowDown on trigger");
    let outcome = menu.on_trigger_key(&mut page, &KeyEvent::new(Key::ArrowDown));
    println!("  highlighted {:?}, presence {:?}", outcome.focus, menu.presence());
    if let Some(placed) = page.placed {
        println!(
            "  placed at ({}, {}) data-side={} data-align={}",
            placed.x,
            placed.y,
            placed.side.as_str(),
            placed.align.as_str()
        );
    }

    // Repeating a letter cycles through the items starting with it.
    for (t, ch) in [(1_000, 'o'), (1_150, 'o')] {
        let event = KeyEvent::new(Key::from_char(ch)).at(t);
        let outcome = menu.on_content_key(&mut page, &event);
        println!("  typed {ch:?} -> highlighted {:?}", outcome.focus.or(menu.highlighted()));
    }

    println!("Enter");
    let outcome = menu.on_content_key(&mut page, &KeyEvent::new(Key::Enter).at(1_700));
    let chosen = outcome
        .activated
        .and_then(|id| labels.get(id as usize - 1).copied());
    println!("  chose {chosen:?}, presence {:?}", menu.presence());
}
