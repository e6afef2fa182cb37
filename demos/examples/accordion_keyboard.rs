// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard-driven accordion.
//!
//! Replays a short key sequence against a three-section accordion with a disabled middle
//! section and prints the trigger attributes after every step.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p trellis_demos --example accordion_keyboard`

use trellis_disclosure::{Accordion, WidgetConfig};
use trellis_host::{Key, KeyEvent, Orientation};
use trellis_roving::Item;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = WidgetConfig::new("faq")
        .with_orientation(Orientation::Vertical)
        .with_collapsible(true);
    let mut faq = Accordion::new(&config).with_default(["shipping"]);
    for (id, disabled) in [("shipping", false), ("returns", true), ("warranty", false)] {
        if let Err(err) = faq.register_item(Item::new(id).with_disabled(disabled)) {
            eprintln!("failed to register {id}: {err}");
            return;
        }
    }

    let mut focused = "shipping";
    let script = [Key::ArrowDown, Key::Enter, Key::Home, Key::Space, Key::End, Key::Tab];
    for key in script {
        let outcome = faq.on_trigger_key(focused, &KeyEvent::new(key));
        if let Some(next) = outcome.focus {
            focused = next;
        }
        println!(
            "{key:?} -> handled={} focus={focused} open={:?}",
            outcome.is_handled(),
            faq.values()
        );
    }

    for id in ["shipping", "returns", "warranty"] {
        let attrs: Vec<String> = faq
            .trigger_attrs(&id)
            .iter()
            .map(|(name, value)| format!("{name}=\"{value}\""))
            .collect();
        println!("<button {}>", attrs.join(" "));
    }
}
