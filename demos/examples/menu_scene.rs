// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A settings menu with a close button, a volume bar and a start button.
//!
//! This example shows how to:
//! - build a scene through `trellis_scene::Ui`,
//! - feed scripted pointer samples and read back the routed hooks,
//! - react to widget signals after each tick,
//! - draw into a `DrawList` and inspect the depth-sorted result.
//!
//! Run:
//! - `cargo run -p trellis_demos --example menu_scene`

use std::rc::Rc;
use std::time::Duration;

use kurbo::Rect;
use trellis_layout::LayoutSpec;
use trellis_pointer::{PointerEvent, RawPointer};
use trellis_scene::{
    Button, Color, ContinuousProgressBar, DrawList, HorizontalAlign, Label, Menu, NodeId,
    SceneNode, SignalKind, SolidSprite, Surface, TextProps, TextRenderer, Ui,
};

/// Stands in for a real font: one quad per character.
#[derive(Debug)]
struct BlockFont;

impl TextRenderer for BlockFont {
    fn draw_text(&self, surface: &mut dyn Surface, text: &str, rect: Rect, props: &TextProps) {
        let advance = props.size * 0.5;
        for (i, _) in text.chars().enumerate() {
            #[allow(clippy::cast_precision_loss, reason = "Demo strings are short.")]
            let x = rect.x0 + advance * i as f64;
            let glyph = Rect::new(x, rect.y0, x + advance, rect.y0 + props.size);
            surface.submit(glyph, None, props.color, props.depth);
        }
    }
}

fn name(ui: &Ui, id: NodeId) -> String {
    let scene = ui.scene();
    let widget = scene.widget(id).map_or("?", |w| w.kind());
    let short = widget.rsplit("::").next().unwrap_or(widget);
    match scene.node_id(id) {
        Some(label) => format!("{short}#{label}"),
        None => short.to_owned(),
    }
}

fn main() {
    let mut ui = Ui::new(Rect::new(0.0, 0.0, 640.0, 480.0));
    let root = ui.scene().root();
    let sprite = Rc::new(SolidSprite);

    let menu = ui
        .insert_menu(
            root,
            SceneNode::new(Menu::new())
                .with_id("settings")
                .with_layout(LayoutSpec::sized(400.0, 300.0)),
            Button::new(sprite.clone()),
        )
        .unwrap();
    ui.insert(
        menu,
        SceneNode::new(
            Label::new("Settings")
                .with_renderer(Rc::new(BlockFont))
                .with_props(TextProps {
                    color: Color::BLACK,
                    size: 24.0,
                    horizontal: HorizontalAlign::Center,
                    ..TextProps::default()
                }),
        )
        .with_layout(LayoutSpec::default().with_top(24.0).with_left(24.0).with_height(24.0)),
    )
    .unwrap();
    let volume = ui
        .insert(
            menu,
            SceneNode::new(ContinuousProgressBar::new(0.7, 0.0, 1.0).unwrap())
                .with_id("volume")
                .with_layout(LayoutSpec::sized(300.0, 20.0)),
        )
        .unwrap();
    let start = ui
        .insert(
            menu,
            SceneNode::new(Button::new(sprite))
                .with_id("start")
                .with_layout(LayoutSpec::sized(120.0, 40.0).with_bottom(24.0)),
        )
        .unwrap();

    for id in [menu, volume, start] {
        println!("{:<28} {:?}", name(&ui, id), ui.scene().rect(id).unwrap());
    }

    // Hover the start button, click it, then click the close button.
    let on_start = RawPointer::at((320.0, 350.0));
    let on_close = RawPointer::at((480.0, 125.0));
    let script = [
        on_start,
        on_start.with_left(true),
        on_start.with_left(true),
        on_start,
        on_close,
        on_close.with_left(true),
        on_close,
    ];

    for (frame, raw) in script.into_iter().enumerate() {
        let tick = ui.tick(raw);
        let mut routed = Vec::new();
        for event in tick.events() {
            match *event {
                PointerEvent::Target { target, hook } => routed.push((target, hook)),
                PointerEvent::Miss(miss) => println!("frame {frame}: miss {miss:?}"),
            }
        }
        for (target, hook) in routed {
            println!("frame {frame}: {:<28} {hook:?}", name(&ui, target));
        }

        let signals: Vec<_> = ui.drain_signals().collect();
        for signal in signals {
            match signal.kind {
                SignalKind::Clicked => {
                    println!("frame {frame}: {} clicked", name(&ui, signal.source));
                    ui.scene_mut()
                        .edit_widget(volume, |bar: &mut ContinuousProgressBar| bar.set_value(1.0))
                        .unwrap();
                }
                SignalKind::CloseRequested => {
                    println!("frame {frame}: {} asked to close", name(&ui, signal.source));
                    ui.scene_mut().set_visible(signal.source, false).unwrap();
                }
            }
        }
        ui.update(Duration::from_millis(16));
    }

    let mut list = DrawList::default();
    ui.draw(&mut list);
    println!("{} submissions after closing the menu", list.len());

    ui.scene_mut().set_visible(menu, true).unwrap();
    list.clear();
    ui.draw(&mut list);
    println!("{} submissions with the menu shown, back to front:", list.len());
    for sub in list.sorted() {
        println!("  depth {:.3} {:?} {:?}", sub.depth, sub.color, sub.rect);
    }
}
