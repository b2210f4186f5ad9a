#![forbid(unsafe_code)]

//! The dashboard shown by the `gtui-demo` binary.

use std::sync::{Arc, Mutex};

use gtui::prelude::*;
use gtui::{BorderGradient, GradientDirection, VerticalAlignment, lock, shared};
use gtui::text::{apply_gradient_to_text, cells_with_x};

const INTRO: &str = "Styled with [markup](fg:cyan,mod:bold): \
[red](fg:red), [green](fg:green), [reversed](fg:yellow,mod:reverse).\n\n\
Press keys to see their identifiers. [q](fg:red,mod:bold) quits.";

/// One line of gradient text inside a block.
#[derive(Debug, Clone)]
pub struct GradientLine {
    block: Block,
    text: String,
    start: Color,
    end: Color,
}

impl GradientLine {
    pub fn new(block: Block, text: impl Into<String>, start: Color, end: Color) -> Self {
        Self {
            block,
            text: text.into(),
            start,
            end,
        }
    }
}

impl Drawable for GradientLine {
    fn rect(&self) -> Rect {
        self.block.rect()
    }

    fn set_rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) {
        self.block.set_rect(x1, y1, x2, y2);
    }

    fn draw(&self, buf: &mut Buffer) {
        self.block.draw_block(buf);
        let inner = self.block.inner();
        if inner.is_empty() {
            return;
        }
        let cells = apply_gradient_to_text(&self.text, self.start, self.end);
        let y = inner.y + inner.height / 2;
        for item in cells_with_x(&cells) {
            if item.x + item.cell.width() > inner.width as usize {
                break;
            }
            buf.set(inner.x + item.x as u16, y, item.cell);
        }
    }
}

/// Widgets of the demo, laid out by one grid.
pub struct Dashboard {
    root: Arc<Mutex<Grid>>,
    status: Arc<Mutex<Paragraph>>,
    seen: usize,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        let intro = shared(
            Paragraph::default()
                .text(INTRO)
                .block(Block::default().title("gotui").rounded(true)),
        );
        let banner = shared(GradientLine::new(
            Block::default()
                .title("gradient")
                .border_gradient(BorderGradient {
                    start: Color::rgb(0, 255, 255),
                    end: Color::rgb(0, 0, 255),
                    direction: GradientDirection::Horizontal,
                }),
            "terminal rendering, one cell at a time",
            Color::rgb(0, 255, 0),
            Color::rgb(255, 255, 0),
        ));
        let status = shared(
            Paragraph::default()
                .text("waiting for input")
                .vertical_alignment(VerticalAlignment::Middle)
                .block(
                    Block::default()
                        .title("events")
                        .border_gradient(BorderGradient {
                            start: Color::rgb(255, 255, 0),
                            end: Color::rgb(255, 0, 0),
                            direction: GradientDirection::Vertical,
                        }),
                ),
        );
        let help = shared(
            Paragraph::default()
                .text("[-screenshot](fg:magenta) writes screenshot.png and exits")
                .block(Block::default().title_bottom("help")),
        );

        let mut grid = Grid::new();
        grid.set(vec![
            GridItem::row(
                0.6,
                vec![
                    GridItem::col_leaf(0.5, intro),
                    GridItem::col(
                        0.5,
                        vec![
                            GridItem::row_leaf(0.5, banner),
                            GridItem::row_leaf(0.5, help),
                        ],
                    ),
                ],
            ),
            GridItem::row_leaf(0.4, status.clone()),
        ]);

        Self {
            root: shared(grid),
            status,
            seen: 0,
        }
    }

    pub fn root(&self) -> SharedDrawable {
        self.root.clone()
    }

    /// Record `event` in the status panel.
    pub fn handle(&mut self, event: &Event) -> Control {
        self.seen += 1;
        let text = format!(
            "last event: [{}](fg:green,mod:bold)\nevents seen: {}",
            escape(event.id()),
            self.seen
        );
        lock(&self.status).set_text(text);
        Control::Ignored
    }

    pub fn seen(&self) -> usize {
        self.seen
    }
}

/// Identifiers such as `<Up>` are safe in markup, but brackets are not.
fn escape(id: &str) -> String {
    id.replace(['[', ']'], "")
}
