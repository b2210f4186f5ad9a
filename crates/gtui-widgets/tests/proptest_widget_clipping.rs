//! Property tests: widgets never draw outside their rectangle.

use gtui_core::geometry::Rect;
use gtui_render::{Buffer, Drawable};
use gtui_widgets::{Alignment, Block, Paragraph, VerticalAlignment};
use proptest::prelude::*;

fn touched_outside(buf: &Buffer, rect: Rect) -> bool {
    buf.iter()
        .any(|(x, y, cell)| !cell.is_clear() && !rect.contains(x, y))
}

fn alignment() -> impl Strategy<Value = Alignment> {
    prop_oneof![
        Just(Alignment::Left),
        Just(Alignment::Center),
        Just(Alignment::Right),
    ]
}

proptest! {
    #[test]
    fn paragraph_stays_inside(
        text in "[a-z \\n\\[\\]():]{0,80}",
        x in 0u16..6, y in 0u16..6, w in 0u16..20, h in 0u16..10,
        wrap in any::<bool>(),
        align in alignment(),
    ) {
        let rect = Rect::new(x, y, w, h);
        let mut p = Paragraph::default()
            .text(text)
            .wrap(wrap)
            .alignment(align)
            .vertical_alignment(VerticalAlignment::Middle);
        p.set_rect(rect.x, rect.y, rect.right(), rect.bottom());
        let mut buf = Buffer::with_size(32, 24);
        p.draw(&mut buf);
        prop_assert!(!touched_outside(&buf, rect));
    }

    #[test]
    fn titled_block_stays_inside(
        title in "[a-z ]{0,30}",
        w in 0u16..16, h in 0u16..6,
        align in alignment(),
    ) {
        let rect = Rect::new(2, 1, w, h);
        let mut block = Block::default()
            .title(title.clone())
            .title_alignment(align)
            .title_bottom(title);
        block.set_rect(rect.x, rect.y, rect.right(), rect.bottom());
        let mut buf = Buffer::with_size(24, 10);
        block.draw(&mut buf);
        prop_assert!(!touched_outside(&buf, rect));
    }
}
