use crate::consts;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// Return a rectangle of the given size centered in `area`, shrunk to fit if
/// `area` is too small
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [rect] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(rect);
    rect
}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Rect::new(0, 0, 80, 24), Size::new(42, 22), Rect::new(19, 1, 42, 22))]
    #[case(Rect::new(0, 1, 80, 22), Size::new(42, 22), Rect::new(19, 1, 42, 22))]
    #[case(Rect::new(5, 7, 20, 10), Size::new(20, 10), Rect::new(5, 7, 20, 10))]
    #[case(Rect::new(5, 7, 20, 10), Size::new(10, 4), Rect::new(10, 10, 10, 4))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] r: Rect) {
        assert_eq!(center_rect(area, size), r);
    }

    #[test]
    fn display_area_in_large_terminal() {
        assert_eq!(
            get_display_area(Rect::new(0, 0, 100, 30)),
            Rect::new(10, 3, 80, 24)
        );
    }
}
