// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row): league, week, tab bar        |
// +--------------------------------------------------+
// | Banner (3 rows): load progress or warnings       |
// +--------------------------------------------------+
// | Main Panel: the active tab's table               |
// +--------------------------------------------------+
// | Help Bar (1 row)                                 |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub banner: Rect,
    pub main_panel: Rect,
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // banner
            Constraint::Min(5),    // main panel
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        banner: vertical[1],
        main_panel: vertical[2],
        help_bar: vertical[3],
    }
}

/// A `width` x `height` rectangle centered in `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        for (name, rect) in [
            ("status_bar", layout.status_bar),
            ("banner", layout.banner),
            ("main_panel", layout.main_panel),
            ("help_bar", layout.help_bar),
        ] {
            assert!(
                rect.width > 0 && rect.height > 0,
                "{} has zero area: {:?}",
                name,
                rect
            );
        }
    }

    #[test]
    fn fixed_rows_keep_their_height() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.banner.height, 3);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.main_panel.height, 35);
    }

    #[test]
    fn zones_stack_without_overlap() {
        let layout = build_layout(test_area());
        assert_eq!(layout.banner.y, layout.status_bar.bottom());
        assert_eq!(layout.main_panel.y, layout.banner.bottom());
        assert_eq!(layout.help_bar.y, layout.main_panel.bottom());
        assert_eq!(layout.help_bar.bottom(), 40);
    }

    #[test]
    fn centered_rect_is_clipped() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered(area, 20, 4);
        assert_eq!((r.width, r.height), (20, 4));
        assert_eq!((r.x, r.y), (10, 3));

        let r = centered(area, 100, 100);
        assert_eq!(r, area);
    }
}
