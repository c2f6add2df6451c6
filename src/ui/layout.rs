use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Header, body and a footer tall enough for the packed key hints.
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, footer_lines: u16) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(footer_lines.max(1)),
            ])
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            footer: vertical[2],
        }
    }
}

/// Greedily pack hints into as few lines of `width` as possible.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

/// A rect of the given percentages centered in `area`, grown to a readable
/// minimum when the terminal allows.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 14;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_wrap_when_too_wide() {
        let lines = pack_hint_lines(&["[Ctrl+S] Save", "[Ctrl+Z] Undo", "[Tab] Next"], 30);
        assert_eq!(lines, vec![" [Ctrl+S] Save  [Ctrl+Z] Undo", " [Tab] Next"]);
    }

    #[test]
    fn hints_empty_for_zero_width() {
        assert!(pack_hint_lines(&["[q] Quit"], 0).is_empty());
    }

    #[test]
    fn centered_rect_stays_inside_small_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(50, 50, area);
        assert_eq!(rect, Rect::new(0, 0, 40, 10));

        let big = Rect::new(0, 0, 200, 60);
        let rect = centered_rect(50, 50, big);
        assert_eq!(rect, Rect::new(50, 15, 100, 30));
    }
}
