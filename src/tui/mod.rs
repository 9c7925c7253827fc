use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::backend::{DialogBackend, ResultCallback, SURFACE_CLASS};
use crate::config::DialogConfig;
use crate::dom::{Document, ElementId};
use crate::props::DialogKind;

struct ActiveDialog {
    config: DialogConfig,
    on_result: ResultCallback,
    surface: ElementId,
    area: Rect,
    resolved: bool,
}

#[derive(Default)]
struct Inner {
    active: Option<ActiveDialog>,
}

/// Reference [`DialogBackend`] that renders the active config as a centered
/// ratatui modal over a dimmed backdrop.
///
/// Cheap-clone handle: the adapter owns one clone for show/close while the
/// render loop holds another for drawing and hit testing. The rendered
/// surface is mirrored as a [`SURFACE_CLASS`] element in the shared
/// [`Document`] so outside-click detection sees it.
#[derive(Clone)]
pub struct TuiBackend {
    inner: Rc<RefCell<Inner>>,
    document: Rc<RefCell<Document>>,
}

impl TuiBackend {
    pub fn new(document: Rc<RefCell<Document>>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner::default())),
            document,
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.borrow().active.is_some()
    }

    /// Document element backing the rendered dialog surface.
    pub fn surface_element(&self) -> Option<ElementId> {
        self.inner.borrow().active.as_ref().map(|active| active.surface)
    }

    /// Screen region the dialog occupied on the last render.
    pub fn surface_rect(&self) -> Option<Rect> {
        self.inner.borrow().active.as_ref().map(|active| active.area)
    }

    /// Map a terminal cell to the dialog surface, if it falls inside it.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ElementId> {
        let inner = self.inner.borrow();
        let active = inner.active.as_ref()?;
        let area = active.area;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        inside.then_some(active.surface)
    }

    /// Deliver the user's choice. Fires the result callback at most once per
    /// shown dialog; the dialog stays visible until the adapter closes it.
    pub fn resolve(&self, confirmed: bool) -> bool {
        let mut callback = {
            let mut inner = self.inner.borrow_mut();
            let Some(active) = inner.active.as_mut() else {
                return false;
            };
            if active.resolved {
                return false;
            }
            active.resolved = true;
            std::mem::replace(&mut active.on_result, Box::new(|_| {}))
        };
        // Invoked with the borrow released so the callback may reach back
        // into the backend or the document.
        callback(confirmed);
        true
    }

    /// Draw the active dialog, if any, over the full frame.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let mut inner = self.inner.borrow_mut();
        let Some(active) = inner.active.as_mut() else {
            return;
        };

        // Dim everything below the modal layer.
        let backdrop = Block::default().style(Style::default().bg(Color::Rgb(0x31, 0x32, 0x44)));
        frame.render_widget(backdrop, area);

        let width = 50.min(area.width);
        let content_width = width.saturating_sub(2);
        let dialog_area = centered(area, width, dialog_height(&active.config, content_width));
        active.area = dialog_area;

        frame.render_widget(Clear, dialog_area);
        let accent = hex_color(&active.config.confirm_button_color).unwrap_or(Color::Cyan);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(kind_color(active.config.kind, accent)))
            .title(active.config.title.clone());
        let content = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);
        if content.height == 0 {
            return;
        }

        // Last content row is reserved for the buttons so wrapped text can
        // never push them out of the block.
        let button_area = Rect {
            y: content.y + content.height - 1,
            height: 1,
            ..content
        };
        let body_area = Rect {
            height: content.height - 1,
            ..content
        };

        let mut lines: Vec<Line> = Vec::new();
        if let Some(text) = &active.config.text {
            lines.push(Line::from(text.clone()));
        }
        if active.config.kind == Some(DialogKind::Input) {
            let value = active
                .config
                .input_value
                .clone()
                .or_else(|| active.config.input_placeholder.clone())
                .unwrap_or_default();
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("> {value}"),
                Style::default().add_modifier(Modifier::UNDERLINED),
            )));
        }
        let body = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(body, body_area);
        frame.render_widget(Paragraph::new(button_row(active, accent)), button_area);
    }
}

impl DialogBackend for TuiBackend {
    fn show(&mut self, config: DialogConfig, on_result: ResultCallback) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        let mut document = self.document.borrow_mut();

        // Every update replaces the current dialog wholesale.
        if let Some(previous) = inner.active.take() {
            document.remove_element(previous.surface);
        }
        let surface = document.create_element(None, Some(SURFACE_CLASS));
        inner.active = Some(ActiveDialog {
            config,
            on_result,
            surface,
            area: Rect::default(),
            resolved: false,
        });
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if let Some(active) = inner.active.take() {
            self.document.borrow_mut().remove_element(active.surface);
        }
        Ok(())
    }
}

fn dialog_height(config: &DialogConfig, content_width: u16) -> u16 {
    let mut height = 4; // borders + spacing + button row
    if let Some(text) = &config.text {
        height += wrapped_line_count(text, content_width);
    }
    if config.kind == Some(DialogKind::Input) {
        height += 2;
    }
    height
}

/// Rows a word-wrapped paragraph needs at the given width. May overestimate
/// for words longer than the width, which only makes the dialog taller.
fn wrapped_line_count(text: &str, width: u16) -> u16 {
    if text.is_empty() {
        return 1;
    }
    let width = width.max(1) as usize;
    let mut lines: u16 = 1;
    let mut used = 0usize;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        let needed = if used == 0 { len } else { len + 1 };
        if used + needed <= width {
            used += needed;
        } else {
            lines += (1 + len.saturating_sub(1) / width) as u16;
            used = (len.saturating_sub(1) % width) + 1;
        }
    }
    lines
}

fn centered(container: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(container.width);
    let height = height.min(container.height);
    Rect {
        x: container.x + (container.width.saturating_sub(width)) / 2,
        y: container.y + (container.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

fn button_row(active: &ActiveDialog, accent: Color) -> Line<'static> {
    let config = &active.config;
    let mut spans: Vec<Span> = Vec::new();
    if config.show_confirm_button {
        let label = if active.resolved && config.show_loader_on_confirm {
            "...".to_string()
        } else {
            config.confirm_button_text.clone()
        };
        spans.push(Span::styled(
            format!("[ {label} ]"),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));
    }
    if config.show_cancel_button {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::raw(format!("[ {} ]", config.cancel_button_text)));
    }
    Line::from(spans)
}

fn kind_color(kind: Option<DialogKind>, fallback: Color) -> Color {
    match kind {
        Some(DialogKind::Error) => Color::Rgb(0xf3, 0x8b, 0xa8),
        Some(DialogKind::Warning) => Color::Rgb(0xf9, 0xe2, 0xaf),
        Some(DialogKind::Success) => Color::Rgb(0xa6, 0xe3, 0xa1),
        Some(DialogKind::Info) => Color::Rgb(0x89, 0xb4, 0xfa),
        Some(DialogKind::Input) | None => fallback,
    }
}

/// Parse a `#RRGGBB` color, as used by `confirm_button_color`.
fn hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::DialogProps;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::cell::Cell;

    fn shown_backend(props: &DialogProps) -> TuiBackend {
        let document = Rc::new(RefCell::new(Document::new()));
        let mut backend = TuiBackend::new(document);
        backend
            .show(DialogConfig::from_props(props), Box::new(|_| {}))
            .unwrap();
        backend
    }

    #[test]
    fn show_creates_a_surface_element() {
        let backend = shown_backend(&DialogProps::new("T"));
        let surface = backend.surface_element().unwrap();
        let document = backend.document.clone();
        assert_eq!(
            document.borrow().elements_by_class(SURFACE_CLASS),
            vec![surface]
        );
    }

    #[test]
    fn reshow_replaces_the_surface() {
        let mut backend = shown_backend(&DialogProps::new("T"));
        let first = backend.surface_element().unwrap();
        backend
            .show(
                DialogConfig::from_props(&DialogProps::new("T2")),
                Box::new(|_| {}),
            )
            .unwrap();
        let second = backend.surface_element().unwrap();
        assert_ne!(first, second);
        assert_eq!(
            backend.document.borrow().elements_by_class(SURFACE_CLASS).len(),
            1
        );
    }

    #[test]
    fn close_removes_the_surface() {
        let mut backend = shown_backend(&DialogProps::new("T"));
        backend.close().unwrap();
        assert!(!backend.is_active());
        assert!(
            backend
                .document
                .borrow()
                .elements_by_class(SURFACE_CLASS)
                .is_empty()
        );
    }

    #[test]
    fn resolve_fires_at_most_once_and_keeps_the_dialog() {
        let document = Rc::new(RefCell::new(Document::new()));
        let mut backend = TuiBackend::new(document);
        let fired = Rc::new(Cell::new(0));
        let count = fired.clone();
        backend
            .show(
                DialogConfig::from_props(&DialogProps::new("T")),
                Box::new(move |confirmed| {
                    assert!(confirmed);
                    count.set(count.get() + 1);
                }),
            )
            .unwrap();

        assert!(backend.resolve(true));
        assert!(!backend.resolve(true));
        assert_eq!(fired.get(), 1);
        // Still visible until the adapter closes it.
        assert!(backend.is_active());
    }

    #[test]
    fn render_and_hit_test() {
        let backend = shown_backend(
            &DialogProps::new("Delete?")
                .text("This cannot be undone.")
                .show_cancel_button(true),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| backend.render(frame)).unwrap();

        let rect = backend.surface_rect().unwrap();
        assert!(rect.width > 0 && rect.height > 0);
        let surface = backend.surface_element().unwrap();
        assert_eq!(backend.hit_test(rect.x, rect.y), Some(surface));
        assert_eq!(backend.hit_test(0, 0), None);
    }

    #[test]
    fn render_without_active_dialog_is_a_no_op() {
        let document = Rc::new(RefCell::new(Document::new()));
        let backend = TuiBackend::new(document);
        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        terminal.draw(|frame| backend.render(frame)).unwrap();
        assert!(backend.surface_rect().is_none());
    }

    #[test]
    fn hex_color_parses_the_default_accent() {
        assert_eq!(hex_color("#AEDEF4"), Some(Color::Rgb(0xae, 0xde, 0xf4)));
        assert_eq!(hex_color("red"), None);
        assert_eq!(hex_color("#12345"), None);
        // 6 bytes but not 6 ASCII digits; must fall back, not panic.
        assert_eq!(hex_color("#aéaaa"), None);
    }

    #[test]
    fn non_ascii_accent_color_renders_with_the_fallback() {
        let backend =
            shown_backend(&DialogProps::new("T").confirm_button_color("#aéaaa"));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| backend.render(frame)).unwrap();
        assert!(backend.surface_rect().is_some());
    }

    #[test]
    fn long_text_never_hides_the_button_row() {
        let backend = shown_backend(&DialogProps::new("Notice").text("word ".repeat(40)));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| backend.render(frame)).unwrap();

        // Taller than the single-line budget: the text wraps across rows.
        let rect = backend.surface_rect().unwrap();
        assert!(rect.height > 5, "dialog height {} too small", rect.height);

        let buffer = terminal.backend().buffer();
        let mut screen = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                screen.push_str(buffer.content[(y * buffer.area.width + x) as usize].symbol());
            }
            screen.push('\n');
        }
        assert!(screen.contains("[ OK ]"), "button row clipped:\n{screen}");
    }

    #[test]
    fn wrapped_line_count_tracks_width() {
        assert_eq!(wrapped_line_count("", 48), 1);
        assert_eq!(wrapped_line_count("short", 48), 1);
        // 40 four-char words at 48 columns: nine words per line.
        assert_eq!(wrapped_line_count(&"word ".repeat(40), 48), 5);
    }
}
