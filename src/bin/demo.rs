//! Interactive demo: a declarative dialog driven over a ratatui backend.
//!
//! Keys: `s` toggles the dialog, `y`/`n` resolve it, `Esc` goes through the
//! global shortcut table, mouse clicks are hit-tested against the dialog
//! surface, `q` quits.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::info;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use dialog_adapter::{
    DialogAdapter, DialogKind, DialogProps, Document, PointerEvent, Shortcuts, TuiBackend,
};

/// Interaction outcomes, queued by the prop callbacks and drained by the
/// event loop so no callback ever re-enters the adapter mid-dispatch.
#[derive(Debug, Clone, Copy)]
enum DemoEvent {
    Confirmed,
    Cancelled,
    Closed,
    EscapePressed,
    ClickedOutside,
}

fn main() -> Result<()> {
    // Log to file so the alternate screen stays clean.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("dialog-demo.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    info!("Starting dialog-demo");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let document = Rc::new(RefCell::new(Document::new()));
    let shortcuts = Rc::new(RefCell::new(Shortcuts::new()));
    let root = document.borrow_mut().create_element(None, None);

    let queue: Rc<RefCell<Vec<DemoEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let push = |event: DemoEvent| {
        let queue = queue.clone();
        move || queue.borrow_mut().push(event)
    };

    // Built once so handler identity stays stable across prop updates.
    let confirmed = queue.clone();
    let base_props = DialogProps::new("Delete everything?")
        .text("This cannot be undone. Are you sure?")
        .kind(DialogKind::Warning)
        .show_cancel_button(true)
        .on_confirm(Rc::new(move |_| {
            confirmed.borrow_mut().push(DemoEvent::Confirmed)
        }))
        .on_cancel(Rc::new(push(DemoEvent::Cancelled)))
        .on_close(Rc::new(push(DemoEvent::Closed)))
        .on_escape_key(Rc::new(push(DemoEvent::EscapePressed)))
        .on_outside_click(Rc::new(push(DemoEvent::ClickedOutside)));

    let backend = TuiBackend::new(document.clone());
    let mut adapter = DialogAdapter::mount(
        backend.clone(),
        document.clone(),
        shortcuts.clone(),
        base_props.clone(),
    )?;

    let mut shown = false;
    let mut status = String::from("press s to open the dialog");

    loop {
        terminal.draw(|frame| {
            let lines = vec![
                Line::from("dialog-adapter demo"),
                Line::default(),
                Line::from("s: toggle dialog   y/n: resolve   Esc: escape hook   q: quit"),
                Line::default(),
                Line::from(format!("status: {status}")),
            ];
            frame.render_widget(
                Paragraph::new(lines).style(Style::default().fg(Color::Gray)),
                frame.area(),
            );
            backend.render(frame);
        })?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('s') => {
                        shown = !shown;
                        adapter.apply(base_props.clone().show(shown))?;
                    }
                    KeyCode::Char('y') => {
                        backend.resolve(true);
                    }
                    KeyCode::Char('n') => {
                        backend.resolve(false);
                    }
                    code => {
                        shortcuts.borrow().dispatch(code);
                    }
                },
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        let target = backend.hit_test(mouse.column, mouse.row).unwrap_or(root);
                        document.borrow().dispatch(PointerEvent::mouse_down(target));
                    }
                }
                _ => {}
            }
        }

        // Drain queued interaction outcomes; dismissal is decided here, by
        // the host, never by the dialog itself.
        let drained: Vec<DemoEvent> = queue.borrow_mut().drain(..).collect();
        for demo_event in drained {
            info!("demo event: {demo_event:?}");
            match demo_event {
                DemoEvent::Confirmed => {
                    status = "confirmed".to_string();
                    shown = false;
                    adapter.apply(base_props.clone().show(false))?;
                }
                DemoEvent::Cancelled => {
                    status = "cancelled".to_string();
                    shown = false;
                    adapter.apply(base_props.clone().show(false))?;
                }
                DemoEvent::EscapePressed => {
                    status = "escape pressed".to_string();
                    shown = false;
                    adapter.apply(base_props.clone().show(false))?;
                }
                DemoEvent::ClickedOutside => {
                    if shown {
                        status = "clicked outside".to_string();
                        shown = false;
                        adapter.apply(base_props.clone().show(false))?;
                    }
                }
                DemoEvent::Closed => {
                    status = format!("{status} (closed)");
                }
            }
        }
    }

    adapter.teardown()?;
    Ok(())
}
