use crate::{
    app::{Action, App, Update},
    client::FanClient,
    poller, submitter,
};
use chrono::Utc;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table},
    DefaultTerminal, Frame,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{Receiver, Sender};

pub(crate) struct Settings {
    pub(crate) poll_interval: Duration,
    pub(crate) warning_duration: Duration,
}

pub(crate) async fn run(client: FanClient, settings: Settings) -> Result<(), io::Error> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(64);
    let (exit_tx, exit_rx) = tokio::sync::watch::channel(false);

    let handle = tokio::spawn(poller::run(
        client.clone(),
        settings.poll_interval,
        tx.clone(),
        exit_rx,
    ));

    let mut app = App::new(settings.warning_duration);

    let mut terminal = ratatui::init();

    let result = event_loop(&mut terminal, &mut app, &client, &tx, &mut rx);

    let _ = exit_tx.send(true);
    let _ = handle.await;

    ratatui::restore();

    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    client: &FanClient,
    tx: &Sender<Update>,
    rx: &mut Receiver<Update>,
) -> Result<(), io::Error> {
    loop {
        terminal.draw(|f| draw(f, app, Instant::now()))?;

        // Handle keyboard input
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.handle_key(key) {
                        Action::Quit => break,
                        action => dispatch(app, client, tx, action, Instant::now()),
                    }
                }
            }
        }

        // Handle responses
        while let Ok(update) = rx.try_recv() {
            app.apply(update);
        }
    }

    Ok(())
}

/// Carries out a key press action, warning on the banner when the input was adjusted or rejected.
fn dispatch(app: &mut App, client: &FanClient, tx: &Sender<Update>, action: Action, now: Instant) {
    match action {
        Action::Submit(input) => match submitter::submit(client, &input, tx) {
            Ok(clamped) => {
                if let Some(warning) = clamped.warning() {
                    app.warn(warning, now);
                }
            }
            Err(e) => app.warn(e.to_string(), now),
        },
        Action::ToggleFan => submitter::toggle(client, tx),
        Action::Quit | Action::None => {}
    }
}

fn draw(f: &mut Frame, app: &mut App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let header = Row::new(vec!["Parameter", "Value", "Age", "Last Updated"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::UNDERLINED),
    );

    let utc_now = Utc::now();

    let rows: Vec<Row> = app
        .items
        .iter()
        .map(|item| {
            Row::new(vec![
                item.name.to_string(),
                item.value
                    .clone()
                    .unwrap_or_else(|| "<unknown>".to_string()),
                (utc_now - item.updated).num_seconds().to_string(),
                item.updated.to_string(),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(10),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::Black));

    f.render_stateful_widget(table, chunks[0], &mut app.table_state);

    let input = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Fan output (0-100)"),
    );
    f.render_widget(input, chunks[1]);

    if let Some(warning) = app.warning(now) {
        let warning = Paragraph::new(Line::from(warning.to_string())).style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(warning, chunks[2]);
    }

    let help = Paragraph::new("Enter: set output  Ctrl-T: toggle fan  Up/Down: select  Esc: quit")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}
