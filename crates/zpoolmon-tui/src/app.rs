//! Application core — the render loop over the pool board snapshot.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tokio::sync::watch;
use tracing::info;

use crate::board::PoolSlotView;
use crate::event::{Event, EventReader};
use crate::theme;
use crate::tui::Tui;
use crate::widgets::pool_status;

/// What woke the main loop up.
enum Wake {
    Terminal(Option<Event>),
    Snapshot(bool),
}

/// Top-level application state and event loop.
pub struct App {
    running: bool,
    /// Latest board snapshot, pushed by the monitor's poll task.
    pools: watch::Receiver<Arc<Vec<PoolSlotView>>>,
    /// Completion timestamp of the most recent sweep.
    last_sweep: watch::Receiver<Option<DateTime<Utc>>>,
}

impl App {
    pub fn new(
        pools: watch::Receiver<Arc<Vec<PoolSlotView>>>,
        last_sweep: watch::Receiver<Option<DateTime<Utc>>>,
    ) -> Self {
        Self {
            running: true,
            pools,
            last_sweep,
        }
    }

    /// Run the render loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let mut events = EventReader::new(Duration::from_millis(250));
        info!("status board event loop started");

        while self.running {
            let wake = tokio::select! {
                event = events.next() => Wake::Terminal(event),
                changed = self.pools.changed() => Wake::Snapshot(changed.is_ok()),
            };

            match wake {
                Wake::Terminal(Some(Event::Key(key))) => self.on_key(key),
                // Resize and tick just fall through to the redraw.
                Wake::Terminal(Some(_)) | Wake::Snapshot(true) => {}
                // Reader or monitor gone: nothing left to show.
                Wake::Terminal(None) | Wake::Snapshot(false) => self.running = false,
            }

            tui.draw(|frame| self.draw(frame))?;
        }

        events.stop();
        tui.exit()?;
        info!("status board event loop stopped");
        Ok(())
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default())
            .title(Span::styled(" zpool status ", theme::title_style()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [body, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let pools = self.pools.borrow().clone();
        let line = if pools.is_empty() {
            Line::styled("no pools found", theme::footer_style())
        } else {
            let mut spans = Vec::new();
            for (i, view) in pools.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.extend(pool_status::pool_spans(view));
            }
            Line::from(spans)
        };
        frame.render_widget(Paragraph::new(line), body);

        let footer_line = Line::styled(self.footer_text(pools.len()), theme::footer_style());
        frame.render_widget(Paragraph::new(footer_line), footer);
    }

    fn footer_text(&self, pool_count: usize) -> String {
        let stamp = *self.last_sweep.borrow();
        match stamp.map(|stamp| Utc::now() - stamp) {
            Some(age) => {
                let secs = u64::try_from(age.num_seconds()).unwrap_or(0);
                format!(
                    "{pool_count} pools | updated {} ago | q to quit",
                    humantime::format_duration(Duration::from_secs(secs))
                )
            }
            None => format!("{pool_count} pools | waiting for first sweep | q to quit"),
        }
    }
}
