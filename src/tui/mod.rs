//! TUI module - Terminal activity dashboard with ratatui

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Gauge, List, ListItem, Paragraph, Row, Table},
};
use std::io::{stdout, Stdout};

use crate::clock::Clock;
use crate::format::{format_duration, format_muscle_name, format_relative_date};
use crate::stats::{ActivitySummary, Analytics, EXERCISE_GOAL_MIN, MOVE_GOAL_KCAL};
use crate::store::{AppStore, QUICK_ADD_ML};
use crate::tips::tip_of_the_day;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Glass size added or removed by `w` / `x`
const GLASS_ML: u32 = QUICK_ADD_ML[0];

/// App state for TUI
pub struct App<C: Clock> {
    store: AppStore<C>,
    should_quit: bool,
}

impl<C: Clock> App<C> {
    pub fn new(store: AppStore<C>) -> Self {
        Self {
            store,
            should_quit: false,
        }
    }

    /// Hand the (possibly modified) store back for persisting
    pub fn into_store(self) -> AppStore<C> {
        self.store
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }

        restore_terminal()?;
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let summary = ActivitySummary::from_store(&self.store);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(9),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(area);

        // Header
        let title = match &self.store.auth.user {
            Some(user) => format!("WellnessHub - {} - {}", user.display_name(), summary.date),
            None => format!("WellnessHub - {}", summary.date),
        };
        let header = Paragraph::new(title)
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        // Rings
        let rings = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3); 3])
            .split(chunks[1]);
        let gauges = [
            (
                format!("Water {} / {} ml", summary.water_ml, summary.water_goal_ml),
                summary.water_ring(),
                Color::Blue,
            ),
            (
                format!("Move {} / {} kcal", summary.calories, MOVE_GOAL_KCAL),
                summary.move_ring(),
                Color::Red,
            ),
            (
                format!("Exercise {} / {} min", summary.minutes, EXERCISE_GOAL_MIN),
                summary.exercise_ring(),
                Color::Green,
            ),
        ];
        for ((label, percent, color), rect) in gauges.into_iter().zip(rings.iter()) {
            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL).title(label))
                .gauge_style(Style::default().fg(color))
                .percent(percent.round() as u16);
            frame.render_widget(gauge, *rect);
        }

        // History and favorites side by side
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);

        let history = self.store.workout.history();
        let rows: Vec<Row> = history
            .iter()
            .map(|h| {
                Row::new(vec![
                    Cell::from(format_relative_date(h.date, summary.date)),
                    Cell::from(h.name.clone()),
                    Cell::from(format_duration(h.duration)),
                    Cell::from(format!("{} kcal", h.calories)),
                ])
            })
            .collect();
        let streak = Analytics::new(history).streak_days(summary.date);
        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Min(16),
                Constraint::Length(9),
                Constraint::Length(9),
            ],
        )
        .header(Row::new(vec!["Date", "Workout", "Time", "Burned"]).style(Style::default().bold()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Workouts (streak: {} days)", streak)),
        );
        frame.render_widget(table, body[0]);

        let favorites: Vec<ListItem> = self
            .store
            .favorites
            .items()
            .iter()
            .map(|f| {
                ListItem::new(format!(
                    "♥ {} ({})",
                    f.exercise.name,
                    format_muscle_name(&f.exercise.muscle)
                ))
            })
            .collect();
        let list = List::new(favorites).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Favorites ({})", summary.favorites)),
        );
        frame.render_widget(list, body[1]);

        // Footer
        let tip = tip_of_the_day(summary.date);
        let footer = Paragraph::new(vec![
            Line::from(format!("{} {}: {}", tip.category.emoji(), tip.title, tip.text)),
            Line::from(format!(
                "q: quit | w: +{glass} ml | x: -{glass} ml | 1-{}: quick add | r: reset water",
                QUICK_ADD_ML.len(),
                glass = GLASS_ML
            ))
            .fg(Color::DarkGray),
        ])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[3]);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => self.should_quit = true,
                        KeyCode::Char('w') => self.store.add_water(GLASS_ML),
                        KeyCode::Char('x') => self.store.remove_water(GLASS_ML),
                        KeyCode::Char('r') => self.store.reset_water(),
                        KeyCode::Char(c) => {
                            if let Some(ml) = quick_add_amount(c) {
                                self.store.add_water(ml);
                            }
                        }
                        _ => {}
                    }
                }
        Ok(())
    }
}

/// Preset for a digit key: '1' is the first quick-add size
fn quick_add_amount(key: char) -> Option<u32> {
    let index = key.to_digit(10)?.checked_sub(1)?;
    QUICK_ADD_ML.get(index as usize).copied()
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
