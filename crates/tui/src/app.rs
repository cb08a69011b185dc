//! Wizard state machine and event loop.
//!
//! `App` owns everything on screen: the discovered skills, the current
//! [`WizardView`], the per-skill form, and the build log. Key presses drive
//! the view transitions; deploy progress arrives as [`Event`]s from the core
//! session and is folded into the same state.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use sk_core::config::SettingsStore;
use sk_core::deploy::skill_exists;
use sk_core::skill::{DiscoveredSkills, SkillError};
use sk_protocol::ipc::{Event, Op};
use sk_protocol::manifest::{Manifest, VariableKind};
use sk_protocol::report::DeployReport;
use sk_protocol::settings::UserSettings;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::select;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio_stream::StreamExt;

use crate::tui::{Tui, TuiEvent};
use crate::widgets::{render_skill_list, BuildLog, SkillForm};

/// The wizard's screens.
///
/// ```text
/// SkillList -> Configure -> Confirm -> Building -> Done
///                              |           ^
///                              v           |
///                          Overwrite ------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardView {
    SkillList,
    Configure,
    Confirm,
    Overwrite,
    Building,
    Done,
}

/// Wizard state plus the channels to the core session.
pub struct App {
    /// Workspace root the skills were discovered under.
    root: PathBuf,
    /// Version string shown in the header.
    version: String,
    /// Manifests that loaded cleanly.
    skills: Vec<Manifest>,
    /// Skills whose manifest failed to load, listed after the valid ones.
    skill_errors: Vec<SkillError>,
    /// Settings store, absent when no home directory is known.
    settings: Option<SettingsStore>,

    view: WizardView,
    /// Cursor over skill rows and error rows together.
    cursor: usize,
    /// Index into `skills` of the skill being configured or deployed.
    selected: Option<usize>,
    /// Index into `skill_errors` whose details are shown on the list screen.
    selected_error: Option<usize>,
    /// The Configure screen's form, built when a skill is opened.
    form: Option<SkillForm>,

    /// Entered variable values, remembered per skill for re-entry.
    saved_values: BTreeMap<String, BTreeMap<String, String>>,
    /// Chosen deploy folder names, remembered per skill.
    saved_folder_names: BTreeMap<String, String>,
    /// The skills folder of the current deploy target.
    skills_folder: String,
    /// The folder name of the current deploy target.
    skill_folder_name: String,

    status_message: String,
    error_message: String,
    build_log: BuildLog,
    /// Report of the last successful deploy.
    report: Option<DeployReport>,
    /// Height of the log pane at the last draw, for scroll stepping.
    log_viewport: usize,

    /// Channel to send operations to the core session.
    op_tx: UnboundedSender<Op>,
    /// Channel to receive progress events from the core session.
    event_rx: UnboundedReceiver<Event>,
    should_exit: bool,
}

impl App {
    /// Creates the wizard over an already-discovered set of skills.
    pub fn new(
        root: PathBuf,
        version: String,
        discovered: DiscoveredSkills,
        settings: Option<SettingsStore>,
        op_tx: UnboundedSender<Op>,
        event_rx: UnboundedReceiver<Event>,
    ) -> Self {
        let skills_folder = settings
            .as_ref()
            .map(|store| store.load().skills_folder.unwrap_or_default())
            .unwrap_or_default();

        Self {
            root,
            version,
            skills: discovered.skills,
            skill_errors: discovered.errors,
            settings,
            view: WizardView::SkillList,
            cursor: 0,
            selected: None,
            selected_error: None,
            form: None,
            saved_values: BTreeMap::new(),
            saved_folder_names: BTreeMap::new(),
            skills_folder,
            skill_folder_name: String::new(),
            status_message: String::new(),
            error_message: String::new(),
            build_log: BuildLog::new(),
            report: None,
            log_viewport: 10,
            op_tx,
            event_rx,
            should_exit: false,
        }
    }

    /// Main event loop.
    ///
    /// Uses `tokio::select!` to handle keyboard input and core events
    /// concurrently; every state change schedules a redraw.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut tui_events = tui.event_stream();

        tui.frame_requester().schedule_frame();

        while !self.should_exit {
            select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_core_event(event);
                    tui.frame_requester().schedule_frame();
                }
                Some(tui_event) = tui_events.next() => {
                    self.handle_tui_event(tui, tui_event)?;
                }
            }
        }

        Ok(())
    }

    fn handle_tui_event(&mut self, tui: &mut Tui, event: TuiEvent) -> Result<()> {
        match event {
            TuiEvent::Key(key_event) => {
                self.handle_key_event(key_event);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Paste(pasted) => {
                self.handle_paste(&pasted);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Draw => {
                tui.draw(|frame| self.render(frame))?;
            }
        }
        Ok(())
    }

    /// Folds a deploy progress event into the wizard state.
    fn handle_core_event(&mut self, event: Event) {
        match event {
            Event::BuildStarted { skill } => {
                self.status_message = format!("Building {skill}...");
            }
            Event::BuildOutput { line } => {
                self.build_log.push(line);
            }
            Event::BuildFailed { message } => {
                self.error_message = message;
                self.status_message.clear();
                self.view = WizardView::Done;
            }
            Event::DeployFinished { report } => {
                self.status_message = "Skill deployed successfully!".to_string();
                self.report = Some(report);
                self.view = WizardView::Done;
            }
            Event::DeployFailed { message } => {
                self.error_message = message;
                self.status_message.clear();
                self.view = WizardView::Done;
            }
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Ctrl-C quits from every view, including mid-build.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_exit = true;
            return;
        }

        match self.view {
            WizardView::SkillList => self.handle_skill_list_keys(key),
            WizardView::Configure => self.handle_configure_keys(key),
            WizardView::Confirm => self.handle_confirm_keys(key),
            WizardView::Overwrite => self.handle_overwrite_keys(key),
            WizardView::Building => {}
            WizardView::Done => self.handle_done_keys(key),
        }
    }

    fn handle_paste(&mut self, text: &str) {
        if self.view == WizardView::Configure {
            if let Some(form) = &mut self.form {
                form.insert_paste(text);
            }
        }
    }

    fn handle_skill_list_keys(&mut self, key: KeyEvent) {
        let total = self.skills.len() + self.skill_errors.len();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if total > 0 && self.cursor < total - 1 {
                    self.cursor += 1;
                }
            }
            KeyCode::Enter => {
                if self.cursor < self.skills.len() {
                    self.open_configure(self.cursor);
                } else if self.cursor < total {
                    // An error row: show its details below the table.
                    self.selected_error = Some(self.cursor - self.skills.len());
                    self.selected = None;
                }
            }
            _ => {}
        }
    }

    /// Builds the form for the chosen skill and switches to Configure.
    fn open_configure(&mut self, index: usize) {
        let manifest = &self.skills[index];
        let saved = self.saved_values.get(&manifest.name);
        let folder = (!self.skills_folder.is_empty()).then_some(self.skills_folder.as_str());
        let folder_name = self
            .saved_folder_names
            .get(&manifest.name)
            .map(String::as_str);

        self.form = Some(SkillForm::from_manifest(manifest, saved, folder, folder_name));
        self.selected = Some(index);
        self.selected_error = None;
        self.error_message.clear();
        self.view = WizardView::Configure;
    }

    fn handle_configure_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.view = WizardView::SkillList;
                self.error_message.clear();
            }
            KeyCode::Tab | KeyCode::Down => {
                if let Some(form) = &mut self.form {
                    form.focus_next();
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(form) = &mut self.form {
                    form.focus_prev();
                }
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit_form();
            }
            _ => {
                // Everything else is text input for the focused field.
                if let Some(form) = &mut self.form {
                    form.handle_key(key);
                }
            }
        }
    }

    /// Validates the form; on success stores the values and moves to Confirm.
    fn submit_form(&mut self) {
        let Some(form) = &self.form else { return };
        let Some(index) = self.selected else { return };

        if let Some(label) = form.first_missing() {
            self.error_message = format!("{label} is required");
            return;
        }

        let skill_name = self.skills[index].name.clone();
        let values = form.variable_values();
        let skills_folder = form.skills_folder().to_string();
        let folder_name = form.skill_name().to_string();

        self.saved_values.insert(skill_name.clone(), values);
        self.saved_folder_names
            .insert(skill_name, folder_name.clone());
        self.skills_folder = skills_folder;
        self.skill_folder_name = folder_name;

        self.error_message.clear();
        self.persist_skills_folder();
        self.view = WizardView::Confirm;
    }

    /// Remembers the skills folder for the next run. Failing to write the
    /// settings file is not worth blocking a deploy over.
    fn persist_skills_folder(&mut self) {
        let Some(store) = &self.settings else { return };

        let settings = UserSettings {
            skills_folder: Some(self.skills_folder.clone()),
        };
        if let Err(e) = store.save(&settings) {
            self.status_message = format!("Could not save settings: {e}");
        }
    }

    fn handle_confirm_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => {
                if let Some(form) = &mut self.form {
                    form.focus_first();
                }
                self.view = WizardView::Configure;
            }
            KeyCode::Enter | KeyCode::Char('y') => {
                if self.deploy_target_exists() {
                    self.view = WizardView::Overwrite;
                } else {
                    self.start_deploy();
                }
            }
            _ => {}
        }
    }

    fn handle_overwrite_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => self.view = WizardView::Confirm,
            // Only an explicit `y` overwrites; Enter does nothing here.
            KeyCode::Char('y') => self.start_deploy(),
            _ => {}
        }
    }

    fn handle_done_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
            KeyCode::Char('r') => self.reset_to_list(),
            KeyCode::Up => self.build_log.scroll_up(),
            KeyCode::Down => self.build_log.scroll_down(self.log_viewport),
            KeyCode::PageUp => self.build_log.page_up(self.log_viewport),
            KeyCode::PageDown => self.build_log.page_down(self.log_viewport),
            _ => {}
        }
    }

    /// Hands the deploy to the core session and switches to Building.
    fn start_deploy(&mut self) {
        let Some(manifest) = self.selected.and_then(|i| self.skills.get(i)).cloned() else {
            return;
        };
        let values = self
            .saved_values
            .get(&manifest.name)
            .cloned()
            .unwrap_or_default();
        let deploy_dir = self.deploy_dir();

        self.view = WizardView::Building;
        self.error_message.clear();
        self.status_message.clear();
        self.build_log.clear();
        self.report = None;

        let _ = self.op_tx.send(Op::StartDeploy {
            root: self.root.clone(),
            manifest,
            deploy_dir,
            values,
        });
    }

    /// Back to the skill list for another round. Keeps the discovered skills
    /// and the remembered form values.
    fn reset_to_list(&mut self) {
        self.view = WizardView::SkillList;
        self.status_message.clear();
        self.error_message.clear();
        self.build_log.clear();
        self.report = None;
        self.selected = None;
        self.selected_error = None;
        self.form = None;
    }

    fn deploy_dir(&self) -> PathBuf {
        PathBuf::from(&self.skills_folder).join(&self.skill_folder_name)
    }

    fn deploy_target_exists(&self) -> bool {
        match self.selected.and_then(|i| self.skills.get(i)) {
            Some(manifest) => skill_exists(manifest, &self.deploy_dir()),
            None => false,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        match self.view {
            WizardView::SkillList => self.render_skill_list_view(frame, chunks[1]),
            WizardView::Configure => self.render_configure_view(frame, chunks[1]),
            WizardView::Confirm => self.render_confirm_view(frame, chunks[1]),
            WizardView::Overwrite => self.render_overwrite_view(frame, chunks[1]),
            WizardView::Building => self.render_building_view(frame, chunks[1]),
            WizardView::Done => self.render_done_view(frame, chunks[1]),
        }
        self.render_footer(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let muted = Style::default().fg(Color::DarkGray);
        let lines = vec![
            Line::from(vec![
                Span::styled("Skill Kit", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!(" v{}", self.version), muted),
            ]),
            Line::from(Span::styled(self.root.display().to_string(), muted)),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let help = match self.view {
            WizardView::SkillList => "↑/↓ move • Enter select • q quit",
            WizardView::Configure => "Tab/↓ next • Shift-Tab/↑ prev • Enter continue • Esc back",
            WizardView::Confirm => "y/Enter deploy • n/Esc back",
            WizardView::Overwrite => "y overwrite • n/Esc back",
            WizardView::Building => "Ctrl-C quit",
            WizardView::Done => "r deploy another • ↑/↓ scroll output • Enter/q quit",
        };

        let mut lines = vec![Line::from(Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        ))];
        if !self.error_message.is_empty() {
            lines.push(Line::from(Span::styled(
                self.error_message.clone(),
                Style::default().fg(Color::Red),
            )));
        } else if !self.status_message.is_empty() {
            lines.push(Line::from(Span::styled(
                self.status_message.clone(),
                Style::default().fg(Color::Green),
            )));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_skill_list_view(&self, frame: &mut Frame, area: Rect) {
        if self.skills.is_empty() && self.skill_errors.is_empty() {
            let block = Block::default().borders(Borders::ALL).title("Skills");
            let text = "No skills found.\n\nAdd one under skills/<name>/skill.yaml, or scaffold one with `skillkit new <name>`.";
            frame.render_widget(Paragraph::new(text).block(block), area);
            return;
        }

        // Enter on an error row opens a detail panel below the table.
        let detail = self
            .selected_error
            .and_then(|i| self.skill_errors.get(i));

        let table_area = if let Some(error) = detail {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(5)])
                .split(area);

            let lines = vec![
                Line::from(Span::styled(
                    error.name.clone(),
                    Style::default()
                        .fg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(error.path.display().to_string()),
                Line::from(Span::styled(
                    error.message.clone(),
                    Style::default().fg(Color::Red),
                )),
            ];
            let block = Block::default()
                .borders(Borders::ALL)
                .title("Load error")
                .border_style(Style::default().fg(Color::Red));
            frame.render_widget(
                Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
                chunks[1],
            );

            chunks[0]
        } else {
            area
        };

        render_skill_list(
            frame,
            table_area,
            &self.skills,
            &self.skill_errors,
            self.cursor,
        );
    }

    fn render_configure_view(&self, frame: &mut Frame, area: Rect) {
        let title = match self.selected.and_then(|i| self.skills.get(i)) {
            Some(manifest) => format!("Configure {}", manifest.name),
            None => "Configure".to_string(),
        };

        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(form) = &self.form {
            form.render(frame, inner);
        }
    }

    fn render_confirm_view(&self, frame: &mut Frame, area: Rect) {
        let Some(manifest) = self.selected.and_then(|i| self.skills.get(i)) else {
            return;
        };

        let muted = Style::default().fg(Color::DarkGray);
        let mut lines = vec![
            Line::from(vec![
                Span::raw("Skill: "),
                Span::styled(
                    manifest.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" v{}", manifest.version), muted),
            ]),
            Line::from(format!("Deploy to: {}", self.deploy_dir().display())),
            Line::default(),
        ];

        if !manifest.variables.is_empty() {
            lines.push(Line::from(Span::styled(
                "Values".to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )));

            let values = self.saved_values.get(&manifest.name);
            for variable in &manifest.variables {
                let value = values
                    .and_then(|v| v.get(&variable.name))
                    .map(String::as_str)
                    .unwrap_or("");

                let shown = if value.is_empty() {
                    Span::styled("(not set)".to_string(), muted)
                } else if variable.kind == VariableKind::Secret {
                    // Fixed-width mask; the length of a secret is a secret too.
                    Span::raw("********".to_string())
                } else {
                    Span::raw(value.to_string())
                };

                lines.push(Line::from(vec![
                    Span::raw(format!("  {}: ", variable.display_label())),
                    shown,
                ]));
            }
            lines.push(Line::default());
        }

        lines.push(Line::from("Deploy this skill? (y/n)"));

        let block = Block::default().borders(Borders::ALL).title("Confirm");
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }

    fn render_overwrite_view(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "A skill is already deployed at this location.",
                Style::default().fg(Color::Red),
            )),
            Line::from(format!("  {}", self.deploy_dir().display())),
            Line::default(),
            Line::from("Overwrite it? (y/n)"),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Skill already exists")
            .border_style(Style::default().fg(Color::Red));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_building_view(&mut self, frame: &mut Frame, area: Rect) {
        let title = match self.selected.and_then(|i| self.skills.get(i)) {
            Some(manifest) => format!("Building {}", manifest.name),
            None => "Building".to_string(),
        };

        self.log_viewport = area.height.saturating_sub(2) as usize;
        self.build_log.render(frame, area, &title);
    }

    fn render_done_view(&mut self, frame: &mut Frame, area: Rect) {
        let failed = !self.error_message.is_empty();
        let show_log = !self.build_log.is_empty();

        let (summary_area, log_area) = if show_log {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(9), Constraint::Min(3)])
                .split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        let mut lines = Vec::new();
        if failed {
            lines.push(Line::from(Span::styled(
                self.error_message.clone(),
                Style::default().fg(Color::Red),
            )));
        } else if let Some(report) = &self.report {
            lines.push(Line::from(format!("Skill: {}", report.skill)));
            lines.push(Line::from(format!(
                "Location: {}",
                report.deploy_dir.display()
            )));
            if let Some(binary) = &report.binary {
                lines.push(Line::from(format!("Binary: bin/{binary}")));
            }
            lines.push(Line::from(format!("Files copied: {}", report.files_copied)));
            lines.push(Line::from(format!(
                "Finished: {}",
                report.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
            )));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Press r to deploy another skill, Enter to quit.".to_string(),
            Style::default().fg(Color::DarkGray),
        )));

        let (title, border) = if failed {
            ("Deploy failed", Style::default().fg(Color::Red))
        } else {
            ("Deployed", Style::default().fg(Color::Green))
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border);
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            summary_area,
        );

        if let Some(log_area) = log_area {
            self.log_viewport = log_area.height.saturating_sub(2) as usize;
            self.build_log.render(frame, log_area, "Build Output");
        }
    }
}
