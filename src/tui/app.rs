use crate::core::{Analysis, Analyzer, Stage, VideoLookup};
use crate::error::Result;
use crate::tui::components::{InputField, ProgressBar, Viewer};
use crate::tui::events::AppEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use tokio::{sync::mpsc, task::JoinHandle};

const MOUSE_SCROLL_LINES: isize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Editing the video and competitor links.
    Input,
    Processing,
    /// Video statistics are shown and analysis can be started.
    Overview,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Messages from the background request task. `request` ties each message to the request that
/// produced it so results of a cancelled request are dropped.
pub enum TaskMessage {
    Stage {
        request: u64,
        stage: Stage,
    },
    LookedUp {
        request: u64,
        result: Result<VideoLookup>,
    },
    Analyzed {
        request: u64,
        result: Result<Analysis>,
    },
}

impl TaskMessage {
    fn request(&self) -> u64 {
        match self {
            Self::Stage { request, .. }
            | Self::LookedUp { request, .. }
            | Self::Analyzed { request, .. } => *request,
        }
    }
}

pub struct App {
    pub state: AppState,
    pub should_quit: bool,

    // Input screen
    pub url_input: InputField,
    pub competitor_input: InputField,
    pub input_focus: usize,

    // Processing screen
    pub progress_bar: ProgressBar,
    pub processing_subject: String,

    // Overview / results
    pub lookup: Option<VideoLookup>,
    pub analysis: Option<Analysis>,
    pub content_viewer: Option<Viewer>,

    pub notice: Option<Notice>,

    analyzer: Analyzer,
    request: u64,
    task: Option<JoinHandle<()>>,
    // Screen to fall back to when the in-flight request fails or is cancelled.
    return_to: AppState,

    processing_tx: mpsc::UnboundedSender<TaskMessage>,
    processing_rx: mpsc::UnboundedReceiver<TaskMessage>,
}

impl App {
    pub fn new(analyzer: Analyzer) -> Self {
        let (processing_tx, processing_rx) = mpsc::unbounded_channel();
        let mut url_input = InputField::new(
            "Your YouTube Video Link",
            "https://www.youtube.com/watch?v=...",
        );
        url_input.focused = true;

        Self {
            state: AppState::Input,
            should_quit: false,

            url_input,
            competitor_input: InputField::new(
                "Competitor's YouTube Video Link (Optional)",
                "https://youtu.be/...",
            ),
            input_focus: 0,

            progress_bar: ProgressBar::new(),
            processing_subject: String::new(),

            lookup: None,
            analysis: None,
            content_viewer: None,

            notice: None,

            analyzer,
            request: 0,
            task: None,
            return_to: AppState::Input,

            processing_tx,
            processing_rx,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Mouse(mouse) => self.handle_mouse(mouse),
            AppEvent::Tick => self.handle_tick(),
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Input => self.handle_input_key(key),
            AppState::Processing => self.handle_processing_key(key),
            AppState::Overview => self.handle_overview_key(key),
            AppState::Results => self.handle_results_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.cycle_input_focus()
            }
            KeyCode::Enter => {
                if self.url_input.is_valid() {
                    self.start_lookup();
                } else {
                    self.notice = Some(Notice {
                        kind: NoticeKind::Error,
                        text: "Enter your YouTube video link first.".to_string(),
                    });
                }
            }
            _ => {
                if self.input_focus == 0 {
                    self.url_input.handle_key(key);
                } else {
                    self.competitor_input.handle_key(key);
                }
            }
        }
    }

    fn handle_processing_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.abort_task();
            // Messages already queued by the aborted task are ignored once the id moves on.
            self.request += 1;
            self.state = self.return_to;
            self.progress_bar.reset();
        }
    }

    fn handle_overview_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('a') | KeyCode::Enter => self.start_analysis(),
            KeyCode::Char('e') | KeyCode::Esc => self.state = AppState::Input,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state = AppState::Overview,
            KeyCode::Char('a') => self.start_analysis(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {
                if let Some(viewer) = &mut self.content_viewer {
                    viewer.handle_key(key);
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.state != AppState::Results {
            return;
        }
        if let Some(viewer) = &mut self.content_viewer {
            match mouse.kind {
                MouseEventKind::ScrollUp => viewer.scroll_by(-MOUSE_SCROLL_LINES),
                MouseEventKind::ScrollDown => viewer.scroll_by(MOUSE_SCROLL_LINES),
                _ => {}
            }
        }
    }

    fn handle_tick(&mut self) {
        let mut messages = Vec::new();
        while let Ok(message) = self.processing_rx.try_recv() {
            messages.push(message);
        }

        for message in messages {
            self.apply(message);
        }
    }

    fn cycle_input_focus(&mut self) {
        self.input_focus = (self.input_focus + 1) % 2;
        self.url_input.focused = self.input_focus == 0;
        self.competitor_input.focused = self.input_focus == 1;
    }

    /// Stop the in-flight request task, if any. Its pending network calls are dropped.
    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Switch to the processing screen and allocate the id for a new request.
    fn begin_request(&mut self, subject: String, return_to: AppState) -> u64 {
        self.abort_task();
        self.request += 1;
        self.return_to = return_to;
        self.notice = None;
        self.processing_subject = subject;
        self.progress_bar.reset();
        self.state = AppState::Processing;
        self.request
    }

    fn start_lookup(&mut self) {
        let url = self.url_input.value.trim().to_string();
        self.lookup = None;
        self.analysis = None;
        self.content_viewer = None;

        let request = self.begin_request(format!("Video: {url}"), AppState::Input);
        self.progress_bar.advance(0.2, "Fetching video details...");

        let analyzer = self.analyzer.clone();
        let tx = self.processing_tx.clone();
        self.task = Some(tokio::spawn(async move {
            let result = analyzer.lookup(&url).await;
            let _ = tx.send(TaskMessage::LookedUp { request, result });
        }));
    }

    fn start_analysis(&mut self) {
        let Some(primary) = self.lookup.clone() else {
            return;
        };
        let competitor = self
            .competitor_input
            .is_valid()
            .then(|| self.competitor_input.value.trim().to_string());

        let request =
            self.begin_request(format!("Analyzing: {}", primary.metadata.title), AppState::Overview);
        self.progress_bar.advance(0.05, "Analyzing video...");

        let analyzer = self.analyzer.clone();
        let tx = self.processing_tx.clone();
        self.task = Some(tokio::spawn(async move {
            let stage_tx = tx.clone();
            let result = analyzer
                .analyze_with(&primary, competitor.as_deref(), move |stage| {
                    let _ = stage_tx.send(TaskMessage::Stage { request, stage });
                })
                .await;
            let _ = tx.send(TaskMessage::Analyzed { request, result });
        }));
    }

    pub(crate) fn apply(&mut self, message: TaskMessage) {
        if message.request() != self.request || self.state != AppState::Processing {
            return;
        }

        match message {
            TaskMessage::Stage { stage, .. } => {
                self.progress_bar.advance(stage.progress(), stage.to_string());
            }
            TaskMessage::LookedUp { result, .. } => match result {
                Ok(lookup) => {
                    self.lookup = Some(lookup);
                    self.state = AppState::Overview;
                }
                Err(e) => self.fail(e.to_string()),
            },
            TaskMessage::Analyzed { result, .. } => match result {
                Ok(analysis) => {
                    if !analysis.warnings.is_empty() {
                        self.notice = Some(Notice {
                            kind: NoticeKind::Warning,
                            text: analysis.warnings.join(" "),
                        });
                    }
                    self.content_viewer = Some(Viewer::new(&analysis.text, "Video Analysis"));
                    self.analysis = Some(analysis);
                    self.state = AppState::Results;
                }
                Err(e) => self.fail(e.to_string()),
            },
        }
    }

    fn fail(&mut self, text: String) {
        self.notice = Some(Notice {
            kind: NoticeKind::Error,
            text,
        });
        self.state = self.return_to;
        self.progress_bar.reset();
    }
}
