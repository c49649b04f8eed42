//! Interactive controller - the state machine behind the TUI.
//!
//! The controller never performs I/O. Every user action and every
//! asynchronous result arrives as an [`Event`]; `handle` updates the state and
//! returns the [`Effect`]s the runtime has to carry out. Effect results come
//! back as further events (`RefreshCompleted`, `KillCompleted`, `WatchTick`).

use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use crate::domain::{derive_view, PortInfo, SortKey};
use crate::ports::KillOutcome;

/// Input to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Start a discovery run.
    Refresh,
    /// A discovery run finished. Errors arrive as display text.
    RefreshCompleted(Result<Vec<PortInfo>, String>),
    /// Move the selection by `delta` rows, clamped to the view.
    MoveSelection(isize),
    SelectFirst,
    SelectLast,
    /// Port -> Uptime -> Process -> Port.
    CycleSort,
    ToggleSearch,
    SearchInput(char),
    SearchBackspace,
    /// Leave search and clear the query.
    SearchCancel,
    /// Leave search and keep the query as a filter.
    SearchSubmit,
    OpenDetails,
    CloseDetails,
    /// Ask for confirmation to kill the selected process.
    RequestKill,
    /// Confirm the pending kill. `force` sends SIGKILL instead of SIGTERM.
    ConfirmKill { force: bool },
    CancelKill,
    /// A termination request finished.
    KillCompleted(Result<KillOutcome, String>),
    ToggleWatch,
    /// The watch timer of the given generation fired.
    WatchTick(u64),
    Quit,
}

/// Work the runtime performs on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run discovery and report back with `RefreshCompleted`.
    Refresh,
    /// Replace any live watch timer with one firing `WatchTick(generation)`.
    ScheduleWatchTick { generation: u64, after: Duration },
    /// Stop the live watch timer.
    CancelWatchTick,
    /// Signal `pid` and report back with `KillCompleted`.
    Terminate { pid: i32, port: u16, force: bool },
    /// Leave the event loop.
    Quit,
}

/// Which events the controller currently accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Searching,
    DetailsOpen,
    KillConfirmOpen,
}

/// State of the kill confirmation dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct KillPrompt {
    /// Copy of the record the user asked to kill.
    pub target: PortInfo,
    /// Failure of the last attempt, shown inside the dialog.
    pub error: Option<String>,
    /// A termination request is in flight.
    pub pending: bool,
    /// The in-flight (or last) attempt used SIGKILL.
    pub force: bool,
}

/// The modal dialog on screen, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Modal {
    #[default]
    None,
    Details(PortInfo),
    KillConfirm(KillPrompt),
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    /// Latest successful discovery result.
    pub snapshot: Vec<PortInfo>,
    /// Error of the latest failed refresh.
    pub last_error: Option<String>,
    /// Transient message, cleared by the next key press.
    pub status: Option<String>,
    /// Index into the filtered and sorted view.
    pub selection: Option<usize>,
    pub sort_key: SortKey,
    pub search_query: String,
    pub search_active: bool,
    pub modal: Modal,
    pub watch_enabled: bool,
    pub watch_interval: Duration,
    /// Identifies the single live watch timer.
    pub watch_generation: u64,
    /// Discovery runs started but not yet completed.
    pub refreshes_in_flight: usize,
    /// Set once `Quit` was handled.
    pub quit: bool,
}

/// Initial settings, usually taken from the configuration.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub sort_key: SortKey,
    pub watch_enabled: bool,
    pub watch_interval: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            sort_key: SortKey::Port,
            watch_enabled: false,
            watch_interval: Duration::from_secs(5),
        }
    }
}

/// The interactive controller.
pub struct Controller {
    state: ControllerState,
}

impl Controller {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            state: ControllerState {
                snapshot: Vec::new(),
                last_error: None,
                status: None,
                selection: None,
                sort_key: settings.sort_key,
                search_query: String::new(),
                search_active: false,
                modal: Modal::None,
                watch_enabled: settings.watch_enabled,
                watch_interval: settings.watch_interval,
                watch_generation: 0,
                refreshes_in_flight: 0,
                quit: false,
            },
        }
    }

    /// Effects to run at startup: the first refresh and, in watch mode, the
    /// first timer.
    pub fn init(&mut self) -> Vec<Effect> {
        let mut effects = vec![self.refresh()];
        if self.state.watch_enabled {
            effects.push(self.schedule_watch());
        }
        effects
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        match self.state.modal {
            Modal::Details(_) => Mode::DetailsOpen,
            Modal::KillConfirm(_) => Mode::KillConfirmOpen,
            Modal::None if self.state.search_active => Mode::Searching,
            Modal::None => Mode::Idle,
        }
    }

    /// The snapshot filtered by the search query and sorted by the sort key.
    pub fn view(&self) -> Vec<PortInfo> {
        derive_view(
            &self.state.snapshot,
            &self.state.search_query,
            self.state.sort_key,
            Utc::now(),
        )
    }

    /// The record under the cursor.
    pub fn selected(&self) -> Option<PortInfo> {
        let index = self.state.selection?;
        self.view().into_iter().nth(index)
    }

    /// Apply one event and return the effects it requests.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::RefreshCompleted(result) => self.on_refresh_completed(result),
            Event::KillCompleted(result) => self.on_kill_completed(result),
            Event::WatchTick(generation) => self.on_watch_tick(generation),
            Event::Quit => {
                self.state.quit = true;
                vec![Effect::Quit]
            }
            event => match self.mode() {
                Mode::Idle => self.handle_idle(event),
                Mode::Searching => self.handle_search(event),
                Mode::DetailsOpen => self.handle_details(event),
                Mode::KillConfirmOpen => self.handle_kill_confirm(event),
            },
        }
    }

    // =========================================================================
    // Per-mode transitions
    // =========================================================================

    fn handle_idle(&mut self, event: Event) -> Vec<Effect> {
        let accepted = matches!(
            event,
            Event::Refresh
                | Event::MoveSelection(_)
                | Event::SelectFirst
                | Event::SelectLast
                | Event::CycleSort
                | Event::ToggleSearch
                | Event::OpenDetails
                | Event::RequestKill
                | Event::ToggleWatch
        );
        if !accepted {
            debug!(?event, "Ignored in idle mode");
            return Vec::new();
        }
        self.state.status = None;

        match event {
            Event::Refresh => vec![self.refresh()],
            Event::MoveSelection(delta) => {
                self.move_selection(delta);
                Vec::new()
            }
            Event::SelectFirst => {
                self.select_edge(false);
                Vec::new()
            }
            Event::SelectLast => {
                self.select_edge(true);
                Vec::new()
            }
            Event::CycleSort => {
                self.state.sort_key = self.state.sort_key.next();
                self.clamp_selection();
                Vec::new()
            }
            Event::ToggleSearch => {
                self.state.search_active = true;
                self.state.search_query.clear();
                self.clamp_selection();
                Vec::new()
            }
            Event::OpenDetails => {
                if let Some(port) = self.selected() {
                    self.state.modal = Modal::Details(port);
                }
                Vec::new()
            }
            Event::RequestKill => {
                if let Some(target) = self.selected() {
                    self.state.modal = Modal::KillConfirm(KillPrompt {
                        target,
                        error: None,
                        pending: false,
                        force: false,
                    });
                }
                Vec::new()
            }
            Event::ToggleWatch => self.toggle_watch(),
            _ => Vec::new(),
        }
    }

    fn handle_search(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::SearchInput(c) if !c.is_control() => {
                self.state.search_query.push(c);
            }
            Event::SearchBackspace => {
                self.state.search_query.pop();
            }
            Event::SearchCancel => {
                self.state.search_active = false;
                self.state.search_query.clear();
            }
            Event::SearchSubmit | Event::ToggleSearch => {
                self.state.search_active = false;
            }
            _ => return Vec::new(),
        }
        self.clamp_selection();
        Vec::new()
    }

    fn handle_details(&mut self, event: Event) -> Vec<Effect> {
        if event == Event::CloseDetails {
            self.state.modal = Modal::None;
        }
        Vec::new()
    }

    fn handle_kill_confirm(&mut self, event: Event) -> Vec<Effect> {
        let Modal::KillConfirm(prompt) = &mut self.state.modal else {
            return Vec::new();
        };
        match event {
            Event::ConfirmKill { force } => {
                if prompt.pending {
                    debug!(pid = prompt.target.pid, "Kill already in flight");
                    return Vec::new();
                }
                prompt.pending = true;
                prompt.force = force;
                prompt.error = None;
                vec![Effect::Terminate {
                    pid: prompt.target.pid,
                    port: prompt.target.port,
                    force,
                }]
            }
            Event::CancelKill => {
                self.state.modal = Modal::None;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    // =========================================================================
    // Asynchronous completions
    // =========================================================================

    fn on_refresh_completed(&mut self, result: Result<Vec<PortInfo>, String>) -> Vec<Effect> {
        self.state.refreshes_in_flight = self.state.refreshes_in_flight.saturating_sub(1);
        match result {
            Ok(ports) => {
                self.state.snapshot = ports;
                self.state.last_error = None;
                self.clamp_selection();
            }
            Err(message) => {
                self.state.last_error = Some(message);
                self.state.status = None;
            }
        }
        Vec::new()
    }

    fn on_kill_completed(&mut self, result: Result<KillOutcome, String>) -> Vec<Effect> {
        let prompt = match std::mem::take(&mut self.state.modal) {
            Modal::KillConfirm(prompt) => Some(prompt),
            other => {
                self.state.modal = other;
                None
            }
        };

        match result {
            Ok(outcome) => {
                self.state.status = Some(kill_message(prompt.as_ref(), outcome));
                vec![self.refresh()]
            }
            Err(message) => {
                match prompt {
                    Some(mut prompt) => {
                        prompt.pending = false;
                        prompt.error = Some(message);
                        self.state.modal = Modal::KillConfirm(prompt);
                    }
                    None => self.state.status = Some(message),
                }
                Vec::new()
            }
        }
    }

    fn on_watch_tick(&mut self, generation: u64) -> Vec<Effect> {
        if !self.state.watch_enabled || generation != self.state.watch_generation {
            debug!(generation, current = self.state.watch_generation, "Stale watch tick");
            return Vec::new();
        }
        vec![
            self.refresh(),
            Effect::ScheduleWatchTick {
                generation,
                after: self.state.watch_interval,
            },
        ]
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn refresh(&mut self) -> Effect {
        self.state.refreshes_in_flight += 1;
        Effect::Refresh
    }

    fn schedule_watch(&mut self) -> Effect {
        self.state.watch_generation += 1;
        Effect::ScheduleWatchTick {
            generation: self.state.watch_generation,
            after: self.state.watch_interval,
        }
    }

    fn toggle_watch(&mut self) -> Vec<Effect> {
        self.state.watch_enabled = !self.state.watch_enabled;
        if self.state.watch_enabled {
            self.state.status = Some(format!(
                "Watch mode on, refreshing every {}s",
                self.state.watch_interval.as_secs()
            ));
            vec![self.schedule_watch()]
        } else {
            self.state.watch_generation += 1;
            self.state.status = Some("Watch mode off".to_string());
            vec![Effect::CancelWatchTick]
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.view().len();
        if len == 0 {
            self.state.selection = None;
            return;
        }
        let current = self.state.selection.unwrap_or(0) as isize;
        let next = current.saturating_add(delta).clamp(0, len as isize - 1);
        self.state.selection = Some(next as usize);
    }

    fn select_edge(&mut self, last: bool) {
        let len = self.view().len();
        self.state.selection = match len {
            0 => None,
            _ if last => Some(len - 1),
            _ => Some(0),
        };
    }

    fn clamp_selection(&mut self) {
        let len = self.view().len();
        self.state.selection = match len {
            0 => None,
            _ => Some(self.state.selection.unwrap_or(0).min(len - 1)),
        };
    }
}

fn kill_message(prompt: Option<&KillPrompt>, outcome: KillOutcome) -> String {
    let Some(prompt) = prompt else {
        return match outcome {
            KillOutcome::Signalled => "Process terminated".to_string(),
            KillOutcome::AlreadyExited => "Process had already exited".to_string(),
        };
    };
    let target = &prompt.target;
    match outcome {
        KillOutcome::Signalled => format!(
            "Sent {} to {} (PID {}) on port {}",
            if prompt.force { "SIGKILL" } else { "SIGTERM" },
            target.process_name,
            target.pid,
            target.port
        ),
        KillOutcome::AlreadyExited => format!(
            "{} (PID {}) had already exited",
            target.process_name, target.pid
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports() -> Vec<PortInfo> {
        vec![
            PortInfo::listening(5432, 20, "postgres", "127.0.0.1"),
            PortInfo::listening(3000, 10, "node", "*"),
            PortInfo::listening(8080, 30, "nginx", "*"),
        ]
    }

    /// Controller that has completed its first refresh.
    fn loaded() -> Controller {
        let mut controller = Controller::new(ControllerSettings::default());
        assert_eq!(controller.init(), vec![Effect::Refresh]);
        controller.handle(Event::RefreshCompleted(Ok(ports())));
        controller
    }

    fn selected_port(controller: &Controller) -> Option<u16> {
        controller.selected().map(|p| p.port)
    }

    #[test]
    fn test_initial_state() {
        let controller = Controller::new(ControllerSettings::default());
        assert_eq!(controller.mode(), Mode::Idle);
        assert!(controller.state().snapshot.is_empty());
        assert_eq!(controller.state().selection, None);
    }

    #[test]
    fn test_init_in_watch_mode_schedules_timer() {
        let mut controller = Controller::new(ControllerSettings {
            watch_enabled: true,
            watch_interval: Duration::from_secs(2),
            ..Default::default()
        });
        assert_eq!(
            controller.init(),
            vec![
                Effect::Refresh,
                Effect::ScheduleWatchTick {
                    generation: 1,
                    after: Duration::from_secs(2)
                }
            ]
        );
    }

    #[test]
    fn test_refresh_selects_first_row_of_sorted_view() {
        let controller = loaded();
        assert_eq!(controller.state().selection, Some(0));
        assert_eq!(selected_port(&controller), Some(3000));
        assert_eq!(controller.state().refreshes_in_flight, 0);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_snapshot() {
        let mut controller = loaded();
        assert_eq!(controller.handle(Event::Refresh), vec![Effect::Refresh]);
        controller.handle(Event::RefreshCompleted(Err("ss: command not found".to_string())));

        assert_eq!(controller.state().snapshot, ports());
        assert_eq!(
            controller.state().last_error.as_deref(),
            Some("ss: command not found")
        );

        controller.handle(Event::RefreshCompleted(Ok(ports())));
        assert_eq!(controller.state().last_error, None);
    }

    #[test]
    fn test_overlapping_refreshes_last_completion_wins() {
        let mut controller = loaded();
        assert_eq!(controller.handle(Event::Refresh), vec![Effect::Refresh]);
        assert_eq!(controller.handle(Event::Refresh), vec![Effect::Refresh]);
        assert_eq!(controller.state().refreshes_in_flight, 2);

        let newer = vec![PortInfo::listening(4000, 40, "deno", "127.0.0.1")];
        let older = vec![
            PortInfo::listening(9000, 50, "php-fpm", "127.0.0.1"),
            PortInfo::listening(9001, 51, "php-fpm", "127.0.0.1"),
        ];

        // The second run finishes first, the first run last.
        controller.handle(Event::RefreshCompleted(Ok(newer.clone())));
        assert_eq!(controller.state().snapshot, newer);
        assert_eq!(controller.state().refreshes_in_flight, 1);

        controller.handle(Event::RefreshCompleted(Ok(older.clone())));
        assert_eq!(controller.state().snapshot, older);
        assert_eq!(controller.state().refreshes_in_flight, 0);
        assert_eq!(selected_port(&controller), Some(9000));
    }

    #[test]
    fn test_selection_clamps() {
        let mut controller = loaded();
        controller.handle(Event::MoveSelection(10));
        assert_eq!(selected_port(&controller), Some(8080));
        controller.handle(Event::MoveSelection(-100));
        assert_eq!(selected_port(&controller), Some(3000));
        controller.handle(Event::SelectLast);
        assert_eq!(controller.state().selection, Some(2));
        controller.handle(Event::SelectFirst);
        assert_eq!(controller.state().selection, Some(0));

        controller.handle(Event::SelectLast);
        controller.handle(Event::RefreshCompleted(Ok(ports()[..1].to_vec())));
        assert_eq!(controller.state().selection, Some(0));

        controller.handle(Event::RefreshCompleted(Ok(Vec::new())));
        assert_eq!(controller.state().selection, None);
        controller.handle(Event::MoveSelection(1));
        assert_eq!(controller.state().selection, None);
    }

    #[test]
    fn test_selection_stays_in_range_under_mixed_events() {
        let mut controller = loaded();
        let script = [
            Event::MoveSelection(2),
            Event::CycleSort,
            Event::ToggleSearch,
            Event::SearchInput('n'),
            Event::SearchInput('g'),
            Event::SearchSubmit,
            Event::MoveSelection(5),
            Event::ToggleSearch,
            Event::SearchInput('z'),
            Event::SearchCancel,
            Event::SelectLast,
            Event::CycleSort,
            Event::RefreshCompleted(Ok(ports()[1..].to_vec())),
            Event::MoveSelection(-1),
        ];
        for event in script {
            controller.handle(event);
            let len = controller.view().len();
            match controller.state().selection {
                Some(index) => assert!(index < len),
                None => assert_eq!(len, 0),
            }
        }
    }

    #[test]
    fn test_cycle_sort() {
        let mut controller = loaded();
        controller.handle(Event::CycleSort);
        assert_eq!(controller.state().sort_key, SortKey::Uptime);
        controller.handle(Event::CycleSort);
        assert_eq!(controller.state().sort_key, SortKey::Process);
        let order: Vec<u16> = controller.view().iter().map(|p| p.port).collect();
        assert_eq!(order, vec![8080, 3000, 5432]);
        controller.handle(Event::CycleSort);
        assert_eq!(controller.state().sort_key, SortKey::Port);
    }

    #[test]
    fn test_search_flow() {
        let mut controller = loaded();
        controller.handle(Event::ToggleSearch);
        assert_eq!(controller.mode(), Mode::Searching);

        for c in "ngx".chars() {
            controller.handle(Event::SearchInput(c));
        }
        assert!(controller.view().is_empty());
        assert_eq!(controller.state().selection, None);

        controller.handle(Event::SearchBackspace);
        controller.handle(Event::SearchInput('i'));
        assert_eq!(controller.state().search_query, "ngi");
        assert_eq!(selected_port(&controller), Some(8080));

        // Idle-only keys are ignored while typing.
        assert!(controller.handle(Event::Refresh).is_empty());
        controller.handle(Event::SearchInput('\u{7}'));
        assert_eq!(controller.state().search_query, "ngi");

        controller.handle(Event::SearchSubmit);
        assert_eq!(controller.mode(), Mode::Idle);
        assert_eq!(controller.view().len(), 1);

        controller.handle(Event::ToggleSearch);
        assert_eq!(controller.state().search_query, "");
        controller.handle(Event::SearchInput('5'));
        controller.handle(Event::SearchCancel);
        assert_eq!(controller.mode(), Mode::Idle);
        assert_eq!(controller.state().search_query, "");
        assert_eq!(controller.view().len(), 3);
    }

    #[test]
    fn test_details_modal() {
        let mut controller = loaded();
        controller.handle(Event::MoveSelection(1));
        controller.handle(Event::OpenDetails);
        assert_eq!(controller.mode(), Mode::DetailsOpen);
        match &controller.state().modal {
            Modal::Details(port) => assert_eq!(port.port, 5432),
            other => panic!("unexpected modal {other:?}"),
        }

        // Only the modal's own events are accepted.
        controller.handle(Event::MoveSelection(1));
        controller.handle(Event::RequestKill);
        assert_eq!(controller.mode(), Mode::DetailsOpen);
        assert_eq!(controller.state().selection, Some(1));

        controller.handle(Event::CloseDetails);
        assert_eq!(controller.mode(), Mode::Idle);
    }

    #[test]
    fn test_open_details_on_empty_view_is_noop() {
        let mut controller = Controller::new(ControllerSettings::default());
        controller.handle(Event::OpenDetails);
        controller.handle(Event::RequestKill);
        assert_eq!(controller.mode(), Mode::Idle);
    }

    #[test]
    fn test_kill_confirm_then_cancel() {
        let mut controller = loaded();
        controller.handle(Event::RequestKill);
        assert_eq!(controller.mode(), Mode::KillConfirmOpen);

        controller.handle(Event::CancelKill);
        assert_eq!(controller.mode(), Mode::Idle);
        assert_eq!(controller.state().modal, Modal::None);
        assert_eq!(controller.state().snapshot, ports());
    }

    #[test]
    fn test_kill_success_closes_modal_and_refreshes() {
        let mut controller = loaded();
        controller.handle(Event::RequestKill);
        let effects = controller.handle(Event::ConfirmKill { force: false });
        assert_eq!(
            effects,
            vec![Effect::Terminate {
                pid: 10,
                port: 3000,
                force: false
            }]
        );

        // A second confirmation while the first is in flight does nothing.
        assert!(controller.handle(Event::ConfirmKill { force: true }).is_empty());

        let effects = controller.handle(Event::KillCompleted(Ok(KillOutcome::Signalled)));
        assert_eq!(effects, vec![Effect::Refresh]);
        assert_eq!(controller.mode(), Mode::Idle);
        let status = controller.state().status.clone().unwrap();
        assert!(status.contains("SIGTERM") && status.contains("node"), "{status}");

        // The next key press clears the message.
        controller.handle(Event::MoveSelection(1));
        assert_eq!(controller.state().status, None);
    }

    #[test]
    fn test_kill_of_exited_process_is_reported_as_success() {
        let mut controller = loaded();
        controller.handle(Event::RequestKill);
        controller.handle(Event::ConfirmKill { force: true });
        let effects = controller.handle(Event::KillCompleted(Ok(KillOutcome::AlreadyExited)));
        assert_eq!(effects, vec![Effect::Refresh]);
        assert!(controller
            .state()
            .status
            .as_deref()
            .unwrap()
            .contains("already exited"));
    }

    #[test]
    fn test_kill_failure_keeps_modal_open() {
        let mut controller = loaded();
        controller.handle(Event::RequestKill);
        controller.handle(Event::ConfirmKill { force: false });
        let effects = controller.handle(Event::KillCompleted(Err("Permission denied".to_string())));
        assert!(effects.is_empty());

        match &controller.state().modal {
            Modal::KillConfirm(prompt) => {
                assert_eq!(prompt.error.as_deref(), Some("Permission denied"));
                assert!(!prompt.pending);
            }
            other => panic!("unexpected modal {other:?}"),
        }

        // Retrying is possible after a failure.
        let effects = controller.handle(Event::ConfirmKill { force: true });
        assert_eq!(
            effects,
            vec![Effect::Terminate {
                pid: 10,
                port: 3000,
                force: true
            }]
        );
    }

    #[test]
    fn test_kill_target_is_a_captured_copy() {
        let mut controller = loaded();
        controller.handle(Event::RequestKill);
        controller.handle(Event::RefreshCompleted(Ok(vec![PortInfo::listening(
            9999, 99, "other", "*",
        )])));
        let effects = controller.handle(Event::ConfirmKill { force: false });
        assert_eq!(
            effects,
            vec![Effect::Terminate {
                pid: 10,
                port: 3000,
                force: false
            }]
        );
    }

    #[test]
    fn test_watch_mode_generations() {
        let mut controller = loaded();
        let effects = controller.handle(Event::ToggleWatch);
        assert_eq!(
            effects,
            vec![Effect::ScheduleWatchTick {
                generation: 1,
                after: Duration::from_secs(5)
            }]
        );

        assert_eq!(
            controller.handle(Event::WatchTick(1)),
            vec![
                Effect::Refresh,
                Effect::ScheduleWatchTick {
                    generation: 1,
                    after: Duration::from_secs(5)
                }
            ]
        );

        assert_eq!(controller.handle(Event::ToggleWatch), vec![Effect::CancelWatchTick]);
        assert!(controller.handle(Event::WatchTick(1)).is_empty());

        // Re-enabling starts a new generation; ticks of the old one are stale.
        controller.handle(Event::ToggleWatch);
        assert_eq!(controller.state().watch_generation, 3);
        assert!(controller.handle(Event::WatchTick(1)).is_empty());
        assert_eq!(controller.handle(Event::WatchTick(3)).len(), 2);
    }

    #[test]
    fn test_async_events_processed_in_any_mode() {
        let mut controller = loaded();
        controller.handle(Event::ToggleWatch);
        controller.handle(Event::OpenDetails);

        assert_eq!(controller.handle(Event::WatchTick(1)).len(), 2);
        controller.handle(Event::RefreshCompleted(Ok(ports()[..2].to_vec())));
        assert_eq!(controller.state().snapshot.len(), 2);
        assert_eq!(controller.mode(), Mode::DetailsOpen);
    }

    #[test]
    fn test_quit() {
        let mut controller = loaded();
        controller.handle(Event::RequestKill);
        assert_eq!(controller.handle(Event::Quit), vec![Effect::Quit]);
        assert!(controller.state().quit);
    }
}
