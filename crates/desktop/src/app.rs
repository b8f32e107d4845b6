use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError};
use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Element, Length, Subscription, Task, Theme};

use deepshield_core::client::media_selection::{MediaSelection, MediaSlot};
use deepshield_core::shared::constants::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};

use crate::forms::{AccountForm, FeedbackForm, PasswordField, SocialProvider};
use crate::settings::{Appearance, Settings};
use crate::tabs;
use crate::theme;
use crate::workers::detect_worker::{self, DetectParams, WorkerMessage};

const WORKER_POLL: Duration = Duration::from_millis(100);
const SYSTEM_THEME_POLL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Features,
    Detect,
    Account,
    Appearance,
    About,
}

impl Tab {
    const ALL: &[Tab] = &[
        Tab::Home,
        Tab::Features,
        Tab::Detect,
        Tab::Account,
        Tab::Appearance,
        Tab::About,
    ];

    fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Features => "Features",
            Tab::Detect => "Detect",
            Tab::Account => "Account",
            Tab::Appearance => "Appearance",
            Tab::About => "About",
        }
    }
}

/// Widgets whose hover animation is driven from app state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverTarget {
    Upload(MediaSlot),
    Change(MediaSlot),
    CheckScore,
    CloseResult,
    GetStarted,
    SendFeedback,
    SubmitAccount,
    Social(SocialProvider),
}

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    Hover(HoverTarget, bool),

    PickMedia(MediaSlot),
    MediaPicked(MediaSlot, Option<PathBuf>),
    CheckScore,
    CloseResult,
    PollWorker,

    FeedbackEmailChanged(String),
    FeedbackMessageChanged(String),
    SubmitFeedback,

    ToggleSignup,
    AccountEmailChanged(String),
    AccountPasswordChanged(String),
    AccountConfirmChanged(String),
    TogglePasswordVisible(PasswordField),
    SubmitAccount,
    SocialLogin(SocialProvider),

    AppearanceChanged(Appearance),
    HighContrastChanged(bool),
    FontScaleChanged(f32),
    ServerUrlChanged(String),
    OpenSettingsFolder,
    PollSystemTheme,
}

pub struct App {
    active_tab: Tab,
    pub settings: Settings,
    pub selection: MediaSelection,
    pub loading: bool,
    worker: Option<Receiver<WorkerMessage>>,
    hovered: HashSet<HoverTarget>,
    pub feedback: FeedbackForm,
    pub account: AccountForm,
    persist: bool,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let mut app = Self::with_settings(Settings::load());
        app.persist = true;
        (app, Task::none())
    }

    /// App state without touching the settings file.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            active_tab: Tab::Home,
            settings,
            selection: MediaSelection::new(),
            loading: false,
            worker: None,
            hovered: HashSet::new(),
            feedback: FeedbackForm::default(),
            account: AccountForm::default(),
            persist: false,
        }
    }

    pub fn is_hovered(&self, target: HoverTarget) -> bool {
        self.hovered.contains(&target)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
                self.hovered.clear();
            }
            Message::Hover(target, true) => {
                self.hovered.insert(target);
            }
            Message::Hover(target, false) => {
                self.hovered.remove(&target);
            }
            Message::PickMedia(slot) => {
                if self.loading {
                    return Task::none();
                }
                return Task::perform(pick_media(slot), move |path| {
                    Message::MediaPicked(slot, path)
                });
            }
            Message::MediaPicked(slot, Some(path)) => {
                if let Err(e) = self.selection.select(slot, &path) {
                    log::info!("Rejected {}: {e}", path.display());
                }
            }
            Message::MediaPicked(_, None) => {}
            Message::CheckScore => self.start_detection(),
            Message::CloseResult => {
                self.selection.close_result();
                self.hovered.remove(&HoverTarget::CloseResult);
            }
            Message::PollWorker => self.poll_worker(),
            Message::FeedbackEmailChanged(email) => self.feedback.set_email(email),
            Message::FeedbackMessageChanged(body) => self.feedback.set_message(body),
            Message::SubmitFeedback => {
                self.feedback.submit();
            }
            Message::ToggleSignup => self.account.toggle_mode(),
            Message::AccountEmailChanged(email) => self.account.email = email,
            Message::AccountPasswordChanged(password) => self.account.password = password,
            Message::AccountConfirmChanged(confirm) => self.account.confirm = confirm,
            Message::TogglePasswordVisible(field) => self.account.toggle_visible(field),
            Message::SubmitAccount => self.account.submit(),
            Message::SocialLogin(provider) => {
                log::debug!("{} pressed", provider.label());
            }
            Message::AppearanceChanged(appearance) => {
                self.settings.appearance = appearance;
                self.save_settings();
            }
            Message::HighContrastChanged(enabled) => {
                self.settings.high_contrast = enabled;
                self.save_settings();
            }
            Message::FontScaleChanged(scale) => {
                self.settings.font_scale = scale;
                self.save_settings();
            }
            Message::ServerUrlChanged(url) => {
                self.settings.server_url = url;
                self.save_settings();
            }
            Message::OpenSettingsFolder => {
                let dir = Settings::config_path().and_then(|p| p.parent().map(|d| d.to_path_buf()));
                if let Some(dir) = dir {
                    if let Err(e) = std::fs::create_dir_all(&dir).and_then(|_| open::that(&dir)) {
                        log::warn!("Could not open {}: {e}", dir.display());
                    }
                }
            }
            Message::PollSystemTheme => {
                // theme() resolves the system mode on every render.
            }
        }
        Task::none()
    }

    fn start_detection(&mut self) {
        if self.loading {
            return;
        }
        let (real, fake) = match self.selection.ready() {
            Ok((real, fake)) => (real.path.clone(), fake.path.clone()),
            Err(e) => {
                self.selection.set_error(e.to_string());
                return;
            }
        };

        self.selection.begin_request();
        self.loading = true;
        self.worker = Some(detect_worker::spawn(DetectParams {
            server_url: self.settings.server_url.trim().to_string(),
            real,
            fake,
        }));
    }

    fn poll_worker(&mut self) {
        let Some(rx) = &self.worker else {
            return;
        };
        let message = match rx.try_recv() {
            Ok(message) => message,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                WorkerMessage::Error("Error: detection worker stopped unexpectedly".to_string())
            }
        };

        match message {
            WorkerMessage::Complete(result) => self.selection.set_result(result),
            WorkerMessage::Error(e) => self.selection.set_error(e),
        }
        self.loading = false;
        self.worker = None;
    }

    fn save_settings(&self) {
        if self.persist {
            self.settings.save();
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let fs = self.settings.font_scale;
        let theme = self.theme();

        let tab_bar = row(Tab::ALL
            .iter()
            .map(|&tab| {
                let label = text(tab.label()).size(scaled(13.0, fs));
                let btn = button(label)
                    .on_press(Message::TabSelected(tab))
                    .padding([6, 14]);
                if tab == self.active_tab {
                    btn.style(button::primary).into()
                } else {
                    btn.style(button::text).into()
                }
            })
            .collect::<Vec<_>>())
        .spacing(2);

        let hovered = |target: HoverTarget| self.is_hovered(target);

        let body: Element<'_, Message> = match self.active_tab {
            Tab::Detect => container(tabs::detect_tab::view(
                fs,
                &self.selection,
                self.loading,
                hovered,
                &theme,
            ))
            .padding(16)
            .height(Length::Fill)
            .into(),
            tab => {
                let content: Element<'_, Message> = match tab {
                    Tab::Home => {
                        tabs::home_tab::view(fs, hovered(HoverTarget::GetStarted), &theme)
                    }
                    Tab::Features => tabs::features_tab::view(fs, &self.feedback, hovered, &theme),
                    Tab::Account => tabs::account_tab::view(fs, &self.account, hovered, &theme),
                    Tab::Appearance => tabs::appearance_tab::view(&self.settings),
                    _ => tabs::about_tab::view(fs),
                };
                container(scrollable(content).height(Length::Fill))
                    .padding(16)
                    .height(Length::Fill)
                    .into()
            }
        };

        column![container(tab_bar).padding([8, 12]), body]
            .spacing(0)
            .height(Length::Fill)
            .into()
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme(self.settings.appearance, self.settings.high_contrast)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let worker = if self.worker.is_some() {
            iced::time::every(WORKER_POLL).map(|_| Message::PollWorker)
        } else {
            Subscription::none()
        };
        let system_theme = if self.settings.appearance == Appearance::System {
            iced::time::every(SYSTEM_THEME_POLL).map(|_| Message::PollSystemTheme)
        } else {
            Subscription::none()
        };
        Subscription::batch([worker, system_theme])
    }
}

async fn pick_media(slot: MediaSlot) -> Option<PathBuf> {
    let extensions: Vec<&str> = IMAGE_EXTENSIONS
        .iter()
        .chain(VIDEO_EXTENSIONS.iter())
        .copied()
        .collect();
    rfd::AsyncFileDialog::new()
        .set_title(slot.title())
        .add_filter("Images and videos", extensions.as_slice())
        .pick_file()
        .await
        .map(|h| h.path().to_path_buf())
}

/// Scale a base font size by the user's font_scale setting.
pub fn scaled(base: f32, font_scale: f32) -> f32 {
    (base * font_scale).round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::path::Path;
    use std::time::Instant;

    fn app() -> App {
        App::with_settings(Settings::default())
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"media").unwrap();
        path
    }

    fn refused_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}")
    }

    #[test]
    fn test_scaled() {
        assert_eq!(scaled(14.0, 1.0), 14.0);
        assert_eq!(scaled(14.0, 1.5), 21.0);
        assert_eq!(scaled(13.0, 0.8), 10.0);
    }

    #[test]
    fn test_check_score_without_media_shows_banner() {
        let mut app = app();
        let _ = app.update(Message::CheckScore);
        assert!(!app.loading);
        assert_eq!(
            app.selection.error(),
            Some("Please upload both real and fake media files.")
        );
    }

    #[test]
    fn test_unsupported_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        let path = touch(dir.path(), "notes.txt");
        let _ = app.update(Message::MediaPicked(MediaSlot::Real, Some(path)));
        assert!(app.selection.get(MediaSlot::Real).is_none());
        assert_eq!(
            app.selection.error(),
            Some("Please upload only image or video files")
        );
    }

    #[test]
    fn test_cancelled_dialog_keeps_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        let path = touch(dir.path(), "real.png");
        let _ = app.update(Message::MediaPicked(MediaSlot::Real, Some(path.clone())));
        let _ = app.update(Message::MediaPicked(MediaSlot::Real, None));
        assert_eq!(app.selection.get(MediaSlot::Real).unwrap().path, path);
    }

    #[test]
    fn test_refused_connection_ends_loading_with_banner() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::with_settings(Settings {
            server_url: refused_url(),
            ..Settings::default()
        });
        let real = touch(dir.path(), "real.jpg");
        let fake = touch(dir.path(), "fake.mp4");
        let _ = app.update(Message::MediaPicked(MediaSlot::Real, Some(real)));
        let _ = app.update(Message::MediaPicked(MediaSlot::Fake, Some(fake)));

        let _ = app.update(Message::CheckScore);
        assert!(app.loading);
        assert!(!app.selection.can_submit(app.loading));

        let deadline = Instant::now() + Duration::from_secs(30);
        while app.loading && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
            let _ = app.update(Message::PollWorker);
        }

        assert!(!app.loading);
        assert!(app
            .selection
            .error()
            .unwrap()
            .starts_with("Cannot connect to the server"));
        assert!(app.selection.visible_result().is_none());
    }

    #[test]
    fn test_poll_without_worker_is_noop() {
        let mut app = app();
        let _ = app.update(Message::PollWorker);
        assert!(!app.loading);
        assert!(app.selection.error().is_none());
    }

    #[test]
    fn test_hover_tracking() {
        let mut app = app();
        let _ = app.update(Message::Hover(HoverTarget::CheckScore, true));
        assert!(app.is_hovered(HoverTarget::CheckScore));
        let _ = app.update(Message::Hover(HoverTarget::CheckScore, false));
        assert!(!app.is_hovered(HoverTarget::CheckScore));

        let _ = app.update(Message::Hover(HoverTarget::GetStarted, true));
        let _ = app.update(Message::TabSelected(Tab::Detect));
        assert!(!app.is_hovered(HoverTarget::GetStarted));
    }

    #[test]
    fn test_feedback_flow() {
        let mut app = app();
        let _ = app.update(Message::FeedbackEmailChanged("me@example.com".into()));
        let _ = app.update(Message::FeedbackMessageChanged("Works well".into()));
        let _ = app.update(Message::SubmitFeedback);
        assert!(app.feedback.email.is_empty());
        assert_eq!(app.feedback.thanks(), Some("Thank you for your feedback!"));
    }

    #[test]
    fn test_settings_changes_apply_in_memory() {
        let mut app = app();
        let _ = app.update(Message::AppearanceChanged(Appearance::Light));
        let _ = app.update(Message::ServerUrlChanged("http://10.0.0.5:8877".into()));
        let _ = app.update(Message::FontScaleChanged(1.25));
        assert_eq!(app.settings.appearance, Appearance::Light);
        assert_eq!(app.settings.server_url, "http://10.0.0.5:8877");
        assert_eq!(app.settings.font_scale, 1.25);
    }

    #[test]
    fn test_second_check_while_loading_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::with_settings(Settings {
            server_url: refused_url(),
            ..Settings::default()
        });
        assert!(app.worker.is_none());
        let _ = app.update(Message::MediaPicked(
            MediaSlot::Real,
            Some(touch(dir.path(), "a.jpg")),
        ));
        let _ = app.update(Message::MediaPicked(
            MediaSlot::Fake,
            Some(touch(dir.path(), "b.jpg")),
        ));
        let _ = app.update(Message::CheckScore);
        assert!(app.worker.is_some());

        // A second press while loading does not start another request.
        let _ = app.update(Message::CheckScore);
        assert!(app.loading);
    }
}
