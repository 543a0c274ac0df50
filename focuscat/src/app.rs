//! FocusCat main window
//!
//! Top bar with the focus timer, the cat and its counter; the editor with
//! per-sentence colors underneath, over an optional background picture.
//! Timers (focus countdown, quote rotation, autosave) are all driven from
//! frame deltas inside `update()`.

use crate::audio::{MeowPlayer, PlayOutcome, SoundBank};
use crate::background::{paint_shade, Background};
use crate::cat::{cat_button, CatAnimation};
use crate::counter::{MeowCounter, COUNTER_FILE};
use crate::highlight::{complete_sentence_count, sentence_layout_job, SentenceCache};
use crate::palette::ColorAssigner;
use crate::quotes::{Moment, QuoteBoard, QuoteLang};
use crate::session::{Session, AUTOSAVE_FILE};
use crate::settings::{Settings, SETTINGS_FILE};
use crate::timer::{FocusTimer, TimerEvent, TimerState, MAX_FOCUS_MINUTES};
use catcore::repaint::RepaintController;
use catcore::storage::{config_dir, data_dir, documents_dir, pictures_dir, FileBrowser};
use catcore::theme::{consume_zoom_keys, menu_bar, CatTheme, ThemeKind};
use catcore::widgets::{labelled_slider, status_bar, toolbar_separator, FileListItem};
use egui::{Context, FontId, Key, Modifiers};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const APP_TITLE: &str = "FocusCat 🐱";
const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(15);
const STATUS_DURATION: Duration = Duration::from_secs(3);
const CAT_SIZE: f32 = 40.0;
const TEXT_EXTENSIONS: &[&str] = &["txt", "md"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

#[derive(Clone, Copy, PartialEq)]
enum FileBrowserMode {
    Open,
    Save,
    Background,
}

/// A short message shown in the status bar until it expires.
struct StatusLine {
    text: String,
    until: Instant,
}

pub struct FocusCatApp {
    session: Session,
    settings: Settings,
    settings_path: PathBuf,
    autosave_path: PathBuf,
    theme: CatTheme,
    timer: FocusTimer,
    quotes: QuoteBoard,
    player: MeowPlayer,
    counter: MeowCounter,
    colors: ColorAssigner,
    sentences: SentenceCache,
    cat: CatAnimation,
    background: Option<Background>,
    status: Option<StatusLine>,
    since_autosave: Duration,
    last_update: Instant,
    window_title: String,
    show_file_browser: bool,
    file_browser: FileBrowser,
    file_browser_mode: FileBrowserMode,
    save_filename: String,
    show_discard_confirm: bool,
    show_about: bool,
    repaint: RepaintController,
}

impl FocusCatApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = config_dir().join(SETTINGS_FILE);
        let autosave_path = data_dir().join(AUTOSAVE_FILE);
        let settings = Settings::load(&settings_path);

        CatTheme::install_fonts(&cc.egui_ctx);
        let theme = CatTheme::new(settings.theme);
        theme.apply(&cc.egui_ctx);

        let session = Session::restore(&autosave_path).unwrap_or_default();
        let player = MeowPlayer::new(
            SoundBank::scan(&crate::assets::sounds_dir()),
            settings.volume,
            settings.sound_enabled,
        );

        let mut app = Self {
            session,
            timer: FocusTimer::new(settings.focus_minutes),
            quotes: QuoteBoard::new(settings.quote_lang),
            player,
            counter: MeowCounter::load(data_dir().join(COUNTER_FILE)),
            colors: ColorAssigner::new(),
            sentences: SentenceCache::default(),
            cat: CatAnimation::default(),
            background: None,
            status: None,
            since_autosave: Duration::ZERO,
            last_update: Instant::now(),
            window_title: String::new(),
            show_file_browser: false,
            file_browser: FileBrowser::new(documents_dir()),
            file_browser_mode: FileBrowserMode::Open,
            save_filename: String::new(),
            show_discard_confirm: false,
            show_about: false,
            repaint: RepaintController::new(),
            settings,
            settings_path,
            autosave_path,
            theme,
        };
        app.quotes.say(Moment::Greeting);
        app.load_startup_background(&cc.egui_ctx);
        app
    }

    fn load_startup_background(&mut self, ctx: &Context) {
        if let Some(path) = self.settings.background.clone() {
            match Background::load(ctx, &path) {
                Ok(bg) => self.background = Some(bg),
                Err(e) => {
                    log::warn!("background {} unavailable: {}", path.display(), e);
                    self.set_status("background missing, using plain theme");
                }
            }
            return;
        }
        let default_bg = crate::assets::default_background();
        if default_bg.is_file() {
            match Background::load(ctx, &default_bg) {
                Ok(bg) => {
                    self.background = Some(bg);
                    self.set_status("default background loaded");
                }
                Err(e) => log::warn!("default background unusable: {}", e),
            }
        }
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            until: Instant::now() + STATUS_DURATION,
        });
        self.repaint.mark_needs_repaint();
    }

    fn save_settings(&self) {
        self.settings.save(&self.settings_path);
    }

    // ---------------------------------------------------------------
    // Focus timer
    // ---------------------------------------------------------------

    fn start_timer(&mut self) {
        if let Some(event) = self.timer.start() {
            self.on_timer_event(event);
        }
    }

    fn pause_timer(&mut self) {
        if let Some(event) = self.timer.pause() {
            self.on_timer_event(event);
        }
    }

    fn reset_timer(&mut self) {
        let event = self.timer.reset();
        self.on_timer_event(event);
    }

    fn on_timer_event(&mut self, event: TimerEvent) {
        let moment = match event {
            TimerEvent::Started | TimerEvent::Resumed => Moment::FocusStart,
            TimerEvent::Paused => Moment::FocusPause,
            TimerEvent::Reset => Moment::FocusReset,
            TimerEvent::Finished => {
                log::info!("focus session finished");
                Moment::FocusDone
            }
        };
        self.quotes.say(moment);
    }

    // ---------------------------------------------------------------
    // Cat
    // ---------------------------------------------------------------

    fn on_meow_clicked(&mut self) {
        self.counter.increment();
        self.cat.trigger();
        match self.player.play_random() {
            PlayOutcome::NoSounds => self.set_status("no meow sounds found in assets/sounds"),
            PlayOutcome::Played(path) => log::debug!("meow: {}", path.display()),
            PlayOutcome::Muted | PlayOutcome::Failed => {}
        }
    }

    // ---------------------------------------------------------------
    // Files
    // ---------------------------------------------------------------

    fn request_new_document(&mut self) {
        if self.session.is_blank() {
            self.new_document();
        } else {
            self.show_discard_confirm = true;
        }
    }

    fn new_document(&mut self) {
        self.session = Session::new();
        self.show_discard_confirm = false;
    }

    fn open_file(&mut self, path: PathBuf) {
        match Session::open(path.clone()) {
            Ok(session) => {
                log::info!("opened {}", path.display());
                self.session = session;
            }
            Err(e) => {
                log::error!("failed to open {}: {}", path.display(), e);
                self.set_status(format!("open failed: {}", e));
            }
        }
    }

    fn save_document(&mut self) {
        match self.session.save() {
            Ok(true) => self.on_saved(),
            Ok(false) => self.show_save_as_dialog(),
            Err(e) => {
                log::error!("failed to save: {}", e);
                self.set_status(format!("save failed: {}", e));
            }
        }
    }

    fn save_document_as(&mut self, path: PathBuf) {
        match self.session.save_as(path) {
            Ok(()) => self.on_saved(),
            Err(e) => {
                log::error!("failed to save: {}", e);
                self.set_status(format!("save failed: {}", e));
            }
        }
    }

    fn on_saved(&mut self) {
        self.set_status(format!("saved {}", self.session.title()));
        self.quotes.shuffle();
    }

    fn autosave(&mut self) {
        self.session.autosave(&self.autosave_path);
        self.since_autosave = Duration::ZERO;
    }

    fn show_open_dialog(&mut self) {
        self.file_browser = FileBrowser::new(documents_dir()).with_filter(TEXT_EXTENSIONS);
        self.file_browser_mode = FileBrowserMode::Open;
        self.show_file_browser = true;
    }

    fn show_save_as_dialog(&mut self) {
        let start = self
            .session
            .path
            .as_ref()
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(documents_dir);
        self.file_browser = FileBrowser::new(start).with_filter(TEXT_EXTENSIONS);
        self.file_browser_mode = FileBrowserMode::Save;
        self.save_filename = match self.session.path {
            Some(_) => self.session.title(),
            None => "untitled.txt".to_string(),
        };
        self.show_file_browser = true;
    }

    fn show_background_dialog(&mut self) {
        self.file_browser = FileBrowser::new(pictures_dir()).with_filter(IMAGE_EXTENSIONS);
        self.file_browser_mode = FileBrowserMode::Background;
        self.show_file_browser = true;
    }

    // ---------------------------------------------------------------
    // Settings
    // ---------------------------------------------------------------

    fn set_background(&mut self, ctx: &Context, path: PathBuf) {
        match Background::load(ctx, &path) {
            Ok(bg) => {
                self.set_status(format!("background set: {}", bg.file_name()));
                self.background = Some(bg);
                self.settings.background = Some(path);
                self.save_settings();
            }
            Err(e) => {
                log::warn!("set background failed: {}", e);
                self.set_status(format!("set background failed: {}", e));
            }
        }
    }

    fn clear_background(&mut self) {
        self.background = None;
        self.settings.background = None;
        self.save_settings();
        self.set_status("background cleared");
    }

    fn set_theme(&mut self, ctx: &Context, kind: ThemeKind) {
        self.theme = CatTheme::new(kind);
        self.theme.apply(ctx);
        self.settings.theme = kind;
        self.save_settings();
    }

    fn set_quote_lang(&mut self, lang: QuoteLang) {
        self.quotes.set_lang(lang);
        self.settings.quote_lang = lang;
        self.save_settings();
    }

    // ---------------------------------------------------------------
    // Per-frame bookkeeping
    // ---------------------------------------------------------------

    fn tick(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_update);
        self.last_update = now;

        if let Some(event) = self.timer.advance(dt) {
            self.on_timer_event(event);
            self.repaint.mark_needs_repaint();
        }
        self.cat.advance(dt.as_secs_f32());
        if self.quotes.advance(dt) {
            self.repaint.mark_needs_repaint();
        }

        self.since_autosave += dt;
        if self.since_autosave >= AUTOSAVE_INTERVAL {
            self.autosave();
        }

        if self.status.as_ref().map_or(false, |s| now >= s.until) {
            self.status = None;
        }
    }

    fn schedule_repaint(&mut self) {
        self.repaint.set_continuous(self.timer.is_running());
        self.repaint.set_animating(self.cat.is_active());
        self.repaint.wake_within(self.quotes.until_rotation());
        self.repaint.wake_within(AUTOSAVE_INTERVAL.saturating_sub(self.since_autosave));
        if let Some(status) = &self.status {
            self.repaint.wake_within(status.until.saturating_duration_since(Instant::now()));
        }
    }

    fn update_window_title(&mut self, ctx: &Context) {
        let title = if self.timer.is_running() {
            format!("{} · {}", APP_TITLE, self.timer.display())
        } else {
            format!("{} - {}", APP_TITLE, self.session.display_title())
        };
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }
    }

    fn handle_keyboard(&mut self, ctx: &Context) {
        let (save_as, save, open, new) = ctx.input_mut(|i| {
            (
                i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::S),
                i.consume_key(Modifiers::COMMAND, Key::S),
                i.consume_key(Modifiers::COMMAND, Key::O),
                i.consume_key(Modifiers::COMMAND, Key::N),
            )
        });
        if save_as {
            self.show_save_as_dialog();
        } else if save {
            self.save_document();
        }
        if open {
            self.show_open_dialog();
        }
        if new {
            self.request_new_document();
        }
    }

    // ---------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        let colors = self.theme.kind.colors();
        menu_bar(ui, colors, |ui| {
            ui.menu_button("file", |ui| {
                if ui.button("new          ⌘n").clicked() {
                    self.request_new_document();
                    ui.close_menu();
                }
                if ui.button("open...      ⌘o").clicked() {
                    self.show_open_dialog();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("save         ⌘s").clicked() {
                    self.save_document();
                    ui.close_menu();
                }
                if ui.button("save as...  ⇧⌘s").clicked() {
                    self.show_save_as_dialog();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("exit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close_menu();
                }
            });

            ui.menu_button("settings", |ui| {
                self.render_settings_menu(ui);
            });

            ui.menu_button("focus", |ui| {
                if ui.button("start focus").clicked() {
                    self.start_timer();
                    ui.close_menu();
                }
                if ui.button("pause focus").clicked() {
                    self.pause_timer();
                    ui.close_menu();
                }
                if ui.button("reset focus").clicked() {
                    self.reset_timer();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("recolor all now").clicked() {
                    self.colors.reshuffle();
                    ui.close_menu();
                }
            });

            ui.menu_button("help", |ui| {
                if ui.button("about FocusCat").clicked() {
                    self.show_about = true;
                    ui.close_menu();
                }
            });
        });
    }

    fn render_settings_menu(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("theme", |ui| {
            for kind in ThemeKind::ALL {
                let selected = self.theme.kind == kind;
                if ui.selectable_label(selected, kind.label()).clicked() {
                    self.set_theme(ui.ctx(), kind);
                    ui.close_menu();
                }
            }
        });

        ui.menu_button("background", |ui| {
            if ui.button("set image...").clicked() {
                self.show_background_dialog();
                ui.close_menu();
            }
            if ui.button("clear background").clicked() {
                self.clear_background();
                ui.close_menu();
            }
        });

        ui.menu_button("quotes language", |ui| {
            for lang in [QuoteLang::Zh, QuoteLang::En] {
                if ui.selectable_label(self.quotes.lang() == lang, lang.label()).clicked() {
                    self.set_quote_lang(lang);
                    ui.close_menu();
                }
            }
        });

        ui.menu_button("shade", |ui| {
            if ui.checkbox(&mut self.settings.shade_enabled, "show background shade").changed() {
                self.save_settings();
            }
            let mut alpha = u32::from(self.settings.shade_alpha);
            if labelled_slider(ui, "opacity", &mut alpha, 255, "").changed() {
                self.settings.shade_alpha = alpha.min(255) as u8;
                self.save_settings();
            }
        });

        ui.menu_button("sound", |ui| {
            if ui.checkbox(&mut self.settings.sound_enabled, "enable meow sounds").changed() {
                self.player.set_enabled(self.settings.sound_enabled);
                self.set_status(if self.settings.sound_enabled { "meow sounds: on" } else { "meow sounds: off" });
                self.save_settings();
            }
            let mut percent = self.settings.volume_percent();
            if labelled_slider(ui, "volume", &mut percent, 100, "%").changed() {
                self.settings.set_volume_percent(percent);
                self.player.set_volume(self.settings.volume);
                self.save_settings();
            }
        });

        ui.menu_button("focus length", |ui| {
            let mut minutes = self.settings.focus_minutes;
            let response = labelled_slider(ui, "minutes", &mut minutes, MAX_FOCUS_MINUTES, " min");
            if response.changed() {
                let minutes = minutes.max(1);
                self.settings.focus_minutes = minutes;
                if !self.timer.set_minutes(minutes) {
                    self.set_status("new length applies after reset");
                }
                self.save_settings();
            }
        });
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        self.theme.top_bar_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format!("⏰ {}", self.timer.display())).monospace().size(18.0));
                let state = self.timer.state();
                if ui.add_enabled(state != TimerState::Running, egui::Button::new("▶ start")).clicked() {
                    self.start_timer();
                }
                if ui.add_enabled(state == TimerState::Running, egui::Button::new("⏸ pause")).clicked() {
                    self.pause_timer();
                }
                if ui.button("↺ reset").clicked() {
                    self.reset_timer();
                }
                toolbar_separator(ui);
                ui.label(self.quotes.current().to_string());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("💾 save").clicked() {
                        self.save_document();
                    }
                    ui.label(self.counter.count().to_string())
                        .on_hover_text("meow click count");
                    if cat_button(ui, &self.cat, CAT_SIZE).clicked() {
                        self.on_meow_clicked();
                    }
                });
            });
        });
    }

    fn render_editor(&mut self, ui: &mut egui::Ui) {
        let area = ui.available_rect_before_wrap();
        if self.settings.shade_enabled {
            paint_shade(ui.painter(), area, self.settings.shade_alpha);
        }

        let assigner = &self.colors;
        let cache = &mut self.sentences;
        let plain = self.theme.kind.colors().fg;
        let font = FontId::monospace(self.theme.font_size_editor);
        let mut layouter = |ui: &egui::Ui, text: &str, wrap_width: f32| {
            let mut job = sentence_layout_job(text, cache.sentences(text), font.clone(), plain, assigner);
            job.wrap.max_width = wrap_width;
            ui.fonts(|f| f.layout_job(job))
        };

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let output = egui::TextEdit::multiline(&mut self.session.text)
                    .desired_width(f32::INFINITY)
                    .desired_rows((area.height() / 22.0).max(4.0) as usize)
                    .frame(false)
                    .layouter(&mut layouter)
                    .show(ui);

                if output.response.changed() {
                    self.session.modified = true;
                }
            });
    }

    fn render_file_browser(&mut self, ctx: &Context) {
        let title = match self.file_browser_mode {
            FileBrowserMode::Open => "open document",
            FileBrowserMode::Save => "save document",
            FileBrowserMode::Background => "choose background image",
        };
        let mut chosen: Option<PathBuf> = None;

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .default_width(400.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("location:");
                    ui.label(self.file_browser.current_dir.to_string_lossy().to_string());
                });
                ui.separator();

                egui::ScrollArea::vertical()
                    .max_height(300.0)
                    .show(ui, |ui| {
                        let entries = self.file_browser.entries.clone();
                        for (idx, entry) in entries.iter().enumerate() {
                            let selected = self.file_browser.selected_index == Some(idx);
                            let response = ui.add(FileListItem::new(&entry.name, entry.is_directory).selected(selected));
                            if response.clicked() {
                                self.file_browser.selected_index = Some(idx);
                                if !entry.is_directory && self.file_browser_mode == FileBrowserMode::Save {
                                    self.save_filename = entry.name.clone();
                                }
                            }
                            if response.double_clicked() {
                                if entry.is_directory {
                                    self.file_browser.navigate_to(entry.path.clone());
                                } else {
                                    chosen = Some(entry.path.clone());
                                }
                            }
                        }
                    });

                if self.file_browser_mode == FileBrowserMode::Save {
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label("filename:");
                        ui.text_edit_singleline(&mut self.save_filename);
                    });
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("cancel").clicked() {
                        self.show_file_browser = false;
                    }
                    let action = match self.file_browser_mode {
                        FileBrowserMode::Open => "open",
                        FileBrowserMode::Save => "save",
                        FileBrowserMode::Background => "use image",
                    };
                    if ui.button(action).clicked() {
                        chosen = match self.file_browser_mode {
                            FileBrowserMode::Save if !self.save_filename.trim().is_empty() => {
                                Some(self.file_browser.current_dir.join(self.save_filename.trim()))
                            }
                            FileBrowserMode::Save => None,
                            _ => self
                                .file_browser
                                .selected_entry()
                                .filter(|e| !e.is_directory)
                                .map(|e| e.path.clone()),
                        };
                    }
                });
            });

        if let Some(path) = chosen {
            self.show_file_browser = false;
            match self.file_browser_mode {
                FileBrowserMode::Open => self.open_file(path),
                FileBrowserMode::Save => self.save_document_as(path),
                FileBrowserMode::Background => self.set_background(ctx, path),
            }
        }
    }

    fn render_discard_confirm(&mut self, ctx: &Context) {
        egui::Window::new("new file")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("discard current content?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("discard").clicked() {
                        self.new_document();
                    }
                    if ui.button("keep writing").clicked() {
                        self.show_discard_confirm = false;
                    }
                });
            });
    }

    fn render_about(&mut self, ctx: &Context) {
        egui::Window::new("about FocusCat")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(APP_TITLE);
                    ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(8.0);
                    ui.label("a writing companion with a focus timer and a cat");
                    ui.label(format!("the cat has meowed {} times", self.counter.count()));
                    ui.add_space(4.0);
                    ui.label(format!("{} meow sounds loaded", self.player.bank().len()));
                    ui.add_space(8.0);
                    if ui.button("ok").clicked() {
                        self.show_about = false;
                    }
                });
            });
    }

    fn status_text(&mut self) -> String {
        let sentences = complete_sentence_count(self.sentences.sentences(&self.session.text));
        let counts = format!(
            "{}  |  words: {}  |  chars: {}  |  sentences: {}",
            self.session.display_title(),
            self.session.word_count(),
            self.session.char_count(),
            sentences
        );
        match &self.status {
            Some(status) => format!("{}  |  {}", counts, status.text),
            None => counts,
        }
    }
}

impl eframe::App for FocusCatApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame();
        consume_zoom_keys(ctx);
        self.tick();
        self.handle_keyboard(ctx);

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.render_menu_bar(ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status_bar(ui, &self.status_text());
        });

        let bg_fill = self.theme.kind.colors().bg;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(bg_fill))
            .show(ctx, |ui| {
                if let Some(bg) = &self.background {
                    bg.paint(ui.painter(), ui.max_rect());
                }
                egui::Frame::none()
                    .inner_margin(egui::Margin::symmetric(40.0, 24.0))
                    .show(ui, |ui| {
                        self.render_top_bar(ui);
                        ui.add_space(8.0);
                        self.render_editor(ui);
                    });
            });

        if self.show_file_browser {
            self.render_file_browser(ctx);
        }
        if self.show_discard_confirm {
            self.render_discard_confirm(ctx);
        }
        if self.show_about {
            self.render_about(ctx);
        }

        self.update_window_title(ctx);
        self.schedule_repaint();
        self.repaint.end_frame(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.autosave();
        self.save_settings();
        log::info!("bye, {} meows so far", self.counter.count());
    }
}
