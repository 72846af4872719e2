// src/main.rs
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use iced::alignment::Horizontal;
use iced::widget::{
    button, column, container, mouse_area, pick_list, row, scrollable, text, Column,
    Row as TableRow, Space,
};
use iced::{
    event, executor, theme, time, window, Alignment, Application, Background, Border, Color,
    Command, Element, Event, Length, Settings, Size, Subscription, Theme,
};

mod api_client;
mod data_types;
mod formatters;
mod ui;
mod upload;

use api_client::ApiClient;
use data_types::{ErrorReport, ImportResponse, Row, Sheet, ValidateResponse, Workbook};
use formatters::{format_date, format_indian_number};
use ui::{Styles, DARK_THEME, LIGHT_THEME};

const VERSION: &str = "1.0.0";
const PAGE_SIZE: usize = 10;
const TOAST_DURATION: Duration = Duration::from_secs(4);

const COLUMN_TITLES: [&str; 6] = ["Name", "Amount", "Date", "Verified", "Status", "Actions"];
const COLUMN_WIDTHS: [f32; 6] = [220.0, 140.0, 120.0, 100.0, 110.0, 90.0];

pub fn main() -> iced::Result {
    dotenvy::dotenv().ok();
    env_logger::init();

    ExcelImporter::run(Settings {
        window: window::Settings {
            size: Size::new(1180.0, 780.0),
            ..window::Settings::default()
        },
        ..Settings::default()
    })
}

struct ExcelImporter {
    api: ApiClient,
    route: Route,
    is_dark_mode: bool,
    workbook: Option<Workbook>,
    selected_sheet: Option<String>,
    current_page: usize,
    errors: Option<ErrorReport>,
    show_errors: bool,
    active_error_tab: usize,
    imported_rows: HashSet<String>,
    transfer: Transfer,
    pending_delete: Option<usize>,
    upload_error: Option<String>,
    drop_hover: bool,
    toast: Option<Toast>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Import,
    DataViewer,
}

/// The one request that may be in flight. Upload and import triggers are
/// rejected unless this is Idle, so overlapping requests cannot start even if
/// an event slips past a disabled control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transfer {
    Idle,
    Validating,
    Importing,
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    kind: ToastKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToastKind {
    Success,
    Error,
}

impl Toast {
    fn success(message: &str) -> Self {
        Toast { message: message.to_string(), kind: ToastKind::Success }
    }

    fn error(message: &str) -> Self {
        Toast { message: message.to_string(), kind: ToastKind::Error }
    }
}

#[derive(Debug, Clone)]
enum Message {
    Navigate(Route),
    ToggleTheme,
    PickFile,
    FileSelected(Option<PathBuf>),
    FileDropped(PathBuf),
    DropZoneHovered(bool),
    Validated(Result<ValidateResponse, String>),
    SheetSelected(String),
    StartImport,
    Imported(Result<ImportResponse, String>),
    RequestDeleteRow(usize),
    ConfirmDelete,
    CancelDelete,
    PreviousPage,
    NextPage,
    CloseErrors,
    ErrorTabSelected(usize),
    ToastExpired,
}

impl Application for ExcelImporter {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        (
            ExcelImporter {
                api: ApiClient::from_env(),
                route: Route::Import,
                is_dark_mode: false,
                workbook: None,
                selected_sheet: None,
                current_page: 1,
                errors: None,
                show_errors: false,
                active_error_tab: 0,
                imported_rows: HashSet::new(),
                transfer: Transfer::Idle,
                pending_delete: None,
                upload_error: None,
                drop_hover: false,
                toast: None,
            },
            Command::none(),
        )
    }

    fn title(&self) -> String {
        format!("Excel Importer v{}", VERSION)
    }

    fn theme(&self) -> Theme {
        if self.is_dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::Navigate(route) => {
                self.route = route;
                Command::none()
            }

            Message::ToggleTheme => {
                self.is_dark_mode = !self.is_dark_mode;
                Command::none()
            }

            Message::PickFile => {
                if self.transfer != Transfer::Idle {
                    return Command::none();
                }
                Command::perform(upload::pick_file(), Message::FileSelected)
            }

            Message::FileSelected(Some(path)) => self.begin_validation(path),

            Message::FileSelected(None) => {
                self.upload_error = Some(upload::FileRejection::NotSelected.to_string());
                Command::none()
            }

            Message::FileDropped(path) => {
                self.drop_hover = false;
                self.begin_validation(path)
            }

            Message::DropZoneHovered(hovering) => {
                self.drop_hover = hovering && self.transfer == Transfer::Idle;
                Command::none()
            }

            Message::Validated(Ok(response)) => {
                self.transfer = Transfer::Idle;
                let had_errors = self.absorb_errors(response.errors);
                if let Some(workbook) = response.data {
                    self.selected_sheet = workbook.first_sheet_name();
                    log::info!("validated workbook with {} sheet(s)", workbook.sheets.len());
                    self.workbook = Some(workbook);
                    self.toast = Some(Toast::success(if had_errors {
                        "File validated. Some rows have errors but valid rows can be imported."
                    } else {
                        "File validated successfully"
                    }));
                }
                Command::none()
            }

            Message::Validated(Err(reason)) => {
                self.transfer = Transfer::Idle;
                log::error!("validation request failed: {}", reason);
                self.toast = Some(Toast::error("Error uploading file. Please try again."));
                Command::none()
            }

            Message::SheetSelected(name) => {
                self.selected_sheet = Some(name);
                Command::none()
            }

            Message::StartImport => {
                if self.transfer != Transfer::Idle || self.selected_sheet.is_none() {
                    return Command::none();
                }
                let Some(workbook) = self.workbook.clone() else {
                    return Command::none();
                };
                self.transfer = Transfer::Importing;
                let client = self.api.clone();
                Command::perform(
                    async move { client.import(workbook).await.map_err(|err| format!("{:#}", err)) },
                    Message::Imported,
                )
            }

            Message::Imported(Ok(response)) => {
                self.transfer = Transfer::Idle;
                let had_errors = self.absorb_errors(response.errors);
                if let Some(success) = response.success {
                    for row in &success {
                        if let Some(id) = &row.id {
                            self.imported_rows.insert(id.clone());
                        }
                    }
                    log::info!("import confirmed {} row(s)", success.len());
                    self.toast = Some(Toast::success(if had_errors {
                        "Import completed. Some rows were imported successfully while others had errors."
                    } else {
                        "All data imported successfully"
                    }));
                }
                Command::none()
            }

            Message::Imported(Err(reason)) => {
                self.transfer = Transfer::Idle;
                log::error!("import request failed: {}", reason);
                self.toast = Some(Toast::error("Error importing data"));
                Command::none()
            }

            Message::RequestDeleteRow(index) => {
                let imported = self
                    .active_sheet()
                    .and_then(|sheet| sheet.rows.get(index))
                    .map_or(false, |row| self.is_imported(row));
                if !imported {
                    self.pending_delete = Some(index);
                }
                Command::none()
            }

            Message::ConfirmDelete => {
                if let (Some(index), Some(name)) =
                    (self.pending_delete.take(), self.selected_sheet.clone())
                {
                    if let Some(workbook) = self.workbook.as_mut() {
                        if workbook.delete_row(&name, index).is_some() {
                            log::debug!("deleted row {} from sheet {}", index, name);
                        }
                    }
                }
                Command::none()
            }

            Message::CancelDelete => {
                self.pending_delete = None;
                Command::none()
            }

            Message::PreviousPage => {
                self.current_page = self.page_clamped().saturating_sub(1).max(1);
                Command::none()
            }

            Message::NextPage => {
                let total = self.total_pages_active().max(1);
                self.current_page = (self.page_clamped() + 1).min(total);
                Command::none()
            }

            Message::CloseErrors => {
                self.show_errors = false;
                Command::none()
            }

            Message::ErrorTabSelected(index) => {
                self.active_error_tab = index;
                Command::none()
            }

            Message::ToastExpired => {
                self.toast = None;
                Command::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![event::listen_with(handle_window_event)];
        if self.toast.is_some() {
            subscriptions.push(time::every(TOAST_DURATION).map(|_| Message::ToastExpired));
        }
        Subscription::batch(subscriptions)
    }

    fn view(&self) -> Element<Message> {
        let styles = self.styles();

        if self.show_errors {
            if let Some(report) = self.errors.as_ref().filter(|report| !report.is_empty()) {
                return self.error_overlay(report, styles);
            }
        }
        if self.pending_delete.is_some() {
            return self.confirm_delete_view(styles);
        }

        let page = match self.route {
            Route::Import => self.import_page(styles),
            Route::DataViewer => self.data_viewer_page(styles),
        };

        let mut shell = column![self.nav_bar(styles)];
        if let Some(toast) = &self.toast {
            shell = shell.push(self.toast_banner(toast, styles));
        }
        shell = shell.push(page);

        container(shell)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::Container::Custom(Box::new(Panel { bg: styles.bg })))
            .into()
    }
}

impl ExcelImporter {
    fn styles(&self) -> &'static Styles {
        if self.is_dark_mode {
            &DARK_THEME
        } else {
            &LIGHT_THEME
        }
    }

    fn active_sheet(&self) -> Option<&Sheet> {
        let name = self.selected_sheet.as_deref()?;
        self.workbook.as_ref()?.sheet(name)
    }

    fn is_imported(&self, row: &Row) -> bool {
        row.id.as_deref().map_or(false, |id| self.imported_rows.contains(id))
    }

    fn total_pages_active(&self) -> usize {
        self.active_sheet().map_or(0, |sheet| total_pages(sheet.rows.len()))
    }

    // Clamp-on-render: the stored page is deliberately left alone by sheet
    // switches, re-uploads and deletions; every read lands it back inside
    // [1, max(1, total)].
    fn page_clamped(&self) -> usize {
        self.current_page.clamp(1, self.total_pages_active().max(1))
    }

    /// Stores and surfaces a non-empty error report. Returns whether the
    /// response carried an `errors` field at all, which drives the toast
    /// wording.
    fn absorb_errors(&mut self, errors: Option<ErrorReport>) -> bool {
        match errors {
            Some(report) => {
                if !report.is_empty() {
                    self.errors = Some(report);
                    self.show_errors = true;
                    self.active_error_tab = 0;
                }
                true
            }
            None => false,
        }
    }

    fn begin_validation(&mut self, path: PathBuf) -> Command<Message> {
        if self.transfer != Transfer::Idle {
            return Command::none();
        }
        let size = fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
        if let Err(rejection) = upload::validate_selection(&path, size) {
            self.upload_error = Some(rejection.to_string());
            return Command::none();
        }
        self.upload_error = None;
        self.transfer = Transfer::Validating;
        let client = self.api.clone();
        Command::perform(
            async move { client.validate_file(path).await.map_err(|err| format!("{:#}", err)) },
            Message::Validated,
        )
    }

    fn nav_bar(&self, styles: &'static Styles) -> Element<Message> {
        let nav_link = |label: &str, route: Route| {
            let style = if route == self.route {
                ActionButton {
                    bg: styles.accent,
                    fg: styles.nav_fg,
                    hover_bg: styles.accent_hover,
                }
            } else {
                ActionButton {
                    bg: styles.nav_bg,
                    fg: styles.nav_fg,
                    hover_bg: styles.accent_hover,
                }
            };
            button(text(label).size(16))
                .padding([6.0, 12.0])
                .style(theme::Button::Custom(Box::new(style)))
                .on_press(Message::Navigate(route))
        };

        container(
            row![
                text("Excel Importer").size(20).style(theme::Text::Color(styles.nav_fg)),
                Space::with_width(Length::Fill),
                nav_link("Import", Route::Import),
                nav_link("View Data", Route::DataViewer),
                button(
                    text(if self.is_dark_mode { "Light" } else { "Dark" }).size(16)
                )
                .padding([6.0, 12.0])
                .style(theme::Button::Custom(Box::new(ActionButton {
                    bg: styles.nav_bg,
                    fg: styles.nav_fg,
                    hover_bg: styles.accent_hover,
                })))
                .on_press(Message::ToggleTheme),
            ]
            .spacing(10)
            .align_items(Alignment::Center),
        )
        .width(Length::Fill)
        .padding([10.0, 16.0])
        .style(theme::Container::Custom(Box::new(Panel { bg: styles.nav_bg })))
        .into()
    }

    fn toast_banner(&self, toast: &Toast, styles: &'static Styles) -> Element<Message> {
        let (bg, fg) = match toast.kind {
            ToastKind::Success => (styles.success_bg, styles.success_fg),
            ToastKind::Error => (styles.error_bg, styles.error_fg),
        };
        container(text(&toast.message).size(15).style(theme::Text::Color(fg)))
            .width(Length::Fill)
            .padding([8.0, 16.0])
            .style(theme::Container::Custom(Box::new(Panel { bg })))
            .into()
    }

    fn import_page(&self, styles: &'static Styles) -> Element<Message> {
        let mut content = column![
            text("Excel Data Importer")
                .size(28)
                .style(theme::Text::Color(styles.fg))
                .width(Length::Fill)
                .horizontal_alignment(Horizontal::Center),
            self.dropzone(styles),
        ]
        .spacing(16)
        .padding(24)
        .width(Length::Fill);

        if let Some(message) = &self.upload_error {
            content = content.push(
                text(message)
                    .size(15)
                    .style(theme::Text::Color(styles.danger))
                    .width(Length::Fill)
                    .horizontal_alignment(Horizontal::Center),
            );
        }

        if let Some(workbook) = &self.workbook {
            content = content.push(self.sheet_controls(workbook, styles));
            if let Some(sheet) = self.active_sheet() {
                content = content.push(self.sheet_table(sheet, styles));
                content = content.push(self.pagination_controls(styles));
            }
        }

        scrollable(content).height(Length::Fill).into()
    }

    fn dropzone(&self, styles: &'static Styles) -> Element<Message> {
        let body = if self.transfer == Transfer::Validating {
            column![text("Processing your file...")
                .size(18)
                .style(theme::Text::Color(styles.fg))]
        } else {
            column![
                text(if self.drop_hover {
                    "Drop the file here"
                } else {
                    "Drag & drop an Excel file here"
                })
                .size(18)
                .style(theme::Text::Color(styles.fg)),
                text("or click to select a file")
                    .size(14)
                    .style(theme::Text::Color(styles.muted_fg)),
                text("Only .xlsx files up to 2MB are accepted")
                    .size(12)
                    .style(theme::Text::Color(styles.muted_fg)),
            ]
        }
        .spacing(6)
        .align_items(Alignment::Center)
        .width(Length::Fill);

        let zone = container(body)
            .width(Length::Fill)
            .padding(32)
            .style(theme::Container::Custom(Box::new(DropZone {
                bg: if self.drop_hover { styles.panel_bg } else { styles.bg },
                border: if self.drop_hover { styles.accent } else { styles.border },
            })));

        if self.transfer == Transfer::Idle {
            mouse_area(zone).on_press(Message::PickFile).into()
        } else {
            zone.into()
        }
    }

    fn sheet_controls(&self, workbook: &Workbook, styles: &'static Styles) -> Element<Message> {
        let selector = pick_list(
            workbook.sheet_names(),
            self.selected_sheet.clone(),
            Message::SheetSelected,
        )
        .placeholder("Select sheet")
        .padding([6.0, 10.0]);

        let label = if self.transfer == Transfer::Importing {
            "Importing..."
        } else {
            "Import Data"
        };
        let mut import_button = button(text(label).size(16))
            .padding([8.0, 16.0])
            .style(theme::Button::Custom(Box::new(ActionButton {
                bg: styles.accent,
                fg: styles.button_fg,
                hover_bg: styles.accent_hover,
            })));
        if self.transfer == Transfer::Idle {
            import_button = import_button.on_press(Message::StartImport);
        }

        row![selector, Space::with_width(Length::Fill), import_button]
            .align_items(Alignment::Center)
            .into()
    }

    fn sheet_table(&self, sheet: &Sheet, styles: &'static Styles) -> Element<Message> {
        let header = TableRow::with_children(
            COLUMN_TITLES
                .into_iter()
                .zip(COLUMN_WIDTHS)
                .map(|(title, width)| {
                    table_cell(
                        text(title).size(14).style(theme::Text::Color(styles.header_fg)).into(),
                        width,
                        styles.header_bg,
                    )
                })
                .collect::<Vec<Element<Message>>>(),
        )
        .spacing(1);

        let start = (self.page_clamped() - 1) * PAGE_SIZE;
        let body = Column::with_children(
            sheet
                .rows
                .iter()
                .enumerate()
                .skip(start)
                .take(PAGE_SIZE)
                .map(|(index, row)| self.table_row(index, row, styles))
                .collect::<Vec<Element<Message>>>(),
        )
        .spacing(1);

        column![header, body].spacing(1).into()
    }

    fn table_row(&self, index: usize, row: &Row, styles: &'static Styles) -> Element<Message> {
        let imported = self.is_imported(row);
        let row_bg = if imported { styles.imported_row_bg } else { styles.bg };

        let amount = row.amount.map(format_indian_number).unwrap_or_default();

        let (badge_label, badge_bg, badge_fg) = if imported {
            ("Imported", styles.success_bg, styles.success_fg)
        } else {
            ("Pending", styles.pending_bg, styles.pending_fg)
        };
        let badge: Element<Message> = container(
            text(badge_label).size(12).style(theme::Text::Color(badge_fg)),
        )
        .padding([2.0, 8.0])
        .style(theme::Container::Custom(Box::new(Badge { bg: badge_bg })))
        .into();

        let mut delete_button = button(text("Delete").size(13))
            .padding([4.0, 8.0])
            .style(theme::Button::Custom(Box::new(ActionButton {
                bg: styles.danger,
                fg: styles.button_fg,
                hover_bg: styles.danger_hover,
            })));
        if !imported {
            delete_button = delete_button.on_press(Message::RequestDeleteRow(index));
        }

        TableRow::with_children(vec![
            table_cell(
                text(&row.name).size(14).style(theme::Text::Color(styles.fg)).into(),
                COLUMN_WIDTHS[0],
                row_bg,
            ),
            table_cell(
                text(amount).size(14).style(theme::Text::Color(styles.fg)).into(),
                COLUMN_WIDTHS[1],
                row_bg,
            ),
            table_cell(
                text(format_date(&row.date)).size(14).style(theme::Text::Color(styles.fg)).into(),
                COLUMN_WIDTHS[2],
                row_bg,
            ),
            table_cell(
                text(&row.verified).size(14).style(theme::Text::Color(styles.fg)).into(),
                COLUMN_WIDTHS[3],
                row_bg,
            ),
            table_cell(badge, COLUMN_WIDTHS[4], row_bg),
            table_cell(delete_button.into(), COLUMN_WIDTHS[5], row_bg),
        ])
        .spacing(1)
        .into()
    }

    fn pagination_controls(&self, styles: &'static Styles) -> Element<Message> {
        let total = self.total_pages_active();
        let page = self.page_clamped();

        let pager_button = |label: &str, enabled: bool, message: Message| {
            let mut pager = button(text(label).size(14))
                .padding([6.0, 12.0])
                .style(theme::Button::Custom(Box::new(ActionButton {
                    bg: styles.panel_bg,
                    fg: styles.fg,
                    hover_bg: styles.border,
                })));
            if enabled {
                pager = pager.on_press(message);
            }
            pager
        };

        container(
            row![
                pager_button("Previous", page > 1, Message::PreviousPage),
                text(format!("Page {} of {}", page, total))
                    .size(14)
                    .style(theme::Text::Color(styles.muted_fg)),
                pager_button("Next", page < total, Message::NextPage),
            ]
            .spacing(12)
            .align_items(Alignment::Center),
        )
        .width(Length::Fill)
        .center_x()
        .into()
    }

    fn data_viewer_page(&self, styles: &'static Styles) -> Element<Message> {
        container(
            column![
                text("Imported Data").size(24).style(theme::Text::Color(styles.fg)),
                text("Browsing previously imported rows is handled by the reporting service.")
                    .size(15)
                    .style(theme::Text::Color(styles.muted_fg)),
            ]
            .spacing(8)
            .align_items(Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .into()
    }

    fn error_overlay(&self, report: &ErrorReport, styles: &'static Styles) -> Element<Message> {
        let active_tab = self.active_error_tab.min(report.sheets.len() - 1);

        let header = row![
            text("Validation Errors").size(20).style(theme::Text::Color(styles.fg)),
            Space::with_width(Length::Fill),
            button(text("Close").size(14))
                .padding([4.0, 10.0])
                .style(theme::Button::Custom(Box::new(ActionButton {
                    bg: styles.panel_bg,
                    fg: styles.fg,
                    hover_bg: styles.border,
                })))
                .on_press(Message::CloseErrors),
        ]
        .align_items(Alignment::Center);

        let mut tabs = row![].spacing(6);
        for (index, sheet) in report.sheets.iter().enumerate() {
            let style = if index == active_tab {
                ActionButton {
                    bg: styles.accent,
                    fg: styles.button_fg,
                    hover_bg: styles.accent_hover,
                }
            } else {
                ActionButton {
                    bg: styles.panel_bg,
                    fg: styles.fg,
                    hover_bg: styles.border,
                }
            };
            tabs = tabs.push(
                button(text(&sheet.name).size(14))
                    .padding([6.0, 12.0])
                    .style(theme::Button::Custom(Box::new(style)))
                    .on_press(Message::ErrorTabSelected(index)),
            );
        }

        let entries = report.sheets[active_tab]
            .errors
            .iter()
            .map(|error| {
                container(
                    row![
                        text(format!("Row {}: ", error.row))
                            .size(14)
                            .style(theme::Text::Color(styles.fg)),
                        text(&error.message).size(14).style(theme::Text::Color(styles.error_fg)),
                    ]
                    .spacing(2),
                )
                .width(Length::Fill)
                .padding([8.0, 10.0])
                .style(theme::Container::Custom(Box::new(Tile { bg: styles.error_bg })))
                .into()
            })
            .collect::<Vec<Element<Message>>>();
        let list = scrollable(Column::with_children(entries).spacing(6)).height(Length::Fixed(360.0));

        let panel = container(column![header, tabs, list].spacing(14).padding(20))
            .width(Length::Fixed(640.0))
            .style(theme::Container::Custom(Box::new(Dialog {
                bg: styles.panel_bg,
                border: styles.border,
            })));

        overlay_backdrop(panel.into())
    }

    fn confirm_delete_view(&self, styles: &'static Styles) -> Element<Message> {
        let panel = container(
            column![
                text("Confirm Deletion").size(20).style(theme::Text::Color(styles.fg)),
                text("Are you sure you want to delete this row?")
                    .size(15)
                    .style(theme::Text::Color(styles.muted_fg)),
                row![
                    Space::with_width(Length::Fill),
                    button(text("Cancel").size(14))
                        .padding([6.0, 12.0])
                        .style(theme::Button::Custom(Box::new(ActionButton {
                            bg: styles.panel_bg,
                            fg: styles.fg,
                            hover_bg: styles.border,
                        })))
                        .on_press(Message::CancelDelete),
                    button(text("Delete").size(14))
                        .padding([6.0, 12.0])
                        .style(theme::Button::Custom(Box::new(ActionButton {
                            bg: styles.danger,
                            fg: styles.button_fg,
                            hover_bg: styles.danger_hover,
                        })))
                        .on_press(Message::ConfirmDelete),
                ]
                .spacing(10),
            ]
            .spacing(16)
            .padding(24),
        )
        .width(Length::Fixed(380.0))
        .style(theme::Container::Custom(Box::new(Dialog {
            bg: styles.panel_bg,
            border: styles.border,
        })));

        overlay_backdrop(panel.into())
    }
}

fn table_cell<'a>(content: Element<'a, Message>, width: f32, bg: Color) -> Element<'a, Message> {
    container(content)
        .width(Length::Fixed(width))
        .padding([6.0, 8.0])
        .style(theme::Container::Custom(Box::new(Panel { bg })))
        .into()
}

fn overlay_backdrop(content: Element<Message>) -> Element<Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .style(theme::Container::Custom(Box::new(Overlay)))
        .into()
}

fn handle_window_event(event: Event, _status: event::Status) -> Option<Message> {
    match event {
        Event::Window(_, window::Event::FileHovered(_)) => Some(Message::DropZoneHovered(true)),
        Event::Window(_, window::Event::FilesHoveredLeft) => Some(Message::DropZoneHovered(false)),
        Event::Window(_, window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        _ => None,
    }
}

fn total_pages(row_count: usize) -> usize {
    (row_count + PAGE_SIZE - 1) / PAGE_SIZE
}

// Custom styles for containers and buttons
struct Panel {
    bg: Color,
}

impl container::StyleSheet for Panel {
    type Style = Theme;

    fn appearance(&self, _theme: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(self.bg)),
            ..container::Appearance::default()
        }
    }
}

struct Tile {
    bg: Color,
}

impl container::StyleSheet for Tile {
    type Style = Theme;

    fn appearance(&self, _theme: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(self.bg)),
            border: Border::with_radius(4.0),
            ..container::Appearance::default()
        }
    }
}

struct Badge {
    bg: Color,
}

impl container::StyleSheet for Badge {
    type Style = Theme;

    fn appearance(&self, _theme: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(self.bg)),
            border: Border::with_radius(9.0),
            ..container::Appearance::default()
        }
    }
}

struct Dialog {
    bg: Color,
    border: Color,
}

impl container::StyleSheet for Dialog {
    type Style = Theme;

    fn appearance(&self, _theme: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(self.bg)),
            border: Border {
                color: self.border,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..container::Appearance::default()
        }
    }
}

struct DropZone {
    bg: Color,
    border: Color,
}

impl container::StyleSheet for DropZone {
    type Style = Theme;

    fn appearance(&self, _theme: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(self.bg)),
            border: Border {
                color: self.border,
                width: 2.0,
                radius: 8.0.into(),
            },
            ..container::Appearance::default()
        }
    }
}

struct Overlay;

impl container::StyleSheet for Overlay {
    type Style = Theme;

    fn appearance(&self, _theme: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.7))),
            ..container::Appearance::default()
        }
    }
}

struct ActionButton {
    bg: Color,
    fg: Color,
    hover_bg: Color,
}

impl button::StyleSheet for ActionButton {
    type Style = Theme;

    fn active(&self, _theme: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(self.bg)),
            text_color: self.fg,
            border: Border::with_radius(4.0),
            ..button::Appearance::default()
        }
    }

    fn hovered(&self, theme: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(self.hover_bg)),
            ..self.active(theme)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn new_app() -> ExcelImporter {
        let (app, _) = ExcelImporter::new(());
        app
    }

    fn validate_response(value: serde_json::Value) -> ValidateResponse {
        serde_json::from_value(value).expect("validate fixture")
    }

    fn import_response(value: serde_json::Value) -> ImportResponse {
        serde_json::from_value(value).expect("import fixture")
    }

    fn rows(count: usize) -> Vec<serde_json::Value> {
        (0..count)
            .map(|i| {
                json!({
                    "Name": format!("Row {i}"),
                    "Amount": 10.0,
                    "Date": "2024-01-01",
                    "Verified": "Yes"
                })
            })
            .collect()
    }

    fn seed_sheet(app: &mut ExcelImporter, rows: Vec<serde_json::Value>) {
        let response = validate_response(json!({ "data": { "Sheet1": rows } }));
        let _ = app.update(Message::Validated(Ok(response)));
    }

    #[test]
    fn validation_selects_first_sheet_in_document_order() {
        let mut app = new_app();
        let response = validate_response(json!({
            "data": { "Zeta": rows(1), "Alpha": rows(2) }
        }));
        let _ = app.update(Message::Validated(Ok(response)));

        assert_eq!(app.selected_sheet.as_deref(), Some("Zeta"));
        assert_eq!(app.transfer, Transfer::Idle);
        assert!(!app.show_errors);
        assert_eq!(app.toast.as_ref().map(|toast| toast.message.as_str()), Some("File validated successfully"));
    }

    #[test]
    fn validation_with_errors_opens_overlay_and_changes_wording() {
        let mut app = new_app();
        let response = validate_response(json!({
            "data": { "Sheet1": rows(1) },
            "errors": { "Sheet1": [{ "row": 2, "message": "Missing name" }] }
        }));
        let _ = app.update(Message::Validated(Ok(response)));

        assert!(app.show_errors);
        assert_eq!(app.active_error_tab, 0);
        let report = app.errors.as_ref().unwrap();
        assert_eq!(report.sheets[0].name, "Sheet1");
        assert_eq!(report.sheets[0].errors[0].message, "Missing name");
        assert_eq!(
            app.toast.as_ref().map(|toast| toast.message.as_str()),
            Some("File validated. Some rows have errors but valid rows can be imported.")
        );
    }

    #[test]
    fn validation_failure_reduces_to_a_toast() {
        let mut app = new_app();
        let _ = app.update(Message::Validated(Err("connection refused".into())));

        assert_eq!(app.transfer, Transfer::Idle);
        assert!(app.workbook.is_none());
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Error uploading file. Please try again.");
    }

    #[test]
    fn import_success_marks_rows_imported() {
        let mut app = new_app();
        let response = validate_response(json!({
            "data": { "Sheet1": [{ "Name": "A", "_id": "x1" }, { "Name": "B" }] }
        }));
        let _ = app.update(Message::Validated(Ok(response)));

        let response = import_response(json!({ "success": [{ "_id": "x1" }, { "_id": "b" }] }));
        let _ = app.update(Message::Imported(Ok(response)));

        assert!(app.imported_rows.contains("x1"));
        assert!(app.imported_rows.contains("b"));
        let sheet = app.active_sheet().unwrap();
        let flagged = sheet.rows[0].clone();
        let plain = sheet.rows[1].clone();
        assert!(app.is_imported(&flagged));
        assert!(!app.is_imported(&plain));
        assert_eq!(
            app.toast.as_ref().map(|toast| toast.message.as_str()),
            Some("All data imported successfully")
        );
    }

    #[test]
    fn partial_import_uses_mixed_wording_and_shows_errors() {
        let mut app = new_app();
        seed_sheet(&mut app, rows(2));

        let response = import_response(json!({
            "errors": { "Sheet1": [{ "row": 2, "message": "Missing name" }] },
            "success": [{ "_id": "x1" }]
        }));
        let _ = app.update(Message::Imported(Ok(response)));

        assert!(app.show_errors);
        assert!(app.imported_rows.contains("x1"));
        assert_eq!(
            app.toast.as_ref().map(|toast| toast.message.as_str()),
            Some("Import completed. Some rows were imported successfully while others had errors.")
        );
    }

    #[test]
    fn import_errors_without_success_show_no_toast() {
        let mut app = new_app();
        seed_sheet(&mut app, rows(1));
        app.toast = None;

        let response = import_response(json!({
            "errors": { "Sheet1": [{ "row": 1, "message": "Bad amount" }] }
        }));
        let _ = app.update(Message::Imported(Ok(response)));

        assert!(app.show_errors);
        assert!(app.toast.is_none());
        assert!(app.imported_rows.is_empty());
    }

    #[test]
    fn import_failure_reduces_to_a_toast() {
        let mut app = new_app();
        seed_sheet(&mut app, rows(1));
        let _ = app.update(Message::Imported(Err("timeout".into())));

        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Error importing data");
        assert_eq!(app.transfer, Transfer::Idle);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = new_app();
        seed_sheet(&mut app, rows(2));

        let _ = app.update(Message::RequestDeleteRow(0));
        assert_eq!(app.pending_delete, Some(0));
        assert_eq!(app.active_sheet().unwrap().rows.len(), 2);

        let _ = app.update(Message::CancelDelete);
        assert_eq!(app.pending_delete, None);
        assert_eq!(app.active_sheet().unwrap().rows.len(), 2);

        let _ = app.update(Message::RequestDeleteRow(1));
        let _ = app.update(Message::ConfirmDelete);
        assert_eq!(app.pending_delete, None);
        let sheet = app.active_sheet().unwrap();
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.rows[0].name, "Row 0");
    }

    #[test]
    fn delete_is_ignored_for_imported_rows() {
        let mut app = new_app();
        let response = validate_response(json!({
            "data": { "Sheet1": [{ "Name": "A", "_id": "x1" }] }
        }));
        let _ = app.update(Message::Validated(Ok(response)));
        let _ = app.update(Message::Imported(Ok(import_response(json!({
            "success": [{ "_id": "x1" }]
        })))));

        let _ = app.update(Message::RequestDeleteRow(0));
        assert_eq!(app.pending_delete, None);
        assert_eq!(app.active_sheet().unwrap().rows.len(), 1);
    }

    #[test]
    fn pagination_stays_inside_bounds() {
        let mut app = new_app();
        seed_sheet(&mut app, rows(25));
        assert_eq!(app.total_pages_active(), 3);
        assert_eq!(app.page_clamped(), 1);

        let _ = app.update(Message::PreviousPage);
        assert_eq!(app.page_clamped(), 1);

        for _ in 0..5 {
            let _ = app.update(Message::NextPage);
        }
        assert_eq!(app.page_clamped(), 3);

        let _ = app.update(Message::PreviousPage);
        assert_eq!(app.page_clamped(), 2);
    }

    #[test]
    fn stale_page_heals_after_rows_shrink() {
        let mut app = new_app();
        seed_sheet(&mut app, rows(11));
        let _ = app.update(Message::NextPage);
        assert_eq!(app.page_clamped(), 2);

        let _ = app.update(Message::RequestDeleteRow(10));
        let _ = app.update(Message::ConfirmDelete);
        assert_eq!(app.active_sheet().unwrap().rows.len(), 10);
        assert_eq!(app.page_clamped(), 1);
    }

    #[test]
    fn total_pages_matches_the_ceiling_rule() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(25), 3);
    }

    #[test]
    fn overlapping_transfers_are_rejected() {
        let mut app = new_app();
        seed_sheet(&mut app, rows(1));
        app.transfer = Transfer::Validating;

        let _ = app.update(Message::StartImport);
        assert_eq!(app.transfer, Transfer::Validating);

        let _ = app.update(Message::FileDropped(PathBuf::from("again.xlsx")));
        assert_eq!(app.transfer, Transfer::Validating);
        assert_eq!(app.upload_error, None);
    }

    #[test]
    fn rejected_files_never_start_a_transfer() {
        let mut app = new_app();
        let _ = app.update(Message::FileDropped(PathBuf::from("notes.txt")));

        assert_eq!(app.transfer, Transfer::Idle);
        assert_eq!(app.upload_error.as_deref(), Some("Only .xlsx files are allowed"));
    }

    #[test]
    fn cancelled_pick_shows_inline_message() {
        let mut app = new_app();
        let _ = app.update(Message::FileSelected(None));
        assert_eq!(app.upload_error.as_deref(), Some("Please select a file"));
    }

    #[test]
    fn sheet_switch_keeps_the_stored_page() {
        let mut app = new_app();
        let response = validate_response(json!({
            "data": { "Big": rows(25), "Small": rows(3) }
        }));
        let _ = app.update(Message::Validated(Ok(response)));
        let _ = app.update(Message::NextPage);
        assert_eq!(app.page_clamped(), 2);

        let _ = app.update(Message::SheetSelected("Small".into()));
        assert_eq!(app.current_page, 2);
        assert_eq!(app.page_clamped(), 1);
    }

    #[test]
    fn toast_expires_on_tick() {
        let mut app = new_app();
        let _ = app.update(Message::Validated(Err("boom".into())));
        assert!(app.toast.is_some());

        let _ = app.update(Message::ToastExpired);
        assert!(app.toast.is_none());
    }
}
