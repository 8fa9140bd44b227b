// SPDX-License-Identifier: MPL-2.0
//! The pattern board screen.
//!
//! One card per UI idiom: toasts, cooldown button, loading buttons with an
//! upload progress bar, error handling with retry, skeleton loading and
//! short animation cues. All state lives in [`Feedback`]; this module only
//! renders it and turns button presses into [`Message`]s.

use crate::feedback::{Feedback, OperationKind, OperationState, Status};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::notifications::{accent_color, Severity};
use crate::ui::styles;
use iced::widget::{button, progress_bar, scrollable, text, Column, Container, Row, Space};
use iced::{alignment, Element, Length, Theme};

/// Skeleton cards revealed when the refresh finishes: (glyph, title, description).
const CARDS: [(&str, &str, &str); 3] = [
    (
        "⚙",
        "Ownership in Practice",
        "Borrowing rules that keep long-lived UI state free of data races.",
    ),
    (
        "⏱",
        "Virtual Time",
        "Drive every timer from a clock you control, then test it tick by tick.",
    ),
    (
        "✉",
        "Message Passing",
        "State down, messages up: one update function owns every mutation.",
    ),
];

/// User intents raised by the pattern board.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    ShowToast(Severity),
    ClearToasts,
    Start(OperationKind),
    Toggle(OperationKind),
    /// Force the connection demo into its failed state.
    SimulateError,
    Retry(OperationKind),
    Acknowledge(OperationKind),
}

/// Applies a pattern board message to the feedback state.
pub fn update(feedback: &mut Feedback, message: Message) {
    match message {
        Message::ShowToast(severity) => {
            feedback.show(severity.sample_message(), severity);
        }
        Message::ClearToasts => feedback.clear(),
        Message::Start(kind) => {
            feedback.start(kind);
        }
        Message::Toggle(kind) => {
            feedback.toggle(kind);
        }
        Message::SimulateError => feedback.fail(OperationKind::Connect),
        Message::Retry(kind) => {
            feedback.retry(kind);
        }
        Message::Acknowledge(kind) => {
            feedback.acknowledge(kind);
        }
    }
}

/// Context required to render the pattern board.
pub struct ViewContext<'a> {
    pub feedback: &'a Feedback,
}

/// Renders every demo card in a scrollable column.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let feedback = ctx.feedback;

    let content = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::XL)
        .width(Length::Fill)
        .push(text("UI Patterns").size(typography::TITLE_LG))
        .push(card("Toast Notifications", toasts_section(feedback)))
        .push(card(
            "Cooldown Button",
            cooldown_section(feedback.operation(OperationKind::Cooldown)),
        ))
        .push(card("Loading Buttons", loading_section(feedback)))
        .push(card(
            "Error Handling",
            error_section(feedback.operation(OperationKind::Connect)),
        ))
        .push(card(
            "Skeleton Loading",
            skeleton_section(feedback.operation(OperationKind::Refresh)),
        ))
        .push(card("Animation Cues", animation_section(feedback)));

    scrollable(content).height(Length::Fill).into()
}

fn card<'a>(title: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    Container::new(
        Column::new()
            .spacing(spacing::MD)
            .push(text(title).size(typography::TITLE_SM))
            .push(body),
    )
    .width(Length::Fill)
    .padding(spacing::LG)
    .style(styles::container::card)
    .into()
}

fn toasts_section(feedback: &Feedback) -> Element<'_, Message> {
    let buttons = Severity::ALL.into_iter().fold(
        Row::new().spacing(spacing::SM),
        |row, severity| {
            row.push(
                button(text(severity.label()))
                    .on_press(Message::ShowToast(severity))
                    .height(sizing::BUTTON_HEIGHT)
                    .style(styles::button::accent(accent_color(severity))),
            )
        },
    );

    let clear = button(text("Clear all"))
        .on_press_maybe((feedback.notification_count() > 0).then_some(Message::ClearToasts))
        .height(sizing::BUTTON_HEIGHT)
        .style(styles::button::secondary);

    Column::new()
        .spacing(spacing::SM)
        .push(buttons.push(clear))
        .push(caption(format!(
            "{} active notification(s)",
            feedback.notification_count()
        )))
        .into()
}

fn cooldown_section(state: &OperationState) -> Element<'_, Message> {
    let label = if state.is_running() {
        format!("Wait {}s", state.remaining())
    } else {
        "Execute action".to_string()
    };

    let trigger = button(text(label))
        .on_press_maybe((!state.is_running()).then_some(Message::Start(OperationKind::Cooldown)))
        .height(sizing::BUTTON_HEIGHT)
        .style(styles::button::primary);

    let mut column = Column::new().spacing(spacing::SM).push(trigger);
    if state.is_running() {
        column = column.push(bar(state.completion()));
    }
    column.into()
}

fn loading_section(feedback: &Feedback) -> Element<'_, Message> {
    let save = loading_button(
        feedback.operation(OperationKind::Save),
        "Save",
        "Saving...",
        styles::button::accent(palette::SUCCESS_500),
    );
    let delete = loading_button(
        feedback.operation(OperationKind::Delete),
        "Delete",
        "Deleting...",
        styles::button::accent(palette::ERROR_500),
    );
    let upload_state = feedback.operation(OperationKind::Upload);
    let upload = loading_button(
        upload_state,
        "Upload",
        "Uploading...",
        styles::button::accent(palette::PRIMARY_500),
    );

    let mut column = Column::new()
        .spacing(spacing::SM)
        .push(Row::new().spacing(spacing::SM).push(save).push(delete).push(upload));

    if upload_state.is_running() || upload_state.status() == Status::Succeeded {
        column = column
            .push(bar(upload_state.completion()))
            .push(caption(format!("{:.0}%", upload_state.completion())));
    }
    column.into()
}

fn loading_button<'a>(
    state: &OperationState,
    idle: &'a str,
    busy: &'a str,
    style: impl Fn(&Theme, button::Status) -> button::Style + 'a,
) -> Element<'a, Message> {
    let label = if state.is_running() { busy } else { idle };
    button(text(label))
        .on_press_maybe((!state.is_running()).then_some(Message::Start(state.kind())))
        .height(sizing::BUTTON_HEIGHT)
        .style(style)
        .into()
}

fn error_section(state: &OperationState) -> Element<'_, Message> {
    let kind = state.kind();
    let running = state.is_running();

    let actions = Row::new()
        .spacing(spacing::SM)
        .push(
            button(text("Connect"))
                .on_press_maybe((!running).then_some(Message::Start(kind)))
                .height(sizing::BUTTON_HEIGHT)
                .style(styles::button::primary),
        )
        .push(
            button(text("Simulate error"))
                .on_press_maybe((!running).then_some(Message::SimulateError))
                .height(sizing::BUTTON_HEIGHT)
                .style(styles::button::accent(palette::ERROR_500)),
        );

    let status_line: Element<'_, Message> = match state.status() {
        Status::Idle => caption("Ready.".to_string()),
        Status::Running => caption("Connecting...".to_string()),
        Status::Succeeded => Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(caption("Connected.".to_string()))
            .push(
                button(text("Reset"))
                    .on_press(Message::Acknowledge(kind))
                    .style(styles::button::secondary),
            )
            .into(),
        Status::Failed => Container::new(
            Column::new()
                .spacing(spacing::SM)
                .push(text(state.error().unwrap_or_default()).size(typography::BODY))
                .push(
                    Row::new()
                        .spacing(spacing::SM)
                        .push(
                            button(text("Retry"))
                                .on_press(Message::Retry(kind))
                                .style(styles::button::primary),
                        )
                        .push(
                            button(text("Dismiss"))
                                .on_press(Message::Acknowledge(kind))
                                .style(styles::button::secondary),
                        ),
                ),
        )
        .width(Length::Fill)
        .padding(spacing::MD)
        .style(styles::container::error_banner)
        .into(),
    };

    Column::new()
        .spacing(spacing::SM)
        .push(actions)
        .push(status_line)
        .into()
}

fn skeleton_section(state: &OperationState) -> Element<'_, Message> {
    let loading = state.is_running();
    let toggle = button(text(if loading { "Stop loading" } else { "Reload" }))
        .on_press(Message::Toggle(OperationKind::Refresh))
        .height(sizing::BUTTON_HEIGHT)
        .style(styles::button::secondary);

    let cards = CARDS.into_iter().fold(
        Row::new().spacing(spacing::MD),
        |row, (glyph, title, description)| {
            let body: Element<'_, Message> = if loading {
                Column::new()
                    .spacing(spacing::XS)
                    .push(skeleton_line(Length::Fixed(sizing::ICON_MD)))
                    .push(skeleton_line(Length::FillPortion(3)))
                    .push(skeleton_line(Length::Fill))
                    .push(skeleton_line(Length::Fill))
                    .into()
            } else {
                Column::new()
                    .spacing(spacing::XS)
                    .push(text(glyph).size(sizing::ICON_MD))
                    .push(text(title).size(typography::BODY))
                    .push(caption(description.to_string()))
                    .into()
            };
            row.push(
                Container::new(body)
                    .width(Length::Fixed(sizing::CARD_WIDTH))
                    .padding(spacing::MD)
                    .style(styles::container::card),
            )
        },
    );

    Column::new()
        .spacing(spacing::MD)
        .push(toggle)
        .push(cards)
        .into()
}

fn skeleton_line<'a>(width: Length) -> Element<'a, Message> {
    Container::new(Space::new().width(Length::Fill).height(sizing::SKELETON_LINE))
        .width(width)
        .style(styles::container::skeleton)
        .into()
}

fn animation_section(feedback: &Feedback) -> Element<'_, Message> {
    let cues = [
        (OperationKind::Bounce, "●", "Bounce"),
        (OperationKind::Pulse, "◉", "Pulse"),
        (OperationKind::Wobble, "◆", "Wobble"),
    ];

    cues.into_iter()
        .fold(Row::new().spacing(spacing::LG), |row, (kind, glyph, label)| {
            let active = feedback.operation(kind).is_running();
            let size = if active {
                typography::TITLE_LG
            } else {
                typography::TITLE_SM
            };
            let cue = Column::new()
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Center)
                .push(
                    Container::new(text(glyph).size(size))
                        .height(typography::TITLE_LG + spacing::XS)
                        .align_y(alignment::Vertical::Center),
                )
                .push(
                    button(text(label))
                        .on_press(Message::Toggle(kind))
                        .style(if active {
                            styles::button::primary
                        } else {
                            styles::button::secondary
                        }),
                );
            row.push(cue)
        })
        .into()
}

fn bar<'a>(percent: f32) -> Element<'a, Message> {
    progress_bar(0.0..=100.0, percent)
        .girth(sizing::PROGRESS_HEIGHT)
        .into()
}

fn caption<'a>(content: String) -> Element<'a, Message> {
    text(content).size(typography::CAPTION).into()
}
