// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The pattern board fills the window; the toolbar sits on top and toasts
//! are stacked over everything in the top-right corner.

use super::Message;
use crate::feedback::Feedback;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::notifications::Toast;
use crate::ui::patterns::{self, ViewContext as PatternsViewContext};
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use iced::widget::{button, text, Column, Container, Row, Space, Stack};
use iced::{alignment, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub feedback: &'a Feedback,
    pub theme_mode: ThemeMode,
}

/// Renders the toolbar, the pattern board and the toast overlay.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let board = patterns::view(PatternsViewContext {
        feedback: ctx.feedback,
    })
    .map(Message::Patterns);

    let overlay = Toast::view_overlay(ctx.feedback.notifications(), ctx.feedback.now())
        .map(Message::Notification);

    let column = Column::new()
        .push(toolbar(ctx.theme_mode))
        .push(Container::new(board).width(Length::Fill).height(Length::Fill));

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(column)
        .push(overlay)
        .into()
}

fn toolbar<'a>(theme_mode: ThemeMode) -> Element<'a, Message> {
    let theme_button = button(text(format!("Theme: {theme_mode}")).size(typography::BODY))
        .on_press(Message::CycleTheme)
        .style(styles::button::secondary);

    Container::new(
        Row::new()
            .align_y(alignment::Vertical::Center)
            .push(text("Patternboard").size(typography::TITLE_SM))
            .push(Space::new().width(Length::Fill))
            .push(theme_button),
    )
    .width(Length::Fill)
    .padding([spacing::SM, spacing::XL])
    .into()
}
