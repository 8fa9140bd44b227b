// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering individual notifications.
//!
//! Toasts are small cards with a severity-colored accent, a dismiss button
//! and a thin bar showing how much of their lifetime is left.

use super::manager::Message;
use super::notification::{Notification, Severity};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, progress_bar, text, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};
use std::time::Duration;

/// Toast widget configuration.
pub struct Toast;

impl Toast {
    /// Renders a single toast notification at virtual time `now`.
    pub fn view(notification: &Notification, now: Duration) -> Element<'_, Message> {
        let severity = notification.severity();
        let accent = accent_color(severity);

        let icon = Text::new(severity_glyph(severity))
            .size(sizing::ICON_MD)
            .style(move |_theme: &Theme| text::Style {
                color: Some(accent),
            });

        let message = Text::new(notification.message())
            .size(typography::BODY)
            .style(|theme: &Theme| text::Style {
                color: Some(theme.palette().text),
            });

        let dismiss = button(Text::new("✕").size(sizing::ICON_SM))
            .on_press(Message::Dismiss(notification.id()))
            .padding(spacing::XXS)
            .style(styles::button::ghost);

        // Layout: [icon] [message] [dismiss]
        let row = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(icon).padding(spacing::XXS))
            .push(
                Container::new(message)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Left),
            )
            .push(dismiss);

        let lifetime = progress_bar(0.0..=1.0, notification.remaining_fraction(now))
            .girth(2.0)
            .style(move |theme: &Theme| progress_bar::Style {
                background: theme.extended_palette().background.weak.color.into(),
                bar: accent.into(),
                border: iced::Border::default(),
            });

        let content = Column::new().spacing(spacing::XS).push(row).push(lifetime);

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| styles::container::toast(theme, accent))
            .into()
    }

    /// Renders the toast overlay with all visible notifications.
    ///
    /// Positions toasts in the top-right corner, oldest first.
    pub fn view_overlay<'a>(
        notifications: impl Iterator<Item = &'a Notification>,
        now: Duration,
    ) -> Element<'a, Message> {
        let toasts: Vec<Element<'a, Message>> = notifications
            .map(|notification| Self::view(notification, now))
            .collect();

        if toasts.is_empty() {
            // Return an empty container that takes no space
            Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into()
        } else {
            let toast_column = Column::with_children(toasts)
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Right);

            Container::new(toast_column)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Right)
                .align_y(alignment::Vertical::Top)
                .padding(spacing::MD)
                .into()
        }
    }
}

/// Accent color for a severity level.
#[must_use]
pub fn accent_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => palette::SUCCESS_500,
        Severity::Error => palette::ERROR_500,
        Severity::Info => palette::INFO_500,
        Severity::Warning => palette::WARNING_500,
    }
}

fn severity_glyph(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✓",
        Severity::Error => "✕",
        Severity::Info => "ℹ",
        Severity::Warning => "⚠",
    }
}
