//! Contact section: profile links beside the message form.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};
use tracing::info;

use super::Section;
use crate::{
    content::Profile,
    state::{
        delivery::dispatch, ContactForm, Delivery, DeliveryReport, Field, Scheduler, SectionId,
        SubmitStatus,
    },
    tui::{
        app::AppEvent,
        widgets::{theme::Palette, FrameContext, InteractiveComponent, KeyMouseEvent},
    },
};

pub struct ContactSection {
    form: ContactForm,
    profile: Profile,
    delivery: Arc<dyn Delivery>,
    scheduler: Scheduler<AppEvent>,
    ctx: Option<FrameContext>,
}

impl ContactSection {
    pub fn new(
        profile: Profile,
        delivery: Arc<dyn Delivery>,
        scheduler: Scheduler<AppEvent>,
    ) -> Self {
        Self {
            form: ContactForm::default(),
            profile,
            delivery,
            scheduler,
            ctx: None,
        }
    }

    pub const fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Typing goes to the form instead of the global keymap.
    pub const fn is_editing(&self) -> bool {
        self.form.is_editing()
    }

    pub fn apply_report(&mut self, report: DeliveryReport) {
        self.form.apply_report(report, &self.scheduler);
    }

    fn submit(&mut self) {
        if let Some(message) = self.form.submit() {
            info!(subject = %message.subject.trim(), "Sending contact message");
            dispatch(self.delivery.as_ref(), message, self.scheduler.sender());
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('s') {
            self.submit();
            return true;
        }
        if !self.form.is_editing() {
            if matches!(key.code, KeyCode::Char('i') | KeyCode::Enter) {
                self.form.start_editing();
                return true;
            }
            return false;
        }
        match key.code {
            KeyCode::Esc => self.form.stop_editing(),
            KeyCode::Tab | KeyCode::Enter | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) if !ctrl => self.form.insert_char(c),
            _ => {}
        }
        // Nothing leaks to the global keymap while a field has focus.
        true
    }

    fn render_info(&self, palette: &Palette, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![
            Line::styled("Let's build something.", palette.title()),
            Line::default(),
            Line::from(vec![
                Span::styled("✉ ", palette.muted()),
                Span::styled(self.profile.email.clone(), palette.body()),
            ]),
        ];
        if !self.profile.location.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("⌖ ", palette.muted()),
                Span::styled(self.profile.location.clone(), palette.body()),
            ]));
        }
        lines.push(Line::default());
        lines.extend(self.profile.socials.iter().map(|link| {
            Line::from(vec![
                Span::styled(format!("{}: ", link.label), palette.muted()),
                Span::styled(link.url.clone(), palette.body()),
            ])
        }));
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_field(&self, field: Field, palette: &Palette, area: Rect, buf: &mut Buffer) {
        let [input, error] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let focused = self.form.focus() == Some(field);
        let mut value = self.form.data().get(field).to_string();
        if focused {
            value.push('▏');
        }
        Paragraph::new(value)
            .style(palette.body())
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(palette.border(focused))
                    .title(Span::styled(field.label(), palette.muted())),
            )
            .render(input, buf);
        if let Some(message) = self.form.errors().get(field) {
            Paragraph::new(Span::styled(message, palette.body().fg(Palette::ERROR)))
                .render(error, buf);
        }
    }

    fn render_status(&self, palette: &Palette, area: Rect, buf: &mut Buffer) {
        let line = if self.form.is_submitting() {
            Line::styled("Sending...", palette.muted())
        } else {
            match self.form.status() {
                SubmitStatus::Success => Line::styled(
                    "Message sent! I'll get back to you soon.",
                    palette.body().fg(Palette::SUCCESS),
                ),
                SubmitStatus::Error => Line::styled(
                    "Failed to send message. Please try again.",
                    palette.body().fg(Palette::ERROR),
                ),
                SubmitStatus::Idle if self.form.is_editing() => Line::styled(
                    "Tab: next field · Ctrl-S: send · Esc: done",
                    palette.muted(),
                ),
                SubmitStatus::Idle => Line::styled("Press i to write a message", palette.muted()),
            }
        };
        Paragraph::new(line).render(area, buf);
    }
}

impl InteractiveComponent for ContactSection {
    type Input = FrameContext;
    type Event = KeyMouseEvent;

    fn update(&mut self, ctx: FrameContext) {
        if !ctx.focused {
            self.form.stop_editing();
        }
        self.ctx = Some(ctx);
    }

    fn handle_event(&mut self, event: KeyMouseEvent) -> bool {
        match event {
            KeyMouseEvent::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            _ => false,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let Some(ctx) = self.ctx else {
            return;
        };
        let palette = ctx.palette;

        let block = Block::bordered()
            .title(Line::styled(" Get In Touch ", palette.title()))
            .border_style(palette.border(ctx.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let [info, form] =
            Layout::horizontal([Constraint::Percentage(35), Constraint::Fill(1)])
                .spacing(2)
                .areas(inner);
        self.render_info(&palette, info, buf);

        let [name, email, subject, message, status] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(form);
        for (field, area) in Field::ALL.into_iter().zip([name, email, subject, message]) {
            self.render_field(field, &palette, area, buf);
        }
        self.render_status(&palette, status, buf);
    }
}

impl Section for ContactSection {
    const ID: SectionId = SectionId::Contact;
    const KEYBINDINGS: &'static [(&'static str, &'static str)] = &[
        ("i", "write"),
        ("Tab", "next field"),
        ("Ctrl-S", "send"),
        ("Esc", "stop editing"),
    ];
}
