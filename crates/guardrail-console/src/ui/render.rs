use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{List, ListItem, Paragraph, Tabs, Wrap};

use super::app::{AppState, ConfigField, InspectField, InspectOutcome, StatusKind, Tab};
use super::format;
use super::text::{sanitize_line, truncate_with_ellipsis};
use super::theme::{Theme, ValueStyle};

pub(crate) fn draw_ui(frame: &mut ratatui::Frame, app: &AppState) {
    let theme = Theme::dark();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let tabs = Tabs::new(Tab::TITLES.to_vec())
        .select(app.active_tab.index())
        .style(theme.value_style(ValueStyle::Dim))
        .highlight_style(theme.accent_style())
        .block(theme.block("Guardrail Console"));
    frame.render_widget(tabs, chunks[0]);

    match app.active_tab {
        Tab::Inspect => draw_inspect(frame, app, &theme, chunks[1]),
        Tab::Config => draw_config(frame, app, &theme, chunks[1]),
        Tab::Logs => draw_logs(frame, app, &theme, chunks[1]),
    }

    draw_footer(frame, app, &theme, chunks[2]);
}

fn draw_inspect(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let title = if app.inspect.busy {
        "Inspection (detecting...)"
    } else {
        "Inspection"
    };
    let focus = app.inspect.focus;
    let lines = vec![
        form_line(
            theme,
            "detection type",
            app.inspect.detection_type.as_str().to_string(),
            focus == InspectField::DetectionType,
        ),
        form_line(
            theme,
            "asset id",
            app.inspect.asset_id.clone(),
            focus == InspectField::AssetId,
        ),
        form_line(
            theme,
            "text",
            app.inspect.text.clone(),
            focus == InspectField::Text,
        ),
    ];
    let form = Paragraph::new(Text::from(lines))
        .block(theme.block(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(form, body[0]);

    let result = match &app.inspect.outcome {
        InspectOutcome::Idle => Text::styled("no inspection yet", theme.value_style(ValueStyle::Dim)),
        InspectOutcome::Detecting => {
            Text::styled("detecting, please wait...", theme.accent_style())
        }
        InspectOutcome::Invalid(message) => {
            Text::styled(message.clone(), theme.status_style(StatusKind::Error))
        }
        InspectOutcome::Failed(message) => Text::styled(
            format!("inspection failed: {message}"),
            theme.status_style(StatusKind::Error),
        ),
        InspectOutcome::Done(inspection) => {
            let decision = &inspection.decision;
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("suggestion: ", theme.key_style()),
                    Span::styled(
                        decision.suggestion.as_str(),
                        theme.suggestion_style(&decision.suggestion),
                    ),
                ]),
                Line::from(vec![
                    Span::styled("categories: ", theme.key_style()),
                    Span::styled(
                        format::join_categories(&decision.categories),
                        theme.value_style(ValueStyle::Normal),
                    ),
                ]),
            ];
            if let Some(answer) = decision.answer_text() {
                lines.push(Line::from(vec![
                    Span::styled("answer: ", theme.key_style()),
                    Span::styled(answer.to_string(), theme.value_style(ValueStyle::Important)),
                ]));
            }
            lines.push(Line::default());
            lines.push(Line::styled("raw:", theme.key_style()));
            for raw_line in format::pretty_json(&inspection.raw).lines() {
                lines.push(Line::styled(
                    sanitize_line(raw_line),
                    theme.value_style(ValueStyle::Dim),
                ));
            }
            Text::from(lines)
        }
    };
    let result = Paragraph::new(result)
        .block(theme.block("Result"))
        .wrap(Wrap { trim: false });
    frame.render_widget(result, body[1]);
}

fn draw_config(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let title = if app.config.saving {
        "Model Config (saving...)"
    } else if app.config.reloading {
        "Model Config (reloading...)"
    } else {
        "Model Config"
    };
    let focus = app.config.focus;
    let form = &app.config.form;
    let lines = vec![
        form_line(theme, "provider", form.provider.clone(), focus == ConfigField::Provider),
        form_line(theme, "model", form.model.clone(), focus == ConfigField::Model),
        form_line(theme, "api key", form.api_key.clone(), focus == ConfigField::ApiKey),
        form_line(
            theme,
            "temperature",
            form.temperature.clone(),
            focus == ConfigField::Temperature,
        ),
        form_line(
            theme,
            "max tokens",
            form.max_tokens.clone(),
            focus == ConfigField::MaxTokens,
        ),
        form_line(theme, "timeout", form.timeout.clone(), focus == ConfigField::Timeout),
    ];
    let form = Paragraph::new(Text::from(lines))
        .block(theme.block(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(form, body[0]);

    let raw = match app.config.raw.as_deref() {
        Some(raw) => Text::styled(sanitize_line_block(raw), theme.value_style(ValueStyle::Normal)),
        None => Text::styled("no config loaded yet", theme.value_style(ValueStyle::Dim)),
    };
    let raw = Paragraph::new(raw)
        .block(theme.block("Current Config"))
        .wrap(Wrap { trim: false });
    frame.render_widget(raw, body[1]);
}

fn draw_logs(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let filter_line = Line::from(vec![
        Span::styled("filter: ", theme.key_style()),
        Span::styled(app.logs.filter.clone(), theme.value_style(ValueStyle::Normal)),
        Span::styled("_", theme.accent_style()),
    ]);
    let filter = Paragraph::new(filter_line).block(theme.block("Filter"));
    frame.render_widget(filter, body[0]);

    let visible = app.logs.visible();
    let title = format!("Audit Logs ({}/{})", visible.len(), app.logs.entries.len());
    let block = theme.block(title.as_str());
    let inner = block.inner(body[1]);
    let width = inner.width.max(1) as usize;

    let items: Vec<ListItem> = if app.logs.busy {
        vec![ListItem::new(Line::styled(
            "loading audit logs...",
            theme.accent_style(),
        ))]
    } else if let Some(error) = app.logs.error.as_deref() {
        vec![ListItem::new(Line::styled(
            format!("failed to load logs: {error}"),
            theme.status_style(StatusKind::Error),
        ))]
    } else if !app.logs.loaded {
        vec![ListItem::new(Line::styled(
            "press Enter to load audit logs",
            theme.value_style(ValueStyle::Dim),
        ))]
    } else if app.logs.entries.is_empty() {
        vec![ListItem::new(Line::styled(
            "no log records",
            theme.value_style(ValueStyle::Dim),
        ))]
    } else if visible.is_empty() {
        vec![ListItem::new(Line::styled(
            "no entries match the filter",
            theme.value_style(ValueStyle::Dim),
        ))]
    } else {
        visible
            .iter()
            .map(|entry| {
                let line = truncate_with_ellipsis(&sanitize_line(&format::log_line(entry)), width);
                ListItem::new(Line::styled(line, theme.level_style(entry.level)))
            })
            .collect()
    };

    let list = List::new(items).block(block);
    frame.render_widget(list, body[1]);
}

fn draw_footer(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let help = match app.active_tab {
        Tab::Inspect => "Tab=switch  Up/Down=field  Left/Right=type  Enter=inspect  Ctrl+Q=quit  ",
        Tab::Config => {
            "Tab=switch  Up/Down=field  Enter=save  Ctrl+L=load  Ctrl+R=reload  Ctrl+Q=quit  "
        }
        Tab::Logs => "Tab=switch  type=filter  Enter=load  Ctrl+Q=quit  ",
    };
    let mut spans = vec![Span::styled(help, theme.help_style())];
    if app.confirm_quit {
        spans.push(Span::styled(
            "press q again to quit / Esc to cancel  ",
            theme.warn_style(),
        ));
    }
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            sanitize_line(&status.text),
            theme.status_style(status.kind),
        ));
    }
    let footer = Paragraph::new(Line::from(spans)).block(theme.block("Controls"));
    frame.render_widget(footer, area);
}

fn form_line<'a>(theme: &Theme, label: &str, value: String, focused: bool) -> Line<'a> {
    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        theme.highlight_style()
    } else {
        theme.value_style(ValueStyle::Normal)
    };
    Line::from(vec![
        Span::styled(format!("{marker}{label}: "), theme.key_style()),
        Span::styled(sanitize_line(&value), value_style),
    ])
}

fn sanitize_line_block(text: &str) -> String {
    text.lines().map(sanitize_line).collect::<Vec<_>>().join("\n")
}
