// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the sitekit CLI.
//!
//! OneDark for dark terminals, One Light for light ones. Detection tries
//! `SITEKIT_THEME`, then `COLORFGBG`, then defaults to dark. Colors are off
//! under `NO_COLOR` and when stdout is not a TTY.

use sitekit::LoadState;
use std::sync::OnceLock;

pub const BOX_WIDTH: usize = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("SITEKIT_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": backgrounds 7 and up (except 8) are light.
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

/// (OneDark, One Light)
mod palette {
    pub const RED: [(u8, u8, u8); 2] = [(224, 108, 117), (228, 86, 73)];
    pub const GREEN: [(u8, u8, u8); 2] = [(152, 195, 121), (80, 161, 79)];
    pub const YELLOW: [(u8, u8, u8); 2] = [(229, 192, 123), (193, 132, 1)];
    pub const BLUE: [(u8, u8, u8); 2] = [(97, 175, 239), (64, 120, 242)];
    pub const CYAN: [(u8, u8, u8); 2] = [(86, 182, 194), (1, 132, 188)];
    pub const GRAY: [(u8, u8, u8); 2] = [(92, 99, 112), (160, 161, 167)];
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let [dark, light] = palette::$name;
            match theme() {
                Theme::Dark => rgb(dark),
                Theme::Light => rgb(light),
            }
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Theme color plus modifiers, or plain text when colors are off.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Length without ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

fn border() -> String {
    if use_colors() {
        GRAY()
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

/// │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    let (b, r) = (border(), reset());
    println!("{b}│{r}{content}{}{b}│{r}", " ".repeat(pad));
}

fn labelled(left: char, right: char, label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    let (b, r) = (border(), reset());
    println!("{b}{left}{r}{label_part}{b}{}{right}{r}", "─".repeat(remaining));
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    labelled('┌', '┐', label);
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    labelled('├', '┤', label);
}

/// └──────────────────┘
pub fn section_bot() {
    let (b, r) = (border(), reset());
    println!("{b}└{}┘{r}", "─".repeat(BOX_WIDTH));
}

/// Cut to `max` visible characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Section label as shown in the results dropdown.
pub fn section_badge(section: &str) -> String {
    themed(BLUE, &[], &format!("[{section}]"))
}

pub fn state_label(state: LoadState) -> String {
    match state {
        LoadState::Loaded => themed(GREEN, &[BOLD], "loaded"),
        LoadState::Loading => themed(YELLOW, &[], "loading"),
        LoadState::NotLoaded => themed(GRAY, &[], "not loaded"),
        LoadState::Failed => themed(RED, &[BOLD], "failed"),
    }
}

/// Load time, green under 50ms, yellow under 500ms, red above.
pub fn timing_ms(value: f64) -> String {
    let text = format!("{value:.2} ms");
    if value < 50.0 {
        themed(GREEN, &[], &text)
    } else if value < 500.0 {
        themed(YELLOW, &[], &text)
    } else {
        themed(RED, &[], &text)
    }
}
