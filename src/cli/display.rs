// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the fuzzdex CLI.
//!
//! OneDark colors on dark terminals, One Light on light ones. The theme comes
//! from `FUZZDEX_THEME` if set, then `COLORFGBG`, and is dark otherwise.
//! `NO_COLOR` or a non-terminal stdout turns color off entirely, so piped
//! output is plain text.

use std::io::IsTerminal;
use std::sync::OnceLock;

/// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("FUZZDEX_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": background colors 7 and up (except 8) are light
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

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            rgb(match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            })
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(CYAN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Apply a theme color with optional modifiers, or nothing when colors are off.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Length as displayed, ignoring ANSI escapes.
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

pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

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
    let pad = BOX_WIDTH.saturating_sub(visible_len(content) + 1);
    println!("{}│{} {}{}{}│{}", border(), reset(), content, " ".repeat(pad), border(), reset());
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        border(),
        reset(),
        label_part,
        border(),
        "─".repeat(remaining),
        reset()
    );
}

/// └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", border(), "─".repeat(BOX_WIDTH), reset());
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Score at output precision: green above zero, red below, gray at zero.
pub fn score_value(score: f64) -> String {
    let text = format!("{:>10.5}", score);
    if score > 0.0 {
        themed(GREEN, &[BOLD], &text)
    } else if score < 0.0 {
        themed(RED, &[], &text)
    } else {
        themed(GRAY, &[], &text)
    }
}

/// Highlight a corrected query when it differs from what was typed.
pub fn correction(original: &str, corrected: &str) -> String {
    if original.trim().eq_ignore_ascii_case(corrected) {
        corrected.to_string()
    } else {
        format!("{} {}", themed(YELLOW, &[BOLD], corrected), themed(GRAY, &[], &format!("(from \"{}\")", original)))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
