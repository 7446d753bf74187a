use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::{Status, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub blue: Color,
    pub purple: Color,
    pub selection_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
    /// Per-tag colors from config; other tags hash into `tag_palette`
    pub tag_colors: HashMap<String, Color>,
    pub tag_palette: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Reset,
            text: Color::Rgb(0xD1, 0xD5, 0xDB),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x7C, 0x3A, 0xED),
            dim: Color::Rgb(0x6B, 0x72, 0x80),
            red: Color::Rgb(0xEF, 0x44, 0x44),
            yellow: Color::Rgb(0xF5, 0x9E, 0x0B),
            green: Color::Rgb(0x10, 0xB9, 0x81),
            blue: Color::Rgb(0x3B, 0x82, 0xF6),
            purple: Color::Rgb(0xA7, 0x8B, 0xFA),
            selection_bg: Color::Rgb(0x7C, 0x3A, 0xED),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
            tag_colors: HashMap::new(),
            tag_palette: vec![
                Color::Rgb(0xEF, 0x44, 0x44),
                Color::Rgb(0xF5, 0x9E, 0x0B),
                Color::Rgb(0x10, 0xB9, 0x81),
                Color::Rgb(0x3B, 0x82, 0xF6),
                Color::Rgb(0x8B, 0x5C, 0xF6),
                Color::Rgb(0xEC, 0x48, 0x99),
            ],
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "yellow" => theme.yellow = color,
                    "green" => theme.green = color,
                    "blue" => theme.blue = color,
                    "purple" => theme.purple = color,
                    "selection_bg" => theme.selection_bg = color,
                    "search_match_bg" => theme.search_match_bg = color,
                    "search_match_fg" => theme.search_match_fg = color,
                    _ => {}
                }
            }
        }

        for (tag, value) in &ui.tag_colors {
            if let Some(color) = parse_hex_color(value) {
                theme.tag_colors.insert(tag.to_lowercase(), color);
            }
        }

        theme
    }

    /// Configured color for a tag, else a stable pick from the palette
    pub fn tag_color(&self, tag: &str) -> Color {
        if let Some(color) = self.tag_colors.get(tag) {
            return *color;
        }
        if self.tag_palette.is_empty() {
            return self.text;
        }
        let hash: usize = tag.chars().map(|c| c as usize).sum();
        self.tag_palette[hash % self.tag_palette.len()]
    }

    /// Border and heading color for a lane
    pub fn lane_color(&self, status: Status) -> Color {
        match status {
            Status::Todo => self.dim,
            Status::InProgress => self.blue,
            Status::Done => self.green,
        }
    }
}
