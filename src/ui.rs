// src/ui.rs
use iced::Color;
use once_cell::sync::Lazy;

pub struct Styles {
    pub bg: Color,
    pub fg: Color,
    pub muted_fg: Color,
    pub border: Color,
    pub panel_bg: Color,
    pub nav_bg: Color,
    pub nav_fg: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub accent: Color,
    pub accent_hover: Color,
    pub danger: Color,
    pub danger_hover: Color,
    pub button_fg: Color,
    pub imported_row_bg: Color,
    pub success_bg: Color,
    pub success_fg: Color,
    pub pending_bg: Color,
    pub pending_fg: Color,
    pub error_bg: Color,
    pub error_fg: Color,
}

pub static LIGHT_THEME: Lazy<Styles> = Lazy::new(|| Styles {
    bg: Color::from_rgb(1.0, 1.0, 1.0),
    fg: Color::from_rgb(0.067, 0.094, 0.153), // #111827
    muted_fg: Color::from_rgb(0.42, 0.447, 0.502), // #6b7280
    border: Color::from_rgb(0.82, 0.835, 0.859), // #d1d5db
    panel_bg: Color::from_rgb(0.976, 0.98, 0.984), // #f9fafb
    nav_bg: Color::from_rgb(0.122, 0.161, 0.216), // #1f2937
    nav_fg: Color::from_rgb(1.0, 1.0, 1.0),
    header_bg: Color::from_rgb(0.976, 0.98, 0.984), // #f9fafb
    header_fg: Color::from_rgb(0.42, 0.447, 0.502), // #6b7280
    accent: Color::from_rgb(0.231, 0.51, 0.965), // #3b82f6
    accent_hover: Color::from_rgb(0.145, 0.388, 0.922), // #2563eb
    danger: Color::from_rgb(0.863, 0.149, 0.149), // #dc2626
    danger_hover: Color::from_rgb(0.725, 0.11, 0.11), // #b91c1c
    button_fg: Color::from_rgb(1.0, 1.0, 1.0),
    imported_row_bg: Color::from_rgb(0.941, 0.992, 0.957), // #f0fdf4
    success_bg: Color::from_rgb(0.863, 0.988, 0.906), // #dcfce7
    success_fg: Color::from_rgb(0.086, 0.396, 0.204), // #166534
    pending_bg: Color::from_rgb(0.996, 0.976, 0.765), // #fef9c3
    pending_fg: Color::from_rgb(0.522, 0.302, 0.055), // #854d0e
    error_bg: Color::from_rgb(0.996, 0.949, 0.949), // #fef2f2
    error_fg: Color::from_rgb(0.863, 0.149, 0.149), // #dc2626
});

pub static DARK_THEME: Lazy<Styles> = Lazy::new(|| Styles {
    bg: Color::from_rgb(0.067, 0.094, 0.153), // #111827
    fg: Color::from_rgb(0.976, 0.98, 0.984), // #f9fafb
    muted_fg: Color::from_rgb(0.612, 0.639, 0.686), // #9ca3af
    border: Color::from_rgb(0.216, 0.255, 0.318), // #374151
    panel_bg: Color::from_rgb(0.122, 0.161, 0.216), // #1f2937
    nav_bg: Color::from_rgb(0.012, 0.027, 0.071), // #030712
    nav_fg: Color::from_rgb(0.976, 0.98, 0.984),
    header_bg: Color::from_rgb(0.216, 0.255, 0.318), // #374151
    header_fg: Color::from_rgb(0.82, 0.835, 0.859), // #d1d5db
    accent: Color::from_rgb(0.231, 0.51, 0.965), // #3b82f6
    accent_hover: Color::from_rgb(0.145, 0.388, 0.922), // #2563eb
    danger: Color::from_rgb(0.863, 0.149, 0.149), // #dc2626
    danger_hover: Color::from_rgb(0.937, 0.267, 0.267), // #ef4444
    button_fg: Color::from_rgb(1.0, 1.0, 1.0),
    imported_row_bg: Color::from_rgb(0.075, 0.2, 0.12),
    success_bg: Color::from_rgb(0.086, 0.396, 0.204), // #166534
    success_fg: Color::from_rgb(0.863, 0.988, 0.906), // #dcfce7
    pending_bg: Color::from_rgb(0.522, 0.302, 0.055), // #854d0e
    pending_fg: Color::from_rgb(0.996, 0.976, 0.765), // #fef9c3
    error_bg: Color::from_rgb(0.271, 0.039, 0.039), // #450a0a
    error_fg: Color::from_rgb(0.988, 0.647, 0.647), // #fca5a5
});
