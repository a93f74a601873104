//! Neon accent palette and the faint base colors of the grid

/// CSS color strings, handed straight to the canvas fill style
pub mod colors {
    // === Accent cycle (order is the cycle order) ===
    pub const NEON_PINK: &str = "#FF36FF";
    pub const NEON_CYAN: &str = "#00FFFF";
    pub const NEON_GREEN: &str = "#39FF14";
    pub const NEON_RED: &str = "#FE0000";
    pub const NEON_ORANGE: &str = "#FF9933";
    pub const NEON_YELLOW: &str = "#FFFF33";

    // === Base ===
    pub const POINT_BASE: &str = "rgba(0, 0, 0, 0.05)"; // near-transparent black
    pub const HOVER: &str = "rgba(255, 255, 255, 0.7)";
}

/// The accent colors activated points cycle through
pub const NEON_PALETTE: [&str; 6] = [
    colors::NEON_PINK,
    colors::NEON_CYAN,
    colors::NEON_GREEN,
    colors::NEON_RED,
    colors::NEON_ORANGE,
    colors::NEON_YELLOW,
];
