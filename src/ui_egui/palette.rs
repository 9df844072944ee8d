use egui::Color32;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Colors for the board, resolved from the egui theme once per frame.
#[derive(Clone, Copy)]
pub struct BoardPalette {
    pub lane_bg: Color32,
    pub lane_alt_bg: Color32,
    pub label_bg: Color32,
    pub hour_line: Color32,
    pub sub_line: Color32,
    pub border: Color32,
    pub text: Color32,
    pub muted_text: Color32,
    /// Fill for slots whose payload carries no color.
    pub slot_fill: Color32,
    pub slot_text: Color32,
    pub valid_ring: Color32,
    pub invalid_ring: Color32,
    pub ghost_fill: Color32,
    pub region_accent: Color32,
    pub pointer_marker: Color32,
    pub now_marker: Color32,
}

impl BoardPalette {
    pub fn from_ui(ui: &egui::Ui) -> Self {
        let dark_mode = ui.style().visuals.dark_mode;
        if dark_mode {
            Self {
                lane_bg: Color32::from_gray(40),
                lane_alt_bg: Color32::from_gray(45),
                label_bg: Color32::from_gray(32),
                hour_line: Color32::from_gray(70),
                sub_line: Color32::from_gray(52),
                border: Color32::from_gray(60),
                text: Color32::from_gray(220),
                muted_text: Color32::GRAY,
                slot_fill: Color32::from_rgb(100, 150, 200),
                slot_text: Color32::WHITE,
                valid_ring: Color32::from_rgb(96, 165, 250),
                invalid_ring: Color32::from_rgb(248, 113, 113),
                ghost_fill: with_alpha(Color32::from_gray(230), 50),
                region_accent: Color32::from_rgb(120, 200, 120),
                pointer_marker: Color32::from_rgb(150, 180, 255),
                now_marker: Color32::from_rgb(255, 100, 100),
            }
        } else {
            Self {
                lane_bg: Color32::from_rgb(245, 245, 245),
                lane_alt_bg: Color32::from_rgb(238, 238, 238),
                label_bg: Color32::from_rgb(250, 250, 250),
                hour_line: Color32::from_rgb(210, 210, 210),
                sub_line: Color32::from_rgb(230, 230, 230),
                border: Color32::from_rgb(215, 215, 215),
                text: Color32::from_gray(40),
                muted_text: Color32::GRAY,
                slot_fill: Color32::from_rgb(100, 150, 200),
                slot_text: Color32::WHITE,
                valid_ring: Color32::from_rgb(59, 130, 246),
                invalid_ring: Color32::from_rgb(239, 68, 68),
                ghost_fill: with_alpha(Color32::from_gray(40), 40),
                region_accent: Color32::from_rgb(60, 160, 90),
                pointer_marker: Color32::from_rgb(80, 120, 200),
                now_marker: Color32::from_rgb(230, 80, 80),
            }
        }
    }

    /// Translucent lane-highlight fill matching the validity ring.
    pub fn hover_fill(&self, is_valid: bool) -> Color32 {
        let ring = if is_valid {
            self.valid_ring
        } else {
            self.invalid_ring
        };
        with_alpha(ring, 26)
    }

    pub fn ring(&self, is_valid: bool) -> Color32 {
        if is_valid {
            self.valid_ring
        } else {
            self.invalid_ring
        }
    }
}
