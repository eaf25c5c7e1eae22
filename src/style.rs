use umya_spreadsheet::{Border, Color, PatternValues, Style};

const ACCENT_FILL_ARGB: &str = "FF4169E1";
const ACCENT_FONT_ARGB: &str = "FFFFFFFF";
const ACCENT_FONT_SIZE: f64 = 14.0;

/// An immutable cell style, shareable across any number of cells.
///
/// Styles carry no identity of their own; applying one copies its formatting
/// onto the target cell, so a single preset can be reused freely.
#[derive(Debug, Clone)]
pub struct CellStyle {
    inner: Style,
}

impl CellStyle {
    /// Fixed preset: solid royal-blue fill, thin borders on all four sides
    /// and a size-14 white font.
    pub fn accent() -> Self {
        let mut style = Style::default();

        style
            .get_fill_mut()
            .get_pattern_fill_mut()
            .set_foreground_color(Color::default().set_argb(ACCENT_FILL_ARGB).clone())
            .set_pattern_type(PatternValues::Solid);

        let borders = style.get_borders_mut();
        borders.get_top_mut().set_border_style(Border::BORDER_THIN);
        borders.get_bottom_mut().set_border_style(Border::BORDER_THIN);
        borders.get_left_mut().set_border_style(Border::BORDER_THIN);
        borders.get_right_mut().set_border_style(Border::BORDER_THIN);

        let font = style.get_font_mut();
        font.set_size(ACCENT_FONT_SIZE);
        font.set_color(Color::default().set_argb(ACCENT_FONT_ARGB).clone());

        CellStyle { inner: style }
    }

    pub(crate) fn to_engine(&self) -> Style {
        self.inner.clone()
    }
}
