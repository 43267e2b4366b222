use plotters::style::RGBColor;

const TAB10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

const MIN_ALPHA: f64 = 0.2;

/// Color of the `index`-th metric in a figure; wraps after ten.
pub fn series_color(index: usize) -> RGBColor {
    TAB10[index % TAB10.len()]
}

/// Opacity of the configuration at `position` in the ascending id list.
/// Grows linearly so the last configuration is fully opaque.
pub fn configuration_alpha(position: usize, count: usize) -> f64 {
    if count == 0 {
        return 1.0;
    }
    let alpha = (position + 1) as f64 / count as f64;
    alpha.clamp(MIN_ALPHA, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_grows_linearly_with_position() {
        let alphas: Vec<f64> = (0..4).map(|p| configuration_alpha(p, 4)).collect();
        assert_eq!(alphas, vec![0.25, 0.5, 0.75, 1.0]);
        assert_eq!(configuration_alpha(0, 1), 1.0);
    }

    #[test]
    fn alpha_has_a_floor() {
        assert_eq!(configuration_alpha(0, 10), MIN_ALPHA);
    }

    #[test]
    fn colors_wrap() {
        assert_eq!(series_color(0), series_color(10));
        assert_ne!(series_color(0), series_color(1));
    }
}
