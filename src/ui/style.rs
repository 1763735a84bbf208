/// Compile-time layout tokens, not user-overridable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTokens {
    pub spacing_4: i32,
    pub spacing_8: i32,
    pub spacing_12: i32,
    pub spacing_20: i32,
    pub control_radius: u16,
    pub panel_radius: u16,
    pub border_width: u16,
    pub window_default_width: i32,
    pub window_default_height: i32,
    pub window_min_width: i32,
    pub window_min_height: i32,
    pub input_min_height: i32,
    pub toast_duration_ms: u32,
}

pub const LAYOUT_TOKENS: StyleTokens = StyleTokens {
    spacing_4: 4,
    spacing_8: 8,
    spacing_12: 12,
    spacing_20: 20,
    control_radius: 4,
    panel_radius: 8,
    border_width: 1,
    window_default_width: 900,
    window_default_height: 760,
    window_min_width: 420,
    window_min_height: 360,
    input_min_height: 180,
    toast_duration_ms: 3_000,
};

#[cfg(test)]
mod tests {
    use super::LAYOUT_TOKENS;

    #[test]
    fn layout_tokens_keep_window_minimum_below_default() {
        let tokens = LAYOUT_TOKENS;
        assert!(tokens.window_min_width <= tokens.window_default_width);
        assert!(tokens.window_min_height <= tokens.window_default_height);
        assert!(tokens.input_min_height < tokens.window_min_height);
    }

    #[test]
    fn layout_tokens_match_toast_duration() {
        assert_eq!(LAYOUT_TOKENS.toast_duration_ms, 3_000);
    }
}
