use crate::ui::StyleTokens;
use gtk4::CssProvider;

pub(super) fn runtime_css(tokens: StyleTokens) -> String {
    format!(
        "
window.wordcloud-root .app-heading {{
  margin-bottom: {spacing_4}px;
}}
.input-surface {{
  border-radius: {control_radius}px;
  border: {border_width}px solid alpha(currentColor, 0.2);
  padding: {spacing_8}px;
}}
.primary-button {{
  padding: {button_padding_y}px {spacing_20}px;
  border-radius: {control_radius}px;
}}
.primary-button:disabled {{
  opacity: 0.55;
}}
.word-cloud-result {{
  border-radius: {panel_radius}px;
}}
.word-cloud-image {{
  border-radius: {panel_radius}px;
}}
.toast-badge {{
  border-radius: {control_radius}px;
  padding: {spacing_8}px {spacing_12}px;
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.16);
}}
.toast-badge.toast-success {{
  background: #2ecc71;
  color: #ffffff;
}}
.toast-badge.toast-error {{
  background: #e74c3c;
  color: #ffffff;
}}
",
        spacing_4 = tokens.spacing_4,
        spacing_8 = tokens.spacing_8,
        spacing_12 = tokens.spacing_12,
        spacing_20 = tokens.spacing_20,
        button_padding_y = tokens.spacing_8 + 2,
        control_radius = tokens.control_radius,
        panel_radius = tokens.panel_radius,
        border_width = tokens.border_width,
    )
}

pub(super) fn install_runtime_css(tokens: StyleTokens) {
    let css = runtime_css(tokens);
    let provider = CssProvider::new();
    provider.load_from_data(&css);
    if let Some(display) = gtk4::gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    } else {
        tracing::warn!("no display available; runtime css not installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::LAYOUT_TOKENS;

    #[test]
    fn runtime_css_substitutes_layout_tokens() {
        let css = runtime_css(LAYOUT_TOKENS);
        assert!(css.contains("padding: 10px 20px;"));
        assert!(css.contains("border-radius: 4px;"));
        assert!(css.contains(".toast-badge.toast-error"));
        assert_eq!(css.matches('{').count(), css.matches('}').count());
    }
}
