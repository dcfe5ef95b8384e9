//! Integration tests for component interoperability.
//!
//! These verify that components work correctly together at their
//! boundaries: colorizer + renderer, config + context, console + capture.

use friendly_console::testing::TestConsole;
use friendly_console::{
    AnsiRenderer, ConsoleConfig, ExcerptColorizer, FragmentRenderer, HtmlRenderer,
    MarkdownRenderer, PlainRenderer, RenderContext, Report, Rgb, Section, StyleClass, Theme,
    ThemeChoice,
};

// ============================================================================
// Pipeline Integration Tests
// ============================================================================

#[test]
fn test_ansi_pipeline_round_trips_after_stripping() {
    let colorizer = ExcerptColorizer::new();
    let excerpt = "result = 1 / 0\n         ^^^^^";
    let lines = colorizer.colorize(excerpt);
    let ctx = RenderContext::dark();
    let rendered = AnsiRenderer::forced().render_block(&lines, &ctx);
    let stripped = strip_ansi_escapes::strip(rendered.as_bytes());
    assert_eq!(String::from_utf8_lossy(&stripped), "result = 1 / 0");
}

#[test]
fn test_all_backends_agree_on_text() {
    let colorizer = ExcerptColorizer::new();
    let lines = colorizer.colorize("x = len(data)  # ok");
    let ctx = RenderContext::light();

    let plain = PlainRenderer::new().render_block(&lines, &ctx);
    assert_eq!(plain, "x = len(data)  # ok");

    let markdown = MarkdownRenderer::new().render_block(&lines, &ctx);
    assert!(markdown.contains("x = len(data)  # ok"));

    let html = HtmlRenderer::new().render_block(&lines, &ctx);
    assert!(html.contains("x = len(data)"));
}

#[test]
fn test_html_pipeline_styles_error_spans() {
    let colorizer = ExcerptColorizer::new();
    let lines = colorizer.colorize("value = total / count\n        ^^^^^^^^^^^^^");
    let ctx = RenderContext::dark();
    let html = HtmlRenderer::new().render_block(&lines, &ctx);
    let error_color = ctx.style(StyleClass::Error).color.hex();
    assert!(html.contains(&error_color));
    assert!(html.starts_with("<pre"));
}

// ============================================================================
// Config-Context Integration Tests
// ============================================================================

#[test]
fn test_config_theme_flows_into_renderer_output() {
    let ctx = ConsoleConfig::new()
        .with_theme(ThemeChoice::Light)
        .render_context();
    assert_eq!(ctx.theme().name, "friendly-light");

    let lines = ExcerptColorizer::new().colorize("x = 1");
    let html = HtmlRenderer::new().render_block(&lines, &ctx);
    assert!(html.contains(&Theme::light().background.hex()));
}

#[test]
fn test_background_override_reaches_html() {
    let background = Rgb::from_hex("#123456").unwrap();
    let ctx = ConsoleConfig::new()
        .with_background(background)
        .render_context();
    let lines = ExcerptColorizer::new().colorize("x = 1");
    let html = HtmlRenderer::new().render_block(&lines, &ctx);
    assert!(html.contains("#123456"));
}

// ============================================================================
// Console-Capture Integration Tests
// ============================================================================

#[test]
fn test_console_prints_excerpt_faithfully() {
    let tc = TestConsole::new_rich();
    tc.console()
        .print_excerpt("def f():\n    return 1 / 0\n           ^^^^^");
    assert_eq!(
        tc.output(),
        vec!["def f():".to_string(), "    return 1 / 0".to_string()]
    );
}

#[test]
fn test_plain_console_emits_no_escapes() {
    let tc = TestConsole::new();
    tc.console().print_excerpt("result = 1 / 0\n         ^^^^^");
    for line in tc.raw_output() {
        assert!(!line.contains('\u{1b}'), "unexpected escape in {line:?}");
    }
    tc.assert_contains("result = 1 / 0");
}

#[test]
fn test_console_capture_assertions() {
    let tc = TestConsole::new();
    tc.console().print_plain("NameError: name 'b' is not defined");
    tc.assert_contains("NameError");
    tc.assert_not_contains("ZeroDivisionError");
    assert!(tc.matches(r"name '\w'"));
}

// ============================================================================
// Report Integration Tests
// ============================================================================

#[test]
fn test_report_markdown_feeds_markdown_renderer_shape() {
    let report = Report::new()
        .with(Section::Header, "NameError:")
        .with(Section::Message, "NameError: name 'b' is not defined")
        .with(
            Section::ExceptionRaisedSource,
            "a = b\n    ^",
        );
    let markdown = report.to_rich_markdown();
    assert!(markdown.starts_with("# NameError"));
    assert!(markdown.contains("`NameError`: name 'b' is not defined"));
    assert!(markdown.contains("```python\na = b\n    ^\n```"));
}

#[test]
fn test_theme_json_round_trip_through_config() {
    let theme = Theme::light().with_background(Rgb::new(9, 9, 9));
    let json = serde_json::to_string_pretty(&theme).unwrap();
    let back: Theme = serde_json::from_str(&json).unwrap();
    assert_eq!(back, theme);
}
