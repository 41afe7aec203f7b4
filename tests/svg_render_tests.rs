use scrolly_charts::core::{Margins, PathCommand, PlotArea, Viewport};
use scrolly_charts::render::{
    Color, LayerId, LayeredRenderFrame, LinePrimitive, NullRenderer, PathPrimitive, Renderer,
    SeriesKey, SvgRenderer, TextHAlign, TextPrimitive, canonical_layer_stack,
};

fn frame() -> LayeredRenderFrame {
    let viewport = Viewport::new(900, 520);
    let plot = PlotArea::inside(viewport, Margins::default()).expect("plot");
    let stack = canonical_layer_stack(&[SeriesKey::Budgeted, SeriesKey::Inflation], true);
    let mut frame = LayeredRenderFrame::from_stack(viewport, plot, &stack, 0.0);

    let ink = Color::rgb8(0x2E, 0x2E, 0x2E);
    frame.push_line(
        LayerId::Legend(SeriesKey::Inflation),
        LinePrimitive::new(720.0, 70.0, 750.0, 70.0, 3.0, ink).with_dash(5.0, 5.0),
    );
    frame.push_path(
        LayerId::Line(SeriesKey::Budgeted),
        PathPrimitive::stroked(
            vec![
                PathCommand::MoveTo { x: 0.0, y: 400.0 },
                PathCommand::LineTo { x: 100.5, y: 350.25 },
            ],
            Color::rgb8(0xFF, 0x57, 0x25),
            3.0,
        ),
    );
    frame.push_path(
        LayerId::ShadedArea,
        PathPrimitive::filled(
            vec![
                PathCommand::MoveTo { x: 0.0, y: 0.0 },
                PathCommand::LineTo { x: 10.0, y: 0.0 },
                PathCommand::LineTo { x: 10.0, y: 10.0 },
                PathCommand::Close,
            ],
            Color::rgb8(0xFF, 0x57, 0x25),
            0.2,
        ),
    );
    frame.push_text(
        LayerId::Annotation,
        TextPrimitive::new("R&D <extra>", 50.0, 60.0, 18.0, ink, TextHAlign::Center).bold(),
    );
    frame
}

#[test]
fn every_layer_becomes_a_group_with_opacity() {
    let mut frame = frame();
    frame.set_opacity(LayerId::Line(SeriesKey::Budgeted), 0.3);

    let mut renderer = SvgRenderer::new();
    renderer.render(&frame).expect("render");
    let svg = renderer.document();

    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="900" height="520""#));
    assert!(svg.contains(r#"<g transform="translate(80,40)">"#));
    assert!(svg.contains(r#"data-layer="line-budgeted" opacity="0.3""#));
    assert!(svg.contains(r#"data-layer="grid" opacity="0""#));
    assert_eq!(renderer.last_stats().layers_written, frame.layers.len());
}

#[test]
fn primitives_keep_their_styling() {
    let mut renderer = SvgRenderer::new();
    renderer.render(&frame()).expect("render");
    let svg = renderer.document();

    assert!(svg.contains(r#"stroke-dasharray="5,5""#));
    assert!(svg.contains(
        r##"d="M0,400L100.5,350.25" fill="none" stroke="#FF5725" stroke-width="3""##
    ));
    assert!(svg.contains(r##"fill="#FF5725" fill-opacity="0.2""##));
    assert!(svg.contains(r#"text-anchor="middle""#));
    assert!(svg.contains(r#"font-weight="bold">R&amp;D &lt;extra&gt;</text>"#));

    let stats = renderer.last_stats();
    assert_eq!(stats.lines_drawn, 1);
    assert_eq!(stats.paths_drawn, 2);
    assert_eq!(stats.texts_drawn, 1);
}

#[test]
fn layer_order_is_back_to_front() {
    let mut renderer = SvgRenderer::new();
    renderer.render(&frame()).expect("render");
    let svg = renderer.document();
    let band = svg.find("layer-shaded-area").expect("band");
    let line = svg.find("layer-line-budgeted").expect("line");
    let legend = svg.find("layer-legend-inflation").expect("legend");
    assert!(band < line && line < legend);
}

#[test]
fn invalid_frames_are_rejected_by_every_backend() {
    let mut frame = frame();
    frame.push_text(
        LayerId::Grid,
        TextPrimitive::new("", 0.0, 0.0, 12.0, Color::rgb(0.0, 0.0, 0.0), TextHAlign::Left),
    );

    let mut svg = SvgRenderer::new();
    assert!(svg.render(&frame).is_err());
    assert!(svg.document().is_empty());

    let mut null = NullRenderer::default();
    assert!(null.render(&frame).is_err());
    assert_eq!(null.frames_rendered, 0);
}

#[test]
fn null_renderer_counts_visible_layers() {
    let mut frame = frame();
    frame.set_opacity(LayerId::Annotation, 1.0);
    frame.set_opacity(LayerId::ShadedArea, 0.5);

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_primitive_count, 4);
    assert_eq!(renderer.last_visible_layer_count, 2);
}
