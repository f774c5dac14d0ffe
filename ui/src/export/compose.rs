//! Lays the overlay out as one SVG: portrait on the left, summary chart on
//! the right, name on top, ability and level below, optional signature.

use crate::chart::surface::{escape_xml, num};
use crate::chart::Surface;
use crate::core::error::ExportError;
use crate::sheet::SyncController;

use super::ExportRegion;

const MARGIN: f64 = 24.0;
const TITLE_SIZE: f64 = 30.0;
const DETAIL_SIZE: f64 = 18.0;
const SIGNATURE_SIZE: f64 = 11.0;

pub fn compose_region(sync: &SyncController) -> Result<ExportRegion, ExportError> {
    let summary = sync
        .summary()
        .ok_or_else(|| ExportError::NotReady("open the chart preview first".into()))?;
    let theme = sync.theme();
    let overlay = sync.overlay();
    let size = theme.export_size;

    let top = MARGIN + TITLE_SIZE + 16.0;
    let content_h = size.height - top - MARGIN - DETAIL_SIZE - 12.0;
    let portrait_side = content_h.min(size.width / 2.0 - MARGIN * 1.5).max(0.0);
    let chart_box = content_h.min(size.width - portrait_side - MARGIN * 3.0).max(0.0);
    let chart_x = size.width - MARGIN - chart_box;

    let scene = summary.scene();
    let scene_side = scene.size().width.max(scene.size().height).max(1.0);
    let scale = chart_box / scene_side;

    let font = "Candara, 'Segoe UI', sans-serif";
    let text_color = escape_xml(&theme.text_color);
    let mut svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>",
        w = num(size.width),
        h = num(size.height)
    );
    svg.push_str(&format!(
        "<rect width='{}' height='{}' fill='{}'/>",
        num(size.width),
        num(size.height),
        escape_xml(&theme.export_background)
    ));
    svg.push_str(&format!(
        "<text x='{}' y='{}' fill='{text_color}' font-family=\"{font}\" font-size='{}' font-weight='700'>{}</text>",
        num(MARGIN),
        num(MARGIN + TITLE_SIZE * 0.8),
        num(TITLE_SIZE),
        escape_xml(&overlay.text.name)
    ));
    svg.push_str(&format!(
        "<image x='{x}' y='{y}' width='{s}' height='{s}' preserveAspectRatio='xMidYMid slice' href='{src}' xlink:href='{src}'/>",
        x = num(MARGIN),
        y = num(top),
        s = num(portrait_side),
        src = escape_xml(&overlay.portrait)
    ));
    svg.push_str(&format!(
        "<g transform='translate({},{}) scale({})'>{}</g>",
        num(chart_x),
        num(top),
        scale,
        scene.to_svg_fragment()
    ));
    svg.push_str(&format!(
        "<text x='{}' y='{}' fill='{text_color}' font-family=\"{font}\" font-size='{}'>{} · Lv {}</text>",
        num(MARGIN),
        num(size.height - MARGIN),
        num(DETAIL_SIZE),
        escape_xml(&overlay.text.ability),
        escape_xml(&overlay.text.level)
    ));
    if let Some(signature) = theme.signature.as_deref() {
        svg.push_str(&format!(
            "<text x='{}' y='{}' fill='{text_color}' fill-opacity='0.6' font-family=\"{font}\" font-size='{}' text-anchor='end'>{}</text>",
            num(size.width - MARGIN),
            num(size.height - MARGIN),
            num(SIGNATURE_SIZE),
            escape_xml(signature)
        ));
    }
    svg.push_str("</svg>");

    Ok(ExportRegion {
        svg,
        size,
        character_name: sync.meta().name.clone(),
    })
}
