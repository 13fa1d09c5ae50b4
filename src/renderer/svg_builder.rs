//! SVG builder: accumulates SVG elements and produces the final string.

// ═══════════════════════════════════════════════════════════════════════
// SvgBuilder
// ═══════════════════════════════════════════════════════════════════════

pub(super) struct SvgBuilder {
    pub(super) elements: Vec<String>,
    width: f64,
}

impl SvgBuilder {
    pub(super) fn new(width: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
        }
    }

    /// Close the document. The height is only known once every page is drawn.
    pub(super) fn build(self, height: f64) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}mm" height="{}mm">"#,
            self.width, height, self.width, height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub(super) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}"/>"#,
            x1, y1, x2, y2, color, width
        ));
    }

    pub(super) fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.elements.push(format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            x, y, w, h, fill
        ));
    }

    pub(super) fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        self.elements.push(format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
            cx, cy, r, fill
        ));
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn text(
        &mut self,
        x: f64,
        y: f64,
        content: &str,
        family: &str,
        size: f64,
        weight: &str,
        fill: &str,
        anchor: &str,
    ) {
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-family="{}" font-size="{:.1}" font-weight="{}" fill="{}" text-anchor="{}">{}</text>"#,
            x,
            y,
            escape(family),
            size,
            weight,
            fill,
            anchor,
            escape(content)
        ));
    }
}

fn escape(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
