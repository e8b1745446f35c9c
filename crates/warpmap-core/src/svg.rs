//! SVG rendering of a board.
//!
//! Rendering happens in two steps: [`Renderer::render`] walks the board and
//! collects plain geometry into an [`Svg`], and the `Display` impl on `Svg`
//! turns that geometry into markup. Each part can be checked on its own.

use crate::board::Board;
use crate::layout::{Layout, Point};
use std::borrow::Cow;
use std::fmt::{self, Write as _};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Fill colors for hexes and stars. Geometry is identical under both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// Tinted ocean background with pale stars
    #[default]
    Color,
    /// Transparent background with white stars, for printing
    Mono,
}

impl Palette {
    pub fn from_mono(mono: bool) -> Self {
        if mono {
            Palette::Mono
        } else {
            Palette::Color
        }
    }

    pub fn hex_fill(self) -> &'static str {
        match self {
            Palette::Color => "hsl(197, 78%, 85%)",
            Palette::Mono => "none",
        }
    }

    pub fn star_fill(self) -> &'static str {
        match self {
            Palette::Color => "hsl(53, 100%, 94%)",
            Palette::Mono => "White",
        }
    }
}

/// Fill and stroke of one shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_width: &'static str,
}

impl Style {
    /// Grey 2px outline, switched to black if it would vanish into the fill
    fn outlined(fill: &'static str) -> Self {
        let stroke = if fill == "Grey" { "Black" } else { "Grey" };
        Self {
            fill,
            stroke,
            stroke_width: "2px",
        }
    }
}

/// A hex shape with an optional caption
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub center: Point,
    /// Radius of the inscribed circle
    pub radius: f64,
    pub corners: [Point; 6],
    pub style: Style,
    /// Centered text, one entry per line
    pub text: Vec<String>,
    /// Draw the inscribed circle as a star marker
    pub circle: bool,
}

/// A wormhole drawn between two star centers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewBox {
    pub min_x: i64,
    pub min_y: i64,
    pub width: i64,
    pub height: i64,
}

/// Geometry of one rendered board
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Svg {
    pub id: String,
    pub view_box: ViewBox,
    /// One per grid cell, drawn first
    pub hexes: Vec<Polygon>,
    /// One per distinct wormhole, drawn over the grid
    pub connectors: Vec<Connector>,
    /// One per star, drawn last so wormholes end at the marker's edge
    pub stars: Vec<Polygon>,
}

/// Turns boards into SVG using a fixed flat-top layout
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    layout: Layout,
    palette: Palette,
}

impl Renderer {
    /// Circumradius of every hex, in pixels
    pub const HEX_SIZE: f64 = 55.0;

    /// Space added past the furthest corner on the right and bottom
    pub const PADDING: i64 = 40;

    pub fn new(palette: Palette) -> Self {
        let width = 2.0 * Self::HEX_SIZE;
        let height = SQRT_3 * Self::HEX_SIZE;
        let layout = Layout::flat(
            Point::new(Self::HEX_SIZE, Self::HEX_SIZE),
            Point::new(height, width),
        );
        Self { layout, palette }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Collect the geometry for `board`
    pub fn render(&self, board: &Board) -> Svg {
        let radius = SQRT_3 * Self::HEX_SIZE / 2.0;
        let mut svg = Svg {
            id: "s".to_string(),
            ..Svg::default()
        };

        for (_, cell) in board.cells() {
            let hex = cell.hex();
            let polygon = Polygon {
                center: self.layout.center_point(hex),
                radius,
                corners: self.layout.polygon_corners(hex),
                style: Style::outlined(self.palette.hex_fill()),
                text: Vec::new(),
                circle: false,
            };
            svg.view_box.include(&polygon.corners);
            svg.hexes.push(polygon);
        }

        for (from, to) in board.wormholes() {
            let (Some(a), Some(b)) = (board.cell_by_id(from), board.cell_by_id(to)) else {
                continue;
            };
            svg.connectors.push(Connector {
                from: self.layout.center_point(a.hex()),
                to: self.layout.center_point(b.hex()),
            });
        }

        for (_, cell, star) in board.stars() {
            let hex = cell.hex();
            svg.stars.push(Polygon {
                center: self.layout.center_point(hex),
                radius,
                corners: self.layout.polygon_corners(hex),
                style: Style::outlined(self.palette.star_fill()),
                text: vec![star.name.clone(), format!("( {} )", star.econ_value)],
                circle: true,
            });
        }

        svg.view_box.width += Self::PADDING;
        svg.view_box.height += Self::PADDING;
        svg
    }

    /// Render `board` to a standalone SVG document
    pub fn render_svg(&self, board: &Board) -> String {
        self.render(board).to_string()
    }

    /// Render `board` wrapped in a minimal HTML page
    pub fn render_html(&self, board: &Board) -> String {
        let mut page = String::new();
        page.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
        page.push_str("<meta charset=\"utf-8\">\n<title>Warpmap</title>\n");
        page.push_str(
            "<style>svg{background-color:hsl(197, 18%, 95%);padding:50px 50px 50px 50px;}</style>\n",
        );
        page.push_str("</head>\n<body>\n");
        page.push_str(&self.render_svg(board));
        page.push_str("\n</body>\n</html>\n");
        page
    }
}

impl ViewBox {
    /// Grow to reach every point, truncating to whole pixels
    fn include(&mut self, points: &[Point]) {
        for p in points {
            self.width = self.width.max(p.x as i64);
            self.height = self.height.max(p.y as i64);
        }
    }
}

/// Escape text for use in element content and attribute values
fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut points = String::new();
        for (i, p) in self.corners.iter().enumerate() {
            if i != 0 {
                points.push(' ');
            }
            write!(points, "{:.2},{:.2}", p.x, p.y)?;
        }
        write!(
            f,
            r#"<polygon style="fill: {}; stroke: {}; stroke-width: {};" points="{}"></polygon>"#,
            self.style.fill, self.style.stroke, self.style.stroke_width, points
        )?;

        if self.circle {
            write!(
                f,
                "\n<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" style=\"fill: none; stroke: {}; stroke-width: 1px;\"></circle>",
                self.center.x, self.center.y, self.radius, self.style.stroke
            )?;
        }

        // the first line sits just above center, later lines stack below it
        for (i, line) in self.text.iter().enumerate() {
            let y = self.center.y - 4.0 + 18.0 * i as f64;
            write!(
                f,
                "\n<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"black\" font-size=\"14\">{}</text>",
                self.center.x,
                y,
                escape(line)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" style="stroke: Black; stroke-width: 3px;"></line>"#,
            self.from.x, self.from.y, self.to.x, self.to.y
        )
    }
}

impl fmt::Display for Svg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vb = &self.view_box;
        write!(f, "<svg")?;
        if !self.id.is_empty() {
            write!(f, " id=\"{}\"", escape(&self.id))?;
        }
        write!(
            f,
            r#" width="{}" height="{}" viewBox="{} {} {} {}" xmlns="http://www.w3.org/2000/svg">"#,
            vb.width, vb.height, vb.min_x, vb.min_y, vb.width, vb.height
        )?;
        for hex in &self.hexes {
            write!(f, "\n{hex}")?;
        }
        for line in &self.connectors {
            write!(f, "\n{line}")?;
        }
        for star in &self.stars {
            write!(f, "\n{star}")?;
        }
        write!(f, "\n</svg>")
    }
}
