//! Arithmetic challenge generation and rendering.
//!
//! The challenge is a two-term expression over single digits. The image is
//! an SVG with noise lines and jittered glyphs, shipped as a base64 data URI.

use base64::{Engine, engine::general_purpose::STANDARD};
use rand::Rng;

/// Supported operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
}

impl Operator {
    fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => 'x',
        }
    }
}

/// A generated expression and its answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArithmeticChallenge {
    pub left: u32,
    pub right: u32,
    pub op: Operator,
}

impl ArithmeticChallenge {
    /// Generate a random challenge; subtraction never goes negative
    pub fn random() -> Self {
        let mut rng = rand::rng();
        let mut left = rng.random_range(1..=9);
        let mut right = rng.random_range(1..=9);
        let op = match rng.random_range(0..3) {
            0 => Operator::Add,
            1 => Operator::Sub,
            _ => Operator::Mul,
        };
        if op == Operator::Sub && left < right {
            std::mem::swap(&mut left, &mut right);
        }
        Self { left, right, op }
    }

    /// Text drawn on the image, e.g. `7x3=?`
    pub fn text(&self) -> String {
        format!("{}{}{}=?", self.left, self.op.symbol(), self.right)
    }

    /// Expected answer as the client should type it
    pub fn answer(&self) -> String {
        let value = match self.op {
            Operator::Add => self.left + self.right,
            Operator::Sub => self.left - self.right,
            Operator::Mul => self.left * self.right,
        };
        value.to_string()
    }

    /// Render to a `data:image/svg+xml;base64,...` URI
    pub fn to_data_uri(&self, width: u32, height: u32) -> String {
        let svg = render_svg(&self.text(), width, height);
        format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
    }
}

fn render_svg(text: &str, width: u32, height: u32) -> String {
    let mut rng = rand::rng();

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        width, height
    );
    svg.push_str(r##"<rect width="100%" height="100%" fill="#f5f5f5"/>"##);

    // Noise lines
    for _ in 0..6 {
        let x1 = rng.random_range(0..width);
        let y1 = rng.random_range(0..height);
        let x2 = rng.random_range(0..width);
        let y2 = rng.random_range(0..height);
        svg.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="rgb({},{},{})" stroke-width="1"/>"#,
            x1,
            y1,
            x2,
            y2,
            rng.random_range(120..220),
            rng.random_range(120..220),
            rng.random_range(120..220)
        ));
    }

    let font_size = height * 2 / 3;
    let char_width = width as f32 / (text.chars().count() as f32 + 1.0);
    let baseline = (height as f32 * 0.72) as i32;
    for (i, c) in text.chars().enumerate() {
        let x = char_width * (i as f32 + 0.6);
        let y = baseline + rng.random_range(-4..=4);
        let rotation = rng.random_range(-20..=20);
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-family="monospace" font-size="{}" font-weight="bold" fill="rgb({},{},{})" transform="rotate({} {} {})">{}</text>"#,
            x,
            y,
            font_size,
            rng.random_range(20..120),
            rng.random_range(20..120),
            rng.random_range(20..120),
            rotation,
            x,
            y,
            c
        ));
    }

    svg.push_str("</svg>");
    svg
}
