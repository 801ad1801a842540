//! Test fixtures: synthetic report pages rendered to PNG.
//!
//! Pages follow the `cardiometabolic-v1` layout from the embedded
//! config.yaml, drawn at 150 dpi (half the template's nominal 300 dpi).

/// Fill colors
pub mod colors {
    pub const PAPER: [u8; 3] = [255, 255, 255];
    pub const TRACK: [u8; 3] = [200, 200, 200];
    pub const TEXT: [u8; 3] = [20, 20, 20];
    /// Hue 0
    pub const RED: [u8; 3] = [230, 30, 30];
    /// Hue 35
    pub const ORANGE: [u8; 3] = [240, 140, 0];
    /// Hue 54
    pub const YELLOW: [u8; 3] = [245, 220, 0];
}

/// Page geometry at 150 dpi
pub mod layout {
    pub const DPI: u32 = 150;
    pub const PAGE_WIDTH: usize = 600;
    pub const PAGE_HEIGHT: usize = 500;
    pub const BAR_LEFT: usize = 175;
    pub const BAR_WIDTH: usize = 375;
    pub const FIRST_BAR_TOP: usize = 210;
    pub const BAR_PITCH: usize = 21;
    pub const BAR_HEIGHT: usize = 14;
    pub const BARS_PER_PAGE: usize = 12;
}

/// Labels of the embedded default template
pub mod labels {
    pub const PAGE_ONE: [&str; 12] = [
        "large_artery_stiffness",
        "peripheral_vessel",
        "blood_pressure_uncontrolled",
        "small_medium_artery_stiffness",
        "atherosclerosis",
        "ldl_cholesterol",
        "lv_hypertrophy",
        "metabolic_syndrome",
        "insulin_resistance",
        "beta_cell_function_decreased",
        "blood_glucose_uncontrolled",
        "tissue_inflammatory_process",
    ];

    pub const PAGE_TWO: [&str; 12] = [
        "hypothyroidism",
        "hyperthyroidism",
        "hepatic_fibrosis",
        "chronic_hepatitis",
        "prostate_cancer",
        "respiratory_disorders",
        "kidney_function_disorders",
        "digestive_disorders",
        "major_depression",
        "adhd_children_learning",
        "cerebral_dopamine_decreased",
        "cerebral_serotonin_decreased",
    ];
}

/// One bar: fraction of the track that is filled, and the fill color.
#[derive(Debug, Clone, Copy)]
pub struct Bar {
    pub fill: f32,
    pub color: [u8; 3],
}

impl Bar {
    pub const fn new(fill: f32, color: [u8; 3]) -> Self {
        Self { fill, color }
    }

    pub const fn empty() -> Self {
        Self::new(0.0, colors::TRACK)
    }
}

/// Builds a synthetic report page.
pub struct PageBuilder {
    width: usize,
    height: usize,
    rgb: Vec<u8>,
    dpi: Option<u32>,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self::with_size(layout::PAGE_WIDTH, layout::PAGE_HEIGHT)
    }

    pub fn with_size(width: usize, height: usize) -> Self {
        let mut rgb = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            rgb.extend_from_slice(&colors::PAPER);
        }
        Self {
            width,
            height,
            rgb,
            dpi: Some(layout::DPI),
        }
    }

    /// Write the pHYs chunk with `dpi`, or omit it.
    pub fn dpi(mut self, dpi: Option<u32>) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn rect(mut self, x: usize, y: usize, w: usize, h: usize, color: [u8; 3]) -> Self {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                let i = (row * self.width + col) * 3;
                self.rgb[i..i + 3].copy_from_slice(&color);
            }
        }
        self
    }

    /// Draw bar `index` with its track, fill and a caption in the margin.
    pub fn bar(self, index: usize, bar: Bar) -> Self {
        let top = layout::FIRST_BAR_TOP + index * layout::BAR_PITCH;
        let filled = (bar.fill * layout::BAR_WIDTH as f32).round() as usize;
        self.rect(20, top + 3, 120, 8, colors::TEXT)
            .rect(layout::BAR_LEFT, top, layout::BAR_WIDTH, layout::BAR_HEIGHT, colors::TRACK)
            .rect(layout::BAR_LEFT, top, filled, layout::BAR_HEIGHT, bar.color)
    }

    pub fn bars(self, bars: &[Bar]) -> Self {
        bars.iter()
            .enumerate()
            .fold(self, |page, (i, &bar)| page.bar(i, bar))
    }

    pub fn png(&self) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, self.width as u32, self.height as u32);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            if let Some(dpi) = self.dpi {
                let ppm = (dpi as f32 / 0.0254).round() as u32;
                encoder.set_pixel_dims(Some(png::PixelDimensions {
                    xppu: ppm,
                    yppu: ppm,
                    unit: png::Unit::Meter,
                }));
            }
            let mut writer = encoder.write_header().expect("PNG header");
            writer.write_image_data(&self.rgb).expect("PNG data");
        }
        out
    }
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The twelve bars used by most tests: severe, moderate, mild, then
/// unfilled, repeated.
pub fn standard_bars() -> Vec<Bar> {
    (0..layout::BARS_PER_PAGE)
        .map(|i| match i % 4 {
            0 => Bar::new(0.9, colors::RED),
            1 => Bar::new(0.6, colors::ORANGE),
            2 => Bar::new(0.3, colors::YELLOW),
            _ => Bar::empty(),
        })
        .collect()
}

/// A full report page with [`standard_bars`].
pub fn standard_page() -> Vec<u8> {
    PageBuilder::new().bars(&standard_bars()).png()
}

/// A page showing only the first `count` bars.
pub fn page_with_bars(count: usize) -> Vec<u8> {
    PageBuilder::new()
        .bars(&standard_bars()[..count])
        .png()
}

/// US Letter at 300 dpi, in the coordinates the report renderer uses.
pub mod letter {
    pub const DPI: u32 = 300;
    pub const PAGE_WIDTH: usize = 2550;
    pub const PAGE_HEIGHT: usize = 3300;
    pub const BAR_LEFT: usize = 350;
    pub const BAR_WIDTH: usize = 750;
    pub const FIRST_BAR_TOP: usize = 420;
    pub const BAR_PITCH: usize = 42;
    pub const BAR_HEIGHT: usize = 28;
}

/// A full-size 300 dpi page with `bars` drawn at the template's nominal
/// positions.
pub fn letter_page(bars: &[Bar]) -> Vec<u8> {
    use letter::*;

    bars.iter()
        .enumerate()
        .fold(
            PageBuilder::with_size(PAGE_WIDTH, PAGE_HEIGHT).dpi(Some(DPI)),
            |page, (i, bar)| {
                let top = FIRST_BAR_TOP + i * BAR_PITCH;
                let filled = (bar.fill * BAR_WIDTH as f32).round() as usize;
                page.rect(60, top + 6, 240, 16, colors::TEXT)
                    .rect(BAR_LEFT, top, BAR_WIDTH, BAR_HEIGHT, colors::TRACK)
                    .rect(BAR_LEFT, top, filled, BAR_HEIGHT, bar.color)
            },
        )
        .png()
}
