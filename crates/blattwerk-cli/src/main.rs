// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// blattwerk — fill a spreadsheet template with JSON data and write a PDF.

use std::path::PathBuf;

use anyhow::{Context, bail};
use blattwerk_core::config::{FillConfig, PageSetup, Watermark};
use blattwerk_core::font::FontManager;
use blattwerk_core::types::{Orientation, PaperSize, Rgb};
use blattwerk_template::TemplateProcessor;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "blattwerk", version, about = "Fill an .xlsx template and render it as a PDF")]
struct Cli {
    /// Template location: a local .xlsx path or an http(s) URL.
    template: String,

    /// JSON file with a top-level object mapping field names to values.
    #[arg(short, long)]
    data: PathBuf,

    /// Output PDF path.
    #[arg(short, long)]
    output: PathBuf,

    /// Custom TTF file embedded in the PDF and used for QR labels.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Registration name for the custom font.
    #[arg(long)]
    font_name: Option<String>,

    /// Placeholder opening delimiter.
    #[arg(long, default_value = "{{")]
    prefix: String,

    /// Placeholder closing delimiter.
    #[arg(long, default_value = "}}")]
    suffix: String,

    /// Suffix routed to the built-in QR handler.
    #[arg(long, default_value = ".qrcode")]
    qr_suffix: String,

    /// Watermark text; omit for no watermark.
    #[arg(long)]
    watermark: Option<String>,

    /// Watermark opacity, 0.0-1.0.
    #[arg(long, default_value_t = 0.1)]
    watermark_alpha: f32,

    /// Watermark rotation in degrees.
    #[arg(long, default_value_t = -45.0, allow_hyphen_values = true)]
    watermark_angle: f32,

    /// Watermark colour as RRGGBB hex.
    #[arg(long, default_value = "000000")]
    watermark_color: String,

    #[arg(long, value_enum, default_value_t = PaperArg::Letter)]
    paper: PaperArg,

    #[arg(long, value_enum, default_value_t = OrientationArg::Landscape)]
    orientation: OrientationArg,

    /// Uniform page margin in millimetres.
    #[arg(long, default_value_t = 7.62)]
    margin_mm: f32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    Letter,
    Legal,
}

impl From<PaperArg> for PaperSize {
    fn from(p: PaperArg) -> Self {
        match p {
            PaperArg::A4 => PaperSize::A4,
            PaperArg::Letter => PaperSize::Letter,
            PaperArg::Legal => PaperSize::Legal,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<OrientationArg> for Orientation {
    fn from(o: OrientationArg) -> Self {
        match o {
            OrientationArg::Portrait => Orientation::Portrait,
            OrientationArg::Landscape => Orientation::Landscape,
        }
    }
}

fn parse_hex_color(s: &str) -> anyhow::Result<Rgb> {
    let raw = s.trim().trim_start_matches('#');
    let bytes = hex::decode(raw).with_context(|| format!("invalid colour {:?}", s))?;
    if bytes.len() != 3 {
        bail!("colour {:?} must be exactly RRGGBB", s);
    }
    Ok(Rgb::new(bytes[0], bytes[1], bytes[2]))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let raw = std::fs::read_to_string(&cli.data)
        .with_context(|| format!("cannot read data file {}", cli.data.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("cannot parse {} as JSON", cli.data.display()))?;
    let serde_json::Value::Object(data) = value else {
        bail!("{} must hold a JSON object at the top level", cli.data.display());
    };

    let mut fonts = FontManager::new();
    if let Some(font) = &cli.font {
        fonts.set_font(font, cli.font_name.as_deref())?;
    }

    let watermark = cli
        .watermark
        .as_ref()
        .map(|text| -> anyhow::Result<Watermark> {
            let mut wm = Watermark::new(text);
            wm.alpha = cli.watermark_alpha;
            wm.angle_degrees = cli.watermark_angle;
            wm.color = parse_hex_color(&cli.watermark_color)?;
            Ok(wm)
        })
        .transpose()?;

    let config = FillConfig {
        prefix: cli.prefix,
        suffix: cli.suffix,
        qrcode_suffix: cli.qr_suffix,
        watermark,
        page: PageSetup {
            paper_size: cli.paper.into(),
            orientation: cli.orientation.into(),
            margin_mm: cli.margin_mm,
        },
    };

    let processor = TemplateProcessor::new(fonts, config);
    let pdf = processor.process(&cli.template, &data)?;
    std::fs::write(&cli.output, &pdf)
        .with_context(|| format!("cannot write {}", cli.output.display()))?;

    tracing::info!(
        output = %cli.output.display(),
        bytes = pdf.len(),
        "PDF written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex_color("d80036").unwrap(), Rgb::new(216, 0, 54));
        assert_eq!(parse_hex_color("#000000").unwrap(), Rgb::BLACK);
        assert!(parse_hex_color("zzz").is_err());
        assert!(parse_hex_color("12345678").is_err());
    }

    #[test]
    fn cli_parses_minimal_invocation() {
        let cli = Cli::parse_from([
            "blattwerk",
            "template.xlsx",
            "--data",
            "data.json",
            "--output",
            "out.pdf",
        ]);
        assert_eq!(cli.prefix, "{{");
        assert_eq!(cli.qr_suffix, ".qrcode");
        assert!(cli.watermark.is_none());
    }

    #[test]
    fn cli_accepts_watermark_options() {
        let cli = Cli::parse_from([
            "blattwerk",
            "https://example.com/t.xlsx",
            "--data",
            "d.json",
            "--output",
            "o.pdf",
            "--watermark",
            "DRAFT",
            "--watermark-angle",
            "-30",
            "--paper",
            "a4",
            "--orientation",
            "portrait",
        ]);
        assert_eq!(cli.watermark.as_deref(), Some("DRAFT"));
        assert_eq!(cli.watermark_angle, -30.0);
        assert!(matches!(cli.paper, PaperArg::A4));
    }
}
