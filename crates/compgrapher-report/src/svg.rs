//! SVG floating bar chart.
//!
//! One horizontal group per position, one bar per employer spanning its low
//! to high bound. Employers keep a fixed slot inside every group so colors
//! and offsets line up across positions.

use std::fmt::Display;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use compgrapher_model::{PreparedDataset, RenderOptions};

use crate::error::{ReportError, Result};
use crate::format::{format_axis, format_currency, trim_number};
use crate::layout::{ValueAxis, chart_order};

pub(crate) const MARGIN_LEFT: f64 = 240.0;
pub(crate) const MARGIN_RIGHT: f64 = 40.0;
pub(crate) const TITLE_HEIGHT: f64 = 40.0;
const LEGEND_ROW_HEIGHT: f64 = 22.0;
const LEGEND_ITEM_WIDTH: f64 = 180.0;
pub(crate) const AXIS_HEIGHT: f64 = 40.0;
pub(crate) const MIN_PLOT_WIDTH: f64 = 200.0;
pub(crate) const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";
pub(crate) const GRID_COLOR: &str = "#dddddd";
pub(crate) const TEXT_COLOR: &str = "#2c3e50";

pub(crate) fn svg_error(err: impl Display) -> ReportError {
    ReportError::Svg(err.to_string())
}

/// Thin element writer over a quick-xml [`Writer`].
pub(crate) struct SvgWriter {
    pub(crate) xml: Writer<Vec<u8>>,
}

impl SvgWriter {
    pub(crate) fn new() -> Self {
        Self {
            xml: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    pub(crate) fn start(&mut self, name: &str, attrs: &[(&str, String)]) -> Result<()> {
        let mut element = BytesStart::new(name);
        for (key, value) in attrs {
            element.push_attribute((*key, value.as_str()));
        }
        self.xml.write_event(Event::Start(element)).map_err(svg_error)
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<()> {
        self.xml
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(svg_error)
    }

    pub(crate) fn empty(&mut self, name: &str, attrs: &[(&str, String)]) -> Result<()> {
        let mut element = BytesStart::new(name);
        for (key, value) in attrs {
            element.push_attribute((*key, value.as_str()));
        }
        self.xml.write_event(Event::Empty(element)).map_err(svg_error)
    }

    pub(crate) fn text(&mut self, attrs: &[(&str, String)], content: &str) -> Result<()> {
        self.start("text", attrs)?;
        self.xml
            .write_event(Event::Text(BytesText::new(content)))
            .map_err(svg_error)?;
        self.end("text")
    }

    pub(crate) fn finish(self) -> Result<String> {
        String::from_utf8(self.xml.into_inner()).map_err(svg_error)
    }
}

/// Fill per employer column: the highlight color for the highlighted
/// employer, palette colors in column order for the rest.
pub fn employer_colors(dataset: &PreparedDataset, options: &RenderOptions) -> Vec<String> {
    let mut palette_index = 0;
    dataset
        .employers
        .iter()
        .map(|employer| {
            if employer.key == dataset.highlighted.key {
                options.highlight_color.clone()
            } else {
                let color = options.palette_color(palette_index).to_string();
                palette_index += 1;
                color
            }
        })
        .collect()
}

pub(crate) fn px(value: f64) -> String {
    trim_number(value)
}

/// Renders the chart as a standalone SVG document.
pub fn render_svg(dataset: &PreparedDataset, options: &RenderOptions) -> Result<String> {
    let mut svg = SvgWriter::new();
    svg.xml
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(svg_error)?;
    write_chart(&mut svg, dataset, options)?;
    svg.finish()
}

/// Renders the chart without an XML declaration, for embedding in HTML.
pub fn render_svg_fragment(dataset: &PreparedDataset, options: &RenderOptions) -> Result<String> {
    let mut svg = SvgWriter::new();
    write_chart(&mut svg, dataset, options)?;
    svg.finish()
}

fn write_chart(
    svg: &mut SvgWriter,
    dataset: &PreparedDataset,
    options: &RenderOptions,
) -> Result<()> {
    let positions = chart_order(dataset);
    let axis = ValueAxis::for_dataset(dataset);
    let employer_count = dataset.employers.len().max(1);

    let width = f64::from(options.width).max(MARGIN_LEFT + MARGIN_RIGHT + MIN_PLOT_WIDTH);
    let plot_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let row_height = f64::from(options.row_height);
    let per_legend_row = ((width - MARGIN_LEFT) / LEGEND_ITEM_WIDTH).floor().max(1.0) as usize;
    let legend_rows = employer_count.div_ceil(per_legend_row);
    let plot_top = TITLE_HEIGHT + legend_rows as f64 * LEGEND_ROW_HEIGHT + 10.0;
    let plot_height = row_height * positions.len().max(1) as f64;
    let height = plot_top + plot_height + AXIS_HEIGHT;

    svg.start(
        "svg",
        &[
            ("xmlns", "http://www.w3.org/2000/svg".to_string()),
            ("width", px(width)),
            ("height", px(height)),
            ("viewBox", format!("0 0 {} {}", px(width), px(height))),
            ("font-family", FONT_FAMILY.to_string()),
        ],
    )?;
    svg.empty(
        "rect",
        &[
            ("width", px(width)),
            ("height", px(height)),
            ("fill", "#ffffff".to_string()),
        ],
    )?;

    let title = format!(
        "{} compensation comparison ({} positions, {} employers)",
        dataset.highlighted.name,
        positions.len(),
        dataset.employers.len()
    );
    svg.text(
        &[
            ("x", px(width / 2.0)),
            ("y", px(TITLE_HEIGHT - 14.0)),
            ("text-anchor", "middle".to_string()),
            ("font-size", "18".to_string()),
            ("font-weight", "bold".to_string()),
            ("fill", TEXT_COLOR.to_string()),
        ],
        &title,
    )?;

    let colors = employer_colors(dataset, options);

    // Legend
    svg.start("g", &[("class", "legend".to_string())])?;
    for (idx, (employer, color)) in dataset.employers.iter().zip(&colors).enumerate() {
        let x = MARGIN_LEFT + (idx % per_legend_row) as f64 * LEGEND_ITEM_WIDTH;
        let y = TITLE_HEIGHT + (idx / per_legend_row) as f64 * LEGEND_ROW_HEIGHT;
        svg.empty(
            "rect",
            &[
                ("x", px(x)),
                ("y", px(y)),
                ("width", "14".to_string()),
                ("height", "14".to_string()),
                ("fill", color.clone()),
            ],
        )?;
        svg.text(
            &[
                ("x", px(x + 20.0)),
                ("y", px(y + 12.0)),
                ("font-size", "12".to_string()),
                ("fill", TEXT_COLOR.to_string()),
            ],
            &employer.name,
        )?;
    }
    svg.end("g")?;

    write_axis(svg, &axis, options.show_grid, plot_top, plot_height, plot_width)?;

    // Bars
    let slot_height = row_height * 0.8 / employer_count as f64;
    let bar_height = (slot_height - 1.0).max(1.0);
    for (row, position) in positions.iter().enumerate() {
        let group_top = plot_top + row as f64 * row_height;
        svg.start("g", &[("class", "position".to_string())])?;
        svg.text(
            &[
                ("x", px(MARGIN_LEFT - 8.0)),
                ("y", px(group_top + row_height / 2.0 + 4.0)),
                ("text-anchor", "end".to_string()),
                ("font-size", "12".to_string()),
                ("fill", TEXT_COLOR.to_string()),
            ],
            &position.title,
        )?;

        for (slot, (employer, color)) in dataset.employers.iter().zip(&colors).enumerate() {
            let highlighted = employer.key == dataset.highlighted.key;
            let Some(range) = position.range_for(&employer.key) else {
                continue;
            };
            let left = range.low.min(range.high);
            let right = range.low.max(range.high);
            let x = MARGIN_LEFT + axis.scale(left, plot_width);
            let bar_width = (axis.scale(right, plot_width) - axis.scale(left, plot_width)).max(1.0);
            let y = group_top + row_height * 0.1 + slot as f64 * slot_height;

            let mut attrs = vec![
                ("x", px(x)),
                ("y", px(y)),
                ("width", px(bar_width)),
                ("height", px(bar_height)),
                ("fill", color.clone()),
            ];
            if highlighted {
                attrs.push(("stroke", TEXT_COLOR.to_string()));
                attrs.push(("stroke-width", "1".to_string()));
            }
            svg.start("rect", &attrs)?;
            svg.start("title", &[])?;
            svg.xml
                .write_event(Event::Text(BytesText::new(&format!(
                    "{}: {} to {}",
                    employer.name,
                    format_currency(range.low),
                    format_currency(range.high)
                ))))
                .map_err(svg_error)?;
            svg.end("title")?;
            svg.end("rect")?;

            if options.show_labels {
                svg.text(
                    &[
                        ("x", px(x + bar_width + 4.0)),
                        ("y", px(y + bar_height / 2.0 + 3.0)),
                        ("font-size", "9".to_string()),
                        ("fill", TEXT_COLOR.to_string()),
                    ],
                    &format!("{} - {}", format_axis(range.low), format_axis(range.high)),
                )?;
            }
        }
        svg.end("g")?;
    }

    svg.end("svg")
}

/// Vertical grid lines, tick labels, and the baseline under the plot area.
pub(crate) fn write_axis(
    svg: &mut SvgWriter,
    axis: &ValueAxis,
    show_grid: bool,
    plot_top: f64,
    plot_height: f64,
    plot_width: f64,
) -> Result<()> {
    svg.start("g", &[("class", "axis".to_string())])?;
    for tick in axis.ticks() {
        let x = MARGIN_LEFT + axis.scale(tick, plot_width);
        if show_grid {
            svg.empty(
                "line",
                &[
                    ("x1", px(x)),
                    ("y1", px(plot_top)),
                    ("x2", px(x)),
                    ("y2", px(plot_top + plot_height)),
                    ("stroke", GRID_COLOR.to_string()),
                    ("stroke-width", "1".to_string()),
                ],
            )?;
        }
        svg.text(
            &[
                ("x", px(x)),
                ("y", px(plot_top + plot_height + 18.0)),
                ("text-anchor", "middle".to_string()),
                ("font-size", "11".to_string()),
                ("fill", TEXT_COLOR.to_string()),
            ],
            &format_axis(tick),
        )?;
    }
    svg.empty(
        "line",
        &[
            ("x1", px(MARGIN_LEFT)),
            ("y1", px(plot_top + plot_height)),
            ("x2", px(MARGIN_LEFT + plot_width)),
            ("y2", px(plot_top + plot_height)),
            ("stroke", TEXT_COLOR.to_string()),
            ("stroke-width", "1".to_string()),
        ],
    )?;
    svg.end("g")
}
