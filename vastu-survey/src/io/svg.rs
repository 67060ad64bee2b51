//! SVG rendering of a survey map.
//!
//! Shows the stations with their heading and the path between them, every
//! surveyed point (valid and invalid) and the fitted walls colored by side.

use crate::core::{Bounds, Point};
use quick_xml::escape::escape;
use crate::survey::{SurveyMap, WallSide};
use std::fmt::{self, Write};
use std::path::Path;

/// SVG color scheme for visualization
#[derive(Clone, Debug)]
pub struct SvgColorScheme {
    pub left_wall: &'static str,
    pub front_wall: &'static str,
    pub right_wall: &'static str,
    pub valid_point: &'static str,
    pub invalid_point: &'static str,
    pub station: &'static str,
    pub path: &'static str,
}

impl Default for SvgColorScheme {
    fn default() -> Self {
        Self {
            left_wall: "#2222AA",
            front_wall: "#AA2222",
            right_wall: "#22AA22",
            valid_point: "#333333",
            invalid_point: "#BBBBBB",
            station: "#E08000",
            path: "#E08000",
        }
    }
}

/// Configuration for SVG rendering
#[derive(Clone, Debug)]
pub struct SvgConfig {
    /// Pixels per centimeter
    pub scale: f32,
    /// Wall line width in pixels
    pub wall_width: f32,
    /// Point radius in pixels
    pub point_radius: f32,
    /// Station marker radius in pixels
    pub station_radius: f32,
    /// Padding around the map in pixels
    pub padding: f32,
    pub colors: SvgColorScheme,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            wall_width: 3.0,
            point_radius: 2.0,
            station_radius: 5.0,
            padding: 20.0,
            colors: SvgColorScheme::default(),
        }
    }
}

/// SVG visualization builder
pub struct SvgVisualizer<'a> {
    map: &'a SurveyMap,
    config: SvgConfig,
    title: Option<String>,
}

/// Map-frame (cm, y up) to pixel (y down) transform.
struct Frame {
    min_x: f32,
    max_y: f32,
    scale: f32,
}

impl Frame {
    fn px(&self, p: Point) -> (f32, f32) {
        ((p.x - self.min_x) * self.scale, (self.max_y - p.y) * self.scale)
    }
}

impl<'a> SvgVisualizer<'a> {
    pub fn new(map: &'a SurveyMap, config: SvgConfig) -> Self {
        Self {
            map,
            config,
            title: None,
        }
    }

    /// Set a title to display
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Render the map to an SVG document.
    pub fn render(&self) -> String {
        let mut svg = String::new();
        match self.write_svg(&mut svg) {
            Ok(()) => svg,
            Err(_) => String::new(),
        }
    }

    /// Save to file
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        std::fs::write(path, self.render())
    }

    fn write_svg(&self, svg: &mut String) -> fmt::Result {
        // An empty map still renders a small canvas
        let bounds = self
            .map
            .bounds()
            .unwrap_or(Bounds::new(-50.0, 50.0, -50.0, 50.0));
        let frame = Frame {
            min_x: bounds.min_x,
            max_y: bounds.max_y,
            scale: self.config.scale,
        };

        let padding = self.config.padding;
        let title_height = if self.title.is_some() { 30.0 } else { 0.0 };
        let legend_height = 30.0;
        let map_width_px = bounds.width() * self.config.scale;
        let map_height_px = bounds.height() * self.config.scale;
        let width = map_width_px + 2.0 * padding;
        let height = map_height_px + 2.0 * padding + title_height + legend_height;

        writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
            width, height, width, height
        )?;
        writeln!(svg, r##"  <rect width="100%" height="100%" fill="#F8F8F8"/>"##)?;

        if let Some(ref title) = self.title {
            writeln!(
                svg,
                r##"  <text x="{:.0}" y="22" font-family="sans-serif" font-size="16" font-weight="bold" text-anchor="middle" fill="#333">{}</text>"##,
                width / 2.0,
                escape(title.as_str())
            )?;
        }

        writeln!(
            svg,
            r#"  <g transform="translate({:.0}, {:.0})">"#,
            padding,
            padding + title_height
        )?;
        self.render_points(svg, &frame)?;
        self.render_walls(svg, &frame)?;
        self.render_stations(svg, &frame)?;
        writeln!(svg, "  </g>")?;

        self.render_legend(svg, padding + title_height + map_height_px + padding)?;
        writeln!(svg, "</svg>")
    }

    fn render_points(&self, svg: &mut String, frame: &Frame) -> fmt::Result {
        let colors = &self.config.colors;
        writeln!(svg, r#"    <g id="points">"#)?;
        for node in self.map.nodes() {
            for point in node.points() {
                let (px, py) = frame.px(point.position);
                let color = if point.is_valid {
                    colors.valid_point
                } else {
                    colors.invalid_point
                };
                writeln!(
                    svg,
                    r#"      <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
                    px, py, self.config.point_radius, color
                )?;
            }
        }
        writeln!(svg, "    </g>")
    }

    fn render_walls(&self, svg: &mut String, frame: &Frame) -> fmt::Result {
        let colors = &self.config.colors;
        writeln!(svg, r#"    <g id="walls">"#)?;
        for node in self.map.nodes() {
            for wall in node.walls() {
                let (x1, y1) = frame.px(wall.pt1());
                let (x2, y2) = frame.px(wall.pt2());
                let color = match wall.side() {
                    WallSide::Left => colors.left_wall,
                    WallSide::Front => colors.front_wall,
                    WallSide::Right => colors.right_wall,
                };
                writeln!(
                    svg,
                    r#"      <line class="{}" x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{}" stroke-linecap="round" opacity="{:.2}"/>"#,
                    wall.side().name(),
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                    self.config.wall_width,
                    0.4 + 0.6 * wall.q()
                )?;
            }
        }
        writeln!(svg, "    </g>")
    }

    fn render_stations(&self, svg: &mut String, frame: &Frame) -> fmt::Result {
        let colors = &self.config.colors;
        writeln!(svg, r#"    <g id="stations">"#)?;

        let mut path_d = String::new();
        for (i, node) in self.map.nodes().iter().enumerate() {
            let (px, py) = frame.px(node.position());
            if i == 0 {
                write!(&mut path_d, "M {:.1} {:.1}", px, py)?;
            } else {
                write!(&mut path_d, " L {:.1} {:.1}", px, py)?;
            }
        }
        if !path_d.is_empty() {
            writeln!(
                svg,
                r#"      <path d="{}" fill="none" stroke="{}" stroke-width="1.5" stroke-dasharray="4 3"/>"#,
                path_d, colors.path
            )?;
        }

        for node in self.map.nodes() {
            let (px, py) = frame.px(node.position());
            let arrow = self.config.station_radius * 2.0;
            // bearings are clockwise from north, pixel y grows downward
            let dx = arrow * node.orientation().sin();
            let dy = -arrow * node.orientation().cos();
            writeln!(
                svg,
                r#"      <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="white" stroke-width="1"/>"#,
                px, py, self.config.station_radius, colors.station
            )?;
            writeln!(
                svg,
                r#"      <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1.5"/>"#,
                px,
                py,
                px + dx,
                py + dy,
                colors.station
            )?;
        }
        writeln!(svg, "    </g>")
    }

    fn render_legend(&self, svg: &mut String, y_offset: f32) -> fmt::Result {
        let colors = &self.config.colors;
        writeln!(
            svg,
            r#"  <g id="legend" font-family="sans-serif" font-size="12" transform="translate(0, {:.0})">"#,
            y_offset
        )?;
        let entries = [
            ("Left wall", colors.left_wall),
            ("Front wall", colors.front_wall),
            ("Right wall", colors.right_wall),
            ("Station", colors.station),
        ];
        for (i, (label, color)) in entries.iter().enumerate() {
            let x = self.config.padding + i as f32 * 90.0;
            writeln!(
                svg,
                r#"    <rect x="{:.0}" y="0" width="12" height="12" fill="{}"/>"#,
                x, color
            )?;
            writeln!(
                svg,
                r##"    <text x="{:.0}" y="11" fill="#333">{}</text>"##,
                x + 16.0,
                label
            )?;
        }
        writeln!(svg, "  </g>")
    }
}
