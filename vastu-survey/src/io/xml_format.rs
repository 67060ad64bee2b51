//! `map.xml` persistence.
//!
//! ```text
//! map[minX, maxX, minY, maxY]
//!   node[x, y, orientation, offset="ox,oy"]*
//!     point[x, y, angle, distance, valid]*
//!     wall[A, B, C, Q, isLeftWall, isFrontWall, isRightWall]*
//!       point[...]*
//!       Pt1[x, y]
//!       Pt2[x, y]
//! ```
//!
//! The map extent is omitted while the map is empty. Node orientation is in
//! degrees. Booleans are written `True` / `False`.
//!
//! Walls are written for viewers but never read back: loading re-inserts
//! each node's own points in order, which re-runs the validity check, then
//! refits the walls.

use std::io::Write;
use std::path::Path;

use log::{debug, info};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::core::{Angle, Point};
use crate::error::{Result, SurveyError};
use crate::survey::{SurveyMap, SurveyNode, SurveyPoint, Wall};

const MAP_TAG: &str = "map";
const NODE_TAG: &str = "node";
const POINT_TAG: &str = "point";
const WALL_TAG: &str = "wall";
const PT1_TAG: &str = "Pt1";
const PT2_TAG: &str = "Pt2";

/// Write `map` to `path`, replacing any existing file.
pub fn save_map(map: &SurveyMap, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_map(map, std::io::BufWriter::new(file))?;
    info!(
        "[XML] Saved {} stations to {}",
        map.len(),
        path.display()
    );
    Ok(())
}

/// Read a map from `path`.
pub fn load_map(path: &Path) -> Result<SurveyMap> {
    let content = std::fs::read_to_string(path)?;
    let map = read_map(&content)?;
    info!(
        "[XML] Loaded {} stations from {}",
        map.len(),
        path.display()
    );
    Ok(map)
}

/// Serialize a map as an XML document.
pub fn write_map<W: Write>(map: &SurveyMap, inner: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(inner, b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    map.write_xml(&mut writer)?;
    writer.into_inner().flush()?;
    Ok(())
}

/// Parse a map from an XML document.
pub fn read_map(xml: &str) -> Result<SurveyMap> {
    let root = XmlElement::parse(xml)?;
    SurveyMap::read_xml(&root)
}

fn xml_error<E: std::fmt::Display>(e: E) -> SurveyError {
    SurveyError::Xml(e.to_string())
}

fn format_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Entity with its own XML element.
trait XmlEntity {
    const TAG: &'static str;

    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()>;
}

/// Entity that can be rebuilt from its XML element.
trait FromXml: Sized {
    fn read_xml(element: &XmlElement) -> Result<Self>;
}

fn write_empty<W: Write>(writer: &mut Writer<W>, element: BytesStart<'_>) -> Result<()> {
    writer.write_event(Event::Empty(element)).map_err(xml_error)
}

fn write_start<W: Write>(writer: &mut Writer<W>, element: BytesStart<'_>) -> Result<()> {
    writer.write_event(Event::Start(element)).map_err(xml_error)
}

fn write_end<W: Write>(writer: &mut Writer<W>, tag: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(xml_error)
}

impl XmlEntity for SurveyMap {
    const TAG: &'static str = MAP_TAG;

    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut element = BytesStart::new(Self::TAG);
        if let Some(bounds) = self.bounds() {
            element.push_attribute(("minX", bounds.min_x.to_string().as_str()));
            element.push_attribute(("maxX", bounds.max_x.to_string().as_str()));
            element.push_attribute(("minY", bounds.min_y.to_string().as_str()));
            element.push_attribute(("maxY", bounds.max_y.to_string().as_str()));
        }
        if self.is_empty() {
            return write_empty(writer, element);
        }
        write_start(writer, element)?;
        for node in self.nodes() {
            node.write_xml(writer)?;
        }
        write_end(writer, Self::TAG)
    }
}

impl FromXml for SurveyMap {
    fn read_xml(element: &XmlElement) -> Result<Self> {
        if element.name != MAP_TAG {
            return Err(SurveyError::MissingElement(MAP_TAG.to_string()));
        }
        let mut map = SurveyMap::new();
        for child in element.children_named(NODE_TAG) {
            map.add_node(SurveyNode::read_xml(child)?);
        }
        Ok(map)
    }
}

impl XmlEntity for SurveyNode {
    const TAG: &'static str = NODE_TAG;

    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut element = BytesStart::new(Self::TAG);
        element.push_attribute(("x", self.position().x.to_string().as_str()));
        element.push_attribute(("y", self.position().y.to_string().as_str()));
        element.push_attribute(("orientation", self.orientation().degrees().to_string().as_str()));
        let offset = format!("{},{}", self.offset().x, self.offset().y);
        element.push_attribute(("offset", offset.as_str()));

        if self.is_empty() {
            return write_empty(writer, element);
        }
        write_start(writer, element)?;
        for point in self.points() {
            point.write_xml(writer)?;
        }
        for wall in self.walls() {
            wall.write_xml(writer)?;
        }
        write_end(writer, Self::TAG)
    }
}

impl FromXml for SurveyNode {
    fn read_xml(element: &XmlElement) -> Result<Self> {
        let position = Point::new(element.f32_attr("x")?, element.f32_attr("y")?);
        let orientation = Angle::from_degrees(element.f32_attr("orientation")?);
        let offset = match element.attr("offset") {
            Some(value) => parse_offset(element, value)?,
            None => Point::default(),
        };

        let mut node = SurveyNode::new(position, orientation, offset);
        // only the node's own points: wall members are copies
        for child in element.children_named(POINT_TAG) {
            node.push_point(SurveyPoint::read_xml(child)?);
        }
        node.compute_wall_data();
        debug!(
            "[XML] Node ({:.1}, {:.1}): {} points, {} walls",
            position.x,
            position.y,
            node.len(),
            node.walls().len()
        );
        Ok(node)
    }
}

fn parse_offset(element: &XmlElement, value: &str) -> Result<Point> {
    let invalid = || element.invalid("offset", value);
    let (x, y) = value.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<f32>().map_err(|_| invalid())?;
    let y = y.trim().parse::<f32>().map_err(|_| invalid())?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(invalid());
    }
    Ok(Point::new(x, y))
}

impl XmlEntity for SurveyPoint {
    const TAG: &'static str = POINT_TAG;

    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut element = BytesStart::new(Self::TAG);
        element.push_attribute(("x", self.x().to_string().as_str()));
        element.push_attribute(("y", self.y().to_string().as_str()));
        element.push_attribute(("angle", self.raw_angle.to_string().as_str()));
        element.push_attribute(("distance", self.raw_distance.to_string().as_str()));
        element.push_attribute(("valid", format_bool(self.is_valid)));
        write_empty(writer, element)
    }
}

impl FromXml for SurveyPoint {
    fn read_xml(element: &XmlElement) -> Result<Self> {
        let mut point = SurveyPoint::new(
            Point::new(element.f32_attr("x")?, element.f32_attr("y")?),
            element.f32_attr("angle")?,
            element.f32_attr("distance")?,
        );
        if element.attr("valid").is_some() {
            point.is_valid = element.bool_attr("valid")?;
        }
        Ok(point)
    }
}

impl XmlEntity for Wall {
    const TAG: &'static str = WALL_TAG;

    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut element = BytesStart::new(Self::TAG);
        element.push_attribute(("A", self.a().to_string().as_str()));
        element.push_attribute(("B", self.b().to_string().as_str()));
        element.push_attribute(("C", self.c().to_string().as_str()));
        element.push_attribute(("Q", self.q().to_string().as_str()));
        element.push_attribute(("isLeftWall", format_bool(self.is_left())));
        element.push_attribute(("isFrontWall", format_bool(self.is_front())));
        element.push_attribute(("isRightWall", format_bool(self.is_right())));
        write_start(writer, element)?;

        for point in self.points() {
            point.write_xml(writer)?;
        }
        for (tag, end) in [(PT1_TAG, self.pt1()), (PT2_TAG, self.pt2())] {
            let mut element = BytesStart::new(tag);
            element.push_attribute(("x", end.x.to_string().as_str()));
            element.push_attribute(("y", end.y.to_string().as_str()));
            write_empty(writer, element)?;
        }
        write_end(writer, Self::TAG)
    }
}

/// Parsed XML element: name, attributes in document order, child elements.
#[derive(Clone, Debug, Default)]
struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parse a document into its root element.
    fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event().map_err(xml_error)? {
                Event::Start(e) => stack.push(Self::from_start(&e)?),
                Event::Empty(e) => {
                    let element = Self::from_start(&e)?;
                    Self::attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| SurveyError::Xml("unexpected closing tag".to_string()))?;
                    Self::attach(&mut stack, &mut root, element);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(SurveyError::Xml(format!("unclosed element <{}>", open.name)));
        }
        root.ok_or_else(|| SurveyError::MissingElement(MAP_TAG.to_string()))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(xml_error)?
            .to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(xml_error)?;
            let key = std::str::from_utf8(attr.key.as_ref()).map_err(xml_error)?;
            let value = std::str::from_utf8(&attr.value).map_err(xml_error)?;
            attributes.push((key.to_string(), value.to_string()));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => {
                if root.is_none() {
                    *root = Some(element);
                }
            }
        }
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn required(&self, name: &str) -> Result<&str> {
        self.attr(name).ok_or_else(|| SurveyError::MissingAttribute {
            element: self.name.clone(),
            attribute: name.to_string(),
        })
    }

    fn invalid(&self, name: &str, value: &str) -> SurveyError {
        SurveyError::InvalidAttribute {
            element: self.name.clone(),
            attribute: name.to_string(),
            value: value.to_string(),
        }
    }

    fn f32_attr(&self, name: &str) -> Result<f32> {
        let value = self.required(name)?;
        match value.trim().parse::<f32>() {
            Ok(number) if number.is_finite() => Ok(number),
            _ => Err(self.invalid(name, value)),
        }
    }

    fn bool_attr(&self, name: &str) -> Result<bool> {
        let value = self.required(name)?;
        match value.trim() {
            "True" | "true" | "1" => Ok(true),
            "False" | "false" | "0" => Ok(false),
            _ => Err(self.invalid(name, value)),
        }
    }
}
