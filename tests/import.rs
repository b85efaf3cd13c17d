use eaglepac::xml::XmlElement;
use eaglepac::{Anomaly, ElementType, Importer, Schema};

#[test]
fn import_soic_pad_and_description() {
    let xml = r#"<package name="SOIC16"><description>16-pin</description><pad name="1" x="1.0" y="2.0" drill="0.5" shape="octagon"/></package>"#;
    let schema = Schema::eagle();
    let report = Importer::new(&schema).import_str(xml).unwrap();
    let package = &report.package;

    assert_eq!(package.name, "SOIC16");
    assert_eq!(package.description, "16-pin");
    assert!(report.anomalies.is_empty());

    let pads = package.elements(ElementType::Pad);
    assert_eq!(pads.len(), 1);
    let attrs: Vec<(&str, &str)> = pads[0]
        .attributes()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(
        attrs,
        [
            ("name", "1"),
            ("x", "1.0"),
            ("y", "2.0"),
            ("drill", "0.5"),
            ("shape", "octagon")
        ]
    );
    assert_eq!(package.len(), 1);
}

#[test]
fn missing_description_is_reported_not_fatal() {
    let xml = r#"<package name="X"><hole x="1" y="2" drill="0.5"/></package>"#;
    let schema = Schema::eagle();
    let report = Importer::new(&schema).import_str(xml).unwrap();

    assert_eq!(report.package.description, "");
    assert_eq!(report.description_count(), Some(0));
    assert_eq!(report.package.elements(ElementType::Hole).len(), 1);
}

#[test]
fn first_of_several_descriptions_wins() {
    let xml = r#"<package name="X">
  <description>first</description>
  <description>second</description>
</package>"#;
    let schema = Schema::eagle();
    let report = Importer::new(&schema).import_str(xml).unwrap();

    assert_eq!(report.package.description, "first");
    assert_eq!(
        report.anomalies,
        [Anomaly::MalformedDescriptionCount { count: 2 }]
    );
}

#[test]
fn unrecognized_wire_attribute_is_dropped() {
    let xml = r#"<package name="X"><description/>
  <wire x1="0" y1="0" x2="1" y2="0" width="0.127" layer="21" curve="90"/>
</package>"#;
    let schema = Schema::eagle();
    let report = Importer::new(&schema).import_str(xml).unwrap();

    let wire = &report.package.elements(ElementType::Wire)[0];
    assert_eq!(wire.attribute("curve"), None);
    assert_eq!(wire.attributes().len(), 6);
    assert_eq!(
        report.anomalies,
        [Anomaly::DroppedAttribute {
            element: ElementType::Wire,
            attribute: "curve".into()
        }]
    );
}

#[test]
fn missing_attributes_stay_absent() {
    let xml = r#"<package name="X"><description/><circle x="1" y="2"/></package>"#;
    let schema = Schema::eagle();
    let report = Importer::new(&schema).import_str(xml).unwrap();

    let circle = &report.package.elements(ElementType::Circle)[0];
    assert_eq!(circle.attribute("radius"), None);
    assert_eq!(circle.attributes().len(), 2);
}

#[test]
fn text_content_and_polygon_vertices() {
    let xml = r#"<package name="SOT23">
  <description>&lt;b&gt;SOT-23&lt;/b&gt;</description>
  <text x="-5.08" y="-2.54" size="1.27" layer="25" rot="R90">&gt;NAME</text>
  <polygon width="0.127" layer="1">
    <vertex x="0" y="0"/>
    <vertex x="1" y="0"/>
    <vertex x="1" y="1"/>
  </polygon>
</package>"#;
    let schema = Schema::eagle();
    let package = Importer::new(&schema).import_str(xml).unwrap().package;

    assert_eq!(package.description, "<b>SOT-23</b>");
    let text = &package.elements(ElementType::Text)[0];
    assert_eq!(text.text(), Some(">NAME"));
    assert_eq!(text.attribute("rot"), Some("R90"));

    let polygon = &package.elements(ElementType::Polygon)[0];
    let points: Vec<(&str, &str)> = polygon
        .vertices()
        .iter()
        .map(|v| (v.x.as_str(), v.y.as_str()))
        .collect();
    assert_eq!(points, [("0", "0"), ("1", "0"), ("1", "1")]);
}

#[test]
fn name_comes_from_package_element() {
    let xml = r#"<package><description/></package>"#;
    let schema = Schema::eagle();
    let report = Importer::new(&schema).import_str(xml).unwrap();
    assert_eq!(report.package.name, "");
    assert_eq!(report.anomalies, [Anomaly::MissingName]);
}

#[test]
fn finds_package_inside_larger_document() {
    let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE eagle SYSTEM "eagle.dtd">
<eagle version="6.4">
  <drawing><library><packages>
    <package name="R0805"><description>Resistor</description>
      <smd name="1" x="-0.95" y="0" dx="1.3" dy="1.5" layer="1"/>
      <smd name="2" x="0.95" y="0" dx="1.3" dy="1.5" layer="1"/>
    </package>
  </packages></library></drawing>
</eagle>"#;
    let schema = Schema::eagle();
    let package = Importer::new(&schema).import_str(xml).unwrap().package;
    assert_eq!(package.name, "R0805");
    let names: Vec<_> = package
        .elements(ElementType::Smd)
        .iter()
        .filter_map(|s| s.attribute("name"))
        .collect();
    assert_eq!(names, ["1", "2"]);
}

#[test]
fn import_repairs_falsely_nested_elements() {
    // What a parser ignoring `/>` makes of:
    // <wire/><pad/><smd/><polygon><vertex/><vertex/><vertex/></polygon>
    let broken = XmlElement::new("package")
        .with_attribute("name", "BROKEN")
        .with_child(XmlElement::new("description").with_text("nested"))
        .with_child(
            XmlElement::new("wire").with_attribute("layer", "21").with_child(
                XmlElement::new("pad").with_attribute("name", "1").with_child(
                    XmlElement::new("smd")
                        .with_attribute("name", "2")
                        .with_child(
                            XmlElement::new("polygon").with_child(
                                XmlElement::new("vertex")
                                    .with_attribute("x", "0")
                                    .with_attribute("y", "0")
                                    .with_child(
                                        XmlElement::new("vertex")
                                            .with_attribute("x", "1")
                                            .with_attribute("y", "0")
                                            .with_child(
                                                XmlElement::new("vertex")
                                                    .with_attribute("x", "1")
                                                    .with_attribute("y", "1"),
                                            ),
                                    ),
                            ),
                        ),
                ),
            ),
        );

    let schema = Schema::eagle();
    let report = Importer::new(&schema).import(&broken);
    let package = &report.package;

    assert_eq!(package.name, "BROKEN");
    assert_eq!(package.description, "nested");
    assert_eq!(package.elements(ElementType::Wire).len(), 1);
    assert_eq!(package.elements(ElementType::Pad).len(), 1);
    assert_eq!(package.elements(ElementType::Smd).len(), 1);
    assert_eq!(package.elements(ElementType::Polygon)[0].vertices().len(), 3);
}
