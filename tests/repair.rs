use eaglepac::parser::repair_self_closing;
use eaglepac::xml::XmlElement;

#[test]
fn flat_tree_is_unchanged() {
    let xml = r#"<package name="DIL8">
  <description>Dual in-line</description>
  <wire x1="-5.08" y1="-2.54" x2="5.08" y2="-2.54" width="0.1524" layer="21"/>
  <text x="0" y="0" size="1.27" layer="25">&gt;NAME</text>
  <polygon width="0.1" layer="1"><vertex x="0" y="0"/><vertex x="1" y="1"/></polygon>
  <pad name="1" x="-3.81" y="-3.81" drill="0.8128" shape="long"/>
</package>"#;
    let tree = XmlElement::parse(xml).unwrap();
    let repaired = repair_self_closing(tree.clone());
    assert_eq!(repaired, tree);
}

#[test]
fn repair_is_idempotent() {
    let broken = XmlElement::new("package").with_child(
        XmlElement::new("hole").with_child(XmlElement::new("hole").with_child(XmlElement::new("pad"))),
    );
    let once = repair_self_closing(broken);
    let twice = repair_self_closing(once.clone());
    assert_eq!(once, twice);
    assert_eq!(once.child_elements().count(), 3);
}
