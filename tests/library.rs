use camino::Utf8PathBuf;
use eaglepac::{ElementType, Importer, LayerTable, Schema};

const LIBRARY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE eagle SYSTEM "eagle.dtd">
<eagle version="6.4">
<drawing>
<layers>
<layer number="1" name="Top" color="4" fill="1" visible="yes" active="yes"/>
<layer number="21" name="tPlace" color="7" fill="1" visible="yes" active="yes"/>
<layer number="100" name="Assembly" color="2" fill="1" visible="yes" active="yes"/>
</layers>
<library name="passives">
<description>Passive parts</description>
<packages>
<package name="R0603">
<description>0603 resistor</description>
<smd name="1" x="-0.85" y="0" dx="1" dy="1.1" layer="1"/>
<smd name="2" x="0.85" y="0" dx="1" dy="1.1" layer="1"/>
<text x="-0.889" y="0.889" size="1.27" layer="25">&gt;NAME</text>
</package>
<package name="TO92">
<description>TO-92</description>
<wire x1="-2.095" y1="-1.651" x2="2.095" y2="-1.651" width="0.127" layer="100"/>
<pad name="1" x="-1.27" y="0" drill="0.8128" shape="octagon"/>
<pad name="2" x="0" y="1.905" drill="0.8128" shape="octagon"/>
<pad name="3" x="1.27" y="0" drill="0.8128" shape="octagon"/>
</package>
</packages>
</library>
</drawing>
</eagle>"#;

#[test]
fn imports_every_package_in_order() {
    let schema = Schema::eagle();
    let library = Importer::new(&schema).import_library_str(LIBRARY).unwrap();

    assert_eq!(library.name.as_deref(), Some("passives"));
    let names: Vec<_> = library
        .packages
        .iter()
        .map(|r| r.package.name.as_str())
        .collect();
    assert_eq!(names, ["R0603", "TO92"]);

    // The library's own description belongs to no package.
    let r0603 = library.package("R0603").unwrap();
    assert!(r0603.anomalies.is_empty());
    assert_eq!(r0603.package.description, "0603 resistor");
    assert_eq!(r0603.package.elements(ElementType::Smd).len(), 2);

    let to92 = &library.package("TO92").unwrap().package;
    assert_eq!(to92.elements(ElementType::Pad).len(), 3);
    assert_eq!(to92.elements(ElementType::Wire).len(), 1);
}

#[test]
fn reads_document_layers() {
    let schema = Schema::eagle();
    let library = Importer::new(&schema).import_library_str(LIBRARY).unwrap();

    let layers = library.layers.unwrap();
    assert_eq!(layers.len(), 3);
    assert_eq!(layers.lookup("100"), Ok("Assembly"));
}

#[test]
fn single_package_document_is_a_library_of_one() {
    let schema = Schema::eagle();
    let library = Importer::new(&schema)
        .import_library_str(r#"<package name="X"><description/><hole x="0" y="0" drill="1"/></package>"#)
        .unwrap();
    assert_eq!(library.packages.len(), 1);
    assert_eq!(library.name, None);
    assert_eq!(library.layers, None);
}

#[test]
fn layer_table_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("layers.json")).unwrap();
    std::fs::write(&path, r#"{"1": "Copper", "250": "Fab"}"#).unwrap();

    let custom = LayerTable::from_json_file(&path).unwrap();
    assert_eq!(custom.lookup("250"), Ok("Fab"));

    let mut layers = LayerTable::eagle();
    layers.merge(custom);
    assert_eq!(layers.lookup("1"), Ok("Copper"));
    assert_eq!(layers.lookup("21"), Ok("tPlace"));
}

#[test]
fn missing_json_file_has_context() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.json")).unwrap();
    let err = LayerTable::from_json_file(&path).unwrap_err();
    assert!(err.to_string().starts_with("Failed to read"));
}
