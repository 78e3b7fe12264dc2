use crate::{AtomicType, Catalog, StructField, StructType, TypeCatalog};

fn sample() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .add_atomic(AtomicType::integer("int8u", 1, false))
        .add_atomic(AtomicType::string("char_string", false))
        .add_enum("ColorMode", 1)
        .add_bitmap("Feature", 4)
        .add_struct(StructType::new(
            "LabelStruct",
            vec![
                StructField::new("label", "char_string"),
                StructField::new("value", "char_string"),
            ],
        ));
    catalog
}

#[test]
fn lookups_ignore_case() {
    let catalog = sample();
    assert_eq!(catalog.atomic("INT8U").map(|a| a.byte_size), Some(Some(1)));
    assert_eq!(catalog.atomic("Int8u").map(|a| a.name.as_str()), Some("int8u"));
    assert_eq!(catalog.enum_type("colormode").map(|e| e.byte_size), Some(1));
    assert_eq!(catalog.bitmap("FEATURE").map(|b| b.byte_size), Some(4));
    assert!(catalog.struct_type("labelstruct").is_some());
}

#[test]
fn missing_names_resolve_to_none() {
    let catalog = sample();
    assert!(catalog.atomic("int64u").is_none());
    assert!(catalog.enum_type("int8u").is_none());
    assert!(catalog.struct_type("ColorMode").is_none());
}

#[test]
fn later_rows_replace_earlier_ones() {
    let mut catalog = sample();
    catalog.add_enum("COLORMODE", 2);
    assert_eq!(catalog.enum_type("ColorMode").map(|e| e.byte_size), Some(2));
    assert_eq!(catalog.enums().count(), 1);
}

#[test]
fn structs_keep_catalog_order() {
    let mut catalog = sample();
    catalog.add_struct(StructType::new("Alpha", vec![]));
    let names: Vec<_> = catalog.structs().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["LabelStruct", "Alpha"]);
}

#[test]
fn string_prefix_width() {
    assert_eq!(AtomicType::string("char_string", false).length_prefix(), 1);
    assert_eq!(AtomicType::string("long_char_string", true).length_prefix(), 2);
}

#[test]
fn reference_forwards_lookups() {
    let catalog = sample();
    let by_ref: &dyn TypeCatalog = &&catalog;
    assert!(by_ref.atomic("char_string").is_some());
    assert_eq!(by_ref.structs().len(), 1);
}

#[test]
fn empty_catalog() {
    assert!(Catalog::new().is_empty());
    assert!(!sample().is_empty());
}

#[test]
fn rows_iterate_in_insertion_order() {
    let mut catalog = sample();
    catalog
        .add_atomic(AtomicType::integer("int16u", 2, false))
        .add_bitmap("OnOffControl", 1);

    let atomics: Vec<_> = catalog.atomics().map(|a| a.name.as_str()).collect();
    assert_eq!(atomics, ["int8u", "char_string", "int16u"]);
    let bitmaps: Vec<_> = catalog.bitmaps().map(|b| (b.name.as_str(), b.byte_size)).collect();
    assert_eq!(bitmaps, [("Feature", 4), ("OnOffControl", 1)]);
}
