//! Shared fixtures for compiler tests.

use zapc_core::{
    AtomicType, AttributeInstance, Catalog, ClusterInstance, EndpointType, Side, StorageOption,
    StructField, StructType,
};

/// A small slice of the cluster library: integers, floats, strings, a list
/// type, two enums, two bitmaps and three structs.
pub fn zcl_catalog() -> Catalog {
    let float = |name: &str, size: u16| AtomicType {
        is_float: true,
        is_signed: true,
        ..AtomicType::integer(name, size, true)
    };
    let array = AtomicType {
        byte_size: None,
        ..AtomicType::integer("array", 0, false)
    };

    let mut catalog = Catalog::new();
    catalog
        .add_atomic(AtomicType::integer("boolean", 1, false))
        .add_atomic(AtomicType::integer("int8u", 1, false))
        .add_atomic(AtomicType::integer("int16u", 2, false))
        .add_atomic(AtomicType::integer("int24u", 3, false))
        .add_atomic(AtomicType::integer("int32u", 4, false))
        .add_atomic(AtomicType::integer("int64u", 8, false))
        .add_atomic(AtomicType::integer("int8s", 1, true))
        .add_atomic(AtomicType::integer("int16s", 2, true))
        .add_atomic(AtomicType::integer("int32s", 4, true))
        .add_atomic(AtomicType::integer("security_key", 16, false))
        .add_atomic(float("single", 4))
        .add_atomic(float("double", 8))
        .add_atomic(AtomicType::string("char_string", false))
        .add_atomic(AtomicType::string("long_char_string", true))
        .add_atomic(AtomicType::string("octet_string", false))
        .add_atomic(array)
        .add_enum("StartUpOnOff", 1)
        .add_enum("StatusCode", 2)
        .add_bitmap("OnOffControl", 1)
        .add_bitmap("Feature", 4)
        .add_struct(StructType::new(
            "Position",
            vec![
                StructField::new("x", "int16s"),
                StructField::new("y", "int16s"),
            ],
        ))
        .add_struct(StructType::new(
            "Target",
            vec![
                StructField::new("endpoint", "int16u"),
                StructField::new("label", "char_string"),
            ],
        ))
        .add_struct(StructType::new(
            "Route",
            vec![
                StructField::new("origin", "Position"),
                StructField::array("targets", "Target"),
            ],
        ));
    catalog
}

pub fn attribute(code: u16, name: &str, type_name: &str) -> AttributeInstance {
    AttributeInstance::new(code, name, type_name)
}

/// NVM attribute, singleton or not.
pub fn nvm_attribute(code: u16, name: &str, type_name: &str, singleton: bool) -> AttributeInstance {
    AttributeInstance {
        storage: StorageOption::Nvm,
        is_singleton: singleton,
        ..AttributeInstance::new(code, name, type_name)
    }
}

pub fn cluster(code: u16, name: &str, side: Side, attributes: Vec<AttributeInstance>) -> ClusterInstance {
    ClusterInstance {
        attributes,
        ..ClusterInstance::new(code, name, side)
    }
}

pub fn endpoint(endpoint_id: u16, clusters: Vec<ClusterInstance>) -> EndpointType {
    EndpointType::new(endpoint_id, clusters)
}
