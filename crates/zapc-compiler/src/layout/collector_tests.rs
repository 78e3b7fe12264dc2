use indoc::indoc;
use zapc_core::{
    AttributeInstance, ClusterInstance, CommandInstance, CommandSource, DeviceType, EndpointType,
    EventInstance, Side, StorageOption,
};
use zapc_tables::{
    AttributeMask, ClusterMask, CommandMask, DefaultValue, Endianness, LayoutTables,
    ReportingDirection,
};

use super::LayoutCollector;
use crate::test_utils::{attribute, cluster, endpoint, nvm_attribute, zcl_catalog};
use crate::{Config, Error, ResolveError};

fn collect(endpoints: &[EndpointType]) -> LayoutTables {
    collect_with(Config::new(), endpoints).unwrap()
}

fn collect_with(config: Config, endpoints: &[EndpointType]) -> crate::Result<LayoutTables> {
    let catalog = zcl_catalog();
    LayoutCollector::new(&catalog, &config).collect(endpoints)
}

fn with_default(mut attr: AttributeInstance, value: &str) -> AttributeInstance {
    attr.default_value = Some(value.to_string());
    attr
}

fn incoming(code: u16, name: &str) -> CommandInstance {
    CommandInstance {
        is_incoming: true,
        ..CommandInstance::new(code, name, CommandSource::Client)
    }
}

/// Two endpoints sharing a singleton, with every kind of default.
fn light() -> Vec<EndpointType> {
    let basic = |endpoint_id: u16| {
        let mut attrs = vec![AttributeInstance {
            is_singleton: true,
            ..with_default(attribute(0x0000, "ZCL version", "int8u"), "8")
        }];
        if endpoint_id == 1 {
            attrs.push(AttributeInstance {
                max_length: Some(4),
                ..with_default(nvm_attribute(0x0005, "model identifier", "char_string", true), "zapc")
            });
        }
        cluster(0x0000, "Basic", Side::Server, attrs)
    };

    let mut basic_1 = basic(1);
    basic_1.events.push(EventInstance {
        code: 0x00,
        name: "StartUp".into(),
        manufacturer_code: None,
    });

    let mut on_off_client = cluster(
        0x0006,
        "On/off",
        Side::Client,
        vec![AttributeInstance {
            side: Side::Client,
            ..with_default(attribute(0xFFFD, "cluster revision", "int16u"), "4")
        }],
    );
    on_off_client.commands.push(CommandInstance {
        is_outgoing: true,
        ..CommandInstance::new(0x02, "Toggle", CommandSource::Client)
    });

    let mut on_off = cluster(
        0x0006,
        "On/off",
        Side::Server,
        vec![
            AttributeInstance {
                is_writable: true,
                is_nullable: true,
                ..nvm_attribute(0x4003, "start up on off", "StartUpOnOff", false)
            },
            AttributeInstance {
                is_writable: true,
                included_reportable: true,
                ..with_default(attribute(0x0000, "on off", "boolean"), "0")
            },
        ],
    );
    on_off.functions = Some("onOffFunctions".into());
    on_off.commands = vec![incoming(0x02, "Toggle"), incoming(0x00, "Off")];

    let level = cluster(
        0x0008,
        "Level Control",
        Side::Server,
        vec![
            with_default(attribute(0x4000, "options", "int32u"), "0x01020304"),
            AttributeInstance {
                manufacturer_code: Some(0x1002),
                storage: StorageOption::External,
                ..attribute(0x0010, "on off transition time", "int16u")
            },
            AttributeInstance {
                is_bounded: true,
                min: Some(1),
                max: Some(254),
                ..with_default(attribute(0x0000, "current level", "int8u"), "0x80")
            },
        ],
    );

    vec![
        endpoint(1, vec![on_off, basic_1, on_off_client]),
        endpoint(2, vec![level, basic(2)]),
    ]
}

#[test]
fn dump_light() {
    let tables = collect(&light());

    insta::assert_snapshot!(tables.dump(), @r"
    [scalars]
    largest_attribute_size = 5
    singletons_size = 6
    total_storage_size = 16
    long_defaults_size = 9

    [endpoints]
    E0 = ep 1 :: C0+3 D0+0 size 10 profile 0x0000 net 0
    E1 = ep 2 :: C3+2 D0+0 size 6 profile 0x0000 net 0

    [clusters]
    C0 = 0x00000000 SERVER A0+2 K0+0 V0+1 size 6  ; Endpoint: 1, Cluster: Basic (server)
    C1 = 0x00000006 CLIENT A2+1 K0+1 V1+0 size 2  ; Endpoint: 1, Cluster: On/off (client)
    C2 = 0x00000006 SERVER A3+2 K1+2 V1+0 size 2 fn onOffFunctions  ; Endpoint: 1, Cluster: On/off (server)
    C3 = 0x00000000 SERVER A5+1 K3+0 V1+0 size 1  ; Endpoint: 2, Cluster: Basic (server)
    C4 = 0x00000008 SERVER A6+3 K3+0 V1+0 size 5  ; Endpoint: 2, Cluster: Level Control (server)

    [attributes]
    A0 = 0x00000000 INT8U size 1 SINGLETON 0x8  ; ZCL version
    A1 = 0x00000005 CHAR_STRING size 5 TOKENIZE|SINGLETON @0  ; model identifier
    A2 = 0x0000FFFD INT16U size 2 CLIENT 0x4  ; cluster revision
    A3 = 0x00000000 BOOLEAN size 1 WRITABLE 0x0  ; on off
    A4 = 0x00004003 ENUM8 size 1 WRITABLE|TOKENIZE|NULLABLE 0xFF  ; start up on off
    A5 = 0x00000000 INT8U size 1 SINGLETON 0x8  ; ZCL version
    A6 = 0x00000000 INT8U size 1 MIN_MAX M0  ; current level
    A7 = 0x10020010 INT16U size 2 EXTERNAL_STORAGE -  ; on off transition time
    A8 = 0x00004000 INT32U size 4 0 @5  ; options

    [commands]
    K0 = 0x00000006 0x00000002 OUTGOING_CLIENT  ; Toggle
    K1 = 0x00000006 0x00000000 INCOMING_SERVER  ; Off
    K2 = 0x00000006 0x00000002 INCOMING_SERVER  ; Toggle

    [events]
    V0 = 0x00000000 0x00000000  ; StartUp

    [long_defaults]
    @0 = [04 7A 61 70 63]  ; model identifier
    @5 = [04 03 02 01]  ; options

    [min_max]
    M0 = 128 in 1..=254 (unsigned 1)  ; current level

    [reporting]
    R0 = reported ep 1 0x0006/0x0000 SERVER every 1..65534 change 0

    [attributes.mfg]
    A7 = 0x1002
    ");
}

#[test]
fn tables_are_consistent() {
    let tables = collect(&light());
    assert_eq!(tables.validate(), Ok(()));

    for (i, c) in tables.clusters.iter().enumerate() {
        let range = c.attribute_index as usize..(c.attribute_index + c.attribute_count) as usize;
        let sum: u32 = tables.attributes[range].iter().map(|a| a.storage_size() as u32).sum();
        assert_eq!(c.attribute_size, sum, "cluster {i}");
    }
    for e in &tables.endpoints {
        let range = e.cluster_index as usize..(e.cluster_index + e.cluster_count) as usize;
        let sum: u32 = tables.clusters[range].iter().map(|c| c.attribute_size).sum();
        assert_eq!(e.attribute_size, sum);
    }
}

#[test]
fn collection_is_deterministic() {
    let endpoints = light();
    let first = collect(&endpoints);
    let second = collect(&endpoints);

    assert_eq!(first, second);
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first.dump(), second.dump());
}

#[test]
fn endpoint_order_is_preserved() {
    let tables = collect(&[
        endpoint(9, vec![cluster(0x0003, "Identify", Side::Server, vec![])]),
        endpoint(1, vec![cluster(0x0003, "Identify", Side::Server, vec![])]),
    ]);

    let ids: Vec<u16> = tables.endpoints.iter().map(|e| e.endpoint_id).collect();
    assert_eq!(ids, [9, 1]);
}

#[test]
fn string_with_prefix_takes_long_default() {
    let endpoints = [endpoint(
        1,
        vec![cluster(
            0x0000,
            "Basic",
            Side::Server,
            vec![
                attribute(0x0001, "attr1", "int8u"),
                AttributeInstance {
                    max_length: Some(10),
                    ..nvm_attribute(0x0002, "attr2", "char_string", true)
                },
            ],
        )],
    )];
    let tables = collect(&endpoints);

    assert_eq!(tables.attributes.len(), 2);
    assert_eq!(tables.attributes[1].size, 11);
    assert_eq!(tables.attributes[1].default, DefaultValue::LongOffset(0));
    assert_eq!(tables.long_defaults.len(), 1);
    assert_eq!(tables.long_defaults[0].size, 11);
    assert_eq!(tables.long_defaults[0].bytes, [0; 11]);
    assert_eq!(tables.singletons_size, 11);
}

#[test]
fn long_default_threshold() {
    let attrs = vec![
        attribute(0x0000, "one", "int8u"),
        attribute(0x0001, "two", "int16u"),
        attribute(0x0002, "three", "int24u"),
        attribute(0x0003, "four", "int32u"),
        attribute(0x0004, "eight", "int64u"),
    ];
    let endpoints = [endpoint(1, vec![cluster(0x0000, "Basic", Side::Server, attrs)])];

    let tables = collect(&endpoints);
    let long: Vec<&str> = tables.long_defaults.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(long, ["three", "four", "eight"]);
    for a in &tables.attributes {
        assert_eq!(a.size > 2, matches!(a.default, DefaultValue::LongOffset(_)), "{}", a.name);
    }

    let tables = collect_with(Config::new().space_for_default_value(4), &endpoints).unwrap();
    let long: Vec<&str> = tables.long_defaults.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(long, ["eight"]);
    assert_eq!(tables.long_defaults[0].offset, 0);
}

#[test]
fn long_offsets_are_running_totals() {
    let attrs = vec![
        with_default(attribute(0x0000, "a", "int32u"), "1"),
        with_default(attribute(0x0001, "b", "int24u"), "2"),
        with_default(attribute(0x0002, "c", "int64u"), "3"),
    ];
    let tables = collect(&[endpoint(1, vec![cluster(0x0000, "Basic", Side::Server, attrs)])]);

    let offsets: Vec<u32> = tables.long_defaults.iter().map(|r| r.offset).collect();
    assert_eq!(offsets, [0, 4, 7]);
    assert_eq!(tables.long_defaults_size(), 15);
}

#[test]
fn big_endian_defaults() {
    let attrs = vec![
        with_default(attribute(0x0000, "short", "int16u"), "0x1234"),
        with_default(attribute(0x0001, "long", "int32u"), "0x01020304"),
    ];
    let endpoints = [endpoint(1, vec![cluster(0x0000, "Basic", Side::Server, attrs)])];
    let tables = collect_with(Config::new().endianness(Endianness::Big), &endpoints).unwrap();

    assert_eq!(tables.attributes[0].default, DefaultValue::Inline(0x1234_0000));
    assert_eq!(tables.long_defaults[0].bytes, [1, 2, 3, 4]);
}

#[test]
fn bounded_attribute_gets_min_max_only() {
    let attrs = vec![
        AttributeInstance {
            is_bounded: true,
            ..attribute(0x0000, "wide", "int32s")
        },
        AttributeInstance {
            is_bounded: true,
            max_length: Some(8),
            ..attribute(0x0001, "label", "char_string")
        },
    ];
    let tables = collect(&[endpoint(1, vec![cluster(0x0000, "Basic", Side::Server, attrs)])]);

    assert_eq!(tables.attributes[0].default, DefaultValue::MinMaxIndex(0));
    assert!(tables.attributes[0].mask.contains(AttributeMask::MIN_MAX));
    assert_eq!(tables.min_max.len(), 1);
    assert_eq!(
        (tables.min_max[0].min, tables.min_max[0].max),
        (-2_147_483_648, 2_147_483_647)
    );

    // Strings are never bounded.
    assert!(!tables.attributes[1].mask.contains(AttributeMask::MIN_MAX));
    assert_eq!(tables.attributes[1].default, DefaultValue::LongOffset(0));
    let long: Vec<&str> = tables.long_defaults.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(long, ["label"]);
}

#[test]
fn external_attributes_occupy_no_storage() {
    let external = |code, name: &str, type_name: &str| AttributeInstance {
        storage: StorageOption::External,
        ..attribute(code, name, type_name)
    };
    let attrs = vec![
        external(0x0000, "counter", "int32u"),
        external(0x0001, "route", "Route"),
        external(0x0002, "entries", "array"),
        external(0x0003, "where", "Position"),
    ];
    let tables = collect(&[endpoint(1, vec![cluster(0x0000, "Basic", Side::Server, attrs)])]);

    let sizes: Vec<u16> = tables.attributes.iter().map(|a| a.size).collect();
    assert_eq!(sizes, [4, 0, 0, 4]);
    assert!(tables.attributes.iter().all(|a| a.default == DefaultValue::Empty));
    assert!(tables.long_defaults.is_empty());
    assert_eq!(tables.clusters[0].attribute_size, 0);
    assert_eq!(tables.total_storage_size, 0);
    assert_eq!(tables.largest_attribute_size, 4);
}

#[test]
fn type_macros() {
    let attrs = vec![
        attribute(0x0000, "status", "StatusCode"),
        attribute(0x0001, "features", "Feature"),
        attribute(0x0002, "where", "Position"),
        AttributeInstance {
            max_length: Some(6),
            ..attribute(0x0003, "entries", "ARRAY")
        },
        attribute(0x0004, "key", "Security_Key"),
    ];
    let tables = collect(&[endpoint(1, vec![cluster(0x0000, "Basic", Side::Server, attrs)])]);

    let macros: Vec<&str> = tables.attributes.iter().map(|a| a.type_macro.as_str()).collect();
    assert_eq!(macros, ["ENUM16", "BITMAP32", "STRUCT", "ARRAY", "SECURITY_KEY"]);
    let sizes: Vec<u16> = tables.attributes.iter().map(|a| a.size).collect();
    assert_eq!(sizes, [2, 4, 4, 6, 16]);
}

#[test]
fn command_masks_follow_source_and_side() {
    let both = |code, source| CommandInstance {
        is_incoming: true,
        is_outgoing: true,
        ..CommandInstance::new(code, "cmd", source)
    };
    let mut client = ClusterInstance::new(0x0006, "On/off", Side::Client);
    client.commands = vec![both(0x00, CommandSource::Client), both(0x01, CommandSource::Server)];
    let mut server = ClusterInstance::new(0x0006, "On/off", Side::Server);
    server.commands = vec![
        both(0x00, CommandSource::Client),
        both(0x01, CommandSource::Server),
        CommandInstance::new(0x02, "cmd", CommandSource::Client),
    ];

    let tables = collect(&[endpoint(1, vec![server, client])]);
    let masks: Vec<CommandMask> = tables.commands.iter().map(|k| k.mask).collect();
    assert_eq!(
        masks,
        [
            CommandMask::OUTGOING_CLIENT,
            CommandMask::INCOMING_CLIENT,
            CommandMask::INCOMING_SERVER,
            CommandMask::OUTGOING_SERVER,
            CommandMask::empty(),
        ]
    );
}

#[test]
fn manufacturer_specific_elements() {
    let mut c = cluster(
        0xFC00,
        "Private",
        Side::Server,
        vec![
            AttributeInstance {
                manufacturer_code: Some(0x1234),
                ..attribute(0x0000, "secret", "int8u")
            },
            AttributeInstance {
                manufacturer_code: Some(0),
                ..attribute(0x0001, "plain", "int8u")
            },
        ],
    );
    c.manufacturer_code = Some(0x1234);
    c.commands = vec![
        CommandInstance {
            manufacturer_code: Some(0x1234),
            ..incoming(0x00, "Poke")
        },
        incoming(0x01, "Standard"),
    ];
    let tables = collect(&[endpoint(1, vec![cluster(0x0000, "Basic", Side::Server, vec![]), c])]);

    assert_eq!(tables.clusters[1].id.manufacturer_code(), Some(0x1234));
    assert!(tables.attributes[1].id.is_standard());

    let attr_mfg: Vec<(u16, u16)> = tables
        .attribute_mfg_codes
        .iter()
        .map(|e| (e.index, e.manufacturer_code))
        .collect();
    assert_eq!(attr_mfg, [(0, 0x1234)]);

    // The standard command sorts first.
    assert_eq!(tables.commands[0].name, "Standard");
    let cmd_mfg: Vec<(u16, u16)> = tables
        .command_mfg_codes
        .iter()
        .map(|e| (e.index, e.manufacturer_code))
        .collect();
    assert_eq!(cmd_mfg, [(1, 0x1234)]);

    let cluster_mfg: Vec<(u16, u16)> = tables
        .cluster_mfg_codes
        .iter()
        .map(|e| (e.index, e.manufacturer_code))
        .collect();
    assert_eq!(cluster_mfg, [(1, 0x1234)]);
    assert_eq!(tables.validate(), Ok(()));
}

#[test]
fn reporting_configuration() {
    let attrs = vec![AttributeInstance {
        side: Side::Client,
        included_reportable: true,
        min_interval: Some(5),
        max_interval: Some(300),
        reportable_change: Some(10),
        manufacturer_code: Some(0x1002),
        ..attribute(0x0000, "measured", "int16s")
    }];
    let tables = collect(&[endpoint(3, vec![cluster(0x0402, "Temperature", Side::Client, attrs)])]);

    let r = &tables.reporting[0];
    assert_eq!(r.direction, ReportingDirection::Received);
    assert_eq!(r.endpoint_id, 3);
    assert_eq!((r.cluster_id, r.attribute_id), (0x0402, 0x0000));
    assert_eq!(r.mask, ClusterMask::CLIENT);
    assert_eq!((r.min_interval, r.max_interval, r.reportable_change), (5, 300, 10));
    assert_eq!(r.manufacturer_code, Some(0x1002));
}

#[test]
fn singleton_counted_once_across_endpoints() {
    let shared = || {
        cluster(
            0x0000,
            "Basic",
            Side::Server,
            vec![with_default(nvm_attribute(0x0004, "vendor", "int32u", true), "1")],
        )
    };
    let tables = collect(&[endpoint(1, vec![shared()]), endpoint(2, vec![shared()])]);

    assert_eq!(tables.singletons_size, 4);
    assert_eq!(tables.total_storage_size, 8);
    assert_eq!(tables.long_defaults.len(), 2);
}

#[test]
fn singletons_on_both_sides_count_separately() {
    let on_time = |side| {
        cluster(
            0x0006,
            "On/off",
            side,
            vec![AttributeInstance {
                side,
                ..nvm_attribute(0x0000, "on time", "int32u", true)
            }],
        )
    };
    let both = || vec![on_time(Side::Client), on_time(Side::Server)];
    let tables = collect(&[endpoint(1, both()), endpoint(2, both())]);

    assert_eq!(tables.singletons_size, 8);
    assert_eq!(tables.total_storage_size, 16);
    assert_eq!(tables.attributes.iter().filter(|a| a.is_singleton()).count(), 4);
}

#[test]
fn bounded_float_defaults_truncate() {
    let gain = AttributeInstance {
        is_bounded: true,
        is_writable: true,
        ..with_default(attribute(0x0000, "gain", "single"), "0.5")
    };
    let offset = AttributeInstance {
        is_bounded: true,
        min: Some(-10),
        max: Some(10),
        ..with_default(attribute(0x0001, "offset", "single"), "-2.75")
    };
    let tables = collect(&[endpoint(
        1,
        vec![cluster(0x0300, "Color Control", Side::Server, vec![gain, offset])],
    )]);

    assert_eq!(tables.attributes[0].default, DefaultValue::MinMaxIndex(0));
    let m = &tables.min_max[0];
    assert_eq!((m.default, m.min, m.max), (0, -2_147_483_648, 2_147_483_647));
    assert!(m.is_signed);
    let m = &tables.min_max[1];
    assert_eq!((m.default, m.min, m.max), (-2, -10, 10));
}

#[test]
fn endpoint_identity_and_device_types() {
    let root = EndpointType {
        profile_id: 0x0104,
        device_types: vec![DeviceType::new(0x0016, 1)],
        ..endpoint(
            0,
            vec![cluster(
                0x0000,
                "Basic",
                Side::Server,
                vec![attribute(0x0000, "ZCL version", "int8u")],
            )],
        )
    };
    let light = EndpointType {
        profile_id: 0x0104,
        parent_endpoint: Some(0),
        device_types: vec![DeviceType::new(0x0100, 2), DeviceType::new(0x0011, 1)],
        ..endpoint(1, vec![])
    };
    let tables = collect(&[root, light, endpoint(2, vec![])]);

    assert_eq!(tables.validate(), Ok(()));
    insta::assert_snapshot!(tables.dump(), @r"
    [scalars]
    largest_attribute_size = 1
    singletons_size = 0
    total_storage_size = 1
    long_defaults_size = 0

    [endpoints]
    E0 = ep 0 :: C0+1 D0+1 size 1 profile 0x0104 net 0
    E1 = ep 1 :: C1+0 D1+2 size 0 profile 0x0104 net 0 parent 0
    E2 = ep 2 :: C1+0 D3+0 size 0 profile 0x0000 net 0

    [device_types]
    D0 = ep 0 0x00000016 v1
    D1 = ep 1 0x00000100 v2
    D2 = ep 1 0x00000011 v1

    [clusters]
    C0 = 0x00000000 SERVER A0+1 K0+0 V0+0 size 1  ; Endpoint: 0, Cluster: Basic (server)

    [attributes]
    A0 = 0x00000000 INT8U size 1 0 0x0  ; ZCL version
    ");
}

#[test]
fn unknown_type_aborts_collection() {
    let attrs = vec![attribute(0x0000, "ok", "int8u"), attribute(0x0001, "odd", "mystery")];
    let err = collect_with(Config::new(), &[endpoint(7, vec![cluster(0x0000, "Basic", Side::Server, attrs)])])
        .unwrap_err();

    assert_eq!(
        err,
        Error::Attribute {
            endpoint: 7,
            cluster: "Basic".into(),
            attribute: "odd".into(),
            type_name: "mystery".into(),
            source: ResolveError::UnresolvableType("mystery".into()),
        }
    );
    insta::assert_snapshot!(err.to_string(), @"endpoint 7, cluster `Basic`, attribute `odd` (type `mystery`): type `mystery` is not in the catalog and has no usable max length");
}

#[test]
fn unknown_type_with_max_length() {
    let attrs = vec![AttributeInstance {
        max_length: Some(3),
        ..attribute(0x0000, "blob", "mystery")
    }];
    let tables = collect(&[endpoint(1, vec![cluster(0x0000, "Basic", Side::Server, attrs)])]);

    assert_eq!(tables.attributes[0].type_macro, "UNKNOWN");
    assert_eq!(tables.attributes[0].size, 3);
}

#[test]
fn variable_struct_needs_max_length() {
    let attrs = vec![attribute(0x0000, "route", "Route")];
    let err = collect_with(Config::new(), &[endpoint(1, vec![cluster(0x0000, "Basic", Side::Server, attrs)])])
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Attribute {
            source: ResolveError::UnresolvableType(_),
            ..
        }
    ));
}

#[test]
fn ambiguous_type_aborts_collection() {
    let mut catalog = zcl_catalog();
    catalog.add_bitmap("StartUpOnOff", 1);
    let attrs = vec![attribute(0x0000, "start", "StartUpOnOff")];
    let config = Config::new();
    let err = LayoutCollector::new(&catalog, &config)
        .collect(&[endpoint(1, vec![cluster(0x0006, "On/off", Side::Server, attrs)])])
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Attribute {
            source: ResolveError::AmbiguousType { .. },
            ..
        }
    ));
}

#[test]
fn bad_default_aborts_collection() {
    let attrs = vec![with_default(attribute(0x0000, "level", "int8u"), "300")];
    let err = collect_with(Config::new(), &[endpoint(1, vec![cluster(0x0008, "Level", Side::Server, attrs)])])
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"default `300` of attribute `level` does not fit in 1 bytes");
}

#[test]
fn loads_endpoints_from_json() {
    let json = indoc! {r#"
        [
          {
            "endpointId": 1,
            "clusters": [
              {
                "code": 6,
                "name": "On/off",
                "side": "server",
                "attributes": [
                  { "code": 0, "name": "on off", "type": "BOOLEAN", "side": "server", "isWritable": true },
                  { "code": 16387, "name": "start up", "type": "StartUpOnOff", "side": "server", "storage": "NVM", "defaultValue": "0xFF" }
                ]
              }
            ]
          }
        ]
    "#};
    let endpoints: Vec<EndpointType> = serde_json::from_str(json).unwrap();
    let tables = collect(&endpoints);

    insta::assert_snapshot!(tables.dump(), @r"
    [scalars]
    largest_attribute_size = 1
    singletons_size = 0
    total_storage_size = 2
    long_defaults_size = 0

    [endpoints]
    E0 = ep 1 :: C0+1 D0+0 size 2 profile 0x0000 net 0

    [clusters]
    C0 = 0x00000006 SERVER A0+2 K0+0 V0+0 size 2  ; Endpoint: 1, Cluster: On/off (server)

    [attributes]
    A0 = 0x00000000 BOOLEAN size 1 WRITABLE 0x0  ; on off
    A1 = 0x00004003 ENUM8 size 1 TOKENIZE 0xFF  ; start up
    ");
}
