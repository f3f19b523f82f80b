use crate::error::{ConfigError, TopologyError};
use crate::net::{Extender, NodeId, Policy, Relation};
use crate::proto::ProtocolKind;
use crate::sim::SimTime;
use crate::topo::{ProtocolSpec, TopologySpec};

const INTERDOMAIN: &str = r#"
{
    "policy": "interdomain",
    "defaults": { "protocol": "ssbgp", "mrai": 5 },
    "nodes": [
        { "id": 0 },
        { "id": 1, "protocol": { "protocol": "issbgp", "reenable": 50 } },
        { "id": 2 }
    ],
    "links": [
        { "from": 1, "to": 0, "label": "C" },
        { "from": 2, "to": 1, "label": "R+" }
    ],
    "advertisements": [ { "node": 0, "time": 3 } ]
}
"#;

#[test]
fn spec_builds_topology_and_advertisements() {
    let spec = TopologySpec::from_json(INTERDOMAIN).expect("parse");
    assert_eq!(spec.policy, Policy::Interdomain);

    let (topo, ads) = spec.build(&ProtocolSpec::default()).expect("build");
    assert_eq!(topo.len(), 3);
    assert_eq!(
        topo.link(NodeId(2), NodeId(1)).map(|l| l.extender),
        Some(Extender::Interdomain(Relation::PeerPlus))
    );

    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0].advertiser, NodeId(0));
    assert_eq!(ads[0].time, SimTime(3));
    assert_eq!(ads[0].route, Policy::Interdomain.self_route());

    let c0 = topo.node(NodeId(0)).expect("node 0").protocol().config();
    assert_eq!(c0.kind, ProtocolKind::SsBgp);
    assert_eq!(c0.mrai, SimTime(5));
    assert_eq!(c0.reenable_interval, None);

    let c1 = topo.node(NodeId(1)).expect("node 1").protocol().config();
    assert_eq!(c1.kind, ProtocolKind::IssBgp);
    assert_eq!(c1.mrai, SimTime(5));
    assert_eq!(c1.reenable_interval, Some(SimTime(50)));
}

#[test]
fn overrides_take_precedence_over_the_file() {
    let spec = TopologySpec::from_json(INTERDOMAIN).expect("parse");
    let overrides = ProtocolSpec {
        protocol: Some(ProtocolKind::Bgp),
        mrai: Some(0),
        reenable: None,
    };
    let (topo, _) = spec.build(&overrides).expect("build");
    for node in topo.nodes() {
        assert_eq!(node.protocol().config().kind, ProtocolKind::Bgp);
        assert!(node.protocol().config().mrai.is_zero());
    }
    let c1 = topo.node(NodeId(1)).expect("node 1").protocol().config();
    assert_eq!(c1.reenable_interval, Some(SimTime(50)));
}

#[test]
fn minimal_shortest_path_spec_uses_defaults() {
    let raw = r#"{ "policy": "shortest_path", "nodes": [ { "id": 0 }, { "id": 1 } ],
                  "links": [ { "from": 1, "to": 0, "label": "-2" } ] }"#;
    let spec = TopologySpec::from_json(raw).expect("parse");
    let (topo, ads) = spec.build(&ProtocolSpec::default()).expect("build");
    assert!(ads.is_empty());
    assert_eq!(
        topo.link(NodeId(1), NodeId(0)).map(|l| l.extender),
        Some(Extender::ShortestPath { cost: -2 })
    );
    let config = topo.node(NodeId(1)).expect("node").protocol().config();
    assert_eq!(config.kind, ProtocolKind::Bgp);
}

#[test]
fn invalid_specs_are_reported() {
    let bad_label = r#"{ "policy": "interdomain", "nodes": [ { "id": 0 }, { "id": 1 } ],
                        "links": [ { "from": 1, "to": 0, "label": "Q" } ] }"#;
    let err = TopologySpec::from_json(bad_label)
        .and_then(|s| s.build(&ProtocolSpec::default()))
        .err();
    assert!(matches!(err, Some(ConfigError::UnknownLabel { .. })));

    let dup = r#"{ "policy": "shortest_path", "nodes": [ { "id": 0 }, { "id": 0 } ] }"#;
    let err = TopologySpec::from_json(dup)
        .and_then(|s| s.build(&ProtocolSpec::default()))
        .err();
    assert!(matches!(
        err,
        Some(ConfigError::Topology(TopologyError::DuplicateNode(NodeId(0))))
    ));

    let ghost = r#"{ "policy": "shortest_path", "nodes": [ { "id": 0 } ],
                    "advertisements": [ { "node": 3 } ] }"#;
    let err = TopologySpec::from_json(ghost)
        .and_then(|s| s.build(&ProtocolSpec::default()))
        .err();
    assert!(matches!(err, Some(ConfigError::UnknownAdvertiser(NodeId(3)))));

    assert!(matches!(
        TopologySpec::from_json("{ not json"),
        Err(ConfigError::Parse(_))
    ));
}
