use crate::error::ConfigError;
use crate::net::{local_pref, Extender, NodeId, Policy, Relation};
use crate::routing::{BgpRoute, Path};

fn from_dest(lp: i32) -> BgpRoute {
    BgpRoute::new(lp, vec![NodeId(0)])
}

#[test]
fn shortest_path_adds_cost_and_appends_sender() {
    let ext = Extender::ShortestPath { cost: 10 };
    let out = ext.extend(&BgpRoute::new(0, Path::empty()), NodeId(1));
    assert_eq!(out, BgpRoute::new(10, vec![NodeId(1)]));

    let neg = Extender::ShortestPath { cost: -4 };
    assert_eq!(neg.extend(&out, NodeId(2)).local_pref(), 6);
}

#[test]
fn shortest_path_overflow_and_invalid_input_yield_invalid() {
    let ext = Extender::ShortestPath { cost: 1 };
    assert!(!ext.extend(&from_dest(i32::MAX), NodeId(1)).is_valid());
    assert!(!ext.extend(&BgpRoute::invalid(), NodeId(1)).is_valid());
}

#[test]
fn interdomain_customer_and_peer_links_only_carry_exportable_routes() {
    let customer = from_dest(local_pref::CUSTOMER);
    let peer = from_dest(local_pref::PEER);
    let provider = from_dest(local_pref::PROVIDER);
    let peer_plus = from_dest(local_pref::PEER_PLUS);

    let c = Extender::Interdomain(Relation::Customer);
    assert_eq!(c.extend(&customer, NodeId(5)).local_pref(), local_pref::CUSTOMER);
    assert_eq!(c.extend(&peer_plus, NodeId(5)).local_pref(), local_pref::CUSTOMER);
    assert!(!c.extend(&peer, NodeId(5)).is_valid());
    assert!(!c.extend(&provider, NodeId(5)).is_valid());

    let r = Extender::Interdomain(Relation::Peer);
    assert_eq!(r.extend(&customer, NodeId(5)).local_pref(), local_pref::PEER);
    assert!(!r.extend(&provider, NodeId(5)).is_valid());

    let plus = Extender::Interdomain(Relation::PeerPlus);
    assert_eq!(plus.extend(&customer, NodeId(5)).local_pref(), local_pref::PEER_PLUS);
    let star = Extender::Interdomain(Relation::PeerStar);
    assert_eq!(star.extend(&peer_plus, NodeId(5)).local_pref(), local_pref::PEER_STAR);
    assert!(!star.extend(&from_dest(local_pref::PEER_STAR), NodeId(5)).is_valid());
}

#[test]
fn interdomain_provider_accepts_everything() {
    let p = Extender::Interdomain(Relation::Provider);
    for lp in [
        local_pref::PEER_PLUS,
        local_pref::PEER_STAR,
        local_pref::CUSTOMER,
        local_pref::PEER,
        local_pref::PROVIDER,
    ] {
        let out = p.extend(&from_dest(lp), NodeId(7));
        assert_eq!(out.local_pref(), local_pref::PROVIDER);
        assert_eq!(out.as_path().nodes(), &[NodeId(0), NodeId(7)]);
    }
}

#[test]
fn sibling_keeps_the_class_and_decrements_local_pref() {
    let s = Extender::Interdomain(Relation::Sibling);
    let out = s.extend(&from_dest(local_pref::CUSTOMER), NodeId(2));
    assert_eq!(out.local_pref(), local_pref::CUSTOMER - 1);

    // 仍是客户路由，可以经客户链路继续传播
    let c = Extender::Interdomain(Relation::Customer);
    assert_eq!(c.extend(&out, NodeId(3)).local_pref(), local_pref::CUSTOMER);
}

#[test]
fn policy_parses_labels() {
    assert_eq!(
        Policy::ShortestPath.extender(" -3 ").expect("cost"),
        Extender::ShortestPath { cost: -3 }
    );
    for (label, relation) in [
        ("C", Relation::Customer),
        ("R", Relation::Peer),
        ("P", Relation::Provider),
        ("R+", Relation::PeerPlus),
        ("R*", Relation::PeerStar),
        ("S", Relation::Sibling),
    ] {
        let ext = Policy::Interdomain.extender(label).expect("relation");
        assert_eq!(ext, Extender::Interdomain(relation));
        assert_eq!(ext.to_string(), label);
    }

    let err = Policy::Interdomain.extender("X").expect_err("unknown label");
    assert!(matches!(
        err,
        ConfigError::UnknownLabel { ref label, policy: "interdomain" } if label == "X"
    ));
    assert!(Policy::ShortestPath.extender("C").is_err());
}

#[test]
fn self_routes_per_policy() {
    assert_eq!(Policy::ShortestPath.self_route(), BgpRoute::new(0, Path::empty()));
    assert_eq!(
        Policy::Interdomain.self_route(),
        BgpRoute::new(local_pref::CUSTOMER, Path::empty())
    );
}
