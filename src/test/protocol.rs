use crate::error::SimError;
use crate::net::{Extender, Message, NodeId, Topology};
use crate::notify::{NotificationKind, NotificationLog};
use crate::proto::{Bgp, BgpConfig, ProtocolKind};
use crate::routing::BgpRoute;
use crate::sim::{Context, NoDelay, SimTime};

fn route(lp: i32, ids: &[usize]) -> BgpRoute {
    BgpRoute::new(lp, ids.iter().map(|&i| NodeId(i)).collect::<Vec<_>>())
}

fn log(ctx: &Context) -> &NotificationLog {
    ctx.sink()
        .as_any()
        .downcast_ref::<NotificationLog>()
        .expect("log sink")
}

/// 节点 0、1、2；链路 1->0（代价 0）和 1->2（代价 1）。
fn triangle(kind: ProtocolKind) -> Topology {
    let mut b = Topology::builder();
    for id in 0..3 {
        b.add_node(NodeId(id), BgpConfig::new(kind)).expect("node");
    }
    b.add_link(NodeId(1), NodeId(0), Extender::ShortestPath { cost: 0 })
        .expect("link");
    b.add_link(NodeId(1), NodeId(2), Extender::ShortestPath { cost: 1 })
        .expect("link");
    b.build()
}

fn deliver(topology: &mut Topology, ctx: &mut Context, sender: usize, r: BgpRoute) {
    topology
        .deliver(
            Message {
                sender: NodeId(sender),
                recipient: NodeId(1),
                route: r,
            },
            ctx,
        )
        .expect("deliver");
}

fn detections(ctx: &Context) -> Vec<NodeId> {
    log(ctx)
        .iter()
        .filter_map(|n| match &n.kind {
            NotificationKind::Detect { sender, .. } => Some(*sender),
            _ => None,
        })
        .collect()
}

#[test]
fn recurrence_predicates_per_protocol() {
    let node = NodeId(1);
    let learned = route(6, &[0, 1, 2]);
    let same_prefix_alt = route(0, &[0]);
    let other_alt = route(0, &[4]);
    let previous = route(6, &[0, 2]);

    assert!(!ProtocolKind::Bgp.is_recurrent(node, &learned, &same_prefix_alt, &previous));

    assert!(ProtocolKind::SsBgp.is_recurrent(node, &learned, &other_alt, &previous));
    assert!(!ProtocolKind::SsBgp.is_recurrent(node, &learned, &route(6, &[0]), &previous));
    assert!(ProtocolKind::SsBgp.is_recurrent(node, &learned, &BgpRoute::invalid(), &previous));

    assert!(ProtocolKind::IssBgp.is_recurrent(node, &learned, &same_prefix_alt, &previous));
    assert!(!ProtocolKind::IssBgp.is_recurrent(node, &learned, &other_alt, &previous));

    assert!(ProtocolKind::SsBgp2.is_recurrent(node, &learned, &other_alt, &previous));
    assert!(!ProtocolKind::SsBgp2.is_recurrent(node, &learned, &other_alt, &route(0, &[7])));

    assert!(ProtocolKind::IssBgp2.is_recurrent(node, &learned, &same_prefix_alt, &previous));
    assert!(!ProtocolKind::IssBgp2.is_recurrent(node, &learned, &other_alt, &previous));
}

#[test]
fn learn_invalidates_only_routes_through_the_node() {
    let mut bgp = Bgp::new(BgpConfig::new(ProtocolKind::SsBgp));
    let mut ctx = Context::new(NoDelay, NotificationLog::default());

    let clean = route(2, &[0, 3]);
    assert_eq!(
        bgp.learn(NodeId(1), NodeId(2), clean.clone(), &mut ctx),
        Ok(clean)
    );
    assert!(detections(&ctx).is_empty());

    let looping = route(2, &[0, 1]);
    let learned = bgp
        .learn(NodeId(1), NodeId(2), looping, &mut ctx)
        .expect("learn");
    assert!(!learned.is_valid());
    assert_eq!(detections(&ctx), vec![NodeId(2)]);
    assert!(!bgp.selector().is_enabled(NodeId(2)));
}

#[test]
fn plain_bgp_drops_looping_routes_without_disabling() {
    let mut topology = triangle(ProtocolKind::Bgp);
    let mut ctx = Context::new(NoDelay, NotificationLog::default());

    deliver(&mut topology, &mut ctx, 0, route(0, &[]));
    deliver(&mut topology, &mut ctx, 2, route(5, &[0, 1]));

    assert_eq!(topology.selected_route(NodeId(1)), Some(&route(0, &[0])));
    assert!(topology.is_link_enabled(NodeId(1), NodeId(2)));
    assert!(detections(&ctx).is_empty());

    let learned_invalid = log(&ctx).iter().any(|n| {
        matches!(&n.kind, NotificationKind::Learn { sender, route, .. }
            if *sender == NodeId(2) && !route.is_valid())
    });
    assert!(learned_invalid);
}

#[test]
fn iss_bgp_disables_sender_on_recurrent_loop_once() {
    let mut topology = triangle(ProtocolKind::IssBgp);
    let mut ctx = Context::new(NoDelay, NotificationLog::default());

    deliver(&mut topology, &mut ctx, 0, route(0, &[]));
    deliver(&mut topology, &mut ctx, 2, route(5, &[0, 1]));

    assert!(!topology.is_link_enabled(NodeId(1), NodeId(2)));
    assert_eq!(topology.disabled_links(), vec![(NodeId(1), NodeId(2))]);
    assert_eq!(detections(&ctx), vec![NodeId(2)]);
    assert_eq!(topology.selected_neighbor(NodeId(1)), Some(NodeId(0)));

    // 已禁用的发送方再次带来环路：不再重复检测
    deliver(&mut topology, &mut ctx, 2, route(7, &[0, 1]));
    assert_eq!(detections(&ctx).len(), 1);
}

#[test]
fn iss_bgp_ignores_loops_whose_prefix_differs_from_the_alternative() {
    let mut topology = triangle(ProtocolKind::IssBgp);
    let mut ctx = Context::new(NoDelay, NotificationLog::default());

    deliver(&mut topology, &mut ctx, 0, route(0, &[]));
    deliver(&mut topology, &mut ctx, 2, route(5, &[3, 1]));

    assert!(topology.is_link_enabled(NodeId(1), NodeId(2)));
    assert!(detections(&ctx).is_empty());
}

#[test]
fn ss_bgp_disables_when_loop_beats_alternative() {
    let mut topology = triangle(ProtocolKind::SsBgp);
    let mut ctx = Context::new(NoDelay, NotificationLog::default());

    deliver(&mut topology, &mut ctx, 0, route(0, &[]));
    deliver(&mut topology, &mut ctx, 2, route(5, &[3, 1]));

    assert!(!topology.is_link_enabled(NodeId(1), NodeId(2)));
}

#[test]
fn message_over_missing_link_is_an_error() {
    let mut topology = triangle(ProtocolKind::Bgp);
    let mut ctx = Context::default();
    let err = topology
        .deliver(
            Message {
                sender: NodeId(0),
                recipient: NodeId(2),
                route: route(0, &[]),
            },
            &mut ctx,
        )
        .expect_err("no link 2 -> 0");
    assert_eq!(
        err,
        SimError::UnknownLink {
            tail: NodeId(2),
            head: NodeId(0)
        }
    );
}

#[test]
fn mrai_suppresses_exports_until_the_timer_expires() {
    let mut b = Topology::builder();
    b.add_node(
        NodeId(1),
        BgpConfig::new(ProtocolKind::Bgp).with_mrai(SimTime(10)),
    )
    .expect("node");
    b.add_node(NodeId(2), BgpConfig::default()).expect("node");
    b.add_link(NodeId(2), NodeId(1), Extender::ShortestPath { cost: 0 })
        .expect("link");
    let mut topology = b.build();
    let mut ctx = Context::default();

    topology
        .advertise(NodeId(1), route(0, &[]), &mut ctx)
        .expect("advertise");
    let bgp = topology.node(NodeId(1)).expect("node 1").protocol();
    assert_eq!(bgp.last_sent(), &route(0, &[]));
    assert!(bgp.mrai_timer().is_running());
    // 一条消息 + 一个 MRAI 到期事件
    assert_eq!(ctx.scheduler().len(), 2);

    topology
        .advertise(NodeId(1), route(3, &[]), &mut ctx)
        .expect("advertise");
    let bgp = topology.node(NodeId(1)).expect("node 1").protocol();
    assert_eq!(bgp.selected_route(), &route(3, &[]));
    assert_eq!(bgp.last_sent(), &route(0, &[]));
    assert_eq!(ctx.scheduler().len(), 2);

    topology.reset();
    let bgp = topology.node(NodeId(1)).expect("node 1").protocol();
    assert!(!bgp.selected_route().is_valid());
    assert!(bgp.mrai_timer().is_expired());
    assert_eq!(bgp.last_sent(), &BgpRoute::invalid());
    let link = topology.link(NodeId(2), NodeId(1)).expect("link");
    assert_eq!(link.exporter().last_deliver_time(), SimTime::ZERO);
}
