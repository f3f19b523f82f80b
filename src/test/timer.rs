use crate::error::SimError;
use crate::net::NodeId;
use crate::sim::{Context, SimTime, Timer, TimerKind};

#[test]
fn new_timer_is_expired_until_started() {
    let mut ctx = Context::default();
    let mut timer = Timer::new(SimTime(5));
    assert!(timer.is_expired());

    timer
        .start(NodeId(1), TimerKind::Mrai, &mut ctx)
        .expect("start");
    assert!(timer.is_running());
    assert_eq!(ctx.scheduler().len(), 1);

    let item = ctx.scheduler_mut().next_event().expect("expiry event");
    assert_eq!(item.at(), SimTime(5));
}

#[test]
fn starting_a_running_timer_fails() {
    let mut ctx = Context::default();
    let mut timer = Timer::new(SimTime(5));
    timer
        .start(NodeId(1), TimerKind::Mrai, &mut ctx)
        .expect("start");
    assert_eq!(
        timer.start(NodeId(1), TimerKind::Mrai, &mut ctx),
        Err(SimError::TimerAlreadyRunning)
    );
    assert_eq!(ctx.scheduler().len(), 1);
}

#[test]
fn fire_marks_expired_before_the_callback_runs() {
    let mut ctx = Context::default();
    let mut timer = Timer::new(SimTime(3));
    timer
        .start(NodeId(0), TimerKind::Reenable, &mut ctx)
        .expect("start");

    assert!(timer.fire(1));
    assert!(timer.is_expired());
    // 回调中可以立即重启
    timer
        .start(NodeId(0), TimerKind::Reenable, &mut ctx)
        .expect("restart from callback");
}

#[test]
fn cancelled_or_stale_expiry_does_not_fire() {
    let mut ctx = Context::default();
    let mut timer = Timer::new(SimTime(3));
    timer
        .start(NodeId(0), TimerKind::Mrai, &mut ctx)
        .expect("start");

    timer.cancel();
    assert!(timer.is_expired());
    assert!(!timer.fire(1));

    timer
        .start(NodeId(0), TimerKind::Mrai, &mut ctx)
        .expect("restart");
    // 第一次启动留下的到期事件已经过时
    assert!(!timer.fire(1));
    assert!(timer.is_running());
    assert!(timer.fire(2));
}

#[test]
fn disabled_timer_has_zero_duration() {
    let timer = Timer::disabled();
    assert_eq!(timer.duration(), SimTime::ZERO);
    assert!(timer.is_expired());
}
